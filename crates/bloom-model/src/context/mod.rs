mod key;
pub use key::{ContextKey, Environment, ModelFamily};

mod class;
pub use class::ActionClass;

mod query;
pub use query::ContextQuery;
