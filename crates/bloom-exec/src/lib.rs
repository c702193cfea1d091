mod error;
pub use error::ExecError;

mod metrics;
pub use metrics::{BACKEND_GITHUB, BACKEND_SUBPROCESS};

#[cfg(feature = "subprocess")]
pub mod subprocess;

#[cfg(feature = "github")]
pub mod github;
