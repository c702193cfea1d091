mod kind;
pub use kind::{ActionKind, Payload};

mod params;
pub use params::{
    FetchMergeParams, GitParams, JobSubmitParams, PushMergeParams, RunScriptParams,
    WorkflowDispatchParams,
};
