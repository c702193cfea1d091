use bloom_model::ActionResult;

pub(crate) const NOT_IMPLEMENTED: &str = "notify not implemented (platform-specific)";

/// Reserved action: runs nothing and says so.
pub(crate) fn notify() -> ActionResult {
    ActionResult::unimplemented(NOT_IMPLEMENTED)
}
