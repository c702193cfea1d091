//! Action router: turns a node plus an action into exactly one handler call.
//!
//! Backends are registered once at setup; the router itself carries no
//! per-call state, so a single instance can serve concurrent callers.
use std::{path::Path, sync::Arc, time::Instant};

use bloom_model::{
    ActionKind, ActionResult, ContextKey, ContextQuery, ModelError, NodeRecord, Payload,
    TriggerPlan,
};
use tracing::{debug, info, instrument, warn};

use crate::{
    context::classify,
    error::CoreError,
    handlers::{Backends, HandlerResult, git, notify, scheduler, script, workflow},
    metrics::ActionOutcome,
    runner::{CommandRunner, WorkflowClient},
};

mod context;
pub use context::TriggerContext;

mod plan;
pub use plan::{CONNECT_SCRIPT, Resolution, SYNC_SCRIPT, quote, render};

/// Label used for actions whose name is not recognised.
const UNKNOWN_ACTION_LABEL: &str = "unknown";

/// Dispatches actions to handlers and contexts to helper plans.
#[derive(Default)]
pub struct ActionRouter {
    commands: Option<Arc<dyn CommandRunner>>,
    workflows: Option<Arc<dyn WorkflowClient>>,
    ctx: TriggerContext,
}

impl ActionRouter {
    /// Create a router without backends and with a default context.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the context shared by all handlers.
    #[inline]
    pub fn with_context(mut self, ctx: TriggerContext) -> Self {
        self.ctx = ctx;
        self
    }

    /// Register the backend for git, scheduler and shell actions.
    ///
    /// A later registration replaces the earlier one.
    pub fn register_command_runner(&mut self, runner: Arc<dyn CommandRunner>) {
        debug!(backend = runner.name(), "command runner registered");
        self.commands = Some(runner);
    }

    /// Register the backend for `workflow_dispatch`.
    pub fn register_workflow_client(&mut self, client: Arc<dyn WorkflowClient>) {
        debug!(backend = client.name(), "workflow client registered");
        self.workflows = Some(client);
    }

    pub fn context(&self) -> &TriggerContext {
        &self.ctx
    }

    /// Registered command runner, if any.
    pub fn command_runner(&self) -> Option<&Arc<dyn CommandRunner>> {
        self.commands.as_ref()
    }

    /// Run one typed action against a node.
    ///
    /// Never fails: preconditions, backend errors and non-zero exits all come
    /// back as an [`ActionResult`] with `ok == false`.
    #[instrument(level = "debug", skip(self, node, action), fields(action = action.name(), node = %node.name))]
    pub fn trigger(&self, node: &NodeRecord, action: &ActionKind) -> ActionResult {
        let name = action.name();
        let metrics = self.ctx.metrics();
        metrics.record_action_started(name);
        let started = Instant::now();

        let (result, outcome) = match self.dispatch(node, action) {
            Ok(res) => {
                let outcome = ActionOutcome::of(&res);
                (res, outcome)
            }
            Err(pre) => {
                info!(reason = %pre, "action rejected");
                (ActionResult::failure(pre.to_string()), ActionOutcome::Rejected)
            }
        };

        let elapsed = started.elapsed().as_millis() as u64;
        metrics.record_action_completed(name, outcome, elapsed);
        match outcome {
            ActionOutcome::Failure => {
                warn!(error = ?result.error, elapsed_ms = elapsed, "action failed")
            }
            _ => debug!(outcome = outcome.as_label(), elapsed_ms = elapsed, "action finished"),
        }
        result
    }

    /// Run an action given by name with an open payload.
    ///
    /// Unknown names and ill-typed payloads are reported as failed results.
    pub fn trigger_named(&self, node: &NodeRecord, action: &str, payload: &Payload) -> ActionResult {
        match ActionKind::from_payload(action, payload) {
            Ok(kind) => self.trigger(node, &kind),
            Err(e) => {
                let label = match e {
                    ModelError::UnknownAction(_) => UNKNOWN_ACTION_LABEL,
                    _ => ActionKind::NAMES
                        .iter()
                        .copied()
                        .find(|n| *n == action)
                        .unwrap_or(UNKNOWN_ACTION_LABEL),
                };
                info!(action, node = %node.name, error = %e, "action rejected");
                let metrics = self.ctx.metrics();
                metrics.record_action_started(label);
                metrics.record_action_completed(label, ActionOutcome::Rejected, 0);
                ActionResult::failure(e.to_string())
            }
        }
    }

    /// Context key for a query: its explicit key or the derived one, else the
    /// configured default.
    pub fn resolve(&self, query: &ContextQuery) -> Option<ContextKey> {
        plan::select_key(self.ctx.config(), query)
    }

    /// Resolve a context, classify it and describe the helper to run.
    ///
    /// The helper is described, never executed. With
    /// [`Resolution::Required`] an unresolvable context is
    /// [`CoreError::Unresolved`]; otherwise it yields a `local` plan.
    #[instrument(level = "debug", skip(self, query, projects_dir))]
    pub fn trigger_for_context(
        &self,
        query: &ContextQuery,
        projects_dir: Option<&Path>,
        resolution: Resolution,
    ) -> Result<TriggerPlan, CoreError> {
        let config = self.ctx.config();
        let key = self.resolve(query);
        if key.is_none() && resolution == Resolution::Required {
            return Err(CoreError::Unresolved);
        }

        let class = classify(key.as_ref());
        let plan = plan::build(config, key, class, projects_dir)?;
        debug!(action = %plan.action, key = ?plan.context_key, command = ?plan.command, "context planned");
        Ok(plan)
    }

    fn dispatch(&self, node: &NodeRecord, action: &ActionKind) -> HandlerResult {
        let backends = Backends {
            config: self.ctx.config(),
            metrics: self.ctx.metrics(),
            commands: self.commands.as_deref(),
            workflows: self.workflows.as_deref(),
        };

        match action {
            ActionKind::WorkflowDispatch(p) => workflow::dispatch(&backends, node, p),
            ActionKind::GitPush(p) => git::single(&backends, node, "push", p),
            ActionKind::GitFetch(p) => git::single(&backends, node, "fetch", p),
            ActionKind::FetchMerge(p) => git::fetch_merge(&backends, node, p),
            ActionKind::PushMerge(p) => git::push_merge(&backends, node, p),
            ActionKind::PullMerge(p) => git::single(&backends, node, "pull", p),
            ActionKind::JobSubmit(p) => scheduler::submit(&backends, node, p),
            ActionKind::RunScript(p) => script::run(&backends, node, p),
            ActionKind::Notify => Ok(notify::notify()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use bloom_model::{ActionClass, GitParams};
    use serde_json::{Value, json};

    use super::*;
    use crate::{
        config::AgentConfig,
        metrics::MetricsBackend,
        runner::fakes::{RecordingClient, RecordingRunner},
    };

    #[derive(Default)]
    struct RecordingMetrics {
        completed: Mutex<Vec<(String, ActionOutcome)>>,
        backend_errors: Mutex<Vec<(String, String)>>,
    }

    impl MetricsBackend for RecordingMetrics {
        fn record_action_started(&self, _: &str) {}

        fn record_action_completed(&self, action: &str, outcome: ActionOutcome, _: u64) {
            self.completed
                .lock()
                .unwrap()
                .push((action.to_string(), outcome));
        }

        fn record_backend_error(&self, backend: &str, kind: &str) {
            self.backend_errors
                .lock()
                .unwrap()
                .push((backend.to_string(), kind.to_string()));
        }
    }

    struct Harness {
        router: ActionRouter,
        runner: Arc<RecordingRunner>,
        client: Arc<RecordingClient>,
        metrics: Arc<RecordingMetrics>,
    }

    fn harness(config: AgentConfig, runner: RecordingRunner) -> Harness {
        let runner = Arc::new(runner);
        let client = Arc::new(RecordingClient::with_status(204));
        let metrics = Arc::new(RecordingMetrics::default());

        let ctx = TriggerContext::new(Arc::new(config), metrics.clone());
        let mut router = ActionRouter::new().with_context(ctx);
        router.register_command_runner(runner.clone());
        router.register_workflow_client(client.clone());
        Harness {
            router,
            runner,
            client,
            metrics,
        }
    }

    fn payload(v: Value) -> Payload {
        match v {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn unknown_action_is_named_in_error() {
        let h = harness(AgentConfig::default(), RecordingRunner::new());
        let res = h
            .router
            .trigger_named(&NodeRecord::new("n"), "deploy", &Payload::new());

        assert!(!res.ok);
        assert_eq!(res.error.as_deref(), Some("unknown action: deploy"));
        assert!(h.runner.calls().is_empty());
        assert_eq!(
            *h.metrics.completed.lock().unwrap(),
            [("unknown".to_string(), ActionOutcome::Rejected)]
        );
    }

    #[test]
    fn workflow_dispatch_without_id_issues_no_request() {
        let h = harness(
            AgentConfig::default().with_github_token("t"),
            RecordingRunner::new(),
        );
        let node = NodeRecord::new("api").with_owner("acme").with_repo("api");

        let res = h
            .router
            .trigger_named(&node, "workflow_dispatch", &Payload::new());
        assert!(!res.ok);
        assert_eq!(res.error.as_deref(), Some("missing owner/repo/workflow_id"));
        assert_eq!(h.client.calls().len(), 0);
    }

    #[test]
    fn git_push_on_missing_path_is_rejected() {
        let h = harness(AgentConfig::default(), RecordingRunner::new());
        let node = NodeRecord::new("n").with_path("/no/such/dir");

        let res = h.router.trigger(&node, &ActionKind::GitPush(GitParams::default()));
        assert_eq!(res, ActionResult::failure("missing path"));
        assert!(h.runner.calls().is_empty());
        assert_eq!(
            h.metrics.completed.lock().unwrap()[0],
            ("git_push".to_string(), ActionOutcome::Rejected)
        );
    }

    #[test]
    fn fetch_merge_short_circuits_on_failed_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let h = harness(AgentConfig::default(), RecordingRunner::exits(&[1]));
        let node = NodeRecord::new("n").with_path(dir.path());

        let res = h
            .router
            .trigger_named(&node, "fetch_merge", &payload(json!({"remote": "upstream"})));
        assert!(!res.ok);
        assert_eq!(h.runner.calls().len(), 1);
        assert_eq!(
            h.metrics.completed.lock().unwrap()[0].1,
            ActionOutcome::Failure
        );
    }

    #[test]
    fn push_merge_pushes_after_failed_merge() {
        let dir = tempfile::tempdir().unwrap();
        let h = harness(AgentConfig::default(), RecordingRunner::exits(&[1, 0]));
        let node = NodeRecord::new("n").with_path(dir.path());

        let res = h.router.trigger_named(&node, "push_merge", &Payload::new());
        assert!(res.ok);
        let lines = h.runner.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("merge main"));
        assert!(lines[1].ends_with("push origin"));
    }

    #[test]
    fn notify_is_flagged_unimplemented() {
        let h = harness(AgentConfig::default(), RecordingRunner::new());
        let res = h.router.trigger(&NodeRecord::new("n"), &ActionKind::Notify);

        assert!(res.ok);
        assert!(res.unimplemented);
        assert_eq!(
            res.data("message"),
            Some(&json!("notify not implemented (platform-specific)"))
        );
        assert!(h.runner.calls().is_empty());
        assert_eq!(
            h.metrics.completed.lock().unwrap()[0].1,
            ActionOutcome::Unimplemented
        );
    }

    #[test]
    fn invalid_payload_is_rejected_under_action_label() {
        let h = harness(AgentConfig::default(), RecordingRunner::new());
        let res = h.router.trigger_named(
            &NodeRecord::new("n"),
            "run_script",
            &payload(json!({"script": 7})),
        );
        assert!(!res.ok);
        assert!(res.error.unwrap().starts_with("invalid payload for run_script"));
        assert_eq!(
            h.metrics.completed.lock().unwrap()[0].0,
            "run_script".to_string()
        );
    }

    #[test]
    fn missing_backend_is_a_rejection() {
        let router = ActionRouter::new();
        let res = router.trigger(
            &NodeRecord::new("n").with_path("/scratch"),
            &ActionKind::from_payload("job_submit", &Payload::new()).unwrap(),
        );
        assert_eq!(res.error.as_deref(), Some("no command backend registered"));
    }

    #[test]
    fn spawn_error_is_counted_as_backend_error() {
        let runner = RecordingRunner::new();
        runner.push(Err(crate::runner::RunnerError::Spawn {
            program: "sbatch".into(),
            reason: "not found".into(),
        }));
        let h = harness(AgentConfig::default(), runner);

        let res = h.router.trigger_named(
            &NodeRecord::new("n").with_path("/scratch"),
            "job_submit",
            &Payload::new(),
        );
        assert!(!res.ok);
        assert_eq!(
            *h.metrics.backend_errors.lock().unwrap(),
            [("recording".to_string(), "spawn_failed".to_string())]
        );
    }

    #[test]
    fn unresolved_context_is_local_or_error() {
        let router = ActionRouter::new();
        let query = ContextQuery::new();

        let plan = router
            .trigger_for_context(&query, None, Resolution::Optional)
            .unwrap();
        assert_eq!(plan, TriggerPlan::local(None));

        let err = router
            .trigger_for_context(&query, None, Resolution::Required)
            .unwrap_err();
        assert!(matches!(err, CoreError::Unresolved));
        assert_eq!(err.to_string(), "Could not resolve context_key or action");
    }

    #[test]
    fn github_context_plans_sync_script() {
        let config = AgentConfig::default().with_scripts_dir("/opt/bloom/scripts");
        let router = ActionRouter::new()
            .with_context(TriggerContext::default().with_config(Arc::new(config)));
        let query = ContextQuery::new()
            .with_cluster("github-runner")
            .with_project("quay-mirror")
            .with_model("deepseek");

        let plan = router
            .trigger_for_context(&query, Some(Path::new("/work/projects")), Resolution::Required)
            .unwrap();
        assert_eq!(plan.action, ActionClass::Github);
        assert_eq!(plan.context_key.as_ref().unwrap().as_str(), "quay_github_deepseek");
        assert_eq!(
            plan.command.as_deref(),
            Some(
                "CONTEXT_KEY=quay_github_deepseek PROJECTS_DIR=/work/projects /opt/bloom/scripts/daily-github-sync.sh sync"
            )
        );
        let helper = plan.helper.unwrap();
        assert_eq!(helper.env.get("PROJECTS_DIR"), Some("/work/projects"));
        assert_eq!(helper.args, ["sync"]);
    }

    #[test]
    fn derived_key_beats_configured_default() {
        let config = AgentConfig::from_lookup(|k| {
            (k == "CONTEXT_KEY").then(|| "owner_hpcc_granite".to_string())
        });
        let router = ActionRouter::new()
            .with_context(TriggerContext::default().with_config(Arc::new(config)));
        let query = ContextQuery::new()
            .with_cluster("github-runner")
            .with_project("quay-mirror")
            .with_model("deepseek");

        let plan = router
            .trigger_for_context(&query, Some(Path::new("/work/projects")), Resolution::Required)
            .unwrap();
        assert_eq!(plan.context_key.unwrap().as_str(), "quay_github_deepseek");
        assert_eq!(plan.action, ActionClass::Github);

        let fallback = router
            .trigger_for_context(&ContextQuery::new(), None, Resolution::Required)
            .unwrap();
        assert_eq!(fallback.context_key.unwrap().as_str(), "owner_hpcc_granite");
        assert_eq!(fallback.action, ActionClass::Hpcc);
    }

    #[test]
    fn resolve_needs_no_projects_dir() {
        let router = ActionRouter::new();
        let query = ContextQuery::new().with_context_key("owner_github_qwen");
        assert_eq!(router.resolve(&query).unwrap().as_str(), "owner_github_qwen");
        assert_eq!(router.resolve(&ContextQuery::new()), None);
    }

    #[test]
    fn hpcc_context_plans_connect_script() {
        let router = ActionRouter::new();
        let query = ContextQuery::new().with_context_key("owner_hpcc_qwen");

        let plan = router
            .trigger_for_context(&query, None, Resolution::Optional)
            .unwrap();
        assert_eq!(plan.action, ActionClass::Hpcc);
        assert_eq!(
            plan.command.as_deref(),
            Some("CONTEXT_KEY=owner_hpcc_qwen scripts/connect-hpcc.sh")
        );
    }

    #[test]
    fn explicit_unknown_key_is_local_without_command() {
        let router = ActionRouter::new();
        let query = ContextQuery::new().with_context_key("laptop");

        let plan = router
            .trigger_for_context(&query, None, Resolution::Required)
            .unwrap();
        assert_eq!(plan.action, ActionClass::Local);
        assert_eq!(plan.context_key.unwrap().as_str(), "laptop");
        assert!(plan.command.is_none());
    }
}
