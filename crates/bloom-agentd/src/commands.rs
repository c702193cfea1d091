//! Subcommand bodies. Each prints its JSON result to stdout and returns
//! whether the command succeeded.
use std::{fs, path::Path};

use anyhow::{Context, bail};
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

use bloom_core::{
    ActionRouter, AgentCatalog, CommandSpec, RepoPattern, Resolution, classify,
    filter_by_action_client,
    filter_by_action_where, filter_by_receiver, filter_by_repo_name,
};
use bloom_model::{ContextKey, ContextQuery, NodeRecord, Payload};

use crate::cli::{ContextArgs, NodeArgs};

impl From<ContextArgs> for ContextQuery {
    fn from(args: ContextArgs) -> Self {
        ContextQuery {
            context_key: args.context_key,
            language: args.language,
            project: args.project,
            repository: args.repository,
            cluster: args.cluster,
            model: args.model,
        }
    }
}

impl NodeArgs {
    fn into_node(self) -> anyhow::Result<NodeRecord> {
        if let Some(file) = self.file {
            let raw = read(&file)?;
            return serde_json::from_str(&raw)
                .with_context(|| format!("parse node from {}", file.display()));
        }
        Ok(NodeRecord {
            name: self.name,
            path: self.path,
            owner: self.owner,
            repo: self.repo,
            slug: self.slug,
        })
    }
}

pub fn resolve(router: &ActionRouter, context: ContextArgs) -> anyhow::Result<bool> {
    let key = router.resolve(&context.into());
    print_json(&json!({
        "action": classify(key.as_ref()),
        "context_key": key,
    }))?;
    Ok(true)
}

pub fn plan(
    router: &ActionRouter,
    context: ContextArgs,
    projects_dir: Option<&Path>,
    require_resolved: bool,
    execute: bool,
) -> anyhow::Result<bool> {
    let resolution = if require_resolved {
        Resolution::Required
    } else {
        Resolution::Optional
    };
    let plan = router.trigger_for_context(&context.into(), projects_dir, resolution)?;

    if !execute {
        print_json(&plan)?;
        return Ok(true);
    }

    let Some(helper) = plan.helper.as_ref() else {
        info!(action = %plan.action, "nothing to execute for local context");
        print_json(&plan)?;
        return Ok(true);
    };
    let Some(runner) = router.command_runner() else {
        bail!("no command runner registered");
    };

    let spec = CommandSpec::from(helper);
    info!(command = %spec, "executing helper");
    let out = runner.run(&spec)?;
    if !out.success() {
        warn!(command = %spec, code = ?out.code, "helper failed");
    }
    Ok(out.success())
}

pub fn act(
    router: &ActionRouter,
    action: &str,
    node: NodeArgs,
    payload: &str,
) -> anyhow::Result<bool> {
    let node = node.into_node()?;
    let payload: Payload = serde_json::from_str(payload).context("payload must be a JSON object")?;

    let result = router.trigger_named(&node, action, &payload);
    print_json(&result)?;
    Ok(result.ok)
}

pub struct FilterArgs<'a> {
    pub receiver: Option<&'a str>,
    pub action_where: Option<&'a str>,
    pub action_client: Option<&'a str>,
    pub repo_name: Option<&'a str>,
    pub regex: bool,
}

pub fn filter(nodes_file: &Path, args: FilterArgs<'_>) -> anyhow::Result<bool> {
    let mut nodes = read_nodes(nodes_file)?;

    if let Some(receiver) = args.receiver {
        nodes = filter_by_receiver(&nodes, receiver);
    }
    if let Some(action_where) = args.action_where {
        nodes = filter_by_action_where(&nodes, action_where);
    }
    if let Some(client) = args.action_client {
        nodes = filter_by_action_client(&nodes, client);
    }
    if let Some(name) = args.repo_name {
        let pattern = if args.regex {
            RepoPattern::regex(name)?
        } else {
            RepoPattern::literal(name)?
        };
        nodes = filter_by_repo_name(&nodes, &pattern);
    }

    print_json(&nodes)?;
    Ok(true)
}

pub fn agents(
    catalog: &Path,
    agent: Option<&str>,
    nodes_file: Option<&Path>,
    context_key: Option<&str>,
) -> anyhow::Result<bool> {
    let catalog = AgentCatalog::load(catalog)?;

    let (Some(agent), Some(nodes_file)) = (agent, nodes_file) else {
        print_json(&json!({
            "agents": catalog.agent_ids(),
            "trigger_agent": catalog.trigger_agent(),
        }))?;
        return Ok(true);
    };

    if catalog.by_id(agent).is_none() {
        warn!(agent, "unknown agent, nodes returned unfiltered");
    }
    let nodes = read_nodes(nodes_file)?;
    let key = context_key.map(ContextKey::explicit);
    print_json(&catalog.filter_nodes_for_agent(&nodes, agent, key.as_ref()))?;
    Ok(true)
}

fn read(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}

fn read_nodes(path: &Path) -> anyhow::Result<Vec<NodeRecord>> {
    let raw = read(path)?;
    serde_json::from_str(&raw).with_context(|| format!("parse nodes from {}", path.display()))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
