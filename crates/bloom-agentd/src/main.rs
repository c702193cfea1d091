mod cli;
mod commands;

use std::{process::ExitCode, sync::Arc};

use clap::Parser;
use tracing::{debug, warn};

use bloom_core::{ActionRouter, AgentConfig, TriggerContext};
use bloom_exec::{github::register_github_client, subprocess::register_subprocess_runner};
use bloom_observe::{LoggerConfig, LoggerLevel, init_logger};
use bloom_prometheus::PrometheusMetrics;

use cli::{Cli, Commands};
use commands::FilterArgs;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // 1) logger; flags override the BLOOM_LOG* environment
    let mut log = LoggerConfig::from_env()?;
    if let Some(level) = cli.log_level.as_deref() {
        log.level = LoggerLevel::new(level)?;
    }
    if let Some(format) = cli.log_format.as_deref() {
        log.format = format.parse()?;
    }
    init_logger(&log)?;

    // 2) config + metrics
    let config = Arc::new(AgentConfig::from_env());
    debug!(?config, "agent config loaded");
    let metrics = Arc::new(PrometheusMetrics::new()?);

    // 3) router + backends
    let mut router =
        ActionRouter::new().with_context(TriggerContext::new(config, metrics.clone()));
    register_subprocess_runner(&mut router);
    register_github_client(&mut router)?;

    // 4) command
    let ok = match cli.command {
        Commands::Resolve { context } => commands::resolve(&router, context)?,
        Commands::Plan {
            context,
            projects_dir,
            require_resolved,
            execute,
        } => commands::plan(
            &router,
            context,
            projects_dir.as_deref(),
            require_resolved,
            execute,
        )?,
        Commands::Act {
            action,
            node,
            payload,
        } => commands::act(&router, &action, node, &payload)?,
        Commands::Filter {
            nodes,
            receiver,
            action_where,
            action_client,
            repo_name,
            regex,
        } => commands::filter(
            &nodes,
            FilterArgs {
                receiver: receiver.as_deref(),
                action_where: action_where.as_deref(),
                action_client: action_client.as_deref(),
                repo_name: repo_name.as_deref(),
                regex,
            },
        )?,
        Commands::Agents {
            catalog,
            agent,
            nodes,
            context_key,
        } => commands::agents(
            &catalog,
            agent.as_deref(),
            nodes.as_deref(),
            context_key.as_deref(),
        )?,
    };

    // 5) metrics dump
    if cli.print_metrics {
        match metrics.encode_text() {
            Ok(text) => eprint!("{text}"),
            Err(e) => warn!(error = %e, "failed to encode metrics"),
        }
    }

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
