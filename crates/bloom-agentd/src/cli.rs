use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "bloom",
    about = "Resolve context keys and dispatch node actions",
    version,
    propagate_version = true
)]
pub struct Cli {
    /// Log filter expression (e.g. `info`, `bloom_core=debug,warn`)
    #[arg(long, global = true, env = "BLOOM_LOG")]
    pub log_level: Option<String>,

    /// Log format: text, json or journald
    #[arg(long, global = true, env = "BLOOM_LOG_FORMAT")]
    pub log_format: Option<String>,

    /// Print prometheus metrics to stderr before exiting
    #[arg(long, global = true)]
    pub print_metrics: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a context key and its action class
    Resolve {
        #[command(flatten)]
        context: ContextArgs,
    },

    /// Describe (and optionally run) the helper script for a context
    Plan {
        #[command(flatten)]
        context: ContextArgs,

        /// Projects directory passed to the sync helper
        #[arg(long)]
        projects_dir: Option<PathBuf>,

        /// Fail instead of planning `local` when no key resolves
        #[arg(long)]
        require_resolved: bool,

        /// Run the planned helper command
        #[arg(long)]
        execute: bool,
    },

    /// Trigger one action against a node
    Act {
        /// Action name (workflow_dispatch, git_push, ..., notify)
        action: String,

        #[command(flatten)]
        node: NodeArgs,

        /// Action payload as a JSON object
        #[arg(long, default_value = "{}")]
        payload: String,
    },

    /// Filter a node list
    Filter {
        /// JSON file holding an array of nodes
        #[arg(long)]
        nodes: PathBuf,

        /// Keep nodes able to receive actions (github, hpcc)
        #[arg(long)]
        receiver: Option<String>,

        /// Keep nodes by target class (github, hpcc)
        #[arg(long = "where")]
        action_where: Option<String>,

        /// Keep nodes by client machine (macbook, rockydesktop)
        #[arg(long = "client")]
        action_client: Option<String>,

        /// Keep nodes whose name matches this pattern
        #[arg(long)]
        repo_name: Option<String>,

        /// Treat --repo-name as a regular expression instead of a literal
        #[arg(long, requires = "repo_name")]
        regex: bool,
    },

    /// Inspect the agent catalog
    Agents {
        /// Catalog JSON file
        #[arg(long)]
        catalog: PathBuf,

        /// Filter nodes for this agent instead of listing agents
        #[arg(long, requires = "nodes")]
        agent: Option<String>,

        /// JSON file holding an array of nodes
        #[arg(long)]
        nodes: Option<PathBuf>,

        /// Context key the agent filter is evaluated against
        #[arg(long)]
        context_key: Option<String>,
    },
}

#[derive(Args, Default)]
pub struct ContextArgs {
    /// Explicit context key; overrides every other field
    #[arg(long)]
    pub context_key: Option<String>,
    #[arg(long)]
    pub language: Option<String>,
    #[arg(long)]
    pub project: Option<String>,
    #[arg(long)]
    pub repository: Option<String>,
    #[arg(long)]
    pub cluster: Option<String>,
    #[arg(long)]
    pub model: Option<String>,
}

#[derive(Args, Default)]
pub struct NodeArgs {
    /// JSON file holding a single node; other node flags are ignored
    #[arg(long = "node")]
    pub file: Option<PathBuf>,
    #[arg(long, default_value = "cli")]
    pub name: String,
    #[arg(long)]
    pub path: Option<PathBuf>,
    #[arg(long)]
    pub owner: Option<String>,
    #[arg(long)]
    pub repo: Option<String>,
    #[arg(long)]
    pub slug: Option<String>,
}
