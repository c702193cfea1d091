//! Context-level routing: which helper script a resolved context should run.
use std::path::{Path, PathBuf};

use bloom_model::{
    ActionClass, ContextKey, ContextQuery, ENV_CONTEXT_KEY, ENV_PROJECTS_DIR, Env, HelperCommand,
    TriggerPlan,
};

use crate::{config::AgentConfig, error::CoreError};

/// Helper script run for `github` contexts.
pub const SYNC_SCRIPT: &str = "daily-github-sync.sh";
/// Helper script run for `hpcc` contexts.
pub const CONNECT_SCRIPT: &str = "connect-hpcc.sh";

/// Whether an unresolvable context is an error or a `local` plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Resolution {
    /// No key falls through to a `local` plan.
    #[default]
    Optional,
    /// No key is [`CoreError::Unresolved`].
    Required,
}

/// Pick the context key: query key or derivation from the query fields, then
/// the configured default when neither yields one.
pub(crate) fn select_key(config: &AgentConfig, query: &ContextQuery) -> Option<ContextKey> {
    crate::context::resolve_context_key(query).or_else(|| {
        config
            .default_context_key()
            .filter(|k| !k.is_empty())
            .map(ContextKey::explicit)
    })
}

/// Explicit argument, then configuration, then `$HOME/projects`.
pub(crate) fn projects_dir(config: &AgentConfig, explicit: Option<&Path>) -> Option<PathBuf> {
    explicit
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .or_else(|| config.projects_dir().cloned())
        .or_else(|| home::home_dir().map(|h| h.join("projects")))
}

pub(crate) fn build(
    config: &AgentConfig,
    key: Option<ContextKey>,
    class: ActionClass,
    explicit_projects_dir: Option<&Path>,
) -> Result<TriggerPlan, CoreError> {
    let key_str = match (&key, class) {
        (_, ActionClass::Local) | (None, _) => return Ok(TriggerPlan::local(key)),
        (Some(k), _) => k.as_str().to_string(),
    };

    let helper = match class {
        ActionClass::Github => {
            let dir = projects_dir(config, explicit_projects_dir)
                .ok_or_else(|| CoreError::Render("no projects directory and no home directory".into()))?;
            HelperCommand {
                env: Env::new()
                    .with(ENV_CONTEXT_KEY, key_str)
                    .with(ENV_PROJECTS_DIR, path_str(&dir)?),
                program: config.scripts_dir().join(SYNC_SCRIPT),
                args: vec!["sync".to_string()],
            }
        }
        ActionClass::Hpcc => HelperCommand {
            env: Env::new().with(ENV_CONTEXT_KEY, key_str),
            program: config.scripts_dir().join(CONNECT_SCRIPT),
            args: Vec::new(),
        },
        ActionClass::Local => return Ok(TriggerPlan::local(key)),
    };

    Ok(TriggerPlan {
        action: class,
        context_key: key,
        command: Some(render(&helper)?),
        helper: Some(helper),
    })
}

/// Render `K=V ... program args...` with every substituted value quoted.
pub fn render(helper: &HelperCommand) -> Result<String, CoreError> {
    let mut parts = Vec::with_capacity(helper.env.len() + helper.args.len() + 1);
    for kv in helper.env.iter() {
        parts.push(format!("{}={}", kv.key(), quote(kv.value())));
    }
    parts.push(quote(path_str(&helper.program)?));
    parts.extend(helper.args.iter().map(|a| quote(a)));
    Ok(parts.join(" "))
}

/// POSIX shell quoting: safe words pass through, anything else is wrapped
/// in single quotes.
pub fn quote(word: &str) -> String {
    if word.is_empty() {
        return "''".to_string();
    }
    let safe = word
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "_@%+=:,./-".contains(c));
    if safe {
        return word.to_string();
    }
    format!("'{}'", word.replace('\'', r#"'"'"'"#))
}

fn path_str(path: &Path) -> Result<&str, CoreError> {
    path.to_str()
        .ok_or_else(|| CoreError::Render(format!("path is not valid UTF-8: {}", path.display())))
}
