use std::{
    fmt,
    path::{Path, PathBuf},
};

use bloom_model::{Env, HelperCommand};

/// What happens to the child's stdout/stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Collect output; the runner logs it and returns it.
    #[default]
    Capture,
    /// Child writes straight to the parent's streams.
    Inherit,
}

/// Description of one local command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
    env: Env,
    output: OutputMode,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env: Env::new(),
            output: OutputMode::default(),
        }
    }

    /// `git -C <path> <subcommand>`.
    pub fn git(path: &Path, subcommand: &str) -> Self {
        Self::new("git")
            .arg("-C")
            .arg(path.display().to_string())
            .arg(subcommand)
    }

    /// `sh -c <script>`.
    pub fn shell(script: impl Into<String>) -> Self {
        Self::new("sh").arg("-c").arg(script)
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push(key, value);
        self
    }

    pub fn output(mut self, mode: OutputMode) -> Self {
        self.output = mode;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    pub fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    pub fn get_env(&self) -> &Env {
        &self.env
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output
    }
}

impl From<&HelperCommand> for CommandSpec {
    fn from(helper: &HelperCommand) -> Self {
        let mut cmd = CommandSpec::new(helper.program.display().to_string())
            .args(helper.args.iter().cloned())
            .output(OutputMode::Inherit);
        for kv in helper.env.iter() {
            cmd = cmd.env(kv.key(), kv.value());
        }
        cmd
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Completion status of a command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `None` when the process was killed by a signal.
    pub code: Option<i32>,
    /// Captured stdout, empty in [`OutputMode::Inherit`].
    pub stdout: String,
    /// Captured stderr, empty in [`OutputMode::Inherit`].
    pub stderr: String,
}

impl CommandOutput {
    pub fn from_code(code: i32) -> Self {
        Self {
            code: Some(code),
            ..Default::default()
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}
