//! External process invocation behind a swappable runner.

use anyhow::{anyhow, Context, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::probe;

/// A fully described external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        CommandSpec {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
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

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Outcome of a finished process
///
/// `stdout` and `stderr` are empty when the runner let the child write
/// straight to the terminal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, `None` when the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success() -> Self {
        ProcessOutput {
            code: Some(0),
            ..Default::default()
        }
    }

    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        ProcessOutput {
            code: Some(code),
            stderr: stderr.into(),
            ..Default::default()
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Capability to run external programs
pub trait ProcessRunner {
    /// Run the command to completion
    ///
    /// Errors only when the process could not be started; a non-zero exit is
    /// reported through [`ProcessOutput::code`].
    fn run(&self, command: &CommandSpec) -> Result<ProcessOutput>;

    /// Whether `program` can be found on the search path
    fn is_available(&self, program: &str) -> bool {
        probe::is_available(program)
    }
}

/// Run a command and turn a non-zero exit into an error
pub fn run_checked(runner: &dyn ProcessRunner, command: &CommandSpec) -> Result<ProcessOutput> {
    log::debug!("Running '{command}'");

    let output = runner.run(command)?;

    if !output.is_success() {
        let status = output
            .code
            .map(|c| format!("exit status {c}"))
            .unwrap_or_else(|| "terminated by signal".to_string());
        let stderr = output.stderr.trim();

        return Err(if stderr.is_empty() {
            anyhow!("'{command}' failed ({status})")
        } else {
            anyhow!("'{command}' failed ({status}): {stderr}")
        });
    }

    Ok(output)
}

/// Runner spawning real processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner {
    capture: bool,
}

impl SystemRunner {
    /// Children share this process's stdout and stderr
    pub fn inherit() -> Self {
        SystemRunner { capture: false }
    }

    /// Children's output is captured into [`ProcessOutput`]
    pub fn capturing() -> Self {
        SystemRunner { capture: true }
    }

    fn command(spec: &CommandSpec) -> Command {
        let mut command = Command::new(&spec.program);
        command.args(&spec.args);
        if let Some(dir) = &spec.cwd {
            command.current_dir(dir);
        }
        command
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> Result<ProcessOutput> {
        let mut command = Self::command(spec);

        if self.capture {
            let output = command
                .output()
                .with_context(|| format!("Failed to run '{spec}'"))?;

            Ok(ProcessOutput {
                code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            })
        } else {
            let status = command
                .stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .status()
                .with_context(|| format!("Failed to run '{spec}'"))?;

            Ok(ProcessOutput {
                code: status.code(),
                ..Default::default()
            })
        }
    }
}
