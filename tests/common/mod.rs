//! Shared fixtures for integration tests.

#![allow(dead_code)]

use anyhow::Result;
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use dfmgr::config::Config;
use dfmgr::process::{CommandSpec, ProcessOutput, ProcessRunner};

/// Runner that records commands instead of spawning them
///
/// `git clone` and `git init` leave a `.git` directory behind so code
/// inspecting the result sees a repository.
pub struct RecordingRunner {
    calls: RefCell<Vec<CommandSpec>>,
    available: Vec<String>,
    failing: Vec<String>,
}

impl RecordingRunner {
    /// Every external tool is installed
    pub fn new() -> Self {
        Self::with_tools(&["git", "gh", "stow"])
    }

    pub fn with_tools(tools: &[&str]) -> Self {
        RecordingRunner {
            calls: RefCell::new(Vec::new()),
            available: tools.iter().map(|t| t.to_string()).collect(),
            failing: Vec::new(),
        }
    }

    /// Make commands whose rendered form starts with `prefix` exit with status 1
    pub fn failing_on(mut self, prefix: &str) -> Self {
        self.failing.push(prefix.to_string());
        self
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.borrow().clone()
    }

    /// Rendered command lines, e.g. `git push origin HEAD`
    pub fn command_lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.to_string()).collect()
    }
}

impl ProcessRunner for RecordingRunner {
    fn run(&self, command: &CommandSpec) -> Result<ProcessOutput> {
        self.calls.borrow_mut().push(command.clone());

        let line = command.to_string();
        if self.failing.iter().any(|prefix| line.starts_with(prefix)) {
            return Ok(ProcessOutput::failure(1, "simulated failure"));
        }

        if command.program == "git" {
            match command.args.first().map(String::as_str) {
                Some("clone") => {
                    if let Some(dest) = command.args.last() {
                        fs::create_dir_all(Path::new(dest).join(".git"))?;
                    }
                }
                Some("init") => {
                    if let Some(cwd) = &command.cwd {
                        fs::create_dir_all(cwd.join(".git"))?;
                    }
                }
                _ => {}
            }
        }

        Ok(ProcessOutput::success())
    }

    fn is_available(&self, program: &str) -> bool {
        self.available.iter().any(|p| p == program)
    }
}

/// Temporary home directory with a configuration pointing at `~/dotfiles`
pub struct Fixture {
    pub temp: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Fixture {
            temp: TempDir::new().unwrap(),
        }
    }

    pub fn home(&self) -> &Path {
        self.temp.path()
    }

    pub fn repo(&self) -> PathBuf {
        self.home().join("dotfiles")
    }

    pub fn config(&self) -> Config {
        Config::load(&self.home().join(".dfmgr"), self.home())
    }

    /// Create the repository with `.git` and the given files (relative to its root)
    pub fn make_repo(&self, files: &[&str]) {
        fs::create_dir_all(self.repo().join(".git")).unwrap();
        for file in files {
            self.write(&self.repo().join(file), "managed");
        }
    }

    pub fn write(&self, path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    pub fn home_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.home().join(relative);
        self.write(&path, content);
        path
    }
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
