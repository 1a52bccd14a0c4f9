//! Git backend using CLI commands.

use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

use super::is_repo;
use crate::process::{run_checked, CommandSpec, ProcessRunner};

/// The git executable
pub const GIT: &str = "git";

/// Git repository driven through the git CLI
pub struct GitRepo<'a> {
    runner: &'a dyn ProcessRunner,
    workdir: PathBuf,
}

impl<'a> GitRepo<'a> {
    /// Open an existing Git repository.
    pub fn open(runner: &'a dyn ProcessRunner, path: &Path) -> Result<Self> {
        if !is_repo(path) {
            return Err(anyhow!(
                "No Git repository found at '{}' (no .git directory)",
                path.display()
            ));
        }

        Ok(GitRepo {
            runner,
            workdir: path.to_path_buf(),
        })
    }

    /// Initialize a new Git repository, or open it when one already exists.
    pub fn init(runner: &'a dyn ProcessRunner, path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory '{}'", path.display()))?;

        if !is_repo(path) {
            run_checked(runner, &CommandSpec::new(GIT).arg("init").current_dir(path))
                .context("Failed to initialize git repository")?;
        }

        Ok(GitRepo {
            runner,
            workdir: path.to_path_buf(),
        })
    }

    /// Clone a remote repository into `path`.
    pub fn clone(runner: &'a dyn ProcessRunner, url: &str, path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create parent directory for '{}'", path.display())
            })?;
        }

        let spec = CommandSpec::new(GIT)
            .args(["clone", url])
            .arg(path.to_string_lossy());

        run_checked(runner, &spec).with_context(|| {
            format!(
                "Failed to clone '{url}'.\n\
                \n\
                Possible causes:\n\
                1. The repository does not exist or is private\n\
                2. SSH keys are not set up (check with 'ssh -T git@github.com')\n\
                3. Network connectivity issues"
            )
        })?;

        Ok(GitRepo {
            runner,
            workdir: path.to_path_buf(),
        })
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Run a git command inside the repository.
    fn run_git(&self, args: &[&str]) -> Result<()> {
        let spec = CommandSpec::new(GIT)
            .args(args.iter().copied())
            .current_dir(&self.workdir);
        run_checked(self.runner, &spec)?;
        Ok(())
    }

    /// Stage every change in the working tree.
    pub fn stage_all(&self) -> Result<()> {
        self.run_git(&["add", "."])
    }

    /// Commit staged changes with a message.
    pub fn commit(&self, message: &str) -> Result<()> {
        let message = if message.trim().is_empty() {
            "Update dotfiles"
        } else {
            message
        };
        self.run_git(&["commit", "-m", message])
    }

    /// Add a remote repository.
    pub fn add_remote(&self, name: &str, url: &str) -> Result<()> {
        self.run_git(&["remote", "add", name, url])
    }

    /// Push the current branch to `origin`.
    pub fn push(&self) -> Result<()> {
        self.run_git(&["push", "origin", "HEAD"]).context(
            "Failed to push to remote 'origin'.\n\
            \n\
            Possible causes:\n\
            1. Authentication failed - ensure credentials are configured\n\
            2. No permission to push to this repository\n\
            3. The remote has commits you do not have yet (run 'dfmgr fetch')",
        )
    }

    /// Pull the latest changes from the tracked remote.
    pub fn pull(&self) -> Result<()> {
        self.run_git(&["pull"])
    }
}

/// SSH remote URL of a hosted repository
pub fn remote_url(owner: &str, repo: &str) -> String {
    format!("git@github.com:{owner}/{repo}.git")
}
