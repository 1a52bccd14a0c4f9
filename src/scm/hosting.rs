//! Repository hosting through the GitHub CLI.

use anyhow::{anyhow, Context, Result};

use crate::process::{run_checked, CommandSpec, ProcessRunner};

/// The GitHub CLI executable
pub const GH: &str = "gh";

/// Check whether `name` is a usable account name: non-empty and made only of
/// ASCII letters, digits, `-` and `_`.
pub fn is_valid_username(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Hosted repository operations
pub struct Hosting<'a> {
    runner: &'a dyn ProcessRunner,
}

impl<'a> Hosting<'a> {
    pub fn new(runner: &'a dyn ProcessRunner) -> Self {
        Hosting { runner }
    }

    fn ensure_cli(&self) -> Result<()> {
        if self.runner.is_available(GH) {
            Ok(())
        } else {
            Err(anyhow!("GitHub CLI (gh) is not installed"))
        }
    }

    /// Create a public repository owned by the authenticated user.
    pub fn create_repo(&self, name: &str) -> Result<()> {
        self.ensure_cli()?;

        let spec = CommandSpec::new(GH).args(["repo", "create", name, "--public", "--confirm"]);
        run_checked(self.runner, &spec)
            .with_context(|| format!("Failed to create repository '{name}'"))?;
        Ok(())
    }

    /// Fork `owner/repo` into the authenticated user's account.
    pub fn fork_repo(&self, owner: &str, repo: &str) -> Result<()> {
        self.ensure_cli()?;

        let full_name = format!("{owner}/{repo}");
        let spec = CommandSpec::new(GH).args(["repo", "fork", full_name.as_str(), "--clone=false"]);
        run_checked(self.runner, &spec)
            .with_context(|| format!("Failed to fork repository '{full_name}'"))?;
        Ok(())
    }
}
