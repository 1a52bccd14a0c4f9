//! Symlink farm management through GNU stow.

use anyhow::{anyhow, Context, Result};
use std::path::Path;

use crate::process::{run_checked, CommandSpec, ProcessRunner};

/// The GNU stow executable
pub const STOW: &str = "stow";

/// Link or unlink packages of a source tree into a target tree
pub struct Stow<'a> {
    runner: &'a dyn ProcessRunner,
}

impl<'a> Stow<'a> {
    pub fn new(runner: &'a dyn ProcessRunner) -> Self {
        Stow { runner }
    }

    pub fn is_installed(&self) -> bool {
        self.runner.is_available(STOW)
    }

    fn invoke(&self, source: &Path, target: &Path, packages: &[String], delete: bool) -> Result<()> {
        if !self.is_installed() {
            return Err(anyhow!("GNU stow is not installed"));
        }

        let mut spec = CommandSpec::new(STOW)
            .arg("--verbose=1")
            .arg("--target")
            .arg(target.to_string_lossy())
            .arg("--dir")
            .arg(source.to_string_lossy());
        if delete {
            spec = spec.arg("--delete");
        }
        spec = spec.args(packages.iter().cloned());

        run_checked(self.runner, &spec)
            .with_context(|| format!("stow failed for packages: {}", packages.join(", ")))?;
        Ok(())
    }

    /// Create links in `target` for every package under `source`.
    pub fn stow(&self, source: &Path, target: &Path, packages: &[String]) -> Result<()> {
        self.invoke(source, target, packages, false)
    }

    /// Remove the links a previous [`Stow::stow`] created.
    pub fn unstow(&self, source: &Path, target: &Path, packages: &[String]) -> Result<()> {
        self.invoke(source, target, packages, true)
    }
}
