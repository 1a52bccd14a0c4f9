//! `apply` and `unapply` handlers

use anyhow::{Context, Result};

use super::App;
use crate::config;
use crate::logger;
use crate::packages::{self, ApplyOutcome, UnapplyOutcome};

/// Link the repository's packages into the home directory
pub fn handle_apply(app: &App, selective: bool) -> Result<()> {
    logger::info("Applying dotfiles to home directory...");

    let outcome = packages::apply_dotfiles(&app.config, &app.home, selective, app.prompter, app.runner)
        .context("Failed to apply dotfiles")?;

    if let ApplyOutcome::Applied { packages, backups } = outcome {
        if !backups.is_empty() {
            logger::info(format!(
                "Backed up {} existing file(s) to {}",
                backups.backed_up.len(),
                config::backup_dir(&app.home).display()
            ));
        }
        logger::success(format!(
            "Successfully applied dotfiles: {}",
            packages.join(", ")
        ));
    }

    Ok(())
}

/// Remove the links of the repository's packages from the home directory
pub fn handle_unapply(app: &App, selective: bool) -> Result<()> {
    logger::info("Removing dotfile symlinks from home directory...");

    let outcome =
        packages::unapply_dotfiles(&app.config, &app.home, selective, app.prompter, app.runner)
            .context("Failed to remove dotfiles")?;

    if let UnapplyOutcome::Removed { packages } = outcome {
        logger::success(format!("Removed symlinks for: {}", packages.join(", ")));
    }

    Ok(())
}
