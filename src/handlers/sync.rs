//! `sync` handler

use anyhow::{Context, Result};

use super::App;
use crate::logger;
use crate::sync::{self, SyncOptions};

/// Copy files from the home directory into the repository
pub fn handle_sync(app: &App, patterns: &[String], options: SyncOptions) -> Result<()> {
    let report = sync::sync_paths(
        &app.config,
        &app.home,
        patterns,
        options,
        app.catalog,
        app.prompter,
    )
    .context("Failed to sync")?;

    if report.synced > 0 {
        logger::success(format!(
            "Successfully synced {} files/directories to your dotfiles repository",
            report.synced
        ));
        logger::info("Remember to run 'dfmgr apply' to create symlinks for the new files");
    }
    if report.skipped > 0 {
        logger::info(format!("Skipped {} entries", report.skipped));
    }
    if report.failed > 0 {
        logger::warning(format!("{} entries could not be synced", report.failed));
    }

    Ok(())
}
