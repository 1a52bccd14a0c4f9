//! `push` and `fetch` handlers

use anyhow::{Context, Result};

use super::App;
use crate::logger;
use crate::scm::GitRepo;

/// Default commit message offered by `push`
pub fn default_commit_message() -> String {
    format!("Update dotfiles - {}", chrono::Local::now().format("%Y-%m-%d"))
}

/// Stage, commit and push every change in the repository
pub fn handle_push(app: &App, message: Option<&str>) -> Result<()> {
    let repo = GitRepo::open(app.runner, &app.config.local_path)?;

    logger::info("Adding files to Git repository");
    repo.stage_all().context("Failed to add files")?;

    let message = match message {
        Some(message) => message.to_string(),
        None => app
            .prompter
            .text("Commit Message:", Some(&default_commit_message()))
            .context("Failed to get commit message")?,
    };

    logger::info(format!("Committing changes: {message}"));
    repo.commit(&message).context("Failed to commit changes")?;

    logger::info("Pushing changes to remote repository");
    repo.push()?;

    logger::success("Successfully pushed changes to remote repository");
    Ok(())
}

/// Pull the latest changes into the repository
pub fn handle_fetch(app: &App) -> Result<()> {
    let repo = GitRepo::open(app.runner, &app.config.local_path)?;

    logger::info("Pulling latest changes from remote repository");
    repo.pull().context("Failed to pull changes")?;

    logger::success("Successfully fetched latest changes from remote repository");
    logger::info("Run 'dfmgr apply' to link any new packages");
    Ok(())
}
