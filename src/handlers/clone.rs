//! `clone` and `fork` handlers

use anyhow::{anyhow, Context, Result};
use std::path::Path;

use super::App;
use crate::config::Config;
use crate::logger;
use crate::packages::{self, ApplyOutcome};
use crate::scm::{self, is_valid_username, remote_url, GitRepo, Hosting};

/// Layout file a repository may carry at its root
pub const REPO_CONFIG_FILE: &str = ".dfmgr.json";

fn check_target(username: &str, local_path: &Path) -> Result<()> {
    if !is_valid_username(username) {
        return Err(anyhow!("Invalid GitHub username format: '{username}'"));
    }

    if scm::is_repo(local_path) {
        return Err(anyhow!(
            "Destination directory already contains a Git repository: {}",
            local_path.display()
        ));
    }

    Ok(())
}

/// Adopt the layout settings shipped with a cloned repository, if any
fn adopt_repo_layout(config: &mut Config, repo_root: &Path) {
    let path = repo_root.join(REPO_CONFIG_FILE);
    if !path.exists() {
        logger::warning("No dfmgr configuration file found in repository");
        return;
    }

    logger::info("Found dfmgr configuration file in repository");
    match Config::from_file(&path) {
        Ok(repo_config) => config.adopt_layout(&repo_config),
        Err(e) => logger::warning(format!("Ignoring repository configuration: {e:#}")),
    }
}

fn apply_after_clone(app: &App, selective: bool) -> Result<bool> {
    let outcome =
        packages::apply_dotfiles(&app.config, &app.home, selective, app.prompter, app.runner)
            .context("Failed to apply dotfiles")?;
    Ok(matches!(outcome, ApplyOutcome::Applied { .. }))
}

/// Clone `username/repo` into the configured local path and apply it
pub fn handle_clone(app: &mut App, username: &str, repo: &str, selective: bool) -> Result<()> {
    let local_path = app.config.local_path.clone();
    check_target(username, &local_path)?;

    logger::info(format!("Cloning {username}'s dotfiles repository"));
    GitRepo::clone(app.runner, &remote_url(username, repo), &local_path)
        .context("Failed to clone repository")?;
    logger::success(format!(
        "Successfully cloned repository to {}",
        local_path.display()
    ));

    adopt_repo_layout(&mut app.config, &local_path);
    app.config.github_username = username.to_string();
    app.config.dotfiles_repo = repo.to_string();
    app.save_config_or_warn();

    if apply_after_clone(app, selective)? {
        logger::success(format!(
            "Successfully applied dotfiles from {username}/{repo}"
        ));
    }
    Ok(())
}

/// Fork `username/repo` into the configured account, then clone and apply the fork
pub fn handle_fork(app: &mut App, username: &str, repo: &str, selective: bool) -> Result<()> {
    let local_path = app.config.local_path.clone();
    check_target(username, &local_path)?;

    logger::info(format!("Forking {username}'s dotfiles repository"));
    Hosting::new(app.runner)
        .fork_repo(username, repo)
        .context("Failed to fork repository")?;
    logger::success(format!(
        "Successfully forked repository from {username}/{repo}"
    ));

    let own = app.config.github_username.clone();
    if own.is_empty() {
        logger::warning(
            "GitHub username not set in configuration. Please run 'dfmgr init' first.",
        );
        return Ok(());
    }

    GitRepo::clone(app.runner, &remote_url(&own, repo), &local_path)
        .context("Failed to clone forked repository")?;

    app.config.dotfiles_repo = repo.to_string();
    app.save_config_or_warn();

    if apply_after_clone(app, selective)? {
        logger::success(format!(
            "Successfully forked and applied dotfiles from {username}/{repo}"
        ));
    }
    logger::info("You can now customize the dotfiles and push your changes.");
    Ok(())
}
