//! `init` handler: first-time setup and creation of the dotfiles repository

use anyhow::{anyhow, Context, Result};
use std::fs;

use super::App;
use crate::config::{current_platform, Config};
use crate::logger;
use crate::onboarding::{run_onboarding, OnboardingConfig};
use crate::scm::{self, remote_url, GitRepo, Hosting, GH, GIT, STOW};

/// Ask before continuing without an optional tool
fn confirm_missing_tool(app: &App, warning: &str, question: &str) -> Result<()> {
    logger::warning(warning);

    let proceed = app.prompter.confirm(question, false).unwrap_or(false);
    if proceed {
        Ok(())
    } else {
        Err(anyhow!("Aborted setup"))
    }
}

/// Configure dfmgr and create the dotfiles repository
pub fn handle_init(app: &mut App) -> Result<()> {
    logger::info("Starting dfmgr setup process...");

    if !app.runner.is_available(GIT) {
        return Err(anyhow!("git is not installed"));
    }

    if !app.runner.is_available(GH) {
        confirm_missing_tool(
            app,
            "GitHub CLI (gh) is not installed. Some features may not work properly.",
            "Continue without GitHub CLI?",
        )?;
    }

    if !app.runner.is_available(STOW) {
        confirm_missing_tool(
            app,
            "GNU stow is not installed. Required for symlinking dotfiles.",
            "Continue without GNU stow?",
        )?;
    }

    let answers = run_onboarding(app.prompter, &app.home)?;
    apply_answers(&mut app.config, answers);

    if app.config.multi_os {
        logger::info("Using separate folders for different operating systems");
    } else {
        logger::info("Using single directory structure");
    }

    let local_path = app.config.local_path.clone();
    fs::create_dir_all(&local_path).with_context(|| {
        format!("Failed to create local directory: {}", local_path.display())
    })?;

    let os_folder = app.config.current_os_folder();
    if !os_folder.is_empty() {
        let os_path = local_path.join(&os_folder);
        fs::create_dir_all(&os_path).with_context(|| {
            format!("Failed to create OS-specific directory: {}", os_path.display())
        })?;
        logger::success(format!("Created OS-specific directory: {}", os_path.display()));
    }

    app.config.save().context("Failed to save configuration")?;
    logger::success(format!("Configuration saved to {}", app.config.path().display()));

    setup_default_repo(app).context("Failed to set up GitHub repository")?;

    logger::success("dfmgr initialized successfully!");
    logger::info(format!(
        "Your dotfiles repository: https://github.com/{}/{}",
        app.config.github_username, app.config.dotfiles_repo
    ));
    logger::info(format!("Local path: {}", app.config.local_path.display()));
    Ok(())
}

fn apply_answers(config: &mut Config, answers: OnboardingConfig) {
    config.github_username = answers.github_username;
    config.multi_os = answers.multi_os;
    config.dotfiles_repo = answers.dotfiles_repo;
    config.local_path = answers.local_path;
}

/// Turn the local directory into a repository and publish it
///
/// Does nothing when the directory already is a repository. Without the
/// GitHub CLI the hosted repository is not created and nothing is pushed;
/// the `origin` remote is still recorded so a later `push` works once the
/// repository exists.
fn setup_default_repo(app: &App) -> Result<()> {
    let config = &app.config;
    if scm::is_repo(&config.local_path) {
        log::debug!("{} is already a repository", config.local_path.display());
        return Ok(());
    }

    let repo = GitRepo::init(app.runner, &config.local_path)?;

    let readme = repo.workdir().join("README.md");
    fs::write(&readme, generate_readme(config))
        .with_context(|| format!("Failed to write {}", readme.display()))?;

    repo.stage_all()?;
    repo.commit("Initial commit")?;

    let hosted = app.runner.is_available(GH);
    if hosted {
        Hosting::new(app.runner).create_repo(&config.dotfiles_repo)?;
    } else {
        logger::warning("Skipping creation of the GitHub repository (gh is not installed)");
    }

    repo.add_remote(
        "origin",
        &remote_url(&config.github_username, &config.dotfiles_repo),
    )?;

    if hosted {
        repo.push()?;
    }

    Ok(())
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// README written into a freshly created repository
pub fn generate_readme(config: &Config) -> String {
    let username = &config.github_username;

    let contents = if config.multi_os {
        format!(
            "These dotfiles are organized by operating system. Currently tracking configurations for **{}**.",
            title_case(current_platform())
        )
    } else {
        "This repository contains configuration files for various applications and tools."
            .to_string()
    };

    [
        "# Dotfiles".to_string(),
        String::new(),
        format!(
            "This repository contains my personal dotfiles managed using [dfmgr](https://github.com/{username}/dfmgr)."
        ),
        String::new(),
        "## Contents".to_string(),
        String::new(),
        contents,
        String::new(),
        "## Installation".to_string(),
        String::new(),
        "To use these dotfiles on your system:".to_string(),
        String::new(),
        "1. Install dfmgr:".to_string(),
        "```bash".to_string(),
        "cargo install dfmgr".to_string(),
        "```".to_string(),
        String::new(),
        "2. Clone and apply the dotfiles:".to_string(),
        "```bash".to_string(),
        format!("dfmgr clone {username}"),
        "```".to_string(),
        String::new(),
        "## License".to_string(),
        String::new(),
        "These dotfiles are provided as-is under the MIT License.".to_string(),
    ]
    .join("\n")
}
