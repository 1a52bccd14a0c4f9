use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

use crate::config::DEFAULT_REPO_NAME;
use crate::prompt::Prompter;
use crate::scm::is_valid_username;

/// Answers collected during first-time setup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingConfig {
    pub github_username: String,
    pub multi_os: bool,
    pub dotfiles_repo: String,
    pub local_path: PathBuf,
}

/// Run the interactive setup questions
pub fn run_onboarding(prompter: &dyn Prompter, home: &Path) -> Result<OnboardingConfig> {
    let github_username = prompter
        .text("GitHub Username:", None)
        .context("Failed to get GitHub username")?
        .trim()
        .to_string();

    if !is_valid_username(&github_username) {
        return Err(anyhow!(
            "Invalid GitHub username '{github_username}'. Use letters, digits, '-' and '_' only"
        ));
    }

    // A cancelled question means the single-directory layout.
    let multi_os = prompter
        .confirm("Use separate folders for different operating systems?", false)
        .unwrap_or(false);

    let dotfiles_repo = prompter
        .text("Repository Name:", Some(DEFAULT_REPO_NAME))
        .context("Failed to get repository name")?
        .trim()
        .to_string();

    if dotfiles_repo.is_empty() {
        return Err(anyhow!("Repository name cannot be empty"));
    }

    let default_path = home.join(DEFAULT_REPO_NAME).display().to_string();
    let path_str = prompter
        .text("Local Path:", Some(&default_path))
        .context("Failed to get local path")?;

    let local_path = expand_tilde(path_str.trim(), home);

    Ok(OnboardingConfig {
        github_username,
        multi_os,
        dotfiles_repo,
        local_path,
    })
}

/// Expand tilde in path
pub fn expand_tilde(path: &str, home: &Path) -> PathBuf {
    if path == "~" {
        home.to_path_buf()
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}
