//! Package discovery and symlink application.
//!
//! A package is a directory of the managed repository whose contents mirror
//! the layout of the home directory. Applying runs three phases in order:
//! discover the packages, optionally let the user pick a subset, then clear
//! conflicting files and hand the packages to stow.

use anyhow::{anyhow, Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::backup::{self, BackupReport};
use crate::config::{self, Config};
use crate::logger;
use crate::process::ProcessRunner;
use crate::prompt::Prompter;
use crate::scm::{self, Stow, VCS_DIR};

/// Answer selecting every package
pub const SELECT_ALL: &str = "all";

/// Outcome of [`apply_dotfiles`]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Nothing was discovered or nothing was selected
    #[default]
    NothingToApply,
    /// Links were created for these packages
    Applied {
        packages: Vec<String>,
        backups: BackupReport,
    },
}

/// Outcome of [`unapply_dotfiles`]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum UnapplyOutcome {
    #[default]
    NothingToRemove,
    Removed { packages: Vec<String> },
}

fn subdirectories(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();

    for entry in fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?
    {
        let entry = entry.with_context(|| format!("Failed to read directory: {}", dir.display()))?;
        let name = entry.file_name().to_string_lossy().to_string();

        if name == VCS_DIR {
            continue;
        }

        let is_dir = entry
            .file_type()
            .with_context(|| format!("Failed to inspect {}", entry.path().display()))?
            .is_dir();
        if is_dir {
            names.push(name);
        }
    }

    names.sort();
    Ok(names)
}

/// List the packages of the repository at `root`
///
/// With an empty `os_folder` every top-level directory except `.git` is a
/// package. Otherwise only the directory named `os_folder` is considered and
/// its subdirectories become packages named `<os_folder>/<subdir>`; other
/// top-level directories are ignored. The result is sorted by name.
pub fn discover_packages(root: &Path, os_folder: &str) -> Result<Vec<String>> {
    if os_folder.is_empty() {
        return subdirectories(root);
    }

    let os_dir = root.join(os_folder);
    if !os_dir.is_dir() {
        log::debug!("No folder for this OS at {}", os_dir.display());
        return Ok(Vec::new());
    }

    Ok(subdirectories(&os_dir)?
        .into_iter()
        .map(|name| format!("{os_folder}/{name}"))
        .collect())
}

/// Resolve a selection answer against the discovered packages
///
/// `all` (any case) selects everything. Otherwise the answer is a
/// comma-separated list of 1-based indices; blank, non-numeric and
/// out-of-range tokens are dropped, as are repeats.
pub fn parse_selection(input: &str, packages: &[String]) -> Vec<String> {
    let input = input.trim();

    if input.eq_ignore_ascii_case(SELECT_ALL) {
        return packages.to_vec();
    }

    let mut seen = HashSet::new();
    input
        .split(',')
        .filter_map(|token| token.trim().parse::<usize>().ok())
        .filter(|&index| index >= 1 && index <= packages.len())
        .filter(|&index| seen.insert(index))
        .map(|index| packages[index - 1].clone())
        .collect()
}

/// Show the numbered package list and ask which ones to use
pub fn select_packages(packages: &[String], prompter: &dyn Prompter) -> Result<Vec<String>> {
    logger::info("Available packages:");
    for (i, package) in packages.iter().enumerate() {
        eprintln!("[{}] {}", i + 1, package);
    }

    let answer = prompter
        .text(
            "Enter package numbers to apply (comma separated, or 'all' for all packages):",
            None,
        )
        .context("Failed to read package selection")?;

    Ok(parse_selection(&answer, packages))
}

fn require_repo(root: &Path) -> Result<()> {
    if scm::is_repo(root) {
        Ok(())
    } else {
        Err(anyhow!("No dotfiles repository found at {}", root.display()))
    }
}

fn resolve_packages(
    config: &Config,
    selective: bool,
    prompter: &dyn Prompter,
) -> Result<Vec<String>> {
    let root = &config.local_path;
    require_repo(root)?;

    let packages = discover_packages(root, &config.current_os_folder())?;
    log::debug!("Discovered packages: {packages:?}");

    if selective && !packages.is_empty() {
        select_packages(&packages, prompter)
    } else {
        Ok(packages)
    }
}

/// Link the repository's packages into `home`
///
/// Fails without touching the filesystem when `config.local_path` is not a
/// repository. Conflicting files are backed up under `~/.dfmgr_backup`
/// before stow runs. There is no rollback: when stow fails, files already
/// backed up stay where they were moved.
pub fn apply_dotfiles(
    config: &Config,
    home: &Path,
    selective: bool,
    prompter: &dyn Prompter,
    runner: &dyn ProcessRunner,
) -> Result<ApplyOutcome> {
    let packages = resolve_packages(config, selective, prompter)?;

    if packages.is_empty() {
        logger::warning("No packages to apply");
        return Ok(ApplyOutcome::NothingToApply);
    }

    let stow = Stow::new(runner);
    if !stow.is_installed() {
        return Err(anyhow!("GNU stow is not installed"));
    }

    let root = &config.local_path;
    let backups =
        backup::backup_and_remove_conflicts(root, home, &config::backup_dir(home), &packages)
            .context("Failed to back up conflicting files")?;

    logger::info(format!(
        "Symlinking packages using stow: {}",
        packages.join(", ")
    ));
    stow.stow(root, home, &packages)?;

    Ok(ApplyOutcome::Applied { packages, backups })
}

/// Remove the links of the repository's packages from `home`
pub fn unapply_dotfiles(
    config: &Config,
    home: &Path,
    selective: bool,
    prompter: &dyn Prompter,
    runner: &dyn ProcessRunner,
) -> Result<UnapplyOutcome> {
    let packages = resolve_packages(config, selective, prompter)?;

    if packages.is_empty() {
        logger::warning("No packages to remove");
        return Ok(UnapplyOutcome::NothingToRemove);
    }

    logger::info(format!(
        "Removing symlinks using stow: {}",
        packages.join(", ")
    ));
    Stow::new(runner).unstow(&config.local_path, home, &packages)?;

    Ok(UnapplyOutcome::Removed { packages })
}
