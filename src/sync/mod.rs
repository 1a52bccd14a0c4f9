// Module declarations
mod copy;
mod discovery;

pub use copy::EntryOutcome;

use anyhow::{anyhow, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::{Catalog, FALLBACK_CATEGORY};
use crate::config::Config;
use crate::logger;
use crate::prompt::Prompter;
use crate::scm;

use copy::{sync_directory, sync_file};
use discovery::{catalog_key, expand_pattern, is_within, relative_within};

/// Flags of the `sync` command
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncOptions {
    /// Replace existing repository entries without asking
    pub force: bool,
    /// File entries under a category folder
    pub organize: bool,
}

/// Tally of a sync run, counted per top-level matched entry
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    pub synced: usize,
    /// Declined by the user or already in the repository
    pub skipped: usize,
    /// Rejected or failed with a warning
    pub failed: usize,
}

impl SyncReport {
    /// Entries that reached a decision without error
    pub fn handled(&self) -> usize {
        self.synced + self.skipped
    }
}

/// Pick the category folder for a home-relative path
///
/// Known files use their catalog category. Unknown files are offered the
/// catalog's categories; a failed or cancelled prompt files them under
/// `Misc`.
pub fn resolve_category(relative: &Path, catalog: &Catalog, prompter: &dyn Prompter) -> String {
    if let Some(info) = catalog.lookup(&catalog_key(relative)) {
        return info.category.to_string();
    }

    let mut options: Vec<String> = catalog.categories().into_iter().map(String::from).collect();
    options.push(FALLBACK_CATEGORY.to_string());

    let name = relative
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    prompter
        .select(&format!("Select category for {name}"), &options)
        .unwrap_or_else(|e| {
            log::debug!("Category prompt failed: {e:#}");
            FALLBACK_CATEGORY.to_string()
        })
}

/// Directory of the repository an entry is copied into
pub fn destination_dir(config: &Config, category: Option<&str>) -> PathBuf {
    let mut dir = config.local_path.clone();

    let os_folder = config.current_os_folder();
    if !os_folder.is_empty() {
        dir.push(os_folder);
    }

    if let Some(category) = category {
        dir.push(category);
    }

    dir
}

/// Copy files and directories matching `patterns` from `home` into the repository
///
/// Relative patterns are anchored at `home`. Every match must lie inside
/// `home` and outside the repository itself. Problems with single patterns
/// or entries are reported as warnings; the run only fails when the
/// repository is missing or not a single entry was handled.
pub fn sync_paths(
    config: &Config,
    home: &Path,
    patterns: &[String],
    options: SyncOptions,
    catalog: &Catalog,
    prompter: &dyn Prompter,
) -> Result<SyncReport> {
    if patterns.is_empty() {
        return Err(anyhow!("No files specified"));
    }

    let root = &config.local_path;
    if !scm::is_repo(root) {
        return Err(anyhow!("No dotfiles repository found at {}", root.display()));
    }

    let matches: Vec<PathBuf> = patterns
        .iter()
        .flat_map(|pattern| expand_pattern(pattern, home))
        .collect();

    if matches.is_empty() {
        return Err(anyhow!("No files matched the specified patterns"));
    }

    let mut report = SyncReport::default();

    for path in matches {
        match sync_entry(config, home, &path, options, catalog, prompter) {
            Ok(EntryOutcome::Copied) => report.synced += 1,
            Ok(EntryOutcome::Skipped) => report.skipped += 1,
            Err(e) => {
                logger::warning(format!("{e:#}"));
                report.failed += 1;
            }
        }
    }

    if report.handled() == 0 {
        return Err(anyhow!("Failed to sync any files"));
    }

    Ok(report)
}

fn sync_entry(
    config: &Config,
    home: &Path,
    path: &Path,
    options: SyncOptions,
    catalog: &Catalog,
    prompter: &dyn Prompter,
) -> Result<EntryOutcome> {
    let relative = relative_within(path, home).ok_or_else(|| {
        anyhow!("Skipping file outside of home directory: {}", path.display())
    })?;

    if is_within(path, &config.local_path) {
        return Err(anyhow!(
            "Skipping file inside the dotfiles repository: {}",
            path.display()
        ));
    }

    let metadata = fs::metadata(path)
        .map_err(|e| anyhow!("Failed to stat {}: {}", path.display(), e))?;

    let category = options
        .organize
        .then(|| resolve_category(&relative, catalog, prompter));
    let target_dir = destination_dir(config, category.as_deref());

    fs::create_dir_all(&target_dir)
        .map_err(|e| anyhow!("Failed to create directory {}: {}", target_dir.display(), e))?;

    if metadata.is_dir() {
        sync_directory(path, &target_dir, &relative, options.force, prompter)
            .map_err(|e| anyhow!("Failed to sync directory {}: {:#}", relative.display(), e))
    } else {
        sync_file(path, &target_dir, &relative, options.force, prompter)
            .map_err(|e| anyhow!("Failed to sync file {}: {:#}", relative.display(), e))
    }
}
