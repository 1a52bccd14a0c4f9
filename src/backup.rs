//! Clearing the way for stow: files already present where a package wants
//! to place a link are copied to a backup tree and then removed.

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::logger;

/// A file moved out of the way
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackedUpFile {
    /// Where the file used to live in the target tree
    pub original: PathBuf,
    /// Where its contents were copied to
    pub backup: PathBuf,
}

/// Outcome of [`backup_and_remove_conflicts`]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BackupReport {
    pub backed_up: Vec<BackedUpFile>,
    /// Destinations that already resolve to the package's own file
    pub already_linked: usize,
}

impl BackupReport {
    pub fn is_empty(&self) -> bool {
        self.backed_up.is_empty()
    }
}

/// Back up and remove every file in `target_root` that a package would overwrite.
///
/// For each package, every regular file under `source_root/<package>` is
/// mapped to the same relative path under `target_root`. An existing file
/// there is copied to `backup_root/<package>/<relative path>` and deleted.
///
/// The first I/O error aborts the whole run; nothing already moved is put
/// back. A later run overwrites backups left at the same path.
pub fn backup_and_remove_conflicts(
    source_root: &Path,
    target_root: &Path,
    backup_root: &Path,
    packages: &[String],
) -> Result<BackupReport> {
    let mut report = BackupReport::default();

    for package in packages {
        let package_root = source_root.join(package);

        for entry in WalkDir::new(&package_root).follow_links(false) {
            let entry = entry.with_context(|| {
                format!("Failed to walk package directory: {}", package_root.display())
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(&package_root)
                .with_context(|| format!("Unexpected path in package: {}", entry.path().display()))?;
            let target = target_root.join(relative);

            let metadata = match fs::metadata(&target) {
                Ok(metadata) => metadata,
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => {
                    return Err(e).with_context(|| format!("Failed to inspect {}", target.display()))
                }
            };

            if resolves_to(&target, entry.path()) {
                log::debug!("{} already links into the repository", target.display());
                report.already_linked += 1;
                continue;
            }

            if metadata.is_dir() {
                return Err(anyhow!(
                    "Cannot back up {}: it is a directory but package '{}' provides a file there",
                    target.display(),
                    package
                ));
            }

            logger::warning(format!(
                "Found existing file: {}",
                display_relative(&target, target_root)
            ));

            let backup = backup_root.join(package).join(relative);
            backup_file(&target, &backup)?;
            logger::info(format!("Backed up to: {}", backup.display()));

            fs::remove_file(&target)
                .with_context(|| format!("Failed to remove {}", target.display()))?;
            logger::info(format!("Removed: {}", target.display()));

            report.backed_up.push(BackedUpFile {
                original: target,
                backup,
            });
        }
    }

    Ok(report)
}

fn backup_file(source: &Path, backup: &Path) -> Result<()> {
    if let Some(parent) = backup.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create backup directory: {}", parent.display()))?;
    }

    if backup.exists() {
        logger::warning(format!(
            "Overwriting earlier backup: {}",
            backup.display()
        ));
    }

    fs::copy(source, backup).with_context(|| {
        format!(
            "Failed to back up {} to {}",
            source.display(),
            backup.display()
        )
    })?;

    Ok(())
}

/// Whether `path` and `other` are the same file once links are resolved
fn resolves_to(path: &Path, other: &Path) -> bool {
    match (path.canonicalize(), other.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn display_relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| path.display().to_string())
}
