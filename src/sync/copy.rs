use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::logger;
use crate::prompt::Prompter;

/// What happened to one synced entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOutcome {
    Copied,
    /// Declined by the user or already the same file
    Skipped,
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn file_name(relative: &Path) -> String {
    relative
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| relative.display().to_string())
}

/// Confirm replacing something that already exists; a failed prompt is a no.
fn confirm(prompter: &dyn Prompter, message: &str) -> bool {
    prompter.confirm(message, false).unwrap_or_else(|e| {
        log::debug!("Prompt failed: {e:#}");
        false
    })
}

/// Copy one file into `target_dir`, keeping its file name
pub(crate) fn sync_file(
    source: &Path,
    target_dir: &Path,
    relative: &Path,
    force: bool,
    prompter: &dyn Prompter,
) -> Result<EntryOutcome> {
    let name = file_name(relative);
    let target = target_dir.join(&name);

    if same_file(source, &target) {
        logger::info(format!("Already in repository: {}", relative.display()));
        return Ok(EntryOutcome::Skipped);
    }

    if target.exists()
        && !force
        && !confirm(
            prompter,
            &format!("File {name} already exists in repository. Overwrite?"),
        )
    {
        logger::info(format!("Skipping file: {}", relative.display()));
        return Ok(EntryOutcome::Skipped);
    }

    fs::copy(source, &target).with_context(|| {
        format!(
            "Failed to copy {} to {}",
            source.display(),
            target.display()
        )
    })?;

    logger::success(format!("Added file: {}", relative.display()));
    Ok(EntryOutcome::Copied)
}

/// Merge a directory into `target_dir`, entry by entry
///
/// Each descendant goes through the same existence check as a single file,
/// so a merge may end up partial. Failures of individual descendants are
/// reported and skipped.
pub(crate) fn sync_directory(
    source: &Path,
    target_dir: &Path,
    relative: &Path,
    force: bool,
    prompter: &dyn Prompter,
) -> Result<EntryOutcome> {
    let name = file_name(relative);
    let target = target_dir.join(&name);

    if same_file(source, &target) {
        logger::info(format!("Already in repository: {}", relative.display()));
        return Ok(EntryOutcome::Skipped);
    }

    if target.exists()
        && !force
        && !confirm(
            prompter,
            &format!("Directory {name} already exists in repository. Merge?"),
        )
    {
        logger::info(format!("Skipping directory: {}", relative.display()));
        return Ok(EntryOutcome::Skipped);
    }

    fs::create_dir_all(&target)
        .with_context(|| format!("Failed to create target directory: {}", target.display()))?;

    let mut entries = fs::read_dir(source)
        .with_context(|| format!("Failed to read directory: {}", source.display()))?
        .collect::<std::io::Result<Vec<_>>>()
        .with_context(|| format!("Failed to read directory: {}", source.display()))?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let entry_path = entry.path();
        let entry_relative = relative.join(entry.file_name());

        let metadata = match fs::metadata(&entry_path) {
            Ok(metadata) => metadata,
            Err(e) => {
                logger::warning(format!(
                    "Failed to get info for {}: {}",
                    entry_relative.display(),
                    e
                ));
                continue;
            }
        };

        let result = if metadata.is_dir() {
            sync_directory(&entry_path, &target, &entry_relative, force, prompter)
        } else {
            sync_file(&entry_path, &target, &entry_relative, force, prompter)
        };

        if let Err(e) = result {
            logger::warning(format!(
                "Failed to sync {}: {:#}",
                entry_relative.display(),
                e
            ));
        }
    }

    logger::success(format!("Added directory: {}", relative.display()));
    Ok(EntryOutcome::Copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::{Answer, ScriptedPrompter};
    use tempfile::TempDir;

    #[test]
    fn test_copy_new_file() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join(".vimrc");
        fs::write(&source, "set number").unwrap();
        let repo = temp.path().join("repo");
        fs::create_dir(&repo).unwrap();

        let prompter = ScriptedPrompter::new([]);
        let outcome =
            sync_file(&source, &repo, Path::new(".vimrc"), false, &prompter).unwrap();

        assert_eq!(outcome, EntryOutcome::Copied);
        assert_eq!(fs::read_to_string(repo.join(".vimrc")).unwrap(), "set number");
        assert!(prompter.asked().is_empty());
    }

    #[test]
    fn test_existing_file_declined() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join(".vimrc");
        fs::write(&source, "new").unwrap();
        let repo = temp.path().join("repo");
        fs::create_dir(&repo).unwrap();
        fs::write(repo.join(".vimrc"), "old").unwrap();

        let prompter = ScriptedPrompter::new([Answer::Confirm(false)]);
        let outcome =
            sync_file(&source, &repo, Path::new(".vimrc"), false, &prompter).unwrap();

        assert_eq!(outcome, EntryOutcome::Skipped);
        assert_eq!(fs::read_to_string(repo.join(".vimrc")).unwrap(), "old");
    }

    #[test]
    fn test_existing_file_forced() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join(".vimrc");
        fs::write(&source, "new").unwrap();
        let repo = temp.path().join("repo");
        fs::create_dir(&repo).unwrap();
        fs::write(repo.join(".vimrc"), "old").unwrap();

        let prompter = ScriptedPrompter::new([]);
        sync_file(&source, &repo, Path::new(".vimrc"), true, &prompter).unwrap();

        assert_eq!(fs::read_to_string(repo.join(".vimrc")).unwrap(), "new");
    }

    #[test]
    fn test_partial_directory_merge() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("nvim");
        fs::create_dir_all(source.join("lua")).unwrap();
        fs::write(source.join("init.lua"), "new init").unwrap();
        fs::write(source.join("lua/plugins.lua"), "plugins").unwrap();

        let repo = temp.path().join("repo");
        fs::create_dir_all(repo.join("nvim")).unwrap();
        fs::write(repo.join("nvim/init.lua"), "old init").unwrap();

        // Merge the directory, keep the old init.lua.
        let prompter = ScriptedPrompter::new([Answer::Confirm(true), Answer::Confirm(false)]);
        let outcome = sync_directory(
            &source,
            &repo,
            Path::new(".config/nvim"),
            false,
            &prompter,
        )
        .unwrap();

        assert_eq!(outcome, EntryOutcome::Copied);
        assert_eq!(fs::read_to_string(repo.join("nvim/init.lua")).unwrap(), "old init");
        assert_eq!(
            fs::read_to_string(repo.join("nvim/lua/plugins.lua")).unwrap(),
            "plugins"
        );
        assert_eq!(prompter.remaining(), 0);
    }

    #[test]
    fn test_cancelled_prompt_counts_as_decline() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("vim");
        fs::create_dir(&source).unwrap();
        let repo = temp.path().join("repo");
        fs::create_dir_all(repo.join("vim")).unwrap();

        let prompter = ScriptedPrompter::new([Answer::Cancel]);
        let outcome =
            sync_directory(&source, &repo, Path::new(".vim"), false, &prompter).unwrap();

        assert_eq!(outcome, EntryOutcome::Skipped);
    }

    #[test]
    #[cfg(unix)]
    fn test_linked_source_is_not_copied_onto_itself() {
        let temp = TempDir::new().unwrap();
        let repo = temp.path().join("repo");
        fs::create_dir(&repo).unwrap();
        fs::write(repo.join(".vimrc"), "managed").unwrap();
        let source = temp.path().join(".vimrc");
        std::os::unix::fs::symlink(repo.join(".vimrc"), &source).unwrap();

        let prompter = ScriptedPrompter::new([]);
        let outcome =
            sync_file(&source, &repo, Path::new(".vimrc"), true, &prompter).unwrap();

        assert_eq!(outcome, EntryOutcome::Skipped);
        assert_eq!(fs::read_to_string(repo.join(".vimrc")).unwrap(), "managed");
    }
}
