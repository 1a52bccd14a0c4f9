use std::path::{Component, Path, PathBuf};

use crate::logger;

/// Expand a leading `~` and anchor relative patterns at `home`
pub(crate) fn anchor_pattern(pattern: &str, home: &Path) -> PathBuf {
    let pattern = if pattern == "~" {
        ""
    } else if let Some(rest) = pattern.strip_prefix("~/") {
        rest
    } else {
        pattern
    };

    let path = Path::new(pattern);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        home.join(path)
    }
}

/// Expand one user pattern into the paths it matches
///
/// Invalid patterns and unreadable matches are reported as warnings; the
/// remaining matches are still returned.
pub(crate) fn expand_pattern(pattern: &str, home: &Path) -> Vec<PathBuf> {
    let anchored = anchor_pattern(pattern, home);
    let anchored = anchored.to_string_lossy();

    let paths = match glob::glob(&anchored) {
        Ok(paths) => paths,
        Err(e) => {
            logger::warning(format!("Invalid pattern {anchored}: {e}"));
            return Vec::new();
        }
    };

    let mut matches = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) => matches.push(path),
            Err(e) => logger::warning(format!("Cannot read {}: {}", e.path().display(), e.error())),
        }
    }

    if matches.is_empty() {
        logger::warning(format!("No matches found for pattern: {anchored}"));
    }

    matches
}

/// Resolve `.` and `..` components without touching the filesystem
pub(crate) fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }

    normalized
}

/// Path of `path` relative to `base`, or `None` when it escapes `base`
pub(crate) fn relative_within(path: &Path, base: &Path) -> Option<PathBuf> {
    let path = normalize(path);
    let base = normalize(base);

    path.strip_prefix(&base)
        .ok()
        .filter(|rel| !rel.as_os_str().is_empty())
        .map(Path::to_path_buf)
}

/// Whether `path` is `base` or lies below it
pub(crate) fn is_within(path: &Path, base: &Path) -> bool {
    normalize(path).starts_with(normalize(base))
}

/// Forward-slash form of a relative path, as used by the catalog
pub(crate) fn catalog_key(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
