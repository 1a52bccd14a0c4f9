//! Lookup of external executables on the search path.

use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Check whether `program` resolves to an executable on `PATH`.
pub fn is_available(program: &str) -> bool {
    find_executable(program).is_some()
}

/// Resolve `program` against `PATH`, returning the first executable match.
pub fn find_executable(program: &str) -> Option<PathBuf> {
    let path_var = env::var_os("PATH")?;
    find_in(program, &path_var)
}

fn find_in(program: &str, search_path: &OsStr) -> Option<PathBuf> {
    if program.is_empty() {
        return None;
    }

    // A program given with a directory component is checked as-is.
    if Path::new(program).components().count() > 1 {
        let candidate = PathBuf::from(program);
        return is_executable(&candidate).then_some(candidate);
    }

    env::split_paths(search_path)
        .flat_map(|dir| candidates(&dir, program))
        .find(|candidate| is_executable(candidate))
}

#[cfg(windows)]
fn candidates(dir: &Path, program: &str) -> Vec<PathBuf> {
    let exts = env::var("PATHEXT").unwrap_or_else(|_| ".EXE;.CMD;.BAT".to_string());
    std::iter::once(dir.join(program))
        .chain(exts.split(';').map(|ext| dir.join(format!("{program}{ext}"))))
        .collect()
}

#[cfg(not(windows))]
fn candidates(dir: &Path, program: &str) -> Vec<PathBuf> {
    vec![dir.join(program)]
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[cfg(unix)]
    fn make_executable(path: &Path) {
        use std::os::unix::fs::PermissionsExt;
        fs::write(path, "#!/bin/sh\n").unwrap();
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[test]
    #[cfg(unix)]
    fn test_finds_executable_in_search_path() {
        let temp = TempDir::new().unwrap();
        make_executable(&temp.path().join("stow"));

        let search = env::join_paths([temp.path()]).unwrap();
        assert_eq!(find_in("stow", &search), Some(temp.path().join("stow")));
        assert_eq!(find_in("git", &search), None);
    }

    #[test]
    #[cfg(unix)]
    fn test_non_executable_file_is_ignored() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("gh"), "not a program").unwrap();

        let search = env::join_paths([temp.path()]).unwrap();
        assert_eq!(find_in("gh", &search), None);
    }

    #[test]
    fn test_empty_name_is_never_available() {
        assert!(!is_available(""));
    }
}
