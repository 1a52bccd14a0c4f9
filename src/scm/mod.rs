//! Wrappers around the external tools dfmgr drives.
//!
//! Every invocation goes through a [`ProcessRunner`](crate::process::ProcessRunner)
//! so callers decide whether real processes are spawned.

mod git;
mod hosting;
mod stow;

use std::path::Path;

pub use git::{remote_url, GitRepo, GIT};
pub use hosting::{is_valid_username, Hosting, GH};
pub use stow::{Stow, STOW};

/// Name of the version-control metadata directory
pub const VCS_DIR: &str = ".git";

/// Check if a directory is a Git repository.
pub fn is_repo(path: &Path) -> bool {
    path.join(VCS_DIR).exists()
}
