//! Command handler modules
//!
//! One module per area of the command line. Handlers report progress as
//! status lines and return errors upward; only `main` terminates the process.

pub mod apply;
pub mod clone;
pub mod info;
pub mod init;
pub mod remote;
pub mod sync;

use std::path::PathBuf;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::process::ProcessRunner;
use crate::prompt::Prompter;

// Re-export all public handler functions for convenient use
pub use apply::{handle_apply, handle_unapply};
pub use clone::{handle_clone, handle_fork};
pub use info::{handle_categories, handle_show_config};
pub use init::handle_init;
pub use remote::{handle_fetch, handle_push};
pub use sync::handle_sync;

/// Everything a command needs, built once at the command boundary
pub struct App<'a> {
    pub config: Config,
    pub home: PathBuf,
    pub prompter: &'a dyn Prompter,
    pub runner: &'a dyn ProcessRunner,
    pub catalog: &'a Catalog,
}

impl App<'_> {
    /// Persist the configuration, downgrading failure to a warning
    ///
    /// Used after the primary action of a command already succeeded.
    pub(crate) fn save_config_or_warn(&self) {
        if let Err(e) = self.config.save() {
            crate::logger::warning(format!("Failed to save configuration: {e:#}"));
        }
    }
}
