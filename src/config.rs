use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::logger;

/// Environment variable overriding the configuration file location
pub const CONFIG_ENV_VAR: &str = "DFMGR_CONFIG";

/// Name of the configuration file under the home directory
pub const CONFIG_FILE_NAME: &str = ".dfmgr";

/// Default name of the hosted dotfiles repository
pub const DEFAULT_REPO_NAME: &str = "dotfiles";

/// Directory under the home directory receiving displaced files
pub const BACKUP_DIR_NAME: &str = ".dfmgr_backup";

/// Get the user's home directory
pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().context("Failed to get home directory")
}

/// Resolve the configuration file path:
/// - an explicit path (the `--config` flag)
/// - `$DFMGR_CONFIG` when set and non-empty
/// - `~/.dfmgr`
pub fn config_file_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(path.to_path_buf());
    }

    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(path));
    }

    Ok(home_dir()?.join(CONFIG_FILE_NAME))
}

/// Get the directory where conflicting files are backed up
pub fn backup_dir(home: &Path) -> PathBuf {
    home.join(BACKUP_DIR_NAME)
}

/// Identifier of the running platform (`linux`, `macos`, `windows`, ...)
pub fn current_platform() -> &'static str {
    std::env::consts::OS
}

fn default_os_separation() -> BTreeMap<String, String> {
    ["linux", "macos", "windows"]
        .into_iter()
        .map(|os| (os.to_string(), os.to_string()))
        .collect()
}

/// User settings persisted between runs
///
/// Loaded once when a command starts and handed down by reference to
/// whatever needs it. Field names match the on-disk JSON document, which is
/// meant to be safe to edit by hand; any field missing from the file keeps
/// its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Owner of the hosted repository; empty means not configured yet
    pub github_username: String,

    /// Nest packages one level under a per-OS folder
    pub multi_os: bool,

    /// Platform identifier to folder name
    pub os_separation: BTreeMap<String, String>,

    /// Name of the hosted repository
    pub dotfiles_repo: String,

    /// Root of the managed repository on disk
    pub local_path: PathBuf,

    /// File this configuration was loaded from and is saved to
    #[serde(skip)]
    path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_default();
        Config::with_home(&home)
    }
}

impl Config {
    /// Defaults anchored at the given home directory
    pub fn with_home(home: &Path) -> Self {
        Config {
            github_username: String::new(),
            multi_os: false,
            os_separation: default_os_separation(),
            dotfiles_repo: DEFAULT_REPO_NAME.to_string(),
            local_path: home.join(DEFAULT_REPO_NAME),
            path: home.join(CONFIG_FILE_NAME),
        }
    }

    /// Load the configuration, falling back to defaults
    ///
    /// A missing file is not an error. An unreadable or unparsable file is
    /// reported as a warning and the defaults are kept.
    pub fn load(path: &Path, home: &Path) -> Self {
        let mut config = Config::with_home(home);
        config.path = path.to_path_buf();

        if !path.exists() {
            log::debug!("No configuration at {}, using defaults", path.display());
            return config;
        }

        match Self::from_file(path) {
            Ok(mut loaded) => {
                loaded.path = path.to_path_buf();
                loaded
            }
            Err(e) => {
                logger::warning(format!("{e:#}"));
                config
            }
        }
    }

    /// Read a configuration file, failing on any read or parse error
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Unable to read config file: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Unable to parse config file: {}", path.display()))
    }

    /// Save the configuration to the file it was loaded from
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write config file: {}", self.path.display()))?;

        log::debug!("Saved configuration to {}", self.path.display());
        Ok(())
    }

    /// Path of the backing configuration file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Folder holding this machine's packages, or `""` when OS separation is off
    pub fn current_os_folder(&self) -> String {
        self.os_folder_for(current_platform())
    }

    /// Same as [`Config::current_os_folder`] for an arbitrary platform identifier
    pub fn os_folder_for(&self, platform: &str) -> String {
        if !self.multi_os {
            return String::new();
        }

        if let Some(folder) = self.os_separation.get(platform) {
            return folder.clone();
        }

        // Configurations written by older releases key macOS as "darwin".
        if platform == "macos" {
            if let Some(folder) = self.os_separation.get("darwin") {
                return folder.clone();
            }
        }

        platform.to_string()
    }

    /// Adopt the repository layout settings of another configuration
    pub fn adopt_layout(&mut self, other: &Config) {
        self.multi_os = other.multi_os;
        self.os_separation = other.os_separation.clone();
    }
}
