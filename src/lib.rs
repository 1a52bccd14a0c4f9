//! # dfmgr
//!
//! A command-line tool for managing dotfiles with a GitHub repository and GNU stow.
//!
//! ## Overview
//!
//! `dfmgr` keeps your configuration files in a Git repository (by default `~/dotfiles`).
//! The repository is split into *packages*: directories whose contents mirror your home
//! directory. Applying the repository hands those packages to GNU stow, which creates
//! symlinks in your home directory; files already sitting in the way are backed up to
//! `~/.dfmgr_backup` first.
//!
//! ## Key Features
//!
//! - **Bootstrap**: Create a repository and publish it to GitHub, or clone or fork someone else's
//! - **Sync**: Copy files from your home directory into the repository, optionally grouped by category
//! - **Apply**: Link every package, or an interactively chosen subset, into your home directory
//! - **Multi-OS layouts**: Keep one folder of packages per operating system
//!
//! ## Architecture
//!
//! - Configuration and environment ([`config`], [`probe`])
//! - Capabilities for external programs and questions ([`process`], [`prompt`])
//! - Git, GitHub and stow front ends ([`scm`])
//! - Core logic ([`catalog`], [`backup`], [`packages`], [`sync`])
//! - User interface ([`onboarding`], [`handlers`], [`logger`])

/// Pre-apply conflict handling.
///
/// Moves regular files that would block stow into the backup directory,
/// preserving their home-relative layout.
pub mod backup;

/// Table of well-known configuration files and their categories.
pub mod catalog;

/// Persistent user configuration.
///
/// Resolves the configuration file location, loads it leniently and saves
/// it as pretty-printed JSON.
pub mod config;

/// Command handlers wiring configuration, capabilities and core logic together.
pub mod handlers;

/// Logging configuration and colored status output.
pub mod logger;

/// Interactive questions asked by `dfmgr init`.
pub mod onboarding;

/// Package discovery, selection and (un)application through stow.
pub mod packages;

/// Lookup of executables on the search path.
pub mod probe;

/// External process execution behind a swappable runner.
pub mod process;

/// User prompts behind a swappable capability.
pub mod prompt;

/// Front ends for git, the GitHub CLI and GNU stow.
pub mod scm;

/// Copying files from the home directory into the repository.
///
/// Expands user patterns, optionally files entries under a category folder,
/// and asks before replacing anything already in the repository.
pub mod sync;
