use colored::Colorize;
use log::{Level, LevelFilter};
use std::fmt::Display;
use std::io::Write;

/// Initialize the logging system
///
/// Diagnostics go through the `log` facade and are written to stderr so they
/// interleave with the status lines below instead of polluting stdout.
///
/// The level can be controlled via the `RUST_LOG` environment variable:
/// - `RUST_LOG=error` - Only errors
/// - `RUST_LOG=warn` - Warnings and errors (default)
/// - `RUST_LOG=debug` - Every external command line
/// - `RUST_LOG=trace` - Everything
///
/// `verbose` forces at least `debug` regardless of `RUST_LOG`.
///
/// ## Examples
///
/// ```bash
/// # Show every git/stow invocation
/// RUST_LOG=debug dfmgr apply
/// ```
pub fn init_logger(verbose: bool) {
    let level = log_level(std::env::var("RUST_LOG").ok().as_deref(), verbose);

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{:5}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter_level(level)
        .target(env_logger::Target::Stderr)
        .try_init()
        .ok(); // Ignore error if logger is already initialized
}

/// Level applied for a `RUST_LOG` value and the `--verbose` flag
fn log_level(rust_log: Option<&str>, verbose: bool) -> LevelFilter {
    let env_level = rust_log
        .and_then(|s| s.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Warn);

    if verbose {
        env_level.max(LevelFilter::Debug)
    } else {
        env_level
    }
}

/// Level warnings are mirrored at; below the default so the status line
/// is the only output unless debug logging is on.
const MIRROR_LEVEL: Level = Level::Debug;

/// Severity of a user-facing status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    fn prefix(self) -> colored::ColoredString {
        match self {
            Severity::Info => "[INFO]".cyan(),
            Severity::Success => "[SUCCESS]".green(),
            Severity::Warning => "[WARNING]".yellow(),
            Severity::Error => "[ERROR]".red(),
        }
    }
}

/// Format a status line without writing it anywhere
pub fn status_line(severity: Severity, message: impl Display) -> String {
    format!("{} {}", severity.prefix(), message)
}

fn emit(severity: Severity, message: impl Display) {
    eprintln!("{}", status_line(severity, message));
}

pub fn info(message: impl Display) {
    emit(Severity::Info, message);
}

pub fn success(message: impl Display) {
    emit(Severity::Success, message);
}

/// Warnings are mirrored to the debug log so they keep their place among
/// the diagnostics of a `-v` run.
pub fn warning(message: impl Display) {
    let message = message.to_string();
    log::log!(MIRROR_LEVEL, "{message}");
    emit(Severity::Warning, message);
}

pub fn error(message: impl Display) {
    emit(Severity::Error, message);
}
