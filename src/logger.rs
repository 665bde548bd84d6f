//! File logging setup.
//!
//! Hooks own stdout (it carries `additionalContext` back to the host), so
//! diagnostics go to `$XDG_STATE_HOME/self-reborn/self-reborn.log` instead.

use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::UtcTime;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "SELF_REBORN_LOG";

const LOG_FILE: &str = "self-reborn.log";
const DEFAULT_FILTER: &str = "warn";

/// Install the global file subscriber.
///
/// Returns the appender guard, which must be held until exit so buffered
/// lines are flushed. Returns None (logging disabled) when the log directory
/// cannot be determined or created, or the log file cannot be opened.
pub fn init() -> Option<WorkerGuard> {
    let dir = log_dir()?;
    fs::create_dir_all(&dir).ok()?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE)
        .build(&dir)
        .ok()?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_timer(UtcTime::rfc_3339())
        .try_init()
        .ok()?;

    Some(guard)
}

/// Directory holding the log file.
///
/// Checks XDG_STATE_HOME first, falls back to ~/.local/state.
pub fn log_dir() -> Option<PathBuf> {
    let base = match std::env::var_os("XDG_STATE_HOME") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => home::home_dir()?.join(".local/state"),
    };
    Some(base.join("self-reborn"))
}
