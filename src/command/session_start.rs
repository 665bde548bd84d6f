//! SessionStart hook: tell a freshly started session why it was restarted.
//!
//! Pending restart notes are consumed here, so each note is delivered to
//! exactly one session.

use anyhow::{Context, Result};
use std::io::{self, Write};
use tracing::debug;

use crate::config::Config;
use crate::state::{HookOutput, StateDir};

const PREFIX: &str = "[Self-Reborn]";

/// Hook entry point. Writes at most one JSON line to stdout.
pub fn run() -> Result<()> {
    let config = Config::load()?;
    let cwd = std::env::current_dir().context("Failed to determine working directory")?;

    let state = StateDir::locate(&cwd, &config);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    start_session(&state, &mut out)
}

/// Consume pending notes and print the hook output, if any, to `out`.
pub fn start_session(state: &StateDir, out: &mut impl Write) -> Result<()> {
    let Some(output) = build_output(state)? else {
        return Ok(());
    };

    let line = serde_json::to_string(&output)?;
    writeln!(out, "{line}").context("Failed to write hook output")?;
    out.flush().context("Failed to flush hook output")?;
    Ok(())
}

/// Build the hook output for this start. Returns None when there is nothing
/// to report, including when the project has no state directory at all.
pub fn build_output(state: &StateDir) -> Result<Option<HookOutput>> {
    if !state.exists() {
        debug!(state_dir = %state.path().display(), "no state directory");
        return Ok(None);
    }

    let fragments = collect_fragments(state)?;
    if fragments.is_empty() {
        return Ok(None);
    }

    Ok(Some(HookOutput {
        additional_context: fragments.join("\n"),
    }))
}

/// Gather context fragments in fixed order: restart reason, context note,
/// session count.
fn collect_fragments(state: &StateDir) -> Result<Vec<String>> {
    let mut fragments = Vec::new();

    if let Some(reason) = state.take_restart_reason()? {
        fragments.push(format!("{PREFIX} Restarted. Reason: {reason}"));
    }

    if let Some(context) = state.take_context()? {
        fragments.push(format!("{PREFIX} Previous context:\n{context}"));
    }

    // Only genuine restarts are announced
    let count = state.count_sessions()?;
    if count > 1 {
        fragments.push(format!(
            "{PREFIX} Session #{count} (restarted {} times)",
            count - 1
        ));
    }

    debug!(fragments = fragments.len(), sessions = count, "collected start context");
    Ok(fragments)
}
