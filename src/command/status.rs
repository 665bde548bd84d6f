//! Show the hook state for the current project without consuming anything.

use anyhow::{Context, Result};
use chrono::Utc;
use std::io::{self, Write};
use std::path::Path;

use crate::config::Config;
use crate::project::find_project_root;
use crate::state::StateDir;
use crate::util::format_elapsed_secs;

pub fn run() -> Result<()> {
    let config = Config::load()?;
    let cwd = std::env::current_dir().context("Failed to determine working directory")?;
    let root = find_project_root(&cwd, config.marker_dir());
    let state = StateDir::for_project(&root, &config);

    let stdout = io::stdout();
    print_status(&root, &state, &mut stdout.lock())
}

pub fn print_status(root: &Path, state: &StateDir, out: &mut impl Write) -> Result<()> {
    writeln!(out, "Project:   {}", root.display())?;
    if !state.exists() {
        writeln!(out, "No self-reborn state")?;
        return Ok(());
    }
    writeln!(out, "State dir: {}", state.path().display())?;

    let last = state.read_session_id()?;
    writeln!(
        out,
        "Last session: {}",
        last.as_deref().unwrap_or("(none recorded)")
    )?;
    writeln!(out, "Sessions:  {}", state.count_sessions()?)?;

    let last_end = state
        .read_history()?
        .last()
        .and_then(|record| record.ended_at());
    if let Some(ended) = last_end {
        let secs = (Utc::now() - ended).num_seconds().max(0) as u64;
        writeln!(
            out,
            "Last end:  {} ({} ago)",
            ended.format("%Y-%m-%d %H:%M:%S UTC"),
            format_elapsed_secs(secs)
        )?;
    }

    writeln!(
        out,
        "Pending:   restart reason {}, context note {}",
        yes_no(state.has_restart_reason()),
        yes_no(state.has_context())
    )?;
    Ok(())
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
