//! Print the recorded session history for the current project.

use anyhow::{Context, Result};
use std::io::{self, Write};

use crate::config::Config;
use crate::state::{SessionRecord, StateDir};

pub fn run(limit: Option<usize>) -> Result<()> {
    let config = Config::load()?;
    let cwd = std::env::current_dir().context("Failed to determine working directory")?;
    let state = StateDir::locate(&cwd, &config);

    let records = state.read_history()?;
    let stdout = io::stdout();
    print_records(tail(&records, limit), &mut stdout.lock())
}

/// The last `limit` records, or all of them.
fn tail(records: &[SessionRecord], limit: Option<usize>) -> &[SessionRecord] {
    match limit {
        Some(n) if n < records.len() => &records[records.len() - n..],
        _ => records,
    }
}

fn print_records(records: &[SessionRecord], out: &mut impl Write) -> Result<()> {
    if records.is_empty() {
        writeln!(out, "No sessions recorded")?;
        return Ok(());
    }

    for record in records {
        let when = if record.timestamp.is_empty() {
            "(no timestamp)"
        } else {
            record.timestamp.as_str()
        };
        writeln!(out, "{when}  {}  {}", record.session_id, record.event)?;
    }
    Ok(())
}
