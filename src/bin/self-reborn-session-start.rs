//! Standalone SessionStart hook. Takes no arguments and prints at most one
//! `{"additionalContext": ...}` line.

use anyhow::Result;

fn main() -> Result<()> {
    let _log_guard = self_reborn::logger::init();
    self_reborn::command::session_start::run()
}
