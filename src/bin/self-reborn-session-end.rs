//! Standalone SessionEnd hook. Takes no arguments; the session id comes from
//! `$CLAUDE_SESSION_ID`.

use anyhow::Result;

fn main() -> Result<()> {
    let _log_guard = self_reborn::logger::init();
    self_reborn::command::session_end::run()
}
