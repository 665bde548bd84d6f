//! SessionEnd hook: record the ending session so the next start can count it.

use anyhow::{Context, Result};
use tracing::debug;

use crate::config::Config;
use crate::state::{SessionRecord, StateDir};

/// Hook entry point. Reads the session id from the environment and records
/// it against the project enclosing the working directory.
pub fn run() -> Result<()> {
    let config = Config::load()?;
    let session_id = config.session_id_from_env();
    let cwd = std::env::current_dir().context("Failed to determine working directory")?;

    let state = StateDir::locate(&cwd, &config);
    end_session(&state, &session_id)
}

/// Persist the marker and append a history record.
///
/// An empty id is a no-op: sessions that never produced an id leave no trace
/// and do not create the state directory.
pub fn end_session(state: &StateDir, session_id: &str) -> Result<()> {
    if session_id.is_empty() {
        debug!("no session id, nothing to record");
        return Ok(());
    }

    state.ensure()?;
    state.write_session_id(session_id)?;
    state.append_record(&SessionRecord::session_end(session_id))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn project() -> (StateDir, TempDir) {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(".claude")).unwrap();
        let state = StateDir::locate(dir.path(), &Config::default());
        (state, dir)
    }

    #[test]
    fn test_saves_session_id() {
        let (state, _dir) = project();

        end_session(&state, "test-session-12345").unwrap();

        let marker = fs::read_to_string(state.path().join("session_id")).unwrap();
        assert_eq!(marker, "test-session-12345");

        let history = fs::read_to_string(state.history_path()).unwrap();
        let entry: serde_json::Value = serde_json::from_str(history.trim()).unwrap();
        assert_eq!(entry["session_id"], "test-session-12345");
        assert_eq!(entry["event"], "session_end");
        assert!(entry["timestamp"].as_str().unwrap().ends_with("+00:00"));
    }

    #[test]
    fn test_empty_session_id_leaves_no_state() {
        let (state, _dir) = project();

        end_session(&state, "").unwrap();

        assert!(!state.exists());
    }

    #[test]
    fn test_appends_to_existing_history() {
        let (state, _dir) = project();
        state.ensure().unwrap();
        fs::write(
            state.history_path(),
            "{\"session_id\": \"old-session\", \"event\": \"session_end\"}\n",
        )
        .unwrap();

        end_session(&state, "new-session").unwrap();

        let content = fs::read_to_string(state.history_path()).unwrap();
        let lines: Vec<&str> = content.trim().split('\n').collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(first["session_id"], "old-session");
        assert_eq!(second["session_id"], "new-session");
    }

    #[test]
    fn test_n_invocations_produce_n_lines() {
        let (state, _dir) = project();

        for i in 0..5 {
            end_session(&state, &format!("session-{i}")).unwrap();
        }

        let records = state.read_history().unwrap();
        assert_eq!(records.len(), 5);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.session_id, format!("session-{i}"));
            assert_eq!(record.event, "session_end");
        }
        assert_eq!(state.read_session_id().unwrap().as_deref(), Some("session-4"));
    }

    #[test]
    fn test_creates_marker_dir_when_missing() {
        let dir = TempDir::new().unwrap();
        let marker = format!(".self-reborn-end-{}", std::process::id());
        let config = Config {
            marker_dir: Some(marker.clone()),
            ..Default::default()
        };
        let state = StateDir::locate(dir.path(), &config);

        end_session(&state, "abc").unwrap();

        assert!(dir.path().join(&marker).join("self-reborn").is_dir());
    }
}
