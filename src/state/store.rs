//! Filesystem-based persistence for hook state.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use super::types::SessionRecord;
use crate::config::Config;
use crate::project::find_project_root;

const SESSION_ID_FILE: &str = "session_id";
const HISTORY_FILE: &str = "session_history.jsonl";
const RESTART_REASON_FILE: &str = "restart_reason";
const CONTEXT_FILE: &str = "context.md";

/// Handle on a project's hook state directory.
///
/// Directory structure:
/// ```text
/// <project>/.claude/self-reborn/
/// ├── session_id                # last ended session, overwritten each end
/// ├── session_history.jsonl     # one SessionRecord per ended session
/// ├── restart_reason            # written externally, consumed by start
/// └── context.md                # written externally, consumed by start
/// ```
///
/// Constructing a `StateDir` touches nothing on disk; the directory is only
/// created by the write methods.
#[derive(Debug, Clone)]
pub struct StateDir {
    path: PathBuf,
}

impl StateDir {
    /// Resolve the state directory for the project enclosing `cwd`.
    pub fn locate(cwd: &Path, config: &Config) -> Self {
        let root = find_project_root(cwd, config.marker_dir());
        Self::for_project(&root, config)
    }

    /// State directory inside a known project root.
    pub fn for_project(root: &Path, config: &Config) -> Self {
        Self {
            path: root.join(config.marker_dir()).join(config.state_dir()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_dir()
    }

    /// Create the state directory and any missing ancestors.
    pub fn ensure(&self) -> Result<()> {
        fs::create_dir_all(&self.path).with_context(|| {
            format!("Failed to create state directory {}", self.path.display())
        })
    }

    fn file(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }

    pub fn history_path(&self) -> PathBuf {
        self.file(HISTORY_FILE)
    }

    // ── Session end ─────────────────────────────────────────────────────────

    /// Overwrite the last-session marker with `session_id`.
    pub fn write_session_id(&self, session_id: &str) -> Result<()> {
        write_atomic(&self.file(SESSION_ID_FILE), session_id.as_bytes())?;
        info!(session_id, "stored session id");
        Ok(())
    }

    /// Read the last-session marker. Returns None if absent or blank.
    pub fn read_session_id(&self) -> Result<Option<String>> {
        read_trimmed(&self.file(SESSION_ID_FILE))
    }

    /// Append one record to the history log, creating the log if needed.
    ///
    /// The whole line is handed to a single write so a record is never
    /// interleaved with another.
    pub fn append_record(&self, record: &SessionRecord) -> Result<()> {
        let path = self.history_path();
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open history log {}", path.display()))?;
        file.write_all(line.as_bytes())
            .with_context(|| format!("Failed to append to history log {}", path.display()))?;

        info!(session_id = %record.session_id, "appended session record");
        Ok(())
    }

    // ── History ─────────────────────────────────────────────────────────────

    /// Number of non-empty lines in the history log (0 if absent).
    ///
    /// Lines are counted, not parsed: a malformed record still marks a
    /// session that ended.
    pub fn count_sessions(&self) -> Result<usize> {
        let path = self.history_path();
        match fs::read_to_string(&path) {
            Ok(content) => Ok(content.lines().filter(|l| !l.trim().is_empty()).count()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(0),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to read history log {}", path.display()))
            }
        }
    }

    /// Parse every record in the history log, oldest first.
    ///
    /// Malformed lines are skipped with a warning.
    pub fn read_history(&self) -> Result<Vec<SessionRecord>> {
        let path = self.history_path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read history log {}", path.display()));
            }
        };

        let mut records = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<SessionRecord>(line) {
                Ok(record) => records.push(record),
                Err(e) => warn!(line = idx + 1, error = %e, "skipping malformed history record"),
            }
        }
        Ok(records)
    }

    // ── Pending restart notes ───────────────────────────────────────────────

    /// Read and delete the pending restart reason.
    pub fn take_restart_reason(&self) -> Result<Option<String>> {
        take_file(&self.file(RESTART_REASON_FILE))
    }

    /// Read and delete the pending context note.
    pub fn take_context(&self) -> Result<Option<String>> {
        take_file(&self.file(CONTEXT_FILE))
    }

    pub fn has_restart_reason(&self) -> bool {
        self.file(RESTART_REASON_FILE).is_file()
    }

    pub fn has_context(&self) -> bool {
        self.file(CONTEXT_FILE).is_file()
    }

    pub fn write_restart_reason(&self, reason: &str) -> Result<()> {
        write_atomic(&self.file(RESTART_REASON_FILE), reason.as_bytes())?;
        info!("stored restart reason");
        Ok(())
    }

    pub fn write_context(&self, context: &str) -> Result<()> {
        write_atomic(&self.file(CONTEXT_FILE), context.as_bytes())?;
        info!(bytes = context.len(), "stored context note");
        Ok(())
    }
}

/// Consume a one-shot file: read it, then delete it.
///
/// The file is deleted even when its trimmed content is empty, so a blank
/// file never lingers. Returns None for absent or blank files. A file that
/// vanishes between read and delete is not an error.
fn take_file(path: &Path) -> Result<Option<String>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("Failed to read {}", path.display())),
    };

    match fs::remove_file(path) {
        Ok(()) => debug!(path = %path.display(), "consumed pending file"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "pending file already consumed");
        }
        Err(e) => return Err(e).with_context(|| format!("Failed to delete {}", path.display())),
    }

    let trimmed = content.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_string()))
    }
}

/// Read a file and trim it. Returns None if absent or blank.
fn read_trimmed(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => {
            let trimmed = content.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                Ok(Some(trimmed.to_string()))
            }
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
    }
}

/// Write content atomically using a temp file in the same directory + rename.
///
/// This ensures the target file is never partially written.
fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
    tmp.write_all(content).context("Failed to write temp file")?;
    tmp.persist(path)
        .with_context(|| format!("Failed to rename temp file to {}", path.display()))?;
    Ok(())
}
