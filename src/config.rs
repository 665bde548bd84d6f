//! Global configuration for self-reborn.
//!
//! Every field is optional; an absent or unreadable config file yields the
//! defaults that match the Claude Code project layout.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_MARKER_DIR: &str = ".claude";
pub const DEFAULT_STATE_DIR: &str = "self-reborn";
pub const DEFAULT_SESSION_ID_ENV: &str = "CLAUDE_SESSION_ID";

/// Configuration values that cannot be used to build state paths.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must be a single directory name, got '{value}'")]
    NotADirectoryName { field: &'static str, value: String },

    #[error("{field} must not be empty")]
    Empty { field: &'static str },
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Directory whose presence marks a project root (e.g. ".claude")
    pub marker_dir: Option<String>,

    /// Subdirectory of the marker directory holding hook state
    pub state_dir: Option<String>,

    /// Environment variable carrying the ending session's identifier
    pub session_id_env: Option<String>,
}

impl Config {
    /// Load the global config file.
    ///
    /// Missing file returns defaults. A malformed file is logged and ignored
    /// so that a typo never breaks the session it is observing.
    pub fn load() -> Result<Self> {
        let Some(path) = global_config_path() else {
            debug!("no home directory, using default config");
            return Ok(Self::default());
        };
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let config = match fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<Option<Config>>(&content) {
                // An all-comments file parses as null
                Ok(parsed) => parsed.unwrap_or_default(),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "malformed config file, using defaults");
                    Self::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read config file {}", path.display()));
            }
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref marker) = self.marker_dir {
            check_dir_name("marker_dir", marker)?;
        }
        if let Some(ref state) = self.state_dir {
            check_dir_name("state_dir", state)?;
        }
        if let Some(ref var) = self.session_id_env
            && var.trim().is_empty()
        {
            return Err(ConfigError::Empty {
                field: "session_id_env",
            });
        }
        Ok(())
    }

    pub fn marker_dir(&self) -> &str {
        self.marker_dir.as_deref().unwrap_or(DEFAULT_MARKER_DIR)
    }

    pub fn state_dir(&self) -> &str {
        self.state_dir.as_deref().unwrap_or(DEFAULT_STATE_DIR)
    }

    pub fn session_id_env(&self) -> &str {
        self.session_id_env
            .as_deref()
            .unwrap_or(DEFAULT_SESSION_ID_ENV)
    }

    /// Read the session identifier from the configured environment variable.
    ///
    /// An unset or non-UTF-8 variable reads as empty.
    pub fn session_id_from_env(&self) -> String {
        std::env::var(self.session_id_env()).unwrap_or_default()
    }
}

fn check_dir_name(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Empty { field });
    }
    let mut components = Path::new(value).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(ConfigError::NotADirectoryName {
            field,
            value: value.to_string(),
        }),
    }
}

/// Path to the global configuration file.
///
/// `$XDG_CONFIG_HOME/self-reborn/config.yaml`, falling back to
/// `~/.config/self-reborn/config.yaml`.
pub fn global_config_path() -> Option<PathBuf> {
    let base = match std::env::var_os("XDG_CONFIG_HOME") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => home::home_dir()?.join(".config"),
    };
    Some(base.join("self-reborn").join("config.yaml"))
}
