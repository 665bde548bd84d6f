//! Session-continuity hooks for an interactive agent host.
//!
//! The session-end hook records which session just finished; the
//! session-start hook hands the next session any pending restart reason,
//! context note and restart count. The two share nothing but the state
//! directory under the project's `.claude/` marker.

pub mod cli;
pub mod command;
pub mod config;
pub mod logger;
pub mod project;
pub mod state;
pub mod util;
