//! Filesystem-based hook state shared by the session-end and session-start hooks.
//!
//! The state directory is the only channel between the two hooks: nothing is
//! cached in memory and every invocation rebuilds its view from disk.

mod store;
mod types;

pub use store::StateDir;
pub use types::{HookOutput, SESSION_END_EVENT, SessionRecord};
