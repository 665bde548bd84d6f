//! Core data structures for the on-disk hook state.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Event tag written for every recorded session end.
pub const SESSION_END_EVENT: &str = "session_end";

/// One line of `session_history.jsonl`.
///
/// Field order is the on-disk key order: `timestamp`, `session_id`, `event`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionRecord {
    /// RFC 3339 UTC time the session ended, e.g. `2026-10-17T09:30:00.123456+00:00`.
    /// Older or hand-written records may omit it.
    #[serde(default)]
    pub timestamp: String,

    pub session_id: String,

    pub event: String,
}

impl SessionRecord {
    /// Build a `session_end` record stamped with the current time.
    pub fn session_end(session_id: &str) -> Self {
        Self::session_end_at(session_id, Utc::now())
    }

    pub fn session_end_at(session_id: &str, at: DateTime<Utc>) -> Self {
        Self {
            timestamp: at.to_rfc3339_opts(SecondsFormat::Micros, false),
            session_id: session_id.to_string(),
            event: SESSION_END_EVENT.to_string(),
        }
    }

    /// Parsed timestamp, or None if missing or unparseable.
    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|ts| ts.with_timezone(&Utc))
    }
}

/// JSON object the start hook prints to stdout.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HookOutput {
    #[serde(rename = "additionalContext")]
    pub additional_context: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_record_serializes_in_key_order() {
        let at = Utc.with_ymd_and_hms(2026, 10, 17, 9, 30, 0).unwrap();
        let record = SessionRecord::session_end_at("abc", at);
        let line = serde_json::to_string(&record).unwrap();
        assert_eq!(
            line,
            r#"{"timestamp":"2026-10-17T09:30:00.000000+00:00","session_id":"abc","event":"session_end"}"#
        );
    }

    #[test]
    fn test_record_without_timestamp_parses() {
        let record: SessionRecord =
            serde_json::from_str(r#"{"session_id": "old-session", "event": "session_end"}"#)
                .unwrap();
        assert_eq!(record.session_id, "old-session");
        assert!(record.timestamp.is_empty());
        assert!(record.ended_at().is_none());
    }

    #[test]
    fn test_ended_at_parses_written_timestamp() {
        let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let record = SessionRecord::session_end_at("abc", at);
        assert_eq!(record.ended_at(), Some(at));
    }

    #[test]
    fn test_hook_output_key() {
        let output = HookOutput {
            additional_context: "hello".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&output).unwrap(),
            r#"{"additionalContext":"hello"}"#
        );
    }
}
