//! Change detection.
//!
//! A frame needs a sync when it has never been recorded, or when the
//! remote last-modified instant is strictly newer than the recorded one.
//! Equal timestamps mean up to date, so repeated runs against an
//! unchanged remote converge to no-ops.

use chrono::{DateTime, Utc};

use crate::store::SyncRecord;

/// Decide whether a frame must be re-synced.
pub fn needs_sync(record: Option<&SyncRecord>, remote_modified: DateTime<Utc>) -> bool {
    match record.and_then(|r| r.last_modified) {
        Some(recorded) => remote_modified > recorded,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn record_at(s: &str) -> SyncRecord {
        SyncRecord {
            last_modified: Some(instant(s)),
            ..SyncRecord::default()
        }
    }

    #[test]
    fn unknown_frame_needs_sync() {
        assert!(needs_sync(None, instant("2026-01-01T00:00:00Z")));
    }

    #[test]
    fn record_without_timestamp_needs_sync() {
        let record = SyncRecord::default();
        assert!(needs_sync(Some(&record), instant("2026-01-01T00:00:00Z")));
    }

    #[test]
    fn newer_remote_needs_sync() {
        let record = record_at("2026-01-01T00:00:00Z");
        assert!(needs_sync(Some(&record), instant("2026-01-02T00:00:00Z")));
    }

    #[test]
    fn equal_timestamps_are_up_to_date() {
        let record = record_at("2026-01-01T00:00:00Z");
        assert!(!needs_sync(Some(&record), instant("2026-01-01T00:00:00Z")));
    }

    #[test]
    fn older_remote_is_up_to_date() {
        let record = record_at("2026-01-02T00:00:00Z");
        assert!(!needs_sync(Some(&record), instant("2026-01-01T00:00:00Z")));
    }
}
