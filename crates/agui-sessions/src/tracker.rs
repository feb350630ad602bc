use dashmap::DashMap;
use serde_json::Value;
use tracing::debug;

use crate::types::SessionRecord;

/// Thread-safe tracker for per-connection sessions and UI state.
///
/// Both maps are keyed by connection id but have independent lifecycles:
/// a session record appears on the first event generated for a connection,
/// a state bag on the first `set_state` call. Neither expires on its own —
/// `remove` must be called when the connection is torn down, and
/// `clear_all` at process shutdown.
pub struct SessionTracker {
    sessions: DashMap<String, SessionRecord>,
    ui_state: DashMap<String, serde_json::Map<String, Value>>,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
            ui_state: DashMap::new(),
        }
    }

    /// Return the session id for a connection, creating the record on first
    /// use. Every call refreshes `last_activity_at` — lookup doubles as a
    /// liveness signal, not a pure read.
    pub fn session_id_for(&self, connection_id: &str) -> String {
        let now = chrono::Utc::now();
        let mut entry = self
            .sessions
            .entry(connection_id.to_string())
            .or_insert_with(|| {
                let record = SessionRecord {
                    session_id: format!(
                        "session-{}-{}",
                        connection_id,
                        now.timestamp_millis()
                    ),
                    created_at: now.to_rfc3339(),
                    last_activity_at: now.to_rfc3339(),
                };
                debug!(connection_id, session_id = %record.session_id, "session created");
                record
            });
        entry.last_activity_at = now.to_rfc3339();
        entry.session_id.clone()
    }

    /// Snapshot the session record for a connection, if one exists.
    /// Does not refresh activity.
    pub fn get(&self, connection_id: &str) -> Option<SessionRecord> {
        self.sessions.get(connection_id).map(|r| r.value().clone())
    }

    /// Store one UI state value for a connection. The bag is created on
    /// first write.
    pub fn set_state(&self, connection_id: &str, key: &str, value: Value) {
        self.ui_state
            .entry(connection_id.to_string())
            .or_default()
            .insert(key.to_string(), value);
    }

    /// Read one UI state value for a connection.
    pub fn get_state(&self, connection_id: &str, key: &str) -> Option<Value> {
        self.ui_state
            .get(connection_id)
            .and_then(|bag| bag.get(key).cloned())
    }

    /// Tear down both the session record and the state bag for a
    /// connection. Called when the WS connection closes.
    pub fn remove(&self, connection_id: &str) {
        let had_session = self.sessions.remove(connection_id).is_some();
        let had_state = self.ui_state.remove(connection_id).is_some();
        if had_session || had_state {
            debug!(connection_id, "session torn down");
        }
    }

    /// Drop every session and state bag. Process-shutdown path.
    pub fn clear_all(&self) {
        self.sessions.clear();
        self.ui_state.clear();
    }

    /// Number of live session records.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

impl Default for SessionTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn session_id_is_stable_per_connection() {
        let tracker = SessionTracker::new();
        let first = tracker.session_id_for("conn-1");
        let second = tracker.session_id_for("conn-1");
        assert_eq!(first, second);
        assert!(first.starts_with("session-conn-1-"));
    }

    #[test]
    fn distinct_connections_get_distinct_sessions() {
        let tracker = SessionTracker::new();
        let a = tracker.session_id_for("conn-a");
        let b = tracker.session_id_for("conn-b");
        assert_ne!(a, b);
    }

    #[test]
    fn lookup_refreshes_last_activity() {
        let tracker = SessionTracker::new();
        tracker.session_id_for("conn-1");
        let created = tracker.get("conn-1").unwrap();

        std::thread::sleep(std::time::Duration::from_millis(5));
        tracker.session_id_for("conn-1");
        let refreshed = tracker.get("conn-1").unwrap();

        assert_eq!(created.session_id, refreshed.session_id);
        assert_eq!(created.created_at, refreshed.created_at);
        assert!(refreshed.last_activity_at >= created.last_activity_at);
    }

    #[test]
    fn state_bag_is_independent_of_session() {
        let tracker = SessionTracker::new();
        tracker.set_state("conn-1", "selected_agent", json!("agent-42"));

        // writing state must not have created a session record
        assert!(tracker.get("conn-1").is_none());
        assert_eq!(
            tracker.get_state("conn-1", "selected_agent"),
            Some(json!("agent-42"))
        );
        assert_eq!(tracker.get_state("conn-1", "missing"), None);
    }

    #[test]
    fn state_overwrite_keeps_latest_value() {
        let tracker = SessionTracker::new();
        tracker.set_state("conn-1", "k", json!(1));
        tracker.set_state("conn-1", "k", json!(2));
        assert_eq!(tracker.get_state("conn-1", "k"), Some(json!(2)));
    }

    #[test]
    fn remove_tears_down_both_maps() {
        let tracker = SessionTracker::new();
        tracker.session_id_for("conn-1");
        tracker.set_state("conn-1", "k", json!("v"));

        tracker.remove("conn-1");
        assert!(tracker.get("conn-1").is_none());
        assert_eq!(tracker.get_state("conn-1", "k"), None);

        // a new session after removal gets a fresh record
        std::thread::sleep(std::time::Duration::from_millis(5));
        let fresh = tracker.session_id_for("conn-1");
        assert!(fresh.starts_with("session-conn-1-"));
    }

    #[test]
    fn clear_all_empties_everything() {
        let tracker = SessionTracker::new();
        tracker.session_id_for("a");
        tracker.session_id_for("b");
        tracker.set_state("c", "k", json!(true));

        tracker.clear_all();
        assert_eq!(tracker.session_count(), 0);
        assert_eq!(tracker.get_state("c", "k"), None);
    }
}
