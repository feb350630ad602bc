use serde::{Deserialize, Serialize};

/// A per-connection session record.
///
/// Sessions are lazy-created on the first event generated for a connection
/// and double as an activity tracker: every lookup refreshes
/// `last_activity_at`, so the record always reflects when the connection
/// last produced an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Stable for the connection's lifetime.
    /// Format: `session-{connection_id}-{unix_millis}`.
    pub session_id: String,
    /// RFC3339 creation timestamp.
    pub created_at: String,
    /// RFC3339 timestamp of the most recent lookup.
    pub last_activity_at: String,
}
