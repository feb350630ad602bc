use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Top-level classification of an AG-UI event. The tag is part of the wire
/// contract consumed by UI clients and must serialize lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Conversational message shown in the chat pane.
    Chat,
    /// Structured panel content (agent lists, metrics, forms).
    Display,
    /// A request for user input (free text or a choice).
    Input,
    /// Progress/status notification for a long-running operation.
    Status,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Chat => "chat",
            EventKind::Display => "display",
            EventKind::Input => "input",
            EventKind::Status => "status",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generation metadata stamped onto every produced event.
/// Wire: `"agui_metadata": { "generated_by": "ui-agent", ... }`
///
/// `client_id` serializes as JSON null when the event was generated without
/// a connection — clients rely on the field always being present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AguiMetadata {
    pub generated_by: String,
    pub template_id: String,
    /// RFC3339 generation timestamp.
    pub generated_at: String,
    pub client_id: Option<String>,
}

/// A fully generated AG-UI event, ready for delivery.
///
/// Wire shape (template fields flattened to the top level):
/// `{ "type": "chat", "text": "...", ..., "agui_metadata": {...} }`
///
/// Events are value objects: once produced they own a deep copy of the
/// resolved template body and share no state with the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AguiEvent {
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    pub agui_metadata: AguiMetadata,
}

impl AguiEvent {
    /// Serialize to the wire string. Events contain only JSON-native values,
    /// so serialization cannot fail in practice; a failure is mapped to a
    /// minimal error object rather than a panic.
    pub fn to_wire(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"type":"status","error":"event serialization failed"}"#.to_string()
        })
    }
}
