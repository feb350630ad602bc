use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, instrument};

use agui_protocol::event::{AguiEvent, AguiMetadata};
use agui_sessions::SessionTracker;

use crate::error::EventError;
use crate::registry::TemplateRegistry;
use crate::substitute;

/// Resolves templates into concrete AG-UI events.
///
/// All state is injected: the registry supplies skeletons, the session
/// tracker supplies per-connection correlation. The generator itself is
/// stateless and cheap to share.
pub struct EventGenerator {
    registry: Arc<TemplateRegistry>,
    sessions: Arc<SessionTracker>,
    agent_name: String,
}

impl EventGenerator {
    pub fn new(
        registry: Arc<TemplateRegistry>,
        sessions: Arc<SessionTracker>,
        agent_name: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            sessions,
            agent_name: agent_name.into(),
        }
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    pub fn sessions(&self) -> &SessionTracker {
        &self.sessions
    }

    /// Generate one event from a registered template.
    ///
    /// Default variables (`timestamp`, `agent_name`, `session_id`) lose to
    /// caller-supplied ones on key collision. The template body is deep-
    /// copied before substitution; the produced event shares no state with
    /// the registry. The only failure is an unknown template id — missing
    /// variables leave their `{{name}}` markers verbatim.
    #[instrument(skip(self, variables))]
    pub fn generate(
        &self,
        template_id: &str,
        variables: Map<String, Value>,
        connection_id: Option<&str>,
    ) -> Result<AguiEvent, EventError> {
        let template = self
            .registry
            .get(template_id)
            .ok_or_else(|| EventError::TemplateNotFound {
                id: template_id.to_string(),
            })?;

        let now = chrono::Utc::now();
        let session_id = match connection_id {
            Some(conn) => self.sessions.session_id_for(conn),
            // one-off value, deliberately not persisted in the tracker
            None => format!("session-adhoc-{}", now.timestamp_millis()),
        };

        let mut merged: Map<String, Value> = Map::new();
        merged.insert("timestamp".to_string(), Value::String(now.to_rfc3339()));
        merged.insert(
            "agent_name".to_string(),
            Value::String(self.agent_name.clone()),
        );
        merged.insert("session_id".to_string(), Value::String(session_id));
        // caller wins on collision
        merged.extend(variables);

        let mut fields = template.body;
        substitute::substitute_object(&mut fields, &merged);

        debug!(template_id, "event generated");
        Ok(AguiEvent {
            kind: template.kind,
            fields,
            agui_metadata: AguiMetadata {
                generated_by: self.agent_name.clone(),
                template_id: template_id.to_string(),
                generated_at: now.to_rfc3339(),
                client_id: connection_id.map(str::to_string),
            },
        })
    }
}
