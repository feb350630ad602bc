use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use agui_protocol::event::EventKind;

/// A registered event skeleton. String leaves of `body` may carry
/// `{{name}}` placeholder markers, resolved at generation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(flatten)]
    pub body: Map<String, Value>,
}

impl Template {
    pub fn new(kind: EventKind, body: Value) -> Self {
        let body = match body {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("value".to_string(), other);
                map
            }
        };
        Self { kind, body }
    }
}

/// Thread-safe store of event templates, seeded with the built-in set at
/// construction. Registration does not validate placeholder resolvability —
/// that is deferred to generation, where unresolved markers are a
/// non-failure anyway.
pub struct TemplateRegistry {
    templates: DashMap<String, Template>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        let registry = Self {
            templates: DashMap::new(),
        };
        registry.seed_builtins();
        registry
    }

    /// Insert or overwrite a template.
    pub fn register(&self, id: &str, template: Template) {
        self.templates.insert(id.to_string(), template);
    }

    /// Remove a template. Returns whether it was present.
    pub fn remove(&self, id: &str) -> bool {
        self.templates.remove(id).is_some()
    }

    /// Deep copy of the stored template — callers never see shared state.
    pub fn get(&self, id: &str) -> Option<Template> {
        self.templates.get(id).map(|t| t.value().clone())
    }

    /// All registered ids, order not significant.
    pub fn list(&self) -> Vec<String> {
        self.templates.iter().map(|e| e.key().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// The built-in template names and their `type` tags are external
    /// contract consumed by AG-UI clients — do not rename.
    fn seed_builtins(&self) {
        use EventKind::{Chat, Display, Input, Status};

        self.register(
            "chat-welcome",
            Template::new(
                Chat,
                json!({
                    "text": "Hello {{user_name}}! I'm {{agent_name}}, your agent operations assistant.",
                    "sender": "{{agent_name}}",
                    "sent_at": "{{timestamp}}"
                }),
            ),
        );
        self.register(
            "chat-response",
            Template::new(
                Chat,
                json!({
                    "text": "{{message}}",
                    "sender": "{{agent_name}}",
                    "sent_at": "{{timestamp}}"
                }),
            ),
        );
        self.register(
            "chat-error",
            Template::new(
                Chat,
                json!({
                    "text": "Something went wrong: {{error_message}}",
                    "sender": "{{agent_name}}",
                    "sent_at": "{{timestamp}}"
                }),
            ),
        );

        self.register(
            "display-agent-list",
            Template::new(
                Display,
                json!({
                    "template": "agent_list",
                    "title": "Active Agents",
                    "data": {
                        "agents": "{{agents_data}}",
                        "updated_at": "{{timestamp}}"
                    }
                }),
            ),
        );
        self.register(
            "display-metrics",
            Template::new(
                Display,
                json!({
                    "template": "metrics_panel",
                    "title": "System Health",
                    "data": {
                        "health": "{{health_data}}",
                        "metrics": "{{metrics_data}}",
                        "updated_at": "{{timestamp}}"
                    }
                }),
            ),
        );
        self.register(
            "display-form",
            Template::new(
                Display,
                json!({
                    "template": "form",
                    "form": {
                        "title": "{{form_title}}",
                        "fields": "{{form_fields}}",
                        "submit_label": "{{submit_label}}"
                    }
                }),
            ),
        );
        self.register(
            "display-success",
            Template::new(
                Display,
                json!({
                    "template": "notice",
                    "level": "success",
                    "message": "{{message}}"
                }),
            ),
        );
        self.register(
            "display-error",
            Template::new(
                Display,
                json!({
                    "template": "notice",
                    "level": "error",
                    "message": "{{error_message}}"
                }),
            ),
        );

        self.register(
            "input-text",
            Template::new(
                Input,
                json!({
                    "input_type": "text",
                    "prompt": "{{prompt}}",
                    "placeholder": "{{placeholder}}"
                }),
            ),
        );
        self.register(
            "input-choice",
            Template::new(
                Input,
                json!({
                    "input_type": "choice",
                    "prompt": "{{prompt}}",
                    "choices": "{{choices}}"
                }),
            ),
        );

        self.register(
            "status-update",
            Template::new(
                Status,
                json!({
                    "operation": "{{operation}}",
                    "status": "{{status}}",
                    "message": "{{message}}",
                    "updated_at": "{{timestamp}}"
                }),
            ),
        );
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUILTINS: &[(&str, EventKind)] = &[
        ("chat-welcome", EventKind::Chat),
        ("chat-response", EventKind::Chat),
        ("chat-error", EventKind::Chat),
        ("display-agent-list", EventKind::Display),
        ("display-metrics", EventKind::Display),
        ("display-form", EventKind::Display),
        ("display-success", EventKind::Display),
        ("display-error", EventKind::Display),
        ("input-text", EventKind::Input),
        ("input-choice", EventKind::Input),
        ("status-update", EventKind::Status),
    ];

    #[test]
    fn builtins_are_seeded_with_contract_types() {
        let registry = TemplateRegistry::new();
        for (id, kind) in BUILTINS {
            let template = registry.get(id).unwrap_or_else(|| panic!("missing builtin {id}"));
            assert_eq!(template.kind, *kind, "wrong type tag for {id}");
        }
        assert_eq!(registry.len(), BUILTINS.len());
    }

    #[test]
    fn register_overwrites_existing() {
        let registry = TemplateRegistry::new();
        registry.register(
            "chat-welcome",
            Template::new(EventKind::Chat, json!({"text": "replaced"})),
        );
        assert_eq!(registry.get("chat-welcome").unwrap().body["text"], "replaced");
    }

    #[test]
    fn remove_reports_presence() {
        let registry = TemplateRegistry::new();
        registry.register("t1", Template::new(EventKind::Chat, json!({"text": "x"})));
        assert!(registry.remove("t1"));
        assert!(!registry.remove("t1"));
        assert!(registry.get("t1").is_none());
    }

    #[test]
    fn list_contains_registered_ids() {
        let registry = TemplateRegistry::new();
        registry.register("custom", Template::new(EventKind::Status, json!({})));
        let ids = registry.list();
        assert!(ids.contains(&"custom".to_string()));
        assert!(ids.contains(&"display-error".to_string()));
    }

    #[test]
    fn get_returns_a_copy() {
        let registry = TemplateRegistry::new();
        let mut copy = registry.get("chat-response").unwrap();
        copy.body.insert("text".to_string(), json!("mutated"));
        // the stored template is unaffected
        assert_eq!(registry.get("chat-response").unwrap().body["text"], "{{message}}");
    }

    #[test]
    fn template_wire_shape_round_trips() {
        let json_str = r#"{"type":"chat","text":"Hi {{name}}","sender":"{{name}}"}"#;
        let template: Template = serde_json::from_str(json_str).unwrap();
        assert_eq!(template.kind, EventKind::Chat);
        assert_eq!(template.body["text"], "Hi {{name}}");
    }
}
