//! Placeholder substitution over template bodies.
//!
//! Walks nested objects (not arrays — template bodies keep arrays as
//! static structure) and rewrites `{{name}}` occurrences in string leaves
//! from the merged variable set. Unknown placeholders are left verbatim.

use agui_core::config::MAX_TEMPLATE_DEPTH;
use serde_json::{Map, Value};

/// Substitute placeholders throughout an object body, in place.
pub fn substitute_object(body: &mut Map<String, Value>, vars: &Map<String, Value>) {
    substitute_at_depth(body, vars, 0);
}

fn substitute_at_depth(body: &mut Map<String, Value>, vars: &Map<String, Value>, depth: usize) {
    // Recursion bound: structures deeper than the guard are left untouched
    // below it. Registerable templates make the body shape caller-controlled.
    if depth >= MAX_TEMPLATE_DEPTH {
        return;
    }
    for (_, value) in body.iter_mut() {
        match value {
            Value::String(s) => {
                if let Some(replacement) = substitute_string(s, vars) {
                    *value = replacement;
                }
            }
            Value::Object(nested) => substitute_at_depth(nested, vars, depth + 1),
            _ => {}
        }
    }
}

/// Resolve one string leaf. Returns `None` when nothing changed.
///
/// A leaf that is exactly one placeholder (`"{{agents_data}}"`) whose
/// variable is a non-string JSON value is spliced as that value, preserving
/// structure — this is how flows embed provider payloads under `data` keys.
/// Everywhere else substitution is textual.
fn substitute_string(s: &str, vars: &Map<String, Value>) -> Option<Value> {
    if let Some(name) = whole_placeholder(s) {
        if let Some(value) = vars.get(name) {
            return Some(match value {
                Value::String(text) => Value::String(text.clone()),
                other => other.clone(),
            });
        }
        return None;
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    let mut changed = false;
    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            break;
        };
        let name = &after[..end];
        out.push_str(&rest[..start]);
        match vars.get(name) {
            Some(value) => {
                out.push_str(&value_as_text(value));
                changed = true;
            }
            // unresolved placeholders stay verbatim — explicit non-failure
            None => {
                out.push_str(&rest[start..start + 2 + end + 2]);
            }
        }
        rest = &after[end + 2..];
    }
    if !changed {
        return None;
    }
    out.push_str(rest);
    Some(Value::String(out))
}

/// `Some(name)` when the whole string is a single `{{name}}` marker.
fn whole_placeholder(s: &str) -> Option<&str> {
    let inner = s.strip_prefix("{{")?.strip_suffix("}}")?;
    if inner.contains("{{") || inner.contains("}}") {
        return None;
    }
    Some(inner)
}

/// Textual form of a variable for inline substitution.
fn value_as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vars(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn inline_substitution() {
        let mut body = json!({"text": "Hi {{name}}, welcome to {{place}}"})
            .as_object()
            .cloned()
            .unwrap();
        substitute_object(&mut body, &vars(&[("name", json!("Ann")), ("place", json!("AG-UI"))]));
        assert_eq!(body["text"], "Hi Ann, welcome to AG-UI");
    }

    #[test]
    fn missing_placeholder_stays_verbatim() {
        let mut body = json!({"text": "Hi {{name}}"}).as_object().cloned().unwrap();
        substitute_object(&mut body, &Map::new());
        assert_eq!(body["text"], "Hi {{name}}");
    }

    #[test]
    fn mixed_resolved_and_missing() {
        let mut body = json!({"text": "{{greeting}}, {{name}}!"})
            .as_object()
            .cloned()
            .unwrap();
        substitute_object(&mut body, &vars(&[("greeting", json!("Hello"))]));
        assert_eq!(body["text"], "Hello, {{name}}!");
    }

    #[test]
    fn whole_placeholder_splices_structured_value() {
        let mut body = json!({"data": {"agents": "{{agents_data}}"}})
            .as_object()
            .cloned()
            .unwrap();
        let agents = json!([{"id": "a1"}, {"id": "a2"}]);
        substitute_object(&mut body, &vars(&[("agents_data", agents.clone())]));
        assert_eq!(body["data"]["agents"], agents);
    }

    #[test]
    fn inline_non_string_variable_is_stringified() {
        let mut body = json!({"text": "count: {{n}}"}).as_object().cloned().unwrap();
        substitute_object(&mut body, &vars(&[("n", json!(3))]));
        assert_eq!(body["text"], "count: 3");
    }

    #[test]
    fn arrays_are_not_walked() {
        let mut body = json!({"choices": ["{{a}}", "{{b}}"]})
            .as_object()
            .cloned()
            .unwrap();
        substitute_object(&mut body, &vars(&[("a", json!("x"))]));
        assert_eq!(body["choices"], json!(["{{a}}", "{{b}}"]));
    }

    #[test]
    fn nested_objects_are_walked() {
        let mut body = json!({"outer": {"inner": {"text": "{{v}}"}}})
            .as_object()
            .cloned()
            .unwrap();
        substitute_object(&mut body, &vars(&[("v", json!("deep"))]));
        assert_eq!(body["outer"]["inner"]["text"], "deep");
    }

    #[test]
    fn depth_guard_stops_pathological_nesting() {
        // leaf object ends up exactly at the guard depth
        let mut value = json!({"text": "{{v}}"});
        for _ in 0..MAX_TEMPLATE_DEPTH {
            value = json!({"next": value});
        }
        let mut body = value.as_object().cloned().unwrap();
        substitute_object(&mut body, &vars(&[("v", json!("resolved"))]));

        // the leaf at the guard must remain untouched
        let mut cursor = &body["next"];
        for _ in 0..MAX_TEMPLATE_DEPTH - 1 {
            cursor = &cursor["next"];
        }
        assert_eq!(cursor["text"], "{{v}}");
    }

    #[test]
    fn unterminated_marker_is_left_alone() {
        let mut body = json!({"text": "Hi {{name"}).as_object().cloned().unwrap();
        substitute_object(&mut body, &vars(&[("name", json!("Ann"))]));
        assert_eq!(body["text"], "Hi {{name");
    }
}
