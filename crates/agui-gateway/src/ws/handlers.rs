//! Concrete WS method handler functions.
//!
//! Each function extracts its parameters, calls the appropriate `AppState`
//! subsystem, and returns a `ResFrame`.  `dispatch::route` is the only
//! caller — keep this module free of I/O side-effects beyond the subsystem
//! calls.

use serde_json::{json, Map, Value};
use tracing::warn;

use agui_core::error::AguiError;
use agui_events::{EventError, FlowReport, Template};
use agui_protocol::frames::ResFrame;

use crate::app::AppState;

/// One place maps gateway errors to their wire code + message.
pub fn error_res(req_id: &str, err: &AguiError) -> ResFrame {
    ResFrame::err(req_id, err.code(), &err.to_string())
}

fn invalid_params(req_id: &str, detail: &str) -> ResFrame {
    error_res(req_id, &AguiError::InvalidParams(detail.to_string()))
}

fn variables_from(params: Option<&Value>) -> Map<String, Value> {
    params
        .and_then(|p| p.get("variables"))
        .and_then(|v| v.as_object())
        .cloned()
        .unwrap_or_default()
}

fn flow_res(req_id: &str, result: Result<FlowReport, EventError>) -> ResFrame {
    match result {
        Ok(report) => ResFrame::ok(req_id, json!({ "report": report })),
        Err(EventError::TemplateNotFound { id }) => {
            warn!(template_id = %id, "flow aborted");
            error_res(req_id, &AguiError::TemplateNotFound { id })
        }
    }
}

// ---------------------------------------------------------------------------
// event.generate
// ---------------------------------------------------------------------------

/// Handler for `event.generate`.
///
/// Params: `{ "template_id": string, "variables"?: object }`
///
/// Generates one event for this connection and returns it in the response
/// payload. The event is not pushed through the delivery sink — the caller
/// asked for it directly.
pub fn handle_event_generate(
    params: Option<&Value>,
    req_id: &str,
    conn_id: &str,
    app: &AppState,
) -> ResFrame {
    let template_id = match params
        .and_then(|p| p.get("template_id"))
        .and_then(|v| v.as_str())
    {
        Some(s) => s,
        None => return invalid_params(req_id, "missing 'template_id' field"),
    };

    match app
        .generator
        .generate(template_id, variables_from(params), Some(conn_id))
    {
        Ok(event) => ResFrame::ok(req_id, json!({ "event": event })),
        Err(EventError::TemplateNotFound { id }) => {
            error_res(req_id, &AguiError::TemplateNotFound { id })
        }
    }
}

// ---------------------------------------------------------------------------
// templates.*
// ---------------------------------------------------------------------------

/// Handler for `templates.list`. Returns every registered template id.
pub fn handle_templates_list(req_id: &str, app: &AppState) -> ResFrame {
    let mut ids = app.registry.list();
    ids.sort();
    ResFrame::ok(req_id, json!({ "templates": ids }))
}

/// Handler for `templates.register`.
///
/// Params: `{ "id": string, "template": { "type": "chat"|..., ...body } }`
///
/// Inserts or overwrites. Placeholder resolvability is not validated here.
pub fn handle_templates_register(params: Option<&Value>, req_id: &str, app: &AppState) -> ResFrame {
    let id = match params.and_then(|p| p.get("id")).and_then(|v| v.as_str()) {
        Some(s) => s,
        None => return invalid_params(req_id, "missing 'id' field"),
    };

    let template: Template = match params
        .and_then(|p| p.get("template"))
        .and_then(|t| serde_json::from_value(t.clone()).ok())
    {
        Some(t) => t,
        None => {
            return invalid_params(req_id, "missing or malformed 'template' field")
        }
    };

    app.registry.register(id, template);
    ResFrame::ok(req_id, json!({ "registered": id }))
}

/// Handler for `templates.remove`.
///
/// Params: `{ "id": string }` — reports whether the id was present.
pub fn handle_templates_remove(params: Option<&Value>, req_id: &str, app: &AppState) -> ResFrame {
    let id = match params.and_then(|p| p.get("id")).and_then(|v| v.as_str()) {
        Some(s) => s,
        None => return invalid_params(req_id, "missing 'id' field"),
    };

    let removed = app.registry.remove(id);
    ResFrame::ok(req_id, json!({ "removed": removed }))
}

// ---------------------------------------------------------------------------
// state.* / session.info
// ---------------------------------------------------------------------------

/// Handler for `state.set`.
///
/// Params: `{ "key": string, "value": any }` — stored in this connection's
/// UI state bag.
pub fn handle_state_set(
    params: Option<&Value>,
    req_id: &str,
    conn_id: &str,
    app: &AppState,
) -> ResFrame {
    let key = match params.and_then(|p| p.get("key")).and_then(|v| v.as_str()) {
        Some(s) => s,
        None => return invalid_params(req_id, "missing 'key' field"),
    };
    let value = params
        .and_then(|p| p.get("value"))
        .cloned()
        .unwrap_or(Value::Null);

    app.sessions.set_state(conn_id, key, value);
    ResFrame::ok(req_id, json!({ "stored": key }))
}

/// Handler for `state.get`.
///
/// Params: `{ "key": string }` — returns `null` for unknown keys.
pub fn handle_state_get(
    params: Option<&Value>,
    req_id: &str,
    conn_id: &str,
    app: &AppState,
) -> ResFrame {
    let key = match params.and_then(|p| p.get("key")).and_then(|v| v.as_str()) {
        Some(s) => s,
        None => return invalid_params(req_id, "missing 'key' field"),
    };

    let value = app.sessions.get_state(conn_id, key).unwrap_or(Value::Null);
    ResFrame::ok(req_id, json!({ "key": key, "value": value }))
}

/// Handler for `session.info`. Returns this connection's session record,
/// or `null` when no event has been generated for it yet.
pub fn handle_session_info(req_id: &str, conn_id: &str, app: &AppState) -> ResFrame {
    ResFrame::ok(req_id, json!({ "session": app.sessions.get(conn_id) }))
}

// ---------------------------------------------------------------------------
// flow.*
// ---------------------------------------------------------------------------

/// Handler for `flow.agent_create`.
///
/// Params: `{ "description": string }`
pub async fn handle_flow_agent_create(
    params: Option<&Value>,
    req_id: &str,
    conn_id: &str,
    app: &AppState,
) -> ResFrame {
    let description = match params
        .and_then(|p| p.get("description"))
        .and_then(|v| v.as_str())
    {
        Some(s) => s,
        None => return invalid_params(req_id, "missing 'description' field"),
    };

    flow_res(
        req_id,
        app.flows.agent_creation_flow(Some(conn_id), description).await,
    )
}

/// Handler for `flow.welcome`.
///
/// Params: `{ "user_name"?: string }`
pub async fn handle_flow_welcome(
    params: Option<&Value>,
    req_id: &str,
    conn_id: &str,
    app: &AppState,
) -> ResFrame {
    let user_name = params
        .and_then(|p| p.get("user_name"))
        .and_then(|v| v.as_str());

    flow_res(
        req_id,
        app.flows.welcome_sequence(Some(conn_id), user_name).await,
    )
}

/// Handler for `flow.health`. No params.
pub async fn handle_flow_health(req_id: &str, conn_id: &str, app: &AppState) -> ResFrame {
    flow_res(req_id, app.flows.system_health_display(Some(conn_id)).await)
}

/// Handler for `flow.agents`. No params.
pub async fn handle_flow_agents(req_id: &str, conn_id: &str, app: &AppState) -> ResFrame {
    flow_res(req_id, app.flows.agent_list_display(Some(conn_id)).await)
}

/// Handler for `flow.status`.
///
/// Params: `{ "operation": string, "status": string, "message"?: string }`
pub async fn handle_flow_status(
    params: Option<&Value>,
    req_id: &str,
    conn_id: &str,
    app: &AppState,
) -> ResFrame {
    let operation = match params
        .and_then(|p| p.get("operation"))
        .and_then(|v| v.as_str())
    {
        Some(s) => s,
        None => return invalid_params(req_id, "missing 'operation' field"),
    };
    let status = match params.and_then(|p| p.get("status")).and_then(|v| v.as_str()) {
        Some(s) => s,
        None => return invalid_params(req_id, "missing 'status' field"),
    };
    let message = params
        .and_then(|p| p.get("message"))
        .and_then(|v| v.as_str())
        .unwrap_or("");

    flow_res(
        req_id,
        app.flows
            .operation_status(Some(conn_id), operation, status, message)
            .await,
    )
}
