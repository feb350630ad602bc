use std::sync::Arc;

use agui_core::error::AguiError;
use agui_protocol::frames::ResFrame;
use agui_protocol::methods;

use crate::app::AppState;
use crate::ws::handlers;

/// Route a WS method call to the correct handler.
///
/// Handlers return the response frame; generated AG-UI events reach the
/// client separately, through the delivery sink (unicast queue or
/// broadcast), never inside a `res` frame.
pub async fn route(
    method: &str,
    params: Option<&serde_json::Value>,
    req_id: &str,
    conn_id: &str,
    app: &Arc<AppState>,
) -> ResFrame {
    match method {
        // ------------------------------------------------------------------
        // Utility
        // ------------------------------------------------------------------
        methods::PING => ResFrame::ok(req_id, serde_json::json!({ "pong": true })),

        // ------------------------------------------------------------------
        // Event generation
        // ------------------------------------------------------------------
        methods::EVENT_GENERATE => handlers::handle_event_generate(params, req_id, conn_id, app),

        // ------------------------------------------------------------------
        // Template registry
        // ------------------------------------------------------------------
        methods::TEMPLATES_LIST => handlers::handle_templates_list(req_id, app),

        methods::TEMPLATES_REGISTER => handlers::handle_templates_register(params, req_id, app),

        methods::TEMPLATES_REMOVE => handlers::handle_templates_remove(params, req_id, app),

        // ------------------------------------------------------------------
        // Per-connection UI state / session
        // ------------------------------------------------------------------
        methods::STATE_SET => handlers::handle_state_set(params, req_id, conn_id, app),

        methods::STATE_GET => handlers::handle_state_get(params, req_id, conn_id, app),

        methods::SESSION_INFO => handlers::handle_session_info(req_id, conn_id, app),

        // ------------------------------------------------------------------
        // Specialized flows
        // ------------------------------------------------------------------
        methods::FLOW_AGENT_CREATE => {
            handlers::handle_flow_agent_create(params, req_id, conn_id, app).await
        }

        methods::FLOW_WELCOME => handlers::handle_flow_welcome(params, req_id, conn_id, app).await,

        methods::FLOW_HEALTH => handlers::handle_flow_health(req_id, conn_id, app).await,

        methods::FLOW_AGENTS => handlers::handle_flow_agents(req_id, conn_id, app).await,

        methods::FLOW_STATUS => handlers::handle_flow_status(params, req_id, conn_id, app).await,

        other => handlers::error_res(
            req_id,
            &AguiError::MethodNotFound {
                method: other.to_string(),
            },
        ),
    }
}
