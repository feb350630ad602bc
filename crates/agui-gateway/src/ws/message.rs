use std::sync::Arc;

use agui_core::error::AguiError;
use agui_protocol::{
    frames::{InboundFrame, ResFrame},
    handshake::ConnectParams,
    methods::CONNECT,
};
use tracing::{info, warn};

use crate::app::AppState;
use crate::ws::connection::ConnState;
use crate::ws::send::SharedSink;
use crate::ws::{dispatch, handlers, handshake, send};

/// Process one inbound WS text frame. Returns the new connection state.
pub async fn handle(
    conn_id: &str,
    text: &str,
    state: ConnState,
    tx: &SharedSink,
    app: &Arc<AppState>,
) -> ConnState {
    let frame: InboundFrame = match serde_json::from_str(text) {
        Ok(f) => f,
        Err(e) => {
            warn!(conn_id, error = %e, "malformed frame");
            return state;
        }
    };

    match state {
        ConnState::AwaitingConnect { .. } => handle_auth(conn_id, frame, tx, app).await,
        ConnState::Authenticated => handle_method(conn_id, frame, tx, app).await,
        ConnState::Closing => ConnState::Closing,
    }
}

/// Pre-auth: only the `connect` method is accepted.
async fn handle_auth(
    conn_id: &str,
    frame: InboundFrame,
    tx: &SharedSink,
    app: &Arc<AppState>,
) -> ConnState {
    let Some(req) = frame.as_req() else {
        return ConnState::AwaitingConnect {
            _nonce: String::new(),
        };
    };

    if req.method != CONNECT {
        let res = handlers::error_res(
            &req.id,
            &AguiError::Protocol("must authenticate first".to_string()),
        );
        let _ = send::json_shared(tx, &res).await;
        return ConnState::AwaitingConnect {
            _nonce: String::new(),
        };
    }

    let params: Option<ConnectParams> =
        req.params.and_then(|p| serde_json::from_value(p).ok());
    let Some(params) = params else {
        let res = handlers::error_res(
            &req.id,
            &AguiError::Protocol("invalid connect params".to_string()),
        );
        let _ = send::json_shared(tx, &res).await;
        return ConnState::Closing;
    };

    match handshake::verify_auth(&params, &app.config) {
        Ok(()) => {
            let hello = handshake::hello_ok_payload(conn_id);
            let res = ResFrame::ok(&req.id, hello);
            let _ = send::json_shared(tx, &res).await;
            info!(conn_id, "client authenticated");
            ConnState::Authenticated
        }
        Err(reason) => {
            warn!(conn_id, %reason, "auth failed");
            let res = handlers::error_res(&req.id, &AguiError::AuthFailed(reason));
            let _ = send::json_shared(tx, &res).await;
            ConnState::Closing
        }
    }
}

/// Post-auth: dispatch method calls to handlers.
async fn handle_method(
    conn_id: &str,
    frame: InboundFrame,
    tx: &SharedSink,
    app: &Arc<AppState>,
) -> ConnState {
    if let Some(req) = frame.as_req() {
        let res = dispatch::route(&req.method, req.params.as_ref(), &req.id, conn_id, app).await;
        let _ = send::json_shared(tx, &res).await;
    }
    ConnState::Authenticated
}
