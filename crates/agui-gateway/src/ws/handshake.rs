use agui_core::config::{AguiConfig, AuthMode, MAX_PAYLOAD_BYTES, PROTOCOL_VERSION};
use agui_protocol::{
    frames::EventFrame,
    handshake::{AuthPayload, ClientPolicy, ConnectChallenge, ConnectParams, HelloOk, ServerInfo},
};
use uuid::Uuid;

/// Random nonce for the connect challenge.
pub fn make_nonce() -> String {
    Uuid::new_v4().to_string().replace('-', "")
}

/// Serialize the `connect.challenge` event that opens every WS session.
pub fn challenge_event(nonce: &str) -> String {
    let frame = EventFrame::new(
        "connect.challenge",
        ConnectChallenge {
            nonce: nonce.to_string(),
        },
    );
    serde_json::to_string(&frame).expect("challenge serialization is infallible")
}

/// Verify client auth against server config.
pub fn verify_auth(params: &ConnectParams, config: &AguiConfig) -> Result<(), String> {
    match &config.gateway.auth.mode {
        AuthMode::None => Ok(()),

        AuthMode::Token => match &params.auth {
            AuthPayload::Token { token } => {
                if Some(token) == config.gateway.auth.token.as_ref() {
                    Ok(())
                } else {
                    Err("invalid token".to_string())
                }
            }
            _ => Err("expected token auth mode".to_string()),
        },
    }
}

/// Build the `hello-ok` response payload after successful authentication.
pub fn hello_ok_payload(conn_id: &str) -> HelloOk {
    HelloOk {
        protocol: PROTOCOL_VERSION,
        server: ServerInfo {
            name: "agui-gateway".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        connection_id: conn_id.to_string(),
        policy: ClientPolicy {
            max_message_size: MAX_PAYLOAD_BYTES,
        },
    }
}
