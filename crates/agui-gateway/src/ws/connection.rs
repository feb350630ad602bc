use axum::{
    extract::{ws::Message, ws::WebSocket, State, WebSocketUpgrade},
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tracing::{info, warn};

use agui_core::config::{HANDSHAKE_TIMEOUT_MS, HEARTBEAT_INTERVAL_SECS, MAX_PAYLOAD_BYTES};
use agui_core::error::AguiError;
use agui_protocol::frames::EventFrame;

use crate::app::AppState;
use crate::ws::{message, send};

/// Per-connection unicast queue depth. Flows running inside this
/// connection's own dispatch push here with try_send, so the queue must
/// absorb a full flow without the loop draining it.
const UNICAST_QUEUE: usize = 64;

/// WS connection states — linear progression, no backwards transitions.
pub enum ConnState {
    AwaitingConnect { _nonce: String },
    Authenticated,
    Closing,
}

/// Axum handler — upgrades HTTP to WebSocket at GET /ws.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| run_connection(socket, state))
}

/// Per-connection event loop — lives for the entire WS session.
async fn run_connection(socket: WebSocket, state: Arc<AppState>) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    info!(conn_id = %conn_id, "new WS connection");

    let (tx, mut rx) = socket.split();
    let shared_tx: send::SharedSink = Arc::new(tokio::sync::Mutex::new(tx));
    let mut broadcast_rx = state.broadcaster.subscribe();

    // register the unicast queue so flows can deliver to this connection
    let (unicast_tx, mut unicast_rx) = tokio::sync::mpsc::channel::<String>(UNICAST_QUEUE);
    state.ws_clients.insert(conn_id.clone(), unicast_tx);

    // send challenge and enter AwaitingConnect state
    let nonce = crate::ws::handshake::make_nonce();
    let challenge = crate::ws::handshake::challenge_event(&nonce);
    {
        let mut guard = shared_tx.lock().await;
        if guard.send(Message::Text(challenge.into())).await.is_err() {
            state.ws_clients.remove(&conn_id);
            return;
        }
    }
    let mut conn_state = ConnState::AwaitingConnect { _nonce: nonce };

    // handshake must complete within 10s
    let deadline =
        tokio::time::Instant::now() + std::time::Duration::from_millis(HANDSHAKE_TIMEOUT_MS);
    let mut handshake_timer = Box::pin(tokio::time::sleep_until(deadline));

    // heartbeat tick after auth
    let mut tick = tokio::time::interval(std::time::Duration::from_secs(HEARTBEAT_INTERVAL_SECS));
    tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            msg = rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        if text.len() > MAX_PAYLOAD_BYTES {
                            let err = AguiError::PayloadTooLarge {
                                size: text.len(),
                                max: MAX_PAYLOAD_BYTES,
                            };
                            warn!(conn_id, code = err.code(), %err, "closing connection");
                            break;
                        }
                        conn_state = message::handle(
                            &conn_id, &text, conn_state, &shared_tx, &state,
                        ).await;
                        if matches!(conn_state, ConnState::Closing) { break; }
                    }
                    Some(Ok(Message::Ping(data))) => {
                        let mut guard = shared_tx.lock().await;
                        let _ = guard.send(Message::Pong(data)).await;
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }

            event = unicast_rx.recv() => {
                if let Some(payload) = event {
                    let mut guard = shared_tx.lock().await;
                    if guard.send(Message::Text(payload.into())).await.is_err() {
                        break;
                    }
                }
            }

            event = broadcast_rx.recv() => {
                if let Ok(payload) = event {
                    if matches!(conn_state, ConnState::Authenticated) {
                        let mut guard = shared_tx.lock().await;
                        if guard.send(Message::Text(payload.into())).await.is_err() {
                            break;
                        }
                    }
                }
            }

            _ = tick.tick() => {
                if matches!(conn_state, ConnState::Authenticated) {
                    let seq = state.next_seq();
                    let ev = EventFrame::new(
                        "tick",
                        serde_json::json!({ "ts": chrono::Utc::now().timestamp_millis() }),
                    ).with_seq(seq);
                    if send::json_shared(&shared_tx, &ev).await.is_err() {
                        break;
                    }
                }
            }

            // Guarded: a completed Sleep polls Ready forever, so leaving this
            // arm armed after auth would busy-spin the select loop.
            _ = &mut handshake_timer, if matches!(conn_state, ConnState::AwaitingConnect { .. }) => {
                warn!(conn_id, "handshake timeout");
                break;
            }
        }
    }

    // disconnect teardown: drop the unicast queue and the connection's
    // session record + UI state bag
    state.ws_clients.remove(&conn_id);
    state.sessions.remove(&conn_id);
    info!(conn_id, "WS connection closed");
}
