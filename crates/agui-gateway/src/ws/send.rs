use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::SinkExt;

pub type WsSink = futures_util::stream::SplitSink<WebSocket, Message>;
pub type SharedSink = Arc<tokio::sync::Mutex<WsSink>>;

/// Serialize any value to JSON and send it over the WS connection.
pub async fn json_shared<T: serde::Serialize>(
    tx: &SharedSink,
    payload: &T,
) -> Result<(), axum::Error> {
    let json = serde_json::to_string(payload).unwrap_or_default();
    let mut guard = tx.lock().await;
    guard
        .send(Message::Text(json.into()))
        .await
        .map_err(axum::Error::new)
}
