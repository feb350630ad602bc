use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::mpsc;

use agui_events::{DeliveryError, DeliverySink};
use agui_protocol::event::AguiEvent;

use crate::ws::broadcast::EventBroadcaster;

/// Delivers generated events over WebSocket: unicast through the target
/// connection's mpsc sender, broadcast through the fan-out channel when no
/// connection is named.
///
/// Unicast uses `try_send` — the per-connection WS loop drains the queue,
/// and a flow may be running inside that same loop, so blocking here could
/// deadlock. A full queue is a slow consumer and reports as a failure.
pub struct WsDelivery {
    clients: Arc<DashMap<String, mpsc::Sender<String>>>,
    broadcaster: Arc<EventBroadcaster>,
}

impl WsDelivery {
    pub fn new(
        clients: Arc<DashMap<String, mpsc::Sender<String>>>,
        broadcaster: Arc<EventBroadcaster>,
    ) -> Self {
        Self {
            clients,
            broadcaster,
        }
    }
}

#[async_trait]
impl DeliverySink for WsDelivery {
    async fn send_event(
        &self,
        event: &AguiEvent,
        connection_id: Option<&str>,
    ) -> Result<(), DeliveryError> {
        let payload = event.to_wire();
        match connection_id {
            Some(conn_id) => {
                let sender = self
                    .clients
                    .get(conn_id)
                    .ok_or_else(|| DeliveryError(format!("unknown connection: {conn_id}")))?;
                sender
                    .try_send(payload)
                    .map_err(|e| DeliveryError(format!("connection {conn_id}: {e}")))
            }
            None => {
                self.broadcaster.send(payload);
                Ok(())
            }
        }
    }
}
