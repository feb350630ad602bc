//! Injection seams for flows: where events go, and where upstream data
//! comes from. The gateway provides the real implementations (WS delivery,
//! agent-manager HTTP client); tests substitute recording/failing doubles.

use async_trait::async_trait;
use serde_json::Value;

use agui_protocol::event::AguiEvent;

use crate::error::{DeliveryError, ProviderError};

/// Pushes a generated event to a client. `connection_id = None` means
/// broadcast. Implementations own any flow control; the event mechanism
/// treats delivery as fire-and-forget and only records failures.
#[async_trait]
pub trait DeliverySink: Send + Sync {
    async fn send_event(
        &self,
        event: &AguiEvent,
        connection_id: Option<&str>,
    ) -> Result<(), DeliveryError>;
}

/// Upstream data for the specialized flows. Payloads are embedded into
/// display events verbatim, without schema validation.
#[async_trait]
pub trait UiDataProvider: Send + Sync {
    async fn system_health(&self) -> Result<Value, ProviderError>;
    async fn metrics(&self) -> Result<Value, ProviderError>;
    async fn list_agents(&self) -> Result<Value, ProviderError>;
}
