//! Specialized flows: named sequences of one or two template generations
//! handed off to the delivery sink. Each step is independent — a delivery
//! failure never rolls back or suppresses later steps. Upstream provider
//! failures are converted into a `display-error` event, so every flow
//! invocation produces at least one event.

use std::sync::Arc;

use serde_json::{json, Map, Value};
use tracing::warn;

use agui_protocol::event::AguiEvent;

use crate::error::EventError;
use crate::generator::EventGenerator;
use crate::sinks::{DeliverySink, UiDataProvider};

/// Outcome of a flow invocation. Failures that the flow absorbed
/// (upstream degradation, delivery drops) are visible here instead of
/// being logged and forgotten.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FlowReport {
    pub events_produced: usize,
    pub delivery_failures: usize,
    /// Set when the flow fell back to a `display-error` event because an
    /// upstream provider call failed.
    pub degraded: Option<String>,
}

impl FlowReport {
    fn new() -> Self {
        Self {
            events_produced: 0,
            delivery_failures: 0,
            degraded: None,
        }
    }
}

/// Runs the specialized flows against an injected sink and provider.
pub struct FlowRunner {
    generator: Arc<EventGenerator>,
    sink: Arc<dyn DeliverySink>,
    provider: Arc<dyn UiDataProvider>,
}

impl FlowRunner {
    pub fn new(
        generator: Arc<EventGenerator>,
        sink: Arc<dyn DeliverySink>,
        provider: Arc<dyn UiDataProvider>,
    ) -> Self {
        Self {
            generator,
            sink,
            provider,
        }
    }

    pub fn generator(&self) -> &EventGenerator {
        &self.generator
    }

    /// Two events, in order: a chat acknowledgment carrying the user's
    /// description, then the agent-creation form.
    pub async fn agent_creation_flow(
        &self,
        connection_id: Option<&str>,
        description: &str,
    ) -> Result<FlowReport, EventError> {
        let mut report = FlowReport::new();

        let ack = self.generator.generate(
            "chat-response",
            vars([(
                "message",
                json!(format!("Starting agent creation: {description}")),
            )]),
            connection_id,
        )?;
        self.deliver(&ack, connection_id, &mut report).await;

        let form = self.generator.generate(
            "display-form",
            vars([
                ("form_title", json!("Create Agent")),
                ("submit_label", json!("Create")),
                (
                    "form_fields",
                    json!([
                        { "name": "name", "label": "Agent name", "kind": "text" },
                        { "name": "description", "label": "Description", "kind": "textarea" },
                        { "name": "image", "label": "Container image", "kind": "text" },
                        { "name": "replicas", "label": "Replicas", "kind": "number" }
                    ]),
                ),
            ]),
            connection_id,
        )?;
        self.deliver(&form, connection_id, &mut report).await;

        Ok(report)
    }

    /// Greeting chat message followed by a choice prompt.
    pub async fn welcome_sequence(
        &self,
        connection_id: Option<&str>,
        user_name: Option<&str>,
    ) -> Result<FlowReport, EventError> {
        let mut report = FlowReport::new();

        let welcome = self.generator.generate(
            "chat-welcome",
            vars([("user_name", json!(user_name.unwrap_or("there")))]),
            connection_id,
        )?;
        self.deliver(&welcome, connection_id, &mut report).await;

        let choices = self.generator.generate(
            "input-choice",
            vars([
                ("prompt", json!("What would you like to do?")),
                (
                    "choices",
                    json!(["Create an agent", "View agents", "Check system health"]),
                ),
            ]),
            connection_id,
        )?;
        self.deliver(&choices, connection_id, &mut report).await;

        Ok(report)
    }

    /// Metrics panel fed by the upstream health and metrics endpoints.
    /// Falls back to a `display-error` event when either call fails.
    pub async fn system_health_display(
        &self,
        connection_id: Option<&str>,
    ) -> Result<FlowReport, EventError> {
        let mut report = FlowReport::new();

        let upstream = async {
            let health = self.provider.system_health().await?;
            let metrics = self.provider.metrics().await?;
            Ok::<(Value, Value), crate::error::ProviderError>((health, metrics))
        }
        .await;

        let event = match upstream {
            Ok((health, metrics)) => self.generator.generate(
                "display-metrics",
                vars([("health_data", health), ("metrics_data", metrics)]),
                connection_id,
            )?,
            Err(e) => self.degrade(&e.to_string(), connection_id, &mut report)?,
        };
        self.deliver(&event, connection_id, &mut report).await;

        Ok(report)
    }

    /// Agent list panel fed by the upstream agent directory.
    pub async fn agent_list_display(
        &self,
        connection_id: Option<&str>,
    ) -> Result<FlowReport, EventError> {
        let mut report = FlowReport::new();

        let event = match self.provider.list_agents().await {
            Ok(agents) => self.generator.generate(
                "display-agent-list",
                vars([("agents_data", agents)]),
                connection_id,
            )?,
            Err(e) => self.degrade(&e.to_string(), connection_id, &mut report)?,
        };
        self.deliver(&event, connection_id, &mut report).await;

        Ok(report)
    }

    /// Single status-update event for a long-running operation.
    pub async fn operation_status(
        &self,
        connection_id: Option<&str>,
        operation: &str,
        status: &str,
        message: &str,
    ) -> Result<FlowReport, EventError> {
        let mut report = FlowReport::new();

        let event = self.generator.generate(
            "status-update",
            vars([
                ("operation", json!(operation)),
                ("status", json!(status)),
                ("message", json!(message)),
            ]),
            connection_id,
        )?;
        self.deliver(&event, connection_id, &mut report).await;

        Ok(report)
    }

    fn degrade(
        &self,
        reason: &str,
        connection_id: Option<&str>,
        report: &mut FlowReport,
    ) -> Result<AguiEvent, EventError> {
        warn!(reason, "flow degraded to display-error");
        report.degraded = Some(reason.to_string());
        self.generator.generate(
            "display-error",
            vars([("error_message", json!(reason))]),
            connection_id,
        )
    }

    async fn deliver(
        &self,
        event: &AguiEvent,
        connection_id: Option<&str>,
        report: &mut FlowReport,
    ) {
        report.events_produced += 1;
        if let Err(e) = self.sink.send_event(event, connection_id).await {
            warn!(error = %e, template_id = %event.agui_metadata.template_id, "event delivery failed");
            report.delivery_failures += 1;
        }
    }
}

fn vars<const N: usize>(pairs: [(&str, Value); N]) -> Map<String, Value> {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}
