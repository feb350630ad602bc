use async_trait::async_trait;
use serde_json::Value;

use agui_core::config::UpstreamConfig;
use agui_events::{ProviderError, UiDataProvider};

/// HTTP client for the agent-manager service. Responses are embedded into
/// display events verbatim — no schema validation on this side.
pub struct AgentManagerClient {
    http: reqwest::Client,
    base_url: String,
}

impl AgentManagerClient {
    pub fn new(config: &UpstreamConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(config.timeout_ms))
            .build()
            .unwrap_or_default();
        Self {
            http,
            base_url: config.manager_base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_json(&self, path: &str) -> Result<Value, ProviderError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError(format!("GET {path}: {e}")))?;

        if !response.status().is_success() {
            return Err(ProviderError(format!(
                "GET {path}: upstream returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ProviderError(format!("GET {path}: bad JSON: {e}")))
    }
}

#[async_trait]
impl UiDataProvider for AgentManagerClient {
    async fn system_health(&self) -> Result<Value, ProviderError> {
        self.get_json("/health").await
    }

    async fn metrics(&self) -> Result<Value, ProviderError> {
        self.get_json("/metrics").await
    }

    async fn list_agents(&self) -> Result<Value, ProviderError> {
        self.get_json("/agents").await
    }
}
