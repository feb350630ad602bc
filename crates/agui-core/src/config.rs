use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

// Protocol constants — part of the wire contract with AG-UI clients
pub const PROTOCOL_VERSION: u32 = 1;
pub const DEFAULT_PORT: u16 = 18920;
pub const DEFAULT_BIND: &str = "127.0.0.1";
pub const MAX_PAYLOAD_BYTES: usize = 128 * 1024; // 128 KB hard cap per frame
pub const HANDSHAKE_TIMEOUT_MS: u64 = 10_000; // close if client doesn't auth in 10s
pub const HEARTBEAT_INTERVAL_SECS: u64 = 30; // tick event cadence

/// Substitution walker recursion bound. Template bodies deeper than this are
/// left as-is below the limit instead of being recursed into.
pub const MAX_TEMPLATE_DEPTH: usize = 16;

/// Identity string stamped into `agui_metadata.generated_by` and usable
/// as the `{{agent_name}}` default variable.
pub const DEFAULT_AGENT_NAME: &str = "ui-agent";

/// Top-level config (agui.toml + AGUI_* env overrides).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AguiConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

impl Default for AguiConfig {
    fn default() -> Self {
        Self {
            gateway: GatewayConfig::default(),
            agent: AgentConfig::default(),
            upstream: UpstreamConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default)]
    pub auth: AuthConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind: DEFAULT_BIND.to_string(),
            auth: AuthConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub mode: AuthMode,
    pub token: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            mode: AuthMode::Token,
            token: Some("change-me".to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AuthMode {
    #[default]
    Token,
    None,
}

/// Identity of the UI agent this gateway fronts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(default = "default_agent_name")]
    pub name: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
        }
    }
}

/// Upstream agent-manager service the specialized flows pull data from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the agent-manager HTTP API (no trailing slash).
    #[serde(default = "default_manager_base_url")]
    pub manager_base_url: String,
    /// Per-request timeout for upstream calls, in milliseconds.
    #[serde(default = "default_upstream_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            manager_base_url: default_manager_base_url(),
            timeout_ms: default_upstream_timeout_ms(),
        }
    }
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

fn default_agent_name() -> String {
    DEFAULT_AGENT_NAME.to_string()
}

fn default_manager_base_url() -> String {
    "http://127.0.0.1:18921".to_string()
}

fn default_upstream_timeout_ms() -> u64 {
    5_000
}

impl AguiConfig {
    /// Load config, merged in priority order:
    ///   1. explicit path argument
    ///   2. AGUI_CONFIG env var (handled by the caller)
    ///   3. ~/.agui/agui.toml
    /// with `AGUI_*` env vars layered on top.
    ///
    /// Env nesting splits on double underscore so field names that contain
    /// an underscore stay addressable: `AGUI_UPSTREAM__TIMEOUT_MS` maps to
    /// `upstream.timeout_ms`.
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);

        let config: AguiConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("AGUI_").split("__"))
            .extract()
            .map_err(|e| crate::error::AguiError::Config(e.to_string()))?;

        Ok(config)
    }
}

fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.agui/agui.toml", home)
}
