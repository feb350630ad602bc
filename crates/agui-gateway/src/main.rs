use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use agui_gateway::{app, providers};

#[derive(Parser, Debug)]
#[command(name = "agui-gateway", about = "WebSocket gateway for templated AG-UI events")]
struct Cli {
    /// Path to agui.toml (defaults to AGUI_CONFIG, then ~/.agui/agui.toml)
    #[arg(long)]
    config: Option<String>,

    /// Override the listen port from config
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agui_gateway=info,tower_http=debug".into()),
        )
        .init();

    let cli = Cli::parse();

    // load config: explicit path > AGUI_CONFIG env > ~/.agui/agui.toml
    let config_path = cli
        .config
        .clone()
        .or_else(|| std::env::var("AGUI_CONFIG").ok());
    let mut config =
        agui_core::config::AguiConfig::load(config_path.as_deref()).unwrap_or_else(|e| {
            tracing::warn!("Config load failed ({}), using defaults", e);
            agui_core::config::AguiConfig::default()
        });
    if let Some(port) = cli.port {
        config.gateway.port = port;
    }

    let bind = config.gateway.bind.clone();
    let port = config.gateway.port;

    info!(
        base_url = %config.upstream.manager_base_url,
        "agent-manager upstream configured"
    );
    let provider = Arc::new(providers::AgentManagerClient::new(&config.upstream));

    let state = Arc::new(app::AppState::new(config, provider));
    let router = app::build_router(Arc::clone(&state));

    let addr: SocketAddr = format!("{}:{}", bind, port).parse()?;
    info!("AG-UI gateway listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // bulk-clear session and UI-state maps on the way out
    state.shutdown();
    info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}
