use axum::{
    routing::get,
    Router,
};
use dashmap::DashMap;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use tokio::sync::mpsc;

use agui_core::config::AguiConfig;
use agui_events::{EventGenerator, FlowRunner, TemplateRegistry, UiDataProvider};
use agui_sessions::SessionTracker;

use crate::delivery::WsDelivery;
use crate::ws::broadcast::EventBroadcaster;

/// Central shared state — passed as Arc<AppState> to all Axum handlers.
///
/// Every subsystem is constructed here and injected explicitly; there are
/// no ambient singletons. `shutdown` owns the end of the session maps'
/// lifetime.
pub struct AppState {
    pub config: AguiConfig,
    pub event_seq: AtomicU64,
    pub broadcaster: Arc<EventBroadcaster>,
    pub registry: Arc<TemplateRegistry>,
    pub sessions: Arc<SessionTracker>,
    pub generator: Arc<EventGenerator>,
    pub flows: FlowRunner,
    /// Active WS connections: conn_id -> message sender.
    pub ws_clients: Arc<DashMap<String, mpsc::Sender<String>>>,
}

impl AppState {
    pub fn new(config: AguiConfig, provider: Arc<dyn UiDataProvider>) -> Self {
        let registry = Arc::new(TemplateRegistry::new());
        let sessions = Arc::new(SessionTracker::new());
        let generator = Arc::new(EventGenerator::new(
            Arc::clone(&registry),
            Arc::clone(&sessions),
            config.agent.name.clone(),
        ));

        let broadcaster = Arc::new(EventBroadcaster::new());
        let ws_clients: Arc<DashMap<String, mpsc::Sender<String>>> = Arc::new(DashMap::new());
        let delivery = Arc::new(WsDelivery::new(
            Arc::clone(&ws_clients),
            Arc::clone(&broadcaster),
        ));
        let flows = FlowRunner::new(Arc::clone(&generator), delivery, provider);

        Self {
            config,
            event_seq: AtomicU64::new(0),
            broadcaster,
            registry,
            sessions,
            generator,
            flows,
            ws_clients,
        }
    }

    /// Monotonically increasing sequence for broadcast frames.
    pub fn next_seq(&self) -> u64 {
        self.event_seq.fetch_add(1, Ordering::Relaxed)
    }

    /// Process-shutdown teardown: drop every session and state bag.
    pub fn shutdown(&self) {
        self.sessions.clear_all();
    }
}

/// Assemble the full Axum router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(crate::http::health::health_handler))
        .route("/ws", get(crate::ws::connection::ws_handler))
        .with_state(state)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}
