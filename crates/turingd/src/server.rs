//! HTTP server for turingd

use crate::routes;
use anyhow::Result;
use axum::Router;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::info;
use turing_common::{DetectEvent, Detector, EventSink};

/// Application state shared across handlers
pub struct AppState {
    pub detector: Detector,
    pub questions: Vec<String>,
    pub events: Arc<dyn EventSink>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(detector: Detector, questions: Vec<String>, events: Arc<dyn EventSink>) -> Self {
        Self {
            detector,
            questions,
            events,
            start_time: Instant::now(),
        }
    }
}

/// Run the HTTP server until `shutdown` resolves
pub async fn run(
    state: AppState,
    port: u16,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let state = Arc::new(state);

    let app = Router::new()
        .merge(routes::detect_routes())
        .merge(routes::health_routes())
        .with_state(state.clone())
        .layer(TraceLayer::new_for_http());

    // Bind to localhost only
    let addr = format!("127.0.0.1:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    state.events.emit(DetectEvent::ServerListen { port });
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
