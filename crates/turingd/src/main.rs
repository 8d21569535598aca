//! Turing Detector daemon
//!
//! Answers "was this interview answer written by a human or an AI?" through
//! a fixed-priority chain of prediction models with short-lived result
//! caching, exposed over a small HTTP API.

mod config;
mod models;
mod routes;
mod server;

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;
use turing_common::{AnswerCache, DetectEvent, Detector, EventSink, TracingSink};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("turingd v{} starting", env!("CARGO_PKG_VERSION"));

    let config = config::load_config()?;
    let events: Arc<dyn EventSink> = Arc::new(TracingSink);

    let chain = models::build_chain(&config.models);
    info!("Provider chain ready: {} models", chain.len());

    let cache = AnswerCache::with_ttl(Duration::from_secs(config.cache.ttl_secs));
    let detector = Detector::with_parts(chain, cache, events.clone());

    let state = server::AppState::new(detector, config.questions.clone(), events.clone());

    let shutdown = async move {
        let signal = wait_for_signal().await;
        events.emit(DetectEvent::Shutdown { signal });
        info!("Shutting down gracefully");
    };

    server::run(state, config.server.port, shutdown).await
}

/// Wait for SIGINT or SIGTERM and report which one arrived
async fn wait_for_signal() -> String {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!("Cannot install SIGTERM handler: {}", e);
            let _ = tokio::signal::ctrl_c().await;
            return "SIGINT".to_string();
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => "SIGINT".to_string(),
        _ = sigterm.recv() => "SIGTERM".to_string(),
    }
}
