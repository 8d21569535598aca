//! API routes for turingd
//!
//! `/` answers a plain greeting, `/results` runs detection for one ad-hoc
//! question or the configured list, `/health` reports daemon status.

use crate::server::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use futures::future;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};
use turing_common::{DetectError, DetectOptions, DetectionRecord};

type AppStateArc = Arc<AppState>;

pub fn detect_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/", get(hello))
        .route("/results", get(results))
}

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/health", get(health_check))
}

async fn hello() -> &'static str {
    "hello"
}

/// Query parameters for `/results`
#[derive(Debug, Deserialize)]
pub struct ResultsQuery {
    /// Ad-hoc question; absent means the configured list
    pub question: Option<String>,
    /// "1" bypasses the cache for this request
    pub nocache: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

async fn results(
    State(state): State<AppStateArc>,
    Query(query): Query<ResultsQuery>,
) -> Result<Json<Vec<DetectionRecord>>, (StatusCode, Json<ErrorResponse>)> {
    let opts = DetectOptions {
        use_cache: query.nocache.as_deref() != Some("1"),
    };

    let records = match &query.question {
        Some(question) => {
            info!("Detecting ad-hoc question: {}", question);
            vec![state
                .detector
                .detect(question, opts)
                .await
                .map_err(detect_failed)?]
        }
        None => {
            // Fan out over the configured questions; calls run concurrently,
            // each one's provider attempts stay sequential internally.
            let calls = state
                .questions
                .iter()
                .map(|q| state.detector.detect(q, opts));
            future::join_all(calls)
                .await
                .into_iter()
                .collect::<Result<Vec<_>, _>>()
                .map_err(detect_failed)?
        }
    };

    Ok(Json(records))
}

fn detect_failed(err: DetectError) -> (StatusCode, Json<ErrorResponse>) {
    error!("Detection failed: {}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub time: String,
}

async fn health_check(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        time: chrono::Utc::now().to_rfc3339(),
    })
}
