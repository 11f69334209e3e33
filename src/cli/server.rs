//! HTTP trigger mode
//!
//! Exposes the export pipeline behind a small axum server. A `GET` or
//! `POST` to `/export` runs one full pipeline and reports the outcome as
//! JSON; concurrent triggers each run their own independent pipeline
//! against the shared backend (same-hour runs replace the same file).

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ExportConfig;
use crate::error::{Error, Result};
use crate::pipeline::ExportPipeline;

/// App state shared across handlers
struct AppState {
    config: ExportConfig,
}

/// JSON body returned by the export trigger
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum ExportResponse {
    Success {
        file_uploaded: String,
        record_count: usize,
    },
    Error {
        error_message: String,
    },
}

/// Start the HTTP server
pub async fn serve(config: ExportConfig, port: u16) -> Result<()> {
    let state = Arc::new(AppState { config });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/export", get(trigger_export).post(trigger_export))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting HTTP server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to port {port}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::config(format!("Server error: {e}")))?;

    Ok(())
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Run one export pipeline and report the outcome
async fn trigger_export(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match run_export(&state.config).await {
        Ok(summary) => (
            StatusCode::OK,
            Json(ExportResponse::Success {
                file_uploaded: summary.file_uploaded,
                record_count: summary.record_count,
            }),
        ),
        Err(e) => {
            tracing::error!("Export failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ExportResponse::Error {
                    error_message: e.to_string(),
                }),
            )
        }
    }
}

async fn run_export(config: &ExportConfig) -> Result<crate::pipeline::ExportSummary> {
    let pipeline = ExportPipeline::new(config.clone())?;
    pipeline.run().await
}
