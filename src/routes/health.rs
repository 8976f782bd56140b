// src/routes/health.rs
//! API health check endpoint for the weather signal service.
//!
//! This module defines the `/health` route used by container orchestrators
//! and CI pipelines to verify that the service is running and that the
//! dataset was loaded. It is a sibling module in the `routes` directory and
//! follows the Explicit Module Boundary Pattern (EMBP):
//! - Internal to this file: endpoint handler(s) and related types
//! - Exports to the gateway (`mod.rs`): a subrouter containing the `/health` route

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use super::AppState;

/// JSON response body for the `/health` endpoint.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    observations: usize,
}

/// Handle `GET /health`.
///
/// Reports the size of the loaded dataset. Never takes the action lock, so
/// it answers even while a long fit is running.
async fn health(State((dataset, _, _)): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        observations: dataset.len(),
    })
}

/// Create a subrouter containing the `/health` route.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
