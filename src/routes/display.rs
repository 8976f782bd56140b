//! Display inspection and the two clear actions.

use axum::{
    extract::State,
    routing::{delete, get, post},
    Json, Router,
};
use serde::Serialize;
use tracing::info;

use super::AppState;
use crate::plots::Plot;

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/display", get(show))
        .route("/plots", delete(clear_plots))
        .route("/clear", post(clear_all))
}

#[derive(Debug, Serialize)]
struct DisplayView {
    prediction_label: Option<String>,
    plots: Vec<Plot>,
}

#[derive(Debug, Serialize)]
struct ClearResponse {
    released: usize,
}

async fn show(State((_, _, display)): State<AppState>) -> Json<DisplayView> {
    // ---
    let display = display.lock().await;
    Json(DisplayView {
        prediction_label: display.prediction_label.clone(),
        plots: display.plots.plots().to_vec(),
    })
}

/// Release every open plot, keep the prediction label.
async fn clear_plots(State((_, _, display)): State<AppState>) -> Json<ClearResponse> {
    // ---
    let released = display.lock().await.plots.release_all();
    info!("DELETE /plots - released {} plots", released);
    Json(ClearResponse { released })
}

/// Reset the prediction label and release every open plot.
async fn clear_all(State((_, _, display)): State<AppState>) -> Json<ClearResponse> {
    // ---
    let released = display.lock().await.clear();
    info!("POST /clear - released {} plots", released);
    Json(ClearResponse { released })
}
