//! The three read-only analysis actions. Each one opens a new plot.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::{debug, info};

use super::AppState;
use crate::analysis;
use crate::plots::Plot;

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/analysis/weather-conditions", post(weather_conditions))
        .route("/analysis/air-pressure", post(air_pressure))
        .route("/analysis/correlation", post(correlation))
}

async fn weather_conditions(
    State((dataset, _, display)): State<AppState>,
) -> (StatusCode, Json<Plot>) {
    // ---
    info!("POST /analysis/weather-conditions");
    let mut display = display.lock().await;

    let summaries = analysis::weather_conditions(&dataset);
    debug!("Aggregated {} weather conditions", summaries.len());

    let plot = analysis::weather_conditions_plot(&summaries);
    display.plots.register(plot.clone());
    (StatusCode::CREATED, Json(plot))
}

async fn air_pressure(State((dataset, _, display)): State<AppState>) -> (StatusCode, Json<Plot>) {
    // ---
    info!("POST /analysis/air-pressure");
    let mut display = display.lock().await;

    let plot = analysis::air_pressure_plot(analysis::air_pressure_points(&dataset));
    display.plots.register(plot.clone());
    (StatusCode::CREATED, Json(plot))
}

/// Replaces every open plot with the correlation heatmap.
async fn correlation(State((dataset, _, display)): State<AppState>) -> (StatusCode, Json<Plot>) {
    // ---
    info!("POST /analysis/correlation");
    let mut display = display.lock().await;

    let plot = analysis::correlation_plot(analysis::signal_correlation(&dataset));

    let released = display.plots.release_all();
    debug!("Released {} plots before correlation", released);
    display.plots.register(plot.clone());
    (StatusCode::CREATED, Json(plot))
}
