//! `POST /predict`: retrain and predict from the three entry fields.

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::AppState;
use crate::error::ActionError;
use crate::pipeline::{self, PredictionInput};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new().route("/predict", post(handler))
}

/// Response body. The RMSE only goes to the log.
#[derive(Debug, Serialize)]
struct PredictResponse {
    prediction: f64,
    label: String,
}

async fn handler(
    State((dataset, config, display)): State<AppState>,
    payload: Result<Json<PredictionInput>, JsonRejection>,
) -> Result<Json<PredictResponse>, ActionError> {
    // ---
    info!("POST /predict - Starting pipeline");
    let Json(input) = payload.map_err(|e| {
        warn!("Malformed request body: {}", e);
        e
    })?;
    let mut display = display.lock().await;

    // Everything that can fail runs before the display is touched
    let result = pipeline::predict_signal(&dataset, &config, &input).map_err(|e| {
        warn!("Prediction rejected: {}", e);
        e
    })?;

    let released = display.plots.release_all();
    debug!("Released {} plots", released);

    let label = result.label();
    display.prediction_label = Some(label.clone());

    info!("{}", label);
    Ok(Json(PredictResponse {
        prediction: result.prediction,
        label,
    }))
}
