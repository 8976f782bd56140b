use std::sync::Arc;

use axum::Router;
use tokio::sync::Mutex;

use crate::{Config, Dataset, DisplayState, SharedDisplay};

mod analysis;
mod display;
mod health;
mod predict;

// ---

/// State shared by every route: the read-only dataset, the loaded config,
/// and the display guarded by the action lock.
pub type AppState = (Arc<Dataset>, Config, SharedDisplay);

pub fn router(dataset: Arc<Dataset>, config: Config) -> Router {
    // ---
    let display: SharedDisplay = Arc::new(Mutex::new(DisplayState::default()));

    Router::new()
        .merge(analysis::router())
        .merge(predict::router())
        .merge(display::router())
        .merge(health::router())
        .with_state((dataset, config, display))
}
