//! Presentation-side state: open plots and the prediction label.
//!
//! Every analysis action produces a [`Plot`], the server-side stand-in for a
//! chart window. Plots accumulate in the [`PlotRegistry`] until an explicit
//! release, exactly like windows piling up on a desktop. The registry and
//! the prediction label together form the [`DisplayState`], which the route
//! layer keeps behind one async mutex so actions run one at a time.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use uuid::Uuid;

// ---

/// One bar chart inside a grid figure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarPanel {
    pub title: String,
    pub categories: Vec<String>,
    pub values: Vec<f64>,
}

/// Renderable chart description.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Figure {
    BarGrid {
        title: String,
        rows: usize,
        cols: usize,
        panels: Vec<BarPanel>,
    },
    Scatter {
        title: String,
        x_label: String,
        y_label: String,
        points: Vec<[f64; 2]>,
    },
    Heatmap {
        title: String,
        colormap: String,
        labels: Vec<String>,
        /// `None` where the correlation is undefined.
        matrix: Vec<Vec<Option<f64>>>,
    },
}

/// An open plot window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plot {
    pub id: Uuid,
    pub window_title: String,
    pub created_at: DateTime<Utc>,
    pub figure: Figure,
}

impl Plot {
    pub fn new(window_title: impl Into<String>, figure: Figure) -> Self {
        // ---
        Self {
            id: Uuid::new_v4(),
            window_title: window_title.into(),
            created_at: Utc::now(),
            figure,
        }
    }
}

/// Open plots, in creation order.
#[derive(Debug, Default)]
pub struct PlotRegistry {
    handles: Vec<Plot>,
}

impl PlotRegistry {
    // ---
    pub fn register(&mut self, plot: Plot) -> Uuid {
        // ---
        let id = plot.id;
        tracing::debug!("Registering plot {} ({})", id, plot.window_title);
        self.handles.push(plot);
        id
    }

    /// Release every open plot. Returns how many were released.
    pub fn release_all(&mut self) -> usize {
        // ---
        let count = self.handles.len();
        for plot in self.handles.drain(..) {
            tracing::debug!("Releasing plot {} ({})", plot.id, plot.window_title);
        }
        count
    }

    pub fn plots(&self) -> &[Plot] {
        &self.handles
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

/// Everything the user currently sees.
#[derive(Debug, Default)]
pub struct DisplayState {
    pub plots: PlotRegistry,
    pub prediction_label: Option<String>,
}

impl DisplayState {
    /// Reset the label and release all plots.
    pub fn clear(&mut self) -> usize {
        // ---
        self.prediction_label = None;
        self.plots.release_all()
    }
}

pub type SharedDisplay = Arc<Mutex<DisplayState>>;
