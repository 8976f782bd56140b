//! Weather analysis and RF signal strength prediction.
//!
//! The crate is split along the Explicit Module Boundary Pattern (EMBP):
//! - `dataset` loads the CSV once and infers its schema
//! - `pipeline` holds the pure prediction workflow (assemble, split, fit,
//!   predict, evaluate)
//! - `analysis` holds the read-only aggregation queries
//! - `plots` owns the display state those actions feed
//! - `routes` binds all of it to HTTP
//!
//! Only `routes` knows about axum handlers; everything else is callable and
//! testable on its own.

pub mod analysis;
pub mod config;
pub mod dataset;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod plots;
pub mod routes;

pub use config::Config;
pub use dataset::Dataset;
pub use error::{ActionError, AssemblyError, DatasetError, InputParseError, TrainingError};
pub use models::Observation;
pub use plots::{DisplayState, SharedDisplay};
