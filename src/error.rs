//! Error types for dataset loading and the user actions.
//!
//! Startup failures (`DatasetError`) are fatal and bubble up through
//! `anyhow` in `main.rs`. Everything an action can hit is folded into
//! [`ActionError`], which the route layer turns into an HTTP response.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

// ---

/// Failures while reading the CSV and checking its inferred schema.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset: {0}")]
    Read(#[from] csv::Error),

    #[error("dataset is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("column '{column}' must be numeric, inferred {inferred}")]
    NonNumericColumn { column: String, inferred: String },

    #[error("line {line}: column '{column}' holds non-finite value {value}")]
    NonFiniteValue {
        line: u64,
        column: String,
        value: f64,
    },

    #[error("line {line}: {source}")]
    Row {
        line: u64,
        #[source]
        source: csv::Error,
    },
}

/// Failures while packing named fields into a feature vector.
#[derive(Debug, Error, PartialEq)]
pub enum AssemblyError {
    #[error("missing field '{0}'")]
    MissingField(String),

    #[error("field '{field}' holds non-numeric value '{value}'")]
    TypeConversion { field: String, value: String },
}

/// Failures while splitting and fitting.
#[derive(Debug, Error, PartialEq)]
pub enum TrainingError {
    #[error("cannot train on an empty dataset")]
    EmptyDataset,

    #[error("target field '{0}' is absent")]
    MissingTarget(String),

    #[error("split left the {partition} partition empty ({rows} rows, train ratio {ratio})")]
    EmptyPartition {
        partition: &'static str,
        rows: usize,
        ratio: f64,
    },

    #[error("normal equations are not positive definite")]
    SingularSystem,

    #[error(transparent)]
    Assembly(#[from] AssemblyError),
}

/// A user entry that does not parse as a finite number.
#[derive(Debug, Error, PartialEq)]
#[error("{field} must be a number, got '{input}'")]
pub struct InputParseError {
    pub field: String,
    pub input: String,
}

/// Anything a user action can fail with.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Request(#[from] JsonRejection),

    #[error(transparent)]
    Input(#[from] InputParseError),

    #[error(transparent)]
    Training(#[from] TrainingError),

    #[error(transparent)]
    Assembly(#[from] AssemblyError),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ActionError {
    fn into_response(self) -> Response {
        // ---
        let status = match &self {
            ActionError::Request(rejection) => rejection.status(),
            ActionError::Input(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ActionError::Training(_) | ActionError::Assembly(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
