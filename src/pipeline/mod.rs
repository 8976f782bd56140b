//! Signal strength prediction workflow.
//!
//! Feature collection, seeded train/test split, model fit, single-point
//! inference and RMSE evaluation, run end to end on every request. Nothing
//! here touches the HTTP layer; routes call [`predict_signal`] and render
//! the result.

mod assembler;
mod evaluator;
mod model;
mod predictor;
mod trainer;

pub use assembler::{FeatureAssembler, FeatureSource, FeatureVector, FieldValue};
pub use evaluator::{rmse, Evaluator};
pub use model::{LinearModel, LinearRegression};
pub use predictor::{PredictionInput, Predictor};
pub use trainer::{random_split, ModelTrainer, Split, TrainedModel};

use serde::Serialize;

use crate::dataset::Dataset;
use crate::error::ActionError;
use crate::models::{PREDICTOR_FEATURES, TARGET_FIELD};
use crate::Config;

// ---

/// Scalar prediction plus the test-partition error of the model behind it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub prediction: f64,
    pub rmse: f64,
}

impl PredictionResult {
    /// Display text for the prediction label.
    pub fn label(&self) -> String {
        format!("Predicted Signal Strength: {:.2} dBm", self.prediction)
    }
}

impl ModelTrainer {
    /// Trainer for the signal strength model with the configured split and
    /// penalty.
    pub fn from_config(cfg: &Config) -> Self {
        // ---
        Self {
            assembler: FeatureAssembler::new(PREDICTOR_FEATURES),
            label_col: TARGET_FIELD.to_string(),
            train_ratio: cfg.train_ratio,
            seed: cfg.split_seed,
            regression: LinearRegression::new(cfg.reg_param),
        }
    }
}

/// Parse the entries, retrain, predict, and score on the held-out rows.
///
/// Input is validated before any training happens, so a bad entry costs
/// nothing and changes nothing.
pub fn predict_signal(
    dataset: &Dataset,
    cfg: &Config,
    input: &PredictionInput,
) -> Result<PredictionResult, ActionError> {
    // ---
    let entries = input.parse()?;

    let trainer = ModelTrainer::from_config(cfg);
    let trained = trainer.fit(dataset)?;

    let predictor = Predictor {
        model: &trained.model,
        assembler: &trainer.assembler,
    };
    let prediction = predictor.predict_entries(&entries)?;

    let evaluator = Evaluator {
        assembler: &trainer.assembler,
        label_col: &trainer.label_col,
    };
    let rmse = evaluator.evaluate(&trained.model, &trained.test)?;
    tracing::info!("Root Mean Squared Error (RMSE) on the test set: {:.2}", rmse);

    Ok(PredictionResult { prediction, rmse })
}
