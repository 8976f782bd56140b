//! Root-mean-square error of a fitted model on held-out rows.

use super::assembler::FeatureAssembler;
use super::model::LinearModel;
use super::trainer::labels;
use crate::error::TrainingError;
use crate::models::Observation;

// ---

/// `sqrt(mean((pred - actual)²))`. Empty input yields zero.
pub fn rmse(predictions: &[f64], actual: &[f64]) -> f64 {
    // ---
    debug_assert_eq!(predictions.len(), actual.len());
    if actual.is_empty() {
        return 0.0;
    }

    let sum_sq: f64 = predictions
        .iter()
        .zip(actual)
        .map(|(p, a)| (p - a).powi(2))
        .sum();

    (sum_sq / actual.len() as f64).sqrt()
}

/// Scores a model against the label column of a partition.
#[derive(Debug, Clone)]
pub struct Evaluator<'a> {
    pub assembler: &'a FeatureAssembler,
    pub label_col: &'a str,
}

impl Evaluator<'_> {
    // ---
    #[tracing::instrument(skip_all, fields(rows = test.len()))]
    pub fn evaluate(&self, model: &LinearModel, test: &[&Observation]) -> Result<f64, TrainingError> {
        // ---
        let features = self.assembler.assemble_all(test.iter().copied())?;
        let actual = labels(test, self.label_col)?;
        let predictions = model.predict_all(&features);

        Ok(rmse(&predictions, &actual))
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::models::tests::create_test_observation;
    use crate::models::{TARGET_FIELD, TEMPERATURE};

    #[test]
    fn test_rmse_known_value() {
        // ---
        // errors 1, -1, 2, 0 -> mse 1.5
        let r = rmse(&[2.0, 2.0, 5.0, 4.0], &[1.0, 3.0, 3.0, 4.0]);
        assert!((r - 1.5_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_rmse_perfect_and_empty() {
        // ---
        assert_eq!(rmse(&[1.0, 2.0], &[1.0, 2.0]), 0.0);
        assert_eq!(rmse(&[], &[]), 0.0);
    }

    #[test]
    fn test_rmse_is_non_negative() {
        // ---
        let preds = [-80.0, -55.5, -71.2, 0.0, 12.0];
        let actual = [-60.0, -70.0, -71.2, -1e6, 13.0];
        assert!(rmse(&preds, &actual) >= 0.0);
        assert!(rmse(&actual, &preds) >= 0.0);
    }

    #[test]
    fn test_evaluate_partition() {
        // ---
        let assembler = FeatureAssembler::new([TEMPERATURE]);
        let model = LinearModel {
            coefficients: vec![2.0],
            intercept: 1.0,
        };
        let exact = create_test_observation(3.0, 7.0);
        let off_by_two = create_test_observation(4.0, 11.0);

        let evaluator = Evaluator {
            assembler: &assembler,
            label_col: TARGET_FIELD,
        };
        let r = evaluator.evaluate(&model, &[&exact, &off_by_two]).unwrap();
        assert!((r - 2.0_f64.sqrt()).abs() < 1e-12);
    }
}
