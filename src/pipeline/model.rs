//! Ridge-penalized linear regression solved through the normal equations.
//!
//! Features and label are standardized (population standard deviation)
//! before solving
//!
//! ```text
//! (ZᵀZ / n + λI) w = Zᵀy / n
//! ```
//!
//! by Cholesky decomposition on `nalgebra` matrices. The solution is mapped
//! back to the original scale so the fitted [`LinearModel`] works on raw feature values.

use nalgebra::{DMatrix, DVector};
use serde::Serialize;

use super::assembler::FeatureVector;
use crate::error::TrainingError;

// ---

/// Estimator settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRegression {
    /// L2 penalty applied in standardized space.
    pub reg_param: f64,
}

/// Fitted artifact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinearModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearModel {
    // ---
    pub fn predict(&self, features: &FeatureVector) -> f64 {
        // ---
        self.coefficients
            .iter()
            .zip(features.as_slice())
            .map(|(c, x)| c * x)
            .sum::<f64>()
            + self.intercept
    }

    pub fn predict_all(&self, rows: &[FeatureVector]) -> Vec<f64> {
        rows.iter().map(|row| self.predict(row)).collect()
    }
}

/// Mean and population standard deviation.
fn mean_std(values: impl Iterator<Item = f64> + Clone) -> (f64, f64) {
    // ---
    let n = values.clone().count();
    if n == 0 {
        return (0.0, 0.0);
    }
    let mean = values.clone().sum::<f64>() / n as f64;
    let var = values.map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
    (mean, var.sqrt())
}

/// A column whose spread is negligible next to its magnitude.
fn is_constant(mean: f64, std: f64) -> bool {
    std <= 1e-12 * mean.abs().max(1.0)
}

/// Smallest Cholesky pivot accepted before the system counts as singular.
const PIVOT_TOLERANCE: f64 = 1e-12;

/// Solve `gram * w = rhs` for a symmetric positive definite `gram`.
fn cholesky_solve(gram: DMatrix<f64>, rhs: &DVector<f64>) -> Result<DVector<f64>, TrainingError> {
    // ---
    let chol = gram.cholesky().ok_or(TrainingError::SingularSystem)?;

    // Rounding can leave collinear systems with a tiny positive pivot
    if chol.l_dirty().diagonal().iter().any(|d| d * d <= PIVOT_TOLERANCE) {
        return Err(TrainingError::SingularSystem);
    }

    Ok(chol.solve(rhs))
}

impl LinearRegression {
    // ---
    pub fn new(reg_param: f64) -> Self {
        Self { reg_param }
    }

    /// Fit on assembled rows and their labels.
    pub fn fit(&self, rows: &[FeatureVector], labels: &[f64]) -> Result<LinearModel, TrainingError> {
        // ---
        debug_assert_eq!(rows.len(), labels.len());
        if rows.is_empty() {
            return Err(TrainingError::EmptyDataset);
        }

        let n = rows.len() as f64;
        let width = rows[0].len();
        let (y_mean, y_std) = mean_std(labels.iter().copied());

        if is_constant(y_mean, y_std) {
            tracing::warn!(
                "Label has zero variance; coefficients are zero and intercept is the label mean"
            );
            return Ok(LinearModel {
                coefficients: vec![0.0; width],
                intercept: y_mean,
            });
        }

        let stats: Vec<(f64, f64)> = (0..width)
            .map(|j| mean_std(rows.iter().map(move |r| r.as_slice()[j])))
            .collect();

        // Constant columns carry no signal and stay at zero
        let active: Vec<usize> = (0..width)
            .filter(|&j| !is_constant(stats[j].0, stats[j].1))
            .collect();
        let p = active.len();

        let z = DMatrix::from_fn(rows.len(), p, |i, a| {
            let j = active[a];
            (rows[i].as_slice()[j] - stats[j].0) / stats[j].1
        });
        let y = DVector::from_iterator(labels.len(), labels.iter().map(|l| (l - y_mean) / y_std));

        let gram = z.tr_mul(&z) / n + DMatrix::identity(p, p) * self.reg_param;
        let rhs = z.tr_mul(&y) / n;
        let w = cholesky_solve(gram, &rhs)?;

        let mut coefficients = vec![0.0; width];
        for (a, &j) in active.iter().enumerate() {
            coefficients[j] = w[a] * y_std / stats[j].1;
        }
        let intercept = y_mean
            - coefficients
                .iter()
                .zip(&stats)
                .map(|(c, (mean, _))| c * mean)
                .sum::<f64>();

        tracing::debug!(?coefficients, intercept, "Linear model fitted");

        Ok(LinearModel {
            coefficients,
            intercept,
        })
    }
}
