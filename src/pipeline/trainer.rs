//! Model trainer: seeded train/test split followed by a regression fit.

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use super::assembler::FeatureAssembler;
use super::model::{LinearModel, LinearRegression};
use crate::dataset::Dataset;
use crate::error::TrainingError;
use crate::models::Observation;

// ---

/// Deterministic partition of row indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Partition `0..n` into train and test indices.
///
/// Indices are shuffled with a generator seeded from `seed`, so the same
/// `(n, train_ratio, seed)` always gives the same membership. Both
/// partitions come back in ascending row order.
pub fn random_split(n: usize, train_ratio: f64, seed: u64) -> Split {
    // ---
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let n_test = (n as f64 * (1.0 - train_ratio)).round() as usize;
    let n_train = n.saturating_sub(n_test);

    let mut train = indices[..n_train].to_vec();
    let mut test = indices[n_train..].to_vec();
    train.sort_unstable();
    test.sort_unstable();

    Split { train, test }
}

/// Output of one training run: the fitted model plus the held-out rows the
/// evaluator needs.
#[derive(Debug, Clone)]
pub struct TrainedModel<'a> {
    pub model: LinearModel,
    pub split: Split,
    pub test: Vec<&'a Observation>,
}

/// Split-and-fit settings.
#[derive(Debug, Clone)]
pub struct ModelTrainer {
    pub assembler: FeatureAssembler,
    pub label_col: String,
    pub train_ratio: f64,
    pub seed: u64,
    pub regression: LinearRegression,
}

impl ModelTrainer {
    // ---
    /// Split `dataset`, then fit on the train partition.
    #[tracing::instrument(skip_all, fields(rows = dataset.len(), seed = self.seed))]
    pub fn fit<'a>(&self, dataset: &'a Dataset) -> Result<TrainedModel<'a>, TrainingError> {
        // ---
        let rows = dataset.observations();
        let first = rows.first().ok_or(TrainingError::EmptyDataset)?;
        if first.numeric(&self.label_col).is_none() {
            return Err(TrainingError::MissingTarget(self.label_col.clone()));
        }

        let split = random_split(rows.len(), self.train_ratio, self.seed);
        for (partition, members) in [("train", &split.train), ("test", &split.test)] {
            if members.is_empty() {
                return Err(TrainingError::EmptyPartition {
                    partition,
                    rows: rows.len(),
                    ratio: self.train_ratio,
                });
            }
        }

        let train: Vec<&Observation> = split.train.iter().map(|&i| &rows[i]).collect();
        let test: Vec<&Observation> = split.test.iter().map(|&i| &rows[i]).collect();
        tracing::debug!("Split into {} train / {} test rows", train.len(), test.len());

        let features = self.assembler.assemble_all(train.iter().copied())?;
        let labels = labels(&train, &self.label_col)?;
        let model = self.regression.fit(&features, &labels)?;

        Ok(TrainedModel { model, split, test })
    }
}

/// Label column of a partition.
pub(crate) fn labels(rows: &[&Observation], label_col: &str) -> Result<Vec<f64>, TrainingError> {
    // ---
    rows.iter()
        .map(|row| {
            row.numeric(label_col)
                .ok_or_else(|| TrainingError::MissingTarget(label_col.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::models::tests::create_test_observation;
    use crate::models::{PREDICTOR_FEATURES, TARGET_FIELD, TEMPERATURE};

    fn trainer(train_ratio: f64, seed: u64) -> ModelTrainer {
        // ---
        ModelTrainer {
            assembler: FeatureAssembler::new(PREDICTOR_FEATURES),
            label_col: TARGET_FIELD.to_string(),
            train_ratio,
            seed,
            regression: LinearRegression::new(0.01),
        }
    }

    fn linear_dataset(n: usize) -> Dataset {
        // ---
        // Signal Strength = 2 * Temperature + 1, other features constant
        Dataset::from_observations(
            (1..=n)
                .map(|t| create_test_observation(t as f64, 2.0 * t as f64 + 1.0))
                .collect(),
        )
    }

    #[test]
    fn test_split_is_deterministic() {
        // ---
        let a = random_split(50, 0.8, 42);
        let b = random_split(50, 0.8, 42);
        assert_eq!(a, b);
    }

    #[test]
    fn test_split_sizes_and_coverage() {
        // ---
        let split = random_split(10, 0.8, 42);
        assert_eq!(split.train.len(), 8);
        assert_eq!(split.test.len(), 2);

        let mut all: Vec<usize> = split.train.iter().chain(&split.test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..10).collect::<Vec<_>>());

        // Each partition keeps original row order
        assert!(split.train.windows(2).all(|w| w[0] < w[1]));
        assert!(split.test.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_different_seed_changes_membership() {
        // ---
        let seeds: Vec<Split> = (0..5).map(|seed| random_split(100, 0.8, seed)).collect();
        assert!(seeds.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn test_fit_recovers_linear_relation() {
        // ---
        let ds = linear_dataset(10);
        let trained = trainer(0.8, 42).fit(&ds).unwrap();

        assert_eq!(trained.test.len(), 2);
        assert_eq!(trained.split.train.len(), 8);
        // Shrunk slope, constant humidity and wind ignored
        assert!((trained.model.coefficients[0] - 2.0 / 1.01).abs() < 1e-9);
        assert_eq!(trained.model.coefficients[1], 0.0);
        assert_eq!(trained.model.coefficients[2], 0.0);
    }

    #[test]
    fn test_fit_is_repeatable() {
        // ---
        let ds = linear_dataset(25);
        let t = trainer(0.8, 42);

        let a = t.fit(&ds).unwrap();
        let b = t.fit(&ds).unwrap();
        assert_eq!(a.split, b.split);
        assert_eq!(a.model, b.model);
    }

    #[test]
    fn test_empty_dataset() {
        // ---
        let ds = Dataset::from_observations(Vec::new());
        assert_eq!(trainer(0.8, 42).fit(&ds).unwrap_err(), TrainingError::EmptyDataset);
    }

    #[test]
    fn test_missing_target() {
        // ---
        let mut t = trainer(0.8, 42);
        t.label_col = "Link Quality".to_string();

        assert_eq!(
            t.fit(&linear_dataset(10)).unwrap_err(),
            TrainingError::MissingTarget("Link Quality".to_string())
        );
    }

    #[test]
    fn test_single_row_leaves_test_empty() {
        // ---
        let err = trainer(0.8, 42).fit(&linear_dataset(1)).unwrap_err();
        assert!(matches!(
            err,
            TrainingError::EmptyPartition {
                partition: "test",
                rows: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_labels_helper() {
        // ---
        let a = create_test_observation(1.0, -60.0);
        let b = create_test_observation(2.0, -61.0);
        assert_eq!(labels(&[&a, &b], TARGET_FIELD).unwrap(), vec![-60.0, -61.0]);
        assert_eq!(labels(&[&a], TEMPERATURE).unwrap(), vec![1.0]);
    }
}
