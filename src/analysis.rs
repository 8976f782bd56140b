//! Read-only aggregation queries behind the three analysis actions.
//!
//! Each query reads the dataset and returns tabular data; the matching
//! `*_plot` function wraps it into a [`Plot`] for the display.

use std::collections::BTreeMap;

use nalgebra::DMatrix;
use serde::Serialize;

use crate::dataset::Dataset;
use crate::models::{AIR_PRESSURE, NUMERIC_FIELDS, SIGNAL_STRENGTH};
use crate::plots::{BarPanel, Figure, Plot};

// ---

/// Per weather condition aggregates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionSummary {
    pub condition: String,
    pub avg_temperature: f64,
    pub avg_humidity: f64,
    pub avg_wind_speed: f64,
    pub total_precipitation: f64,
    pub count: usize,
}

#[derive(Default)]
struct Accumulator {
    temperature: f64,
    humidity: f64,
    wind_speed: f64,
    precipitation: f64,
    count: usize,
}

/// Group by weather condition, ordered by condition name.
pub fn weather_conditions(dataset: &Dataset) -> Vec<ConditionSummary> {
    // ---
    let mut groups: BTreeMap<&str, Accumulator> = BTreeMap::new();
    for obs in dataset.observations() {
        let acc = groups.entry(obs.weather_condition.as_str()).or_default();
        acc.temperature += obs.temperature;
        acc.humidity += obs.humidity;
        acc.wind_speed += obs.wind_speed;
        acc.precipitation += obs.precipitation;
        acc.count += 1;
    }

    groups
        .into_iter()
        .map(|(condition, acc)| {
            let n = acc.count as f64;
            ConditionSummary {
                condition: condition.to_string(),
                avg_temperature: acc.temperature / n,
                avg_humidity: acc.humidity / n,
                avg_wind_speed: acc.wind_speed / n,
                total_precipitation: acc.precipitation,
                count: acc.count,
            }
        })
        .collect()
}

pub fn weather_conditions_plot(summaries: &[ConditionSummary]) -> Plot {
    // ---
    let categories: Vec<String> = summaries.iter().map(|s| s.condition.clone()).collect();
    let panel = |title: &str, value: fn(&ConditionSummary) -> f64| BarPanel {
        title: title.to_string(),
        categories: categories.clone(),
        values: summaries.iter().map(value).collect(),
    };

    let figure = Figure::BarGrid {
        title: "Weather Condition Analysis".to_string(),
        rows: 2,
        cols: 2,
        panels: vec![
            panel("Average Temperature (°C)", |s| s.avg_temperature),
            panel("Average Humidity (%)", |s| s.avg_humidity),
            panel("Average Wind Speed (km/hr)", |s| s.avg_wind_speed),
            panel("Total Precipitation (mm)", |s| s.total_precipitation),
        ],
    };

    Plot::new("Weather Condition Analysis Plots", figure)
}

/// Every (Air Pressure, Signal Strength) pair, in row order.
pub fn air_pressure_points(dataset: &Dataset) -> Vec<[f64; 2]> {
    dataset
        .observations()
        .iter()
        .map(|obs| [obs.air_pressure, obs.signal_strength])
        .collect()
}

pub fn air_pressure_plot(points: Vec<[f64; 2]>) -> Plot {
    // ---
    let figure = Figure::Scatter {
        title: format!("{AIR_PRESSURE} vs. {SIGNAL_STRENGTH}"),
        x_label: "Air Pressure (hPa)".to_string(),
        y_label: "Signal Strength (dBm)".to_string(),
        points,
    };
    Plot::new("Air Pressure Analysis Plot", figure)
}

/// Pairwise Pearson correlations of the numeric columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    /// `None` where either column is constant.
    pub values: Vec<Vec<Option<f64>>>,
}

/// Column-centered copy of `data`, one observation per row.
fn centered(data: DMatrix<f64>) -> DMatrix<f64> {
    // ---
    let means = data.row_mean();
    let mut out = data;
    for (mut column, mean) in out.column_iter_mut().zip(means.iter()) {
        column.add_scalar_mut(-mean);
    }
    out
}

/// Correlation matrix over the given numeric columns. Unknown names
/// produce an all-`None` row and column.
pub fn feature_correlation(dataset: &Dataset, fields: &[&str]) -> CorrelationMatrix {
    // ---
    let known: Vec<&str> = fields
        .iter()
        .copied()
        .filter(|name| NUMERIC_FIELDS.contains(name))
        .collect();
    // Position of each field inside the data matrix
    let slots: Vec<Option<usize>> = fields
        .iter()
        .map(|name| known.iter().position(|k| k == name))
        .collect();

    let rows = dataset.observations();
    let n = rows.len();
    let data = DMatrix::from_fn(n, known.len(), |r, c| {
        rows[r].numeric(known[c]).unwrap_or_default()
    });
    let data = centered(data);
    let norms: Vec<f64> = data.column_iter().map(|c| c.norm()).collect();

    let values = slots
        .iter()
        .enumerate()
        .map(|(i, a)| {
            slots
                .iter()
                .enumerate()
                .map(|(j, b)| {
                    let (a, b) = ((*a)?, (*b)?);
                    if n == 0 || norms[a] == 0.0 || norms[b] == 0.0 {
                        return None;
                    }
                    // Diagonal is exactly one unless the column is constant
                    if i == j {
                        return Some(1.0);
                    }
                    let cov = data.column(a).dot(&data.column(b));
                    Some((cov / (norms[a] * norms[b])).clamp(-1.0, 1.0))
                })
                .collect()
        })
        .collect();

    CorrelationMatrix {
        labels: fields.iter().map(|f| f.to_string()).collect(),
        values,
    }
}

/// Correlation over every numeric column, Signal Strength last.
pub fn signal_correlation(dataset: &Dataset) -> CorrelationMatrix {
    feature_correlation(dataset, &NUMERIC_FIELDS)
}

pub fn correlation_plot(matrix: CorrelationMatrix) -> Plot {
    // ---
    let figure = Figure::Heatmap {
        title: "Feature Correlation with Signal Strength".to_string(),
        colormap: "coolwarm".to_string(),
        labels: matrix.labels,
        matrix: matrix.values,
    };
    Plot::new("Feature Correlation Analysis Plot", figure)
}
