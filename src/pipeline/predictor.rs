//! Single-point inference from user-entered text.

use serde::{Deserialize, Serialize};

use super::assembler::{FeatureAssembler, FeatureVector};
use super::model::LinearModel;
use crate::error::{AssemblyError, InputParseError};
use crate::models::{HUMIDITY, TEMPERATURE, WIND_SPEED};

// ---

/// The three entry fields, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionInput {
    #[serde(default)]
    pub temperature: String,
    #[serde(default)]
    pub humidity: String,
    #[serde(default)]
    pub wind_speed: String,
}

/// Parse one entry as a finite float.
fn parse_entry(field: &str, input: &str) -> Result<f64, InputParseError> {
    // ---
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| InputParseError {
            field: field.to_string(),
            input: input.to_string(),
        })
}

impl PredictionInput {
    // ---
    /// Parse every entry, reporting the first one that is not a number.
    pub fn parse(&self) -> Result<[(&'static str, f64); 3], InputParseError> {
        // ---
        Ok([
            (TEMPERATURE, parse_entry(TEMPERATURE, &self.temperature)?),
            (HUMIDITY, parse_entry(HUMIDITY, &self.humidity)?),
            (WIND_SPEED, parse_entry(WIND_SPEED, &self.wind_speed)?),
        ])
    }
}

/// Applies a fitted model to one feature vector.
#[derive(Debug, Clone, Copy)]
pub struct Predictor<'a> {
    pub model: &'a LinearModel,
    pub assembler: &'a FeatureAssembler,
}

impl Predictor<'_> {
    // ---
    pub fn predict(&self, features: &FeatureVector) -> f64 {
        self.model.predict(features)
    }

    /// Assemble parsed entries in model order, then predict.
    pub fn predict_entries(&self, entries: &[(&str, f64)]) -> Result<f64, AssemblyError> {
        // ---
        let features = self.assembler.assemble(entries)?;
        Ok(self.predict(&features))
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::models::PREDICTOR_FEATURES;

    fn input(t: &str, h: &str, w: &str) -> PredictionInput {
        // ---
        PredictionInput {
            temperature: t.to_string(),
            humidity: h.to_string(),
            wind_speed: w.to_string(),
        }
    }

    #[test]
    fn test_parse_valid_entries() {
        // ---
        let parsed = input(" 21.5", "60", "-3e0 ").parse().unwrap();
        assert_eq!(parsed, [(TEMPERATURE, 21.5), (HUMIDITY, 60.0), (WIND_SPEED, -3.0)]);
    }

    #[test]
    fn test_parse_rejects_text() {
        // ---
        let err = input("21.5", "humid", "4").parse().unwrap_err();
        assert_eq!(
            err,
            InputParseError {
                field: HUMIDITY.to_string(),
                input: "humid".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_rejects_empty_and_non_finite() {
        // ---
        for bad in ["", "   ", "NaN", "inf", "-infinity", "1,5"] {
            let err = input(bad, "50", "5").parse().unwrap_err();
            assert_eq!(err.field, TEMPERATURE, "'{bad}' should be rejected");
        }
        assert_eq!(input("1", "2", "x").parse().unwrap_err().field, WIND_SPEED);
    }

    #[test]
    fn test_predict_entries_uses_model_order() {
        // ---
        let model = LinearModel {
            coefficients: vec![1.0, 10.0, 100.0],
            intercept: 0.5,
        };
        let assembler = FeatureAssembler::new(PREDICTOR_FEATURES);
        let predictor = Predictor {
            model: &model,
            assembler: &assembler,
        };

        let entries = [(WIND_SPEED, 3.0), (TEMPERATURE, 1.0), (HUMIDITY, 2.0)];
        assert_eq!(predictor.predict_entries(&entries).unwrap(), 321.5);
    }
}
