//! Simple data models for the weather/signal dataset.

use serde::{Deserialize, Serialize};

// ---

pub const TEMPERATURE: &str = "Temperature";
pub const HUMIDITY: &str = "Humidity";
pub const WIND_SPEED: &str = "Wind Speed";
pub const PRECIPITATION: &str = "Precipitation";
pub const AIR_PRESSURE: &str = "Air Pressure";
pub const WIFI_STRENGTH: &str = "WiFi Strength";
pub const SIGNAL_STRENGTH: &str = "Signal Strength";
pub const WEATHER_CONDITION: &str = "Weather Condition";

/// Every numeric column an action reads.
pub const NUMERIC_FIELDS: [&str; 7] = [
    TEMPERATURE,
    HUMIDITY,
    WIND_SPEED,
    PRECIPITATION,
    AIR_PRESSURE,
    WIFI_STRENGTH,
    SIGNAL_STRENGTH,
];

/// Features fed to the signal strength regression, in vector order.
pub const PREDICTOR_FEATURES: [&str; 3] = [TEMPERATURE, HUMIDITY, WIND_SPEED];

/// Regression label.
pub const TARGET_FIELD: &str = SIGNAL_STRENGTH;

/// One row of the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    // ---
    #[serde(rename = "Temperature")]
    pub temperature: f64,
    #[serde(rename = "Humidity")]
    pub humidity: f64,
    #[serde(rename = "Wind Speed")]
    pub wind_speed: f64,
    #[serde(rename = "Precipitation")]
    pub precipitation: f64,
    #[serde(rename = "Air Pressure")]
    pub air_pressure: f64,
    #[serde(rename = "WiFi Strength")]
    pub wifi_strength: f64,
    #[serde(rename = "Signal Strength")]
    pub signal_strength: f64,
    #[serde(rename = "Weather Condition")]
    pub weather_condition: String,
}

/// Column lookup by dataset header name
impl Observation {
    // ---
    /// Numeric value of the named column, `None` for unknown or
    /// non-numeric columns.
    pub fn numeric(&self, name: &str) -> Option<f64> {
        // ---
        match name {
            TEMPERATURE => Some(self.temperature),
            HUMIDITY => Some(self.humidity),
            WIND_SPEED => Some(self.wind_speed),
            PRECIPITATION => Some(self.precipitation),
            AIR_PRESSURE => Some(self.air_pressure),
            WIFI_STRENGTH => Some(self.wifi_strength),
            SIGNAL_STRENGTH => Some(self.signal_strength),
            _ => None,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    // ---
    use super::*;

    pub(crate) fn create_test_observation(temperature: f64, signal_strength: f64) -> Observation {
        // ---
        Observation {
            temperature,
            humidity: 55.0,
            wind_speed: 12.0,
            precipitation: 0.4,
            air_pressure: 1012.5,
            wifi_strength: -48.0,
            signal_strength,
            weather_condition: "Sunny".to_string(),
        }
    }

    #[test]
    fn test_numeric_lookup() {
        // ---
        let obs = create_test_observation(21.5, -67.0);

        assert_eq!(obs.numeric(TEMPERATURE), Some(21.5));
        assert_eq!(obs.numeric(HUMIDITY), Some(55.0));
        assert_eq!(obs.numeric(WIND_SPEED), Some(12.0));
        assert_eq!(obs.numeric(PRECIPITATION), Some(0.4));
        assert_eq!(obs.numeric(AIR_PRESSURE), Some(1012.5));
        assert_eq!(obs.numeric(WIFI_STRENGTH), Some(-48.0));
        assert_eq!(obs.numeric(SIGNAL_STRENGTH), Some(-67.0));
    }

    #[test]
    fn test_numeric_lookup_rejects_text_and_unknown() {
        // ---
        let obs = create_test_observation(21.5, -67.0);

        // Categorical column is not numeric
        assert_eq!(obs.numeric(WEATHER_CONDITION), None);

        // Header names are case sensitive
        assert_eq!(obs.numeric("temperature"), None);
        assert_eq!(obs.numeric("Visibility"), None);
    }

    #[test]
    fn test_field_lists_are_consistent() {
        // ---
        for field in PREDICTOR_FEATURES {
            assert!(NUMERIC_FIELDS.contains(&field), "{field} must be numeric");
        }
        assert!(NUMERIC_FIELDS.contains(&TARGET_FIELD));
        assert!(!NUMERIC_FIELDS.contains(&WEATHER_CONDITION));
    }
}
