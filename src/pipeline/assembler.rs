//! Feature assembler: packs named numeric fields into one vector per row.

use std::collections::{BTreeMap, HashMap};

use crate::error::AssemblyError;
use crate::models::{Observation, WEATHER_CONDITION};

// ---

/// Value of a single named field as seen by the assembler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Number(f64),
    Text(&'a str),
}

/// Anything the assembler can pull named fields from.
pub trait FeatureSource {
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

impl FeatureSource for Observation {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        // ---
        if name == WEATHER_CONDITION {
            return Some(FieldValue::Text(&self.weather_condition));
        }
        self.numeric(name).map(FieldValue::Number)
    }
}

impl FeatureSource for HashMap<String, f64> {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        self.get(name).copied().map(FieldValue::Number)
    }
}

impl FeatureSource for BTreeMap<String, f64> {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        self.get(name).copied().map(FieldValue::Number)
    }
}

impl FeatureSource for [(&str, f64)] {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        self.iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| FieldValue::Number(*value))
    }
}

/// Fixed-order numeric tuple derived from one row.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(values: Vec<f64>) -> Self {
        FeatureVector(values)
    }
}

/// Packs the configured input columns, in declared order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureAssembler {
    input_cols: Vec<String>,
}

impl FeatureAssembler {
    // ---
    pub fn new<I, S>(input_cols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input_cols: input_cols.into_iter().map(Into::into).collect(),
        }
    }

    pub fn input_cols(&self) -> &[String] {
        &self.input_cols
    }

    /// Assemble one vector. Fails on the first field that is absent or
    /// not numeric.
    pub fn assemble<S>(&self, source: &S) -> Result<FeatureVector, AssemblyError>
    where
        S: FeatureSource + ?Sized,
    {
        // ---
        let values = self
            .input_cols
            .iter()
            .map(|name| match source.field(name) {
                Some(FieldValue::Number(v)) => Ok(v),
                Some(FieldValue::Text(text)) => Err(AssemblyError::TypeConversion {
                    field: name.clone(),
                    value: text.to_string(),
                }),
                None => Err(AssemblyError::MissingField(name.clone())),
            })
            .collect::<Result<Vec<f64>, AssemblyError>>()?;

        Ok(FeatureVector(values))
    }

    /// Assemble every row of a partition.
    pub fn assemble_all<'a, I>(&self, rows: I) -> Result<Vec<FeatureVector>, AssemblyError>
    where
        I: IntoIterator<Item = &'a Observation>,
    {
        rows.into_iter().map(|row| self.assemble(row)).collect()
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::models::tests::create_test_observation;
    use crate::models::{HUMIDITY, PREDICTOR_FEATURES, TEMPERATURE, WIND_SPEED};

    #[test]
    fn test_assemble_observation_in_declared_order() {
        // ---
        let obs = create_test_observation(19.5, -72.0);
        let assembler = FeatureAssembler::new(PREDICTOR_FEATURES);

        let fv = assembler.assemble(&obs).unwrap();
        assert_eq!(fv.as_slice(), &[19.5, 55.0, 12.0]);

        // Reversed declaration reverses the vector
        let reversed = FeatureAssembler::new([WIND_SPEED, HUMIDITY, TEMPERATURE]);
        assert_eq!(reversed.assemble(&obs).unwrap().as_slice(), &[12.0, 55.0, 19.5]);
    }

    #[test]
    fn test_order_independent_of_input_order() {
        // ---
        let assembler = FeatureAssembler::new(PREDICTOR_FEATURES);

        let shuffled: &[(&str, f64)] = &[(WIND_SPEED, 8.0), (TEMPERATURE, 30.0), (HUMIDITY, 40.0)];
        assert_eq!(
            assembler.assemble(shuffled).unwrap().as_slice(),
            &[30.0, 40.0, 8.0]
        );

        let mut map = HashMap::new();
        map.insert(HUMIDITY.to_string(), 40.0);
        map.insert(WIND_SPEED.to_string(), 8.0);
        map.insert(TEMPERATURE.to_string(), 30.0);
        assert_eq!(assembler.assemble(&map).unwrap().as_slice(), &[30.0, 40.0, 8.0]);
    }

    #[test]
    fn test_missing_field_is_rejected() {
        // ---
        let assembler = FeatureAssembler::new(PREDICTOR_FEATURES);
        let partial: &[(&str, f64)] = &[(TEMPERATURE, 30.0), (WIND_SPEED, 8.0)];

        assert_eq!(
            assembler.assemble(partial),
            Err(AssemblyError::MissingField(HUMIDITY.to_string()))
        );

        let unknown = FeatureAssembler::new(["Visibility"]);
        assert_eq!(
            unknown.assemble(&create_test_observation(20.0, -70.0)),
            Err(AssemblyError::MissingField("Visibility".to_string()))
        );
    }

    #[test]
    fn test_text_field_is_type_conversion_error() {
        // ---
        let assembler = FeatureAssembler::new([TEMPERATURE, WEATHER_CONDITION]);
        let obs = create_test_observation(20.0, -70.0);

        assert_eq!(
            assembler.assemble(&obs),
            Err(AssemblyError::TypeConversion {
                field: WEATHER_CONDITION.to_string(),
                value: "Sunny".to_string(),
            })
        );
    }

    #[test]
    fn test_assemble_all() {
        // ---
        let rows = vec![
            create_test_observation(10.0, -60.0),
            create_test_observation(11.0, -61.0),
        ];
        let assembler = FeatureAssembler::new([TEMPERATURE]);

        let vectors = assembler.assemble_all(&rows).unwrap();
        assert_eq!(vectors.len(), 2);
        assert_eq!(vectors[1].as_slice(), &[11.0]);
        assert_eq!(vectors[1].len(), 1);
    }
}
