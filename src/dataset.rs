//! Dataset handle: CSV loading with an inferred schema.
//!
//! The dataset is read once at startup and never mutated afterwards. Every
//! column's type is inferred from its content, the schema is checked against
//! the columns the actions need, and each row is materialized into a typed
//! [`Observation`]. Any problem here is fatal for the process.

use std::{fmt, fs::File, io::Read, path::Path};

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Serialize;

use crate::error::DatasetError;
use crate::models::{Observation, NUMERIC_FIELDS, WEATHER_CONDITION};

// ---

/// Column type inferred from content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Integer,
    Double,
    String,
}

impl ColumnType {
    // ---
    /// Narrowest type every non-empty value fits. Columns with no values at
    /// all are strings.
    fn infer<'a>(values: impl Iterator<Item = &'a str> + Clone) -> Self {
        // ---
        let mut present = values.filter(|v| !v.is_empty()).peekable();
        if present.peek().is_none() {
            return ColumnType::String;
        }

        if present.clone().all(|v| v.parse::<i64>().is_ok()) {
            ColumnType::Integer
        } else if present.all(|v| v.parse::<f64>().is_ok()) {
            ColumnType::Double
        } else {
            ColumnType::String
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Double)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Integer => "integer",
            ColumnType::Double => "double",
            ColumnType::String => "string",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    pub column_type: ColumnType,
}

/// Ordered column list, in header order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    pub columns: Vec<Column>,
}

impl Schema {
    // ---
    /// Infer a schema from the header and every data record.
    pub fn infer(headers: &StringRecord, records: &[StringRecord]) -> Self {
        // ---
        let columns = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let values = records.iter().map(move |r| r.get(idx).unwrap_or(""));
                Column {
                    name: name.to_string(),
                    column_type: ColumnType::infer(values),
                }
            })
            .collect();

        Schema { columns }
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Human readable schema dump, one line per column.
    pub fn tree_string(&self) -> String {
        // ---
        let mut out = String::from("root");
        for col in &self.columns {
            out.push_str(&format!(
                "\n |-- {}: {} (nullable = true)",
                col.name, col.column_type
            ));
        }
        out
    }

    /// Check that every column referenced by an action is present, and
    /// that the numeric ones really are numeric.
    pub fn validate(&self) -> Result<(), DatasetError> {
        // ---
        let missing: Vec<String> = NUMERIC_FIELDS
            .iter()
            .chain(std::iter::once(&WEATHER_CONDITION))
            .filter(|name| self.column(name).is_none())
            .map(|name| name.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(DatasetError::MissingColumns(missing));
        }

        for name in NUMERIC_FIELDS {
            if let Some(col) = self.column(name) {
                if !col.column_type.is_numeric() {
                    return Err(DatasetError::NonNumericColumn {
                        column: col.name.clone(),
                        inferred: col.column_type.to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}

/// Read-only tabular dataset shared by every action.
#[derive(Debug, Clone)]
pub struct Dataset {
    schema: Schema,
    observations: Vec<Observation>,
}

impl Dataset {
    // ---
    /// Load a dataset from a CSV file with a header row.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        // ---
        let file = File::open(path.as_ref()).map_err(csv::Error::from)?;
        Self::from_reader(file)
    }

    /// Load a dataset from any CSV source with a header row.
    pub fn from_reader<R: Read>(source: R) -> Result<Self, DatasetError> {
        // ---
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(source);

        let headers = rdr.headers()?.clone();
        let records = rdr.records().collect::<Result<Vec<StringRecord>, csv::Error>>()?;

        let schema = Schema::infer(&headers, &records);
        schema.validate()?;

        let mut observations = Vec::with_capacity(records.len());
        for record in &records {
            let line = record.position().map_or(0, |p| p.line());
            let obs = record
                .deserialize::<Observation>(Some(&headers))
                .map_err(|source| DatasetError::Row { line, source })?;

            // "NaN" and "inf" parse as floats but poison every aggregate
            if let Some((column, value)) = NUMERIC_FIELDS
                .iter()
                .filter_map(|name| obs.numeric(name).map(|v| (name, v)))
                .find(|(_, v)| !v.is_finite())
            {
                return Err(DatasetError::NonFiniteValue {
                    line,
                    column: column.to_string(),
                    value,
                });
            }
            observations.push(obs);
        }

        tracing::debug!(
            "Loaded {} observations across {} columns",
            observations.len(),
            schema.columns.len()
        );

        Ok(Self {
            schema,
            observations,
        })
    }

    /// Build a dataset directly from observations, with the schema those
    /// typed rows imply.
    pub fn from_observations(observations: Vec<Observation>) -> Self {
        // ---
        let mut columns: Vec<Column> = NUMERIC_FIELDS
            .iter()
            .map(|name| Column {
                name: name.to_string(),
                column_type: ColumnType::Double,
            })
            .collect();
        columns.push(Column {
            name: WEATHER_CONDITION.to_string(),
            column_type: ColumnType::String,
        });

        Self {
            schema: Schema { columns },
            observations,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}
