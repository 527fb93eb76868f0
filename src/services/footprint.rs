// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Emission factor table and footprint calculation.
//!
//! Factors are simplified averages. They can be replaced at startup by
//! pointing `EMISSION_FACTORS_PATH` at a JSON file with the same shape as
//! [`EmissionFactors`].

use crate::models::{ActivityData, Category};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Emission coefficients in kg CO2e per unit of activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionFactors {
    /// Per km, keyed by travel mode
    pub transport: BTreeMap<String, f64>,
    pub electricity: ElectricityFactors,
    /// Per serving, keyed by meal type
    pub food: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectricityFactors {
    /// Per kWh, average grid mix
    pub grid: f64,
}

impl Default for EmissionFactors {
    fn default() -> Self {
        let table = |entries: &[(&str, f64)]| {
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect::<BTreeMap<_, _>>()
        };

        Self {
            transport: table(&[
                ("car", 0.21),
                ("bus", 0.08),
                ("train", 0.04),
                ("flight", 0.25), // short-haul
            ]),
            electricity: ElectricityFactors { grid: 0.45 },
            food: table(&[
                ("red_meat", 2.5),
                ("poultry", 0.7),
                ("vegetarian", 0.3),
                ("vegan", 0.2),
            ]),
        }
    }
}

impl EmissionFactors {
    /// Load a factor table from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, FactorTableError> {
        let json_data = fs::read_to_string(path.as_ref())
            .map_err(|e| FactorTableError::IoError(e.to_string()))?;
        Self::load_from_json(&json_data)
    }

    /// Load a factor table from a JSON string.
    pub fn load_from_json(json_data: &str) -> Result<Self, FactorTableError> {
        let factors: Self = serde_json::from_str(json_data)
            .map_err(|e| FactorTableError::ParseError(e.to_string()))?;

        let all = factors
            .transport
            .values()
            .chain(factors.food.values())
            .chain(std::iter::once(&factors.electricity.grid));
        for &value in all {
            if !value.is_finite() || value < 0.0 {
                return Err(FactorTableError::InvalidFactor(value));
            }
        }

        Ok(factors)
    }
}

/// Errors from loading a factor table.
#[derive(Debug, thiserror::Error)]
pub enum FactorTableError {
    #[error("Failed to read file: {0}")]
    IoError(String),

    #[error("Failed to parse factor table: {0}")]
    ParseError(String),

    #[error("Emission factor must be finite and non-negative, got {0}")]
    InvalidFactor(f64),
}

/// Why a footprint could not be computed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalculationError {
    #[error("missing field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' is not a number: {value}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("unknown {category} type '{sub_type}'")]
    UnknownSubType {
        category: Category,
        sub_type: String,
    },

    #[error("footprint must be finite and non-negative, got {0}")]
    InvalidResult(f64),
}

/// Round to 2 decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Parse the raw `data` map of a submission into its typed form.
pub fn parse_activity_data(
    category: Category,
    data: &Map<String, Value>,
) -> Result<ActivityData, CalculationError> {
    match category {
        Category::Transport => Ok(ActivityData::Transport {
            mode: sub_type(data, "mode", category)?,
            distance: number(data, "distance")?,
        }),
        Category::Electricity => Ok(ActivityData::Electricity {
            usage: number(data, "usage")?,
        }),
        Category::Food => Ok(ActivityData::Food {
            meal_type: sub_type(data, "type", category)?,
            servings: number(data, "servings")?,
        }),
    }
}

/// Numeric input; the browser form submits numbers as strings.
fn number(data: &Map<String, Value>, field: &'static str) -> Result<f64, CalculationError> {
    let invalid = |value: &Value| CalculationError::InvalidNumber {
        field,
        value: value.to_string(),
    };

    match data.get(field) {
        None | Some(Value::Null) => Err(CalculationError::MissingField(field)),
        Some(v @ Value::Number(n)) => n.as_f64().ok_or_else(|| invalid(v)),
        Some(v @ Value::String(s)) => s.trim().parse::<f64>().map_err(|_| invalid(v)),
        Some(other) => Err(invalid(other)),
    }
}

fn sub_type(
    data: &Map<String, Value>,
    field: &'static str,
    category: Category,
) -> Result<String, CalculationError> {
    match data.get(field) {
        None | Some(Value::Null) => Err(CalculationError::MissingField(field)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(CalculationError::UnknownSubType {
            category,
            sub_type: other.to_string(),
        }),
    }
}

/// Converts activities into kg CO2e using an injected factor table.
#[derive(Debug, Clone, Default)]
pub struct FootprintCalculator {
    factors: EmissionFactors,
}

impl FootprintCalculator {
    pub fn new(factors: EmissionFactors) -> Self {
        Self { factors }
    }

    pub fn factors(&self) -> &EmissionFactors {
        &self.factors
    }

    /// Footprint of a typed activity, rounded to 2 decimals.
    pub fn calculate(&self, activity: &ActivityData) -> Result<f64, CalculationError> {
        let raw = match activity {
            ActivityData::Transport { mode, distance } => {
                distance * self.lookup(&self.factors.transport, activity.category(), mode)?
            }
            ActivityData::Electricity { usage } => usage * self.factors.electricity.grid,
            ActivityData::Food {
                meal_type,
                servings,
            } => servings * self.lookup(&self.factors.food, activity.category(), meal_type)?,
        };

        if !raw.is_finite() || raw < 0.0 {
            return Err(CalculationError::InvalidResult(raw));
        }

        Ok(round2(raw))
    }

    /// Parse and score a raw submission.
    pub fn compute(
        &self,
        category: Category,
        data: &Map<String, Value>,
    ) -> Result<f64, CalculationError> {
        let activity = parse_activity_data(category, data)?;
        self.calculate(&activity)
    }

    /// Score a raw submission, degrading every failure to 0.
    ///
    /// Categories outside the known set also score 0.
    pub fn footprint_or_zero(&self, activity_type: &str, data: &Map<String, Value>) -> f64 {
        let Some(category) = Category::parse(activity_type) else {
            return 0.0;
        };

        match self.compute(category, data) {
            Ok(footprint) => footprint,
            Err(e) => {
                tracing::warn!(
                    activity_type,
                    error = %e,
                    "Footprint calculation failed, recording 0"
                );
                0.0
            }
        }
    }

    fn lookup(
        &self,
        table: &BTreeMap<String, f64>,
        category: Category,
        key: &str,
    ) -> Result<f64, CalculationError> {
        table
            .get(key)
            .copied()
            .ok_or_else(|| CalculationError::UnknownSubType {
                category,
                sub_type: key.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn calc() -> FootprintCalculator {
        FootprintCalculator::default()
    }

    #[test]
    fn test_transport_car() {
        let fp = calc()
            .compute(Category::Transport, &fields(json!({"mode": "car", "distance": 100})))
            .unwrap();
        assert_eq!(fp, 21.0);
    }

    #[test]
    fn test_every_transport_mode() {
        for (mode, expected) in [("car", 2.1), ("bus", 0.8), ("train", 0.4), ("flight", 2.5)] {
            let fp = calc()
                .compute(Category::Transport, &fields(json!({"mode": mode, "distance": 10})))
                .unwrap();
            assert_eq!(fp, expected, "mode {mode}");
        }
    }

    #[test]
    fn test_food_vegan() {
        let fp = calc()
            .compute(Category::Food, &fields(json!({"type": "vegan", "servings": 3})))
            .unwrap();
        assert_eq!(fp, 0.6);
    }

    #[test]
    fn test_electricity() {
        let fp = calc()
            .compute(Category::Electricity, &fields(json!({"usage": 10})))
            .unwrap();
        assert_eq!(fp, 4.5);
    }

    #[test]
    fn test_numeric_strings_accepted() {
        let fp = calc()
            .compute(
                Category::Transport,
                &fields(json!({"mode": "car", "distance": "100"})),
            )
            .unwrap();
        assert_eq!(fp, 21.0);
    }

    #[test]
    fn test_rounds_to_cents() {
        // 0.21 * 3.33 = 0.6993
        let fp = calc()
            .compute(Category::Transport, &fields(json!({"mode": "car", "distance": 3.33})))
            .unwrap();
        assert_eq!(fp, 0.7);
        assert_eq!(round2(0.125), 0.13);
    }

    #[test]
    fn test_unknown_mode_is_error() {
        let err = calc()
            .compute(
                Category::Transport,
                &fields(json!({"mode": "rocket", "distance": 100})),
            )
            .unwrap_err();
        assert!(matches!(err, CalculationError::UnknownSubType { .. }));
    }

    #[test]
    fn test_missing_field_is_error() {
        let err = calc()
            .compute(Category::Food, &fields(json!({"type": "vegan"})))
            .unwrap_err();
        assert_eq!(err, CalculationError::MissingField("servings"));
    }

    #[test]
    fn test_malformed_number_is_error() {
        let err = calc()
            .compute(Category::Electricity, &fields(json!({"usage": "lots"})))
            .unwrap_err();
        assert!(matches!(err, CalculationError::InvalidNumber { field: "usage", .. }));
    }

    #[test]
    fn test_negative_input_is_error() {
        let err = calc()
            .compute(Category::Electricity, &fields(json!({"usage": -5})))
            .unwrap_err();
        assert!(matches!(err, CalculationError::InvalidResult(_)));
    }

    #[test]
    fn test_footprint_or_zero_absorbs_errors() {
        let c = calc();
        assert_eq!(
            c.footprint_or_zero("transport", &fields(json!({"mode": "rocket", "distance": 1}))),
            0.0
        );
        assert_eq!(c.footprint_or_zero("food", &fields(json!({}))), 0.0);
        assert_eq!(
            c.footprint_or_zero("food", &fields(json!({"type": "insects", "servings": 2}))),
            0.0
        );
        assert_eq!(c.footprint_or_zero("water", &fields(json!({"litres": 5}))), 0.0);
        assert_eq!(
            c.footprint_or_zero("electricity", &fields(json!({"usage": "NaN"}))),
            0.0
        );
        assert_eq!(
            c.footprint_or_zero("food", &fields(json!({"type": "poultry", "servings": 2}))),
            1.4
        );
    }

    #[test]
    fn test_load_factor_table_from_json() {
        let json = r#"{
            "transport": {"car": 0.17, "ebike": 0.005},
            "electricity": {"grid": 0.2},
            "food": {"vegan": 0.1}
        }"#;
        let factors = EmissionFactors::load_from_json(json).unwrap();
        let c = FootprintCalculator::new(factors);

        let fp = c
            .compute(Category::Transport, &fields(json!({"mode": "ebike", "distance": 100})))
            .unwrap();
        assert_eq!(fp, 0.5);
        assert!(c
            .compute(Category::Transport, &fields(json!({"mode": "bus", "distance": 1})))
            .is_err());
    }

    #[test]
    fn test_load_factor_table_rejects_negative() {
        let json = r#"{
            "transport": {"car": -1.0},
            "electricity": {"grid": 0.2},
            "food": {}
        }"#;
        assert!(matches!(
            EmissionFactors::load_from_json(json),
            Err(FactorTableError::InvalidFactor(_))
        ));
    }
}
