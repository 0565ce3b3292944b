//! Reshaping of XBRL statements into chart series.
//!
//! The XBRL-to-JSON converter reports each statement as a mapping from US-GAAP concept name
//! to a list of period/value observations:
//!
//! ```text
//! {
//!   "Revenues": [
//!     { "period": { "startDate": "2023-01-01", "endDate": "2023-12-31" }, "value": "1000" },
//!     { "period": { "startDate": "2022-01-01", "endDate": "2022-12-31" }, "value": "900" }
//!   ]
//! }
//! ```
//!
//! [`format_for_chart`] flattens that into one [`ChartSeries`] per concept, keeping the first
//! [`CHART_PERIODS`] observations in the order the converter returned them and parsing each
//! value into a number.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::{RelayError, Result};

/// Maximum number of periods kept per series.
pub const CHART_PERIODS: usize = 3;

/// One concept of a statement, ready to be plotted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub name: String,
    pub values: Vec<ChartPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Reporting period exactly as the converter sent it (`instant` or `startDate`/`endDate`)
    pub period: Value,
    pub value: f64,
}

/// A single observation of a concept as reported upstream.
#[derive(Debug, Clone, Deserialize)]
pub struct Observation {
    pub period: Value,
    pub value: ObservedValue,
}

/// Observed values are numeric text upstream; plain JSON numbers are accepted as well.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ObservedValue {
    Number(f64),
    Text(String),
}

impl ObservedValue {
    fn to_f64(&self, concept: &str) -> Result<f64> {
        let parsed = match self {
            ObservedValue::Number(n) => Some(*n),
            ObservedValue::Text(s) => s.trim().parse::<f64>().ok(),
        };

        // NaN and infinities have no JSON representation
        parsed
            .filter(|n| n.is_finite())
            .ok_or_else(|| RelayError::NumericParse {
                concept: concept.to_string(),
                value: self.to_string(),
            })
    }
}

impl std::fmt::Display for ObservedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObservedValue::Number(n) => write!(f, "{}", n),
            ObservedValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Converts a statement into chart series, one per concept, in the statement's key order.
///
/// Only the first [`CHART_PERIODS`] observations of each concept are read; anything after
/// them is ignored without being validated. A concept with no observations still produces a
/// series with empty `values`.
///
/// # Errors
///
/// * `RelayError::MalformedStatement` - The statement is not an object or a concept is not
///   mapped to a list
/// * `RelayError::JsonError` - An observation lacks `period` or `value`
/// * `RelayError::NumericParse` - A value is not a finite number
pub fn format_for_chart(statement: &Value) -> Result<Vec<ChartSeries>> {
    let concepts = statement.as_object().ok_or_else(|| {
        RelayError::MalformedStatement("statement is not a JSON object".to_string())
    })?;

    format_concepts(concepts)
}

fn format_concepts(concepts: &Map<String, Value>) -> Result<Vec<ChartSeries>> {
    concepts
        .iter()
        .map(|(name, observations)| -> Result<ChartSeries> {
            let observations = observations.as_array().ok_or_else(|| {
                RelayError::MalformedStatement(format!("{} is not a list of observations", name))
            })?;

            let values = observations
                .iter()
                .take(CHART_PERIODS)
                .map(|raw| -> Result<ChartPoint> {
                    let observation = Observation::deserialize(raw)?;
                    Ok(ChartPoint {
                        value: observation.value.to_f64(name)?,
                        period: observation.period,
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            Ok(ChartSeries {
                name: name.clone(),
                values,
            })
        })
        .collect()
}
