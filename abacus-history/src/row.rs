//! Tabular representation of an evaluated calculation

use crate::Calculation;
use abacus_core::Number;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Column order of the history file
pub const COLUMNS: [&str; 5] = ["timestamp", "operation", "a", "b", "result"];

/// One evaluated calculation.
///
/// Operands and result are narrowed to `f64`; callers needing the exact
/// decimal result take it from `HistoryStore::add`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRow {
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
    pub operation: String,
    pub a: f64,
    pub b: f64,
    pub result: f64,
}

impl HistoryRow {
    pub fn new(calculation: &Calculation, result: &Number, timestamp: NaiveDateTime) -> Self {
        Self {
            timestamp,
            operation: calculation.operation().name().to_string(),
            a: narrow(calculation.a()),
            b: narrow(calculation.b()),
            result: narrow(result),
        }
    }
}

/// Out-of-range values become NaN rather than failing the append
fn narrow(n: &Number) -> f64 {
    n.to_f64().unwrap_or(f64::NAN)
}

/// `2024-05-01 13:45:10.123456`; `T` separator accepted on read
mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";
    const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        let s = s.trim();
        NaiveDateTime::parse_from_str(s, FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(s, ISO_FORMAT))
            .map_err(|e| serde::de::Error::custom(format!("invalid timestamp '{}': {}", s, e)))
    }
}
