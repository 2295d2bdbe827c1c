//! Merge per-user activity series and weight logs into one training table.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;
use thiserror::Error;

pub mod config;
pub mod dates;
pub mod discovery;
pub mod merge;
pub mod pipeline;
pub mod sources;
pub mod table;

#[derive(Debug, Error)]
pub enum MergeError {
    #[error("input discovery error: {0}")]
    InputDiscovery(String),

    #[error("missing weight file for user {user_id}: {}", .expected.display())]
    MissingInput { user_id: String, expected: PathBuf },

    #[error("parse error in {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("no weight observations for user {user_id}")]
    EmptySource { user_id: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl MergeError {
    pub(crate) fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        MergeError::Parse {
            path: path.into(),
            message: message.into(),
        }
    }
}

pub type MergeResult<T> = Result<T, MergeError>;

/// One day of very-active minutes for a user; `None` when the export left
/// the value blank.
#[derive(Clone, Debug, PartialEq)]
pub struct ActivityRecord {
    pub date: NaiveDate,
    pub very_active_minutes: Option<f64>,
}

/// One logged weighing for a user; `None` when the weight cell is blank.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightRecord {
    pub date: NaiveDate,
    pub weight_kg: Option<f64>,
}

/// A fully filled row of the training table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MergedRow {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "VeryActiveMinutes")]
    pub very_active_minutes: f64,
    #[serde(rename = "WeightKg")]
    pub weight_kg: f64,
    #[serde(rename = "User_ID")]
    pub user_id: String,
}

/// The two source files that belong to one user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserPair {
    pub user_id: String,
    pub activity_path: PathBuf,
    pub weight_path: PathBuf,
}

/// Accepts a JSON number or a numeric string; activity exports use both.
/// `null` and blank strings are missing values.
fn deserialize_number_or_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::Number(n) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("number out of range: {n}"))),
        serde_json::Value::String(s) if s.trim().is_empty() => Ok(None),
        serde_json::Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("expected numeric string, got {s:?}"))),
        other => Err(D::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

pub use config::MergeConfig;
pub use pipeline::{MergeSummary, run};
pub use table::TrainingTable;
