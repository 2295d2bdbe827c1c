//! Loaders for the activity JSON export and the weight CSV log.

use crate::dates::{parse_activity_date, parse_weight_date};
use crate::{ActivityRecord, MergeError, MergeResult, WeightRecord};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RawActivity {
    #[serde(rename = "dateTime")]
    date_time: String,
    #[serde(default, deserialize_with = "crate::deserialize_number_or_string")]
    value: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawWeight {
    date: String,
    #[serde(default)]
    weight: Option<String>,
}

/// Load one user's activity export.
pub fn load_activity(path: &Path) -> MergeResult<Vec<ActivityRecord>> {
    let text = std::fs::read_to_string(path)?;
    let records = parse_activity_json(&text, path)?;
    tracing::debug!(path = %path.display(), records = records.len(), "loaded activity");
    Ok(records)
}

/// Parse a JSON array of `{"dateTime": ..., "value": ...}` entries.
///
/// `origin` only labels errors.
pub fn parse_activity_json(text: &str, origin: &Path) -> MergeResult<Vec<ActivityRecord>> {
    // An empty file is an empty export, not malformed JSON.
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    let raw: Vec<RawActivity> =
        serde_json::from_str(text).map_err(|e| MergeError::parse(origin, e.to_string()))?;

    raw.into_iter()
        .map(|r| {
            let date = parse_activity_date(&r.date_time).ok_or_else(|| {
                MergeError::parse(origin, format!("invalid dateTime {:?}", r.date_time))
            })?;
            if let Some(v) = r.value.filter(|v| !v.is_finite() || *v < 0.0) {
                return Err(MergeError::parse(
                    origin,
                    format!("invalid minutes {v} on {}", r.date_time),
                ));
            }
            Ok(ActivityRecord {
                date,
                very_active_minutes: r.value,
            })
        })
        .collect()
}

/// Load one user's weight log.
pub fn load_weight(path: &Path) -> MergeResult<Vec<WeightRecord>> {
    let file = std::fs::File::open(path)?;
    let records = read_weight_csv(file, path)?;
    tracing::debug!(path = %path.display(), records = records.len(), "loaded weight log");
    Ok(records)
}

/// Read a CSV whose header contains at least `date` and `weight`.
/// A blank `weight` cell is a missing value, not a parse error.
pub fn read_weight_csv<R: Read>(reader: R, origin: &Path) -> MergeResult<Vec<WeightRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| MergeError::parse(origin, format!("failed to read CSV header: {e}")))?
        .clone();
    // Header-only and zero-byte files both yield an empty header or no rows.
    if headers.is_empty() {
        return Ok(Vec::new());
    }
    for required in ["date", "weight"] {
        if !headers.iter().any(|h| h == required) {
            return Err(MergeError::parse(
                origin,
                format!("missing required column '{required}'"),
            ));
        }
    }

    let mut out = Vec::new();
    for (idx, result) in reader.deserialize::<RawWeight>().enumerate() {
        // records start on line 2, after the header
        let line = idx + 2;
        let row = result.map_err(|e| MergeError::parse(origin, format!("line {line}: {e}")))?;
        let date = parse_weight_date(&row.date).ok_or_else(|| {
            MergeError::parse(origin, format!("line {line}: invalid date {:?}", row.date))
        })?;
        let weight_kg = match row.weight.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(text) => match text.parse::<f64>() {
                Ok(w) if w.is_finite() && w > 0.0 => Some(w),
                _ => {
                    let message = format!("line {line}: invalid weight {text:?}");
                    return Err(MergeError::parse(origin, message));
                }
            },
        };
        out.push(WeightRecord { date, weight_kg });
    }
    Ok(out)
}
