//! Per-user outer join on date and gap filling.

use crate::{ActivityRecord, MergeError, MergeResult, MergedRow, WeightRecord};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// A joined row before filling; `None` marks a value the source did not have.
#[derive(Clone, Debug, PartialEq)]
pub struct JoinedRow {
    pub date: NaiveDate,
    pub very_active_minutes: Option<f64>,
    pub weight_kg: Option<f64>,
}

/// Full outer join of both record sets on date, ascending by date. A record
/// with a blank value still contributes its date.
pub fn outer_join(activity: &[ActivityRecord], weight: &[WeightRecord]) -> Vec<JoinedRow> {
    // outer Option: date seen in that source; inner: value present
    type Slot = (Option<Option<f64>>, Option<Option<f64>>);
    let mut by_date: BTreeMap<NaiveDate, Slot> = BTreeMap::new();

    for rec in activity {
        let slot = by_date.entry(rec.date).or_default();
        if slot.0.replace(rec.very_active_minutes).is_some() {
            tracing::debug!(date = %rec.date, "duplicate activity date, keeping last");
        }
    }
    for rec in weight {
        let slot = by_date.entry(rec.date).or_default();
        if slot.1.replace(rec.weight_kg).is_some() {
            tracing::debug!(date = %rec.date, "duplicate weight date, keeping last");
        }
    }

    by_date
        .into_iter()
        .map(|(date, (very_active_minutes, weight_kg))| JoinedRow {
            date,
            very_active_minutes: very_active_minutes.flatten(),
            weight_kg: weight_kg.flatten(),
        })
        .collect()
}

/// Fill gaps by linear interpolation between the nearest known neighbours,
/// treating each position as one step. Leading and trailing gaps take the
/// nearest known value. Returns `None` when nothing is known.
pub fn interpolate_weights(values: &[Option<f64>]) -> Option<Vec<f64>> {
    let known: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| (i, v)))
        .collect();
    let &(first_idx, first_val) = known.first()?;
    let &(last_idx, last_val) = known.last()?;

    let mut out = Vec::with_capacity(values.len());
    // index into `known` of the left neighbour for interior positions
    let mut left = 0usize;
    for (i, v) in values.iter().enumerate() {
        let filled = match *v {
            Some(v) => v,
            None if i < first_idx => first_val,
            None if i > last_idx => last_val,
            None => {
                while known[left + 1].0 < i {
                    left += 1;
                }
                let (i0, v0) = known[left];
                let (i1, v1) = known[left + 1];
                v0 + (v1 - v0) * (i - i0) as f64 / (i1 - i0) as f64
            }
        };
        out.push(filled);
    }
    Some(out)
}

/// Join, sort, fill and tag one user's records.
pub fn merge_user(
    user_id: &str,
    activity: &[ActivityRecord],
    weight: &[WeightRecord],
) -> MergeResult<Vec<MergedRow>> {
    if activity.is_empty() {
        tracing::warn!(%user_id, "activity source is empty; minutes default to 0");
    }

    let joined = outer_join(activity, weight);
    let weights: Vec<Option<f64>> = joined.iter().map(|r| r.weight_kg).collect();
    let weights = interpolate_weights(&weights).ok_or_else(|| MergeError::EmptySource {
        user_id: user_id.to_string(),
    })?;

    Ok(joined
        .into_iter()
        .zip(weights)
        .map(|(row, weight_kg)| MergedRow {
            date: row.date,
            very_active_minutes: row.very_active_minutes.unwrap_or(0.0),
            weight_kg,
            user_id: user_id.to_string(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn act(d: u32, m: f64) -> ActivityRecord {
        ActivityRecord {
            date: day(d),
            very_active_minutes: Some(m),
        }
    }

    fn wt(d: u32, w: f64) -> WeightRecord {
        WeightRecord {
            date: day(d),
            weight_kg: Some(w),
        }
    }

    #[test]
    fn merges_the_reference_example() {
        let rows = merge_user(
            "42",
            &[act(1, 10.0), act(2, 0.0), act(3, 5.0)],
            &[wt(1, 70.0), wt(3, 71.0)],
        )
        .expect("merge");
        let got: Vec<(NaiveDate, f64, f64, &str)> = rows
            .iter()
            .map(|r| (r.date, r.very_active_minutes, r.weight_kg, r.user_id.as_str()))
            .collect();
        assert_eq!(
            got,
            vec![
                (day(1), 10.0, 70.0, "42"),
                (day(2), 0.0, 70.5, "42"),
                (day(3), 5.0, 71.0, "42"),
            ]
        );
    }

    #[test]
    fn outer_join_keeps_one_sided_dates_unset() {
        let joined = outer_join(&[act(3, 4.0), act(1, 2.0)], &[wt(2, 80.0)]);
        assert_eq!(
            joined,
            vec![
                JoinedRow {
                    date: day(1),
                    very_active_minutes: Some(2.0),
                    weight_kg: None,
                },
                JoinedRow {
                    date: day(2),
                    very_active_minutes: None,
                    weight_kg: Some(80.0),
                },
                JoinedRow {
                    date: day(3),
                    very_active_minutes: Some(4.0),
                    weight_kg: None,
                },
            ]
        );
    }

    #[test]
    fn interpolation_is_positional_with_flat_boundaries() {
        let filled = interpolate_weights(&[None, Some(60.0), None, None, Some(63.0), None])
            .expect("filled");
        assert_eq!(filled, vec![60.0, 60.0, 61.0, 62.0, 63.0, 63.0]);
    }

    #[test]
    fn interpolation_handles_several_interior_runs() {
        let filled =
            interpolate_weights(&[Some(1.0), None, Some(3.0), None, None, None, Some(7.0)])
                .expect("filled");
        assert_eq!(filled, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn interpolation_without_known_values_is_none() {
        assert_eq!(interpolate_weights(&[None, None]), None);
        assert_eq!(interpolate_weights(&[]), None);
    }

    #[test]
    fn missing_minutes_become_zero() {
        let rows = merge_user("u", &[act(2, 9.0)], &[wt(1, 70.0), wt(3, 72.0)]).unwrap();
        let minutes: Vec<f64> = rows.iter().map(|r| r.very_active_minutes).collect();
        assert_eq!(minutes, vec![0.0, 9.0, 0.0]);
        assert_eq!(rows[1].weight_kg, 71.0);
    }

    #[test]
    fn blank_source_values_are_filled_like_absent_ones() {
        let activity = [
            ActivityRecord {
                date: day(1),
                very_active_minutes: None,
            },
            act(3, 6.0),
        ];
        let weight = [
            wt(1, 70.0),
            WeightRecord {
                date: day(2),
                weight_kg: None,
            },
            wt(3, 72.0),
        ];
        let rows = merge_user("u", &activity, &weight).unwrap();
        let got: Vec<(f64, f64)> = rows
            .iter()
            .map(|r| (r.very_active_minutes, r.weight_kg))
            .collect();
        assert_eq!(got, vec![(0.0, 70.0), (0.0, 71.0), (6.0, 72.0)]);
    }

    #[test]
    fn only_blank_weights_is_empty_source_error() {
        let weight = [WeightRecord {
            date: day(1),
            weight_kg: None,
        }];
        let err = merge_user("u", &[act(1, 5.0)], &weight).unwrap_err();
        assert!(matches!(err, MergeError::EmptySource { .. }));
    }

    #[test]
    fn empty_activity_is_one_sided_join() {
        let rows = merge_user("u", &[], &[wt(1, 70.0), wt(2, 71.0)]).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.very_active_minutes == 0.0));
    }

    #[test]
    fn no_weights_is_empty_source_error() {
        let err = merge_user("u9", &[act(1, 5.0)], &[]).unwrap_err();
        assert!(matches!(err, MergeError::EmptySource { ref user_id } if user_id == "u9"));
    }
}
