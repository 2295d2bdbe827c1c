//! Run the whole merge: discover, merge each user in order, persist.

use crate::discovery::discover_user_pairs;
use crate::merge::merge_user;
use crate::sources::{load_activity, load_weight};
use crate::{MergeConfig, MergeResult, TrainingTable, UserPair};
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergeSummary {
    pub users: usize,
    pub rows: usize,
    pub output_path: PathBuf,
}

/// Merge every pair in order. The first failure aborts the whole batch.
pub fn merge_pairs(pairs: &[UserPair]) -> MergeResult<TrainingTable> {
    let mut table = TrainingTable::new();
    for pair in pairs {
        let activity = load_activity(&pair.activity_path)?;
        let weight = load_weight(&pair.weight_path)?;
        let rows = merge_user(&pair.user_id, &activity, &weight)?;
        tracing::info!(user_id = %pair.user_id, rows = rows.len(), "merged user");
        table.append_user(rows);
    }
    Ok(table)
}

/// Discover inputs under `config.input_dir` and write the training table to
/// `config.output_path`. Nothing is written unless every user merged.
pub fn run(config: &MergeConfig) -> MergeResult<MergeSummary> {
    let pairs = discover_user_pairs(&config.input_dir)?;
    tracing::info!(users = pairs.len(), dir = %config.input_dir.display(), "discovered inputs");

    let table = merge_pairs(&pairs)?;
    table.save(&config.output_path)?;

    Ok(MergeSummary {
        users: pairs.len(),
        rows: table.len(),
        output_path: config.output_path.clone(),
    })
}
