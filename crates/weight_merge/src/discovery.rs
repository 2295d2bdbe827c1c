//! Locate per-user activity/weight file pairs in an input directory.

use crate::{MergeError, MergeResult, UserPair};
use std::path::{Path, PathBuf};

pub const ACTIVITY_FILE_PATTERN: &str = "very_active_minutes_*.json";

/// User id embedded in an activity file name: the last `_`-separated segment
/// of the stem (`very_active_minutes_42.json` -> `42`).
pub fn user_id_from_activity_file(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let id = stem.rsplit('_').next()?;
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

pub fn weight_file_for(dir: &Path, user_id: &str) -> PathBuf {
    dir.join(format!("reporting_{user_id}.csv"))
}

/// Find every activity file in `dir` and pair it with its weight log.
///
/// Pairs are returned in path order, which is the order users are merged in.
pub fn discover_user_pairs(dir: &Path) -> MergeResult<Vec<UserPair>> {
    let escaped = glob::Pattern::escape(&dir.to_string_lossy());
    let pattern = Path::new(&escaped).join(ACTIVITY_FILE_PATTERN);
    let pattern = pattern.to_string_lossy();

    let entries = glob::glob(&pattern)
        .map_err(|e| MergeError::InputDiscovery(format!("invalid pattern {pattern}: {e}")))?;

    let mut activity_files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| MergeError::Io(e.into()))?;
        if path.is_file() {
            activity_files.push(path);
        }
    }
    activity_files.sort();

    if activity_files.is_empty() {
        return Err(MergeError::InputDiscovery(format!(
            "no files matching {ACTIVITY_FILE_PATTERN} in {}",
            dir.display()
        )));
    }

    let mut pairs = Vec::with_capacity(activity_files.len());
    for activity_path in activity_files {
        let user_id = user_id_from_activity_file(&activity_path).ok_or_else(|| {
            MergeError::InputDiscovery(format!(
                "cannot extract user id from {}",
                activity_path.display()
            ))
        })?;
        let weight_path = weight_file_for(dir, &user_id);
        if !weight_path.is_file() {
            return Err(MergeError::MissingInput {
                user_id,
                expected: weight_path,
            });
        }
        tracing::debug!(%user_id, activity = %activity_path.display(), "discovered user");
        pairs.push(UserPair {
            user_id,
            activity_path,
            weight_path,
        });
    }
    Ok(pairs)
}
