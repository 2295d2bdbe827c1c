use crate::MergeError;
use std::path::PathBuf;

pub const DEFAULT_OUTPUT_FILE: &str = "final_training_database.csv";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergeConfig {
    pub input_dir: PathBuf,
    pub output_path: PathBuf,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
        }
    }
}

impl MergeConfig {
    pub fn from_env() -> Result<Self, MergeError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function instead of the process environment.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, MergeError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let input_dir = match get("WEIGHT_MERGE_INPUT_DIR") {
            Some(v) if v.trim().is_empty() => {
                return Err(MergeError::Config("WEIGHT_MERGE_INPUT_DIR is empty".into()));
            }
            Some(v) => PathBuf::from(v),
            None => defaults.input_dir,
        };
        let output_path = match get("WEIGHT_MERGE_OUTPUT") {
            Some(v) if v.trim().is_empty() => {
                return Err(MergeError::Config("WEIGHT_MERGE_OUTPUT is empty".into()));
            }
            Some(v) => PathBuf::from(v),
            None => defaults.output_path,
        };
        Ok(Self {
            input_dir,
            output_path,
        })
    }

    /// Replace values with explicitly supplied ones (e.g. command-line flags).
    pub fn with_overrides(
        mut self,
        input_dir: Option<PathBuf>,
        output_path: Option<PathBuf>,
    ) -> Self {
        if let Some(dir) = input_dir {
            self.input_dir = dir;
        }
        if let Some(out) = output_path {
            self.output_path = out;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_uses_defaults() {
        let cfg = MergeConfig::from_env_with(|_| None).expect("cfg");
        assert_eq!(cfg.input_dir, PathBuf::from("."));
        assert_eq!(cfg.output_path, PathBuf::from("final_training_database.csv"));
    }

    #[test]
    fn from_env_reads_values() {
        let get = |k: &str| match k {
            "WEIGHT_MERGE_INPUT_DIR" => Some("/data/fitbit".into()),
            "WEIGHT_MERGE_OUTPUT" => Some("/tmp/out.csv".into()),
            _ => None,
        };
        let cfg = MergeConfig::from_env_with(get).expect("cfg");
        assert_eq!(cfg.input_dir, PathBuf::from("/data/fitbit"));
        assert_eq!(cfg.output_path, PathBuf::from("/tmp/out.csv"));
    }

    #[test]
    fn from_env_rejects_empty_output() {
        let get = |k: &str| match k {
            "WEIGHT_MERGE_OUTPUT" => Some("  ".into()),
            _ => None,
        };
        let res = MergeConfig::from_env_with(get);
        assert!(matches!(res, Err(MergeError::Config(_))));
    }

    #[test]
    fn overrides_replace_only_given_values() {
        let cfg = MergeConfig::default().with_overrides(Some(PathBuf::from("in")), None);
        assert_eq!(cfg.input_dir, PathBuf::from("in"));
        assert_eq!(cfg.output_path, PathBuf::from(DEFAULT_OUTPUT_FILE));
    }
}
