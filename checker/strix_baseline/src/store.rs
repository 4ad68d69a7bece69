//! On-disk baseline store.

use std::path::{Path, PathBuf};

use crate::model::BaselineFile;

/// Project-relative location of the baseline file.
pub const BASELINE_PATH: &str = ".strix/baseline.json";

/// Failure persisting the baseline.
///
/// Write failures surface to the invoking operation but never corrupt the
/// in-memory reconciliation state of the session.
#[derive(Debug, thiserror::Error)]
pub enum BaselineError {
    #[error("failed to encode baseline: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write baseline file `{path}`: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Loads and saves the baseline file for a project root.
///
/// Single-writer: at most one process performs baseline writes for a given
/// root at a time; racing writers get last-write-wins.
pub struct BaselineStore;

impl BaselineStore {
    /// Absolute path of the baseline file under `root`.
    pub fn path_in(root: &Path) -> PathBuf {
        root.join(BASELINE_PATH)
    }

    /// Load the baseline for `root`.
    ///
    /// A missing or unparsable file is the normal state for a fresh project
    /// and yields an empty baseline, never an error.
    pub fn load(root: &Path) -> BaselineFile {
        let path = Self::path_in(root);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                tracing::debug!(path = %path.display(), %err, "no baseline file, starting empty");
                return BaselineFile::empty();
            }
        };
        match serde_json::from_str(&content) {
            Ok(baseline) => baseline,
            Err(err) => {
                tracing::debug!(path = %path.display(), %err, "unparsable baseline, starting empty");
                BaselineFile::empty()
            }
        }
    }

    /// Persist `baseline` under `root`, creating directories as needed.
    ///
    /// Full-file overwrite; keys are already sorted by the model, so saving
    /// logically-identical content twice produces byte-identical output.
    pub fn save(root: &Path, baseline: &BaselineFile) -> Result<(), BaselineError> {
        let path = Self::path_in(root);
        let mut encoded = serde_json::to_string_pretty(baseline)?;
        encoded.push('\n');
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| BaselineError::Write {
                path: path.clone(),
                source,
            })?;
        }
        std::fs::write(&path, encoded).map_err(|source| BaselineError::Write { path, source })
    }
}
