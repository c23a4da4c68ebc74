use std::path::{Path, PathBuf};

use crate::errors::SweepResult;
use crate::fsutil;

/// Append-only record of the feature sets applied, one per line.
#[derive(Debug, Clone)]
pub struct ResultsLog {
    path: PathBuf,
}

impl ResultsLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open, append `feature_set` plus a newline, and close.
    ///
    /// # Errors
    /// Returns [`crate::errors::SweepError::File`] if the log cannot be written.
    pub fn record(&self, feature_set: &[u8]) -> SweepResult<()> {
        fsutil::append_line(&self.path, feature_set)
    }
}
