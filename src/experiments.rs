//! Line-oriented reader over the experiments file.

use std::fs::File;
use std::io::{BufRead, BufReader, Split};
use std::path::{Path, PathBuf};

use crate::errors::{SweepError, SweepResult};
use crate::fsutil;

/// One feature set and its 1-based position in the experiments file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Experiment {
    pub position: usize,
    /// Raw line bytes; no encoding is assumed.
    pub feature_set: Vec<u8>,
}

impl Experiment {
    /// Lossy text form for log messages.
    #[must_use]
    pub fn display(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.feature_set)
    }
}

/// Streams experiments in file order. Line terminators (`\n`, `\r\n`) are stripped;
/// everything else on the line is kept verbatim, including empty lines.
pub struct ExperimentList {
    path: PathBuf,
    lines: Split<BufReader<File>>,
    position: usize,
}

impl ExperimentList {
    /// # Errors
    /// Returns [`SweepError::File`] if the file cannot be opened.
    pub fn open(path: &Path) -> SweepResult<Self> {
        let f = fsutil::open_read(path)?;
        Ok(Self { path: path.to_path_buf(), lines: BufReader::new(f).split(b'\n'), position: 0 })
    }
}

impl Iterator for ExperimentList {
    type Item = SweepResult<Experiment>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.next()?;
        self.position += 1;
        Some(match line {
            Ok(mut feature_set) => {
                if feature_set.last() == Some(&b'\r') {
                    feature_set.pop();
                }
                Ok(Experiment { position: self.position, feature_set })
            }
            Err(source) => Err(SweepError::File { action: "read", path: self.path.clone(), source }),
        })
    }
}
