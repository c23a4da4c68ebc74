//! The target document and its single substitution point.

use std::path::{Path, PathBuf};

use regex::bytes::{NoExpand, Regex};

use crate::errors::{SweepError, SweepResult};
use crate::fsutil;

/// Matches a line that starts with a literal prefix, up to but excluding the line terminator.
/// Documents are handled as raw bytes, so text in any ASCII-compatible encoding is kept as is.
#[derive(Debug, Clone)]
pub struct SubstitutionRule {
    prefix: String,
    pattern: Regex,
}

impl SubstitutionRule {
    /// Compile a rule for `prefix`. The prefix is matched literally and case-sensitively.
    ///
    /// # Errors
    /// Returns [`SweepError::Config`] for an empty prefix or one containing a line break.
    pub fn new(prefix: &str) -> SweepResult<Self> {
        if prefix.is_empty() {
            return Err(SweepError::Config("substitution prefix must not be empty".into()));
        }
        if prefix.contains(['\n', '\r']) {
            return Err(SweepError::Config("substitution prefix must fit on one line".into()));
        }
        // The tail class runs in byte mode so bytes that are not UTF-8 still belong to the line.
        let pattern = Regex::new(&format!(r"(?m)^{}(?-u:[^\r\n])*", regex::escape(prefix)))?;
        Ok(Self { prefix: prefix.to_string(), pattern })
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Number of lines in `text` that start with the prefix.
    #[must_use]
    pub fn count_matches(&self, text: &[u8]) -> usize {
        self.pattern.find_iter(text).count()
    }

    /// Replace the first matching line with `prefix + payload`. `$` in the payload is literal.
    #[must_use]
    pub fn apply(&self, text: &[u8], payload: &[u8]) -> Vec<u8> {
        let mut line = Vec::with_capacity(self.prefix.len() + payload.len());
        line.extend_from_slice(self.prefix.as_bytes());
        line.extend_from_slice(payload);
        self.pattern.replacen(text, 1, NoExpand(&line)).into_owned()
    }
}

/// A file with exactly one substitution point, plus the exact bytes it had when loaded.
#[derive(Debug)]
pub struct TargetDocument {
    path: PathBuf,
    original: Vec<u8>,
    rule: SubstitutionRule,
}

impl TargetDocument {
    /// Read the document at `path` and check it has exactly one line matching `rule`.
    ///
    /// # Errors
    /// Fails if the file cannot be read, or with [`SweepError::NoSubstitutionPoint`] /
    /// [`SweepError::AmbiguousSubstitutionPoint`] when the match count is not one.
    pub fn load(path: &Path, rule: SubstitutionRule) -> SweepResult<Self> {
        let original = fsutil::read_bytes(path)?;
        match rule.count_matches(&original) {
            1 => {}
            0 => {
                return Err(SweepError::NoSubstitutionPoint {
                    path: path.to_path_buf(),
                    prefix: rule.prefix().to_string(),
                });
            }
            count => {
                return Err(SweepError::AmbiguousSubstitutionPoint {
                    path: path.to_path_buf(),
                    prefix: rule.prefix().to_string(),
                    count,
                });
            }
        }
        log::debug!("loaded target {} ({} bytes)", path.display(), original.len());
        Ok(Self { path: path.to_path_buf(), original, rule })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn original(&self) -> &[u8] {
        &self.original
    }

    /// The original contents with the substitution point rewritten for `feature_set`.
    #[must_use]
    pub fn render(&self, feature_set: &[u8]) -> Vec<u8> {
        self.rule.apply(&self.original, feature_set)
    }

    /// Persist the rendered document for `feature_set`.
    ///
    /// # Errors
    /// Returns [`SweepError::File`] if the document cannot be written.
    pub fn apply(&self, feature_set: &[u8]) -> SweepResult<()> {
        fsutil::overwrite(&self.path, &self.render(feature_set))
    }

    /// Write the original contents back.
    ///
    /// # Errors
    /// Returns [`SweepError::File`] if the document cannot be written.
    pub fn restore(&self) -> SweepResult<()> {
        log::debug!("restoring {}", self.path.display());
        fsutil::overwrite(&self.path, &self.original)
    }
}

/// Restores a [`TargetDocument`] when dropped unless disarmed.
pub struct RestoreGuard<'a> {
    doc: &'a TargetDocument,
    armed: bool,
}

impl<'a> RestoreGuard<'a> {
    #[must_use]
    pub fn new(doc: &'a TargetDocument) -> Self {
        Self { doc, armed: true }
    }

    pub fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for RestoreGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        match self.doc.restore() {
            Ok(()) => log::info!("rolled back {} after a failed run", self.doc.path().display()),
            Err(e) => log::warn!("rollback of {} failed: {e}", self.doc.path().display()),
        }
    }
}
