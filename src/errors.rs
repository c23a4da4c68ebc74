use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SweepError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("failed to {action} {}: {source}", .path.display())]
    File {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no line starting with {prefix:?} in {}", .path.display())]
    NoSubstitutionPoint { path: PathBuf, prefix: String },

    #[error("{count} lines start with {prefix:?} in {}; exactly one is required", .path.display())]
    AmbiguousSubstitutionPoint { path: PathBuf, prefix: String, count: usize },

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("failed to launch `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to terminate `{program}`: {source}")]
    Terminate {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Logging error: {0}")]
    Logging(String),
}

pub type SweepResult<T> = Result<T, SweepError>;
