//! Run a list of feature-set experiments against a source file.
//!
//! Each experiment rewrites the document's `using ...` line, then drives the build tool
//! through a killed compile, a clean and a full compile. The document is restored at the end.

pub mod cli;
pub mod config;
pub mod document;
pub mod errors;
pub mod experiments;
pub mod fsutil;
pub mod logger;
pub mod results;
pub mod runner;
pub mod tool;

pub use config::SweepConfig;
pub use errors::{SweepError, SweepResult};
pub use runner::{Runner, SweepReport};
pub use tool::{BuildTool, ProcessTool, ToolStep};

use std::path::Path;

/// Run `experiments` with the real build tool, printing banners to stdout.
///
/// # Errors
/// Propagates the first [`SweepError`] raised during the run.
pub async fn run(experiments: &Path, config: SweepConfig) -> SweepResult<SweepReport> {
    config.validate()?;
    let tool = ProcessTool::new(&config.tool);
    Runner::new(config, tool, std::io::stdout()).run(experiments).await
}
