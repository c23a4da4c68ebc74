use crate::config::{self, SweepConfig};
use crate::errors::SweepResult;
use crate::logger;
use crate::runner::SweepReport;

use super::command::Cli;

/// Resolve the effective configuration for `cli` against the process environment.
///
/// # Errors
/// Fails on an unreadable config file, a bad environment override, or an invalid result.
pub fn resolve_config(cli: &Cli) -> SweepResult<SweepConfig> {
    let mut cfg = config::load_from_process_env(cli.config.as_deref())?;
    cli.apply(&mut cfg);
    cfg.validate()?;
    Ok(cfg)
}

/// Entry point behind the binary: configure, set up logging, run the sweep.
///
/// # Errors
/// Propagates configuration, logging and run failures.
pub async fn execute(cli: Cli) -> SweepResult<SweepReport> {
    let cfg = resolve_config(&cli)?;
    logger::configure(&cfg.log)?;
    log::info!(
        "sweeping {} over {} with `{}`",
        cli.experiments.display(),
        cfg.target.display(),
        cfg.tool.program
    );
    crate::run(&cli.experiments, cfg).await
}
