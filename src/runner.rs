//! The experiment loop.
//!
//! Per experiment: substitute, record, start a compile and kill it after the delay,
//! clean, compile. The target document is saved before the loop and restored after it.

use std::io::Write;
use std::path::Path;

use crate::config::SweepConfig;
use crate::document::{RestoreGuard, SubstitutionRule, TargetDocument};
use crate::errors::{SweepError, SweepResult};
use crate::experiments::{Experiment, ExperimentList};
use crate::results::ResultsLog;
use crate::tool::{BuildTool, ToolStep};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SweepReport {
    pub experiments: usize,
}

pub struct Runner<T, W> {
    config: SweepConfig,
    tool: T,
    out: W,
}

impl<T: BuildTool, W: Write> Runner<T, W> {
    /// `out` receives the phase banners.
    pub fn new(config: SweepConfig, tool: T, out: W) -> Self {
        Self { config, tool, out }
    }

    pub fn tool(&self) -> &T {
        &self.tool
    }

    pub fn into_parts(self) -> (T, W) {
        (self.tool, self.out)
    }

    /// Apply every line of `experiments` in order, then restore the target document.
    ///
    /// # Errors
    /// Any failure ends the run immediately. Unless `restore_on_failure` is set, the
    /// target document keeps whatever was last written to it.
    pub async fn run(&mut self, experiments: &Path) -> SweepResult<SweepReport> {
        let rule = SubstitutionRule::new(&self.config.prefix)?;
        let doc = TargetDocument::load(&self.config.target, rule)?;
        let list = ExperimentList::open(experiments)?;
        let results = ResultsLog::new(self.config.results.clone());
        let guard = self.config.restore_on_failure.then(|| RestoreGuard::new(&doc));

        let mut report = SweepReport::default();
        for exp in list {
            let exp = exp?;
            self.run_one(&doc, &results, &exp).await?;
            report.experiments += 1;
        }

        doc.restore()?;
        if let Some(g) = guard {
            g.disarm();
        }
        log::info!("sweep finished: {} experiment(s); {} restored", report.experiments, doc.path().display());
        Ok(report)
    }

    async fn run_one(&mut self, doc: &TargetDocument, results: &ResultsLog, exp: &Experiment) -> SweepResult<()> {
        let n = exp.position;
        log::info!("experiment {n}: applying {:?}", exp.display());
        doc.apply(&exp.feature_set)?;
        results.record(&exp.feature_set)?;

        let delay = self.config.faulty_delay();
        self.banner(n, &format!("STARTING FAULTY COMPILE (killed after {}s)", delay.as_secs()))?;
        let faulty = self.tool.start(ToolStep::Compile).await?;
        tokio::time::sleep(delay).await;
        self.banner(n, "KILLING FAULTY COMPILE")?;
        self.tool.terminate(faulty).await?;

        self.banner(n, "CLEAN")?;
        self.tool.run(ToolStep::Clean).await?;
        self.banner(n, "COMPILE")?;
        self.tool.run(ToolStep::Compile).await?;
        self.banner(n, "EXPERIMENT COMPLETE")?;
        Ok(())
    }

    fn banner(&mut self, n: usize, phase: &str) -> SweepResult<()> {
        log::debug!("experiment {n}: {phase}");
        writeln!(self.out, "\n{stars} [{n}] {phase} {stars}\n", stars = "*".repeat(20))
            .and_then(|()| self.out.flush())
            .map_err(|e| SweepError::Io(e.to_string()))
    }
}
