use std::path::PathBuf;

use clap::Parser;

use crate::config::SweepConfig;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "feature-sweep",
    version,
    about = "Apply each feature set to the target document and run the build tool through a kill/clean/compile cycle",
    long_about = None
)]
pub struct Cli {
    #[arg(help = "File with one feature set per line")]
    pub experiments: PathBuf,
    #[arg(long, help = "Path to a config file (TOML). If omitted, ./feature-sweep.toml is used when present.")]
    pub config: Option<PathBuf>,
    #[arg(long, help = "Document whose `using` line is rewritten (default src/main/lbj/CommaClassifier.lbj)")]
    pub target: Option<PathBuf>,
    #[arg(long, help = "File the applied feature sets are appended to (default experimentResults.txt)")]
    pub results: Option<PathBuf>,
    #[arg(long, help = "Build tool program name (default mvn)")]
    pub tool: Option<String>,
    #[arg(long, help = "Seconds the faulty compile runs before it is killed (default 5)")]
    pub delay_secs: Option<u64>,
    #[arg(long, help = "Restore the target document if the run fails part-way")]
    pub restore_on_failure: bool,
    #[arg(long, help = "Log level: error|warn|info|debug|trace")]
    pub log_level: Option<String>,
    #[arg(long, help = "Also write feature-sweep.log into this directory")]
    pub log_dir: Option<PathBuf>,
}

impl Cli {
    /// Layer the command-line overrides on top of `cfg`.
    pub fn apply(&self, cfg: &mut SweepConfig) {
        if let Some(t) = &self.target {
            cfg.target = t.clone();
        }
        if let Some(r) = &self.results {
            cfg.results = r.clone();
        }
        if let Some(p) = &self.tool {
            cfg.tool.program = p.clone();
        }
        if let Some(d) = self.delay_secs {
            cfg.faulty_delay_secs = d;
        }
        if self.restore_on_failure {
            cfg.restore_on_failure = true;
        }
        if let Some(l) = &self.log_level {
            cfg.log.level = Some(l.clone());
        }
        if let Some(d) = &self.log_dir {
            cfg.log.dir = Some(d.clone());
        }
    }
}
