//! Run configuration.
//!
//! Precedence: CLI > env > config file > defaults. The config file is the first existing
//! path among `--config`, `$FEATURE_SWEEP_CONFIG` and `./feature-sweep.toml`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::errors::{SweepError, SweepResult};

pub const CONFIG_ENV: &str = "FEATURE_SWEEP_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "feature-sweep.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepConfig {
    /// Document whose substitution point is rewritten per experiment.
    pub target: PathBuf,
    /// Append-only log of applied feature sets.
    pub results: PathBuf,
    pub prefix: String,
    /// How long the faulty compile runs before it is killed.
    pub faulty_delay_secs: u64,
    /// Put the target back if the run fails part-way. Off by default.
    pub restore_on_failure: bool,
    pub tool: ToolConfig,
    pub log: LogConfig,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            target: PathBuf::from("src/main/lbj/CommaClassifier.lbj"),
            results: PathBuf::from("experimentResults.txt"),
            prefix: "using ".to_string(),
            faulty_delay_secs: 5,
            restore_on_failure: false,
            tool: ToolConfig::default(),
            log: LogConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    pub program: String,
    pub compile_args: Vec<String>,
    pub clean_args: Vec<String>,
    pub working_dir: Option<PathBuf>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            program: "mvn".to_string(),
            compile_args: vec!["lbj:compile".to_string()],
            clean_args: vec!["lbj:clean".to_string()],
            working_dir: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// Directory for `feature-sweep.log`; console only when unset.
    pub dir: Option<PathBuf>,
    /// error|warn|info|debug|trace
    pub level: Option<String>,
    /// Rolled files to keep (default 7).
    pub retention: Option<usize>,
}

impl SweepConfig {
    #[must_use]
    pub fn faulty_delay(&self) -> Duration {
        Duration::from_secs(self.faulty_delay_secs)
    }

    /// Parse a TOML document. Missing keys take their defaults.
    ///
    /// # Errors
    /// Returns [`SweepError::Config`] on malformed TOML or unknown keys.
    pub fn from_toml_str(s: &str) -> SweepResult<Self> {
        toml::from_str(s).map_err(|e| SweepError::Config(e.to_string()))
    }

    /// Read and parse a TOML config file.
    ///
    /// # Errors
    /// Returns [`SweepError::Config`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> SweepResult<Self> {
        let s = std::fs::read_to_string(path)
            .map_err(|e| SweepError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&s).map_err(|e| match e {
            SweepError::Config(msg) => SweepError::Config(format!("{}: {msg}", path.display())),
            other => other,
        })
    }

    /// Apply `FEATURE_SWEEP_*` overrides using `env` as the variable lookup.
    ///
    /// # Errors
    /// Returns [`SweepError::Config`] if a numeric variable does not parse.
    pub fn apply_env<F>(&mut self, env: F) -> SweepResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = env("FEATURE_SWEEP_TARGET") {
            self.target = PathBuf::from(v);
        }
        if let Some(v) = env("FEATURE_SWEEP_RESULTS") {
            self.results = PathBuf::from(v);
        }
        if let Some(v) = env("FEATURE_SWEEP_TOOL") {
            self.tool.program = v;
        }
        if let Some(v) = env("FEATURE_SWEEP_DELAY_SECS") {
            self.faulty_delay_secs = parse_num("FEATURE_SWEEP_DELAY_SECS", &v)?;
        }
        if let Some(v) = env("FEATURE_SWEEP_LOG_DIR") {
            self.log.dir = Some(PathBuf::from(v));
        }
        if let Some(v) = env("FEATURE_SWEEP_LOG_LEVEL") {
            self.log.level = Some(v);
        }
        if let Some(v) = env("FEATURE_SWEEP_LOG_RETENTION") {
            self.log.retention = Some(parse_num("FEATURE_SWEEP_LOG_RETENTION", &v)?);
        }
        Ok(())
    }

    /// # Errors
    /// Returns [`SweepError::Config`] describing the first invalid setting.
    pub fn validate(&self) -> SweepResult<()> {
        if self.prefix.is_empty() {
            return Err(SweepError::Config("prefix must not be empty".into()));
        }
        if self.prefix.contains(['\n', '\r']) {
            return Err(SweepError::Config("prefix must not contain a line break".into()));
        }
        if self.tool.program.trim().is_empty() {
            return Err(SweepError::Config("tool.program must not be empty".into()));
        }
        crate::logger::parse_level(self.log.level.as_deref())?;
        Ok(())
    }
}

fn parse_num<T: std::str::FromStr>(key: &str, v: &str) -> SweepResult<T> {
    v.trim()
        .parse::<T>()
        .map_err(|_| SweepError::Config(format!("{key}: expected a non-negative integer, got {v:?}")))
}

/// Candidate config files, in lookup order.
pub fn config_paths<F>(cli_cfg: Option<&Path>, env: F) -> Vec<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    let mut paths = Vec::new();
    if let Some(p) = cli_cfg {
        paths.push(p.to_path_buf());
    }
    if let Some(p) = env(CONFIG_ENV) {
        paths.push(PathBuf::from(p));
    }
    paths.push(PathBuf::from(DEFAULT_CONFIG_FILE));
    paths
}

/// Resolve the file and environment layers. CLI overrides are applied by the caller.
///
/// # Errors
/// Fails if an explicit `--config` path is missing, or if the chosen file or an
/// environment override is invalid.
pub fn load<F>(cli_cfg: Option<&Path>, env: F) -> SweepResult<SweepConfig>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(p) = cli_cfg
        && !p.is_file()
    {
        let why = if p.exists() { "not a regular file" } else { "not found" };
        return Err(SweepError::Config(format!("config file {why}: {}", p.display())));
    }
    let mut cfg = match config_paths(cli_cfg, &env).into_iter().find(|p| p.is_file()) {
        Some(p) => {
            log::debug!("using config file {}", p.display());
            SweepConfig::from_file(&p)?
        }
        None => SweepConfig::default(),
    };
    cfg.apply_env(&env)?;
    Ok(cfg)
}

/// [`load`] against the process environment.
///
/// # Errors
/// See [`load`].
pub fn load_from_process_env(cli_cfg: Option<&Path>) -> SweepResult<SweepConfig> {
    load(cli_cfg, |k| std::env::var(k).ok())
}
