//! `log` backend setup. Records go to stderr (stdout carries the phase banners) and,
//! when a directory is configured, to a rolling `feature-sweep.log`.

use std::path::Path;

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::rolling_file::RollingFileAppender;
use log4rs::append::rolling_file::policy::compound::{
    CompoundPolicy, roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger,
};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

use crate::config::LogConfig;
use crate::errors::{SweepError, SweepResult};

pub const LOG_FILE: &str = "feature-sweep.log";
const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l}] {t} - {m}{n}";
const ROLL_SIZE: u64 = 10 * 1024 * 1024;

/// Map a level name (case-insensitive) to a filter. `None` means `info`.
///
/// # Errors
/// Returns [`SweepError::Config`] for anything but `error|warn|info|debug|trace`.
pub fn parse_level(level: Option<&str>) -> SweepResult<LevelFilter> {
    let Some(name) = level else {
        return Ok(LevelFilter::Info);
    };
    match name.trim().to_ascii_lowercase().as_str() {
        "error" => Ok(LevelFilter::Error),
        "warn" => Ok(LevelFilter::Warn),
        "info" => Ok(LevelFilter::Info),
        "debug" => Ok(LevelFilter::Debug),
        "trace" => Ok(LevelFilter::Trace),
        _ => Err(SweepError::Config(format!(
            "unknown log level {name:?}; expected error|warn|info|debug|trace"
        ))),
    }
}

fn rolling_appender(dir: &Path, keep: u32) -> SweepResult<RollingFileAppender> {
    std::fs::create_dir_all(dir)
        .map_err(|e| SweepError::Logging(format!("{}: {e}", dir.display())))?;
    let roller = FixedWindowRoller::builder()
        .build(&format!("{}", dir.join("feature-sweep.{}.log").display()), keep)
        .map_err(|e| SweepError::Logging(e.to_string()))?;
    let policy = CompoundPolicy::new(Box::new(SizeTrigger::new(ROLL_SIZE)), Box::new(roller));
    RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build(dir.join(LOG_FILE), Box::new(policy))
        .map_err(|e| SweepError::Logging(e.to_string()))
}

/// Install the global logger. If one is already installed it is kept.
///
/// # Errors
/// Returns [`SweepError::Logging`] if the log directory or appenders cannot be set up.
pub fn configure(cfg: &LogConfig) -> SweepResult<()> {
    let level = parse_level(cfg.level.as_deref())?;
    let console = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build();
    let mut builder =
        Config::builder().appender(Appender::builder().build("stderr", Box::new(console)));
    let mut root = Root::builder().appender("stderr");
    if let Some(dir) = &cfg.dir {
        let keep = u32::try_from(cfg.retention.unwrap_or(7)).unwrap_or(u32::MAX);
        builder = builder.appender(Appender::builder().build("file", Box::new(rolling_appender(dir, keep)?)));
        root = root.appender("file");
    }
    let config = builder
        .build(root.build(level))
        .map_err(|e| SweepError::Logging(e.to_string()))?;
    if log4rs::init_config(config).is_err() {
        log::debug!("logger already initialized; keeping existing configuration");
    }
    Ok(())
}
