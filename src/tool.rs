//! The external build tool seam.
//!
//! The runner only ever starts a step in the background, kills it, or runs a step to
//! completion. [`ProcessTool`] does this with real processes; tests substitute recorders.

use std::fmt;
use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::{Child, Command};

use crate::config::ToolConfig;
use crate::errors::{SweepError, SweepResult};

/// The two verbs the build tool is invoked with.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ToolStep {
    Compile,
    Clean,
}

impl fmt::Display for ToolStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolStep::Compile => f.write_str("compile"),
            ToolStep::Clean => f.write_str("clean"),
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait BuildTool {
    /// Handle to a step started in the background.
    type Running;

    /// Launch `step` without waiting for it.
    async fn start(&mut self, step: ToolStep) -> SweepResult<Self::Running>;

    /// Forcibly stop a background step, finished or not.
    async fn terminate(&mut self, running: Self::Running) -> SweepResult<()>;

    /// Run `step` to completion. Returns the exit code if there is one; callers do not act on it.
    async fn run(&mut self, step: ToolStep) -> SweepResult<Option<i32>>;
}

/// Invokes a build program by name, e.g. `mvn lbj:compile`.
#[derive(Debug, Clone)]
pub struct ProcessTool {
    program: String,
    compile_args: Vec<String>,
    clean_args: Vec<String>,
    working_dir: Option<PathBuf>,
}

impl ProcessTool {
    pub fn new(cfg: &ToolConfig) -> Self {
        Self {
            program: cfg.program.clone(),
            compile_args: cfg.compile_args.clone(),
            clean_args: cfg.clean_args.clone(),
            working_dir: cfg.working_dir.clone(),
        }
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    fn command(&self, step: ToolStep) -> Command {
        let mut cmd = Command::new(&self.program);
        match step {
            ToolStep::Compile => cmd.args(&self.compile_args),
            ToolStep::Clean => cmd.args(&self.clean_args),
        };
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }
        cmd.stdin(Stdio::inherit()).stdout(Stdio::inherit()).stderr(Stdio::inherit());
        cmd
    }

    fn spawn_err(&self) -> impl FnOnce(std::io::Error) -> SweepError + '_ {
        move |source| SweepError::Spawn { program: self.program.clone(), source }
    }
}

impl BuildTool for ProcessTool {
    type Running = Child;

    async fn start(&mut self, step: ToolStep) -> SweepResult<Child> {
        let child = self.command(step).kill_on_drop(true).spawn().map_err(self.spawn_err())?;
        log::debug!("started `{} {step}` in background (pid {:?})", self.program, child.id());
        Ok(child)
    }

    async fn terminate(&mut self, mut running: Child) -> SweepResult<()> {
        match running.kill().await {
            Ok(()) => {
                log::debug!("killed background `{}`", self.program);
                Ok(())
            }
            // Already exited and reaped.
            Err(e) if e.kind() == std::io::ErrorKind::InvalidInput => Ok(()),
            Err(source) => Err(SweepError::Terminate { program: self.program.clone(), source }),
        }
    }

    async fn run(&mut self, step: ToolStep) -> SweepResult<Option<i32>> {
        let status = self.command(step).status().await.map_err(self.spawn_err())?;
        if status.success() {
            log::info!("`{} {step}` finished: {status}", self.program);
        } else {
            log::warn!("`{} {step}` finished: {status} (ignored)", self.program);
        }
        Ok(status.code())
    }
}
