//! CLI command implementations.

pub mod grid;
pub mod network;

use std::time::Duration;

use anyhow::{Result, anyhow};
use graphstep::{AlgorithmKind, Config, RunOptions, StepEngine, StepSnapshot};
use indicatif::{ProgressBar, ProgressStyle};

use crate::output::{self, Format};

/// How a run is paced and reported.
pub struct Pacing {
    pub format: Format,
    pub quiet: bool,
    pub steps: bool,
    pub delay: Duration,
    pub step_limit: Option<usize>,
}

impl Pacing {
    /// Engine configured for this invocation.
    pub fn engine(&self) -> StepEngine {
        let mut config = Config::default().with_trace_steps(self.steps);
        if let Some(limit) = self.step_limit {
            config = config.with_step_limit(limit);
        }
        StepEngine::with_config(config)
    }

    fn spinner(&self) -> Result<ProgressBar> {
        if self.quiet || self.steps || matches!(self.format, Format::Json) {
            return Ok(ProgressBar::hidden());
        }
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
        Ok(spinner)
    }
}

/// Pulls a run to its end and returns the terminal snapshot.
pub fn drive(
    engine: &mut StepEngine,
    kind: AlgorithmKind,
    options: RunOptions,
    pacing: &Pacing,
) -> Result<StepSnapshot> {
    let run = engine.run(kind, options)?;
    let spinner = pacing.spinner()?;
    let mut last = None;
    for snapshot in run {
        if pacing.steps && !pacing.quiet {
            match pacing.format {
                Format::Json => println!("{}", serde_json::to_string(&snapshot)?),
                Format::Table => output::status(&output::snapshot_line(&snapshot), false),
            }
        }
        spinner.set_message(format!("{kind}: step {}", snapshot.step));
        spinner.tick();
        if !pacing.delay.is_zero() && !snapshot.is_terminal() {
            std::thread::sleep(pacing.delay);
        }
        last = Some(snapshot);
    }
    spinner.finish_and_clear();
    last.ok_or_else(|| anyhow!("{kind} produced no snapshots"))
}
