//! Engine configuration.

use graphstep_adapters::plugins::Parameters;
use serde::Serialize;

/// Engine-wide settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Config {
    /// Steps after which a run is aborted. `None` means unlimited.
    pub step_limit: Option<usize>,
    /// Auto-solve palette used when the run options name none. `None` uses
    /// the network's own palette (4 colors unless changed).
    pub palette_size: Option<usize>,
    /// Emit a `trace!` event for every step.
    pub trace_steps: bool,
}

impl Config {
    /// Stops every run after `limit` steps.
    #[must_use]
    pub fn with_step_limit(mut self, limit: usize) -> Self {
        self.step_limit = Some(limit);
        self
    }

    /// Sets the default auto-solve palette size.
    #[must_use]
    pub fn with_palette_size(mut self, palette_size: usize) -> Self {
        self.palette_size = Some(palette_size);
        self
    }

    /// Enables per-step tracing.
    #[must_use]
    pub fn with_trace_steps(mut self, enabled: bool) -> Self {
        self.trace_steps = enabled;
        self
    }
}

/// Per-run options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunOptions {
    /// Read network edges as directed. Defaults to the network's own flag.
    pub directed: Option<bool>,
    /// Auto-solve palette size for this run only.
    pub palette_size: Option<usize>,
}

impl RunOptions {
    /// Reads edges as directed (or not) for this run.
    #[must_use]
    pub fn directed(mut self, directed: bool) -> Self {
        self.directed = Some(directed);
        self
    }

    /// Uses `palette_size` colors for this run.
    #[must_use]
    pub fn palette_size(mut self, palette_size: usize) -> Self {
        self.palette_size = Some(palette_size);
        self
    }

    /// Resolves against engine defaults.
    pub(crate) fn parameters(&self, config: &Config) -> Parameters {
        Parameters {
            directed: self.directed,
            palette_size: self.palette_size.or(config.palette_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.step_limit, None);
        assert!(!config.trace_steps);
    }

    #[test]
    fn test_run_options_override_config() {
        let config = Config::default().with_palette_size(3);
        assert_eq!(RunOptions::default().parameters(&config).palette_size, Some(3));
        let params = RunOptions::default().palette_size(5).directed(true).parameters(&config);
        assert_eq!(params.palette_size, Some(5));
        assert_eq!(params.directed, Some(true));
    }
}
