//! The step engine: live graph, edits and run lifecycle.

use std::sync::Arc;

use graphstep_adapters::plugins::algorithms::{
    AlgorithmKind, ColoringStatus, RunStatus, SelectionVerdict, StepSnapshot, coloring_status,
    evaluate_selection,
};
use graphstep_adapters::plugins::create_algorithm;
use graphstep_common::utils::error::{ConfigurationError, EditError, Result};
use graphstep_core::{EditEffect, EditOp, GraphModel, NetworkGraph};

use crate::config::{Config, RunOptions};
use crate::run::{Run, RunShared};

/// Owns one graph and at most one active run against it.
///
/// Edits apply synchronously while idle and are rejected while a run is
/// active. Starting a run or replacing the graph aborts the active run.
///
/// # Examples
///
/// ```
/// use graphstep_core::GridGraph;
/// use graphstep_engine::{RunOptions, StepEngine};
/// use graphstep_adapters::plugins::algorithms::AlgorithmKind;
///
/// let mut engine = StepEngine::new();
/// engine.configure(GridGraph::new(5, 5).unwrap());
/// let run = engine.run(AlgorithmKind::Bfs, RunOptions::default()).unwrap();
/// let last = run.last().unwrap();
/// assert_eq!(last.path.len(), 9);
/// ```
#[derive(Debug, Default)]
pub struct StepEngine {
    config: Config,
    graph: Option<GraphModel>,
    active: Option<Arc<RunShared>>,
    runs_started: u64,
}

impl StepEngine {
    /// Creates an engine with default configuration and no graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with the given configuration.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Sets or replaces the graph, aborting any active run.
    pub fn configure(&mut self, graph: impl Into<GraphModel>) {
        self.abort_active("graph replaced");
        let graph = graph.into();
        tracing::debug!(kind = graph.kind(), nodes = graph.node_count(), "graph configured");
        self.graph = Some(graph);
    }

    /// The live graph.
    #[must_use]
    pub fn graph(&self) -> Option<&GraphModel> {
        self.graph.as_ref()
    }

    /// Whether a run is in flight.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.active.as_ref().is_some_and(|run| run.is_live())
    }

    /// Applies an edit to the live graph.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::RunActive`] while a run is in flight, a
    /// configuration error if no graph is set, or the edit's own rejection.
    /// The graph is unchanged on error.
    pub fn edit(&mut self, op: EditOp) -> Result<EditEffect> {
        if self.is_running() {
            tracing::warn!(edit = op.name(), "edit rejected: run active");
            return Err(EditError::RunActive.into());
        }
        let graph = self.graph.as_mut().ok_or(ConfigurationError::NoGraph)?;
        let name = op.name();
        graph.apply(op).inspect_err(|err| {
            tracing::warn!(edit = name, %err, "edit rejected");
        })
    }

    /// Starts a run, aborting any run already in flight.
    ///
    /// The run works on a private copy of the graph taken now.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no graph is set, the algorithm does
    /// not fit the graph shape, or the graph fails its preconditions.
    pub fn run(&mut self, kind: AlgorithmKind, options: RunOptions) -> Result<Run> {
        let graph = self.graph.as_ref().ok_or(ConfigurationError::NoGraph)?;
        let params = options.parameters(&self.config);
        let algorithm = create_algorithm(kind, graph, &params)?;

        self.abort_active("superseded by a new run");
        self.runs_started += 1;
        let shared = Arc::new(RunShared::new(self.runs_started));
        self.active = Some(Arc::clone(&shared));
        tracing::debug!(run = self.runs_started, algorithm = %kind, "run started");
        Ok(Run::new(algorithm, shared, &self.config))
    }

    /// Cancels the active run. Returns false if nothing was running.
    pub fn cancel(&mut self) -> bool {
        let Some(run) = &self.active else {
            return false;
        };
        let cancelled = run.request_stop(RunStatus::Cancelled);
        if cancelled {
            tracing::debug!("active run cancelled");
        }
        cancelled
    }

    /// Latest snapshot published by the current run.
    ///
    /// Cleared when the run is cancelled or aborted; kept after it
    /// finishes until the next run starts.
    #[must_use]
    pub fn display(&self) -> Option<StepSnapshot> {
        self.active.as_ref().and_then(|run| run.display())
    }

    /// Checks the manual coloring of a network.
    ///
    /// # Errors
    ///
    /// Returns a configuration error unless a network is configured.
    pub fn coloring_status(&self) -> Result<ColoringStatus> {
        Ok(coloring_status(self.network("manual coloring")?))
    }

    /// Validates the manual spanning-tree selection of a network.
    ///
    /// # Errors
    ///
    /// Returns a configuration error unless a network is configured.
    pub fn evaluate_selection(&self) -> Result<SelectionVerdict> {
        let network = self.network("manual spanning tree")?;
        Ok(evaluate_selection(network, &network.selection()))
    }

    fn network(&self, algorithm: &'static str) -> Result<&NetworkGraph> {
        let graph = self.graph.as_ref().ok_or(ConfigurationError::NoGraph)?;
        graph.as_network().ok_or_else(|| {
            ConfigurationError::WrongGraphKind {
                algorithm,
                expected: "network",
            }
            .into()
        })
    }

    fn abort_active(&mut self, reason: &str) {
        let Some(run) = self.active.take() else {
            return;
        };
        let status = RunStatus::Aborted {
            reason: reason.to_string(),
        };
        if run.request_stop(status) {
            tracing::debug!(reason, "active run aborted");
        }
    }
}
