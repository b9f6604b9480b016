//! Immutable views of run-local state.
//!
//! A [`StepSnapshot`] is a plain value: once emitted it never changes, and
//! it shares nothing with the run that produced it. Fields an algorithm does
//! not use stay empty.

use graphstep_common::types::{ColorIndex, EdgeId, NodeId};
use serde::Serialize;

use super::traits::AlgorithmKind;

/// Tri-color DFS state of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mark {
    /// Not reached yet.
    #[default]
    Unvisited,
    /// Entered, not all edges explored.
    InProgress,
    /// All edges explored.
    Done,
}

/// Terminal result of an algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// A route from start to end. `cost` is the hop count for BFS/DFS and the
    /// sum of entered cell weights for Dijkstra.
    PathFound {
        /// Cells from start to end inclusive.
        path: Vec<NodeId>,
        /// Path cost.
        cost: u64,
    },
    /// BFS/DFS exhausted the frontier without reaching the end.
    NoPath,
    /// Dijkstra ran out of finite-distance cells.
    Unreachable,
    /// Auto-solve colored every node without conflicts.
    Colored {
        /// Final color of every node.
        colors: Vec<ColorIndex>,
        /// Number of distinct colors used.
        colors_used: usize,
    },
    /// The palette ran out while coloring `node`.
    NoColorAvailable {
        /// The node that could not be colored.
        node: NodeId,
    },
    /// Kruskal finished.
    SpanningTree {
        /// Selected edges in selection order.
        edges: Vec<EdgeId>,
        /// Sum of selected edge weights.
        total_weight: u64,
        /// Whether the selected edges connect every node.
        spanning: bool,
    },
    /// The first cycle found.
    CycleFound {
        /// Closing edge first, then tree edges back towards the cycle start.
        edges: Vec<EdgeId>,
    },
    /// No cycle exists.
    Acyclic,
}

impl Outcome {
    /// Whether the outcome is a success for its game (path found, coloring
    /// completed, spanning tree found, or cycle detection finished).
    #[must_use]
    pub fn is_success(&self) -> bool {
        match self {
            Self::PathFound { .. } | Self::Colored { .. } | Self::CycleFound { .. } | Self::Acyclic => {
                true
            }
            Self::SpanningTree { spanning, .. } => *spanning,
            Self::NoPath | Self::Unreachable | Self::NoColorAvailable { .. } => false,
        }
    }

    /// Number of moves on a found path.
    #[must_use]
    pub fn hops(&self) -> Option<usize> {
        match self {
            Self::PathFound { path, .. } => Some(path.len().saturating_sub(1)),
            _ => None,
        }
    }

    /// Short human-readable label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::PathFound { .. } => "path found",
            Self::NoPath => "no path",
            Self::Unreachable => "unreachable",
            Self::Colored { .. } => "colored",
            Self::NoColorAvailable { .. } => "no color available",
            Self::SpanningTree { spanning: true, .. } => "spanning tree",
            Self::SpanningTree { spanning: false, .. } => "spanning forest",
            Self::CycleFound { .. } => "cycle found",
            Self::Acyclic => "no cycle",
        }
    }
}

/// Lifecycle status carried by every snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunStatus {
    /// The run can be advanced further.
    Running,
    /// The algorithm reached its terminal outcome.
    Finished(Outcome),
    /// The caller cancelled the run.
    Cancelled,
    /// The engine stopped the run, e.g. at the configured step limit.
    Aborted {
        /// Why the run was stopped.
        reason: String,
    },
}

impl RunStatus {
    /// Whether no further snapshots follow.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Running)
    }

    /// The outcome, if finished.
    #[must_use]
    pub fn outcome(&self) -> Option<&Outcome> {
        match self {
            Self::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }
}

/// Point-in-time view of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepSnapshot {
    /// Algorithm that produced the snapshot.
    pub algorithm: AlgorithmKind,
    /// 1-based step number; 0 before any step.
    pub step: usize,
    /// Lifecycle status.
    pub status: RunStatus,
    /// Visited nodes in visit order.
    pub visited: Vec<NodeId>,
    /// Discovered nodes waiting to be processed, next-out first.
    pub frontier: Vec<NodeId>,
    /// Node processed by the latest step.
    pub active: Option<NodeId>,
    /// Route from start to end; only filled on terminal success.
    pub path: Vec<NodeId>,
    /// Path cost, tentative distance of the active node, or running total.
    pub cost: Option<u64>,
    /// Tentative Dijkstra distance per node (`None` is infinity).
    pub distances: Vec<Option<u64>>,
    /// Color per node.
    pub colors: Vec<Option<ColorIndex>>,
    /// Nodes sharing a color with a neighbor.
    pub conflicts: Vec<NodeId>,
    /// Edges selected so far.
    pub selected_edges: Vec<EdgeId>,
    /// Edge examined by the latest step.
    pub active_edge: Option<EdgeId>,
    /// Edges forming the detected cycle.
    pub cycle_edges: Vec<EdgeId>,
    /// Tri-color DFS mark per node.
    pub marks: Vec<Mark>,
}

impl StepSnapshot {
    /// Creates an empty running snapshot.
    #[must_use]
    pub fn new(algorithm: AlgorithmKind) -> Self {
        Self {
            algorithm,
            step: 0,
            status: RunStatus::Running,
            visited: Vec::new(),
            frontier: Vec::new(),
            active: None,
            path: Vec::new(),
            cost: None,
            distances: Vec::new(),
            colors: Vec::new(),
            conflicts: Vec::new(),
            selected_edges: Vec::new(),
            active_edge: None,
            cycle_edges: Vec::new(),
            marks: Vec::new(),
        }
    }

    /// Whether this is the last snapshot of its run.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}
