//! Core algorithm traits.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::snapshot::{Outcome, RunStatus, StepSnapshot};

/// Result of advancing an algorithm by one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    /// More steps remain.
    Continue,
    /// The algorithm reached a terminal outcome.
    Done(Outcome),
}

/// The algorithms the engine can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmKind {
    /// Breadth-first search on a grid.
    Bfs,
    /// Depth-first search on a grid.
    Dfs,
    /// Dijkstra's shortest path on a weighted grid.
    Dijkstra,
    /// Greedy graph coloring on a network.
    GreedyColoring,
    /// Kruskal's minimum spanning tree on a network.
    Kruskal,
    /// Tri-color DFS cycle detection on a network.
    CycleDetection,
}

impl AlgorithmKind {
    /// All kinds, in display order.
    pub const ALL: [AlgorithmKind; 6] = [
        Self::Bfs,
        Self::Dfs,
        Self::Dijkstra,
        Self::GreedyColoring,
        Self::Kruskal,
        Self::CycleDetection,
    ];

    /// Stable lowercase name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Bfs => "bfs",
            Self::Dfs => "dfs",
            Self::Dijkstra => "dijkstra",
            Self::GreedyColoring => "greedy_coloring",
            Self::Kruskal => "kruskal",
            Self::CycleDetection => "cycle_detection",
        }
    }

    /// Graph shape the algorithm runs on.
    #[must_use]
    pub fn graph_kind(self) -> &'static str {
        match self {
            Self::Bfs | Self::Dfs | Self::Dijkstra => "grid",
            Self::GreedyColoring | Self::Kruskal | Self::CycleDetection => "network",
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlgorithmKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| format!("unknown algorithm: {s}"))
    }
}

/// A graph algorithm that advances one observable step at a time.
///
/// Implementations never mutate the graph they were built from. Once `step`
/// has returned [`Control::Done`], further calls return the same outcome.
pub trait StepAlgorithm {
    /// Which algorithm this is.
    fn kind(&self) -> AlgorithmKind;

    /// Performs one unit of work.
    fn step(&mut self) -> Control;

    /// Captures the current run-local state. The returned snapshot has
    /// status [`RunStatus::Running`] and step 0; drivers fill both in.
    fn snapshot(&self) -> StepSnapshot;

    /// Steps until done and returns the outcome.
    fn run_to_completion(&mut self) -> Outcome {
        loop {
            if let Control::Done(outcome) = self.step() {
                return outcome;
            }
        }
    }
}

/// Runs an algorithm to completion and returns every snapshot, the last of
/// which carries the terminal status.
pub fn collect_trace(algorithm: &mut dyn StepAlgorithm) -> Vec<StepSnapshot> {
    let mut trace = Vec::new();
    for step in 1.. {
        let control = algorithm.step();
        let mut snapshot = algorithm.snapshot();
        snapshot.step = step;
        match control {
            Control::Continue => trace.push(snapshot),
            Control::Done(outcome) => {
                snapshot.status = RunStatus::Finished(outcome);
                trace.push(snapshot);
                break;
            }
        }
    }
    trace
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_through_name() {
        for kind in AlgorithmKind::ALL {
            assert_eq!(kind.name().parse::<AlgorithmKind>(), Ok(kind));
        }
        assert!("prim".parse::<AlgorithmKind>().is_err());
    }

    #[test]
    fn test_graph_kind() {
        assert_eq!(AlgorithmKind::Dijkstra.graph_kind(), "grid");
        assert_eq!(AlgorithmKind::Kruskal.graph_kind(), "network");
    }
}
