//! Graph coloring.
//!
//! Auto-solve is the greedy first-fit algorithm: nodes in ascending ID order
//! each take the lowest palette color not used by an already-colored
//! neighbor. With a palette of at least `max_degree + 1` colors this always
//! succeeds. Manual mode is checked with [`coloring_status`].

use std::borrow::Cow;
use std::collections::BTreeSet;

use graphstep_common::types::{ColorIndex, NodeId};
use graphstep_common::utils::error::{ConfigurationError, Result};
use graphstep_core::NetworkGraph;
use serde::Serialize;

use super::snapshot::{Outcome, StepSnapshot};
use super::traits::{AlgorithmKind, Control, StepAlgorithm};

/// Nodes that share a color with at least one neighbor, ascending.
///
/// Uncolored nodes never conflict.
#[must_use]
pub fn conflicts(graph: &NetworkGraph, colors: &[Option<ColorIndex>]) -> Vec<NodeId> {
    let mut out = BTreeSet::new();
    for edge in graph.edges() {
        let a = colors.get(edge.src.index()).copied().flatten();
        let b = colors.get(edge.dst.index()).copied().flatten();
        if a.is_some() && a == b {
            out.insert(edge.src);
            out.insert(edge.dst);
        }
    }
    out.into_iter().collect()
}

fn distinct_colors(colors: &[Option<ColorIndex>]) -> usize {
    colors.iter().flatten().collect::<BTreeSet<_>>().len()
}

/// Progress of a manually colored network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColoringStatus {
    /// Nodes sharing a color with a neighbor.
    pub conflicts: Vec<NodeId>,
    /// Number of nodes without a color.
    pub uncolored: usize,
    /// Distinct colors among colored nodes.
    pub colors_used: usize,
    /// All nodes colored and no conflicts.
    pub complete: bool,
}

/// Evaluates the manual colors stored on the graph.
#[must_use]
pub fn coloring_status(graph: &NetworkGraph) -> ColoringStatus {
    let colors = graph.colors();
    let conflicts = conflicts(graph, &colors);
    let uncolored = colors.iter().filter(|c| c.is_none()).count();
    ColoringStatus {
        complete: uncolored == 0 && conflicts.is_empty(),
        colors_used: distinct_colors(&colors),
        uncolored,
        conflicts,
    }
}

/// Stepwise greedy coloring. Each step colors one node.
#[derive(Debug, Clone)]
pub struct GreedyColoring<'g> {
    graph: Cow<'g, NetworkGraph>,
    palette_size: usize,
    neighbors: Vec<Vec<NodeId>>,
    colors: Vec<Option<ColorIndex>>,
    next: usize,
    active: Option<NodeId>,
    outcome: Option<Outcome>,
}

impl<'g> GreedyColoring<'g> {
    /// Creates an auto-solve run starting from an uncolored graph. Manual
    /// colors stored on the graph are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::EmptyPalette`] for a zero palette.
    pub fn new(graph: Cow<'g, NetworkGraph>, palette_size: usize) -> Result<Self> {
        if palette_size == 0 {
            return Err(ConfigurationError::EmptyPalette.into());
        }
        let n = graph.node_count();
        let neighbors = (0..n).map(|i| graph.neighbors(NodeId::new(i))).collect();
        Ok(Self {
            palette_size,
            neighbors,
            colors: vec![None; n],
            next: 0,
            active: None,
            outcome: None,
            graph,
        })
    }

    fn finish(&mut self, outcome: Outcome) -> Control {
        tracing::trace!(colored = self.next, outcome = outcome.label(), "coloring finished");
        self.outcome = Some(outcome.clone());
        Control::Done(outcome)
    }

    fn completed(&mut self) -> Control {
        let colors: Vec<ColorIndex> = self.colors.iter().flatten().copied().collect();
        let colors_used = distinct_colors(&self.colors);
        self.finish(Outcome::Colored {
            colors,
            colors_used,
        })
    }
}

impl StepAlgorithm for GreedyColoring<'_> {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::GreedyColoring
    }

    fn step(&mut self) -> Control {
        if let Some(outcome) = &self.outcome {
            return Control::Done(outcome.clone());
        }
        if self.next >= self.colors.len() {
            return self.completed();
        }
        let node = NodeId::new(self.next);
        self.active = Some(node);

        let used: BTreeSet<ColorIndex> = self.neighbors[node.index()]
            .iter()
            .filter(|n| n.index() < node.index())
            .filter_map(|n| self.colors[n.index()])
            .collect();
        let Some(color) = (0..self.palette_size)
            .map(ColorIndex::new)
            .find(|c| !used.contains(c))
        else {
            return self.finish(Outcome::NoColorAvailable { node });
        };
        self.colors[node.index()] = Some(color);
        self.next += 1;

        if self.next == self.colors.len() {
            return self.completed();
        }
        Control::Continue
    }

    fn snapshot(&self) -> StepSnapshot {
        let mut snap = StepSnapshot::new(self.kind());
        snap.visited = (0..self.next).map(NodeId::new).collect();
        snap.frontier = (self.next..self.colors.len()).map(NodeId::new).collect();
        snap.active = self.active;
        snap.colors = self.colors.clone();
        snap.conflicts = conflicts(&self.graph, &self.colors);
        snap.cost = Some(distinct_colors(&self.colors) as u64);
        snap
    }
}

/// Runs greedy coloring to completion.
///
/// # Errors
///
/// Returns [`ConfigurationError::EmptyPalette`] for a zero palette.
pub fn greedy_coloring(graph: &NetworkGraph, palette_size: usize) -> Result<Outcome> {
    Ok(GreedyColoring::new(Cow::Borrowed(graph), palette_size)?.run_to_completion())
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphstep_core::graph::generate::random_network;
    use proptest::prelude::*;

    fn star() -> NetworkGraph {
        let mut g = NetworkGraph::new().with_nodes(["Hub", "A", "B", "C", "D"]);
        for leaf in 1..5 {
            g.add_edge(NodeId::new(0), NodeId::new(leaf), 1).unwrap();
        }
        g
    }

    #[test]
    fn test_star_uses_two_colors() {
        let outcome = greedy_coloring(&star(), 2).unwrap();
        let Outcome::Colored {
            colors,
            colors_used,
        } = outcome
        else {
            panic!("expected a coloring");
        };
        assert_eq!(colors_used, 2);
        assert_eq!(colors[0], ColorIndex::new(0));
        assert!(colors[1..].iter().all(|&c| c == ColorIndex::new(1)));
    }

    #[test]
    fn test_palette_too_small() {
        let mut triangle = NetworkGraph::new().with_nodes(["A", "B", "C"]);
        triangle.add_edge(NodeId::new(0), NodeId::new(1), 1).unwrap();
        triangle.add_edge(NodeId::new(1), NodeId::new(2), 1).unwrap();
        triangle.add_edge(NodeId::new(2), NodeId::new(0), 1).unwrap();
        assert_eq!(
            greedy_coloring(&triangle, 2).unwrap(),
            Outcome::NoColorAvailable {
                node: NodeId::new(2)
            }
        );
    }

    #[test]
    fn test_empty_palette_rejected() {
        assert!(greedy_coloring(&star(), 0).is_err());
    }

    #[test]
    fn test_empty_graph_is_trivially_colored() {
        let outcome = greedy_coloring(&NetworkGraph::new(), 3).unwrap();
        assert_eq!(
            outcome,
            Outcome::Colored {
                colors: vec![],
                colors_used: 0
            }
        );
    }

    #[test]
    fn test_one_node_per_step() {
        let graph = star();
        let mut run = GreedyColoring::new(Cow::Borrowed(&graph), 2).unwrap();
        assert_eq!(run.step(), Control::Continue);
        let snap = run.snapshot();
        assert_eq!(snap.colors[0], Some(ColorIndex::new(0)));
        assert!(snap.colors[1..].iter().all(Option::is_none));
        assert_eq!(snap.frontier.len(), 4);
    }

    #[test]
    fn test_manual_status() {
        let mut graph = star().with_palette_size(2);
        let status = coloring_status(&graph);
        assert_eq!(status.uncolored, 5);
        assert!(!status.complete);

        for node in 0..5 {
            graph.set_color(NodeId::new(node), Some(ColorIndex::new(1))).unwrap();
        }
        let status = coloring_status(&graph);
        assert_eq!(status.conflicts.len(), 5);
        assert!(!status.complete);

        graph.set_color(NodeId::new(0), Some(ColorIndex::new(0))).unwrap();
        let status = coloring_status(&graph);
        assert!(status.conflicts.is_empty());
        assert!(status.complete);
        assert_eq!(status.colors_used, 2);
    }

    proptest! {
        #[test]
        fn prop_enough_colors_never_conflict(
            nodes in 2usize..14,
            extra in 0usize..20,
            seed in any::<u64>(),
        ) {
            let graph = random_network(nodes, extra, 5, seed).unwrap();
            let palette = graph.max_degree() + 1;
            let outcome = greedy_coloring(&graph, palette).unwrap();
            let Outcome::Colored { colors, colors_used } = outcome else {
                return Err(TestCaseError::fail("greedy coloring ran out of colors"));
            };
            let colors: Vec<_> = colors.into_iter().map(Some).collect();
            prop_assert!(conflicts(&graph, &colors).is_empty());
            prop_assert!(colors_used <= palette);
        }
    }
}
