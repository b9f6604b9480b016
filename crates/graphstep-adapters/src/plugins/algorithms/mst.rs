//! Minimum spanning tree.
//!
//! Kruskal's algorithm reads every edge as undirected. Edges are considered
//! in ascending weight order; equal weights keep insertion order.

use std::borrow::Cow;
use std::collections::BTreeSet;

use graphstep_common::types::{EdgeId, NodeId};
use graphstep_core::{Edge, NetworkGraph};
use serde::Serialize;

use super::components::{UnionFind, is_connected_with};
use super::snapshot::{Outcome, StepSnapshot};
use super::traits::{AlgorithmKind, Control, StepAlgorithm};

/// Stepwise Kruskal. Each step examines one edge.
///
/// The run stops once the selected edges span every node, or when the edge
/// list is exhausted; in the latter case the result is a spanning forest.
#[derive(Debug, Clone)]
pub struct Kruskal<'g> {
    graph: Cow<'g, NetworkGraph>,
    order: Vec<Edge>,
    cursor: usize,
    sets: UnionFind,
    selected: Vec<EdgeId>,
    total: u64,
    active_edge: Option<EdgeId>,
    outcome: Option<Outcome>,
}

impl<'g> Kruskal<'g> {
    /// Creates a run positioned before its first step.
    #[must_use]
    pub fn new(graph: Cow<'g, NetworkGraph>) -> Self {
        let mut order = graph.edges().to_vec();
        order.sort_by_key(|e| e.weight);
        Self {
            sets: UnionFind::new(graph.node_count()),
            order,
            cursor: 0,
            selected: Vec::new(),
            total: 0,
            active_edge: None,
            outcome: None,
            graph,
        }
    }

    fn finish(&mut self) -> Control {
        let outcome = Outcome::SpanningTree {
            edges: self.selected.clone(),
            total_weight: self.total,
            spanning: self.sets.set_count() <= 1,
        };
        tracing::trace!(
            examined = self.cursor,
            selected = self.selected.len(),
            total = self.total,
            "kruskal finished"
        );
        self.outcome = Some(outcome.clone());
        Control::Done(outcome)
    }
}

impl StepAlgorithm for Kruskal<'_> {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Kruskal
    }

    fn step(&mut self) -> Control {
        if let Some(outcome) = &self.outcome {
            return Control::Done(outcome.clone());
        }
        let Some(edge) = self.order.get(self.cursor).copied() else {
            self.active_edge = None;
            return self.finish();
        };
        self.cursor += 1;
        self.active_edge = Some(edge.id);
        if self.sets.union(edge.src.index(), edge.dst.index()) {
            self.selected.push(edge.id);
            self.total += u64::from(edge.weight);
        }
        if self.sets.set_count() <= 1 || self.cursor == self.order.len() {
            return self.finish();
        }
        Control::Continue
    }

    fn snapshot(&self) -> StepSnapshot {
        let mut snap = StepSnapshot::new(self.kind());
        let touched: BTreeSet<NodeId> = self
            .selected
            .iter()
            .filter_map(|&id| self.graph.edge(id))
            .flat_map(|e| [e.src, e.dst])
            .collect();
        snap.visited = touched.into_iter().collect();
        snap.selected_edges = self.selected.clone();
        snap.active_edge = self.active_edge;
        snap.cost = Some(self.total);
        snap
    }
}

/// Runs Kruskal to completion.
#[must_use]
pub fn kruskal(graph: &NetworkGraph) -> Outcome {
    Kruskal::new(Cow::Borrowed(graph)).run_to_completion()
}

/// Verdict on a manually selected edge set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionVerdict {
    /// Whether the selection is a spanning tree.
    pub valid: bool,
    /// Why the selection is not a spanning tree.
    pub reason: Option<String>,
    /// Sum of selected edge weights.
    pub user_cost: u64,
    /// Weight of the minimum spanning tree (or forest).
    pub mst_cost: u64,
    /// `mst_cost / user_cost`, only for valid selections. 1.0 is optimal.
    pub efficiency: Option<f64>,
}

/// Checks a user's edge selection against the minimum spanning tree.
///
/// A selection is valid iff it has exactly `N - 1` distinct known edges and
/// connects every node.
#[must_use]
pub fn evaluate_selection(graph: &NetworkGraph, selection: &[EdgeId]) -> SelectionVerdict {
    let unique: BTreeSet<EdgeId> = selection.iter().copied().collect();
    let edges: Vec<EdgeId> = unique.into_iter().collect();
    let user_cost = edges
        .iter()
        .filter_map(|&id| graph.edge(id))
        .map(|e| u64::from(e.weight))
        .sum();
    let mst_cost = match kruskal(graph) {
        Outcome::SpanningTree { total_weight, .. } => total_weight,
        _ => 0,
    };

    let needed = graph.node_count().saturating_sub(1);
    let reason = if let Some(unknown) = edges.iter().find(|&&id| graph.edge(id).is_none()) {
        Some(format!("edge {unknown} does not exist"))
    } else if edges.len() != needed {
        Some(format!(
            "a spanning tree needs exactly {needed} edges, {} selected",
            edges.len()
        ))
    } else if !is_connected_with(graph, &edges) {
        Some("selected edges do not connect every node".to_string())
    } else {
        None
    };

    let valid = reason.is_none();
    let efficiency = (valid && user_cost > 0).then(|| mst_cost as f64 / user_cost as f64);
    SelectionVerdict {
        valid,
        reason,
        user_cost,
        mst_cost,
        efficiency,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphstep_core::graph::generate::random_network;
    use proptest::prelude::*;

    fn triangle() -> (NetworkGraph, [EdgeId; 3]) {
        let mut g = NetworkGraph::new().with_nodes(["A", "B", "C"]);
        let ab = g.add_edge(NodeId::new(0), NodeId::new(1), 1).unwrap();
        let bc = g.add_edge(NodeId::new(1), NodeId::new(2), 2).unwrap();
        let ca = g.add_edge(NodeId::new(2), NodeId::new(0), 3).unwrap();
        (g, [ab, bc, ca])
    }

    #[test]
    fn test_triangle() {
        let (g, [ab, bc, _]) = triangle();
        assert_eq!(
            kruskal(&g),
            Outcome::SpanningTree {
                edges: vec![ab, bc],
                total_weight: 3,
                spanning: true,
            }
        );
    }

    #[test]
    fn test_equal_weights_keep_insertion_order() {
        let mut g = NetworkGraph::new().with_nodes(["A", "B", "C"]);
        let first = g.add_edge(NodeId::new(0), NodeId::new(1), 5).unwrap();
        let second = g.add_edge(NodeId::new(1), NodeId::new(2), 5).unwrap();
        g.add_edge(NodeId::new(0), NodeId::new(2), 5).unwrap();
        let Outcome::SpanningTree { edges, .. } = kruskal(&g) else {
            panic!("expected a tree");
        };
        assert_eq!(edges, vec![first, second]);
    }

    #[test]
    fn test_disconnected_is_forest() {
        let mut g = NetworkGraph::new().with_nodes(["A", "B", "C", "D"]);
        g.add_edge(NodeId::new(0), NodeId::new(1), 1).unwrap();
        g.add_edge(NodeId::new(2), NodeId::new(3), 1).unwrap();
        let outcome = kruskal(&g);
        assert_eq!(
            outcome,
            Outcome::SpanningTree {
                edges: vec![EdgeId::new(0), EdgeId::new(1)],
                total_weight: 2,
                spanning: false,
            }
        );
    }

    #[test]
    fn test_snapshot_tracks_active_edge() {
        let (g, [ab, bc, _]) = triangle();
        let mut run = Kruskal::new(Cow::Borrowed(&g));
        assert_eq!(run.step(), Control::Continue);
        let snap = run.snapshot();
        assert_eq!(snap.active_edge, Some(ab));
        assert_eq!(snap.selected_edges, vec![ab]);
        assert_eq!(snap.cost, Some(1));

        // Second edge completes the tree.
        assert!(matches!(run.step(), Control::Done(_)));
        let snap = run.snapshot();
        assert_eq!(snap.active_edge, Some(bc));
        assert_eq!(snap.visited.len(), 3);
    }

    #[test]
    fn test_evaluate_selection() {
        let (g, [ab, bc, ca]) = triangle();

        let best = evaluate_selection(&g, &[ab, bc]);
        assert!(best.valid);
        assert_eq!(best.efficiency, Some(1.0));

        let worse = evaluate_selection(&g, &[bc, ca]);
        assert!(worse.valid);
        assert_eq!(worse.user_cost, 5);
        assert_eq!(worse.mst_cost, 3);
        assert_eq!(worse.efficiency, Some(0.6));

        let short = evaluate_selection(&g, &[ab]);
        assert!(!short.valid);
        assert!(short.efficiency.is_none());

        let all = evaluate_selection(&g, &[ab, bc, ca]);
        assert!(!all.valid);
    }

    #[test]
    fn test_selection_must_connect() {
        let mut g = NetworkGraph::new().with_nodes(["A", "B", "C", "D"]);
        let ab = g.add_edge(NodeId::new(0), NodeId::new(1), 1).unwrap();
        let ba = g.add_edge(NodeId::new(1), NodeId::new(0), 1).unwrap();
        g.add_edge(NodeId::new(1), NodeId::new(2), 1).unwrap();
        let cd = g.add_edge(NodeId::new(2), NodeId::new(3), 1).unwrap();
        let verdict = evaluate_selection(&g, &[ab, ba, cd]);
        assert!(!verdict.valid);
        assert_eq!(
            verdict.reason.as_deref(),
            Some("selected edges do not connect every node")
        );
    }

    /// Builds a spanning tree by taking edges in the order given by `keys`.
    fn spanning_tree_by_keys(graph: &NetworkGraph, keys: &[u32]) -> Vec<Edge> {
        let mut edges: Vec<(u32, Edge)> = graph
            .edges()
            .iter()
            .enumerate()
            .map(|(i, &e)| (keys[i % keys.len()], e))
            .collect();
        edges.sort_by_key(|&(k, e)| (k, e.id));
        let mut sets = UnionFind::new(graph.node_count());
        edges
            .into_iter()
            .filter(|(_, e)| sets.union(e.src.index(), e.dst.index()))
            .map(|(_, e)| e)
            .collect()
    }

    proptest! {
        #[test]
        fn prop_kruskal_is_minimal(
            nodes in 2usize..12,
            extra in 0usize..16,
            seed in any::<u64>(),
            keys in proptest::collection::vec(any::<u32>(), 1..32),
        ) {
            let graph = random_network(nodes, extra, 9, seed).unwrap();
            let Outcome::SpanningTree { total_weight, spanning, edges } = kruskal(&graph) else {
                return Err(TestCaseError::fail("kruskal must yield a tree"));
            };
            prop_assert!(spanning);
            prop_assert_eq!(edges.len(), nodes - 1);

            let other = spanning_tree_by_keys(&graph, &keys);
            let ids: Vec<EdgeId> = other.iter().map(|e| e.id).collect();
            let verdict = evaluate_selection(&graph, &ids);
            prop_assert!(verdict.valid);
            prop_assert!(total_weight <= verdict.user_cost);
            prop_assert_eq!(verdict.mst_cost, total_weight);
        }
    }
}
