//! Tri-color DFS cycle detection.
//!
//! Roots are taken in ascending node ID order so disconnected graphs are
//! fully covered. Edges are explored in insertion order. The search stops
//! at the first cycle.
//!
//! In directed mode only an edge into an in-progress node closes a cycle.
//! In undirected mode any edge into an already visited node closes a cycle,
//! except the exact edge used to enter the current node. A single edge
//! `A - B` is therefore never a cycle, while two parallel edges are.

use std::borrow::Cow;

use graphstep_common::types::{EdgeId, NodeId};
use graphstep_core::{Adjacency, NetworkGraph};

use super::snapshot::{Mark, Outcome, StepSnapshot};
use super::traits::{AlgorithmKind, Control, StepAlgorithm};

/// Stepwise cycle detector. Each step enters a node, examines one edge, or
/// finishes a node.
#[derive(Debug, Clone)]
pub struct CycleDetector<'g> {
    graph: Cow<'g, NetworkGraph>,
    directed: bool,
    adj: Adjacency,
    marks: Vec<Mark>,
    /// Tree edge used to enter each node.
    via: Vec<Option<(EdgeId, NodeId)>>,
    /// DFS stack of `(node, next adjacency index)`.
    stack: Vec<(NodeId, usize)>,
    next_root: usize,
    order: Vec<NodeId>,
    active: Option<NodeId>,
    active_edge: Option<EdgeId>,
    cycle: Vec<EdgeId>,
    outcome: Option<Outcome>,
}

impl<'g> CycleDetector<'g> {
    /// Creates a detector reading edges as directed or undirected.
    #[must_use]
    pub fn new(graph: Cow<'g, NetworkGraph>, directed: bool) -> Self {
        let n = graph.node_count();
        Self {
            adj: graph.adjacency(directed),
            directed,
            marks: vec![Mark::Unvisited; n],
            via: vec![None; n],
            stack: Vec::new(),
            next_root: 0,
            order: Vec::new(),
            active: None,
            active_edge: None,
            cycle: Vec::new(),
            outcome: None,
            graph,
        }
    }

    /// Whether edges are read as `src -> dst`.
    #[must_use]
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    fn enter(&mut self, node: NodeId, via: Option<(EdgeId, NodeId)>) {
        self.marks[node.index()] = Mark::InProgress;
        self.via[node.index()] = via;
        self.stack.push((node, 0));
        self.order.push(node);
        self.active = Some(node);
    }

    /// Closing edge first, then tree edges from `from` back up to `to`.
    fn cycle_edges(&self, closing: EdgeId, from: NodeId, to: NodeId) -> Vec<EdgeId> {
        let mut edges = vec![closing];
        let mut cur = from;
        while cur != to {
            let Some((edge, parent)) = self.via[cur.index()] else {
                break;
            };
            edges.push(edge);
            cur = parent;
        }
        edges
    }

    fn finish(&mut self, outcome: Outcome) -> Control {
        tracing::trace!(
            directed = self.directed,
            visited = self.order.len(),
            outcome = outcome.label(),
            "cycle detection finished"
        );
        self.outcome = Some(outcome.clone());
        Control::Done(outcome)
    }
}

impl StepAlgorithm for CycleDetector<'_> {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::CycleDetection
    }

    fn step(&mut self) -> Control {
        if let Some(outcome) = &self.outcome {
            return Control::Done(outcome.clone());
        }
        self.active_edge = None;

        let Some(&(node, cursor)) = self.stack.last() else {
            while self.next_root < self.marks.len() && self.marks[self.next_root] != Mark::Unvisited {
                self.next_root += 1;
            }
            if self.next_root == self.marks.len() {
                self.active = None;
                return self.finish(Outcome::Acyclic);
            }
            self.enter(NodeId::new(self.next_root), None);
            return Control::Continue;
        };

        self.active = Some(node);
        let Some(&(edge, next)) = self.adj[node.index()].get(cursor) else {
            self.marks[node.index()] = Mark::Done;
            self.stack.pop();
            return Control::Continue;
        };
        if let Some(top) = self.stack.last_mut() {
            top.1 += 1;
        }
        self.active_edge = Some(edge);

        if !self.directed && self.via[node.index()].is_some_and(|(e, _)| e == edge) {
            return Control::Continue;
        }
        let closes = match self.marks[next.index()] {
            Mark::Unvisited => {
                self.enter(next, Some((edge, node)));
                false
            }
            Mark::InProgress => true,
            Mark::Done => !self.directed,
        };
        if closes {
            self.cycle = self.cycle_edges(edge, node, next);
            return self.finish(Outcome::CycleFound {
                edges: self.cycle.clone(),
            });
        }
        Control::Continue
    }

    fn snapshot(&self) -> StepSnapshot {
        let mut snap = StepSnapshot::new(self.kind());
        snap.visited = self.order.clone();
        snap.frontier = self.stack.iter().rev().map(|&(n, _)| n).collect();
        snap.active = self.active;
        snap.active_edge = self.active_edge;
        snap.marks = self.marks.clone();
        snap.cycle_edges = self.cycle.clone();
        snap.selected_edges = self
            .order
            .iter()
            .filter_map(|n| self.via[n.index()].map(|(e, _)| e))
            .filter(|e| self.graph.edge(*e).is_some())
            .collect();
        snap
    }
}

/// Runs cycle detection to completion.
#[must_use]
pub fn detect_cycle(graph: &NetworkGraph, directed: bool) -> Outcome {
    CycleDetector::new(Cow::Borrowed(graph), directed).run_to_completion()
}
