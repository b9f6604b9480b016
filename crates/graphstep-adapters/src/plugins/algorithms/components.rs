//! Union-find and connectivity helpers.

use graphstep_common::types::{EdgeId, NodeId};
use graphstep_core::NetworkGraph;

/// Disjoint-set forest with union by rank and path compression.
///
/// Only `union` links roots, and it always links two distinct roots, so the
/// forest stays acyclic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
    sets: usize,
}

impl UnionFind {
    /// Creates `n` singleton sets.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
            sets: n,
        }
    }

    /// Returns the representative of `x`'s set, compressing the path.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    /// Merges the sets of `a` and `b`. Returns false if they were already
    /// in the same set.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        self.sets -= 1;
        true
    }

    /// Whether `a` and `b` share a set.
    pub fn connected(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    /// Number of disjoint sets.
    #[must_use]
    pub fn set_count(&self) -> usize {
        self.sets
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Whether there are no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }
}

/// Checks that every node is reachable from node 0 using only `edges`
/// (read as undirected). Unknown edge IDs are ignored.
#[must_use]
pub fn is_connected_with(graph: &NetworkGraph, edges: &[EdgeId]) -> bool {
    let n = graph.node_count();
    if n == 0 {
        return true;
    }
    let mut adj: Vec<Vec<NodeId>> = vec![Vec::new(); n];
    for edge in edges.iter().filter_map(|&id| graph.edge(id)) {
        adj[edge.src.index()].push(edge.dst);
        adj[edge.dst.index()].push(edge.src);
    }
    let mut seen = vec![false; n];
    let mut stack = vec![NodeId::new(0)];
    seen[0] = true;
    let mut reached = 1;
    while let Some(node) = stack.pop() {
        for &next in &adj[node.index()] {
            if !seen[next.index()] {
                seen[next.index()] = true;
                reached += 1;
                stack.push(next);
            }
        }
    }
    reached == n
}
