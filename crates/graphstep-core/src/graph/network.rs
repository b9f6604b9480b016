//! Node-and-edge graph used by the coloring, spanning-tree and cycle games.
//!
//! Edges keep insertion order. That order is the stable tie-break for
//! Kruskal and the adjacency order for depth-first cycle detection.

use std::collections::BTreeSet;

use graphstep_common::types::{ColorIndex, EdgeId, NodeId, Weight};
use graphstep_common::utils::error::{EditError, Result};
use serde::Serialize;
use smallvec::SmallVec;

/// Default number of palette colors available for manual coloring.
pub const DEFAULT_PALETTE_SIZE: usize = 4;

/// Per-node adjacency: `(edge, neighbor)` pairs in edge insertion order.
pub type Adjacency = Vec<SmallVec<[(EdgeId, NodeId); 4]>>;

/// A node of a network graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkNode {
    /// Display label.
    pub label: String,
    /// Color chosen in manual coloring mode.
    pub color: Option<ColorIndex>,
}

/// A weighted edge. Interpreted as `src -> dst` in directed mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Edge {
    /// Edge identifier.
    pub id: EdgeId,
    /// Source endpoint.
    pub src: NodeId,
    /// Destination endpoint.
    pub dst: NodeId,
    /// Positive weight.
    pub weight: Weight,
}

impl Edge {
    /// Returns the endpoint opposite `node`.
    #[must_use]
    pub fn other(&self, node: NodeId) -> NodeId {
        if self.src == node { self.dst } else { self.src }
    }
}

/// A graph of labeled nodes and weighted edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkGraph {
    nodes: Vec<NetworkNode>,
    edges: Vec<Edge>,
    next_edge_id: u32,
    directed: bool,
    palette_size: usize,
    selection: BTreeSet<EdgeId>,
}

impl NetworkGraph {
    /// Creates an empty undirected graph with the default palette.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            next_edge_id: 0,
            directed: false,
            palette_size: DEFAULT_PALETTE_SIZE,
            selection: BTreeSet::new(),
        }
    }

    /// Creates an empty directed graph.
    #[must_use]
    pub fn directed() -> Self {
        Self {
            directed: true,
            ..Self::new()
        }
    }

    /// Sets the manual-coloring palette size.
    #[must_use]
    pub fn with_palette_size(mut self, palette_size: usize) -> Self {
        self.palette_size = palette_size;
        self
    }

    /// Creates nodes labeled by `labels`, in order.
    #[must_use]
    pub fn with_nodes<'a>(mut self, labels: impl IntoIterator<Item = &'a str>) -> Self {
        for label in labels {
            self.add_node(label);
        }
        self
    }

    /// Whether edges are read as `src -> dst` by default.
    #[must_use]
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Number of manual-coloring palette entries.
    #[must_use]
    pub fn palette_size(&self) -> usize {
        self.palette_size
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All nodes in ID order.
    #[must_use]
    pub fn nodes(&self) -> &[NetworkNode] {
        &self.nodes
    }

    /// All edges in insertion order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Looks up an edge by ID.
    #[must_use]
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edge_position(id).map(|pos| &self.edges[pos])
    }

    /// Returns a node's label.
    #[must_use]
    pub fn label(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node.index()).map(|n| n.label.as_str())
    }

    /// Finds a node by label.
    #[must_use]
    pub fn find_node(&self, label: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.label == label)
            .map(NodeId::new)
    }

    /// Returns true if `node` exists.
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.nodes.len()
    }

    /// Builds adjacency lists.
    ///
    /// Directed adjacency lists each edge under its source only; undirected
    /// adjacency lists it under both endpoints.
    #[must_use]
    pub fn adjacency(&self, directed: bool) -> Adjacency {
        let mut adj: Adjacency = vec![SmallVec::new(); self.nodes.len()];
        for edge in &self.edges {
            adj[edge.src.index()].push((edge.id, edge.dst));
            if !directed {
                adj[edge.dst.index()].push((edge.id, edge.src));
            }
        }
        adj
    }

    /// Distinct undirected neighbors of a node, ascending.
    #[must_use]
    pub fn neighbors(&self, node: NodeId) -> Vec<NodeId> {
        let set: BTreeSet<NodeId> = self
            .edges
            .iter()
            .filter(|e| e.src == node || e.dst == node)
            .map(|e| e.other(node))
            .collect();
        set.into_iter().collect()
    }

    /// Number of distinct undirected neighbors.
    #[must_use]
    pub fn degree(&self, node: NodeId) -> usize {
        self.neighbors(node).len()
    }

    /// Largest degree over all nodes, 0 for an empty graph.
    #[must_use]
    pub fn max_degree(&self) -> usize {
        (0..self.nodes.len())
            .map(|i| self.degree(NodeId::new(i)))
            .max()
            .unwrap_or(0)
    }

    /// Manual colors of all nodes in ID order.
    #[must_use]
    pub fn colors(&self) -> Vec<Option<ColorIndex>> {
        self.nodes.iter().map(|n| n.color).collect()
    }

    /// Edges currently selected in manual spanning-tree mode.
    #[must_use]
    pub fn selection(&self) -> Vec<EdgeId> {
        self.selection.iter().copied().collect()
    }

    // === Edit Operations ===

    /// Appends a node and returns its ID.
    pub fn add_node(&mut self, label: impl Into<String>) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(NetworkNode {
            label: label.into(),
            color: None,
        });
        id
    }

    /// Appends an edge and returns its ID.
    ///
    /// # Errors
    ///
    /// Rejects unknown endpoints, self-loops, zero weights, and a second
    /// edge over the same ordered pair.
    pub fn add_edge(&mut self, src: NodeId, dst: NodeId, weight: Weight) -> Result<EdgeId> {
        self.check_node(src)?;
        self.check_node(dst)?;
        if src == dst {
            return Err(EditError::SelfLoop(src).into());
        }
        if weight == 0 {
            return Err(EditError::NonPositiveWeight(weight).into());
        }
        if self.edges.iter().any(|e| e.src == src && e.dst == dst) {
            return Err(EditError::DuplicateEdge { src, dst }.into());
        }
        let id = EdgeId::new(self.next_edge_id);
        self.next_edge_id += 1;
        self.edges.push(Edge {
            id,
            src,
            dst,
            weight,
        });
        Ok(id)
    }

    /// Removes an edge, dropping it from the manual selection too.
    ///
    /// # Errors
    ///
    /// Rejects unknown edge IDs.
    pub fn remove_edge(&mut self, id: EdgeId) -> Result<Edge> {
        let pos = self
            .edge_position(id)
            .ok_or(EditError::UnknownEdge(id))?;
        self.selection.remove(&id);
        Ok(self.edges.remove(pos))
    }

    /// Changes an edge's weight.
    ///
    /// # Errors
    ///
    /// Rejects unknown edge IDs and zero weights.
    pub fn set_edge_weight(&mut self, id: EdgeId, weight: Weight) -> Result<()> {
        if weight == 0 {
            return Err(EditError::NonPositiveWeight(weight).into());
        }
        let pos = self
            .edge_position(id)
            .ok_or(EditError::UnknownEdge(id))?;
        self.edges[pos].weight = weight;
        Ok(())
    }

    /// Sets or clears a node's manual color.
    ///
    /// # Errors
    ///
    /// Rejects unknown nodes and colors outside the palette.
    pub fn set_color(&mut self, node: NodeId, color: Option<ColorIndex>) -> Result<()> {
        self.check_node(node)?;
        if let Some(color) = color {
            self.check_color(color)?;
        }
        self.nodes[node.index()].color = color;
        Ok(())
    }

    /// Applies a palette click in manual mode: assigns `color`, or clears
    /// the node if it already has that color. Returns the node's new color.
    ///
    /// # Errors
    ///
    /// Rejects unknown nodes and colors outside the palette.
    pub fn assign_color(&mut self, node: NodeId, color: ColorIndex) -> Result<Option<ColorIndex>> {
        self.check_node(node)?;
        self.check_color(color)?;
        let slot = &mut self.nodes[node.index()].color;
        *slot = if *slot == Some(color) { None } else { Some(color) };
        Ok(*slot)
    }

    /// Clears every manual color.
    pub fn clear_colors(&mut self) {
        for node in &mut self.nodes {
            node.color = None;
        }
    }

    /// Adds or removes an edge from the manual selection. Returns whether
    /// the edge is selected afterwards.
    ///
    /// # Errors
    ///
    /// Rejects unknown edge IDs.
    pub fn toggle_selection(&mut self, id: EdgeId) -> Result<bool> {
        if self.edge_position(id).is_none() {
            return Err(EditError::UnknownEdge(id).into());
        }
        if self.selection.remove(&id) {
            Ok(false)
        } else {
            self.selection.insert(id);
            Ok(true)
        }
    }

    fn edge_position(&self, id: EdgeId) -> Option<usize> {
        // Edges are appended with increasing IDs, so the vector stays sorted.
        self.edges.binary_search_by_key(&id, |e| e.id).ok()
    }

    fn check_node(&self, node: NodeId) -> Result<()> {
        if self.contains(node) {
            Ok(())
        } else {
            Err(EditError::UnknownNode(node).into())
        }
    }

    fn check_color(&self, color: ColorIndex) -> Result<()> {
        if color.index() < self.palette_size {
            Ok(())
        } else {
            Err(EditError::ColorOutOfPalette {
                color,
                palette_size: self.palette_size,
            }
            .into())
        }
    }
}

impl Default for NetworkGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> NetworkGraph {
        let mut g = NetworkGraph::new().with_nodes(["A", "B", "C"]);
        g.add_edge(NodeId::new(0), NodeId::new(1), 1).unwrap();
        g.add_edge(NodeId::new(1), NodeId::new(2), 2).unwrap();
        g.add_edge(NodeId::new(2), NodeId::new(0), 3).unwrap();
        g
    }

    #[test]
    fn test_add_edge_validation() {
        let mut g = triangle();
        let a = NodeId::new(0);
        let b = NodeId::new(1);
        assert_eq!(g.add_edge(a, a, 1), Err(EditError::SelfLoop(a).into()));
        assert_eq!(
            g.add_edge(a, b, 5),
            Err(EditError::DuplicateEdge { src: a, dst: b }.into())
        );
        assert_eq!(
            g.add_edge(a, NodeId::new(9), 1),
            Err(EditError::UnknownNode(NodeId::new(9)).into())
        );
        assert_eq!(g.add_edge(b, a, 0), Err(EditError::NonPositiveWeight(0).into()));
        // Reverse orientation is a distinct edge.
        assert!(g.add_edge(b, a, 4).is_ok());
        assert_eq!(g.edge_count(), 4);
    }

    #[test]
    fn test_adjacency_directed_and_undirected() {
        let g = triangle();
        let directed = g.adjacency(true);
        assert_eq!(directed[0].as_slice(), &[(EdgeId::new(0), NodeId::new(1))]);
        let undirected = g.adjacency(false);
        assert_eq!(
            undirected[0].as_slice(),
            &[
                (EdgeId::new(0), NodeId::new(1)),
                (EdgeId::new(2), NodeId::new(2))
            ]
        );
    }

    #[test]
    fn test_remove_edge_keeps_ids_stable() {
        let mut g = triangle();
        g.toggle_selection(EdgeId::new(1)).unwrap();
        let removed = g.remove_edge(EdgeId::new(1)).unwrap();
        assert_eq!(removed.weight, 2);
        assert!(g.selection().is_empty());
        assert!(g.edge(EdgeId::new(2)).is_some());
        let next = g.add_edge(NodeId::new(1), NodeId::new(2), 9).unwrap();
        assert_eq!(next, EdgeId::new(3));
        assert!(g.remove_edge(EdgeId::new(1)).is_err());
    }

    #[test]
    fn test_degree() {
        let g = triangle();
        assert_eq!(g.degree(NodeId::new(0)), 2);
        assert_eq!(g.max_degree(), 2);
        assert_eq!(g.neighbors(NodeId::new(1)), vec![NodeId::new(0), NodeId::new(2)]);
    }

    #[test]
    fn test_color_edits() {
        let mut g = triangle().with_palette_size(2);
        let a = NodeId::new(0);
        assert_eq!(g.assign_color(a, ColorIndex::new(1)), Ok(Some(ColorIndex::new(1))));
        assert_eq!(g.assign_color(a, ColorIndex::new(1)), Ok(None));
        assert!(g.set_color(a, Some(ColorIndex::new(2))).is_err());
        g.set_color(a, Some(ColorIndex::new(0))).unwrap();
        assert_eq!(g.colors()[0], Some(ColorIndex::new(0)));
        g.clear_colors();
        assert!(g.colors().iter().all(Option::is_none));
    }

    #[test]
    fn test_find_node() {
        let g = triangle();
        assert_eq!(g.find_node("C"), Some(NodeId::new(2)));
        assert_eq!(g.find_node("Z"), None);
        assert_eq!(g.label(NodeId::new(1)), Some("B"));
    }
}
