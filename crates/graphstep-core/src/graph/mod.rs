//! Graph models.
//!
//! - [`grid`] - Rectangular cell grids (maze and shortest-path games)
//! - [`network`] - Labeled nodes with weighted edges (coloring, MST, cycles)
//! - [`generate`] - Seeded puzzle generators
//!
//! [`GraphModel`] wraps either shape and applies [`EditOp`]s. Every edit is
//! validated before anything is written, so a rejected edit leaves the model
//! untouched.

pub mod generate;
pub mod grid;
pub mod network;

use graphstep_common::types::{ColorIndex, Coord, EdgeId, NodeId, Weight};
use graphstep_common::utils::error::{EditError, Result};
use serde::Serialize;

use self::grid::GridGraph;
use self::network::{Edge, NetworkGraph};

/// The graph a game is played on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GraphModel {
    /// A cell grid.
    Grid(GridGraph),
    /// A node-and-edge network.
    Network(NetworkGraph),
}

/// A synchronous mutation of a [`GraphModel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    /// Toggle a wall on a grid cell.
    ToggleWall(Coord),
    /// Set the cost of entering a grid cell.
    SetWeight {
        /// Target cell.
        cell: Coord,
        /// New positive weight.
        weight: Weight,
    },
    /// Move the grid start marker.
    SetStart(Coord),
    /// Move the grid end marker.
    SetEnd(Coord),
    /// Append a network node.
    AddNode {
        /// Display label.
        label: String,
    },
    /// Append a network edge.
    AddEdge {
        /// Source endpoint.
        src: NodeId,
        /// Destination endpoint.
        dst: NodeId,
        /// Positive weight.
        weight: Weight,
    },
    /// Remove a network edge.
    RemoveEdge(EdgeId),
    /// Change a network edge's weight.
    SetEdgeWeight {
        /// Target edge.
        edge: EdgeId,
        /// New positive weight.
        weight: Weight,
    },
    /// Set or clear a node's color directly.
    SetNodeColor {
        /// Target node.
        node: NodeId,
        /// New color, `None` to clear.
        color: Option<ColorIndex>,
    },
    /// Manual-mode palette click: assign, or clear when already that color.
    AssignManualColor {
        /// Target node.
        node: NodeId,
        /// Palette color.
        color: ColorIndex,
    },
    /// Clear all manual colors.
    ClearColors,
    /// Add or remove an edge from the manual spanning-tree selection.
    ToggleEdgeSelection(EdgeId),
}

impl EditOp {
    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ToggleWall(_) => "toggle_wall",
            Self::SetWeight { .. } => "set_weight",
            Self::SetStart(_) => "set_start",
            Self::SetEnd(_) => "set_end",
            Self::AddNode { .. } => "add_node",
            Self::AddEdge { .. } => "add_edge",
            Self::RemoveEdge(_) => "remove_edge",
            Self::SetEdgeWeight { .. } => "set_edge_weight",
            Self::SetNodeColor { .. } => "set_node_color",
            Self::AssignManualColor { .. } => "assign_manual_color",
            Self::ClearColors => "clear_colors",
            Self::ToggleEdgeSelection(_) => "toggle_edge_selection",
        }
    }
}

/// What an applied edit did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditEffect {
    /// The edit was applied with nothing further to report.
    Applied,
    /// A wall was toggled; holds the new blocked state.
    Wall(bool),
    /// A node was created.
    NodeAdded(NodeId),
    /// An edge was created.
    EdgeAdded(EdgeId),
    /// An edge was removed.
    EdgeRemoved(Edge),
    /// A node's color changed; holds the new color.
    Colored(Option<ColorIndex>),
    /// An edge selection toggled; holds whether it is now selected.
    Selected(bool),
}

impl GraphModel {
    /// Short name of the shape ("grid" or "network").
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Grid(_) => "grid",
            Self::Network(_) => "network",
        }
    }

    /// Returns the grid, if this is one.
    #[must_use]
    pub fn as_grid(&self) -> Option<&GridGraph> {
        match self {
            Self::Grid(grid) => Some(grid),
            Self::Network(_) => None,
        }
    }

    /// Returns the network, if this is one.
    #[must_use]
    pub fn as_network(&self) -> Option<&NetworkGraph> {
        match self {
            Self::Network(network) => Some(network),
            Self::Grid(_) => None,
        }
    }

    /// Number of nodes or cells.
    #[must_use]
    pub fn node_count(&self) -> usize {
        match self {
            Self::Grid(grid) => grid.len(),
            Self::Network(network) => network.node_count(),
        }
    }

    /// Applies an edit.
    ///
    /// # Errors
    ///
    /// Returns [`EditError`] when the edit targets the other shape or breaks
    /// a structural invariant. The model is unchanged on error.
    pub fn apply(&mut self, op: EditOp) -> Result<EditEffect> {
        match (self, op) {
            (Self::Grid(grid), EditOp::ToggleWall(cell)) => grid.toggle_wall(cell).map(EditEffect::Wall),
            (Self::Grid(grid), EditOp::SetWeight { cell, weight }) => {
                grid.set_weight(cell, weight)?;
                Ok(EditEffect::Applied)
            }
            (Self::Grid(grid), EditOp::SetStart(cell)) => {
                grid.set_start(cell)?;
                Ok(EditEffect::Applied)
            }
            (Self::Grid(grid), EditOp::SetEnd(cell)) => {
                grid.set_end(cell)?;
                Ok(EditEffect::Applied)
            }
            (Self::Network(net), EditOp::AddNode { label }) => {
                Ok(EditEffect::NodeAdded(net.add_node(label)))
            }
            (Self::Network(net), EditOp::AddEdge { src, dst, weight }) => {
                net.add_edge(src, dst, weight).map(EditEffect::EdgeAdded)
            }
            (Self::Network(net), EditOp::RemoveEdge(edge)) => {
                net.remove_edge(edge).map(EditEffect::EdgeRemoved)
            }
            (Self::Network(net), EditOp::SetEdgeWeight { edge, weight }) => {
                net.set_edge_weight(edge, weight)?;
                Ok(EditEffect::Applied)
            }
            (Self::Network(net), EditOp::SetNodeColor { node, color }) => {
                net.set_color(node, color)?;
                Ok(EditEffect::Colored(color))
            }
            (Self::Network(net), EditOp::AssignManualColor { node, color }) => {
                net.assign_color(node, color).map(EditEffect::Colored)
            }
            (Self::Network(net), EditOp::ClearColors) => {
                net.clear_colors();
                Ok(EditEffect::Applied)
            }
            (Self::Network(net), EditOp::ToggleEdgeSelection(edge)) => {
                net.toggle_selection(edge).map(EditEffect::Selected)
            }
            (Self::Grid(_), _) => Err(EditError::WrongGraphKind("network").into()),
            (Self::Network(_), _) => Err(EditError::WrongGraphKind("grid").into()),
        }
    }
}

impl From<GridGraph> for GraphModel {
    fn from(grid: GridGraph) -> Self {
        Self::Grid(grid)
    }
}

impl From<NetworkGraph> for GraphModel {
    fn from(network: NetworkGraph) -> Self {
        Self::Network(network)
    }
}
