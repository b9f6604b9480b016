//! Identifier newtypes.
//!
//! Nodes and edges are addressed by dense indices into arenas owned by the
//! graph model. Run-local state (back-pointers, distances, marks) stores these
//! indices rather than references, so snapshots are plain copies.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a node or grid cell.
///
/// For grids this is the row-major cell index `row * cols + col`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Creates a node ID from an arena index.
    #[inline]
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// Returns the arena index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the raw value.
    #[inline]
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

/// Identifier of an edge in a network graph.
///
/// Edge IDs are assigned in insertion order and never reused, so sorting by
/// ID recovers insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(u32);

impl EdgeId {
    /// Creates an edge ID.
    #[inline]
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    #[inline]
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Position in an ordered color palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorIndex(u16);

impl ColorIndex {
    /// Creates a color index.
    #[inline]
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index as u16)
    }

    /// Returns the palette position.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ColorIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_roundtrip() {
        let id = NodeId::new(42);
        assert_eq!(id.index(), 42);
        assert_eq!(id.as_u32(), 42);
        assert_eq!(id.to_string(), "n42");
    }

    #[test]
    fn test_edge_id_order_is_insertion_order() {
        let mut ids = vec![EdgeId::new(3), EdgeId::new(0), EdgeId::new(1)];
        ids.sort();
        assert_eq!(ids, vec![EdgeId::new(0), EdgeId::new(1), EdgeId::new(3)]);
    }
}
