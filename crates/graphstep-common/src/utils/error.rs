//! Error types for Graphstep.
//!
//! Only genuine faults are errors. Normal terminal outcomes of a run (no
//! path, unreachable, cycle found, no color available, cancelled) are values
//! reported through run status, never through [`Error`].

use thiserror::Error;

use crate::types::{ColorIndex, Coord, EdgeId, NodeId, Weight};

/// Result type alias for Graphstep operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The engine or graph is not set up for the requested operation.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// An edit was rejected; the graph is unchanged.
    #[error("invalid edit: {0}")]
    InvalidEdit(#[from] EditError),
}

/// Problems with the graph or parameters handed to a run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// `run` was called before `configure`.
    #[error("no graph configured")]
    NoGraph,

    /// The algorithm needs a different graph shape.
    #[error("{algorithm} requires a {expected} graph")]
    WrongGraphKind {
        /// Algorithm name.
        algorithm: &'static str,
        /// Required shape ("grid" or "network").
        expected: &'static str,
    },

    /// Grid has no usable start cell.
    #[error("missing start cell")]
    MissingStart,

    /// Grid has no usable end cell.
    #[error("missing end cell")]
    MissingEnd,

    /// Grid or network is too small to be meaningful.
    #[error("degenerate graph: {0}")]
    DegenerateGraph(String),

    /// Coloring requested with zero colors.
    #[error("palette must contain at least one color")]
    EmptyPalette,
}

/// Reasons an edit operation is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// Edits are refused while a run is in flight.
    #[error("a run is active")]
    RunActive,

    /// The operation targets the other graph shape.
    #[error("operation requires a {0} graph")]
    WrongGraphKind(&'static str),

    /// Coordinate outside the grid.
    #[error("cell {0} is outside the grid")]
    OutOfBounds(Coord),

    /// Walls cannot cover the start or end marker.
    #[error("cell {0} holds the start or end marker")]
    MarkerCell(Coord),

    /// Border cells of a bordered grid stay blocked.
    #[error("cell {0} is a border wall")]
    BorderCell(Coord),

    /// Markers cannot be placed on walls.
    #[error("cell {0} is blocked")]
    BlockedCell(Coord),

    /// Weights must be positive.
    #[error("weight must be positive, got {0}")]
    NonPositiveWeight(Weight),

    /// Node index not present.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// Edge ID not present.
    #[error("unknown edge {0}")]
    UnknownEdge(EdgeId),

    /// Self-loops are not allowed.
    #[error("edge would connect {0} to itself")]
    SelfLoop(NodeId),

    /// The same ordered pair is already connected.
    #[error("edge {src} -> {dst} already exists")]
    DuplicateEdge {
        /// Source node.
        src: NodeId,
        /// Destination node.
        dst: NodeId,
    },

    /// Color index beyond the palette.
    #[error("color {color} is outside a palette of {palette_size}")]
    ColorOutOfPalette {
        /// Requested color.
        color: ColorIndex,
        /// Number of palette entries.
        palette_size: usize,
    },
}

impl Error {
    /// Returns true if this is a rejected edit.
    #[must_use]
    pub fn is_invalid_edit(&self) -> bool {
        matches!(self, Self::InvalidEdit(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err: Error = EditError::MarkerCell(Coord::new(0, 0)).into();
        assert_eq!(
            err.to_string(),
            "invalid edit: cell (0, 0) holds the start or end marker"
        );
        assert!(err.is_invalid_edit());

        let err: Error = ConfigurationError::WrongGraphKind {
            algorithm: "kruskal",
            expected: "network",
        }
        .into();
        assert_eq!(
            err.to_string(),
            "configuration error: kruskal requires a network graph"
        );
    }

    #[test]
    fn test_every_error_is_configuration_or_edit() {
        let errors: [Error; 2] = [ConfigurationError::NoGraph.into(), EditError::RunActive.into()];
        for err in errors {
            match err {
                Error::Configuration(_) => assert!(!err.is_invalid_edit()),
                Error::InvalidEdit(_) => assert!(err.is_invalid_edit()),
            }
        }
    }
}
