//! Graph algorithms for Graphstep.
//!
//! Every algorithm is a deterministic state machine: construct it from a
//! graph, then call [`StepAlgorithm::step`] until it returns
//! [`Control::Done`]. [`StepAlgorithm::snapshot`] captures the run-local
//! state between steps for rendering. The graph itself is only read.
//!
//! ## Algorithm Categories
//!
//! - [`traversal`] - BFS and DFS over grids
//! - [`shortest_path`] - Dijkstra over weighted grids
//! - [`coloring`] - Greedy auto-solve and manual conflict checking
//! - [`mst`] - Kruskal and manual spanning-tree validation
//! - [`cycle`] - Tri-color DFS cycle detection
//! - [`components`] - Union-find and connectivity helpers
//! - [`path`] - Back-pointer path reconstruction
//!
//! ## Usage
//!
//! ```
//! use graphstep_adapters::plugins::algorithms::{bfs, Outcome};
//! use graphstep_core::GridGraph;
//!
//! let grid = GridGraph::new(5, 5).unwrap();
//! match bfs(&grid).unwrap() {
//!     Outcome::PathFound { path, .. } => assert_eq!(path.len(), 9),
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```

pub mod coloring;
pub mod components;
pub mod cycle;
pub mod mst;
pub mod path;
pub mod shortest_path;
pub mod snapshot;
pub mod traversal;
mod traits;

// Core traits
pub use traits::{AlgorithmKind, Control, StepAlgorithm, collect_trace};

// Snapshot types
pub use snapshot::{Mark, Outcome, RunStatus, StepSnapshot};

// Traversal algorithms
pub use traversal::{Frontier, Traversal, bfs, dfs};

// Shortest path algorithms
pub use shortest_path::{Dijkstra, dijkstra};

// Coloring algorithms
pub use coloring::{ColoringStatus, GreedyColoring, coloring_status, conflicts, greedy_coloring};

// Minimum Spanning Tree algorithms
pub use mst::{Kruskal, SelectionVerdict, evaluate_selection, kruskal};

// Cycle detection
pub use cycle::{CycleDetector, detect_cycle};

// Components
pub use components::{UnionFind, is_connected_with};

// Path reconstruction
pub use path::reconstruct_path;
