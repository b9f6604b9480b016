//! # Graphstep
//!
//! Classic graph algorithms run one observable step at a time.
//!
//! Start with [`StepEngine`]: configure a grid or a network, edit it while
//! idle, then pull [`StepSnapshot`]s from a [`Run`] at whatever pace suits
//! your renderer. Every run is deterministic and can be cancelled between
//! any two steps without touching the graph.
//!
//! | Algorithm | Graph | Outcome |
//! | --------- | ----- | ------- |
//! | BFS / DFS | grid | path found or no path |
//! | Dijkstra | weighted grid | cheapest path or unreachable |
//! | Greedy coloring | network | coloring or no color available |
//! | Kruskal | network | spanning tree (or forest) |
//! | Cycle detection | network, directed or not | first cycle or acyclic |
//!
//! ## Quick Start
//!
//! ```rust
//! use graphstep::{AlgorithmKind, Coord, EditOp, GridGraph, RunOptions, RunStatus, StepEngine};
//!
//! let mut engine = StepEngine::new();
//! engine.configure(GridGraph::new(5, 5)?);
//! engine.edit(EditOp::ToggleWall(Coord::new(1, 1)))?;
//!
//! let mut run = engine.run(AlgorithmKind::Dijkstra, RunOptions::default())?;
//! let first = run.next().unwrap();
//! assert_eq!(first.step, 1);
//!
//! match run.finish() {
//!     RunStatus::Finished(outcome) => assert!(outcome.is_success()),
//!     other => panic!("unexpected {other:?}"),
//! }
//! # Ok::<(), graphstep::Error>(())
//! ```

// Engine API
pub use graphstep_engine::{CancelHandle, Config, Run, RunOptions, StepEngine};

// Graph models
pub use graphstep_core::graph::generate;
pub use graphstep_core::{Cell, Edge, EditEffect, EditOp, GraphModel, GridGraph, NetworkGraph};

// Identifiers and errors
pub use graphstep_common::types::{ColorIndex, Coord, Direction, EdgeId, NodeId, Weight};
pub use graphstep_common::utils::error::{ConfigurationError, EditError, Error, Result};

// Algorithms and snapshots
pub use graphstep_adapters::plugins::algorithms::{
    AlgorithmKind, ColoringStatus, Mark, Outcome, RunStatus, SelectionVerdict, StepSnapshot, bfs,
    coloring_status, detect_cycle, dfs, dijkstra, evaluate_selection, greedy_coloring, kruskal,
};
