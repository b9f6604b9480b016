//! # graphstep-core
//!
//! Core layer for Graphstep: the graph models that games build and
//! algorithms consult.
//!
//! This crate depends only on `graphstep-common`.
//!
//! ## Modules
//!
//! - [`graph`] - Grid and network models, edit operations, seeded generators

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod graph;

// Re-export commonly used types
pub use graph::grid::{Cell, GridGraph};
pub use graph::network::{Adjacency, Edge, NetworkGraph, NetworkNode};
pub use graph::{EditEffect, EditOp, GraphModel};
