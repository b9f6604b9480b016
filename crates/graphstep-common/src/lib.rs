//! # graphstep-common
//!
//! Foundation layer for Graphstep: identifiers, errors, and utilities.
//!
//! This crate provides the fundamental building blocks used by all other
//! Graphstep crates. It has no internal dependencies and should be kept minimal.
//!
//! ## Modules
//!
//! - [`types`] - Core type definitions (NodeId, EdgeId, Coord, Weight, etc.)
//! - [`utils`] - Utility functions and helpers (hashing, errors)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod types;
pub mod utils;

// Re-export commonly used types at crate root
pub use types::{ColorIndex, Coord, Direction, EdgeId, NodeId, Weight};
pub use utils::error::{ConfigurationError, EditError, Error, Result};
