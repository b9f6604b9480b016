//! Core type definitions for Graphstep.
//!
//! This module contains the fundamental types shared by every layer:
//! - Identifier types ([`NodeId`], [`EdgeId`], [`ColorIndex`])
//! - Grid geometry ([`Coord`], [`Direction`])
//! - Edge and cell cost ([`Weight`])

mod coord;
mod id;

pub use coord::{Coord, Direction};
pub use id::{ColorIndex, EdgeId, NodeId};

/// Cost of entering a cell or traversing an edge. Always positive.
pub type Weight = u32;
