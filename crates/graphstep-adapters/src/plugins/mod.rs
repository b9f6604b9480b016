//! Algorithm plugins for Graphstep.
//!
//! ## Modules
//!
//! - [`algorithms`] - Stepwise graph algorithms (BFS, DFS, Dijkstra, coloring, Kruskal, cycles)

pub mod algorithms;
mod registry;
mod traits;

pub use registry::create_algorithm;
pub use traits::Parameters;
