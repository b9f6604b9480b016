//! Run parameters shared by every algorithm plugin.

use graphstep_core::NetworkGraph;
use serde::Serialize;

/// Per-run options. `None` defers to the graph's own setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Parameters {
    /// Read network edges as directed (cycle detection only).
    pub directed: Option<bool>,
    /// Colors available to auto-solve coloring.
    pub palette_size: Option<usize>,
}

impl Parameters {
    /// Sets the directed flag.
    #[must_use]
    pub fn with_directed(mut self, directed: bool) -> Self {
        self.directed = Some(directed);
        self
    }

    /// Sets the palette size.
    #[must_use]
    pub fn with_palette_size(mut self, palette_size: usize) -> Self {
        self.palette_size = Some(palette_size);
        self
    }

    pub(crate) fn directed_for(&self, graph: &NetworkGraph) -> bool {
        self.directed.unwrap_or_else(|| graph.is_directed())
    }

    pub(crate) fn palette_for(&self, graph: &NetworkGraph) -> usize {
        self.palette_size.unwrap_or_else(|| graph.palette_size())
    }
}
