//! Grid graph used by the maze and shortest-path games.
//!
//! Cells live in a row-major arena; a cell's [`NodeId`] is its arena index.
//! Neighbors are the four orthogonal cells, always produced in
//! [`Direction::ORDER`].

use graphstep_common::types::{Coord, Direction, NodeId, Weight};
use graphstep_common::utils::error::{ConfigurationError, EditError, Result};
use serde::Serialize;
use smallvec::SmallVec;

/// Default weight of a freshly created cell.
pub const DEFAULT_WEIGHT: Weight = 1;

/// A single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cell {
    /// Whether the cell is a wall.
    pub blocked: bool,
    /// Cost of entering the cell.
    pub weight: Weight,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            blocked: false,
            weight: DEFAULT_WEIGHT,
        }
    }
}

/// A rectangular grid with exactly one start and one end cell.
///
/// A bordered grid keeps its outermost ring of cells blocked; an open grid
/// allows markers anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridGraph {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    start: NodeId,
    end: NodeId,
    bordered: bool,
}

impl GridGraph {
    /// Creates an open grid with start at the top-left corner and end at the
    /// bottom-right corner.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the grid has fewer than two cells.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows * cols < 2 {
            return Err(ConfigurationError::DegenerateGraph(format!(
                "a {rows}x{cols} grid cannot hold distinct start and end cells"
            ))
            .into());
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![Cell::default(); rows * cols],
            start: NodeId::new(0),
            end: NodeId::new(rows * cols - 1),
            bordered: false,
        })
    }

    /// Creates a grid whose border cells are walls, with start and end at
    /// the top-left and bottom-right interior cells.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the interior has fewer than two cells.
    pub fn bordered(rows: usize, cols: usize) -> Result<Self> {
        if rows < 3 || cols < 3 || (rows - 2) * (cols - 2) < 2 {
            return Err(ConfigurationError::DegenerateGraph(format!(
                "a bordered {rows}x{cols} grid has no room for start and end"
            ))
            .into());
        }
        let mut grid = Self {
            rows,
            cols,
            cells: vec![Cell::default(); rows * cols],
            start: NodeId::new(cols + 1),
            end: NodeId::new((rows - 2) * cols + cols - 2),
            bordered: true,
        };
        for index in 0..grid.cells.len() {
            if grid.is_border(grid.coord(NodeId::new(index))) {
                grid.cells[index].blocked = true;
            }
        }
        Ok(grid)
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells, blocked or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: construction rejects empty grids.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether border cells are forced to be walls.
    #[must_use]
    pub fn is_bordered(&self) -> bool {
        self.bordered
    }

    /// Returns the node ID of a coordinate, or `None` if out of bounds.
    #[must_use]
    pub fn id(&self, coord: Coord) -> Option<NodeId> {
        (coord.row < self.rows && coord.col < self.cols)
            .then(|| NodeId::new(coord.row * self.cols + coord.col))
    }

    /// Returns the coordinate of a node ID.
    #[must_use]
    pub fn coord(&self, id: NodeId) -> Coord {
        Coord::new(id.index() / self.cols, id.index() % self.cols)
    }

    /// Returns the cell for a node ID.
    #[must_use]
    pub fn cell(&self, id: NodeId) -> Cell {
        self.cells[id.index()]
    }

    /// Returns all cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Whether the cell is a wall.
    #[must_use]
    pub fn is_blocked(&self, id: NodeId) -> bool {
        self.cells[id.index()].blocked
    }

    /// Cost of entering the cell.
    #[must_use]
    pub fn weight(&self, id: NodeId) -> Weight {
        self.cells[id.index()].weight
    }

    /// The start cell.
    #[must_use]
    pub fn start(&self) -> NodeId {
        self.start
    }

    /// The end cell.
    #[must_use]
    pub fn end(&self) -> NodeId {
        self.end
    }

    /// Whether a coordinate lies on the outer ring.
    #[must_use]
    pub fn is_border(&self, coord: Coord) -> bool {
        coord.row == 0 || coord.col == 0 || coord.row + 1 == self.rows || coord.col + 1 == self.cols
    }

    /// Number of cells that are not walls.
    #[must_use]
    pub fn open_cell_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.blocked).count()
    }

    /// Unblocked orthogonal neighbors of a cell, in up, right, down, left order.
    #[must_use]
    pub fn neighbors(&self, id: NodeId) -> SmallVec<[NodeId; 4]> {
        let here = self.coord(id);
        Direction::ORDER
            .iter()
            .filter_map(|&dir| here.step(dir, self.rows, self.cols))
            .map(|c| NodeId::new(c.row * self.cols + c.col))
            .filter(|&n| !self.is_blocked(n))
            .collect()
    }

    /// Checks that start and end are usable.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a marker sits on a wall or both
    /// markers share a cell.
    pub fn validate(&self) -> Result<()> {
        if self.is_blocked(self.start) {
            return Err(ConfigurationError::MissingStart.into());
        }
        if self.is_blocked(self.end) || self.start == self.end {
            return Err(ConfigurationError::MissingEnd.into());
        }
        Ok(())
    }

    // === Edit Operations ===

    /// Toggles a wall and returns the new blocked state.
    ///
    /// # Errors
    ///
    /// Rejects coordinates outside the grid, marker cells, and border cells
    /// of a bordered grid.
    pub fn toggle_wall(&mut self, coord: Coord) -> Result<bool> {
        let id = self.checked_id(coord)?;
        if id == self.start || id == self.end {
            return Err(EditError::MarkerCell(coord).into());
        }
        if self.bordered && self.is_border(coord) {
            return Err(EditError::BorderCell(coord).into());
        }
        let cell = &mut self.cells[id.index()];
        cell.blocked = !cell.blocked;
        Ok(cell.blocked)
    }

    /// Sets the cost of entering a cell.
    ///
    /// # Errors
    ///
    /// Rejects coordinates outside the grid and zero weights.
    pub fn set_weight(&mut self, coord: Coord, weight: Weight) -> Result<()> {
        let id = self.checked_id(coord)?;
        if weight == 0 {
            return Err(EditError::NonPositiveWeight(weight).into());
        }
        self.cells[id.index()].weight = weight;
        Ok(())
    }

    /// Moves the start marker.
    ///
    /// # Errors
    ///
    /// Rejects walls and the end cell.
    pub fn set_start(&mut self, coord: Coord) -> Result<()> {
        let id = self.marker_target(coord)?;
        if id == self.end {
            return Err(EditError::MarkerCell(coord).into());
        }
        self.start = id;
        Ok(())
    }

    /// Moves the end marker.
    ///
    /// # Errors
    ///
    /// Rejects walls and the start cell.
    pub fn set_end(&mut self, coord: Coord) -> Result<()> {
        let id = self.marker_target(coord)?;
        if id == self.start {
            return Err(EditError::MarkerCell(coord).into());
        }
        self.end = id;
        Ok(())
    }

    fn checked_id(&self, coord: Coord) -> Result<NodeId> {
        self.id(coord)
            .ok_or_else(|| EditError::OutOfBounds(coord).into())
    }

    fn marker_target(&self, coord: Coord) -> Result<NodeId> {
        let id = self.checked_id(coord)?;
        if self.is_blocked(id) {
            return Err(EditError::BlockedCell(coord).into());
        }
        Ok(id)
    }

    // Generators bypass edit validation while carving.
    pub(crate) fn set_blocked_raw(&mut self, id: NodeId, blocked: bool) {
        self.cells[id.index()].blocked = blocked;
    }

    pub(crate) fn set_weight_raw(&mut self, id: NodeId, weight: Weight) {
        self.cells[id.index()].weight = weight;
    }

    pub(crate) fn set_markers_raw(&mut self, start: NodeId, end: NodeId) {
        self.start = start;
        self.end = end;
    }
}
