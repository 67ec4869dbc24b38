//! Fixed-size square blocks of cells.
//!
//! A chunk owns a `width x width` table of [`Cell`]s stored flat in column-major
//! order (`x * width + y`). Chunks are created by the lattice, populated once,
//! and then only their cells' alive flags change.

use crate::cell::Cell;
use crate::coord::Coord;

/// A `width x width` block of cells at a fixed lattice index.
#[derive(Clone, Debug)]
pub struct Chunk {
    /// Index of this chunk in the lattice
    position: Coord,
    /// Cells per axis
    width: i32,
    /// Cells keyed by `x * width + y`. Empty until [`Chunk::populate`] runs.
    cells: Vec<Cell>,
}

impl Chunk {
    /// Create an unpopulated chunk at the given lattice index.
    ///
    /// # Arguments
    /// * `position` - Chunk index in the lattice
    /// * `width` - Cells per axis, at least 1
    pub(crate) fn new(position: Coord, width: i32) -> Self {
        Self {
            position,
            width,
            cells: Vec::new(),
        }
    }

    /// Fill the table with dead cells at every local index.
    ///
    /// Only the first call does anything; a populated chunk keeps its cells.
    pub(crate) fn populate(&mut self) {
        if self.is_populated() {
            return;
        }
        let (position, width) = (self.position, self.width);
        self.cells = (0..width)
            .flat_map(|x| (0..width).map(move |y| Coord::new(x, y)))
            .map(|local| Cell::new(position, local))
            .collect();
    }

    /// Check if [`Chunk::populate`] has run.
    pub fn is_populated(&self) -> bool {
        !self.cells.is_empty()
    }

    /// Lattice index of this chunk
    pub fn position(&self) -> Coord {
        self.position
    }

    /// Cells per axis
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Check if a local index lies inside `[0, width) x [0, width)`.
    pub fn contains_local(&self, local: Coord) -> bool {
        local.x >= 0 && local.y >= 0 && local.x < self.width && local.y < self.width
    }

    /// Get the cell at a local index.
    ///
    /// # Panics
    ///
    /// If `local` is out of range or the chunk is not populated. Callers
    /// validate positions; use [`Chunk::contains_local`] when unsure.
    pub fn cell_at(&self, local: Coord) -> &Cell {
        &self.cells[self.slot(local)]
    }

    /// Mutable counterpart of [`Chunk::cell_at`].
    pub(crate) fn cell_at_mut(&mut self, local: Coord) -> &mut Cell {
        let slot = self.slot(local);
        &mut self.cells[slot]
    }

    /// Top-left pixel of this chunk on the canvas.
    ///
    /// # Arguments
    /// * `cell_px` - Width of one cell in pixels
    pub fn pixel_origin(&self, cell_px: i32) -> Coord {
        (self.width * cell_px) * self.position
    }

    /// Iterate over the cells in table order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    /// Cell by its position in table order.
    pub(crate) fn cell_by_slot_mut(&mut self, slot: usize) -> &mut Cell {
        &mut self.cells[slot]
    }

    /// Number of living cells in this chunk.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    fn slot(&self, local: Coord) -> usize {
        (local.x * self.width + local.y) as usize
    }
}
