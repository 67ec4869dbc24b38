use serde::{Deserialize, Serialize};

use crate::coord::Coord;
use crate::lattice::Lattice;

/// Offsets to the eight neighbors, clockwise from straight up.
///
/// `y` grows downwards, so `(0, -1)` is the cell above.
pub const NEIGHBOR_OFFSETS: [Coord; 8] = [
    Coord::new(0, -1),
    Coord::new(1, -1),
    Coord::new(1, 0),
    Coord::new(1, 1),
    Coord::new(0, 1),
    Coord::new(-1, 1),
    Coord::new(-1, 0),
    Coord::new(-1, -1),
];

/// Resolved neighbors in [`NEIGHBOR_OFFSETS`] order. `None` past the lattice edge.
pub type Neighbors = [Option<CellRef>; 8];

/// Address of a cell: which chunk, and where inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRef {
    /// Chunk index in the lattice
    pub chunk: Coord,
    /// Cell index within the chunk, `[0, width)` on both axes
    pub local: Coord,
}

impl CellRef {
    pub const fn new(chunk: Coord, local: Coord) -> Self {
        CellRef { chunk, local }
    }

    /// Split a global cell coordinate into chunk and local parts.
    ///
    /// Negative coordinates land in negative chunks, so the local part is
    /// always in range.
    ///
    /// # Examples
    ///
    /// ```
    /// use chunklife_core::{CellRef, Coord};
    ///
    /// let cell = CellRef::from_global(Coord::new(7, -1), 5);
    /// assert_eq!(cell.chunk, Coord::new(1, -1));
    /// assert_eq!(cell.local, Coord::new(2, 4));
    /// ```
    pub fn from_global(global: Coord, width: i32) -> Self {
        CellRef {
            chunk: Coord::new(global.x.div_euclid(width), global.y.div_euclid(width)),
            local: Coord::new(global.x.rem_euclid(width), global.y.rem_euclid(width)),
        }
    }

    /// Global cell coordinate, the inverse of [`CellRef::from_global`].
    pub fn global(&self, width: i32) -> Coord {
        width * self.chunk + self.local
    }
}

/// One automaton cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Current generation state
    alive: bool,
    /// Back-reference to the owning chunk
    chunk: Coord,
    /// Index within the owning chunk
    local: Coord,
    /// Resolved once when the grid is wired, in [`NEIGHBOR_OFFSETS`] order.
    /// `None` marks a position past the lattice edge.
    neighbors: Neighbors,
}

impl Cell {
    /// A dead cell with no neighbors resolved yet.
    pub(crate) fn new(chunk: Coord, local: Coord) -> Self {
        Cell {
            alive: false,
            chunk,
            local,
            neighbors: [None; 8],
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub(crate) fn set_alive(&mut self, alive: bool) {
        self.alive = alive;
    }

    pub(crate) fn invert(&mut self) {
        self.alive = !self.alive;
    }

    /// Index of this cell inside its chunk
    pub fn local_position(&self) -> Coord {
        self.local
    }

    /// Lattice index of the owning chunk
    pub fn chunk_position(&self) -> Coord {
        self.chunk
    }

    pub fn cell_ref(&self) -> CellRef {
        CellRef::new(self.chunk, self.local)
    }

    /// Top-left pixel of this cell on the canvas.
    ///
    /// # Arguments
    /// * `chunk_width` - Cells per chunk axis
    /// * `cell_px` - Width of one cell in pixels
    pub fn pixel_origin(&self, chunk_width: i32, cell_px: i32) -> Coord {
        (chunk_width * cell_px) * self.chunk + cell_px * self.local
    }

    /// Cached neighbors, in [`NEIGHBOR_OFFSETS`] order.
    pub fn neighbors(&self) -> &Neighbors {
        &self.neighbors
    }

    pub(crate) fn set_neighbors(&mut self, neighbors: Neighbors) {
        self.neighbors = neighbors;
    }

    /// Number of living cells among the cached neighbors.
    ///
    /// Absent neighbors count as dead.
    pub fn neighbor_count(&self, lattice: &Lattice) -> u8 {
        self.neighbors
            .iter()
            .flatten()
            .filter(|neighbor| lattice.is_alive(**neighbor))
            .count() as u8
    }

    /// Work out the eight neighbors of this cell against a complete lattice.
    ///
    /// A candidate outside `[0, width)` on either axis lives in the chunk offset
    /// by the sign of the overflow on each axis, diagonals included. Both axes
    /// are then wrapped into that chunk. No chunk there means no neighbor.
    pub fn resolve_neighbors(&self, lattice: &Lattice) -> Neighbors {
        let width = lattice.chunk_width();
        let mut neighbors = [None; 8];

        for (slot, offset) in neighbors.iter_mut().zip(NEIGHBOR_OFFSETS) {
            let candidate = self.local + offset;

            if in_chunk_range(candidate.x, width) && in_chunk_range(candidate.y, width) {
                *slot = Some(CellRef::new(self.chunk, candidate));
                continue;
            }

            let direction = Coord::new(
                overflow_direction(candidate.x, width),
                overflow_direction(candidate.y, width),
            );
            let target = self.chunk + direction;

            if lattice.chunk(target).is_none() {
                continue;
            }

            let wrapped = Coord::new(
                (candidate.x + width) % width,
                (candidate.y + width) % width,
            );
            *slot = Some(CellRef::new(target, wrapped));
        }

        neighbors
    }
}

fn in_chunk_range(value: i32, width: i32) -> bool {
    value >= 0 && value < width
}

fn overflow_direction(value: i32, width: i32) -> i32 {
    if value < 0 {
        -1
    } else if value >= width {
        1
    } else {
        0
    }
}
