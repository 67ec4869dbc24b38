use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// Default width of one cell in pixels
pub const DEFAULT_CELL_PX: u32 = 20;
/// Default number of cells per chunk along each axis
pub const DEFAULT_CHUNK_WIDTH: u32 = 5;
/// Default number of chunks along each axis of the lattice
pub const DEFAULT_EXTENT: u32 = 5;
/// Largest grid a config may describe, in cells
pub const MAX_CELLS: u64 = 1 << 20;

/// Dimensions fixed for the lifetime of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeConfig {
    /// Width of one cell in pixels
    pub cell_px: u32,
    /// Cells per chunk along each axis
    pub chunk_width: u32,
    /// Chunks per lattice axis
    pub extent: u32,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            cell_px: DEFAULT_CELL_PX,
            chunk_width: DEFAULT_CHUNK_WIDTH,
            extent: DEFAULT_EXTENT,
        }
    }
}

impl LifeConfig {
    pub fn new(cell_px: u32, chunk_width: u32, extent: u32) -> Self {
        Self {
            cell_px,
            chunk_width,
            extent,
        }
    }

    /// Check that every dimension is non-zero, the grid holds at most
    /// [`MAX_CELLS`] cells and the canvas fits in `i32` pixels.
    pub fn validate(&self) -> Result<(), GridError> {
        if self.chunk_width == 0 {
            return Err(GridError::ZeroChunkWidth);
        }
        if self.cell_px == 0 {
            return Err(GridError::ZeroCellWidth);
        }
        if self.extent == 0 {
            return Err(GridError::ZeroExtent);
        }

        let per_axis = self.extent as u64 * self.chunk_width as u64;
        let cells = per_axis * per_axis;
        if cells > MAX_CELLS {
            return Err(GridError::TooManyCells {
                cells,
                max: MAX_CELLS,
            });
        }

        let canvas = (self.extent as u64) * (self.chunk_width as u64) * (self.cell_px as u64);
        if canvas > i32::MAX as u64 {
            return Err(GridError::TooLarge {
                extent: self.extent,
                chunk_width: self.chunk_width,
                cell_px: self.cell_px,
            });
        }

        Ok(())
    }

    /// Side length of one chunk in pixels
    pub fn chunk_px(&self) -> i32 {
        (self.chunk_width * self.cell_px) as i32
    }

    /// Side length of the whole canvas in pixels
    pub fn canvas_px(&self) -> i32 {
        self.extent as i32 * self.chunk_px()
    }

    /// Cells along one axis of the whole grid
    pub fn cells_per_axis(&self) -> usize {
        self.extent as usize * self.chunk_width as usize
    }

    /// Total number of cells in the grid
    pub fn cell_count(&self) -> usize {
        self.cells_per_axis() * self.cells_per_axis()
    }
}
