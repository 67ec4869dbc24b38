//! The fixed arrangement of chunks making up the grid.
//!
//! A [`Lattice`] is only ever handed out fully built and populated, which is
//! what neighbor resolution requires: any cell may need to look up any adjacent
//! chunk.

use std::collections::HashMap;

use crate::cell::{Cell, CellRef};
use crate::chunk::Chunk;
use crate::config::LifeConfig;
use crate::coord::Coord;
use crate::error::GridError;

/// All chunks of a grid, keyed by lattice index.
#[derive(Clone, Debug)]
pub struct Lattice {
    config: LifeConfig,
    /// Chunks in row-major lattice order
    chunks: Vec<Chunk>,
    /// Lattice index -> position in `chunks`
    index: HashMap<Coord, usize>,
}

impl Lattice {
    /// Create every chunk, then populate every chunk.
    pub(crate) fn build(config: LifeConfig) -> Result<Self, GridError> {
        config.validate()?;

        let extent = config.extent as i32;
        let width = config.chunk_width as i32;

        let mut chunks = Vec::with_capacity(config.extent as usize * config.extent as usize);
        let mut index = HashMap::with_capacity(chunks.capacity());

        for y in 0..extent {
            for x in 0..extent {
                let position = Coord::new(x, y);
                index.insert(position, chunks.len());
                chunks.push(Chunk::new(position, width));
            }
        }

        for chunk in &mut chunks {
            chunk.populate();
        }

        Ok(Self {
            config,
            chunks,
            index,
        })
    }

    pub fn config(&self) -> &LifeConfig {
        &self.config
    }

    /// Cells per chunk axis
    pub fn chunk_width(&self) -> i32 {
        self.config.chunk_width as i32
    }

    /// Look up a chunk by lattice index.
    pub fn chunk(&self, position: Coord) -> Option<&Chunk> {
        self.index.get(&position).map(|&i| &self.chunks[i])
    }

    pub(crate) fn chunk_mut(&mut self, position: Coord) -> Option<&mut Chunk> {
        let i = *self.index.get(&position)?;
        Some(&mut self.chunks[i])
    }

    /// Iterate over chunks in row-major lattice order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter()
    }

    pub(crate) fn chunks_mut(&mut self) -> impl Iterator<Item = &mut Chunk> {
        self.chunks.iter_mut()
    }

    /// Chunk by its position in iteration order.
    pub(crate) fn chunk_by_ordinal_mut(&mut self, ordinal: usize) -> &mut Chunk {
        &mut self.chunks[ordinal]
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Look up a cell, checking the local index against the chunk width.
    pub fn cell(&self, cell: CellRef) -> Option<&Cell> {
        let chunk = self.chunk(cell.chunk)?;
        chunk
            .contains_local(cell.local)
            .then(|| chunk.cell_at(cell.local))
    }

    pub(crate) fn cell_mut(&mut self, cell: CellRef) -> Option<&mut Cell> {
        let chunk = self.chunk_mut(cell.chunk)?;
        if chunk.contains_local(cell.local) {
            Some(chunk.cell_at_mut(cell.local))
        } else {
            None
        }
    }

    /// Alive state of a cell. Cells outside the lattice read as dead.
    pub fn is_alive(&self, cell: CellRef) -> bool {
        self.cell(cell).is_some_and(Cell::is_alive)
    }

    /// Iterate over every cell, chunk by chunk.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.chunks.iter().flat_map(|chunk| chunk.cells())
    }
}
