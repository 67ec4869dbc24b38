//! The whole grid and the generation stepper.
//!
//! A [`Grid`] is built in three phases that each finish before the next
//! begins: create every chunk, populate every chunk, resolve every cell's
//! neighbors. Only then is a `Grid` value returned, so stepping a half-built
//! grid cannot be expressed.
//!
//! Stepping is two-phase as well. The compute phase reads every cell and marks
//! the ones that flip; the commit phase inverts the marked cells. No decision
//! ever sees a neighbor that has already moved to the next generation.

use bitvec::prelude::*;
use serde::{Deserialize, Serialize};

use crate::cell::{Cell, CellRef, Neighbors};
use crate::config::LifeConfig;
use crate::coord::Coord;
use crate::error::GridError;
use crate::lattice::Lattice;
use crate::patterns::Pattern;
use crate::snapshot::{CellSnapshot, GridSnapshot};

/// Check if a cell changes state under B3/S23.
///
/// Living cells die with fewer than 2 or more than 3 living neighbors; dead
/// cells come alive with exactly 3.
pub fn flips(alive: bool, live_neighbors: u8) -> bool {
    if alive {
        !(2..=3).contains(&live_neighbors)
    } else {
        live_neighbors == 3
    }
}

/// Summary of one call to [`Grid::step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    /// Generation number after the step
    pub generation: u64,
    /// Cells that changed state
    pub flipped: usize,
    /// Living cells after the step
    pub population: usize,
}

/// Result of seeding cells by global coordinate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedOutcome {
    pub placed: usize,
    /// Cells that fell outside the lattice
    pub skipped: usize,
}

/// A fully wired chunk lattice plus the generation counter.
#[derive(Clone, Debug)]
pub struct Grid {
    lattice: Lattice,
    generation: u64,
}

impl Grid {
    /// Build, populate and wire a grid.
    pub fn new(config: LifeConfig) -> Result<Self, GridError> {
        let lattice = Lattice::build(config)?;
        Ok(Self::wire(lattice))
    }

    fn wire(mut lattice: Lattice) -> Self {
        let resolved: Vec<Neighbors> = lattice
            .cells()
            .map(|cell| cell.resolve_neighbors(&lattice))
            .collect();

        let cells = lattice.chunks_mut().flat_map(|chunk| chunk.cells_mut());
        for (cell, neighbors) in cells.zip(resolved) {
            cell.set_neighbors(neighbors);
        }

        tracing::debug!(
            chunks = lattice.chunk_count(),
            chunk_width = lattice.chunk_width(),
            "grid wired"
        );

        Self {
            lattice,
            generation: 0,
        }
    }

    pub fn config(&self) -> &LifeConfig {
        self.lattice.config()
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Number of steps taken since construction
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cell_count(&self) -> usize {
        self.config().cell_count()
    }

    /// Living cells across the whole grid
    pub fn population(&self) -> usize {
        self.lattice.chunks().map(|chunk| chunk.population()).sum()
    }

    pub fn contains(&self, cell: CellRef) -> bool {
        self.lattice.cell(cell).is_some()
    }

    pub fn cell(&self, cell: CellRef) -> Option<&Cell> {
        self.lattice.cell(cell)
    }

    /// Iterate over every cell, chunk by chunk in row-major lattice order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.lattice.cells()
    }

    /// Address of the cell at a global cell coordinate, if the lattice covers it.
    pub fn cell_ref_at_global(&self, global: Coord) -> Option<CellRef> {
        let cell = CellRef::from_global(global, self.lattice.chunk_width());
        self.contains(cell).then_some(cell)
    }

    pub fn is_alive(&self, cell: CellRef) -> bool {
        self.lattice.is_alive(cell)
    }

    /// Living neighbors of a cell; 0 for cells outside the grid.
    pub fn neighbor_count(&self, cell: CellRef) -> u8 {
        self.lattice
            .cell(cell)
            .map_or(0, |cell| cell.neighbor_count(&self.lattice))
    }

    /// Cached neighbors of a cell.
    pub fn neighbors(&self, cell: CellRef) -> Option<&Neighbors> {
        self.lattice.cell(cell).map(Cell::neighbors)
    }

    /// Resolve a cell's neighbors again against the lattice, bypassing the cache.
    pub fn recompute_neighbors(&self, cell: CellRef) -> Option<Neighbors> {
        self.lattice
            .cell(cell)
            .map(|cell| cell.resolve_neighbors(&self.lattice))
    }

    /// Set one cell's alive flag. Returns false if the cell is not in the grid.
    pub fn set_alive(&mut self, cell: CellRef, alive: bool) -> bool {
        match self.lattice.cell_mut(cell) {
            Some(cell) => {
                cell.set_alive(alive);
                true
            }
            None => false,
        }
    }

    /// Invert one cell's alive flag, returning the new state.
    pub fn toggle(&mut self, cell: CellRef) -> Option<bool> {
        let cell = self.lattice.cell_mut(cell)?;
        cell.invert();
        Some(cell.is_alive())
    }

    /// Kill every cell.
    pub fn clear(&mut self) {
        for cell in self.lattice.chunks_mut().flat_map(|chunk| chunk.cells_mut()) {
            cell.set_alive(false);
        }
    }

    /// Bring cells to life by global cell coordinate.
    pub fn seed(&mut self, cells: impl IntoIterator<Item = Coord>) -> SeedOutcome {
        let mut outcome = SeedOutcome::default();
        for global in cells {
            match self.cell_ref_at_global(global) {
                Some(cell) => {
                    self.set_alive(cell, true);
                    outcome.placed += 1;
                }
                None => outcome.skipped += 1,
            }
        }
        outcome
    }

    /// Place a pattern with its top-left corner at a global cell coordinate.
    pub fn seed_pattern(&mut self, pattern: &Pattern, origin: Coord) -> SeedOutcome {
        self.seed(pattern.placed_at(origin))
    }

    /// Map a canvas pixel to the cell drawn there.
    ///
    /// Scans chunks for the one whose pixel square contains the point, then that
    /// chunk's cells. Returns `None` for points outside every chunk.
    pub fn locate_cell(&self, pixel: Coord) -> Option<CellRef> {
        let cell_px = self.config().cell_px as i32;
        let chunk_px = self.config().chunk_px();
        let width = self.lattice.chunk_width();

        let chunk = self
            .lattice
            .chunks()
            .find(|chunk| pixel.in_square(chunk.pixel_origin(cell_px), chunk_px))?;

        chunk
            .cells()
            .find(|cell| pixel.in_square(cell.pixel_origin(width, cell_px), cell_px))
            .map(Cell::cell_ref)
    }

    /// Advance every cell by one generation.
    pub fn step(&mut self) -> StepReport {
        let width = self.lattice.chunk_width() as usize;
        let per_chunk = width * width;

        // Compute: mark flips against the current generation only
        let mut pending: BitVec = BitVec::repeat(false, self.lattice.chunk_count() * per_chunk);
        for (ordinal, cell) in self.lattice.cells().enumerate() {
            if flips(cell.is_alive(), cell.neighbor_count(&self.lattice)) {
                pending.set(ordinal, true);
            }
        }

        // Commit
        for ordinal in pending.iter_ones() {
            self.lattice
                .chunk_by_ordinal_mut(ordinal / per_chunk)
                .cell_by_slot_mut(ordinal % per_chunk)
                .invert();
        }

        self.generation += 1;
        let report = StepReport {
            generation: self.generation,
            flipped: pending.count_ones(),
            population: self.population(),
        };

        tracing::trace!(
            generation = report.generation,
            flipped = report.flipped,
            population = report.population,
            "stepped"
        );

        report
    }

    /// Copy out every cell's state.
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            generation: self.generation,
            chunk_width: self.config().chunk_width,
            extent: self.config().extent,
            cells: self
                .cells()
                .map(|cell| CellSnapshot {
                    chunk: cell.chunk_position(),
                    local: cell.local_position(),
                    alive: cell.is_alive(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::NEIGHBOR_OFFSETS;
    use std::collections::HashSet;

    fn grid(chunk_width: u32, extent: u32) -> Grid {
        Grid::new(LifeConfig::new(20, chunk_width, extent)).unwrap()
    }

    fn globals(cells: &[(i32, i32)]) -> HashSet<Coord> {
        cells.iter().map(|&(x, y)| Coord::new(x, y)).collect()
    }

    fn alive(grid: &Grid) -> HashSet<Coord> {
        grid.snapshot().to_global_set()
    }

    #[test]
    fn test_flips_rule_table() {
        for n in 0..=8 {
            assert_eq!(flips(true, n), n < 2 || n > 3, "alive with {n}");
            assert_eq!(flips(false, n), n == 3, "dead with {n}");
        }
    }

    #[test]
    fn test_new_grid_is_dead() {
        let grid = grid(5, 5);
        assert_eq!(grid.cell_count(), 625);
        assert_eq!(grid.cells().count(), 625);
        assert_eq!(grid.population(), 0);
        assert_eq!(grid.generation(), 0);
    }

    #[test]
    fn test_new_grid_rejects_bad_config() {
        let err = Grid::new(LifeConfig::new(20, 5, 0)).unwrap_err();
        assert_eq!(err, GridError::ZeroExtent);

        let err = Grid::new(LifeConfig::new(1, 46340, 1)).unwrap_err();
        assert!(matches!(err, GridError::TooManyCells { .. }));
    }

    #[test]
    fn test_interior_cells_have_eight_neighbors() {
        let grid = grid(4, 3);
        let n = grid.config().cells_per_axis() as i32;

        for gx in 1..n - 1 {
            for gy in 1..n - 1 {
                let cell = grid.cell_ref_at_global(Coord::new(gx, gy)).unwrap();
                let neighbors = grid.neighbors(cell).unwrap();
                assert!(neighbors.iter().all(Option::is_some), "({gx}, {gy})");
            }
        }
    }

    #[test]
    fn test_neighbors_match_global_adjacency() {
        let grid = grid(3, 3);
        let n = grid.config().cells_per_axis() as i32;

        for cell in grid.cells() {
            let global = cell.cell_ref().global(3);
            for (neighbor, offset) in cell.neighbors().iter().zip(NEIGHBOR_OFFSETS) {
                let target = global + offset;
                let inside = target.x >= 0 && target.y >= 0 && target.x < n && target.y < n;
                if inside {
                    assert_eq!(neighbor.map(|r| r.global(3)), Some(target));
                } else {
                    assert_eq!(*neighbor, None);
                }
            }
        }
    }

    #[test]
    fn test_edge_absent_neighbors_count_as_dead() {
        let mut grid = grid(5, 2);
        let corner = grid.cell_ref_at_global(Coord::new(0, 0)).unwrap();
        let absent = grid
            .neighbors(corner)
            .unwrap()
            .iter()
            .filter(|n| n.is_none())
            .count();
        assert_eq!(absent, 5);

        grid.seed(globals(&[(1, 0), (0, 1), (1, 1)]));
        assert_eq!(grid.neighbor_count(corner), 3);
    }

    #[test]
    fn test_neighbor_count_across_chunks() {
        let mut grid = grid(5, 2);
        // Ring around global (5, 5), the corner where four chunks meet
        grid.seed(globals(&[
            (4, 4),
            (5, 4),
            (6, 4),
            (4, 5),
            (6, 5),
            (4, 6),
            (5, 6),
            (6, 6),
        ]));
        let center = grid.cell_ref_at_global(Coord::new(5, 5)).unwrap();
        assert_eq!(grid.neighbor_count(center), 8);
    }

    #[test]
    fn test_blinker_oscillates() {
        let mut grid = grid(5, 5);
        let row = globals(&[(11, 12), (12, 12), (13, 12)]);
        let column = globals(&[(12, 11), (12, 12), (12, 13)]);

        grid.seed(row.clone());
        let report = grid.step();
        assert_eq!(alive(&grid), column);
        assert_eq!(report.flipped, 4);
        assert_eq!(report.population, 3);
        assert_eq!(report.generation, 1);

        grid.step();
        assert_eq!(alive(&grid), row);
    }

    #[test]
    fn test_blinker_across_chunk_boundary() {
        let mut grid = grid(5, 3);
        // Spans chunks (0, 1) and (1, 1) horizontally
        let row = globals(&[(4, 7), (5, 7), (6, 7)]);
        let column = globals(&[(5, 6), (5, 7), (5, 8)]);

        grid.seed(row.clone());
        grid.step();
        assert_eq!(alive(&grid), column);
        grid.step();
        assert_eq!(alive(&grid), row);
    }

    #[test]
    fn test_block_is_still_life() {
        let mut grid = grid(5, 3);
        // Block straddles all four chunks meeting at global (5, 5)
        let block = globals(&[(4, 4), (5, 4), (4, 5), (5, 5)]);
        grid.seed(block.clone());

        for _ in 0..20 {
            let report = grid.step();
            assert_eq!(report.flipped, 0);
        }
        assert_eq!(alive(&grid), block);
        assert_eq!(grid.generation(), 20);
    }

    #[test]
    fn test_glider_crosses_chunks() {
        let mut grid = grid(4, 4);
        let glider = Pattern::by_name("glider").unwrap();
        grid.seed_pattern(glider, Coord::new(1, 1));

        for _ in 0..12 {
            grid.step();
        }

        let expected: HashSet<_> = glider.placed_at(Coord::new(4, 4)).collect();
        assert_eq!(alive(&grid), expected);
    }

    #[test]
    fn test_step_is_deterministic() {
        let mut a = grid(5, 4);
        let r = Pattern::by_name("r-pentomino").unwrap();
        a.seed_pattern(r, Coord::new(9, 9));
        let mut b = a.clone();

        for _ in 0..30 {
            assert_eq!(a.step(), b.step());
            assert_eq!(a.snapshot(), b.snapshot());
        }
    }

    #[test]
    fn test_lone_cell_dies() {
        let mut grid = grid(5, 1);
        grid.seed(globals(&[(2, 2)]));
        let report = grid.step();
        assert_eq!(report.population, 0);
        assert_eq!(report.flipped, 1);
    }

    #[test]
    fn test_clear_kills_everything() {
        let mut grid = grid(5, 3);
        grid.seed_pattern(Pattern::by_name("beacon").unwrap(), Coord::new(3, 3));
        grid.seed_pattern(Pattern::by_name("toad").unwrap(), Coord::new(9, 9));
        assert!(grid.population() > 0);

        grid.clear();

        assert_eq!(grid.population(), 0);
        let refs: Vec<_> = grid.cells().map(Cell::cell_ref).collect();
        for cell in refs {
            assert!(!grid.is_alive(cell));
            assert_eq!(grid.neighbor_count(cell), 0);
        }
    }

    #[test]
    fn test_set_alive_and_toggle() {
        let mut grid = grid(5, 2);
        let cell = CellRef::new(Coord::new(1, 0), Coord::new(2, 3));

        assert!(grid.set_alive(cell, true));
        assert!(grid.is_alive(cell));
        assert_eq!(grid.toggle(cell), Some(false));
        assert_eq!(grid.toggle(cell), Some(true));

        let outside = CellRef::new(Coord::new(2, 0), Coord::ORIGIN);
        assert!(!grid.set_alive(outside, true));
        assert_eq!(grid.toggle(outside), None);
        assert_eq!(grid.population(), 1);
    }

    #[test]
    fn test_seed_skips_cells_outside() {
        let mut grid = grid(5, 1);
        let outcome = grid.seed(globals(&[(0, 0), (4, 4), (5, 0), (-1, 2)]));
        assert_eq!(outcome, SeedOutcome { placed: 2, skipped: 2 });
        assert_eq!(grid.population(), 2);
    }

    #[test]
    fn test_locate_cell() {
        let grid = grid(5, 5);

        assert_eq!(
            grid.locate_cell(Coord::new(0, 0)),
            Some(CellRef::new(Coord::ORIGIN, Coord::ORIGIN))
        );
        // 20px cells, 100px chunks
        assert_eq!(
            grid.locate_cell(Coord::new(145, 399)),
            Some(CellRef::new(Coord::new(1, 3), Coord::new(2, 4)))
        );
        assert_eq!(
            grid.locate_cell(Coord::new(499, 499)),
            Some(CellRef::new(Coord::new(4, 4), Coord::new(4, 4)))
        );
        assert_eq!(grid.locate_cell(Coord::new(500, 10)), None);
        assert_eq!(grid.locate_cell(Coord::new(-1, 10)), None);
    }

    #[test]
    fn test_recompute_matches_cache() {
        let grid = grid(3, 4);
        let refs: Vec<_> = grid.cells().map(Cell::cell_ref).collect();
        for cell in refs {
            assert_eq!(grid.recompute_neighbors(cell).as_ref(), grid.neighbors(cell));
        }
    }

    #[test]
    fn test_snapshot_enumerates_every_cell() {
        let mut grid = grid(2, 2);
        grid.set_alive(CellRef::new(Coord::new(1, 1), Coord::new(0, 1)), true);

        let snapshot = grid.snapshot();
        assert_eq!(snapshot.cells.len(), 16);
        assert_eq!(snapshot.population(), 1);
        assert_eq!(snapshot.chunk_width, 2);
        assert_eq!(snapshot.extent, 2);
        assert!(snapshot.to_global_set().contains(&Coord::new(2, 3)));
    }
}
