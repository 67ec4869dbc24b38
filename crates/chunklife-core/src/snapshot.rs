use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::cell::CellRef;
use crate::coord::Coord;

/// State of one cell at the time the snapshot was taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub chunk: Coord,
    pub local: Coord,
    pub alive: bool,
}

impl CellSnapshot {
    pub fn cell_ref(&self) -> CellRef {
        CellRef::new(self.chunk, self.local)
    }
}

/// Read-only copy of a fully committed generation, for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSnapshot {
    pub generation: u64,
    pub chunk_width: u32,
    pub extent: u32,
    /// Every cell, chunk by chunk in row-major lattice order
    pub cells: Vec<CellSnapshot>,
}

impl GridSnapshot {
    /// Iterate over the living cells only.
    pub fn alive_cells(&self) -> impl Iterator<Item = &CellSnapshot> {
        self.cells.iter().filter(|cell| cell.alive)
    }

    pub fn population(&self) -> usize {
        self.alive_cells().count()
    }

    /// Global cell coordinates of every living cell.
    pub fn to_global_set(&self) -> HashSet<Coord> {
        let width = self.chunk_width as i32;
        self.alive_cells()
            .map(|cell| cell.cell_ref().global(width))
            .collect()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GridSnapshot {
        GridSnapshot {
            generation: 3,
            chunk_width: 2,
            extent: 2,
            cells: vec![
                CellSnapshot {
                    chunk: Coord::new(0, 0),
                    local: Coord::new(1, 1),
                    alive: true,
                },
                CellSnapshot {
                    chunk: Coord::new(1, 0),
                    local: Coord::new(0, 1),
                    alive: false,
                },
                CellSnapshot {
                    chunk: Coord::new(1, 1),
                    local: Coord::new(1, 0),
                    alive: true,
                },
            ],
        }
    }

    #[test]
    fn test_population_and_global_set() {
        let snapshot = sample();
        assert_eq!(snapshot.population(), 2);

        let globals = snapshot.to_global_set();
        assert_eq!(globals.len(), 2);
        assert!(globals.contains(&Coord::new(1, 1)));
        assert!(globals.contains(&Coord::new(3, 2)));
    }

    #[test]
    fn test_json_shape() {
        let snapshot = sample();
        let json = snapshot.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["generation"], 3);
        assert_eq!(value["chunkWidth"], 2);
        assert_eq!(value["cells"][0]["alive"], true);
        assert_eq!(value["cells"][1]["chunk"]["x"], 1);

        let back: GridSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
