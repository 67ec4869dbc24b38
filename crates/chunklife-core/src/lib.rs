pub mod cell;
pub mod chunk;
pub mod config;
pub mod coord;
pub mod error;
pub mod grid;
pub mod lattice;
pub mod patterns;
pub mod session;
pub mod snapshot;

pub use cell::{Cell, CellRef, Neighbors, NEIGHBOR_OFFSETS};
pub use chunk::Chunk;
pub use config::LifeConfig;
pub use coord::Coord;
pub use error::GridError;
pub use grid::{flips, Grid, SeedOutcome, StepReport};
pub use lattice::Lattice;
pub use patterns::{Pattern, PATTERNS};
pub use session::{ActionResult, LifeSession, RunMode, SessionAction, ToggleOutcome};
pub use snapshot::{CellSnapshot, GridSnapshot};
