//! The surface a presentation layer drives.
//!
//! A session wraps a [`Grid`] with the running/editing mode. While running,
//! the timer owns the grid: cell toggles and clearing are refused so that user
//! edits never interleave with generations.

use serde::{Deserialize, Serialize};

use crate::cell::CellRef;
use crate::config::LifeConfig;
use crate::coord::Coord;
use crate::error::GridError;
use crate::grid::{Grid, SeedOutcome, StepReport};
use crate::patterns::Pattern;
use crate::snapshot::GridSnapshot;

/// Whether the simulation is advancing on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunMode {
    /// Stopped; cells may be edited
    #[default]
    Editing,
    /// Advancing on every timer tick; edits are refused
    Running,
}

/// Result of a toggle request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Toggled { cell: CellRef, alive: bool },
    /// No cell under the pixel
    NoCell,
    /// The simulation is running
    Refused,
}

/// User intents coming from the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionAction {
    /// Toggle the cell drawn at a canvas pixel
    Toggle { x: i32, y: i32 },
    Advance,
    Clear,
    Start,
    Stop,
    StartStop,
}

/// What a [`SessionAction`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionResult {
    Toggled(ToggleOutcome),
    Advanced(StepReport),
    Cleared(bool),
    ModeChanged(RunMode),
}

/// A grid plus the mode that decides who may change it.
///
/// The grid is only reachable mutably through the methods below, each of which
/// checks the mode first. [`LifeSession::grid`] hands out a shared reference
/// for rendering and inspection.
#[derive(Clone, Debug)]
pub struct LifeSession {
    /// Cell state and generation counter
    grid: Grid,
    /// Editing until started; the timer only steps while `Running`
    mode: RunMode,
}

impl LifeSession {
    /// Build a grid from `config` and start in [`RunMode::Editing`].
    pub fn new(config: LifeConfig) -> Result<Self, GridError> {
        Ok(Self::from_grid(Grid::new(config)?))
    }

    pub fn from_grid(grid: Grid) -> Self {
        Self {
            grid,
            mode: RunMode::Editing,
        }
    }

    /// Read-only view of the grid
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    pub fn is_running(&self) -> bool {
        self.mode == RunMode::Running
    }

    pub fn start(&mut self) {
        self.set_mode(RunMode::Running);
    }

    pub fn stop(&mut self) {
        self.set_mode(RunMode::Editing);
    }

    /// Flip between running and editing, returning the new mode.
    pub fn toggle_running(&mut self) -> RunMode {
        let next = match self.mode {
            RunMode::Editing => RunMode::Running,
            RunMode::Running => RunMode::Editing,
        };
        self.set_mode(next);
        next
    }

    fn set_mode(&mut self, mode: RunMode) {
        if self.mode != mode {
            tracing::debug!(from = ?self.mode, to = ?mode, generation = self.grid.generation(), "mode change");
            self.mode = mode;
        }
    }

    /// Run one generation.
    pub fn advance_generation(&mut self) -> StepReport {
        self.grid.step()
    }

    /// Invert the cell drawn at a canvas pixel.
    pub fn toggle_cell(&mut self, x: i32, y: i32) -> ToggleOutcome {
        if self.is_running() {
            return ToggleOutcome::Refused;
        }

        let Some(cell) = self.grid.locate_cell(Coord::new(x, y)) else {
            return ToggleOutcome::NoCell;
        };

        match self.grid.toggle(cell) {
            Some(alive) => ToggleOutcome::Toggled { cell, alive },
            None => ToggleOutcome::NoCell,
        }
    }

    /// Kill every cell. Returns false, changing nothing, while running.
    pub fn clear_all(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.grid.clear();
        true
    }

    /// Place a pattern at a global cell coordinate. `None` while running.
    pub fn seed_pattern(&mut self, pattern: &Pattern, origin: Coord) -> Option<SeedOutcome> {
        if self.is_running() {
            return None;
        }
        Some(self.grid.seed_pattern(pattern, origin))
    }

    pub fn is_alive(&self, cell: CellRef) -> bool {
        self.grid.is_alive(cell)
    }

    pub fn snapshot(&self) -> GridSnapshot {
        self.grid.snapshot()
    }

    /// Dispatch a user intent.
    pub fn handle_action(&mut self, action: SessionAction) -> ActionResult {
        match action {
            SessionAction::Toggle { x, y } => ActionResult::Toggled(self.toggle_cell(x, y)),
            SessionAction::Advance => ActionResult::Advanced(self.advance_generation()),
            SessionAction::Clear => ActionResult::Cleared(self.clear_all()),
            SessionAction::Start => {
                self.start();
                ActionResult::ModeChanged(self.mode)
            }
            SessionAction::Stop => {
                self.stop();
                ActionResult::ModeChanged(self.mode)
            }
            SessionAction::StartStop => ActionResult::ModeChanged(self.toggle_running()),
        }
    }
}
