pub mod command;
pub mod config;
pub mod render;

use std::io::{self, Write};

use chunklife_core::{Coord, GridError, LifeSession, ToggleOutcome, PATTERNS};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{self, MissedTickBehavior};

use crate::command::Command;
use crate::config::Config;

/// Whether the command loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Text front end over a [`LifeSession`].
pub struct Runner {
    session: LifeSession,
}

impl Runner {
    pub fn new(config: &Config) -> Result<Self, GridError> {
        Ok(Self {
            session: LifeSession::new(config.life)?,
        })
    }

    pub fn session(&self) -> &LifeSession {
        &self.session
    }

    pub fn is_running(&self) -> bool {
        self.session.is_running()
    }

    /// Apply one command, writing any output to `out`.
    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> io::Result<Flow> {
        match command {
            Command::Toggle { x, y } => match self.session.toggle_cell(x, y) {
                ToggleOutcome::Toggled { cell, alive } => {
                    tracing::debug!(chunk = %cell.chunk, local = %cell.local, alive, "cell toggled");
                    self.draw(out)?;
                }
                ToggleOutcome::NoCell => writeln!(out, "no cell at pixel ({}, {})", x, y)?,
                ToggleOutcome::Refused => writeln!(out, "stop the simulation before editing")?,
            },
            Command::Step(n) => {
                for _ in 0..n {
                    self.session.advance_generation();
                }
                self.draw(out)?;
            }
            Command::Clear => {
                if self.session.clear_all() {
                    self.draw(out)?;
                } else {
                    writeln!(out, "stop the simulation before clearing")?;
                }
            }
            Command::Run => {
                self.session.start();
                writeln!(out, "running")?;
            }
            Command::Stop => {
                self.session.stop();
                writeln!(out, "stopped")?;
            }
            Command::Seed { pattern, x, y } => {
                match self.session.seed_pattern(pattern, Coord::new(x, y)) {
                    Some(outcome) => {
                        if outcome.skipped > 0 {
                            writeln!(out, "{} cells fell outside the grid", outcome.skipped)?;
                        }
                        self.draw(out)?;
                    }
                    None => writeln!(out, "stop the simulation before editing")?,
                }
            }
            Command::Show => self.draw(out)?,
            Command::Patterns => {
                for pattern in PATTERNS {
                    writeln!(out, "{} ({} cells)", pattern.name, pattern.len())?;
                }
            }
            Command::Json => match self.session.snapshot().to_json() {
                Ok(json) => writeln!(out, "{}", json)?,
                Err(e) => tracing::error!("Failed to serialize snapshot: {}", e),
            },
            Command::Help => writeln!(out, "{}", command::HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    /// Timer tick: advance one generation if running.
    pub fn tick<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if !self.session.is_running() {
            return Ok(());
        }
        self.session.advance_generation();
        self.draw(out)
    }

    fn draw<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let snapshot = self.session.snapshot();
        writeln!(out, "{}", render::status_line(&snapshot, self.session.mode()))?;
        write!(out, "{}", render::render_text(&snapshot, true))?;
        out.flush()
    }
}

/// Run the command loop on stdin until `quit` or end of input.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let mut runner = Runner::new(&config)?;
    let mut stdout = io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let mut ticker = time::interval(config.tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    tracing::info!(
        cells = config.life.cell_count(),
        chunk_width = config.life.chunk_width,
        extent = config.life.extent,
        tick_ms = config.tick.as_millis() as u64,
        "chunklife ready"
    );
    writeln!(stdout, "{}", command::HELP)?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let was_running = runner.is_running();

                match command::parse(&line) {
                    Ok(Some(command)) => {
                        if runner.execute(command, &mut stdout)? == Flow::Quit {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(e) => {
                        tracing::warn!("Rejected input {:?}: {}", line, e);
                        writeln!(stdout, "error: {}", e)?;
                    }
                }

                if !was_running && runner.is_running() {
                    ticker.reset();
                }
            }
            _ = ticker.tick(), if runner.is_running() => {
                runner.tick(&mut stdout)?;
            }
        }
    }

    tracing::info!(
        generation = runner.session().grid().generation(),
        "chunklife stopped"
    );

    Ok(())
}
