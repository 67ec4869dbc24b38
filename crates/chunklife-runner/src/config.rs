use std::env;
use std::time::Duration;

use chunklife_core::config::{DEFAULT_CELL_PX, DEFAULT_CHUNK_WIDTH, DEFAULT_EXTENT};
use chunklife_core::LifeConfig;
use thiserror::Error;

/// Default interval between generations while running
pub const DEFAULT_TICK_MS: u32 = 500;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a positive integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}

/// Runner configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Grid dimensions
    pub life: LifeConfig,
    /// Time between generations while running
    pub tick: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            life: LifeConfig::default(),
            tick: Duration::from_millis(u64::from(DEFAULT_TICK_MS)),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let cell_px = read_number(&lookup, "CHUNKLIFE_CELL_PX", DEFAULT_CELL_PX)?;
        let chunk_width = read_number(&lookup, "CHUNKLIFE_CHUNK_WIDTH", DEFAULT_CHUNK_WIDTH)?;
        let extent = read_number(&lookup, "CHUNKLIFE_EXTENT", DEFAULT_EXTENT)?;
        let tick_ms = read_number(&lookup, "CHUNKLIFE_TICK_MS", DEFAULT_TICK_MS)?;

        Ok(Self {
            life: LifeConfig::new(cell_px, chunk_width, extent),
            tick: Duration::from_millis(u64::from(tick_ms)),
        })
    }
}

fn read_number<F>(lookup: &F, name: &'static str, default: u32) -> Result<u32, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(name) else {
        return Ok(default);
    };

    match raw.trim().parse::<u32>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ConfigError::InvalidNumber { name, value: raw }),
    }
}
