//! Game configuration.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Largest pool capacity a config may ask for.
pub const MAX_POOL_CAPACITY: usize = 10_000;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub arena: ArenaConfig,
    #[serde(default)]
    pub pool: PoolConfig,
    #[serde(default)]
    pub tools: ToolsConfig,
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub sim: SimConfig,
}

impl Config {
    /// Load configuration from `path`, writing the defaults there if the file
    /// does not exist yet.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str::<Self>(&contents)?
        } else {
            info!("No {} found, creating default config", path.display());
            let default_config = Self::default();
            std::fs::write(path, toml::to_string_pretty(&default_config)?)?;
            default_config
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config = toml::from_str::<Self>(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.arena.density > 0.0) || !self.arena.density.is_finite() {
            return Err(ConfigError::Invalid {
                field: "arena.density",
                reason: format!("must be a positive number, got {}", self.arena.density),
            });
        }
        if !(self.arena.width > 0.0) || !(self.arena.height > 0.0) {
            return Err(ConfigError::Invalid {
                field: "arena.width/height",
                reason: format!(
                    "arena must have a positive size, got {}x{}",
                    self.arena.width, self.arena.height
                ),
            });
        }
        if self.pool.capacity == 0 || self.pool.capacity > MAX_POOL_CAPACITY {
            return Err(ConfigError::Invalid {
                field: "pool.capacity",
                reason: format!("must be between 1 and {}, got {}", MAX_POOL_CAPACITY, self.pool.capacity),
            });
        }
        if self.sim.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "sim.tick_interval_ms",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Arena geometry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArenaConfig {
    /// Arena width in device pixels.
    #[serde(default = "default_arena_width")]
    pub width: f32,
    /// Arena height in device pixels.
    #[serde(default = "default_arena_height")]
    pub height: f32,
    /// Display density; multiplies every radius and offset.
    #[serde(default = "default_density")]
    pub density: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: default_arena_width(),
            height: default_arena_height(),
            density: default_density(),
        }
    }
}

fn default_arena_width() -> f32 {
    1280.0
}
fn default_arena_height() -> f32 {
    720.0
}
fn default_density() -> f32 {
    1.0
}

/// Creature pool settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PoolConfig {
    /// Hard cap on pool size.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// Population spawned when a new game starts.
    #[serde(default = "default_initial_population")]
    pub initial_population: usize,
    /// Global eat-rate multiplier.
    #[serde(default = "default_eat_rate")]
    pub eat_rate: f32,
    /// Fixed RNG seed for reproducible runs.
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            initial_population: default_initial_population(),
            eat_rate: default_eat_rate(),
            rng_seed: None,
        }
    }
}

fn default_capacity() -> usize {
    100
}
fn default_initial_population() -> usize {
    40
}
fn default_eat_rate() -> f32 {
    0.6
}

/// Tool tuning.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToolsConfig {
    /// Minimum time between projectile shots while the trigger is held.
    #[serde(default = "default_projectile_interval")]
    pub projectile_interval_ms: f32,
    /// Tool selected at startup (`h`, `f`, `i`, `g` or a tool name).
    #[serde(default = "default_tool")]
    pub initial_tool: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            projectile_interval_ms: default_projectile_interval(),
            initial_tool: default_tool(),
        }
    }
}

fn default_projectile_interval() -> f32 {
    90.0
}
fn default_tool() -> String {
    "h".to_string()
}

/// Audio front-end settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AudioConfig {
    /// File holding the persisted mute flag.
    #[serde(default = "default_prefs_path")]
    pub prefs_path: PathBuf,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            prefs_path: default_prefs_path(),
        }
    }
}

fn default_prefs_path() -> PathBuf {
    PathBuf::from("prefs.toml")
}

/// Frame loop settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimConfig {
    /// Frame interval in milliseconds.
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
    /// Stop after this many frames (0 = run until the arena is cleared).
    #[serde(default = "default_max_frames")]
    pub max_frames: u64,
}

impl SimConfig {
    /// Whether the driver should run frame number `frames` (zero-based).
    #[inline]
    pub fn runs_frame(&self, frames: u64) -> bool {
        self.max_frames == 0 || frames < self.max_frames
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval(),
            max_frames: default_max_frames(),
        }
    }
}

fn default_tick_interval() -> u64 {
    16
}
fn default_max_frames() -> u64 {
    3600
}
