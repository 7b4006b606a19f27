//! Bugsquash simulation core.
//!
//! Creature pool, tool dispatch and effect bookkeeping for the arena game.
//! Audio synthesis, rendering and input binding live outside this crate and
//! are reached through the traits in [`audio`], [`surface`] and [`pool`].

pub mod audio;
pub mod combat;
pub mod config;
pub mod effects;
pub mod entity;
pub mod error;
pub mod pool;
pub mod session;
pub mod storage;
pub mod surface;
pub mod tools;

// Re-export commonly used types
pub use config::Config;
pub use effects::{EffectLedger, ParticleBurst};
pub use entity::{Creature, CreatureId, CreatureKind};
pub use error::{ConfigError, StoreError};
pub use pool::{CreaturePool, PoolHooks, PoolSetup, SpawnOverrides};
pub use session::{FrameReport, Session};
pub use tools::{Tool, ToolKind, Toolbox};
