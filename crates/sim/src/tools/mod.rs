//! Player tools.
//!
//! Every tool hit runs the same pipeline: particles, audio, a persistent mark
//! on the damage surface if there is one, screen shake, then damage against
//! the pool.

use crate::audio::AudioSink;
use crate::config::ToolsConfig;
use crate::effects::EffectLedger;
use crate::pool::CreaturePool;
use crate::surface::DamageSurface;
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use tracing::debug;

pub mod blunt;
pub mod flame;
pub mod projectile;
pub mod spray;

pub use blunt::Blunt;
pub use flame::Flame;
pub use projectile::Projectile;
pub use spray::Spray;

#[cfg(test)]
pub(crate) mod testing;

/// The four tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToolKind {
    #[default]
    Blunt,
    Flame,
    Spray,
    Projectile,
}

impl ToolKind {
    pub const ALL: [ToolKind; 4] = [ToolKind::Blunt, ToolKind::Flame, ToolKind::Spray, ToolKind::Projectile];

    /// Resolve a key binding or tool name. Unknown keys select `Blunt`.
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "h" | "hammer" | "blunt" => Self::Blunt,
            "f" | "flame" => Self::Flame,
            "i" | "spray" => Self::Spray,
            "g" | "gun" | "projectile" => Self::Projectile,
            other => {
                debug!("Unknown tool key {:?}, using blunt", other);
                Self::Blunt
            }
        }
    }

    /// Default key binding.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Blunt => "h",
            Self::Flame => "f",
            Self::Spray => "i",
            Self::Projectile => "g",
        }
    }

    /// Continuous tools damage every frame while held.
    pub const fn is_continuous(self) -> bool {
        matches!(self, Self::Flame | Self::Spray)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Blunt => "blunt",
            Self::Flame => "flame",
            Self::Spray => "spray",
            Self::Projectile => "projectile",
        }
    }
}

/// Everything a tool touches during a hit.
pub struct ToolContext<'a> {
    pub pool: &'a mut CreaturePool,
    pub effects: &'a mut EffectLedger,
    pub audio: &'a mut dyn AudioSink,
    pub surface: Option<&'a mut dyn DamageSurface>,
}

impl ToolContext<'_> {
    #[inline]
    pub fn density(&self) -> f32 {
        self.pool.density()
    }
}

pub trait Tool {
    fn kind(&self) -> ToolKind;

    fn is_continuous(&self) -> bool {
        self.kind().is_continuous()
    }

    /// Pointer pressed with this tool selected.
    fn activate(&mut self, _ctx: &mut ToolContext<'_>) {}

    /// Pointer released or tool switched away. Safe to call when inactive.
    fn deactivate(&mut self, _ctx: &mut ToolContext<'_>) {}

    /// Hit at `point`. Returns the number of creatures killed.
    fn on_hit(&mut self, ctx: &mut ToolContext<'_>, point: Vec2, dt: f32) -> usize;

    /// New round: drop any running state.
    fn on_round_reset(&mut self, _ctx: &mut ToolContext<'_>) {}
}

/// Owns one instance of each tool and tracks the selection.
#[derive(Debug)]
pub struct Toolbox {
    current: ToolKind,
    blunt: Blunt,
    flame: Flame,
    spray: Spray,
    projectile: Projectile,
}

impl Toolbox {
    pub fn new(projectile_interval_ms: f32, rng: impl RngCore + 'static) -> Self {
        Self {
            current: ToolKind::Blunt,
            blunt: Blunt::new(rng),
            flame: Flame::new(),
            spray: Spray::new(),
            projectile: Projectile::new(projectile_interval_ms),
        }
    }

    pub fn from_config(config: &ToolsConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        let mut toolbox = Self::new(config.projectile_interval_ms, rng);
        toolbox.select(ToolKind::from_key(&config.initial_tool));
        toolbox
    }

    #[inline]
    pub fn current(&self) -> ToolKind {
        self.current
    }

    /// Change the selection and return the previous one. No tool callbacks
    /// run here; the caller deactivates the old tool.
    pub fn select(&mut self, kind: ToolKind) -> ToolKind {
        std::mem::replace(&mut self.current, kind)
    }

    pub fn get(&self, kind: ToolKind) -> &dyn Tool {
        match kind {
            ToolKind::Blunt => &self.blunt,
            ToolKind::Flame => &self.flame,
            ToolKind::Spray => &self.spray,
            ToolKind::Projectile => &self.projectile,
        }
    }

    pub fn get_mut(&mut self, kind: ToolKind) -> &mut dyn Tool {
        match kind {
            ToolKind::Blunt => &mut self.blunt,
            ToolKind::Flame => &mut self.flame,
            ToolKind::Spray => &mut self.spray,
            ToolKind::Projectile => &mut self.projectile,
        }
    }

    pub fn current_mut(&mut self) -> &mut dyn Tool {
        self.get_mut(self.current)
    }

    #[inline]
    pub fn projectile(&self) -> &Projectile {
        &self.projectile
    }

    #[inline]
    pub fn projectile_mut(&mut self) -> &mut Projectile {
        &mut self.projectile
    }

    /// Round-reset every tool, selected or not.
    pub fn round_reset_all(&mut self, ctx: &mut ToolContext<'_>) {
        for kind in ToolKind::ALL {
            self.get_mut(kind).on_round_reset(ctx);
        }
    }
}
