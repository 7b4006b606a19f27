//! Tool damage rules.
//!
//! Each tool has a reach (before density scaling), a damage law and a
//! boundary rule:
//! - Blunt: flat 70 within 34, strict
//! - Flame: 90/s within 46, strict, scaled by the target's flame resistance
//! - Spray: 180/s within 130, inclusive
//! - Projectile: flat 60 within 10, strict

use crate::entity::CreatureKind;
use crate::tools::ToolKind;

pub const BLUNT_RADIUS: f32 = 34.0;
pub const BLUNT_DAMAGE: f32 = 70.0;
pub const FLAME_RADIUS: f32 = 46.0;
pub const FLAME_DPS: f32 = 90.0;
pub const SPRAY_RADIUS: f32 = 130.0;
pub const SPRAY_DPS: f32 = 180.0;
pub const PROJECTILE_RADIUS: f32 = 10.0;
pub const PROJECTILE_DAMAGE: f32 = 60.0;

/// How much health a hit removes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageLaw {
    /// Instantaneous damage per hit.
    Flat(f32),
    /// Continuous damage, multiplied by the frame delta.
    PerSecond(f32),
}

/// Damage rule for one tool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageRule {
    /// Reach before density scaling.
    pub radius: f32,
    pub law: DamageLaw,
    /// Whether a target exactly at the reach counts as hit.
    pub inclusive: bool,
}

impl DamageRule {
    /// Damage rule for `tool`.
    pub const fn for_tool(tool: ToolKind) -> Self {
        match tool {
            ToolKind::Blunt => Self {
                radius: BLUNT_RADIUS,
                law: DamageLaw::Flat(BLUNT_DAMAGE),
                inclusive: false,
            },
            ToolKind::Flame => Self {
                radius: FLAME_RADIUS,
                law: DamageLaw::PerSecond(FLAME_DPS),
                inclusive: false,
            },
            ToolKind::Spray => Self {
                radius: SPRAY_RADIUS,
                law: DamageLaw::PerSecond(SPRAY_DPS),
                inclusive: true,
            },
            ToolKind::Projectile => Self {
                radius: PROJECTILE_RADIUS,
                law: DamageLaw::Flat(PROJECTILE_DAMAGE),
                inclusive: false,
            },
        }
    }

    /// Squared reach at the given density.
    #[inline]
    pub fn reach_sq(&self, density: f32) -> f32 {
        let r = self.radius * density;
        r * r
    }

    /// Whether a target at squared distance `dist_sq` is inside the reach.
    #[inline]
    pub fn reaches(&self, dist_sq: f32, reach_sq: f32) -> bool {
        if self.inclusive {
            dist_sq <= reach_sq
        } else {
            dist_sq < reach_sq
        }
    }

    /// Damage dealt to a creature of `kind` over a frame of `dt` seconds.
    #[inline]
    pub fn damage(&self, tool: ToolKind, kind: CreatureKind, dt: f32) -> f32 {
        match self.law {
            DamageLaw::Flat(amount) => amount,
            DamageLaw::PerSecond(rate) => {
                let mult = if tool == ToolKind::Flame {
                    kind.flame_resistance()
                } else {
                    1.0
                };
                rate * dt * mult
            }
        }
    }
}
