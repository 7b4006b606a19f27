//! The creature record.

use super::kind::CreatureKind;
use glam::Vec2;

/// Index of a creature inside its pool.
///
/// Creatures are never removed individually, so an id stays valid until the
/// pool is cleared or truncated below it.
pub type CreatureId = usize;

/// One simulated bug.
#[derive(Debug, Clone, PartialEq)]
pub struct Creature {
    /// Creature kind.
    pub kind: CreatureKind,
    /// Position in arena coordinates.
    pub position: Vec2,
    /// Heading in radians.
    pub heading: f32,
    /// Movement speed in units per second.
    pub speed: f32,
    /// Maximum heading drift in radians per second.
    pub turn_rate: f32,
    /// Body radius (density scaled).
    pub radius: f32,
    /// Eat-event radius (density scaled).
    pub eat_radius: f32,
    pub health: f32,
    pub max_health: f32,
    pub dead: bool,
    /// Milliseconds until the kind's ability fires.
    pub ability_cooldown_ms: f32,
    /// Milliseconds until the next eat event.
    pub eat_timer_ms: f32,
}

impl Creature {
    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.dead
    }

    /// Squared distance from this creature's centre to `point`.
    #[inline]
    pub fn distance_sq(&self, point: Vec2) -> f32 {
        self.position.distance_squared(point)
    }

    /// Health as a fraction of max health.
    #[inline]
    pub fn health_fraction(&self) -> f32 {
        if self.max_health > 0.0 {
            (self.health / self.max_health).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Keep the creature inside `[radius, bound - radius]` on both axes,
    /// reflecting the heading on the axis that was crossed.
    pub fn reflect_in(&mut self, bounds: Vec2) {
        let r = self.radius;
        if self.position.x < r || self.position.x > bounds.x - r {
            self.heading = std::f32::consts::PI - self.heading;
            self.position.x = clamp_axis(self.position.x, r, bounds.x - r);
        }
        if self.position.y < r || self.position.y > bounds.y - r {
            self.heading = -self.heading;
            self.position.y = clamp_axis(self.position.y, r, bounds.y - r);
        }
    }
}

/// Clamp that tolerates an arena narrower than the creature (`lo > hi`),
/// pinning to the centre instead of panicking like `f32::clamp`.
#[inline]
fn clamp_axis(value: f32, lo: f32, hi: f32) -> f32 {
    if lo > hi {
        (lo + hi) * 0.5
    } else {
        value.max(lo).min(hi)
    }
}
