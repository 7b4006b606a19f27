//! Projectile tool (gun): small precise hits at a fixed fire rate.

use super::{Tool, ToolContext, ToolKind};
use crate::effects::ParticleBurst;
use glam::Vec2;

const HOLE_RADIUS: f32 = 4.2;
const SHAKE_MAGNITUDE: f32 = 3.0;
const SHAKE_MS: f32 = 60.0;

#[derive(Debug)]
pub struct Projectile {
    interval_ms: f32,
    /// Time until the next shot may fire.
    cooldown_ms: f32,
}

impl Projectile {
    pub fn new(interval_ms: f32) -> Self {
        Self {
            interval_ms: interval_ms.max(0.0),
            cooldown_ms: 0.0,
        }
    }

    #[inline]
    pub fn interval_ms(&self) -> f32 {
        self.interval_ms
    }

    #[inline]
    pub fn cooldown_ms(&self) -> f32 {
        self.cooldown_ms
    }

    /// Whether a shot may fire now.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.cooldown_ms <= 0.0
    }

    /// Run the fire cooldown down by `dt` seconds.
    pub fn cool(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.cooldown_ms = (self.cooldown_ms - dt * 1000.0).max(0.0);
        }
    }
}

impl Tool for Projectile {
    fn kind(&self) -> ToolKind {
        ToolKind::Projectile
    }

    /// Fires unconditionally; callers gate on [`Projectile::is_ready`].
    fn on_hit(&mut self, ctx: &mut ToolContext<'_>, point: Vec2, dt: f32) -> usize {
        let density = ctx.density();
        self.cooldown_ms = self.interval_ms;

        ctx.effects.spawn_particles(ParticleBurst::ProjectileSpark, point, density);
        ctx.audio.play_projectile();
        if let Some(surface) = ctx.surface.as_deref_mut() {
            surface.erase_circle(point, HOLE_RADIUS * density);
        }
        ctx.effects.add_shake(SHAKE_MAGNITUDE * density, SHAKE_MS);
        ctx.pool.hit_at(point, ToolKind::Projectile, dt)
    }

    fn on_round_reset(&mut self, _ctx: &mut ToolContext<'_>) {
        self.cooldown_ms = 0.0;
    }
}
