//! Blunt tool (hammer): one heavy hit per press.

use super::{Tool, ToolContext, ToolKind};
use crate::effects::ParticleBurst;
use crate::surface::{Blend, DamageSurface, Rgba};
use glam::Vec2;
use rand::{Rng, RngCore};
use std::f32::consts::TAU;
use std::fmt;

const SCORCH_RADIUS: f32 = 46.0;
const SCORCH: Rgba = Rgba::new(40, 40, 45, 0.6);
const CRACK: Rgba = Rgba::new(20, 20, 30, 0.55);
const CRACK_COUNT: usize = 12;
const CRACK_WIDTH: f32 = 1.5;
const CRACK_MIN: f32 = 40.0;
const CRACK_MAX: f32 = 130.0;
const SHAKE_MAGNITUDE: f32 = 3.0;
const SHAKE_MS: f32 = 120.0;

pub struct Blunt {
    rng: Box<dyn RngCore>,
}

impl fmt::Debug for Blunt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blunt").finish_non_exhaustive()
    }
}

impl Blunt {
    pub fn new(rng: impl RngCore + 'static) -> Self {
        Self { rng: Box::new(rng) }
    }

    /// Dark bruise plus radial cracks.
    fn stamp(&mut self, surface: &mut dyn DamageSurface, point: Vec2, density: f32) {
        surface.fill_radial_gradient(
            point,
            1.0,
            SCORCH_RADIUS * density,
            SCORCH,
            SCORCH.with_alpha(0.0),
            Blend::Normal,
        );
        for _ in 0..CRACK_COUNT {
            let angle = self.rng.random::<f32>() * TAU;
            let len = (CRACK_MIN + self.rng.random::<f32>() * (CRACK_MAX - CRACK_MIN)) * density;
            surface.stroke_line(point, point + Vec2::from_angle(angle) * len, CRACK, CRACK_WIDTH * density);
        }
    }
}

impl Tool for Blunt {
    fn kind(&self) -> ToolKind {
        ToolKind::Blunt
    }

    fn on_hit(&mut self, ctx: &mut ToolContext<'_>, point: Vec2, dt: f32) -> usize {
        let density = ctx.density();
        ctx.effects.spawn_particles(ParticleBurst::Impact, point, density);
        ctx.audio.play_impact();
        if let Some(surface) = ctx.surface.as_deref_mut() {
            self.stamp(surface, point, density);
        }
        ctx.effects.add_shake(SHAKE_MAGNITUDE * density, SHAKE_MS);
        ctx.pool.hit_at(point, ToolKind::Blunt, dt)
    }
}
