//! Insecticide spray: wide continuous damage that leaves a green haze.

use super::{Tool, ToolContext, ToolKind};
use crate::audio::LoopKind;
use crate::effects::ParticleBurst;
use crate::surface::{Blend, Rgba};
use glam::Vec2;

const HAZE_INNER_RADIUS: f32 = 8.0;
const HAZE_RADIUS: f32 = 130.0;
const HAZE: Rgba = Rgba::new(80, 255, 120, 0.12);

#[derive(Debug, Default)]
pub struct Spray {
    active: bool,
}

impl Spray {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Tool for Spray {
    fn kind(&self) -> ToolKind {
        ToolKind::Spray
    }

    fn activate(&mut self, ctx: &mut ToolContext<'_>) {
        if !self.active {
            self.active = true;
            ctx.audio.start_continuous(LoopKind::Spray);
        }
    }

    fn deactivate(&mut self, ctx: &mut ToolContext<'_>) {
        if self.active {
            self.active = false;
            ctx.audio.stop_continuous(LoopKind::Spray);
        }
    }

    fn on_hit(&mut self, ctx: &mut ToolContext<'_>, point: Vec2, dt: f32) -> usize {
        let density = ctx.density();
        ctx.effects.spawn_particles(ParticleBurst::Toxic, point, density);
        if let Some(surface) = ctx.surface.as_deref_mut() {
            surface.fill_radial_gradient(
                point,
                HAZE_INNER_RADIUS,
                HAZE_RADIUS * density,
                HAZE,
                HAZE.with_alpha(0.0),
                Blend::Additive,
            );
        }
        ctx.pool.hit_at(point, ToolKind::Spray, dt)
    }

    fn on_round_reset(&mut self, ctx: &mut ToolContext<'_>) {
        self.active = false;
        ctx.audio.stop_continuous(LoopKind::Spray);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::CreatureKind;
    use crate::pool::SpawnOverrides;
    use crate::surface::Mark;
    use crate::tools::testing::{AudioCall, Fixture};

    #[test]
    fn test_hit_leaves_additive_haze() {
        let mut fx = Fixture::with_density(1.5);
        let mut spray = Spray::new();
        spray.on_hit(&mut fx.ctx(), Vec2::new(50.0, 50.0), 0.016);

        assert_eq!(
            fx.surface.marks,
            vec![Mark::Gradient {
                center: Vec2::new(50.0, 50.0),
                inner_radius: 8.0,
                outer_radius: 195.0,
                inner: HAZE,
                outer: HAZE.with_alpha(0.0),
                blend: Blend::Additive,
            }]
        );
        assert_eq!(fx.effects.particles().len(), 20);
        assert_eq!(fx.effects.shake_remaining_ms(), 0.0);
    }

    #[test]
    fn test_spray_kills_over_time() {
        let mut fx = Fixture::new();
        fx.pool
            .spawn(CreatureKind::Basic, SpawnOverrides::at(Vec2::new(100.0, 100.0)))
            .unwrap();
        let mut spray = Spray::new();
        let mut kills = 0;
        for _ in 0..10 {
            kills += spray.on_hit(&mut fx.ctx(), Vec2::new(200.0, 100.0), 0.016);
        }
        assert_eq!(kills, 1);
        assert_eq!(fx.pool.count_dead(), 1);
    }

    #[test]
    fn test_loop_lifecycle() {
        let mut fx = Fixture::new();
        let mut spray = Spray::new();
        spray.activate(&mut fx.ctx());
        assert!(fx.audio.is_running(LoopKind::Spray));
        spray.deactivate(&mut fx.ctx());
        spray.deactivate(&mut fx.ctx());
        assert_eq!(fx.audio.count(AudioCall::Stop(LoopKind::Spray)), 1);
    }
}
