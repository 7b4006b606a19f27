//! Flame tool: continuous damage with a looping burner sound.

use super::{Tool, ToolContext, ToolKind};
use crate::audio::LoopKind;
use crate::effects::ParticleBurst;
use glam::Vec2;

#[derive(Debug, Default)]
pub struct Flame {
    active: bool,
}

impl Flame {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Tool for Flame {
    fn kind(&self) -> ToolKind {
        ToolKind::Flame
    }

    fn activate(&mut self, ctx: &mut ToolContext<'_>) {
        if !self.active {
            self.active = true;
            ctx.audio.start_continuous(LoopKind::Flame);
        }
    }

    fn deactivate(&mut self, ctx: &mut ToolContext<'_>) {
        if self.active {
            self.active = false;
            ctx.audio.stop_continuous(LoopKind::Flame);
        }
    }

    fn on_hit(&mut self, ctx: &mut ToolContext<'_>, point: Vec2, dt: f32) -> usize {
        ctx.effects.spawn_particles(ParticleBurst::Flame, point, ctx.density());
        ctx.pool.hit_at(point, ToolKind::Flame, dt)
    }

    fn on_round_reset(&mut self, ctx: &mut ToolContext<'_>) {
        self.active = false;
        ctx.audio.stop_continuous(LoopKind::Flame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::CreatureKind;
    use crate::pool::SpawnOverrides;
    use crate::tools::testing::{AudioCall, Fixture};

    #[test]
    fn test_activate_and_deactivate_once() {
        let mut fx = Fixture::new();
        let mut flame = Flame::new();
        {
            let mut ctx = fx.ctx();
            flame.activate(&mut ctx);
            flame.activate(&mut ctx);
            flame.deactivate(&mut ctx);
            flame.deactivate(&mut ctx);
        }
        assert_eq!(fx.audio.count(AudioCall::Start(LoopKind::Flame)), 1);
        assert_eq!(fx.audio.count(AudioCall::Stop(LoopKind::Flame)), 1);
        assert!(!flame.is_active());
    }

    #[test]
    fn test_hit_burns_without_marks_or_shake() {
        let mut fx = Fixture::new();
        fx.pool
            .spawn(CreatureKind::Reviver, SpawnOverrides::at(Vec2::new(400.0, 300.0)))
            .unwrap();
        let mut flame = Flame::new();
        flame.on_hit(&mut fx.ctx(), Vec2::new(400.0, 300.0), 0.5);

        assert_eq!(fx.pool.get(0).unwrap().health, 225.0 - 22.5);
        assert_eq!(fx.effects.particles().len(), 76);
        assert_eq!(fx.effects.shake_remaining_ms(), 0.0);
        assert!(fx.surface.is_empty());
        assert!(fx.audio.calls.is_empty());
    }

    #[test]
    fn test_round_reset_stops_loop() {
        let mut fx = Fixture::new();
        let mut flame = Flame::new();
        flame.activate(&mut fx.ctx());
        flame.on_round_reset(&mut fx.ctx());
        assert!(!flame.is_active());
        assert!(!fx.audio.is_running(LoopKind::Flame));
    }
}
