//! Spawner and reviver abilities.

use super::CreaturePool;
use super::hooks::guarded;
use crate::entity::{CreatureId, CreatureKind};
use glam::Vec2;
use tracing::debug;

/// Most offspring a spawner drops per trigger.
pub const SPAWN_BROOD: usize = 2;
/// Offspring offset from the parent, per axis, before density scaling.
pub const SPAWN_SPREAD: f32 = 30.0;
/// Reach of the revive search, before density scaling.
pub const REVIVE_RADIUS: f32 = 150.0;
/// Fraction of max health a revived creature comes back with.
pub const REVIVE_HEALTH_FRACTION: f32 = 0.4;
/// Floor on revive health.
pub const REVIVE_MIN_HEALTH: f32 = 20.0;

/// Health a creature with `max_health` comes back with.
#[inline]
pub fn revive_health(max_health: f32) -> f32 {
    (max_health * REVIVE_HEALTH_FRACTION).floor().max(REVIVE_MIN_HEALTH)
}

impl CreaturePool {
    /// Spawner ability: drop up to [`SPAWN_BROOD`] Basic offspring around the
    /// parent, limited by the room left in the pool.
    pub(super) fn fire_spawn(&mut self, parent: CreatureId) {
        self.creatures[parent].ability_cooldown_ms = CreatureKind::Spawner.stats().ability_cooldown_ms;

        let room = self.capacity.saturating_sub(self.creatures.len());
        let brood = room.min(SPAWN_BROOD);
        if brood == 0 {
            return;
        }

        let origin = self.creatures[parent].position;
        guarded("on_ability_spawn", || self.hooks.on_ability_spawn(origin));

        let spread = SPAWN_SPREAD * self.density;
        for _ in 0..brood {
            let mut child = self.make_creature(CreatureKind::Basic);
            let offset = Vec2::new(self.signed_unit(), self.signed_unit()) * spread;
            child.position = origin + offset;
            self.creatures.push(child);
        }
        debug!("Spawner {} dropped {} offspring", parent, brood);
        self.enforce_capacity();
    }

    /// Reviver ability: revive the nearest corpse within
    /// [`REVIVE_RADIUS`]. A dead reviver is its own nearest corpse.
    pub(super) fn fire_revive(&mut self, reviver: CreatureId) {
        self.creatures[reviver].ability_cooldown_ms = CreatureKind::Reviver.stats().ability_cooldown_ms;

        let origin = self.creatures[reviver].position;
        let reach = REVIVE_RADIUS * self.density;
        let reach_sq = reach * reach;

        let target = self
            .creatures
            .iter()
            .enumerate()
            .filter(|(_, c)| c.dead)
            .map(|(id, c)| (id, c.distance_sq(origin)))
            .filter(|&(_, d)| d < reach_sq)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id);

        let Some(target) = target else {
            return;
        };
        let health = revive_health(self.creatures[target].max_health);
        if self.revive_one(target, health) {
            debug!("Reviver {} revived {} with {} hp", reviver, target, health);
        }
    }
}
