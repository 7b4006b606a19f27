//! Creature pool.
//!
//! Owns every creature in the arena, moves them each tick, runs their timed
//! abilities and resolves tool hits against them.

mod ability;
mod hooks;

pub use hooks::{EventQueue, NoHooks, PoolEvent, PoolHooks};

use crate::combat::DamageRule;
use crate::entity::{Creature, CreatureId, CreatureKind};
use crate::tools::ToolKind;
use glam::Vec2;
use hooks::guarded;
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use std::f32::consts::TAU;
use std::fmt;
use tracing::{debug, warn};

/// Default hard cap on pool size.
pub const MAX_CREATURES: usize = 100;

/// Eat-rate multiplier used when none is configured.
pub const DEFAULT_EAT_RATE: f32 = 0.6;

/// Everything a pool needs at construction time.
pub struct PoolSetup {
    /// Display density; scales radii and offsets.
    pub density: f32,
    /// Hard cap on pool size.
    pub capacity: usize,
    /// Current arena size.
    pub bounds: Box<dyn Fn() -> Vec2>,
    /// Current global eat-rate multiplier.
    pub eat_rate: Box<dyn Fn() -> f32>,
    pub rng: Box<dyn RngCore>,
    pub hooks: Box<dyn PoolHooks>,
}

impl PoolSetup {
    /// Setup for a fixed-size arena with default density, capacity and eat
    /// rate, an OS-seeded RNG and no hooks.
    pub fn new(width: f32, height: f32) -> Self {
        let bounds = Vec2::new(width, height);
        Self {
            density: 1.0,
            capacity: MAX_CREATURES,
            bounds: Box::new(move || bounds),
            eat_rate: Box::new(|| DEFAULT_EAT_RATE),
            rng: Box::new(SmallRng::from_os_rng()),
            hooks: Box::new(NoHooks),
        }
    }

    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_bounds(mut self, bounds: impl Fn() -> Vec2 + 'static) -> Self {
        self.bounds = Box::new(bounds);
        self
    }

    pub fn with_eat_rate(mut self, eat_rate: impl Fn() -> f32 + 'static) -> Self {
        self.eat_rate = Box::new(eat_rate);
        self
    }

    pub fn with_rng(mut self, rng: impl RngCore + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Use a deterministic RNG seeded with `seed`.
    pub fn with_seed(self, seed: u64) -> Self {
        self.with_rng(SmallRng::seed_from_u64(seed))
    }

    pub fn with_hooks(mut self, hooks: impl PoolHooks + 'static) -> Self {
        self.hooks = Box::new(hooks);
        self
    }
}

/// Values applied to a freshly built creature, after randomisation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpawnOverrides {
    pub position: Option<Vec2>,
    pub heading: Option<f32>,
    pub speed: Option<f32>,
    pub health: Option<f32>,
    pub ability_cooldown_ms: Option<f32>,
    pub eat_timer_ms: Option<f32>,
}

impl SpawnOverrides {
    /// Overrides that only pin the position.
    pub fn at(position: Vec2) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    fn apply(&self, creature: &mut Creature) {
        if let Some(position) = self.position {
            creature.position = position;
        }
        if let Some(heading) = self.heading {
            creature.heading = heading;
        }
        if let Some(speed) = self.speed {
            creature.speed = speed;
        }
        if let Some(health) = self.health {
            creature.health = health;
        }
        if let Some(cooldown) = self.ability_cooldown_ms {
            creature.ability_cooldown_ms = cooldown;
        }
        if let Some(timer) = self.eat_timer_ms {
            creature.eat_timer_ms = timer;
        }
    }
}

/// Fixed-capacity set of creatures.
///
/// Dead creatures stay in the pool; only [`CreaturePool::clear`] and
/// shrinking via [`CreaturePool::spawn_to_target`] remove records.
pub struct CreaturePool {
    creatures: Vec<Creature>,
    dead_count: usize,
    density: f32,
    capacity: usize,
    bounds: Box<dyn Fn() -> Vec2>,
    eat_rate: Box<dyn Fn() -> f32>,
    rng: Box<dyn RngCore>,
    hooks: Box<dyn PoolHooks>,
}

impl fmt::Debug for CreaturePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreaturePool")
            .field("len", &self.creatures.len())
            .field("dead_count", &self.dead_count)
            .field("density", &self.density)
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl CreaturePool {
    /// Create an empty pool.
    pub fn new(setup: PoolSetup) -> Self {
        let density = if setup.density.is_finite() && setup.density > 0.0 {
            setup.density
        } else {
            warn!("Invalid density {}, using 1.0", setup.density);
            1.0
        };
        Self {
            creatures: Vec::with_capacity(setup.capacity.min(MAX_CREATURES)),
            dead_count: 0,
            density,
            capacity: setup.capacity,
            bounds: setup.bounds,
            eat_rate: setup.eat_rate,
            rng: setup.rng,
            hooks: setup.hooks,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.creatures.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn density(&self) -> f32 {
        self.density
    }

    #[inline]
    pub fn get(&self, id: CreatureId) -> Option<&Creature> {
        self.creatures.get(id)
    }

    /// Mutable access to a creature. Use [`CreaturePool::kill_one`] and
    /// [`CreaturePool::revive_one`] to change its dead flag, or the dead
    /// counter drifts.
    #[inline]
    pub fn get_mut(&mut self, id: CreatureId) -> Option<&mut Creature> {
        self.creatures.get_mut(id)
    }

    #[inline]
    pub fn creatures(&self) -> &[Creature] {
        &self.creatures
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (CreatureId, &Creature)> {
        self.creatures.iter().enumerate()
    }

    pub fn count_alive(&self) -> usize {
        self.creatures.iter().filter(|c| c.is_alive()).count()
    }

    #[inline]
    pub fn count_dead(&self) -> usize {
        self.dead_count
    }

    /// Remove every creature (new game).
    pub fn clear(&mut self) {
        self.creatures.clear();
        self.dead_count = 0;
    }

    /// Spawn one creature of `kind` at a random position.
    ///
    /// Returns `None` when the pool is full.
    pub fn spawn(&mut self, kind: CreatureKind, overrides: SpawnOverrides) -> Option<CreatureId> {
        if self.creatures.len() >= self.capacity {
            debug!("Pool full ({}), not spawning {}", self.capacity, kind.name());
            return None;
        }
        let mut creature = self.make_creature(kind);
        overrides.apply(&mut creature);
        let id = self.creatures.len();
        self.creatures.push(creature);
        self.enforce_capacity();
        Some(id)
    }

    /// Spawn by kind name; unknown names spawn a `Basic` creature.
    pub fn spawn_named(&mut self, key: &str, overrides: SpawnOverrides) -> Option<CreatureId> {
        self.spawn(CreatureKind::from_key(key), overrides)
    }

    /// Grow or shrink the pool to exactly `target` creatures (clamped to the
    /// capacity). New creatures get a weighted-random kind.
    pub fn spawn_to_target(&mut self, target: usize) {
        let target = target.min(self.capacity);
        let current = self.creatures.len();
        if current > target {
            self.creatures.truncate(target);
            self.recount_dead();
        } else {
            for _ in current..target {
                if self.creatures.len() >= self.capacity {
                    break;
                }
                let kind = CreatureKind::from_roll(self.unit());
                let creature = self.make_creature(kind);
                self.creatures.push(creature);
            }
        }
        self.enforce_capacity();
    }

    /// Advance every creature by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        let dt = sanitize_dt(dt);
        let elapsed_ms = dt * 1000.0;
        let bounds = self.bounds();
        let eat_rate = {
            let rate = (self.eat_rate)();
            if rate.is_finite() && rate >= 0.0 { rate } else { DEFAULT_EAT_RATE }
        };

        // Offspring pushed during the loop are visited in the same tick.
        let mut i = 0;
        while i < self.creatures.len() {
            let kind = self.creatures[i].kind;

            if self.creatures[i].is_alive() {
                let drift = self.signed_unit();
                let creature = &mut self.creatures[i];
                creature.heading += drift * creature.turn_rate * dt;
                creature.position += Vec2::from_angle(creature.heading) * creature.speed * dt;
                creature.reflect_in(bounds);

                creature.eat_timer_ms -= elapsed_ms * eat_rate;
                creature.ability_cooldown_ms -= elapsed_ms;
                if creature.eat_timer_ms <= 0.0 {
                    let position = creature.position;
                    let radius = creature.eat_radius;
                    let roll = self.unit();
                    self.creatures[i].eat_timer_ms = kind.stats().eat_cooldown_ms * (0.7 + roll * 0.6);
                    guarded("on_eat", || self.hooks.on_eat(position, radius));
                }

                if kind == CreatureKind::Spawner && self.creatures[i].ability_cooldown_ms <= 0.0 {
                    self.fire_spawn(i);
                }
            }

            // Revivers run their ability even while dead.
            if kind == CreatureKind::Reviver {
                if self.creatures[i].dead {
                    self.creatures[i].ability_cooldown_ms -= elapsed_ms;
                }
                if self.creatures[i].ability_cooldown_ms <= 0.0 {
                    self.fire_revive(i);
                }
            }

            i += 1;
        }

        self.enforce_capacity();
    }

    /// Apply `tool` damage at `point` to every living creature in reach.
    ///
    /// `dt` only matters for the continuous tools. Returns the number of
    /// creatures killed by this hit.
    pub fn hit_at(&mut self, point: Vec2, tool: ToolKind, dt: f32) -> usize {
        let rule = DamageRule::for_tool(tool);
        let reach_sq = rule.reach_sq(self.density);
        let dt = sanitize_dt(dt);
        let mut kills = 0;

        for id in 0..self.creatures.len() {
            let creature = &mut self.creatures[id];
            if creature.dead || !rule.reaches(creature.distance_sq(point), reach_sq) {
                continue;
            }
            creature.health -= rule.damage(tool, creature.kind, dt);
            if creature.health <= 0.0 && self.kill_one(id) {
                kills += 1;
            }
        }

        if kills > 0 {
            debug!("{:?} hit at ({:.1}, {:.1}) killed {}", tool, point.x, point.y, kills);
        }
        kills
    }

    /// Kill a creature. Returns `false` if it was already dead or `id` is out
    /// of range.
    pub fn kill_one(&mut self, id: CreatureId) -> bool {
        let Some(creature) = self.creatures.get_mut(id) else {
            return false;
        };
        if creature.dead {
            return false;
        }
        creature.dead = true;
        creature.health = 0.0;
        self.dead_count += 1;

        let creature = &self.creatures[id];
        guarded("on_killed", || self.hooks.on_killed(creature));
        true
    }

    /// Bring a dead creature back with `health`. Returns `false` if it was
    /// not dead.
    pub fn revive_one(&mut self, id: CreatureId, health: f32) -> bool {
        let Some(creature) = self.creatures.get_mut(id) else {
            return false;
        };
        if !creature.dead {
            return false;
        }
        creature.dead = false;
        creature.health = health;
        self.dead_count = self.dead_count.saturating_sub(1);

        let creature = &self.creatures[id];
        guarded("on_revived", || self.hooks.on_revived(creature));
        guarded("on_ability_revive", || self.hooks.on_ability_revive(creature));
        true
    }

    /// Restore every creature for a fresh round: full health, new position
    /// and eat timer, dead counter cleared.
    pub fn reset_for_run(&mut self) {
        let bounds = self.bounds();
        self.dead_count = 0;
        for id in 0..self.creatures.len() {
            let position = Vec2::new(self.range(0.0, bounds.x), self.range(0.0, bounds.y));
            let eat_cooldown = self.creatures[id].kind.stats().eat_cooldown_ms;
            let eat_timer = self.range(0.0, eat_cooldown);
            let creature = &mut self.creatures[id];
            creature.dead = false;
            creature.health = creature.max_health;
            creature.position = position;
            creature.eat_timer_ms = eat_timer;
        }
    }

    /// Drop any creatures beyond the capacity.
    pub fn enforce_capacity(&mut self) {
        if self.creatures.len() > self.capacity {
            self.creatures.truncate(self.capacity);
            self.recount_dead();
        }
    }

    fn recount_dead(&mut self) {
        self.dead_count = self.creatures.iter().filter(|c| c.dead).count();
    }

    /// Current arena size, with negative or non-finite values read as 0.
    fn bounds(&self) -> Vec2 {
        let raw = (self.bounds)();
        let axis = |v: f32| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        Vec2::new(axis(raw.x), axis(raw.y))
    }

    fn make_creature(&mut self, kind: CreatureKind) -> Creature {
        let stats = kind.stats();
        let bounds = self.bounds();
        let position = Vec2::new(self.range(0.0, bounds.x), self.range(0.0, bounds.y));
        let heading = self.range(0.0, TAU);
        let speed = self.range(stats.speed.start, stats.speed.end);
        let turn_rate = self.range(stats.turn_rate.start, stats.turn_rate.end);
        let eat_timer_ms = self.range(0.0, stats.eat_cooldown_ms);
        Creature {
            kind,
            position,
            heading,
            speed,
            turn_rate,
            radius: stats.radius * self.density,
            eat_radius: stats.eat_radius * self.density,
            health: stats.max_health,
            max_health: stats.max_health,
            dead: false,
            ability_cooldown_ms: 0.0,
            eat_timer_ms,
        }
    }

    /// Uniform value in `[0, 1)`.
    #[inline]
    fn unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    /// Uniform value in `[-1, 1)`.
    #[inline]
    fn signed_unit(&mut self) -> f32 {
        self.unit() * 2.0 - 1.0
    }

    /// Uniform value in `[min, max)`; returns `min` for an empty range.
    #[inline]
    fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.unit() * (max - min)
    }
}

#[inline]
fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 { dt } else { 0.0 }
}
