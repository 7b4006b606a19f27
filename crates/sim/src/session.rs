//! A running game session.
//!
//! Ties the pool, the effect ledger, the toolbox and audio together and owns
//! pointer input, so a continuous tool is never left running after release
//! or a tool switch.

use crate::audio::Audio;
use crate::config::Config;
use crate::effects::{EffectLedger, ParticleBurst};
use crate::pool::{CreaturePool, EventQueue, PoolEvent, PoolSetup};
use crate::surface::DamageSurface;
use crate::tools::{ToolContext, ToolKind, Toolbox};
use glam::Vec2;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, info};

/// What happened during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub kills: usize,
    pub revives: usize,
    pub spawns: usize,
    pub eats: usize,
    pub alive: usize,
    pub dead: usize,
}

/// Totals since the last new game or round reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundTotals {
    pub frames: u64,
    pub hits: u64,
    pub kills: u64,
    pub revives: u64,
    pub spawns: u64,
    pub eats: u64,
}

pub struct Session {
    pool: CreaturePool,
    effects: EffectLedger,
    tools: Toolbox,
    audio: Audio,
    surface: Option<Box<dyn DamageSurface>>,
    events: EventQueue,
    arena: Rc<Cell<Vec2>>,
    eat_rate: Rc<Cell<f32>>,
    pointer: Vec2,
    held: bool,
    totals: RoundTotals,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("pool", &self.pool)
            .field("tool", &self.tools.current())
            .field("held", &self.held)
            .field("totals", &self.totals)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Build an empty session. Call [`Session::new_game`] to populate it.
    pub fn new(config: &Config, audio: Audio, surface: Option<Box<dyn DamageSurface>>) -> Self {
        let arena = Rc::new(Cell::new(Vec2::new(config.arena.width, config.arena.height)));
        let eat_rate = Rc::new(Cell::new(config.pool.eat_rate));
        let events = EventQueue::new();
        let seed = config.pool.rng_seed;

        let bounds = arena.clone();
        let rate = eat_rate.clone();
        let setup = PoolSetup::new(config.arena.width, config.arena.height)
            .with_density(config.arena.density)
            .with_capacity(config.pool.capacity)
            .with_bounds(move || bounds.get())
            .with_eat_rate(move || rate.get())
            .with_hooks(events.clone());
        let setup = match seed {
            Some(seed) => setup.with_seed(seed),
            None => setup,
        };

        let effects = match seed {
            Some(seed) => EffectLedger::with_seed(seed.wrapping_add(1)),
            None => EffectLedger::new(SmallRng::from_os_rng()),
        };

        if surface.is_none() {
            debug!("No damage surface, tool marks disabled");
        }

        Self {
            pool: CreaturePool::new(setup),
            effects,
            tools: Toolbox::from_config(&config.tools, seed.map(|s| s.wrapping_add(2))),
            audio,
            surface,
            events,
            arena,
            eat_rate,
            pointer: Vec2::ZERO,
            held: false,
            totals: RoundTotals::default(),
        }
    }

    #[inline]
    pub fn pool(&self) -> &CreaturePool {
        &self.pool
    }

    #[inline]
    pub fn effects(&self) -> &EffectLedger {
        &self.effects
    }

    /// Camera offset for this frame.
    pub fn shake_offset(&mut self) -> Vec2 {
        self.effects.shake_offset()
    }

    #[inline]
    pub fn audio(&self) -> &Audio {
        &self.audio
    }

    pub fn toggle_muted(&mut self) -> bool {
        self.audio.toggle_muted()
    }

    #[inline]
    pub fn tool(&self) -> ToolKind {
        self.tools.current()
    }

    #[inline]
    pub fn totals(&self) -> RoundTotals {
        self.totals
    }

    #[inline]
    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Resize the arena. Creatures are pulled back inside on their next tick.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.arena.set(Vec2::new(width, height));
    }

    pub fn set_eat_rate(&mut self, rate: f32) {
        self.eat_rate.set(rate);
    }

    /// Start over with `population` fresh creatures.
    pub fn new_game(&mut self, population: usize) {
        self.release();
        self.pool.clear();
        self.pool.spawn_to_target(population);
        self.effects.clear();
        self.round_reset_tools();
        self.events.drain();
        self.totals = RoundTotals::default();
        info!("New game with {} creatures", self.pool.len());
    }

    /// Revive and reposition every creature for another round.
    pub fn reset_round(&mut self) {
        self.release();
        self.pool.reset_for_run();
        self.effects.clear();
        self.round_reset_tools();
        self.events.drain();
        self.totals = RoundTotals::default();
        info!("Round reset, {} creatures", self.pool.len());
    }

    /// Switch tools. A held continuous tool is stopped and the new one
    /// started if the pointer is still down.
    pub fn select_tool(&mut self, kind: ToolKind) {
        let previous = self.tools.current();
        if previous == kind {
            return;
        }
        let (tools, mut ctx) = self.split();
        tools.get_mut(previous).deactivate(&mut ctx);
        tools.select(kind);
        if self.held {
            self.press();
        }
        debug!("Selected {}", kind.name());
    }

    pub fn select_key(&mut self, key: &str) {
        self.select_tool(ToolKind::from_key(key));
    }

    pub fn pointer_down(&mut self, position: Vec2) {
        self.pointer = position;
        if self.held {
            return;
        }
        self.held = true;
        self.press();
    }

    pub fn pointer_move(&mut self, position: Vec2) {
        self.pointer = position;
    }

    pub fn pointer_up(&mut self) {
        self.release();
    }

    /// Advance the game by `dt` seconds.
    pub fn frame(&mut self, dt: f32) -> FrameReport {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        self.tools.projectile_mut().cool(dt);

        if self.held {
            let kind = self.tools.current();
            let fire = match kind {
                ToolKind::Flame | ToolKind::Spray => true,
                ToolKind::Projectile => self.tools.projectile().is_ready(),
                ToolKind::Blunt => false,
            };
            if fire {
                self.hit(kind, dt);
            }
        }

        self.pool.tick(dt);
        self.effects.tick(dt);
        self.totals.frames += 1;

        let mut report = FrameReport::default();
        for event in self.events.drain() {
            match event {
                PoolEvent::Killed { .. } => report.kills += 1,
                PoolEvent::Revived { .. } => report.revives += 1,
                PoolEvent::AbilityRevive { position, .. } => {
                    let density = self.pool.density();
                    self.effects.spawn_particles(ParticleBurst::FlameRevive, position, density);
                }
                PoolEvent::AbilitySpawn { .. } => report.spawns += 1,
                PoolEvent::Eat { .. } => report.eats += 1,
            }
        }
        report.dead = self.pool.count_dead();
        report.alive = self.pool.len() - report.dead;

        self.totals.kills += report.kills as u64;
        self.totals.revives += report.revives as u64;
        self.totals.spawns += report.spawns as u64;
        self.totals.eats += report.eats as u64;
        report
    }

    /// Every creature is dead.
    pub fn is_cleared(&self) -> bool {
        !self.pool.is_empty() && self.pool.count_dead() >= self.pool.len()
    }

    /// Start whatever the current tool does on press.
    fn press(&mut self) {
        let kind = self.tools.current();
        match kind {
            ToolKind::Flame | ToolKind::Spray => {
                let (tools, mut ctx) = self.split();
                tools.get_mut(kind).activate(&mut ctx);
            }
            ToolKind::Blunt => self.hit(kind, 0.0),
            ToolKind::Projectile => {
                if self.tools.projectile().is_ready() {
                    self.hit(kind, 0.0);
                }
            }
        }
    }

    fn release(&mut self) {
        if !self.held {
            return;
        }
        self.held = false;
        let kind = self.tools.current();
        let (tools, mut ctx) = self.split();
        tools.get_mut(kind).deactivate(&mut ctx);
    }

    fn hit(&mut self, kind: ToolKind, dt: f32) {
        let point = self.pointer;
        let (tools, mut ctx) = self.split();
        tools.get_mut(kind).on_hit(&mut ctx, point, dt);
        self.totals.hits += 1;
    }

    fn round_reset_tools(&mut self) {
        let (tools, mut ctx) = self.split();
        tools.round_reset_all(&mut ctx);
    }

    fn split(&mut self) -> (&mut Toolbox, ToolContext<'_>) {
        let ctx = ToolContext {
            pool: &mut self.pool,
            effects: &mut self.effects,
            audio: &mut self.audio,
            surface: surface_mut(&mut self.surface),
        };
        (&mut self.tools, ctx)
    }
}

fn surface_mut(surface: &mut Option<Box<dyn DamageSurface>>) -> Option<&mut dyn DamageSurface> {
    match surface {
        Some(surface) => Some(surface.as_mut()),
        None => None,
    }
}
