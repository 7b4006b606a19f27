//! Bugsquash - headless frame-loop driver.
//!
//! Loads `config.toml` (or the path given as the first argument), fills the
//! arena and lets a scripted pointer work through the tools until the arena
//! is cleared or the frame limit is reached.

use anyhow::Context;
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use sim::audio::{Audio, AudioBackend, Cue};
use sim::storage::{FileStore, MuteFlag};
use sim::{Config, Session, ToolKind};
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior, interval};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Frames spent on each tool before moving to the next.
const FRAMES_PER_TOOL: u64 = 240;
/// Frames between blunt strikes.
const STRIKE_EVERY: u64 = 12;
/// Pointer speed towards its target, in pixels per second.
const POINTER_SPEED: f32 = 900.0;

/// Backend that logs cues instead of synthesising them.
struct LogBackend;

impl AudioBackend for LogBackend {
    fn cue(&mut self, cue: Cue) {
        debug!(?cue, "audio");
    }
}

/// Scripted player: chases the nearest living creature and cycles tools.
struct Autoplay {
    rng: SmallRng,
    pointer: Vec2,
    frame: u64,
    next_tool: usize,
}

impl Autoplay {
    fn new(seed: Option<u64>, start: Vec2) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed ^ 0x5eed),
            None => SmallRng::from_os_rng(),
        };
        Self {
            rng,
            pointer: start,
            frame: 0,
            next_tool: 0,
        }
    }

    fn step(&mut self, session: &mut Session, arena: Vec2, dt: f32) {
        if self.frame % FRAMES_PER_TOOL == 0 {
            let kind = ToolKind::ALL[self.next_tool % ToolKind::ALL.len()];
            self.next_tool += 1;
            session.select_tool(kind);
            info!("Switching to {}", kind.name());
        }

        let target = session
            .pool()
            .creatures()
            .iter()
            .filter(|c| c.is_alive())
            .map(|c| c.position)
            .min_by(|a, b| a.distance_squared(self.pointer).total_cmp(&b.distance_squared(self.pointer)))
            .unwrap_or_else(|| Vec2::new(self.rng.random::<f32>() * arena.x, self.rng.random::<f32>() * arena.y));

        let step = POINTER_SPEED * dt;
        let to_target = target - self.pointer;
        self.pointer = if to_target.length() <= step {
            target
        } else {
            self.pointer + to_target.normalize_or_zero() * step
        };
        session.pointer_move(self.pointer);

        match session.tool() {
            ToolKind::Blunt => {
                if self.frame % STRIKE_EVERY == 0 {
                    session.pointer_down(self.pointer);
                    session.pointer_up();
                }
            }
            _ => {
                if !session.is_held() {
                    session.pointer_down(self.pointer);
                }
            }
        }

        self.frame += 1;
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sim=debug")))
        .init();

    info!("Bugsquash v{}", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.toml".to_string());
    let config = Config::load(&config_path).with_context(|| format!("loading {}", config_path))?;
    info!("Loaded configuration from {}", config_path);
    info!("  Arena: {}x{} @ {}x", config.arena.width, config.arena.height, config.arena.density);
    info!("  Population: {} (cap {})", config.pool.initial_population, config.pool.capacity);
    info!("  Tick: {} ms, max {} frames", config.sim.tick_interval_ms, config.sim.max_frames);

    let mute = MuteFlag::load(Some(Box::new(FileStore::new(&config.audio.prefs_path))));
    let audio = Audio::new(Some(Box::new(LogBackend)), mute);
    let mut session = Session::new(&config, audio, None);
    session.new_game(config.pool.initial_population);

    let arena = Vec2::new(config.arena.width, config.arena.height);
    let mut autoplay = Autoplay::new(config.pool.rng_seed, arena * 0.5);

    let tick = Duration::from_millis(config.sim.tick_interval_ms.max(1));
    let mut ticker = interval(tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last = Instant::now();

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut frames = 0;
    while config.sim.runs_frame(frames) {
        let now = tokio::select! {
            now = ticker.tick() => now,
            _ = &mut shutdown => {
                info!("Interrupted");
                break;
            }
        };
        let dt = now.duration_since(last).as_secs_f32();
        last = now;

        autoplay.step(&mut session, arena, dt);
        let report = session.frame(dt);
        frames += 1;

        if report.kills > 0 || report.revives > 0 {
            debug!(
                "Frame {}: {} killed, {} revived, {} alive",
                frames, report.kills, report.revives, report.alive
            );
        }
        if frames % 60 == 0 {
            info!(
                "Frame {}: {} alive, {} dead, {} particles",
                frames,
                report.alive,
                report.dead,
                session.effects().particles().len()
            );
        }
        if session.is_cleared() {
            info!("Arena cleared after {} frames", frames);
            break;
        }
    }

    session.pointer_up();
    let totals = session.totals();
    info!(
        "Done: {} frames, {} hits, {} kills, {} revives, {} spawns, {} eats",
        totals.frames, totals.hits, totals.kills, totals.revives, totals.spawns, totals.eats
    );
    Ok(())
}
