//! Particle and screen-shake bookkeeping.
//!
//! The ledger only stores state; drawing particles and applying the shake
//! offset to the camera is the renderer's job.

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use std::f32::consts::{PI, TAU};
use std::fmt;

/// Shake duration that maps to a full-magnitude offset.
pub const BASE_SHAKE_MS: f32 = 120.0;

/// What a particle looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    Spark,
    Flame,
    Ember,
    Toxic,
}

/// Colour tone of an ember.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Red,
    Orange,
    Yellow,
}

impl Tone {
    const ALL: [Tone; 3] = [Tone::Red, Tone::Orange, Tone::Yellow];
}

/// A short-lived visual particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub kind: ParticleKind,
    pub position: Vec2,
    /// Pixels per second.
    pub velocity: Vec2,
    /// Lifetime in seconds.
    pub life: f32,
    /// Seconds lived so far.
    pub age: f32,
    pub size: f32,
    pub tone: Option<Tone>,
}

impl Particle {
    /// Remaining life as a fraction in `[0, 1]`.
    #[inline]
    pub fn life_fraction(&self) -> f32 {
        if self.life <= 0.0 {
            return 0.0;
        }
        (1.0 - self.age / self.life).clamp(0.0, 1.0)
    }
}

/// The kinds of burst a tool or event can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleBurst {
    /// Blunt impact. Spawns nothing.
    Impact,
    /// Flames, toned embers and sparks.
    Flame,
    /// Yellow embers where a creature came back.
    FlameRevive,
    /// Green spray droplets.
    Toxic,
    /// Muzzle sparks.
    ProjectileSpark,
}

/// Live particles plus the screen-shake state.
pub struct EffectLedger {
    particles: Vec<Particle>,
    shake_ms: f32,
    shake_magnitude: f32,
    rng: Box<dyn RngCore>,
}

impl fmt::Debug for EffectLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectLedger")
            .field("particles", &self.particles.len())
            .field("shake_ms", &self.shake_ms)
            .field("shake_magnitude", &self.shake_magnitude)
            .finish_non_exhaustive()
    }
}

impl Default for EffectLedger {
    fn default() -> Self {
        Self::new(SmallRng::from_os_rng())
    }
}

impl EffectLedger {
    pub fn new(rng: impl RngCore + 'static) -> Self {
        Self {
            particles: Vec::new(),
            shake_ms: 0.0,
            shake_magnitude: 0.0,
            rng: Box::new(rng),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn shake_remaining_ms(&self) -> f32 {
        self.shake_ms
    }

    #[inline]
    pub fn shake_magnitude(&self) -> f32 {
        self.shake_magnitude
    }

    /// Drop every particle and stop the shake.
    pub fn clear(&mut self) {
        self.particles.clear();
        self.shake_ms = 0.0;
        self.shake_magnitude = 0.0;
    }

    /// Emit a burst at `origin`. Particle sizes scale with `density`.
    pub fn spawn_particles(&mut self, burst: ParticleBurst, origin: Vec2, density: f32) {
        match burst {
            ParticleBurst::Impact => {}
            ParticleBurst::Flame => {
                for _ in 0..18 {
                    let angle = self.range(0.0, TAU);
                    let speed = self.range(60.0, 220.0);
                    let lift = self.range(40.0, 120.0);
                    let velocity = Vec2::from_angle(angle) * speed - Vec2::new(0.0, lift);
                    let life = self.range(0.22, 0.67);
                    let size = self.range(2.0, 4.4) * density;
                    self.push(ParticleKind::Flame, origin, velocity, life, size, None);
                }
                for _ in 0..10 {
                    let angle = self.range(-PI / 3.0, -PI / 3.0 + PI * 0.6);
                    let speed = self.range(30.0, 90.0);
                    let tone = Tone::ALL[self.rng.random_range(0..Tone::ALL.len())];
                    let velocity = Vec2::from_angle(angle) * speed - Vec2::new(0.0, 30.0);
                    let life = self.range(0.45, 1.25);
                    let size = self.range(1.6, 3.8) * density;
                    self.push(ParticleKind::Ember, origin, velocity, life, size, Some(tone));
                }
                self.sparks(origin, 48, density);
            }
            ParticleBurst::FlameRevive => {
                for _ in 0..12 {
                    let velocity = Vec2::new(self.range(-40.0, 40.0), self.range(-40.0, 40.0));
                    let life = self.range(0.35, 0.75);
                    let size = self.range(1.8, 4.0) * density;
                    self.push(ParticleKind::Ember, origin, velocity, life, size, Some(Tone::Yellow));
                }
            }
            ParticleBurst::Toxic => {
                for _ in 0..20 {
                    let velocity = Vec2::new(self.range(-60.0, 60.0), self.range(-60.0, 60.0));
                    let life = self.range(0.3, 0.9);
                    let size = self.range(2.0, 4.5) * density;
                    self.push(ParticleKind::Toxic, origin, velocity, life, size, None);
                }
            }
            ParticleBurst::ProjectileSpark => self.sparks(origin, 8, density),
        }
    }

    /// Request a shake. Magnitude and duration each keep the larger of the
    /// current and requested values.
    pub fn add_shake(&mut self, magnitude: f32, duration_ms: f32) {
        if duration_ms > self.shake_ms {
            self.shake_ms = duration_ms;
        }
        if magnitude > self.shake_magnitude {
            self.shake_magnitude = magnitude;
        }
    }

    /// Age and move particles, drop expired ones and decay the shake.
    pub fn tick(&mut self, dt: f32) {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };

        self.particles.retain_mut(|p| {
            p.age += dt;
            if p.age >= p.life {
                return false;
            }
            p.position += p.velocity * dt;
            true
        });

        if self.shake_ms > 0.0 {
            self.shake_ms = (self.shake_ms - dt * 1000.0).max(0.0);
            if self.shake_ms <= 0.0 {
                self.shake_magnitude = 0.0;
            }
        }
    }

    /// Random camera offset for this frame, proportional to the remaining
    /// shake time.
    pub fn shake_offset(&mut self) -> Vec2 {
        if self.shake_ms <= 0.0 || self.shake_magnitude <= 0.0 {
            return Vec2::ZERO;
        }
        let mag = self.shake_ms / BASE_SHAKE_MS * self.shake_magnitude;
        Vec2::new(self.range(-mag, mag), self.range(-mag, mag))
    }

    fn sparks(&mut self, origin: Vec2, count: usize, density: f32) {
        for _ in 0..count {
            let angle = self.range(0.0, TAU);
            let speed = self.range(120.0, 240.0);
            let life = self.range(0.08, 0.2);
            let size = self.range(1.5, 3.3) * density;
            self.push(ParticleKind::Spark, origin, Vec2::from_angle(angle) * speed, life, size, None);
        }
    }

    fn push(&mut self, kind: ParticleKind, position: Vec2, velocity: Vec2, life: f32, size: f32, tone: Option<Tone>) {
        self.particles.push(Particle {
            kind,
            position,
            velocity,
            life,
            age: 0.0,
            size,
            tone,
        });
    }

    #[inline]
    fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.rng.random::<f32>() * (max - min)
    }
}
