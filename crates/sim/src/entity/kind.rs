//! Creature kinds and their base stats.

use std::ops::Range;

/// Creature kind, ordered from weakest to strongest.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub enum CreatureKind {
    /// Small, fragile wanderer.
    #[default]
    Basic = 0,
    /// Tougher, faster wanderer.
    Medium = 1,
    /// Periodically spawns Basic offspring.
    Spawner = 2,
    /// Periodically revives the nearest corpse.
    Reviver = 3,
}

/// Timed ability carried by a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ability {
    Spawn,
    Revive,
}

/// Static stats for a kind, before density scaling.
#[derive(Debug, Clone, PartialEq)]
pub struct KindStats {
    pub radius: f32,
    pub max_health: f32,
    pub speed: Range<f32>,
    pub turn_rate: Range<f32>,
    pub ability: Option<Ability>,
    /// Ability cooldown in milliseconds (0 when there is no ability).
    pub ability_cooldown_ms: f32,
    pub eat_radius: f32,
    pub eat_cooldown_ms: f32,
}

static BASIC: KindStats = KindStats {
    radius: 10.0,
    max_health: 25.0,
    speed: 45.0..75.0,
    turn_rate: 0.8..1.6,
    ability: None,
    ability_cooldown_ms: 0.0,
    eat_radius: 8.0,
    eat_cooldown_ms: 900.0,
};

static MEDIUM: KindStats = KindStats {
    radius: 17.5,
    max_health: 75.0,
    speed: 75.0..100.0,
    turn_rate: 0.5..1.0,
    ability: None,
    ability_cooldown_ms: 0.0,
    eat_radius: 14.0,
    eat_cooldown_ms: 750.0,
};

static SPAWNER: KindStats = KindStats {
    radius: 25.0,
    max_health: 125.0,
    speed: 70.0..100.0,
    turn_rate: 0.3..0.7,
    ability: Some(Ability::Spawn),
    ability_cooldown_ms: 3000.0,
    eat_radius: 20.0,
    eat_cooldown_ms: 600.0,
};

static REVIVER: KindStats = KindStats {
    radius: 32.5,
    max_health: 225.0,
    speed: 80.0..110.0,
    turn_rate: 0.25..0.55,
    ability: Some(Ability::Revive),
    ability_cooldown_ms: 5000.0,
    eat_radius: 28.0,
    eat_cooldown_ms: 450.0,
};

impl CreatureKind {
    pub const ALL: [CreatureKind; 4] = [
        CreatureKind::Basic,
        CreatureKind::Medium,
        CreatureKind::Spawner,
        CreatureKind::Reviver,
    ];

    /// Base stats for this kind.
    #[inline]
    pub fn stats(self) -> &'static KindStats {
        match self {
            CreatureKind::Basic => &BASIC,
            CreatureKind::Medium => &MEDIUM,
            CreatureKind::Spawner => &SPAWNER,
            CreatureKind::Reviver => &REVIVER,
        }
    }

    /// Resolve a kind from its name. Unknown names fall back to `Basic`.
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "medium" | "novillo" => CreatureKind::Medium,
            "spawner" | "bravio" => CreatureKind::Spawner,
            "reviver" | "torazo" => CreatureKind::Reviver,
            _ => CreatureKind::Basic,
        }
    }

    /// Pick a kind from a uniform roll in `[0, 1)`:
    /// about 50% Basic, 30% Medium, 15% Spawner and 5% Reviver.
    #[inline]
    pub fn from_roll(roll: f32) -> Self {
        if roll > 0.95 {
            CreatureKind::Reviver
        } else if roll > 0.8 {
            CreatureKind::Spawner
        } else if roll > 0.5 {
            CreatureKind::Medium
        } else {
            CreatureKind::Basic
        }
    }

    #[inline]
    pub fn ability(self) -> Option<Ability> {
        self.stats().ability
    }

    /// Flame damage multiplier; the stronger kinds resist fire.
    #[inline]
    pub fn flame_resistance(self) -> f32 {
        match self {
            CreatureKind::Reviver => 0.5,
            CreatureKind::Spawner => 0.7,
            CreatureKind::Basic | CreatureKind::Medium => 1.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CreatureKind::Basic => "basic",
            CreatureKind::Medium => "medium",
            CreatureKind::Spawner => "spawner",
            CreatureKind::Reviver => "reviver",
        }
    }
}
