//! Game entities (creatures).
//!
//! This module defines the creature record and the four creature kinds.

mod creature;
mod kind;

pub use creature::{Creature, CreatureId};
pub use kind::{Ability, CreatureKind, KindStats};
