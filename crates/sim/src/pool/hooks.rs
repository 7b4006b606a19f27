//! Pool event hooks.

use crate::entity::{Creature, CreatureKind};
use glam::Vec2;
use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;
use tracing::warn;

/// Callbacks invoked by the pool as creatures eat, die and use abilities.
///
/// Every method defaults to a no-op. A panicking hook is caught and logged;
/// it never interrupts a tick or a hit.
pub trait PoolHooks {
    /// A living creature ate at `position`.
    fn on_eat(&mut self, _position: Vec2, _eat_radius: f32) {}

    /// A creature died.
    fn on_killed(&mut self, _creature: &Creature) {}

    /// A creature came back to life.
    fn on_revived(&mut self, _creature: &Creature) {}

    /// A spawner is about to drop offspring at `position`.
    fn on_ability_spawn(&mut self, _position: Vec2) {}

    /// Fired right after `on_revived` for the revived creature.
    fn on_ability_revive(&mut self, _creature: &Creature) {}
}

/// Hooks that ignore every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHooks;

impl PoolHooks for NoHooks {}

/// Run a hook, swallowing any panic it raises.
pub(crate) fn guarded(hook: &'static str, f: impl FnOnce()) {
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(f)) {
        let reason = payload
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
            .unwrap_or("non-string panic payload");
        warn!(hook, "Pool hook panicked, continuing: {}", reason);
    }
}

/// A pool event, as recorded by [`EventQueue`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PoolEvent {
    Eat { position: Vec2, radius: f32 },
    Killed { kind: CreatureKind, position: Vec2 },
    Revived { kind: CreatureKind, position: Vec2 },
    AbilitySpawn { position: Vec2 },
    AbilityRevive { kind: CreatureKind, position: Vec2 },
}

/// Hooks that queue every event for the owner to drain after the call
/// returns.
///
/// Clones share the same queue, so one handle goes into the pool and the other
/// stays with whoever reacts to the events.
#[derive(Debug, Default, Clone)]
pub struct EventQueue {
    events: Rc<RefCell<Vec<PoolEvent>>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all queued events, oldest first.
    pub fn drain(&self) -> Vec<PoolEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    fn push(&self, event: PoolEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl PoolHooks for EventQueue {
    fn on_eat(&mut self, position: Vec2, eat_radius: f32) {
        self.push(PoolEvent::Eat {
            position,
            radius: eat_radius,
        });
    }

    fn on_killed(&mut self, creature: &Creature) {
        self.push(PoolEvent::Killed {
            kind: creature.kind,
            position: creature.position,
        });
    }

    fn on_revived(&mut self, creature: &Creature) {
        self.push(PoolEvent::Revived {
            kind: creature.kind,
            position: creature.position,
        });
    }

    fn on_ability_spawn(&mut self, position: Vec2) {
        self.push(PoolEvent::AbilitySpawn { position });
    }

    fn on_ability_revive(&mut self, creature: &Creature) {
        self.push(PoolEvent::AbilityRevive {
            kind: creature.kind,
            position: creature.position,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guarded_swallows_panic() {
        let mut reached = false;
        guarded("test", || panic!("boom"));
        guarded("test", || reached = true);
        assert!(reached);
    }

    #[test]
    fn test_queue_clones_share_events() {
        let queue = EventQueue::new();
        let mut handle: Box<dyn PoolHooks> = Box::new(queue.clone());
        handle.on_ability_spawn(Vec2::new(1.0, 2.0));
        handle.on_eat(Vec2::ZERO, 8.0);
        assert_eq!(queue.len(), 2);
        let events = queue.drain();
        assert_eq!(
            events[0],
            PoolEvent::AbilitySpawn {
                position: Vec2::new(1.0, 2.0)
            }
        );
        assert!(queue.is_empty());
    }
}
