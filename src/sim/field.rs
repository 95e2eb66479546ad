//! Balloon field
//!
//! Ties the registry, the motion scheduler and hit resolution together, and
//! records what changed as [`FieldEvent`]s for the host to mirror.

use std::time::Duration;

use glam::Vec3;

use super::interaction::{self, HitError, HitOutcome};
use super::motion::{MotionScheduler, StartOutcome};
use super::object::{ObjectId, ObjectKind};
use super::registry::ObjectRegistry;
use crate::settings::Settings;

/// Changes the host needs to mirror in its scene graph
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEvent {
    Spawned {
        id: ObjectId,
        kind: ObjectKind,
        position: Vec3,
    },
    Removed {
        id: ObjectId,
    },
    Moved {
        id: ObjectId,
        position: Vec3,
    },
}

#[derive(Debug, Clone)]
pub struct BalloonField {
    registry: ObjectRegistry,
    scheduler: MotionScheduler,
    spawn_position: Vec3,
    spawns_per_pop: u32,
    events: Vec<FieldEvent>,
}

impl BalloonField {
    pub fn new(settings: &Settings) -> Self {
        Self {
            registry: ObjectRegistry::new(),
            scheduler: MotionScheduler::new(
                settings.pivot,
                settings.rotation_step,
                settings.tick_interval(),
                settings.max_catch_up_ticks,
            ),
            spawn_position: settings.spawn_position,
            spawns_per_pop: settings.spawns_per_pop,
            events: Vec::new(),
        }
    }

    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    pub fn scheduler(&self) -> &MotionScheduler {
        &self.scheduler
    }

    /// Spawn a live object at the default position.
    ///
    /// A running schedule is reinstalled so the new object starts on a clean tick.
    pub fn spawn_live(&mut self) -> ObjectId {
        let id = self.spawn(ObjectKind::Live, self.spawn_position);
        if self.scheduler.is_running() {
            self.scheduler.start();
        }
        id
    }

    /// Pop the live object `id` and spawn its replacement(s).
    pub fn resolve_hit(&mut self, id: ObjectId) -> Result<HitOutcome, HitError> {
        let outcome = interaction::resolve_hit(
            &mut self.registry,
            id,
            self.spawn_position,
            self.spawns_per_pop,
        )?;

        log::debug!(
            "Popped {} at {:?}, replaced by {:?}",
            outcome.removed(),
            outcome.position(),
            outcome.spawned()
        );

        self.events.push(FieldEvent::Removed { id: outcome.removed() });
        self.events.push(FieldEvent::Spawned {
            id: outcome.popped(),
            kind: ObjectKind::Popped,
            position: outcome.position(),
        });
        for &live in outcome.spawned() {
            self.events.push(FieldEvent::Spawned {
                id: live,
                kind: ObjectKind::Live,
                position: self.spawn_position,
            });
        }
        if self.scheduler.is_running() {
            self.scheduler.start();
        }

        Ok(outcome)
    }

    pub fn start(&mut self) -> StartOutcome {
        self.scheduler.start()
    }

    pub fn pause(&mut self) -> bool {
        self.scheduler.stop()
    }

    /// Run due ticks and queue a `Moved` event for every live object if any ran.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let ticks = self.scheduler.advance(elapsed, &mut self.registry);
        if ticks > 0 {
            self.events.extend(self.registry.all_live().map(|o| FieldEvent::Moved {
                id: o.id,
                position: o.position,
            }));
        }
        ticks
    }

    /// Take all pending events, oldest first
    pub fn drain_events(&mut self) -> Vec<FieldEvent> {
        std::mem::take(&mut self.events)
    }

    fn spawn(&mut self, kind: ObjectKind, position: Vec3) -> ObjectId {
        let id = self.registry.spawn(kind, position);
        self.events.push(FieldEvent::Spawned { id, kind, position });
        id
    }
}
