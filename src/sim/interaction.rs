//! Hit resolution
//!
//! A hit on a live object pops it: the live object is removed, a frozen
//! popped object takes its place, and fresh live objects are spawned at the
//! default spawn position.

use glam::Vec3;

use super::object::{ObjectId, ObjectKind};
use super::registry::ObjectRegistry;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HitError {
    /// No live object with this id (unknown, removed, or already popped)
    #[error("no live object {0}")]
    NotFound(ObjectId),
}

/// What a successful hit changed
///
/// Only built by [`resolve_hit`], which always spawns at least one replacement.
#[derive(Debug, Clone, PartialEq)]
pub struct HitOutcome {
    removed: ObjectId,
    popped: ObjectId,
    position: Vec3,
    spawned: Vec<ObjectId>,
}

impl HitOutcome {
    /// The live object that was removed
    pub fn removed(&self) -> ObjectId {
        self.removed
    }

    /// The popped object left in its place
    pub fn popped(&self) -> ObjectId {
        self.popped
    }

    /// Where the pop happened
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Replacement live objects, in spawn order
    pub fn spawned(&self) -> &[ObjectId] {
        &self.spawned
    }

    /// The first replacement live object
    pub fn live(&self) -> ObjectId {
        self.spawned[0]
    }
}

/// Pop the live object `id`.
///
/// On error the registry is untouched.
pub fn resolve_hit(
    registry: &mut ObjectRegistry,
    id: ObjectId,
    spawn_position: Vec3,
    spawns_per_pop: u32,
) -> Result<HitOutcome, HitError> {
    if !registry.contains_live(id) {
        return Err(HitError::NotFound(id));
    }
    let removed = registry.remove(id).ok_or(HitError::NotFound(id))?;

    let popped = registry.spawn(ObjectKind::Popped, removed.position);
    let spawned = (0..spawns_per_pop.max(1))
        .map(|_| registry.spawn(ObjectKind::Live, spawn_position))
        .collect();

    Ok(HitOutcome {
        removed: id,
        popped,
        position: removed.position,
        spawned,
    })
}
