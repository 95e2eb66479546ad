//! Object registry
//!
//! Sole owner of every tracked object. Objects are kept sorted by id so
//! iteration order is stable across runs.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::object::{ObjectId, ObjectKind, TrackedObject};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectRegistry {
    objects: Vec<TrackedObject>,
    /// Next object id (never reused)
    next_id: u32,
}

impl Default for ObjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            next_id: 1,
        }
    }

    /// Create a new object and return its id
    pub fn spawn(&mut self, kind: ObjectKind, position: Vec3) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        // Ids grow monotonically, so pushing keeps the vec sorted
        self.objects.push(TrackedObject { id, position, kind });
        id
    }

    /// Remove an object, returning it if it existed
    pub fn remove(&mut self, id: ObjectId) -> Option<TrackedObject> {
        let index = self.index_of(id)?;
        Some(self.objects.remove(index))
    }

    pub fn get(&self, id: ObjectId) -> Option<&TrackedObject> {
        self.index_of(id).map(|i| &self.objects[i])
    }

    /// True if `id` names an object that is still live
    pub fn contains_live(&self, id: ObjectId) -> bool {
        self.get(id).is_some_and(TrackedObject::is_live)
    }

    /// All live objects, in id order
    pub fn all_live(&self) -> impl Iterator<Item = &TrackedObject> {
        self.objects.iter().filter(|o| o.is_live())
    }

    pub fn all_live_mut(&mut self) -> impl Iterator<Item = &mut TrackedObject> {
        self.objects.iter_mut().filter(|o| o.is_live())
    }

    /// All popped objects, in id order
    pub fn popped(&self) -> impl Iterator<Item = &TrackedObject> {
        self.objects.iter().filter(|o| o.kind == ObjectKind::Popped)
    }

    pub fn live_count(&self) -> usize {
        self.all_live().count()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    fn index_of(&self, id: ObjectId) -> Option<usize> {
        self.objects.binary_search_by_key(&id, |o| o.id).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_assigns_unique_ids() {
        let mut registry = ObjectRegistry::new();
        let a = registry.spawn(ObjectKind::Live, Vec3::ZERO);
        let b = registry.spawn(ObjectKind::Popped, Vec3::ONE);
        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(b).map(|o| o.position), Some(Vec3::ONE));
    }

    #[test]
    fn test_remove_and_lookup() {
        let mut registry = ObjectRegistry::new();
        let a = registry.spawn(ObjectKind::Live, Vec3::X);
        let b = registry.spawn(ObjectKind::Live, Vec3::Y);

        let removed = registry.remove(a).expect("object should exist");
        assert_eq!(removed.position, Vec3::X);
        assert!(registry.get(a).is_none());
        assert!(registry.remove(a).is_none());
        assert!(registry.get(b).is_some());
    }

    #[test]
    fn test_ids_not_reused_after_remove() {
        let mut registry = ObjectRegistry::new();
        let a = registry.spawn(ObjectKind::Live, Vec3::ZERO);
        registry.remove(a);
        let b = registry.spawn(ObjectKind::Live, Vec3::ZERO);
        assert!(b > a);
    }

    #[test]
    fn test_live_and_popped_views() {
        let mut registry = ObjectRegistry::new();
        let live = registry.spawn(ObjectKind::Live, Vec3::ZERO);
        let popped = registry.spawn(ObjectKind::Popped, Vec3::ZERO);

        assert_eq!(registry.all_live().map(|o| o.id).collect::<Vec<_>>(), vec![live]);
        assert_eq!(registry.popped().map(|o| o.id).collect::<Vec<_>>(), vec![popped]);
        assert!(registry.contains_live(live));
        assert!(!registry.contains_live(popped));
        assert_eq!(registry.live_count(), 1);
    }
}
