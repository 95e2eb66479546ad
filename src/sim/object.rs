//! Tracked object types

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Opaque handle for a tracked object
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Object lifecycle state
///
/// `Live --hit--> Popped`. Popped is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Rotating, waiting to be hit
    Live,
    /// Frozen replacement left behind after a hit
    Popped,
}

/// An object placed in the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedObject {
    pub id: ObjectId,
    pub position: Vec3,
    pub kind: ObjectKind,
}

impl TrackedObject {
    #[inline]
    pub fn is_live(&self) -> bool {
        self.kind == ObjectKind::Live
    }
}
