//! Scene host boundary
//!
//! The host owns everything the core does not: rendering, camera tracking,
//! asset loading and screen-space hit testing. [`HeadlessHost`] is a
//! renderer-free stand-in with a fixed pinhole camera at the origin looking
//! down -Z.

use std::collections::BTreeMap;

use glam::{Vec2, Vec3};

use crate::sim::ObjectId;

/// Screen position in pixels (origin top-left, Y down)
pub type ScreenPoint = Vec2;

/// Opaque handle to a host-side template node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrototypeHandle(pub u32);

/// Templates cloned for each spawned object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prototypes {
    pub live: PrototypeHandle,
    pub popped: PrototypeHandle,
}

pub trait SceneHost {
    /// Look up the live and popped templates
    fn load_prototypes(&mut self) -> Prototypes;

    /// Add a clone of `prototype` to the scene
    fn attach(&mut self, id: ObjectId, prototype: PrototypeHandle, position: Vec3);

    /// Remove a node from the scene
    fn detach(&mut self, id: ObjectId);

    /// Push an updated transform
    fn render_position(&mut self, id: ObjectId, position: Vec3);

    /// Topmost live object under `point`, if any
    fn hit_test(&self, point: ScreenPoint) -> Option<ObjectId>;
}

#[derive(Debug, Clone, Copy)]
struct Node {
    prototype: PrototypeHandle,
    position: Vec3,
}

/// Pinhole-camera host with no renderer
#[derive(Debug, Clone)]
pub struct HeadlessHost {
    viewport: Vec2,
    focal_length: f32,
    /// Pick radius in world units around each node
    node_radius: f32,
    prototypes: Prototypes,
    nodes: BTreeMap<ObjectId, Node>,
}

impl HeadlessHost {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            viewport,
            focal_length: viewport.y,
            node_radius: 0.15,
            prototypes: Prototypes {
                live: PrototypeHandle(1),
                popped: PrototypeHandle(2),
            },
            nodes: BTreeMap::new(),
        }
    }

    /// Project a world position to the screen. `None` if behind the camera.
    pub fn project(&self, position: Vec3) -> Option<ScreenPoint> {
        let depth = -position.z;
        if depth <= f32::EPSILON {
            return None;
        }
        let scale = self.focal_length / depth;
        let center = self.viewport / 2.0;
        Some(Vec2::new(
            center.x + position.x * scale,
            center.y - position.y * scale,
        ))
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Current position of a node, as last pushed by the core
    pub fn node_position(&self, id: ObjectId) -> Option<Vec3> {
        self.nodes.get(&id).map(|n| n.position)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Ids of nodes cloned from the live prototype
    pub fn live_nodes(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.nodes
            .iter()
            .filter(|(_, n)| n.prototype == self.prototypes.live)
            .map(|(id, _)| *id)
    }
}

impl SceneHost for HeadlessHost {
    fn load_prototypes(&mut self) -> Prototypes {
        self.prototypes
    }

    fn attach(&mut self, id: ObjectId, prototype: PrototypeHandle, position: Vec3) {
        self.nodes.insert(id, Node { prototype, position });
    }

    fn detach(&mut self, id: ObjectId) {
        self.nodes.remove(&id);
    }

    fn render_position(&mut self, id: ObjectId, position: Vec3) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.position = position;
        }
    }

    fn hit_test(&self, point: ScreenPoint) -> Option<ObjectId> {
        self.nodes
            .iter()
            .filter(|(_, n)| n.prototype == self.prototypes.live)
            .filter_map(|(id, n)| {
                let depth = -n.position.z;
                let center = self.project(n.position)?;
                let pick_radius = self.node_radius * self.focal_length / depth;
                (center.distance(point) <= pick_radius).then_some((*id, depth))
            })
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(id, _)| id)
    }
}
