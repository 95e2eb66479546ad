//! Balloon Pop - rotating tap-to-pop objects for an AR scene
//!
//! Core modules:
//! - `sim`: Deterministic core (object registry, motion, hit resolution)
//! - `host`: Scene host boundary (rendering, hit-testing, prototypes)
//! - `session`: Lifecycle and tracking-status glue
//! - `settings`: Data-driven configuration

pub mod host;
pub mod session;
pub mod settings;
pub mod sim;

pub use host::{HeadlessHost, PrototypeHandle, Prototypes, SceneHost, ScreenPoint};
pub use session::{LimitedReason, Session, SessionEvent, TrackingState};
pub use settings::{Settings, SettingsError};

use glam::Vec3;

/// Default configuration constants
pub mod consts {
    use glam::Vec3;

    /// Tick period in milliseconds (100 Hz)
    pub const TICK_INTERVAL_MS: u64 = 10;
    /// Rotation applied to every live object per tick (radians)
    pub const ROTATION_STEP: f32 = 0.0025;
    /// Rotation center
    pub const PIVOT: Vec3 = Vec3::ZERO;
    /// Where new live objects appear (slightly below eye level, 2m ahead)
    pub const SPAWN_POSITION: Vec3 = Vec3::new(0.0, -0.3, -2.0);
    /// Replacement live objects spawned per pop
    pub const SPAWNS_PER_POP: u32 = 1;
    /// Maximum ticks run by a single `advance` call
    pub const MAX_CATCH_UP_TICKS: u32 = 32;
}

/// Rotate `position` about the vertical axis through `pivot` by `angle` radians.
///
/// Y is left untouched.
#[inline]
pub fn rotate_about_y(position: Vec3, pivot: Vec3, angle: f32) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    let dx = position.x - pivot.x;
    let dz = position.z - pivot.z;
    Vec3::new(
        pivot.x + dx * cos - dz * sin,
        position.y,
        pivot.z + dz * cos + dx * sin,
    )
}

/// Horizontal distance from the vertical axis through `pivot`
#[inline]
pub fn planar_radius(position: Vec3, pivot: Vec3) -> f32 {
    let dx = position.x - pivot.x;
    let dz = position.z - pivot.z;
    (dx * dx + dz * dz).sqrt()
}
