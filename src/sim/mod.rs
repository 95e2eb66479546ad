//! Deterministic simulation module
//!
//! Object lifecycle and motion. This module must stay pure:
//! - Fixed tick period only
//! - Stable iteration order (by object ID)
//! - No rendering or platform dependencies

pub mod field;
pub mod interaction;
pub mod motion;
pub mod object;
pub mod registry;

pub use field::{BalloonField, FieldEvent};
pub use interaction::{HitError, HitOutcome, resolve_hit};
pub use motion::{MotionScheduler, StartOutcome};
pub use object::{ObjectId, ObjectKind, TrackedObject};
pub use registry::ObjectRegistry;
