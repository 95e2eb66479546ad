//! AR session glue
//!
//! Receives lifecycle, tracking and tap signals from the host and drives the
//! balloon field. All calls are expected on one serialized event loop.

use std::time::Duration;

use crate::host::{Prototypes, SceneHost, ScreenPoint};
use crate::settings::Settings;
use crate::sim::{BalloonField, FieldEvent, HitError, HitOutcome, ObjectKind};

/// Why tracking quality is reduced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitedReason {
    ExcessiveMotion,
    InsufficientFeatures,
    Initializing,
    Relocalizing,
    Unknown,
}

/// Camera tracking quality reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingState {
    NotAvailable,
    Normal,
    Limited(LimitedReason),
}

impl TrackingState {
    pub fn status(&self) -> &'static str {
        match self {
            TrackingState::NotAvailable => "Tracking:  Not available!",
            TrackingState::Normal => "Tracking: Normal",
            TrackingState::Limited(reason) => match reason {
                LimitedReason::ExcessiveMotion => "Tracking: Limited due to excessive motion!",
                LimitedReason::InsufficientFeatures => {
                    "Tracking: Limited due to insufficient features!"
                }
                LimitedReason::Initializing => "Tracking: Initializing...",
                LimitedReason::Relocalizing => "Tracking: Relocalizing...",
                LimitedReason::Unknown => "Tracking: Unknown...",
            },
        }
    }
}

/// Session notifications from the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Failed(String),
    Interrupted,
    InterruptionEnded,
    TrackingChanged(TrackingState),
}

pub struct Session {
    field: BalloonField,
    prototypes: Option<Prototypes>,
    started_once: bool,
    tracking_status: Option<String>,
}

impl Session {
    pub fn new(settings: &Settings) -> Self {
        Self {
            field: BalloonField::new(settings),
            prototypes: None,
            started_once: false,
            tracking_status: None,
        }
    }

    pub fn field(&self) -> &BalloonField {
        &self.field
    }

    /// Latest tracking/session status line
    pub fn tracking_status(&self) -> Option<&str> {
        self.tracking_status.as_deref()
    }

    /// Session came to the foreground: spawn the first balloon once, start motion.
    pub fn on_session_start(&mut self, host: &mut impl SceneHost) {
        if self.prototypes.is_none() {
            self.prototypes = Some(host.load_prototypes());
        }
        if !self.started_once {
            self.started_once = true;
            let id = self.field.spawn_live();
            log::info!("Session started, first balloon {}", id);
        } else {
            log::info!("Session resumed");
        }
        self.field.start();
        self.flush(host);
    }

    /// Session went to the background: stop motion.
    pub fn on_session_pause(&mut self) {
        if self.field.pause() {
            log::info!("Session paused");
        }
    }

    pub fn on_session_event(&mut self, event: SessionEvent) {
        let status = match event {
            SessionEvent::Failed(error) => format!("AR Session Failure: {}", error),
            SessionEvent::Interrupted => "AR Session Was Interrupted!".to_string(),
            SessionEvent::InterruptionEnded => "AR Session Interruption Ended".to_string(),
            SessionEvent::TrackingChanged(state) => state.status().to_string(),
        };
        log::info!("{}", status);
        self.tracking_status = Some(status);
    }

    /// Resolve a tap. Misses and hits on anything but a live balloon are ignored.
    pub fn on_tap(&mut self, host: &mut impl SceneHost, point: ScreenPoint) -> Option<HitOutcome> {
        let id = host.hit_test(point)?;
        match self.field.resolve_hit(id) {
            Ok(outcome) => {
                self.flush(host);
                Some(outcome)
            }
            Err(HitError::NotFound(id)) => {
                log::debug!("Tap on {} ignored, not a live balloon", id);
                None
            }
        }
    }

    /// Feed elapsed time, push new transforms to the host. Returns ticks run.
    pub fn advance(&mut self, host: &mut impl SceneHost, elapsed: Duration) -> u32 {
        let ticks = self.field.advance(elapsed);
        self.flush(host);
        ticks
    }

    fn flush(&mut self, host: &mut impl SceneHost) {
        let prototypes = *self.prototypes.get_or_insert_with(|| host.load_prototypes());
        for event in self.field.drain_events() {
            match event {
                FieldEvent::Spawned { id, kind, position } => {
                    let prototype = match kind {
                        ObjectKind::Live => prototypes.live,
                        ObjectKind::Popped => prototypes.popped,
                    };
                    host.attach(id, prototype, position);
                }
                FieldEvent::Removed { id } => host.detach(id),
                FieldEvent::Moved { id, position } => host.render_position(id, position),
            }
        }
    }
}
