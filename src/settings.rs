//! Runtime configuration
//!
//! Loaded from a JSON file; every field falls back to its default.

use std::path::Path;
use std::time::Duration;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Upper bound on a simulated demo session (one day)
pub const MAX_DEMO_SECS: f32 = 86_400.0;
/// Upper bound on a single demo frame
pub const MAX_FRAME_SECS: f32 = 1.0;

/// Headless demo parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    /// Seed for simulated taps
    pub seed: u64,
    /// Simulated session length in seconds
    pub duration_secs: f32,
    /// Frame length fed to the core (seconds)
    pub frame_secs: f32,
    /// Mean seconds between taps
    pub tap_interval_secs: f32,
    /// Chance a tap lands on the live balloon rather than empty space
    pub accuracy: f32,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            seed: 12345,
            duration_secs: 30.0,
            frame_secs: 1.0 / 60.0,
            tap_interval_secs: 2.0,
            accuracy: 0.7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Rotation center
    pub pivot: Vec3,
    /// Radians per tick
    pub rotation_step: f32,
    /// Tick period in milliseconds
    pub tick_interval_ms: u64,
    /// Where live objects appear
    pub spawn_position: Vec3,
    /// Live replacements per pop
    pub spawns_per_pop: u32,
    /// Upper bound on ticks run per `advance`
    pub max_catch_up_ticks: u32,

    pub demo: DemoSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pivot: PIVOT,
            rotation_step: ROTATION_STEP,
            tick_interval_ms: TICK_INTERVAL_MS,
            spawn_position: SPAWN_POSITION,
            spawns_per_pop: SPAWNS_PER_POP,
            max_catch_up_ticks: MAX_CATCH_UP_TICKS,
            demo: DemoSettings::default(),
        }
    }
}

impl Settings {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        if let Err(e) = settings.validate() {
            log::warn!("Rejected settings: {}", e);
            return Err(e);
        }
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |field, reason| Err(SettingsError::Invalid { field, reason });

        if self.tick_interval_ms == 0 {
            return invalid("tick_interval_ms", "must be positive");
        }
        if !self.rotation_step.is_finite() {
            return invalid("rotation_step", "must be finite");
        }
        if !self.pivot.is_finite() {
            return invalid("pivot", "must be finite");
        }
        if !self.spawn_position.is_finite() {
            return invalid("spawn_position", "must be finite");
        }
        if self.spawns_per_pop == 0 {
            return invalid("spawns_per_pop", "must be at least 1");
        }
        if self.max_catch_up_ticks == 0 {
            return invalid("max_catch_up_ticks", "must be at least 1");
        }
        let demo = &self.demo;
        if !(demo.frame_secs > 0.0 && demo.frame_secs <= MAX_FRAME_SECS) {
            return invalid("demo.frame_secs", "must be within (0, 1] seconds");
        }
        if !(demo.duration_secs >= 0.0 && demo.duration_secs <= MAX_DEMO_SECS) {
            return invalid("demo.duration_secs", "must be within [0, 86400] seconds");
        }
        if !(demo.tap_interval_secs > 0.0 && demo.tap_interval_secs.is_finite()) {
            return invalid("demo.tap_interval_secs", "must be positive and finite");
        }
        if !(0.0..=1.0).contains(&self.demo.accuracy) {
            return invalid("demo.accuracy", "must be within 0..=1");
        }
        Ok(())
    }
}
