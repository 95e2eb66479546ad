//! Motion scheduler
//!
//! Fixed-period tick source that spins every live object around the pivot.
//! The host feeds wall time through [`MotionScheduler::advance`]; whole ticks
//! are run at the configured interval, the remainder carries over.

use std::time::Duration;

use glam::Vec3;

use super::registry::ObjectRegistry;
use crate::rotate_about_y;

/// Result of [`MotionScheduler::start`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// Scheduler was idle and is now ticking
    Started,
    /// Scheduler was already running; the old schedule was cancelled and replaced
    Restarted,
}

#[derive(Debug, Clone)]
pub struct MotionScheduler {
    pivot: Vec3,
    step: f32,
    interval: Duration,
    max_catch_up_ticks: u32,
    running: bool,
    /// Bumped every time a schedule is installed
    schedule: u64,
    accumulator: Duration,
    ticks_run: u64,
}

impl MotionScheduler {
    pub fn new(pivot: Vec3, step: f32, interval: Duration, max_catch_up_ticks: u32) -> Self {
        Self {
            pivot,
            step,
            interval,
            max_catch_up_ticks: max_catch_up_ticks.max(1),
            running: false,
            schedule: 0,
            accumulator: Duration::ZERO,
            ticks_run: 0,
        }
    }

    /// Install a fresh schedule, cancelling any running one.
    pub fn start(&mut self) -> StartOutcome {
        let outcome = if self.running {
            log::debug!("Motion schedule {} cancelled for restart", self.schedule);
            StartOutcome::Restarted
        } else {
            StartOutcome::Started
        };
        self.running = true;
        self.schedule += 1;
        self.accumulator = Duration::ZERO;
        outcome
    }

    /// Stop ticking. Returns false if it was not running.
    pub fn stop(&mut self) -> bool {
        let was_running = self.running;
        self.running = false;
        self.accumulator = Duration::ZERO;
        was_running
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Identifier of the active (or last) schedule
    pub fn schedule(&self) -> u64 {
        self.schedule
    }

    /// Total ticks run since construction
    pub fn ticks_run(&self) -> u64 {
        self.ticks_run
    }

    /// Rotate every live object by one step. Returns how many moved.
    pub fn tick(&mut self, registry: &mut ObjectRegistry) -> usize {
        let mut moved = 0;
        for object in registry.all_live_mut() {
            object.position = rotate_about_y(object.position, self.pivot, self.step);
            moved += 1;
        }
        self.ticks_run += 1;
        moved
    }

    /// Feed elapsed wall time and run every tick that has come due.
    ///
    /// Returns the number of ticks run. Nothing happens while stopped.
    pub fn advance(&mut self, elapsed: Duration, registry: &mut ObjectRegistry) -> u32 {
        if !self.running || self.interval.is_zero() {
            return 0;
        }

        // Backlog past the catch-up window is dropped (spiral of death guard)
        let window = self
            .interval
            .checked_mul(self.max_catch_up_ticks)
            .unwrap_or(Duration::MAX);
        self.accumulator = self.accumulator.saturating_add(elapsed.min(window));
        let mut ticks = 0;
        while self.accumulator >= self.interval && ticks < self.max_catch_up_ticks {
            self.tick(registry);
            self.accumulator -= self.interval;
            ticks += 1;
        }

        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::planar_radius;
    use crate::sim::ObjectKind;
    use proptest::prelude::*;

    fn scheduler() -> MotionScheduler {
        MotionScheduler::new(
            PIVOT,
            ROTATION_STEP,
            Duration::from_millis(TICK_INTERVAL_MS),
            MAX_CATCH_UP_TICKS,
        )
    }

    #[test]
    fn test_full_revolution_returns_to_start() {
        let mut registry = ObjectRegistry::new();
        let id = registry.spawn(ObjectKind::Live, SPAWN_POSITION);
        let mut motion = scheduler();

        // 2π / 0.0025 ≈ 2513
        for _ in 0..2513 {
            motion.tick(&mut registry);
        }

        let pos = registry.get(id).unwrap().position;
        assert!(pos.x.abs() < 0.01, "x = {}", pos.x);
        assert!((pos.z + 2.0).abs() < 0.01, "z = {}", pos.z);
        assert_eq!(pos.y, -0.3);
    }

    #[test]
    fn test_quarter_turn_direction() {
        // Positive step takes -Z toward +X
        let p = rotate_about_y(Vec3::new(0.0, 0.0, -1.0), Vec3::ZERO, std::f32::consts::FRAC_PI_2);
        assert!((p.x - 1.0).abs() < 1e-5);
        assert!(p.z.abs() < 1e-5);
    }

    #[test]
    fn test_tick_skips_popped_objects() {
        let mut registry = ObjectRegistry::new();
        let popped = registry.spawn(ObjectKind::Popped, SPAWN_POSITION);
        let live = registry.spawn(ObjectKind::Live, SPAWN_POSITION);
        let mut motion = scheduler();

        assert_eq!(motion.tick(&mut registry), 1);
        assert_eq!(registry.get(popped).unwrap().position, SPAWN_POSITION);
        assert_ne!(registry.get(live).unwrap().position, SPAWN_POSITION);
    }

    #[test]
    fn test_advance_does_nothing_when_stopped() {
        let mut registry = ObjectRegistry::new();
        registry.spawn(ObjectKind::Live, SPAWN_POSITION);
        let mut motion = scheduler();

        assert_eq!(motion.advance(Duration::from_millis(100), &mut registry), 0);
        assert_eq!(motion.ticks_run(), 0);
    }

    #[test]
    fn test_advance_runs_whole_ticks_and_carries_remainder() {
        let mut registry = ObjectRegistry::new();
        let mut motion = scheduler();
        motion.start();

        assert_eq!(motion.advance(Duration::from_millis(25), &mut registry), 2);
        assert_eq!(motion.advance(Duration::from_millis(5), &mut registry), 1);
        assert_eq!(motion.ticks_run(), 3);
    }

    #[test]
    fn test_double_start_yields_single_tick_stream() {
        let mut registry = ObjectRegistry::new();
        let id = registry.spawn(ObjectKind::Live, SPAWN_POSITION);
        let mut motion = scheduler();

        assert_eq!(motion.start(), StartOutcome::Started);
        assert_eq!(motion.start(), StartOutcome::Restarted);
        assert_eq!(motion.schedule(), 2);

        assert_eq!(motion.advance(Duration::from_millis(TICK_INTERVAL_MS), &mut registry), 1);
        let expected = rotate_about_y(SPAWN_POSITION, PIVOT, ROTATION_STEP);
        assert_eq!(registry.get(id).unwrap().position, expected);
    }

    #[test]
    fn test_restart_discards_partial_tick() {
        let mut registry = ObjectRegistry::new();
        let mut motion = scheduler();
        motion.start();
        motion.advance(Duration::from_millis(7), &mut registry);
        motion.start();
        assert_eq!(motion.advance(Duration::from_millis(7), &mut registry), 0);
    }

    #[test]
    fn test_catch_up_is_capped() {
        let mut registry = ObjectRegistry::new();
        let mut motion = scheduler();
        motion.start();

        let ticks = motion.advance(Duration::from_secs(10), &mut registry);
        assert_eq!(ticks, MAX_CATCH_UP_TICKS);
        // Backlog dropped, next short advance runs nothing
        assert_eq!(motion.advance(Duration::from_millis(1), &mut registry), 0);
    }

    #[test]
    fn test_huge_elapsed_after_partial_tick() {
        let mut registry = ObjectRegistry::new();
        registry.spawn(ObjectKind::Live, SPAWN_POSITION);
        let mut motion = scheduler();
        motion.start();

        assert_eq!(motion.advance(Duration::from_millis(5), &mut registry), 0);
        assert_eq!(motion.advance(Duration::MAX, &mut registry), MAX_CATCH_UP_TICKS);
        assert_eq!(motion.advance(Duration::MAX, &mut registry), MAX_CATCH_UP_TICKS);
        assert!(motion.is_running());
    }

    #[test]
    fn test_stop_and_resume() {
        let mut motion = scheduler();
        assert!(!motion.stop());
        motion.start();
        assert!(motion.stop());
        assert!(!motion.is_running());
        assert_eq!(motion.start(), StartOutcome::Started);
    }

    proptest! {
        #[test]
        fn prop_rotation_preserves_radius(
            x in -50.0f32..50.0,
            y in -5.0f32..5.0,
            z in -50.0f32..50.0,
            px in -5.0f32..5.0,
            pz in -5.0f32..5.0,
            ticks in 0usize..3000,
        ) {
            let pivot = Vec3::new(px, 0.0, pz);
            let start = Vec3::new(x, y, z);
            let r0 = planar_radius(start, pivot);

            let mut pos = start;
            for _ in 0..ticks {
                pos = rotate_about_y(pos, pivot, ROTATION_STEP);
            }

            let r1 = planar_radius(pos, pivot);
            prop_assert!((r1 - r0).abs() <= 1e-3 * (r0 + 10.0), "r0 = {}, r1 = {}", r0, r1);
            prop_assert_eq!(pos.y, y);
        }
    }
}
