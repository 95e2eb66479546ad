//! Balloon Pop headless demo
//!
//! Runs a simulated AR session against the headless host: the balloon spins,
//! random taps try to pop it, and a summary is logged at the end.
//!
//! Usage: `balloon-pop [settings.json]`

use std::process::ExitCode;
use std::time::{Duration, TryFromFloatSecsError};

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use balloon_pop::{
    HeadlessHost, LimitedReason, Session, SessionEvent, Settings, TrackingState,
};

fn main() -> ExitCode {
    env_logger::init();

    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => Settings::default(),
    };

    log::info!("Balloon Pop (headless) starting...");
    match run_demo(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Invalid demo frame length: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_demo(settings: &Settings) -> Result<(), TryFromFloatSecsError> {
    let demo = &settings.demo;
    let mut rng = Pcg32::seed_from_u64(demo.seed);
    let mut host = HeadlessHost::new(Vec2::new(1170.0, 2532.0));
    let mut session = Session::new(settings);

    session.on_session_event(SessionEvent::TrackingChanged(TrackingState::Limited(
        LimitedReason::Initializing,
    )));
    session.on_session_start(&mut host);
    session.on_session_event(SessionEvent::TrackingChanged(TrackingState::Normal));

    let frame = Duration::try_from_secs_f32(demo.frame_secs)?;
    let frames = (demo.duration_secs / demo.frame_secs).ceil() as u32;
    let tap_chance = (demo.frame_secs / demo.tap_interval_secs).min(1.0);

    let mut taps = 0u32;
    let mut pops = 0u32;
    let mut ticks = 0u64;

    for frame_index in 0..frames {
        // Background the app for a moment halfway through
        if frame_index == frames / 2 {
            session.on_session_pause();
            session.on_session_event(SessionEvent::Interrupted);
            session.on_session_event(SessionEvent::InterruptionEnded);
            session.on_session_start(&mut host);
        }

        ticks += session.advance(&mut host, frame) as u64;

        if rng.random::<f32>() < tap_chance {
            taps += 1;
            let point = aim(&host, &mut rng, demo.accuracy);
            if let Some(outcome) = session.on_tap(&mut host, point) {
                pops += 1;
                log::info!("Pop! {} at {:?}", outcome.removed(), outcome.position());
            }
        }
    }

    session.on_session_pause();

    let registry = session.field().registry();
    log::info!(
        "Done: {} ticks, {} taps, {} pops, {} live, {} popped",
        ticks,
        taps,
        pops,
        registry.live_count(),
        registry.popped().count()
    );
    Ok(())
}

/// Pick a tap point: on a live balloon with probability `accuracy`, else anywhere.
fn aim(host: &HeadlessHost, rng: &mut Pcg32, accuracy: f32) -> Vec2 {
    let target = host
        .live_nodes()
        .next()
        .and_then(|id| host.node_position(id))
        .and_then(|pos| host.project(pos));

    match target {
        Some(point) if rng.random::<f32>() < accuracy => point,
        _ => {
            let size = host.viewport();
            Vec2::new(
                rng.random_range(0.0..size.x),
                rng.random_range(0.0..size.y),
            )
        }
    }
}
