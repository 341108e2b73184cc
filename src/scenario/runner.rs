//! Fixed-step scenario driver.
//!
//! Plays the part of the host frame loop: each frame it samples the frame clock,
//! moves the actor (and its animation) forward, then ticks the chain once.

use crate::clock::{ClockConfig, FrameClock};
use crate::error::ChainError;
use crate::registry::ChainFactory;
use crate::scenario::actor::{Actor, FiredEvent};
use crate::scenario::Scenario;
use serde::Serialize;
use tracing::{debug, info, info_span};

#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    /// Upper bound on frames to drive
    pub frames: u64,
    /// Raw host delta per frame, before clamping and scaling
    pub frame_delta: f64,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            frames: 600,
            frame_delta: 1.0 / 60.0,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub scenario: String,
    pub frames_run: u64,
    /// Frame on which the chain drained, if it did
    pub finished_at: Option<u64>,
    pub simulated_time: f64,
    pub events: Vec<FiredEvent>,
}

impl RunReport {
    pub fn finished(&self) -> bool {
        self.finished_at.is_some()
    }
}

/// Build `scenario` through `factory` and drive it until it drains or
/// `options.frames` frames have run.
pub fn run_scenario(
    scenario: &Scenario,
    factory: &ChainFactory<Actor>,
    clock: &ClockConfig,
    options: &RunOptions,
) -> Result<RunReport, ChainError> {
    clock.validate().map_err(ChainError::Config)?;
    let span = info_span!("scenario", name = %scenario.name);
    let _enter = span.enter();

    let mut chain = scenario.build(factory, Actor::new())?;
    let mut clock = FrameClock::new(clock.clone());
    let mut finished_at = None;

    for frame in 1..=options.frames {
        let elapsed = clock.tick(options.frame_delta);
        chain
            .context()
            .borrow_mut()
            .advance(frame, clock.time(), elapsed);
        chain.tick(elapsed);

        if chain.is_finished() {
            finished_at = Some(frame);
            break;
        }
    }

    let frames_run = clock.frames();
    match finished_at {
        Some(frame) => info!(frame, "scenario chain drained"),
        None => debug!(frames_run, remaining = chain.len(), "frame budget exhausted"),
    }

    let events = chain.context().borrow_mut().take_events();
    Ok(RunReport {
        scenario: scenario.name.clone(),
        frames_run,
        finished_at,
        simulated_time: clock.time(),
        events,
    })
}
