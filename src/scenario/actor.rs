//! Simulated actor used as the bound context of scenario chains.

use crate::animation::{Animated, LoopCount};
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::info;

/// An event recorded by a scenario step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FiredEvent {
    pub frame: u64,
    pub time: f64,
    pub name: String,
}

#[derive(Debug, Clone)]
struct Clip {
    name: String,
    loop_seconds: f64,
}

/// Plays one looping clip at a time and counts completed loops.
///
/// Switching clips resets the loop count, so a chain waiting on the player always
/// observes the clip that is currently playing.
#[derive(Debug, Default)]
pub struct AnimationPlayer {
    clip: RefCell<Option<Clip>>,
    elapsed: Cell<f64>,
    loops: Cell<u32>,
}

impl AnimationPlayer {
    pub fn play(&self, name: &str, loop_seconds: f64) {
        *self.clip.borrow_mut() = Some(Clip {
            name: name.to_string(),
            loop_seconds,
        });
        self.elapsed.set(0.0);
        self.loops.set(0);
    }

    pub fn clip_name(&self) -> Option<String> {
        self.clip.borrow().as_ref().map(|clip| clip.name.clone())
    }

    pub fn advance(&self, elapsed: f64) {
        let clip = self.clip.borrow();
        let Some(clip) = clip.as_ref() else {
            return;
        };
        if clip.loop_seconds.is_nan() || clip.loop_seconds <= 0.0 {
            return;
        }
        let progress = self.elapsed.get() + elapsed;
        let whole = (progress / clip.loop_seconds).floor();
        if whole >= 1.0 {
            // Saturating float-to-int cast; loop counts pin at u32::MAX.
            self.loops.set(self.loops.get().saturating_add(whole as u32));
        }
        let remainder = progress - whole * clip.loop_seconds;
        if remainder.is_finite() {
            self.elapsed.set(remainder.clamp(0.0, clip.loop_seconds));
        } else {
            self.elapsed.set(0.0);
        }
    }
}

impl LoopCount for AnimationPlayer {
    fn loop_count(&self) -> u32 {
        self.loops.get()
    }
}

/// Scenario context: a clock position, an animation player, and an event log.
#[derive(Debug)]
pub struct Actor {
    frame: u64,
    time: f64,
    animation: Rc<AnimationPlayer>,
    events: Vec<FiredEvent>,
}

impl Actor {
    pub fn new() -> Self {
        Self {
            frame: 0,
            time: 0.0,
            animation: Rc::new(AnimationPlayer::default()),
            events: Vec::new(),
        }
    }

    /// Move the actor to `frame` at `time` and advance its animation by `elapsed`.
    pub fn advance(&mut self, frame: u64, time: f64, elapsed: f64) {
        self.frame = frame;
        self.time = time;
        self.animation.advance(elapsed);
    }

    pub fn emit(&mut self, name: &str) {
        info!(frame = self.frame, time = self.time, event = name, "event");
        self.events.push(FiredEvent {
            frame: self.frame,
            time: self.time,
            name: name.to_string(),
        });
    }

    pub fn play(&mut self, name: &str, loop_seconds: f64) {
        info!(frame = self.frame, clip = name, loop_seconds, "play animation");
        self.animation.play(name, loop_seconds);
    }

    pub fn animation(&self) -> &AnimationPlayer {
        &self.animation
    }

    pub fn events(&self) -> &[FiredEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<FiredEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn event_count(&self, name: &str) -> usize {
        self.events.iter().filter(|e| e.name == name).count()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}

impl Default for Actor {
    fn default() -> Self {
        Self::new()
    }
}

impl Animated for Actor {
    fn current_animation(&self) -> Option<Rc<dyn LoopCount>> {
        Some(Rc::clone(&self.animation) as Rc<dyn LoopCount>)
    }
}
