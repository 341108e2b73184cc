//! Animation hooks polled by the `wait_for_animation` combinators.
//!
//! The animation subsystem itself lives outside the engine; chains only read a
//! loop counter and, when asked to wait on "the current animation", ask the bound
//! context which animation that is.

use std::cell::Cell;
use std::rc::Rc;

/// Anything exposing how many times it has looped.
pub trait LoopCount {
    fn loop_count(&self) -> u32;
}

/// A bare counter is enough for hosts that track loops themselves.
impl LoopCount for Cell<u32> {
    fn loop_count(&self) -> u32 {
        self.get()
    }
}

/// A context with a notion of a currently playing animation.
pub trait Animated {
    fn current_animation(&self) -> Option<Rc<dyn LoopCount>>;
}
