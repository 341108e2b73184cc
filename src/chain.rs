//! Chain Engine
//!
//! A [`Chain`] is both a builder and a tick target. Combinator calls append steps to
//! (or rewrite the tail of) its queue; each [`Chain::tick`] advances only the head.
//!
//! ```rust
//! use framechain::Chain;
//!
//! let mut chain = Chain::new(0u32)
//!     .wait(1.0)
//!     .then(|hits| *hits += 1)
//!     .repeat(3);
//!
//! for _ in 0..20 {
//!     chain.tick(0.5);
//! }
//! assert_eq!(*chain.context().borrow(), 3);
//! assert!(chain.is_finished());
//! ```

pub mod queue;
mod steps;

pub use steps::Repetitions;

use crate::animation::{Animated, LoopCount};
use crate::error::ChainError;
use crate::registry::CombinatorMap;
use queue::{Shared, StepQueue, Tick};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use steps::{AnimationStep, DuringStep, OrUntilStep, RepeatStep, ThenStep, WaitStep};
use tracing::trace;

pub struct Chain<C> {
    queue: StepQueue<C>,
    context: Shared<C>,
    combinators: CombinatorMap<C>,
}

impl<C: 'static> Chain<C> {
    /// Create a chain bound to `context`, with no registered combinators.
    pub fn new(context: C) -> Self {
        Self::with_shared(Rc::new(RefCell::new(context)))
    }

    /// Create a chain bound to a context that other code also holds.
    pub fn with_shared(context: Shared<C>) -> Self {
        Self::with_combinators(context, BTreeMap::new())
    }

    pub(crate) fn with_combinators(context: Shared<C>, combinators: CombinatorMap<C>) -> Self {
        Self {
            queue: StepQueue::new(),
            context,
            combinators,
        }
    }

    pub fn context(&self) -> &Shared<C> {
        &self.context
    }

    pub fn queue(&self) -> &StepQueue<C> {
        &self.queue
    }

    /// Number of queued steps, including the active head.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// True once every step has completed (or none were queued).
    pub fn is_finished(&self) -> bool {
        self.queue.is_empty()
    }

    /// Advance the head step by one tick of `elapsed` seconds. No-op on an empty chain.
    ///
    /// Callbacks run during the tick must not tick this same chain again.
    pub fn tick(&mut self, elapsed: f64) {
        let Some(head) = self.queue.head().cloned() else {
            return;
        };
        trace!(
            step = head.label(),
            queued = self.queue.len(),
            elapsed,
            "advancing head step"
        );
        let mut tick = Tick::new(&mut self.queue, &self.context, elapsed);
        head.advance(&mut tick);
    }

    /// Run `action` once, on the first tick after it becomes the head.
    pub fn then(mut self, action: impl FnMut(&mut C) + 'static) -> Self {
        self.queue.push(Rc::new(ThenStep::new(action)));
        self
    }

    /// Hold the head until `seconds` of elapsed time have been consumed.
    pub fn wait(mut self, seconds: f64) -> Self {
        self.queue.push(Rc::new(WaitStep::new(seconds)));
        self
    }

    /// Run `action` on every tick the preceding step is active, before it advances.
    pub fn during(mut self, action: impl FnMut(&mut C) + 'static) -> Result<Self, ChainError> {
        let action = RefCell::new(action);
        self.queue.wrap_tail("during", |inner| {
            Rc::new(DuringStep::new(
                "during",
                move |tick: &mut Tick<'_, C>| {
                    let mut action = action.borrow_mut();
                    tick.with_context(|ctx| (&mut *action)(ctx));
                },
                inner,
            ))
        })?;
        Ok(self)
    }

    /// Repeat every step queued so far `times` times in total.
    ///
    /// `repeat(1)` runs the block once with no extra pass; `repeat(0)` repeats forever.
    pub fn repeat(self, times: u32) -> Self {
        self.repeat_with(Repetitions::from(times))
    }

    /// Repeat every step queued so far indefinitely.
    pub fn repeat_forever(self) -> Self {
        self.repeat_with(Repetitions::Forever)
    }

    pub fn repeat_with(mut self, times: Repetitions) -> Self {
        let snapshot = self.queue.snapshot();
        self.queue.push(RepeatStep::new(times, snapshot));
        self
    }

    /// Fire `action` every `seconds` of elapsed time while the preceding step is active.
    pub fn every(
        mut self,
        seconds: f64,
        action: impl FnMut(&mut C) + 'static,
    ) -> Result<Self, ChainError> {
        let periodic = RefCell::new(
            Chain::with_shared(Rc::clone(&self.context))
                .wait(seconds)
                .then(action)
                .repeat_forever(),
        );
        self.queue.wrap_tail("every", |inner| {
            Rc::new(DuringStep::new(
                "every",
                move |tick: &mut Tick<'_, C>| periodic.borrow_mut().tick(tick.elapsed()),
                inner,
            ))
        })?;
        Ok(self)
    }

    /// Complete the preceding step early once `predicate` returns true.
    ///
    /// The predicate is checked first on every tick; when it holds, the wrapped step
    /// does not run that tick.
    pub fn or_until(
        mut self,
        predicate: impl FnMut(&mut C) -> bool + 'static,
    ) -> Result<Self, ChainError> {
        self.queue
            .wrap_tail("or_until", |inner| Rc::new(OrUntilStep::new(predicate, inner)))?;
        Ok(self)
    }

    /// Hold the head until `animation` has looped at least once.
    pub fn wait_for_animation(self, animation: Rc<dyn LoopCount>) -> Self {
        self.wait_for_animation_loops(animation, 1)
    }

    /// Hold the head until `animation` has looped at least `times` times.
    pub fn wait_for_animation_loops(mut self, animation: Rc<dyn LoopCount>, times: u32) -> Self {
        self.queue
            .push(Rc::new(AnimationStep::new(animation, times)));
        self
    }

    /// Apply the registered combinator `name` with `args`.
    pub fn call(mut self, name: &str, args: Value) -> Result<Self, ChainError> {
        let combinator = self
            .combinators
            .get(name)
            .cloned()
            .ok_or_else(|| ChainError::UnknownCombinator(name.to_string()))?;
        combinator.build(&self.context, &mut self.queue, &args)?;
        Ok(self)
    }

    pub fn has_combinator(&self, name: &str) -> bool {
        self.combinators.contains_key(name)
    }

    /// Names of the registered combinators this chain was built with.
    pub fn combinator_names(&self) -> Vec<&str> {
        self.combinators.keys().map(String::as_str).collect()
    }
}

impl<C: Animated + 'static> Chain<C> {
    /// Hold the head until the context's current animation has looped once.
    pub fn wait_for_current_animation(self) -> Result<Self, ChainError> {
        self.wait_for_current_animation_loops(1)
    }

    /// Hold the head until the context's current animation has looped `times` times.
    ///
    /// The animation is resolved now, at build time, not on each tick.
    pub fn wait_for_current_animation_loops(self, times: u32) -> Result<Self, ChainError> {
        let animation = self
            .context
            .borrow()
            .current_animation()
            .ok_or(ChainError::NoCurrentAnimation)?;
        Ok(self.wait_for_animation_loops(animation, times))
    }
}

impl<C: Default + 'static> Default for Chain<C> {
    fn default() -> Self {
        Self::new(C::default())
    }
}

impl<C> fmt::Debug for Chain<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("queue", &self.queue)
            .field("combinators", &self.combinators.keys().collect::<Vec<_>>())
            .finish()
    }
}
