//! Step implementations behind the built-in combinators.

use crate::animation::LoopCount;
use crate::chain::queue::{Step, StepRef, Tick};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use tracing::debug;

/// Runs an action once, then completes.
pub(crate) struct ThenStep<F> {
    action: RefCell<F>,
}

impl<F> ThenStep<F> {
    pub(crate) fn new(action: F) -> Self {
        Self {
            action: RefCell::new(action),
        }
    }
}

impl<C, F> Step<C> for ThenStep<F>
where
    F: FnMut(&mut C),
{
    fn advance(&self, tick: &mut Tick<'_, C>) {
        {
            let mut action = self.action.borrow_mut();
            tick.with_context(|ctx| (&mut *action)(ctx));
        }
        tick.complete();
    }

    fn label(&self) -> &str {
        "then"
    }
}

/// Counts down elapsed time, completing once the budget is spent.
pub(crate) struct WaitStep {
    seconds: f64,
    remaining: Cell<f64>,
}

impl WaitStep {
    pub(crate) fn new(seconds: f64) -> Self {
        Self {
            seconds,
            remaining: Cell::new(seconds),
        }
    }
}

impl<C> Step<C> for WaitStep {
    fn advance(&self, tick: &mut Tick<'_, C>) {
        let elapsed = tick.elapsed();
        if elapsed != 0.0 {
            self.remaining.set(self.remaining.get() - elapsed);
        }
        if self.remaining.get() <= 0.0 {
            tick.complete();
            // Restored so the same step can run again when a repeat re-inserts it.
            self.remaining.set(self.seconds);
        }
    }

    fn label(&self) -> &str {
        "wait"
    }
}

/// Layers a per-tick side effect in front of another step.
pub(crate) struct DuringStep<C, F> {
    label: &'static str,
    side: F,
    inner: StepRef<C>,
}

impl<C, F> DuringStep<C, F>
where
    F: Fn(&mut Tick<'_, C>),
{
    pub(crate) fn new(label: &'static str, side: F, inner: StepRef<C>) -> Self {
        Self { label, side, inner }
    }
}

impl<C, F> Step<C> for DuringStep<C, F>
where
    F: Fn(&mut Tick<'_, C>),
{
    fn advance(&self, tick: &mut Tick<'_, C>) {
        (self.side)(tick);
        self.inner.advance(tick);
    }

    fn label(&self) -> &str {
        self.label
    }
}

/// Completes early, skipping the wrapped step, once the predicate holds.
pub(crate) struct OrUntilStep<C, P> {
    predicate: RefCell<P>,
    inner: StepRef<C>,
}

impl<C, P> OrUntilStep<C, P>
where
    P: FnMut(&mut C) -> bool,
{
    pub(crate) fn new(predicate: P, inner: StepRef<C>) -> Self {
        Self {
            predicate: RefCell::new(predicate),
            inner,
        }
    }
}

impl<C, P> Step<C> for OrUntilStep<C, P>
where
    P: FnMut(&mut C) -> bool,
{
    fn advance(&self, tick: &mut Tick<'_, C>) {
        let satisfied = {
            let mut predicate = self.predicate.borrow_mut();
            tick.with_context(|ctx| (&mut *predicate)(ctx))
        };
        if satisfied {
            tick.complete();
            return;
        }
        self.inner.advance(tick);
    }

    fn label(&self) -> &str {
        "or_until"
    }
}

/// How many passes a repeated block makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repetitions {
    Times(u32),
    Forever,
}

impl Repetitions {
    /// A zero count repeats without bound.
    pub(crate) fn normalized(self) -> Self {
        match self {
            Repetitions::Times(0) => Repetitions::Forever,
            other => other,
        }
    }

    fn decrement(self) -> Self {
        match self {
            Repetitions::Times(n) => Repetitions::Times(n.saturating_sub(1)),
            Repetitions::Forever => Repetitions::Forever,
        }
    }

    fn has_remaining(self) -> bool {
        match self {
            Repetitions::Times(n) => n > 0,
            Repetitions::Forever => true,
        }
    }
}

impl From<u32> for Repetitions {
    fn from(times: u32) -> Self {
        Repetitions::Times(times).normalized()
    }
}

/// Control step that re-materializes the block captured ahead of it.
///
/// The snapshot excludes the control step itself; it re-appends itself through a
/// weak self-handle when re-inserting, so no reference cycle forms.
pub(crate) struct RepeatStep<C> {
    original: Repetitions,
    remaining: Cell<Repetitions>,
    snapshot: Vec<StepRef<C>>,
    this: Weak<RepeatStep<C>>,
}

impl<C: 'static> RepeatStep<C> {
    pub(crate) fn new(times: Repetitions, snapshot: Vec<StepRef<C>>) -> Rc<Self> {
        let times = times.normalized();
        Rc::new_cyclic(|this| Self {
            original: times,
            remaining: Cell::new(times),
            snapshot,
            this: this.clone(),
        })
    }
}

impl<C: 'static> Step<C> for RepeatStep<C> {
    fn advance(&self, tick: &mut Tick<'_, C>) {
        let left = self.remaining.get().decrement();
        tick.complete();
        if !left.has_remaining() {
            // Restored for enclosing repeats and later passes.
            self.remaining.set(self.original);
            return;
        }
        self.remaining.set(left);

        let mut block = self.snapshot.clone();
        if let Some(this) = self.this.upgrade() {
            block.push(this as StepRef<C>);
        }
        debug!(block_len = block.len(), remaining = ?left, "re-inserting repeated block");
        tick.queue().insert_block_at_head(block);
    }

    fn label(&self) -> &str {
        "repeat"
    }
}

/// Completes once an animation has looped at least `times` times.
pub(crate) struct AnimationStep {
    animation: Rc<dyn LoopCount>,
    times: u32,
}

impl AnimationStep {
    pub(crate) fn new(animation: Rc<dyn LoopCount>, times: u32) -> Self {
        Self { animation, times }
    }
}

impl<C> Step<C> for AnimationStep {
    fn advance(&self, tick: &mut Tick<'_, C>) {
        if self.animation.loop_count() >= self.times {
            tick.complete();
        }
    }

    fn label(&self) -> &str {
        "wait_for_animation"
    }
}
