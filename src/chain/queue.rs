//! Step Queue
//!
//! Ordered, mutable sequence of shared step handles. Only the head is advanced on a
//! tick, and a running step may splice the queue (remove itself, insert a block ahead
//! of the remaining steps) because the chain holds its own handle to the running step.

use crate::error::ChainError;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

/// Shared handle to a chain's bound context.
pub type Shared<C> = Rc<RefCell<C>>;

/// Shared handle to a step. Snapshots and the live queue hold the same handles, so
/// step-internal state (wait counters, repeat counters) is shared between them.
pub type StepRef<C> = Rc<dyn Step<C>>;

/// One unit of queued work.
///
/// A step is responsible for its own completion: when its condition holds it calls
/// [`Tick::complete`] to remove itself from the head. The engine never removes a step
/// on the step's behalf.
pub trait Step<C> {
    /// Advance this step by one tick. Only called while the step is the head.
    fn advance(&self, tick: &mut Tick<'_, C>);

    /// Short name used in trace output.
    fn label(&self) -> &str {
        "step"
    }
}

/// Per-tick view handed to the head step.
pub struct Tick<'a, C> {
    queue: &'a mut StepQueue<C>,
    context: &'a Shared<C>,
    elapsed: f64,
}

impl<'a, C> Tick<'a, C> {
    pub(crate) fn new(queue: &'a mut StepQueue<C>, context: &'a Shared<C>, elapsed: f64) -> Self {
        Self {
            queue,
            context,
            elapsed,
        }
    }

    /// Elapsed seconds supplied to this tick by the driver.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// The chain's bound context handle.
    pub fn context(&self) -> &Shared<C> {
        self.context
    }

    /// Run `f` with exclusive access to the bound context.
    pub fn with_context<R>(&self, f: impl FnOnce(&mut C) -> R) -> R {
        f(&mut self.context.borrow_mut())
    }

    /// The queue being advanced.
    pub fn queue(&mut self) -> &mut StepQueue<C> {
        &mut *self.queue
    }

    /// Remove the head step. Steps call this when their completion condition holds.
    pub fn complete(&mut self) {
        self.queue.remove_head();
    }
}

/// Adapter turning a closure into a [`Step`].
struct FnStep<F> {
    label: &'static str,
    body: F,
}

impl<C, F> Step<C> for FnStep<F>
where
    F: Fn(&mut Tick<'_, C>),
{
    fn advance(&self, tick: &mut Tick<'_, C>) {
        (self.body)(tick)
    }

    fn label(&self) -> &str {
        self.label
    }
}

/// Build a step from a closure. Intended for custom combinators.
///
/// The closure must call [`Tick::complete`] itself once it is done.
pub fn step_fn<C, F>(label: &'static str, body: F) -> StepRef<C>
where
    C: 'static,
    F: Fn(&mut Tick<'_, C>) + 'static,
{
    Rc::new(FnStep { label, body })
}

pub struct StepQueue<C> {
    steps: VecDeque<StepRef<C>>,
}

impl<C> StepQueue<C> {
    pub fn new() -> Self {
        Self {
            steps: VecDeque::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The step that will run on the next tick.
    pub fn head(&self) -> Option<&StepRef<C>> {
        self.steps.front()
    }

    /// The most recently appended step, which wrapping combinators rewrite.
    pub fn tail(&self) -> Option<&StepRef<C>> {
        self.steps.back()
    }

    /// Append a step to the tail.
    pub fn push(&mut self, step: StepRef<C>) {
        self.steps.push_back(step);
    }

    /// Replace the tail step, returning the one it replaced. On an empty queue this
    /// appends and returns `None`.
    pub fn replace_tail(&mut self, step: StepRef<C>) -> Option<StepRef<C>> {
        let previous = self.steps.pop_back();
        self.steps.push_back(step);
        previous
    }

    /// Rewrite the tail step with `wrap`, failing when there is nothing to wrap.
    pub fn wrap_tail(
        &mut self,
        combinator: &'static str,
        wrap: impl FnOnce(StepRef<C>) -> StepRef<C>,
    ) -> Result<(), ChainError> {
        let inner = self
            .tail()
            .cloned()
            .ok_or(ChainError::MissingPrecedingStep { combinator })?;
        self.replace_tail(wrap(inner));
        Ok(())
    }

    /// Remove and return the head step.
    pub fn remove_head(&mut self) -> Option<StepRef<C>> {
        self.steps.pop_front()
    }

    /// Insert `block` at the head, preserving its order.
    pub fn insert_block_at_head(&mut self, block: impl IntoIterator<Item = StepRef<C>>) {
        let block: Vec<StepRef<C>> = block.into_iter().collect();
        for step in block.into_iter().rev() {
            self.steps.push_front(step);
        }
    }

    /// Copy of every step handle currently queued, head first.
    pub fn snapshot(&self) -> Vec<StepRef<C>> {
        self.steps.iter().cloned().collect()
    }

    /// Labels of the queued steps, head first.
    pub fn labels(&self) -> Vec<String> {
        self.steps.iter().map(|s| s.label().to_string()).collect()
    }
}

impl<C> Default for StepQueue<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for StepQueue<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.labels()).finish()
    }
}
