//! Standard custom combinators available to scenarios through `custom` directives.

use crate::chain::queue::{step_fn, Shared, StepQueue, Tick};
use crate::error::ChainError;
use crate::registry::{ChainFactory, CombinatorRegistry};
use crate::scenario::actor::Actor;
use serde::Deserialize;
use serde_json::Value;
use std::cell::Cell;
use tracing::info;

#[derive(Debug, Deserialize)]
struct SayArgs {
    text: String,
}

#[derive(Debug, Deserialize)]
struct WaitFramesArgs {
    frames: u32,
}

fn parse_args<T: for<'de> Deserialize<'de>>(combinator: &str, args: &Value) -> Result<T, ChainError> {
    serde_json::from_value(args.clone()).map_err(|e| ChainError::invalid_arguments(combinator, e))
}

/// `say {text}`: log a line and record it as an event, once.
fn say(_: &Shared<Actor>, queue: &mut StepQueue<Actor>, args: &Value) -> Result<(), ChainError> {
    let SayArgs { text } = parse_args("say", args)?;
    queue.push(step_fn("say", move |tick: &mut Tick<'_, Actor>| {
        let frame = tick.context().borrow().frame();
        info!(frame, "{}", text);
        tick.with_context(|actor| actor.emit(&text));
        tick.complete();
    }));
    Ok(())
}

/// `wait_frames {frames}`: hold the head for a number of ticks regardless of elapsed time.
fn wait_frames(
    _: &Shared<Actor>,
    queue: &mut StepQueue<Actor>,
    args: &Value,
) -> Result<(), ChainError> {
    let WaitFramesArgs { frames } = parse_args("wait_frames", args)?;
    let seen = Cell::new(0u32);
    queue.push(step_fn("wait_frames", move |tick: &mut Tick<'_, Actor>| {
        seen.set(seen.get() + 1);
        if seen.get() >= frames {
            tick.complete();
            seen.set(0);
        }
    }));
    Ok(())
}

/// Registry holding the standard scenario combinators.
pub fn standard_registry() -> CombinatorRegistry<Actor> {
    let mut registry = CombinatorRegistry::new();
    registry.register_fn("say", say);
    registry.register_fn("wait_frames", wait_frames);
    registry
}

/// Factory whose chains carry the standard scenario combinators.
pub fn standard_factory() -> ChainFactory<Actor> {
    ChainFactory::with_registry(standard_registry())
}
