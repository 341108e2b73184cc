//! framechain: frame-driven step chains
//!
//! A [`Chain`] is a FIFO of steps bound to a context value. The host calls
//! [`Chain::tick`] once per frame; only the head step runs, and a step leaves the
//! queue when it reports completion. Combinators (`then`, `wait`, `during`, `every`,
//! `or_until`, `repeat`, animation waits, and registered custom combinators) build
//! the queue declaratively.

pub mod animation;
pub mod chain;
pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod registry;
pub mod scenario;

pub use animation::{Animated, LoopCount};
pub use chain::queue::{step_fn, Shared, Step, StepQueue, StepRef, Tick};
pub use chain::{Chain, Repetitions};
pub use clock::{ClockConfig, FrameClock};
pub use config::{ConfigLoader, EngineConfig};
pub use error::ChainError;
pub use registry::{ChainFactory, Combinator, CombinatorRegistry};
