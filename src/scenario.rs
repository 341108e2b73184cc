//! Scenario Scripts
//!
//! A scenario is a chain written down as data: an ordered list of directives in TOML,
//! each mapping onto one combinator call. Scenarios are built through a
//! [`ChainFactory`], so `custom` directives reach whatever combinators the factory has
//! registered.
//!
//! ```toml
//! name = "sentry"
//!
//! [[steps]]
//! kind = "play"
//! animation = "scan"
//! loop_seconds = 0.5
//!
//! [[steps]]
//! kind = "wait_for_animation"
//! times = 2
//!
//! [[steps]]
//! kind = "emit"
//! event = "all-clear"
//!
//! [[steps]]
//! kind = "repeat"
//! times = 3
//! ```

pub mod actor;
pub mod combinators;
pub mod runner;

pub use actor::{Actor, AnimationPlayer, FiredEvent};
pub use combinators::{standard_factory, standard_registry};
pub use runner::{run_scenario, RunOptions, RunReport};

use crate::chain::Chain;
use crate::error::ChainError;
use crate::registry::ChainFactory;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    pub steps: Vec<Directive>,
}

/// One combinator call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Directive {
    /// `then`: record an event once
    Emit { event: String },
    Wait { seconds: f64 },
    /// `during`: record an event on every tick of the preceding step
    During { event: String },
    Every { seconds: f64, event: String },
    /// `or_until`: end the preceding step once `event` has fired `count` times
    OrUntilEvents { event: String, count: usize },
    /// `repeat`; omitting `times` (or `times = 0`) repeats forever
    Repeat {
        #[serde(default)]
        times: Option<u32>,
    },
    /// `then`: switch the actor's animation clip
    Play { animation: String, loop_seconds: f64 },
    /// Wait on the actor's current animation
    WaitForAnimation {
        #[serde(default)]
        times: Option<u32>,
    },
    /// A combinator from the factory's registry
    Custom {
        name: String,
        #[serde(default)]
        args: Value,
    },
}

impl Directive {
    pub fn kind(&self) -> &'static str {
        match self {
            Directive::Emit { .. } => "emit",
            Directive::Wait { .. } => "wait",
            Directive::During { .. } => "during",
            Directive::Every { .. } => "every",
            Directive::OrUntilEvents { .. } => "or_until_events",
            Directive::Repeat { .. } => "repeat",
            Directive::Play { .. } => "play",
            Directive::WaitForAnimation { .. } => "wait_for_animation",
            Directive::Custom { .. } => "custom",
        }
    }

    fn validate(&self) -> Result<(), String> {
        match self {
            Directive::Wait { seconds } if !seconds.is_finite() || *seconds < 0.0 => {
                Err(format!("seconds must be non-negative, got {}", seconds))
            }
            Directive::Every { seconds, .. } if !seconds.is_finite() || *seconds <= 0.0 => {
                Err(format!("seconds must be positive, got {}", seconds))
            }
            Directive::Play { loop_seconds, .. }
                if !loop_seconds.is_finite() || *loop_seconds <= 0.0 =>
            {
                Err(format!("loop_seconds must be positive, got {}", loop_seconds))
            }
            _ => Ok(()),
        }
    }

    fn apply(&self, chain: Chain<Actor>) -> Result<Chain<Actor>, ChainError> {
        match self.clone() {
            Directive::Emit { event } => Ok(chain.then(move |actor| actor.emit(&event))),
            Directive::Wait { seconds } => Ok(chain.wait(seconds)),
            Directive::During { event } => chain.during(move |actor| actor.emit(&event)),
            Directive::Every { seconds, event } => {
                chain.every(seconds, move |actor| actor.emit(&event))
            }
            Directive::OrUntilEvents { event, count } => {
                chain.or_until(move |actor| actor.event_count(&event) >= count)
            }
            Directive::Repeat { times: Some(times) } => Ok(chain.repeat(times)),
            Directive::Repeat { times: None } => Ok(chain.repeat_forever()),
            Directive::Play {
                animation,
                loop_seconds,
            } => Ok(chain.then(move |actor| actor.play(&animation, loop_seconds))),
            Directive::WaitForAnimation { times } => {
                chain.wait_for_current_animation_loops(times.unwrap_or(1))
            }
            Directive::Custom { name, args } => chain.call(&name, args),
        }
    }
}

impl Scenario {
    pub fn from_toml_str(source: &str) -> Result<Self, ChainError> {
        let scenario: Scenario = toml::from_str(source)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self, ChainError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
            .map_err(|e| ChainError::Scenario(format!("{}: {}", path.display(), e)))
    }

    pub fn validate(&self) -> Result<(), ChainError> {
        if self.name.trim().is_empty() {
            return Err(ChainError::Scenario("name cannot be empty".to_string()));
        }
        if self.steps.is_empty() {
            return Err(ChainError::Scenario(format!(
                "scenario '{}' has no steps",
                self.name
            )));
        }
        for (index, directive) in self.steps.iter().enumerate() {
            directive.validate().map_err(|reason| {
                ChainError::Scenario(format!(
                    "step {} ({}): {}",
                    index + 1,
                    directive.kind(),
                    reason
                ))
            })?;
        }
        Ok(())
    }

    /// Build the scenario's chain through `factory`, bound to `actor`.
    pub fn build(
        &self,
        factory: &ChainFactory<Actor>,
        actor: Actor,
    ) -> Result<Chain<Actor>, ChainError> {
        let mut chain = factory.chain(actor);
        for (index, directive) in self.steps.iter().enumerate() {
            chain = directive.apply(chain).map_err(|e| {
                ChainError::Scenario(format!(
                    "step {} ({}): {}",
                    index + 1,
                    directive.kind(),
                    e
                ))
            })?;
        }
        debug!(scenario = %self.name, steps = chain.len(), "built scenario chain");
        Ok(chain)
    }
}
