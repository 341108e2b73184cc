//! Combinator registry: the extension vocabulary chains are built with.
//!
//! A [`ChainFactory`] owns a registry and stamps every chain it builds with a copy
//! of the combinators registered at that moment. Chains built before a later
//! registration never gain it.

use crate::chain::queue::{Shared, StepQueue};
use crate::chain::Chain;
use crate::error::ChainError;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use tracing::{debug, warn};

/// A named build-time operation applied to a chain's context and queue.
///
/// `args` carries whatever the caller passed to [`Chain::call`]; combinators
/// deserialize what they need and report [`ChainError::InvalidArguments`] otherwise.
pub trait Combinator<C> {
    fn build(
        &self,
        context: &Shared<C>,
        queue: &mut StepQueue<C>,
        args: &Value,
    ) -> Result<(), ChainError>;
}

impl<C, F> Combinator<C> for F
where
    F: Fn(&Shared<C>, &mut StepQueue<C>, &Value) -> Result<(), ChainError>,
{
    fn build(
        &self,
        context: &Shared<C>,
        queue: &mut StepQueue<C>,
        args: &Value,
    ) -> Result<(), ChainError> {
        self(context, queue, args)
    }
}

pub(crate) type CombinatorMap<C> = BTreeMap<String, Rc<dyn Combinator<C>>>;

/// Name → combinator table.
pub struct CombinatorRegistry<C> {
    combinators: CombinatorMap<C>,
}

impl<C: 'static> CombinatorRegistry<C> {
    pub fn new() -> Self {
        Self {
            combinators: BTreeMap::new(),
        }
    }

    /// Register a combinator under `name`, returning any combinator it replaced.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        combinator: impl Combinator<C> + 'static,
    ) -> Option<Rc<dyn Combinator<C>>> {
        let name = name.into();
        let previous = self
            .combinators
            .insert(name.clone(), Rc::new(combinator) as Rc<dyn Combinator<C>>);
        if previous.is_some() {
            warn!(combinator = %name, "replaced previously registered combinator");
        } else {
            debug!(combinator = %name, "registered combinator");
        }
        previous
    }

    /// Register a closure combinator; the closure's argument types are inferred.
    pub fn register_fn<F>(&mut self, name: impl Into<String>, combinator: F)
    where
        F: Fn(&Shared<C>, &mut StepQueue<C>, &Value) -> Result<(), ChainError> + 'static,
    {
        self.register(name, combinator);
    }

    pub fn get(&self, name: &str) -> Option<&Rc<dyn Combinator<C>>> {
        self.combinators.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.combinators.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.combinators.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.combinators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combinators.is_empty()
    }

    pub(crate) fn snapshot(&self) -> CombinatorMap<C> {
        self.combinators.clone()
    }
}

impl<C: 'static> Default for CombinatorRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds chains that carry the factory's registered combinators.
pub struct ChainFactory<C> {
    registry: CombinatorRegistry<C>,
}

impl<C: 'static> ChainFactory<C> {
    pub fn new() -> Self {
        Self::with_registry(CombinatorRegistry::new())
    }

    pub fn with_registry(registry: CombinatorRegistry<C>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &CombinatorRegistry<C> {
        &self.registry
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        combinator: impl Combinator<C> + 'static,
    ) -> &mut Self {
        self.registry.register(name, combinator);
        self
    }

    pub fn register_fn<F>(&mut self, name: impl Into<String>, combinator: F) -> &mut Self
    where
        F: Fn(&Shared<C>, &mut StepQueue<C>, &Value) -> Result<(), ChainError> + 'static,
    {
        self.registry.register_fn(name, combinator);
        self
    }

    /// Build a chain bound to `context`.
    pub fn chain(&self, context: C) -> Chain<C> {
        self.chain_shared(Rc::new(RefCell::new(context)))
    }

    /// Build a chain bound to an already shared context.
    pub fn chain_shared(&self, context: Shared<C>) -> Chain<C> {
        Chain::with_combinators(context, self.registry.snapshot())
    }
}

impl<C: 'static> Default for ChainFactory<C> {
    fn default() -> Self {
        Self::new()
    }
}
