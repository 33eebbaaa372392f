use std::collections::HashMap;

use crate::{symbol::SemanticId, RascentResult, Symbol};

/// A semantic action.
///
/// Called with the argument symbols of the rule, a flag telling whether the
/// rule was fully reduced (`false` on a partial invocation over a rule
/// prefix) and the return value of the previous invocation for the same
/// active rule instance. The returned value becomes the nonterminal's value
/// on a full reduction, or is carried to the next invocation otherwise.
pub type SemanticAction<V, C> =
    Box<dyn Fn(&[Symbol<V>], bool, Option<V>) -> RascentResult<Option<V>, C>>;

/// The semantic actions of a parse, keyed by semantic-rule ID.
///
/// Actions are optional per rule; a rule without one reduces to the value
/// carried over from its partial invocations, if any.
pub struct Semantics<V, C> {
    actions: HashMap<SemanticId, SemanticAction<V, C>>,
}

impl<V, C> Default for Semantics<V, C> {
    fn default() -> Self {
        Self {
            actions: HashMap::default(),
        }
    }
}

impl<V, C> Semantics<V, C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the action for a semantic rule.
    pub fn on<F>(mut self, id: SemanticId, action: F) -> Self
    where
        F: Fn(&[Symbol<V>], bool, Option<V>) -> RascentResult<Option<V>, C> + 'static,
    {
        self.actions.insert(id, Box::new(action));
        self
    }

    pub fn get(&self, id: SemanticId) -> Option<&SemanticAction<V, C>> {
        self.actions.get(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
