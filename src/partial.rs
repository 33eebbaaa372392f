use std::collections::HashMap;

use tracing::debug;

use crate::{
    semantics::Semantics,
    symbol::{SemanticId, Symbol},
    RascentResult,
};

/// Bookkeeping for one rule instance whose right-hand side has been
/// partially matched.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveRule<V> {
    /// Number of right-hand-side symbols seen so far, counting a terminal
    /// about to be shifted.
    pub seen_tokens: usize,
    /// Return value of the latest partial invocation.
    pub retval: Option<V>,
    /// Identifier distinguishing nested instances of the same rule.
    pub handle: u64,
}

/// Active rule instances of a parse, keyed by semantic-rule ID.
///
/// Each rule ID maps to a stack of instances: re-entering a rule before the
/// previous instance completed (recursion) pushes a fresh instance, and a
/// full reduction pops the innermost one. A single-slot cache would conflate
/// nested instances.
#[derive(Debug, Default)]
pub struct ActiveRules<V> {
    stacks: HashMap<SemanticId, Vec<ActiveRule<V>>>,
    next_handle: u64,
}

impl<V> ActiveRules<V> {
    pub fn new() -> Self {
        Self {
            stacks: HashMap::default(),
            next_handle: 0,
        }
    }

    fn top_mut(&mut self, rule_id: SemanticId) -> Option<&mut ActiveRule<V>> {
        self.stacks.get_mut(&rule_id).and_then(|stack| stack.last_mut())
    }

    fn push_new(&mut self, rule_id: SemanticId, seen_tokens: usize) -> u64 {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.stacks.entry(rule_id).or_default().push(ActiveRule {
            seen_tokens,
            retval: None,
            handle,
        });
        handle
    }

    /// Remove the innermost instance of a rule at its full reduction.
    pub fn pop(&mut self, rule_id: SemanticId) -> Option<ActiveRule<V>> {
        self.stacks.get_mut(&rule_id).and_then(|stack| stack.pop())
    }
}

/// Partially apply a semantic rule over the top of the symbol stack.
///
/// `rule_len` is the number of matched right-hand-side symbols at this site;
/// at a shift site (`before_shift`) the imminent lookahead terminal counts as
/// one more. The action is invoked at most twice: once over the stacked
/// prefix (skipped when a jump already presented that prefix for this
/// instance) and, at shift sites, once more with the lookahead appended so
/// the terminal is visible before it is pushed.
#[allow(clippy::too_many_arguments)]
pub(crate) fn apply_partial<V: Clone, C>(
    active: &mut ActiveRules<V>,
    semantics: &Semantics<V, C>,
    symbols: &[Symbol<V>],
    lookahead: &Symbol<V>,
    rule_id: SemanticId,
    rule_len: usize,
    before_shift: bool,
    trace: bool,
) -> RascentResult<(), C> {
    let arg_len = rule_len;
    let rule_len = if before_shift { rule_len + 1 } else { rule_len };

    let mut already_seen = false;
    let mut insert_new = false;
    let mut seen_tokens_old = None;

    match active.top_mut(rule_id) {
        Some(top) => {
            seen_tokens_old = Some(top.seen_tokens);
            if before_shift {
                if top.seen_tokens < rule_len {
                    top.seen_tokens = rule_len;
                } else {
                    // the rule is re-entered before the previous instance
                    // completed
                    insert_new = true;
                }
            } else if top.seen_tokens == rule_len {
                // a jump into an already-advanced handle
                already_seen = true;
            } else {
                top.seen_tokens = rule_len;
            }
        }
        None => insert_new = true,
    }

    if insert_new {
        seen_tokens_old = None;
        active.push_new(rule_id, rule_len);
    }

    if already_seen {
        return Ok(());
    }
    let action = match semantics.get(rule_id) {
        Some(action) => action,
        None => return Ok(()),
    };

    let mut args: Vec<Symbol<V>> =
        symbols[symbols.len().saturating_sub(arg_len)..].to_vec();

    if !before_shift || seen_tokens_old.map_or(true, |seen| seen + 1 < rule_len) {
        if trace {
            debug!(
                rule_id,
                len = arg_len,
                before_shift,
                "applying partial rule"
            );
        }
        let retval = take_retval(active, rule_id);
        let retval = action(&args, false, retval)?;
        store_retval(active, rule_id, retval);
    }

    if before_shift {
        if trace {
            debug!(
                rule_id,
                len = rule_len,
                before_shift,
                "applying partial rule with lookahead"
            );
        }
        args.push(lookahead.clone());
        let retval = take_retval(active, rule_id);
        let retval = action(&args, false, retval)?;
        store_retval(active, rule_id, retval);
    }

    Ok(())
}

fn take_retval<V>(active: &mut ActiveRules<V>, rule_id: SemanticId) -> Option<V> {
    active.top_mut(rule_id).and_then(|top| top.retval.take())
}

fn store_retval<V>(active: &mut ActiveRules<V>, rule_id: SemanticId, retval: Option<V>) {
    if let Some(top) = active.top_mut(rule_id) {
        top.retval = retval;
    }
}

/// Reduce a rule to its value: consume the innermost active instance (its
/// `retval` seeds the final invocation) and run the action over the complete
/// right-hand side.
pub(crate) fn reduce_value<V, C>(
    active: &mut ActiveRules<V>,
    semantics: &Semantics<V, C>,
    use_partials: bool,
    rule_id: SemanticId,
    args: &[Symbol<V>],
    trace: bool,
) -> RascentResult<Option<V>, C> {
    let mut retval = None;
    let mut handle = None;

    if use_partials {
        if let Some(instance) = active.pop(rule_id) {
            retval = instance.retval;
            handle = Some(instance.handle);
        }
    }

    if trace {
        debug!(rule_id, num_rhs = args.len(), ?handle, "reducing");
    }

    match semantics.get(rule_id) {
        Some(action) => action(args, true, retval),
        None => Ok(retval),
    }
}
