//! Per-parse state machine behind generated recursive-ascent parsers.
//!
//! A generated parser is one function per LR state; everything those
//! functions share (lookahead handling, the symbol stack, rule application,
//! partial rules) lives here so the emitted code stays a bare state machine.
//! The helpers mirror the table-driven [`crate::Parser`] step for step, which
//! is what makes the two parsers produce identical semantic-action call
//! sequences.

use std::fmt::Debug;

use crate::{
    error::ErrorKind,
    partial::{apply_partial, reduce_value, ActiveRules},
    semantics::Semantics,
    symbol::{NonTermId, SemanticId, Symbol, TermId},
    token::{Token, TokenStream},
    RascentError, RascentResult,
};

pub struct Machine<'s, V, C> {
    semantics: &'s Semantics<V, C>,
    stream: TokenStream<V>,
    lookahead: Symbol<V>,
    lookahead_id: TermId,
    pub symbols: Vec<Symbol<V>>,
    /// Pop counter climbing back up the state-routine call chain after a
    /// reduce: set to the rule length, decremented per routine return; a
    /// routine only dispatches jumps while it reads zero.
    pub dist_to_jump: isize,
    pub accepted: bool,
    pub use_partials: bool,
    trace: bool,
    active: ActiveRules<V>,
}

impl<'s, V: Clone + Debug, C> Machine<'s, V, C> {
    pub fn new(
        tokens: Vec<Token<V>>,
        semantics: &'s Semantics<V, C>,
        use_partials: bool,
        trace: bool,
    ) -> RascentResult<Self, C> {
        let mut stream = TokenStream::new(tokens);
        let token = stream.advance()?;

        Ok(Self {
            semantics,
            stream,
            lookahead: Symbol::terminal(token.id, token.value),
            lookahead_id: token.id,
            symbols: Vec::default(),
            dist_to_jump: 0,
            accepted: false,
            use_partials,
            trace,
            active: ActiveRules::new(),
        })
    }

    /// Identifier of the current lookahead terminal.
    pub fn lookahead_id(&self) -> TermId {
        self.lookahead_id
    }

    /// Identifier of the stack top, when it is a nonterminal.
    pub fn top_nonterminal(&self) -> Option<NonTermId> {
        self.symbols.last().and_then(|symbol| symbol.nonterm_id())
    }

    /// Push the lookahead onto the symbol stack and pull the next token.
    pub fn push_lookahead(&mut self) -> RascentResult<(), C> {
        let token = self.stream.advance()?;
        self.lookahead_id = token.id;
        let next = Symbol::terminal(token.id, token.value);
        self.symbols.push(std::mem::replace(&mut self.lookahead, next));
        Ok(())
    }

    /// Reduce: pop the rule's right-hand side, run its action, push the
    /// left-hand-side nonterminal and arm the jump counter.
    pub fn apply_rule(
        &mut self,
        rule_id: SemanticId,
        num_rhs: usize,
        lhs_id: NonTermId,
    ) -> RascentResult<(), C> {
        self.dist_to_jump = num_rhs as isize;

        let args = self
            .symbols
            .split_off(self.symbols.len().saturating_sub(num_rhs));
        let value = reduce_value(
            &mut self.active,
            self.semantics,
            self.use_partials,
            rule_id,
            &args,
            self.trace,
        )?;

        self.symbols.push(Symbol::nonterminal(lhs_id, value));
        Ok(())
    }

    /// Partially apply a rule at a shift or jump site.
    pub fn apply_partial(
        &mut self,
        rule_id: SemanticId,
        rule_len: usize,
        before_shift: bool,
    ) -> RascentResult<(), C> {
        apply_partial(
            &mut self.active,
            self.semantics,
            &self.symbols,
            &self.lookahead,
            rule_id,
            rule_len,
            before_shift,
            self.trace,
        )
    }

    /// Error for a lookahead no state routine has a case for.
    pub fn invalid_transition(&self, state: usize) -> RascentError<C> {
        RascentError::new(ErrorKind::InvalidTransition(state), Some(self.stream.position()))
    }
}
