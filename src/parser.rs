use std::fmt::Debug;

use tracing::debug;

use crate::{
    error::ErrorKind,
    partial::{apply_partial, reduce_value, ActiveRules},
    semantics::Semantics,
    symbol::Symbol,
    tables::ParseTables,
    token::{Token, TokenStream},
    NoCustomError, RascentError, RascentResult,
};

/// Table-driven LALR(1) parser.
///
/// Borrows an immutable table artifact and owns the semantic actions and the
/// behavior toggles. All per-parse state lives inside [`Parser::parse`], so
/// one parser may run any number of parses and the tables may back several
/// parsers at once.
pub struct Parser<'t, V, C = NoCustomError> {
    tables: &'t ParseTables,
    semantics: Semantics<V, C>,
    /// Invoke semantic actions on partially matched rules.
    pub use_partials: bool,
    /// Log every driver step.
    pub debug: bool,
}

impl<'t, V, C> Parser<'t, V, C> {
    pub fn new(tables: &'t ParseTables) -> Self {
        Self::with_semantics(tables, Semantics::default())
    }

    pub fn with_semantics(tables: &'t ParseTables, semantics: Semantics<V, C>) -> Self {
        Self {
            tables,
            semantics,
            use_partials: true,
            debug: false,
        }
    }
}

impl<'t, V: Clone + Debug, C> Parser<'t, V, C> {
    /// Run the parser over a token sequence terminated by the end marker.
    ///
    /// On acceptance the value is the sole remaining symbol of the stack, or
    /// `None` when the stack is empty. The first fault aborts the parse.
    pub fn parse(&self, tokens: Vec<Token<V>>) -> RascentResult<Option<Symbol<V>>, C> {
        Run::new(self, tokens)?.drive()
    }
}

/// The state owned by a single `parse` call.
struct Run<'p, 't, V, C> {
    parser: &'p Parser<'t, V, C>,
    stream: TokenStream<V>,
    lookahead: Symbol<V>,
    lookahead_id: crate::TermId,
    lookahead_col: usize,
    states: Vec<usize>,
    symbols: Vec<Symbol<V>>,
    active: ActiveRules<V>,
}

impl<'p, 't, V: Clone + Debug, C> Run<'p, 't, V, C> {
    fn new(parser: &'p Parser<'t, V, C>, tokens: Vec<Token<V>>) -> RascentResult<Self, C> {
        let mut stream = TokenStream::new(tokens);
        let token = stream.advance()?;
        let lookahead_col = parser.tables.term_index(token.id)?;

        Ok(Self {
            parser,
            stream,
            lookahead: Symbol::terminal(token.id, token.value),
            lookahead_id: token.id,
            lookahead_col,
            states: vec![parser.tables.consts.start],
            symbols: Vec::default(),
            active: ActiveRules::new(),
        })
    }

    fn tables(&self) -> &'t ParseTables {
        self.parser.tables
    }

    fn at(&self, kind: ErrorKind<C>) -> RascentError<C> {
        RascentError::new(kind, Some(self.stream.position()))
    }

    /// Push the lookahead onto the symbol stack and pull the next token.
    fn push_lookahead(&mut self) -> RascentResult<(), C> {
        let token = self.stream.advance()?;
        self.lookahead_col = self.tables().term_index(token.id)?;
        self.lookahead_id = token.id;
        let next = Symbol::terminal(token.id, token.value);
        self.symbols.push(std::mem::replace(&mut self.lookahead, next));
        Ok(())
    }

    fn apply_partial(
        &mut self,
        rule_idx: usize,
        rule_len: usize,
        before_shift: bool,
    ) -> RascentResult<(), C> {
        let rule_id = self.tables().semantic_id(rule_idx)?;
        apply_partial(
            &mut self.active,
            &self.parser.semantics,
            &self.symbols,
            &self.lookahead,
            rule_id,
            rule_len,
            before_shift,
            self.parser.debug,
        )
    }

    /// Reduce by a rule: pop its right-hand side, run the action, push the
    /// left-hand-side nonterminal.
    fn apply_rule(&mut self, rule_idx: usize) -> RascentResult<usize, C> {
        let tables = self.tables();
        let rule_id = tables.semantic_id(rule_idx)?;
        let num_rhs = tables.num_rhs_syms[rule_idx];
        let lhs_idx = tables.lhs_idx[rule_idx];
        let lhs_id = tables.nonterm_id(lhs_idx)?;

        let args = self.symbols.split_off(self.symbols.len() - num_rhs);
        self.states.truncate(self.states.len() - num_rhs);

        let value = reduce_value(
            &mut self.active,
            &self.parser.semantics,
            self.parser.use_partials,
            rule_id,
            &args,
            self.parser.debug,
        )?;

        self.symbols.push(Symbol::nonterminal(lhs_id, value));
        Ok(lhs_idx)
    }

    fn drive(mut self) -> RascentResult<Option<Symbol<V>>, C> {
        let tables = self.tables();
        let err = tables.consts.err;

        loop {
            let state = self.states[self.states.len() - 1];
            let shift_to = tables
                .shift
                .get(state, self.lookahead_col)
                .ok_or_else(|| self.at(ErrorKind::MissingState(state)))?;
            let rule = tables
                .reduce
                .get(state, self.lookahead_col)
                .ok_or_else(|| self.at(ErrorKind::MissingState(state)))?;

            if self.parser.debug {
                debug!(
                    state,
                    lookahead = %self.lookahead_id,
                    shift_to,
                    rule,
                    depth = self.symbols.len(),
                    "driver step"
                );
            }

            if shift_to == err && rule == err {
                return Err(self.at(ErrorKind::NoAction {
                    state,
                    lookahead: self.lookahead_id,
                    depth: self.symbols.len(),
                }));
            }
            if shift_to != err && rule != err {
                return Err(self.at(ErrorKind::ShiftReduceConflict {
                    state,
                    lookahead: self.lookahead_id,
                }));
            }

            // accept
            if rule == tables.consts.acc {
                if self.parser.debug {
                    debug!("accepting");
                }
                return Ok(self.symbols.pop());
            }

            // shift
            if shift_to != err {
                if self.parser.use_partials {
                    if let Some((rule_idx, len)) = tables.partial_term(state, self.lookahead_col)
                    {
                        self.apply_partial(rule_idx, len, true)?;
                    }
                }
                self.states.push(shift_to as usize);
                self.push_lookahead()?;
                continue;
            }

            // reduce
            let lhs_idx = self.apply_rule(rule as usize)?;
            let top = self.states[self.states.len() - 1];

            if self.parser.use_partials && !self.symbols.is_empty() {
                if let Some((rule_idx, len)) = tables.partial_nonterm(top, lhs_idx) {
                    self.apply_partial(rule_idx, len, false)?;
                }
            }

            let jump = tables
                .jump
                .get(top, lhs_idx)
                .ok_or_else(|| self.at(ErrorKind::MissingState(top)))?;
            if jump == err {
                let nonterminal = tables.nonterm_id(lhs_idx)?;
                return Err(self.at(ErrorKind::InvalidGoto {
                    state: top,
                    nonterminal,
                }));
            }
            self.states.push(jump as usize);
        }
    }
}
