//! Recursive-ascent parser generator.
//!
//! Translates an LALR(1) parsing-table artifact into Rust source for a
//! state-machine parser: one routine per LR state, shift and reduce decisions
//! compiled into `match` dispatch, and reductions climbing back up the call
//! chain through the runtime's jump counter. The emitted parser drives
//! [`rascent::Machine`] and is behaviorally equivalent to the table-driven
//! interpreter over the same tables.

use itertools::Itertools;
use rascent::{NoCustomError, ParseTables, RascentResult, TermId};

mod writer;

use writer::{rust, RustWrite};

type GenResult<T> = RascentResult<T, NoCustomError>;

pub struct AscentGen<'t> {
    tables: &'t ParseTables,
}

impl<'t> AscentGen<'t> {
    pub fn new(tables: &'t ParseTables) -> Self {
        Self { tables }
    }

    /// Emit the parser module source.
    pub fn generate(&self) -> GenResult<String> {
        let mut out = RustWrite::new();

        self.write_header(&mut out);
        for state in 0..self.tables.num_states() {
            out.blank();
            self.write_state(&mut out, state)?;
        }
        rust!(out, "}}");

        Ok(out.into_string())
    }

    fn write_header(&self, out: &mut RustWrite) {
        rust!(out, "//! Recursive-ascent parser generated from LALR(1) parsing tables.");
        if !self.tables.infos.is_empty() {
            rust!(out, "//!");
            rust!(out, "//! infos: {}", self.tables.infos);
        }
        rust!(out, "//!");
        rust!(out, "//! Generated by rascent-gen; do not edit.");
        out.blank();
        rust!(out, "use rascent::{{Machine, RascentResult, Semantics, Symbol, TermId, Token}};");
        out.blank();
        rust!(out, "pub struct Parser<V, C> {{");
        rust!(out, "pub semantics: Semantics<V, C>,");
        rust!(out, "pub use_partials: bool,");
        rust!(out, "pub debug: bool,");
        rust!(out, "}}");
        out.blank();
        rust!(
            out,
            "type StateFn<V, C> = for<'m> fn(&Parser<V, C>, &mut Machine<'m, V, C>) -> RascentResult<(), C>;"
        );
        out.blank();
        rust!(out, "impl<V: Clone + std::fmt::Debug, C> Parser<V, C> {{");
        rust!(out, "pub fn new(semantics: Semantics<V, C>) -> Self {{");
        rust!(out, "Self {{");
        rust!(out, "semantics,");
        rust!(out, "use_partials: true,");
        rust!(out, "debug: false,");
        rust!(out, "}}");
        rust!(out, "}}");
        out.blank();
        rust!(
            out,
            "pub fn parse(&self, tokens: Vec<Token<V>>) -> RascentResult<Option<Symbol<V>>, C> {{"
        );
        rust!(
            out,
            "let mut m = Machine::new(tokens, &self.semantics, self.use_partials, self.debug)?;"
        );
        rust!(out, "self.state_{}(&mut m)?;", self.tables.consts.start);
        rust!(out, "if !m.accepted {{");
        rust!(out, "return Ok(None);");
        rust!(out, "}}");
        rust!(out, "Ok(m.symbols.pop())");
        rust!(out, "}}");
    }

    /// Emit the routine for one LR state: terminal dispatch, the deferred
    /// shift, and the jump dispatch over reduced nonterminals.
    fn write_state(&self, out: &mut RustWrite, state: usize) -> GenResult<()> {
        let tables = self.tables;
        let err = tables.consts.err;
        let has_shift = tables.shift.row_has_entry(state, err);
        let has_jump = tables.jump.row_has_entry(state, err);

        rust!(
            out,
            "fn state_{}(&self, m: &mut Machine<'_, V, C>) -> RascentResult<(), C> {{",
            state
        );
        if has_shift {
            rust!(out, "let mut next_state: Option<StateFn<V, C>> = None;");
        }
        rust!(out, "match m.lookahead_id() {{");

        // reduce arms are grouped by rule so lookaheads sharing a rule share
        // a case; accept arms are grouped likewise
        let mut reduce_groups: Vec<(usize, Vec<usize>)> = Vec::default();
        let mut accept_cols: Vec<usize> = Vec::default();

        for col in 0..tables.term_idx.len() {
            let shift_to = tables.shift.get(state, col).unwrap_or(err);
            let rule = tables.reduce.get(state, col).unwrap_or(err);

            if shift_to != err {
                let pattern = self.term_pattern(tables.term_id(col)?);
                rust!(
                    out,
                    "// id: {}, index: {}",
                    tables.term_name(col).unwrap_or_default(),
                    col
                );
                match tables.partial_term(state, col) {
                    Some((rule_idx, len)) => {
                        rust!(out, "{} => {{", pattern);
                        rust!(out, "next_state = Some(Self::state_{});", shift_to);
                        rust!(out, "if m.use_partials {{");
                        rust!(
                            out,
                            "m.apply_partial({}, {}, true)?;",
                            tables.semantic_id(rule_idx)?,
                            len
                        );
                        rust!(out, "}}");
                        rust!(out, "}}");
                    }
                    None => {
                        rust!(out, "{} => next_state = Some(Self::state_{}),", pattern, shift_to);
                    }
                }
            } else if rule != err {
                if rule == tables.consts.acc {
                    accept_cols.push(col);
                } else {
                    match reduce_groups.iter_mut().find(|(r, _)| *r == rule as usize) {
                        Some((_, cols)) => cols.push(col),
                        None => reduce_groups.push((rule as usize, vec![col])),
                    }
                }
            }
        }

        for (rule_idx, cols) in &reduce_groups {
            rust!(out, "// indices: {}", cols.iter().join(" "));
            rust!(
                out,
                "{} => m.apply_rule({}, {}, {})?,",
                self.col_patterns(cols)?,
                tables.semantic_id(*rule_idx)?,
                tables.num_rhs_syms[*rule_idx],
                tables.nonterm_id(tables.lhs_idx[*rule_idx])?
            );
        }

        if !accept_cols.is_empty() {
            rust!(out, "// indices: {}", accept_cols.iter().join(" "));
            rust!(out, "{} => m.accepted = true,", self.col_patterns(&accept_cols)?);
        }

        rust!(out, "_ => return Err(m.invalid_transition({})),", state);
        rust!(out, "}}");

        if has_shift {
            rust!(out, "if let Some(next) = next_state {{");
            rust!(out, "m.push_lookahead()?;");
            rust!(out, "next(self, m)?;");
            rust!(out, "}}");
        }

        if has_jump {
            rust!(
                out,
                "while m.dist_to_jump == 0 && !m.accepted && !m.symbols.is_empty() {{"
            );
            rust!(out, "let top = match m.top_nonterminal() {{");
            rust!(out, "Some(id) => id,");
            rust!(out, "None => break,");
            rust!(out, "}};");
            rust!(out, "match top {{");

            for col in 0..tables.nonterm_idx.len() {
                let target = tables.jump.get(state, col).unwrap_or(err);
                if target == err {
                    continue;
                }
                let id = tables.nonterm_id(col)?;
                rust!(
                    out,
                    "// id: {}, index: {}",
                    tables.nonterm_name(col).unwrap_or_default(),
                    col
                );

                let partial = tables
                    .partial_lhs(state, col)
                    .and_then(|lhs_id| tables.nonterm_index::<NoCustomError>(lhs_id).ok())
                    .and_then(|lhs_col| tables.partial_nonterm(state, lhs_col));
                match partial {
                    Some((rule_idx, len)) => {
                        rust!(out, "{} => {{", id);
                        rust!(out, "if m.use_partials {{");
                        rust!(
                            out,
                            "m.apply_partial({}, {}, false)?;",
                            tables.semantic_id(rule_idx)?,
                            len
                        );
                        rust!(out, "}}");
                        rust!(out, "self.state_{}(m)?;", target);
                        rust!(out, "}}");
                    }
                    None => {
                        rust!(out, "{} => self.state_{}(m)?,", id, target);
                    }
                }
            }

            rust!(out, "_ => return Err(m.invalid_transition({})),", state);
            rust!(out, "}}");
            rust!(out, "}}");
        }

        rust!(out, "m.dist_to_jump -= 1;");
        rust!(out, "Ok(())");
        rust!(out, "}}");
        Ok(())
    }

    fn term_pattern(&self, id: TermId) -> String {
        match id {
            TermId::Chr(c) => format!("TermId::Chr('{}')", c.escape_default()),
            TermId::Num(n) if n == self.tables.consts.end => {
                format!("TermId::Num(0x{:x})", n)
            }
            TermId::Num(n) => format!("TermId::Num({})", n),
        }
    }

    fn col_patterns(&self, cols: &[usize]) -> GenResult<String> {
        let mut patterns = Vec::default();
        for &col in cols {
            patterns.push(self.term_pattern(self.tables.term_id(col)?));
        }
        Ok(patterns.join(" | "))
    }
}
