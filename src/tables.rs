use prettytable::Table as PtTable;
use serde::Deserialize;

use crate::{
    error::ErrorKind,
    symbol::{NonTermId, SemanticId, TermId},
    RascentError, RascentResult,
};

/// A dense 2-D action table; cells equal to [`Consts::err`] mean "no action".
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DenseTable {
    pub elems: Vec<Vec<i64>>,
}

impl DenseTable {
    pub fn get(&self, row: usize, col: usize) -> Option<i64> {
        self.elems.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn num_rows(&self) -> usize {
        self.elems.len()
    }

    /// Check a row for at least one non-error cell.
    pub fn row_has_entry(&self, row: usize, err: i64) -> bool {
        self.elems
            .get(row)
            .is_some_and(|r| r.iter().any(|&cell| cell != err))
    }
}

/// Index entry for a terminal: external ID, dense column index, display name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TermEntry(pub TermId, pub usize, pub String);

/// Index entry for a nonterminal or semantic rule.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SymEntry(pub i64, pub usize, pub String);

/// Sentinel values used by the tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Consts {
    pub acc: i64,
    pub err: i64,
    pub end: i64,
    pub start: usize,
}

/// A precomputed LALR(1) parsing-table artifact.
///
/// Tables are produced by an external generation tool and are authoritative:
/// the runtime maps between external symbol identifiers and dense table
/// indices through the embedded index lists and never falls back on a
/// best-effort mapping. Instances are immutable and may be shared across
/// concurrent parses.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParseTables {
    pub shift: DenseTable,
    pub reduce: DenseTable,
    pub jump: DenseTable,

    pub term_idx: Vec<TermEntry>,
    pub nonterm_idx: Vec<SymEntry>,
    pub semantic_idx: Vec<SymEntry>,

    pub num_rhs_syms: Vec<usize>,
    pub lhs_idx: Vec<usize>,

    #[serde(default)]
    pub partials_rule_term: Option<DenseTable>,
    #[serde(default)]
    pub partials_matchlen_term: Option<DenseTable>,
    #[serde(default)]
    pub partials_rule_nonterm: Option<DenseTable>,
    #[serde(default)]
    pub partials_matchlen_nonterm: Option<DenseTable>,
    #[serde(default)]
    pub partials_lhs_nonterm: Option<DenseTable>,

    pub consts: Consts,

    #[serde(default)]
    pub infos: String,
}

impl ParseTables {
    /// Decode a table artifact from its JSON serialization.
    pub fn from_json<C>(source: &str) -> RascentResult<Self, C> {
        let tables: Self = serde_json::from_str(source)
            .map_err(|err| ErrorKind::InvalidTables(err.to_string()))?;
        tables.validate()?;
        Ok(tables)
    }

    pub fn from_reader<C, R: std::io::Read>(reader: R) -> RascentResult<Self, C> {
        let tables: Self = serde_json::from_reader(reader)
            .map_err(|err| ErrorKind::InvalidTables(err.to_string()))?;
        tables.validate()?;
        Ok(tables)
    }

    /// Shape checks so the driver can index without further bounds concern.
    fn validate<C>(&self) -> RascentResult<(), C> {
        let bad = |msg: String| RascentError::from(ErrorKind::InvalidTables(msg));

        let num_states = self.shift.num_rows();
        if num_states == 0 {
            return Err(bad("no states defined".into()));
        }
        if self.reduce.num_rows() != num_states || self.jump.num_rows() != num_states {
            return Err(bad("shift, reduce and jump row counts differ".into()));
        }

        let num_terms = self.term_idx.len();
        let num_nonterms = self.nonterm_idx.len();
        for row in self.shift.elems.iter().chain(self.reduce.elems.iter()) {
            if row.len() != num_terms {
                return Err(bad("terminal row width does not match the index".into()));
            }
        }
        for row in self.jump.elems.iter() {
            if row.len() != num_nonterms {
                return Err(bad("jump row width does not match the index".into()));
            }
        }

        let num_rules = self.semantic_idx.len();
        if self.num_rhs_syms.len() != num_rules || self.lhs_idx.len() != num_rules {
            return Err(bad("per-rule tables do not match the semantic index".into()));
        }

        for &cell in self.shift.elems.iter().flatten() {
            if cell != self.consts.err && !(0..num_states as i64).contains(&cell) {
                return Err(bad(format!("shift target {} out of range", cell)));
            }
        }
        for &cell in self.jump.elems.iter().flatten() {
            if cell != self.consts.err && !(0..num_states as i64).contains(&cell) {
                return Err(bad(format!("jump target {} out of range", cell)));
            }
        }
        for &cell in self.reduce.elems.iter().flatten() {
            if cell != self.consts.err
                && cell != self.consts.acc
                && !(0..num_rules as i64).contains(&cell)
            {
                return Err(bad(format!("reduce rule index {} out of range", cell)));
            }
        }

        if self.consts.start >= num_states {
            return Err(bad(format!("start state {} out of range", self.consts.start)));
        }
        Ok(())
    }

    pub fn num_states(&self) -> usize {
        self.shift.num_rows()
    }

    /// The end-of-input terminal.
    pub fn end_id(&self) -> TermId {
        TermId::Num(self.consts.end)
    }

    pub fn term_index<C>(&self, id: TermId) -> RascentResult<usize, C> {
        self.term_idx
            .iter()
            .find(|entry| entry.0 == id)
            .map(|entry| entry.1)
            .ok_or_else(|| ErrorKind::MissingSymbol(id.to_string()).into())
    }

    pub fn term_id<C>(&self, index: usize) -> RascentResult<TermId, C> {
        self.term_idx
            .iter()
            .find(|entry| entry.1 == index)
            .map(|entry| entry.0)
            .ok_or_else(|| ErrorKind::MissingSymbol(format!("terminal #{}", index)).into())
    }

    pub fn term_name(&self, index: usize) -> Option<&str> {
        self.term_idx
            .iter()
            .find(|entry| entry.1 == index)
            .map(|entry| entry.2.as_str())
    }

    pub fn nonterm_index<C>(&self, id: NonTermId) -> RascentResult<usize, C> {
        self.nonterm_idx
            .iter()
            .find(|entry| entry.0 == id)
            .map(|entry| entry.1)
            .ok_or_else(|| ErrorKind::MissingSymbol(format!("<{}>", id)).into())
    }

    pub fn nonterm_id<C>(&self, index: usize) -> RascentResult<NonTermId, C> {
        self.nonterm_idx
            .iter()
            .find(|entry| entry.1 == index)
            .map(|entry| entry.0)
            .ok_or_else(|| ErrorKind::MissingSymbol(format!("nonterminal #{}", index)).into())
    }

    pub fn nonterm_name(&self, index: usize) -> Option<&str> {
        self.nonterm_idx
            .iter()
            .find(|entry| entry.1 == index)
            .map(|entry| entry.2.as_str())
    }

    pub fn semantic_id<C>(&self, index: usize) -> RascentResult<SemanticId, C> {
        self.semantic_idx
            .iter()
            .find(|entry| entry.1 == index)
            .map(|entry| entry.0)
            .ok_or_else(|| ErrorKind::MissingSymbol(format!("semantic rule #{}", index)).into())
    }

    pub fn semantic_index<C>(&self, id: SemanticId) -> RascentResult<usize, C> {
        self.semantic_idx
            .iter()
            .find(|entry| entry.0 == id)
            .map(|entry| entry.1)
            .ok_or_else(|| ErrorKind::MissingSymbol(format!("semantic rule {}", id)).into())
    }

    /// Partial-rule entry for a shift site, as (rule index, match length).
    pub fn partial_term(&self, state: usize, col: usize) -> Option<(usize, usize)> {
        let rule = self.partials_rule_term.as_ref()?.get(state, col)?;
        let len = self.partials_matchlen_term.as_ref()?.get(state, col)?;
        (rule != self.consts.err).then_some((rule as usize, len as usize))
    }

    /// Partial-rule entry for a jump site, as (rule index, match length).
    pub fn partial_nonterm(&self, state: usize, col: usize) -> Option<(usize, usize)> {
        let rule = self.partials_rule_nonterm.as_ref()?.get(state, col)?;
        let len = self.partials_matchlen_nonterm.as_ref()?.get(state, col)?;
        (rule != self.consts.err).then_some((rule as usize, len as usize))
    }

    /// Nonterminal recorded at a jump site with a partial-rule entry.
    pub fn partial_lhs(&self, state: usize, col: usize) -> Option<NonTermId> {
        let lhs = self.partials_lhs_nonterm.as_ref()?.get(state, col)?;
        (lhs != self.consts.err).then_some(lhs)
    }
}

impl std::fmt::Display for ParseTables {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut table = PtTable::new();

        table.add_row(
            ["#"]
                .into_iter()
                .map(str::to_string)
                .chain(self.term_idx.iter().map(|entry| entry.2.clone()))
                .chain(self.nonterm_idx.iter().map(|entry| entry.2.clone()))
                .collect(),
        );

        for state in 0..self.num_states() {
            table.add_row(
                [state.to_string()]
                    .into_iter()
                    .chain((0..self.term_idx.len()).map(|col| {
                        let shift = self.shift.get(state, col).unwrap_or(self.consts.err);
                        let reduce = self.reduce.get(state, col).unwrap_or(self.consts.err);
                        if shift != self.consts.err {
                            format!("s{}", shift)
                        } else if reduce == self.consts.acc {
                            "acc".to_string()
                        } else if reduce != self.consts.err {
                            format!("r{}", reduce)
                        } else {
                            String::default()
                        }
                    }))
                    .chain((0..self.nonterm_idx.len()).map(|col| {
                        let jump = self.jump.get(state, col).unwrap_or(self.consts.err);
                        if jump != self.consts.err {
                            jump.to_string()
                        } else {
                            String::default()
                        }
                    }))
                    .collect(),
            );
        }

        write!(f, "{}", table)
    }
}
