use thiserror::Error;

use crate::symbol::TermId;

/// Placeholder for parsers whose semantic actions cannot fail.
#[derive(Debug, Clone, Copy)]
pub struct NoCustomError;

impl std::fmt::Display for NoCustomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "no custom error")
    }
}

#[derive(Error, Debug, Clone)]
pub enum ErrorKind<C> {
    /// The lookahead has neither a shift nor a reduce entry: a syntax error.
    #[error("no shift or reduce action from state {state} on {lookahead} (stack depth {depth})")]
    NoAction {
        state: usize,
        lookahead: TermId,
        depth: usize,
    },

    /// Both a shift and a reduce entry are present at runtime, which means
    /// the tables are broken or the grammar is not LALR(1).
    #[error("shift/reduce conflict in state {state} on {lookahead}")]
    ShiftReduceConflict { state: usize, lookahead: TermId },

    #[error("no goto from state {state} for nonterminal {nonterminal}")]
    InvalidGoto { state: usize, nonterminal: i64 },

    #[error("invalid terminal transition from state {0}")]
    InvalidTransition(usize),

    #[error("symbol {0} is not part of the parsing tables")]
    MissingSymbol(String),

    #[error("state {0} is not part of the parsing tables")]
    MissingState(usize),

    #[error("the parsing tables are malformed: {0}")]
    InvalidTables(String),

    #[error("read past the end of the input stream")]
    EndOfInput,

    #[error("{0}")]
    Semantic(C),
}

/// An error raised while loading tables or driving a parse.
///
/// Carries the index of the input token the parser was looking at, when one
/// is known.
#[derive(Debug, Clone)]
pub struct RascentError<C> {
    kind: ErrorKind<C>,
    pub(crate) position: Option<usize>,
}

impl<C: std::fmt::Display> std::fmt::Display for RascentError<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.position {
            Some(position) => write!(f, "{} (at token {})", self.kind, position),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl<C: std::fmt::Debug + std::fmt::Display> std::error::Error for RascentError<C> {}

impl<C> RascentError<C> {
    pub fn new(kind: impl Into<ErrorKind<C>>, position: Option<usize>) -> Self {
        Self {
            kind: kind.into(),
            position,
        }
    }

    pub fn kind(&self) -> &ErrorKind<C> {
        &self.kind
    }

    /// Index of the input token the parser was looking at when it failed.
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn semantic(custom: C) -> Self {
        Self::new(ErrorKind::Semantic(custom), None)
    }
}

impl<C> From<ErrorKind<C>> for RascentError<C> {
    fn from(kind: ErrorKind<C>) -> Self {
        Self {
            kind,
            position: None,
        }
    }
}
