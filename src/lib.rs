//! LALR(1) parsing runtime.
//!
//! The runtime drives a bottom-up shift/reduce parse from a precomputed
//! parsing-table artifact: tables in, tokens in, semantic-action calls out.
//! It never builds tables and never lexes. Semantic actions may additionally
//! run on partially matched rules, which lets side-effecting actions (say,
//! binding a variable) happen before the rest of the right-hand side is
//! parsed.
//!
//! The [`ascent`] module carries the per-parse state machine shared with
//! parsers emitted by the companion recursive-ascent generator; a generated
//! parser and [`Parser`] produce identical semantic-action call sequences
//! from the same tables.

pub mod ascent;
pub mod error;
pub mod parser;
pub mod partial;
pub mod semantics;
pub mod symbol;
pub mod tables;
pub mod token;

pub use ascent::Machine;
pub use error::{ErrorKind, NoCustomError, RascentError};
pub use parser::Parser;
pub use semantics::{SemanticAction, Semantics};
pub use symbol::{NonTermId, SemanticId, Symbol, SymbolId, TermId};
pub use tables::{Consts, DenseTable, ParseTables, SymEntry, TermEntry};
pub use token::{Token, TokenStream};

pub type RascentResult<T, E> = Result<T, RascentError<E>>;
