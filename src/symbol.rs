use serde::Deserialize;

/// A nonterminal identifier from the caller's namespace.
pub type NonTermId = i64;

/// A semantic-rule identifier from the caller's namespace.
pub type SemanticId = i64;

/// A terminal identifier from the caller's alphabet.
///
/// Literal operator terminals are single-character identifiers; everything
/// else (named token classes, the end-of-input marker) is an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum TermId {
    Num(i64),
    Chr(char),
}

impl std::fmt::Display for TermId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TermId::Num(id) => write!(f, "{}", id),
            TermId::Chr(id) => write!(f, "'{}'", id),
        }
    }
}

impl From<char> for TermId {
    fn from(value: char) -> Self {
        Self::Chr(value)
    }
}

impl From<i64> for TermId {
    fn from(value: i64) -> Self {
        Self::Num(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolId {
    Term(TermId),
    NonTerm(NonTermId),
}

impl std::fmt::Display for SymbolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SymbolId::Term(id) => id.fmt(f),
            SymbolId::NonTerm(id) => write!(f, "<{}>", id),
        }
    }
}

/// An entry of the symbol stack: a shifted terminal or a reduced
/// nonterminal, together with its semantic value.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol<V> {
    pub id: SymbolId,
    pub value: Option<V>,
}

impl<V> Symbol<V> {
    pub fn terminal(id: TermId, value: Option<V>) -> Self {
        Self {
            id: SymbolId::Term(id),
            value,
        }
    }

    pub fn nonterminal(id: NonTermId, value: Option<V>) -> Self {
        Self {
            id: SymbolId::NonTerm(id),
            value,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.id, SymbolId::Term(_))
    }

    pub fn nonterm_id(&self) -> Option<NonTermId> {
        match self.id {
            SymbolId::NonTerm(id) => Some(id),
            SymbolId::Term(_) => None,
        }
    }

    pub fn into_value(self) -> Option<V> {
        self.value
    }
}
