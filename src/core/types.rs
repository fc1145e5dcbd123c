/// Caller-assigned, stable identifier for an indexed document.
pub type Id = u32;

/// Non-negative relevance score; always >= 1.0 once written by the indexer.
pub type Score = f32;

/// One (id, text) input to the indexer.
#[derive(Debug, Clone)]
pub struct Pair {
    pub id: Id,
    pub text: String,
}

impl Pair {
    pub fn new(id: Id, text: impl Into<String>) -> Self {
        Pair { id, text: text.into() }
    }
}

/// How a multi-token query combines per-token posting lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOperation {
    /// Collects every id that matches at least one token.
    Union,
    /// Collects only ids that match every token.
    Intersection,
}

impl Default for SetOperation {
    fn default() -> Self {
        SetOperation::Union
    }
}
