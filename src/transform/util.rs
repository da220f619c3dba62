use serde::{Deserialize, Serialize};

/// A span within a document
#[derive(Copy, Clone, Debug, Deserialize, Serialize, PartialEq, Eq, new)]
pub struct Span {
    /// Start of the span
    pub from: usize,
    /// End of the span
    pub to: usize,
}

impl Span {
    /// Whether the span covers no content
    pub fn is_empty(&self) -> bool {
        self.from >= self.to
    }

    /// Whether the two spans share some content
    pub fn overlaps(&self, other: &Span) -> bool {
        self.from < other.to && other.from < self.to
    }
}
