use crate::model::{Node, ResolveErr, Schema};
use crate::transform::Span;
use displaydoc::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors when creating a selection
#[derive(Debug, Copy, Clone, PartialEq, Eq, Display, Error)]
pub enum SelectionError {
    /// Invalid position
    Resolve(#[from] ResolveErr),
    /// A text selection needs at least one range
    NoRanges,
    /// There is no node to select at {pos}
    NoNode {
        /// The position
        pos: usize,
    },
    /// Node selection {from}..{to} does not cover exactly one node
    InvalidNodeRange {
        /// Start of the selection
        from: usize,
        /// End of the selection
        to: usize,
    },
}

/// A selection in a document.
///
/// `Cursor` and `Text` are text selections, which is what mark commands operate on.
/// A `Node` selection covers a single non-text node.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Selection {
    /// An empty text selection
    Cursor {
        /// The position of the cursor
        pos: usize,
    },
    /// One or more non-empty ranges, sorted and not overlapping
    Text {
        /// The selected ranges
        ranges: Vec<Span>,
    },
    /// A selected node
    Node {
        /// The position before the node
        from: usize,
        /// The position after the node
        to: usize,
    },
}

impl Selection {
    /// Create a cursor at `pos`.
    pub fn cursor<S: Schema>(doc: &S::Node, pos: usize) -> Result<Self, SelectionError> {
        doc.resolve(pos)?;
        Ok(Self::Cursor { pos })
    }

    /// Create a text selection from any number of ranges.
    ///
    /// Ranges may be given in either direction. They are sorted, overlapping ranges are
    /// merged and empty ranges are dropped; when nothing is left, the result is a cursor at
    /// the first given position.
    pub fn text<S: Schema, I>(doc: &S::Node, ranges: I) -> Result<Self, SelectionError>
    where
        I: IntoIterator<Item = Span>,
    {
        let mut spans = Vec::new();
        let mut first = None;
        for range in ranges {
            let span = Span::new(range.from.min(range.to), range.from.max(range.to));
            doc.resolve(span.to)?;
            first.get_or_insert(range.from);
            if !span.is_empty() {
                spans.push(span);
            }
        }
        let first = first.ok_or(SelectionError::NoRanges)?;
        spans.sort_by_key(|span| span.from);

        let mut merged: Vec<Span> = Vec::with_capacity(spans.len());
        for span in spans {
            match merged.last_mut() {
                Some(last) if span.from <= last.to => last.to = last.to.max(span.to),
                _ => merged.push(span),
            }
        }

        if merged.is_empty() {
            Ok(Self::Cursor { pos: first })
        } else {
            Ok(Self::Text { ranges: merged })
        }
    }

    /// Create a text selection between two positions.
    pub fn between<S: Schema>(doc: &S::Node, anchor: usize, head: usize) -> Result<Self, SelectionError> {
        Self::text::<S, _>(doc, Some(Span::new(anchor, head)))
    }

    /// Select the node directly after `pos`.
    pub fn node<S: Schema>(doc: &S::Node, pos: usize) -> Result<Self, SelectionError> {
        let resolved = doc.resolve(pos)?;
        match resolved.node_after() {
            Some(node) if resolved.text_offset() == 0 && !node.is_text() => Ok(Self::Node {
                from: pos,
                to: pos + node.node_size(),
            }),
            _ => Err(SelectionError::NoNode { pos }),
        }
    }

    /// The default selection of a document: a cursor at the start of the first textblock,
    /// or at the start of the document if there is none.
    pub fn at_start<S: Schema>(doc: &S::Node) -> Self {
        let pos = doc
            .descendants_between(0, doc.content_size())
            .find(|entry| entry.node.is_textblock())
            .map_or(0, |entry| entry.pos + 1);
        Self::Cursor { pos }
    }

    /// Check this selection against a document, normalizing the ranges of a text
    /// selection.
    pub fn validate<S: Schema>(&self, doc: &S::Node) -> Result<Self, SelectionError> {
        match self {
            Self::Cursor { pos } => Self::cursor::<S>(doc, *pos),
            Self::Text { ranges } => Self::text::<S, _>(doc, ranges.iter().copied()),
            Self::Node { from, to } => match Self::node::<S>(doc, *from)? {
                Self::Node { to: end, .. } if end == *to => Ok(self.clone()),
                _ => Err(SelectionError::InvalidNodeRange {
                    from: *from,
                    to: *to,
                }),
            },
        }
    }

    /// Whether this is a text selection (a cursor or text ranges).
    pub fn is_text(&self) -> bool {
        !matches!(self, Self::Node { .. })
    }

    /// Whether the selection is empty.
    pub fn empty(&self) -> bool {
        matches!(self, Self::Cursor { .. })
    }

    /// The cursor position, if this is a cursor.
    pub fn cursor_pos(&self) -> Option<usize> {
        match self {
            Self::Cursor { pos } => Some(*pos),
            _ => None,
        }
    }

    /// The lower bound of the selection's main range.
    pub fn from(&self) -> usize {
        self.ranges().first().map_or(0, |span| span.from)
    }

    /// The upper bound of the selection's main range.
    pub fn to(&self) -> usize {
        self.ranges().last().map_or(0, |span| span.to)
    }

    /// The ranges covered by the selection.
    pub fn ranges(&self) -> Vec<Span> {
        match self {
            Self::Cursor { pos } => vec![Span::new(*pos, *pos)],
            Self::Text { ranges } => ranges.clone(),
            Self::Node { from, to } => vec![Span::new(*from, *to)],
        }
    }
}
