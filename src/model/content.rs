use super::{util, Fragment, Node, Schema};
use displaydoc::Display;
use std::ops::RangeBounds;
use thiserror::Error;

/// A document that does not conform to its schema
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum SchemaError {
    /// Invalid content for node {node_type}
    InvalidContent {
        /// The name of the node type
        node_type: &'static str,
    },
    /// More than one mark of type {mark_type} on a node
    DuplicateMark {
        /// The name of the mark type
        mark_type: &'static str,
    },
}

/// Instances of this class represent a match state of a node type's content expression, and can be
/// used to find out whether further content matches here, and whether a given position is a valid end of the node.
pub trait ContentMatch<S: Schema>: Copy {
    /// Match a node type, returning a match after that node if successful.
    fn match_type(self, r#type: S::NodeType) -> Option<Self>;

    /// True when this match state represents a valid end of the node.
    fn valid_end(self) -> bool;

    /// True when the expression admits inline nodes (and thus no block nodes).
    fn inline_content(self) -> bool;

    /// Try to match a fragment. Returns the resulting match when successful.
    fn match_fragment(self, fragment: &Fragment<S>) -> Option<Self> {
        self.match_fragment_range(fragment, ..)
    }

    /// Try to match a part of a fragment. Returns the resulting match when successful.
    fn match_fragment_range<R: RangeBounds<usize>>(
        self,
        fragment: &Fragment<S>,
        range: R,
    ) -> Option<Self> {
        let start = util::from(&range);
        let end = util::to(&range, fragment.child_count());

        fragment.children()[start..end]
            .iter()
            .try_fold(self, |test, child| test.match_type(child.r#type()))
    }
}
