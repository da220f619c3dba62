//! # Commands
//!
//! A command reads an [`EditorState`] and builds the [`Transaction`] that performs it. The
//! caller dispatches the transaction, see [`crate::view::EditorView::execute`].
mod mark;

pub use mark::{
    can_set_mark, is_mark_active, set_mark, toggle_mark, unset_mark, SetMark, ToggleMark,
    UnsetMark,
};

use crate::model::{ResolveErr, Schema};
use crate::state::{EditorState, Transaction, TransactionError};
use displaydoc::Display;
use thiserror::Error;

/// Errors when running a command
#[derive(Debug, Display, Error)]
pub enum CommandError {
    /// Unknown mark type `{name}`
    UnknownMarkType {
        /// The name that was looked up
        name: String,
    },
    /// Invalid attributes for mark type `{mark_type}`: {source}
    InvalidAttrs {
        /// The name of the mark type
        mark_type: &'static str,
        /// The deserialization error
        source: serde_json::Error,
    },
    /// Invalid position: {0}
    Resolve(#[from] ResolveErr),
    /// Failed to build transaction: {0}
    Transaction(#[from] TransactionError),
}

/// Something that turns a state into a transaction.
pub trait Command<S: Schema> {
    /// Build the transaction for the given state
    fn run(&self, state: &EditorState<S>) -> Result<Transaction<S>, CommandError>;
}

impl<S: Schema, F> Command<S> for F
where
    F: Fn(&EditorState<S>) -> Result<Transaction<S>, CommandError>,
{
    fn run(&self, state: &EditorState<S>) -> Result<Transaction<S>, CommandError> {
        self(state)
    }
}

/// A reference to a mark type, either the mark type itself or its name.
pub trait MarkTypeRef<S: Schema> {
    /// Look up the mark type in the schema
    fn resolve(&self, schema: &S) -> Result<S::MarkType, CommandError>;
}

impl<S: Schema> MarkTypeRef<S> for str {
    fn resolve(&self, schema: &S) -> Result<S::MarkType, CommandError> {
        schema
            .mark_type(self)
            .ok_or_else(|| CommandError::UnknownMarkType {
                name: self.to_owned(),
            })
    }
}

impl<S: Schema> MarkTypeRef<S> for String {
    fn resolve(&self, schema: &S) -> Result<S::MarkType, CommandError> {
        self.as_str().resolve(schema)
    }
}

impl<S: Schema, T: MarkTypeRef<S> + ?Sized> MarkTypeRef<S> for &T {
    fn resolve(&self, schema: &S) -> Result<S::MarkType, CommandError> {
        (**self).resolve(schema)
    }
}
