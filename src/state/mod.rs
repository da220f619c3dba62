//! # The editor state
//!
//! This module is derived from the `prosemirror-state` package. An [`EditorState`] is an
//! immutable value; the only way to get a new state is to [apply](EditorState::apply) a
//! [`Transaction`].
mod config;
mod selection;
mod transaction;

pub use config::{ConfigError, StateConfig};
pub use selection::{Selection, SelectionError};
pub use transaction::{Transaction, TransactionError};

use crate::model::{MarkSet, Node, Schema};
use derivative::Derivative;
use displaydoc::Display;
use log::debug;
use std::sync::Arc;
use thiserror::Error;

/// Errors when applying a transaction
#[derive(Debug, Copy, Clone, PartialEq, Eq, Display, Error)]
pub enum ApplyError {
    /// Transaction was created for a different document
    Mismatch,
}

/// The state of a ProseMirror editor.
#[derive(Derivative)]
#[derivative(Debug(bound = ""), Clone(bound = ""), PartialEq(bound = ""))]
pub struct EditorState<S: Schema> {
    #[derivative(PartialEq = "ignore")]
    schema: Arc<S>,
    doc: S::Node,
    selection: Selection,
    stored_marks: Option<MarkSet<S>>,
}

impl<S: Schema> EditorState<S> {
    /// Create a new state.
    pub fn create(schema: Arc<S>, config: StateConfig<S>) -> Result<Self, ConfigError> {
        let doc = config.doc.unwrap_or_else(|| schema.empty_doc());
        doc.check()?;
        let selection = match config.selection {
            Some(selection) => selection.validate::<S>(&doc)?,
            None => Selection::at_start::<S>(&doc),
        };
        let stored_marks = config.stored_marks.filter(|_| selection.empty());
        Ok(Self {
            schema,
            doc,
            selection,
            stored_marks,
        })
    }

    /// The schema of the state's document.
    pub fn schema(&self) -> &S {
        &self.schema
    }

    /// The current document.
    pub fn doc(&self) -> &S::Node {
        &self.doc
    }

    /// The selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// A set of marks to apply to the next input. Will be `None` when no explicit marks
    /// have been set.
    pub fn stored_marks(&self) -> Option<&MarkSet<S>> {
        self.stored_marks.as_ref()
    }

    /// Start a transaction from this state.
    pub fn tr(&self) -> Transaction<S> {
        Transaction::new(self)
    }

    /// Apply the given transaction to produce a new state.
    ///
    /// Stored marks survive only if the new selection is a cursor.
    pub fn apply(&self, tr: Transaction<S>) -> Result<Self, ApplyError> {
        if tr.before != self.doc {
            return Err(ApplyError::Mismatch);
        }
        debug!(
            "applying transaction: {} steps, selection {:?}",
            tr.steps.len(),
            tr.selection
        );
        let cursor = tr.selection.empty();
        let stored_marks = tr.stored_marks.filter(|_| cursor);
        Ok(Self {
            schema: Arc::clone(&self.schema),
            doc: tr.doc,
            selection: tr.selection,
            stored_marks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ApplyError, ConfigError, EditorState, Selection, StateConfig};
    use crate::basic::helper::{blockquote, doc, h1, p};
    use crate::basic::{Basic, BasicMark};
    use crate::model::{Mark, Node, SchemaError};
    use std::sync::Arc;

    #[test]
    fn test_default_state() {
        let state = EditorState::create(Arc::new(Basic), StateConfig::default()).unwrap();
        assert_eq!(state.doc(), &doc(p(())));
        assert_eq!(state.selection(), &Selection::Cursor { pos: 1 });
        assert_eq!(state.stored_marks(), None);
    }

    #[test]
    fn test_create_checks_doc() {
        let config = StateConfig::<Basic>::default().with_doc(doc(blockquote(h1("x"))));
        assert!(matches!(
            EditorState::create(Arc::new(Basic), config),
            Err(ConfigError::Schema(_))
        ));

        let config = StateConfig::<Basic>::default()
            .with_doc(doc(p("x")))
            .with_selection(Selection::Cursor { pos: 5 });
        assert!(matches!(
            EditorState::create(Arc::new(Basic), config),
            Err(ConfigError::Selection(_))
        ));
    }

    #[test]
    fn test_from_json() {
        let config = StateConfig::<Basic>::from_json(
            r#"{
                "doc": {"type": "doc", "content": [{"type": "paragraph", "content": [{"type": "text", "text": "hi"}]}]},
                "selection": {"type": "text", "ranges": [{"from": 1, "to": 3}]},
                "storedMarks": [{"type": "bold"}]
            }"#,
        )
        .unwrap();
        let state = EditorState::create(Arc::new(Basic), config).unwrap();
        assert_eq!(state.doc().text_content(), "hi");
        assert_eq!(state.selection().from(), 1);
        // stored marks only exist for cursors
        assert_eq!(state.stored_marks(), None);

        assert!(matches!(
            StateConfig::<Basic>::from_json("{\"doc\": 1}"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_create_rejects_duplicate_marks() {
        let config = StateConfig::<Basic>::from_json(
            r#"{
                "doc": {"type": "doc", "content": [{"type": "paragraph", "content": [
                    {"type": "text", "text": "x", "marks": [
                        {"type": "link", "attrs": {"href": "/a"}},
                        {"type": "link", "attrs": {"href": "/b"}}
                    ]}
                ]}]}
            }"#,
        )
        .unwrap();
        assert!(matches!(
            EditorState::create(Arc::new(Basic), config),
            Err(ConfigError::Schema(SchemaError::DuplicateMark { mark_type: "link" }))
        ));
    }

    #[test]
    fn test_apply() {
        let config = StateConfig::<Basic>::default().with_doc(doc(p("ab")));
        let state = EditorState::create(Arc::new(Basic), config).unwrap();
        let mut tr = state.tr();
        tr.set_stored_marks(Some(BasicMark::Bold.into_set()));
        let next = state.apply(tr).unwrap();
        assert_eq!(next.stored_marks(), Some(&BasicMark::Bold.into_set()));
        assert_eq!(next.doc(), state.doc());

        let mut tr = next.tr();
        tr.add_mark(1, 3, BasicMark::Em).unwrap();
        let changed = next.apply(tr.clone()).unwrap();
        assert_eq!(changed.stored_marks(), None);
        assert_eq!(state.apply(tr.clone()).map(|_| ()), Ok(()));
        assert_eq!(changed.apply(tr).map(|_| ()), Err(ApplyError::Mismatch));
    }
}
