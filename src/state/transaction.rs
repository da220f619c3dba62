use super::{EditorState, Selection, SelectionError};
use crate::model::{Mark, MarkSet, MarkType, Node, ResolveErr, Schema};
use crate::transform::{AddMarkStep, RemoveMarkStep, Span, Step, StepError, Steps};
use derivative::Derivative;
use displaydoc::Display;
use std::borrow::Cow;
use thiserror::Error;

/// Errors while building a transaction
#[derive(Debug, Copy, Clone, PartialEq, Eq, Display, Error)]
pub enum TransactionError {
    /// Failed to apply step: {0}
    Step(#[from] StepError),
    /// Invalid selection: {0}
    Selection(#[from] SelectionError),
    /// Invalid position: {0}
    Resolve(#[from] ResolveErr),
}

/// An editor state transaction, which can be applied to a state to create an updated state.
///
/// Steps are applied as soon as they are added, so an invalid step is rejected before it
/// becomes part of the transaction. Use [`EditorState::tr`] to create an instance.
#[derive(Derivative)]
#[derivative(Debug(bound = ""), Clone(bound = ""))]
pub struct Transaction<S: Schema> {
    pub(super) before: S::Node,
    pub(super) doc: S::Node,
    pub(super) steps: Steps<S>,
    pub(super) selection: Selection,
    pub(super) stored_marks: Option<MarkSet<S>>,
    stored_marks_set: bool,
}

impl<S: Schema> Transaction<S> {
    pub(crate) fn new(state: &EditorState<S>) -> Self {
        Self {
            before: state.doc().clone(),
            doc: state.doc().clone(),
            steps: Vec::new(),
            selection: state.selection().clone(),
            stored_marks: state.stored_marks().cloned(),
            stored_marks_set: false,
        }
    }

    /// The document this transaction was started from.
    pub fn before(&self) -> &S::Node {
        &self.before
    }

    /// The current document, with all steps applied.
    pub fn doc(&self) -> &S::Node {
        &self.doc
    }

    /// The steps in this transaction.
    pub fn steps(&self) -> &[Step<S>] {
        &self.steps
    }

    /// True when the document has been changed (when there are any steps).
    pub fn doc_changed(&self) -> bool {
        !self.steps.is_empty()
    }

    /// The transaction's current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The stored marks set by this transaction, if any.
    pub fn stored_marks(&self) -> Option<&MarkSet<S>> {
        self.stored_marks.as_ref()
    }

    /// Whether the stored marks were explicitly set for this transaction.
    pub fn stored_marks_set(&self) -> bool {
        self.stored_marks_set
    }

    /// The marks that text typed at the selection would get: the stored marks when
    /// present, otherwise the marks at the start of the selection.
    pub fn current_marks(&self) -> Result<Cow<MarkSet<S>>, ResolveErr> {
        match &self.stored_marks {
            Some(marks) => Ok(Cow::Borrowed(marks)),
            None => Ok(Cow::Owned(
                self.doc.resolve(self.selection.from())?.marks().into_owned(),
            )),
        }
    }

    /// Apply a new step in this transaction. A document change clears the stored marks.
    pub fn step(&mut self, step: Step<S>) -> Result<&mut Self, TransactionError> {
        self.doc = step.apply(&self.doc)?;
        self.steps.push(step);
        self.stored_marks = None;
        Ok(self)
    }

    /// Add the given mark to the inline content between `from` and `to`.
    pub fn add_mark(
        &mut self,
        from: usize,
        to: usize,
        mark: S::Mark,
    ) -> Result<&mut Self, TransactionError> {
        self.step(Step::AddMark(AddMarkStep::new(Span::new(from, to), mark)))
    }

    /// Remove marks of the given type from inline nodes between `from` and `to`.
    pub fn remove_mark(
        &mut self,
        from: usize,
        to: usize,
        mark_type: S::MarkType,
    ) -> Result<&mut Self, TransactionError> {
        self.step(Step::RemoveMark(RemoveMarkStep::new(
            Span::new(from, to),
            mark_type,
        )))
    }

    /// Update the transaction's current selection. This clears the stored marks.
    pub fn set_selection(&mut self, selection: Selection) -> Result<&mut Self, TransactionError> {
        self.selection = selection.validate::<S>(&self.doc)?;
        self.stored_marks = None;
        Ok(self)
    }

    /// Set the current stored marks.
    pub fn set_stored_marks(&mut self, marks: Option<MarkSet<S>>) -> &mut Self {
        self.stored_marks = marks;
        self.stored_marks_set = true;
        self
    }

    /// Add a mark to the set of stored marks.
    pub fn add_stored_mark(&mut self, mark: S::Mark) -> Result<&mut Self, TransactionError> {
        let marks = mark.add_to_set(self.current_marks()?).into_owned();
        Ok(self.set_stored_marks(Some(marks)))
    }

    /// Remove marks of the given type from the set of stored marks.
    pub fn remove_stored_mark(
        &mut self,
        mark_type: S::MarkType,
    ) -> Result<&mut Self, TransactionError> {
        let marks = mark_type.remove_from_set(self.current_marks()?).into_owned();
        Ok(self.set_stored_marks(Some(marks)))
    }
}
