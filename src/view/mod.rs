//! # The view
//!
//! A minimal stand-in for `prosemirror-view`: an [`EditorView`] owns the current state,
//! dispatches transactions and notifies listeners, so that a toolbar (see [`MenuBar`]) can
//! re-query its status after every update. Rendering is left to the listeners.
mod menu;

pub use menu::{MenuBar, MenuItem};

use crate::commands::{self, Command, CommandError};
use crate::model::Schema;
use crate::state::{ApplyError, EditorState, Transaction};
use displaydoc::Display;
use log::debug;
use std::fmt;
use thiserror::Error;

/// Errors when running a command in a view
#[derive(Debug, Display, Error)]
pub enum ViewError {
    /// Command failed: {0}
    Command(#[from] CommandError),
    /// Failed to apply transaction: {0}
    Apply(#[from] ApplyError),
}

/// A listener that is called with the new state after every dispatch
pub type Listener<S> = Box<dyn FnMut(&EditorState<S>)>;

/// Owns the current editor state.
pub struct EditorView<S: Schema> {
    state: EditorState<S>,
    listeners: Vec<Listener<S>>,
}

impl<S: Schema> fmt::Debug for EditorView<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorView")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<S: Schema> EditorView<S> {
    /// Create a view for the given state
    pub fn new(state: EditorState<S>) -> Self {
        Self {
            state,
            listeners: Vec::new(),
        }
    }

    /// The current state
    pub fn state(&self) -> &EditorState<S> {
        &self.state
    }

    /// Register a listener for state updates
    pub fn on_update<F>(&mut self, listener: F)
    where
        F: FnMut(&EditorState<S>) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Apply a transaction and notify the listeners. If the transaction can not be
    /// applied, the state stays the same and no listener is called.
    pub fn dispatch(&mut self, tr: Transaction<S>) -> Result<&EditorState<S>, ApplyError> {
        let doc_changed = tr.doc_changed();
        self.state = self.state.apply(tr)?;
        debug!(
            "dispatched transaction (doc changed: {}), notifying {} listeners",
            doc_changed,
            self.listeners.len()
        );
        for listener in &mut self.listeners {
            listener(&self.state);
        }
        Ok(&self.state)
    }

    /// Run a command against the current state and dispatch its transaction.
    pub fn execute<C>(&mut self, command: &C) -> Result<&EditorState<S>, ViewError>
    where
        C: Command<S> + ?Sized,
    {
        let tr = command.run(&self.state)?;
        Ok(self.dispatch(tr)?)
    }
}

/// Make the selection bold.
pub fn set_bold<S: Schema>(view: &mut EditorView<S>) -> Result<&EditorState<S>, ViewError> {
    let tr = commands::set_mark(view.state(), "bold", None)?;
    Ok(view.dispatch(tr)?)
}

/// Remove bold from the selection.
pub fn unset_bold<S: Schema>(view: &mut EditorView<S>) -> Result<&EditorState<S>, ViewError> {
    let tr = commands::unset_mark(view.state(), "bold")?;
    Ok(view.dispatch(tr)?)
}

/// Toggle bold on the selection.
pub fn toggle_bold<S: Schema>(view: &mut EditorView<S>) -> Result<&EditorState<S>, ViewError> {
    let tr = commands::toggle_mark(view.state(), "bold")?;
    Ok(view.dispatch(tr)?)
}

/// Whether the selection is bold.
pub fn is_bold<S: Schema>(view: &EditorView<S>) -> Result<bool, CommandError> {
    commands::is_mark_active(view.state(), "bold")
}

/// Whether the mark can be applied to the current selection.
pub fn can_set_mark<S: Schema, M: commands::MarkTypeRef<S>>(
    view: &EditorView<S>,
    mark_type: M,
) -> Result<bool, CommandError> {
    commands::can_set_mark(view.state(), mark_type)
}
