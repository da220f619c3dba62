use super::{Command, CommandError, MarkTypeRef};
use crate::model::{Attrs, MarkType, Node, NodeType, Schema};
use crate::state::{EditorState, Selection, Transaction};
use log::trace;
use std::borrow::Cow;

fn mark_active<S: Schema>(
    state: &EditorState<S>,
    mark_type: S::MarkType,
) -> Result<bool, CommandError> {
    match state.selection() {
        Selection::Node { .. } => Ok(false),
        Selection::Cursor { pos } => {
            let marks = match state.stored_marks() {
                Some(marks) => Cow::Borrowed(marks),
                None => state.doc().resolve(*pos)?.marks(),
            };
            Ok(mark_type.is_in_set(&marks).is_some())
        }
        Selection::Text { ranges } => Ok(ranges.iter().all(|range| {
            state
                .doc()
                .descendants_between(range.from, range.to)
                .filter(|entry| entry.node.is_inline() && !entry.node.is_atom())
                .all(|entry| {
                    entry
                        .node
                        .marks()
                        .map_or(false, |marks| mark_type.is_in_set(marks).is_some())
                })
        })),
    }
}

fn mark_applies<S: Schema>(
    state: &EditorState<S>,
    mark_type: S::MarkType,
) -> Result<bool, CommandError> {
    match state.selection() {
        Selection::Node { .. } => Ok(false),
        Selection::Cursor { pos } => {
            let resolved = state.doc().resolve(*pos)?;
            Ok(resolved.parent().r#type().allows_mark_type(mark_type))
        }
        Selection::Text { ranges } => Ok(ranges.iter().any(|range| {
            state
                .doc()
                .descendants_between(range.from, range.to)
                .any(|entry| entry.node.r#type().allows_mark_type(mark_type))
        })),
    }
}

fn add_mark<S: Schema>(
    state: &EditorState<S>,
    mark_type: S::MarkType,
    attrs: Option<&Attrs>,
) -> Result<Transaction<S>, CommandError> {
    let mark = mark_type
        .create(attrs)
        .map_err(|source| CommandError::InvalidAttrs {
            mark_type: mark_type.name(),
            source,
        })?;
    let mut tr = state.tr();
    match state.selection() {
        Selection::Node { .. } => trace!("set_mark({}): node selection", mark_type.name()),
        Selection::Cursor { .. } => {
            let current = tr.current_marks()?;
            let present = mark_type.is_in_set(&current).is_some();
            if !present {
                trace!("set_mark({}): storing mark at cursor", mark_type.name());
                tr.add_stored_mark(mark)?;
            }
        }
        Selection::Text { ranges } => {
            for range in ranges {
                tr.add_mark(range.from, range.to, mark.clone())?;
            }
        }
    }
    Ok(tr)
}

fn remove_mark<S: Schema>(
    state: &EditorState<S>,
    mark_type: S::MarkType,
) -> Result<Transaction<S>, CommandError> {
    let mut tr = state.tr();
    match state.selection() {
        Selection::Node { .. } => trace!("unset_mark({}): node selection", mark_type.name()),
        Selection::Cursor { .. } => {
            let current = tr.current_marks()?;
            let present = mark_type.is_in_set(&current).is_some();
            if present {
                trace!("unset_mark({}): removing stored mark", mark_type.name());
                tr.remove_stored_mark(mark_type)?;
            }
        }
        Selection::Text { ranges } => {
            for range in ranges {
                tr.remove_mark(range.from, range.to, mark_type)?;
            }
        }
    }
    Ok(tr)
}

/// Whether the mark is active on the selection.
///
/// For a cursor, this checks the stored marks or, if there are none, the marks at the
/// cursor position. For text ranges, every text node in the ranges must have a mark of
/// this type, attributes are not compared. Node selections are never marked.
/// Atoms can't carry marks, so they are not counted.
pub fn is_mark_active<S: Schema, M: MarkTypeRef<S>>(
    state: &EditorState<S>,
    mark_type: M,
) -> Result<bool, CommandError> {
    mark_active(state, mark_type.resolve(state.schema())?)
}

/// Whether the mark can be applied to the selection: for a cursor, its parent must allow
/// the mark; for text ranges, at least one node with inline content in them must.
pub fn can_set_mark<S: Schema, M: MarkTypeRef<S>>(
    state: &EditorState<S>,
    mark_type: M,
) -> Result<bool, CommandError> {
    mark_applies(state, mark_type.resolve(state.schema())?)
}

/// Build a transaction that applies the mark to the selection.
///
/// At a cursor, the mark is added to the stored marks unless a mark of that type is already
/// in effect. Every text range gets an add-mark step, which replaces marks of the same type.
pub fn set_mark<S: Schema, M: MarkTypeRef<S>>(
    state: &EditorState<S>,
    mark_type: M,
    attrs: Option<&Attrs>,
) -> Result<Transaction<S>, CommandError> {
    add_mark(state, mark_type.resolve(state.schema())?, attrs)
}

/// Build a transaction that removes marks of this type from the selection.
pub fn unset_mark<S: Schema, M: MarkTypeRef<S>>(
    state: &EditorState<S>,
    mark_type: M,
) -> Result<Transaction<S>, CommandError> {
    remove_mark(state, mark_type.resolve(state.schema())?)
}

/// Remove the mark if it is active on the selection, otherwise set it without attributes.
pub fn toggle_mark<S: Schema, M: MarkTypeRef<S>>(
    state: &EditorState<S>,
    mark_type: M,
) -> Result<Transaction<S>, CommandError> {
    let mark_type = mark_type.resolve(state.schema())?;
    if mark_active(state, mark_type)? {
        remove_mark(state, mark_type)
    } else {
        add_mark(state, mark_type, None)
    }
}

/// The [`set_mark`] command
#[derive(Debug, Clone, new)]
pub struct SetMark<M> {
    mark_type: M,
    attrs: Option<Attrs>,
}

impl<S: Schema, M: MarkTypeRef<S>> Command<S> for SetMark<M> {
    fn run(&self, state: &EditorState<S>) -> Result<Transaction<S>, CommandError> {
        set_mark(state, &self.mark_type, self.attrs.as_ref())
    }
}

/// The [`unset_mark`] command
#[derive(Debug, Clone, new)]
pub struct UnsetMark<M> {
    mark_type: M,
}

impl<S: Schema, M: MarkTypeRef<S>> Command<S> for UnsetMark<M> {
    fn run(&self, state: &EditorState<S>) -> Result<Transaction<S>, CommandError> {
        unset_mark(state, &self.mark_type)
    }
}

/// The [`toggle_mark`] command
#[derive(Debug, Clone, new)]
pub struct ToggleMark<M> {
    mark_type: M,
}

impl<S: Schema, M: MarkTypeRef<S>> Command<S> for ToggleMark<M> {
    fn run(&self, state: &EditorState<S>) -> Result<Transaction<S>, CommandError> {
        toggle_mark(state, &self.mark_type)
    }
}
