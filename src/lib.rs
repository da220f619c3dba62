#![warn(missing_docs)]
//! # ProseMirror marks
//!
//! This crate is a re-implementation of the ProseMirror document model together with the
//! state and command layer that is needed to query and toggle marks (inline styles like bold
//! or links) on a selection.
//!
//! A [`state::EditorState`] is an immutable value. Commands read a state and produce a
//! [`state::Transaction`], which is then applied to get the next state. The [`view`] module
//! contains a minimal dispatch loop that owns the current state.

#[macro_use]
extern crate derive_new;

pub(crate) mod de;
pub mod basic;
pub mod commands;
pub mod model;
pub mod state;
pub mod transform;
pub(crate) mod util;
pub mod view;
