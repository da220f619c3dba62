use super::{Selection, SelectionError};
use crate::model::{MarkSet, Schema, SchemaError};
use derivative::Derivative;
use displaydoc::Display;
use serde::Deserialize;
use thiserror::Error;

/// Errors when creating a state from a configuration
#[derive(Debug, Display, Error)]
pub enum ConfigError {
    /// Invalid JSON: {0}
    Json(#[from] serde_json::Error),
    /// Document does not match the schema: {0}
    Schema(#[from] SchemaError),
    /// Invalid selection: {0}
    Selection(#[from] SelectionError),
}

/// The configuration of a new [`EditorState`](super::EditorState).
///
/// Every field is optional. Without a document, the schema's empty document is used, and
/// without a selection the cursor is placed at the start of the document.
#[derive(Derivative, Deserialize)]
#[derivative(Debug(bound = ""), Clone(bound = ""), Default(bound = ""))]
#[serde(bound = "", rename_all = "camelCase")]
pub struct StateConfig<S: Schema> {
    /// The starting document
    #[serde(default)]
    pub doc: Option<S::Node>,
    /// The starting selection
    #[serde(default)]
    pub selection: Option<Selection>,
    /// The initial set of stored marks
    #[serde(default)]
    pub stored_marks: Option<MarkSet<S>>,
}

impl<S: Schema> StateConfig<S> {
    /// Load a configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Use the given document
    pub fn with_doc(mut self, doc: S::Node) -> Self {
        self.doc = Some(doc);
        self
    }

    /// Use the given selection
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = Some(selection);
        self
    }
}
