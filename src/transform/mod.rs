//! # The document transformations
//!
//! Steps are the atomic changes a transaction is made of. Only mark steps are supported,
//! the structure of a document never changes.
mod mark_step;
mod step;
mod util;

pub use mark_step::{AddMarkStep, RemoveMarkStep};
pub use step::{StepError, StepKind, StepResult};
pub use util::Span;

use crate::model::Schema;
use derivative::Derivative;
use serde::{Deserialize, Serialize};

/// A list of steps
#[allow(type_alias_bounds)]
pub type Steps<S: Schema> = Vec<Step<S>>;

/// Steps that can be applied on a document
#[derive(Derivative, Deserialize, Serialize)]
#[derivative(
    Debug(bound = ""),
    Clone(bound = ""),
    PartialEq(bound = ""),
    Eq(bound = "")
)]
#[serde(bound = "", tag = "stepType", rename_all = "camelCase")]
pub enum Step<S: Schema> {
    /// Add a mark to a span
    AddMark(AddMarkStep<S>),
    /// Remove a mark from a span
    RemoveMark(RemoveMarkStep<S>),
}

impl<S: Schema> Step<S> {
    /// Apply the step to the given node
    pub fn apply(&self, doc: &S::Node) -> StepResult<S> {
        match self {
            Self::AddMark(am_step) => am_step.apply(doc),
            Self::RemoveMark(rm_step) => rm_step.apply(doc),
        }
    }

    /// The part of the document this step touches
    pub fn span(&self) -> Span {
        match self {
            Self::AddMark(am_step) => am_step.span,
            Self::RemoveMark(rm_step) => rm_step.span,
        }
    }
}

impl<S: Schema> From<AddMarkStep<S>> for Step<S> {
    fn from(step: AddMarkStep<S>) -> Self {
        Self::AddMark(step)
    }
}

impl<S: Schema> From<RemoveMarkStep<S>> for Step<S> {
    fn from(step: RemoveMarkStep<S>) -> Self {
        Self::RemoveMark(step)
    }
}
