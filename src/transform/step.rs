use crate::model::{ResolveErr, Schema};
use displaydoc::Display;
use thiserror::Error;

/// Different ways a step application can fail
#[derive(Debug, Copy, Clone, PartialEq, Eq, Display, Error)]
pub enum StepError {
    /// Span {from}..{to} is reversed
    InvalidSpan {
        /// Start of the span
        from: usize,
        /// End of the span
        to: usize,
    },
    /// Invalid indices
    Resolve(#[from] ResolveErr),
}

/// The result of [applying](StepKind::apply) a step. Contains either a
/// new document or a failure value.
#[allow(type_alias_bounds)]
pub type StepResult<S: Schema> = Result<S::Node, StepError>;

/// A step object represents an atomic change.
///
/// It generally applies only to the document it was created for, since the positions
/// stored in it will only make sense for that document.
pub trait StepKind<S: Schema> {
    /// Applies this step to the given document, returning a result
    /// object that either indicates failure, if the step can not be
    /// applied to this document, or indicates success by containing a
    /// transformed document.
    fn apply(&self, doc: &S::Node) -> StepResult<S>;
}
