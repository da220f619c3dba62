//! # Generic utilities

pub(crate) fn then_some<T>(b: bool, v: T) -> Option<T> {
    if b {
        Some(v)
    } else {
        None
    }
}
