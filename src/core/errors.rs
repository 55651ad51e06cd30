//! Error types for the profiling pipeline.
//!
//! The error surface is deliberately small and flat: input validation
//! failures from `profile`, and the no-match outcome from `validate`.
//! Internal regex compilation failures never reach this enum; they are
//! logged and treated as "does not match" at the call site.

use thiserror::Error;

/// Errors surfaced by the profiling entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProfileError {
    /// `profile` was called with an empty value list.
    #[error("input is empty")]
    EmptyInput,

    /// A JSON input contained elements that are not strings.
    #[error("input contains non-string values")]
    NonStringValues,

    /// A JSON input was not an array.
    #[error("input is not a list")]
    NotAList,

    /// The value matched none of the profile's patterns.
    #[error("value does not match any discovered pattern")]
    NoMatch,
}
