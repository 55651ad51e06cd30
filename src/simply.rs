//! Simple, fluent builder helpers for constructing `Pattern`s.
//!
//! This module provides a tiny set of convenience functions over the AST
//! constructors. They make writing tests and examples much more concise by
//! producing `Pattern` instances without spelling out the payload structs
//! (lit, digits, one_of, chain, maybe, wildcard).

use crate::core::pattern::{Bound, ClassKind, Pattern};

/// A literal string.
pub fn lit(s: &str) -> Pattern {
    Pattern::literal(s)
}

/// A digit run of exactly `count` characters.
pub fn digits(count: u32) -> Pattern {
    Pattern::class(ClassKind::Digit, count, Bound::Finite(count))
}

/// An uppercase run of exactly `count` characters.
pub fn uppers(count: u32) -> Pattern {
    Pattern::class(ClassKind::Upper, count, Bound::Finite(count))
}

/// A lowercase run of exactly `count` characters.
pub fn lowers(count: u32) -> Pattern {
    Pattern::class(ClassKind::Lower, count, Bound::Finite(count))
}

/// A letter run of `min` to `max` characters.
pub fn alphas(min: u32, max: Bound) -> Pattern {
    Pattern::class(ClassKind::Alpha, min, max)
}

/// An enumeration of the given alternatives (canonicalized).
pub fn one_of(values: &[&str]) -> Pattern {
    Pattern::enumeration(values.iter().map(|v| v.to_string()).collect())
}

/// A sequence of parts (a single part is returned unwrapped).
pub fn chain(parts: Vec<Pattern>) -> Pattern {
    Pattern::sequence(parts)
}

/// Zero-or-one occurrence of a pattern.
pub fn maybe(pattern: Pattern) -> Pattern {
    Pattern::optional(pattern)
}

/// A wildcard run of `min` to `max` characters.
pub fn wildcard(min: u32, max: Bound) -> Pattern {
    Pattern::any(min, max)
}

// ---------------------------------------------------------------------------
// Unit tests for the simple API — keep tests local to the module.
// ---------------------------------------------------------------------------
