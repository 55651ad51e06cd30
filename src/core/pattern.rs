//! Pattern AST Node Definitions
//!
//! This module defines the algebraic representation of the regex-like
//! patterns the synthesizer produces. The AST is deliberately small: it only
//! contains the shapes the synthesis pipeline can emit, and every node knows
//! its own cost and specificity so the cost model can rank candidates
//! without re-walking raw strings.
//!
//! The AST keeps an explicit canonical form:
//!   - `Enum` values are sorted lexicographically and deduplicated at
//!     construction
//!   - `Seq` only exists at arity >= 2; building a sequence from a single
//!     element yields that element
//!   - Quantifier bounds use `Bound::Inf` as a distinguished sentinel rather
//!     than a magic integer
//!
//! Lowering to regex text lives in `emitters::pcre`; this module exposes
//! thin `to_regex`/`matches` wrappers over it.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Character-class kind for `Pattern::Class`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassKind {
    Digit,
    Upper,
    Lower,
    Alpha,
    Alnum,
    Word,
    Any,
}

/// Upper bound of a repetition: a finite count or unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Finite(u32),
    Inf,
}

impl Bound {
    /// Finite value, if any.
    pub fn finite(&self) -> Option<u32> {
        match self {
            Bound::Finite(n) => Some(*n),
            Bound::Inf => None,
        }
    }
}

// Serialized as a JSON number, with the string "Inf" (or null) standing in
// for the unbounded case. Accepting loose input mirrors what hosts actually
// send for "no upper bound".
impl Serialize for Bound {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Bound::Finite(n) => serializer.serialize_u32(*n),
            Bound::Inf => serializer.serialize_str("Inf"),
        }
    }
}

impl<'de> Deserialize<'de> for Bound {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Num(u32),
            Text(String),
            Null(Option<()>),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Num(n) => Ok(Bound::Finite(n)),
            Raw::Text(s) if s == "Inf" => Ok(Bound::Inf),
            Raw::Text(s) => Err(de::Error::custom(format!("invalid bound: {:?}", s))),
            Raw::Null(_) => Ok(Bound::Inf),
        }
    }
}

/// Enum representing all pattern node types.
///
/// Each variant wraps a dedicated payload struct so call sites can match on
/// the shape they care about and serialization stays self-describing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Pattern {
    Literal(Literal),
    Class(CharClass),
    Enum(EnumSet),
    Seq(Seq),
    Optional(Optional),
    Any(AnyRun),
}

/// Literal string node. Matches the exact value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Literal {
    pub value: String,
}

/// Character-class run with repetition bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharClass {
    pub kind: ClassKind,
    pub min: u32,
    pub max: Bound,
}

/// An ordered, duplicate-free set of literal alternatives.
///
/// The value list is canonical: lexicographically ascending, no duplicates.
/// Construction through [`Pattern::enumeration`] and deserialization both
/// normalize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumSet {
    pub values: Vec<String>,
}

// Custom deserializer: normalize incoming value lists so the canonical-form
// invariant holds no matter where the AST came from.
impl<'de> Deserialize<'de> for EnumSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            values: Vec<String>,
        }

        let raw = Raw::deserialize(deserializer)?;
        Ok(EnumSet::new(raw.values))
    }
}

impl EnumSet {
    /// Build a canonical enum set: sorted ascending, deduplicated.
    pub fn new(mut values: Vec<String>) -> Self {
        values.sort();
        values.dedup();
        EnumSet { values }
    }
}

/// Sequence node. Matches its parts in order. Arity >= 2 by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seq {
    pub parts: Vec<Pattern>,
}

/// Optional node. Matches its inner pattern zero or one time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Optional {
    pub inner: Box<Pattern>,
}

/// Wildcard run with repetition bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnyRun {
    pub min: u32,
    pub max: Bound,
}

impl Pattern {
    pub fn literal(value: impl Into<String>) -> Pattern {
        Pattern::Literal(Literal {
            value: value.into(),
        })
    }

    pub fn class(kind: ClassKind, min: u32, max: Bound) -> Pattern {
        Pattern::Class(CharClass { kind, min, max })
    }

    /// Canonicalizing `Enum` constructor.
    pub fn enumeration(values: Vec<String>) -> Pattern {
        Pattern::Enum(EnumSet::new(values))
    }

    /// Build a sequence; a single element is returned unwrapped and an empty
    /// part list degenerates to the empty literal.
    pub fn sequence(mut parts: Vec<Pattern>) -> Pattern {
        match parts.len() {
            0 => Pattern::literal(""),
            1 => parts.remove(0),
            _ => Pattern::Seq(Seq { parts }),
        }
    }

    pub fn optional(inner: Pattern) -> Pattern {
        Pattern::Optional(Optional {
            inner: Box::new(inner),
        })
    }

    pub fn any(min: u32, max: Bound) -> Pattern {
        Pattern::Any(AnyRun { min, max })
    }

    /// Lower this pattern to PCRE-compatible regex text (unanchored).
    pub fn to_regex(&self) -> String {
        crate::emitters::pcre::PcreEmitter::new().emit(self)
    }

    /// Full-string match decision.
    ///
    /// Compiles `^…$` around the lowered regex. A compilation failure is
    /// logged and reported as "does not match"; it never panics.
    pub fn matches(&self, value: &str) -> bool {
        let anchored = format!("^{}$", self.to_regex());
        match regex::Regex::new(&anchored) {
            Ok(re) => re.is_match(value),
            Err(err) => {
                log::warn!("pattern failed to compile: {anchored:?}: {err}");
                false
            }
        }
    }

    /// Synthesis cost. Non-negative, additive across sequences; lower is
    /// better.
    pub fn cost(&self) -> f64 {
        match self {
            Pattern::Literal(lit) => {
                let len = lit.value.chars().count() as f64;
                (1.0 + 0.1 * len).min(5.0)
            }
            Pattern::Class(class) => {
                let base = match class.kind {
                    ClassKind::Digit => 1.0,
                    ClassKind::Upper | ClassKind::Lower => 1.5,
                    ClassKind::Alpha => 2.0,
                    ClassKind::Alnum => 2.5,
                    ClassKind::Word => 3.0,
                    ClassKind::Any => 5.0,
                };
                base + range_cost(class.min, class.max)
            }
            Pattern::Enum(e) => {
                let n = e.values.len() as f64;
                if e.values.len() <= 1 {
                    1.0
                } else if e.values.len() <= 5 {
                    1.0 + 0.2 * n
                } else if e.values.len() <= 10 {
                    2.0 + 0.3 * n
                } else if e.values.len() <= 20 {
                    4.0 + 0.4 * n
                } else {
                    10.0 + 0.5 * n
                }
            }
            Pattern::Seq(seq) => seq.parts.iter().map(Pattern::cost).sum(),
            Pattern::Optional(opt) => opt.inner.cost() + 0.5,
            Pattern::Any(_) => 10.0,
        }
    }

    /// How tightly this pattern constrains its accepted language, in [0, 1].
    pub fn specificity(&self) -> f64 {
        match self {
            Pattern::Literal(_) => 1.0,
            Pattern::Class(class) => {
                let fixed = class.max.finite().is_some_and(|m| m == class.min);
                if fixed {
                    match class.kind {
                        ClassKind::Digit => 0.9,
                        ClassKind::Upper | ClassKind::Lower => 0.85,
                        ClassKind::Alpha => 0.7,
                        ClassKind::Alnum => 0.6,
                        ClassKind::Word | ClassKind::Any => 0.5,
                    }
                } else {
                    0.5
                }
            }
            Pattern::Enum(e) => match e.values.len() {
                0 | 1 => 1.0,
                2..=5 => 0.9,
                6..=10 => 0.7,
                11..=20 => 0.5,
                _ => 0.3,
            },
            Pattern::Seq(seq) => {
                let sum: f64 = seq.parts.iter().map(Pattern::specificity).sum();
                sum / seq.parts.len() as f64
            }
            Pattern::Optional(opt) => 0.8 * opt.inner.specificity(),
            Pattern::Any(_) => 0.1,
        }
    }

    /// Number of top-level elements: sequence arity, or 1 for everything
    /// else.
    pub fn seq_length(&self) -> usize {
        match self {
            Pattern::Seq(seq) => seq.parts.len(),
            _ => 1,
        }
    }

    /// Largest enum alternative count anywhere in the tree.
    pub fn max_enum_size(&self) -> usize {
        match self {
            Pattern::Enum(e) => e.values.len(),
            Pattern::Seq(seq) => seq
                .parts
                .iter()
                .map(Pattern::max_enum_size)
                .max()
                .unwrap_or(0),
            Pattern::Optional(opt) => opt.inner.max_enum_size(),
            _ => 0,
        }
    }
}

fn range_cost(min: u32, max: Bound) -> f64 {
    match max {
        Bound::Finite(m) if m == min => 0.0,
        Bound::Finite(m) => 0.5 + 0.1 * (m.saturating_sub(min)) as f64,
        Bound::Inf => 1.0,
    }
}

fn fmt_range(f: &mut fmt::Formatter<'_>, name: &str, min: u32, max: Bound) -> fmt::Result {
    match max {
        Bound::Finite(m) if m == min => write!(f, "{name}({min})"),
        Bound::Finite(m) => write!(f, "{name}({min}..{m})"),
        Bound::Inf => write!(f, "{name}({min}..)"),
    }
}

// Compact human-readable rendering, used by the profile export.
impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Literal(lit) => write!(f, "{:?}", lit.value),
            Pattern::Class(class) => {
                let name = match class.kind {
                    ClassKind::Digit => "digit",
                    ClassKind::Upper => "upper",
                    ClassKind::Lower => "lower",
                    ClassKind::Alpha => "alpha",
                    ClassKind::Alnum => "alnum",
                    ClassKind::Word => "word",
                    ClassKind::Any => "any",
                };
                fmt_range(f, name, class.min, class.max)
            }
            Pattern::Enum(e) => write!(f, "[{}]", e.values.join("|")),
            Pattern::Seq(seq) => {
                for (i, part) in seq.parts.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{part}")?;
                }
                Ok(())
            }
            Pattern::Optional(opt) => write!(f, "{}?", opt.inner),
            Pattern::Any(any) => fmt_range(f, "any", any.min, any.max),
        }
    }
}
