//! Pattern Synthesizer - Column-Aligned Pattern Construction
//!
//! Given the member strings of one cluster, the synthesizer tokenizes every
//! member, aligns the token streams column-wise, and chooses the best
//! pattern element for every column: a literal, an enumeration of the
//! observed values, or a character class with length bounds. The per-column
//! choice is the enumerate-vs-generalize decision, driven by the distinct
//! count, the repetition rate, and the configured threshold.
//!
//! The assembled sequence goes through a single bottom-up optimize pass that
//! flattens nested sequences, coalesces adjacent literals, merges adjacent
//! same-kind classes, and collapses singleton sequences.

use crate::core::options::ProfileOptions;
use crate::core::pattern::{Bound, ClassKind, Pattern};
use crate::core::scoring;
use crate::core::tokens::{tokenize, Token, TokenKind};

/// Thresholds tried by best-candidate selection, in order.
pub const CANDIDATE_THRESHOLDS: [usize; 4] = [5, 10, 20, 50];

/// Candidates must match at least this fraction of the cluster's members.
pub const CANDIDATE_COVERAGE_FLOOR: f64 = 0.95;

/// Column-wise pattern synthesizer for one cluster.
#[derive(Debug, Clone)]
pub struct Synthesizer {
    /// Max distinct values before a position generalizes to a class.
    pub enum_threshold: usize,
    /// Accepted for API compatibility; unused by the current algorithm.
    pub length_tolerance: f64,
}

impl Synthesizer {
    pub fn new(enum_threshold: usize, length_tolerance: f64) -> Self {
        Synthesizer {
            enum_threshold,
            length_tolerance,
        }
    }

    pub fn from_options(options: &ProfileOptions) -> Self {
        Synthesizer::new(options.enum_threshold, options.length_tolerance)
    }

    /// Synthesize one pattern describing `members`.
    ///
    /// Total: an empty member list yields the empty literal.
    pub fn synthesize(&self, members: &[String]) -> Pattern {
        let rows: Vec<Vec<Token>> = members.iter().map(|m| tokenize(m)).collect();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);

        let mut columns = Vec::with_capacity(width);
        for c in 0..width {
            let bag: Vec<&Token> = rows.iter().filter_map(|row| row.get(c)).collect();
            columns.push(self.synthesize_column(&bag));
        }
        optimize(Pattern::sequence(columns))
    }

    /// Choose the pattern element for one column bag.
    fn synthesize_column(&self, bag: &[&Token]) -> Pattern {
        let kinds = distinct_kinds(bag);
        let values = distinct_values(bag);

        if let [kind] = kinds.as_slice() {
            return match kind {
                TokenKind::Delimiter => {
                    if values.len() == 1 {
                        Pattern::literal(values[0].clone())
                    } else {
                        Pattern::enumeration(values)
                    }
                }
                TokenKind::Whitespace => {
                    let (min, max) = length_range(bag);
                    if min == max {
                        Pattern::literal(" ".repeat(min as usize))
                    } else {
                        Pattern::any(min, Bound::Finite(max))
                    }
                }
                TokenKind::Literal => {
                    if values.len() <= self.enum_threshold {
                        Pattern::enumeration(values)
                    } else {
                        let (min, max) = length_range(bag);
                        Pattern::any(min, Bound::Finite(max))
                    }
                }
                kind => self.enumerate_or_generalize(bag, values, class_for(*kind)),
            };
        }

        let only_letters = kinds
            .iter()
            .all(|k| matches!(k, TokenKind::Upper | TokenKind::Lower));
        if only_letters {
            return self.enumerate_or_generalize(bag, values, ClassKind::Alpha);
        }

        if values.len() <= self.enum_threshold {
            Pattern::enumeration(values)
        } else {
            let (min, max) = length_range(bag);
            Pattern::class(ClassKind::Alnum, min, Bound::Finite(max))
        }
    }

    fn enumerate_or_generalize(
        &self,
        bag: &[&Token],
        values: Vec<String>,
        target: ClassKind,
    ) -> Pattern {
        if should_enumerate(values.len(), bag.len(), self.enum_threshold) {
            Pattern::enumeration(values)
        } else {
            let (min, max) = length_range(bag);
            Pattern::class(target, min, Bound::Finite(max))
        }
    }
}

/// The enumerate-vs-generalize decision.
///
/// Tiny alphabets always enumerate; anything over the threshold always
/// generalizes; in between, enumerate only under high repetition (distinct
/// count at most 30% of the total).
pub fn should_enumerate(distinct: usize, total: usize, threshold: usize) -> bool {
    if distinct <= 5 {
        return true;
    }
    if distinct > threshold {
        return false;
    }
    distinct as f64 <= 0.3 * total as f64
}

/// Run synthesis across the candidate threshold ladder and keep the cheapest
/// candidate that still covers at least [`CANDIDATE_COVERAGE_FLOOR`] of the
/// members. Falls back to the first candidate when none clears the floor.
pub fn best_candidate(members: &[String], options: &ProfileOptions) -> Pattern {
    let mut first: Option<Pattern> = None;
    let mut best: Option<(Pattern, f64)> = None;

    for &threshold in CANDIDATE_THRESHOLDS.iter() {
        let candidate =
            Synthesizer::new(threshold, options.length_tolerance).synthesize(members);
        if first.is_none() {
            first = Some(candidate.clone());
        }
        if scoring::coverage(&candidate, members) < CANDIDATE_COVERAGE_FLOOR {
            continue;
        }
        let cost = candidate.cost();
        if best.as_ref().map_or(true, |(_, best_cost)| cost < *best_cost) {
            best = Some((candidate, cost));
        }
    }

    match best {
        Some((pattern, _)) => pattern,
        None => first.unwrap_or_else(|| Pattern::literal("")),
    }
}

fn distinct_kinds(bag: &[&Token]) -> Vec<TokenKind> {
    let mut kinds = Vec::new();
    for token in bag {
        if !kinds.contains(&token.kind) {
            kinds.push(token.kind);
        }
    }
    kinds
}

fn distinct_values(bag: &[&Token]) -> Vec<String> {
    let mut values = Vec::new();
    for token in bag {
        if !values.contains(&token.value) {
            values.push(token.value.clone());
        }
    }
    values
}

fn length_range(bag: &[&Token]) -> (u32, u32) {
    let mut min = u32::MAX;
    let mut max = 0u32;
    for token in bag {
        let len = token.length as u32;
        min = min.min(len);
        max = max.max(len);
    }
    if bag.is_empty() {
        (0, 0)
    } else {
        (min, max)
    }
}

fn class_for(kind: TokenKind) -> ClassKind {
    match kind {
        TokenKind::Digits => ClassKind::Digit,
        TokenKind::Upper => ClassKind::Upper,
        TokenKind::Lower => ClassKind::Lower,
        TokenKind::Alpha => ClassKind::Alpha,
        TokenKind::Alnum => ClassKind::Alnum,
        _ => ClassKind::Any,
    }
}

fn add_bound(a: Bound, b: Bound) -> Bound {
    match (a, b) {
        (Bound::Finite(x), Bound::Finite(y)) => Bound::Finite(x + y),
        _ => Bound::Inf,
    }
}

/// Single bottom-up normalization pass: flatten nested sequences, coalesce
/// adjacent literals, merge adjacent same-kind classes, collapse singletons.
pub fn optimize(pattern: Pattern) -> Pattern {
    match pattern {
        Pattern::Seq(seq) => {
            let mut flattened = Vec::with_capacity(seq.parts.len());
            for part in seq.parts {
                match optimize(part) {
                    Pattern::Seq(inner) => flattened.extend(inner.parts),
                    other => flattened.push(other),
                }
            }

            let mut merged: Vec<Pattern> = Vec::with_capacity(flattened.len());
            for part in flattened {
                let absorbed = match (merged.last_mut(), &part) {
                    (Some(Pattern::Literal(prev)), Pattern::Literal(next)) => {
                        prev.value.push_str(&next.value);
                        true
                    }
                    (Some(Pattern::Class(prev)), Pattern::Class(next))
                        if prev.kind == next.kind =>
                    {
                        prev.min += next.min;
                        prev.max = add_bound(prev.max, next.max);
                        true
                    }
                    _ => false,
                };
                if !absorbed {
                    merged.push(part);
                }
            }
            Pattern::sequence(merged)
        }
        Pattern::Optional(opt) => Pattern::optional(optimize(*opt.inner)),
        other => other,
    }
}
