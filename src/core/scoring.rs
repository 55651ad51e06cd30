//! Cost Model - Scoring Candidate Patterns
//!
//! The cost model turns a candidate pattern and a sample of values into the
//! scalar signals used to rank candidates and assemble profiles: coverage,
//! precision, complexity and interpretability, plus a weighted combined
//! score. All weights and thresholds are public so hosts can tune them; the
//! defaults reproduce the reference behavior.

use crate::core::pattern::Pattern;
use regex::Regex;

/// Weights for [`score`]. Lower combined scores are better.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub coverage: f64,
    pub precision: f64,
    pub complexity: f64,
    pub interpretability: f64,
}

pub const DEFAULT_WEIGHTS: ScoreWeights = ScoreWeights {
    coverage: 2.0,
    precision: 1.5,
    complexity: 1.0,
    interpretability: 0.5,
};

impl Default for ScoreWeights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

/// Compile the full-string anchored form of a pattern.
///
/// Compilation failures are logged and yield `None`; callers treat that as
/// "matches nothing".
pub(crate) fn compile_anchored(pattern: &Pattern) -> Option<Regex> {
    let anchored = format!("^{}$", pattern.to_regex());
    match Regex::new(&anchored) {
        Ok(re) => Some(re),
        Err(err) => {
            log::warn!("pattern failed to compile: {anchored:?}: {err}");
            None
        }
    }
}

/// Fraction of `values` fully matched by the pattern. Empty input is 0.0.
pub fn coverage(pattern: &Pattern, values: &[String]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let Some(re) = compile_anchored(pattern) else {
        return 0.0;
    };
    let matched = values.iter().filter(|v| re.is_match(v)).count();
    matched as f64 / values.len() as f64
}

/// Precision estimate against labeled samples.
///
/// Without an invalid sample this degenerates to the pattern's specificity;
/// otherwise the specificity is averaged with the observed hit ratio.
pub fn precision(pattern: &Pattern, valid: &[String], invalid: &[String]) -> f64 {
    let specificity = pattern.specificity();
    if invalid.is_empty() {
        return specificity;
    }
    let Some(re) = compile_anchored(pattern) else {
        return specificity;
    };
    let v = valid.iter().filter(|s| re.is_match(s)).count();
    let i = invalid.iter().filter(|s| re.is_match(s)).count();
    if v + i == 0 {
        return specificity;
    }
    (specificity + v as f64 / (v + i) as f64) / 2.0
}

/// Normalized structural complexity in [0, 1].
pub fn complexity(pattern: &Pattern) -> f64 {
    (pattern.cost() / 50.0).min(1.0)
}

/// Step function of sequence length and largest enum size.
///
/// Short sequences with small alternations read well; long sequences or huge
/// alternations do not.
pub fn interpretability(pattern: &Pattern) -> f64 {
    let len = pattern.seq_length();
    let enum_size = pattern.max_enum_size();
    if len <= 3 && enum_size <= 5 {
        1.0
    } else if len <= 5 && enum_size <= 10 {
        0.8
    } else if len <= 8 && enum_size <= 20 {
        0.6
    } else if len <= 12 {
        0.5
    } else {
        0.3
    }
}

/// Weighted penalty score over a sample; lower is better.
pub fn score(pattern: &Pattern, values: &[String], weights: &ScoreWeights) -> f64 {
    weights.coverage * (1.0 - coverage(pattern, values))
        + weights.precision * (1.0 - precision(pattern, values, &[]))
        + weights.complexity * complexity(pattern)
        + weights.interpretability * (1.0 - interpretability(pattern))
}

/// Suggest an enum threshold from the shape of the sample.
///
/// Categorical columns (few distinct values, heavy repetition) get room to
/// enumerate everything; high-cardinality columns are pushed toward
/// generalization.
pub fn suggest_enum_threshold(values: &[String]) -> usize {
    let n = values.len();
    let mut distinct: Vec<&String> = Vec::new();
    for value in values {
        if !distinct.contains(&value) {
            distinct.push(value);
        }
    }
    let d = distinct.len();
    if d == 0 {
        return 3;
    }
    let ratio = n as f64 / d as f64;
    if d <= 10 && ratio >= 3.0 {
        d + 5
    } else if d <= 30 && ratio >= 2.0 {
        10
    } else if d <= 100 {
        5
    } else {
        3
    }
}
