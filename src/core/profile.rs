//! Profile Assembler - Top-Level Orchestration
//!
//! This module wires the pipeline together: validate the input, shortcut
//! small categorical columns to a single enumeration, otherwise cluster the
//! values and synthesize one candidate pattern per cluster, then account for
//! coverage and anomalies and assemble the final [`Profile`].
//!
//! A `Profile` is constructed once per `profile` call and is immutable
//! thereafter. Each [`PatternInfo`] lazily caches its compiled regex for
//! `validate`; since profiles never change after construction, no
//! synchronization beyond the cell itself is needed.

use crate::core::cluster::cluster;
use crate::core::errors::ProfileError;
use crate::core::options::ProfileOptions;
use crate::core::pattern::Pattern;
use crate::core::scoring;
use crate::core::synth::{best_candidate, Synthesizer};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;

/// One surviving pattern with its bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternInfo {
    pub pattern: Pattern,
    /// Unanchored PCRE-compatible regex text for `pattern`.
    pub regex: String,
    /// `matched_count / total_input_count`, in [0, 1].
    pub coverage: f64,
    pub matched_count: usize,
    /// The source strings this pattern was synthesized from.
    pub members: Vec<String>,
    pub cost: f64,
    pub specificity: f64,
    #[serde(skip)]
    compiled: OnceLock<Option<Regex>>,
}

impl PatternInfo {
    /// Build the bookkeeping record for `pattern`, counting matches over the
    /// whole input.
    fn new(pattern: Pattern, all_values: &[String], members: Vec<String>) -> Self {
        let regex = pattern.to_regex();
        let compiled_re = scoring::compile_anchored(&pattern);
        let matched_count = match &compiled_re {
            Some(re) => all_values.iter().filter(|v| re.is_match(v)).count(),
            None => 0,
        };
        let coverage = if all_values.is_empty() {
            0.0
        } else {
            matched_count as f64 / all_values.len() as f64
        };

        let compiled = OnceLock::new();
        let _ = compiled.set(compiled_re);

        PatternInfo {
            coverage,
            matched_count,
            members,
            cost: pattern.cost(),
            specificity: pattern.specificity(),
            regex,
            pattern,
            compiled,
        }
    }

    /// The compiled anchored regex, if it compiles.
    pub fn compiled(&self) -> Option<&Regex> {
        self.compiled
            .get_or_init(|| scoring::compile_anchored(&self.pattern))
            .as_ref()
    }

    /// Full-string match against this pattern.
    pub fn matches(&self, value: &str) -> bool {
        self.compiled().is_some_and(|re| re.is_match(value))
    }
}

/// Aggregate statistics of a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileStats {
    pub total_values: usize,
    pub distinct_values: usize,
    pub pattern_count: usize,
    /// `min(1.0, Σ matched_count / total_values)`.
    pub total_coverage: f64,
    pub anomaly_count: usize,
}

/// The result of profiling one column of values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Surviving patterns, sorted by strictly descending coverage.
    pub patterns: Vec<PatternInfo>,
    /// Input values matched by none of the surviving patterns, in input
    /// order. Empty when anomaly detection is disabled.
    pub anomalies: Vec<String>,
    pub stats: ProfileStats,
    pub options: ProfileOptions,
}

/// Profile a column of values.
///
/// Small categorical columns (distinct count within `enum_threshold`) are
/// described by a single whole-string enumeration; everything else goes
/// through clustering and per-cluster synthesis.
pub fn profile(values: &[String], options: ProfileOptions) -> Result<Profile, ProfileError> {
    if values.is_empty() {
        return Err(ProfileError::EmptyInput);
    }

    let total = values.len();
    let distinct = distinct_in_order(values);

    if distinct.len() <= options.enum_threshold {
        let info = PatternInfo::new(Pattern::enumeration(distinct.clone()), values, values.to_vec());
        let stats = ProfileStats {
            total_values: total,
            distinct_values: distinct.len(),
            pattern_count: 1,
            total_coverage: (info.matched_count as f64 / total as f64).min(1.0),
            anomaly_count: 0,
        };
        return Ok(Profile {
            patterns: vec![info],
            anomalies: Vec::new(),
            stats,
            options,
        });
    }

    let mut patterns = Vec::new();
    for cl in cluster(values, &options) {
        let candidate = best_candidate(&cl.members, &options);
        let info = PatternInfo::new(candidate, values, cl.members);
        if info.coverage < options.min_coverage {
            continue;
        }
        patterns.push(info);
    }
    // Stable sort: equal coverage keeps cluster order.
    patterns.sort_by(|a, b| {
        b.coverage
            .partial_cmp(&a.coverage)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let anomalies: Vec<String> = if options.detect_anomalies {
        values
            .iter()
            .filter(|v| !patterns.iter().any(|p| p.matches(v)))
            .cloned()
            .collect()
    } else {
        Vec::new()
    };

    let matched_sum: usize = patterns.iter().map(|p| p.matched_count).sum();
    let stats = ProfileStats {
        total_values: total,
        distinct_values: distinct.len(),
        pattern_count: patterns.len(),
        total_coverage: (matched_sum as f64 / total as f64).min(1.0),
        anomaly_count: anomalies.len(),
    };

    Ok(Profile {
        patterns,
        anomalies,
        stats,
        options,
    })
}

/// Profile an untyped JSON value.
///
/// This is the boundary where host input is validated: the value must be an
/// array of strings.
pub fn profile_json(
    value: &serde_json::Value,
    options: ProfileOptions,
) -> Result<Profile, ProfileError> {
    let items = value.as_array().ok_or(ProfileError::NotAList)?;
    let mut values = Vec::with_capacity(items.len());
    for item in items {
        match item.as_str() {
            Some(s) => values.push(s.to_string()),
            None => return Err(ProfileError::NonStringValues),
        }
    }
    profile(&values, options)
}

/// Check a value against a profile. A value is valid iff at least one
/// pattern matches it fully.
pub fn validate(profile: &Profile, value: &str) -> Result<(), ProfileError> {
    if profile.patterns.iter().any(|p| p.matches(value)) {
        Ok(())
    } else {
        Err(ProfileError::NoMatch)
    }
}

/// Run the synthesizer once over `values` and return the raw AST.
pub fn infer_pattern(values: &[String], options: &ProfileOptions) -> Pattern {
    Synthesizer::from_options(options).synthesize(values)
}

/// Run the synthesizer once over `values` and return the regex text.
pub fn infer_regex(values: &[String], options: &ProfileOptions) -> String {
    infer_pattern(values, options).to_regex()
}

/// Merge two profiles by re-profiling the deduplicated union of their
/// recorded pattern members, under the first profile's options.
///
/// Prior anomalies are not part of the union and are forgotten; use
/// [`merge_strict`] to keep them.
pub fn merge(a: &Profile, b: &Profile) -> Result<Profile, ProfileError> {
    let union = member_union(a, b, false);
    profile(&union, a.options.clone())
}

/// Like [`merge`], but the union also carries both profiles' anomaly lists,
/// so prior outliers stay visible in the merged profile.
pub fn merge_strict(a: &Profile, b: &Profile) -> Result<Profile, ProfileError> {
    let union = member_union(a, b, true);
    profile(&union, a.options.clone())
}

fn member_union(a: &Profile, b: &Profile, include_anomalies: bool) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut union = Vec::new();
    let members = a
        .patterns
        .iter()
        .chain(b.patterns.iter())
        .flat_map(|p| p.members.iter());
    let anomalies = a.anomalies.iter().chain(b.anomalies.iter());

    let sources: Box<dyn Iterator<Item = &String>> = if include_anomalies {
        Box::new(members.chain(anomalies))
    } else {
        Box::new(members)
    };
    for value in sources {
        if seen.insert(value) {
            union.push(value.clone());
        }
    }
    union
}

/// Serialization-ready view of a profile.
pub fn export(profile: &Profile) -> serde_json::Value {
    serde_json::json!({
        "patterns": profile
            .patterns
            .iter()
            .map(|p| {
                serde_json::json!({
                    "regex": p.regex,
                    "pretty": p.pattern.to_string(),
                    "coverage": p.coverage,
                    "matched_count": p.matched_count,
                    "specificity": p.specificity,
                })
            })
            .collect::<Vec<_>>(),
        "stats": {
            "total_values": profile.stats.total_values,
            "distinct_values": profile.stats.distinct_values,
            "pattern_count": profile.stats.pattern_count,
            "total_coverage": profile.stats.total_coverage,
            "anomaly_count": profile.stats.anomaly_count,
        },
    })
}

fn distinct_in_order(values: &[String]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut distinct = Vec::new();
    for value in values {
        if seen.insert(value) {
            distinct.push(value.clone());
        }
    }
    distinct
}
