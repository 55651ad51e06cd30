//! Unit tests for the strprof pipeline.
//!
//! Organized by pipeline stage: tokenizer, signatures, pattern AST,
//! emitter, clustering, synthesizer, cost model, profile assembly.

use strprof::core::tokens::{
    compact_signature, signature, skeleton, tokenize, tokenize_merged, TokenKind,
};
use strprof::{Bound, ClassKind, Pattern};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// TOKENIZER TESTS
// ============================================================================

#[cfg(test)]
mod tokenizer {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_class_runs() {
        let tokens = tokenize("abc123XYZ");
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![TokenKind::Lower, TokenKind::Digits, TokenKind::Upper]
        );
    }

    #[test]
    fn test_every_delimiter_is_a_single_token() {
        for ch in "-_./\\@#$%^&*()+=[]{}|;:'\",<>?!`~".chars() {
            let doubled = format!("{ch}{ch}");
            let tokens = tokenize(&doubled);
            assert_eq!(tokens.len(), 2, "delimiter {ch:?} should not extend");
            assert_eq!(tokens[0].kind, TokenKind::Delimiter);
            assert_eq!(tokens[0].length, 1);
        }
    }

    #[test]
    fn test_whitespace_kinds() {
        let tokens = tokenize("a \t\r\nb");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].kind, TokenKind::Whitespace);
        assert_eq!(tokens[1].length, 4);
    }

    #[test]
    fn test_positions_are_code_points() {
        let tokens = tokenize("é1");
        assert_eq!(tokens[0].kind, TokenKind::Literal);
        assert_eq!(tokens[1].position, 1);
    }

    #[test]
    fn test_emoji_is_literal() {
        let tokens = tokenize("a🦀b");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].kind, TokenKind::Literal);
        assert_eq!(tokens[1].value, "🦀");
    }

    #[test]
    fn test_merged_tokenization_collapses_letter_runs() {
        let tokens = tokenize_merged("WiFi-6E");
        assert_eq!(tokens[0].kind, TokenKind::Alpha);
        assert_eq!(tokens[0].value, "WiFi");
        // a lone case run keeps its original kind
        let tokens = tokenize_merged("ACME");
        assert_eq!(tokens[0].kind, TokenKind::Upper);
    }
}

// ============================================================================
// SIGNATURE TESTS
// ============================================================================

#[cfg(test)]
mod signatures {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_full_signature_repeats_class_letters() {
        assert_eq!(signature("ACC-00123"), "UUU-DDDDD");
        assert_eq!(signature("user_42"), "LLLL_DD");
        assert_eq!(signature("a b"), "L_L");
    }

    #[test]
    fn test_compact_signature_is_one_letter_per_token() {
        assert_eq!(compact_signature("ACC-00123"), "U-D");
        assert_eq!(compact_signature("user_42"), "L_D");
    }

    #[test]
    fn test_skeleton_keeps_delimiters_and_class_letters() {
        assert_eq!(skeleton("ACC-00123"), "U-D");
        assert_eq!(skeleton("2020-Q1"), "D-UD");
        assert_eq!(skeleton("one two"), "L_L");
        assert_eq!(skeleton("ID-0042"), "U-D");
        assert_eq!(skeleton("not-matching"), "L-L");
        assert_eq!(skeleton(""), "");
    }

    #[test]
    fn test_empty_string_has_empty_signatures() {
        assert_eq!(signature(""), "");
        assert_eq!(compact_signature(""), "");
    }
}

// ============================================================================
// PATTERN AST TESTS
// ============================================================================

#[cfg(test)]
mod pattern_ast {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_enum_cost_bands() {
        let sizes_and_costs = [
            (1, 1.0),
            (4, 1.8),
            (8, 4.4),
            (15, 10.0),
            (30, 25.0),
        ];
        for (size, expected) in sizes_and_costs {
            let values: Vec<String> = (0..size).map(|i| format!("{i:03}")).collect();
            let p = Pattern::enumeration(values);
            assert!(
                (p.cost() - expected).abs() < 1e-9,
                "enum of {size}: expected {expected}, got {}",
                p.cost()
            );
        }
    }

    #[test]
    fn test_seq_cost_is_additive() {
        let a = Pattern::literal("ab");
        let b = Pattern::class(ClassKind::Digit, 3, Bound::Finite(3));
        let seq = Pattern::sequence(vec![a.clone(), b.clone()]);
        assert!((seq.cost() - (a.cost() + b.cost())).abs() < 1e-9);
    }

    #[test]
    fn test_optional_cost_and_specificity() {
        let inner = Pattern::literal("x");
        let opt = Pattern::optional(inner.clone());
        assert!((opt.cost() - (inner.cost() + 0.5)).abs() < 1e-9);
        assert!((opt.specificity() - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_any_is_expensive_and_unspecific() {
        let p = Pattern::any(0, Bound::Inf);
        assert_eq!(p.cost(), 10.0);
        assert!((p.specificity() - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_display_is_compact() {
        let p = Pattern::sequence(vec![
            Pattern::enumeration(strings(&["ACC", "ORG"])),
            Pattern::literal("-"),
            Pattern::class(ClassKind::Digit, 5, Bound::Finite(5)),
        ]);
        assert_eq!(p.to_string(), "[ACC|ORG] \"-\" digit(5)");
    }
}

// ============================================================================
// EMITTER TESTS
// ============================================================================

#[cfg(test)]
mod emitter {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_metacharacters_round_trip_through_matching() {
        let tricky = strings(&["a.b", "c+d", "(e)", "[f]", "{g}", "h|i", "j\\k", "l-m"]);
        for value in &tricky {
            let p = Pattern::literal(value.clone());
            assert!(p.matches(value), "literal {value:?} must match itself");
        }
        let p = Pattern::literal("a.b");
        assert!(!p.matches("axb"), "dot must be escaped");
    }

    #[test]
    fn test_word_and_any_classes() {
        assert_eq!(
            Pattern::class(ClassKind::Word, 1, Bound::Inf).to_regex(),
            "\\w+"
        );
        assert_eq!(
            Pattern::class(ClassKind::Any, 2, Bound::Finite(2)).to_regex(),
            ".{2}"
        );
    }

    #[test]
    fn test_emitted_regexes_compile() {
        let patterns = [
            Pattern::enumeration(strings(&["a|b", "c(d"])),
            Pattern::sequence(vec![
                Pattern::literal("x*"),
                Pattern::class(ClassKind::Alnum, 0, Bound::Inf),
            ]),
            Pattern::optional(Pattern::enumeration(strings(&["p", "q"]))),
            Pattern::any(1, Bound::Finite(9)),
        ];
        for p in &patterns {
            let anchored = format!("^{}$", p.to_regex());
            assert!(
                regex::Regex::new(&anchored).is_ok(),
                "emitted regex must compile: {anchored}"
            );
        }
    }
}

// ============================================================================
// CLUSTERING TESTS
// ============================================================================

#[cfg(test)]
mod clustering {
    use super::*;
    use pretty_assertions::assert_eq;
    use strprof::core::cluster::{cluster, skeleton_distance};
    use strprof::ProfileOptions;

    #[test]
    fn test_close_skeletons_merge() {
        // "L-D" and "L-D-L" normalized distance is 2/5 = 0.4; raise the
        // threshold to let them merge
        let values = strings(&["a-1", "b-2", "c-3", "a-1-x"]);
        let options = ProfileOptions {
            merge_threshold: 0.5,
            ..ProfileOptions::default()
        };
        let clusters = cluster(&values, &options);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].members.len(), 4);
    }

    #[test]
    fn test_distance_is_symmetric_and_normalized() {
        let pairs = [("X-X", "X_X"), ("X-X", "X-X-X"), ("", "X"), ("X", "")];
        for (a, b) in pairs {
            let d1 = skeleton_distance(a, b);
            let d2 = skeleton_distance(b, a);
            assert!((d1 - d2).abs() < 1e-12);
            assert!((0.0..=1.0).contains(&d1));
        }
        assert_eq!(skeleton_distance("", ""), 0.0);
    }

    #[test]
    fn test_cluster_signatures_come_from_representative() {
        let values = strings(&["AB-12", "CD-34", "EF-56"]);
        let clusters = cluster(&values, &ProfileOptions::default());
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].signature, "UU-DD");
        assert_eq!(clusters[0].compact_signature, "U-D");
    }

    #[test]
    fn test_largest_group_absorbs_first() {
        // two big groups either side of a small bridge group: the bigger one
        // gets the first chance to absorb
        let mut values = Vec::new();
        for i in 0..10 {
            values.push(format!("a-{i}"));
        }
        for i in 0..5 {
            values.push(format!("b_{i}"));
        }
        values.push("c.d".to_string());
        let options = ProfileOptions {
            merge_threshold: 1.0,
            ..ProfileOptions::default()
        };
        let clusters = cluster(&values, &options);
        // threshold 1.0 absorbs everything into the largest group
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].members.len(), 16);
    }
}

// ============================================================================
// SYNTHESIZER TESTS
// ============================================================================

#[cfg(test)]
mod synthesizer {
    use super::*;
    use pretty_assertions::assert_eq;
    use strprof::core::synth::{best_candidate, Synthesizer};
    use strprof::ProfileOptions;

    #[test]
    fn test_uneven_token_counts_align_sparsely() {
        let synth = Synthesizer::new(10, 0.2);
        let p = synth.synthesize(&strings(&["a-1", "b-2-x"]));
        // the trailing columns only exist in the longer member
        assert!(p.matches("a-1-x") || p.matches("b-2-x"));
    }

    #[test]
    fn test_whitespace_columns() {
        let synth = Synthesizer::new(10, 0.2);
        let p = synth.synthesize(&strings(&["a b", "c d"]));
        assert_eq!(p.to_regex(), "(a|c) (b|d)");

        let p = synth.synthesize(&strings(&["a b", "c  d"]));
        match p {
            Pattern::Seq(seq) => {
                assert_eq!(seq.parts[1], Pattern::any(1, Bound::Finite(2)));
            }
            other => panic!("expected Seq, got {other:?}"),
        }
    }

    #[test]
    fn test_varying_delimiters_enumerate() {
        let synth = Synthesizer::new(10, 0.2);
        let p = synth.synthesize(&strings(&["a-b", "c.d", "e-f"]));
        match p {
            Pattern::Seq(seq) => {
                assert_eq!(
                    seq.parts[1],
                    Pattern::enumeration(strings(&["-", "."]))
                );
            }
            other => panic!("expected Seq, got {other:?}"),
        }
    }

    #[test]
    fn test_non_ascii_literal_columns_enumerate_within_threshold() {
        let synth = Synthesizer::new(10, 0.2);
        let p = synth.synthesize(&strings(&["é1", "ü2"]));
        match &p {
            Pattern::Seq(seq) => {
                assert_eq!(seq.parts[0], Pattern::enumeration(strings(&["é", "ü"])));
            }
            other => panic!("expected Seq, got {other:?}"),
        }
    }

    #[test]
    fn test_digit_width_ranges() {
        let synth = Synthesizer::new(5, 0.2);
        let members: Vec<String> = (0..50).map(|i| format!("{i}")).collect();
        match synth.synthesize(&members) {
            Pattern::Class(class) => {
                assert_eq!(class.kind, ClassKind::Digit);
                assert_eq!(class.min, 1);
                assert_eq!(class.max, Bound::Finite(2));
            }
            other => panic!("expected Class, got {other:?}"),
        }
    }

    #[test]
    fn test_best_candidate_picks_cheapest_survivor() {
        // the digit column enumerates at threshold 10 and generalizes at
        // threshold 5; generalization is cheaper and both cover everything
        let members: Vec<String> = (0..8)
            .flat_map(|i| std::iter::repeat(format!("tag{i:02}")).take(10))
            .collect();
        let p = best_candidate(&members, &ProfileOptions::default());
        assert_eq!(p.to_regex(), "tag\\d{2}");
    }

    #[test]
    fn test_best_candidate_falls_back_when_coverage_is_low() {
        // ragged token counts: the synthesized column for "-1" only exists
        // in the first member, so no candidate covers both values
        let members = strings(&["a-1", "b"]);
        let p = best_candidate(&members, &ProfileOptions::default());
        let first = Synthesizer::new(5, 0.2).synthesize(&members);
        assert_eq!(p, first);
        assert_eq!(p.to_regex(), "(a|b)\\-1");
    }
}

// ============================================================================
// COST MODEL TESTS
// ============================================================================

#[cfg(test)]
mod cost_model {
    use super::*;
    use pretty_assertions::assert_eq;
    use strprof::core::scoring::{
        complexity, coverage, interpretability, precision, score, suggest_enum_threshold,
        ScoreWeights, DEFAULT_WEIGHTS,
    };

    #[test]
    fn test_default_weights() {
        assert_eq!(DEFAULT_WEIGHTS.coverage, 2.0);
        assert_eq!(DEFAULT_WEIGHTS.precision, 1.5);
        assert_eq!(DEFAULT_WEIGHTS.complexity, 1.0);
        assert_eq!(DEFAULT_WEIGHTS.interpretability, 0.5);
        assert_eq!(ScoreWeights::default(), DEFAULT_WEIGHTS);
    }

    #[test]
    fn test_score_of_perfect_pattern_is_low() {
        let values = strings(&["aa", "bb"]);
        let p = Pattern::enumeration(values.clone());
        let s = score(&p, &values, &DEFAULT_WEIGHTS);
        // coverage 1, precision 0.9 (enum of 2), small complexity, full
        // interpretability
        assert!(s < 0.25, "expected a low score, got {s}");
    }

    #[test]
    fn test_score_punishes_non_matching_patterns() {
        let values = strings(&["aa", "bb"]);
        let good = Pattern::enumeration(values.clone());
        let bad = Pattern::class(ClassKind::Digit, 1, Bound::Finite(1));
        assert!(score(&bad, &values, &DEFAULT_WEIGHTS) > score(&good, &values, &DEFAULT_WEIGHTS));
    }

    #[test]
    fn test_interpretability_penalizes_huge_enums() {
        let small = Pattern::enumeration(strings(&["a", "b"]));
        let huge = Pattern::enumeration((0..40).map(|i| format!("v{i}")).collect());
        assert!(interpretability(&small) > interpretability(&huge));
    }

    #[test]
    fn test_complexity_scales_with_cost() {
        let cheap = Pattern::class(ClassKind::Digit, 3, Bound::Finite(3));
        let pricey = Pattern::sequence(vec![
            Pattern::any(0, Bound::Inf),
            Pattern::any(0, Bound::Inf),
        ]);
        assert!(complexity(&cheap) < complexity(&pricey));
        assert_eq!(complexity(&cheap), 1.0 / 50.0);
    }

    #[test]
    fn test_coverage_and_precision_edge_cases() {
        let p = Pattern::literal("x");
        assert_eq!(coverage(&p, &[]), 0.0);
        // precision with no invalid sample is specificity
        assert_eq!(precision(&p, &strings(&["x"]), &[]), 1.0);
    }

    #[test]
    fn test_suggested_threshold_for_boolean_column() {
        let mut values = Vec::new();
        for _ in 0..50 {
            values.push("true".to_string());
            values.push("false".to_string());
        }
        assert_eq!(suggest_enum_threshold(&values), 7);
    }
}

// ============================================================================
// PROFILE TESTS
// ============================================================================

#[cfg(test)]
mod profile_assembly {
    use super::*;
    use pretty_assertions::assert_eq;
    use strprof::{export, merge, profile, validate, ProfileError, ProfileOptions};

    #[test]
    fn test_enumerate_precision_invariant() {
        // distinct <= threshold: the single enum matches exactly the
        // distinct values and nothing else
        let values = strings(&["alpha", "beta", "gamma", "alpha"]);
        let result = profile(&values, ProfileOptions::default()).unwrap();
        assert_eq!(result.patterns.len(), 1);
        for v in &values {
            assert!(validate(&result, v).is_ok());
        }
        for outsider in ["delta", "alph", "alphaa", ""] {
            assert_eq!(
                validate(&result, outsider).unwrap_err(),
                ProfileError::NoMatch
            );
        }
    }

    #[test]
    fn test_members_round_trip_through_their_pattern() {
        let mut values = Vec::new();
        for i in 0..30 {
            values.push(format!("SKU-{i:06}"));
        }
        for i in 0..30 {
            values.push(format!("{i:03}/{i:03}"));
        }
        let result = profile(&values, ProfileOptions::default()).unwrap();
        for info in &result.patterns {
            for member in &info.members {
                assert!(
                    info.matches(member),
                    "member {member:?} must match its own pattern {:?}",
                    info.regex
                );
            }
        }
    }

    #[test]
    fn test_stats_accounting() {
        let values = strings(&["x1", "x2", "x1"]);
        let result = profile(&values, ProfileOptions::default()).unwrap();
        assert_eq!(result.stats.total_values, 3);
        assert_eq!(result.stats.distinct_values, 2);
        assert_eq!(result.stats.pattern_count, 1);
        assert_eq!(result.stats.anomaly_count, 0);
        assert_eq!(result.stats.total_coverage, 1.0);
    }

    #[test]
    fn test_merge_reprofiles_the_union() {
        let a = profile(&strings(&["one", "two"]), ProfileOptions::default()).unwrap();
        let b = profile(&strings(&["two", "three"]), ProfileOptions::default()).unwrap();
        let merged = merge(&a, &b).unwrap();
        assert_eq!(merged.stats.total_values, 3);
        assert!(validate(&merged, "one").is_ok());
        assert!(validate(&merged, "three").is_ok());
    }

    #[test]
    fn test_export_is_serialization_ready() {
        let values: Vec<String> = (0..20).map(|i| format!("row-{i:04}")).collect();
        let result = profile(&values, ProfileOptions::default()).unwrap();
        let exported = export(&result);
        let text = serde_json::to_string(&exported).unwrap();
        let back: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(back, exported);
        assert_eq!(back["stats"]["pattern_count"], 1);
        assert_eq!(back["patterns"][0]["regex"], "row\\-\\d{4}");
    }
}
