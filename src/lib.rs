//! strprof
//!
//! Automatic regex-pattern discovery for columns of text values. Given a
//! bag of strings (e.g. a database column), strprof produces a small set of
//! regular expressions that collectively describe the structural format of
//! the data, plus the outlier values that fit none of the discovered
//! formats.
//!
//! The pipeline: tokenization → delimiter-skeleton clustering → per-cluster
//! pattern synthesis under a cost model → coverage and anomaly accounting.
//!
//! # Example
//!
//! ```
//! use strprof::{profile, validate, ProfileOptions};
//!
//! let values: Vec<String> = (1..=50).map(|i| format!("ACC-{i:05}")).collect();
//! let profile = profile(&values, ProfileOptions::default()).unwrap();
//!
//! assert_eq!(profile.patterns[0].regex, "ACC\\-\\d{5}");
//! assert!(validate(&profile, "ACC-00007").is_ok());
//! assert!(validate(&profile, "not an account").is_err());
//! ```
//!
//! # Modules
//!
//! - `core`: tokenizer, pattern AST, clustering, synthesis, cost model and
//!   profile assembly
//! - `emitters`: lowering of the pattern AST to PCRE-compatible regex text
//! - `simply`: terse builder helpers for constructing patterns by hand

pub mod core;
pub mod emitters;
pub mod simply;

// Re-export the public surface for convenience
pub use core::errors::ProfileError;
pub use core::options::ProfileOptions;
pub use core::pattern::{Bound, ClassKind, Pattern};
pub use core::profile::{
    export, infer_pattern, infer_regex, merge, merge_strict, profile, profile_json, validate,
    PatternInfo, Profile, ProfileStats,
};
