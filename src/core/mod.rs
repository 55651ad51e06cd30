//! Core module containing the synthesis pipeline and its data model.
//!
//! This module provides:
//! - Tokenization and structural signatures (`tokens`)
//! - The pattern AST (`pattern`)
//! - Delimiter-skeleton clustering (`cluster`)
//! - Per-cluster pattern synthesis (`synth`)
//! - The cost model (`scoring`)
//! - Profile assembly and the external operations (`profile`)
//! - Options and error types (`options`, `errors`)

pub mod cluster;
pub mod errors;
pub mod options;
pub mod pattern;
pub mod profile;
pub mod scoring;
pub mod synth;
pub mod tokens;
