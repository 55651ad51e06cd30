//! Target emitters that lower the pattern AST to regex text.

pub mod pcre;
