//! Tokenizer - Lexical Run Scanner for Column Values
//!
//! This module splits a string into a sequence of typed tokens and derives
//! the structural signatures the rest of the pipeline works with. A token is
//! a maximal run of characters of a single lexical class:
//!   - Digit, uppercase and lowercase runs
//!   - Single-character delimiter tokens from a fixed ASCII set
//!   - Whitespace runs
//!   - Literal runs for everything else (non-ASCII letters, symbols, emoji)
//!
//! All lengths and positions are measured in code points, not bytes.
//! Delimiter classification is ASCII-only; any non-ASCII character falls
//! into the `Literal` class.

use serde::{Deserialize, Serialize};

/// The fixed set of characters classified as delimiters.
pub const DELIMITERS: &str = "-_./\\@#$%^&*()+=[]{}|;:'\",<>?!`~";

/// Lexical class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    Digits,
    Upper,
    Lower,
    /// Mixed-case letter run; only produced when alpha merging is requested.
    Alpha,
    /// Letter-or-digit run; only produced by explicit merging.
    Alnum,
    Whitespace,
    Delimiter,
    Literal,
}

impl TokenKind {
    /// Single-letter class code used by signatures.
    ///
    /// Delimiter and literal tokens contribute their raw value instead and
    /// return `None` here.
    pub fn letter(&self) -> Option<char> {
        match self {
            TokenKind::Digits => Some('D'),
            TokenKind::Upper => Some('U'),
            TokenKind::Lower => Some('L'),
            TokenKind::Alpha => Some('A'),
            TokenKind::Alnum => Some('X'),
            TokenKind::Whitespace => Some('_'),
            TokenKind::Delimiter | TokenKind::Literal => None,
        }
    }
}

/// A run of characters of a single lexical class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    /// The exact substring, code-point level.
    pub value: String,
    /// Number of code points in `value`.
    pub length: usize,
    /// Starting code-point offset in the source string.
    pub position: usize,
}

impl Token {
    fn new(kind: TokenKind, value: String, position: usize) -> Self {
        let length = value.chars().count();
        Token {
            kind,
            value,
            length,
            position,
        }
    }
}

/// Classify a single character.
fn classify(ch: char) -> TokenKind {
    if ch.is_ascii_digit() {
        TokenKind::Digits
    } else if ch.is_ascii_uppercase() {
        TokenKind::Upper
    } else if ch.is_ascii_lowercase() {
        TokenKind::Lower
    } else if DELIMITERS.contains(ch) {
        TokenKind::Delimiter
    } else if ch == ' ' || ch == '\t' || ch == '\n' || ch == '\r' {
        TokenKind::Whitespace
    } else {
        TokenKind::Literal
    }
}

/// Split `text` into a sequence of typed tokens.
///
/// Walks the input code point by code point, extending the current run while
/// the class matches. Delimiter tokens never extend; each delimiter character
/// produces its own token. Tokenization is total: the empty string yields the
/// empty token sequence, and concatenating the token values in order always
/// reproduces the input.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut run = String::new();
    let mut run_kind = TokenKind::Literal;
    let mut run_start = 0usize;

    for (pos, ch) in text.chars().enumerate() {
        let kind = classify(ch);
        if !run.is_empty() && kind == run_kind && kind != TokenKind::Delimiter {
            run.push(ch);
            continue;
        }
        if !run.is_empty() {
            tokens.push(Token::new(run_kind, std::mem::take(&mut run), run_start));
        }
        run.push(ch);
        run_kind = kind;
        run_start = pos;
    }
    if !run.is_empty() {
        tokens.push(Token::new(run_kind, run, run_start));
    }
    tokens
}

/// Tokenize with alpha merging: adjacent `Upper`/`Lower`/`Alpha` tokens are
/// collapsed into a single `Alpha` token whose value is their concatenation.
pub fn tokenize_merged(text: &str) -> Vec<Token> {
    let mut merged: Vec<Token> = Vec::new();
    for token in tokenize(text) {
        let is_letters = matches!(
            token.kind,
            TokenKind::Upper | TokenKind::Lower | TokenKind::Alpha
        );
        if is_letters {
            if let Some(last) = merged.last_mut() {
                if matches!(
                    last.kind,
                    TokenKind::Upper | TokenKind::Lower | TokenKind::Alpha
                ) {
                    last.kind = TokenKind::Alpha;
                    last.value.push_str(&token.value);
                    last.length += token.length;
                    continue;
                }
            }
        }
        merged.push(token);
    }
    merged
}

/// Full structural signature: each character-class token contributes
/// `length` copies of its class letter; delimiters and literals contribute
/// their raw value. `"ACC-00123"` yields `"UUU-DDDDD"`.
pub fn signature(text: &str) -> String {
    let mut out = String::new();
    for token in tokenize(text) {
        match token.kind.letter() {
            Some(letter) => {
                for _ in 0..token.length {
                    out.push(letter);
                }
            }
            None => out.push_str(&token.value),
        }
    }
    out
}

/// Compact structural signature: one class letter per token; delimiters and
/// literals still contribute their raw value. `"ACC-00123"` yields `"U-D"`.
pub fn compact_signature(text: &str) -> String {
    let mut out = String::new();
    for token in tokenize(text) {
        match token.kind.letter() {
            Some(letter) => out.push(letter),
            None => out.push_str(&token.value),
        }
    }
    out
}

/// Delimiter skeleton: one class letter per character-class run, `_` for
/// whitespace runs, the raw value for delimiters, and `X` for opaque literal
/// runs. Clustering groups values by this string, so runs of different
/// classes (an uppercase code versus a lowercase word) land in different
/// groups even when their delimiter layout agrees.
pub fn skeleton(text: &str) -> String {
    let mut out = String::new();
    for token in tokenize(text) {
        match token.kind {
            TokenKind::Delimiter => out.push_str(&token.value),
            TokenKind::Literal => out.push('X'),
            kind => out.push(kind.letter().unwrap_or('X')),
        }
    }
    out
}
