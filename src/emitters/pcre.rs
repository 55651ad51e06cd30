//! PCRE Emitter - Generate PCRE-compatible regex text from pattern ASTs
//!
//! This module lowers the pattern AST into PCRE-compatible regex strings.
//! The lowering is deterministic: equal patterns always produce identical
//! text. Escaping is implemented locally over the PCRE metacharacter set so
//! the emitted dialect does not depend on host-library escape semantics.
//!
//! Anchoring is the matcher's job: `emit` never wraps the pattern in `^…$`.

use crate::core::pattern::{Bound, ClassKind, Pattern};

/// Emitter that generates PCRE-compatible regex text from a pattern AST.
pub struct PcreEmitter;

impl PcreEmitter {
    pub fn new() -> Self {
        PcreEmitter
    }

    /// Emit regex text for a pattern.
    pub fn emit(&self, pattern: &Pattern) -> String {
        match pattern {
            Pattern::Literal(lit) => self.emit_literal(&lit.value),
            Pattern::Class(class) => {
                format!(
                    "{}{}",
                    self.class_text(class.kind),
                    self.quantifier(class.min, class.max)
                )
            }
            Pattern::Enum(e) => match e.values.as_slice() {
                [single] => self.emit_literal(single),
                values => {
                    let branches: Vec<String> =
                        values.iter().map(|v| self.emit_literal(v)).collect();
                    format!("({})", branches.join("|"))
                }
            },
            Pattern::Seq(seq) => seq
                .parts
                .iter()
                .map(|p| self.emit(p))
                .collect::<Vec<_>>()
                .join(""),
            Pattern::Optional(opt) => {
                let body = self.emit(&opt.inner);
                // A sequence needs a group so `?` binds the whole body; a
                // multi-value enum already emits its own group.
                match opt.inner.as_ref() {
                    Pattern::Seq(_) => format!("({})?", body),
                    _ => format!("{}?", body),
                }
            }
            Pattern::Any(any) => format!(".{}", self.quantifier(any.min, any.max)),
        }
    }

    /// Class text for a character-class kind.
    fn class_text(&self, kind: ClassKind) -> &'static str {
        match kind {
            ClassKind::Digit => "\\d",
            ClassKind::Upper => "[A-Z]",
            ClassKind::Lower => "[a-z]",
            ClassKind::Alpha => "[a-zA-Z]",
            ClassKind::Alnum => "[a-zA-Z0-9]",
            ClassKind::Word => "\\w",
            ClassKind::Any => ".",
        }
    }

    /// Lower repetition bounds to a quantifier suffix.
    fn quantifier(&self, min: u32, max: Bound) -> String {
        match (min, max) {
            (1, Bound::Finite(1)) => String::new(),
            (0, Bound::Finite(1)) => "?".to_string(),
            (0, Bound::Inf) => "*".to_string(),
            (1, Bound::Inf) => "+".to_string(),
            (n, Bound::Finite(m)) if n == m => format!("{{{}}}", n),
            (n, Bound::Inf) => format!("{{{},}}", n),
            (n, Bound::Finite(m)) => format!("{{{},{}}}", n, m),
        }
    }

    /// Escape a literal string for PCRE.
    fn emit_literal(&self, s: &str) -> String {
        let mut result = String::new();
        for ch in s.chars() {
            result.push_str(&self.escape_char(ch));
        }
        result
    }

    /// Escape a single character for pattern context.
    fn escape_char(&self, ch: char) -> String {
        match ch {
            '.' | '*' | '+' | '?' | '^' | '$' | '|' | '(' | ')' | '[' | ']' | '{' | '}'
            | '\\' | '-' => {
                format!("\\{}", ch)
            }
            '\n' => "\\n".to_string(),
            '\r' => "\\r".to_string(),
            '\t' => "\\t".to_string(),
            '\u{000C}' => "\\f".to_string(),
            '\u{000B}' => "\\v".to_string(),
            _ => ch.to_string(),
        }
    }
}

impl Default for PcreEmitter {
    fn default() -> Self {
        Self::new()
    }
}
