use std::fmt;
use thiserror::Error;

/// Default number of characters shown on each side of an error position
pub const DEFAULT_CONTEXT_WIDTH: usize = 20;

/// Excerpt of the source text surrounding an error position
///
/// `before` holds up to `width` characters preceding the offending token,
/// `after` holds up to `width` characters starting at it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorContext {
    pub before: String,
    pub after: String,
}

impl ErrorContext {
    /// Cut a window around the 1-based character `position` of `source`
    pub fn around(source: &str, position: usize, width: usize) -> Self {
        let at = position.saturating_sub(1);
        let before_start = at.saturating_sub(width);
        ErrorContext {
            before: source.chars().skip(before_start).take(at - before_start).collect(),
            after: source.chars().skip(at).take(width).collect(),
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} HERE -->{}", self.before, self.after)
    }
}

/// What went wrong while parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    // Input validation errors
    #[error("the expression must be text")]
    NotText,
    #[error("the expression is empty")]
    EmptyInput,

    // Structural errors
    #[error("Unexpected token: '{token}'")]
    UnexpectedToken { token: String },
    #[error("')' expected, got '{got}'")]
    MissingClosingParen { got: String },
    #[error("end of expression expected, got '{token}'")]
    TrailingTokens { token: String },

    // Semantic errors
    #[error("operation expected, got '{token}'")]
    OperationExpected { token: String },
    #[error("invalid number of operands for '{sign}': expected {expected}, got {got}")]
    ArityMismatch {
        sign: String,
        expected: usize,
        got: usize,
    },

    // Safety limits
    #[error("expression nesting depth exceeds the limit of {limit}")]
    MaxDepthExceeded { limit: usize },
}

/// A parse failure pinned to a source position
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{position}: {kind} {context}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// 1-based character position of the offending token
    pub position: usize,
    pub context: ErrorContext,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, source: &str, position: usize, width: usize) -> Self {
        ParseError {
            kind,
            position,
            context: ErrorContext::around(source, position, width),
        }
    }

    /// Input was bytes that do not form valid UTF-8
    pub(crate) fn not_text(bytes: &[u8], err: std::str::Utf8Error, width: usize) -> Self {
        let lossy = String::from_utf8_lossy(bytes);
        let valid = String::from_utf8_lossy(&bytes[..err.valid_up_to()]);
        ParseError::new(ParseErrorKind::NotText, &lossy, valid.chars().count() + 1, width)
    }
}

/// Errors raised when building expression trees directly (not by parsing)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExprError {
    #[error("unknown variable '{0}', expected one of x, y, z")]
    UnknownVariable(String),
    #[error("unknown operation '{0}'")]
    UnknownOperation(String),
    #[error("operation '{sign}' takes {expected} operands, got {got}")]
    ArityMismatch {
        sign: String,
        expected: usize,
        got: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_window_clamps_at_edges() {
        let ctx = ErrorContext::around("(+ x 1", 7, 20);
        assert_eq!(ctx.before, "(+ x 1");
        assert_eq!(ctx.after, "");

        let ctx = ErrorContext::around("abc", 1, 20);
        assert_eq!(ctx.before, "");
        assert_eq!(ctx.after, "abc");
    }

    #[test]
    fn test_context_window_is_bounded() {
        let source = "a".repeat(30) + "X" + &"b".repeat(30);
        let ctx = ErrorContext::around(&source, 31, 20);
        assert_eq!(ctx.before, "a".repeat(20));
        assert_eq!(ctx.after, format!("X{}", "b".repeat(19)));
    }

    #[test]
    fn test_context_counts_characters_not_bytes() {
        let ctx = ErrorContext::around("ππ x", 4, 2);
        assert_eq!(ctx.before, "π ");
        assert_eq!(ctx.after, "x");
    }

    #[test]
    fn test_error_display() {
        let err = ParseError::new(
            ParseErrorKind::MissingClosingParen { got: String::new() },
            "(+ x 1",
            7,
            DEFAULT_CONTEXT_WIDTH,
        );
        assert_eq!(err.to_string(), "7: ')' expected, got '' (+ x 1 HERE -->");
    }

    #[test]
    fn test_not_text_position() {
        let bytes = b"(+ x \xff)";
        let err = std::str::from_utf8(bytes).unwrap_err();
        let parse_err = ParseError::not_text(bytes, err, DEFAULT_CONTEXT_WIDTH);
        assert_eq!(parse_err.kind, ParseErrorKind::NotText);
        assert_eq!(parse_err.position, 6);
    }
}
