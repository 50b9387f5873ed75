//! Builder pattern API for parsing
//!
//! Provides a fluent interface for choosing the notation and error-reporting
//! options before parsing.
//!
//! # Example
//! ```
//! use exprdiff::{Notation, Parse};
//!
//! let expr = Parse::new()
//!     .notation(Notation::Postfix)
//!     .context_width(10)
//!     .parse_str("(x (2 y *) +)")
//!     .unwrap();
//! assert_eq!(expr.evaluate(3.0, 4.0, 0.0), 11.0);
//! ```

use crate::error::DEFAULT_CONTEXT_WIDTH;
use crate::parser::{Grammar, Parser, PostfixGrammar, PrefixGrammar};
use crate::{Expr, ParseError};
use std::fmt;

/// Where an operation's sign sits relative to its operands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Notation {
    /// `(<sign> <operand> ...)`
    #[default]
    Prefix,
    /// `(<operand> ... <sign>)`
    Postfix,
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notation::Prefix => write!(f, "prefix"),
            Notation::Postfix => write!(f, "postfix"),
        }
    }
}

/// Builder for parsing operations
#[derive(Debug, Clone)]
pub struct Parse {
    notation: Notation,
    context_width: usize,
    max_depth: Option<usize>,
}

impl Default for Parse {
    fn default() -> Self {
        Parse {
            notation: Notation::Prefix,
            context_width: DEFAULT_CONTEXT_WIDTH,
            max_depth: None,
        }
    }
}

impl Parse {
    /// Create a new parse builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notation(mut self, notation: Notation) -> Self {
        self.notation = notation;
        self
    }

    /// Characters of source shown on each side of an error position
    pub fn context_width(mut self, width: usize) -> Self {
        self.context_width = width;
        self
    }

    /// Reject inputs whose operations nest deeper than `depth`
    ///
    /// Unlimited by default; very deep inputs then recurse without bound.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Parse a complete expression from text
    pub fn parse_str(&self, source: &str) -> Result<Expr, ParseError> {
        let result = match self.notation {
            Notation::Prefix => self.run::<PrefixGrammar>(source),
            Notation::Postfix => self.run::<PostfixGrammar>(source),
        };

        match &result {
            Ok(expr) => log::debug!("parsed {} expression '{}'", self.notation, expr),
            Err(err) => log::debug!("{} parse of '{}' failed: {}", self.notation, source, err),
        }
        result
    }

    /// Parse from raw bytes, which must be UTF-8 text
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Expr, ParseError> {
        match std::str::from_utf8(bytes) {
            Ok(source) => self.parse_str(source),
            Err(err) => {
                let err = ParseError::not_text(bytes, err, self.context_width);
                log::debug!("{} parse rejected non-text input: {}", self.notation, err);
                Err(err)
            }
        }
    }

    fn run<G: Grammar>(&self, source: &str) -> Result<Expr, ParseError> {
        Parser::<G>::new(source, self.context_width, self.max_depth)?.parse_expression()
    }
}
