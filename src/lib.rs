//! Prefix/Postfix Expression Library
//!
//! Parses fully parenthesized arithmetic expressions over the variables
//! x, y, z, evaluates them, and differentiates them symbolically.
//!
//! # Features
//! - Prefix `(+ x (* 2 y))` and postfix `(x (2 y *) +)` notations
//! - Parse errors that carry the 1-based position and a source excerpt
//! - Variadic operations (`sumexp`, `lse`) and fixed-arity families
//!   (`sumsq2`..`sumsq5`, `distance2`..`distance5`)
//! - Chain-rule differentiation memoized per node
//!
//! # Usage Examples
//!
//! ```
//! use exprdiff::{parse_postfix, parse_prefix};
//!
//! let e = parse_prefix("(+ x (* 2 y))").unwrap();
//! assert_eq!(e.evaluate(3.0, 4.0, 0.0), 11.0);
//! assert_eq!(e.postfix(), "(x (2 y *) +)");
//!
//! let d = parse_postfix("(x y distance2)").unwrap().diff("x");
//! assert_eq!(d.evaluate(3.0, 4.0, 0.0), 0.6);
//! ```
//!
//! No simplification is ever applied: derivatives keep every chain-rule
//! term, and evaluation follows IEEE semantics (division by zero gives an
//! infinity or NaN, never an error).

mod ast;
mod builder;
mod differentiation;
mod display;
mod error;
pub mod functions;
mod helpers;
mod ops;
mod parser;
pub mod visitor;

#[cfg(test)]
mod tests;

// Re-export key types for easier usage
pub use ast::{Expr, ExprKind, Operation, VARIABLE_NAMES, Variable};
pub use builder::{Notation, Parse};
pub use error::{DEFAULT_CONTEXT_WIDTH, ErrorContext, ExprError, ParseError, ParseErrorKind};
pub use functions::{Arity, Operator, Registry};
pub use helpers::{evaluate_str, gradient};

/// Parse an expression in prefix notation, e.g. `(+ x (* 2 y))`
///
/// # Errors
/// Returns `ParseError` if:
/// - The input is empty
/// - A token is neither a variable, a number, nor `(`
/// - `(` is not followed by a known operation sign
/// - A fixed-arity operation gets too few operands
/// - A `)` is missing, or tokens remain after the expression
pub fn parse_prefix(formula: &str) -> Result<Expr, ParseError> {
    Parse::new().notation(Notation::Prefix).parse_str(formula)
}

/// Parse an expression in postfix notation, e.g. `(x (2 y *) +)`
///
/// The token right before each `)` is the group's operation sign.
pub fn parse_postfix(formula: &str) -> Result<Expr, ParseError> {
    Parse::new().notation(Notation::Postfix).parse_str(formula)
}

/// Prefix parsing from raw bytes; fails with [`ParseErrorKind::NotText`]
/// unless the bytes are UTF-8
pub fn parse_prefix_bytes(formula: &[u8]) -> Result<Expr, ParseError> {
    Parse::new().notation(Notation::Prefix).parse_bytes(formula)
}

/// Postfix parsing from raw bytes; fails with [`ParseErrorKind::NotText`]
/// unless the bytes are UTF-8
pub fn parse_postfix_bytes(formula: &[u8]) -> Result<Expr, ParseError> {
    Parse::new().notation(Notation::Postfix).parse_bytes(formula)
}
