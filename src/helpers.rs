//! Multi-variable differentiation helpers
//!
//! Provides gradient computation and one-shot string evaluation.

use crate::ast::VARIABLE_NAMES;
use crate::{Expr, Notation, Parse, ParseError};

/// Compute the gradient [∂f/∂x, ∂f/∂y, ∂f/∂z]
///
/// # Example
/// ```
/// use exprdiff::{gradient, parse_prefix};
///
/// let e = parse_prefix("(sumsq3 x y z)").unwrap();
/// let [dx, dy, dz] = gradient(&e);
/// assert_eq!(dx.evaluate(1.0, 2.0, 3.0), 2.0);
/// assert_eq!(dy.evaluate(1.0, 2.0, 3.0), 4.0);
/// assert_eq!(dz.evaluate(1.0, 2.0, 3.0), 6.0);
/// ```
pub fn gradient(expr: &Expr) -> [Expr; 3] {
    VARIABLE_NAMES.map(|var| expr.diff(var))
}

/// Parse `formula` in the given notation and evaluate it at `[x, y, z]`
pub fn evaluate_str(formula: &str, notation: Notation, values: [f64; 3]) -> Result<f64, ParseError> {
    let expr = Parse::new().notation(notation).parse_str(formula)?;
    Ok(expr.evaluate_at(&values))
}
