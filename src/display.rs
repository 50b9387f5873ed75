// Display formatting for expression trees
//
// Three renderings are supported:
// - `Display`: operands in evaluation order then the sign, no parentheses
// - `prefix()`: `(<sign> <operand> ...)`
// - `postfix()`: `(<operand> ... <sign>)`
// Leaves render the same way in all three.

use crate::{Expr, ExprKind};
use std::fmt::{self, Write};

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            ExprKind::Constant(n) => write!(f, "{}", n),
            ExprKind::Variable(v) => f.write_str(v.name()),
            ExprKind::Operation(op) => {
                for operand in op.operands() {
                    write!(f, "{} ", operand)?;
                }
                f.write_str(op.sign())
            }
        }
    }
}

impl Expr {
    /// Fully parenthesized prefix form, readable by [`crate::parse_prefix`]
    pub fn prefix(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.write_prefix(&mut out);
        out
    }

    /// Fully parenthesized postfix form, readable by [`crate::parse_postfix`]
    pub fn postfix(&self) -> String {
        let mut out = String::new();
        let _ = self.write_postfix(&mut out);
        out
    }

    fn write_prefix(&self, out: &mut String) -> fmt::Result {
        match self.kind() {
            ExprKind::Operation(op) => {
                write!(out, "({}", op.sign())?;
                for operand in op.operands() {
                    out.push(' ');
                    operand.write_prefix(out)?;
                }
                out.push(')');
                Ok(())
            }
            _ => write!(out, "{}", self),
        }
    }

    fn write_postfix(&self, out: &mut String) -> fmt::Result {
        match self.kind() {
            ExprKind::Operation(op) => {
                out.push('(');
                for operand in op.operands() {
                    operand.write_postfix(out)?;
                    out.push(' ');
                }
                write!(out, "{})", op.sign())
            }
            _ => write!(out, "{}", self),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Expr, parse_prefix};

    #[test]
    fn test_leaf_rendering() {
        let x = Expr::variable("x").unwrap();
        assert_eq!(x.to_string(), "x");
        assert_eq!(x.prefix(), "x");
        assert_eq!(x.postfix(), "x");

        let c = Expr::constant(2.5);
        assert_eq!(c.to_string(), "2.5");
        assert_eq!(Expr::constant(-1.0).prefix(), "-1");
        assert_eq!(Expr::constant(3.0).postfix(), "3");
    }

    #[test]
    fn test_three_renderings() {
        let e = parse_prefix("(+ x (* 2 y))").unwrap();
        assert_eq!(e.to_string(), "x 2 y * +");
        assert_eq!(e.prefix(), "(+ x (* 2 y))");
        assert_eq!(e.postfix(), "(x (2 y *) +)");
    }

    #[test]
    fn test_variadic_rendering() {
        let e = parse_prefix("(sumexp x (negate y) 1.5)").unwrap();
        assert_eq!(e.to_string(), "x y negate 1.5 sumexp");
        assert_eq!(e.prefix(), "(sumexp x (negate y) 1.5)");
        assert_eq!(e.postfix(), "(x (y negate) 1.5 sumexp)");

        let empty = parse_prefix("(lse)").unwrap();
        assert_eq!(empty.to_string(), "lse");
        assert_eq!(empty.prefix(), "(lse)");
        assert_eq!(empty.postfix(), "(lse)");
    }

    #[test]
    fn test_family_sign_suffix() {
        let e = parse_prefix("(distance4 x y z 1)").unwrap();
        assert_eq!(e.prefix(), "(distance4 x y z 1)");
        assert_eq!(e.to_string(), "x y z 1 distance4");
    }
}
