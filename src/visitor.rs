//! Expression visitor pattern for tree traversal
//!
//! Provides a clean interface for walking the expression tree without
//! manually handling the recursive structure.

use crate::{Expr, ExprKind};

/// Trait for visiting expression nodes
///
/// Each method returns a boolean indicating whether to continue visiting
/// children.
///
/// # Example
/// ```
/// use exprdiff::visitor::{ExprVisitor, walk_expr};
/// use exprdiff::{Expr, parse_prefix};
///
/// struct Signs(Vec<String>);
///
/// impl ExprVisitor for Signs {
///     fn visit_constant(&mut self, _n: f64) -> bool { true }
///     fn visit_variable(&mut self, _name: &str) -> bool { true }
///     fn visit_operation(&mut self, sign: &str, _operands: &[Expr]) -> bool {
///         self.0.push(sign.to_string());
///         true
///     }
/// }
///
/// let mut signs = Signs(Vec::new());
/// walk_expr(&parse_prefix("(+ x (* 2 y))").unwrap(), &mut signs);
/// assert_eq!(signs.0, ["+", "*"]);
/// ```
pub trait ExprVisitor {
    /// Visit a constant, returns true to continue visiting
    fn visit_constant(&mut self, n: f64) -> bool;

    /// Visit a variable, returns true to continue visiting
    fn visit_variable(&mut self, name: &str) -> bool;

    /// Visit an operation, returns true to visit its operands
    fn visit_operation(&mut self, sign: &str, operands: &[Expr]) -> bool;
}

/// Walk an expression tree with a visitor
///
/// Visits nodes in pre-order (parent before children). Shared subtrees are
/// visited once per reference.
pub fn walk_expr<V: ExprVisitor>(expr: &Expr, visitor: &mut V) {
    match expr.kind() {
        ExprKind::Constant(n) => {
            visitor.visit_constant(*n);
        }
        ExprKind::Variable(v) => {
            visitor.visit_variable(v.name());
        }
        ExprKind::Operation(op) => {
            if visitor.visit_operation(op.sign(), op.operands()) {
                for operand in op.operands() {
                    walk_expr(operand, visitor);
                }
            }
        }
    }
}

/// Counts every visited node
#[derive(Debug, Default)]
pub struct NodeCounter {
    pub count: usize,
}

impl ExprVisitor for NodeCounter {
    fn visit_constant(&mut self, _n: f64) -> bool {
        self.count += 1;
        true
    }

    fn visit_variable(&mut self, _name: &str) -> bool {
        self.count += 1;
        true
    }

    fn visit_operation(&mut self, _sign: &str, _operands: &[Expr]) -> bool {
        self.count += 1;
        true
    }
}
