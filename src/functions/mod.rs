//! Operation registry
//!
//! Single source of truth for every operation sign, its arity, evaluation,
//! and derivative rule.

use crate::Expr;

pub(crate) mod definitions;
pub(crate) mod registry;

pub use registry::{Arity, Operator, Registry};

// ===== Helper functions for building derivative expressions =====

pub(crate) fn add(a: Expr, b: Expr) -> Expr {
    definitions::ADD_OP.build(vec![a, b])
}

pub(crate) fn mul(a: Expr, b: Expr) -> Expr {
    definitions::MULTIPLY_OP.build(vec![a, b])
}

pub(crate) fn div(a: Expr, b: Expr) -> Expr {
    definitions::DIVIDE_OP.build(vec![a, b])
}

pub(crate) fn negate(a: Expr) -> Expr {
    definitions::NEGATE_OP.build(vec![a])
}
