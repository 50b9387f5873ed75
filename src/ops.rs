//! Operator overloading for building expression trees in code
//!
//! Each operator builds the corresponding registry operation without any
//! simplification: `x + 0.0` stays a `+` node.

use crate::Expr;
use crate::functions::definitions::{ADD_OP, DIVIDE_OP, MULTIPLY_OP, NEGATE_OP, SUBTRACT_OP};
use std::ops::{Add, Div, Mul, Neg, Sub};

macro_rules! impl_binary_ops {
    ($trait:ident, $method:ident, $op:ident) => {
        impl $trait<Expr> for Expr {
            type Output = Expr;

            fn $method(self, rhs: Expr) -> Expr {
                $op.build(vec![self, rhs])
            }
        }

        impl $trait<&Expr> for &Expr {
            type Output = Expr;

            fn $method(self, rhs: &Expr) -> Expr {
                $op.build(vec![self.clone(), rhs.clone()])
            }
        }

        impl $trait<f64> for Expr {
            type Output = Expr;

            fn $method(self, rhs: f64) -> Expr {
                $op.build(vec![self, Expr::constant(rhs)])
            }
        }

        impl $trait<Expr> for f64 {
            type Output = Expr;

            fn $method(self, rhs: Expr) -> Expr {
                $op.build(vec![Expr::constant(self), rhs])
            }
        }
    };
}

impl_binary_ops!(Add, add, ADD_OP);
impl_binary_ops!(Sub, sub, SUBTRACT_OP);
impl_binary_ops!(Mul, mul, MULTIPLY_OP);
impl_binary_ops!(Div, div, DIVIDE_OP);

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        NEGATE_OP.build(vec![self])
    }
}

impl Neg for &Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        NEGATE_OP.build(vec![self.clone()])
    }
}
