//! Operation definitions for the registry
//!
//! Contains evaluation and symbolic differentiation rules for all supported
//! operations. Partial derivatives are expressed with fresh nodes that may
//! reference the operation's own operands.

use super::registry::{Arity, DerivativeRule, OperationDefinition, Operator};
use super::{div, mul, negate};
use crate::Expr;

// Arithmetic

pub(crate) static ADD: OperationDefinition = OperationDefinition {
    name: "+",
    arity: Arity::Fixed(2),
    eval: |args| args[0] + args[1],
    derivative: DerivativeRule::Partials(|_| vec![Expr::one(), Expr::one()]),
};

pub(crate) static SUBTRACT: OperationDefinition = OperationDefinition {
    name: "-",
    arity: Arity::Fixed(2),
    eval: |args| args[0] - args[1],
    derivative: DerivativeRule::Partials(|_| vec![Expr::one(), Expr::neg_one()]),
};

pub(crate) static MULTIPLY: OperationDefinition = OperationDefinition {
    name: "*",
    arity: Arity::Fixed(2),
    eval: |args| args[0] * args[1],
    // d(ab)/da = b, d(ab)/db = a
    derivative: DerivativeRule::Partials(|args| vec![args[1].clone(), args[0].clone()]),
};

pub(crate) static DIVIDE: OperationDefinition = OperationDefinition {
    name: "/",
    arity: Arity::Fixed(2),
    eval: |args| args[0] / args[1],
    derivative: DerivativeRule::Partials(|args| {
        // d(a/b)/da = 1/b, d(a/b)/db = -a/(b*b)
        let (a, b) = (&args[0], &args[1]);
        vec![
            div(Expr::one(), b.clone()),
            div(negate(a.clone()), mul(b.clone(), b.clone())),
        ]
    }),
};

pub(crate) static NEGATE: OperationDefinition = OperationDefinition {
    name: "negate",
    arity: Arity::Fixed(1),
    eval: |args| -args[0],
    derivative: DerivativeRule::Partials(|_| vec![Expr::neg_one()]),
};

// Families (fixed arities 2..=5 are bound in the registry)

pub(crate) static SUMSQ: OperationDefinition = OperationDefinition {
    name: "sumsq",
    arity: Arity::Variadic,
    eval: sum_of_squares,
    // d(x0² + x1² + ...)/dxi = 2*xi
    derivative: DerivativeRule::Partials(|args| {
        args.iter().map(|arg| mul(Expr::two(), arg.clone())).collect()
    }),
};

pub(crate) static DISTANCE: OperationDefinition = OperationDefinition {
    name: "distance",
    arity: Arity::Variadic,
    eval: |args| sum_of_squares(args).sqrt(),
    // d sqrt(S)/dt = (dS/dt) / (2 * sqrt(S)), S = x0² + x1² + ...
    // sqrt(S) is a fresh node: the derivative is cached inside the
    // differentiated node and must not hold it alive.
    derivative: DerivativeRule::Direct(|args, var| {
        let sumsq = SUMSQ_OP.build(args.to_vec());
        div(sumsq.diff(var), mul(Expr::two(), DISTANCE_OP.build(args.to_vec())))
    }),
};

// Exponential sums

pub(crate) static SUMEXP: OperationDefinition = OperationDefinition {
    name: "sumexp",
    arity: Arity::Variadic,
    eval: sum_of_exponentials,
    // d(e^x0 + e^x1 + ...)/dxi = e^xi, written as a one-operand sumexp
    derivative: DerivativeRule::Partials(|args| {
        args.iter()
            .map(|arg| SUMEXP_OP.build(vec![arg.clone()]))
            .collect()
    }),
};

pub(crate) static LSE: OperationDefinition = OperationDefinition {
    name: "lse",
    arity: Arity::Variadic,
    eval: |args| sum_of_exponentials(args).ln(),
    // d ln(E)/dt = (dE/dt) / E, E = e^x0 + e^x1 + ...
    derivative: DerivativeRule::Direct(|args, var| {
        let numerator = SUMEXP_OP.build(args.to_vec()).diff(var);
        div(numerator, SUMEXP_OP.build(args.to_vec()))
    }),
};

fn sum_of_squares(args: &[f64]) -> f64 {
    args.iter().fold(0.0, |acc, x| acc + x * x)
}

fn sum_of_exponentials(args: &[f64]) -> f64 {
    args.iter().fold(0.0, |acc, x| acc + x.exp())
}

// Operators used when building derivative trees

pub(crate) static ADD_OP: Operator = Operator::new(&ADD);
pub(crate) static SUBTRACT_OP: Operator = Operator::new(&SUBTRACT);
pub(crate) static MULTIPLY_OP: Operator = Operator::new(&MULTIPLY);
pub(crate) static DIVIDE_OP: Operator = Operator::new(&DIVIDE);
pub(crate) static NEGATE_OP: Operator = Operator::new(&NEGATE);
pub(crate) static SUMSQ_OP: Operator = Operator::new(&SUMSQ);
pub(crate) static DISTANCE_OP: Operator = Operator::new(&DISTANCE);
pub(crate) static SUMEXP_OP: Operator = Operator::new(&SUMEXP);
