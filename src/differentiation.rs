// Differentiation engine - applies the multivariable chain rule
//
// No simplification happens here: every operand contributes a
// partial * derivative term even when either factor is a zero constant.
// Derivatives are memoized on the node they were requested from, so repeated
// requests for a shared subexpression return the same tree.

use crate::functions::registry::DerivativeRule;
use crate::functions::{add, mul};
use crate::{Expr, ExprKind};

impl Expr {
    /// Differentiate this expression with respect to a variable
    ///
    /// Names other than x, y, z are accepted and treated as a variable no
    /// leaf depends on.
    ///
    /// # Example
    /// ```
    /// use exprdiff::parse_prefix;
    ///
    /// let e = parse_prefix("(* x x)").unwrap();
    /// assert_eq!(e.diff("x").evaluate(3.0, 0.0, 0.0), 6.0);
    /// ```
    pub fn diff(&self, var: &str) -> Expr {
        match self.kind() {
            ExprKind::Constant(_) => Expr::zero(),

            ExprKind::Variable(v) => {
                if v.name() == var {
                    Expr::one()
                } else {
                    Expr::zero()
                }
            }

            ExprKind::Operation(op) => {
                if let Some(cached) = op.cached_derivative(var) {
                    log::trace!("derivative cache hit for '{}' by {}", op.sign(), var);
                    return cached;
                }
                log::trace!("differentiating '{}' by {}", op.sign(), var);

                let derivative = if op.operands().is_empty() {
                    Expr::zero()
                } else {
                    match op.operator().definition().derivative {
                        DerivativeRule::Direct(rule) => rule(op.operands(), var),
                        DerivativeRule::Partials(rule) => {
                            let partials = op.partials.get_or_init(|| rule(op.operands()));
                            chain_rule(partials, op.operands(), var)
                        }
                    }
                };

                op.store_derivative(var, derivative)
            }
        }
    }
}

/// df/dt = df/dx0 * dx0/dt + df/dx1 * dx1/dt + ..., summed left to right
fn chain_rule(partials: &[Expr], operands: &[Expr], var: &str) -> Expr {
    partials
        .iter()
        .zip(operands)
        .map(|(partial, operand)| mul(partial.clone(), operand.diff(var)))
        .reduce(add)
        .unwrap_or_else(Expr::zero)
}
