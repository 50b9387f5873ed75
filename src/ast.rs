//! Expression tree for arithmetic over the variables x, y, z

use std::ops::Deref;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use rustc_hash::FxHashMap;

use crate::ExprError;
use crate::functions::{Operator, Registry};

/// Names of the variables, in the order they are bound by [`Expr::evaluate`]
pub const VARIABLE_NAMES: [&str; 3] = ["x", "y", "z"];

/// Handle to an immutable expression node
///
/// Cloning is cheap and shares the node, including its derivative cache.
#[derive(Clone)]
pub struct Expr(Arc<ExprKind>);

impl Deref for Expr {
    type Target = ExprKind;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Debug)]
pub enum ExprKind {
    /// Constant number (e.g., 2, -1.5, 1e10)
    Constant(f64),

    /// One of x, y, z
    Variable(Variable),

    /// Operation applied to an ordered list of operands
    Operation(Operation),
}

/// Position of a variable in [`VARIABLE_NAMES`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Variable {
    index: usize,
}

impl Variable {
    pub fn from_name(name: &str) -> Option<Self> {
        VARIABLE_NAMES
            .iter()
            .position(|v| *v == name)
            .map(|index| Variable { index })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &'static str {
        VARIABLE_NAMES[self.index]
    }
}

/// Operation node: an operator, its operands, and lazily filled caches
pub struct Operation {
    op: &'static Operator,
    operands: Vec<Expr>,
    /// ∂f/∂operand_i, shared by derivatives with respect to every variable
    pub(crate) partials: OnceLock<Vec<Expr>>,
    /// Derivative by variable name, local to this node
    pub(crate) derivatives: Mutex<FxHashMap<String, Expr>>,
}

impl Operation {
    pub fn operator(&self) -> &'static Operator {
        self.op
    }

    pub fn sign(&self) -> &'static str {
        self.op.sign()
    }

    pub fn operands(&self) -> &[Expr] {
        &self.operands
    }

    pub(crate) fn cached_derivative(&self, var: &str) -> Option<Expr> {
        self.derivatives
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(var)
            .cloned()
    }

    /// Store a derivative, keeping whichever was stored first
    pub(crate) fn store_derivative(&self, var: &str, derivative: Expr) -> Expr {
        self.derivatives
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(var.to_string())
            .or_insert(derivative)
            .clone()
    }
}

impl std::fmt::Debug for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Operation")
            .field("sign", &self.sign())
            .field("operands", &self.operands)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&*self.0, f)
    }
}

// Structural equality; caches do not take part
impl PartialEq for ExprKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ExprKind::Constant(a), ExprKind::Constant(b)) => a == b,
            (ExprKind::Variable(a), ExprKind::Variable(b)) => a == b,
            (ExprKind::Operation(a), ExprKind::Operation(b)) => {
                a.sign() == b.sign() && a.operands == b.operands
            }
            _ => false,
        }
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || *self.0 == *other.0
    }
}

macro_rules! shared_constant {
    ($(#[$doc:meta])* $name:ident, $value:expr) => {
        $(#[$doc])*
        pub fn $name() -> Expr {
            static CELL: OnceLock<Expr> = OnceLock::new();
            CELL.get_or_init(|| Expr::new(ExprKind::Constant($value)))
                .clone()
        }
    };
}

impl Expr {
    fn new(kind: ExprKind) -> Self {
        Expr(Arc::new(kind))
    }

    pub fn kind(&self) -> &ExprKind {
        &self.0
    }

    // Convenience constructors

    /// Create a constant expression
    pub fn constant(value: f64) -> Self {
        Expr::new(ExprKind::Constant(value))
    }

    /// Create a variable expression; only x, y and z are accepted
    pub fn variable(name: &str) -> Result<Self, ExprError> {
        Variable::from_name(name)
            .map(Expr::from)
            .ok_or_else(|| ExprError::UnknownVariable(name.to_string()))
    }

    /// Create an operation from a registered sign, checking the operand count
    ///
    /// # Example
    /// ```
    /// use exprdiff::Expr;
    ///
    /// let x = Expr::variable("x").unwrap();
    /// let e = Expr::operation("sumsq2", vec![x, Expr::constant(4.0)]).unwrap();
    /// assert_eq!(e.evaluate(3.0, 0.0, 0.0), 25.0);
    /// ```
    pub fn operation(sign: &str, operands: Vec<Expr>) -> Result<Self, ExprError> {
        let op = Registry::get(sign)
            .ok_or_else(|| ExprError::UnknownOperation(sign.to_string()))?;
        if let Some(expected) = op.arity().fixed()
            && expected != operands.len()
        {
            return Err(ExprError::ArityMismatch {
                sign: sign.to_string(),
                expected,
                got: operands.len(),
            });
        }
        Ok(op.build(operands))
    }

    pub(crate) fn from_operator(op: &'static Operator, operands: Vec<Expr>) -> Self {
        Expr::new(ExprKind::Operation(Operation {
            op,
            operands,
            partials: OnceLock::new(),
            derivatives: Mutex::new(FxHashMap::default()),
        }))
    }

    shared_constant!(
        /// Shared constant 0
        zero,
        0.0
    );
    shared_constant!(
        /// Shared constant 1
        one,
        1.0
    );
    shared_constant!(
        /// Shared constant -1
        neg_one,
        -1.0
    );
    shared_constant!(
        /// Shared constant 2
        two,
        2.0
    );

    // Accessor methods

    pub fn as_constant(&self) -> Option<f64> {
        match self.kind() {
            ExprKind::Constant(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_operation(&self) -> Option<&Operation> {
        match self.kind() {
            ExprKind::Operation(op) => Some(op),
            _ => None,
        }
    }

    /// Whether both handles point at the very same node
    pub fn ptr_eq(&self, other: &Expr) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Evaluate with x, y, z bound positionally
    ///
    /// No validation happens here: division by zero and similar cases yield
    /// IEEE infinities or NaN.
    pub fn evaluate(&self, x: f64, y: f64, z: f64) -> f64 {
        self.evaluate_at(&[x, y, z])
    }

    pub fn evaluate_at(&self, values: &[f64; 3]) -> f64 {
        match self.kind() {
            ExprKind::Constant(n) => *n,
            ExprKind::Variable(v) => values[v.index],
            ExprKind::Operation(op) => {
                let args: Vec<f64> = op.operands.iter().map(|e| e.evaluate_at(values)).collect();
                op.op.apply(&args)
            }
        }
    }

    /// Number of nodes when the tree is fully unfolded
    pub fn node_count(&self) -> usize {
        let mut counter = crate::visitor::NodeCounter::default();
        crate::visitor::walk_expr(self, &mut counter);
        counter.count
    }
}

#[cfg(test)]
impl Expr {
    /// Weak handle to the node, for checking that trees get freed
    pub(crate) fn downgrade(&self) -> std::sync::Weak<ExprKind> {
        Arc::downgrade(&self.0)
    }
}

impl From<Variable> for Expr {
    fn from(v: Variable) -> Self {
        Expr::new(ExprKind::Variable(v))
    }
}

impl From<f64> for Expr {
    fn from(n: f64) -> Self {
        Expr::constant(n)
    }
}
