use crate::Expr;
use rustc_hash::FxHashMap;
use std::borrow::Cow;
use std::fmt;
use std::sync::OnceLock;

/// Number of operands an operation accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Fixed(usize),
    Variadic,
}

impl Arity {
    /// Whether another operand may still be consumed after `count` operands
    pub fn has_room(&self, count: usize) -> bool {
        match self {
            Arity::Fixed(n) => count < *n,
            Arity::Variadic => true,
        }
    }

    /// Whether exactly `count` operands is a complete operand list
    pub fn accepts(&self, count: usize) -> bool {
        match self {
            Arity::Fixed(n) => count == *n,
            Arity::Variadic => true,
        }
    }

    pub fn fixed(&self) -> Option<usize> {
        match self {
            Arity::Fixed(n) => Some(*n),
            Arity::Variadic => None,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Fixed(n) => write!(f, "{}", n),
            Arity::Variadic => write!(f, "any"),
        }
    }
}

/// How an operation's derivative is obtained
#[derive(Clone, Copy)]
pub(crate) enum DerivativeRule {
    /// ∂f/∂operand_i for every operand; the engine applies the chain rule
    Partials(fn(&[Expr]) -> Vec<Expr>),
    /// Closed form taking (the operands, the variable)
    Direct(fn(&[Expr], &str) -> Expr),
}

/// Evaluation and differentiation logic shared by every operator of one kind
#[derive(Clone, Copy)]
pub(crate) struct OperationDefinition {
    /// Sign of the base operation (family members append their arity)
    pub name: &'static str,

    pub arity: Arity,

    /// Numerical evaluation over operand values
    pub eval: fn(&[f64]) -> f64,

    pub derivative: DerivativeRule,
}

impl fmt::Debug for OperationDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationDefinition")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// A concrete operation sign bound to its arity and definition
///
/// Family members such as `sumsq3` share the definition of the variadic
/// `sumsq` and only differ in sign and fixed arity.
#[derive(Debug, Clone)]
pub struct Operator {
    sign: Cow<'static, str>,
    arity: Arity,
    def: &'static OperationDefinition,
}

impl Operator {
    pub(crate) const fn new(def: &'static OperationDefinition) -> Self {
        Operator {
            sign: Cow::Borrowed(def.name),
            arity: def.arity,
            def,
        }
    }

    /// Bind a fixed arity onto a variadic definition, suffixing the sign with it
    pub(crate) fn with_arity(def: &'static OperationDefinition, n: usize) -> Self {
        Operator {
            sign: Cow::Owned(format!("{}{}", def.name, n)),
            arity: Arity::Fixed(n),
            def,
        }
    }

    pub fn sign(&self) -> &str {
        &self.sign
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub(crate) fn definition(&self) -> &'static OperationDefinition {
        self.def
    }

    /// Evaluate the operation on already computed operand values
    pub(crate) fn apply(&self, values: &[f64]) -> f64 {
        (self.def.eval)(values)
    }

    /// Construction rule: wrap the operands into a new operation node
    ///
    /// The operand count is not checked against the arity; outside the crate
    /// operations are built through the checked [`Expr::operation`].
    pub(crate) fn build(&'static self, operands: Vec<Expr>) -> Expr {
        Expr::from_operator(self, operands)
    }
}

/// Fixed arities bound onto the variadic families
const FAMILY_ARITIES: std::ops::RangeInclusive<usize> = 2..=5;

/// Static registry storing every parseable operator by sign
static REGISTRY: OnceLock<FxHashMap<String, Operator>> = OnceLock::new();

fn init_registry() -> FxHashMap<String, Operator> {
    use super::definitions as defs;

    let mut map = FxHashMap::default();

    for def in [
        &defs::ADD,
        &defs::SUBTRACT,
        &defs::MULTIPLY,
        &defs::DIVIDE,
        &defs::NEGATE,
        &defs::SUMEXP,
        &defs::LSE,
    ] {
        map.insert(def.name.to_string(), Operator::new(def));
    }

    for def in [&defs::SUMSQ, &defs::DISTANCE] {
        for n in FAMILY_ARITIES {
            let op = Operator::with_arity(def, n);
            map.insert(op.sign().to_string(), op);
        }
    }

    log::trace!("operation registry initialised with {} signs", map.len());
    map
}

/// Central registry mapping operation signs to operators
pub struct Registry;

impl Registry {
    /// Look up an operator by its sign - O(1) HashMap lookup
    pub fn get(sign: &str) -> Option<&'static Operator> {
        REGISTRY.get_or_init(init_registry).get(sign)
    }

    /// Every sign the parsers accept, sorted
    pub fn signs() -> Vec<&'static str> {
        let mut signs: Vec<&'static str> = REGISTRY
            .get_or_init(init_registry)
            .keys()
            .map(String::as_str)
            .collect();
        signs.sort_unstable();
        signs
    }
}
