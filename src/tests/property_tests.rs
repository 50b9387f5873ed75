//! Property-Based and Fuzz Testing
//!
//! Uses quickcheck for property-based testing of:
//! - Parser robustness (fuzz testing)
//! - Prefix/postfix round trips
//! - Differentiation rules (linearity, product rule, finite differences)

use quickcheck::{Arbitrary, Gen, QuickCheck, TestResult};
use std::fmt;

use crate::{Expr, Registry, parse_postfix, parse_prefix};

const POINTS: [[f64; 3]; 5] = [
    [0.5, -0.25, 0.75],
    [-0.8, 0.3, 0.1],
    [0.2, 0.9, -0.6],
    [1.0, -1.0, 0.5],
    [-0.35, -0.7, 0.95],
];

// ============================================================
// PART 1: EXPRESSION GENERATORS FOR PROPERTY TESTS
// ============================================================

const ALL_SIGNS: [&str; 15] = [
    "+", "-", "*", "/", "negate", "sumsq2", "sumsq3", "sumsq4", "sumsq5", "distance2",
    "distance3", "distance4", "distance5", "sumexp", "lse",
];

/// Signs that are differentiable on bounded inputs (`distance` away from the origin)
const SMOOTH_SIGNS: [&str; 10] = [
    "+", "-", "*", "negate", "sumsq2", "sumsq3", "sumexp", "lse", "distance2", "distance3",
];

fn gen_leaf(g: &mut Gen) -> Expr {
    match u8::arbitrary(g) % 4 {
        0 => Expr::constant(f64::from(i8::arbitrary(g) % 8) / 2.0),
        choice => Expr::variable(["x", "y", "z"][usize::from(choice - 1)])
            .expect("x, y and z are variables"),
    }
}

fn gen_expr(g: &mut Gen, depth: usize, signs: &[&str]) -> Expr {
    if depth == 0 || u8::arbitrary(g) % 4 == 0 {
        return gen_leaf(g);
    }
    let sign = *g.choose(signs).expect("non-empty sign list");
    let op = Registry::get(sign).expect("registered sign");
    let count = op
        .arity()
        .fixed()
        .unwrap_or_else(|| usize::from(u8::arbitrary(g) % 4));
    let operands = (0..count).map(|_| gen_expr(g, depth - 1, signs)).collect();
    op.build(operands)
}

/// Any expression of the grammar
#[derive(Clone)]
struct AnyExpr(Expr);

impl Arbitrary for AnyExpr {
    fn arbitrary(g: &mut Gen) -> Self {
        AnyExpr(gen_expr(g, 4, &ALL_SIGNS))
    }
}

impl fmt::Debug for AnyExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.prefix())
    }
}

/// Expression built only from smooth operations, shallow enough to stay finite
#[derive(Clone)]
struct SmoothExpr(Expr);

impl Arbitrary for SmoothExpr {
    fn arbitrary(g: &mut Gen) -> Self {
        SmoothExpr(gen_expr(g, 3, &SMOOTH_SIGNS))
    }
}

impl fmt::Debug for SmoothExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.prefix())
    }
}

/// Equal values, counting NaN as equal to NaN
fn same_value(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

fn agree_everywhere(a: &Expr, b: impl Fn(f64, f64, f64) -> f64) -> bool {
    POINTS
        .iter()
        .all(|&[x, y, z]| same_value(a.evaluate(x, y, z), b(x, y, z)))
}

// ============================================================
// PART 2: PARSER FUZZ TESTS
// ============================================================

#[cfg(test)]
mod parser_fuzz_tests {
    use super::*;

    /// Property: Parser should never panic on arbitrary input
    #[test]
    fn test_parser_never_panics_on_random_input() {
        fn prop_parser_no_panic(input: String) -> TestResult {
            let _ = parse_prefix(&input);
            let _ = parse_postfix(&input);
            TestResult::passed()
        }
        QuickCheck::new()
            .tests(1000)
            .max_tests(2000)
            .quickcheck(prop_parser_no_panic as fn(String) -> TestResult);
    }

    /// Property: Random token soup from the vocabulary never panics either
    #[test]
    fn test_parser_never_panics_on_token_soup() {
        fn prop_token_soup(picks: Vec<u8>) -> TestResult {
            let vocabulary = ["(", ")", "x", "y", "1", "-2.5", "+", "negate", "lse", "sumsq2"];
            let source: Vec<&str> = picks
                .iter()
                .map(|p| vocabulary[usize::from(*p) % vocabulary.len()])
                .collect();
            let source = source.join(" ");
            let _ = parse_prefix(&source);
            let _ = parse_postfix(&source);
            TestResult::passed()
        }
        QuickCheck::new()
            .tests(1000)
            .quickcheck(prop_token_soup as fn(Vec<u8>) -> TestResult);
    }
}

// ============================================================
// PART 3: ROUND TRIPS
// ============================================================

#[cfg(test)]
mod round_trip_tests {
    use super::*;

    #[test]
    fn test_prefix_round_trip() {
        fn prop(e: AnyExpr) -> bool {
            let parsed = parse_prefix(&e.0.prefix()).expect("prefix output parses");
            parsed == e.0 && agree_everywhere(&parsed, |x, y, z| e.0.evaluate(x, y, z))
        }
        QuickCheck::new()
            .tests(300)
            .quickcheck(prop as fn(AnyExpr) -> bool);
    }

    #[test]
    fn test_postfix_round_trip() {
        fn prop(e: AnyExpr) -> bool {
            let parsed = parse_postfix(&e.0.postfix()).expect("postfix output parses");
            parsed == e.0 && agree_everywhere(&parsed, |x, y, z| e.0.evaluate(x, y, z))
        }
        QuickCheck::new()
            .tests(300)
            .quickcheck(prop as fn(AnyExpr) -> bool);
    }

    #[test]
    fn test_prefix_and_postfix_agree() {
        fn prop(e: AnyExpr) -> bool {
            let from_prefix = parse_prefix(&e.0.prefix()).expect("prefix output parses");
            let from_postfix = parse_postfix(&e.0.postfix()).expect("postfix output parses");
            from_prefix.to_string() == from_postfix.to_string()
        }
        QuickCheck::new()
            .tests(200)
            .quickcheck(prop as fn(AnyExpr) -> bool);
    }
}

// ============================================================
// PART 4: DIFFERENTIATION PROPERTIES
// ============================================================

#[cfg(test)]
mod derivative_property_tests {
    use super::*;

    #[test]
    fn test_linearity() {
        fn prop(a: AnyExpr, b: AnyExpr, v: u8) -> bool {
            let var = ["x", "y", "z"][usize::from(v % 3)];
            let sum = a.0.clone() + b.0.clone();
            let (da, db) = (a.0.diff(var), b.0.diff(var));
            agree_everywhere(&sum.diff(var), |x, y, z| {
                da.evaluate(x, y, z) + db.evaluate(x, y, z)
            })
        }
        QuickCheck::new()
            .tests(200)
            .quickcheck(prop as fn(AnyExpr, AnyExpr, u8) -> bool);
    }

    #[test]
    fn test_product_rule() {
        fn prop(a: AnyExpr, b: AnyExpr, v: u8) -> bool {
            let var = ["x", "y", "z"][usize::from(v % 3)];
            let product = a.0.clone() * b.0.clone();
            let (da, db) = (a.0.diff(var), b.0.diff(var));
            agree_everywhere(&product.diff(var), |x, y, z| {
                b.0.evaluate(x, y, z) * da.evaluate(x, y, z)
                    + a.0.evaluate(x, y, z) * db.evaluate(x, y, z)
            })
        }
        QuickCheck::new()
            .tests(200)
            .quickcheck(prop as fn(AnyExpr, AnyExpr, u8) -> bool);
    }

    #[test]
    fn test_matches_finite_differences() {
        fn prop(e: SmoothExpr, v: u8) -> TestResult {
            let axis = usize::from(v % 3);
            let var = ["x", "y", "z"][axis];
            let derivative = e.0.diff(var);
            let h = 1e-5;

            for point in POINTS {
                let (mut lo, mut hi) = (point, point);
                lo[axis] -= h;
                hi[axis] += h;
                let (f_lo, f_hi) = (e.0.evaluate_at(&lo), e.0.evaluate_at(&hi));
                let exact = derivative.evaluate_at(&point);
                if !(f_lo.is_finite() && f_hi.is_finite() && exact.is_finite()) {
                    return TestResult::discard();
                }
                let estimate = (f_hi - f_lo) / (2.0 * h);
                if (estimate - exact).abs() > 1e-4 * (1.0 + exact.abs() + f_hi.abs()) {
                    return TestResult::error(format!(
                        "{} by {} at {:?}: exact {}, estimate {}",
                        e.0.prefix(),
                        var,
                        point,
                        exact,
                        estimate
                    ));
                }
            }
            TestResult::passed()
        }
        QuickCheck::new()
            .tests(300)
            .max_tests(3000)
            .quickcheck(prop as fn(SmoothExpr, u8) -> TestResult);
    }

    #[test]
    fn test_repeated_diff_is_stable() {
        fn prop(e: AnyExpr, v: u8) -> bool {
            let var = ["x", "y", "z"][usize::from(v % 3)];
            let first = e.0.diff(var);
            let second = e.0.diff(var);
            let third = e.0.diff(var);
            let stable = first.ptr_eq(&second) && second.ptr_eq(&third);
            // leaves hand out shared singletons, operations their cached tree
            stable && agree_everywhere(&third, |x, y, z| first.evaluate(x, y, z))
        }
        QuickCheck::new()
            .tests(200)
            .quickcheck(prop as fn(AnyExpr, u8) -> bool);
    }
}
