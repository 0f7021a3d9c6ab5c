use crate::ast::{Expression, FunctionCall, Operator};
use smallvec::SmallVec;

/// Value of an expression together with its partial derivative along one
/// variable, both taken at the same point.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Dual {
    pub value: f64,
    pub derivative: f64,
}

impl Dual {
    pub fn new(value: f64, derivative: f64) -> Self {
        Self { value, derivative }
    }

    pub fn constant(value: f64) -> Self {
        Self::new(value, 0.0)
    }

    pub fn nan() -> Self {
        Self::new(f64::NAN, f64::NAN)
    }

    pub fn is_finite(&self) -> bool {
        self.value.is_finite() && self.derivative.is_finite()
    }
}

/// Argument buffers for calls. Nothing in the catalog takes more than two
/// fixed arguments, so only long `max`/`min` lists spill to the heap.
type Args = SmallVec<[f64; 4]>;

impl Expression {
    /// Value of the expression at `point`. Slots missing from `point`
    /// evaluate to NaN.
    pub fn eval(&self, point: &[f64]) -> f64 {
        match self {
            Expression::Constant(value) => *value,
            Expression::Variable(slot) => point.get(*slot).copied().unwrap_or(f64::NAN),
            Expression::Negation(inner) => -inner.eval(point),
            Expression::BinaryOperation {
                left,
                operator,
                right,
            } => operator.apply(left.eval(point), right.eval(point)),
            Expression::FunctionCall(call) => {
                let values: Args = call.args().iter().map(|arg| arg.eval(point)).collect();
                call.id().value(&values)
            }
            Expression::Invalid => f64::NAN,
        }
    }

    /// Partial derivative with respect to slot `var`, taken at `point`.
    pub fn derivative(&self, point: &[f64], var: usize) -> f64 {
        self.dual(point, var).derivative
    }

    /// Value and partial derivative in one walk of the tree.
    pub fn dual(&self, point: &[f64], var: usize) -> Dual {
        match self {
            Expression::Constant(value) => Dual::constant(*value),
            Expression::Variable(slot) => Dual::new(
                point.get(*slot).copied().unwrap_or(f64::NAN),
                if *slot == var { 1.0 } else { 0.0 },
            ),
            Expression::Negation(inner) => {
                let inner = inner.dual(point, var);
                Dual::new(-inner.value, -inner.derivative)
            }
            Expression::BinaryOperation {
                left,
                operator,
                right,
            } => {
                let left = left.dual(point, var);
                let right = right.dual(point, var);
                binary_dual(*operator, left, right)
            }
            Expression::FunctionCall(call) => call_dual(call, point, var),
            Expression::Invalid => Dual::nan(),
        }
    }
}

fn binary_dual(operator: Operator, a: Dual, b: Dual) -> Dual {
    let value = operator.apply(a.value, b.value);
    let derivative = match operator {
        Operator::Add => a.derivative + b.derivative,
        Operator::Subtract => a.derivative - b.derivative,
        Operator::Multiply => a.value * b.derivative + b.value * a.derivative,
        Operator::Divide => (b.value * a.derivative - a.value * b.derivative) / (b.value * b.value),
        Operator::Power => power_derivative(a, b),
    };
    Dual::new(value, derivative)
}

/// Branches on which side is actually varying so that `ln(base)` is only
/// taken when the exponent changes. A locally constant exponent over a
/// negative base then still gets a finite slope.
fn power_derivative(base: Dual, exponent: Dual) -> f64 {
    let (v1, d1) = (base.value, base.derivative);
    let (v2, d2) = (exponent.value, exponent.derivative);

    if d1 == 0.0 && d2 == 0.0 {
        0.0
    } else if d2 == 0.0 {
        v1.powf(v2 - 1.0) * d1 * v2
    } else if d1 == 0.0 {
        v1.powf(v2) * d2 * v1.ln()
    } else {
        v1.powf(v2 - 1.0) * (d1 * v2 + d2 * v1 * v1.ln())
    }
}

fn call_dual(call: &FunctionCall, point: &[f64], var: usize) -> Dual {
    let mut values = Args::new();
    let mut derivatives = Args::new();
    for arg in call.args() {
        let dual = arg.dual(point, var);
        values.push(dual.value);
        derivatives.push(dual.derivative);
    }

    let id = call.id();
    Dual::new(id.value(&values), id.derivative(&values, &derivatives))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Parser;
    use crate::functions::FunctionId;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::f64::consts::LN_2;

    fn assert_close(actual: f64, expected: f64) {
        let scale = expected.abs().max(1.0);
        assert!(
            (actual - expected).abs() <= 1e-9 * scale,
            "expected {expected}, got {actual}"
        );
    }

    fn var(slot: usize) -> Expression {
        Expression::Variable(slot)
    }

    fn constant(value: f64) -> Expression {
        Expression::Constant(value)
    }

    fn call(name: &str, args: Vec<Expression>) -> Expression {
        let id = FunctionId::lookup(name).unwrap();
        Expression::FunctionCall(FunctionCall::new(id, args).unwrap())
    }

    #[test]
    fn test_constant_and_variable() {
        assert_eq!(constant(4.5).eval(&[]), 4.5);
        assert_eq!(constant(4.5).derivative(&[1.0], 0), 0.0);

        assert_eq!(var(1).eval(&[3.0, 7.0]), 7.0);
        assert_eq!(var(1).derivative(&[3.0, 7.0], 1), 1.0);
        assert_eq!(var(1).derivative(&[3.0, 7.0], 0), 0.0);
    }

    #[test]
    fn test_missing_slot_is_nan() {
        assert!(var(3).eval(&[1.0, 2.0]).is_nan());
        assert!(var(0).eval(&[]).is_nan());
    }

    #[test]
    fn test_invalid_is_nan_everywhere() {
        assert!(Expression::Invalid.eval(&[1.0]).is_nan());
        assert!(Expression::Invalid.derivative(&[1.0], 0).is_nan());
    }

    #[test]
    fn test_negation() {
        let ast = Expression::negation(Expression::binary(var(0), Operator::Multiply, var(0)));
        assert_eq!(ast.eval(&[3.0]), -9.0);
        assert_eq!(ast.derivative(&[3.0], 0), -6.0);
    }

    #[test]
    fn test_product_and_quotient_rules() {
        // x * y at (2, 5)
        let product = Expression::binary(var(0), Operator::Multiply, var(1));
        assert_eq!(product.derivative(&[2.0, 5.0], 0), 5.0);
        assert_eq!(product.derivative(&[2.0, 5.0], 1), 2.0);

        // x / y at (2, 5)
        let quotient = Expression::binary(var(0), Operator::Divide, var(1));
        assert_eq!(quotient.eval(&[2.0, 5.0]), 0.4);
        assert_close(quotient.derivative(&[2.0, 5.0], 0), 0.2);
        assert_close(quotient.derivative(&[2.0, 5.0], 1), -2.0 / 25.0);
    }

    #[test]
    fn test_division_by_zero_is_not_an_error() {
        let ast = Expression::binary(constant(1.0), Operator::Divide, var(0));
        assert_eq!(ast.eval(&[0.0]), f64::INFINITY);
        assert!(ast.derivative(&[0.0], 0).is_infinite() || ast.derivative(&[0.0], 0).is_nan());
    }

    #[test]
    fn test_power_exponential_branch() {
        let ast = Expression::binary(constant(2.0), Operator::Power, var(0));
        assert_close(ast.derivative(&[1.0], 0), 2.0 * LN_2);
    }

    #[test]
    fn test_power_rule_branch() {
        let ast = Expression::binary(var(0), Operator::Power, constant(3.0));
        assert_eq!(ast.derivative(&[2.0], 0), 12.0);
    }

    #[test]
    fn test_power_rule_avoids_log_of_negative_base() {
        let ast = Expression::binary(var(0), Operator::Power, constant(2.0));
        assert_eq!(ast.derivative(&[-3.0], 0), -6.0);
    }

    #[test]
    fn test_power_both_constant_is_flat() {
        let ast = Expression::binary(constant(-2.0), Operator::Power, constant(0.5));
        assert!(ast.eval(&[]).is_nan());
        assert_eq!(ast.derivative(&[], 0), 0.0);
    }

    #[test]
    fn test_power_both_varying() {
        // x^x at 2: d/dx = x^x (ln x + 1)
        let ast = Expression::binary(var(0), Operator::Power, var(0));
        assert_close(ast.derivative(&[2.0], 0), 4.0 * (LN_2 + 1.0));
    }

    #[test]
    fn test_function_call_chain_rule() {
        // sin(x^2) at 1.5
        let ast = call(
            "sin",
            vec![Expression::binary(var(0), Operator::Power, constant(2.0))],
        );
        assert_close(ast.eval(&[1.5]), 2.25f64.sin());
        assert_close(ast.derivative(&[1.5], 0), 2.25f64.cos() * 3.0);
    }

    #[test]
    fn test_max_follows_largest_argument() {
        let ast = call(
            "max",
            vec![
                var(0),
                Expression::binary(constant(3.0), Operator::Multiply, var(0)),
                constant(1.0),
            ],
        );
        assert_eq!(ast.eval(&[2.0]), 6.0);
        assert_eq!(ast.derivative(&[2.0], 0), 3.0);
        assert_eq!(ast.eval(&[-2.0]), 1.0);
        assert_eq!(ast.derivative(&[-2.0], 0), 0.0);
    }

    #[test]
    fn test_extreme_of_undefined_argument_is_nan() {
        let parser = Parser::new(&['x']);
        let ast = parser.parse("max(sqrt(x), 0)");
        assert!(ast.eval(&[-1.0]).is_nan());
        assert!(ast.dual(&[-1.0], 0).value.is_nan());
        assert_eq!(ast.eval(&[4.0]), 2.0);

        let ast = parser.parse("min(ln(x), 5)");
        assert!(ast.eval(&[-1.0]).is_nan());
    }

    #[test]
    fn test_round_is_exact_near_half() {
        let ast = Parser::new(&['x']).parse("round(x)");
        assert_eq!(ast.eval(&[0.49999999999999994]), 0.0);
        assert_eq!(ast.eval(&[4503599627370497.0]), 4503599627370497.0);
        assert_eq!(ast.eval(&[-2.5]), -2.0);
    }

    #[test]
    fn test_long_argument_list_spills() {
        let args = (0..9).map(|i| constant(i as f64)).collect();
        let ast = call("min", args);
        assert_eq!(ast.eval(&[]), 0.0);
        assert_eq!(ast.derivative(&[], 0), 0.0);
    }

    #[test]
    fn test_dual_matches_separate_calls() {
        let ast = Parser::new(&['x', 'y']).parse("x^2*y + sin(y)/x");
        let point = [1.3, -0.4];
        for slot in 0..2 {
            let dual = ast.dual(&point, slot);
            assert_eq!(dual.value, ast.eval(&point));
            assert_eq!(dual.derivative, ast.derivative(&point, slot));
            assert!(dual.is_finite());
        }
    }

    /// Central difference along one slot.
    fn numeric_derivative(ast: &Expression, point: &[f64], slot: usize) -> f64 {
        let h = 1e-6;
        let mut ahead = point.to_vec();
        let mut behind = point.to_vec();
        ahead[slot] += h;
        behind[slot] -= h;
        (ast.eval(&ahead) - ast.eval(&behind)) / (2.0 * h)
    }

    #[test]
    fn test_derivatives_match_finite_differences() {
        let formulas = [
            "x^2*y + sin(y)/x",
            "sqrt(x^2+y^2)",
            "exp(-x)*cos(3y)",
            "ln(x+1)^y",
            "arctan(x/y) + arccot(y)",
            "tan(x/2) - sec(y/2) + csc(x/2+0.3) + cot(y/2+0.2)",
            "arcsin(x/4) + arccos(y/4)",
            "arcsec(x+4) + arccsc(y+4)",
            "abs(x-y) + sqr(x)",
            "x^y + 2^x",
            "max(x, y, 1)*min(x, y)",
            "e^x*pi",
        ];
        let parser = Parser::new(&['x', 'y']);
        let mut rng = StdRng::seed_from_u64(7);

        for formula in formulas {
            let ast = parser.parse(formula);
            assert!(!ast.is_invalid(), "{formula} should parse");
            for _ in 0..20 {
                let point = [rng.random_range(0.5..2.5), rng.random_range(0.5..2.5)];
                for slot in 0..2 {
                    let analytic = ast.derivative(&point, slot);
                    let numeric = numeric_derivative(&ast, &point, slot);
                    let tolerance = 1e-4 * numeric.abs().max(1.0);
                    assert!(
                        (analytic - numeric).abs() <= tolerance,
                        "{formula} at {point:?} along {slot}: {analytic} vs {numeric}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_tree_is_shareable_across_threads() {
        fn assert_sync<T: Send + Sync>() {}
        assert_sync::<Expression>();
    }
}
