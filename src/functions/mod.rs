//! Builtin function catalog.
//!
//! Every entry pairs a value formula with a derivative formula. The derivative
//! receives the argument values and the argument derivatives as parallel
//! slices and applies the chain rule itself. Derivatives only need to be good
//! enough for surface shading, so step functions report `0` and a few entries
//! pick a branch at points where the textbook derivative is undefined.

mod elementary;
mod extrema;
mod rounding;
mod trig;

use std::fmt;

/// How many arguments a function accepts.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Arity {
    Fixed(usize),
    Variadic { min: usize },
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match *self {
            Arity::Fixed(n) => count == n,
            Arity::Variadic { min } => count >= min,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Fixed(n) => write!(f, "{}", n),
            Arity::Variadic { min } => write!(f, "at least {}", min),
        }
    }
}

pub type ValueFn = fn(&[f64]) -> f64;
pub type DerivativeFn = fn(&[f64], &[f64]) -> f64;

/// Formulas index their arguments positionally, so they are only reachable
/// through [`FunctionId`], which checks the argument count first.
pub struct FunctionDef {
    pub name: &'static str,
    pub arity: Arity,
    value: ValueFn,
    derivative: DerivativeFn,
}

impl fmt::Debug for FunctionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionDef")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

const fn def(
    name: &'static str,
    arity: Arity,
    value: ValueFn,
    derivative: DerivativeFn,
) -> FunctionDef {
    FunctionDef {
        name,
        arity,
        value,
        derivative,
    }
}

const UNARY: Arity = Arity::Fixed(1);
const NULLARY: Arity = Arity::Fixed(0);
const VARIADIC: Arity = Arity::Variadic { min: 1 };

/// The catalog. Positions are the stable [`FunctionId`]s, so new entries only
/// ever go at the end.
pub static FUNCTIONS: [FunctionDef; 25] = [
    def("abs", UNARY, elementary::abs, elementary::d_abs),
    def("arccos", UNARY, trig::arccos, trig::d_arccos),
    def("arccot", UNARY, trig::arccot, trig::d_arccot),
    def("arccsc", UNARY, trig::arccsc, trig::d_arccsc),
    def("arcsec", UNARY, trig::arcsec, trig::d_arcsec),
    def("arcsin", UNARY, trig::arcsin, trig::d_arcsin),
    def("arctan", UNARY, trig::arctan, trig::d_arctan),
    def("ceil", UNARY, rounding::ceil, elementary::zero),
    def("cos", UNARY, trig::cos, trig::d_cos),
    def("cot", UNARY, trig::cot, trig::d_cot),
    def("csc", UNARY, trig::csc, trig::d_csc),
    def("floor", UNARY, rounding::floor, elementary::zero),
    def("max", VARIADIC, extrema::max, extrema::d_max),
    def("min", VARIADIC, extrema::min, extrema::d_min),
    def("mod", Arity::Fixed(2), rounding::modulo, rounding::d_modulo),
    def("round", UNARY, rounding::round, elementary::zero),
    def("sec", UNARY, trig::sec, trig::d_sec),
    def("sin", UNARY, trig::sin, trig::d_sin),
    def("sqr", UNARY, elementary::sqr, elementary::d_sqr),
    def("sqrt", UNARY, elementary::sqrt, elementary::d_sqrt),
    def("tan", UNARY, trig::tan, trig::d_tan),
    def("exp", UNARY, elementary::exp, elementary::d_exp),
    def("ln", UNARY, elementary::ln, elementary::d_ln),
    def("pi", NULLARY, elementary::pi, elementary::zero),
    def("e", NULLARY, elementary::e, elementary::zero),
];

/// Index of an entry in [`FUNCTIONS`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionId(usize);

impl FunctionId {
    /// Case-insensitive lookup by name.
    pub fn lookup(name: &str) -> Option<FunctionId> {
        FUNCTIONS
            .iter()
            .position(|def| def.name.eq_ignore_ascii_case(name))
            .map(FunctionId)
    }

    pub fn from_index(index: usize) -> Option<FunctionId> {
        (index < FUNCTIONS.len()).then_some(FunctionId(index))
    }

    pub fn index(self) -> usize {
        self.0
    }

    pub fn def(self) -> &'static FunctionDef {
        &FUNCTIONS[self.0]
    }

    pub fn name(self) -> &'static str {
        self.def().name
    }

    pub fn arity(self) -> Arity {
        self.def().arity
    }

    /// NaN when `args` does not fit the arity.
    pub fn value(self, args: &[f64]) -> f64 {
        if !self.arity().accepts(args.len()) {
            return f64::NAN;
        }
        (self.def().value)(args)
    }

    /// NaN when `args` does not fit the arity or `dargs` is not parallel to it.
    pub fn derivative(self, args: &[f64], dargs: &[f64]) -> f64 {
        if !self.arity().accepts(args.len()) || dargs.len() != args.len() {
            return f64::NAN;
        }
        (self.def().derivative)(args, dargs)
    }
}

/// Names of every builtin, in id order.
pub fn names() -> impl Iterator<Item = &'static str> {
    FUNCTIONS.iter().map(|def| def.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(FunctionId::lookup("SIN"), FunctionId::lookup("sin"));
        assert_eq!(FunctionId::lookup("Max").map(FunctionId::index), Some(12));
        assert_eq!(FunctionId::lookup("sinh"), None);
        assert_eq!(FunctionId::lookup(""), None);
    }

    #[test]
    fn test_ids_are_stable() {
        let expected = [
            "abs", "arccos", "arccot", "arccsc", "arcsec", "arcsin", "arctan", "ceil", "cos",
            "cot", "csc", "floor", "max", "min", "mod", "round", "sec", "sin", "sqr", "sqrt",
            "tan", "exp", "ln", "pi", "e",
        ];
        assert_eq!(names().collect::<Vec<_>>(), expected);
        for (i, name) in expected.iter().enumerate() {
            assert_eq!(FunctionId::lookup(name).map(FunctionId::index), Some(i));
        }
    }

    #[test]
    fn test_arity_rules() {
        let max = FunctionId::lookup("max").unwrap();
        assert!(!max.arity().accepts(0));
        assert!(max.arity().accepts(1));
        assert!(max.arity().accepts(12));

        let modulo = FunctionId::lookup("mod").unwrap();
        assert!(modulo.arity().accepts(2));
        assert!(!modulo.arity().accepts(1));

        let pi = FunctionId::lookup("pi").unwrap();
        assert!(pi.arity().accepts(0));
        assert!(!pi.arity().accepts(1));
    }

    #[test]
    fn test_dispatch() {
        let sqr = FunctionId::lookup("sqr").unwrap();
        assert_eq!(sqr.value(&[3.0]), 9.0);
        assert_eq!(sqr.derivative(&[3.0], &[1.0]), 6.0);

        let floor = FunctionId::lookup("floor").unwrap();
        assert_eq!(floor.derivative(&[3.7], &[1.0]), 0.0);
    }

    #[test]
    fn test_dispatch_rejects_wrong_argument_count() {
        let sin = FunctionId::lookup("sin").unwrap();
        assert!(sin.value(&[]).is_nan());
        assert!(sin.derivative(&[], &[]).is_nan());
        assert!(sin.value(&[1.0, 2.0]).is_nan());

        let modulo = FunctionId::lookup("mod").unwrap();
        assert!(modulo.value(&[5.0]).is_nan());
        assert!(modulo.derivative(&[5.0, 2.0], &[1.0]).is_nan());
        assert_eq!(modulo.value(&[5.0, 2.0]), 1.0);

        let max = FunctionId::lookup("max").unwrap();
        assert!(max.value(&[]).is_nan());
        assert_eq!(max.value(&[1.0, 3.0, 2.0]), 3.0);
    }

    #[test]
    fn test_from_index_bounds() {
        assert_eq!(FunctionId::from_index(24).map(FunctionId::name), Some("e"));
        assert_eq!(FunctionId::from_index(25), None);
    }
}
