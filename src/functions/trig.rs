//! Circular functions, their reciprocals and inverses.

pub fn sin(x: &[f64]) -> f64 {
    x[0].sin()
}

pub fn d_sin(x: &[f64], d: &[f64]) -> f64 {
    d[0] * x[0].cos()
}

pub fn cos(x: &[f64]) -> f64 {
    x[0].cos()
}

pub fn d_cos(x: &[f64], d: &[f64]) -> f64 {
    -d[0] * x[0].sin()
}

pub fn tan(x: &[f64]) -> f64 {
    x[0].tan()
}

pub fn d_tan(x: &[f64], d: &[f64]) -> f64 {
    d[0] / sqr(x[0].cos())
}

pub fn sec(x: &[f64]) -> f64 {
    1.0 / x[0].cos()
}

pub fn d_sec(x: &[f64], d: &[f64]) -> f64 {
    d[0] * x[0].tan() / x[0].cos()
}

pub fn csc(x: &[f64]) -> f64 {
    1.0 / x[0].sin()
}

pub fn d_csc(x: &[f64], d: &[f64]) -> f64 {
    -d[0] / (x[0].sin() * x[0].tan())
}

pub fn cot(x: &[f64]) -> f64 {
    1.0 / x[0].tan()
}

pub fn d_cot(x: &[f64], d: &[f64]) -> f64 {
    -d[0] / sqr(x[0].sin())
}

pub fn arcsin(x: &[f64]) -> f64 {
    x[0].asin()
}

pub fn d_arcsin(x: &[f64], d: &[f64]) -> f64 {
    d[0] / (1.0 - x[0] * x[0]).sqrt()
}

pub fn arccos(x: &[f64]) -> f64 {
    x[0].acos()
}

pub fn d_arccos(x: &[f64], d: &[f64]) -> f64 {
    -d[0] / (1.0 - x[0] * x[0]).sqrt()
}

pub fn arctan(x: &[f64]) -> f64 {
    x[0].atan()
}

pub fn d_arctan(x: &[f64], d: &[f64]) -> f64 {
    d[0] / (1.0 + x[0] * x[0])
}

pub fn arcsec(x: &[f64]) -> f64 {
    (1.0 / x[0]).acos()
}

pub fn d_arcsec(x: &[f64], d: &[f64]) -> f64 {
    d[0] / (x[0] * (x[0] * x[0] - 1.0).sqrt())
}

pub fn arccsc(x: &[f64]) -> f64 {
    (1.0 / x[0]).asin()
}

pub fn d_arccsc(x: &[f64], d: &[f64]) -> f64 {
    -d[0] / (x[0] * (x[0] * x[0] - 1.0).sqrt())
}

/// `arccot(x) = atan(1/x)`, so the range is `(-pi/2, pi/2]` rather than `(0, pi)`.
pub fn arccot(x: &[f64]) -> f64 {
    (1.0 / x[0]).atan()
}

pub fn d_arccot(x: &[f64], d: &[f64]) -> f64 {
    -d[0] / (1.0 + x[0] * x[0])
}

fn sqr(x: f64) -> f64 {
    x * x
}
