use std::f64::consts;

pub fn abs(x: &[f64]) -> f64 {
    x[0].abs()
}

/// Takes the positive branch at zero.
pub fn d_abs(x: &[f64], d: &[f64]) -> f64 {
    if x[0] >= 0.0 {
        d[0]
    } else {
        -d[0]
    }
}

pub fn sqr(x: &[f64]) -> f64 {
    x[0] * x[0]
}

pub fn d_sqr(x: &[f64], d: &[f64]) -> f64 {
    2.0 * d[0] * x[0]
}

pub fn sqrt(x: &[f64]) -> f64 {
    x[0].sqrt()
}

pub fn d_sqrt(x: &[f64], d: &[f64]) -> f64 {
    d[0] / (2.0 * x[0].sqrt())
}

pub fn exp(x: &[f64]) -> f64 {
    x[0].exp()
}

pub fn d_exp(x: &[f64], d: &[f64]) -> f64 {
    d[0] * x[0].exp()
}

pub fn ln(x: &[f64]) -> f64 {
    x[0].ln()
}

pub fn d_ln(x: &[f64], d: &[f64]) -> f64 {
    d[0] / x[0]
}

pub fn pi(_: &[f64]) -> f64 {
    consts::PI
}

pub fn e(_: &[f64]) -> f64 {
    consts::E
}

/// Shared by every entry whose shading derivative is flat.
pub fn zero(_: &[f64], _: &[f64]) -> f64 {
    0.0
}
