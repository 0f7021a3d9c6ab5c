//! Step functions. None of them has a meaningful derivative for shading, so
//! their catalog entries pair with `elementary::zero`, except `mod`
//! which follows its dividend.

pub fn floor(x: &[f64]) -> f64 {
    x[0].floor()
}

pub fn ceil(x: &[f64]) -> f64 {
    x[0].ceil()
}

/// Halves round toward positive infinity: `round(-2.5) == -2`.
pub fn round(x: &[f64]) -> f64 {
    // x + 0.5 can round up before the floor; x - floor(x) is exact
    let f = x[0].floor();
    if x[0] - f >= 0.5 {
        f + 1.0
    } else {
        f
    }
}

/// Floored modulo: the result takes the sign of the divisor.
pub fn modulo(x: &[f64]) -> f64 {
    x[0] - (x[0] / x[1]).floor() * x[1]
}

/// Only the dividend contributes; the divisor term is dropped.
pub fn d_modulo(_: &[f64], d: &[f64]) -> f64 {
    d[0]
}
