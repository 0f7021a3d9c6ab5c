//! Variadic `max`/`min`. The derivative follows whichever argument attains
//! the extreme, preferring the first on ties. A NaN argument makes both the
//! value and the derivative NaN.

pub fn max(x: &[f64]) -> f64 {
    extreme(x, f64::max)
}

pub fn min(x: &[f64]) -> f64 {
    extreme(x, f64::min)
}

fn extreme(x: &[f64], pick: fn(f64, f64) -> f64) -> f64 {
    // f64::max and f64::min skip NaN operands
    if x.iter().any(|v| v.is_nan()) {
        return f64::NAN;
    }
    x.iter().copied().reduce(pick).unwrap_or(f64::NAN)
}

pub fn d_max(x: &[f64], d: &[f64]) -> f64 {
    select(x, d, |candidate, best| candidate > best)
}

pub fn d_min(x: &[f64], d: &[f64]) -> f64 {
    select(x, d, |candidate, best| candidate < best)
}

fn select(x: &[f64], d: &[f64], better: impl Fn(f64, f64) -> bool) -> f64 {
    let Some(&first) = x.first() else {
        return f64::NAN;
    };
    if x.iter().any(|v| v.is_nan()) {
        return f64::NAN;
    }

    let mut best = first;
    let mut loc = 0;
    for (i, &v) in x.iter().enumerate().skip(1) {
        if better(v, best) {
            best = v;
            loc = i;
        }
    }
    d.get(loc).copied().unwrap_or(f64::NAN)
}
