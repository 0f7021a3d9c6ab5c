//! Parallel evaluation over many points. Trees are immutable, so one tree is
//! shared by every worker without locking.

use crate::ast::{Dual, Expression};
use rayon::prelude::*;

/// Evaluates `expression` at every point. Output order matches `points`.
pub fn eval_points<P>(expression: &Expression, points: &[P]) -> Vec<f64>
where
    P: AsRef<[f64]> + Sync,
{
    points
        .par_iter()
        .map(|point| expression.eval(point.as_ref()))
        .collect()
}

/// Value and derivative along `var` at every point.
pub fn dual_points<P>(expression: &Expression, points: &[P], var: usize) -> Vec<Dual>
where
    P: AsRef<[f64]> + Sync,
{
    points
        .par_iter()
        .map(|point| expression.dual(point.as_ref(), var))
        .collect()
}

/// Samples a one-variable expression at `resolution + 1` evenly spaced
/// points covering `[start, end]`, the layout a 2D plot draws from.
pub fn sample_interval(
    expression: &Expression,
    start: f64,
    end: f64,
    resolution: usize,
) -> Vec<(f64, Dual)> {
    if resolution == 0 {
        return vec![(start, expression.dual(&[start], 0))];
    }
    let step = (end - start) / resolution as f64;
    (0..=resolution)
        .into_par_iter()
        .map(|i| {
            let x = start + step * i as f64;
            (x, expression.dual(&[x], 0))
        })
        .collect()
}
