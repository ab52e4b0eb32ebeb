//! Sigmoid shape grid generation.
//!
//! We fit the sigmoid families using a deterministic grid search over the
//! non-linear shape `(n, k, x0)`; `alpha` is then solved by least squares.
//!
//! Why grid search?
//! - It avoids the local minima a gradient optimizer falls into on S-curves.
//! - It is deterministic given the same inputs/config.
//! - The parameter count is tiny, so a modest grid is fast.

use crate::domain::InferenceConfig;
use crate::error::{Error, Result};

/// Non-linear part of a sigmoid: sharpness, steepness, midpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SigmoidShape {
    pub n: u32,
    pub k: f64,
    pub x0: f64,
}

/// Generate `steps` evenly spaced points between `min` and `max` (inclusive).
///
/// `steps == 1` yields the midpoint.
pub fn lin_space(min: f64, max: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![(min + max) / 2.0],
        _ => {
            let step = (max - min) / (steps as f64 - 1.0);
            (0..steps).map(|i| min + step * i as f64).collect()
        }
    }
}

/// Signed steepness candidates: every magnitude with both signs.
///
/// Positive values come first so increasing data wins ties.
pub fn k_grid(magnitudes: &[f64]) -> Vec<f64> {
    let mut pos: Vec<f64> = magnitudes
        .iter()
        .copied()
        .filter(|k| k.is_finite() && *k > 0.0)
        .collect();
    pos.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    pos.dedup();
    let neg = pos.iter().map(|k| -k);
    pos.iter().copied().chain(neg).collect()
}

/// Midpoint candidates centred on the mean of `xs`, spanning half the x-range
/// on either side. The count is forced odd so the mean is always included.
pub fn x0_grid(xs: &[f64], steps: usize) -> Vec<f64> {
    if xs.is_empty() {
        return Vec::new();
    }
    let mean = xs.iter().sum::<f64>() / xs.len() as f64;
    let (min, max) = xs
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| (lo.min(x), hi.max(x)));
    let half = (max - min) / 2.0;
    let steps = steps.max(1) | 1;
    if steps == 1 || half <= 0.0 {
        return vec![mean];
    }

    // Put the mean at the exact centre rather than trusting lin_space rounding.
    let mut out = lin_space(mean - half, mean + half, steps);
    out[steps / 2] = mean;
    out
}

/// Full `(n, k, x0)` grid, in deterministic order.
pub fn sigmoid_grid(config: &InferenceConfig, xs: &[f64]) -> Result<Vec<SigmoidShape>> {
    let ks = k_grid(&config.k_magnitudes);
    if ks.is_empty() {
        return Err(Error::invalid_argument(
            "k magnitudes must contain at least one finite positive value",
        ));
    }
    let sharpness: Vec<u32> = config.sharpness.iter().copied().filter(|&n| n >= 1).collect();
    if sharpness.is_empty() {
        return Err(Error::invalid_argument("sharpness set must contain a value >= 1"));
    }
    let x0s = x0_grid(xs, config.x0_steps);

    let mut out = Vec::with_capacity(sharpness.len() * ks.len() * x0s.len());
    for &n in &sharpness {
        for &k in &ks {
            for &x0 in &x0s {
                out.push(SigmoidShape { n, k, x0 });
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn k_grid_is_signed_and_deduplicated() {
        let ks = k_grid(&[2.0, 1.0, 2.0, -3.0, f64::NAN]);
        assert_eq!(ks, vec![1.0, 2.0, -1.0, -2.0]);
    }

    #[test]
    fn x0_grid_contains_mean_exactly() {
        let xs = [-2.0, -1.0, 0.0, 1.0, 2.0];
        let grid = x0_grid(&xs, 12);
        assert_eq!(grid.len(), 13);
        assert_eq!(grid[6], 0.0);
        assert!((grid[0] + 2.0).abs() < 1e-12);
        assert!((grid[12] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn x0_grid_collapses_for_constant_x() {
        assert_eq!(x0_grid(&[3.0, 3.0], 9), vec![3.0]);
    }

    #[test]
    fn sigmoid_grid_covers_every_combination() {
        let config = InferenceConfig {
            sharpness: vec![1, 2],
            k_magnitudes: vec![1.0, 2.0],
            x0_steps: 3,
            ..InferenceConfig::default()
        };
        let grid = sigmoid_grid(&config, &[0.0, 1.0, 2.0]).unwrap();
        assert_eq!(grid.len(), 2 * 4 * 3);
        assert_eq!(grid[0], SigmoidShape { n: 1, k: 1.0, x0: 0.0 });
    }

    #[test]
    fn sigmoid_grid_rejects_empty_k() {
        let config = InferenceConfig {
            k_magnitudes: vec![],
            ..InferenceConfig::default()
        };
        assert!(sigmoid_grid(&config, &[0.0, 1.0]).is_err());
    }
}
