//! Reporting utilities: residuals and formatted terminal output.

pub mod format;

pub use format::*;

use crate::domain::{CurveParams, Point};
use crate::error::{Error, Result};
use crate::models::predict;

/// A sample with its fitted value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Residual {
    pub index: usize,
    pub point: Point,
    pub y_fit: f64,
    pub residual: f64,
}

/// Compute fitted values and residuals for each sample.
pub fn compute_residuals(points: &[Point], params: &CurveParams) -> Result<Vec<Residual>> {
    let mut out = Vec::with_capacity(points.len());
    for (index, &point) in points.iter().enumerate() {
        let y_fit = predict(params, point.x);
        if !y_fit.is_finite() {
            return Err(Error::invalid_input(format!(
                "non-finite prediction at x={}",
                point.x
            )));
        }
        out.push(Residual {
            index,
            point,
            y_fit,
            residual: point.y - y_fit,
        });
    }
    Ok(out)
}

/// The `top_n` residuals with the largest magnitude, largest first.
pub fn largest_residuals(residuals: &[Residual], top_n: usize) -> Vec<Residual> {
    let mut sorted = residuals.to_vec();
    sorted.sort_by(|a, b| {
        b.residual
            .abs()
            .partial_cmp(&a.residual.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.index.cmp(&b.index))
    });
    sorted.truncate(top_n);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn residuals_against_line() {
        let points = vec![Point::new(0.0, 1.0), Point::new(1.0, 2.5), Point::new(2.0, 2.0)];
        let params = CurveParams::Linear { beta: 1.0, gamma: 1.0 };
        let residuals = compute_residuals(&points, &params).unwrap();
        assert_eq!(residuals.len(), 3);
        assert_eq!(residuals[0].residual, 0.0);
        assert_eq!(residuals[1].residual, 0.5);
        assert_eq!(residuals[2].residual, -1.0);

        let top = largest_residuals(&residuals, 2);
        assert_eq!(top.iter().map(|r| r.index).collect::<Vec<_>>(), [2, 1]);
    }
}
