//! Least squares solver.
//!
//! The fitter repeatedly solves tiny linear regression problems of the form:
//!
//! ```text
//! minimize Σ (y_i - x_i^T β)^2
//! ```
//!
//! - linear family: design row `[1, x]`, `β = (γ, β)`
//! - sigmoid family: design row `[σ(x; n, k, x0, 1)]`, `β = (α)`; the model is
//!   linear in `α` once `(n, k, x0)` are fixed by the grid
//!
//! We use SVD so tall (more rows than columns) and rank-deficient systems are
//! handled without panicking.

use nalgebra::{DMatrix, DVector};

/// SVD least squares, `argmin_β ‖Xβ - y‖²`.
///
/// The singular-value cutoff is relaxed step by step; `None` means no cutoff gave a
/// finite solution.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    const CUTOFFS: [f64; 3] = [1e-12, 1e-10, 1e-8];

    let svd = x.clone().svd(true, true);
    CUTOFFS.iter().find_map(|&eps| {
        svd.solve(y, eps)
            .ok()
            .filter(|coef| coef.iter().all(|c| c.is_finite()))
    })
}

/// Sum of squared residuals `Σ (y_i - f(x_i))^2`.
pub fn sse<F>(xs: &[f64], ys: &[f64], f: F) -> f64
where
    F: Fn(f64) -> f64,
{
    xs.iter()
        .zip(ys.iter())
        .map(|(&x, &y)| {
            let r = y - f(x);
            r * r
        })
        .sum()
}
