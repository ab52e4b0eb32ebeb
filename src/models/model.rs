//! Model evaluation for the curve families.
//!
//! The fitter relies on two primitive operations:
//! - build a design row for the linear part of a family (for least squares)
//! - predict `y(x)` given fitted params (for residuals/plots)

use crate::domain::CurveParams;
use crate::math::{linear, quantized_sigmoid, sigmoid};

/// The part of a family that is linear in its coefficients.
///
/// For the sigmoid family the non-linear shape `(n, k, x0)` is fixed by the grid,
/// leaving `alpha` as the only least-squares coefficient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Basis {
    /// Columns `[1, x]`, coefficients `(gamma, beta)`.
    Linear,
    /// Column `[σ(x; n, k, x0, 1)]`, coefficient `alpha`.
    Sigmoid { n: u32, k: f64, x0: f64 },
}

impl Basis {
    /// Number of least-squares coefficients.
    pub fn coeff_count(&self) -> usize {
        match self {
            Basis::Linear => 2,
            Basis::Sigmoid { .. } => 1,
        }
    }
}

/// Fill a design row for the given basis.
///
/// # Panics
/// Panics if `out` is shorter than `basis.coeff_count()`.
pub fn fill_design_row(basis: &Basis, x: f64, out: &mut [f64]) {
    match *basis {
        Basis::Linear => {
            out[0] = 1.0;
            out[1] = x;
        }
        Basis::Sigmoid { n, k, x0 } => {
            out[0] = sigmoid(x, n, k, x0, 1.0);
        }
    }
}

/// Predict `y(x)` for fitted params.
pub fn predict(params: &CurveParams, x: f64) -> f64 {
    match *params {
        CurveParams::Linear { beta, gamma } => linear(x, beta, gamma),
        CurveParams::Sigmoid { n, k, x0, alpha } => sigmoid(x, n, k, x0, alpha),
        CurveParams::QuantizedSigmoid {
            n,
            k,
            x0,
            alpha,
            quantum_factor,
        } => quantized_sigmoid(x, n, k, x0, alpha, quantum_factor),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_linear() {
        let p = CurveParams::Linear { beta: 2.0, gamma: 1.0 };
        assert_eq!(predict(&p, 3.0), 7.0);
    }

    #[test]
    fn sigmoid_row_is_unit_alpha_curve() {
        let basis = Basis::Sigmoid { n: 1, k: 1.0, x0: 0.0 };
        let mut row = [0.0; 1];
        fill_design_row(&basis, 0.0, &mut row);
        assert_eq!(row[0], 0.5);
    }

    #[test]
    fn quantized_predict_hits_levels() {
        let p = CurveParams::QuantizedSigmoid {
            n: 1,
            k: 2.0,
            x0: 0.0,
            alpha: 1.0,
            quantum_factor: 2.0,
        };
        assert_eq!(predict(&p, 5.0), 1.0);
        assert_eq!(predict(&p, 0.0), 0.5);
        assert_eq!(predict(&p, -5.0), 0.0);
    }
}
