//! Curve-fit domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting
//! - exported to JSON
//! - converted into catalog components

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// One `(x, y)` observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Candidate curve families, ordered from simplest to most complex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum CurveFamily {
    Linear,
    Sigmoid,
    #[value(name = "quantized")]
    QuantizedSigmoid,
}

impl CurveFamily {
    /// Selection order: when two families fit equally well the earlier one wins.
    pub const ALL: [CurveFamily; 3] = [
        CurveFamily::Linear,
        CurveFamily::Sigmoid,
        CurveFamily::QuantizedSigmoid,
    ];

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            CurveFamily::Linear => "linear",
            CurveFamily::Sigmoid => "sigmoid",
            CurveFamily::QuantizedSigmoid => "quantized sigmoid",
        }
    }
}

/// Fitted parameters for one family.
///
/// - linear: `y = beta·x + gamma`
/// - sigmoid: `y = alpha / (1 + exp(-k·(x - x0)^n))`
/// - quantized: the sigmoid value snapped to multiples of `1/quantum_factor`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum CurveParams {
    Linear {
        beta: f64,
        gamma: f64,
    },
    Sigmoid {
        n: u32,
        k: f64,
        x0: f64,
        alpha: f64,
    },
    QuantizedSigmoid {
        n: u32,
        k: f64,
        x0: f64,
        alpha: f64,
        quantum_factor: f64,
    },
}

impl CurveParams {
    pub fn family(&self) -> CurveFamily {
        match self {
            CurveParams::Linear { .. } => CurveFamily::Linear,
            CurveParams::Sigmoid { .. } => CurveFamily::Sigmoid,
            CurveParams::QuantizedSigmoid { .. } => CurveFamily::QuantizedSigmoid,
        }
    }

    /// Equation text, e.g. `y = 2.0000·x + 1.0000`.
    pub fn equation(&self) -> String {
        match *self {
            CurveParams::Linear { beta, gamma } => format!("y = {beta:.4}·x + {gamma:.4}"),
            CurveParams::Sigmoid { n, k, x0, alpha } => {
                format!("y = {alpha:.4} / (1 + exp(-{k:.4}·(x - {x0:.4})^{n}))")
            }
            CurveParams::QuantizedSigmoid {
                n,
                k,
                x0,
                alpha,
                quantum_factor,
            } => format!(
                "y = round({quantum_factor}·{alpha:.4} / (1 + exp(-{k:.4}·(x - {x0:.4})^{n}))) / {quantum_factor}"
            ),
        }
    }

    /// A flat line at `level`.
    pub fn flat(level: f64) -> Self {
        CurveParams::Linear {
            beta: 0.0,
            gamma: level,
        }
    }
}

/// Residual diagnostics for a fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitQuality {
    pub sse: f64,
    pub rmse: f64,
    pub n: usize,
}

/// Non-fatal conditions attached to a fit result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FitWarning {
    /// All y-values are (numerically) identical; a flat fit with zero confidence
    /// was returned instead of searching the families.
    Degenerate { y_range: f64 },
    /// No usable fit exists for this family (e.g. every candidate's SSE
    /// overflowed); it took no part in selection.
    FamilyExcluded { family: CurveFamily, reason: String },
}

/// Best fit found for one family during selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandidateFit {
    pub family: CurveFamily,
    pub params: CurveParams,
    pub sse: f64,
}

/// Output of the inference routine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub params: CurveParams,
    pub quality: FitQuality,
    /// `1 - SSE/SST`, clamped to `[0, 1]`.
    pub confidence: f64,
    pub degenerate: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<FitWarning>,
    /// Per-family best fits, in selection order.
    #[serde(default)]
    pub candidates: Vec<CandidateFit>,
}

impl FitResult {
    pub fn family(&self) -> CurveFamily {
        self.params.family()
    }
}

/// Search settings for the inference routine.
///
/// The defaults are what the binary uses when no flags are given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Sharpness exponents `n` to try.
    pub sharpness: Vec<u32>,
    /// Magnitudes of `k` to try; each is tried with both signs.
    pub k_magnitudes: Vec<f64>,
    /// Number of midpoint candidates spread across the x-range (forced odd so the
    /// sample mean is always one of them).
    pub x0_steps: usize,
    /// Largest quantum factor tried for the quantized family (`2..=max_quantum`).
    pub max_quantum: u32,
    /// Pattern-search iterations used to polish the best sigmoid grid point.
    pub refine_iters: usize,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            sharpness: vec![1, 2, 3],
            k_magnitudes: vec![0.25, 0.5, 0.75, 1.0, 1.5, 2.0, 3.0, 4.0, 5.0, 7.5, 10.0],
            x0_steps: 13,
            max_quantum: 16,
            refine_iters: 200,
        }
    }
}
