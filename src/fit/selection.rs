//! Family selection: linear vs sigmoid vs quantized sigmoid.
//!
//! Each family is fitted independently and the one with the lowest SSE wins.
//! When two families are within `1e-9 · SST` of each other the simpler one is
//! kept (linear, then sigmoid, then quantized).
//!
//! Confidence is the coefficient of determination `1 - SSE/SST`, clamped to `[0, 1]`.

use tracing::{debug, info, warn};

use crate::domain::{
    CandidateFit, Component, CurveFamily, CurveParams, FitQuality, FitResult, FitWarning,
    InferenceConfig, Point,
};
use crate::error::{Error, Result};
use crate::fit::fitter::{ModelFit, fit_linear, fit_quantized, fit_sigmoid};
use crate::fit::grid::sigmoid_grid;
use crate::models::component_from_params;

/// Minimum number of samples accepted by [`infer`].
pub const MIN_POINTS: usize = 2;

/// Relative y-range at or below which the data is treated as flat.
const DEGENERATE_EPS: f64 = 1e-12;

/// SSE difference (relative to SST) within which the simpler family is preferred.
const TIE_EPS: f64 = 1e-9;

/// Infer the best curve family and parameters for `points`.
///
/// Fails with [`Error::InvalidInput`] for fewer than two points or any
/// non-finite coordinate. Flat data does not fail: see [`FitWarning::Degenerate`].
pub fn infer(points: &[Point], config: &InferenceConfig) -> Result<FitResult> {
    validate(points)?;
    let n = points.len();
    let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
    let y_mean = ys.iter().sum::<f64>() / n as f64;
    let sst: f64 = ys.iter().map(|y| (y - y_mean) * (y - y_mean)).sum();

    let (y_min, y_max) = ys
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &y| (lo.min(y), hi.max(y)));
    let y_range = y_max - y_min;
    let y_scale = y_min.abs().max(y_max.abs()).max(1.0);
    if y_range <= DEGENERATE_EPS * y_scale {
        warn!(n, y_range, "all y values are identical; returning flat fit");
        return Ok(degenerate_result(y_mean, sst, n, y_range));
    }

    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    let grid = sigmoid_grid(config, &xs)?;
    debug!(n, grid = grid.len(), sst, "fitting curve families");

    let mut fits = Vec::with_capacity(CurveFamily::ALL.len());
    let mut warnings = Vec::new();
    for family in CurveFamily::ALL {
        let fit = match family {
            CurveFamily::Linear => fit_linear(points),
            CurveFamily::Sigmoid => fit_sigmoid(points, &grid, config),
            CurveFamily::QuantizedSigmoid => fit_quantized(points, &grid, config),
        };
        match fit {
            Ok(fit) => {
                debug!(family = family.display_name(), sse = fit.sse, "family candidate");
                fits.push((family, fit));
            }
            // Bad samples for one family only; config errors still fail the call.
            Err(Error::InvalidInput(reason)) => {
                warn!(family = family.display_name(), %reason, "family excluded from selection");
                warnings.push(FitWarning::FamilyExcluded { family, reason });
            }
            Err(err) => return Err(err),
        }
    }

    let Some(best) = select_family(&fits, sst) else {
        return Err(Error::invalid_input("no curve family could be fitted to these samples"));
    };
    let confidence = confidence(best.sse, sst);
    info!(
        family = best.params.family().display_name(),
        sse = best.sse,
        confidence,
        "selected curve family"
    );

    Ok(FitResult {
        params: best.params,
        quality: FitQuality {
            sse: best.sse,
            rmse: best.rmse,
            n,
        },
        confidence,
        degenerate: false,
        warnings,
        candidates: fits
            .iter()
            .map(|(family, fit)| CandidateFit {
                family: *family,
                params: fit.params,
                sse: fit.sse,
            })
            .collect(),
    })
}

/// Convenience wrapper over [`infer`] for parallel coordinate slices.
pub fn infer_xy(xs: &[f64], ys: &[f64], config: &InferenceConfig) -> Result<FitResult> {
    if xs.len() != ys.len() {
        return Err(Error::invalid_input(format!(
            "x and y lengths differ ({} vs {})",
            xs.len(),
            ys.len()
        )));
    }
    let points: Vec<Point> = xs.iter().zip(ys).map(|(&x, &y)| Point::new(x, y)).collect();
    infer(&points, config)
}

fn validate(points: &[Point]) -> Result<()> {
    if points.len() < MIN_POINTS {
        return Err(Error::invalid_input(format!(
            "need at least {MIN_POINTS} points, got {}",
            points.len()
        )));
    }
    if let Some((i, p)) = points
        .iter()
        .enumerate()
        .find(|(_, p)| !(p.x.is_finite() && p.y.is_finite()))
    {
        return Err(Error::invalid_input(format!(
            "point {i} is not finite: ({}, {})",
            p.x, p.y
        )));
    }
    Ok(())
}

fn degenerate_result(level: f64, sst: f64, n: usize, y_range: f64) -> FitResult {
    let params = CurveParams::flat(level);
    FitResult {
        params,
        quality: FitQuality {
            sse: sst,
            rmse: (sst / n as f64).sqrt(),
            n,
        },
        confidence: 0.0,
        degenerate: true,
        warnings: vec![FitWarning::Degenerate { y_range }],
        candidates: Vec::new(),
    }
}

/// Pick the lowest-SSE fit, preferring the earlier (simpler) family on near ties.
///
/// `fits` must be ordered from simplest to most complex. A non-finite SST
/// disables the tie tolerance.
fn select_family(fits: &[(CurveFamily, ModelFit)], sst: f64) -> Option<ModelFit> {
    let tol = if sst.is_finite() { TIE_EPS * sst } else { 0.0 };
    let (first, rest) = fits.split_first()?;
    let mut best = first.1;
    for (_, fit) in rest {
        if fit.sse < best.sse - tol || (best.sse.is_nan() && !fit.sse.is_nan()) {
            best = *fit;
        }
    }
    Some(best)
}

/// `1 - SSE/SST` in `[0, 1]`; anything undefined (NaN) counts as no confidence.
fn confidence(sse: f64, sst: f64) -> f64 {
    let r2 = 1.0 - sse / sst;
    if sst > 0.0 && !r2.is_nan() { r2.clamp(0.0, 1.0) } else { 0.0 }
}

impl FitResult {
    /// Human-readable equation of the selected curve.
    pub fn equation(&self) -> String {
        self.params.equation()
    }

    /// The fitted curve as a shape-equation component.
    pub fn to_component(&self) -> Component {
        component_from_params(&self.params)
            .with_description(format!("fitted {}", self.family().display_name()))
    }
}
