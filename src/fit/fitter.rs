//! Low-level fitting routines for a single curve family.
//!
//! Given samples `(x_i, y_i)` and a grid of sigmoid shapes `(n, k, x0)`:
//!
//! - linear: one least-squares solve on the design `[1, x]`
//! - sigmoid: for each shape, solve `alpha` by least squares and record the SSE;
//!   the best grid point is then polished by a pattern search on `(k, x0)`
//! - quantized: for each shape and each quantum factor `q`, try a few `alpha`
//!   candidates and record the SSE of the snapped curve
//!
//! Grid points are evaluated in parallel; selection is by `(sse, q, index)` so
//! the result never depends on thread scheduling.

use nalgebra::{DMatrix, DVector};
use rayon::prelude::*;
use tracing::debug;

use crate::domain::{CurveParams, InferenceConfig, Point};
use crate::error::{Error, Result};
use crate::fit::grid::SigmoidShape;
use crate::math::{quantize, sigmoid, solve_least_squares, sse};
use crate::models::{Basis, fill_design_row, predict};

/// Relative x-spread below which the slope is not identifiable.
const X_SPREAD_EPS: f64 = 1e-12;

/// Pattern-search step sizes below which refinement stops.
const REFINE_MIN_STEP: f64 = 1e-10;

/// Best fit for a single family.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelFit {
    pub params: CurveParams,
    pub sse: f64,
    pub rmse: f64,
}

impl ModelFit {
    fn new(params: CurveParams, sse: f64, n: usize) -> Self {
        Self {
            params,
            sse,
            rmse: (sse / n.max(1) as f64).sqrt(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    idx: usize,
    shape: SigmoidShape,
    alpha: f64,
    q: u32,
    sse: f64,
}

impl Candidate {
    /// Strict ordering used for deterministic selection: SSE, then smaller
    /// quantum factor, then lower grid index.
    fn beats(&self, other: &Candidate) -> bool {
        (self.sse, self.q, self.idx) < (other.sse, other.q, other.idx)
    }
}

fn split(points: &[Point]) -> (Vec<f64>, Vec<f64>) {
    points.iter().map(|p| (p.x, p.y)).unzip()
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len().max(1) as f64
}

fn range(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}

/// Fit `y = beta·x + gamma` by least squares.
///
/// When every x is (numerically) the same the slope is not identifiable; we
/// return the flat line through the mean instead.
pub fn fit_linear(points: &[Point]) -> Result<ModelFit> {
    if points.is_empty() {
        return Err(Error::invalid_input("no data points to fit"));
    }
    let (xs, ys) = split(points);
    let n = xs.len();

    let (x_min, x_max) = range(&xs);
    let scale = x_min.abs().max(x_max.abs()).max(1.0);
    let flat = || {
        let params = CurveParams::flat(mean(&ys));
        ModelFit::new(params, sse(&xs, &ys, |x| predict(&params, x)), n)
    };
    if x_max - x_min <= X_SPREAD_EPS * scale {
        debug!("linear fit: no x spread, using flat mean");
        return Ok(flat());
    }

    let basis = Basis::Linear;
    let p = basis.coeff_count();
    let mut design = DMatrix::<f64>::zeros(n, p);
    let mut row = vec![0.0; p];
    for (i, &x) in xs.iter().enumerate() {
        fill_design_row(&basis, x, &mut row);
        for (j, v) in row.iter().enumerate() {
            design[(i, j)] = *v;
        }
    }
    let target = DVector::from_column_slice(&ys);

    let Some(coef) = solve_least_squares(&design, &target) else {
        debug!("linear fit: least squares failed, using flat mean");
        return Ok(flat());
    };
    let params = CurveParams::Linear {
        beta: coef[1],
        gamma: coef[0],
    };
    Ok(ModelFit::new(params, sse(&xs, &ys, |x| predict(&params, x)), n))
}

/// Least-squares `alpha` for a fixed sigmoid shape.
fn solve_alpha(shape: &SigmoidShape, xs: &[f64], ys: &[f64]) -> Option<f64> {
    let basis = Basis::Sigmoid {
        n: shape.n,
        k: shape.k,
        x0: shape.x0,
    };
    let mut design = DMatrix::<f64>::zeros(xs.len(), basis.coeff_count());
    let mut row = [0.0; 1];
    for (i, &x) in xs.iter().enumerate() {
        fill_design_row(&basis, x, &mut row);
        design[(i, 0)] = row[0];
    }
    let target = DVector::from_column_slice(ys);
    solve_least_squares(&design, &target).map(|coef| coef[0])
}

fn sigmoid_sse(shape: &SigmoidShape, alpha: f64, xs: &[f64], ys: &[f64]) -> f64 {
    sse(xs, ys, |x| sigmoid(x, shape.n, shape.k, shape.x0, alpha))
}

fn evaluate_sigmoid(idx: usize, shape: SigmoidShape, xs: &[f64], ys: &[f64]) -> Option<Candidate> {
    let alpha = solve_alpha(&shape, xs, ys)?;
    let sse = sigmoid_sse(&shape, alpha, xs, ys);
    sse.is_finite().then_some(Candidate {
        idx,
        shape,
        alpha,
        q: 0,
        sse,
    })
}

fn best_of(candidates: Vec<Candidate>) -> Option<Candidate> {
    candidates
        .into_iter()
        .reduce(|best, c| if c.beats(&best) { c } else { best })
}

/// Fit the generalized sigmoid over `grid`, then refine the winner.
pub fn fit_sigmoid(points: &[Point], grid: &[SigmoidShape], config: &InferenceConfig) -> Result<ModelFit> {
    if points.is_empty() {
        return Err(Error::invalid_input("no data points to fit"));
    }
    if grid.is_empty() {
        return Err(Error::invalid_argument("sigmoid grid is empty"));
    }
    let (xs, ys) = split(points);

    let candidates: Vec<Candidate> = grid
        .par_iter()
        .enumerate()
        .filter_map(|(idx, &shape)| evaluate_sigmoid(idx, shape, &xs, &ys))
        .collect();

    let Some(start) = best_of(candidates) else {
        return Err(Error::invalid_input("no valid sigmoid candidates for these samples"));
    };
    debug!(grid = grid.len(), sse = start.sse, k = start.shape.k, x0 = start.shape.x0, "sigmoid grid best");

    let (x_min, x_max) = range(&xs);
    let best = refine(start, &xs, &ys, x_max - x_min, config.refine_iters);

    let params = CurveParams::Sigmoid {
        n: best.shape.n,
        k: best.shape.k,
        x0: best.shape.x0,
        alpha: best.alpha,
    };
    Ok(ModelFit::new(params, best.sse, xs.len()))
}

/// Deterministic pattern search on `(k, x0)` with `alpha` re-solved at each probe.
///
/// `k` moves multiplicatively (so its sign is kept), `x0` additively. Step sizes
/// halve whenever no probe improves the SSE.
fn refine(start: Candidate, xs: &[f64], ys: &[f64], x_span: f64, iters: usize) -> Candidate {
    let mut best = start;
    let mut log_step = 0.25_f64;
    let mut x_step = if x_span > 0.0 { x_span / 12.0 } else { 0.0 };
    let x_floor = REFINE_MIN_STEP * x_span.max(1.0);

    for _ in 0..iters {
        let mut improved = false;
        for probe in 0..4 {
            let SigmoidShape { n, k, x0 } = best.shape;
            let shape = match probe {
                0 => SigmoidShape { n, k: k * log_step.exp(), x0 },
                1 => SigmoidShape { n, k: k * (-log_step).exp(), x0 },
                2 if x_step > 0.0 => SigmoidShape { n, k, x0: x0 + x_step },
                3 if x_step > 0.0 => SigmoidShape { n, k, x0: x0 - x_step },
                _ => continue,
            };
            if let Some(c) = evaluate_sigmoid(best.idx, shape, xs, ys) {
                if c.sse < best.sse {
                    best = c;
                    improved = true;
                }
            }
        }

        if !improved {
            log_step /= 2.0;
            x_step /= 2.0;
            if log_step < REFINE_MIN_STEP && x_step < x_floor {
                break;
            }
        }
    }
    best
}

/// Fit the quantized sigmoid: grid over shape × `q ∈ 2..=max_quantum` × alpha
/// candidates `{alpha_ls, max(y), min(y)}`.
pub fn fit_quantized(points: &[Point], grid: &[SigmoidShape], config: &InferenceConfig) -> Result<ModelFit> {
    if points.is_empty() {
        return Err(Error::invalid_input("no data points to fit"));
    }
    if grid.is_empty() {
        return Err(Error::invalid_argument("sigmoid grid is empty"));
    }
    if config.max_quantum < 2 {
        return Err(Error::invalid_argument("max quantum factor must be >= 2"));
    }
    let (xs, ys) = split(points);
    let (y_min, y_max) = range(&ys);

    let candidates: Vec<Candidate> = grid
        .par_iter()
        .enumerate()
        .filter_map(|(idx, &shape)| {
            let mut alphas: Vec<f64> = Vec::with_capacity(3);
            for a in [solve_alpha(&shape, &xs, &ys), Some(y_max), Some(y_min)]
                .into_iter()
                .flatten()
            {
                if a.is_finite() && a != 0.0 && !alphas.contains(&a) {
                    alphas.push(a);
                }
            }

            // Unit curve once per shape; alpha and q only rescale/snap it.
            let unit: Vec<f64> = xs.iter().map(|&x| sigmoid(x, shape.n, shape.k, shape.x0, 1.0)).collect();

            let mut best: Option<Candidate> = None;
            for q in 2..=config.max_quantum {
                for &alpha in &alphas {
                    let sse: f64 = unit
                        .iter()
                        .zip(ys.iter())
                        .map(|(&u, &y)| {
                            let r = y - quantize(alpha * u, q as f64);
                            r * r
                        })
                        .sum();
                    if !sse.is_finite() {
                        continue;
                    }
                    let c = Candidate { idx, shape, alpha, q, sse };
                    if best.is_none_or(|b| c.beats(&b)) {
                        best = Some(c);
                    }
                }
            }
            best
        })
        .collect();

    let Some(best) = best_of(candidates) else {
        return Err(Error::invalid_input("no valid quantized candidates for these samples"));
    };
    debug!(grid = grid.len(), sse = best.sse, q = best.q, "quantized grid best");

    let params = CurveParams::QuantizedSigmoid {
        n: best.shape.n,
        k: best.shape.k,
        x0: best.shape.x0,
        alpha: best.alpha,
        quantum_factor: best.q as f64,
    };
    Ok(ModelFit::new(params, best.sse, xs.len()))
}
