//! The curve functions every other module is built on.
//!
//! - `sigmoid(x; n, k, x0, α) = α / (1 + exp(-k·(x - x0)^n))`
//! - `linear(x; β, γ) = β·x + γ`
//! - `quantized_sigmoid`: the sigmoid snapped to multiples of `1/q`
//! - `stepped_sigmoid`: the sigmoid floored to `steps` levels of `α/steps`
//!
//! Numerical notes:
//! - For even `n` the power is taken of `|x - x0|`; for odd `n` the sign of
//!   `x - x0` is kept. This makes `(x - x0)^n` well defined for every integer `n`.
//! - The exponent argument is clamped to `[-700, 700]` so `exp` never overflows.
//! - A vanishing steepness (`|k| < 1e-9`) yields the midpoint value `α/2`.

/// Clamp bound for the exponent argument.
const EXP_CLAMP: f64 = 700.0;

/// Below this steepness the sigmoid is treated as flat.
const K_EPS: f64 = 1e-9;

/// Signed power used by the generalized sigmoid.
pub fn signed_power(term: f64, n: u32) -> f64 {
    let n = n.max(1);
    // powi takes i32; larger exponents saturate.
    let mag = term.abs().powi(i32::try_from(n).unwrap_or(i32::MAX));
    if n % 2 == 0 || term >= 0.0 { mag } else { -mag }
}

/// Generalized sigmoid.
pub fn sigmoid(x: f64, n: u32, k: f64, x0: f64, alpha: f64) -> f64 {
    if k.abs() < K_EPS {
        return alpha * 0.5;
    }
    let arg = (-k * signed_power(x - x0, n)).clamp(-EXP_CLAMP, EXP_CLAMP);
    let value = alpha / (1.0 + arg.exp());
    if value.is_finite() { value } else { alpha * 0.5 }
}

/// Linear component.
pub fn linear(x: f64, beta: f64, gamma: f64) -> f64 {
    beta * x + gamma
}

/// Snap `value` to the nearest multiple of `1/q` (half away from zero).
///
/// Factors `<= 1` leave the value untouched.
pub fn quantize(value: f64, q: f64) -> f64 {
    if !(q > 1.0) {
        return value;
    }
    (value * q).round() / q
}

/// Quantized sigmoid with discrete plateaus.
pub fn quantized_sigmoid(x: f64, n: u32, k: f64, x0: f64, alpha: f64, q: f64) -> f64 {
    quantize(sigmoid(x, n, k, x0, alpha), q)
}

/// Stepped sigmoid: floors the value to `steps` levels of height `alpha/steps`.
pub fn stepped_sigmoid(x: f64, n: u32, k: f64, x0: f64, alpha: f64, steps: u32) -> f64 {
    let base = sigmoid(x, n, k, x0, alpha);
    if steps == 0 || alpha == 0.0 {
        return base;
    }
    let step = alpha / steps as f64;
    (base / step).floor() * step
}
