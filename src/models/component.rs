//! Shape equations: sums of curve components.
//!
//! `f(x) = Σ component_i(x)`, where each component is one of the curve
//! functions with its own parameter map.

use crate::domain::{BlendedComponent, Component, ComponentKind, CurveParams};
use crate::math::{linear, quantized_sigmoid, sigmoid};

/// Interpret a float parameter as a sharpness exponent (rounded, in `1..=i32::MAX`).
pub fn sharpness(n: f64) -> u32 {
    if n.is_finite() && n >= 1.0 {
        n.round().min(i32::MAX as f64) as u32
    } else {
        1
    }
}

fn evaluate_kind(kind: ComponentKind, param: impl Fn(&str) -> f64, x: f64) -> f64 {
    match kind {
        ComponentKind::Linear => linear(x, param("beta"), param("gamma")),
        ComponentKind::Sigmoid => sigmoid(
            x,
            sharpness(param("n")),
            param("k"),
            param("x0"),
            param("alpha"),
        ),
        ComponentKind::QuantumSigmoid => quantized_sigmoid(
            x,
            sharpness(param("n")),
            param("k"),
            param("x0"),
            param("alpha"),
            param("quantum_factor"),
        ),
    }
}

pub fn evaluate_component(component: &Component, x: f64) -> f64 {
    evaluate_kind(component.kind, |name| component.param(name), x)
}

/// Evaluate a whole shape equation at `x`.
pub fn evaluate_components(components: &[Component], x: f64) -> f64 {
    components.iter().map(|c| evaluate_component(c, x)).sum()
}

/// Evaluate a transform step's weighted equation at `x`.
pub fn evaluate_blended(components: &[BlendedComponent], x: f64) -> f64 {
    components
        .iter()
        .filter(|c| c.weight != 0.0)
        .map(|c| {
            let param = |name: &str| {
                c.params
                    .get(name)
                    .copied()
                    .unwrap_or_else(|| crate::domain::default_param(name))
            };
            c.weight * evaluate_kind(c.kind, param, x)
        })
        .sum()
}

/// Convert fitted params into a catalog component.
pub fn component_from_params(params: &CurveParams) -> Component {
    match *params {
        CurveParams::Linear { beta, gamma } => {
            Component::new(ComponentKind::Linear, &[("beta", beta), ("gamma", gamma)])
        }
        CurveParams::Sigmoid { n, k, x0, alpha } => Component::new(
            ComponentKind::Sigmoid,
            &[("n", n as f64), ("k", k), ("x0", x0), ("alpha", alpha)],
        ),
        CurveParams::QuantizedSigmoid {
            n,
            k,
            x0,
            alpha,
            quantum_factor,
        } => Component::new(
            ComponentKind::QuantumSigmoid,
            &[
                ("n", n as f64),
                ("k", k),
                ("x0", x0),
                ("alpha", alpha),
                ("quantum_factor", quantum_factor),
            ],
        ),
    }
}

/// Read a component back as typed params (defaults fill missing keys).
pub fn params_from_component(component: &Component) -> CurveParams {
    let p = |name: &str| component.param(name);
    match component.kind {
        ComponentKind::Linear => CurveParams::Linear {
            beta: p("beta"),
            gamma: p("gamma"),
        },
        ComponentKind::Sigmoid => CurveParams::Sigmoid {
            n: sharpness(p("n")),
            k: p("k"),
            x0: p("x0"),
            alpha: p("alpha"),
        },
        ComponentKind::QuantumSigmoid => CurveParams::QuantizedSigmoid {
            n: sharpness(p("n")),
            k: p("k"),
            x0: p("x0"),
            alpha: p("alpha"),
            quantum_factor: p("quantum_factor"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ComponentOrigin;
    use crate::models::predict;

    #[test]
    fn equation_sums_components() {
        let comps = vec![
            Component::new(ComponentKind::Linear, &[("beta", 1.0), ("gamma", 0.5)]),
            Component::new(ComponentKind::Sigmoid, &[("k", 3.0), ("alpha", 2.0)]),
        ];
        // x = 0: linear 0.5 + sigmoid 1.0
        assert!((evaluate_components(&comps, 0.0) - 1.5).abs() < 1e-12);
    }

    #[test]
    fn params_round_trip_through_component() {
        let p = CurveParams::QuantizedSigmoid {
            n: 2,
            k: 1.5,
            x0: -0.25,
            alpha: 3.0,
            quantum_factor: 8.0,
        };
        let c = component_from_params(&p);
        assert_eq!(c.kind, ComponentKind::QuantumSigmoid);
        assert_eq!(params_from_component(&c), p);
        for x in [-2.0, 0.0, 0.3, 4.0] {
            assert_eq!(evaluate_component(&c, x), predict(&p, x));
        }
    }

    #[test]
    fn fractional_sharpness_rounds() {
        assert_eq!(sharpness(2.4), 2);
        assert_eq!(sharpness(2.5), 3);
        assert_eq!(sharpness(0.2), 1);
        assert_eq!(sharpness(f64::NAN), 1);
        assert_eq!(sharpness(1e12), i32::MAX as u32);
    }

    #[test]
    fn blended_weight_scales_value() {
        let c = BlendedComponent {
            kind: ComponentKind::Linear,
            params: [("beta".to_string(), 0.0), ("gamma".to_string(), 4.0)]
                .into_iter()
                .collect(),
            weight: 0.25,
            origin: ComponentOrigin::SourceOnly,
        };
        assert_eq!(evaluate_blended(&[c], 10.0), 1.0);
    }
}
