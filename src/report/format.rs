//! Formatted terminal output for fits and the shape catalog.
//!
//! Formatting lives here so the math and catalog code stay free of
//! presentation concerns.

use crate::domain::{
    CatalogSummary, Component, ComponentOrigin, CurveParams, FitResult, FitWarning, Point,
    ShapeRecord, TransformStep,
};
use crate::report::Residual;

/// Full fit report: data ranges, per-family diagnostics, chosen curve.
pub fn format_fit_summary(points: &[Point], fit: &FitResult) -> String {
    let mut out = String::new();

    out.push_str("=== baserah - curve inference ===\n");
    let (x_min, x_max) = range(points.iter().map(|p| p.x));
    let (y_min, y_max) = range(points.iter().map(|p| p.y));
    out.push_str(&format!(
        "Points: n={} | x=[{x_min:.3}, {x_max:.3}] | y=[{y_min:.3}, {y_max:.3}]\n",
        points.len()
    ));

    if !fit.candidates.is_empty() {
        out.push_str("\nFamily diagnostics:\n");
        for c in &fit.candidates {
            let chosen = if c.family == fit.family() { "*" } else { " " };
            out.push_str(&format!(
                "{chosen} {:<18} SSE={:.6e}\n",
                c.family.display_name(),
                c.sse
            ));
        }
    }

    for warning in &fit.warnings {
        match warning {
            FitWarning::Degenerate { y_range } => out.push_str(&format!(
                "\nwarning: degenerate data (y range {y_range:.3e}); flat fit returned\n"
            )),
            FitWarning::FamilyExcluded { family, reason } => out.push_str(&format!(
                "\nwarning: {} family excluded: {reason}\n",
                family.display_name()
            )),
        }
    }

    out.push_str("\nChosen curve:\n");
    out.push_str(&format!("- family    : {}\n", fit.family().display_name()));
    out.push_str(&format!("- equation  : {}\n", fit.equation()));
    out.push_str(&format!("- params    : {}\n", fmt_params(&fit.params)));
    out.push_str(&format!(
        "- SSE={:.6e} RMSE={:.6e}\n",
        fit.quality.sse, fit.quality.rmse
    ));
    out.push_str(&format!("- confidence: {:.4}\n", fit.confidence));

    out
}

/// Table of the largest residuals.
pub fn format_residuals(residuals: &[Residual]) -> String {
    let mut out = String::new();
    out.push_str("Largest residuals:\n");
    out.push_str(&format!(
        "{:<5} {:>12} {:>12} {:>12} {:>12}\n",
        "#", "x", "y", "y_fit", "residual"
    ));
    for r in residuals {
        out.push_str(&format!(
            "{:<5} {:>12.4} {:>12.4} {:>12.4} {:>12.4}\n",
            r.index, r.point.x, r.point.y, r.y_fit, r.residual
        ));
    }
    out
}

/// One line per shape.
pub fn format_shape_list(shapes: &[&ShapeRecord]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<28} {:<28} {:<13} {:<13} {:>5} {:>7}\n",
        "id", "name", "category", "complexity", "terms", "beauty"
    ));
    for s in shapes {
        out.push_str(&format!(
            "{:<28} {:<28} {:<13} {:<13} {:>5} {:>7.2}\n",
            truncate(&s.id, 28),
            truncate(&s.name, 28),
            s.category,
            s.complexity,
            s.components.len(),
            s.metadata.mathematical_beauty
        ));
    }
    out.push_str(&format!("({} shapes)\n", shapes.len()));
    out
}

/// Detailed view of one shape.
pub fn format_shape(shape: &ShapeRecord) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} ({})\n", shape.name, shape.id));
    if !shape.name_ar.is_empty() {
        out.push_str(&format!("  arabic name : {}\n", shape.name_ar));
    }
    out.push_str(&format!("  category    : {}\n", shape.category));
    out.push_str(&format!("  complexity  : {}\n", shape.complexity));
    out.push_str(&format!(
        "  beauty      : {:.2}\n",
        shape.metadata.mathematical_beauty
    ));
    if !shape.metadata.description.is_empty() {
        out.push_str(&format!("  description : {}\n", shape.metadata.description));
    }
    if !shape.metadata.tags.is_empty() {
        out.push_str(&format!("  tags        : {}\n", shape.metadata.tags.join(", ")));
    }
    if !shape.metadata.cultural_significance.is_empty() {
        out.push_str(&format!(
            "  significance: {}\n",
            shape.metadata.cultural_significance
        ));
    }

    out.push_str("  equation    : f(x) = Σ components\n");
    for (i, c) in shape.components.iter().enumerate() {
        out.push_str(&format!("    [{i}] {}", format_component(c)));
        if !c.description.is_empty() {
            out.push_str(&format!("  # {}", c.description));
        }
        out.push('\n');
    }
    let (lo, hi) = shape.domain();
    out.push_str(&format!("  domain      : [{}, {}]\n", fmt_num(lo), fmt_num(hi)));
    if let Some(frames) = &shape.animation_frames {
        out.push_str(&format!("  animation   : {} frames\n", frames.len()));
    }

    if !shape.metadata.visual_properties.is_empty() {
        let props: Vec<String> = shape
            .metadata
            .visual_properties
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        out.push_str(&format!("  visual      : {}\n", props.join(" ")));
    }
    out
}

/// `kind(name=value, ...)` with params in key order.
pub fn format_component(component: &Component) -> String {
    format!(
        "{}({})",
        component.kind.as_str(),
        fmt_map(component.params.iter().map(|(k, v)| (k.as_str(), *v)))
    )
}

/// One block per transform step.
pub fn format_transform(steps: &[TransformStep]) -> String {
    let mut out = String::new();
    for s in steps {
        let color = s
            .color
            .as_ref()
            .map(|c| c.as_str().map(str::to_string).unwrap_or_else(|| c.to_string()))
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "step {:>3} progress={:.3} beauty={:.3} color={color}  {}\n",
            s.step + 1,
            s.progress,
            s.mathematical_beauty,
            s.description
        ));
        for c in &s.components {
            let origin = match c.origin {
                ComponentOrigin::Matched => "matched",
                ComponentOrigin::SourceOnly => "source",
                ComponentOrigin::TargetOnly => "target",
            };
            out.push_str(&format!(
                "    w={:.3} [{origin:<7}] {}({})\n",
                c.weight,
                c.kind.as_str(),
                fmt_map(c.params.iter().map(|(k, v)| (k.as_str(), *v)))
            ));
        }
    }
    out
}

pub fn format_summary(summary: &CatalogSummary) -> String {
    let mut out = String::new();
    out.push_str("=== shape catalog ===\n");
    out.push_str(&format!("Total shapes: {}\n", summary.total));
    out.push_str(&format!("Average beauty: {:.3}\n", summary.average_beauty));
    out.push_str(&format!("Animated shapes: {}\n", summary.animated));
    out.push_str("\nBy category:\n");
    for (category, n) in &summary.by_category {
        out.push_str(&format!("  {:<13} {n}\n", category.as_str()));
    }
    out.push_str("\nBy complexity:\n");
    for (complexity, n) in &summary.by_complexity {
        out.push_str(&format!("  {:<13} {n}\n", complexity.as_str()));
    }
    out
}

fn fmt_params(params: &CurveParams) -> String {
    match *params {
        CurveParams::Linear { beta, gamma } => fmt_map([("beta", beta), ("gamma", gamma)]),
        CurveParams::Sigmoid { n, k, x0, alpha } => {
            fmt_map([("n", n as f64), ("k", k), ("x0", x0), ("alpha", alpha)])
        }
        CurveParams::QuantizedSigmoid {
            n,
            k,
            x0,
            alpha,
            quantum_factor,
        } => fmt_map([
            ("n", n as f64),
            ("k", k),
            ("x0", x0),
            ("alpha", alpha),
            ("quantum_factor", quantum_factor),
        ]),
    }
}

fn fmt_map<'a>(pairs: impl IntoIterator<Item = (&'a str, f64)>) -> String {
    let parts: Vec<String> = pairs
        .into_iter()
        .map(|(k, v)| format!("{k}={}", fmt_num(v)))
        .collect();
    parts.join(", ")
}

/// Trim trailing zeros so integers print as `2` and others keep up to 6 decimals.
fn fmt_num(v: f64) -> String {
    let s = format!("{v:.6}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

fn range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if min.is_finite() && max.is_finite() { (min, max) } else { (0.0, 0.0) }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ShapeCatalog;
    use crate::domain::ComponentKind;

    #[test]
    fn component_formats_params_in_key_order() {
        let c = Component::new(ComponentKind::Sigmoid, &[("x0", 0.5), ("k", 2.0), ("n", 1.0)]);
        assert_eq!(format_component(&c), "sigmoid(k=2, n=1, x0=0.5)");
    }

    #[test]
    fn numbers_trim_trailing_zeros() {
        assert_eq!(fmt_num(2.0), "2");
        assert_eq!(fmt_num(0.618), "0.618");
        assert_eq!(fmt_num(-0.0), "0");
        assert_eq!(fmt_num(1.0 / 3.0), "0.333333");
    }

    #[test]
    fn shape_list_has_header_and_count() {
        let catalog = ShapeCatalog::builtin();
        let shapes: Vec<&ShapeRecord> = catalog.iter().collect();
        let txt = format_shape_list(&shapes);
        assert!(txt.starts_with("id "));
        assert!(txt.contains("circle_basic"));
        assert!(txt.ends_with("(18 shapes)\n"));
    }

    #[test]
    fn shape_detail_lists_components() {
        let catalog = ShapeCatalog::builtin();
        let txt = format_shape(catalog.get("circle_basic").unwrap());
        assert!(txt.contains("[0] sigmoid(alpha=1, k=10, n=2, x0=0)  # full circle"));
        assert!(txt.contains("arabic name : دائرة"));
        assert!(txt.contains("domain      : [-5, 5]"));
        assert!(!txt.contains("animation"));

        let morph = format_shape(catalog.get("transform_square_to_circle").unwrap());
        assert!(morph.contains("animation   : 21 frames"));
    }

    #[test]
    fn summary_reports_animated_count() {
        let txt = format_summary(&ShapeCatalog::builtin().summary());
        assert!(txt.contains("Total shapes: 18\n"));
        assert!(txt.contains("Animated shapes: 4\n"));
    }

    #[test]
    fn transform_shows_weights_and_color() {
        let catalog = ShapeCatalog::builtin();
        let steps = catalog.transform("square_basic", "circle_basic", 2).unwrap();
        let txt = format_transform(&steps);
        assert!(txt.contains("color=#3498db"));
        assert!(txt.contains("w=0.000 [source ] linear"));
        assert!(txt.contains("w=1.000 [target ] sigmoid"));
    }

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate("abcdef", 4), "abc.");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
