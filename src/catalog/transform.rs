//! Transformation sequences between two shapes.
//!
//! Components are paired by kind in order of appearance: the j-th sigmoid of
//! the source pairs with the j-th sigmoid of the target. Paired params are
//! interpolated linearly; unpaired components cross-fade around the midpoint.

use std::collections::BTreeMap;

use tracing::debug;

use crate::catalog::store::ShapeCatalog;
use crate::domain::{
    BlendedComponent, Component, ComponentKind, ComponentOrigin, ShapeRecord, TransformStep,
    default_param,
};
use crate::error::{Error, Result};

impl ShapeCatalog {
    /// Interpolate from `source_id` to `target_id` in `steps` records.
    ///
    /// Record `i` has progress `(i + 1) / steps`, so the last record is the target.
    pub fn transform(&self, source_id: &str, target_id: &str, steps: usize) -> Result<Vec<TransformStep>> {
        if steps < 1 {
            return Err(Error::invalid_argument("transform steps must be >= 1"));
        }
        let source = self.get(source_id)?;
        let target = self.get(target_id)?;
        debug!(source = source_id, target = target_id, steps, "building transform sequence");

        let pairs = pair_components(&source.components, &target.components);
        Ok((0..steps)
            .map(|i| {
                let t = (i + 1) as f64 / steps as f64;
                blend_step(source, target, &pairs, i, steps, t)
            })
            .collect())
    }
}

type Pair<'a> = (Option<&'a Component>, Option<&'a Component>);

fn pair_components<'a>(source: &'a [Component], target: &'a [Component]) -> Vec<Pair<'a>> {
    let of_kind = |list: &'a [Component], kind: ComponentKind| -> Vec<&'a Component> {
        list.iter().filter(|c| c.kind == kind).collect()
    };

    let mut seen: BTreeMap<&'static str, usize> = BTreeMap::new();
    let mut pairs = Vec::with_capacity(source.len().max(target.len()));
    for c in source {
        let j = seen.entry(c.kind.as_str()).or_insert(0);
        pairs.push((Some(c), of_kind(target, c.kind).get(*j).copied()));
        *j += 1;
    }

    let mut seen_target: BTreeMap<&'static str, usize> = BTreeMap::new();
    for c in target {
        let j = seen_target.entry(c.kind.as_str()).or_insert(0);
        if *j >= of_kind(source, c.kind).len() {
            pairs.push((None, Some(c)));
        }
        *j += 1;
    }
    pairs
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn blend_params(source: &Component, target: &Component, t: f64) -> BTreeMap<String, f64> {
    source
        .params
        .keys()
        .chain(target.params.keys())
        .map(|name| {
            let a = source.params.get(name).copied().unwrap_or_else(|| default_param(name));
            let b = target.params.get(name).copied().unwrap_or_else(|| default_param(name));
            (name.clone(), lerp(a, b, t))
        })
        .collect()
}

fn blend_component(pair: &Pair<'_>, t: f64) -> Option<BlendedComponent> {
    match *pair {
        (Some(s), Some(d)) => Some(BlendedComponent {
            kind: s.kind,
            params: blend_params(s, d, t),
            weight: 1.0,
            origin: ComponentOrigin::Matched,
        }),
        (Some(s), None) => Some(BlendedComponent {
            kind: s.kind,
            params: s.params.clone(),
            weight: if t <= 0.5 { 1.0 } else { 2.0 * (1.0 - t) },
            origin: ComponentOrigin::SourceOnly,
        }),
        (None, Some(d)) => Some(BlendedComponent {
            kind: d.kind,
            params: d.params.clone(),
            weight: if t <= 0.5 { 0.0 } else { 2.0 * t - 1.0 },
            origin: ComponentOrigin::TargetOnly,
        }),
        (None, None) => None,
    }
}

fn blend_step(
    source: &ShapeRecord,
    target: &ShapeRecord,
    pairs: &[Pair<'_>],
    step: usize,
    steps: usize,
    t: f64,
) -> TransformStep {
    let side = if t <= 0.5 { source } else { target };
    TransformStep {
        step,
        progress: t,
        components: pairs.iter().filter_map(|p| blend_component(p, t)).collect(),
        mathematical_beauty: lerp(
            source.metadata.mathematical_beauty,
            target.metadata.mathematical_beauty,
            t,
        ),
        color: side.metadata.visual_properties.get("color").cloned(),
        description: format!(
            "{} to {} (step {}/{steps})",
            source.name,
            target.name,
            step + 1
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{evaluate_blended, evaluate_components};
    use approx::assert_relative_eq;

    #[test]
    fn single_step_lands_on_target() {
        let catalog = ShapeCatalog::builtin();
        let seq = catalog.transform("cat_primitive", "cat_professional", 1).unwrap();
        assert_eq!(seq.len(), 1);
        assert_eq!(seq[0].progress, 1.0);

        let target = catalog.get("cat_professional").unwrap();
        for x in [-1.0, 0.0, 0.4, 2.0] {
            assert_relative_eq!(
                evaluate_blended(&seq[0].components, x),
                evaluate_components(&target.components, x),
                epsilon = 1e-12
            );
        }
        assert_relative_eq!(seq[0].mathematical_beauty, 0.9);
        assert_eq!(seq[0].color, Some(serde_json::json!("#2c3e50")));
    }

    #[test]
    fn self_transform_is_constant() {
        let catalog = ShapeCatalog::builtin();
        let tree = catalog.get("tree_basic").unwrap();
        let seq = catalog.transform("tree_basic", "tree_basic", 5).unwrap();
        assert_eq!(seq.len(), 5);
        for step in &seq {
            assert_eq!(step.components.len(), tree.components.len());
            for (blended, original) in step.components.iter().zip(&tree.components) {
                assert_eq!(blended.kind, original.kind);
                assert_eq!(blended.params, original.params);
                assert_eq!(blended.origin, ComponentOrigin::Matched);
            }
        }
    }

    #[test]
    fn progress_runs_to_one() {
        let catalog = ShapeCatalog::builtin();
        let seq = catalog.transform("square_basic", "circle_basic", 4).unwrap();
        let progress: Vec<f64> = seq.iter().map(|s| s.progress).collect();
        assert_eq!(progress, [0.25, 0.5, 0.75, 1.0]);
        assert_eq!(seq[3].step, 3);
    }

    #[test]
    fn unmatched_components_cross_fade() {
        let catalog = ShapeCatalog::builtin();
        // Square: four linear edges. Circle: one sigmoid. Nothing pairs up.
        let seq = catalog.transform("square_basic", "circle_basic", 4).unwrap();
        let weights = |i: usize, origin: ComponentOrigin| -> Vec<f64> {
            seq[i]
                .components
                .iter()
                .filter(|c| c.origin == origin)
                .map(|c| c.weight)
                .collect()
        };
        assert_eq!(weights(1, ComponentOrigin::SourceOnly), [1.0; 4]);
        assert_eq!(weights(1, ComponentOrigin::TargetOnly), [0.0]);
        assert_eq!(weights(2, ComponentOrigin::SourceOnly), [0.5; 4]);
        assert_eq!(weights(2, ComponentOrigin::TargetOnly), [0.5]);
        assert_eq!(weights(3, ComponentOrigin::SourceOnly), [0.0; 4]);
        assert_eq!(weights(3, ComponentOrigin::TargetOnly), [1.0]);

        assert_eq!(seq[1].color, Some(serde_json::json!("#3498db")));
        assert_eq!(seq[2].color, Some(serde_json::json!("#e74c3c")));
    }

    #[test]
    fn missing_params_use_kind_defaults() {
        let s = Component::new(ComponentKind::Sigmoid, &[("k", 3.0)]);
        let d = Component::new(ComponentKind::Sigmoid, &[("alpha", 3.0)]);
        let params = blend_params(&s, &d, 0.5);
        // k: 3 -> default 1, alpha: default 1 -> 3
        assert_eq!(params["k"], 2.0);
        assert_eq!(params["alpha"], 2.0);
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn pairs_by_kind_in_order() {
        let source = vec![
            Component::new(ComponentKind::Sigmoid, &[("k", 1.0)]),
            Component::new(ComponentKind::Linear, &[]),
            Component::new(ComponentKind::Sigmoid, &[("k", 2.0)]),
        ];
        let target = vec![
            Component::new(ComponentKind::Linear, &[]),
            Component::new(ComponentKind::Sigmoid, &[("k", 10.0)]),
            Component::new(ComponentKind::Linear, &[("beta", 5.0)]),
        ];
        let pairs = pair_components(&source, &target);
        assert_eq!(pairs.len(), 4);
        assert_eq!(pairs[0].1.map(|c| c.param("k")), Some(10.0));
        assert_eq!(pairs[1].1.map(|c| c.kind), Some(ComponentKind::Linear));
        assert!(pairs[2].1.is_none());
        assert!(pairs[3].0.is_none());
        assert_eq!(pairs[3].1.map(|c| c.param("beta")), Some(5.0));
    }

    #[test]
    fn errors() {
        let catalog = ShapeCatalog::builtin();
        assert!(matches!(
            catalog.transform("square_basic", "circle_basic", 0),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            catalog.transform("square_basic", "nope", 3),
            Err(Error::NotFound { .. })
        ));
    }
}
