//! The built-in shape set.
//!
//! Shapes are listed in a fixed order: geometric primitives, organic figures,
//! mathematical curves, artistic patterns, then the transformation examples.

use std::collections::BTreeMap;

use serde_json::{Value, json};

use crate::domain::{
    AnimationFrame, Category, Component, ComponentKind, Complexity, ShapeMetadata, ShapeRecord,
};

fn lin(beta: f64, gamma: f64, description: &str) -> Component {
    Component::new(ComponentKind::Linear, &[("beta", beta), ("gamma", gamma)]).with_description(description)
}

fn sig(n: f64, k: f64, x0: f64, alpha: f64, description: &str) -> Component {
    Component::new(
        ComponentKind::Sigmoid,
        &[("n", n), ("k", k), ("x0", x0), ("alpha", alpha)],
    )
    .with_description(description)
}

fn qsig(n: f64, k: f64, x0: f64, alpha: f64, description: &str) -> Component {
    Component::new(
        ComponentKind::QuantumSigmoid,
        &[("n", n), ("k", k), ("x0", x0), ("alpha", alpha)],
    )
    .with_description(description)
}

fn with_param(mut component: Component, name: &str, value: f64) -> Component {
    component.params.insert(name.to_string(), value);
    component
}

fn visual(value: Value) -> BTreeMap<String, Value> {
    match value {
        Value::Object(map) => map.into_iter().collect(),
        _ => BTreeMap::new(),
    }
}

/// `count` frames; `values(i)` must produce a JSON object.
fn frames(count: usize, values: impl Fn(usize) -> Value) -> Vec<AnimationFrame> {
    (0..count)
        .map(|frame| AnimationFrame {
            frame,
            values: visual(values(frame)),
        })
        .collect()
}

fn animated(mut record: ShapeRecord, frames: Vec<AnimationFrame>) -> ShapeRecord {
    record.animation_frames = Some(frames);
    record
}

struct Entry<'a> {
    id: &'a str,
    name: &'a str,
    name_ar: &'a str,
    category: Category,
    complexity: Complexity,
    description: &'a str,
    tags: &'a [&'a str],
    cultural_significance: &'a str,
    beauty: f64,
    components: Vec<Component>,
    visual: Value,
}

impl Entry<'_> {
    fn build(self) -> ShapeRecord {
        ShapeRecord {
            id: self.id.to_string(),
            name: self.name.to_string(),
            name_ar: self.name_ar.to_string(),
            category: self.category,
            complexity: self.complexity,
            components: self.components,
            metadata: ShapeMetadata {
                description: self.description.to_string(),
                tags: self.tags.iter().map(|t| t.to_string()).collect(),
                cultural_significance: self.cultural_significance.to_string(),
                mathematical_beauty: self.beauty,
                visual_properties: visual(self.visual),
            },
            animation_frames: None,
        }
    }
}

/// All built-in shapes, in catalog order.
pub fn builtin_shapes() -> Vec<ShapeRecord> {
    let mut shapes = Vec::with_capacity(18);
    shapes.extend(geometric());
    shapes.extend(organic());
    shapes.extend(mathematical());
    shapes.extend(artistic());
    shapes.extend(transformations());
    shapes
}

fn geometric() -> Vec<ShapeRecord> {
    vec![
        Entry {
            id: "square_basic",
            name: "Square",
            name_ar: "مربع",
            category: Category::Geometric,
            complexity: Complexity::Basic,
            description: "Basic figure with four equal sides",
            tags: &["geometric", "basic", "equilateral"],
            cultural_significance: "Symbol of stability and balance",
            beauty: 0.8,
            components: vec![
                lin(1.0, 0.0, "top edge"),
                lin(0.0, 1.0, "right edge"),
                lin(-1.0, 1.0, "bottom edge"),
                lin(0.0, 0.0, "left edge"),
            ],
            visual: json!({"color": "#3498db", "line_width": 2, "fill": false, "symmetry": "4-fold"}),
        }
        .build(),
        Entry {
            id: "circle_basic",
            name: "Circle",
            name_ar: "دائرة",
            category: Category::Geometric,
            complexity: Complexity::Basic,
            description: "Ideal figure whose points are equidistant from the centre",
            tags: &["geometric", "ideal", "round"],
            cultural_significance: "Symbol of perfection and unity",
            beauty: 1.0,
            components: vec![sig(2.0, 10.0, 0.0, 1.0, "full circle")],
            visual: json!({"color": "#e74c3c", "line_width": 2, "fill": false, "symmetry": "infinite"}),
        }
        .build(),
        Entry {
            id: "triangle_basic",
            name: "Triangle",
            name_ar: "مثلث",
            category: Category::Geometric,
            complexity: Complexity::Basic,
            description: "Figure with three sides and three angles",
            tags: &["geometric", "triangular", "angular"],
            cultural_significance: "Symbol of strength and direction",
            beauty: 0.7,
            components: vec![
                lin(0.5, 0.0, "base"),
                lin(-1.0, 1.0, "left edge"),
                lin(1.0, 1.0, "right edge"),
            ],
            visual: json!({"color": "#f39c12", "line_width": 2, "fill": false, "symmetry": "3-fold"}),
        }
        .build(),
        Entry {
            id: "rectangle_basic",
            name: "Rectangle",
            name_ar: "مستطيل",
            category: Category::Geometric,
            complexity: Complexity::Basic,
            description: "Four-sided figure with right angles",
            tags: &["geometric", "rectangular", "right angles"],
            cultural_significance: "Symbol of order",
            beauty: 0.6,
            components: vec![
                lin(1.5, 0.0, "top edge"),
                lin(0.0, 1.0, "right edge"),
                lin(-1.5, 1.0, "bottom edge"),
                lin(0.0, 0.0, "left edge"),
            ],
            visual: json!({"color": "#9b59b6", "line_width": 2, "fill": false, "symmetry": "2-fold"}),
        }
        .build(),
    ]
}

fn organic() -> Vec<ShapeRecord> {
    vec![
        Entry {
            id: "cat_primitive",
            name: "Primitive Cat",
            name_ar: "قطة بدائية",
            category: Category::Organic,
            complexity: Complexity::Primitive,
            description: "Simple cat built from basic curves",
            tags: &["organic", "animal", "primitive"],
            cultural_significance: "Symbol of agility and independence",
            beauty: 0.4,
            components: vec![
                sig(1.0, 2.0, 0.0, 0.8, "body"),
                sig(1.0, 3.0, 0.5, 0.4, "head"),
                lin(0.2, 0.1, "tail"),
            ],
            visual: json!({"color": "#34495e", "line_width": 2, "fill": true, "texture": "fur"}),
        }
        .build(),
        Entry {
            id: "cat_professional",
            name: "Professional Cat",
            name_ar: "قطة محترفة",
            category: Category::Organic,
            complexity: Complexity::Professional,
            description: "Detailed cat with realistic features",
            tags: &["organic", "animal", "professional", "detailed"],
            cultural_significance: "Art growing from simplicity to complexity",
            beauty: 0.9,
            components: vec![
                qsig(3.0, 1.5, 0.0, 1.2, "detailed body"),
                sig(2.0, 4.0, 0.6, 0.6, "detailed head"),
                sig(1.0, 1.8, -0.3, 0.3, "curved tail"),
                lin(0.1, 0.05, "legs"),
                sig(1.0, 8.0, 0.7, 0.1, "ears"),
            ],
            visual: json!({
                "color": "#2c3e50",
                "line_width": 1,
                "fill": true,
                "texture": "detailed_fur",
                "shading": true,
                "whiskers": true
            }),
        }
        .build(),
        Entry {
            id: "tree_basic",
            name: "Tree",
            name_ar: "شجرة",
            category: Category::Organic,
            complexity: Complexity::Intermediate,
            description: "Tree with a trunk and leaves",
            tags: &["organic", "plant", "nature"],
            cultural_significance: "Symbol of growth and life",
            beauty: 0.7,
            components: vec![
                lin(2.0, 0.0, "trunk"),
                sig(3.0, 1.0, 0.0, 1.5, "leaves"),
                sig(2.0, 0.8, 0.2, 0.8, "branches"),
            ],
            visual: json!({
                "trunk_color": "#8b4513",
                "leaves_color": "#228b22",
                "line_width": 3,
                "seasonal": true
            }),
        }
        .build(),
        Entry {
            id: "human_simple",
            name: "Simple Human",
            name_ar: "إنسان بسيط",
            category: Category::Organic,
            complexity: Complexity::Basic,
            description: "Simple human figure",
            tags: &["organic", "human", "simple"],
            cultural_significance: "The essence of humanity",
            beauty: 0.6,
            components: vec![
                sig(2.0, 1.5, 0.0, 1.8, "body"),
                sig(1.0, 2.0, 0.5, 0.8, "head"),
                lin(0.3, 0.1, "limbs"),
            ],
            visual: json!({"color": "#d4a574", "line_width": 2, "proportions": "human", "posture": "standing"}),
        }
        .build(),
    ]
}

fn mathematical() -> Vec<ShapeRecord> {
    vec![
        Entry {
            id: "sine_wave",
            name: "Sine Wave",
            name_ar: "موجة جيبية",
            category: Category::Mathematical,
            complexity: Complexity::Intermediate,
            description: "Classic periodic wave",
            tags: &["mathematical", "wave", "periodic"],
            cultural_significance: "Basis of oscillation and music",
            beauty: 0.9,
            components: vec![sig(1.0, 1.0, 0.0, 1.0, "wave")],
            visual: json!({
                "color": "#1abc9c",
                "line_width": 2,
                "frequency": 1.0,
                "amplitude": 1.0,
                "animated": true
            }),
        }
        .build(),
        Entry {
            id: "spiral_fibonacci",
            name: "Fibonacci Spiral",
            name_ar: "حلزون فيبوناتشي",
            category: Category::Mathematical,
            complexity: Complexity::Advanced,
            description: "Spiral following the Fibonacci sequence",
            tags: &["mathematical", "spiral", "fibonacci", "golden"],
            cultural_significance: "The golden ratio in nature",
            beauty: 1.0,
            components: vec![qsig(2.0, 0.618, 0.0, 1.618, "golden spiral")],
            visual: json!({"color": "#f1c40f", "line_width": 2, "golden_ratio": true, "growth_factor": 1.618}),
        }
        .build(),
        Entry {
            id: "bezier_curve",
            name: "Bezier Curve",
            name_ar: "منحنى بيزيه",
            category: Category::Mathematical,
            complexity: Complexity::Advanced,
            description: "Smooth design curve",
            tags: &["mathematical", "curve", "smooth", "design"],
            cultural_significance: "Foundation of modern digital design",
            beauty: 0.8,
            components: vec![sig(3.0, 2.0, 0.0, 1.0, "cubic curve")],
            visual: json!({"color": "#e67e22", "line_width": 2, "control_points": 4, "smoothness": "high"}),
        }
        .build(),
    ]
}

fn artistic() -> Vec<ShapeRecord> {
    vec![
        Entry {
            id: "islamic_geometric",
            name: "Islamic Geometric Pattern",
            name_ar: "زخرفة إسلامية",
            category: Category::Artistic,
            complexity: Complexity::Professional,
            description: "Traditional geometric ornament",
            tags: &["artistic", "islamic", "ornament", "geometric"],
            cultural_significance: "Islamic heritage and geometric art",
            beauty: 0.95,
            components: vec![
                qsig(8.0, 1.0, 0.0, 1.0, "eight-fold pattern"),
                sig(4.0, 1.414, 0.0, 0.707, "square pattern"),
            ],
            visual: json!({
                "color": "#8e44ad",
                "line_width": 1,
                "symmetry": "8-fold",
                "repetitive": true,
                "traditional": true
            }),
        }
        .build(),
        Entry {
            id: "arabic_calligraphy",
            name: "Arabic Calligraphy",
            name_ar: "خط عربي",
            category: Category::Artistic,
            complexity: Complexity::Professional,
            description: "The art of Arabic script",
            tags: &["artistic", "script", "arabic", "beauty"],
            cultural_significance: "The classical art of Arabic writing",
            beauty: 0.9,
            components: vec![
                sig(2.0, 3.0, 0.0, 1.5, "stroke flow"),
                lin(0.5, 0.2, "letter uprights"),
            ],
            visual: json!({
                "color": "#2c3e50",
                "line_width": 3,
                "style": "naskh",
                "flowing": true,
                "artistic": true
            }),
        }
        .build(),
        Entry {
            id: "mandala_pattern",
            name: "Mandala Pattern",
            name_ar: "ماندالا",
            category: Category::Artistic,
            complexity: Complexity::Advanced,
            description: "Symmetric circular pattern for meditation",
            tags: &["artistic", "circular", "symmetric", "meditation"],
            cultural_significance: "Symbol of the cosmos and spiritual balance",
            beauty: 0.85,
            components: vec![
                sig(6.0, 2.0, 0.0, 1.0, "six-fold pattern"),
                sig(12.0, 1.5, 0.0, 0.8, "twelve-fold pattern"),
            ],
            visual: json!({
                "color": "#e74c3c",
                "line_width": 1,
                "symmetry": "radial",
                "meditative": true,
                "colorful": true
            }),
        }
        .build(),
    ]
}

fn transformations() -> Vec<ShapeRecord> {
    const CAT_FEATURES: [&str; 10] = [
        "body", "head", "tail", "legs", "ears", "whiskers", "fur_texture", "shading", "expression", "pose",
    ];

    vec![
        animated(
            Entry {
                id: "transform_square_to_circle",
                name: "Square to Circle Transformation",
                name_ar: "تحويل مربع إلى دائرة",
                category: Category::Abstract,
                complexity: Complexity::Intermediate,
                description: "Gradual morph from a square to a circle",
                tags: &["transformation", "adaptation", "geometric"],
                cultural_significance: "From corners to flowing form",
                beauty: 0.8,
                components: vec![with_param(
                    sig(2.0, 5.0, 0.0, 1.0, "gradual transition"),
                    "transition",
                    0.5,
                )],
                visual: json!({
                    "color_start": "#3498db",
                    "color_end": "#e74c3c",
                    "morphing": true,
                    "duration": 2.0
                }),
            }
            .build(),
            frames(21, |i| {
                json!({
                    "transition_factor": i as f64 / 20.0,
                    "shape_blend": format!("square_{}_circle_{}", 100 - i * 5, i * 5)
                })
            }),
        ),
        animated(
            Entry {
                id: "cat_evolution_sequence",
                name: "Cat Evolution Sequence",
                name_ar: "تطوير القطة",
                category: Category::Abstract,
                complexity: Complexity::Advanced,
                description: "Cat refined step by step from primitive to professional",
                tags: &["evolution", "organic", "refinement"],
                cultural_significance: "Growth of artistic skill",
                beauty: 0.9,
                components: vec![with_param(
                    qsig(3.0, 2.0, 0.0, 1.5, "progressive refinement"),
                    "evolution_factor",
                    1.0,
                )],
                visual: json!({
                    "progressive_detail": true,
                    "skill_demonstration": true,
                    "artistic_growth": true
                }),
            }
            .build(),
            frames(10, |i| {
                let complexity = match i {
                    0..=2 => "primitive",
                    3..=5 => "basic",
                    6..=7 => "intermediate",
                    _ => "professional",
                };
                json!({
                    "detail_level": i as f64 / 10.0,
                    "complexity": complexity,
                    "features_added": CAT_FEATURES[..=i]
                })
            }),
        ),
        animated(
            Entry {
                id: "animated_wave",
                name: "Animated Wave",
                name_ar: "موجة متحركة",
                category: Category::Abstract,
                complexity: Complexity::Intermediate,
                description: "Moving wave showing periodic motion",
                tags: &["animated", "wave", "periodic"],
                cultural_significance: "Rhythm of nature and time",
                beauty: 0.85,
                components: vec![with_param(sig(1.0, 1.0, 0.0, 1.0, "base wave"), "phase", 0.0)],
                visual: json!({
                    "color": "#1abc9c",
                    "animated": true,
                    "wave_motion": true,
                    "continuous": true
                }),
            }
            .build(),
            frames(20, |i| {
                json!({
                    "phase": i as f64 * 0.314,
                    "amplitude": 1.0 + 0.2 * (i as f64 * 0.1).sin(),
                    "frequency": 1.0
                })
            }),
        ),
        animated(
            Entry {
                id: "evolving_geometric_pattern",
                name: "Evolving Geometric Pattern",
                name_ar: "نمط متطور",
                category: Category::Abstract,
                complexity: Complexity::Advanced,
                description: "Geometric pattern that grows more intricate",
                tags: &["pattern", "evolution", "geometric", "complex"],
                cultural_significance: "Growth of complexity in nature and art",
                beauty: 0.9,
                components: vec![
                    with_param(qsig(4.0, 1.5, 0.0, 1.0, "base pattern"), "complexity_factor", 1.0),
                    with_param(sig(8.0, 1.0, 0.0, 0.8, "added detail"), "detail_factor", 1.0),
                ],
                visual: json!({
                    "fractal": true,
                    "self_similar": true,
                    "increasing_complexity": true,
                    "mathematical": true
                }),
            }
            .build(),
            frames(8, |i| {
                json!({
                    "complexity_level": i + 1,
                    "detail_density": i as f64 * 0.1,
                    "symmetry_order": 4 + i,
                    "fractal_depth": i.min(5)
                })
            }),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn builtin_ids_are_unique() {
        let shapes = builtin_shapes();
        assert_eq!(shapes.len(), 18);
        let ids: HashSet<&str> = shapes.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids.len(), shapes.len());
    }

    #[test]
    fn every_category_is_represented() {
        let shapes = builtin_shapes();
        for category in Category::ALL {
            assert!(shapes.iter().any(|s| s.category == category), "{category}");
        }
    }

    #[test]
    fn transformation_examples_carry_frames() {
        let shapes = builtin_shapes();
        let frame_counts: Vec<(&str, usize)> = shapes
            .iter()
            .filter_map(|s| Some((s.id.as_str(), s.animation_frames.as_ref()?.len())))
            .collect();
        assert_eq!(
            frame_counts,
            [
                ("transform_square_to_circle", 21),
                ("cat_evolution_sequence", 10),
                ("animated_wave", 20),
                ("evolving_geometric_pattern", 8),
            ]
        );

        let morph = shapes[14].animation_frames.as_ref().unwrap();
        assert_eq!(morph[20].frame, 20);
        assert_eq!(morph[20].values["transition_factor"], 1.0);
        assert_eq!(morph[4].values["shape_blend"], "square_80_circle_20");

        let cat = shapes[15].animation_frames.as_ref().unwrap();
        assert_eq!(cat[2].values["complexity"], "primitive");
        assert_eq!(cat[9].values["complexity"], "professional");
        assert_eq!(cat[9].values["features_added"].as_array().map(Vec::len), Some(10));
    }

    #[test]
    fn builtin_domains_default() {
        for shape in builtin_shapes() {
            assert_eq!(shape.domain(), (-5.0, 5.0), "{}", shape.id);
        }
    }

    #[test]
    fn builtin_params_are_finite() {
        for shape in builtin_shapes() {
            for c in &shape.components {
                assert!(c.params.values().all(|v| v.is_finite()), "{}", shape.id);
            }
        }
    }
}
