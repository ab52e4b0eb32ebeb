//! Shape catalog types.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Curve component kinds that a shape equation is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Linear,
    Sigmoid,
    QuantumSigmoid,
}

impl ComponentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ComponentKind::Linear => "linear",
            ComponentKind::Sigmoid => "sigmoid",
            ComponentKind::QuantumSigmoid => "quantum_sigmoid",
        }
    }
}

/// Value used when a component does not set a parameter.
///
/// Unknown (purely descriptive) parameters default to `0.0`.
pub fn default_param(name: &str) -> f64 {
    match name {
        "n" | "k" | "alpha" | "beta" | "quantum_factor" => 1.0,
        _ => 0.0,
    }
}

/// x-interval a component is drawn over when none is given.
pub const DEFAULT_DOMAIN: (f64, f64) = (-5.0, 5.0);

fn default_domain() -> (f64, f64) {
    DEFAULT_DOMAIN
}

/// One term of a shape equation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    pub params: BTreeMap<String, f64>,
    /// Drawing interval `(x_min, x_max)`.
    #[serde(default = "default_domain")]
    pub domain: (f64, f64),
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl Component {
    pub fn new(kind: ComponentKind, params: &[(&str, f64)]) -> Self {
        Self {
            kind,
            params: params.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            domain: DEFAULT_DOMAIN,
            description: String::new(),
        }
    }

    pub fn with_domain(mut self, x_min: f64, x_max: f64) -> Self {
        self.domain = (x_min, x_max);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Parameter value, falling back to [`default_param`].
    pub fn param(&self, name: &str) -> f64 {
        self.params
            .get(name)
            .copied()
            .unwrap_or_else(|| default_param(name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Geometric,
    Organic,
    Abstract,
    Mathematical,
    Artistic,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Geometric,
        Category::Organic,
        Category::Abstract,
        Category::Mathematical,
        Category::Artistic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Geometric => "geometric",
            Category::Organic => "organic",
            Category::Abstract => "abstract",
            Category::Mathematical => "mathematical",
            Category::Artistic => "artistic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Primitive,
    Basic,
    Intermediate,
    Advanced,
    Professional,
}

impl Complexity {
    pub const ALL: [Complexity; 5] = [
        Complexity::Primitive,
        Complexity::Basic,
        Complexity::Intermediate,
        Complexity::Advanced,
        Complexity::Professional,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Complexity::Primitive => "primitive",
            Complexity::Basic => "basic",
            Complexity::Intermediate => "intermediate",
            Complexity::Advanced => "advanced",
            Complexity::Professional => "professional",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(tag))
            .ok_or_else(|| Error::invalid_argument(format!("unknown category tag '{s}'")))
    }
}

impl FromStr for Complexity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        Complexity::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(tag))
            .ok_or_else(|| Error::invalid_argument(format!("unknown complexity tag '{s}'")))
    }
}

/// Descriptive data carried alongside a shape's equation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeMetadata {
    pub description: String,
    pub tags: Vec<String>,
    pub cultural_significance: String,
    /// Subjective "mathematical beauty" score in `[0, 1]`.
    pub mathematical_beauty: f64,
    /// Rendering hints (colour, line width, symmetry, ...). Opaque to this crate
    /// except for `color`, which transforms switch at the midpoint.
    pub visual_properties: BTreeMap<String, serde_json::Value>,
}

/// One keyframe of a shape animation. Apart from the index, frame values are
/// free-form and differ per shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationFrame {
    pub frame: usize,
    #[serde(flatten)]
    pub values: BTreeMap<String, serde_json::Value>,
}

/// A named catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeRecord {
    pub id: String,
    /// Display name (English).
    pub name: String,
    #[serde(default)]
    pub name_ar: String,
    pub category: Category,
    pub complexity: Complexity,
    pub components: Vec<Component>,
    #[serde(default)]
    pub metadata: ShapeMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation_frames: Option<Vec<AnimationFrame>>,
}

impl ShapeRecord {
    /// Union of the component domains, or [`DEFAULT_DOMAIN`] without components.
    pub fn domain(&self) -> (f64, f64) {
        self.components
            .iter()
            .map(|c| c.domain)
            .reduce(|(lo, hi), (a, b)| (lo.min(a), hi.max(b)))
            .unwrap_or(DEFAULT_DOMAIN)
    }

    pub fn is_animated(&self) -> bool {
        self.animation_frames.is_some()
    }
}

/// Where a blended component came from during a transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentOrigin {
    /// Present in both shapes; params interpolated.
    Matched,
    /// Present only in the source; fades out after the midpoint.
    SourceOnly,
    /// Present only in the target; fades in after the midpoint.
    TargetOnly,
}

/// A component inside a transform step. Its value is scaled by `weight`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlendedComponent {
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    pub params: BTreeMap<String, f64>,
    pub weight: f64,
    pub origin: ComponentOrigin,
}

/// One intermediate record of a shape transformation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformStep {
    /// Zero-based step index.
    pub step: usize,
    /// Interpolation factor in `(0, 1]`.
    pub progress: f64,
    pub components: Vec<BlendedComponent>,
    pub mathematical_beauty: f64,
    pub color: Option<serde_json::Value>,
    pub description: String,
}

/// Aggregate view of a catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub total: usize,
    pub by_category: Vec<(Category, usize)>,
    pub by_complexity: Vec<(Complexity, usize)>,
    /// Shapes carrying animation frames.
    pub animated: usize,
    pub average_beauty: f64,
    pub ids: Vec<String>,
}
