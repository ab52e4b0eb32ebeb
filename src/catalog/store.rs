//! In-memory shape catalog.
//!
//! Records are kept in insertion order with a side index by id; every listing
//! (filter, search, export) preserves that order.

use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

use crate::catalog::builtin::builtin_shapes;
use crate::domain::{CatalogSummary, Category, Complexity, ShapeRecord};
use crate::error::{Error, Result};
use crate::models::evaluate_components;

#[derive(Debug, Clone, Default)]
pub struct ShapeCatalog {
    shapes: Vec<ShapeRecord>,
    index: HashMap<String, usize>,
}

impl ShapeCatalog {
    /// Empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog pre-populated with the built-in shapes.
    ///
    /// The built-in records are not re-validated here; the tests below run them
    /// through [`insert`](Self::insert).
    pub fn builtin() -> Self {
        let shapes = builtin_shapes();
        let index: HashMap<String, usize> = shapes
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id.clone(), i))
            .collect();
        debug_assert_eq!(index.len(), shapes.len(), "duplicate built-in shape id");
        debug!(shapes = shapes.len(), "loaded built-in catalog");
        Self { shapes, index }
    }

    /// Build a catalog from records, rejecting the first invalid one.
    pub fn from_records(records: impl IntoIterator<Item = ShapeRecord>) -> Result<Self> {
        let mut catalog = Self::new();
        for record in records {
            catalog.insert(record)?;
        }
        Ok(catalog)
    }

    /// Append a record.
    ///
    /// Fails with [`Error::InvalidArgument`] on an empty or duplicate id, a
    /// non-finite component parameter, or an empty component domain.
    pub fn insert(&mut self, record: ShapeRecord) -> Result<()> {
        if record.id.trim().is_empty() {
            return Err(Error::invalid_argument("shape id must not be empty"));
        }
        if self.contains(&record.id) {
            return Err(Error::invalid_argument(format!(
                "duplicate shape id '{}'",
                record.id
            )));
        }
        for (i, component) in record.components.iter().enumerate() {
            if let Some((name, value)) = component.params.iter().find(|(_, v)| !v.is_finite()) {
                return Err(Error::invalid_argument(format!(
                    "shape '{}' component {i}: parameter '{name}' is not finite ({value})",
                    record.id
                )));
            }
            let (lo, hi) = component.domain;
            if !(lo.is_finite() && hi.is_finite() && lo < hi) {
                return Err(Error::invalid_argument(format!(
                    "shape '{}' component {i}: invalid domain [{lo}, {hi}]",
                    record.id
                )));
            }
        }

        self.index.insert(record.id.clone(), self.shapes.len());
        self.shapes.push(record);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<&ShapeRecord> {
        self.index
            .get(id)
            .map(|&i| &self.shapes[i])
            .ok_or_else(|| Error::not_found(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShapeRecord> {
        self.shapes.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.shapes.iter().map(|s| s.id.as_str())
    }

    pub fn list_by_category(&self, category: Category) -> Vec<&ShapeRecord> {
        self.shapes.iter().filter(|s| s.category == category).collect()
    }

    pub fn list_by_complexity(&self, complexity: Complexity) -> Vec<&ShapeRecord> {
        self.shapes
            .iter()
            .filter(|s| s.complexity == complexity)
            .collect()
    }

    /// Like [`list_by_category`](Self::list_by_category) but takes the string tag.
    pub fn list_by_category_tag(&self, tag: &str) -> Result<Vec<&ShapeRecord>> {
        Ok(self.list_by_category(tag.parse()?))
    }

    /// Like [`list_by_complexity`](Self::list_by_complexity) but takes the string tag.
    pub fn list_by_complexity_tag(&self, tag: &str) -> Result<Vec<&ShapeRecord>> {
        Ok(self.list_by_complexity(tag.parse()?))
    }

    /// Case-insensitive substring search over the English and Arabic display names.
    ///
    /// An empty query matches every record.
    pub fn search(&self, query: &str) -> Vec<&ShapeRecord> {
        let needle = query.to_lowercase();
        self.shapes
            .iter()
            .filter(|s| {
                s.name.to_lowercase().contains(&needle) || s.name_ar.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn summary(&self) -> CatalogSummary {
        let by_category = Category::ALL
            .into_iter()
            .map(|c| (c, self.shapes.iter().filter(|s| s.category == c).count()))
            .collect();
        let by_complexity = Complexity::ALL
            .into_iter()
            .map(|c| (c, self.shapes.iter().filter(|s| s.complexity == c).count()))
            .collect();
        let average_beauty = if self.shapes.is_empty() {
            0.0
        } else {
            self.shapes
                .iter()
                .map(|s| s.metadata.mathematical_beauty)
                .sum::<f64>()
                / self.shapes.len() as f64
        };

        CatalogSummary {
            total: self.shapes.len(),
            by_category,
            by_complexity,
            animated: self.shapes.iter().filter(|s| s.is_animated()).count(),
            average_beauty,
            ids: self.shapes.iter().map(|s| s.id.clone()).collect(),
        }
    }

    /// Value of a shape's equation (sum of its components) at `x`.
    pub fn evaluate(&self, id: &str, x: f64) -> Result<f64> {
        Ok(evaluate_components(&self.get(id)?.components, x))
    }
}

/// Serializes as one object mapping id → record, in insertion order.
impl Serialize for ShapeCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.shapes.len()))?;
        for shape in &self.shapes {
            map.serialize_entry(&shape.id, shape)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Component, ComponentKind, ShapeMetadata};
    use approx::assert_relative_eq;

    fn record(id: &str, name: &str) -> ShapeRecord {
        ShapeRecord {
            id: id.to_string(),
            name: name.to_string(),
            name_ar: String::new(),
            category: Category::Abstract,
            complexity: Complexity::Basic,
            components: vec![Component::new(ComponentKind::Linear, &[("beta", 1.0)])],
            metadata: ShapeMetadata::default(),
            animation_frames: None,
        }
    }

    #[test]
    fn builtin_records_pass_insert_validation() {
        let validated = ShapeCatalog::from_records(builtin_shapes()).unwrap();
        let builtin = ShapeCatalog::builtin();
        assert_eq!(validated.len(), 18);
        assert!(validated.ids().eq(builtin.ids()));
        assert!(builtin.contains("mandala_pattern"));
        assert!(!builtin.contains("Mandala_Pattern"));
    }

    #[test]
    fn insert_rejects_empty_domain() {
        let mut catalog = ShapeCatalog::new();
        let mut bad = record("d", "D");
        bad.components[0].domain = (2.0, 2.0);
        assert!(matches!(catalog.insert(bad), Err(Error::InvalidArgument(_))));
        let mut inf = record("e", "E");
        inf.components[0].domain = (0.0, f64::INFINITY);
        assert!(matches!(catalog.insert(inf), Err(Error::InvalidArgument(_))));
        assert!(catalog.is_empty());
    }

    #[test]
    fn every_id_round_trips_through_get() {
        let catalog = ShapeCatalog::builtin();
        assert_eq!(catalog.len(), 18);
        for id in catalog.ids() {
            assert_eq!(catalog.get(id).unwrap().id, id);
        }
    }

    #[test]
    fn unknown_id_is_not_found() {
        let catalog = ShapeCatalog::builtin();
        let err = catalog.get("dodecahedron").unwrap_err();
        assert!(matches!(err, Error::NotFound { ref id } if id == "dodecahedron"));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn insert_rejects_duplicates_and_non_finite() {
        let mut catalog = ShapeCatalog::new();
        catalog.insert(record("a", "A")).unwrap();
        assert!(matches!(
            catalog.insert(record("a", "Again")),
            Err(Error::InvalidArgument(_))
        ));

        let mut bad = record("b", "B");
        bad.components[0].params.insert("gamma".to_string(), f64::NAN);
        assert!(matches!(catalog.insert(bad), Err(Error::InvalidArgument(_))));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn filters_preserve_insertion_order() {
        let catalog = ShapeCatalog::builtin();
        let geometric: Vec<&str> = catalog
            .list_by_category(Category::Geometric)
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(
            geometric,
            ["square_basic", "circle_basic", "triangle_basic", "rectangle_basic"]
        );

        let professional = catalog.list_by_complexity_tag("Professional").unwrap();
        assert_eq!(professional.len(), 3);
        assert!(catalog.list_by_category_tag("fractal").is_err());
    }

    #[test]
    fn search_is_case_insensitive() {
        let catalog = ShapeCatalog::builtin();
        let hits: Vec<&str> = catalog.search("CAT").iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            hits,
            ["cat_primitive", "cat_professional", "cat_evolution_sequence"]
        );
        assert_eq!(catalog.search("دائرة").len(), 2);
        assert_eq!(catalog.search("").len(), catalog.len());
        assert!(catalog.search("zzz").is_empty());
    }

    #[test]
    fn summary_counts_add_up() {
        let catalog = ShapeCatalog::builtin();
        let summary = catalog.summary();
        assert_eq!(summary.total, 18);
        assert_eq!(summary.by_category.iter().map(|(_, n)| n).sum::<usize>(), 18);
        assert_eq!(summary.by_complexity.iter().map(|(_, n)| n).sum::<usize>(), 18);
        assert_eq!(summary.animated, 4);
        assert!(summary.average_beauty > 0.0 && summary.average_beauty <= 1.0);
        assert_eq!(summary.ids.first().map(String::as_str), Some("square_basic"));
        assert_eq!(ShapeCatalog::new().summary().average_beauty, 0.0);
    }

    #[test]
    fn evaluate_sums_components() {
        let catalog = ShapeCatalog::builtin();
        // Circle: single sigmoid with alpha 1 centred at 0.
        assert_relative_eq!(catalog.evaluate("circle_basic", 0.0).unwrap(), 0.5);
        // Square: slopes cancel, intercepts sum to 2.
        assert_relative_eq!(catalog.evaluate("square_basic", 3.0).unwrap(), 2.0);
    }

    #[test]
    fn serializes_in_insertion_order() {
        let mut catalog = ShapeCatalog::new();
        catalog.insert(record("zeta", "Z")).unwrap();
        catalog.insert(record("alpha", "A")).unwrap();
        let json = serde_json::to_string(&catalog).unwrap();
        let zeta = json.find("\"zeta\"").unwrap();
        let alpha = json.find("\"alpha\"").unwrap();
        assert!(zeta < alpha);
    }
}
