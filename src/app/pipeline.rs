//! Shared fit pipeline used by the `fit` and `sample` commands.
//!
//! samples -> inference -> residuals
//!
//! The commands then only deal with presentation (printing, plotting, export).

use std::path::Path;

use tracing::info;

use crate::catalog::ShapeCatalog;
use crate::data::{SampleSpec, generate_sample};
use crate::domain::{FitResult, InferenceConfig, Point};
use crate::error::Result;
use crate::fit::infer;
use crate::io::read_catalog_json;
use crate::report::{Residual, compute_residuals};

/// All computed outputs of a single fit run.
#[derive(Debug, Clone)]
pub struct FitRun {
    pub points: Vec<Point>,
    pub fit: FitResult,
    pub residuals: Vec<Residual>,
}

pub fn run_fit(points: Vec<Point>, config: &InferenceConfig) -> Result<FitRun> {
    let fit = infer(&points, config)?;
    let residuals = compute_residuals(&points, &fit.params)?;
    Ok(FitRun {
        points,
        fit,
        residuals,
    })
}

/// Generate a synthetic sample, then fit it.
pub fn run_sample(spec: &SampleSpec, config: &InferenceConfig) -> Result<FitRun> {
    let points = generate_sample(spec)?;
    run_fit(points, config)
}

/// The built-in catalog, or one loaded from a JSON export.
pub fn load_catalog(path: Option<&Path>) -> Result<ShapeCatalog> {
    match path {
        Some(path) => {
            let catalog = read_catalog_json(path)?;
            info!(path = %path.display(), shapes = catalog.len(), "loaded catalog");
            Ok(catalog)
        }
        None => Ok(ShapeCatalog::builtin()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CurveFamily, CurveParams};
    use crate::io::write_catalog_json;

    #[test]
    fn sample_round_trip_recovers_sigmoid() {
        let spec = SampleSpec {
            params: CurveParams::Sigmoid {
                n: 1,
                k: 1.5,
                x0: 0.5,
                alpha: 2.0,
            },
            steps: None,
            x_min: -5.0,
            x_max: 5.0,
            count: 41,
            noise: 0.0,
            random_x: false,
            seed: 1,
        };
        let run = run_sample(&spec, &InferenceConfig::default()).unwrap();
        assert_eq!(run.fit.family(), CurveFamily::Sigmoid);
        assert_eq!(run.residuals.len(), 41);
        assert!(run.residuals.iter().all(|r| r.residual.abs() < 1e-3));
    }

    #[test]
    fn load_catalog_defaults_to_builtin() {
        assert_eq!(load_catalog(None).unwrap().len(), 18);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.json");
        let mut small = ShapeCatalog::new();
        small
            .insert(ShapeCatalog::builtin().get("circle_basic").unwrap().clone())
            .unwrap();
        write_catalog_json(&path, &small).unwrap();
        let loaded = load_catalog(Some(&path)).unwrap();
        assert_eq!(loaded.ids().collect::<Vec<_>>(), ["circle_basic"]);
    }
}
