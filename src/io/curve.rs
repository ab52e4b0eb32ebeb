//! Read/write fit JSON files.
//!
//! A fit file is the portable form of an inference run:
//! - the full `FitResult` (family, params, quality, candidates)
//! - the samples it was fitted on
//! - a precomputed curve grid for quick plotting

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{FitResult, Point};
use crate::error::{Error, Result};
use crate::models::predict;

const GRID_POINTS: usize = 101;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveGrid {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitFile {
    pub tool: String,
    pub equation: String,
    pub fit: FitResult,
    pub points: Vec<Point>,
    pub grid: CurveGrid,
}

impl FitFile {
    pub fn new(fit: &FitResult, points: &[Point]) -> Self {
        let (x_min, x_max) = points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p.x), hi.max(p.x)));
        Self {
            tool: "baserah".to_string(),
            equation: fit.equation(),
            fit: fit.clone(),
            points: points.to_vec(),
            grid: build_grid(fit, x_min, x_max, GRID_POINTS),
        }
    }
}

pub fn write_fit_json(path: &Path, fit: &FitResult, points: &[Point]) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &FitFile::new(fit, points))?;
    writer.flush().map_err(|e| Error::io(path, e))
}

pub fn read_fit_json(path: &Path) -> Result<FitFile> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

fn build_grid(fit: &FitResult, x_min: f64, x_max: f64, n: usize) -> CurveGrid {
    let n = n.max(2);
    let (mut x0, mut x1) = (x_min, x_max);
    if !(x0.is_finite() && x1.is_finite()) || x1 < x0 {
        x0 = -1.0;
        x1 = 1.0;
    }
    if (x1 - x0).abs() < 1e-9 {
        x0 -= 0.5;
        x1 += 0.5;
    }

    let x: Vec<f64> = (0..n)
        .map(|i| x0 + (x1 - x0) * i as f64 / (n as f64 - 1.0))
        .collect();
    let y = x.iter().map(|&v| predict(&fit.params, v)).collect();
    CurveGrid { x, y }
}
