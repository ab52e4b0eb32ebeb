//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - curve samples, families, and fit outputs (`Point`, `CurveParams`, `FitResult`)
//! - search settings (`InferenceConfig`)
//! - shape catalog records and transform steps (`ShapeRecord`, `TransformStep`)

pub mod shape;
pub mod types;

pub use shape::*;
pub use types::*;
