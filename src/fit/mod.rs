//! Curve fitting orchestration.
//!
//! Responsibilities:
//!
//! - generate the sigmoid `(n, k, x0)` grid
//! - fit each family (grid points evaluated in parallel)
//! - select the best family and score its confidence

pub mod fitter;
pub mod grid;
pub mod selection;

pub use fitter::*;
pub use grid::*;
pub use selection::*;
