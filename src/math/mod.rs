//! Mathematical utilities: curve functions and least squares.

pub mod functions;
pub mod ols;

pub use functions::*;
pub use ols::*;
