//! Curve model evaluation.
//!
//! Models are implemented as small, pure functions so that fitting/search code can
//! stay generic.

pub mod component;
pub mod model;

pub use component::*;
pub use model::*;
