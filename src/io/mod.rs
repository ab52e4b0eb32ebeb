//! Input/output helpers.
//!
//! - catalog JSON export/import (`export`)
//! - fit JSON read/write (`curve`)

pub mod curve;
pub mod export;

pub use curve::*;
pub use export::*;
