//! Shape catalog: named shapes built from curve components.

pub mod builtin;
pub mod store;
pub mod transform;

pub use builtin::builtin_shapes;
pub use store::ShapeCatalog;
