//! `baserah-curves` library crate.
//!
//! The binary (`baserah`) is a thin wrapper around this library so that:
//!
//! - the curve functions, inference and catalog are testable without spawning processes
//! - modules are reusable from other front-ends
//!
//! Main entry points: [`fit::infer`] for curve inference and
//! [`catalog::ShapeCatalog`] for the shape catalog.

pub mod app;
pub mod catalog;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
