//! Engine-facing side of the strut constraint model.
//!
//! Solving engines (simplex/Cassowary implementations) live outside this
//! workspace. This crate defines what they consume and how they report
//! failures.
//!
//! # Overview
//!
//! - [`ConstraintEngine`]: Trait a solving engine implements to ingest constraints
//! - [`EngineError`]: Error types for constraint ingestion
//! - [`ConstraintSet`]: Recording engine that validates membership without solving

mod error;
mod set;
mod traits;

pub use error::EngineError;
pub use set::ConstraintSet;
pub use traits::ConstraintEngine;
