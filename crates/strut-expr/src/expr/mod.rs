//! Expression types for constraint modeling.
//!
//! - `variable`   — Variable: shared named unknown
//! - `term`       — Term: coefficient * variable
//! - `core`       — Expression: ordered terms + constant
//! - `reduce`     — duplicate-merging canonicalisation
//! - `ops`        — operator overloads and comparison builders
//! - `operator`   — RelationalOperator: `==`, `<=`, `>=`
//! - `constraint` — Constraint: reduced expression, operator, strength
//! - `error`      — Construction errors
//! - `format`     — `%g`-style number rendering for diagnostics

pub mod constraint;
pub mod core;
pub mod error;
mod format;
pub mod operator;
pub mod ops;
pub mod reduce;
pub mod term;
pub mod variable;

pub use constraint::{describe, make_constraint, with_strength, Constraint, StrengthOperand};
pub use self::core::Expression;
pub use error::ConstraintError;
pub use operator::RelationalOperator;
pub use ops::LinearRelation;
pub use reduce::reduce;
pub use term::Term;
pub use variable::Variable;
