//! Linear constraint model for strut.
//!
//! Raw expressions are built from [`Variable`]s and [`Term`]s, reduced to
//! canonical form, and wrapped in strength-tagged [`Constraint`]s that a
//! solving engine consumes.

pub mod dynamic;
pub mod expr;
pub mod strength;

pub use dynamic::{constraint_from_values, Value};
pub use expr::{
    describe, make_constraint, reduce, with_strength, Constraint, ConstraintError, Expression,
    LinearRelation, RelationalOperator, StrengthOperand, Term, Variable,
};
pub use strength::{Preset, StrengthSpec};
