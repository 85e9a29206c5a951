//! Engine trait for abstraction over different solving backends.

use strut_expr::Constraint;

use crate::EngineError;

/// Trait for engines that ingest strut constraints.
///
/// An engine reads the reduced expression, operator and strength through
/// the [`Constraint`] accessors. A constraint at
/// [`REQUIRED`](strut_expr::strength::REQUIRED) strength must hold exactly;
/// every other strength is a soft priority the engine may trade off.
/// Engines track constraints by identity ([`Constraint::same_as`]), so a
/// re-strengthened copy is a different constraint.
pub trait ConstraintEngine {
    /// Add a constraint to the active set.
    ///
    /// # Errors
    ///
    /// Returns an `EngineError` if:
    /// - The constraint is already held
    /// - A required constraint conflicts with the active set
    fn add_constraint(&mut self, constraint: &Constraint) -> Result<(), EngineError>;

    /// Remove a constraint from the active set.
    ///
    /// # Errors
    ///
    /// Returns `UnknownConstraint` if the constraint is not held.
    fn remove_constraint(&mut self, constraint: &Constraint) -> Result<(), EngineError>;

    /// Check whether the constraint is in the active set.
    fn has_constraint(&self, constraint: &Constraint) -> bool;

    /// Add several constraints, stopping at the first failure.
    ///
    /// Returns the number added.
    fn add_constraints<'a, I>(&mut self, constraints: I) -> Result<usize, EngineError>
    where
        Self: Sized,
        I: IntoIterator<Item = &'a Constraint>,
    {
        let mut added = 0;
        for constraint in constraints {
            self.add_constraint(constraint)?;
            added += 1;
        }
        Ok(added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strut_expr::{LinearRelation, Variable};

    /// Accepts anything, never remembers.
    struct FixtureEngine {
        seen: usize,
        fail_after: Option<usize>,
    }

    impl ConstraintEngine for FixtureEngine {
        fn add_constraint(&mut self, constraint: &Constraint) -> Result<(), EngineError> {
            if self.fail_after == Some(self.seen) {
                return Err(EngineError::UnsatisfiableConstraint {
                    constraint: constraint.describe(),
                });
            }
            self.seen += 1;
            Ok(())
        }

        fn remove_constraint(&mut self, constraint: &Constraint) -> Result<(), EngineError> {
            Err(EngineError::UnknownConstraint {
                constraint: constraint.describe(),
            })
        }

        fn has_constraint(&self, _constraint: &Constraint) -> bool {
            false
        }
    }

    fn constraints() -> Vec<Constraint> {
        let x = Variable::new("x");
        vec![
            x.clone().ge_expr(0.0),
            x.clone().le_expr(10.0),
            x.eq_expr(5.0),
        ]
    }

    #[test]
    fn test_add_constraints_counts() {
        let mut engine = FixtureEngine {
            seen: 0,
            fail_after: None,
        };
        let all = constraints();
        assert_eq!(engine.add_constraints(&all), Ok(3));
    }

    #[test]
    fn test_add_constraints_stops_at_first_error() {
        let mut engine = FixtureEngine {
            seen: 0,
            fail_after: Some(1),
        };
        let all = constraints();
        let err = engine.add_constraints(&all).unwrap_err();
        assert_eq!(err.code(), "CONSTRAINT_UNSATISFIABLE");
        assert_eq!(engine.seen, 1);
    }
}
