//! Recording engine: keeps the active constraint set without solving it.

use std::collections::HashSet;
use std::fmt::Write as _;

use strut_expr::{Constraint, Variable};

use crate::{ConstraintEngine, EngineError};

/// Active constraints in insertion order.
///
/// Useful as a staging area before handing constraints to a real engine,
/// and for inspecting what a layout would submit.
#[derive(Debug, Clone, Default)]
pub struct ConstraintSet {
    constraints: Vec<Constraint>,
    // identity keys; each held constraint keeps its key alive
    keys: HashSet<usize>,
}

impl ConstraintSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn iter(&self) -> impl Iterator<Item = &Constraint> {
        self.constraints.iter()
    }

    /// Number of constraints at required strength.
    pub fn required_count(&self) -> usize {
        self.constraints.iter().filter(|c| c.is_required()).count()
    }

    /// Distinct variables across all constraints, in first-seen order.
    pub fn variables(&self) -> Vec<Variable> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for constraint in &self.constraints {
            for var in constraint.expression().variables() {
                if seen.insert(var.clone()) {
                    out.push(var);
                }
            }
        }
        out
    }

    /// One numbered `describe` line per constraint.
    pub fn format_listing(&self) -> String {
        let mut out = String::new();
        for (idx, constraint) in self.constraints.iter().enumerate() {
            let _ = writeln!(out, "c{idx}: {}", constraint.describe());
        }
        out
    }

    pub fn clear(&mut self) {
        self.constraints.clear();
        self.keys.clear();
    }
}

impl ConstraintEngine for ConstraintSet {
    fn add_constraint(&mut self, constraint: &Constraint) -> Result<(), EngineError> {
        if !self.keys.insert(constraint.key()) {
            return Err(EngineError::DuplicateConstraint {
                constraint: constraint.describe(),
            });
        }
        self.constraints.push(constraint.clone());
        tracing::debug!(
            component = "engine",
            operation = "add_constraint",
            status = "success",
            op = constraint.op_symbol(),
            strength = constraint.strength(),
            active = self.constraints.len(),
            "Added constraint"
        );
        Ok(())
    }

    fn remove_constraint(&mut self, constraint: &Constraint) -> Result<(), EngineError> {
        if !self.keys.remove(&constraint.key()) {
            return Err(EngineError::UnknownConstraint {
                constraint: constraint.describe(),
            });
        }
        self.constraints.retain(|held| !held.same_as(constraint));
        tracing::debug!(
            component = "engine",
            operation = "remove_constraint",
            status = "success",
            active = self.constraints.len(),
            "Removed constraint"
        );
        Ok(())
    }

    fn has_constraint(&self, constraint: &Constraint) -> bool {
        self.keys.contains(&constraint.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strut_expr::strength::Preset;
    use strut_expr::LinearRelation;

    #[test]
    fn test_add_and_has() {
        let x = Variable::new("x");
        let c = x.ge_expr(1.0);
        let mut set = ConstraintSet::new();
        assert!(!set.has_constraint(&c));
        set.add_constraint(&c).unwrap();
        assert!(set.has_constraint(&c));
        assert!(set.has_constraint(&c.clone()));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_duplicate_is_rejected() {
        let x = Variable::new("x");
        let c = x.ge_expr(1.0);
        let mut set = ConstraintSet::new();
        set.add_constraint(&c).unwrap();
        let err = set.add_constraint(&c.clone()).unwrap_err();
        assert_eq!(err.code(), "CONSTRAINT_DUPLICATE");
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_restrengthened_copy_is_distinct() {
        let x = Variable::new("x");
        let c = x.ge_expr(1.0);
        let weak = &c | Preset::Weak;
        let mut set = ConstraintSet::new();
        set.add_constraint(&c).unwrap();
        set.add_constraint(&weak).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.required_count(), 1);
    }

    #[test]
    fn test_remove() {
        let x = Variable::new("x");
        let a = x.clone().ge_expr(1.0);
        let b = x.le_expr(9.0);
        let mut set = ConstraintSet::new();
        set.add_constraint(&a).unwrap();
        set.add_constraint(&b).unwrap();
        set.remove_constraint(&a).unwrap();
        assert!(!set.has_constraint(&a));
        assert!(set.constraints()[0].same_as(&b));

        let err = set.remove_constraint(&a).unwrap_err();
        assert_eq!(err.code(), "CONSTRAINT_UNKNOWN");
    }

    #[test]
    fn test_variables_first_seen() {
        let x = Variable::new("x");
        let y = Variable::new("y");
        let mut set = ConstraintSet::new();
        set.add_constraint(&(&y + &x).le_expr(4.0)).unwrap();
        set.add_constraint(&x.ge_expr(0.0)).unwrap();
        let names: Vec<String> = set.variables().iter().map(|v| v.name().to_string()).collect();
        assert_eq!(names, vec!["y", "x"]);
    }

    #[test]
    fn test_format_listing_and_clear() {
        let x = Variable::new("x");
        let mut set = ConstraintSet::new();
        set.add_constraint(&(x.clone().le_expr(4.0) | Preset::Medium)).unwrap();
        set.add_constraint(&x.eq_expr(2.0)).unwrap();
        assert_eq!(
            set.format_listing(),
            "c0: 1 * x + -4 <= 0 | strength = 1000\n\
             c1: 1 * x + -2 == 0 | strength = 1.001e+09\n"
        );
        set.clear();
        assert!(set.is_empty());
    }
}
