//! Core expression type: ordered terms + constant.
//!
//! A raw expression may name the same variable in several terms; that is
//! how the algebra in `ops` builds them. [`reduce`](crate::reduce) turns it
//! into the canonical form a [`Constraint`](crate::Constraint) stores.

use std::collections::HashSet;
use std::fmt;

use crate::expr::format::format_number;
use crate::expr::reduce::reduce;
use crate::expr::term::Term;
use crate::expr::variable::Variable;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expression {
    terms: Vec<Term>,
    constant: f64,
}

impl Expression {
    // ── Constructors ────────────────────────────────────────

    pub fn new(terms: Vec<Term>, constant: f64) -> Self {
        Self { terms, constant }
    }

    /// Just a constant, no variable terms.
    pub fn from_constant(constant: f64) -> Self {
        Self {
            terms: Vec::new(),
            constant,
        }
    }

    /// From raw terms, no constant.
    pub fn from_terms(terms: Vec<Term>) -> Self {
        Self {
            terms,
            constant: 0.0,
        }
    }

    // ── Accessors ───────────────────────────────────────────

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn constant(&self) -> f64 {
        self.constant
    }

    /// `constant + Σ coefficient * value` at the variables' current values.
    pub fn value(&self) -> f64 {
        self.terms
            .iter()
            .fold(self.constant, |acc, term| acc + term.value())
    }

    /// True when no variable appears in more than one term.
    pub fn is_reduced(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.terms.len());
        self.terms.iter().all(|term| seen.insert(term.variable().key()))
    }

    /// Distinct variables in order of first appearance.
    pub fn variables(&self) -> Vec<Variable> {
        let mut seen = HashSet::with_capacity(self.terms.len());
        self.terms
            .iter()
            .filter(|term| seen.insert(term.variable().key()))
            .map(|term| term.variable().clone())
            .collect()
    }

    // ── Operations ──────────────────────────────────────────

    /// Scale all terms and the constant by a factor.
    ///
    /// Terms are kept even when the factor is zero.
    pub fn scale(&self, by: f64) -> Self {
        Self {
            terms: self.terms.iter().map(|term| term.scale(by)).collect(),
            constant: self.constant * by,
        }
    }

    /// Concatenate terms and add constants. Duplicates are not merged.
    pub fn add(&self, other: &Expression) -> Self {
        let mut terms = Vec::with_capacity(self.terms.len() + other.terms.len());
        terms.extend_from_slice(&self.terms);
        terms.extend_from_slice(&other.terms);
        Self {
            terms,
            constant: self.constant + other.constant,
        }
    }

    /// Append one term.
    pub fn add_term(&self, term: Term) -> Self {
        let mut terms = Vec::with_capacity(self.terms.len() + 1);
        terms.extend_from_slice(&self.terms);
        terms.push(term);
        Self {
            terms,
            constant: self.constant,
        }
    }

    /// Add a constant offset.
    pub fn add_constant(&self, value: f64) -> Self {
        Self {
            terms: self.terms.clone(),
            constant: self.constant + value,
        }
    }

    /// Canonical copy of this expression; see [`reduce`].
    pub fn reduced(&self) -> Self {
        reduce(self)
    }
}

impl From<f64> for Expression {
    fn from(constant: f64) -> Self {
        Self::from_constant(constant)
    }
}

impl From<Term> for Expression {
    fn from(term: Term) -> Self {
        Self::from_terms(vec![term])
    }
}

impl From<&Term> for Expression {
    fn from(term: &Term) -> Self {
        Self::from_terms(vec![term.clone()])
    }
}

impl From<Variable> for Expression {
    fn from(variable: Variable) -> Self {
        Self::from(Term::from(variable))
    }
}

impl From<&Variable> for Expression {
    fn from(variable: &Variable) -> Self {
        Self::from(Term::from(variable))
    }
}

impl From<&Expression> for Expression {
    fn from(expr: &Expression) -> Self {
        expr.clone()
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for term in &self.terms {
            write!(f, "{term} + ")?;
        }
        f.write_str(&format_number(self.constant))
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use crate::{Expression, Term, Variable};

    fn xy() -> (Variable, Variable) {
        (Variable::new("x"), Variable::new("y"))
    }

    #[test]
    fn from_constant() {
        let e = Expression::from_constant(5.0);
        assert_eq!(e.constant(), 5.0);
        assert!(e.terms().is_empty());
        assert!(e.is_reduced());
    }

    #[test]
    fn add_keeps_duplicates_and_folds_constants() {
        let (x, y) = xy();
        let a = Expression::new(vec![Term::new(x.clone(), 1.0)], 3.0);
        let b = Expression::new(vec![Term::new(y, 2.0), Term::new(x, 4.0)], 7.0);
        let c = a.add(&b);
        assert_eq!(c.constant(), 10.0);
        assert_eq!(c.terms().len(), 3);
        assert!(!c.is_reduced());
    }

    #[test]
    fn scale_with_constant() {
        let (x, _) = xy();
        let e = Expression::new(vec![Term::new(x, 2.0)], 3.0);
        let scaled = e.scale(2.0);
        assert_eq!(scaled.constant(), 6.0);
        assert_eq!(scaled.terms()[0].coefficient(), 4.0);
    }

    #[test]
    fn scale_by_zero_keeps_terms() {
        let (x, _) = xy();
        let e = Expression::new(vec![Term::new(x, 2.0)], 3.0).scale(0.0);
        assert_eq!(e.terms().len(), 1);
        assert_eq!(e.constant(), 0.0);
    }

    #[test]
    fn value_uses_current_variable_values() {
        let (x, y) = xy();
        let e = Expression::new(vec![Term::new(x.clone(), 2.0), Term::new(y.clone(), -1.0)], 1.5);
        x.set_value(3.0);
        y.set_value(4.0);
        assert_eq!(e.value(), 3.5);
    }

    #[test]
    fn variables_in_first_seen_order() {
        let (x, y) = xy();
        let e = Expression::from_terms(vec![
            Term::new(y.clone(), 1.0),
            Term::new(x.clone(), 1.0),
            Term::new(y.clone(), 1.0),
        ]);
        let vars = e.variables();
        assert_eq!(vars.len(), 2);
        assert!(vars[0].same_as(&y));
        assert!(vars[1].same_as(&x));
    }

    #[test]
    fn display() {
        let (x, y) = xy();
        let e = Expression::new(vec![Term::new(x, 2.0), Term::new(y, 0.5)], -1.0);
        assert_eq!(e.to_string(), "2 * x + 0.5 * y + -1");
        assert_eq!(Expression::default().to_string(), "0");
        assert_eq!(Expression::from_constant(2.5e7).to_string(), "2.5e+07");
    }
}
