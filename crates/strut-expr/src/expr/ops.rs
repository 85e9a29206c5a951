//! Expression algebra over variables, terms, expressions and scalars.
//!
//! `+` and `-` always yield an [`Expression`] and never merge duplicate
//! variables. Scaling a variable or term yields a [`Term`]. Division is
//! only offered as `checked_div` since dividing by zero is an error.

use std::ops::{Add, Mul, Neg, Sub};

use crate::expr::constraint::Constraint;
use crate::expr::core::Expression;
use crate::expr::error::ConstraintError;
use crate::expr::operator::RelationalOperator;
use crate::expr::term::Term;
use crate::expr::variable::Variable;

macro_rules! impl_add_sub {
    ($lhs:ty => $($rhs:ty),+) => {$(
        impl Add<$rhs> for $lhs {
            type Output = Expression;

            fn add(self, rhs: $rhs) -> Self::Output {
                Expression::add(&Expression::from(self), &Expression::from(rhs))
            }
        }

        impl Sub<$rhs> for $lhs {
            type Output = Expression;

            fn sub(self, rhs: $rhs) -> Self::Output {
                Expression::add(&Expression::from(self), &Expression::from(rhs).scale(-1.0))
            }
        }
    )+};
}

impl_add_sub!(Variable => Variable, &Variable, Term, Expression, f64);
impl_add_sub!(&Variable => Variable, &Variable, Term, Expression, f64);
impl_add_sub!(Term => Variable, &Variable, Term, Expression, f64);
impl_add_sub!(Expression => Variable, &Variable, Expression);
impl_add_sub!(f64 => Variable, &Variable, Term, Expression);

impl Add<Term> for Expression {
    type Output = Expression;

    fn add(self, rhs: Term) -> Self::Output {
        self.add_term(rhs)
    }
}

impl Sub<Term> for Expression {
    type Output = Expression;

    fn sub(self, rhs: Term) -> Self::Output {
        self.add_term(rhs.scale(-1.0))
    }
}

impl Add<f64> for Expression {
    type Output = Expression;

    fn add(self, rhs: f64) -> Self::Output {
        self.add_constant(rhs)
    }
}

impl Sub<f64> for Expression {
    type Output = Expression;

    fn sub(self, rhs: f64) -> Self::Output {
        self.add_constant(-rhs)
    }
}

macro_rules! impl_scale {
    ($($sym:ty => $out:ty),+) => {$(
        impl Mul<f64> for $sym {
            type Output = $out;

            fn mul(self, rhs: f64) -> Self::Output {
                <$out>::from(self).scale(rhs)
            }
        }

        impl Mul<$sym> for f64 {
            type Output = $out;

            fn mul(self, rhs: $sym) -> Self::Output {
                <$out>::from(rhs).scale(self)
            }
        }

        impl Neg for $sym {
            type Output = $out;

            fn neg(self) -> Self::Output {
                <$out>::from(self).scale(-1.0)
            }
        }
    )+};
}

impl_scale!(Variable => Term, &Variable => Term, Term => Term, Expression => Expression);

impl Term {
    /// # Errors
    ///
    /// Returns `DivisionByZero` when `by` is zero.
    pub fn checked_div(&self, by: f64) -> Result<Term, ConstraintError> {
        if by == 0.0 {
            return Err(ConstraintError::DivisionByZero);
        }
        Ok(self.scale(1.0 / by))
    }
}

impl Expression {
    /// # Errors
    ///
    /// Returns `DivisionByZero` when `by` is zero.
    pub fn checked_div(&self, by: f64) -> Result<Expression, ConstraintError> {
        if by == 0.0 {
            return Err(ConstraintError::DivisionByZero);
        }
        Ok(self.scale(1.0 / by))
    }
}

/// Comparison builders producing required-strength constraints.
///
/// `lhs.le_expr(rhs)` is `lhs - rhs <= 0`. Anything convertible into an
/// [`Expression`] can appear on either side; use
/// [`Constraint::with_strength`] or `| Preset` to soften the result.
pub trait LinearRelation: Into<Expression> {
    fn relate(self, op: RelationalOperator, rhs: impl Into<Expression>) -> Constraint {
        let lhs: Expression = self.into();
        let diff = Expression::add(&lhs, &rhs.into().scale(-1.0));
        Constraint::required(&diff, op)
    }

    fn eq_expr(self, rhs: impl Into<Expression>) -> Constraint {
        self.relate(RelationalOperator::Equal, rhs)
    }

    fn le_expr(self, rhs: impl Into<Expression>) -> Constraint {
        self.relate(RelationalOperator::LessEqual, rhs)
    }

    fn ge_expr(self, rhs: impl Into<Expression>) -> Constraint {
        self.relate(RelationalOperator::GreaterEqual, rhs)
    }
}

impl<T: Into<Expression>> LinearRelation for T {}
