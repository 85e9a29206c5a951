//! Dynamically typed inputs.
//!
//! Hosts that pass untyped values (scripting bindings, config-driven
//! builders) go through [`Value`]. The functions here perform the kind
//! checks the typed API gets from the compiler.

use crate::expr::constraint::{with_strength as combine, Constraint, StrengthOperand};
use crate::expr::core::Expression;
use crate::expr::error::ConstraintError;
use crate::expr::operator::RelationalOperator;
use crate::expr::term::Term;
use crate::expr::variable::Variable;
use crate::strength::StrengthSpec;

#[derive(Debug, Clone)]
pub enum Value {
    Number(f64),
    Text(String),
    Variable(Variable),
    Term(Term),
    Expression(Expression),
    Constraint(Constraint),
}

impl Value {
    /// Kind name used in `TypeMismatch` errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Text(_) => "str",
            Value::Variable(_) => "Variable",
            Value::Term(_) => "Term",
            Value::Expression(_) => "Expression",
            Value::Constraint(_) => "Constraint",
        }
    }

    fn mismatch(&self, expected: &'static str) -> ConstraintError {
        ConstraintError::TypeMismatch {
            expected,
            found: self.kind(),
        }
    }

    /// # Errors
    ///
    /// Returns `TypeMismatch` unless this is an expression. Variables and
    /// terms are not promoted.
    pub fn into_expression(self) -> Result<Expression, ConstraintError> {
        match self {
            Value::Expression(expr) => Ok(expr),
            other => Err(other.mismatch("Expression")),
        }
    }

    /// # Errors
    ///
    /// Returns `TypeMismatch` for non-text values and `InvalidOperator` for
    /// unknown tokens.
    pub fn to_operator(&self) -> Result<RelationalOperator, ConstraintError> {
        match self {
            Value::Text(token) => RelationalOperator::parse(token),
            other => Err(other.mismatch("str")),
        }
    }

    /// # Errors
    ///
    /// Returns `TypeMismatch` unless this is a number or text, and
    /// `InvalidStrength` if it does not name a preset or is not finite.
    pub fn to_strength(&self) -> Result<StrengthSpec, ConstraintError> {
        let spec = match self {
            Value::Number(value) => StrengthSpec::Numeric(*value),
            Value::Text(name) => name.parse::<StrengthSpec>()?,
            other => return Err(other.mismatch("float, int, or str")),
        };
        spec.resolve()?;
        Ok(spec)
    }

    fn into_strength_operand(self) -> Result<StrengthOperand, ConstraintError> {
        match self {
            Value::Constraint(c) => Ok(StrengthOperand::Constraint(c)),
            other => other.to_strength().map(StrengthOperand::Strength),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<Variable> for Value {
    fn from(value: Variable) -> Self {
        Value::Variable(value)
    }
}

impl From<Term> for Value {
    fn from(value: Term) -> Self {
        Value::Term(value)
    }
}

impl From<Expression> for Value {
    fn from(value: Expression) -> Self {
        Value::Expression(value)
    }
}

impl From<Constraint> for Value {
    fn from(value: Constraint) -> Self {
        Value::Constraint(value)
    }
}

/// Build a constraint from untyped `(expression, op, strength?)`.
///
/// Checks run in argument order, so the first bad argument is the one
/// reported.
///
/// # Errors
///
/// Returns `TypeMismatch`, `InvalidOperator` or `InvalidStrength`.
pub fn constraint_from_values(
    expr: Value,
    op: Value,
    strength: Option<Value>,
) -> Result<Constraint, ConstraintError> {
    let expr = expr.into_expression()?;
    let op = op.to_operator()?;
    let strength = strength.as_ref().map(Value::to_strength).transpose()?;
    Constraint::new(&expr, op, strength)
}

/// Untyped form of [`crate::with_strength`]; operands may come in either order.
///
/// # Errors
///
/// Returns `TypeMismatch` unless exactly one operand is a constraint and the
/// other a number or text, and `InvalidStrength` if the strength does not
/// resolve.
pub fn with_strength(lhs: Value, rhs: Value) -> Result<Constraint, ConstraintError> {
    if !matches!(lhs, Value::Constraint(_)) && !matches!(rhs, Value::Constraint(_)) {
        return Err(lhs.mismatch("Constraint"));
    }
    combine(lhs.into_strength_operand()?, rhs.into_strength_operand()?)
}
