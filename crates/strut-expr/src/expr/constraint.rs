//! Constraints: reduced expression, relational operator and strength.

use std::fmt::Write as _;
use std::ops::BitOr;
use std::sync::Arc;

use crate::expr::core::Expression;
use crate::expr::error::ConstraintError;
use crate::expr::format::format_number;
use crate::expr::operator::RelationalOperator;
use crate::expr::reduce::reduce;
use crate::strength::{Preset, StrengthSpec};

#[derive(Debug)]
struct ConstraintData {
    expression: Arc<Expression>,
    op: RelationalOperator,
    strength: f64,
}

/// `expression OP 0`, tagged with a strength.
///
/// The expression is always in reduced form. A constraint never changes
/// after construction; cloning shares the same constraint, which is what
/// engines use to recognise one they already hold. Re-strengthening builds
/// a new constraint that shares the reduced expression.
#[derive(Debug, Clone)]
pub struct Constraint {
    inner: Arc<ConstraintData>,
}

impl Constraint {
    /// Build a constraint from a raw expression.
    ///
    /// The expression is reduced; the caller's copy is not retained. A
    /// missing strength means [`REQUIRED`](crate::strength::REQUIRED).
    ///
    /// # Errors
    ///
    /// Returns `InvalidStrength` if `strength` does not resolve.
    pub fn new(
        expr: &Expression,
        op: RelationalOperator,
        strength: Option<StrengthSpec>,
    ) -> Result<Self, ConstraintError> {
        let strength = StrengthSpec::resolve_or_required(strength)?;
        let constraint = Self::from_reduced(Arc::new(reduce(expr)), op, strength);
        tracing::debug!(
            component = "constraint",
            operation = "build",
            status = "success",
            op = op.as_str(),
            terms = constraint.expression().terms().len(),
            strength,
            "Built constraint"
        );
        Ok(constraint)
    }

    /// Required-strength constraint; cannot fail.
    pub fn required(expr: &Expression, op: RelationalOperator) -> Self {
        Self::from_reduced(
            Arc::new(reduce(expr)),
            op,
            crate::strength::REQUIRED,
        )
    }

    fn from_reduced(expression: Arc<Expression>, op: RelationalOperator, strength: f64) -> Self {
        Self {
            inner: Arc::new(ConstraintData {
                expression,
                op,
                strength,
            }),
        }
    }

    // ── Accessors ───────────────────────────────────────────

    pub fn expression(&self) -> &Expression {
        &self.inner.expression
    }

    /// The shared handle to the reduced expression.
    pub fn shared_expression(&self) -> &Arc<Expression> {
        &self.inner.expression
    }

    pub fn op(&self) -> RelationalOperator {
        self.inner.op
    }

    pub fn op_symbol(&self) -> &'static str {
        self.inner.op.as_str()
    }

    pub fn strength(&self) -> f64 {
        self.inner.strength
    }

    pub fn is_required(&self) -> bool {
        self.inner.strength >= crate::strength::REQUIRED
    }

    /// True when both handles are the same constraint, not merely equal ones.
    pub fn same_as(&self, other: &Constraint) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Stable identity key for engines that index constraints.
    pub fn key(&self) -> usize {
        Arc::as_ptr(&self.inner) as usize
    }

    // ── Re-strengthening ────────────────────────────────────

    /// Same expression and operator under a new strength.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStrength` if `spec` does not resolve.
    pub fn with_strength(&self, spec: impl Into<StrengthSpec>) -> Result<Self, ConstraintError> {
        let strength = spec.into().resolve()?;
        tracing::debug!(
            component = "constraint",
            operation = "restrength",
            status = "success",
            from = self.strength(),
            to = strength,
            "Re-strengthened constraint"
        );
        Ok(self.restrengthen(strength))
    }

    /// Same expression and operator under a named preset.
    pub fn with_preset(&self, preset: Preset) -> Self {
        self.restrengthen(preset.value())
    }

    fn restrengthen(&self, strength: f64) -> Self {
        Self::from_reduced(Arc::clone(&self.inner.expression), self.inner.op, strength)
    }

    // ── Rendering ───────────────────────────────────────────

    /// Diagnostic text: `c1 * v1 + ... + constant OP 0 | strength = s`.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        let expr = self.expression();
        for term in expr.terms() {
            let _ = write!(out, "{term} + ");
        }
        let _ = write!(
            out,
            "{} {} 0 | strength = {}",
            format_number(expr.constant()),
            self.op_symbol(),
            format_number(self.strength())
        );
        out
    }
}

/// Structural equality: same reduced expression, operator and strength.
impl PartialEq for Constraint {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
            || (self.inner.op == other.inner.op
                && self.inner.strength == other.inner.strength
                && self.inner.expression == other.inner.expression)
    }
}

impl std::fmt::Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Build a constraint from an operator token.
///
/// # Errors
///
/// Returns `InvalidOperator` for a token other than `==`, `<=` or `>=`, and
/// `InvalidStrength` if `strength` does not resolve.
pub fn make_constraint(
    expr: &Expression,
    op: &str,
    strength: Option<StrengthSpec>,
) -> Result<Constraint, ConstraintError> {
    let op = RelationalOperator::parse(op)?;
    Constraint::new(expr, op, strength)
}

/// Render a constraint; same as its `Display`.
pub fn describe(constraint: &Constraint) -> String {
    constraint.describe()
}

/// One side of a [`with_strength`] combination.
#[derive(Debug, Clone)]
pub enum StrengthOperand {
    Constraint(Constraint),
    Strength(StrengthSpec),
}

impl StrengthOperand {
    pub fn kind(&self) -> &'static str {
        match self {
            StrengthOperand::Constraint(_) => "Constraint",
            StrengthOperand::Strength(_) => "strength",
        }
    }
}

impl From<Constraint> for StrengthOperand {
    fn from(constraint: Constraint) -> Self {
        StrengthOperand::Constraint(constraint)
    }
}

impl From<StrengthSpec> for StrengthOperand {
    fn from(spec: StrengthSpec) -> Self {
        StrengthOperand::Strength(spec)
    }
}

impl From<Preset> for StrengthOperand {
    fn from(preset: Preset) -> Self {
        StrengthOperand::Strength(preset.into())
    }
}

impl From<f64> for StrengthOperand {
    fn from(value: f64) -> Self {
        StrengthOperand::Strength(value.into())
    }
}

/// Combine a constraint with a strength, in either order.
///
/// # Errors
///
/// Returns `TypeMismatch` unless exactly one operand is a constraint, and
/// `InvalidStrength` if the other does not resolve.
pub fn with_strength(
    lhs: impl Into<StrengthOperand>,
    rhs: impl Into<StrengthOperand>,
) -> Result<Constraint, ConstraintError> {
    match (lhs.into(), rhs.into()) {
        (StrengthOperand::Constraint(c), StrengthOperand::Strength(s))
        | (StrengthOperand::Strength(s), StrengthOperand::Constraint(c)) => c.with_strength(s),
        (StrengthOperand::Constraint(_), other @ StrengthOperand::Constraint(_)) => {
            Err(ConstraintError::TypeMismatch {
                expected: "strength",
                found: other.kind(),
            })
        }
        (other @ StrengthOperand::Strength(_), StrengthOperand::Strength(_)) => {
            Err(ConstraintError::TypeMismatch {
                expected: "Constraint",
                found: other.kind(),
            })
        }
    }
}

// ── Operator overloads ──────────────────────────────────────

impl BitOr<Preset> for Constraint {
    type Output = Constraint;

    fn bitor(self, rhs: Preset) -> Self::Output {
        self.with_preset(rhs)
    }
}

impl BitOr<Preset> for &Constraint {
    type Output = Constraint;

    fn bitor(self, rhs: Preset) -> Self::Output {
        self.with_preset(rhs)
    }
}

impl BitOr<Constraint> for Preset {
    type Output = Constraint;

    fn bitor(self, rhs: Constraint) -> Self::Output {
        rhs.with_preset(self)
    }
}

impl BitOr<&Constraint> for Preset {
    type Output = Constraint;

    fn bitor(self, rhs: &Constraint) -> Self::Output {
        rhs.with_preset(self)
    }
}
