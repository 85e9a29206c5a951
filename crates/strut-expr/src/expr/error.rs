//! Constraint construction errors.

#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintError {
    /// A value of the wrong kind was supplied.
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    /// Operator token is not `==`, `<=` or `>=`.
    InvalidOperator { token: String },
    /// Strength is neither a finite number nor a known preset.
    InvalidStrength { value: String },
    /// Expression divided by zero.
    DivisionByZero,
}

impl ConstraintError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ConstraintError::TypeMismatch { .. } => "TYPE_MISMATCH",
            ConstraintError::InvalidOperator { .. } => "OPERATOR_INVALID",
            ConstraintError::InvalidStrength { .. } => "STRENGTH_INVALID",
            ConstraintError::DivisionByZero => "EXPR_DIVISION_BY_ZERO",
        }
    }
}

impl std::fmt::Display for ConstraintError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConstraintError::TypeMismatch { expected, found } => write!(
                f,
                "[{}] Expected object of type `{}`, got `{}`",
                self.code(),
                expected,
                found
            ),
            ConstraintError::InvalidOperator { token } => write!(
                f,
                "[{}] relational operator must be '==', '<=', or '>=', not '{}'",
                self.code(),
                token
            ),
            ConstraintError::InvalidStrength { value } => write!(
                f,
                "[{}] strength must be a finite number or one of 'required', 'strong', \
                 'medium', 'weak' (got '{}')",
                self.code(),
                value
            ),
            ConstraintError::DivisionByZero => {
                write!(f, "[{}] float division by zero", self.code())
            }
        }
    }
}

impl std::error::Error for ConstraintError {}
