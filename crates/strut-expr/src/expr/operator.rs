//! Relational operators.

use std::str::FromStr;

use crate::expr::error::ConstraintError;

/// How a reduced expression relates to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationalOperator {
    Equal,
    LessEqual,
    GreaterEqual,
}

impl RelationalOperator {
    /// The token form: `==`, `<=` or `>=`.
    pub fn as_str(self) -> &'static str {
        match self {
            RelationalOperator::Equal => "==",
            RelationalOperator::LessEqual => "<=",
            RelationalOperator::GreaterEqual => ">=",
        }
    }

    /// Parse an operator token. Only the three exact tokens are accepted.
    pub fn parse(token: &str) -> Result<Self, ConstraintError> {
        match token {
            "==" => Ok(RelationalOperator::Equal),
            "<=" => Ok(RelationalOperator::LessEqual),
            ">=" => Ok(RelationalOperator::GreaterEqual),
            other => Err(ConstraintError::InvalidOperator {
                token: other.to_string(),
            }),
        }
    }
}

impl FromStr for RelationalOperator {
    type Err = ConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for RelationalOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
