//! A single `coefficient * variable` summand.

use std::fmt;

use crate::expr::format::format_number;
use crate::expr::variable::Variable;

#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    variable: Variable,
    coefficient: f64,
}

impl Term {
    pub fn new(variable: Variable, coefficient: f64) -> Self {
        Self {
            variable,
            coefficient,
        }
    }

    pub fn variable(&self) -> &Variable {
        &self.variable
    }

    pub fn coefficient(&self) -> f64 {
        self.coefficient
    }

    /// `coefficient * variable.value()`.
    pub fn value(&self) -> f64 {
        self.coefficient * self.variable.value()
    }

    /// Same variable, coefficient multiplied by `by`.
    pub fn scale(&self, by: f64) -> Self {
        Self::new(self.variable.clone(), self.coefficient * by)
    }
}

impl From<Variable> for Term {
    fn from(variable: Variable) -> Self {
        Self::new(variable, 1.0)
    }
}

impl From<&Variable> for Term {
    fn from(variable: &Variable) -> Self {
        Self::new(variable.clone(), 1.0)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} * {}",
            format_number(self.coefficient),
            self.variable.name()
        )
    }
}
