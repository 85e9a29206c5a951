//! Engine error types.

/// Error type for constraint ingestion.
///
/// Variants carry the constraint's `describe` text so callers can report
/// which constraint was refused.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// The constraint is already held by the engine.
    DuplicateConstraint { constraint: String },
    /// The constraint is not held by the engine.
    UnknownConstraint { constraint: String },
    /// A required constraint conflicts with the ones already held.
    UnsatisfiableConstraint { constraint: String },
    /// Internal engine error.
    Internal(String),
}

impl EngineError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::DuplicateConstraint { .. } => "CONSTRAINT_DUPLICATE",
            EngineError::UnknownConstraint { .. } => "CONSTRAINT_UNKNOWN",
            EngineError::UnsatisfiableConstraint { .. } => "CONSTRAINT_UNSATISFIABLE",
            EngineError::Internal(_) => "ENGINE_INTERNAL",
        }
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::DuplicateConstraint { constraint } => write!(
                f,
                "[{}] Constraint already added: {}",
                self.code(),
                constraint
            ),
            EngineError::UnknownConstraint { constraint } => write!(
                f,
                "[{}] Constraint not found: {}",
                self.code(),
                constraint
            ),
            EngineError::UnsatisfiableConstraint { constraint } => write!(
                f,
                "[{}] Required constraint cannot be satisfied: {}",
                self.code(),
                constraint
            ),
            EngineError::Internal(msg) => {
                write!(f, "[{}] Engine internal error: {}", self.code(), msg)
            }
        }
    }
}

impl std::error::Error for EngineError {}
