use crate::types::DbId;

/// Domain-level error type shared across the workspace.
///
/// Every validation pipeline returns these explicitly; none of them are
/// recoverable within a single operation. The API layer maps each variant
/// to an HTTP status and a stable machine-readable code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A referenced entity, status, subcategory, or participation does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// A time string does not match the `mm:ss` input grammar.
    #[error("time must be in mm:ss format, got '{0}'")]
    TimeFormat(String),

    /// A participation interval starts at or after its finish.
    #[error("start time {init} must be strictly before finish time {finish}")]
    OrderViolation { init: String, finish: String },

    /// Interval overlap or taxonomy-partition mismatch.
    #[error("{0}")]
    Conflict(String),

    /// Malformed request input (bad pagination bounds, etc.).
    #[error("{0}")]
    Validation(String),

    /// Invariant violated that validation should already have caught.
    #[error("{0}")]
    Internal(String),
}

/// Convenience alias for domain results.
pub type CoreResult<T> = Result<T, CoreError>;
