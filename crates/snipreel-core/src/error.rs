/// Core error types for the Snipreel engine.
use serde::Serialize;

/// A specialized Result type for Snipreel operations.
pub type SnipResult<T> = Result<T, SnipError>;

/// One offending field of a rejected request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    /// Dotted path of the field, e.g. `animationConfig.charsPerFrame`.
    pub path: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Top-level error type encompassing all Snipreel subsystems.
#[derive(Debug, thiserror::Error)]
pub enum SnipError {
    #[error("validation error: {}", join_issues(.0))]
    Validation(Vec<FieldIssue>),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("bundle error: {0}")]
    Bundle(String),

    #[error("invalid job transition: {0}")]
    InvalidTransition(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl SnipError {
    /// Create a validation error for a single field.
    pub fn invalid_field(path: impl Into<String>, message: impl Into<String>) -> Self {
        SnipError::Validation(vec![FieldIssue::new(path, message)])
    }

    /// Create a not-found error.
    pub fn not_found(what: impl Into<String>) -> Self {
        SnipError::NotFound(what.into())
    }

    /// Whether this error was caused by the client rather than the engine.
    pub fn is_client_error(&self) -> bool {
        matches!(self, SnipError::Validation(_) | SnipError::NotFound(_))
    }
}
