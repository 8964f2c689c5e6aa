//! Unified error types for the fedreg domain layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of domain errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// No record matches the requested identifier.
    NotFound,
    /// Invalid input data (bad tool arguments, malformed JSON).
    InvalidInput,
    /// The Federal Register API answered with a non-success status.
    Upstream,
    /// The outbound request did not complete in time.
    Timeout,
    /// Internal error.
    Internal,
}

impl ErrorKind {
    /// Stable snake_case name, as serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::InvalidInput => "invalid_input",
            Self::Upstream => "upstream",
            Self::Timeout => "timeout",
            Self::Internal => "internal",
        }
    }
}

/// Domain-level error with structured context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FedRegError {
    /// The kind of error.
    pub kind: ErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional context.
    pub context: Option<String>,
}

impl FedRegError {
    /// Creates a new `FedRegError`.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: None,
        }
    }

    /// Adds context to the error.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Creates a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Creates an invalid-input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, message)
    }

    /// Creates an upstream error.
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Upstream, message)
    }
}

impl fmt::Display for FedRegError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind.as_str(), self.message)?;
        if let Some(ctx) = &self.context {
            write!(f, " ({})", ctx)?;
        }
        Ok(())
    }
}

impl std::error::Error for FedRegError {}

/// Transforms technical errors into user-actionable diagnostics.
///
/// Implementors provide optional `hint` (cause explanation) and `fix`
/// (concrete remediation step) for each error variant.
pub trait DiagnosticError {
    /// A human-readable explanation of the likely cause.
    fn hint(&self) -> Option<String> {
        None
    }
    /// A concrete fix the user can apply (e.g. a config change).
    fn fix(&self) -> Option<String> {
        None
    }
}
