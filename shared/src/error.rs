//! Errors raised by the domain core

use thiserror::Error;

/// Parse and decode failures in the domain core.
///
/// None of these are fatal to a view: callers degrade to an
/// "unavailable" display state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Malformed location: {0}")]
    MalformedLocation(String),

    #[error("Invalid label payload: {0}")]
    InvalidLabelPayload(String),

    #[error("Unknown {kind}: {value}")]
    UnknownVariant { kind: &'static str, value: String },

    #[error("Cannot {action} an operation that is already {state}")]
    InvalidStateTransition { action: &'static str, state: &'static str },
}

impl CoreError {
    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        CoreError::UnknownVariant {
            kind,
            value: value.to_string(),
        }
    }
}

/// Result alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;
