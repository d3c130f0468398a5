//! Error handling for the warehouse dashboard
//!
//! Every failure maps to an [`ErrorDetail`] the views can display.

use serde::Serialize;
use shared::CoreError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    // Business logic errors
    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),

    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    // Domain core errors
    #[error(transparent)]
    Core(#[from] CoreError),

    // Import / export errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    // Internal errors
    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Shorthand for a field-level validation failure
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Display form of this error. Logs it as a side effect.
    pub fn detail(&self) -> ErrorDetail {
        let detail = match self {
            AppError::NotFound(resource) => ErrorDetail {
                code: "NOT_FOUND".to_string(),
                message: format!("{} not found", resource),
                field: None,
            },
            AppError::Validation { field, message } => ErrorDetail {
                code: "VALIDATION_ERROR".to_string(),
                message: message.clone(),
                field: Some(field.clone()),
            },
            AppError::DuplicateEntry(field) => ErrorDetail {
                code: "DUPLICATE_ENTRY".to_string(),
                message: format!("A record with this {} already exists", field),
                field: Some(field.clone()),
            },
            AppError::InsufficientStock(msg) => ErrorDetail {
                code: "INSUFFICIENT_STOCK".to_string(),
                message: msg.clone(),
                field: Some("quantity".to_string()),
            },
            AppError::InvalidStateTransition(msg) => ErrorDetail {
                code: "INVALID_STATE_TRANSITION".to_string(),
                message: msg.clone(),
                field: None,
            },
            AppError::Core(err) => ErrorDetail {
                code: match err {
                    CoreError::MalformedLocation(_) => "MALFORMED_LOCATION",
                    CoreError::InvalidLabelPayload(_) => "INVALID_LABEL_PAYLOAD",
                    CoreError::UnknownVariant { .. } => "UNKNOWN_VARIANT",
                    CoreError::InvalidStateTransition { .. } => "INVALID_STATE_TRANSITION",
                }
                .to_string(),
                message: err.to_string(),
                field: None,
            },
            AppError::Csv(err) => ErrorDetail {
                code: "CSV_ERROR".to_string(),
                message: format!("Could not read or write CSV: {}", err),
                field: None,
            },
            AppError::Serialization(_) => ErrorDetail {
                code: "SERIALIZATION_ERROR".to_string(),
                message: "Data could not be serialized".to_string(),
                field: None,
            },
            AppError::Configuration(err) => ErrorDetail {
                code: "CONFIGURATION_ERROR".to_string(),
                message: format!("Configuration error: {}", err),
                field: None,
            },
            AppError::Internal(_) => ErrorDetail {
                code: "INTERNAL_ERROR".to_string(),
                message: "An internal error occurred".to_string(),
                field: None,
            },
        };

        tracing::error!("Error: {:?}", self);

        detail
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let first = errors.field_errors().into_iter().min_by_key(|(field, _)| *field);
        match first {
            Some((field, errs)) => {
                let message = errs
                    .first()
                    .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| format!("Invalid {}", field));
                AppError::Validation {
                    field: field.to_string(),
                    message,
                }
            }
            None => AppError::Validation {
                field: "input".to_string(),
                message: errors.to_string(),
            },
        }
    }
}

/// Error shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Result type alias for services
pub type AppResult<T> = Result<T, AppError>;
