//! Error types for the intake service
//!
//! Provides a comprehensive error handling system with:
//! - Distinct error types for different failure modes
//! - A single, normalized HTTP status code mapping
//! - Structured error responses
//! - Error codes for client handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Error codes for machine-readable error identification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors (1xxx)
    ValidationError,
    InvalidEmail,
    ScoreOutOfRange,
    InvalidQuestionOrder,

    // Resource errors (4xxx)
    NotFound,
    FormNotFound,
    QuestionNotFound,
    EntryNotFound,
    ReviewNotFound,

    // Conflict errors (5xxx)
    Conflict,
    DuplicateEntry,
    DuplicateAnswer,
    ChainGap,

    // Referential errors (6xxx)
    ReferentialViolation,

    // Database errors (7xxx)
    DatabaseError,
    ConnectionError,
    TransactionError,

    // Internal errors (9xxx)
    InternalError,
    ConfigurationError,
    SerializationError,
}

impl ErrorCode {
    /// Get the numeric code for this error
    pub fn as_code(&self) -> u16 {
        match self {
            // Validation (1xxx)
            ErrorCode::ValidationError => 1001,
            ErrorCode::InvalidEmail => 1002,
            ErrorCode::ScoreOutOfRange => 1003,
            ErrorCode::InvalidQuestionOrder => 1004,

            // Resources (4xxx)
            ErrorCode::NotFound => 4001,
            ErrorCode::FormNotFound => 4002,
            ErrorCode::QuestionNotFound => 4003,
            ErrorCode::EntryNotFound => 4004,
            ErrorCode::ReviewNotFound => 4005,

            // Conflicts (5xxx)
            ErrorCode::Conflict => 5001,
            ErrorCode::DuplicateEntry => 5002,
            ErrorCode::DuplicateAnswer => 5003,
            ErrorCode::ChainGap => 5004,

            // Referential (6xxx)
            ErrorCode::ReferentialViolation => 6001,

            // Database (7xxx)
            ErrorCode::DatabaseError => 7001,
            ErrorCode::ConnectionError => 7002,
            ErrorCode::TransactionError => 7003,

            // Internal (9xxx)
            ErrorCode::InternalError => 9001,
            ErrorCode::ConfigurationError => 9002,
            ErrorCode::SerializationError => 9003,
        }
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    #[error("Invalid email address: {address}")]
    InvalidEmail { address: String },

    #[error("Score {score} is outside the accepted range 1..=10")]
    ScoreOutOfRange { score: i16 },

    #[error("Question order must be a positive integer, got {order}")]
    InvalidQuestionOrder { order: i32 },

    // Resource errors
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound { resource_type: String, id: String },

    #[error("Form not found: {id}")]
    FormNotFound { id: Uuid },

    #[error("Question not found: {id}")]
    QuestionNotFound { id: Uuid },

    #[error("Form entry not found: {id}")]
    EntryNotFound { id: Uuid },

    #[error("No review exists for entry {entry_id}")]
    ReviewNotFound { entry_id: Uuid },

    // Conflict errors
    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Applicant {applicant_id} has already submitted form {form_id}")]
    DuplicateEntry { applicant_id: Uuid, form_id: Uuid },

    #[error("An answer for question {question_id} already exists on entry {entry_id}")]
    DuplicateAnswer { entry_id: Uuid, question_id: Uuid },

    #[error("Cannot insert question at order {order} on form {form_id}: no question at order {}", .order - 1)]
    ChainGap { form_id: Uuid, order: i32 },

    // Referential errors
    #[error("Referenced {resource_type} {id} does not exist")]
    Referential { resource_type: String, id: String },

    // Database errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Database connection error: {message}")]
    DatabaseConnection { message: String },

    #[error("Database transaction failed: {message}")]
    Transaction { message: String },

    // Internal errors
    #[error("Internal server error: {message}")]
    Internal { message: String },

    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { .. } => ErrorCode::ValidationError,
            AppError::InvalidEmail { .. } => ErrorCode::InvalidEmail,
            AppError::ScoreOutOfRange { .. } => ErrorCode::ScoreOutOfRange,
            AppError::InvalidQuestionOrder { .. } => ErrorCode::InvalidQuestionOrder,
            AppError::NotFound { .. } => ErrorCode::NotFound,
            AppError::FormNotFound { .. } => ErrorCode::FormNotFound,
            AppError::QuestionNotFound { .. } => ErrorCode::QuestionNotFound,
            AppError::EntryNotFound { .. } => ErrorCode::EntryNotFound,
            AppError::ReviewNotFound { .. } => ErrorCode::ReviewNotFound,
            AppError::Conflict { .. } => ErrorCode::Conflict,
            AppError::DuplicateEntry { .. } => ErrorCode::DuplicateEntry,
            AppError::DuplicateAnswer { .. } => ErrorCode::DuplicateAnswer,
            AppError::ChainGap { .. } => ErrorCode::ChainGap,
            AppError::Referential { .. } => ErrorCode::ReferentialViolation,
            AppError::Database(_) => ErrorCode::DatabaseError,
            AppError::DatabaseConnection { .. } => ErrorCode::ConnectionError,
            AppError::Transaction { .. } => ErrorCode::TransactionError,
            AppError::Internal { .. } => ErrorCode::InternalError,
            AppError::Configuration(_) => ErrorCode::ConfigurationError,
            AppError::Serialization(_) => ErrorCode::SerializationError,
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// Every error kind maps here and nowhere else, so a given failure mode
    /// always surfaces with the same status across all handlers.
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            AppError::Validation { .. }
            | AppError::InvalidEmail { .. }
            | AppError::ScoreOutOfRange { .. }
            | AppError::InvalidQuestionOrder { .. } => StatusCode::BAD_REQUEST,

            // 404 Not Found
            AppError::NotFound { .. }
            | AppError::FormNotFound { .. }
            | AppError::QuestionNotFound { .. }
            | AppError::EntryNotFound { .. }
            | AppError::ReviewNotFound { .. } => StatusCode::NOT_FOUND,

            // 409 Conflict
            AppError::Conflict { .. }
            | AppError::DuplicateEntry { .. }
            | AppError::DuplicateAnswer { .. }
            | AppError::ChainGap { .. } => StatusCode::CONFLICT,

            // 422 Unprocessable Entity
            AppError::Referential { .. } => StatusCode::UNPROCESSABLE_ENTITY,

            // 500 Internal Server Error
            AppError::Database(_)
            | AppError::Transaction { .. }
            | AppError::Internal { .. }
            | AppError::Configuration(_)
            | AppError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,

            // 503 Service Unavailable
            AppError::DatabaseConnection { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Check if this error should be logged at error level
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// Check if this error is a client error
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

/// Structured error response for API
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: ErrorCode,
    pub status: u16,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();
        let message = self.to_string();

        // Log based on severity
        if self.is_server_error() {
            tracing::error!(
                error = %message,
                code = ?code,
                status = status.as_u16(),
                "Server error"
            );
        } else if self.is_client_error() {
            tracing::warn!(
                error = %message,
                code = ?code,
                status = status.as_u16(),
                "Client error"
            );
        }

        let body = ErrorResponse {
            error: ErrorDetails {
                code,
                status: status.as_u16(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_mapping() {
        let err = AppError::FormNotFound { id: Uuid::nil() };
        assert_eq!(err.code(), ErrorCode::FormNotFound);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_validation_error() {
        let err = AppError::Validation {
            message: "title must not be blank".into(),
            field: Some("title".into()),
        };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(!err.is_server_error());
        assert!(err.is_client_error());
    }

    #[test]
    fn test_conflict_family_maps_to_409() {
        let dup_entry = AppError::DuplicateEntry {
            applicant_id: Uuid::nil(),
            form_id: Uuid::nil(),
        };
        let dup_answer = AppError::DuplicateAnswer {
            entry_id: Uuid::nil(),
            question_id: Uuid::nil(),
        };
        let gap = AppError::ChainGap {
            form_id: Uuid::nil(),
            order: 5,
        };
        assert_eq!(dup_entry.status_code(), StatusCode::CONFLICT);
        assert_eq!(dup_answer.status_code(), StatusCode::CONFLICT);
        assert_eq!(gap.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_chain_gap_names_missing_predecessor() {
        let gap = AppError::ChainGap {
            form_id: Uuid::nil(),
            order: 5,
        };
        assert!(gap.to_string().contains("no question at order 4"));
    }

    #[test]
    fn test_referential_maps_to_422() {
        let err = AppError::Referential {
            resource_type: "staff".into(),
            id: Uuid::nil().to_string(),
        };
        assert_eq!(err.code(), ErrorCode::ReferentialViolation);
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_score_out_of_range() {
        let err = AppError::ScoreOutOfRange { score: 11 };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code().as_code(), 1003);
    }

    #[test]
    fn test_server_error() {
        let err = AppError::Internal {
            message: "Something went wrong".into(),
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.is_server_error());
    }
}
