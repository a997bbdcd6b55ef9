//! # Application Error Type
//!
//! Unified error type for the service layer and CLI.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Order Packs                            │
//! │                                                                         │
//! │  ValidationError (packs-core) ──┐                                      │
//! │  PackingError    (packs-core) ──┤                                      │
//! │  DbError         (packs-db)   ──┼──► AppError ──► ErrorResponse (JSON) │
//! │  ConfigError     (config)     ──┘        │                              │
//! │                                          └──► stderr message (text)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization
//! With `--json` the CLI prints failures as:
//! ```json
//! {
//!   "code": "VALIDATION_ERROR",
//!   "message": "item count must be between 1 and 1000000"
//! }
//! ```

use packs_core::{PackingError, ValidationError};
use packs_db::DbError;
use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by Order Packs services.
#[derive(Debug, Error)]
pub enum AppError {
    /// Input rejected before any calculation ran.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The engine could not produce a selection.
    #[error("{0}")]
    Calculation(#[from] PackingError),

    /// Storage failed.
    #[error("{0}")]
    Database(#[from] DbError),

    /// Configuration could not be loaded.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// A looked-up record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },
}

/// Result type for service operations.
pub type AppResult<T> = Result<T, AppError>;

/// Machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Bad input from the caller
    ValidationError,

    /// No selection could be produced for valid input
    CalculationError,

    /// Storage failure
    DatabaseError,

    /// Bad environment configuration
    ConfigError,

    /// Record lookup missed
    NotFound,
}

impl AppError {
    /// Creates a not found error.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        AppError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Classifies this error.
    ///
    /// An engine `InvalidQuantity` counts as a validation failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation(_) => ErrorCode::ValidationError,
            AppError::Calculation(e) if e.is_invalid_input() => ErrorCode::ValidationError,
            AppError::Calculation(_) => ErrorCode::CalculationError,
            AppError::Database(DbError::NotFound { .. }) => ErrorCode::NotFound,
            AppError::Database(_) => ErrorCode::DatabaseError,
            AppError::Config(_) => ErrorCode::ConfigError,
            AppError::NotFound { .. } => ErrorCode::NotFound,
        }
    }
}

/// Serializable form of an [`AppError`].
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        ErrorResponse {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        let invalid = AppError::from(PackingError::InvalidQuantity { requested: 0 });
        assert_eq!(invalid.code(), ErrorCode::ValidationError);

        let empty = AppError::from(PackingError::NoPacksAvailable);
        assert_eq!(empty.code(), ErrorCode::CalculationError);

        let anomaly = AppError::from(PackingError::NoSolution {
            requested: 10,
            ceiling: 15,
        });
        assert_eq!(anomaly.code(), ErrorCode::CalculationError);

        let db = AppError::from(DbError::PoolExhausted);
        assert_eq!(db.code(), ErrorCode::DatabaseError);

        let config = AppError::from(ConfigError::InvalidValue("DB_PATH".to_string()));
        assert_eq!(config.code(), ErrorCode::ConfigError);

        assert_eq!(AppError::not_found("Order", "x").code(), ErrorCode::NotFound);
    }

    #[test]
    fn test_error_response_json() {
        let err = AppError::from(ValidationError::OutOfRange {
            field: "item count".to_string(),
            min: 1,
            max: 1_000_000,
        });

        let json = serde_json::to_value(ErrorResponse::from(&err)).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["message"], "item count must be between 1 and 1000000");
    }

    #[test]
    fn test_calculation_code_serializes() {
        let json = serde_json::to_string(&ErrorCode::CalculationError).unwrap();
        assert_eq!(json, "\"CALCULATION_ERROR\"");
    }
}
