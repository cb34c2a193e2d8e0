//! # Database Error Types
//!
//! Storage errors, and the combined error the services return.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  sqlx::Error ──────────► DbError ──┐                                    │
//! │                                    ├──► PosError (service result)       │
//! │  ValidationError ──► CoreError ────┘         │                          │
//! │                                              ▼                          │
//! │                                   ApiError (apps/server)                │
//! │                                              │                          │
//! │                                              ▼                          │
//! │                                   JSON { code, message }                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use mostrador_core::{CoreError, ValidationError};
use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found.
    ///
    /// ## When This Occurs
    /// - Unknown product in an order or purchase line
    /// - Unknown client or supplier reference
    /// - Patch of a product that does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation.
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// A write would push a stored total past its ceiling
    /// (stock, client statistics, register amounts).
    #[error("Validation error: {0}")]
    Invalid(#[from] ValidationError),

    /// Foreign key constraint violation.
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// Database connection failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Commit or rollback failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        DbError::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → DbError::NotFound
/// sqlx::Error::Database       → constraint kind from the SQLite message
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Record", "unknown"),

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // "UNIQUE constraint failed: <table>.<column>"
                if let Some(field) = msg.strip_prefix("UNIQUE constraint failed: ") {
                    DbError::duplicate(field, "unknown")
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Service Error
// =============================================================================

/// What a service call can fail with: a business rule or storage.
#[derive(Debug, Error)]
pub enum PosError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Db(DbError),
}

/// `DbError::Invalid` surfaces as a validation failure, whichever backend
/// raised it.
impl From<DbError> for PosError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Invalid(e) => PosError::Core(CoreError::Validation(e)),
            other => PosError::Db(other),
        }
    }
}

impl From<ValidationError> for PosError {
    fn from(err: ValidationError) -> Self {
        PosError::Core(CoreError::Validation(err))
    }
}

impl PosError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, PosError::Db(DbError::NotFound { .. }))
    }
}

/// Result type for service operations.
pub type PosResult<T> = Result<T, PosError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err: DbError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[test]
    fn test_validation_lifts_into_pos_error() {
        let err: PosError = ValidationError::Empty {
            field: "items".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Validation error: items must not be empty");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_storage_overflow_lifts_into_validation() {
        let err: PosError = DbError::from(ValidationError::overflow("stock", 10)).into();
        assert!(matches!(
            err,
            PosError::Core(CoreError::Validation(ValidationError::Overflow { .. }))
        ));
    }

    #[test]
    fn test_not_found_message() {
        let err: PosError = DbError::not_found("Supplier", "s-9").into();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Supplier not found: s-9");
    }
}
