//! # Error Types
//!
//! Domain-specific error types for mostrador-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  mostrador-core errors (this file)                                     │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input rejected before any mutation             │
//! │                                                                         │
//! │  mostrador-db errors                                                   │
//! │  ├── DbError          - Storage failures, missing rows                 │
//! │  └── PosError         - Service result (CoreError | DbError)           │
//! │                                                                         │
//! │  apps/server                                                           │
//! │  └── ApiError         - What the HTTP client sees                      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → PosError → ApiError → Client      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations.
///
/// Raised either while preparing a request (validation) or by a service
/// mid-transaction, in which case the whole unit of work is rolled back.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Not enough stock to complete a sale under the `reject` stock policy.
    ///
    /// ## User Workflow
    /// ```text
    /// Checkout: 5 × Coca Cola
    ///      │
    ///      ▼
    /// Stock decrement with policy=reject, available=3
    ///      │
    ///      ▼
    /// InsufficientStock { product_id: "3", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// Order rolled back, nothing recorded
    /// ```
    #[error("Insufficient stock for {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: String,
        available: i64,
        requested: i64,
    },

    /// No cash register session is open.
    ///
    /// ## When This Occurs
    /// - Closing a register that is already closed
    /// - A cash sale under the `reject` closed-register policy
    #[error("No cash register is open")]
    RegisterClosed,

    /// A cash register session is already open.
    #[error("A cash register is already open (opened at {opened_at})")]
    RegisterAlreadyOpen { opened_at: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Always raised before any storage is touched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// A collection that must contain something is empty.
    #[error("{field} must not be empty")]
    Empty { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// A running total would pass its ceiling.
    #[error("{field} would exceed {max}")]
    Overflow { field: String, max: i64 },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or more.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// A caller-computed figure disagrees with the one derived from the lines.
    #[error("{field} mismatch: expected {expected}, got {actual}")]
    Mismatch {
        field: String,
        expected: i64,
        actual: i64,
    },

    /// Invalid format (e.g. malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in the allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

impl ValidationError {
    pub(crate) fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }

    pub fn overflow(field: &str, max: i64) -> Self {
        ValidationError::Overflow {
            field: field.to_string(),
            max,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            product_id: "3".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for 3: available 3, requested 5"
        );
        assert_eq!(CoreError::RegisterClosed.to_string(), "No cash register is open");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Empty {
            field: "items".to_string(),
        };
        assert_eq!(err.to_string(), "items must not be empty");

        let err = ValidationError::Mismatch {
            field: "total".to_string(),
            expected: 2550,
            actual: 2500,
        };
        assert_eq!(err.to_string(), "total mismatch: expected 2550, got 2500");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("sku").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
