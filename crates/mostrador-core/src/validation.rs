//! # Validation Module
//!
//! Field-level validators shared by catalog edits, orders and purchases.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extractor (serde)                                       │
//! │  └── Shape and type of the JSON body                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (called from prepare()/validate())               │
//! │  ├── Quantities, amounts, lengths, references                          │
//! │  └── Runs before a unit of work is opened                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Storage                                                      │
//! │  ├── Foreign keys on order/purchase lines                              │
//! │  └── One open register (partial unique index)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use mostrador_core::validation::{validate_quantity, validate_sku};
//!
//! validate_sku("HAM-001").unwrap();
//! validate_quantity(3).unwrap();
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::{MAX_AMOUNT_CENTS, MAX_CART_ITEMS, MAX_ITEM_QUANTITY, MAX_PURCHASE_QUANTITY, MAX_STOCK};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted id or foreign reference.
pub const MAX_REFERENCE_LEN: usize = 64;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a SKU.
///
/// An empty SKU is accepted (not every item carries one). A non-empty SKU
/// must be at most 50 characters of letters, digits, hyphens and underscores.
///
/// ```rust
/// use mostrador_core::validation::validate_sku;
///
/// assert!(validate_sku("PIZ-001").is_ok());
/// assert!(validate_sku("").is_ok());
/// assert!(validate_sku("has space").is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    let sku = sku.trim();

    if sku.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: 50,
        });
    }

    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a required display name (product, client, supplier, category).
pub fn validate_name(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates an optional free-text field (notes, description, table label).
pub fn validate_optional_text(
    field: &str,
    value: Option<&str>,
    max: usize,
) -> ValidationResult<()> {
    match value {
        Some(v) if v.chars().count() > max => Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        }),
        _ => Ok(()),
    }
}

/// Validates an email address. Empty is accepted.
///
/// Only a shallow shape check: one `@` with something on both sides and a
/// dot in the domain.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();
    if email.is_empty() {
        return Ok(());
    }

    let invalid = || ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: "must look like name@domain.tld".to_string(),
    };

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty()
        || domain.contains('@')
        || !domain.contains('.')
        || domain.starts_with('.')
    {
        return Err(invalid());
    }

    Ok(())
}

/// Validates an id or foreign reference (product id, client id, ...).
///
/// ```rust
/// use mostrador_core::validation::validate_reference;
///
/// assert!(validate_reference("productId", "1").is_ok());
/// assert!(validate_reference("productId", "  ").is_err());
/// ```
pub fn validate_reference(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::required(field));
    }

    if id.len() > MAX_REFERENCE_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_REFERENCE_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates the quantity of a sale line.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Checkout                                                               │
/// │                                                                         │
/// │  Cart line: Papas Fritas × 3                                           │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(3) ← THIS FUNCTION                                  │
/// │       │                                                                 │
/// │       ├── qty <= 0?  → "quantity must be positive"                     │
/// │       ├── qty > 999? → "quantity must be between 1 and 999"            │
/// │       └── OK → line accepted                                           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    validate_quantity_up_to(qty, MAX_ITEM_QUANTITY)
}

/// Validates the quantity of a purchase line (larger ceiling than sales).
pub fn validate_purchase_quantity(qty: i64) -> ValidationResult<()> {
    validate_quantity_up_to(qty, MAX_PURCHASE_QUANTITY)
}

fn validate_quantity_up_to(qty: i64, max: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > max {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max,
        });
    }

    Ok(())
}

/// Validates a price, cost or cash amount in cents.
///
/// ## Rules
/// - Zero is allowed
/// - At most MAX_AMOUNT_CENTS
///
/// ```rust
/// use mostrador_core::validation::validate_amount_cents;
///
/// assert!(validate_amount_cents("price", 1250).is_ok());
/// assert!(validate_amount_cents("price", 0).is_ok());
/// assert!(validate_amount_cents("price", -100).is_err());
/// assert!(validate_amount_cents("price", i64::MAX).is_err());
/// ```
pub fn validate_amount_cents(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    if cents > MAX_AMOUNT_CENTS {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_AMOUNT_CENTS,
        });
    }

    Ok(())
}

/// Validates units on hand set through the catalog (0..=MAX_STOCK).
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::Negative {
            field: "stock".to_string(),
        });
    }

    if stock > MAX_STOCK {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: MAX_STOCK,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates the number of lines in an order or purchase.
///
/// ## Rules
/// - At least one line
/// - At most MAX_CART_ITEMS (100)
pub fn validate_line_count(field: &str, lines: usize) -> ValidationResult<()> {
    if lines == 0 {
        return Err(ValidationError::Empty {
            field: field.to_string(),
        });
    }

    if lines > MAX_CART_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 1,
            max: MAX_CART_ITEMS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_sku() {
        assert!(validate_sku("HAM-001").is_ok());
        assert!(validate_sku("cafe_americano").is_ok());
        assert!(validate_sku("").is_ok());

        assert!(validate_sku("has space").is_err());
        assert!(validate_sku(&"A".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("name", "Café Americano", 200).is_ok());
        assert_eq!(
            validate_name("name", "   ", 200),
            Err(ValidationError::Required {
                field: "name".to_string()
            })
        );
        assert!(validate_name("name", &"a".repeat(201), 200).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ventas@distri.com").is_ok());
        assert!(validate_email("").is_ok());

        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@distri.com").is_err());
        assert!(validate_email("a@b").is_err());
        assert!(validate_email("a@b@c.com").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());

        // Restocking can exceed the counter ceiling
        assert!(validate_purchase_quantity(5000).is_ok());
        assert!(validate_purchase_quantity(0).is_err());
    }

    #[test]
    fn test_validate_reference() {
        assert!(validate_reference("clientId", "c-1").is_ok());
        assert!(validate_reference("clientId", "").is_err());
        assert!(validate_reference("clientId", &"x".repeat(65)).is_err());
    }

    #[test]
    fn test_amount_and_stock_ceilings() {
        assert!(validate_amount_cents("initialAmount", MAX_AMOUNT_CENTS).is_ok());
        assert_eq!(
            validate_amount_cents("initialAmount", i64::MAX),
            Err(ValidationError::OutOfRange {
                field: "initialAmount".to_string(),
                min: 0,
                max: MAX_AMOUNT_CENTS,
            })
        );

        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(MAX_STOCK).is_ok());
        assert!(validate_stock(MAX_STOCK + 1).is_err());
        assert!(validate_stock(-1).is_err());
    }

    #[test]
    fn test_validate_line_count() {
        assert_eq!(
            validate_line_count("items", 0),
            Err(ValidationError::Empty {
                field: "items".to_string()
            })
        );
        assert!(validate_line_count("items", 1).is_ok());
        assert!(validate_line_count("items", MAX_CART_ITEMS).is_ok());
        assert!(validate_line_count("items", MAX_CART_ITEMS + 1).is_err());
    }
}
