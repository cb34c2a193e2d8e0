//! # Catalog & Relationship Inputs
//!
//! Explicit edit requests for products, categories, clients and suppliers.
//! Each input lists only the fields a caller may set; everything else
//! (timestamps, client statistics) is owned by the store.
//!
//! ## Upsert Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ProductInput { id: None, .. }   → new UUID, insert                    │
//! │  ProductInput { id: Some(x), .. }                                       │
//! │     ├── x absent  → insert with id x                                   │
//! │     └── x present → overwrite every mutable field                      │
//! │                                                                         │
//! │  ClientInput never carries total_spent / visits: an upsert of an       │
//! │  existing client leaves its statistics untouched.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::types::{Category, Client, Product, Supplier};
use crate::validation::{
    validate_amount_cents, validate_email, validate_name, validate_optional_text,
    validate_reference, validate_sku, validate_stock, ValidationResult,
};

const NAME_MAX: usize = 200;
const LABEL_MAX: usize = 100;
const TEXT_MAX: usize = 1000;

/// Uses the caller's id when one was given, otherwise a fresh UUID.
fn resolve_id(id: Option<String>) -> String {
    match id {
        Some(id) if !id.trim().is_empty() => id.trim().to_string(),
        _ => Uuid::new_v4().to_string(),
    }
}

fn validate_given_id(id: Option<&str>) -> ValidationResult<()> {
    match id {
        Some(id) if !id.trim().is_empty() => validate_reference("id", id),
        _ => Ok(()),
    }
}

// =============================================================================
// Product
// =============================================================================

/// Full product upsert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductInput {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub price_cents: i64,
    #[serde(default)]
    pub cost_cents: i64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl ProductInput {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_given_id(self.id.as_deref())?;
        validate_name("name", &self.name, NAME_MAX)?;
        validate_optional_text("category", Some(&self.category), LABEL_MAX)?;
        validate_amount_cents("price", self.price_cents)?;
        validate_amount_cents("cost", self.cost_cents)?;
        validate_stock(self.stock)?;
        validate_optional_text("unit", Some(&self.unit), LABEL_MAX)?;
        validate_sku(&self.sku)?;
        Ok(())
    }

    /// Validates and builds the product. `created_at` is kept by the store
    /// when the id already exists.
    pub fn into_product(self, now: DateTime<Utc>) -> ValidationResult<Product> {
        self.validate()?;
        Ok(Product {
            id: resolve_id(self.id),
            name: self.name.trim().to_string(),
            category: self.category.trim().to_string(),
            price_cents: self.price_cents,
            cost_cents: self.cost_cents,
            stock: self.stock,
            unit: self.unit.trim().to_string(),
            sku: self.sku.trim().to_string(),
            image: self.image.filter(|s| !s.trim().is_empty()),
            created_at: now,
            updated_at: now,
        })
    }
}

/// Partial product edit. `None` leaves the field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price_cents: Option<i64>,
    pub cost_cents: Option<i64>,
    pub stock: Option<i64>,
    pub unit: Option<String>,
    pub sku: Option<String>,
    pub image: Option<String>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        *self == ProductPatch::default()
    }

    pub fn validate(&self) -> ValidationResult<()> {
        if let Some(name) = &self.name {
            validate_name("name", name, NAME_MAX)?;
        }
        validate_optional_text("category", self.category.as_deref(), LABEL_MAX)?;
        if let Some(price) = self.price_cents {
            validate_amount_cents("price", price)?;
        }
        if let Some(cost) = self.cost_cents {
            validate_amount_cents("cost", cost)?;
        }
        if let Some(stock) = self.stock {
            validate_stock(stock)?;
        }
        validate_optional_text("unit", self.unit.as_deref(), LABEL_MAX)?;
        if let Some(sku) = &self.sku {
            validate_sku(sku)?;
        }
        Ok(())
    }

    /// Validates, then merges the patch into `product`.
    ///
    /// An empty `image` string clears the image.
    pub fn apply_to(self, product: &mut Product, now: DateTime<Utc>) -> ValidationResult<()> {
        self.validate()?;

        if let Some(name) = self.name {
            product.name = name.trim().to_string();
        }
        if let Some(category) = self.category {
            product.category = category.trim().to_string();
        }
        if let Some(price) = self.price_cents {
            product.price_cents = price;
        }
        if let Some(cost) = self.cost_cents {
            product.cost_cents = cost;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(unit) = self.unit {
            product.unit = unit.trim().to_string();
        }
        if let Some(sku) = self.sku {
            product.sku = sku.trim().to_string();
        }
        if let Some(image) = self.image {
            product.image = Some(image).filter(|s| !s.trim().is_empty());
        }
        product.updated_at = now;
        Ok(())
    }
}

// =============================================================================
// Category
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CategoryInput {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl CategoryInput {
    pub fn into_category(self) -> ValidationResult<Category> {
        validate_given_id(self.id.as_deref())?;
        validate_name("name", &self.name, LABEL_MAX)?;
        validate_optional_text("description", self.description.as_deref(), TEXT_MAX)?;

        Ok(Category {
            id: resolve_id(self.id),
            name: self.name.trim().to_string(),
            description: self.description.filter(|d| !d.trim().is_empty()),
        })
    }
}

// =============================================================================
// Client
// =============================================================================

/// Client contact details. Statistics are not editable here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ClientInput {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

impl ClientInput {
    /// Builds a client with zeroed statistics. Stores keep the existing
    /// statistics when the id is already known.
    pub fn into_client(self) -> ValidationResult<Client> {
        validate_given_id(self.id.as_deref())?;
        validate_name("name", &self.name, NAME_MAX)?;
        validate_optional_text("phone", Some(&self.phone), 50)?;
        validate_email(&self.email)?;

        Ok(Client {
            id: resolve_id(self.id),
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            total_spent_cents: 0,
            visits: 0,
        })
    }
}

// =============================================================================
// Supplier
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SupplierInput {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub category: String,
}

impl SupplierInput {
    pub fn into_supplier(self) -> ValidationResult<Supplier> {
        validate_given_id(self.id.as_deref())?;
        validate_name("name", &self.name, NAME_MAX)?;
        validate_optional_text("contact", Some(&self.contact), NAME_MAX)?;
        validate_email(&self.email)?;
        validate_optional_text("category", Some(&self.category), LABEL_MAX)?;

        Ok(Supplier {
            id: resolve_id(self.id),
            name: self.name.trim().to_string(),
            contact: self.contact.trim().to_string(),
            email: self.email.trim().to_string(),
            category: self.category.trim().to_string(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn burger() -> ProductInput {
        ProductInput {
            id: Some("1".to_string()),
            name: " Hamburguesa Clásica ".to_string(),
            category: "Platos Fuertes".to_string(),
            price_cents: 1250,
            cost_cents: 600,
            stock: 50,
            unit: "unidad".to_string(),
            sku: "HAM-001".to_string(),
            image: Some(String::new()),
        }
    }

    #[test]
    fn test_product_input_keeps_given_id_and_trims() {
        let product = burger().into_product(Utc::now()).unwrap();
        assert_eq!(product.id, "1");
        assert_eq!(product.name, "Hamburguesa Clásica");
        assert_eq!(product.image, None);
    }

    #[test]
    fn test_product_input_generates_id() {
        let mut input = burger();
        input.id = None;
        let product = input.into_product(Utc::now()).unwrap();
        assert!(Uuid::parse_str(&product.id).is_ok());
    }

    #[test]
    fn test_product_input_rejects_negative_price() {
        let mut input = burger();
        input.price_cents = -1;
        assert!(matches!(
            input.into_product(Utc::now()),
            Err(ValidationError::Negative { .. })
        ));
    }

    #[test]
    fn test_patch_only_touches_given_fields() {
        let mut product = burger().into_product(Utc::now()).unwrap();
        let patch = ProductPatch {
            price_cents: Some(1300),
            ..Default::default()
        };
        assert!(!patch.is_empty());
        patch.apply_to(&mut product, Utc::now()).unwrap();

        assert_eq!(product.price_cents, 1300);
        assert_eq!(product.cost_cents, 600);
        assert_eq!(product.stock, 50);
    }

    #[test]
    fn test_invalid_patch_leaves_product_alone() {
        let mut product = burger().into_product(Utc::now()).unwrap();
        let before = product.clone();
        let patch = ProductPatch {
            name: Some("Doble".to_string()),
            cost_cents: Some(-5),
            ..Default::default()
        };
        assert!(patch.apply_to(&mut product, Utc::now()).is_err());
        assert_eq!(product, before);
    }

    #[test]
    fn test_client_input_has_zero_stats() {
        let client = ClientInput {
            id: None,
            name: "Juan Pérez".to_string(),
            phone: "555-0101".to_string(),
            email: "juan@example.com".to_string(),
        }
        .into_client()
        .unwrap();
        assert_eq!(client.total_spent_cents, 0);
        assert_eq!(client.visits, 0);
    }

    #[test]
    fn test_supplier_input_rejects_bad_email() {
        let input = SupplierInput {
            id: None,
            name: "Bebidas del Norte".to_string(),
            contact: "Ana Polo".to_string(),
            email: "ana-at-bebidas".to_string(),
            category: "Bebidas".to_string(),
        };
        assert!(input.into_supplier().is_err());
    }

    #[test]
    fn test_category_blank_description_is_none() {
        let category = CategoryInput {
            id: None,
            name: "Postres".to_string(),
            description: Some("  ".to_string()),
        }
        .into_category()
        .unwrap();
        assert_eq!(category.description, None);
    }
}
