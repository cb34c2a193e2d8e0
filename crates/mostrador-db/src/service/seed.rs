//! # Starter Data
//!
//! A small restaurant catalog for development and demos: four categories,
//! five products, two clients, two suppliers and an open register with
//! 100.00 in the drawer.
//!
//! Seeding is skipped entirely when any product already exists.

use tracing::info;

use super::PosServices;
use crate::error::PosResult;
use mostrador_core::catalog::{CategoryInput, ProductInput, SupplierInput};
use mostrador_core::{Client, Money};

/// Opening float of the seeded register.
pub const SEED_REGISTER_FLOAT_CENTS: i64 = 10_000;

const CATEGORIES: &[(&str, &str)] = &[
    ("Platos Fuertes", "Platos principales"),
    ("Entradas", "Para compartir"),
    ("Bebidas", "Frías y calientes"),
    ("Postres", "Dulces"),
];

/// (id, name, category, price, cost, stock, unit, sku)
const PRODUCTS: &[(&str, &str, &str, i64, i64, i64, &str, &str)] = &[
    ("1", "Hamburguesa Clásica", "Platos Fuertes", 1250, 600, 50, "unidad", "HAM-001"),
    ("2", "Papas Fritas", "Entradas", 450, 150, 100, "porcion", "PAP-001"),
    ("3", "Coca Cola", "Bebidas", 200, 100, 200, "botella", "BEB-001"),
    ("4", "Café Americano", "Bebidas", 300, 50, 500, "taza", "CAF-001"),
    ("5", "Pizza Margarita", "Platos Fuertes", 1500, 500, 30, "unidad", "PIZ-001"),
];

/// (id, name, phone, email, total spent, visits)
const CLIENTS: &[(&str, &str, &str, &str, i64, i64)] = &[
    ("1", "Juan Pérez", "555-0101", "juan@example.com", 15_000, 5),
    ("2", "Maria Lopez", "555-0202", "maria@example.com", 4_500, 2),
];

/// (id, name, contact, email, category)
const SUPPLIERS: &[(&str, &str, &str, &str, &str)] = &[
    ("1", "Distribuidora Alimentos SA", "Carlos Ruiz", "ventas@distri.com", "Insumos Generales"),
    ("2", "Bebidas del Norte", "Ana Polo", "ana@bebidas.com", "Bebidas"),
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub categories: usize,
    pub products: usize,
    pub clients: usize,
    pub suppliers: usize,
    pub register_opened: bool,
    /// True when existing products made the run a no-op.
    pub skipped: bool,
}

pub async fn seed_demo_data(services: &PosServices) -> PosResult<SeedReport> {
    let mut report = SeedReport::default();

    let existing = services.catalog.list_products().await?;
    if !existing.is_empty() {
        info!(products = existing.len(), "Catalog not empty, skipping seed");
        report.skipped = true;
        return Ok(report);
    }

    for (name, description) in CATEGORIES {
        services
            .catalog
            .save_category(CategoryInput {
                id: None,
                name: name.to_string(),
                description: Some(description.to_string()),
            })
            .await?;
        report.categories += 1;
    }

    for &(id, name, category, price, cost, stock, unit, sku) in PRODUCTS {
        services
            .catalog
            .save_product(ProductInput {
                id: Some(id.to_string()),
                name: name.to_string(),
                category: category.to_string(),
                price_cents: price,
                cost_cents: cost,
                stock,
                unit: unit.to_string(),
                sku: sku.to_string(),
                image: None,
            })
            .await?;
        report.products += 1;
    }

    // Inserted directly: client statistics are not part of ClientInput
    for &(id, name, phone, email, total_spent_cents, visits) in CLIENTS {
        services
            .store()
            .upsert_client(Client {
                id: id.to_string(),
                name: name.to_string(),
                phone: phone.to_string(),
                email: email.to_string(),
                total_spent_cents,
                visits,
            })
            .await?;
        report.clients += 1;
    }

    for &(id, name, contact, email, category) in SUPPLIERS {
        services
            .catalog
            .save_supplier(SupplierInput {
                id: Some(id.to_string()),
                name: name.to_string(),
                contact: contact.to_string(),
                email: email.to_string(),
                category: category.to_string(),
            })
            .await?;
        report.suppliers += 1;
    }

    let register = services.register.current().await?;
    if !register.is_some_and(|r| r.is_open) {
        services
            .register
            .open(Money::from_cents(SEED_REGISTER_FLOAT_CENTS))
            .await?;
        report.register_opened = true;
    }

    info!(
        categories = report.categories,
        products = report.products,
        clients = report.clients,
        suppliers = report.suppliers,
        "Starter data loaded"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::ProcessorPolicy;
    use crate::store::MemoryStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_seed_then_skip() {
        let services = PosServices::new(Arc::new(MemoryStore::new()), ProcessorPolicy::default());

        let report = seed_demo_data(&services).await.unwrap();
        assert!(!report.skipped);
        assert_eq!(report.products, 5);
        assert!(report.register_opened);

        let burger = services.catalog.get_product("1").await.unwrap();
        assert_eq!(burger.stock, 50);
        assert_eq!(burger.price_cents, 1250);

        let juan = services.catalog.get_client("1").await.unwrap();
        assert_eq!(juan.total_spent_cents, 15_000);
        assert_eq!(juan.visits, 5);

        let register = services.register.current().await.unwrap().unwrap();
        assert!(register.is_open);
        assert_eq!(register.expected_amount_cents, SEED_REGISTER_FLOAT_CENTS);

        let again = seed_demo_data(&services).await.unwrap();
        assert!(again.skipped);
        assert_eq!(services.catalog.list_categories().await.unwrap().len(), 4);
    }
}
