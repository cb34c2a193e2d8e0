//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Stock Movements
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Every stock change is a single UPDATE evaluated by SQLite:             │
//! │                                                                         │
//! │  sale, reject:  SET stock = stock - ?  WHERE id = ? AND stock >= ?      │
//! │  sale, clamp:   SET stock = MAX(stock - ?, MIN(stock, 0))               │
//! │  sale, allow:   SET stock = stock - ?                                   │
//! │  purchase:      SET stock = stock + ?, cost_cents = ?                   │
//! │                                                                         │
//! │  Two registers selling the last unit at once cannot both read "1"      │
//! │  and both write "0": the second UPDATE sees the first one's result.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteExecutor;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::store::StockMovement;
use mostrador_core::catalog::ProductPatch;
use mostrador_core::{Product, StockPolicy, ValidationError, MAX_STOCK};

const SELECT_PRODUCT: &str = r#"
    SELECT id, name, category, price_cents, cost_cents, stock,
           unit, sku, image, created_at, updated_at
    FROM products
"#;

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// All products ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!("{SELECT_PRODUCT} ORDER BY name, id"))
            .fetch_all(&self.pool)
            .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!("{SELECT_PRODUCT} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Inserts the product, or overwrites every mutable field when the id
    /// exists. `created_at` of an existing row is kept.
    pub async fn upsert(&self, product: &Product) -> DbResult<Product> {
        debug!(id = %product.id, sku = %product.sku, "Upserting product");
        upsert(&self.pool, product).await
    }

    /// Applies the fields present in `patch` in one UPDATE.
    pub async fn patch(
        &self,
        id: &str,
        patch: &ProductPatch,
        now: DateTime<Utc>,
    ) -> DbResult<Product> {
        debug!(id = %id, "Patching product");

        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products SET
                name        = COALESCE(?2, name),
                category    = COALESCE(?3, category),
                price_cents = COALESCE(?4, price_cents),
                cost_cents  = COALESCE(?5, cost_cents),
                stock       = COALESCE(?6, stock),
                unit        = COALESCE(?7, unit),
                sku         = COALESCE(?8, sku),
                image       = CASE
                                WHEN ?9 IS NULL THEN image
                                WHEN TRIM(?9) = '' THEN NULL
                                ELSE ?9
                              END,
                updated_at  = ?10
            WHERE id = ?1
            RETURNING id, name, category, price_cents, cost_cents, stock,
                      unit, sku, image, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(patch.name.as_deref().map(str::trim))
        .bind(patch.category.as_deref().map(str::trim))
        .bind(patch.price_cents)
        .bind(patch.cost_cents)
        .bind(patch.stock)
        .bind(patch.unit.as_deref().map(str::trim))
        .bind(patch.sku.as_deref().map(str::trim))
        .bind(patch.image.as_deref())
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        product.ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Deletes a product. Order and purchase history keep their snapshots.
    pub async fn delete(&self, id: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

pub(crate) async fn upsert<'e, E>(executor: E, product: &Product) -> DbResult<Product>
where
    E: SqliteExecutor<'e>,
{
    let stored = sqlx::query_as::<_, Product>(
        r#"
        INSERT INTO products (
            id, name, category, price_cents, cost_cents, stock,
            unit, sku, image, created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
        ON CONFLICT(id) DO UPDATE SET
            name        = excluded.name,
            category    = excluded.category,
            price_cents = excluded.price_cents,
            cost_cents  = excluded.cost_cents,
            stock       = excluded.stock,
            unit        = excluded.unit,
            sku         = excluded.sku,
            image       = excluded.image,
            updated_at  = excluded.updated_at
        RETURNING id, name, category, price_cents, cost_cents, stock,
                  unit, sku, image, created_at, updated_at
        "#,
    )
    .bind(&product.id)
    .bind(&product.name)
    .bind(&product.category)
    .bind(product.price_cents)
    .bind(product.cost_cents)
    .bind(product.stock)
    .bind(&product.unit)
    .bind(&product.sku)
    .bind(&product.image)
    .bind(product.created_at)
    .bind(product.updated_at)
    .fetch_one(executor)
    .await?;

    Ok(stored)
}

// =============================================================================
// Transactional stock movements
// =============================================================================

/// Takes `qty` units out of stock under `policy`.
pub(crate) async fn decrement_stock(
    conn: &mut SqliteConnection,
    product_id: &str,
    qty: i64,
    policy: StockPolicy,
) -> DbResult<StockMovement> {
    let now = Utc::now();

    let sql = match policy {
        StockPolicy::Reject => {
            "UPDATE products SET stock = stock - ?2, updated_at = ?3 \
             WHERE id = ?1 AND stock >= ?2 RETURNING stock"
        }
        StockPolicy::Clamp => {
            "UPDATE products SET stock = MAX(stock - ?2, MIN(stock, 0)), updated_at = ?3 \
             WHERE id = ?1 RETURNING stock"
        }
        StockPolicy::Allow => {
            "UPDATE products SET stock = stock - ?2, updated_at = ?3 \
             WHERE id = ?1 RETURNING stock"
        }
    };

    let remaining: Option<i64> = sqlx::query_scalar(sql)
        .bind(product_id)
        .bind(qty)
        .bind(now)
        .fetch_optional(&mut *conn)
        .await?;

    if let Some(stock) = remaining {
        debug!(product_id = %product_id, qty, stock, %policy, "Stock decremented");
        return Ok(StockMovement::Applied { stock });
    }

    // No row updated: either the product is unknown or the guard refused it
    let available: Option<i64> = sqlx::query_scalar("SELECT stock FROM products WHERE id = ?1")
        .bind(product_id)
        .fetch_optional(&mut *conn)
        .await?;

    match available {
        Some(available) => Ok(StockMovement::Insufficient { available }),
        None => Err(DbError::not_found("Product", product_id)),
    }
}

/// Adds purchased units and records the new unit cost. Returns the new stock.
///
/// Refuses to go past MAX_STOCK, like [`Product::receive`].
pub(crate) async fn receive_stock(
    conn: &mut SqliteConnection,
    product_id: &str,
    qty: i64,
    unit_cost_cents: i64,
) -> DbResult<i64> {
    let stock: Option<i64> = sqlx::query_scalar(
        "UPDATE products SET stock = stock + ?2, cost_cents = ?3, updated_at = ?4 \
         WHERE id = ?1 AND stock <= ?5 - ?2 RETURNING stock",
    )
    .bind(product_id)
    .bind(qty)
    .bind(unit_cost_cents)
    .bind(Utc::now())
    .bind(MAX_STOCK)
    .fetch_optional(&mut *conn)
    .await?;

    let Some(stock) = stock else {
        if exists(&mut *conn, product_id).await? {
            return Err(ValidationError::overflow("stock", MAX_STOCK).into());
        }
        return Err(DbError::not_found("Product", product_id));
    };

    debug!(product_id = %product_id, qty, unit_cost_cents, stock, "Stock received");
    Ok(stock)
}

async fn exists(conn: &mut SqliteConnection, product_id: &str) -> DbResult<bool> {
    let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM products WHERE id = ?1")
        .bind(product_id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(found.is_some())
}
