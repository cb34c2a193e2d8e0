//! # Purchase Repository
//!
//! Supplier purchases and their lines. Written once by the purchase
//! processor, never updated.

use std::collections::HashMap;

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use mostrador_core::{Purchase, PurchaseLine};

const SELECT_PURCHASE: &str = r#"
    SELECT id, date, supplier_id, supplier_name, total_cents, notes
    FROM purchases
"#;

const SELECT_LINE: &str = r#"
    SELECT id, purchase_id, product_id, product_name, quantity, unit_cost_cents, line_total_cents
    FROM purchase_lines
"#;

#[derive(Debug, Clone)]
pub struct PurchaseRepository {
    pool: SqlitePool,
}

impl PurchaseRepository {
    pub fn new(pool: SqlitePool) -> Self {
        PurchaseRepository { pool }
    }

    /// All purchases, newest first, with their lines.
    pub async fn list(&self) -> DbResult<Vec<Purchase>> {
        let sql = format!("{SELECT_PURCHASE} ORDER BY date DESC, rowid DESC");
        let mut purchases = sqlx::query_as::<_, Purchase>(&sql)
            .fetch_all(&self.pool)
            .await?;

        let lines = sqlx::query_as::<_, PurchaseLine>(&format!("{SELECT_LINE} ORDER BY rowid"))
            .fetch_all(&self.pool)
            .await?;

        let mut by_purchase: HashMap<String, Vec<PurchaseLine>> = HashMap::new();
        for line in lines {
            by_purchase.entry(line.purchase_id.clone()).or_default().push(line);
        }
        for purchase in &mut purchases {
            purchase.items = by_purchase.remove(&purchase.id).unwrap_or_default();
        }

        Ok(purchases)
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Purchase>> {
        let purchase = sqlx::query_as::<_, Purchase>(&format!("{SELECT_PURCHASE} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(mut purchase) = purchase else {
            return Ok(None);
        };

        let sql = format!("{SELECT_LINE} WHERE purchase_id = ?1 ORDER BY rowid");
        purchase.items = sqlx::query_as::<_, PurchaseLine>(&sql)
            .bind(id)
            .fetch_all(&self.pool)
            .await?;

        Ok(Some(purchase))
    }
}

pub(crate) async fn insert(conn: &mut SqliteConnection, purchase: &Purchase) -> DbResult<()> {
    debug!(
        id = %purchase.id,
        supplier_id = %purchase.supplier_id,
        total_cents = purchase.total_cents,
        "Inserting purchase"
    );

    sqlx::query(
        r#"
        INSERT INTO purchases (id, date, supplier_id, supplier_name, total_cents, notes)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(&purchase.id)
    .bind(purchase.date)
    .bind(&purchase.supplier_id)
    .bind(&purchase.supplier_name)
    .bind(purchase.total_cents)
    .bind(&purchase.notes)
    .execute(&mut *conn)
    .await?;

    for line in &purchase.items {
        sqlx::query(
            r#"
            INSERT INTO purchase_lines (
                id, purchase_id, product_id, product_name,
                quantity, unit_cost_cents, line_total_cents
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&line.id)
        .bind(&line.purchase_id)
        .bind(&line.product_id)
        .bind(&line.product_name)
        .bind(line.quantity)
        .bind(line.unit_cost_cents)
        .bind(line.line_total_cents)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}
