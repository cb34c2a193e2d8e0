//! # Order Repository
//!
//! Recorded sales and their lines. Orders are written once, inside the
//! order processor's transaction, and never updated.
//!
//! ## Snapshot Pattern
//! Lines copy the product name and unit price at the time of sale, so a
//! later price change or product deletion leaves history intact.

use std::collections::HashMap;

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use mostrador_core::{Order, OrderLine};

const SELECT_ORDER: &str = r#"
    SELECT id, date, total_cents, payment_method, status, client_id, table_label
    FROM orders
"#;

const SELECT_LINE: &str = r#"
    SELECT id, order_id, product_id, name_snapshot, unit_price_cents, quantity, line_total_cents
    FROM order_lines
"#;

#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// All orders, newest first, with their lines.
    pub async fn list(&self) -> DbResult<Vec<Order>> {
        let mut orders =
            sqlx::query_as::<_, Order>(&format!("{SELECT_ORDER} ORDER BY date DESC, rowid DESC"))
                .fetch_all(&self.pool)
                .await?;

        let lines = sqlx::query_as::<_, OrderLine>(&format!("{SELECT_LINE} ORDER BY rowid"))
            .fetch_all(&self.pool)
            .await?;

        let mut by_order: HashMap<String, Vec<OrderLine>> = HashMap::new();
        for line in lines {
            by_order.entry(line.order_id.clone()).or_default().push(line);
        }
        for order in &mut orders {
            order.items = by_order.remove(&order.id).unwrap_or_default();
        }

        debug!(count = orders.len(), "Listed orders");
        Ok(orders)
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(&format!("{SELECT_ORDER} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(mut order) = order else {
            return Ok(None);
        };

        let sql = format!("{SELECT_LINE} WHERE order_id = ?1 ORDER BY rowid");
        order.items = sqlx::query_as::<_, OrderLine>(&sql)
            .bind(id)
            .fetch_all(&self.pool)
            .await?;

        Ok(Some(order))
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

/// Inserts the order header and every line.
pub(crate) async fn insert(conn: &mut SqliteConnection, order: &Order) -> DbResult<()> {
    debug!(
        id = %order.id,
        total_cents = order.total_cents,
        lines = order.items.len(),
        "Inserting order"
    );

    sqlx::query(
        r#"
        INSERT INTO orders (id, date, total_cents, payment_method, status, client_id, table_label)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
    )
    .bind(&order.id)
    .bind(order.date)
    .bind(order.total_cents)
    .bind(order.payment_method)
    .bind(order.status)
    .bind(&order.client_id)
    .bind(&order.table_label)
    .execute(&mut *conn)
    .await?;

    for line in &order.items {
        sqlx::query(
            r#"
            INSERT INTO order_lines (
                id, order_id, product_id, name_snapshot,
                unit_price_cents, quantity, line_total_cents
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&line.id)
        .bind(&line.order_id)
        .bind(&line.product_id)
        .bind(&line.name_snapshot)
        .bind(line.unit_price_cents)
        .bind(line.quantity)
        .bind(line.line_total_cents)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}
