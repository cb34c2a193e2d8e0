//! # Supplier Repository

use sqlx::sqlite::SqliteExecutor;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use mostrador_core::Supplier;

const SELECT_SUPPLIER: &str = "SELECT id, name, contact, email, category FROM suppliers";

#[derive(Debug, Clone)]
pub struct SupplierRepository {
    pool: SqlitePool,
}

impl SupplierRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SupplierRepository { pool }
    }

    pub async fn list(&self) -> DbResult<Vec<Supplier>> {
        let sql = format!("{SELECT_SUPPLIER} ORDER BY name, id");
        let suppliers = sqlx::query_as::<_, Supplier>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(suppliers)
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Supplier>> {
        let supplier = sqlx::query_as::<_, Supplier>(&format!("{SELECT_SUPPLIER} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(supplier)
    }

    pub async fn upsert(&self, supplier: &Supplier) -> DbResult<Supplier> {
        debug!(id = %supplier.id, name = %supplier.name, "Upserting supplier");
        upsert(&self.pool, supplier).await
    }

    pub async fn delete(&self, id: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM suppliers WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

pub(crate) async fn upsert<'e, E>(executor: E, supplier: &Supplier) -> DbResult<Supplier>
where
    E: SqliteExecutor<'e>,
{
    let stored = sqlx::query_as::<_, Supplier>(
        r#"
        INSERT INTO suppliers (id, name, contact, email, category)
        VALUES (?1, ?2, ?3, ?4, ?5)
        ON CONFLICT(id) DO UPDATE SET
            name     = excluded.name,
            contact  = excluded.contact,
            email    = excluded.email,
            category = excluded.category
        RETURNING id, name, contact, email, category
        "#,
    )
    .bind(&supplier.id)
    .bind(&supplier.name)
    .bind(&supplier.contact)
    .bind(&supplier.email)
    .bind(&supplier.category)
    .fetch_one(executor)
    .await?;

    Ok(stored)
}

pub(crate) async fn exists(conn: &mut SqliteConnection, supplier_id: &str) -> DbResult<bool> {
    let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM suppliers WHERE id = ?1")
        .bind(supplier_id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(found.is_some())
}
