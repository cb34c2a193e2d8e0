//! # Category Repository
//!
//! Plain keyed storage. Deleting a category does not touch products that
//! still carry its name.

use sqlx::sqlite::SqliteExecutor;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use mostrador_core::Category;

#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    pub async fn list(&self) -> DbResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories ORDER BY name, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    pub async fn upsert(&self, category: &Category) -> DbResult<Category> {
        debug!(id = %category.id, name = %category.name, "Upserting category");
        upsert(&self.pool, category).await
    }

    pub async fn delete(&self, id: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

pub(crate) async fn upsert<'e, E>(executor: E, category: &Category) -> DbResult<Category>
where
    E: SqliteExecutor<'e>,
{
    let stored = sqlx::query_as::<_, Category>(
        r#"
        INSERT INTO categories (id, name, description)
        VALUES (?1, ?2, ?3)
        ON CONFLICT(id) DO UPDATE SET
            name        = excluded.name,
            description = excluded.description
        RETURNING id, name, description
        "#,
    )
    .bind(&category.id)
    .bind(&category.name)
    .bind(&category.description)
    .fetch_one(executor)
    .await?;

    Ok(stored)
}
