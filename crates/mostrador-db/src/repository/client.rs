//! # Client Repository
//!
//! Contact details are plain keyed storage. `total_spent_cents` and
//! `visits` are written once on insert and afterwards only moved by
//! [`record_visit`] inside an order's transaction.

use sqlx::sqlite::SqliteExecutor;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use mostrador_core::{Client, ValidationError};

const SELECT_CLIENT: &str = "SELECT id, name, phone, email, total_spent_cents, visits FROM clients";

#[derive(Debug, Clone)]
pub struct ClientRepository {
    pool: SqlitePool,
}

impl ClientRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ClientRepository { pool }
    }

    pub async fn list(&self) -> DbResult<Vec<Client>> {
        let clients = sqlx::query_as::<_, Client>(&format!("{SELECT_CLIENT} ORDER BY name, id"))
            .fetch_all(&self.pool)
            .await?;

        Ok(clients)
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Client>> {
        let client = sqlx::query_as::<_, Client>(&format!("{SELECT_CLIENT} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(client)
    }

    /// Inserts with the given statistics; on an existing id only the
    /// contact fields are overwritten.
    pub async fn upsert(&self, client: &Client) -> DbResult<Client> {
        debug!(id = %client.id, "Upserting client");
        upsert(&self.pool, client).await
    }

    pub async fn delete(&self, id: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM clients WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

pub(crate) async fn upsert<'e, E>(executor: E, client: &Client) -> DbResult<Client>
where
    E: SqliteExecutor<'e>,
{
    let stored = sqlx::query_as::<_, Client>(
        r#"
        INSERT INTO clients (id, name, phone, email, total_spent_cents, visits)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        ON CONFLICT(id) DO UPDATE SET
            name  = excluded.name,
            phone = excluded.phone,
            email = excluded.email
        RETURNING id, name, phone, email, total_spent_cents, visits
        "#,
    )
    .bind(&client.id)
    .bind(&client.name)
    .bind(&client.phone)
    .bind(&client.email)
    .bind(client.total_spent_cents)
    .bind(client.visits)
    .fetch_one(executor)
    .await?;

    Ok(stored)
}

/// Adds one attributed order to the client's statistics.
///
/// The guard keeps both counters inside i64; SQLite would otherwise turn an
/// overflowing sum into a REAL.
pub(crate) async fn record_visit(
    conn: &mut SqliteConnection,
    client_id: &str,
    amount_cents: i64,
) -> DbResult<Client> {
    let client = sqlx::query_as::<_, Client>(
        r#"
        UPDATE clients SET
            total_spent_cents = total_spent_cents + ?2,
            visits            = visits + 1
        WHERE id = ?1
          AND total_spent_cents <= ?3 - ?2
          AND visits < ?3
        RETURNING id, name, phone, email, total_spent_cents, visits
        "#,
    )
    .bind(client_id)
    .bind(amount_cents)
    .bind(i64::MAX)
    .fetch_optional(&mut *conn)
    .await?;

    if let Some(client) = client {
        return Ok(client);
    }

    let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM clients WHERE id = ?1")
        .bind(client_id)
        .fetch_optional(&mut *conn)
        .await?;
    match found {
        Some(_) => Err(ValidationError::overflow("totalSpent", i64::MAX).into()),
        None => Err(DbError::not_found("Client", client_id)),
    }
}
