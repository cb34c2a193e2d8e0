//! # Ledger Repository
//!
//! Append-only: entries are inserted by the processors and never updated
//! or deleted.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use mostrador_core::ledger::LedgerSummary;
use mostrador_core::LedgerEntry;

#[derive(Debug, Clone)]
pub struct LedgerRepository {
    pool: SqlitePool,
}

impl LedgerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        LedgerRepository { pool }
    }

    /// Entries in booking order.
    pub async fn list(&self) -> DbResult<Vec<LedgerEntry>> {
        let entries = sqlx::query_as::<_, LedgerEntry>(
            r#"
            SELECT id, date, kind, category, amount_cents, description, reference_id
            FROM ledger_entries
            ORDER BY date, rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Entries pointing at an order or purchase.
    pub async fn by_reference(&self, reference_id: &str) -> DbResult<Vec<LedgerEntry>> {
        let entries = sqlx::query_as::<_, LedgerEntry>(
            r#"
            SELECT id, date, kind, category, amount_cents, description, reference_id
            FROM ledger_entries
            WHERE reference_id = ?1
            ORDER BY date, rowid
            "#,
        )
        .bind(reference_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Income, expense and balance computed by SQLite.
    pub async fn summary(&self) -> DbResult<LedgerSummary> {
        let (income_cents, expense_cents, entry_count): (i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COALESCE(SUM(CASE WHEN kind = 'INCOME'  THEN amount_cents END), 0),
                COALESCE(SUM(CASE WHEN kind = 'EXPENSE' THEN amount_cents END), 0),
                COUNT(*)
            FROM ledger_entries
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(LedgerSummary {
            income_cents,
            expense_cents,
            balance_cents: income_cents - expense_cents,
            entry_count: entry_count as usize,
        })
    }
}

pub(crate) async fn append(conn: &mut SqliteConnection, entry: &LedgerEntry) -> DbResult<()> {
    debug!(
        id = %entry.id,
        kind = ?entry.kind,
        amount_cents = entry.amount_cents,
        reference_id = ?entry.reference_id,
        "Appending ledger entry"
    );

    sqlx::query(
        r#"
        INSERT INTO ledger_entries (
            id, date, kind, category, amount_cents, description, reference_id
        )
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
    )
    .bind(&entry.id)
    .bind(entry.date)
    .bind(entry.kind)
    .bind(&entry.category)
    .bind(entry.amount_cents)
    .bind(&entry.description)
    .bind(&entry.reference_id)
    .execute(&mut *conn)
    .await?;

    Ok(())
}
