//! # Cash Register Repository
//!
//! One row per session. The partial unique index
//! `idx_cash_registers_one_open` guarantees at most one row with
//! `is_open = 1`.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use mostrador_core::register::RegisterClosing;
use mostrador_core::{CashRegister, ValidationError};

const SELECT_REGISTER: &str = r#"
    SELECT id, is_open, opened_at, initial_amount_cents, current_amount_cents,
           expected_amount_cents, closed_at, counted_amount_cents, variance_cents
    FROM cash_registers
"#;

const RETURNING_REGISTER: &str = r#"
    RETURNING id, is_open, opened_at, initial_amount_cents, current_amount_cents,
              expected_amount_cents, closed_at, counted_amount_cents, variance_cents
"#;

#[derive(Debug, Clone)]
pub struct RegisterRepository {
    pool: SqlitePool,
}

impl RegisterRepository {
    pub fn new(pool: SqlitePool) -> Self {
        RegisterRepository { pool }
    }

    /// Most recent session, open or closed.
    pub async fn latest(&self) -> DbResult<Option<CashRegister>> {
        let register = sqlx::query_as::<_, CashRegister>(&format!(
            "{SELECT_REGISTER} ORDER BY opened_at DESC, rowid DESC LIMIT 1"
        ))
        .fetch_optional(&self.pool)
        .await?;

        Ok(register)
    }

    /// Every session, newest first.
    pub async fn history(&self) -> DbResult<Vec<CashRegister>> {
        let registers = sqlx::query_as::<_, CashRegister>(&format!(
            "{SELECT_REGISTER} ORDER BY opened_at DESC, rowid DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(registers)
    }
}

pub(crate) async fn find_open(conn: &mut SqliteConnection) -> DbResult<Option<CashRegister>> {
    let sql = format!("{SELECT_REGISTER} WHERE is_open = 1");
    let register = sqlx::query_as::<_, CashRegister>(&sql)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(register)
}

pub(crate) async fn insert(conn: &mut SqliteConnection, register: &CashRegister) -> DbResult<()> {
    debug!(
        id = %register.id,
        initial_amount_cents = register.initial_amount_cents,
        "Opening register"
    );

    sqlx::query(
        r#"
        INSERT INTO cash_registers (
            id, is_open, opened_at, initial_amount_cents,
            current_amount_cents, expected_amount_cents
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(&register.id)
    .bind(register.is_open)
    .bind(register.opened_at)
    .bind(register.initial_amount_cents)
    .bind(register.current_amount_cents)
    .bind(register.expected_amount_cents)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Adds a cash sale to the open session. `None` when no session is open.
pub(crate) async fn credit_open(
    conn: &mut SqliteConnection,
    amount_cents: i64,
) -> DbResult<Option<CashRegister>> {
    let register = sqlx::query_as::<_, CashRegister>(&format!(
        r#"
        UPDATE cash_registers SET
            current_amount_cents  = current_amount_cents + ?1,
            expected_amount_cents = expected_amount_cents + ?1
        WHERE is_open = 1
          AND current_amount_cents  <= ?2 - ?1
          AND expected_amount_cents <= ?2 - ?1
        {RETURNING_REGISTER}
        "#
    ))
    .bind(amount_cents)
    .bind(i64::MAX)
    .fetch_optional(&mut *conn)
    .await?;

    if register.is_some() {
        return Ok(register);
    }

    // Nothing updated: no open session, or the guard refused the sum
    match find_open(&mut *conn).await? {
        Some(_) => Err(ValidationError::overflow("cashRegister", i64::MAX).into()),
        None => Ok(None),
    }
}

pub(crate) async fn close(conn: &mut SqliteConnection, closing: &RegisterClosing) -> DbResult<()> {
    let result = sqlx::query(
        r#"
        UPDATE cash_registers SET
            is_open              = 0,
            closed_at            = ?2,
            counted_amount_cents = ?3,
            variance_cents       = ?4
        WHERE id = ?1 AND is_open = 1
        "#,
    )
    .bind(&closing.register_id)
    .bind(closing.closed_at)
    .bind(closing.counted_amount_cents)
    .bind(closing.variance_cents)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Open cash register", &closing.register_id));
    }

    debug!(
        id = %closing.register_id,
        variance_cents = closing.variance_cents,
        "Register closed"
    );
    Ok(())
}
