//! # Cash Register Service
//!
//! Opens and closes register sessions and previews the reconciliation.
//! The state rules live in `mostrador_core::register`; this service runs
//! them inside a unit of work.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::error::{DbError, PosError, PosResult};
use crate::store::Store;
use mostrador_core::register::Reconciliation;
use mostrador_core::validation::validate_amount_cents;
use mostrador_core::{CashRegister, CoreError, Money};

#[derive(Clone)]
pub struct CashRegisterService {
    store: Arc<dyn Store>,
}

impl CashRegisterService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        CashRegisterService { store }
    }

    /// CLOSED → OPEN with current = expected = `initial`.
    pub async fn open(&self, initial: Money) -> PosResult<CashRegister> {
        let register = CashRegister::open(initial, Utc::now())?;

        let mut uow = self.store.begin().await?;
        let open = uow.open_register().await?;
        CashRegister::ensure_can_open(open.as_ref())?;

        uow.insert_register(&register).await.map_err(|e| match e {
            // Lost a race against another open
            DbError::UniqueViolation { .. } => PosError::Core(CoreError::RegisterAlreadyOpen {
                opened_at: "unknown".to_string(),
            }),
            other => other.into(),
        })?;
        uow.commit().await?;

        info!(
            register_id = %register.id,
            initial_amount_cents = register.initial_amount_cents,
            "Cash register opened"
        );
        Ok(register)
    }

    /// OPEN → CLOSED, recording counted cash and variance.
    pub async fn close(&self, counted: Money) -> PosResult<CashRegister> {
        let mut uow = self.store.begin().await?;
        let mut register = uow.open_register().await?.ok_or(CoreError::RegisterClosed)?;

        let closing = register.close(counted, Utc::now())?;
        uow.close_register(&closing).await?;
        uow.commit().await?;

        register.apply_closing(&closing);
        info!(
            register_id = %register.id,
            expected_amount_cents = register.expected_amount_cents,
            counted_amount_cents = closing.counted_amount_cents,
            variance_cents = closing.variance_cents,
            "Cash register closed"
        );
        Ok(register)
    }

    /// `is_open = true` opens with `amount`; `false` closes with `amount`
    /// as the counted cash.
    pub async fn open_or_close(&self, amount: Money, is_open: bool) -> PosResult<CashRegister> {
        if is_open {
            self.open(amount).await
        } else {
            self.close(amount).await
        }
    }

    /// Latest session, open or closed.
    pub async fn current(&self) -> PosResult<Option<CashRegister>> {
        Ok(self.store.current_register().await?)
    }

    /// Variance against the open session, without closing it.
    pub async fn reconcile(&self, counted: Money) -> PosResult<Reconciliation> {
        validate_amount_cents("countedAmount", counted.cents())?;

        match self.store.current_register().await? {
            Some(register) if register.is_open => Ok(register.reconcile(counted)),
            _ => Err(CoreError::RegisterClosed.into()),
        }
    }
}
