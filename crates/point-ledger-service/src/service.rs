//! The balance-mutation engine.

use std::sync::Arc;

use chrono::Utc;

use point_ledger_core::{
    LedgerError, Result, TransactionKind, TransactionRecord, UserBalance, UserId, MAX_BALANCE,
};
use point_ledger_store::{BalanceStore, HistoryLog};

use crate::locks::UserLocks;

/// The ledger engine.
///
/// Enforces amount and identifier validation, keeps balances within
/// `[0, MAX_BALANCE]`, serializes same-user mutations through a per-user lock
/// table, and performs the write-then-verify-then-log sequence so a history
/// entry exists exactly when a mutation durably applied.
///
/// Both collaborators and the lock table are explicit construction
/// dependencies; independent instances share nothing.
pub struct LedgerService<B, H> {
    balances: Arc<B>,
    history: Arc<H>,
    locks: UserLocks,
}

impl<B, H> LedgerService<B, H>
where
    B: BalanceStore,
    H: HistoryLog,
{
    /// Create a ledger service over the given collaborators.
    #[must_use]
    pub fn new(balances: Arc<B>, history: Arc<H>) -> Self {
        Self {
            balances,
            history,
            locks: UserLocks::new(),
        }
    }

    /// Get the current balance for a user.
    ///
    /// A point read: it does not take the per-user lock, so the returned
    /// value is a snapshot that a concurrently in-flight mutation may have
    /// already superseded.
    ///
    /// # Errors
    ///
    /// `InvalidIdentifier` if the id is negative; `Storage` on collaborator
    /// failure.
    pub async fn balance(&self, user_id: i64) -> Result<UserBalance> {
        let user_id = UserId::new(user_id)?;
        Ok(self.balances.get(user_id)?)
    }

    /// Get the full transaction history for a user, oldest first.
    ///
    /// # Errors
    ///
    /// `InvalidIdentifier` if the id is negative; `Storage` on collaborator
    /// failure.
    pub async fn history(&self, user_id: i64) -> Result<Vec<TransactionRecord>> {
        let user_id = UserId::new(user_id)?;
        Ok(self.history.list(user_id)?)
    }

    /// Credit points to a user's balance.
    ///
    /// # Errors
    ///
    /// - `InvalidIdentifier` if the id is negative.
    /// - `InvalidAmount` if the amount is zero or negative.
    /// - `LimitExceeded` if the result would pass `MAX_BALANCE`.
    /// - `StoreInconsistency` if the store persisted a diverging value.
    /// - `Storage` on collaborator failure.
    pub async fn charge(&self, user_id: i64, amount: i64) -> Result<UserBalance> {
        self.mutate(user_id, amount, TransactionKind::Charge).await
    }

    /// Deduct points from a user's balance.
    ///
    /// # Errors
    ///
    /// - `InvalidIdentifier` if the id is negative.
    /// - `InvalidAmount` if the amount is zero or negative.
    /// - `InsufficientBalance` if the result would go below zero.
    /// - `StoreInconsistency` if the store persisted a diverging value.
    /// - `Storage` on collaborator failure.
    pub async fn use_points(&self, user_id: i64, amount: i64) -> Result<UserBalance> {
        self.mutate(user_id, amount, TransactionKind::Use).await
    }

    /// Shared mutation path: validate, serialize, read-compute-check,
    /// write-verify-log.
    async fn mutate(
        &self,
        user_id: i64,
        amount: i64,
        kind: TransactionKind,
    ) -> Result<UserBalance> {
        let user_id = UserId::new(user_id)?;
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount { amount });
        }

        let lock = self.locks.lock_for(user_id).await;
        let _guard = lock.lock().await;

        let current = self.balances.get(user_id)?;

        // Overflow is only reachable on the credit side (balance >= 0, amount
        // > 0) and is just a charge far past the limit.
        let Some(next) = current.amount.checked_add(kind.signed(amount)) else {
            return Err(LedgerError::LimitExceeded {
                balance: current.amount,
                requested: amount,
            });
        };

        match kind {
            TransactionKind::Charge if next > MAX_BALANCE => {
                return Err(LedgerError::LimitExceeded {
                    balance: current.amount,
                    requested: amount,
                });
            }
            TransactionKind::Use if next < 0 => {
                return Err(LedgerError::InsufficientBalance {
                    balance: current.amount,
                    requested: amount,
                });
            }
            _ => {}
        }

        let written = self.balances.set(user_id, next)?;

        // The mutation is only logged once the store round-trip confirms the
        // value it persisted. A divergence means the store's contract was
        // violated; the actual stored state is unknown, so no history entry.
        if written.amount != next {
            tracing::error!(
                %user_id,
                expected = next,
                stored = written.amount,
                "balance store persisted a diverging value"
            );
            return Err(LedgerError::StoreInconsistency {
                expected: next,
                stored: written.amount,
            });
        }

        self.history.append(user_id, amount, kind, Utc::now())?;

        tracing::debug!(%user_id, amount, ?kind, balance = written.amount, "mutation committed");

        Ok(written)
    }
}
