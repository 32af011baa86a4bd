//! In-memory storage implementation.
//!
//! `MemoryStore` is the reference collaborator: it backs the test suites and
//! any deployment that does not need persistence. Both traits are implemented
//! on the same struct so a single instance can serve as the whole backend.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use point_ledger_core::{TransactionKind, TransactionRecord, UserBalance, UserId};

use crate::error::{Result, StoreError};
use crate::{BalanceStore, HistoryLog};

/// In-memory balance and history storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    balances: RwLock<HashMap<UserId, UserBalance>>,
    history: RwLock<HashMap<UserId, Vec<TransactionRecord>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl BalanceStore for MemoryStore {
    fn get(&self, user_id: UserId) -> Result<UserBalance> {
        let balances = self
            .balances
            .read()
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(balances
            .get(&user_id)
            .cloned()
            .unwrap_or_else(|| UserBalance::empty(user_id)))
    }

    fn set(&self, user_id: UserId, amount: i64) -> Result<UserBalance> {
        let record = UserBalance {
            user_id,
            amount,
            updated_at: Utc::now(),
        };

        let mut balances = self
            .balances
            .write()
            .map_err(|e| StoreError::Database(e.to_string()))?;
        balances.insert(user_id, record.clone());

        Ok(record)
    }
}

impl HistoryLog for MemoryStore {
    fn append(
        &self,
        user_id: UserId,
        amount: i64,
        kind: TransactionKind,
        timestamp: DateTime<Utc>,
    ) -> Result<TransactionRecord> {
        let record = TransactionRecord {
            user_id,
            amount,
            kind,
            timestamp,
        };

        let mut history = self
            .history
            .write()
            .map_err(|e| StoreError::Database(e.to_string()))?;
        history.entry(user_id).or_default().push(record.clone());

        Ok(record)
    }

    fn list(&self, user_id: UserId) -> Result<Vec<TransactionRecord>> {
        let history = self
            .history
            .read()
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(history.get(&user_id).cloned().unwrap_or_default())
    }
}
