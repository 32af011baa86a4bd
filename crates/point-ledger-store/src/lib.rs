//! Storage layer for the point ledger.
//!
//! This crate defines the two collaborator contracts the ledger engine
//! consumes — a keyed balance store and an append-only history log — and ships
//! two implementations:
//!
//! - [`MemoryStore`]: in-memory maps, the reference collaborator used by tests.
//! - [`RocksStore`]: `RocksDB` with column families and CBOR-encoded values.
//!
//! # Example
//!
//! ```
//! use point_ledger_store::{BalanceStore, MemoryStore};
//! use point_ledger_core::UserId;
//!
//! let store = MemoryStore::new();
//! let user_id = UserId::new(7).unwrap();
//!
//! // Absence of a record reads as a zero balance.
//! let balance = store.get(user_id).unwrap();
//! assert_eq!(balance.amount, 0);
//!
//! let written = store.set(user_id, 500).unwrap();
//! assert_eq!(written.amount, 500);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod keys;
pub mod memory;
pub mod rocks;
pub mod schema;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use rocks::RocksStore;

use chrono::{DateTime, Utc};
use point_ledger_core::{TransactionKind, TransactionRecord, UserBalance, UserId};

/// Keyed store of current balances.
///
/// Implementations must treat a missing record as a zero balance: `get` never
/// reports absence, and `set` on a previously unseen id creates the record.
pub trait BalanceStore: Send + Sync {
    /// Get the current balance for a user.
    ///
    /// Returns `UserBalance::empty(user_id)` if the user has no record yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage fails.
    fn get(&self, user_id: UserId) -> Result<UserBalance>;

    /// Write a balance and return the persisted record.
    ///
    /// The returned record carries the amount actually stored; callers that
    /// need write verification compare it against the amount they requested.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage fails.
    fn set(&self, user_id: UserId, amount: i64) -> Result<UserBalance>;
}

/// Append-only, insertion-ordered transaction log, keyed by user.
pub trait HistoryLog: Send + Sync {
    /// Append a record and return the stored form.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage fails.
    fn append(
        &self,
        user_id: UserId,
        amount: i64,
        kind: TransactionKind,
        timestamp: DateTime<Utc>,
    ) -> Result<TransactionRecord>;

    /// List all records for a user in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage fails.
    fn list(&self, user_id: UserId) -> Result<Vec<TransactionRecord>>;
}
