//! Error types for the point ledger.

use crate::ids::IdError;

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors that can occur in ledger operations.
///
/// The first four variants are expected business outcomes and leave balance
/// and history untouched. `StoreInconsistency` signals a violated store
/// contract and must not be retried blindly: the true stored state is unknown
/// and a retry risks double-application.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// The user id was negative.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(#[from] IdError),

    /// The requested amount was zero or negative.
    #[error("invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount.
        amount: i64,
    },

    /// The charge would push the balance past `MAX_BALANCE`.
    #[error("charge limit exceeded: balance={balance}, requested={requested}")]
    LimitExceeded {
        /// Balance at the time of the attempt.
        balance: i64,
        /// The requested charge amount.
        requested: i64,
    },

    /// The use would push the balance below zero.
    #[error("insufficient balance: balance={balance}, requested={requested}")]
    InsufficientBalance {
        /// Balance at the time of the attempt.
        balance: i64,
        /// The requested use amount.
        requested: i64,
    },

    /// The store persisted a value different from the one requested.
    #[error("store inconsistency: expected={expected}, stored={stored}")]
    StoreInconsistency {
        /// The balance the service asked the store to persist.
        expected: i64,
        /// The balance the store reported back.
        stored: i64,
    },

    /// The storage collaborator failed.
    #[error("storage error: {0}")]
    Storage(String),
}
