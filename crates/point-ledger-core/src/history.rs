//! Transaction history types for the point ledger.
//!
//! Every committed balance mutation produces exactly one record. Records are
//! append-only and never mutated or deleted once written.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::UserId;

/// An immutable log entry describing one committed mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// The user whose balance changed.
    pub user_id: UserId,

    /// Magnitude of the change, always positive. The sign is carried by
    /// `kind`.
    pub amount: i64,

    /// Whether this was a charge or a use.
    pub kind: TransactionKind,

    /// When the mutation was committed.
    pub timestamp: DateTime<Utc>,
}

impl TransactionRecord {
    /// Create a charge record stamped with the current time.
    #[must_use]
    pub fn charge(user_id: UserId, amount: i64) -> Self {
        Self {
            user_id,
            amount,
            kind: TransactionKind::Charge,
            timestamp: Utc::now(),
        }
    }

    /// Create a use record stamped with the current time.
    #[must_use]
    pub fn usage(user_id: UserId, amount: i64) -> Self {
        Self {
            user_id,
            amount,
            kind: TransactionKind::Use,
            timestamp: Utc::now(),
        }
    }

    /// The signed delta this record applied to the balance.
    #[must_use]
    pub const fn signed_delta(&self) -> i64 {
        self.kind.signed(self.amount)
    }
}

/// Kind of balance mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Credit: points added to the balance.
    Charge,

    /// Debit: points deducted from the balance.
    Use,
}

impl TransactionKind {
    /// Check if this kind adds points.
    #[must_use]
    pub const fn is_credit(&self) -> bool {
        matches!(self, Self::Charge)
    }

    /// Check if this kind removes points.
    #[must_use]
    pub const fn is_debit(&self) -> bool {
        matches!(self, Self::Use)
    }

    /// Apply this kind's sign to a positive magnitude.
    #[must_use]
    pub const fn signed(&self, amount: i64) -> i64 {
        match self {
            Self::Charge => amount,
            Self::Use => -amount,
        }
    }
}
