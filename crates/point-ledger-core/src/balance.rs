//! Balance types for the point ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::UserId;

/// Inclusive upper bound on any user's balance.
pub const MAX_BALANCE: i64 = 100_000_000;

/// A user's current point balance.
///
/// The amount is always within `[0, MAX_BALANCE]`. A user with no stored
/// record is indistinguishable from one holding a zero balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserBalance {
    /// The owning user.
    pub user_id: UserId,

    /// Current point amount.
    pub amount: i64,

    /// When the balance was last written.
    pub updated_at: DateTime<Utc>,
}

impl UserBalance {
    /// A zero balance for a user with no stored record.
    #[must_use]
    pub fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            amount: 0,
            updated_at: Utc::now(),
        }
    }

    /// Check whether the balance can cover a deduction.
    #[must_use]
    pub const fn can_cover(&self, amount: i64) -> bool {
        self.amount >= amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_balance_is_zero() {
        let user_id = UserId::new(1).unwrap();
        let balance = UserBalance::empty(user_id);
        assert_eq!(balance.amount, 0);
        assert_eq!(balance.user_id, user_id);
    }

    #[test]
    fn can_cover_boundaries() {
        let mut balance = UserBalance::empty(UserId::new(1).unwrap());
        balance.amount = 1000;

        assert!(balance.can_cover(500));
        assert!(balance.can_cover(1000));
        assert!(!balance.can_cover(1001));
    }
}
