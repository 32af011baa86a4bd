//! Identifier types for the point ledger.
//!
//! User ids arrive from the outer layer as raw integers; this module provides
//! the strongly-typed, validated form used everywhere else.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A user identifier.
///
/// Wraps a non-negative `i64`. Construction validates the value, so a
/// `UserId` in hand is always valid and store implementations never need to
/// re-check.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct UserId(i64);

impl UserId {
    /// Create a `UserId` from a raw integer.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::Negative`] if the value is below zero.
    pub fn new(raw: i64) -> Result<Self, IdError> {
        if raw < 0 {
            return Err(IdError::Negative { raw });
        }
        Ok(Self(raw))
    }

    /// Return the underlying integer.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }

    /// Return the id as big-endian bytes, for store key encoding.
    #[must_use]
    pub const fn to_be_bytes(&self) -> [u8; 8] {
        self.0.to_be_bytes()
    }
}

impl fmt::Debug for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserId({})", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for UserId {
    type Error = IdError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for i64 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

/// Errors from identifier validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The raw value was negative.
    #[error("user id must not be negative: {raw}")]
    Negative {
        /// The rejected raw value.
        raw: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_zero_and_positive() {
        assert_eq!(UserId::new(0).unwrap().as_i64(), 0);
        assert_eq!(UserId::new(42).unwrap().as_i64(), 42);
    }

    #[test]
    fn rejects_negative() {
        assert_eq!(UserId::new(-1), Err(IdError::Negative { raw: -1 }));
    }

    #[test]
    fn be_bytes_sort_like_ids() {
        let a = UserId::new(1).unwrap();
        let b = UserId::new(256).unwrap();
        assert!(a.to_be_bytes() < b.to_be_bytes());
    }

    #[test]
    fn serde_revalidates() {
        let id: UserId = serde_json::from_str("7").unwrap();
        assert_eq!(id.as_i64(), 7);
        assert!(serde_json::from_str::<UserId>("-7").is_err());
    }
}
