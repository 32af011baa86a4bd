//! Database schema definitions and column families.
//!
//! This module defines the column families used in `RocksDB` storage.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// Current balance per user, keyed by `user_id` (8-byte big-endian).
    pub const BALANCES: &str = "balances";

    /// Transaction records, keyed by `user_id || sequence` (both 8-byte
    /// big-endian), so a prefix scan yields one user's history in insertion
    /// order.
    pub const HISTORY: &str = "history";

    /// Next history sequence number per user, keyed by `user_id`.
    pub const HISTORY_SEQ: &str = "history_seq";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![cf::BALANCES, cf::HISTORY, cf::HISTORY_SEQ]
}
