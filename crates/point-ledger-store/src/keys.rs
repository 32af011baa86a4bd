//! Key encoding utilities for `RocksDB`.
//!
//! All keys use big-endian integer encoding so lexicographic key order matches
//! numeric order.

use point_ledger_core::UserId;

/// Create a balance key from a user id.
#[must_use]
pub fn balance_key(user_id: UserId) -> [u8; 8] {
    user_id.to_be_bytes()
}

/// Create a history record key.
///
/// Format: `user_id (8 bytes) || sequence (8 bytes)`.
///
/// Sequence numbers start at zero and increase by one per append, so records
/// under a user prefix iterate in insertion order.
#[must_use]
pub fn history_key(user_id: UserId, sequence: u64) -> [u8; 16] {
    let mut key = [0u8; 16];
    key[..8].copy_from_slice(&user_id.to_be_bytes());
    key[8..].copy_from_slice(&sequence.to_be_bytes());
    key
}

/// Create a prefix for iterating one user's history records.
#[must_use]
pub fn history_prefix(user_id: UserId) -> [u8; 8] {
    user_id.to_be_bytes()
}

/// Decode a sequence counter value.
///
/// Returns zero for a missing or malformed value, which is the correct
/// starting sequence for a user with no history.
#[must_use]
pub fn decode_sequence(value: Option<&[u8]>) -> u64 {
    value
        .and_then(|bytes| bytes.try_into().ok())
        .map_or(0, u64::from_be_bytes)
}
