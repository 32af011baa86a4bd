//! Per-user serialization for balance mutations.
//!
//! Two mutations for the same user must never interleave their
//! read-validate-write-log sequence, otherwise a stale read turns into a lost
//! update. Mutations for different users must not block each other, so the
//! table hands out one mutex per user id rather than a single global lock.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use point_ledger_core::UserId;

/// Lazily-populated table of per-user mutexes.
///
/// This is instance state, not a global: two independent `LedgerService`
/// values (for example in tests) get independent serialization.
#[derive(Debug, Default)]
pub struct UserLocks {
    locks: RwLock<HashMap<UserId, Arc<Mutex<()>>>>,
}

impl UserLocks {
    /// Create an empty lock table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the mutex for a user, creating it on first use.
    pub async fn lock_for(&self, user_id: UserId) -> Arc<Mutex<()>> {
        // Fast path: the lock already exists (most common case).
        {
            let locks = self.locks.read().await;
            if let Some(lock) = locks.get(&user_id) {
                return Arc::clone(lock);
            }
        }

        // Slow path: insert under the write lock. `entry` keeps concurrent
        // first-time callers converging on the same mutex.
        let mut locks = self.locks.write().await;
        Arc::clone(
            locks
                .entry(user_id)
                .or_insert_with(|| Arc::new(Mutex::new(()))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(raw: i64) -> UserId {
        UserId::new(raw).unwrap()
    }

    #[tokio::test]
    async fn same_user_gets_same_mutex() {
        let locks = UserLocks::new();
        let a = locks.lock_for(user(1)).await;
        let b = locks.lock_for(user(1)).await;
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[tokio::test]
    async fn different_users_get_different_mutexes() {
        let locks = UserLocks::new();
        let a = locks.lock_for(user(1)).await;
        let b = locks.lock_for(user(2)).await;
        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[tokio::test]
    async fn concurrent_first_lookups_converge() {
        let locks = Arc::new(UserLocks::new());

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let locks = Arc::clone(&locks);
                tokio::spawn(async move { locks.lock_for(user(9)).await })
            })
            .collect();

        let mut mutexes = Vec::new();
        for handle in handles {
            mutexes.push(handle.await.unwrap());
        }

        for mutex in &mutexes[1..] {
            assert!(Arc::ptr_eq(&mutexes[0], mutex));
        }
    }
}
