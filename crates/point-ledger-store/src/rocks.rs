//! `RocksDB` storage implementation.
//!
//! Balances and history records are CBOR-encoded. History ordering is carried
//! by a per-user sequence counter bumped in the same write batch as the record
//! append, so insertion order survives process restarts.

use std::path::Path;
use std::sync::Arc;

use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, IteratorMode, MultiThreaded,
    Options, WriteBatch,
};

use chrono::{DateTime, Utc};
use point_ledger_core::{TransactionKind, TransactionRecord, UserBalance, UserId};

use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema::{all_column_families, cf};
use crate::{BalanceStore, HistoryLog};

/// RocksDB-backed balance and history storage.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let path = path.as_ref();
        let db = DBWithThreadMode::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        tracing::debug!(path = %path.display(), "opened ledger database");

        Ok(Self { db: Arc::new(db) })
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }

    /// Serialize a value using CBOR.
    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Read the next history sequence number for a user.
    fn next_sequence(&self, user_id: UserId) -> Result<u64> {
        let cf = self.cf(cf::HISTORY_SEQ)?;
        let value = self
            .db
            .get_cf(&cf, keys::balance_key(user_id))
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(keys::decode_sequence(value.as_deref()))
    }
}

impl BalanceStore for RocksStore {
    fn get(&self, user_id: UserId) -> Result<UserBalance> {
        let cf = self.cf(cf::BALANCES)?;

        let stored = self
            .db
            .get_cf(&cf, keys::balance_key(user_id))
            .map_err(|e| StoreError::Database(e.to_string()))?;

        match stored {
            Some(data) => Self::deserialize(&data),
            None => Ok(UserBalance::empty(user_id)),
        }
    }

    fn set(&self, user_id: UserId, amount: i64) -> Result<UserBalance> {
        let cf = self.cf(cf::BALANCES)?;

        let record = UserBalance {
            user_id,
            amount,
            updated_at: Utc::now(),
        };

        let value = Self::serialize(&record)?;
        self.db
            .put_cf(&cf, keys::balance_key(user_id), value)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(record)
    }
}

impl HistoryLog for RocksStore {
    fn append(
        &self,
        user_id: UserId,
        amount: i64,
        kind: TransactionKind,
        timestamp: DateTime<Utc>,
    ) -> Result<TransactionRecord> {
        let cf_history = self.cf(cf::HISTORY)?;
        let cf_seq = self.cf(cf::HISTORY_SEQ)?;

        let record = TransactionRecord {
            user_id,
            amount,
            kind,
            timestamp,
        };

        let sequence = self.next_sequence(user_id)?;
        let value = Self::serialize(&record)?;

        // Record and counter bump land atomically.
        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_history, keys::history_key(user_id, sequence), &value);
        batch.put_cf(
            &cf_seq,
            keys::balance_key(user_id),
            (sequence + 1).to_be_bytes(),
        );

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(record)
    }

    fn list(&self, user_id: UserId) -> Result<Vec<TransactionRecord>> {
        let cf = self.cf(cf::HISTORY)?;
        let prefix = keys::history_prefix(user_id);

        let iter = self.db.iterator_cf(
            &cf,
            IteratorMode::From(&prefix, rocksdb::Direction::Forward),
        );

        let mut records = Vec::new();
        for item in iter {
            let (key, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;

            if !key.starts_with(&prefix) {
                break;
            }

            records.push(Self::deserialize(&value)?);
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (RocksStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = RocksStore::open(dir.path()).unwrap();
        (store, dir)
    }

    fn user(raw: i64) -> UserId {
        UserId::new(raw).unwrap()
    }

    #[test]
    fn missing_record_reads_as_zero() {
        let (store, _dir) = create_test_store();
        let balance = store.get(user(1)).unwrap();
        assert_eq!(balance.amount, 0);
    }

    #[test]
    fn set_then_get_roundtrip() {
        let (store, _dir) = create_test_store();

        let written = store.set(user(1), 5000).unwrap();
        assert_eq!(written.amount, 5000);

        let read = store.get(user(1)).unwrap();
        assert_eq!(read.amount, 5000);
        assert_eq!(read.user_id, user(1));
    }

    #[test]
    fn append_and_list_in_insertion_order() {
        let (store, _dir) = create_test_store();
        let id = user(1);

        store
            .append(id, 5000, TransactionKind::Charge, Utc::now())
            .unwrap();
        store
            .append(id, 300, TransactionKind::Use, Utc::now())
            .unwrap();
        store
            .append(id, 40, TransactionKind::Charge, Utc::now())
            .unwrap();

        let records = store.list(id).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].amount, 5000);
        assert_eq!(records[1].amount, 300);
        assert_eq!(records[1].kind, TransactionKind::Use);
        assert_eq!(records[2].amount, 40);
    }

    #[test]
    fn histories_are_per_user() {
        let (store, _dir) = create_test_store();

        store
            .append(user(1), 100, TransactionKind::Charge, Utc::now())
            .unwrap();
        store
            .append(user(2), 200, TransactionKind::Charge, Utc::now())
            .unwrap();

        let first = store.list(user(1)).unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].amount, 100);

        let second = store.list(user(2)).unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].amount, 200);
    }

    #[test]
    fn ordering_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let id = user(5);

        {
            let store = RocksStore::open(dir.path()).unwrap();
            store.set(id, 700).unwrap();
            store
                .append(id, 700, TransactionKind::Charge, Utc::now())
                .unwrap();
            store
                .append(id, 200, TransactionKind::Use, Utc::now())
                .unwrap();
        }

        let store = RocksStore::open(dir.path()).unwrap();
        assert_eq!(store.get(id).unwrap().amount, 700);

        store
            .append(id, 100, TransactionKind::Use, Utc::now())
            .unwrap();

        let records = store.list(id).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].kind, TransactionKind::Charge);
        assert_eq!(records[2].amount, 100);
    }
}
