//! Balance-mutation engine for the point ledger.
//!
//! [`LedgerService`] exposes the four ledger operations — charge, use,
//! balance, history — over any [`point_ledger_store::BalanceStore`] and
//! [`point_ledger_store::HistoryLog`] pair. Same-user mutations are strictly
//! serialized through a per-user lock table; different users never block each
//! other.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use point_ledger_service::LedgerService;
//! use point_ledger_store::MemoryStore;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let store = Arc::new(MemoryStore::new());
//! let ledger = LedgerService::new(Arc::clone(&store), store);
//!
//! let balance = ledger.charge(1, 500).await.unwrap();
//! assert_eq!(balance.amount, 500);
//!
//! let balance = ledger.use_points(1, 200).await.unwrap();
//! assert_eq!(balance.amount, 300);
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod locks;
pub mod service;

pub use locks::UserLocks;
pub use service::LedgerService;
