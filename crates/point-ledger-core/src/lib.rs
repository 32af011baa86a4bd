//! Core types for the point ledger.
//!
//! This crate provides the foundational types used throughout the ledger:
//!
//! - **Identifiers**: [`UserId`]
//! - **Balances**: [`UserBalance`], [`MAX_BALANCE`]
//! - **History**: [`TransactionRecord`], [`TransactionKind`]
//! - **Errors**: [`LedgerError`]
//!
//! # Point Unit
//!
//! Points are plain `i64` amounts. A user's balance always stays within
//! `[0, MAX_BALANCE]`; every committed mutation is mirrored by exactly one
//! immutable [`TransactionRecord`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod balance;
pub mod error;
pub mod history;
pub mod ids;

pub use balance::{UserBalance, MAX_BALANCE};
pub use error::{LedgerError, Result};
pub use history::{TransactionKind, TransactionRecord};
pub use ids::{IdError, UserId};
