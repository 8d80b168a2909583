//! SQLite backend for the Tally ranking engine.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Every write runs inside an
//! `IMMEDIATE` transaction, which takes SQLite's write lock up front; a vote
//! that cannot get the lock within [`StoreOptions::lock_timeout`] fails with
//! a retryable conflict.

mod encode;
mod schema;
mod store;
mod tx;

pub mod error;

pub use error::{Error, Result};
pub use store::{SqliteStore, StoreOptions};
