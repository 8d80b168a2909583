//! Core types and algorithms for the Tally ranking engine.
//!
//! Scoring, vote-ledger arithmetic, and reply threading live here as pure
//! functions. Persistence is abstracted behind [`store::VoteStore`]; this
//! crate has no database or runtime dependencies.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod aggregate;
pub mod eligibility;
pub mod error;
pub mod ledger;
pub mod reply;
pub mod score;
pub mod store;
pub mod submission;
pub mod thread;
pub mod user;
pub mod vote;

pub use error::{Error, Result};
