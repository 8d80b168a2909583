//! The pure half of score aggregation: applying a ledger delta to stored
//! counters and deciding the author's reputation change.
//!
//! Storage backends run these inside the same transaction that writes the
//! ledger row, then persist the new counters alongside the recomputed
//! derived score.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result, vote::VoteDelta};

/// The stored vote counters of one target. `score` is always derived.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
pub struct Counters {
  pub upvotes:   u32,
  pub downvotes: u32,
}

impl Counters {
  pub fn new(upvotes: u32, downvotes: u32) -> Self { Self { upvotes, downvotes } }

  pub fn score(&self) -> i64 { i64::from(self.upvotes) - i64::from(self.downvotes) }

  /// Apply `delta`, refusing to drive either counter below zero. A refusal
  /// means the ledger and counters have drifted apart.
  pub fn apply(self, delta: VoteDelta) -> Result<Self> {
    let upvotes = self
      .upvotes
      .checked_add_signed(delta.upvote_delta)
      .ok_or_else(|| underflow("upvotes", self.upvotes, delta.upvote_delta))?;
    let downvotes = self
      .downvotes
      .checked_add_signed(delta.downvote_delta)
      .ok_or_else(|| {
        underflow("downvotes", self.downvotes, delta.downvote_delta)
      })?;
    Ok(Self { upvotes, downvotes })
  }
}

fn underflow(field: &str, current: u32, delta: i32) -> Error {
  Error::InvariantViolation(format!(
    "{field} counter {current} cannot absorb delta {delta}"
  ))
}

/// The reputation change owed to `author_id` for `delta`, or `None` when no
/// adjustment applies (zero delta, or a vote on one's own work).
pub fn karma_adjustment(
  voter_id: Uuid,
  author_id: Uuid,
  delta: VoteDelta,
) -> Option<i64> {
  if delta.is_zero() || voter_id == author_id {
    return None;
  }
  Some(delta.karma())
}
