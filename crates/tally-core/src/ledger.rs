//! Vote-ledger arithmetic.
//!
//! The ledger is an upsert-or-delete keyed store: one row per
//! `(voter, target)`, absent when the voter has no opinion. A cast resolves
//! the requested value against the existing row and yields both the row
//! write to perform and the counter delta to hand to the aggregator.

use crate::vote::{VoteDelta, VoteValue};

/// The row-level write a transition requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerWrite {
  /// Leave the ledger untouched.
  Keep,
  /// Insert or overwrite the row with this non-neutral value.
  Upsert(VoteValue),
  /// Remove the row.
  Delete,
}

/// The outcome of resolving a cast against the existing row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
  pub write: LedgerWrite,
  pub delta: VoteDelta,
}

impl Transition {
  pub const NOOP: Self = Self { write: LedgerWrite::Keep, delta: VoteDelta::ZERO };

  pub fn is_noop(&self) -> bool { self.write == LedgerWrite::Keep }
}

/// Resolve a cast of `requested` against the `existing` row value.
///
/// Re-casting the stored value, or retracting when nothing is stored, is a
/// no-op with a zero delta.
pub fn transition(existing: Option<VoteValue>, requested: VoteValue) -> Transition {
  let old = existing.unwrap_or(VoteValue::Neutral);
  if old == requested {
    return Transition::NOOP;
  }

  let (old_up, old_down) = old.one_hot();
  let (new_up, new_down) = requested.one_hot();
  let delta = VoteDelta {
    upvote_delta:   new_up - old_up,
    downvote_delta: new_down - old_down,
  };

  let write = match requested {
    VoteValue::Neutral => LedgerWrite::Delete,
    value => LedgerWrite::Upsert(value),
  };

  Transition { write, delta }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn delta(up: i32, down: i32) -> VoteDelta {
    VoteDelta { upvote_delta: up, downvote_delta: down }
  }

  #[test]
  fn retracting_nothing_is_a_noop() {
    assert_eq!(transition(None, VoteValue::Neutral), Transition::NOOP);
  }

  #[test]
  fn repeating_a_vote_is_a_noop() {
    assert!(transition(Some(VoteValue::Up), VoteValue::Up).is_noop());
    assert!(transition(Some(VoteValue::Down), VoteValue::Down).is_noop());
  }

  #[test]
  fn first_votes_upsert() {
    let t = transition(None, VoteValue::Up);
    assert_eq!(t.write, LedgerWrite::Upsert(VoteValue::Up));
    assert_eq!(t.delta, delta(1, 0));

    let t = transition(None, VoteValue::Down);
    assert_eq!(t.write, LedgerWrite::Upsert(VoteValue::Down));
    assert_eq!(t.delta, delta(0, 1));
  }

  #[test]
  fn flipping_moves_one_count_across() {
    let t = transition(Some(VoteValue::Up), VoteValue::Down);
    assert_eq!(t.write, LedgerWrite::Upsert(VoteValue::Down));
    assert_eq!(t.delta, delta(-1, 1));

    let t = transition(Some(VoteValue::Down), VoteValue::Up);
    assert_eq!(t.delta, delta(1, -1));
  }

  #[test]
  fn retracting_deletes_the_row() {
    let t = transition(Some(VoteValue::Up), VoteValue::Neutral);
    assert_eq!(t.write, LedgerWrite::Delete);
    assert_eq!(t.delta, delta(-1, 0));

    let t = transition(Some(VoteValue::Down), VoteValue::Neutral);
    assert_eq!(t.write, LedgerWrite::Delete);
    assert_eq!(t.delta, delta(0, -1));
  }
}
