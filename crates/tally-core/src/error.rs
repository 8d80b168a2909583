//! Error types for `tally-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("submission not found: {0}")]
  SubmissionNotFound(Uuid),

  #[error("reply not found: {0}")]
  ReplyNotFound(Uuid),

  #[error("user not found: {0}")]
  UserNotFound(Uuid),

  #[error("tag not found: {0:?}")]
  TagNotFound(String),

  #[error("invalid vote value: {0} (expected -1, 0 or 1)")]
  InvalidVoteValue(i64),

  #[error("tag hotness modifier {0} is outside -10..=10")]
  InvalidHotnessModifier(f64),

  /// Lock or transaction could not be acquired; the whole operation may be
  /// retried with the same inputs.
  #[error("concurrent update conflict; retry the operation")]
  ConcurrencyConflict,

  /// Ledger and aggregate counters disagree. Never retried.
  #[error("invariant violation: {0}")]
  InvariantViolation(String),

  #[error("cannot merge a submission into itself")]
  SelfMerge,

  #[error("submission {0} takes part in another merge")]
  NestedMerge(Uuid),

  #[error("reply parent belongs to a different submission")]
  CrossSubmissionParent,
}

impl Error {
  /// Whether the caller may retry the failed operation unchanged.
  pub fn is_retryable(&self) -> bool { matches!(self, Self::ConcurrencyConflict) }

  pub fn is_not_found(&self) -> bool {
    matches!(
      self,
      Self::SubmissionNotFound(_)
        | Self::ReplyNotFound(_)
        | Self::UserNotFound(_)
        | Self::TagNotFound(_)
    )
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
