//! Vote types: the rows owned by the vote ledger.
//!
//! A voter has at most one live vote per target. A neutral value is never
//! stored: retracting a vote deletes its row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Value ───────────────────────────────────────────────────────────────────

/// The direction of a vote. `Neutral` means "no vote" and exists only as an
/// input to [`crate::ledger::transition`].
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum VoteValue {
  Down,
  #[default]
  Neutral,
  Up,
}

impl VoteValue {
  pub fn as_i8(self) -> i8 {
    match self {
      Self::Down => -1,
      Self::Neutral => 0,
      Self::Up => 1,
    }
  }

  /// `(is_upvote, is_downvote)` as integers.
  pub fn one_hot(self) -> (i32, i32) {
    match self {
      Self::Down => (0, 1),
      Self::Neutral => (0, 0),
      Self::Up => (1, 0),
    }
  }
}

impl TryFrom<i64> for VoteValue {
  type Error = Error;

  fn try_from(value: i64) -> Result<Self> {
    match value {
      -1 => Ok(Self::Down),
      0 => Ok(Self::Neutral),
      1 => Ok(Self::Up),
      other => Err(Error::InvalidVoteValue(other)),
    }
  }
}

// ─── Target ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
  Submission,
  Reply,
}

/// What a vote is cast on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum VoteTarget {
  Submission(Uuid),
  Reply(Uuid),
}

impl VoteTarget {
  pub fn kind(&self) -> TargetKind {
    match self {
      Self::Submission(_) => TargetKind::Submission,
      Self::Reply(_) => TargetKind::Reply,
    }
  }

  pub fn id(&self) -> Uuid {
    match self {
      Self::Submission(id) | Self::Reply(id) => *id,
    }
  }
}

// ─── Reason ──────────────────────────────────────────────────────────────────

/// Why a downvote was cast. Each reason is stored as a one-character code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteReason {
  OffTopic,
  Incorrect,
  MeToo,
  Troll,
  Spam,
  AlreadyPosted,
  /// Retired for new submission votes; still found on old rows.
  LowQuality,
}

impl VoteReason {
  pub fn code(self) -> char {
    match self {
      Self::OffTopic => 'O',
      Self::Incorrect => 'I',
      Self::MeToo => 'M',
      Self::Troll => 'T',
      Self::Spam => 'S',
      Self::AlreadyPosted => 'A',
      Self::LowQuality => 'Q',
    }
  }

  pub fn from_code(code: char) -> Option<Self> {
    match code {
      'O' => Some(Self::OffTopic),
      'I' => Some(Self::Incorrect),
      'M' => Some(Self::MeToo),
      'T' => Some(Self::Troll),
      'S' => Some(Self::Spam),
      'A' => Some(Self::AlreadyPosted),
      'Q' => Some(Self::LowQuality),
      _ => None,
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      Self::OffTopic => "Off-topic",
      Self::Incorrect => "Incorrect",
      Self::MeToo => "Me-too",
      Self::Troll => "Troll",
      Self::Spam => "Spam",
      Self::AlreadyPosted => "Already Posted",
      Self::LowQuality => "Low Quality",
    }
  }
}

// ─── Vote ────────────────────────────────────────────────────────────────────

/// A live vote row. `value` is never [`VoteValue::Neutral`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vote {
  pub voter_id:      Uuid,
  pub target:        VoteTarget,
  /// The submission the target belongs to (the target itself for
  /// submission votes).
  pub submission_id: Uuid,
  pub value:         VoteValue,
  pub reason:        Option<VoteReason>,
  pub updated_at:    DateTime<Utc>,
}

// ─── Delta ───────────────────────────────────────────────────────────────────

/// Signed change to a target's counters produced by one ledger transition.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
pub struct VoteDelta {
  pub upvote_delta:   i32,
  pub downvote_delta: i32,
}

impl VoteDelta {
  pub const ZERO: Self = Self { upvote_delta: 0, downvote_delta: 0 };

  pub fn is_zero(&self) -> bool { *self == Self::ZERO }

  /// The reputation change for the target's author.
  pub fn karma(&self) -> i64 {
    i64::from(self.upvote_delta) - i64::from(self.downvote_delta)
  }
}
