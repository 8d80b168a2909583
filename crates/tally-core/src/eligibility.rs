//! Caller-side vote rules.
//!
//! The ledger accepts any valid value on an existing target. Whether a vote
//! should be allowed at all (self-votes, downvote windows, reason codes) is
//! decided here, before the store is called.

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::{
  reply::Reply,
  submission::Submission,
  vote::{TargetKind, VoteReason, VoteValue},
};

/// Replies can be downvoted for this many days after posting...
pub const REPLY_DOWNVOTABLE_DAYS: i64 = 7;
/// ...while their score stays above this floor.
pub const REPLY_DOWNVOTABLE_MIN_SCORE: i64 = -10;

/// Submissions can be downvoted for this many days after posting...
pub const SUBMISSION_DOWNVOTABLE_DAYS: i64 = 14;
/// ...while their score is at least this.
pub const SUBMISSION_DOWNVOTABLE_MIN_SCORE: i64 = -5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VoteRejection {
  #[error("users cannot vote on their own submissions or replies")]
  SelfVote,

  #[error("target is no longer open to downvotes")]
  NotDownvotable,

  #[error("a downvote requires a reason")]
  MissingReason,

  #[error("reason {0:?} is not accepted for this target")]
  InvalidReason(char),
}

/// A target as seen by the eligibility rules.
#[derive(Debug, Clone, Copy)]
pub enum Candidate<'a> {
  Submission(&'a Submission),
  Reply(&'a Reply),
}

impl Candidate<'_> {
  pub fn kind(&self) -> TargetKind {
    match self {
      Self::Submission(_) => TargetKind::Submission,
      Self::Reply(_) => TargetKind::Reply,
    }
  }

  pub fn author_id(&self) -> Uuid {
    match self {
      Self::Submission(s) => s.author_id,
      Self::Reply(r) => r.author_id,
    }
  }

  pub fn is_downvotable(&self, now: DateTime<Utc>) -> bool {
    match self {
      Self::Submission(s) => {
        s.score() >= SUBMISSION_DOWNVOTABLE_MIN_SCORE
          && now - s.created_at <= Duration::days(SUBMISSION_DOWNVOTABLE_DAYS)
      }
      Self::Reply(r) => {
        r.score() > REPLY_DOWNVOTABLE_MIN_SCORE
          && now - r.created_at <= Duration::days(REPLY_DOWNVOTABLE_DAYS)
      }
    }
  }
}

/// Whether `reason` may accompany a new downvote on a `kind` target.
pub fn reason_accepted(kind: TargetKind, reason: VoteReason) -> bool {
  use VoteReason::*;
  match kind {
    TargetKind::Reply => {
      matches!(reason, OffTopic | Incorrect | MeToo | Troll | Spam)
    }
    TargetKind::Submission => matches!(reason, OffTopic | AlreadyPosted | Spam),
  }
}

/// Decide whether `voter_id` may cast `value` on `candidate` at `now`.
/// Retractions are always allowed.
pub fn check_vote(
  voter_id: Uuid,
  candidate: Candidate<'_>,
  value: VoteValue,
  reason: Option<VoteReason>,
  now: DateTime<Utc>,
) -> Result<(), VoteRejection> {
  if value == VoteValue::Neutral {
    return Ok(());
  }
  if voter_id == candidate.author_id() {
    return Err(VoteRejection::SelfVote);
  }
  if value == VoteValue::Down {
    let reason = reason.ok_or(VoteRejection::MissingReason)?;
    if !reason_accepted(candidate.kind(), reason) {
      return Err(VoteRejection::InvalidReason(reason.code()));
    }
    if !candidate.is_downvotable(now) {
      return Err(VoteRejection::NotDownvotable);
    }
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn submission(author_id: Uuid, up: u32, down: u32, age_days: i64) -> Submission {
    Submission {
      submission_id:      Uuid::new_v4(),
      author_id,
      created_at:         Utc::now() - Duration::days(age_days),
      url:                None,
      user_is_author:     false,
      tags:               vec![],
      upvotes:            up,
      downvotes:          down,
      hotness:            0.0,
      merged_into:        None,
      reply_points_cache: None,
      reply_count:        0,
    }
  }

  fn reply(author_id: Uuid, up: u32, down: u32, age_days: i64) -> Reply {
    Reply {
      reply_id: Uuid::new_v4(),
      submission_id: Uuid::new_v4(),
      parent_reply_id: None,
      author_id,
      created_at: Utc::now() - Duration::days(age_days),
      upvotes: up,
      downvotes: down,
      confidence: 0.0,
      is_deleted: false,
      is_moderated: false,
    }
  }

  #[test]
  fn self_votes_are_rejected_but_retraction_is_not() {
    let me = Uuid::new_v4();
    let s = submission(me, 1, 0, 0);
    let now = Utc::now();
    assert_eq!(
      check_vote(me, Candidate::Submission(&s), VoteValue::Up, None, now),
      Err(VoteRejection::SelfVote)
    );
    assert_eq!(
      check_vote(me, Candidate::Submission(&s), VoteValue::Neutral, None, now),
      Ok(())
    );
  }

  #[test]
  fn downvotes_need_a_reason_valid_for_the_kind() {
    let voter = Uuid::new_v4();
    let s = submission(Uuid::new_v4(), 1, 0, 0);
    let r = reply(Uuid::new_v4(), 1, 0, 0);
    let now = Utc::now();

    assert_eq!(
      check_vote(voter, Candidate::Reply(&r), VoteValue::Down, None, now),
      Err(VoteRejection::MissingReason)
    );
    assert_eq!(
      check_vote(
        voter,
        Candidate::Reply(&r),
        VoteValue::Down,
        Some(VoteReason::AlreadyPosted),
        now
      ),
      Err(VoteRejection::InvalidReason('A'))
    );
    assert_eq!(
      check_vote(
        voter,
        Candidate::Submission(&s),
        VoteValue::Down,
        Some(VoteReason::LowQuality),
        now
      ),
      Err(VoteRejection::InvalidReason('Q'))
    );
    assert_eq!(
      check_vote(
        voter,
        Candidate::Submission(&s),
        VoteValue::Down,
        Some(VoteReason::Spam),
        now
      ),
      Ok(())
    );
  }

  #[test]
  fn reply_downvote_window() {
    let now = Utc::now();
    assert!(Candidate::Reply(&reply(Uuid::nil(), 1, 0, 6)).is_downvotable(now));
    assert!(!Candidate::Reply(&reply(Uuid::nil(), 1, 0, 8)).is_downvotable(now));
    // Score floor is exclusive for replies.
    assert!(Candidate::Reply(&reply(Uuid::nil(), 0, 9, 0)).is_downvotable(now));
    assert!(!Candidate::Reply(&reply(Uuid::nil(), 0, 10, 0)).is_downvotable(now));
  }

  #[test]
  fn submission_downvote_window() {
    let now = Utc::now();
    let open = submission(Uuid::nil(), 0, 5, 13);
    assert!(Candidate::Submission(&open).is_downvotable(now));
    let sunk = submission(Uuid::nil(), 0, 6, 0);
    assert!(!Candidate::Submission(&sunk).is_downvotable(now));
    let stale = submission(Uuid::nil(), 5, 0, 15);
    assert!(!Candidate::Submission(&stale).is_downvotable(now));
  }
}
