//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are fixed-width RFC 3339 strings with microsecond precision so
//! they sort lexically. UUIDs are hyphenated lowercase strings. Vote reasons
//! are stored as their one-character code.

use chrono::{DateTime, SecondsFormat, SubsecRound as _, Utc};
use tally_core::{
  reply::Reply,
  submission::{Submission, Tag},
  user::User,
  vote::{TargetKind, Vote, VoteReason, VoteTarget, VoteValue},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

/// The current time at the precision the store keeps.
pub fn now() -> DateTime<Utc> { Utc::now().trunc_subsecs(6) }

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Votes ────────────────────────────────────────────────────────────────────

pub fn encode_target_kind(k: TargetKind) -> &'static str {
  match k {
    TargetKind::Submission => "submission",
    TargetKind::Reply => "reply",
  }
}

pub fn decode_target(kind: &str, id: Uuid) -> Result<VoteTarget> {
  match kind {
    "submission" => Ok(VoteTarget::Submission(id)),
    "reply" => Ok(VoteTarget::Reply(id)),
    other => Err(Error::Decode(format!("unknown target kind: {other:?}"))),
  }
}

pub fn encode_reason(r: VoteReason) -> String { r.code().to_string() }

pub fn decode_reason(s: &str) -> Result<VoteReason> {
  let mut chars = s.chars();
  match (chars.next(), chars.next()) {
    (Some(c), None) => VoteReason::from_code(c)
      .ok_or_else(|| Error::Decode(format!("unknown reason code: {s:?}"))),
    _ => Err(Error::Decode(format!("malformed reason code: {s:?}"))),
  }
}

pub fn decode_value(v: i64) -> Result<VoteValue> {
  match VoteValue::try_from(v)? {
    VoteValue::Neutral => {
      Err(Error::Decode("stored vote has neutral value".to_owned()))
    }
    value => Ok(value),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

pub const USER_COLUMNS: &str =
  "user_id, username, created_at, is_moderator, karma";

/// Raw values read directly from a `users` row.
pub struct RawUser {
  pub user_id:      String,
  pub username:     String,
  pub created_at:   String,
  pub is_moderator: bool,
  pub karma:        i64,
}

impl RawUser {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      user_id:      row.get(0)?,
      username:     row.get(1)?,
      created_at:   row.get(2)?,
      is_moderator: row.get(3)?,
      karma:        row.get(4)?,
    })
  }

  pub fn into_user(self) -> Result<User> {
    Ok(User {
      user_id:      decode_uuid(&self.user_id)?,
      username:     self.username,
      created_at:   decode_dt(&self.created_at)?,
      is_moderator: self.is_moderator,
      karma:        self.karma,
    })
  }
}

pub const SUBMISSION_COLUMNS: &str = "submission_id, author_id, created_at, \
  url, user_is_author, upvotes, downvotes, hotness, merged_into, \
  reply_points_cache, reply_count";

/// Raw values read directly from a `submissions` row. Tags are loaded
/// separately from `taggings`.
pub struct RawSubmission {
  pub submission_id:      String,
  pub author_id:          String,
  pub created_at:         String,
  pub url:                Option<String>,
  pub user_is_author:     bool,
  pub upvotes:            u32,
  pub downvotes:          u32,
  pub hotness:            f64,
  pub merged_into:        Option<String>,
  pub reply_points_cache: Option<f64>,
  pub reply_count:        u32,
}

impl RawSubmission {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      submission_id:      row.get(0)?,
      author_id:          row.get(1)?,
      created_at:         row.get(2)?,
      url:                row.get(3)?,
      user_is_author:     row.get(4)?,
      upvotes:            row.get(5)?,
      downvotes:          row.get(6)?,
      hotness:            row.get(7)?,
      merged_into:        row.get(8)?,
      reply_points_cache: row.get(9)?,
      reply_count:        row.get(10)?,
    })
  }

  pub fn into_submission(self, tags: Vec<Tag>) -> Result<Submission> {
    Ok(Submission {
      submission_id: decode_uuid(&self.submission_id)?,
      author_id: decode_uuid(&self.author_id)?,
      created_at: decode_dt(&self.created_at)?,
      url: self.url,
      user_is_author: self.user_is_author,
      tags,
      upvotes: self.upvotes,
      downvotes: self.downvotes,
      hotness: self.hotness,
      merged_into: self.merged_into.as_deref().map(decode_uuid).transpose()?,
      reply_points_cache: self.reply_points_cache,
      reply_count: self.reply_count,
    })
  }
}

pub const REPLY_COLUMNS: &str = "reply_id, submission_id, parent_reply_id, \
  author_id, created_at, upvotes, downvotes, confidence, is_deleted, \
  is_moderated";

/// Raw values read directly from a `replies` row.
pub struct RawReply {
  pub reply_id:        String,
  pub submission_id:   String,
  pub parent_reply_id: Option<String>,
  pub author_id:       String,
  pub created_at:      String,
  pub upvotes:         u32,
  pub downvotes:       u32,
  pub confidence:      f64,
  pub is_deleted:      bool,
  pub is_moderated:    bool,
}

impl RawReply {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      reply_id:        row.get(0)?,
      submission_id:   row.get(1)?,
      parent_reply_id: row.get(2)?,
      author_id:       row.get(3)?,
      created_at:      row.get(4)?,
      upvotes:         row.get(5)?,
      downvotes:       row.get(6)?,
      confidence:      row.get(7)?,
      is_deleted:      row.get(8)?,
      is_moderated:    row.get(9)?,
    })
  }

  pub fn into_reply(self) -> Result<Reply> {
    Ok(Reply {
      reply_id:        decode_uuid(&self.reply_id)?,
      submission_id:   decode_uuid(&self.submission_id)?,
      parent_reply_id: self
        .parent_reply_id
        .as_deref()
        .map(decode_uuid)
        .transpose()?,
      author_id:       decode_uuid(&self.author_id)?,
      created_at:      decode_dt(&self.created_at)?,
      upvotes:         self.upvotes,
      downvotes:       self.downvotes,
      confidence:      self.confidence,
      is_deleted:      self.is_deleted,
      is_moderated:    self.is_moderated,
    })
  }
}

pub const VOTE_COLUMNS: &str =
  "voter_id, target_kind, target_id, submission_id, value, reason, updated_at";

/// Raw values read directly from a `votes` row.
pub struct RawVote {
  pub voter_id:      String,
  pub target_kind:   String,
  pub target_id:     String,
  pub submission_id: String,
  pub value:         i64,
  pub reason:        Option<String>,
  pub updated_at:    String,
}

impl RawVote {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      voter_id:      row.get(0)?,
      target_kind:   row.get(1)?,
      target_id:     row.get(2)?,
      submission_id: row.get(3)?,
      value:         row.get(4)?,
      reason:        row.get(5)?,
      updated_at:    row.get(6)?,
    })
  }

  pub fn into_vote(self) -> Result<Vote> {
    Ok(Vote {
      voter_id:      decode_uuid(&self.voter_id)?,
      target:        decode_target(&self.target_kind, decode_uuid(&self.target_id)?)?,
      submission_id: decode_uuid(&self.submission_id)?,
      value:         decode_value(self.value)?,
      reason:        self.reason.as_deref().map(decode_reason).transpose()?,
      updated_at:    decode_dt(&self.updated_at)?,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn timestamps_sort_lexically() {
    let a = decode_dt("2024-01-01T00:00:00.000001Z").unwrap();
    let b = decode_dt("2024-01-01T00:00:00.1Z").unwrap();
    assert!(encode_dt(a) < encode_dt(b));
    assert_eq!(encode_dt(b), "2024-01-01T00:00:00.100000Z");
  }

  #[test]
  fn neutral_votes_are_never_decoded() {
    assert!(decode_value(0).is_err());
    assert!(decode_value(3).is_err());
    assert_eq!(decode_value(-1).unwrap(), VoteValue::Down);
  }

  #[test]
  fn reason_codes_are_single_characters() {
    assert_eq!(decode_reason("T").unwrap(), VoteReason::Troll);
    assert!(decode_reason("TT").is_err());
    assert!(decode_reason("").is_err());
    assert!(decode_reason("Z").is_err());
  }
}
