//! Synchronous transaction bodies, run on the connection thread.
//!
//! Every write opens an `IMMEDIATE` transaction so the write lock is taken
//! before anything is read; the counters a vote reads are therefore the
//! counters it overwrites. Returning early (or with an error) drops the
//! transaction, which rolls it back.

use std::collections::BTreeSet;

use rusqlite::{Connection, OptionalExtension as _, Transaction, TransactionBehavior, params};
use tally_core::{
  Error as CoreError,
  aggregate::{Counters, karma_adjustment},
  ledger::{self, LedgerWrite},
  reply::{NewReply, Reply},
  score::{confidence, hotness},
  submission::{HOTNESS_MOD_RANGE, NewSubmission, Submission, Tag},
  thread,
  user::{User, Viewer},
  vote::{Vote, VoteDelta, VoteReason, VoteTarget, VoteValue},
};
use uuid::Uuid;

use crate::{
  Result,
  encode::{
    self, REPLY_COLUMNS, RawReply, RawSubmission, RawUser, RawVote,
    SUBMISSION_COLUMNS, USER_COLUMNS, VOTE_COLUMNS, decode_uuid, encode_dt,
    encode_reason, encode_target_kind, encode_uuid,
  },
};

fn immediate(conn: &mut Connection) -> Result<Transaction<'_>> {
  Ok(conn.transaction_with_behavior(TransactionBehavior::Immediate)?)
}

// ─── Users and tags ──────────────────────────────────────────────────────────

pub fn insert_user(conn: &mut Connection, username: String, is_moderator: bool) -> Result<User> {
  let user = User {
    user_id: Uuid::new_v4(),
    username,
    created_at: encode::now(),
    is_moderator,
    karma: 0,
  };
  conn.execute(
    "INSERT INTO users (user_id, username, created_at, is_moderator, karma)
     VALUES (?1, ?2, ?3, ?4, 0)",
    params![
      encode_uuid(user.user_id),
      user.username,
      encode_dt(user.created_at),
      user.is_moderator,
    ],
  )?;
  Ok(user)
}

pub fn load_user(conn: &Connection, id: Uuid) -> Result<Option<User>> {
  let raw = conn
    .query_row(
      &format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = ?1"),
      params![encode_uuid(id)],
      RawUser::from_row,
    )
    .optional()?;
  raw.map(RawUser::into_user).transpose()
}

fn require_user(conn: &Connection, id: Uuid) -> Result<User> {
  load_user(conn, id)?.ok_or_else(|| CoreError::UserNotFound(id).into())
}

pub fn insert_tag(conn: &mut Connection, name: String, hotness_mod: f64) -> Result<Tag> {
  if !HOTNESS_MOD_RANGE.contains(&hotness_mod) {
    return Err(CoreError::InvalidHotnessModifier(hotness_mod).into());
  }
  conn.execute(
    "INSERT INTO tags (name, hotness_mod) VALUES (?1, ?2)",
    params![name, hotness_mod],
  )?;
  Ok(Tag { name, hotness_mod })
}

fn load_tags(conn: &Connection, submission_id: Uuid) -> Result<Vec<Tag>> {
  let mut stmt = conn.prepare(
    "SELECT t.name, t.hotness_mod
     FROM taggings g
     JOIN tags t ON t.name = g.tag_name
     WHERE g.submission_id = ?1
     ORDER BY t.name",
  )?;
  let tags = stmt
    .query_map(params![encode_uuid(submission_id)], |row| {
      Ok(Tag { name: row.get(0)?, hotness_mod: row.get(1)? })
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(tags)
}

/// Look up tags by name, deduplicated and sorted.
fn resolve_tags(conn: &Connection, names: &[String]) -> Result<Vec<Tag>> {
  let unique: BTreeSet<&str> = names.iter().map(String::as_str).collect();
  let mut tags = Vec::with_capacity(unique.len());
  for name in unique {
    let hotness_mod: Option<f64> = conn
      .query_row(
        "SELECT hotness_mod FROM tags WHERE name = ?1",
        params![name],
        |row| row.get(0),
      )
      .optional()?;
    let hotness_mod =
      hotness_mod.ok_or_else(|| CoreError::TagNotFound(name.to_owned()))?;
    tags.push(Tag { name: name.to_owned(), hotness_mod });
  }
  Ok(tags)
}

fn write_taggings(conn: &Connection, submission_id: Uuid, tags: &[Tag]) -> Result<()> {
  let id = encode_uuid(submission_id);
  conn.execute("DELETE FROM taggings WHERE submission_id = ?1", params![id])?;
  for tag in tags {
    conn.execute(
      "INSERT INTO taggings (submission_id, tag_name) VALUES (?1, ?2)",
      params![id, tag.name],
    )?;
  }
  Ok(())
}

// ─── Submissions ─────────────────────────────────────────────────────────────

pub fn load_submission(conn: &Connection, id: Uuid) -> Result<Option<Submission>> {
  let raw = conn
    .query_row(
      &format!("SELECT {SUBMISSION_COLUMNS} FROM submissions WHERE submission_id = ?1"),
      params![encode_uuid(id)],
      RawSubmission::from_row,
    )
    .optional()?;
  let Some(raw) = raw else {
    return Ok(None);
  };
  let tags = load_tags(conn, id)?;
  raw.into_submission(tags).map(Some)
}

fn require_submission(conn: &Connection, id: Uuid) -> Result<Submission> {
  load_submission(conn, id)?.ok_or_else(|| CoreError::SubmissionNotFound(id).into())
}

/// Counters of replies that count towards `s`'s hotness: its own and those
/// of submissions merged into it, minus replies by `s`'s author.
fn qualifying_reply_votes(conn: &Connection, s: &Submission) -> Result<Vec<Counters>> {
  let mut stmt = conn.prepare(
    "SELECT upvotes, downvotes FROM replies
     WHERE author_id != ?2
       AND (submission_id = ?1
            OR submission_id IN (SELECT submission_id FROM submissions
                                 WHERE merged_into = ?1))",
  )?;
  let votes = stmt
    .query_map(
      params![encode_uuid(s.submission_id), encode_uuid(s.author_id)],
      |row| Ok(Counters::new(row.get(0)?, row.get(1)?)),
    )?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(votes)
}

fn merged_scores(conn: &Connection, submission_id: Uuid) -> Result<Vec<i64>> {
  let mut stmt = conn.prepare(
    "SELECT upvotes - downvotes FROM submissions WHERE merged_into = ?1",
  )?;
  let scores = stmt
    .query_map(params![encode_uuid(submission_id)], |row| row.get(0))?
    .collect::<rusqlite::Result<Vec<i64>>>()?;
  Ok(scores)
}

fn has_merged_children(conn: &Connection, submission_id: Uuid) -> Result<bool> {
  Ok(
    conn
      .query_row(
        "SELECT 1 FROM submissions WHERE merged_into = ?1 LIMIT 1",
        params![encode_uuid(submission_id)],
        |_| Ok(true),
      )
      .optional()?
      .unwrap_or(false),
  )
}

/// Compute `s`'s hotness from its in-memory counters. With `use_cache`, a
/// present reply-points cache is trusted instead of re-reading replies.
///
/// Returns `(hotness, reply_points)`.
fn compute_hotness(conn: &Connection, s: &Submission, use_cache: bool) -> Result<(f64, f64)> {
  let tag_mods: Vec<f64> = s.tags.iter().map(|t| t.hotness_mod).collect();
  let base = hotness::base(&tag_mods, s.user_is_author, s.has_link());

  let points = match s.reply_points_cache.filter(|_| use_cache) {
    Some(points) => points,
    None => hotness::reply_points(base, &qualifying_reply_votes(conn, s)?),
  };
  let merged = merged_scores(conn, s.submission_id)?;

  let value = hotness::hotness_from_parts(base, points, &merged, s.counters(), s.created_at);
  Ok((value, points))
}

fn store_submission_scores(
  conn: &Connection,
  s: &Submission,
  hotness: f64,
  reply_points: f64,
) -> Result<()> {
  conn.execute(
    "UPDATE submissions
     SET upvotes = ?2, downvotes = ?3, hotness = ?4, reply_points_cache = ?5
     WHERE submission_id = ?1",
    params![
      encode_uuid(s.submission_id),
      s.upvotes,
      s.downvotes,
      hotness,
      reply_points,
    ],
  )?;
  Ok(())
}

/// Recompute `s`'s hotness from scratch and persist it with a fresh cache.
fn refresh_hotness(conn: &Connection, s: &mut Submission) -> Result<f64> {
  let (value, points) = compute_hotness(conn, s, false)?;
  store_submission_scores(conn, s, value, points)?;
  s.hotness = value;
  s.reply_points_cache = Some(points);
  Ok(value)
}

/// Drop the cached reply points of `submission_id` and of the submission it
/// is merged into.
fn invalidate_reply_points(conn: &Connection, submission_id: Uuid) -> Result<()> {
  conn.execute(
    "UPDATE submissions SET reply_points_cache = NULL
     WHERE submission_id = ?1
        OR submission_id = (SELECT merged_into FROM submissions
                            WHERE submission_id = ?1)",
    params![encode_uuid(submission_id)],
  )?;
  Ok(())
}

/// Recount the replies a logged-out reader sees on `submission_id` and on
/// the submission it is merged into. Gone replies that only survive as
/// stubs for their children do not count.
fn refresh_reply_count(conn: &Connection, submission_id: Uuid) -> Result<()> {
  let absorber: Option<String> = conn.query_row(
    "SELECT merged_into FROM submissions WHERE submission_id = ?1",
    params![encode_uuid(submission_id)],
    |row| row.get(0),
  )?;
  let absorber = absorber.as_deref().map(decode_uuid).transpose()?;

  for id in std::iter::once(submission_id).chain(absorber) {
    let replies = replies_shown_on(conn, id)?;
    let visible = thread::arrange(&replies, None)
      .iter()
      .filter(|t| !t.reply.is_gone())
      .count();
    conn.execute(
      "UPDATE submissions SET reply_count = ?2 WHERE submission_id = ?1",
      params![encode_uuid(id), u32::try_from(visible).unwrap_or(u32::MAX)],
    )?;
  }
  Ok(())
}

pub fn insert_submission(conn: &mut Connection, input: NewSubmission) -> Result<Submission> {
  let tx = immediate(conn)?;
  require_user(&tx, input.author_id)?;
  let tags = resolve_tags(&tx, &input.tags)?;

  let mut s = Submission {
    submission_id:      Uuid::new_v4(),
    author_id:          input.author_id,
    created_at:         encode::now(),
    url:                input.url,
    user_is_author:     input.user_is_author,
    tags,
    upvotes:            1,
    downvotes:          0,
    hotness:            0.0,
    merged_into:        None,
    reply_points_cache: None,
    reply_count:        0,
  };

  tx.execute(
    "INSERT INTO submissions (
       submission_id, author_id, created_at, url, user_is_author,
       upvotes, downvotes
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    params![
      encode_uuid(s.submission_id),
      encode_uuid(s.author_id),
      encode_dt(s.created_at),
      s.url,
      s.user_is_author,
      s.upvotes,
      s.downvotes,
    ],
  )?;
  write_taggings(&tx, s.submission_id, &s.tags)?;

  // The author's own upvote is on the ledger but already in the counters.
  let target = VoteTarget::Submission(s.submission_id);
  upsert_vote(&tx, s.author_id, target, s.submission_id, VoteValue::Up, None)?;

  refresh_hotness(&tx, &mut s)?;
  tx.commit()?;
  Ok(s)
}

pub fn replace_tags(conn: &mut Connection, submission_id: Uuid, names: Vec<String>) -> Result<Submission> {
  let tx = immediate(conn)?;
  let mut s = require_submission(&tx, submission_id)?;
  s.tags = resolve_tags(&tx, &names)?;
  write_taggings(&tx, submission_id, &s.tags)?;
  refresh_hotness(&tx, &mut s)?;
  tx.commit()?;
  Ok(s)
}

pub fn merge(conn: &mut Connection, submission_id: Uuid, into: Option<Uuid>) -> Result<Submission> {
  let tx = immediate(conn)?;
  let mut s = require_submission(&tx, submission_id)?;

  if let Some(target_id) = into {
    if target_id == submission_id {
      return Err(CoreError::SelfMerge.into());
    }
    let target = require_submission(&tx, target_id)?;
    if target.is_merged() {
      return Err(CoreError::NestedMerge(target_id).into());
    }
    if has_merged_children(&tx, submission_id)? {
      return Err(CoreError::NestedMerge(submission_id).into());
    }
  }

  let previous = s.merged_into;
  tx.execute(
    "UPDATE submissions SET merged_into = ?2 WHERE submission_id = ?1",
    params![encode_uuid(submission_id), into.map(encode_uuid)],
  )?;
  s.merged_into = into;

  // Both the old and the new absorbing submission gain or lose replies and
  // a merged score.
  let mut absorbers: Vec<Uuid> = [previous, into].into_iter().flatten().collect();
  absorbers.dedup();
  for id in absorbers {
    refresh_reply_count(&tx, id)?;
    let mut absorber = require_submission(&tx, id)?;
    refresh_hotness(&tx, &mut absorber)?;
  }

  tx.commit()?;
  Ok(s)
}

// ─── Replies ─────────────────────────────────────────────────────────────────

pub fn load_reply(conn: &Connection, id: Uuid) -> Result<Option<Reply>> {
  let raw = conn
    .query_row(
      &format!("SELECT {REPLY_COLUMNS} FROM replies WHERE reply_id = ?1"),
      params![encode_uuid(id)],
      RawReply::from_row,
    )
    .optional()?;
  raw.map(RawReply::into_reply).transpose()
}

fn require_reply(conn: &Connection, id: Uuid) -> Result<Reply> {
  load_reply(conn, id)?.ok_or_else(|| CoreError::ReplyNotFound(id).into())
}

pub fn insert_reply(conn: &mut Connection, input: NewReply) -> Result<Reply> {
  let tx = immediate(conn)?;
  require_submission(&tx, input.submission_id)?;
  require_user(&tx, input.author_id)?;
  if let Some(parent_id) = input.parent_reply_id {
    let parent = require_reply(&tx, parent_id)?;
    if parent.submission_id != input.submission_id {
      return Err(CoreError::CrossSubmissionParent.into());
    }
  }

  let reply = Reply {
    reply_id:        Uuid::new_v4(),
    submission_id:   input.submission_id,
    parent_reply_id: input.parent_reply_id,
    author_id:       input.author_id,
    created_at:      encode::now(),
    upvotes:         1,
    downvotes:       0,
    confidence:      confidence(1, 0),
    is_deleted:      false,
    is_moderated:    false,
  };

  tx.execute(
    "INSERT INTO replies (
       reply_id, submission_id, parent_reply_id, author_id, created_at,
       upvotes, downvotes, confidence
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    params![
      encode_uuid(reply.reply_id),
      encode_uuid(reply.submission_id),
      reply.parent_reply_id.map(encode_uuid),
      encode_uuid(reply.author_id),
      encode_dt(reply.created_at),
      reply.upvotes,
      reply.downvotes,
      reply.confidence,
    ],
  )?;

  let target = VoteTarget::Reply(reply.reply_id);
  upsert_vote(&tx, reply.author_id, target, reply.submission_id, VoteValue::Up, None)?;
  invalidate_reply_points(&tx, reply.submission_id)?;
  refresh_reply_count(&tx, reply.submission_id)?;

  tx.commit()?;
  Ok(reply)
}

pub fn mark_deleted(conn: &mut Connection, reply_id: Uuid, actor: Viewer) -> Result<Reply> {
  update_visibility(conn, reply_id, |reply| {
    reply.is_deleted = true;
    if actor.is_moderator && !actor.is_author(reply.author_id) {
      reply.is_moderated = true;
    }
  })
}

pub fn mark_undeleted(conn: &mut Connection, reply_id: Uuid, actor: Viewer) -> Result<Reply> {
  update_visibility(conn, reply_id, |reply| {
    reply.is_deleted = false;
    if actor.is_moderator {
      reply.is_moderated = false;
    }
  })
}

/// Rewrite a reply's deleted and moderated flags, then bring the reply
/// count and cached reply points of its submission up to date.
fn update_visibility(
  conn: &mut Connection,
  reply_id: Uuid,
  change: impl FnOnce(&mut Reply),
) -> Result<Reply> {
  let tx = immediate(conn)?;
  let mut reply = require_reply(&tx, reply_id)?;
  change(&mut reply);

  tx.execute(
    "UPDATE replies SET is_deleted = ?2, is_moderated = ?3 WHERE reply_id = ?1",
    params![encode_uuid(reply_id), reply.is_deleted, reply.is_moderated],
  )?;
  invalidate_reply_points(&tx, reply.submission_id)?;
  refresh_reply_count(&tx, reply.submission_id)?;

  tx.commit()?;
  Ok(reply)
}

/// Replies shown on `submission_id`'s page: its own and those of any
/// submission merged into it, oldest first.
pub fn thread_replies(conn: &Connection, submission_id: Uuid) -> Result<Vec<Reply>> {
  require_submission(conn, submission_id)?;
  replies_shown_on(conn, submission_id)
}

fn replies_shown_on(conn: &Connection, submission_id: Uuid) -> Result<Vec<Reply>> {
  let mut stmt = conn.prepare(&format!(
    "SELECT {REPLY_COLUMNS} FROM replies
     WHERE submission_id = ?1
        OR submission_id IN (SELECT submission_id FROM submissions
                             WHERE merged_into = ?1)
     ORDER BY created_at, reply_id"
  ))?;
  let raws = stmt
    .query_map(params![encode_uuid(submission_id)], RawReply::from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  raws.into_iter().map(RawReply::into_reply).collect()
}

// ─── Votes ───────────────────────────────────────────────────────────────────

pub fn load_vote(conn: &Connection, voter_id: Uuid, target: VoteTarget) -> Result<Option<Vote>> {
  let raw = conn
    .query_row(
      &format!(
        "SELECT {VOTE_COLUMNS} FROM votes
         WHERE voter_id = ?1 AND target_kind = ?2 AND target_id = ?3"
      ),
      params![
        encode_uuid(voter_id),
        encode_target_kind(target.kind()),
        encode_uuid(target.id()),
      ],
      RawVote::from_row,
    )
    .optional()?;
  raw.map(RawVote::into_vote).transpose()
}

pub fn reply_votes_by(conn: &Connection, voter_id: Uuid, submission_id: Uuid) -> Result<Vec<Vote>> {
  let mut stmt = conn.prepare(&format!(
    "SELECT {VOTE_COLUMNS} FROM votes
     WHERE voter_id = ?1
       AND target_kind = 'reply'
       AND (submission_id = ?2
            OR submission_id IN (SELECT submission_id FROM submissions
                                 WHERE merged_into = ?2))"
  ))?;
  let raws = stmt
    .query_map(
      params![encode_uuid(voter_id), encode_uuid(submission_id)],
      RawVote::from_row,
    )?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  raws.into_iter().map(RawVote::into_vote).collect()
}

fn upsert_vote(
  conn: &Connection,
  voter_id: Uuid,
  target: VoteTarget,
  submission_id: Uuid,
  value: VoteValue,
  reason: Option<VoteReason>,
) -> Result<()> {
  conn.execute(
    "INSERT INTO votes (
       voter_id, target_kind, target_id, submission_id, value, reason, updated_at
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
     ON CONFLICT (voter_id, target_kind, target_id) DO UPDATE SET
       value      = excluded.value,
       reason     = excluded.reason,
       updated_at = excluded.updated_at",
    params![
      encode_uuid(voter_id),
      encode_target_kind(target.kind()),
      encode_uuid(target.id()),
      encode_uuid(submission_id),
      value.as_i8(),
      reason.map(encode_reason),
      encode_dt(encode::now()),
    ],
  )?;
  Ok(())
}

fn delete_vote(conn: &Connection, voter_id: Uuid, target: VoteTarget) -> Result<()> {
  conn.execute(
    "DELETE FROM votes WHERE voter_id = ?1 AND target_kind = ?2 AND target_id = ?3",
    params![
      encode_uuid(voter_id),
      encode_target_kind(target.kind()),
      encode_uuid(target.id()),
    ],
  )?;
  Ok(())
}

enum Loaded {
  Submission(Submission),
  Reply(Reply),
}

impl Loaded {
  fn author_id(&self) -> Uuid {
    match self {
      Self::Submission(s) => s.author_id,
      Self::Reply(r) => r.author_id,
    }
  }

  fn submission_id(&self) -> Uuid {
    match self {
      Self::Submission(s) => s.submission_id,
      Self::Reply(r) => r.submission_id,
    }
  }

  fn counters(&self) -> Counters {
    match self {
      Self::Submission(s) => s.counters(),
      Self::Reply(r) => r.counters(),
    }
  }
}

/// Resolve, record, and aggregate one vote as a single transaction.
pub fn cast(
  conn: &mut Connection,
  voter_id: Uuid,
  target: VoteTarget,
  value: VoteValue,
  reason: Option<VoteReason>,
) -> Result<VoteDelta> {
  let tx = immediate(conn)?;
  require_user(&tx, voter_id)?;

  let loaded = match target {
    VoteTarget::Submission(id) => Loaded::Submission(require_submission(&tx, id)?),
    VoteTarget::Reply(id) => Loaded::Reply(require_reply(&tx, id)?),
  };

  let existing = load_vote(&tx, voter_id, target)?.map(|v| v.value);
  let transition = ledger::transition(existing, value);
  if transition.is_noop() {
    return Ok(VoteDelta::ZERO);
  }

  let counters = loaded.counters().apply(transition.delta).inspect_err(|e| {
    tracing::error!(%voter_id, ?target, error = %e, "vote ledger out of step with counters");
  })?;

  let submission_id = loaded.submission_id();
  match transition.write {
    LedgerWrite::Upsert(v) => upsert_vote(&tx, voter_id, target, submission_id, v, reason)?,
    LedgerWrite::Delete => delete_vote(&tx, voter_id, target)?,
    LedgerWrite::Keep => {}
  }

  match loaded {
    Loaded::Reply(ref r) => {
      tx.execute(
        "UPDATE replies SET upvotes = ?2, downvotes = ?3, confidence = ?4
         WHERE reply_id = ?1",
        params![
          encode_uuid(r.reply_id),
          counters.upvotes,
          counters.downvotes,
          confidence(counters.upvotes, counters.downvotes),
        ],
      )?;
      // Hotness itself waits for the next explicit recompute.
      invalidate_reply_points(&tx, submission_id)?;
    }
    Loaded::Submission(ref s) => {
      let mut s = s.clone();
      s.upvotes = counters.upvotes;
      s.downvotes = counters.downvotes;
      let (value, points) = compute_hotness(&tx, &s, true)?;
      store_submission_scores(&tx, &s, value, points)?;
    }
  }

  if let Some(karma) = karma_adjustment(voter_id, loaded.author_id(), transition.delta) {
    tx.execute(
      "UPDATE users SET karma = karma + ?2 WHERE user_id = ?1",
      params![encode_uuid(loaded.author_id()), karma],
    )?;
  }

  tx.commit()?;
  Ok(transition.delta)
}

// ─── Recompute ───────────────────────────────────────────────────────────────

pub fn recompute(conn: &mut Connection, target: VoteTarget) -> Result<f64> {
  let tx = immediate(conn)?;
  let value = match target {
    VoteTarget::Reply(id) => {
      let r = require_reply(&tx, id)?;
      let value = confidence(r.upvotes, r.downvotes);
      tx.execute(
        "UPDATE replies SET confidence = ?2 WHERE reply_id = ?1",
        params![encode_uuid(id), value],
      )?;
      value
    }
    VoteTarget::Submission(id) => {
      let mut s = require_submission(&tx, id)?;
      refresh_hotness(&tx, &mut s)?
    }
  };
  tx.commit()?;
  Ok(value)
}

fn all_ids(conn: &Connection, sql: &str) -> Result<Vec<Uuid>> {
  let mut stmt = conn.prepare(sql)?;
  let ids = stmt
    .query_map([], |row| row.get::<_, String>(0))?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  ids.iter().map(|s| decode_uuid(s)).collect()
}

/// Every row with a derived score: replies first, then submissions newest
/// first. The caller recomputes them one transaction at a time.
pub fn recompute_targets(conn: &Connection) -> Result<Vec<VoteTarget>> {
  let replies = all_ids(conn, "SELECT reply_id FROM replies")?;
  let submissions =
    all_ids(conn, "SELECT submission_id FROM submissions ORDER BY created_at DESC")?;

  Ok(
    replies
      .into_iter()
      .map(VoteTarget::Reply)
      .chain(submissions.into_iter().map(VoteTarget::Submission))
      .collect(),
  )
}
