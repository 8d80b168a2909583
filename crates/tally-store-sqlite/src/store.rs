//! [`SqliteStore`]: the SQLite implementation of [`VoteStore`].

use std::{collections::HashMap, path::Path, time::Duration};

use tracing::{debug, info, warn};
use uuid::Uuid;

use tally_core::{
  reply::{NewReply, Reply},
  store::VoteStore,
  submission::{NewSubmission, Submission, Tag},
  thread::{self, ThreadedReply},
  user::{User, Viewer},
  vote::{Vote, VoteDelta, VoteReason, VoteTarget, VoteValue},
};

use crate::{Error, Result, schema::SCHEMA, tx};

// ─── Options ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct StoreOptions {
  /// How long a write waits for SQLite's lock before failing with
  /// [`tally_core::Error::ConcurrencyConflict`].
  pub lock_timeout: Duration,
}

impl Default for StoreOptions {
  fn default() -> Self { Self { lock_timeout: Duration::from_secs(5) } }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Tally store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` with default options.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    Self::open_with(path, StoreOptions::default()).await
  }

  pub async fn open_with(path: impl AsRef<Path>, options: StoreOptions) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema(options).await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema(StoreOptions::default()).await?;
    Ok(store)
  }

  async fn init_schema(&self, options: StoreOptions) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.busy_timeout(options.lock_timeout)?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

fn log_conflict(op: &'static str) -> impl FnOnce(&Error) {
  move |e| {
    if e.is_retryable() {
      warn!(op, "write lock not acquired in time");
    }
  }
}

// ─── VoteStore impl ──────────────────────────────────────────────────────────

impl VoteStore for SqliteStore {
  type Error = Error;

  // ── Users and tags ──────────────────────────────────────────────────────

  async fn add_user(&self, username: String, is_moderator: bool) -> Result<User> {
    let user = self
      .conn
      .call(move |conn| Ok(tx::insert_user(conn, username, is_moderator)))
      .await??;
    debug!(user_id = %user.user_id, username = %user.username, "user added");
    Ok(user)
  }

  async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
    self.conn.call(move |conn| Ok(tx::load_user(conn, id))).await?
  }

  async fn add_tag(&self, name: String, hotness_mod: f64) -> Result<Tag> {
    self
      .conn
      .call(move |conn| Ok(tx::insert_tag(conn, name, hotness_mod)))
      .await?
  }

  // ── Submissions and replies ─────────────────────────────────────────────

  async fn submit(&self, input: NewSubmission) -> Result<Submission> {
    let s = self
      .conn
      .call(move |conn| Ok(tx::insert_submission(conn, input)))
      .await?
      .inspect_err(log_conflict("submit"))?;
    debug!(submission_id = %s.submission_id, hotness = s.hotness, "submission created");
    Ok(s)
  }

  async fn get_submission(&self, id: Uuid) -> Result<Option<Submission>> {
    self.conn.call(move |conn| Ok(tx::load_submission(conn, id))).await?
  }

  async fn set_tags(&self, submission_id: Uuid, tags: Vec<String>) -> Result<Submission> {
    let s = self
      .conn
      .call(move |conn| Ok(tx::replace_tags(conn, submission_id, tags)))
      .await?
      .inspect_err(log_conflict("set_tags"))?;
    debug!(%submission_id, hotness = s.hotness, "tags replaced");
    Ok(s)
  }

  async fn merge_submission(&self, submission_id: Uuid, into: Option<Uuid>) -> Result<Submission> {
    let s = self
      .conn
      .call(move |conn| Ok(tx::merge(conn, submission_id, into)))
      .await?
      .inspect_err(log_conflict("merge_submission"))?;
    debug!(%submission_id, merged_into = ?into, "merge updated");
    Ok(s)
  }

  async fn post_reply(&self, input: NewReply) -> Result<Reply> {
    let reply = self
      .conn
      .call(move |conn| Ok(tx::insert_reply(conn, input)))
      .await?
      .inspect_err(log_conflict("post_reply"))?;
    debug!(
      reply_id = %reply.reply_id,
      submission_id = %reply.submission_id,
      "reply posted",
    );
    Ok(reply)
  }

  async fn get_reply(&self, id: Uuid) -> Result<Option<Reply>> {
    self.conn.call(move |conn| Ok(tx::load_reply(conn, id))).await?
  }

  async fn delete_reply(&self, reply_id: Uuid, actor: Viewer) -> Result<Reply> {
    let reply = self
      .conn
      .call(move |conn| Ok(tx::mark_deleted(conn, reply_id, actor)))
      .await?
      .inspect_err(log_conflict("delete_reply"))?;
    debug!(%reply_id, moderated = reply.is_moderated, "reply deleted");
    Ok(reply)
  }

  async fn undelete_reply(&self, reply_id: Uuid, actor: Viewer) -> Result<Reply> {
    let reply = self
      .conn
      .call(move |conn| Ok(tx::mark_undeleted(conn, reply_id, actor)))
      .await?
      .inspect_err(log_conflict("undelete_reply"))?;
    debug!(%reply_id, moderated = reply.is_moderated, "reply restored");
    Ok(reply)
  }

  // ── Votes ───────────────────────────────────────────────────────────────

  async fn cast_vote(
    &self,
    voter_id: Uuid,
    target: VoteTarget,
    value: VoteValue,
    reason: Option<VoteReason>,
  ) -> Result<VoteDelta> {
    let delta = self
      .conn
      .call(move |conn| Ok(tx::cast(conn, voter_id, target, value, reason)))
      .await?
      .inspect_err(log_conflict("cast_vote"))?;
    debug!(
      %voter_id,
      ?target,
      ?value,
      up = delta.upvote_delta,
      down = delta.downvote_delta,
      "vote cast",
    );
    Ok(delta)
  }

  async fn get_vote(&self, voter_id: Uuid, target: VoteTarget) -> Result<Option<Vote>> {
    self
      .conn
      .call(move |conn| Ok(tx::load_vote(conn, voter_id, target)))
      .await?
  }

  async fn votes_for_viewer(&self, voter_id: Uuid, submission_id: Uuid) -> Result<HashMap<Uuid, Vote>> {
    let votes = self
      .conn
      .call(move |conn| Ok(tx::reply_votes_by(conn, voter_id, submission_id)))
      .await??;
    Ok(votes.into_iter().map(|v| (v.target.id(), v)).collect())
  }

  // ── Derived scores ──────────────────────────────────────────────────────

  async fn recompute(&self, target: VoteTarget) -> Result<f64> {
    let value = self
      .conn
      .call(move |conn| Ok(tx::recompute(conn, target)))
      .await?
      .inspect_err(log_conflict("recompute"))?;
    debug!(?target, value, "score recomputed");
    Ok(value)
  }

  /// One connection call per row, so writes queued behind the batch run
  /// between rows instead of waiting for all of it.
  async fn recompute_all(&self) -> Result<usize> {
    let targets = self
      .conn
      .call(|conn| Ok(tx::recompute_targets(conn)))
      .await??;

    for &target in &targets {
      self
        .conn
        .call(move |conn| Ok(tx::recompute(conn, target)))
        .await?
        .inspect_err(log_conflict("recompute_all"))?;
    }
    info!(count = targets.len(), "recomputed all derived scores");
    Ok(targets.len())
  }

  // ── Reads ───────────────────────────────────────────────────────────────

  async fn build_reply_view(&self, viewer: Option<Viewer>, submission_id: Uuid) -> Result<Vec<ThreadedReply>> {
    let replies = self
      .conn
      .call(move |conn| Ok(tx::thread_replies(conn, submission_id)))
      .await??;
    Ok(thread::arrange(&replies, viewer.as_ref()))
  }
}
