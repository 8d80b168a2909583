//! The `VoteStore` trait: the surface the surrounding application uses.
//!
//! Implemented by storage backends (e.g. `tally-store-sqlite`). Request
//! handlers call [`VoteStore::cast_vote`], maintenance jobs call
//! [`VoteStore::recompute`], and the rendering layer calls
//! [`VoteStore::build_reply_view`].

use std::{collections::HashMap, future::Future};

use uuid::Uuid;

use crate::{
  reply::{NewReply, Reply},
  submission::{NewSubmission, Submission, Tag},
  thread::ThreadedReply,
  user::{User, Viewer},
  vote::{Vote, VoteDelta, VoteReason, VoteTarget, VoteValue},
};

/// Abstraction over a Tally storage backend.
///
/// `cast_vote` is a single atomic unit: the ledger row, the target's
/// counters and derived score, the author's reputation, and the aggregate
/// cache invalidation all commit together or not at all. Votes on different
/// targets never contend with each other beyond what the backend's own
/// locking imposes.
pub trait VoteStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Users and tags ──────────────────────────────────────────────────────

  fn add_user(
    &self,
    username: String,
    is_moderator: bool,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  fn get_user(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  /// Create a tag. `hotness_mod` must lie within
  /// [`crate::submission::HOTNESS_MOD_RANGE`].
  fn add_tag(
    &self,
    name: String,
    hotness_mod: f64,
  ) -> impl Future<Output = Result<Tag, Self::Error>> + Send + '_;

  // ── Submissions and replies ─────────────────────────────────────────────

  /// Persist a new submission carrying its author's initial upvote.
  fn submit(
    &self,
    input: NewSubmission,
  ) -> impl Future<Output = Result<Submission, Self::Error>> + Send + '_;

  fn get_submission(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Submission>, Self::Error>> + Send + '_;

  /// Replace a submission's tags and recompute its hotness.
  fn set_tags(
    &self,
    submission_id: Uuid,
    tags: Vec<String>,
  ) -> impl Future<Output = Result<Submission, Self::Error>> + Send + '_;

  /// Merge `submission_id` into `into`, or unmerge it when `into` is `None`.
  /// Merges are one level deep.
  fn merge_submission(
    &self,
    submission_id: Uuid,
    into: Option<Uuid>,
  ) -> impl Future<Output = Result<Submission, Self::Error>> + Send + '_;

  /// Persist a new reply carrying its author's initial upvote. The parent,
  /// if any, must belong to the same submission.
  fn post_reply(
    &self,
    input: NewReply,
  ) -> impl Future<Output = Result<Reply, Self::Error>> + Send + '_;

  fn get_reply(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Reply>, Self::Error>> + Send + '_;

  /// Mark a reply deleted; a moderator removing someone else's reply also
  /// marks it moderated.
  fn delete_reply(
    &self,
    reply_id: Uuid,
    actor: Viewer,
  ) -> impl Future<Output = Result<Reply, Self::Error>> + Send + '_;

  /// Restore a deleted reply. A moderator also lifts the moderated mark;
  /// an author cannot undo a moderator's removal.
  fn undelete_reply(
    &self,
    reply_id: Uuid,
    actor: Viewer,
  ) -> impl Future<Output = Result<Reply, Self::Error>> + Send + '_;

  // ── Votes ───────────────────────────────────────────────────────────────

  /// Cast, change, or retract (`VoteValue::Neutral`) a vote and return the
  /// counter delta applied to the target.
  ///
  /// Eligibility (see [`crate::eligibility`]) is the caller's job. A
  /// retryable error leaves no partial state behind.
  ///
  /// Deleted and moderated replies still exist and still accept votes;
  /// only a target with no row at all is reported as not found.
  fn cast_vote(
    &self,
    voter_id: Uuid,
    target: VoteTarget,
    value: VoteValue,
    reason: Option<VoteReason>,
  ) -> impl Future<Output = Result<VoteDelta, Self::Error>> + Send + '_;

  fn get_vote(
    &self,
    voter_id: Uuid,
    target: VoteTarget,
  ) -> impl Future<Output = Result<Option<Vote>, Self::Error>> + Send + '_;

  /// The voter's live votes on replies of a submission, keyed by reply id.
  fn votes_for_viewer(
    &self,
    voter_id: Uuid,
    submission_id: Uuid,
  ) -> impl Future<Output = Result<HashMap<Uuid, Vote>, Self::Error>> + Send + '_;

  // ── Derived scores ──────────────────────────────────────────────────────

  /// Recompute and persist the target's derived score (confidence for a
  /// reply, hotness for a submission) from its current counters.
  fn recompute(
    &self,
    target: VoteTarget,
  ) -> impl Future<Output = Result<f64, Self::Error>> + Send + '_;

  /// Recompute every derived score; returns the number of rows touched.
  fn recompute_all(
    &self,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  // ── Reads ───────────────────────────────────────────────────────────────

  /// The ordered, indented reply thread of a submission as `viewer` sees
  /// it, including replies of submissions merged into it.
  fn build_reply_view(
    &self,
    viewer: Option<Viewer>,
    submission_id: Uuid,
  ) -> impl Future<Output = Result<Vec<ThreadedReply>, Self::Error>> + Send + '_;
}
