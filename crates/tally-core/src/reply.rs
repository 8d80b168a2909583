//! Replies: threaded comments on a submission.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregate::Counters;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reply {
  pub reply_id:        Uuid,
  pub submission_id:   Uuid,
  /// `None` for top-level replies.
  pub parent_reply_id: Option<Uuid>,
  pub author_id:       Uuid,
  pub created_at:      DateTime<Utc>,
  pub upvotes:         u32,
  pub downvotes:       u32,
  pub confidence:      f64,
  pub is_deleted:      bool,
  pub is_moderated:    bool,
}

impl Reply {
  pub fn score(&self) -> i64 { self.counters().score() }

  pub fn counters(&self) -> Counters {
    Counters { upvotes: self.upvotes, downvotes: self.downvotes }
  }

  /// Deleted by its author or removed by a moderator.
  pub fn is_gone(&self) -> bool { self.is_deleted || self.is_moderated }
}

/// Input to [`crate::store::VoteStore::post_reply`].
#[derive(Debug, Clone)]
pub struct NewReply {
  pub submission_id:   Uuid,
  pub parent_reply_id: Option<Uuid>,
  pub author_id:       Uuid,
}

impl NewReply {
  pub fn top_level(submission_id: Uuid, author_id: Uuid) -> Self {
    Self { submission_id, parent_reply_id: None, author_id }
  }

  pub fn child_of(parent: &Reply, author_id: Uuid) -> Self {
    Self {
      submission_id: parent.submission_id,
      parent_reply_id: Some(parent.reply_id),
      author_id,
    }
  }
}
