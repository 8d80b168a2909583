//! Submissions and the tags that weight their hotness.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregate::Counters;

/// Tag hotness modifiers must fall inside this range.
pub const HOTNESS_MOD_RANGE: std::ops::RangeInclusive<f64> = -10.0..=10.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
  pub name:        String,
  /// Added to the hotness base of every submission carrying this tag.
  pub hotness_mod: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
  pub submission_id:      Uuid,
  pub author_id:          Uuid,
  pub created_at:         DateTime<Utc>,
  pub url:                Option<String>,
  /// The submitter is the author of the linked work.
  pub user_is_author:     bool,
  pub tags:               Vec<Tag>,
  pub upvotes:            u32,
  pub downvotes:          u32,
  /// Stored hotness; lower sorts hotter.
  pub hotness:            f64,
  /// The submission this one was merged into, if any.
  pub merged_into:        Option<Uuid>,
  /// Cached reply points (before merged-in scores are added); `None` when
  /// invalidated by a reply vote.
  pub reply_points_cache: Option<f64>,
  /// Replies a logged-out reader sees, merged-in submissions included.
  pub reply_count:        u32,
}

impl Submission {
  pub fn score(&self) -> i64 { self.counters().score() }

  pub fn counters(&self) -> Counters {
    Counters { upvotes: self.upvotes, downvotes: self.downvotes }
  }

  pub fn has_link(&self) -> bool {
    self.url.as_deref().is_some_and(|u| !u.trim().is_empty())
  }

  pub fn is_merged(&self) -> bool { self.merged_into.is_some() }
}

/// Input to [`crate::store::VoteStore::submit`]. Counters, hotness, and
/// `created_at` are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewSubmission {
  pub author_id:      Uuid,
  pub url:            Option<String>,
  pub user_is_author: bool,
  /// Tag names; each must already exist.
  pub tags:           Vec<String>,
}

impl NewSubmission {
  pub fn new(author_id: Uuid) -> Self {
    Self { author_id, url: None, user_is_author: false, tags: Vec::new() }
  }
}
