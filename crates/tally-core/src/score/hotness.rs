//! Submission hotness.
//!
//! Hotness mixes the log of the vote score, tag modifiers, reply activity,
//! and the creation time. The result is negated so that sorting ascending
//! puts the hottest submission first.

use chrono::{DateTime, Utc};

use crate::{aggregate::Counters, submission::Submission};

/// Seconds of age that cost one unit of hotness (22 hours). Larger values
/// slow the decay.
pub const HOTNESS_WINDOW_SECS: f64 = 79_200.0;

/// Base bump for a linked submission whose submitter wrote the linked work.
pub const AUTHOR_LINK_BONUS: f64 = 0.25;

/// Everything hotness depends on.
#[derive(Debug, Clone, Default)]
pub struct HotnessInputs {
  pub tag_mods:       Vec<f64>,
  pub user_is_author: bool,
  pub has_link:       bool,
  /// Counters of qualifying replies: those on the submission (and on any
  /// submission merged into it) not written by the submission's author.
  pub reply_votes:    Vec<Counters>,
  /// Current scores of submissions merged into this one.
  pub merged_scores:  Vec<i64>,
  pub counters:       Counters,
  pub created_at:     DateTime<Utc>,
}

impl HotnessInputs {
  /// Gather the submission's own attributes; reply and merge contributions
  /// are supplied by the caller.
  pub fn for_submission(
    submission: &Submission,
    reply_votes: Vec<Counters>,
    merged_scores: Vec<i64>,
  ) -> Self {
    Self {
      tag_mods: submission.tags.iter().map(|t| t.hotness_mod).collect(),
      user_is_author: submission.user_is_author,
      has_link: submission.has_link(),
      reply_votes,
      merged_scores,
      counters: submission.counters(),
      created_at: submission.created_at,
    }
  }

  pub fn base(&self) -> f64 { base(&self.tag_mods, self.user_is_author, self.has_link) }
}

/// Sum of tag modifiers plus the author-link bonus.
pub fn base(tag_mods: &[f64], user_is_author: bool, has_link: bool) -> f64 {
  let bonus = if user_is_author && has_link { AUTHOR_LINK_BONUS } else { 0.0 };
  tag_mods.iter().sum::<f64>() + bonus
}

/// Points earned from reply votes, before merged-in scores are added.
///
/// A submission already starting with a negative base only looks at reply
/// downvotes, which can only pull it further down.
pub fn reply_points(base: f64, reply_votes: &[Counters]) -> f64 {
  let sum: f64 = reply_votes
    .iter()
    .map(|c| {
      if base < 0.0 {
        f64::from(c.downvotes) * -0.5
      } else {
        f64::from(c.upvotes) + 1.0 - f64::from(c.downvotes)
      }
    })
    .sum();
  sum * 0.5
}

/// Hotness from a precomputed `base` and pre-merge `reply_points`.
pub fn hotness_from_parts(
  base: f64,
  reply_points: f64,
  merged_scores: &[i64],
  counters: Counters,
  created_at: DateTime<Utc>,
) -> f64 {
  let mut points = reply_points + merged_scores.iter().sum::<i64>() as f64;

  // Lots of reply activity on a barely-upvoted submission is not a signal.
  let upvotes = f64::from(counters.upvotes);
  if points > upvotes {
    points = upvotes;
  }

  let score = counters.score();
  // +1 so a fresh submission at score 0 is not sunk immediately.
  let magnitude = (((score + 1).abs() as f64) + points).max(1.0).log10();
  let sign = score.signum() as f64;

  let age = created_at.timestamp_micros() as f64 / 1_000_000.0;
  round7(-(magnitude * sign + base + age / HOTNESS_WINDOW_SECS))
}

pub fn hotness(inputs: &HotnessInputs) -> f64 {
  let base = inputs.base();
  hotness_from_parts(
    base,
    reply_points(base, &inputs.reply_votes),
    &inputs.merged_scores,
    inputs.counters,
    inputs.created_at,
  )
}

fn round7(x: f64) -> f64 { (x * 1e7).round() / 1e7 }
