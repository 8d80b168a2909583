//! Users and the viewer identity passed to read paths.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub user_id:      Uuid,
  pub username:     String,
  pub created_at:   DateTime<Utc>,
  pub is_moderator: bool,
  /// Reputation: net votes received on the user's submissions and replies
  /// from other users.
  pub karma:        i64,
}

/// Who is looking at a page. Anonymous visitors are represented by `None`
/// wherever an `Option<&Viewer>` is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
  pub user_id:      Uuid,
  pub is_moderator: bool,
}

impl Viewer {
  pub fn new(user_id: Uuid) -> Self { Self { user_id, is_moderator: false } }

  pub fn moderator(user_id: Uuid) -> Self { Self { user_id, is_moderator: true } }

  pub fn is_author(&self, author_id: Uuid) -> bool { self.user_id == author_id }
}

impl From<&User> for Viewer {
  fn from(user: &User) -> Self {
    Self { user_id: user.user_id, is_moderator: user.is_moderator }
  }
}
