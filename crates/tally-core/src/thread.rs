//! Reply threading: turns a flat set of replies into the ordered, indented,
//! viewer-specific sequence a submission page displays.
//!
//! Siblings sort with negative-score replies sunk to the bottom, then by
//! confidence descending. The walk is depth-first over an explicit stack so
//! arbitrarily deep threads cannot exhaust the call stack.

use std::{cmp::Ordering, collections::HashMap};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{reply::Reply, user::Viewer};

/// One line of a rendered thread. Top-level replies have `indent_level` 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadedReply {
  pub reply:        Reply,
  pub indent_level: usize,
}

/// Sibling order: non-negative scores first, then higher confidence first.
fn sibling_order(a: &Reply, b: &Reply) -> Ordering {
  (a.score() < 0)
    .cmp(&(b.score() < 0))
    .then_with(|| b.confidence.total_cmp(&a.confidence))
}

/// A gone reply may be pruned unless the viewer moderates or wrote it.
fn hidden_from(reply: &Reply, viewer: Option<&Viewer>) -> bool {
  match viewer {
    Some(v) => !v.is_moderator && !v.is_author(reply.author_id),
    None => true,
  }
}

/// Arrange `replies` for `viewer`.
///
/// A deleted or moderated reply with no children is dropped unless the
/// viewer is a moderator or its author; one with children stays as a stub
/// so its descendants remain attached. Replies whose parent is not in
/// `replies` are unreachable and never appear. Ties keep input order.
pub fn arrange(replies: &[Reply], viewer: Option<&Viewer>) -> Vec<ThreadedReply> {
  let mut children: HashMap<Option<Uuid>, Vec<usize>> = HashMap::new();
  for (idx, reply) in replies.iter().enumerate() {
    children.entry(reply.parent_reply_id).or_default().push(idx);
  }
  for group in children.values_mut() {
    group.sort_by(|&a, &b| sibling_order(&replies[a], &replies[b]));
  }

  let mut ordered = Vec::with_capacity(replies.len());
  let Some(roots) = children.get(&None) else {
    return ordered;
  };

  // Each frame is a sibling group and the position of its next node; the
  // stack depth is the indent level of that group.
  let mut stack: Vec<(&[usize], usize)> = vec![(roots.as_slice(), 0)];

  while let Some((group, pos)) = stack.last_mut() {
    let Some(&idx) = group.get(*pos) else {
      stack.pop();
      continue;
    };
    *pos += 1;

    let node = &replies[idx];
    let kids = children.get(&Some(node.reply_id)).filter(|k| !k.is_empty());

    if node.is_gone() && kids.is_none() && hidden_from(node, viewer) {
      continue;
    }

    ordered.push(ThreadedReply { reply: node.clone(), indent_level: stack.len() });

    if let Some(kids) = kids {
      stack.push((kids.as_slice(), 0));
    }
  }

  ordered
}

#[cfg(test)]
mod tests {
  use chrono::{TimeZone, Utc};

  use super::*;
  use crate::score::confidence;

  fn reply(parent: Option<&Reply>, up: u32, down: u32) -> Reply {
    Reply {
      reply_id:        Uuid::new_v4(),
      submission_id:   Uuid::nil(),
      parent_reply_id: parent.map(|p| p.reply_id),
      author_id:       Uuid::new_v4(),
      created_at:      Utc.timestamp_opt(0, 0).unwrap(),
      upvotes:         up,
      downvotes:       down,
      confidence:      confidence(up, down),
      is_deleted:      false,
      is_moderated:    false,
    }
  }

  fn ids(view: &[ThreadedReply]) -> Vec<(Uuid, usize)> {
    view.iter().map(|t| (t.reply.reply_id, t.indent_level)).collect()
  }

  #[test]
  fn negative_scores_sink_and_dead_leaves_drop() {
    let a = reply(None, 3, 0);
    let b = reply(Some(&a), 0, 1);
    let mut c = reply(Some(&a), 2, 0);
    c.is_deleted = true;

    let replies = vec![a.clone(), b.clone(), c.clone()];
    let view = arrange(&replies, Some(&Viewer::new(Uuid::new_v4())));

    assert_eq!(ids(&view), vec![(a.reply_id, 1), (b.reply_id, 2)]);
  }

  #[test]
  fn author_and_moderator_see_their_deleted_leaf() {
    let a = reply(None, 3, 0);
    let mut c = reply(Some(&a), 2, 0);
    c.is_deleted = true;
    let replies = vec![a.clone(), c.clone()];

    let anon = arrange(&replies, None);
    assert_eq!(anon.len(), 1);

    let author = arrange(&replies, Some(&Viewer::new(c.author_id)));
    assert_eq!(ids(&author), vec![(a.reply_id, 1), (c.reply_id, 2)]);

    let moderator = arrange(&replies, Some(&Viewer::moderator(Uuid::new_v4())));
    assert_eq!(moderator.len(), 2);
  }

  #[test]
  fn gone_reply_with_children_stays_as_stub() {
    let mut a = reply(None, 1, 0);
    a.is_moderated = true;
    let b = reply(Some(&a), 1, 0);
    let replies = vec![b.clone(), a.clone()];

    let view = arrange(&replies, None);
    assert_eq!(ids(&view), vec![(a.reply_id, 1), (b.reply_id, 2)]);
  }

  #[test]
  fn siblings_sort_by_confidence() {
    let low = reply(None, 1, 0);
    let high = reply(None, 20, 1);
    let sunk = reply(None, 0, 3);
    let replies = vec![sunk.clone(), low.clone(), high.clone()];

    let view = arrange(&replies, None);
    assert_eq!(
      ids(&view),
      vec![(high.reply_id, 1), (low.reply_id, 1), (sunk.reply_id, 1)]
    );
  }

  #[test]
  fn depth_first_with_climb_back_out() {
    // a ─ a1 ─ a11
    //   └ a2
    // b
    let a = reply(None, 10, 0);
    let b = reply(None, 5, 0);
    let a1 = reply(Some(&a), 8, 0);
    let a2 = reply(Some(&a), 2, 0);
    let a11 = reply(Some(&a1), 1, 0);
    let replies =
      vec![b.clone(), a11.clone(), a2.clone(), a.clone(), a1.clone()];

    let view = arrange(&replies, None);
    assert_eq!(
      ids(&view),
      vec![
        (a.reply_id, 1),
        (a1.reply_id, 2),
        (a11.reply_id, 3),
        (a2.reply_id, 2),
        (b.reply_id, 1),
      ]
    );
  }

  #[test]
  fn pruning_does_not_cascade_upwards() {
    // A deleted parent whose only child is itself a dropped leaf still
    // counts as having children, matching the stub rule.
    let mut a = reply(None, 1, 0);
    a.is_deleted = true;
    let mut b = reply(Some(&a), 1, 0);
    b.is_deleted = true;

    let view = arrange(&[a.clone(), b], None);
    assert_eq!(ids(&view), vec![(a.reply_id, 1)]);
  }

  #[test]
  fn orphans_are_unreachable() {
    let ghost = reply(None, 1, 0);
    let orphan = reply(Some(&ghost), 1, 0);
    assert!(arrange(&[orphan], None).is_empty());
  }

  #[test]
  fn deep_threads_do_not_overflow() {
    let mut chain = vec![reply(None, 1, 0)];
    for _ in 0..100_000 {
      let next = reply(chain.last(), 1, 0);
      chain.push(next);
    }
    let view = arrange(&chain, None);
    assert_eq!(view.len(), chain.len());
    assert_eq!(view.last().unwrap().indent_level, chain.len());
  }

  #[test]
  fn input_is_untouched() {
    let a = reply(None, 1, 0);
    let b = reply(None, 9, 0);
    let replies = vec![a.clone(), b.clone()];
    let _ = arrange(&replies, None);
    assert_eq!(replies[0].reply_id, a.reply_id);
    assert_eq!(replies[1].reply_id, b.reply_id);
  }
}
