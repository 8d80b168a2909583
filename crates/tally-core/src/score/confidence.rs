//! Reply confidence: the lower bound of the Wilson score interval.
//!
//! Rewards many votes with a good ratio over a handful of unanimous ones.

/// z for an 80% one-sided bound.
pub const Z: f64 = 1.281551565545;

/// Confidence for a reply with `upvotes` and `downvotes`; 0 when unvoted.
pub fn confidence(upvotes: u32, downvotes: u32) -> f64 {
  let n = f64::from(upvotes) + f64::from(downvotes);
  if n == 0.0 {
    return 0.0;
  }

  let p = f64::from(upvotes) / n;
  let z2 = Z * Z;

  let centre = p + z2 / (2.0 * n);
  let spread = Z * (p * (1.0 - p) / n + z2 / (4.0 * n * n)).sqrt();
  let under = 1.0 + z2 / n;

  (centre - spread) / under
}
