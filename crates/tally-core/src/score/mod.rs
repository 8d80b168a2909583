//! Derived scores: reply confidence and submission hotness.
//!
//! Both are pure functions of the counters and attributes handed to them, so
//! recomputing with unchanged inputs always yields the same stored value.

pub mod confidence;
pub mod hotness;

pub use confidence::confidence;
pub use hotness::{HOTNESS_WINDOW_SECS, HotnessInputs, hotness};
