//! Configuration for the `tally` binary.

use std::{path::PathBuf, time::Duration};

use serde::Deserialize;
use tally_store_sqlite::StoreOptions;

/// Loaded from the TOML file given with `--config`, overridden by
/// `TALLY_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
  #[serde(default = "default_store_path")]
  pub store_path:      PathBuf,
  /// How long a write waits for the database lock, in milliseconds.
  #[serde(default = "default_lock_timeout_ms")]
  pub lock_timeout_ms: u64,
}

fn default_store_path() -> PathBuf { PathBuf::from("tally.db") }

fn default_lock_timeout_ms() -> u64 { 5_000 }

impl AdminConfig {
  pub fn store_options(&self) -> StoreOptions {
    StoreOptions { lock_timeout: Duration::from_millis(self.lock_timeout_ms) }
  }
}
