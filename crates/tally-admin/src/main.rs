//! `tally`: maintenance binary for the Tally ranking engine.
//!
//! Reads `tally.toml` (or the path given with `--config`), opens the SQLite
//! store, and runs one command against it. The scheduler that keeps
//! hotness fresh runs `tally recompute --all`.
//!
//! ```text
//! tally recompute --all
//! tally recompute --submission 6f0c...
//! tally vote --voter 1d2e... --reply 9a8b... down --reason T
//! tally thread 6f0c... --viewer 1d2e...
//! ```

mod settings;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, bail};
use chrono::Utc;
use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use settings::AdminConfig;
use tally_core::{
  eligibility::{Candidate, check_vote},
  store::VoteStore,
  user::Viewer,
  vote::{VoteReason, VoteTarget, VoteValue},
};
use tally_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "tally", author, version, about = "Tally ranking engine maintenance")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "tally.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Recompute stored confidence and hotness values.
  Recompute(RecomputeArgs),

  /// Cast, change, or retract a vote.
  Vote(VoteArgs),

  /// Print a submission's reply thread as JSON lines.
  Thread {
    submission: Uuid,

    /// Render as this user would see it.
    #[arg(long)]
    viewer: Option<Uuid>,
  },
}

#[derive(Args)]
#[command(group(
  ArgGroup::new("target").required(true).args(["all", "submission", "reply"]),
))]
struct RecomputeArgs {
  /// Every submission and reply.
  #[arg(long)]
  all: bool,

  #[arg(long)]
  submission: Option<Uuid>,

  #[arg(long)]
  reply: Option<Uuid>,
}

#[derive(Args)]
#[command(group(
  ArgGroup::new("target").required(true).args(["submission", "reply"]),
))]
struct VoteArgs {
  #[arg(long)]
  voter: Uuid,

  #[arg(long)]
  submission: Option<Uuid>,

  #[arg(long)]
  reply: Option<Uuid>,

  #[arg(value_enum)]
  value: ValueArg,

  /// One-letter reason code; required for downvotes.
  #[arg(long)]
  reason: Option<char>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ValueArg {
  Up,
  Down,
  Neutral,
}

impl From<ValueArg> for VoteValue {
  fn from(v: ValueArg) -> Self {
    match v {
      ValueArg::Up => VoteValue::Up,
      ValueArg::Down => VoteValue::Down,
      ValueArg::Neutral => VoteValue::Neutral,
    }
  }
}

/// The single target an argument group resolved to.
fn target_of(submission: Option<Uuid>, reply: Option<Uuid>) -> anyhow::Result<VoteTarget> {
  match (submission, reply) {
    (Some(id), None) => Ok(VoteTarget::Submission(id)),
    (None, Some(id)) => Ok(VoteTarget::Reply(id)),
    _ => bail!("exactly one of --submission or --reply is required"),
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("TALLY"))
    .build()
    .context("failed to read config file")?;

  let cfg: AdminConfig = settings
    .try_deserialize()
    .context("failed to deserialise AdminConfig")?;

  let store_path = expand_tilde(&cfg.store_path);
  let store = SqliteStore::open_with(&store_path, cfg.store_options())
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  match cli.command {
    Command::Recompute(args) => recompute(&store, args).await,
    Command::Vote(args) => vote(&store, args).await,
    Command::Thread { submission, viewer } => thread(&store, submission, viewer).await,
  }
}

// ─── Commands ─────────────────────────────────────────────────────────────────

async fn recompute(store: &SqliteStore, args: RecomputeArgs) -> anyhow::Result<()> {
  if args.all {
    let count = store.recompute_all().await.context("batch recompute failed")?;
    println!("{count}");
    return Ok(());
  }

  let target = target_of(args.submission, args.reply)?;
  let value = store
    .recompute(target)
    .await
    .with_context(|| format!("failed to recompute {target:?}"))?;
  println!("{value}");
  Ok(())
}

async fn vote(store: &SqliteStore, args: VoteArgs) -> anyhow::Result<()> {
  let target = target_of(args.submission, args.reply)?;
  let value = VoteValue::from(args.value);
  let reason = args
    .reason
    .map(|c| {
      VoteReason::from_code(c.to_ascii_uppercase())
        .with_context(|| format!("unknown reason code {c:?}"))
    })
    .transpose()?;

  let rejection = match target {
    VoteTarget::Submission(id) => {
      let s = store
        .get_submission(id)
        .await?
        .with_context(|| format!("submission {id} not found"))?;
      check_vote(args.voter, Candidate::Submission(&s), value, reason, Utc::now())
    }
    VoteTarget::Reply(id) => {
      let r = store
        .get_reply(id)
        .await?
        .with_context(|| format!("reply {id} not found"))?;
      check_vote(args.voter, Candidate::Reply(&r), value, reason, Utc::now())
    }
  };
  rejection.context("vote rejected")?;

  // Upvotes and retractions carry no reason.
  let reason = reason.filter(|_| value == VoteValue::Down);
  let delta = store
    .cast_vote(args.voter, target, value, reason)
    .await
    .context("failed to cast vote")?;
  println!("{}", serde_json::to_string(&delta)?);
  Ok(())
}

async fn thread(store: &SqliteStore, submission: Uuid, viewer: Option<Uuid>) -> anyhow::Result<()> {
  let viewer = match viewer {
    Some(id) => {
      let user = store
        .get_user(id)
        .await?
        .with_context(|| format!("user {id} not found"))?;
      Some(Viewer::from(&user))
    }
    None => None,
  };

  let view = store
    .build_reply_view(viewer, submission)
    .await
    .with_context(|| format!("failed to build thread for {submission}"))?;
  for line in &view {
    println!("{}", serde_json::to_string(line)?);
  }
  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
