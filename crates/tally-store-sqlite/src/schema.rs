//! SQL schema for the Tally SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    user_id      TEXT PRIMARY KEY,
    username     TEXT NOT NULL UNIQUE,
    created_at   TEXT NOT NULL,
    is_moderator INTEGER NOT NULL DEFAULT 0,
    karma        INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS tags (
    name        TEXT PRIMARY KEY,
    hotness_mod REAL NOT NULL DEFAULT 0,
    CHECK (hotness_mod BETWEEN -10 AND 10)
);

-- Counters and hotness are written only by the vote and recompute paths.
CREATE TABLE IF NOT EXISTS submissions (
    submission_id      TEXT PRIMARY KEY,
    author_id          TEXT NOT NULL REFERENCES users(user_id),
    created_at         TEXT NOT NULL,   -- RFC 3339 UTC, microsecond precision
    url                TEXT,
    user_is_author     INTEGER NOT NULL DEFAULT 0,
    upvotes            INTEGER NOT NULL DEFAULT 0,
    downvotes          INTEGER NOT NULL DEFAULT 0,
    hotness            REAL    NOT NULL DEFAULT 0,
    merged_into        TEXT REFERENCES submissions(submission_id) ON DELETE SET NULL,
    reply_points_cache REAL,            -- NULL once invalidated by a reply vote
    reply_count        INTEGER NOT NULL DEFAULT 0,
    CHECK (upvotes >= 0 AND downvotes >= 0 AND reply_count >= 0),
    CHECK (merged_into IS NULL OR merged_into != submission_id)
);

CREATE TABLE IF NOT EXISTS taggings (
    submission_id TEXT NOT NULL REFERENCES submissions(submission_id),
    tag_name      TEXT NOT NULL REFERENCES tags(name),
    PRIMARY KEY (submission_id, tag_name)
);

CREATE TABLE IF NOT EXISTS replies (
    reply_id        TEXT PRIMARY KEY,
    submission_id   TEXT NOT NULL REFERENCES submissions(submission_id),
    parent_reply_id TEXT REFERENCES replies(reply_id),
    author_id       TEXT NOT NULL REFERENCES users(user_id),
    created_at      TEXT NOT NULL,
    upvotes         INTEGER NOT NULL DEFAULT 0,
    downvotes       INTEGER NOT NULL DEFAULT 0,
    confidence      REAL    NOT NULL DEFAULT 0,
    is_deleted      INTEGER NOT NULL DEFAULT 0,
    is_moderated    INTEGER NOT NULL DEFAULT 0,
    CHECK (upvotes >= 0 AND downvotes >= 0)
);

-- One live row per (voter, target). A retracted vote is deleted, never
-- stored as zero.
CREATE TABLE IF NOT EXISTS votes (
    voter_id      TEXT NOT NULL REFERENCES users(user_id),
    target_kind   TEXT NOT NULL,   -- 'submission' | 'reply'
    target_id     TEXT NOT NULL,
    submission_id TEXT NOT NULL REFERENCES submissions(submission_id),
    value         INTEGER NOT NULL,
    reason        TEXT,            -- one-character reason code
    updated_at    TEXT NOT NULL,
    PRIMARY KEY (voter_id, target_kind, target_id),
    CHECK (value IN (-1, 1))
);

CREATE INDEX IF NOT EXISTS submissions_merged_idx  ON submissions(merged_into);
CREATE INDEX IF NOT EXISTS submissions_hotness_idx ON submissions(hotness);
CREATE INDEX IF NOT EXISTS replies_submission_idx  ON replies(submission_id);
CREATE INDEX IF NOT EXISTS votes_submission_idx    ON votes(voter_id, submission_id);

PRAGMA user_version = 1;
";
