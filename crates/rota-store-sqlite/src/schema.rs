//! SQL schema for the Rota SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! the `PRAGMA user_version` number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS teams (
    id         INTEGER PRIMARY KEY,
    team_name  TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL
);

-- Membership is derived from users.team_name; there is no member table.
CREATE TABLE IF NOT EXISTS users (
    id         INTEGER PRIMARY KEY,
    user_id    TEXT NOT NULL UNIQUE,
    username   TEXT NOT NULL,
    team_name  TEXT NOT NULL REFERENCES teams(team_name),
    is_active  INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL,       -- RFC 3339 UTC; store-assigned
    updated_at TEXT NOT NULL
);

-- author_id and the reviewer columns are plain text on purpose: a pull
-- request outlives any later changes to its author's row.
CREATE TABLE IF NOT EXISTS pull_requests (
    id              INTEGER PRIMARY KEY,
    pull_request_id TEXT NOT NULL UNIQUE,
    title           TEXT NOT NULL,
    author_id       TEXT NOT NULL,
    status          TEXT NOT NULL DEFAULT 'OPEN',   -- 'OPEN' | 'MERGED'
    reviewer_first  TEXT,
    reviewer_second TEXT,
    created_at      TEXT NOT NULL,
    updated_at      TEXT NOT NULL,
    merged_at       TEXT
);

CREATE INDEX IF NOT EXISTS users_team_idx ON users(team_name);
CREATE INDEX IF NOT EXISTS prs_reviewer_first_idx
    ON pull_requests(reviewer_first);
CREATE INDEX IF NOT EXISTS prs_reviewer_second_idx
    ON pull_requests(reviewer_second);

PRAGMA user_version = 1;
";
