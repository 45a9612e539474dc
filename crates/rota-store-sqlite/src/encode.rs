//! Encoding and decoding between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, the status as its wire
//! string, empty reviewer slots as NULL. Decode failures are storage
//! failures: a row that does not parse means the database is corrupt, so
//! everything here reports [`rota_core::Error::Storage`].

use chrono::{DateTime, Utc};
use rota_core::{
  Error, Result,
  pull_request::{PrStatus, PullRequest, ReviewerSlots},
  team::User,
};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339()
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::storage(format!("bad timestamp {s:?}: {e}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw column values of a `users` row.
pub struct RawUser {
  pub user_id:    String,
  pub username:   String,
  pub team_name:  String,
  pub is_active:  bool,
  pub created_at: String,
  pub updated_at: String,
}

impl RawUser {
  /// Column order must match the SELECT lists in `store.rs`.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      user_id:    row.get(0)?,
      username:   row.get(1)?,
      team_name:  row.get(2)?,
      is_active:  row.get(3)?,
      created_at: row.get(4)?,
      updated_at: row.get(5)?,
    })
  }

  pub fn into_user(self) -> Result<User> {
    Ok(User {
      user_id:    self.user_id,
      username:   self.username,
      team_name:  self.team_name,
      is_active:  self.is_active,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw column values of a `pull_requests` row.
pub struct RawPullRequest {
  pub pull_request_id: String,
  pub title:           String,
  pub author_id:       String,
  pub status:          String,
  pub reviewer_first:  Option<String>,
  pub reviewer_second: Option<String>,
  pub created_at:      String,
  pub updated_at:      String,
  pub merged_at:       Option<String>,
}

impl RawPullRequest {
  /// Column order must match the SELECT lists in `store.rs`.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      pull_request_id: row.get(0)?,
      title:           row.get(1)?,
      author_id:       row.get(2)?,
      status:          row.get(3)?,
      reviewer_first:  row.get(4)?,
      reviewer_second: row.get(5)?,
      created_at:      row.get(6)?,
      updated_at:      row.get(7)?,
      merged_at:       row.get(8)?,
    })
  }

  pub fn into_pull_request(self) -> Result<PullRequest> {
    let status = PrStatus::parse(&self.status).ok_or_else(|| {
      Error::storage(format!("unknown status {:?}", self.status))
    })?;

    Ok(PullRequest {
      pull_request_id: self.pull_request_id,
      title: self.title,
      author_id: self.author_id,
      status,
      reviewers: ReviewerSlots {
        first:  self.reviewer_first,
        second: self.reviewer_second,
      },
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
      merged_at: self.merged_at.as_deref().map(decode_dt).transpose()?,
    })
  }
}
