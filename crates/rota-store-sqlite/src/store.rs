//! [`SqliteStore`], the SQLite implementation of [`ReviewStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use rota_core::{
  Error, Result,
  pull_request::{NewPullRequest, PrStatus, PullRequest, ReviewerSlots},
  store::{ReviewStore, UnitOfWork},
  team::{NewUser, User},
};

use crate::{
  encode::{RawPullRequest, RawUser, encode_dt},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A review store backed by a single SQLite file.
///
/// Cloning is cheap: the inner connection is reference-counted, and every
/// clone shares the one worker thread that serializes all units of work.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> crate::Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> crate::Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> crate::Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── ReviewStore impl ────────────────────────────────────────────────────────

impl ReviewStore for SqliteStore {
  async fn run<T, F>(&self, op: F) -> Result<T>
  where
    T: Send + 'static,
    F: FnOnce(&mut dyn UnitOfWork) -> Result<T> + Send + 'static,
  {
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let outcome = {
          let mut uow = SqliteUnitOfWork { tx: &tx };
          op(&mut uow)
        };
        // Domain errors ride inside Ok so the rollback below still runs
        // before they surface.
        match outcome {
          Ok(value) => {
            tx.commit()?;
            Ok(Ok(value))
          }
          Err(err) => {
            tx.rollback()?;
            Ok(Err(err))
          }
        }
      })
      .await
      .map_err(Error::storage)?
  }
}

// ─── Unit of work ────────────────────────────────────────────────────────────

/// A [`UnitOfWork`] bound to one open transaction.
struct SqliteUnitOfWork<'a> {
  tx: &'a rusqlite::Transaction<'a>,
}

impl UnitOfWork for SqliteUnitOfWork<'_> {
  // ── Users ─────────────────────────────────────────────────────────────

  fn user(&mut self, user_id: &str) -> Result<Option<User>> {
    self
      .tx
      .query_row(
        "SELECT user_id, username, team_name, is_active, created_at, updated_at
           FROM users WHERE user_id = ?1",
        rusqlite::params![user_id],
        RawUser::from_row,
      )
      .optional()
      .map_err(Error::storage)?
      .map(RawUser::into_user)
      .transpose()
  }

  fn insert_user(&mut self, user: NewUser) -> Result<User> {
    let now = Utc::now();
    self
      .tx
      .execute(
        "INSERT INTO users (user_id, username, team_name, is_active, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        rusqlite::params![
          user.user_id,
          user.username,
          user.team_name,
          user.is_active,
          encode_dt(now),
          encode_dt(now),
        ],
      )
      .map_err(Error::storage)?;

    Ok(User {
      user_id:    user.user_id,
      username:   user.username,
      team_name:  user.team_name,
      is_active:  user.is_active,
      created_at: now,
      updated_at: now,
    })
  }

  fn set_user_active(
    &mut self,
    user_id: &str,
    is_active: bool,
  ) -> Result<User> {
    self
      .tx
      .execute(
        "UPDATE users SET is_active = ?1, updated_at = ?2 WHERE user_id = ?3",
        rusqlite::params![is_active, encode_dt(Utc::now()), user_id],
      )
      .map_err(Error::storage)?;

    self
      .user(user_id)?
      .ok_or_else(|| Error::UserNotFound(user_id.to_owned()))
  }

  fn users_by_team(&mut self, team_name: &str) -> Result<Vec<User>> {
    let mut stmt = self
      .tx
      .prepare(
        "SELECT user_id, username, team_name, is_active, created_at, updated_at
           FROM users WHERE team_name = ?1 ORDER BY id",
      )
      .map_err(Error::storage)?;

    let raws: Vec<RawUser> = stmt
      .query_map(rusqlite::params![team_name], RawUser::from_row)
      .map_err(Error::storage)?
      .collect::<rusqlite::Result<Vec<_>>>()
      .map_err(Error::storage)?;

    raws.into_iter().map(RawUser::into_user).collect()
  }

  // ── Teams ─────────────────────────────────────────────────────────────

  fn team_exists(&mut self, team_name: &str) -> Result<bool> {
    self
      .tx
      .query_row(
        "SELECT EXISTS(SELECT 1 FROM teams WHERE team_name = ?1)",
        rusqlite::params![team_name],
        |row| row.get(0),
      )
      .map_err(Error::storage)
  }

  fn insert_team(&mut self, team_name: &str) -> Result<()> {
    self
      .tx
      .execute(
        "INSERT INTO teams (team_name, created_at) VALUES (?1, ?2)",
        rusqlite::params![team_name, encode_dt(Utc::now())],
      )
      .map_err(Error::storage)?;
    Ok(())
  }

  // ── Pull requests ─────────────────────────────────────────────────────

  fn pull_request(
    &mut self,
    pull_request_id: &str,
  ) -> Result<Option<PullRequest>> {
    self
      .tx
      .query_row(
        "SELECT pull_request_id, title, author_id, status,
                reviewer_first, reviewer_second,
                created_at, updated_at, merged_at
           FROM pull_requests WHERE pull_request_id = ?1",
        rusqlite::params![pull_request_id],
        RawPullRequest::from_row,
      )
      .optional()
      .map_err(Error::storage)?
      .map(RawPullRequest::into_pull_request)
      .transpose()
  }

  fn insert_pull_request(&mut self, pr: NewPullRequest) -> Result<PullRequest> {
    let now = Utc::now();
    self
      .tx
      .execute(
        "INSERT INTO pull_requests (
           pull_request_id, title, author_id, status,
           reviewer_first, reviewer_second, created_at, updated_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        rusqlite::params![
          pr.pull_request_id,
          pr.title,
          pr.author_id,
          PrStatus::Open.as_str(),
          pr.reviewers.first,
          pr.reviewers.second,
          encode_dt(now),
          encode_dt(now),
        ],
      )
      .map_err(Error::storage)?;

    Ok(PullRequest {
      pull_request_id: pr.pull_request_id,
      title: pr.title,
      author_id: pr.author_id,
      status: PrStatus::Open,
      reviewers: pr.reviewers,
      created_at: now,
      updated_at: now,
      merged_at: None,
    })
  }

  fn set_merged(&mut self, pull_request_id: &str) -> Result<PullRequest> {
    let now = encode_dt(Utc::now());
    self
      .tx
      .execute(
        "UPDATE pull_requests SET status = ?1, merged_at = ?2, updated_at = ?2
          WHERE pull_request_id = ?3",
        rusqlite::params![PrStatus::Merged.as_str(), now, pull_request_id],
      )
      .map_err(Error::storage)?;

    self
      .pull_request(pull_request_id)?
      .ok_or_else(|| Error::PullRequestNotFound(pull_request_id.to_owned()))
  }

  fn set_reviewers(
    &mut self,
    pull_request_id: &str,
    reviewers: &ReviewerSlots,
  ) -> Result<PullRequest> {
    self
      .tx
      .execute(
        "UPDATE pull_requests
            SET reviewer_first = ?1, reviewer_second = ?2, updated_at = ?3
          WHERE pull_request_id = ?4",
        rusqlite::params![
          reviewers.first,
          reviewers.second,
          encode_dt(Utc::now()),
          pull_request_id,
        ],
      )
      .map_err(Error::storage)?;

    self
      .pull_request(pull_request_id)?
      .ok_or_else(|| Error::PullRequestNotFound(pull_request_id.to_owned()))
  }

  fn pull_requests_reviewed_by(
    &mut self,
    user_id: &str,
  ) -> Result<Vec<PullRequest>> {
    let mut stmt = self
      .tx
      .prepare(
        "SELECT pull_request_id, title, author_id, status,
                reviewer_first, reviewer_second,
                created_at, updated_at, merged_at
           FROM pull_requests
          WHERE reviewer_first = ?1 OR reviewer_second = ?1
          ORDER BY created_at DESC, id DESC",
      )
      .map_err(Error::storage)?;

    let raws: Vec<RawPullRequest> = stmt
      .query_map(rusqlite::params![user_id], RawPullRequest::from_row)
      .map_err(Error::storage)?
      .collect::<rusqlite::Result<Vec<_>>>()
      .map_err(Error::storage)?;

    raws
      .into_iter()
      .map(RawPullRequest::into_pull_request)
      .collect()
  }
}
