//! The persistence contract: [`UnitOfWork`] and [`ReviewStore`].
//!
//! Workflows never talk to a database directly. Each operation hands a
//! closure to [`ReviewStore::run`]; the closure performs every read and
//! write through the [`UnitOfWork`] handle it receives, and the store
//! commits on `Ok` or rolls back on `Err`. The handle exists only inside
//! `run`, so no code path can touch the store outside a transaction.

use std::future::Future;

use crate::{
  Result,
  pull_request::{NewPullRequest, PullRequest, ReviewerSlots},
  team::{NewUser, User},
};

// ─── Unit of work ────────────────────────────────────────────────────────────

/// One atomic transaction's view of the store.
///
/// "Row absent" is expressed as `Ok(None)` or an empty `Vec`, never as an
/// error; the workflow maps absence to the precise not-found kind itself.
/// Implementations reserve [`Error::Storage`](crate::Error::Storage) for
/// real storage failures, so no SQL error ever masquerades as a domain
/// error.
pub trait UnitOfWork {
  // ── Users ─────────────────────────────────────────────────────────────

  fn user(&mut self, user_id: &str) -> Result<Option<User>>;

  fn insert_user(&mut self, user: NewUser) -> Result<User>;

  /// Flip the activity flag and refresh `updated_at`. Callers confirm the
  /// user exists earlier in the same transaction.
  fn set_user_active(
    &mut self,
    user_id: &str,
    is_active: bool,
  ) -> Result<User>;

  fn users_by_team(&mut self, team_name: &str) -> Result<Vec<User>>;

  // ── Teams ─────────────────────────────────────────────────────────────

  fn team_exists(&mut self, team_name: &str) -> Result<bool>;

  fn insert_team(&mut self, team_name: &str) -> Result<()>;

  // ── Pull requests ─────────────────────────────────────────────────────

  fn pull_request(
    &mut self,
    pull_request_id: &str,
  ) -> Result<Option<PullRequest>>;

  fn insert_pull_request(&mut self, pr: NewPullRequest) -> Result<PullRequest>;

  /// Set status MERGED and stamp `merged_at` and `updated_at`.
  fn set_merged(&mut self, pull_request_id: &str) -> Result<PullRequest>;

  /// Overwrite both reviewer slots and refresh `updated_at`.
  fn set_reviewers(
    &mut self,
    pull_request_id: &str,
    reviewers: &ReviewerSlots,
  ) -> Result<PullRequest>;

  /// Every pull request where `user_id` occupies either slot, regardless of
  /// status, newest `created_at` first.
  fn pull_requests_reviewed_by(
    &mut self,
    user_id: &str,
  ) -> Result<Vec<PullRequest>>;
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// Abstraction over a transactional backend.
///
/// The returned future is `Send` so the trait composes with multi-threaded
/// async runtimes; the closure itself runs wherever the backend executes
/// transactions (for the SQLite backend, a dedicated connection thread).
pub trait ReviewStore: Send + Sync {
  /// Execute `op` inside one unit of work: commit if it returns `Ok`, roll
  /// back if it returns `Err`. Validation and state-conflict errors roll
  /// back too, so no partial state survives any failure.
  fn run<T, F>(&self, op: F) -> impl Future<Output = Result<T>> + Send + '_
  where
    T: Send + 'static,
    F: FnOnce(&mut dyn UnitOfWork) -> Result<T> + Send + 'static;
}
