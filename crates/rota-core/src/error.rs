//! Error types for `rota-core`.
//!
//! One closed enum covers every failure a workflow operation can return.
//! Callers match exhaustively; transport adapters translate via
//! [`Error::code`] instead of parsing messages.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  /// A required input field is empty or malformed. Raised before any I/O.
  #[error("invalid request: {0}")]
  Validation(String),

  #[error("user not found: {0}")]
  UserNotFound(String),

  #[error("team not found: {0}")]
  TeamNotFound(String),

  #[error("pull request not found: {0}")]
  PullRequestNotFound(String),

  #[error("pull request already exists: {0}")]
  PullRequestExists(String),

  #[error("team already exists: {0}")]
  TeamExists(String),

  #[error("user already exists: {0}")]
  UserExists(String),

  #[error("pull request {0} is already merged")]
  AlreadyMerged(String),

  #[error("user {user_id} is not an assigned reviewer of pull request {pull_request_id}")]
  NotAssigned {
    pull_request_id: String,
    user_id:         String,
  },

  #[error("no eligible replacement reviewer for pull request {0}")]
  NoCandidate(String),

  /// A storage-layer failure not attributable to caller input.
  #[error("storage error: {0}")]
  Storage(String),
}

impl Error {
  /// Shorthand for [`Error::Validation`].
  pub fn validation(msg: impl Into<String>) -> Self {
    Self::Validation(msg.into())
  }

  /// Wrap a storage failure. Only the rendered message survives; callers
  /// never branch on its contents.
  pub fn storage(err: impl std::fmt::Display) -> Self {
    Self::Storage(err.to_string())
  }

  /// Stable caller-visible code for this error kind. These strings are part
  /// of the wire contract and never change.
  pub fn code(&self) -> &'static str {
    match self {
      Self::Validation(_) => "VALIDATION",
      Self::UserNotFound(_)
      | Self::TeamNotFound(_)
      | Self::PullRequestNotFound(_) => "NOT_FOUND",
      Self::PullRequestExists(_) => "PR_EXISTS",
      Self::TeamExists(_) => "TEAM_EXISTS",
      Self::UserExists(_) => "USER_EXISTS",
      Self::AlreadyMerged(_) => "PR_MERGED",
      Self::NotAssigned { .. } => "NOT_ASSIGNED",
      Self::NoCandidate(_) => "NO_CANDIDATE",
      Self::Storage(_) => "INTERNAL",
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
