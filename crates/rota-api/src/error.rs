//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use rota_core::Error;
use serde_json::json;

/// An error returned by an API handler.
///
/// Thin wrapper over [`rota_core::Error`], rendered as the envelope
/// `{"error":{"code":"...","message":"..."}}` with a status derived from
/// the error kind. The `code` strings come from [`rota_core::Error::code`]
/// and are stable; clients branch on them, never on messages.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub Error);

impl ApiError {
  fn status(&self) -> StatusCode {
    match &self.0 {
      Error::Validation(_) => StatusCode::BAD_REQUEST,
      Error::UserNotFound(_)
      | Error::TeamNotFound(_)
      | Error::PullRequestNotFound(_) => StatusCode::NOT_FOUND,
      Error::PullRequestExists(_)
      | Error::TeamExists(_)
      | Error::UserExists(_)
      | Error::AlreadyMerged(_)
      | Error::NotAssigned { .. }
      | Error::NoCandidate(_) => StatusCode::CONFLICT,
      Error::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let body = json!({
      "error": { "code": self.0.code(), "message": self.0.to_string() }
    });
    (status, Json(body)).into_response()
  }
}
