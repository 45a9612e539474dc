//! Handlers for `/pullRequest` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/pullRequest/create` | Body: [`CreateBody`]; returns 201 + PR JSON |
//! | `POST` | `/pullRequest/merge` | Idempotent; 404 if unknown |
//! | `POST` | `/pullRequest/reassign` | Returns `{"pr":...,"replaced_by":...}` |

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{DateTime, Utc};
use rota_core::{
  pull_request::{PrStatus, PullRequest},
  store::ReviewStore,
  workflow::Reassignment,
};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError};

// ─── Bodies ──────────────────────────────────────────────────────────────────

/// Full PR JSON. `assigned_reviewers` lists the occupied slots only, in
/// slot order; `merged_at` is omitted while the PR is OPEN.
#[derive(Debug, Serialize)]
pub struct PullRequestBody {
  pub pull_request_id:    String,
  pub pull_request_name:  String,
  pub author_id:          String,
  pub status:             PrStatus,
  pub assigned_reviewers: Vec<String>,
  pub created_at:         DateTime<Utc>,
  pub updated_at:         DateTime<Utc>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub merged_at:          Option<DateTime<Utc>>,
}

impl From<PullRequest> for PullRequestBody {
  fn from(pr: PullRequest) -> Self {
    let assigned_reviewers = pr
      .reviewers
      .assigned()
      .into_iter()
      .map(str::to_owned)
      .collect();
    Self {
      pull_request_id:    pr.pull_request_id,
      pull_request_name:  pr.title,
      author_id:          pr.author_id,
      status:             pr.status,
      assigned_reviewers,
      created_at:         pr.created_at,
      updated_at:         pr.updated_at,
      merged_at:          pr.merged_at,
    }
  }
}

/// Abbreviated PR JSON used in review queues.
#[derive(Debug, Serialize)]
pub struct PullRequestShortBody {
  pub pull_request_id:   String,
  pub pull_request_name: String,
  pub author_id:         String,
  pub status:            PrStatus,
}

impl From<PullRequest> for PullRequestShortBody {
  fn from(pr: PullRequest) -> Self {
    Self {
      pull_request_id:   pr.pull_request_id,
      pull_request_name: pr.title,
      author_id:         pr.author_id,
      status:            pr.status,
    }
  }
}

// ─── Create ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub pull_request_id:   String,
  pub pull_request_name: String,
  pub author_id:         String,
}

/// `POST /pullRequest/create`. Returns 201 plus the stored PR with its
/// auto-assigned reviewers.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ReviewStore,
{
  let pr = state
    .reviews
    .create_pull_request(
      body.pull_request_id,
      body.pull_request_name,
      body.author_id,
    )
    .await?;
  Ok((StatusCode::CREATED, Json(PullRequestBody::from(pr))))
}

// ─── Merge ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MergeBody {
  pub pull_request_id: String,
}

/// `POST /pullRequest/merge` with body `{"pull_request_id":"..."}`.
pub async fn merge<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<MergeBody>,
) -> Result<Json<PullRequestBody>, ApiError>
where
  S: ReviewStore,
{
  let pr = state.reviews.merge_pull_request(body.pull_request_id).await?;
  Ok(Json(PullRequestBody::from(pr)))
}

// ─── Reassign ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ReassignBody {
  pub pull_request_id: String,
  pub old_user_id:     String,
}

#[derive(Debug, Serialize)]
pub struct ReassignedBody {
  pub pr:          PullRequestBody,
  pub replaced_by: String,
}

impl From<Reassignment> for ReassignedBody {
  fn from(r: Reassignment) -> Self {
    Self {
      pr:          PullRequestBody::from(r.pull_request),
      replaced_by: r.replaced_by,
    }
  }
}

/// `POST /pullRequest/reassign`. Swaps `old_user_id` out of its slot for a
/// randomly chosen eligible teammate and reports who took the seat.
pub async fn reassign<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<ReassignBody>,
) -> Result<Json<ReassignedBody>, ApiError>
where
  S: ReviewStore,
{
  let outcome = state
    .reviews
    .reassign_reviewer(body.pull_request_id, body.old_user_id)
    .await?;
  Ok(Json(ReassignedBody::from(outcome)))
}
