//! Handlers for `/users` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/users/setIsActive` | Body: `{"user_id":"...","is_active":bool}` |
//! | `GET`  | `/users/getReview` | `?user_id=` required; 404 if unknown |

use axum::{
  Json,
  extract::{Query, State},
};
use rota_core::{store::ReviewStore, team::User};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError, pull_requests::PullRequestShortBody};

// ─── Set activity ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SetActiveBody {
  pub user_id:   String,
  pub is_active: bool,
}

/// User JSON as returned by `/users/setIsActive`.
#[derive(Debug, Serialize)]
pub struct UserBody {
  pub user_id:   String,
  pub username:  String,
  pub team_name: String,
  pub is_active: bool,
}

impl From<User> for UserBody {
  fn from(u: User) -> Self {
    Self {
      user_id:   u.user_id,
      username:  u.username,
      team_name: u.team_name,
      is_active: u.is_active,
    }
  }
}

/// `POST /users/setIsActive` with body `{"user_id":"u1","is_active":false}`.
pub async fn set_is_active<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<SetActiveBody>,
) -> Result<Json<UserBody>, ApiError>
where
  S: ReviewStore,
{
  let user = state
    .users
    .set_user_active(body.user_id, body.is_active)
    .await?;
  Ok(Json(UserBody::from(user)))
}

// ─── Review queue ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ReviewParams {
  pub user_id: String,
}

/// Response envelope of `/users/getReview`.
#[derive(Debug, Serialize)]
pub struct ReviewQueueBody {
  pub user_id:       String,
  pub pull_requests: Vec<PullRequestShortBody>,
}

/// `GET /users/getReview?user_id=<id>`. The user's review queue, newest
/// first. MERGED entries stay listed as history.
pub async fn get_review<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ReviewParams>,
) -> Result<Json<ReviewQueueBody>, ApiError>
where
  S: ReviewStore,
{
  let user_id = params.user_id;
  let prs = state.reviews.review_requests(user_id.clone()).await?;
  Ok(Json(ReviewQueueBody {
    user_id,
    pull_requests: prs.into_iter().map(PullRequestShortBody::from).collect(),
  }))
}
