//! Handlers for `/team` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/team/add` | Body: [`CreateBody`]; returns 201 + team JSON |
//! | `GET`  | `/team/get` | `?team_name=` required; 404 if not found |

use axum::{
  Json,
  extract::{Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use rota_core::{
  store::ReviewStore,
  team::{NewMember, Team, User},
};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError};

// ─── Bodies ──────────────────────────────────────────────────────────────────

/// A member as it appears inside team JSON, inbound and outbound alike.
/// An absent `is_active` on input reads as `false`.
#[derive(Debug, Serialize, Deserialize)]
pub struct MemberBody {
  pub user_id:   String,
  pub username:  String,
  #[serde(default)]
  pub is_active: bool,
}

impl From<User> for MemberBody {
  fn from(u: User) -> Self {
    Self {
      user_id:   u.user_id,
      username:  u.username,
      is_active: u.is_active,
    }
  }
}

impl From<MemberBody> for NewMember {
  fn from(m: MemberBody) -> Self {
    NewMember {
      user_id:   m.user_id,
      username:  m.username,
      is_active: m.is_active,
    }
  }
}

/// Team JSON: the name plus the full membership, in creation order.
#[derive(Debug, Serialize)]
pub struct TeamBody {
  pub team_name: String,
  pub members:   Vec<MemberBody>,
}

impl From<Team> for TeamBody {
  fn from(t: Team) -> Self {
    Self {
      team_name: t.team_name,
      members:   t.members.into_iter().map(MemberBody::from).collect(),
    }
  }
}

// ─── Create ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub team_name: String,
  #[serde(default)]
  pub members:   Vec<MemberBody>,
}

/// `POST /team/add` with body `{"team_name":"...","members":[...]}`.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ReviewStore,
{
  let members = body.members.into_iter().map(NewMember::from).collect();
  let team = state.teams.create_team(body.team_name, members).await?;
  Ok((StatusCode::CREATED, Json(TeamBody::from(team))))
}

// ─── Get one ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GetParams {
  pub team_name: String,
}

/// `GET /team/get?team_name=<name>`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<GetParams>,
) -> Result<Json<TeamBody>, ApiError>
where
  S: ReviewStore,
{
  let team = state.teams.get_team(params.team_name).await?;
  Ok(Json(TeamBody::from(team)))
}
