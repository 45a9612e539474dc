//! Users and teams.
//!
//! A team is nothing more than a unique name. Membership is always derived
//! by joining over [`User::team_name`] at read time; there is no stored
//! member collection and no operation that moves a user between teams.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A member of a team who can author and review pull requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub user_id:    String,
  pub username:   String,
  pub team_name:  String,
  /// Inactive users are skipped by every assignment decision.
  pub is_active:  bool,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Input to [`crate::store::UnitOfWork::insert_user`].
/// Timestamps are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewUser {
  pub user_id:   String,
  pub username:  String,
  pub team_name: String,
  pub is_active: bool,
}

/// One entry of the member list submitted at team creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMember {
  pub user_id:   String,
  pub username:  String,
  pub is_active: bool,
}

/// A team together with a membership snapshot taken at read time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
  pub team_name: String,
  pub members:   Vec<User>,
}
