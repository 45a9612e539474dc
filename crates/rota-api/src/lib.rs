//! JSON REST API for the review rotation service.
//!
//! Exposes an axum [`Router`] backed by any [`rota_core::store::ReviewStore`].
//! Auth, TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! axum::serve(listener, rota_api::api_router(state)).await?;
//! ```

pub mod error;
pub mod pull_requests;
pub mod teams;
pub mod users;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use rota_core::{
  assign::Sampler,
  store::ReviewStore,
  workflow::{ReviewWorkflow, TeamWorkflow, UserWorkflow},
};

pub use error::ApiError;

// ─── Application state ───────────────────────────────────────────────────────

/// Workflow handles threaded through all axum handlers.
pub struct AppState<S> {
  pub reviews: ReviewWorkflow<S>,
  pub teams:   TeamWorkflow<S>,
  pub users:   UserWorkflow<S>,
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      reviews: self.reviews.clone(),
      teams:   self.teams.clone(),
      users:   self.users.clone(),
    }
  }
}

impl<S: ReviewStore> AppState<S> {
  /// Bundle the three workflows over one shared store.
  pub fn new(store: Arc<S>, sampler: Arc<dyn Sampler>) -> Self {
    Self {
      reviews: ReviewWorkflow::new(Arc::clone(&store), sampler),
      teams:   TeamWorkflow::new(Arc::clone(&store)),
      users:   UserWorkflow::new(store),
    }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: ReviewStore + 'static,
{
  Router::new()
    // Teams
    .route("/team/add", post(teams::create::<S>))
    .route("/team/get", get(teams::get_one::<S>))
    // Users
    .route("/users/setIsActive", post(users::set_is_active::<S>))
    .route("/users/getReview", get(users::get_review::<S>))
    // Pull requests
    .route("/pullRequest/create", post(pull_requests::create::<S>))
    .route("/pullRequest/merge", post(pull_requests::merge::<S>))
    .route("/pullRequest/reassign", post(pull_requests::reassign::<S>))
    .with_state(state)
}

// ─── Router tests ────────────────────────────────────────────────────────────
