//! Workflow orchestration over the persistence contract.
//!
//! Each operation validates its inputs before any I/O, then performs every
//! read and write inside exactly one [`ReviewStore::run`] call. Errors
//! raised inside the closure roll the whole transaction back, so no partial
//! state ever survives a failed operation.

use std::sync::Arc;

use crate::{
  Error, Result,
  assign::{self, Sampler},
  pull_request::{NewPullRequest, PrStatus, PullRequest},
  store::ReviewStore,
  team::{NewMember, NewUser, Team, User},
};

// ─── Review workflow ─────────────────────────────────────────────────────────

/// Result of [`ReviewWorkflow::reassign_reviewer`].
#[derive(Debug, Clone)]
pub struct Reassignment {
  pub pull_request: PullRequest,
  /// The user chosen for the vacated slot.
  pub replaced_by:  String,
}

/// Pull request lifecycle operations: create, merge, reassign, list.
pub struct ReviewWorkflow<S> {
  store:   Arc<S>,
  sampler: Arc<dyn Sampler>,
}

impl<S> Clone for ReviewWorkflow<S> {
  fn clone(&self) -> Self {
    Self {
      store:   Arc::clone(&self.store),
      sampler: Arc::clone(&self.sampler),
    }
  }
}

impl<S: ReviewStore> ReviewWorkflow<S> {
  pub fn new(store: Arc<S>, sampler: Arc<dyn Sampler>) -> Self {
    Self { store, sampler }
  }

  /// Create an OPEN pull request with up to two auto-assigned reviewers
  /// drawn from the author's team.
  pub async fn create_pull_request(
    &self,
    pull_request_id: String,
    title: String,
    author_id: String,
  ) -> Result<PullRequest> {
    if pull_request_id.is_empty() {
      return Err(Error::validation("pull_request_id is empty"));
    }
    if title.is_empty() {
      return Err(Error::validation("pull_request_name is empty"));
    }
    if author_id.is_empty() {
      return Err(Error::validation("author_id is empty"));
    }

    let sampler = Arc::clone(&self.sampler);
    self
      .store
      .run(move |uow| {
        if uow.pull_request(&pull_request_id)?.is_some() {
          return Err(Error::PullRequestExists(pull_request_id));
        }
        let author = uow
          .user(&author_id)?
          .ok_or_else(|| Error::UserNotFound(author_id.clone()))?;
        if !uow.team_exists(&author.team_name)? {
          return Err(Error::TeamNotFound(author.team_name));
        }
        let members = uow.users_by_team(&author.team_name)?;
        let reviewers =
          assign::select_initial(&author_id, &members, sampler.as_ref());
        uow.insert_pull_request(NewPullRequest {
          pull_request_id,
          title,
          author_id,
          reviewers,
        })
      })
      .await
  }

  /// Transition a pull request to MERGED and stamp `merged_at`.
  ///
  /// Merging an already-MERGED pull request is idempotent: the stored
  /// record comes back unchanged, `merged_at` included, so retries never
  /// move the merge timestamp.
  pub async fn merge_pull_request(
    &self,
    pull_request_id: String,
  ) -> Result<PullRequest> {
    if pull_request_id.is_empty() {
      return Err(Error::validation("pull_request_id is empty"));
    }

    self
      .store
      .run(move |uow| {
        let pr = uow
          .pull_request(&pull_request_id)?
          .ok_or_else(|| Error::PullRequestNotFound(pull_request_id.clone()))?;
        if pr.status == PrStatus::Merged {
          return Ok(pr);
        }
        uow.set_merged(&pull_request_id)
      })
      .await
  }

  /// Swap `old_user_id` out of the slot it occupies for a randomly chosen
  /// eligible teammate, leaving the other slot untouched.
  pub async fn reassign_reviewer(
    &self,
    pull_request_id: String,
    old_user_id: String,
  ) -> Result<Reassignment> {
    if pull_request_id.is_empty() {
      return Err(Error::validation("pull_request_id is empty"));
    }
    if old_user_id.is_empty() {
      return Err(Error::validation("old_user_id is empty"));
    }

    let sampler = Arc::clone(&self.sampler);
    self
      .store
      .run(move |uow| {
        let pr = uow
          .pull_request(&pull_request_id)?
          .ok_or_else(|| Error::PullRequestNotFound(pull_request_id.clone()))?;
        if pr.status == PrStatus::Merged {
          return Err(Error::AlreadyMerged(pull_request_id));
        }
        if !pr.reviewers.contains(&old_user_id) {
          return Err(Error::NotAssigned {
            pull_request_id,
            user_id: old_user_id,
          });
        }
        let author = uow
          .user(&pr.author_id)?
          .ok_or_else(|| Error::UserNotFound(pr.author_id.clone()))?;
        let members = uow.users_by_team(&author.team_name)?;

        let other = pr.reviewers.other_than(&old_user_id).map(str::to_owned);
        let replacement = assign::select_replacement(
          &pr.author_id,
          &old_user_id,
          other.as_deref(),
          &members,
          sampler.as_ref(),
        )
        .ok_or_else(|| Error::NoCandidate(pull_request_id.clone()))?;

        let mut reviewers = pr.reviewers;
        reviewers.replace(&old_user_id, replacement.clone());
        let updated = uow.set_reviewers(&pull_request_id, &reviewers)?;
        Ok(Reassignment {
          pull_request: updated,
          replaced_by:  replacement,
        })
      })
      .await
  }

  /// Every pull request where the user occupies a reviewer slot, newest
  /// first. MERGED pull requests stay listed as review history.
  pub async fn review_requests(
    &self,
    user_id: String,
  ) -> Result<Vec<PullRequest>> {
    if user_id.is_empty() {
      return Err(Error::validation("user_id is empty"));
    }

    self
      .store
      .run(move |uow| {
        if uow.user(&user_id)?.is_none() {
          return Err(Error::UserNotFound(user_id));
        }
        uow.pull_requests_reviewed_by(&user_id)
      })
      .await
  }
}

// ─── Team workflow ───────────────────────────────────────────────────────────

/// Team creation and retrieval.
pub struct TeamWorkflow<S> {
  store: Arc<S>,
}

impl<S> Clone for TeamWorkflow<S> {
  fn clone(&self) -> Self {
    Self {
      store: Arc::clone(&self.store),
    }
  }
}

impl<S: ReviewStore> TeamWorkflow<S> {
  pub fn new(store: Arc<S>) -> Self {
    Self { store }
  }

  /// Create a team and its initial members in one unit of work.
  ///
  /// Any already-taken member id (including a duplicate within the
  /// submitted list) fails the whole operation; neither the team nor any
  /// member survives the rollback.
  pub async fn create_team(
    &self,
    team_name: String,
    members: Vec<NewMember>,
  ) -> Result<Team> {
    if team_name.is_empty() {
      return Err(Error::validation("team_name is empty"));
    }
    if members.is_empty() {
      return Err(Error::validation("members is empty"));
    }
    if members.iter().any(|m| m.user_id.is_empty()) {
      return Err(Error::validation("member user_id is empty"));
    }

    self
      .store
      .run(move |uow| {
        if uow.team_exists(&team_name)? {
          return Err(Error::TeamExists(team_name));
        }
        uow.insert_team(&team_name)?;
        for member in members {
          if uow.user(&member.user_id)?.is_some() {
            return Err(Error::UserExists(member.user_id));
          }
          uow.insert_user(NewUser {
            user_id:   member.user_id,
            username:  member.username,
            team_name: team_name.clone(),
            is_active: member.is_active,
          })?;
        }
        // Read the membership back through the same transaction.
        let members = uow.users_by_team(&team_name)?;
        Ok(Team { team_name, members })
      })
      .await
  }

  /// Fetch a team with a current membership snapshot (derived join).
  pub async fn get_team(&self, team_name: String) -> Result<Team> {
    if team_name.is_empty() {
      return Err(Error::validation("team_name is empty"));
    }

    self
      .store
      .run(move |uow| {
        if !uow.team_exists(&team_name)? {
          return Err(Error::TeamNotFound(team_name));
        }
        let members = uow.users_by_team(&team_name)?;
        Ok(Team { team_name, members })
      })
      .await
  }
}

// ─── User workflow ───────────────────────────────────────────────────────────

/// User activity toggling.
pub struct UserWorkflow<S> {
  store: Arc<S>,
}

impl<S> Clone for UserWorkflow<S> {
  fn clone(&self) -> Self {
    Self {
      store: Arc::clone(&self.store),
    }
  }
}

impl<S: ReviewStore> UserWorkflow<S> {
  pub fn new(store: Arc<S>) -> Self {
    Self { store }
  }

  /// Set the activity flag. Inactive users stay team members but drop out
  /// of every future candidate pool.
  pub async fn set_user_active(
    &self,
    user_id: String,
    is_active: bool,
  ) -> Result<User> {
    if user_id.is_empty() {
      return Err(Error::validation("user_id is empty"));
    }

    self
      .store
      .run(move |uow| {
        if uow.user(&user_id)?.is_none() {
          return Err(Error::UserNotFound(user_id));
        }
        uow.set_user_active(&user_id, is_active)
      })
      .await
  }
}
