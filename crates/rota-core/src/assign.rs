//! Reviewer selection, the decision logic of the service.
//!
//! Both selectors are pure: the candidate pool is computed from the member
//! list passed in, and every random draw goes through the [`Sampler`]
//! capability so tests can substitute a deterministic source.

use std::sync::{Mutex, PoisonError};

use rand::{SeedableRng, rngs::StdRng};

use crate::{pull_request::ReviewerSlots, team::User};

// ─── Sampler ─────────────────────────────────────────────────────────────────

/// A source of uniform samples without replacement.
pub trait Sampler: Send + Sync {
  /// Return `k.min(n)` distinct indices in `0..n`, every subset equally
  /// likely, in arbitrary order.
  fn sample(&self, n: usize, k: usize) -> Vec<usize>;
}

/// Draws from the thread-local OS-seeded generator. The production default;
/// no seed state is carried between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngSampler;

impl Sampler for ThreadRngSampler {
  fn sample(&self, n: usize, k: usize) -> Vec<usize> {
    rand::seq::index::sample(&mut rand::thread_rng(), n, k.min(n)).into_vec()
  }
}

/// Draws from a fixed-seed generator, for tests that need reproducible
/// picks across runs.
#[derive(Debug)]
pub struct SeededSampler {
  rng: Mutex<StdRng>,
}

impl SeededSampler {
  pub fn new(seed: u64) -> Self {
    Self {
      rng: Mutex::new(StdRng::seed_from_u64(seed)),
    }
  }
}

impl Sampler for SeededSampler {
  fn sample(&self, n: usize, k: usize) -> Vec<usize> {
    // No code panics while the lock is held, so a poisoned lock still
    // carries a usable generator.
    let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
    rand::seq::index::sample(&mut *rng, n, k.min(n)).into_vec()
  }
}

// ─── Selectors ───────────────────────────────────────────────────────────────

/// Pick up to two initial reviewers for a new pull request.
///
/// The pool is every active member other than the author. Returns
/// `min(2, |pool|)` distinct picks placed arbitrarily into the slots; with
/// zero or one candidate the remaining slots stay empty.
pub fn select_initial(
  author_id: &str,
  members: &[User],
  sampler: &dyn Sampler,
) -> ReviewerSlots {
  let pool: Vec<&User> = members
    .iter()
    .filter(|m| m.is_active && m.user_id != author_id)
    .collect();

  let mut picks = sampler
    .sample(pool.len(), 2)
    .into_iter()
    .map(|i| pool[i].user_id.clone());

  ReviewerSlots {
    first:  picks.next(),
    second: picks.next(),
  }
}

/// Pick a replacement for an outgoing reviewer.
///
/// The pool additionally excludes the outgoing reviewer and the occupant of
/// the other slot. `None` means nobody is eligible.
pub fn select_replacement(
  author_id: &str,
  old_reviewer: &str,
  other_reviewer: Option<&str>,
  members: &[User],
  sampler: &dyn Sampler,
) -> Option<String> {
  let pool: Vec<&User> = members
    .iter()
    .filter(|m| {
      m.is_active
        && m.user_id != author_id
        && m.user_id != old_reviewer
        && Some(m.user_id.as_str()) != other_reviewer
    })
    .collect();

  sampler
    .sample(pool.len(), 1)
    .first()
    .map(|&i| pool[i].user_id.clone())
}

#[cfg(test)]
mod tests {
  use chrono::Utc;

  use super::*;

  /// Always picks the lowest indices, making slot placement deterministic.
  struct FirstK;

  impl Sampler for FirstK {
    fn sample(&self, n: usize, k: usize) -> Vec<usize> {
      (0..k.min(n)).collect()
    }
  }

  fn member(id: &str, active: bool) -> User {
    let now = Utc::now();
    User {
      user_id:    id.into(),
      username:   id.to_uppercase(),
      team_name:  "backend".into(),
      is_active:  active,
      created_at: now,
      updated_at: now,
    }
  }

  // ── select_initial ────────────────────────────────────────────────────

  #[test]
  fn initial_excludes_author_and_inactive_members() {
    let members =
      vec![member("u1", true), member("u2", true), member("u3", false)];
    let slots = select_initial("u1", &members, &FirstK);
    assert_eq!(slots.first.as_deref(), Some("u2"));
    assert_eq!(slots.second, None);
  }

  #[test]
  fn initial_fills_both_slots_when_pool_allows() {
    let members = vec![
      member("u1", true),
      member("u2", true),
      member("u3", true),
      member("u4", true),
    ];
    let slots = select_initial("u1", &members, &SeededSampler::new(7));
    let assigned = slots.assigned();
    assert_eq!(assigned.len(), 2);
    assert!(!assigned.contains(&"u1"));
    assert_ne!(slots.first, slots.second);
  }

  #[test]
  fn initial_with_author_only_pool_leaves_slots_empty() {
    let members = vec![member("u1", true), member("u2", false)];
    let slots = select_initial("u1", &members, &ThreadRngSampler);
    assert_eq!(slots, ReviewerSlots::default());
  }

  #[test]
  fn initial_reviewer_count_is_min_of_two_and_pool() {
    for pool_size in 0..5 {
      let mut members = vec![member("author", true)];
      for i in 0..pool_size {
        members.push(member(&format!("u{i}"), true));
      }
      let slots = select_initial("author", &members, &ThreadRngSampler);
      assert_eq!(slots.assigned().len(), pool_size.min(2));
    }
  }

  #[test]
  fn initial_eventually_picks_every_candidate() {
    let members = vec![
      member("u1", true),
      member("u2", true),
      member("u3", true),
      member("u4", true),
    ];
    let mut seen = std::collections::HashSet::new();
    for _ in 0..200 {
      let slots = select_initial("u1", &members, &ThreadRngSampler);
      for id in slots.assigned() {
        seen.insert(id.to_owned());
      }
    }
    assert_eq!(seen.len(), 3, "picked over 200 rounds: {seen:?}");
  }

  // ── select_replacement ────────────────────────────────────────────────

  #[test]
  fn replacement_excludes_author_old_and_other_slot() {
    // u1 author, u2 outgoing, u3 the other slot, u5 inactive: only u4 left.
    let members = vec![
      member("u1", true),
      member("u2", true),
      member("u3", true),
      member("u4", true),
      member("u5", false),
    ];
    for _ in 0..20 {
      let pick =
        select_replacement("u1", "u2", Some("u3"), &members, &ThreadRngSampler);
      assert_eq!(pick.as_deref(), Some("u4"));
    }
  }

  #[test]
  fn replacement_with_empty_other_slot_still_excludes_old() {
    let members = vec![member("u1", true), member("u2", true)];
    let pick = select_replacement("u1", "u2", None, &members, &FirstK);
    assert_eq!(pick, None);
  }

  #[test]
  fn replacement_with_exhausted_pool_is_none() {
    let members =
      vec![member("u1", true), member("u2", true), member("u3", true)];
    let pick =
      select_replacement("u1", "u2", Some("u3"), &members, &ThreadRngSampler);
    assert_eq!(pick, None);
  }

  // ── Samplers ──────────────────────────────────────────────────────────

  #[test]
  fn seeded_sampler_is_reproducible() {
    let a = SeededSampler::new(42);
    let b = SeededSampler::new(42);
    for _ in 0..10 {
      assert_eq!(a.sample(10, 3), b.sample(10, 3));
    }
  }

  #[test]
  fn samplers_clamp_oversized_requests() {
    assert_eq!(ThreadRngSampler.sample(1, 2).len(), 1);
    assert_eq!(SeededSampler::new(0).sample(0, 2).len(), 0);
  }
}
