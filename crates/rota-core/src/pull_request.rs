//! Pull requests and their reviewer slots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── Status ──────────────────────────────────────────────────────────────────

/// Review state of a pull request. The only transition is OPEN → MERGED;
/// there is no reverse and no other state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrStatus {
  Open,
  Merged,
}

impl PrStatus {
  /// The string stored in the `status` column and sent on the wire.
  /// Must match the `rename_all` serde tags above.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Open => "OPEN",
      Self::Merged => "MERGED",
    }
  }

  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "OPEN" => Some(Self::Open),
      "MERGED" => Some(Self::Merged),
      _ => None,
    }
  }
}

// ─── Reviewer slots ──────────────────────────────────────────────────────────

/// The two fixed reviewer positions of a pull request.
///
/// Occupied slots never hold the author and never hold the same user twice;
/// the workflows uphold both by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewerSlots {
  pub first:  Option<String>,
  pub second: Option<String>,
}

impl ReviewerSlots {
  pub fn contains(&self, user_id: &str) -> bool {
    self.first.as_deref() == Some(user_id)
      || self.second.as_deref() == Some(user_id)
  }

  /// The occupants of the non-empty slots, in slot order.
  pub fn assigned(&self) -> Vec<&str> {
    self
      .first
      .iter()
      .chain(self.second.iter())
      .map(String::as_str)
      .collect()
  }

  /// The occupant of the slot opposite the one `user_id` holds.
  /// Callers check [`ReviewerSlots::contains`] first.
  pub fn other_than(&self, user_id: &str) -> Option<&str> {
    if self.first.as_deref() == Some(user_id) {
      self.second.as_deref()
    } else {
      self.first.as_deref()
    }
  }

  /// Write `replacement` into the slot held by `old`, leaving the other
  /// slot untouched. No-op if `old` occupies neither slot.
  pub fn replace(&mut self, old: &str, replacement: String) {
    if self.first.as_deref() == Some(old) {
      self.first = Some(replacement);
    } else if self.second.as_deref() == Some(old) {
      self.second = Some(replacement);
    }
  }
}

// ─── PullRequest ─────────────────────────────────────────────────────────────

/// A pull request record as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
  /// Caller-supplied identity, globally unique at creation time.
  pub pull_request_id: String,
  pub title:           String,
  /// Reference to the authoring [`User`](crate::team::User); not enforced
  /// to remain valid after creation.
  pub author_id:       String,
  pub status:          PrStatus,
  pub reviewers:       ReviewerSlots,
  pub created_at:      DateTime<Utc>,
  pub updated_at:      DateTime<Utc>,
  /// Set exactly once, at the OPEN → MERGED transition.
  pub merged_at:       Option<DateTime<Utc>>,
}

/// Input to [`crate::store::UnitOfWork::insert_pull_request`]. New records
/// are always OPEN; timestamps are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewPullRequest {
  pub pull_request_id: String,
  pub title:           String,
  pub author_id:       String,
  pub reviewers:       ReviewerSlots,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn replace_targets_only_the_matching_slot() {
    let mut slots = ReviewerSlots {
      first:  Some("u2".into()),
      second: Some("u3".into()),
    };
    slots.replace("u3", "u4".into());
    assert_eq!(slots.first.as_deref(), Some("u2"));
    assert_eq!(slots.second.as_deref(), Some("u4"));
  }

  #[test]
  fn replace_with_unknown_occupant_changes_nothing() {
    let mut slots = ReviewerSlots {
      first:  Some("u2".into()),
      second: None,
    };
    slots.replace("u9", "u4".into());
    assert_eq!(slots.first.as_deref(), Some("u2"));
    assert_eq!(slots.second, None);
  }

  #[test]
  fn other_than_returns_the_opposite_slot() {
    let slots = ReviewerSlots {
      first:  Some("u2".into()),
      second: Some("u3".into()),
    };
    assert_eq!(slots.other_than("u2"), Some("u3"));
    assert_eq!(slots.other_than("u3"), Some("u2"));
  }

  #[test]
  fn assigned_skips_empty_slots() {
    let slots = ReviewerSlots {
      first:  None,
      second: Some("u3".into()),
    };
    assert_eq!(slots.assigned(), vec!["u3"]);
    assert!(ReviewerSlots::default().assigned().is_empty());
  }

  #[test]
  fn status_strings_round_trip() {
    assert_eq!(PrStatus::parse(PrStatus::Open.as_str()), Some(PrStatus::Open));
    assert_eq!(
      PrStatus::parse(PrStatus::Merged.as_str()),
      Some(PrStatus::Merged)
    );
    assert_eq!(PrStatus::parse("CLOSED"), None);
  }
}
