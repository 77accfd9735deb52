//! Per-role scoring weights.
//!
//! Each role (`fresher`, `mid_professional`, …) maps scoring categories to
//! integer weights. A role's weights must sum to exactly [`REQUIRED_TOTAL`]
//! before they may be persisted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const REQUIRED_TOTAL: i64 = 100;

/// The role selected when the editor first loads, if the server has it.
pub const DEFAULT_ROLE: &str = "fresher";

/// Category → weight for a single role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleWeights(pub BTreeMap<String, i64>);

impl RoleWeights {
  pub fn total(&self) -> i64 { self.0.values().sum() }

  /// Accept the weights only if they sum to exactly 100.
  pub fn validate(&self) -> Result<(), ValidationError> {
    match self.total() {
      REQUIRED_TOTAL => Ok(()),
      total => Err(ValidationError::WeightsSum { total }),
    }
  }

  pub fn get(&self, category: &str) -> Option<i64> {
    self.0.get(category).copied()
  }

  /// Overwrite an existing category's weight. Unknown categories are ignored
  /// so that edits can never introduce a category the server does not score.
  pub fn set(&mut self, category: &str, weight: i64) {
    if let Some(slot) = self.0.get_mut(category) {
      *slot = weight;
    }
  }

  pub fn categories(&self) -> impl Iterator<Item = &str> {
    self.0.keys().map(String::as_str)
  }
}

impl<const N: usize> From<[(&str, i64); N]> for RoleWeights {
  fn from(pairs: [(&str, i64); N]) -> Self {
    Self(pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
  }
}

/// Role → category weights for the signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightConfiguration(pub BTreeMap<String, RoleWeights>);

impl WeightConfiguration {
  pub fn roles(&self) -> impl Iterator<Item = &str> {
    self.0.keys().map(String::as_str)
  }

  pub fn role(&self, role: &str) -> Option<&RoleWeights> { self.0.get(role) }

  /// The role to show first: [`DEFAULT_ROLE`] if configured, otherwise the
  /// first role in name order.
  pub fn default_role(&self) -> Option<&str> {
    if self.0.contains_key(DEFAULT_ROLE) {
      Some(DEFAULT_ROLE)
    } else {
      self.roles().next()
    }
  }

  pub fn insert(&mut self, role: impl Into<String>, weights: RoleWeights) {
    self.0.insert(role.into(), weights);
  }
}

/// `"mid_professional"` → `"Mid Professional"`.
pub fn display_role(role: &str) -> String {
  role
    .split('_')
    .filter(|w| !w.is_empty())
    .map(|w| {
      let mut chars = w.chars();
      match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => String::new(),
      }
    })
    .collect::<Vec<_>>()
    .join(" ")
}
