//! Top matches: candidates ranked against one job description by a
//! server-computed weighted score.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
  candidate::initials,
  de::{first_text, number, string_list},
};

// ─── Score breakdown ─────────────────────────────────────────────────────────

/// One category's contribution to a total match score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawCategoryScore")]
pub struct CategoryScore {
  /// Raw 0–100 score for the category.
  pub score:    f64,
  pub weight:   f64,
  /// `score` scaled by `weight`; what the category adds to the total.
  pub weighted: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCategoryScore {
  score:          Option<Value>,
  raw_score:      Option<Value>,
  weight:         Option<Value>,
  weighted:       Option<Value>,
  weighted_score: Option<Value>,
}

impl From<RawCategoryScore> for CategoryScore {
  fn from(raw: RawCategoryScore) -> Self {
    Self {
      score:    number(raw.score.as_ref())
        .or_else(|| number(raw.raw_score.as_ref()))
        .unwrap_or_default(),
      weight:   number(raw.weight.as_ref()).unwrap_or_default(),
      weighted: number(raw.weighted.as_ref())
        .or_else(|| number(raw.weighted_score.as_ref()))
        .unwrap_or_default(),
    }
  }
}

/// Per-category decomposition of a total score, keyed by category name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreBreakdown(pub BTreeMap<String, CategoryScore>);

/// A row of the breakdown table.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownRow {
  pub category:    String,
  pub score:       f64,
  pub weight:      f64,
  pub weighted:    f64,
  pub explanation: Option<String>,
}

/// The closing row of the breakdown table.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BreakdownTotal {
  pub weight:   f64,
  pub weighted: f64,
}

impl ScoreBreakdown {
  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  /// Sum of weights and weighted contributions across all categories.
  pub fn total(&self) -> BreakdownTotal {
    self.0.values().fold(BreakdownTotal::default(), |acc, c| {
      BreakdownTotal {
        weight:   acc.weight + c.weight,
        weighted: acc.weighted + c.weighted,
      }
    })
  }
}

// ─── TopMatchCandidate ───────────────────────────────────────────────────────

/// A candidate summary plus its match against one job description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawTopMatch")]
pub struct TopMatchCandidate {
  pub candidate_id:     String,
  pub name:             String,
  pub email:            String,
  pub contact:          String,
  pub designation:      String,
  pub experience:       String,
  pub education:        String,
  pub resume_url:       String,
  pub profile_type:     String,
  pub total_score:      f64,
  pub score_breakdown:  ScoreBreakdown,
  pub key_strengths:    Vec<String>,
  pub skills_matched:   Vec<String>,
  pub key_achievements: Vec<String>,
  /// Free-text reasoning per category (`skills` → "Strong Rust…").
  pub explanations:     BTreeMap<String, String>,
}

impl TopMatchCandidate {
  pub fn initials(&self) -> String { initials(&self.name) }

  /// The breakdown table rows, with any per-category explanation attached.
  pub fn breakdown_rows(&self) -> Vec<BreakdownRow> {
    self
      .score_breakdown
      .0
      .iter()
      .map(|(category, c)| BreakdownRow {
        category:    category.clone(),
        score:       c.score,
        weight:      c.weight,
        weighted:    c.weighted,
        explanation: self.explanations.get(category).cloned(),
      })
      .collect()
  }
}

/// Order matches by total score, highest first. Ties keep server order.
pub fn rank(matches: &mut [TopMatchCandidate]) {
  matches.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTopMatch {
  candidate_id:     Option<Value>,
  id:               Option<Value>,
  name:             Option<Value>,
  email:            Option<Value>,
  contact:          Option<Value>,
  contact_number:   Option<Value>,
  phone:            Option<Value>,
  designation:      Option<Value>,
  experience:       Option<Value>,
  education:        Option<Value>,
  resume_url:       Option<Value>,
  profile_type:     Option<Value>,
  total_score:      Option<Value>,
  score_breakdown:  Option<ScoreBreakdown>,
  key_strengths:    Option<Value>,
  skills_matched:   Option<Value>,
  matched_skills:   Option<Value>,
  key_achievements: Option<Value>,
  achievements:     Option<Value>,
  explanations:     Option<BTreeMap<String, String>>,
  #[serde(flatten)]
  rest:             BTreeMap<String, Value>,
}

impl From<RawTopMatch> for TopMatchCandidate {
  fn from(raw: RawTopMatch) -> Self {
    // `skills_explanation` → `skills`, and so on.
    let mut explanations = raw.explanations.unwrap_or_default();
    for (key, value) in &raw.rest {
      if let Some(category) = key.strip_suffix("_explanation")
        && let Some(text) = value.as_str()
        && !text.trim().is_empty()
      {
        explanations.insert(category.to_string(), text.trim().to_string());
      }
    }

    let education = match &raw.education {
      Some(Value::Array(_)) => crate::candidate::education_list(raw.education.as_ref())
        .iter()
        .map(|e| e.display())
        .collect::<Vec<_>>()
        .join("; "),
      other => first_text(&[other]),
    };

    Self {
      candidate_id: first_text(&[&raw.candidate_id, &raw.id]),
      name: first_text(&[&raw.name]),
      email: first_text(&[&raw.email]),
      contact: first_text(&[&raw.contact_number, &raw.phone, &raw.contact]),
      designation: first_text(&[&raw.designation]),
      experience: first_text(&[&raw.experience]),
      education,
      resume_url: first_text(&[&raw.resume_url]),
      profile_type: first_text(&[&raw.profile_type]),
      total_score: number(raw.total_score.as_ref()).unwrap_or_default(),
      score_breakdown: raw.score_breakdown.unwrap_or_default(),
      key_strengths: string_list(raw.key_strengths.as_ref()),
      skills_matched: string_list(
        raw.skills_matched.as_ref().or(raw.matched_skills.as_ref()),
      ),
      key_achievements: string_list(
        raw.key_achievements.as_ref().or(raw.achievements.as_ref()),
      ),
      explanations,
    }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn sample() -> TopMatchCandidate {
    serde_json::from_value(json!({
      "candidate_id": "c-1",
      "name": "Sarah Johnson",
      "contact": "+1 555 0100",
      "designation": "Engineer",
      "experience": "5 years",
      "education": "MS Computer Science – Stanford",
      "resume_url": "https://blob.example/c-1.pdf",
      "total_score": 82.5,
      "score_breakdown": {
        "skills":         { "score": 90, "weight": 30, "weighted": 27.0 },
        "experience":     { "score": 80, "weight": 50, "weighted": 40.0 },
        "education":      { "score": 75, "weight": 10, "weighted": 7.5 },
        "certifications": { "score": 80, "weight": 10, "weighted": 8.0 }
      },
      "skills_explanation": "Strong React and AWS.",
      "skills_matched": ["React", "AWS"],
      "key_strengths": ["Leadership"],
      "key_achievements": ["Cut deploy time by 60%"]
    }))
    .unwrap()
  }

  #[test]
  fn breakdown_total_row_sums_columns() {
    let m = sample();
    let total = m.score_breakdown.total();
    assert_eq!(total.weight, 100.0);
    assert_eq!(total.weighted, 82.5);
    assert_eq!(m.breakdown_rows().len(), 4);
  }

  #[test]
  fn explanations_attach_to_rows() {
    let m = sample();
    let rows = m.breakdown_rows();
    let skills = rows.iter().find(|r| r.category == "skills").unwrap();
    assert_eq!(skills.explanation.as_deref(), Some("Strong React and AWS."));
    let edu = rows.iter().find(|r| r.category == "education").unwrap();
    assert!(edu.explanation.is_none());
  }

  #[test]
  fn missing_breakdown_and_score_default() {
    let m: TopMatchCandidate =
      serde_json::from_value(json!({ "candidate_id": "c-2", "name": "Li" }))
        .unwrap();
    assert!(m.score_breakdown.is_empty());
    assert_eq!(m.total_score, 0.0);
    assert_eq!(m.score_breakdown.total(), BreakdownTotal::default());
  }

  #[test]
  fn rank_orders_by_score_and_keeps_ties_stable() {
    let mk = |id: &str, score: f64| TopMatchCandidate {
      candidate_id: id.into(),
      total_score: score,
      ..Default::default()
    };
    let mut list = vec![mk("a", 50.0), mk("b", 90.0), mk("c", 50.0), mk("d", 70.0)];
    rank(&mut list);
    let ids: Vec<_> = list.iter().map(|m| m.candidate_id.as_str()).collect();
    assert_eq!(ids, vec!["b", "d", "a", "c"]);
  }
}
