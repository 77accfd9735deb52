//! Candidate: a resume parsed server-side into structured fields.
//!
//! The client never constructs or mutates candidates; it lists them, shows
//! them, and deletes them by id.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::de::{first_text, number, string_list, text};

/// One entry in a candidate's education history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
  pub degree:      String,
  pub institution: String,
  pub year:        Option<String>,
}

impl Education {
  /// Parse a free-text entry such as `"MS Computer Science – Stanford"`.
  pub fn from_text(s: &str) -> Self {
    for sep in [" – ", " — ", " - ", ", "] {
      if let Some((degree, institution)) = s.split_once(sep) {
        return Self {
          degree:      degree.trim().to_string(),
          institution: institution.trim().to_string(),
          year:        None,
        };
      }
    }
    Self {
      degree:      s.trim().to_string(),
      institution: String::new(),
      year:        None,
    }
  }

  fn from_value(value: &Value) -> Option<Self> {
    match value {
      Value::Object(map) => {
        let field = |k: &str| map.get(k).and_then(text);
        let degree = match (field("degree"), field("field_of_study")) {
          (Some(d), Some(f)) if !d.contains(&f) => format!("{d}, {f}"),
          (Some(d), _) => d,
          (None, Some(f)) => f,
          (None, None) => String::new(),
        };
        let institution = field("institution").unwrap_or_default();
        if degree.is_empty() && institution.is_empty() {
          return None;
        }
        Some(Self { degree, institution, year: field("year") })
      }
      other => text(other).map(|s| Self::from_text(&s)),
    }
  }

  /// `"degree – institution"`, or whichever half is present.
  pub fn display(&self) -> String {
    match (self.degree.is_empty(), self.institution.is_empty()) {
      (false, false) => format!("{} – {}", self.degree, self.institution),
      (false, true) => self.degree.clone(),
      _ => self.institution.clone(),
    }
  }
}

/// Parse an education history that may be a list or a single string.
pub(crate) fn education_list(value: Option<&Value>) -> Vec<Education> {
  match value {
    Some(Value::Array(items)) => {
      items.iter().filter_map(Education::from_value).collect()
    }
    Some(other) => Education::from_value(other).into_iter().collect(),
    None => Vec::new(),
  }
}

/// A candidate in canonical form. Decoding accepts every record shape the
/// backend has produced (see [`RawCandidate`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawCandidate")]
pub struct Candidate {
  pub id:                   String,
  pub name:                 String,
  pub designation:          String,
  pub email:                String,
  /// Phone number.
  pub contact:              String,
  pub location:             String,
  pub experience_years:     Option<f64>,
  pub professional_summary: String,
  pub technical_skills:     Vec<String>,
  pub education:            Vec<Education>,
  pub key_achievements:     Vec<String>,
  pub certifications:       Vec<String>,
  /// Reference to the stored resume document.
  pub resume_url:           String,
}

impl Candidate {
  /// Up to two uppercase initials for the avatar column.
  pub fn initials(&self) -> String { initials(&self.name) }
}

pub(crate) fn initials(name: &str) -> String {
  name
    .split_whitespace()
    .filter_map(|w| w.chars().next())
    .take(2)
    .flat_map(char::to_uppercase)
    .collect()
}

/// Every field name observed across backend versions.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCandidate {
  id:                   Option<Value>,
  candidate_id:         Option<Value>,
  name:                 Option<Value>,
  designation:          Option<Value>,
  email:                Option<Value>,
  contact:              Option<Value>,
  contact_number:       Option<Value>,
  phone:                Option<Value>,
  location:             Option<Value>,
  #[serde(rename = "Location")]
  location_upper:       Option<Value>,
  experience:           Option<Value>,
  experience_years:     Option<Value>,
  professional_summary: Option<Value>,
  summary:              Option<Value>,
  technical_skills:     Option<Value>,
  skills:               Option<Value>,
  education:            Option<Value>,
  key_achievements:     Option<Value>,
  certifications:       Option<Value>,
  resume_url:           Option<Value>,
}

impl From<RawCandidate> for Candidate {
  fn from(raw: RawCandidate) -> Self {
    Self {
      id:                   first_text(&[&raw.id, &raw.candidate_id]),
      name:                 first_text(&[&raw.name]),
      designation:          first_text(&[&raw.designation]),
      email:                first_text(&[&raw.email]),
      contact:              first_text(&[
        &raw.contact_number,
        &raw.phone,
        &raw.contact,
      ]),
      location:             first_text(&[&raw.location, &raw.location_upper]),
      experience_years:     number(raw.experience_years.as_ref())
        .or_else(|| number(raw.experience.as_ref())),
      professional_summary: first_text(&[
        &raw.professional_summary,
        &raw.summary,
      ]),
      technical_skills:     string_list(
        raw.technical_skills.as_ref().or(raw.skills.as_ref()),
      ),
      education:            education_list(raw.education.as_ref()),
      key_achievements:     string_list(raw.key_achievements.as_ref()),
      certifications:       string_list(raw.certifications.as_ref()),
      resume_url:           first_text(&[&raw.resume_url]),
    }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn decodes_latest_shape() {
    let c: Candidate = serde_json::from_value(json!({
      "id": "c-1",
      "candidate_id": "c-1",
      "name": "Sarah Johnson",
      "designation": "Senior Software Engineer",
      "experience": 5.5,
      "contact_number": "+1 (555) 123-4567",
      "email": "sarah.j@email.com",
      "location": "San Francisco, CA",
      "education": [
        { "degree": "MS Computer Science", "institution": "Stanford", "year": "2018" }
      ],
      "technical_skills": ["React", "TypeScript", "AWS"],
      "key_achievements": ["Led migration to microservices"],
      "certifications": [],
      "projects": [{ "title": "x", "description": "y" }],
      "professional_summary": "Full-stack developer.",
      "resume_url": "https://blob.example/resumes/c-1.pdf",
      "uid": "user-1"
    }))
    .unwrap();

    assert_eq!(c.id, "c-1");
    assert_eq!(c.contact, "+1 (555) 123-4567");
    assert_eq!(c.experience_years, Some(5.5));
    assert_eq!(c.technical_skills, vec!["React", "TypeScript", "AWS"]);
    assert_eq!(c.education[0].display(), "MS Computer Science – Stanford");
    assert_eq!(c.education[0].year.as_deref(), Some("2018"));
    assert_eq!(c.initials(), "SJ");
  }

  #[test]
  fn normalises_legacy_field_names() {
    let c: Candidate = serde_json::from_value(json!({
      "candidate_id": "c-2",
      "name": "Michael Chen",
      "Location": "New York, NY",
      "phone": "+1 (555) 234-5678",
      "experience": "7+ years",
      "skills": "Strategy, Analytics",
      "education": "MBA – Harvard Business School"
    }))
    .unwrap();

    assert_eq!(c.id, "c-2");
    assert_eq!(c.location, "New York, NY");
    assert_eq!(c.contact, "+1 (555) 234-5678");
    assert_eq!(c.experience_years, Some(7.0));
    assert_eq!(c.technical_skills, vec!["Strategy", "Analytics"]);
    assert_eq!(c.education.len(), 1);
    assert_eq!(c.education[0].institution, "Harvard Business School");
  }

  #[test]
  fn tolerates_missing_and_null_fields() {
    let c: Candidate = serde_json::from_value(json!({
      "id": "c-3",
      "name": null,
      "location": null,
      "technical_skills": null
    }))
    .unwrap();

    assert_eq!(c.id, "c-3");
    assert!(c.name.is_empty());
    assert!(c.technical_skills.is_empty());
    assert!(c.education.is_empty());
  }

  #[test]
  fn canonical_form_decodes_back() {
    let original: Candidate = serde_json::from_value(json!({
      "id": "c-4",
      "name": "Ada Lovelace",
      "contact": "555",
      "education": [{ "degree": "BSc", "institution": "London" }]
    }))
    .unwrap();
    let reencoded = serde_json::to_value(&original).unwrap();
    let decoded: Candidate = serde_json::from_value(reencoded).unwrap();
    assert_eq!(decoded, original);
  }
}
