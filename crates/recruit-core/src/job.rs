//! Job descriptions, parsed server-side from uploaded postings.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::de::{first_text, string_list};

/// A job description in canonical form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawJobDescription")]
pub struct JobDescription {
  pub id:                  String,
  pub title:               String,
  pub company:             String,
  pub location:            String,
  pub salary_range:        String,
  pub description:         String,
  pub required_skills:     Vec<String>,
  pub required_experience: String,
  pub job_type:            String,
  pub qualifications:      String,
  pub responsibilities:    String,
  pub posted_date:         String,
  pub contact_email:       String,
  /// Reference to the stored posting document.
  pub file_url:            String,
}

impl JobDescription {
  /// Title for list rows; falls back to the id for unparsed records.
  pub fn heading(&self) -> &str {
    if self.title.is_empty() { &self.id } else { &self.title }
  }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawJobDescription {
  id:                  Option<Value>,
  jd_id:               Option<Value>,
  jobtitle:            Option<Value>,
  title:               Option<Value>,
  company:             Option<Value>,
  location:            Option<Value>,
  #[serde(rename = "Location")]
  location_upper:      Option<Value>,
  salary_range:        Option<Value>,
  salary:              Option<Value>,
  description:         Option<Value>,
  required_skills:     Option<Value>,
  requirements:        Option<Value>,
  required_experience: Option<Value>,
  job_type:            Option<Value>,
  qualifications:      Option<Value>,
  responsibilities:    Option<Value>,
  posted_date:         Option<Value>,
  contact_email:       Option<Value>,
  jd_url:              Option<Value>,
  file_url:            Option<Value>,
}

/// Responsibilities arrive either as a paragraph or as bullet points.
fn paragraph(value: &Option<Value>) -> String {
  match value {
    Some(Value::Array(_)) => string_list(value.as_ref()).join("; "),
    _ => first_text(&[value]),
  }
}

impl From<RawJobDescription> for JobDescription {
  fn from(raw: RawJobDescription) -> Self {
    Self {
      id:                  first_text(&[&raw.id, &raw.jd_id]),
      title:               first_text(&[&raw.jobtitle, &raw.title]),
      company:             first_text(&[&raw.company]),
      location:            first_text(&[&raw.location, &raw.location_upper]),
      salary_range:        first_text(&[&raw.salary_range, &raw.salary]),
      description:         first_text(&[&raw.description]),
      required_skills:     string_list(
        raw.required_skills.as_ref().or(raw.requirements.as_ref()),
      ),
      required_experience: first_text(&[&raw.required_experience]),
      job_type:            first_text(&[&raw.job_type]),
      qualifications:      paragraph(&raw.qualifications),
      responsibilities:    paragraph(&raw.responsibilities),
      posted_date:         first_text(&[&raw.posted_date]),
      contact_email:       first_text(&[&raw.contact_email]),
      file_url:            first_text(&[&raw.jd_url, &raw.file_url]),
    }
  }
}
