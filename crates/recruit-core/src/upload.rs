//! File selection rules and upload payloads.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

use crate::{
  de::first_text,
  error::ValidationError,
};

// ─── Media types ─────────────────────────────────────────────────────────────

/// Document types the backend knows how to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
pub enum MediaType {
  #[strum(to_string = "application/pdf")]
  Pdf,
  #[strum(to_string = "application/msword")]
  Doc,
  #[strum(
    to_string = "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
  )]
  Docx,
  #[strum(to_string = "text/plain")]
  Text,
}

impl MediaType {
  pub fn extension(self) -> &'static str {
    match self {
      Self::Pdf => "pdf",
      Self::Doc => "doc",
      Self::Docx => "docx",
      Self::Text => "txt",
    }
  }

  /// The MIME string sent as the multipart part's content type.
  pub fn mime(self) -> &'static str { self.into() }

  /// Guess from a file name's extension, case-insensitively.
  pub fn from_path(path: &Path) -> Option<Self> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    Self::iter().find(|m| m.extension() == ext)
  }

  /// Guess from a URL or file name, ignoring any query string.
  pub fn from_url(url: &str) -> Option<Self> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    Self::from_path(Path::new(path))
  }

  pub fn is_word(self) -> bool { matches!(self, Self::Doc | Self::Docx) }
}

// ─── Selection rules ─────────────────────────────────────────────────────────

/// Client-side constraints applied when the user picks files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRules {
  /// Upper bound on files per upload; `None` means unbounded.
  pub max_files: Option<usize>,
  pub accepted:  Vec<MediaType>,
}

impl FileRules {
  pub fn resumes(max_files: Option<usize>) -> Self {
    Self {
      max_files,
      accepted: vec![MediaType::Pdf, MediaType::Doc, MediaType::Docx],
    }
  }

  pub fn job_descriptions(max_files: Option<usize>) -> Self {
    Self {
      max_files,
      accepted: vec![
        MediaType::Pdf,
        MediaType::Doc,
        MediaType::Docx,
        MediaType::Text,
      ],
    }
  }

  /// `".pdf, .doc, .docx"`, shown next to the file picker.
  pub fn accept_hint(&self) -> String {
    self
      .accepted
      .iter()
      .map(|m| format!(".{}", m.extension()))
      .collect::<Vec<_>>()
      .join(", ")
  }

  /// Validate a whole selection. Either every path is acceptable and the
  /// full selection is returned in order, or nothing is.
  pub fn select(
    &self,
    paths: &[PathBuf],
  ) -> Result<Vec<SelectedFile>, ValidationError> {
    if paths.is_empty() {
      return Err(ValidationError::NoFiles);
    }
    if let Some(limit) = self.max_files
      && paths.len() > limit
    {
      return Err(ValidationError::TooManyFiles {
        limit,
        selected: paths.len(),
      });
    }

    paths
      .iter()
      .map(|path| {
        MediaType::from_path(path)
          .filter(|m| self.accepted.contains(m))
          .map(|media_type| SelectedFile {
            path: path.clone(),
            media_type,
          })
          .ok_or_else(|| ValidationError::UnsupportedType {
            file: display_name(path),
          })
      })
      .collect()
  }
}

/// A validated file awaiting upload; its bytes are read at submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
  pub path:       PathBuf,
  pub media_type: MediaType,
}

impl SelectedFile {
  pub fn file_name(&self) -> String { display_name(&self.path) }
}

fn display_name(path: &Path) -> String {
  path
    .file_name()
    .map(|n| n.to_string_lossy().into_owned())
    .unwrap_or_else(|| path.display().to_string())
}

/// One part of a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
  pub file_name:  String,
  pub media_type: MediaType,
  pub bytes:      Vec<u8>,
}

// ─── Upload results ──────────────────────────────────────────────────────────

/// The server's per-file result for a multi-file upload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawOutcome")]
pub struct UploadOutcome {
  pub filename: String,
  /// Id of the created entity, when processing succeeded.
  pub id:       Option<String>,
  /// Why processing failed for this file.
  pub error:    Option<String>,
}

impl UploadOutcome {
  pub fn is_ok(&self) -> bool { self.error.is_none() }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawOutcome {
  filename:     Option<serde_json::Value>,
  id:           Option<serde_json::Value>,
  candidate_id: Option<serde_json::Value>,
  jd_id:        Option<serde_json::Value>,
  error:        Option<serde_json::Value>,
}

impl From<RawOutcome> for UploadOutcome {
  fn from(raw: RawOutcome) -> Self {
    let id = first_text(&[&raw.id, &raw.candidate_id, &raw.jd_id]);
    let error = first_text(&[&raw.error]);
    Self {
      filename: first_text(&[&raw.filename]),
      id:       (!id.is_empty()).then_some(id),
      error:    (!error.is_empty()).then_some(error),
    }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn paths(names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(PathBuf::from).collect()
  }

  #[test]
  fn media_type_from_extension() {
    assert_eq!(MediaType::from_path(Path::new("cv.PDF")), Some(MediaType::Pdf));
    assert_eq!(MediaType::from_path(Path::new("a/b.docx")), Some(MediaType::Docx));
    assert_eq!(MediaType::from_path(Path::new("notes")), None);
    assert_eq!(
      MediaType::from_url("https://blob.example/x.docx?sv=2024&sig=abc"),
      Some(MediaType::Docx)
    );
    assert_eq!(MediaType::Pdf.mime(), "application/pdf");
  }

  #[test]
  fn selection_keeps_order() {
    let rules = FileRules::resumes(Some(2));
    let picked = rules.select(&paths(&["b.pdf", "a.docx"])).unwrap();
    assert_eq!(picked[0].file_name(), "b.pdf");
    assert_eq!(picked[1].media_type, MediaType::Docx);
  }

  #[test]
  fn too_many_files_rejected() {
    let rules = FileRules::resumes(Some(2));
    assert_eq!(
      rules.select(&paths(&["a.pdf", "b.pdf", "c.pdf"])),
      Err(ValidationError::TooManyFiles { limit: 2, selected: 3 })
    );
  }

  #[test]
  fn unbounded_rules_accept_many() {
    let rules = FileRules::job_descriptions(None);
    assert_eq!(rules.select(&paths(&["a.txt", "b.pdf", "c.doc"])).unwrap().len(), 3);
  }

  #[test]
  fn unsupported_type_rejected() {
    let rules = FileRules::resumes(None);
    assert_eq!(
      rules.select(&paths(&["a.pdf", "dir/photo.png"])),
      Err(ValidationError::UnsupportedType { file: "photo.png".into() })
    );
    // Plain text is a job-description format only.
    assert!(rules.select(&paths(&["cv.txt"])).is_err());
  }

  #[test]
  fn empty_selection_rejected() {
    assert_eq!(
      FileRules::resumes(None).select(&[]),
      Err(ValidationError::NoFiles)
    );
  }

  #[test]
  fn outcome_picks_up_entity_id_aliases() {
    let ok: UploadOutcome = serde_json::from_value(json!({
      "filename": "a.pdf", "candidate_id": "c-1", "parsed_data": {}
    }))
    .unwrap();
    assert_eq!(ok.id.as_deref(), Some("c-1"));
    assert!(ok.is_ok());

    let failed: UploadOutcome = serde_json::from_value(json!({
      "filename": "b.pdf", "error": "could not parse", "raw_output": null
    }))
    .unwrap();
    assert!(!failed.is_ok());
  }
}
