//! Error taxonomy shared by the API client and the views.

use thiserror::Error;

/// A client-side constraint violation. Always raised before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("Please select at least one file to upload.")]
  NoFiles,

  #[error("You can upload at most {limit} files at a time ({selected} selected).")]
  TooManyFiles { limit: usize, selected: usize },

  #[error("Unsupported file type: {file}")]
  UnsupportedType { file: String },

  /// The weights of a role did not add up to 100. The message is shown to the
  /// user verbatim.
  #[error("Weights must sum up to 100.")]
  WeightsSum { total: i64 },

  #[error("Email and password are required.")]
  EmptyCredentials,
}

#[derive(Debug, Error)]
pub enum Error {
  /// No session, or the session could not produce a token.
  #[error("not authenticated: {0}")]
  Auth(String),

  #[error(transparent)]
  Validation(#[from] ValidationError),

  /// The server answered with a non-2xx status.
  #[error("server returned {status}: {message}")]
  Http { status: u16, message: String },

  #[error("network error: {0}")]
  Network(String),

  /// A 2xx response whose body did not have the expected shape.
  #[error("unexpected response: {0}")]
  Decode(String),

  /// A local file could not be read for upload.
  #[error("file error: {0}")]
  Io(String),
}

impl Error {
  /// A 404, or a 5xx whose detail carries a wrapped 404 such as
  /// `"Error fetching top score data: 404: No top score candidates found."`.
  pub fn is_not_found(&self) -> bool {
    match self {
      Self::Http { status: 404, .. } => true,
      Self::Http { status: 500..=599, message } => {
        message.starts_with("404: ") || message.contains(": 404: ")
      }
      _ => false,
    }
  }
}

impl From<serde_json::Error> for Error {
  fn from(e: serde_json::Error) -> Self { Self::Decode(e.to_string()) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
