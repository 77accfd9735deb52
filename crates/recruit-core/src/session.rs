//! The authenticated session and the provider that owns it.
//!
//! API calls never hold on to a token: they ask the provider for a fresh one
//! every time, because identity tokens expire and rotate underneath a
//! long-running client.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::{Result, error::ValidationError};

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub uid:          String,
  pub email:        String,
  pub display_name: Option<String>,
}

impl User {
  /// Display name if known, else the email address.
  pub fn label(&self) -> &str {
    self
      .display_name
      .as_deref()
      .filter(|n| !n.is_empty())
      .unwrap_or(&self.email)
  }
}

/// Email/password sign-in input.
#[derive(Clone, Default)]
pub struct Credentials {
  pub email:    String,
  pub password: String,
}

impl Credentials {
  pub fn validate(&self) -> Result<(), ValidationError> {
    if self.email.trim().is_empty() || self.password.is_empty() {
      return Err(ValidationError::EmptyCredentials);
    }
    Ok(())
  }
}

impl std::fmt::Debug for Credentials {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Credentials")
      .field("email", &self.email)
      .field("password", &"<redacted>")
      .finish()
  }
}

/// Owner of the authentication session.
///
/// Implementations must be cheap to query: `current_user` is consulted by the
/// route guard on every navigation and `id_token` before every API call.
pub trait SessionProvider: Send + Sync {
  /// The signed-in user, or `None` when signed out.
  fn current_user(&self) -> Option<User>;

  /// A bearer token valid for at least the next request. Fails with
  /// [`crate::Error::Auth`] when there is no session.
  fn id_token(&self) -> impl Future<Output = Result<String>> + Send + '_;

  /// Establish a session.
  fn sign_in(
    &self,
    credentials: Credentials,
  ) -> impl Future<Output = Result<User>> + Send + '_;

  /// Drop the session. Subsequent API calls fail with an auth error.
  fn sign_out(&self);
}
