//! A session backed by a pre-issued bearer token.
//!
//! Useful against development backends and in scripts where an id token has
//! already been minted elsewhere. The token is never refreshed; when it
//! expires the server answers 401 and the user signs out and back in.

use std::sync::{PoisonError, RwLock};

use recruit_core::{
  Error, Result,
  session::{Credentials, SessionProvider, User},
};

pub struct StaticToken {
  token: RwLock<Option<String>>,
  user:  User,
}

impl StaticToken {
  pub fn new(token: impl Into<String>) -> Self {
    Self {
      token: RwLock::new(Some(token.into())),
      user:  User {
        uid:          "token".into(),
        email:        String::new(),
        display_name: Some("API token".into()),
      },
    }
  }

  /// A provider with no session at all; every API call fails with an auth
  /// error until the process is restarted with a token.
  pub fn signed_out() -> Self {
    let provider = Self::new("");
    provider.sign_out();
    provider
  }
}

impl SessionProvider for StaticToken {
  fn current_user(&self) -> Option<User> {
    let guard = self.token.read().unwrap_or_else(PoisonError::into_inner);
    guard.as_ref().map(|_| self.user.clone())
  }

  async fn id_token(&self) -> Result<String> {
    self
      .token
      .read()
      .unwrap_or_else(PoisonError::into_inner)
      .clone()
      .ok_or_else(|| Error::Auth("no active session".into()))
  }

  async fn sign_in(&self, _credentials: Credentials) -> Result<User> {
    Err(Error::Auth(
      "interactive sign-in needs a Firebase API key".into(),
    ))
  }

  fn sign_out(&self) {
    *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
  }
}
