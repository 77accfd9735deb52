//! The session provider chosen at startup.

use recruit_client::{FirebaseAuth, StaticToken};
use recruit_core::{
  Result,
  session::{Credentials, SessionProvider, User},
};

use crate::config::Settings;

pub enum Session {
  Firebase(FirebaseAuth),
  Token(StaticToken),
}

impl Session {
  /// Firebase when an API key is configured, otherwise a static token (or no
  /// session at all).
  pub fn from_settings(settings: &Settings) -> Result<Self> {
    if let Some(config) = settings.firebase_config() {
      tracing::info!("using Firebase sign-in");
      return Ok(Self::Firebase(FirebaseAuth::new(config)?));
    }
    match settings.token.as_deref().filter(|t| !t.is_empty()) {
      Some(token) => {
        tracing::info!("using a pre-issued API token");
        Ok(Self::Token(StaticToken::new(token)))
      }
      None => {
        tracing::warn!("no Firebase key or token configured; sign-in is unavailable");
        Ok(Self::Token(StaticToken::signed_out()))
      }
    }
  }
}

impl SessionProvider for Session {
  fn current_user(&self) -> Option<User> {
    match self {
      Self::Firebase(s) => s.current_user(),
      Self::Token(s) => s.current_user(),
    }
  }

  async fn id_token(&self) -> Result<String> {
    match self {
      Self::Firebase(s) => s.id_token().await,
      Self::Token(s) => s.id_token().await,
    }
  }

  async fn sign_in(&self, credentials: Credentials) -> Result<User> {
    match self {
      Self::Firebase(s) => s.sign_in(credentials).await,
      Self::Token(s) => s.sign_in(credentials).await,
    }
  }

  fn sign_out(&self) {
    match self {
      Self::Firebase(s) => s.sign_out(),
      Self::Token(s) => s.sign_out(),
    }
  }
}
