//! Firebase Authentication over its REST API.
//!
//! Signs in with email and password, keeps the id token and refresh token in
//! memory, and swaps in a fresh id token shortly before the current one
//! expires. Nothing is persisted; a restart means signing in again.

use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, TimeDelta, Utc};
use recruit_core::{
  Error, Result,
  session::{Credentials, SessionProvider, User},
};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};

/// Refresh this long before the id token actually expires.
const REFRESH_MARGIN: TimeDelta = TimeDelta::seconds(60);

/// Endpoints and project key for the Firebase identity services.
#[derive(Debug, Clone)]
pub struct FirebaseConfig {
  /// The web API key of the Firebase project.
  pub api_key:          String,
  pub identity_url:     String,
  pub secure_token_url: String,
}

impl FirebaseConfig {
  pub fn new(api_key: impl Into<String>) -> Self {
    Self {
      api_key:          api_key.into(),
      identity_url:     "https://identitytoolkit.googleapis.com/v1".into(),
      secure_token_url: "https://securetoken.googleapis.com/v1".into(),
    }
  }
}

#[derive(Debug, Clone)]
struct Tokens {
  user:          User,
  id_token:      String,
  refresh_token: String,
  expires_at:    DateTime<Utc>,
}

/// `accounts:signInWithPassword` reply.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInReply {
  id_token:      String,
  refresh_token: String,
  expires_in:    String,
  local_id:      String,
  #[serde(default)]
  email:         String,
  #[serde(default)]
  display_name:  Option<String>,
}

/// Secure Token API reply (snake_case, unlike the identity toolkit).
#[derive(Debug, Deserialize)]
struct RefreshReply {
  id_token:      String,
  refresh_token: String,
  expires_in:    String,
}

fn expiry(expires_in: &str) -> DateTime<Utc> {
  let secs = expires_in.trim().parse::<i64>().unwrap_or(3600);
  Utc::now() + TimeDelta::seconds(secs)
}

/// Firebase's error bodies look like `{"error": {"message": "INVALID_PASSWORD"}}`.
fn firebase_message(body: &str) -> String {
  serde_json::from_str::<Value>(body)
    .ok()
    .and_then(|v| {
      v.pointer("/error/message")
        .and_then(Value::as_str)
        .map(str::to_string)
    })
    .unwrap_or_else(|| body.trim().to_string())
}

pub struct FirebaseAuth {
  client: Client,
  config: FirebaseConfig,
  tokens: RwLock<Option<Tokens>>,
}

impl FirebaseAuth {
  pub fn new(config: FirebaseConfig) -> Result<Self> {
    let client = Client::builder()
      .build()
      .map_err(|e| Error::Network(format!("failed to build HTTP client: {e}")))?;
    Ok(Self {
      client,
      config,
      tokens: RwLock::new(None),
    })
  }

  fn snapshot(&self) -> Option<Tokens> {
    self
      .tokens
      .read()
      .unwrap_or_else(PoisonError::into_inner)
      .clone()
  }

  fn store(&self, tokens: Option<Tokens>) {
    *self.tokens.write().unwrap_or_else(PoisonError::into_inner) = tokens;
  }

  async fn post_json<T: for<'de> Deserialize<'de>>(
    &self,
    req: reqwest::RequestBuilder,
  ) -> Result<T> {
    let resp = req
      .send()
      .await
      .map_err(|e| Error::Network(e.to_string()))?;
    let status = resp.status();
    let body = resp
      .text()
      .await
      .map_err(|e| Error::Network(e.to_string()))?;
    if !status.is_success() {
      return Err(Error::Auth(firebase_message(&body)));
    }
    Ok(serde_json::from_str(&body)?)
  }

  async fn refresh(&self, current: Tokens) -> Result<Tokens> {
    let url = format!(
      "{}/token?key={}",
      self.config.secure_token_url.trim_end_matches('/'),
      self.config.api_key
    );
    let reply: RefreshReply = self
      .post_json(self.client.post(url).form(&[
        ("grant_type", "refresh_token"),
        ("refresh_token", current.refresh_token.as_str()),
      ]))
      .await?;

    Ok(Tokens {
      user:          current.user,
      id_token:      reply.id_token,
      refresh_token: reply.refresh_token,
      expires_at:    expiry(&reply.expires_in),
    })
  }
}

impl SessionProvider for FirebaseAuth {
  fn current_user(&self) -> Option<User> { self.snapshot().map(|t| t.user) }

  async fn id_token(&self) -> Result<String> {
    let current = self
      .snapshot()
      .ok_or_else(|| Error::Auth("no active session".into()))?;

    if current.expires_at - Utc::now() > REFRESH_MARGIN {
      return Ok(current.id_token);
    }

    tracing::debug!(uid = %current.user.uid, "refreshing id token");
    match self.refresh(current).await {
      Ok(tokens) => {
        let token = tokens.id_token.clone();
        self.store(Some(tokens));
        Ok(token)
      }
      Err(e) => {
        tracing::warn!(error = %e, "token refresh failed; signing out");
        self.store(None);
        Err(Error::Auth(format!("session expired: {e}")))
      }
    }
  }

  async fn sign_in(&self, credentials: Credentials) -> Result<User> {
    credentials.validate()?;

    let url = format!(
      "{}/accounts:signInWithPassword?key={}",
      self.config.identity_url.trim_end_matches('/'),
      self.config.api_key
    );
    let reply: SignInReply = self
      .post_json(self.client.post(url).json(&json!({
        "email": credentials.email.trim(),
        "password": credentials.password,
        "returnSecureToken": true,
      })))
      .await?;

    let user = User {
      uid:          reply.local_id,
      email:        reply.email,
      display_name: reply.display_name.filter(|n| !n.is_empty()),
    };
    tracing::info!(uid = %user.uid, "signed in");
    self.store(Some(Tokens {
      user:          user.clone(),
      id_token:      reply.id_token,
      refresh_token: reply.refresh_token,
      expires_at:    expiry(&reply.expires_in),
    }));
    Ok(user)
  }

  fn sign_out(&self) {
    if self.snapshot().is_some() {
      tracing::info!("signed out");
    }
    self.store(None);
  }
}
