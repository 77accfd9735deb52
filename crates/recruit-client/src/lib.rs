//! HTTP implementation of [`recruit_core::api::RecruitApi`] plus the session
//! providers that feed it bearer tokens.
//!
//! ```rust,ignore
//! let session = Arc::new(FirebaseAuth::new(FirebaseConfig::new(api_key))?);
//! let api = HttpClient::new(ApiConfig::new("http://localhost:8000"), session.clone())?;
//! session.sign_in(credentials).await?;
//! let candidates = api.list_candidates().await?;
//! ```

pub mod client;
pub mod firebase;
pub mod preview;
pub mod token;

pub use client::{ApiConfig, HttpClient};
pub use firebase::{FirebaseAuth, FirebaseConfig};
pub use token::StaticToken;
