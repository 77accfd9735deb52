//! Layered settings: defaults, then an optional TOML file, then
//! `RECRUITPRO_*` environment variables, then command-line flags.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use anyhow::Context as _;
use config::{Config, Environment, File};
use recruit_client::{ApiConfig, FirebaseConfig};
use recruit_core::upload::FileRules;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  /// Scheme, host and port of the RecruitPro API.
  pub base_url:             String,
  /// Enables interactive email/password sign-in through Firebase.
  #[serde(default)]
  pub firebase_api_key:     Option<String>,
  #[serde(default)]
  pub identity_url:         Option<String>,
  #[serde(default)]
  pub secure_token_url:     Option<String>,
  /// Pre-fills the sign-in form.
  #[serde(default)]
  pub email:                Option<String>,
  /// A pre-issued bearer token. Used when no Firebase key is configured.
  #[serde(default)]
  pub token:                Option<String>,
  pub request_timeout_secs: u64,
  pub log_file:             PathBuf,
  /// Files per resume upload; `0` lifts the limit.
  pub candidate_max_files:  usize,
  /// Files per job-description upload; `0` lifts the limit.
  pub jd_max_files:         usize,
}

impl Settings {
  /// Build settings from every layer. `overrides` are `(key, value)` pairs
  /// from the command line; `None` values leave lower layers untouched.
  pub fn load(
    path: Option<&Path>,
    overrides: &[(&str, Option<String>)],
  ) -> anyhow::Result<Self> {
    let mut builder = Config::builder()
      .set_default("base_url", DEFAULT_BASE_URL)?
      .set_default("request_timeout_secs", 30)?
      .set_default("log_file", "recruitpro.log")?
      .set_default("candidate_max_files", 2)?
      .set_default("jd_max_files", 2)?;

    builder = match path {
      Some(path) => builder.add_source(File::from(path.to_path_buf()).required(true)),
      None => builder.add_source(File::with_name("recruitpro").required(false)),
    };
    builder = builder.add_source(Environment::with_prefix("RECRUITPRO"));

    for (key, value) in overrides {
      builder = builder.set_override_option(*key, value.clone())?;
    }

    builder
      .build()
      .context("failed to read configuration")?
      .try_deserialize()
      .context("failed to deserialise settings")
  }

  pub fn api_config(&self) -> ApiConfig {
    ApiConfig {
      base_url: self.base_url.clone(),
      timeout:  Duration::from_secs(self.request_timeout_secs),
    }
  }

  /// `None` when no API key is configured.
  pub fn firebase_config(&self) -> Option<FirebaseConfig> {
    let key = self.firebase_api_key.as_deref().filter(|k| !k.is_empty())?;
    let mut config = FirebaseConfig::new(key);
    if let Some(url) = &self.identity_url {
      config.identity_url = url.clone();
    }
    if let Some(url) = &self.secure_token_url {
      config.secure_token_url = url.clone();
    }
    Some(config)
  }

  pub fn resume_rules(&self) -> FileRules {
    FileRules::resumes(limit(self.candidate_max_files))
  }

  pub fn job_description_rules(&self) -> FileRules {
    FileRules::job_descriptions(limit(self.jd_max_files))
  }
}

fn limit(n: usize) -> Option<usize> { (n > 0).then_some(n) }

#[cfg(test)]
mod tests {
  use super::*;

  fn write_toml(name: &str, body: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
      "recruitpro-{name}-{}.toml",
      std::process::id()
    ));
    std::fs::write(&path, body).unwrap();
    path
  }

  #[test]
  fn file_values_fill_in_defaults() {
    let path = write_toml(
      "file",
      r#"
        base_url = "https://recruit.example"
        firebase_api_key = "abc"
        jd_max_files = 0
      "#,
    );
    let s = Settings::load(Some(&path), &[]).unwrap();
    assert_eq!(s.base_url, "https://recruit.example");
    assert_eq!(s.request_timeout_secs, 30);
    assert_eq!(s.log_file, PathBuf::from("recruitpro.log"));
    assert_eq!(s.resume_rules().max_files, Some(2));
    assert_eq!(s.job_description_rules().max_files, None);

    let fb = s.firebase_config().unwrap();
    assert_eq!(fb.api_key, "abc");
    assert!(fb.identity_url.starts_with("https://identitytoolkit"));
  }

  #[test]
  fn flags_override_the_file() {
    let path = write_toml("flags", r#"base_url = "https://from-file.example""#);
    let s = Settings::load(
      Some(&path),
      &[
        ("base_url", Some("http://127.0.0.1:9000".into())),
        ("token", None),
      ],
    )
    .unwrap();
    assert_eq!(s.base_url, "http://127.0.0.1:9000");
    assert_eq!(s.api_config().timeout, Duration::from_secs(30));
  }

  #[test]
  fn missing_explicit_file_is_an_error() {
    let path = std::env::temp_dir().join("recruitpro-does-not-exist.toml");
    assert!(Settings::load(Some(&path), &[]).is_err());
  }

  #[test]
  fn no_api_key_means_no_firebase() {
    let path = write_toml("nokey", r#"firebase_api_key = """#);
    let s = Settings::load(Some(&path), &[]).unwrap();
    assert!(s.firebase_config().is_none());
  }
}
