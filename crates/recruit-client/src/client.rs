//! Async HTTP client wrapping the RecruitPro REST API.

use std::{sync::Arc, time::Duration};

use recruit_core::{
  Error, Result, ValidationError,
  api::RecruitApi,
  candidate::Candidate,
  job::JobDescription,
  session::SessionProvider,
  top_match::{self, TopMatchCandidate},
  upload::{UploadFile, UploadOutcome},
  weights::{RoleWeights, WeightConfiguration},
};
use reqwest::{
  Client, Method, RequestBuilder, Response,
  multipart::{Form, Part},
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

/// Multipart field the resume endpoint reads its files from.
const RESUME_FIELD: &str = "resumes";
/// Multipart field the job-description endpoint reads its files from.
const JD_FIELD: &str = "jd_files";

/// Connection settings for the RecruitPro API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  /// Scheme, host and port; the `/api` prefix is added per request.
  pub base_url: String,
  pub timeout:  Duration,
}

impl ApiConfig {
  pub fn new(base_url: impl Into<String>) -> Self {
    Self {
      base_url: base_url.into(),
      timeout:  Duration::from_secs(30),
    }
  }
}

/// Async HTTP client for the RecruitPro REST API.
///
/// Holds no token of its own: every request asks the [`SessionProvider`] for
/// a fresh one.
pub struct HttpClient<S> {
  client:  Client,
  config:  ApiConfig,
  session: Arc<S>,
}

impl<S: SessionProvider> HttpClient<S> {
  pub fn new(config: ApiConfig, session: Arc<S>) -> Result<Self> {
    let client = Client::builder()
      .timeout(config.timeout)
      .build()
      .map_err(|e| Error::Network(format!("failed to build HTTP client: {e}")))?;
    Ok(Self {
      client,
      config,
      session,
    })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  /// Start a request carrying the current bearer token.
  async fn authorized(&self, method: Method, path: &str) -> Result<RequestBuilder> {
    let token = self.session.id_token().await?;
    Ok(self.client.request(method, self.url(path)).bearer_auth(token))
  }

  /// Send a request and turn transport failures and non-2xx statuses into
  /// errors.
  async fn send(&self, req: RequestBuilder, label: &str) -> Result<Response> {
    tracing::debug!(request = label, "sending");
    let resp = req.send().await.map_err(|e| {
      tracing::warn!(request = label, error = %e, "request failed");
      Error::Network(e.to_string())
    })?;

    let status = resp.status();
    if status.is_success() {
      return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    let message = error_detail(&body).unwrap_or_else(|| {
      status.canonical_reason().unwrap_or("request failed").to_string()
    });
    tracing::warn!(request = label, status = status.as_u16(), %message, "server error");
    Err(Error::Http {
      status: status.as_u16(),
      message,
    })
  }

  async fn body(resp: Response) -> Result<Value> {
    let bytes = resp
      .bytes()
      .await
      .map_err(|e| Error::Network(e.to_string()))?;
    if bytes.is_empty() {
      return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(&bytes)?)
  }

  /// `GET` a resource and unwrap `envelope` from the JSON body.
  async fn get_enveloped<T: DeserializeOwned>(
    &self,
    path: &str,
    envelope: &str,
  ) -> Result<T> {
    let label = format!("GET {path}");
    let req = self.authorized(Method::GET, path).await?;
    let resp = self.send(req, &label).await?;
    unwrap_envelope(Self::body(resp).await?, envelope)
  }

  async fn delete(&self, path: &str) -> Result<()> {
    let label = format!("DELETE {path}");
    let req = self.authorized(Method::DELETE, path).await?;
    self.send(req, &label).await?;
    Ok(())
  }

  async fn upload(
    &self,
    path: &str,
    field: &str,
    files: Vec<UploadFile>,
  ) -> Result<Vec<UploadOutcome>> {
    if files.is_empty() {
      return Err(ValidationError::NoFiles.into());
    }
    let label = format!("POST {path} ({} files)", files.len());
    let req = self.authorized(Method::POST, path).await?;
    let resp = self.send(req.multipart(form(field, files)?), &label).await?;
    parse_outcomes(Self::body(resp).await?)
  }
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

/// Build a multipart form with one part per file, in the caller's order.
fn form(field: &str, files: Vec<UploadFile>) -> Result<Form> {
  files.into_iter().try_fold(Form::new(), |form, file| {
    let part = Part::bytes(file.bytes)
      .file_name(file.file_name)
      .mime_str(file.media_type.mime())
      .map_err(|e| Error::Decode(format!("invalid media type: {e}")))?;
    Ok(form.part(field.to_string(), part))
  })
}

/// Pull the FastAPI `detail` (or a bare `error`) message out of an error body.
fn error_detail(body: &str) -> Option<String> {
  let trimmed = body.trim();
  if trimmed.is_empty() {
    return None;
  }
  match serde_json::from_str::<Value>(trimmed) {
    Ok(v) => v
      .get("detail")
      .or_else(|| v.get("error"))
      .map(|d| match d {
        Value::String(s) => s.clone(),
        other => other.to_string(),
      }),
    Err(_) => Some(trimmed.to_string()),
  }
}

fn unwrap_envelope<T: DeserializeOwned>(mut body: Value, key: &str) -> Result<T> {
  let inner = body
    .get_mut(key)
    .map(Value::take)
    .ok_or_else(|| Error::Decode(format!("response has no `{key}` field")))?;
  Ok(serde_json::from_value(inner)?)
}

/// Upload replies are `{status, results: [...]}`; older job-description
/// deployments answer with a bare string instead.
fn parse_outcomes(mut body: Value) -> Result<Vec<UploadOutcome>> {
  match body.get_mut("results").map(Value::take) {
    Some(results) => Ok(serde_json::from_value(results)?),
    None if body.is_string() || body.is_null() || body.is_object() => Ok(Vec::new()),
    None => Err(Error::Decode("unexpected upload response".into())),
  }
}

// ─── RecruitApi ───────────────────────────────────────────────────────────────

impl<S: SessionProvider> RecruitApi for HttpClient<S> {
  /// `POST /api/candidate-resume`
  async fn upload_resumes(&self, files: Vec<UploadFile>) -> Result<Vec<UploadOutcome>> {
    self.upload("/candidate-resume", RESUME_FIELD, files).await
  }

  /// `GET /api/candidate-resumes`
  async fn list_candidates(&self) -> Result<Vec<Candidate>> {
    self.get_enveloped("/candidate-resumes", "candidates").await
  }

  /// `DELETE /api/candidate-resume/{id}`
  async fn delete_candidate<'a>(&'a self, id: &'a str) -> Result<()> {
    self.delete(&format!("/candidate-resume/{id}")).await
  }

  /// `POST /api/upload-jd`
  async fn upload_job_descriptions(
    &self,
    files: Vec<UploadFile>,
  ) -> Result<Vec<UploadOutcome>> {
    self.upload("/upload-jd", JD_FIELD, files).await
  }

  /// `GET /api/job-descriptions`
  async fn list_job_descriptions(&self) -> Result<Vec<JobDescription>> {
    self.get_enveloped("/job-descriptions", "job_descriptions").await
  }

  /// `DELETE /api/job-description/{id}`
  async fn delete_job_description<'a>(&'a self, id: &'a str) -> Result<()> {
    self.delete(&format!("/job-description/{id}")).await
  }

  /// `GET /api/top-score/{jd_id}`
  async fn top_matches<'a>(&'a self, jd_id: &'a str) -> Result<Vec<TopMatchCandidate>> {
    let mut matches: Vec<TopMatchCandidate> = self
      .get_enveloped(&format!("/top-score/{jd_id}"), "top_score_candidates")
      .await?;
    top_match::rank(&mut matches);
    Ok(matches)
  }

  /// `GET /api/user-weights`
  async fn weights(&self) -> Result<WeightConfiguration> {
    self.get_enveloped("/user-weights", "weights").await
  }

  /// `PUT /api/user-weights/{role}`
  async fn update_weights<'a>(
    &'a self,
    role: &'a str,
    weights: &'a RoleWeights,
  ) -> Result<()> {
    let path = format!("/user-weights/{role}");
    let label = format!("PUT {path}");
    let req = self.authorized(Method::PUT, &path).await?;
    let resp = self
      .send(req.json(&json!({ "weights": weights })), &label)
      .await?;

    // An unknown role is reported in a 200 body rather than by status.
    if let Some(message) = Self::body(resp).await?.get("error").and_then(Value::as_str) {
      tracing::warn!(role, %message, "weight update refused");
      return Err(Error::Http {
        status:  404,
        message: message.to_string(),
      });
    }
    Ok(())
  }
}
