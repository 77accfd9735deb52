//! The `RecruitApi` trait: every backend capability the dashboard uses.
//!
//! `recruit-client` implements it over HTTP; the views depend only on this
//! abstraction, which lets their state machines be driven by in-memory fakes.
//!
//! Contract shared by every method:
//! - the current session's token is resolved freshly for each call; with no
//!   session the call fails with [`Error::Auth`](crate::Error::Auth) and
//!   nothing is sent;
//! - transport failures are [`Error::Network`](crate::Error::Network), non-2xx
//!   replies [`Error::Http`](crate::Error::Http);
//! - list payloads are unwrapped from their response envelope and normalised
//!   into the canonical entity types.

use std::future::Future;

use crate::{
  Result,
  candidate::Candidate,
  job::JobDescription,
  top_match::TopMatchCandidate,
  upload::{UploadFile, UploadOutcome},
  weights::{RoleWeights, WeightConfiguration},
};

pub trait RecruitApi: Send + Sync {
  // ── Candidates ────────────────────────────────────────────────────────

  /// Upload one or more resumes, in order. Fails with a validation error
  /// when `files` is empty.
  fn upload_resumes(
    &self,
    files: Vec<UploadFile>,
  ) -> impl Future<Output = Result<Vec<UploadOutcome>>> + Send + '_;

  fn list_candidates(
    &self,
  ) -> impl Future<Output = Result<Vec<Candidate>>> + Send + '_;

  /// Delete a candidate and its stored resume. The caller drops the id from
  /// its own state; nothing is refetched.
  fn delete_candidate<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<()>> + Send + 'a;

  // ── Job descriptions ──────────────────────────────────────────────────

  fn upload_job_descriptions(
    &self,
    files: Vec<UploadFile>,
  ) -> impl Future<Output = Result<Vec<UploadOutcome>>> + Send + '_;

  fn list_job_descriptions(
    &self,
  ) -> impl Future<Output = Result<Vec<JobDescription>>> + Send + '_;

  fn delete_job_description<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<()>> + Send + 'a;

  // ── Matching ──────────────────────────────────────────────────────────

  /// Candidates ranked against `jd_id`, highest total score first.
  fn top_matches<'a>(
    &'a self,
    jd_id: &'a str,
  ) -> impl Future<Output = Result<Vec<TopMatchCandidate>>> + Send + 'a;

  // ── Weights ───────────────────────────────────────────────────────────

  fn weights(
    &self,
  ) -> impl Future<Output = Result<WeightConfiguration>> + Send + '_;

  /// Persist one role's weights. Callers validate the sum first.
  fn update_weights<'a>(
    &'a self,
    role: &'a str,
    weights: &'a RoleWeights,
  ) -> impl Future<Output = Result<()>> + Send + 'a;
}
