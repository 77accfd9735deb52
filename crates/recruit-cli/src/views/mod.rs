//! Page state machines.
//!
//! Views never touch the network or the terminal. Key presses and task
//! replies go in; [`Effect`]s come out and the [`App`](crate::app::App)
//! carries them out: spawning API calls, raising notices, navigating.

pub mod candidates;
pub mod integrations;
pub mod job_descriptions;
pub mod landing;
pub mod listing;
pub mod picker;
pub mod sign_in;
pub mod top_matches;
pub mod weight_editor;

use crossterm::event::KeyEvent;
use recruit_core::{
  Result,
  candidate::Candidate,
  job::JobDescription,
  session::{Credentials, User},
  top_match::TopMatchCandidate,
  upload::{FileRules, SelectedFile, UploadOutcome},
  weights::{RoleWeights, WeightConfiguration},
};
use strum::IntoStaticStr;

use crate::route::Route;

use self::{
  candidates::CandidatesView, job_descriptions::JobDescriptionsView,
  sign_in::SignInView, top_matches::TopMatchesView,
  weight_editor::WeightEditor,
};

// ─── Mount bookkeeping ───────────────────────────────────────────────────────

/// One lifetime of a page, from navigating to it until navigating away.
/// Replies tagged with an older id are dropped unapplied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MountId(pub u64);

impl MountId {
  pub fn next(self) -> Self { Self(self.0 + 1) }
}

/// Fires once per arming. Mounting arms it; the first load consumes it.
#[derive(Debug, Default)]
pub struct OneShot {
  armed: bool,
}

impl OneShot {
  pub fn arm(&mut self) { self.armed = true; }

  pub fn take(&mut self) -> bool { std::mem::take(&mut self.armed) }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
  #[default]
  Idle,
  Loading,
  Ready,
  Failed(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UploadState {
  #[default]
  Idle,
  Uploading,
}

// ─── Notices ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
pub enum Level {
  #[strum(to_string = "OK")]
  Success,
  #[strum(to_string = "INFO")]
  Info,
  #[strum(to_string = "WARN")]
  Warning,
  #[strum(to_string = "ERROR")]
  Error,
}

/// A transient message for the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
  pub level: Level,
  pub text:  String,
}

impl Notice {
  pub fn success(text: impl Into<String>) -> Self {
    Self { level: Level::Success, text: text.into() }
  }

  pub fn info(text: impl Into<String>) -> Self {
    Self { level: Level::Info, text: text.into() }
  }

  pub fn warning(text: impl Into<String>) -> Self {
    Self { level: Level::Warning, text: text.into() }
  }

  pub fn error(text: impl Into<String>) -> Self {
    Self { level: Level::Error, text: text.into() }
  }
}

// ─── Commands, replies, effects ──────────────────────────────────────────────

/// Work a view needs done off the input loop.
#[derive(Debug)]
pub enum Command {
  LoadCandidates,
  UploadResumes(Vec<SelectedFile>),
  DeleteCandidate(String),
  LoadJobDescriptions,
  UploadJobDescriptions(Vec<SelectedFile>),
  DeleteJobDescription(String),
  LoadTopMatches(String),
  LoadWeights,
  SaveWeights { role: String, weights: RoleWeights },
  SignIn(Credentials),
}

/// The result of a [`Command`], routed back to the page that issued it.
#[derive(Debug)]
pub enum Reply {
  Candidates(Result<Vec<Candidate>>),
  ResumesUploaded(Result<Vec<UploadOutcome>>),
  CandidateDeleted { id: String, result: Result<()> },
  JobDescriptions(Result<Vec<JobDescription>>),
  JobDescriptionsUploaded(Result<Vec<UploadOutcome>>),
  JobDescriptionDeleted { id: String, result: Result<()> },
  TopMatches(Result<Vec<TopMatchCandidate>>),
  Weights(Result<WeightConfiguration>),
  WeightsSaved {
    role:    String,
    weights: RoleWeights,
    result:  Result<()>,
  },
  SignedIn(Result<User>),
}

#[derive(Debug)]
pub enum Effect {
  Call(Command),
  Notify(Notice),
  Navigate(Route),
}

// ─── Page ────────────────────────────────────────────────────────────────────

/// Construction inputs shared by all pages.
#[derive(Debug, Clone)]
pub struct PageOptions {
  pub resume_rules:          FileRules,
  pub job_description_rules: FileRules,
  pub default_email:         Option<String>,
}

/// The active page and its state.
pub enum Page {
  Landing,
  SignIn(SignInView),
  Candidates(CandidatesView),
  JobDescriptions(JobDescriptionsView),
  TopMatches(TopMatchesView),
  Integrations,
  Score(WeightEditor),
}

impl Page {
  pub fn for_route(route: &Route, options: &PageOptions) -> Self {
    match route {
      Route::Landing => Self::Landing,
      Route::SignIn => Self::SignIn(SignInView::new(options.default_email.clone())),
      Route::Candidates => {
        Self::Candidates(CandidatesView::new(options.resume_rules.clone()))
      }
      Route::JobDescriptions => Self::JobDescriptions(JobDescriptionsView::new(
        options.job_description_rules.clone(),
      )),
      Route::TopMatches { jd_id } => Self::TopMatches(TopMatchesView::new(jd_id.clone())),
      Route::Integrations => Self::Integrations,
      Route::Score => Self::Score(WeightEditor::default()),
    }
  }

  /// Arm the page's fetch for this mount.
  pub fn mount(&mut self) {
    match self {
      Self::Candidates(v) => v.list.mount(),
      Self::JobDescriptions(v) => v.list.mount(),
      Self::TopMatches(v) => v.mount(),
      Self::Score(v) => v.mount(),
      Self::Landing | Self::SignIn(_) | Self::Integrations => {}
    }
  }

  /// Called every frame; emits the fetch only on the first call after
  /// mounting.
  pub fn begin_load(&mut self) -> Vec<Effect> {
    match self {
      Self::Candidates(v) => v.list.begin_load(),
      Self::JobDescriptions(v) => v.list.begin_load(),
      Self::TopMatches(v) => v.begin_load(),
      Self::Score(v) => v.begin_load(),
      Self::Landing | Self::SignIn(_) | Self::Integrations => Vec::new(),
    }
  }

  pub fn apply(&mut self, reply: Reply) -> Vec<Effect> {
    match (self, reply) {
      (Self::Candidates(v), reply) => v.apply(reply),
      (Self::JobDescriptions(v), reply) => v.apply(reply),
      (Self::TopMatches(v), Reply::TopMatches(result)) => v.loaded(result),
      (Self::Score(v), reply) => v.apply(reply),
      (Self::SignIn(v), Reply::SignedIn(result)) => v.signed_in(result),
      (_, reply) => {
        tracing::debug!(?reply, "reply does not belong to the active page");
        Vec::new()
      }
    }
  }

  pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
    match self {
      Self::Landing => landing::handle_key(key),
      Self::SignIn(v) => v.handle_key(key),
      Self::Candidates(v) => v.handle_key(key),
      Self::JobDescriptions(v) => v.handle_key(key),
      Self::TopMatches(v) => v.handle_key(key),
      Self::Integrations => Vec::new(),
      Self::Score(v) => v.handle_key(key),
    }
  }

  /// Whether printable keys belong to a text field right now.
  pub fn is_typing(&self) -> bool {
    match self {
      Self::SignIn(_) => true,
      Self::Candidates(v) => v.list.is_typing(),
      Self::JobDescriptions(v) => v.list.is_typing(),
      Self::Score(v) => v.is_typing(),
      Self::Landing | Self::TopMatches(_) | Self::Integrations => false,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn one_shot_fires_once_per_arming() {
    let mut shot = OneShot::default();
    assert!(!shot.take());
    shot.arm();
    assert!(shot.take());
    assert!(!shot.take());
    shot.arm();
    assert!(shot.take());
  }

  #[test]
  fn pages_fetch_once_per_mount() {
    let options = PageOptions {
      resume_rules:          FileRules::resumes(Some(2)),
      job_description_rules: FileRules::job_descriptions(Some(2)),
      default_email:         None,
    };
    let mut page = Page::for_route(&Route::Candidates, &options);

    // Not mounted yet: nothing to fetch.
    assert!(page.begin_load().is_empty());

    page.mount();
    let first = page.begin_load();
    assert!(matches!(first.as_slice(), [Effect::Call(Command::LoadCandidates)]));
    for _ in 0..5 {
      assert!(page.begin_load().is_empty());
    }
  }

  #[test]
  fn static_pages_never_fetch() {
    let options = PageOptions {
      resume_rules:          FileRules::resumes(None),
      job_description_rules: FileRules::job_descriptions(None),
      default_email:         None,
    };
    for route in [Route::Landing, Route::SignIn, Route::Integrations] {
      let mut page = Page::for_route(&route, &options);
      page.mount();
      assert!(page.begin_load().is_empty());
    }
  }
}
