//! The list page shared by candidates and job descriptions: fetch once,
//! upload through the file picker, delete with confirmation, fuzzy filter.

use crossterm::event::{KeyCode, KeyEvent};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use recruit_core::{
  Result,
  upload::{FileRules, SelectedFile, UploadOutcome},
};

use super::{Command, Effect, LoadState, Notice, OneShot, UploadState, picker::FilePicker};

/// An entity that can be listed, uploaded and deleted by id.
pub trait Listed: Clone {
  /// Lowercase singular, for notices ("resume").
  const NOUN: &'static str;
  /// Sentence-case singular ("Resume").
  const TITLE: &'static str;
  const PLURAL: &'static str;

  fn id(&self) -> &str;

  /// Text the fuzzy filter matches against.
  fn haystack(&self) -> String;

  fn load_command() -> Command;
  fn upload_command(files: Vec<SelectedFile>) -> Command;
  fn delete_command(id: String) -> Command;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
  #[default]
  Browse,
  /// Typing a fuzzy filter query.
  Filter,
  /// Typing paths into the file picker.
  PickFiles,
}

pub struct Listing<T> {
  pub items:          Vec<T>,
  pub load:           LoadState,
  pub upload:         UploadState,
  pub picker:         FilePicker,
  /// Id awaiting delete confirmation.
  pub pending_delete: Option<String>,
  pub mode:           Mode,
  pub filter:         String,
  /// Position within [`Listing::visible`].
  pub cursor:         usize,
  fetch:              OneShot,
}

impl<T: Listed> Listing<T> {
  pub fn new(rules: FileRules) -> Self {
    Self {
      items:          Vec::new(),
      load:           LoadState::Idle,
      upload:         UploadState::Idle,
      picker:         FilePicker::new(rules),
      pending_delete: None,
      mode:           Mode::Browse,
      filter:         String::new(),
      cursor:         0,
      fetch:          OneShot::default(),
    }
  }

  pub fn is_typing(&self) -> bool { self.mode != Mode::Browse }

  /// Browsing with no confirmation prompt open.
  pub fn is_idle(&self) -> bool {
    self.mode == Mode::Browse && self.pending_delete.is_none()
  }

  // ── Fetch ─────────────────────────────────────────────────────────────────

  pub fn mount(&mut self) { self.fetch.arm(); }

  pub fn begin_load(&mut self) -> Vec<Effect> {
    if !self.fetch.take() {
      return Vec::new();
    }
    self.load = LoadState::Loading;
    vec![Effect::Call(T::load_command())]
  }

  pub fn loaded(&mut self, result: Result<Vec<T>>) -> Vec<Effect> {
    match result {
      Ok(items) => {
        tracing::debug!(count = items.len(), kind = T::PLURAL, "list loaded");
        self.items = items;
        self.load = LoadState::Ready;
        self.clamp_cursor();
        Vec::new()
      }
      Err(e) => {
        tracing::warn!(error = %e, kind = T::PLURAL, "list load failed");
        self.load = LoadState::Failed(e.to_string());
        vec![Effect::Notify(Notice::error(format!(
          "Failed to load {}: {e}",
          T::PLURAL
        )))]
      }
    }
  }

  // ── Filtered view ─────────────────────────────────────────────────────────

  pub fn visible(&self) -> Vec<&T> {
    if self.filter.is_empty() {
      return self.items.iter().collect();
    }
    let matcher = SkimMatcherV2::default();
    self
      .items
      .iter()
      .filter(|item| matcher.fuzzy_match(&item.haystack(), &self.filter).is_some())
      .collect()
  }

  pub fn selected(&self) -> Option<&T> { self.visible().get(self.cursor).copied() }

  fn clamp_cursor(&mut self) {
    let len = self.visible().len();
    self.cursor = self.cursor.min(len.saturating_sub(1));
  }

  // ── Upload ────────────────────────────────────────────────────────────────

  /// Validate the picker input into the selection buffer.
  pub fn pick(&mut self) -> Vec<Effect> {
    match self.picker.commit() {
      Ok(n) => vec![Effect::Notify(Notice::info(format!(
        "{n} file{} selected.",
        if n == 1 { "" } else { "s" }
      )))],
      Err(e) => vec![Effect::Notify(Notice::warning(e.to_string()))],
    }
  }

  pub fn submit(&mut self) -> Vec<Effect> {
    if self.upload == UploadState::Uploading {
      return Vec::new();
    }
    let files = self.picker.selected().to_vec();
    if files.is_empty() {
      return vec![Effect::Notify(Notice::warning(format!(
        "Please select a {} to upload.",
        T::NOUN
      )))];
    }
    self.upload = UploadState::Uploading;
    vec![
      Effect::Notify(Notice::info(format!(
        "Uploading and analyzing {}...",
        T::NOUN
      ))),
      Effect::Call(T::upload_command(files)),
    ]
  }

  pub fn uploaded(&mut self, result: Result<Vec<UploadOutcome>>) -> Vec<Effect> {
    self.upload = UploadState::Idle;
    let outcomes = match result {
      Ok(outcomes) => outcomes,
      Err(e) => {
        tracing::warn!(error = %e, kind = T::PLURAL, "upload failed");
        return vec![Effect::Notify(Notice::error(format!("Upload failed: {e}")))];
      }
    };

    let failed: Vec<String> = outcomes
      .iter()
      .filter(|o| !o.is_ok())
      .map(|o| format!("{}: {}", o.filename, o.error.as_deref().unwrap_or_default()))
      .collect();
    let notice = if failed.is_empty() {
      Notice::success(format!("{} processed successfully!", T::TITLE))
    } else {
      tracing::warn!(failed = failed.len(), kind = T::PLURAL, "some files were rejected");
      Notice::warning(format!(
        "{} of {} processed; {}",
        outcomes.len() - failed.len(),
        outcomes.len(),
        failed.join("; ")
      ))
    };
    let mut effects = vec![Effect::Notify(notice)];

    self.picker.reset();
    self.fetch.arm();
    effects.extend(self.begin_load());
    effects
  }

  // ── Delete ────────────────────────────────────────────────────────────────

  pub fn request_delete(&mut self) {
    self.pending_delete = self.selected().map(|item| item.id().to_string());
  }

  pub fn confirm_delete(&mut self) -> Vec<Effect> {
    match self.pending_delete.take() {
      Some(id) => vec![Effect::Call(T::delete_command(id))],
      None => Vec::new(),
    }
  }

  pub fn cancel_delete(&mut self) { self.pending_delete = None; }

  pub fn deleted(&mut self, id: &str, result: Result<()>) -> Vec<Effect> {
    match result {
      Ok(()) => {
        self.items.retain(|item| item.id() != id);
        self.clamp_cursor();
        vec![Effect::Notify(Notice::success(format!("{} deleted.", T::TITLE)))]
      }
      Err(e) => {
        tracing::warn!(error = %e, id, kind = T::PLURAL, "delete failed");
        vec![Effect::Notify(Notice::error(format!(
          "Failed to delete {}: {e}",
          T::NOUN
        )))]
      }
    }
  }

  // ── Keys ──────────────────────────────────────────────────────────────────

  pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
    if self.pending_delete.is_some() {
      match key.code {
        KeyCode::Char('y') | KeyCode::Enter => return self.confirm_delete(),
        KeyCode::Char('n') | KeyCode::Esc => self.cancel_delete(),
        _ => {}
      }
      return Vec::new();
    }

    match self.mode {
      Mode::Filter => {
        match key.code {
          KeyCode::Esc => {
            self.filter.clear();
            self.mode = Mode::Browse;
          }
          KeyCode::Enter => self.mode = Mode::Browse,
          KeyCode::Backspace => {
            self.filter.pop();
          }
          KeyCode::Char(c) => self.filter.push(c),
          _ => {}
        }
        self.cursor = 0;
        Vec::new()
      }
      Mode::PickFiles => match key.code {
        KeyCode::Esc => {
          self.mode = Mode::Browse;
          Vec::new()
        }
        KeyCode::Enter => {
          self.mode = Mode::Browse;
          self.pick()
        }
        KeyCode::Backspace => {
          self.picker.input.pop();
          Vec::new()
        }
        KeyCode::Char(c) => {
          self.picker.input.push(c);
          Vec::new()
        }
        _ => Vec::new(),
      },
      Mode::Browse => {
        match key.code {
          KeyCode::Down | KeyCode::Char('j') => {
            if self.cursor + 1 < self.visible().len() {
              self.cursor += 1;
            }
          }
          KeyCode::Up | KeyCode::Char('k') => {
            self.cursor = self.cursor.saturating_sub(1);
          }
          KeyCode::Char('/') => {
            self.mode = Mode::Filter;
            self.filter.clear();
            self.cursor = 0;
          }
          KeyCode::Char('u') => self.mode = Mode::PickFiles,
          KeyCode::Char('s') => return self.submit(),
          KeyCode::Char('d') | KeyCode::Delete => self.request_delete(),
          _ => {}
        }
        Vec::new()
      }
    }
  }
}
