//! Scoring Configuration page: per-role category weights.
//!
//! Edits go to a draft copy of the selected role. Nothing is sent until the
//! user saves, and a save only goes out when the draft sums to 100.

use crossterm::event::{KeyCode, KeyEvent};
use recruit_core::{
  Result,
  weights::{REQUIRED_TOTAL, RoleWeights, WeightConfiguration},
};

use super::{Command, Effect, LoadState, Notice, OneShot, Reply};

const SAVED: &str = "Weights updated successfully.";
const SAVE_FAILED: &str = "Failed to update weights.";
const LOAD_FAILED: &str = "Failed to load weights.";

#[derive(Default)]
pub struct WeightEditor {
  /// Last known server state.
  pub config: WeightConfiguration,
  pub load:   LoadState,
  pub role:   Option<String>,
  pub draft:  RoleWeights,
  /// Selected category row.
  pub cursor: usize,
  pub saving: bool,
  /// Digits typed for the selected category, not yet applied.
  pub entry:  Option<String>,
  fetch:      OneShot,
}

impl WeightEditor {
  pub fn mount(&mut self) { self.fetch.arm(); }

  pub fn begin_load(&mut self) -> Vec<Effect> {
    if !self.fetch.take() {
      return Vec::new();
    }
    self.load = LoadState::Loading;
    vec![Effect::Call(Command::LoadWeights)]
  }

  pub fn is_typing(&self) -> bool { self.entry.is_some() }

  pub fn apply(&mut self, reply: Reply) -> Vec<Effect> {
    match reply {
      Reply::Weights(result) => self.loaded(result),
      Reply::WeightsSaved { role, weights, result } => self.saved(role, weights, result),
      other => {
        tracing::debug!(reply = ?other, "ignored by weight editor");
        Vec::new()
      }
    }
  }

  fn loaded(&mut self, result: Result<WeightConfiguration>) -> Vec<Effect> {
    match result {
      Ok(config) => {
        self.config = config;
        self.load = LoadState::Ready;
        if let Some(role) = self.config.default_role().map(str::to_string) {
          self.select_role(&role);
        }
        Vec::new()
      }
      Err(e) => {
        tracing::warn!(error = %e, "weights load failed");
        self.load = LoadState::Failed(e.to_string());
        vec![Effect::Notify(Notice::error(LOAD_FAILED))]
      }
    }
  }

  // ── Draft editing ─────────────────────────────────────────────────────────

  /// Switch to `role`, discarding any unsaved edits to the previous one.
  pub fn select_role(&mut self, role: &str) {
    let Some(weights) = self.config.role(role) else {
      return;
    };
    self.draft = weights.clone();
    self.role = Some(role.to_string());
    self.cursor = 0;
    self.entry = None;
  }

  fn cycle_role(&mut self, forward: bool) {
    let roles: Vec<String> = self.config.roles().map(str::to_string).collect();
    if roles.is_empty() {
      return;
    }
    let current = self
      .role
      .as_ref()
      .and_then(|r| roles.iter().position(|x| x == r))
      .unwrap_or(0);
    let next = if forward {
      (current + 1) % roles.len()
    } else {
      (current + roles.len() - 1) % roles.len()
    };
    self.select_role(&roles[next]);
  }

  pub fn selected_category(&self) -> Option<String> {
    self.draft.categories().nth(self.cursor).map(str::to_string)
  }

  /// Overwrite the selected category's weight, clamped to `0..=100`.
  pub fn set_selected(&mut self, weight: i64) {
    if let Some(category) = self.selected_category() {
      self.draft.set(&category, weight.clamp(0, REQUIRED_TOTAL));
    }
  }

  fn adjust(&mut self, delta: i64) {
    if let Some(current) = self.selected_category().and_then(|c| self.draft.get(&c)) {
      self.set_selected(current + delta);
    }
  }

  /// Whether the draft differs from the last known server state.
  pub fn is_dirty(&self) -> bool {
    self
      .role
      .as_deref()
      .and_then(|r| self.config.role(r))
      .is_some_and(|saved| *saved != self.draft)
  }

  // ── Save ──────────────────────────────────────────────────────────────────

  pub fn save(&mut self) -> Vec<Effect> {
    if self.saving {
      return Vec::new();
    }
    let Some(role) = self.role.clone() else {
      return Vec::new();
    };
    if let Err(e) = self.draft.validate() {
      return vec![Effect::Notify(Notice::warning(e.to_string()))];
    }
    self.saving = true;
    vec![Effect::Call(Command::SaveWeights {
      role,
      weights: self.draft.clone(),
    })]
  }

  fn saved(&mut self, role: String, weights: RoleWeights, result: Result<()>) -> Vec<Effect> {
    self.saving = false;
    match result {
      Ok(()) => {
        tracing::info!(%role, "weights saved");
        self.config.insert(role, weights);
        vec![Effect::Notify(Notice::success(SAVED))]
      }
      Err(e) => {
        tracing::warn!(error = %e, %role, "weights save failed");
        vec![Effect::Notify(Notice::error(SAVE_FAILED))]
      }
    }
  }

  // ── Keys ──────────────────────────────────────────────────────────────────

  pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
    if let Some(entry) = &mut self.entry {
      match key.code {
        KeyCode::Char(c) if c.is_ascii_digit() && entry.len() < 3 => entry.push(c),
        KeyCode::Backspace => {
          entry.pop();
        }
        KeyCode::Enter => {
          let value = entry.parse::<i64>().ok();
          self.entry = None;
          if let Some(value) = value {
            self.set_selected(value);
          }
        }
        KeyCode::Esc => self.entry = None,
        _ => {}
      }
      return Vec::new();
    }

    match key.code {
      KeyCode::Down | KeyCode::Char('j') => {
        if self.cursor + 1 < self.draft.0.len() {
          self.cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => self.cursor = self.cursor.saturating_sub(1),
      KeyCode::Right | KeyCode::Char('l') => self.cycle_role(true),
      KeyCode::Left | KeyCode::Char('h') => self.cycle_role(false),
      KeyCode::Char('+') | KeyCode::Char('=') => self.adjust(1),
      KeyCode::Char('-') => self.adjust(-1),
      KeyCode::Char(c) if c.is_ascii_digit() => {
        if self.selected_category().is_some() {
          self.entry = Some(c.to_string());
        }
      }
      KeyCode::Char('r') => {
        if let Some(role) = self.role.clone() {
          self.select_role(&role);
        }
      }
      KeyCode::Char('s') => return self.save(),
      _ => {}
    }
    Vec::new()
  }
}
