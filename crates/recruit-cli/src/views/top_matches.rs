//! Top Matches page: candidates ranked against one job description.

use crossterm::event::{KeyCode, KeyEvent};
use recruit_client::preview;
use recruit_core::{Result, top_match::TopMatchCandidate};

use super::{Command, Effect, LoadState, Notice, OneShot};
use crate::route::Route;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
  /// Score breakdown table for the selected match.
  Breakdown,
  /// Viewer link for the selected match's resume; `None` when it has none.
  Preview(Option<String>),
}

pub struct TopMatchesView {
  pub jd_id:   String,
  /// Ranked, highest total score first.
  pub matches: Vec<TopMatchCandidate>,
  pub load:    LoadState,
  pub cursor:  usize,
  pub overlay: Option<Overlay>,
  fetch:       OneShot,
}

impl TopMatchesView {
  pub fn new(jd_id: String) -> Self {
    Self {
      jd_id,
      matches: Vec::new(),
      load: LoadState::Idle,
      cursor: 0,
      overlay: None,
      fetch: OneShot::default(),
    }
  }

  pub fn mount(&mut self) { self.fetch.arm(); }

  pub fn begin_load(&mut self) -> Vec<Effect> {
    if !self.fetch.take() {
      return Vec::new();
    }
    self.load = LoadState::Loading;
    vec![Effect::Call(Command::LoadTopMatches(self.jd_id.clone()))]
  }

  pub fn loaded(&mut self, result: Result<Vec<TopMatchCandidate>>) -> Vec<Effect> {
    match result {
      Ok(matches) => {
        self.matches = matches;
        self.load = LoadState::Ready;
        self.cursor = self.cursor.min(self.matches.len().saturating_sub(1));
        Vec::new()
      }
      // Nothing scored yet. The backend may wrap its 404 in a 500.
      Err(e) if e.is_not_found() => {
        tracing::debug!(jd_id = %self.jd_id, "no top matches yet");
        self.matches.clear();
        self.load = LoadState::Ready;
        Vec::new()
      }
      Err(e) => {
        tracing::warn!(error = %e, jd_id = %self.jd_id, "top matches load failed");
        self.load = LoadState::Failed(e.to_string());
        vec![Effect::Notify(Notice::error(format!(
          "Failed to load top matches: {e}"
        )))]
      }
    }
  }

  pub fn selected(&self) -> Option<&TopMatchCandidate> { self.matches.get(self.cursor) }

  /// 1-based rank of the selected match.
  pub fn rank(&self) -> Option<usize> { self.selected().map(|_| self.cursor + 1) }

  pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
    if self.overlay.is_some() {
      if matches!(key.code, KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('p')) {
        self.overlay = None;
      }
      return Vec::new();
    }

    match key.code {
      KeyCode::Down | KeyCode::Char('j') => {
        if self.cursor + 1 < self.matches.len() {
          self.cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => self.cursor = self.cursor.saturating_sub(1),
      KeyCode::Char('b') => {
        if self.selected().is_some() {
          self.overlay = Some(Overlay::Breakdown);
        }
      }
      KeyCode::Char('p') => {
        if let Some(m) = self.selected() {
          self.overlay = Some(Overlay::Preview(preview::embed_url(&m.resume_url)));
        }
      }
      KeyCode::Esc | KeyCode::Left => {
        return vec![Effect::Navigate(Route::JobDescriptions)];
      }
      _ => {}
    }
    Vec::new()
  }
}

#[cfg(test)]
mod tests {
  use crossterm::event::KeyModifiers;
  use recruit_core::Error;
  use serde_json::json;

  use super::*;

  fn key(c: char) -> KeyEvent { KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE) }

  fn loaded_view() -> TopMatchesView {
    let mut view = TopMatchesView::new("jd-1".into());
    view.mount();
    view.begin_load();
    let matches = vec![
      serde_json::from_value(json!({
        "candidate_id": "c-1",
        "name": "Sarah Johnson",
        "total_score": 91,
        "resume_url": "https://blob.example/c-1.docx",
        "score_breakdown": { "skills": { "score": 90, "weight": 100, "weighted": 90 } }
      }))
      .unwrap(),
      serde_json::from_value(json!({ "candidate_id": "c-2", "name": "Li", "total_score": 50 }))
        .unwrap(),
    ];
    view.loaded(Ok(matches));
    view
  }

  #[test]
  fn fetches_once_for_its_job_description() {
    let mut view = TopMatchesView::new("jd-9".into());
    view.mount();
    assert!(matches!(
      view.begin_load().as_slice(),
      [Effect::Call(Command::LoadTopMatches(id))] if id == "jd-9"
    ));
    assert!(view.begin_load().is_empty());
  }

  #[test]
  fn not_found_is_an_empty_list() {
    let mut view = TopMatchesView::new("jd-1".into());
    let effects = view.loaded(Err(Error::Http {
      status:  404,
      message: "No top score candidates found".into(),
    }));
    assert!(effects.is_empty());
    assert_eq!(view.load, LoadState::Ready);
    assert!(view.matches.is_empty());
  }

  #[test]
  fn wrapped_not_found_is_an_empty_list() {
    let mut view = TopMatchesView::new("jd-1".into());
    let effects = view.loaded(Err(Error::Http {
      status:  500,
      message: "Error fetching top score data: 404: No top score candidates found.".into(),
    }));
    assert!(effects.is_empty());
    assert_eq!(view.load, LoadState::Ready);
    assert!(view.matches.is_empty());
  }

  #[test]
  fn other_errors_notify() {
    let mut view = TopMatchesView::new("jd-1".into());
    let effects = view.loaded(Err(Error::Http { status: 500, message: "boom".into() }));
    assert_eq!(effects.len(), 1);
    assert!(matches!(view.load, LoadState::Failed(_)));
  }

  #[test]
  fn breakdown_and_preview_overlays() {
    let mut view = loaded_view();
    assert_eq!(view.rank(), Some(1));

    view.handle_key(key('b'));
    assert_eq!(view.overlay, Some(Overlay::Breakdown));
    view.handle_key(key('b'));
    assert_eq!(view.overlay, None);

    view.handle_key(key('p'));
    match &view.overlay {
      Some(Overlay::Preview(Some(url))) => assert!(url.contains("officeapps.live.com")),
      other => panic!("expected preview overlay, got {other:?}"),
    }
  }

  #[test]
  fn missing_resume_has_no_preview_link() {
    let mut view = loaded_view();
    view.handle_key(key('j'));
    assert_eq!(view.rank(), Some(2));
    view.handle_key(key('p'));
    assert_eq!(view.overlay, Some(Overlay::Preview(None)));
  }
}
