//! Public landing page.

use crossterm::event::{KeyCode, KeyEvent};

use super::Effect;
use crate::route::Route;

pub const HEADLINE: &str = "Smart Resume Screening & Candidate Matching";

pub const TAGLINE: &str = "Transform your recruitment process with AI-powered resume \
                           analysis, intelligent candidate scoring, and seamless \
                           integrations.";

pub const FEATURES: [&str; 4] = [
  "Reduce screening time by 80%",
  "Improve candidate quality scoring",
  "Integrate with existing HR tools",
  "Scale your recruitment process",
];

/// `Enter` is "Get started": it heads for the dashboard and lets the guard
/// decide whether sign-in comes first.
pub fn handle_key(key: KeyEvent) -> Vec<Effect> {
  match key.code {
    KeyCode::Enter | KeyCode::Char('g') => vec![Effect::Navigate(Route::Candidates)],
    KeyCode::Char('s') => vec![Effect::Navigate(Route::SignIn)],
    _ => Vec::new(),
  }
}
