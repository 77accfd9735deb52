//! Typed-path file picker.

use std::path::PathBuf;

use recruit_core::{
  ValidationError,
  upload::{FileRules, SelectedFile},
};

/// A comma-separated path input plus the last valid selection made from it.
#[derive(Debug, Clone)]
pub struct FilePicker {
  pub rules: FileRules,
  pub input: String,
  selected:  Vec<SelectedFile>,
}

impl FilePicker {
  pub fn new(rules: FileRules) -> Self {
    Self {
      rules,
      input: String::new(),
      selected: Vec::new(),
    }
  }

  pub fn selected(&self) -> &[SelectedFile] { &self.selected }

  /// Paths currently typed into the input, in order.
  pub fn paths(&self) -> Vec<PathBuf> {
    self
      .input
      .split(',')
      .map(str::trim)
      .filter(|s| !s.is_empty())
      .map(expand_tilde)
      .collect()
  }

  /// Validate the typed paths against the rules. A valid selection replaces
  /// the previous one; an invalid one leaves it untouched.
  pub fn commit(&mut self) -> Result<usize, ValidationError> {
    let picked = self.rules.select(&self.paths())?;
    self.selected = picked;
    Ok(self.selected.len())
  }

  /// Clear both the input and the selection.
  pub fn reset(&mut self) {
    self.input.clear();
    self.selected.clear();
  }
}

fn expand_tilde(s: &str) -> PathBuf {
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  PathBuf::from(s)
}
