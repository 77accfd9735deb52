//! Job Descriptions page. Same list mechanics as candidates; Enter opens the
//! top matches for the selected posting.

use crossterm::event::{KeyCode, KeyEvent};
use recruit_core::{
  job::JobDescription,
  upload::{FileRules, SelectedFile},
};

use super::{
  Command, Effect, Reply,
  listing::{Listed, Listing},
};
use crate::route::Route;

impl Listed for JobDescription {
  const NOUN: &'static str = "job description";
  const PLURAL: &'static str = "job descriptions";
  const TITLE: &'static str = "Job description";

  fn id(&self) -> &str { &self.id }

  fn haystack(&self) -> String {
    format!(
      "{} {} {} {}",
      self.heading(),
      self.company,
      self.location,
      self.required_skills.join(" ")
    )
  }

  fn load_command() -> Command { Command::LoadJobDescriptions }

  fn upload_command(files: Vec<SelectedFile>) -> Command {
    Command::UploadJobDescriptions(files)
  }

  fn delete_command(id: String) -> Command { Command::DeleteJobDescription(id) }
}

pub struct JobDescriptionsView {
  pub list: Listing<JobDescription>,
}

impl JobDescriptionsView {
  pub fn new(rules: FileRules) -> Self { Self { list: Listing::new(rules) } }

  pub fn apply(&mut self, reply: Reply) -> Vec<Effect> {
    match reply {
      Reply::JobDescriptions(result) => self.list.loaded(result),
      Reply::JobDescriptionsUploaded(result) => self.list.uploaded(result),
      Reply::JobDescriptionDeleted { id, result } => self.list.deleted(&id, result),
      other => {
        tracing::debug!(reply = ?other, "ignored by job descriptions page");
        Vec::new()
      }
    }
  }

  pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
    if self.list.is_idle()
      && matches!(key.code, KeyCode::Enter | KeyCode::Char('m'))
    {
      return match self.list.selected() {
        Some(jd) if !jd.id.is_empty() => vec![Effect::Navigate(Route::TopMatches {
          jd_id: jd.id.clone(),
        })],
        _ => Vec::new(),
      };
    }
    self.list.handle_key(key)
  }
}
