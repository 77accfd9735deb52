//! Candidates page: resume upload, the parsed candidate list, and a detail
//! pane for the selected candidate.

use crossterm::event::KeyEvent;
use recruit_core::{
  candidate::Candidate,
  upload::{FileRules, SelectedFile},
};

use super::{
  Command, Effect, Reply,
  listing::{Listed, Listing},
};

impl Listed for Candidate {
  const NOUN: &'static str = "resume";
  const PLURAL: &'static str = "candidates";
  const TITLE: &'static str = "Resume";

  fn id(&self) -> &str { &self.id }

  fn haystack(&self) -> String {
    format!(
      "{} {} {}",
      self.name,
      self.designation,
      self.technical_skills.join(" ")
    )
  }

  fn load_command() -> Command { Command::LoadCandidates }

  fn upload_command(files: Vec<SelectedFile>) -> Command {
    Command::UploadResumes(files)
  }

  fn delete_command(id: String) -> Command { Command::DeleteCandidate(id) }
}

pub struct CandidatesView {
  pub list: Listing<Candidate>,
}

impl CandidatesView {
  pub fn new(rules: FileRules) -> Self { Self { list: Listing::new(rules) } }

  pub fn apply(&mut self, reply: Reply) -> Vec<Effect> {
    match reply {
      Reply::Candidates(result) => self.list.loaded(result),
      Reply::ResumesUploaded(result) => self.list.uploaded(result),
      Reply::CandidateDeleted { id, result } => self.list.deleted(&id, result),
      other => {
        tracing::debug!(reply = ?other, "ignored by candidates page");
        Vec::new()
      }
    }
  }

  pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> { self.list.handle_key(key) }
}

#[cfg(test)]
mod tests {
  use recruit_core::Error;
  use serde_json::json;

  use super::*;

  fn candidate(id: &str, name: &str, skills: &[&str]) -> Candidate {
    serde_json::from_value(json!({
      "id": id,
      "name": name,
      "designation": "Engineer",
      "technical_skills": skills,
    }))
    .unwrap()
  }

  #[test]
  fn replies_drive_the_list() {
    let mut view = CandidatesView::new(FileRules::resumes(Some(2)));
    view.list.mount();
    view.list.begin_load();
    view.apply(Reply::Candidates(Ok(vec![
      candidate("c-1", "Sarah Johnson", &["React"]),
      candidate("c-2", "Michael Chen", &["SQL"]),
    ])));
    assert_eq!(view.list.items.len(), 2);

    view.apply(Reply::CandidateDeleted {
      id:     "c-1".into(),
      result: Ok(()),
    });
    assert_eq!(view.list.items.len(), 1);
    assert_eq!(view.list.items[0].id, "c-2");

    let effects = view.apply(Reply::CandidateDeleted {
      id:     "c-2".into(),
      result: Err(Error::Http { status: 404, message: "Candidate not found".into() }),
    });
    assert_eq!(view.list.items.len(), 1);
    assert_eq!(effects.len(), 1);
  }

  #[test]
  fn filter_matches_skills() {
    let mut view = CandidatesView::new(FileRules::resumes(None));
    view.list.items = vec![
      candidate("c-1", "Sarah Johnson", &["Kubernetes"]),
      candidate("c-2", "Michael Chen", &["Excel"]),
    ];
    view.list.filter = "kube".into();
    let visible = view.list.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].name, "Sarah Johnson");
  }
}
