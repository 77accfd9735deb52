//! Application shell and event dispatcher.
//!
//! Owns the active route and page, the sidebar, and the status notice. View
//! commands run as spawned tasks whose replies come back over a channel
//! tagged with the page's [`MountId`]; leaving a page aborts its tasks.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use recruit_core::{
  Error, Result,
  api::RecruitApi,
  session::{SessionProvider, User},
  upload::{SelectedFile, UploadFile},
};
use tokio::{
  sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
  task::AbortHandle,
};

use crate::{
  route::{Guard, Route, guard},
  sidebar::{Sidebar, SidebarItem},
  views::{Command, Effect, MountId, Notice, Page, PageOptions, Reply},
};

// ─── Focus ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
  Sidebar,
  Page,
}

/// A task's reply, addressed to the mount that spawned it.
#[derive(Debug)]
pub struct Message {
  pub mount: MountId,
  pub reply: Reply,
}

// ─── App ──────────────────────────────────────────────────────────────────────

pub struct App<A, S> {
  pub route:   Route,
  pub page:    Page,
  pub mount:   MountId,
  pub sidebar: Sidebar,
  pub focus:   Focus,
  /// Latest notice, shown in the status bar until replaced.
  pub notice:  Option<Notice>,
  options:     PageOptions,
  api:         Arc<A>,
  session:     Arc<S>,
  /// Tasks spawned by the current mount.
  tasks:       Vec<AbortHandle>,
  tx:          UnboundedSender<Message>,
  rx:          UnboundedReceiver<Message>,
}

impl<A, S> App<A, S>
where
  A: RecruitApi + 'static,
  S: SessionProvider + 'static,
{
  /// Start on the landing page.
  pub fn new(api: Arc<A>, session: Arc<S>, options: PageOptions) -> Self {
    let (tx, rx) = mpsc::unbounded_channel();
    Self {
      route: Route::Landing,
      page: Page::Landing,
      mount: MountId::default(),
      sidebar: Sidebar::default(),
      focus: Focus::Page,
      notice: None,
      options,
      api,
      session,
      tasks: Vec::new(),
      tx,
      rx,
    }
  }

  pub fn user(&self) -> Option<User> { self.session.current_user() }

  // ── Navigation ────────────────────────────────────────────────────────────

  /// Go to `route`, subject to the guard. Always remounts, even when the
  /// route is the one already shown.
  pub fn navigate(&mut self, route: Route) {
    let target = match guard(route, self.session.current_user().is_some()) {
      Guard::Render(route) => route,
      Guard::Redirect(to) => {
        tracing::info!(to = %to.path(), "not signed in; redirecting");
        self.notify(Notice::info("Please sign in to continue."));
        to
      }
    };

    self.unmount();
    self.mount = self.mount.next();
    tracing::debug!(path = %target.path(), mount = self.mount.0, "mounting page");

    self.page = Page::for_route(&target, &self.options);
    self.page.mount();
    self.sidebar.follow(&target);
    self.route = target;
    self.focus = Focus::Page;
  }

  fn unmount(&mut self) {
    for task in self.tasks.drain(..) {
      task.abort();
    }
  }

  pub fn logout(&mut self) {
    self.session.sign_out();
    self.notify(Notice::info("Signed out."));
    self.navigate(Route::Landing);
  }

  pub fn activate(&mut self, item: SidebarItem) {
    match item.target() {
      Some(route) => self.navigate(route),
      None => self.logout(),
    }
  }

  // ── Effects and replies ───────────────────────────────────────────────────

  /// Once per frame: lets a freshly mounted page issue its fetch.
  pub fn tick(&mut self) {
    let effects = self.page.begin_load();
    self.run(effects);
  }

  /// Apply every reply that has arrived, without waiting.
  pub fn drain(&mut self) {
    while let Ok(message) = self.rx.try_recv() {
      self.apply(message);
    }
  }

  /// Wait for the next reply and apply it.
  #[cfg(test)]
  pub async fn settle(&mut self) {
    if let Some(message) = self.rx.recv().await {
      self.apply(message);
    }
  }

  pub fn apply(&mut self, message: Message) {
    if message.mount != self.mount {
      tracing::debug!(
        stale = message.mount.0,
        current = self.mount.0,
        "dropping reply for an unmounted page"
      );
      return;
    }
    let effects = self.page.apply(message.reply);
    self.run(effects);
  }

  fn run(&mut self, effects: Vec<Effect>) {
    for effect in effects {
      match effect {
        Effect::Call(command) => self.spawn(command),
        Effect::Notify(notice) => self.notify(notice),
        Effect::Navigate(route) => self.navigate(route),
      }
    }
  }

  fn notify(&mut self, notice: Notice) {
    tracing::debug!(level = ?notice.level, text = %notice.text, "notice");
    self.notice = Some(notice);
  }

  fn spawn(&mut self, command: Command) {
    let api = Arc::clone(&self.api);
    let session = Arc::clone(&self.session);
    let tx = self.tx.clone();
    let mount = self.mount;
    tracing::debug!(?command, mount = mount.0, "spawning");

    self.tasks.retain(|task| !task.is_finished());
    let handle = tokio::spawn(async move {
      let reply = execute(api.as_ref(), session.as_ref(), command).await;
      if tx.send(Message { mount, reply }).is_err() {
        tracing::debug!("receiver gone; reply dropped");
      }
    });
    self.tasks.push(handle.abort_handle());
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub fn handle_key(&mut self, key: KeyEvent) -> bool {
    self.notice = None;
    if key.modifiers.contains(KeyModifiers::CONTROL) {
      match key.code {
        KeyCode::Char('c') => return false,
        KeyCode::Char('b') if self.route.is_protected() => {
          self.sidebar.toggle();
          return true;
        }
        _ => {}
      }
    }

    let typing = self.page.is_typing();
    if !typing && key.code == KeyCode::Char('q') {
      return false;
    }

    if self.route.is_protected() && !typing && key.code == KeyCode::Tab {
      self.focus = match self.focus {
        Focus::Sidebar => Focus::Page,
        Focus::Page => Focus::Sidebar,
      };
      return true;
    }

    if self.focus == Focus::Sidebar && self.route.is_protected() {
      self.handle_sidebar_key(key);
    } else {
      let effects = self.page.handle_key(key);
      self.run(effects);
    }
    true
  }

  fn handle_sidebar_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Down | KeyCode::Char('j') => self.sidebar.down(),
      KeyCode::Up | KeyCode::Char('k') => self.sidebar.up(),
      KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
        self.activate(self.sidebar.selected());
      }
      KeyCode::Esc => self.focus = Focus::Page,
      _ => {}
    }
  }
}

// ─── Task execution ───────────────────────────────────────────────────────────

async fn execute<A, S>(api: &A, session: &S, command: Command) -> Reply
where
  A: RecruitApi,
  S: SessionProvider,
{
  match command {
    Command::LoadCandidates => Reply::Candidates(api.list_candidates().await),
    Command::UploadResumes(files) => Reply::ResumesUploaded(
      async { api.upload_resumes(read_files(files).await?).await }.await,
    ),
    Command::DeleteCandidate(id) => {
      let result = api.delete_candidate(&id).await;
      Reply::CandidateDeleted { id, result }
    }
    Command::LoadJobDescriptions => {
      Reply::JobDescriptions(api.list_job_descriptions().await)
    }
    Command::UploadJobDescriptions(files) => Reply::JobDescriptionsUploaded(
      async { api.upload_job_descriptions(read_files(files).await?).await }.await,
    ),
    Command::DeleteJobDescription(id) => {
      let result = api.delete_job_description(&id).await;
      Reply::JobDescriptionDeleted { id, result }
    }
    Command::LoadTopMatches(jd_id) => Reply::TopMatches(api.top_matches(&jd_id).await),
    Command::LoadWeights => Reply::Weights(api.weights().await),
    Command::SaveWeights { role, weights } => {
      let result = api.update_weights(&role, &weights).await;
      Reply::WeightsSaved { role, weights, result }
    }
    Command::SignIn(credentials) => Reply::SignedIn(session.sign_in(credentials).await),
  }
}

/// Read the selected files from disk, in order.
async fn read_files(files: Vec<SelectedFile>) -> Result<Vec<UploadFile>> {
  let mut out = Vec::with_capacity(files.len());
  for file in files {
    let bytes = tokio::fs::read(&file.path)
      .await
      .map_err(|e| Error::Io(format!("{}: {e}", file.path.display())))?;
    out.push(UploadFile {
      file_name: file.file_name(),
      media_type: file.media_type,
      bytes,
    });
  }
  Ok(out)
}
