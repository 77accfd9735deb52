//! `App` driven end to end against in-memory fakes: routing, the guard, the
//! sidebar, and each page's fetch, upload, delete and save round trips.

use std::{
  path::PathBuf,
  sync::{
    Arc, Mutex, PoisonError, RwLock,
    atomic::{AtomicBool, AtomicUsize, Ordering},
  },
};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use recruit_core::{
  Error, Result,
  api::RecruitApi,
  candidate::Candidate,
  job::JobDescription,
  session::{Credentials, SessionProvider, User},
  top_match::TopMatchCandidate,
  upload::{FileRules, UploadFile, UploadOutcome},
  weights::{RoleWeights, WeightConfiguration},
};

use crate::{
  app::{App, Focus, Message},
  route::Route,
  sidebar::SidebarItem,
  views::{Level, LoadState, Page, PageOptions, Reply},
};

// ─── Fakes ───────────────────────────────────────────────────────────────────

struct FakeSession {
  user: RwLock<Option<User>>,
}

impl FakeSession {
  fn new(signed_in: bool) -> Self {
    Self {
      user: RwLock::new(signed_in.then(user)),
    }
  }
}

fn user() -> User {
  User {
    uid:          "u1".into(),
    email:        "hr@acme.example".into(),
    display_name: None,
  }
}

impl SessionProvider for FakeSession {
  fn current_user(&self) -> Option<User> {
    self.user.read().unwrap_or_else(PoisonError::into_inner).clone()
  }

  async fn id_token(&self) -> Result<String> {
    self
      .current_user()
      .map(|_| "tok".to_string())
      .ok_or_else(|| Error::Auth("no active session".into()))
  }

  async fn sign_in(&self, credentials: Credentials) -> Result<User> {
    if credentials.password != "secret" {
      return Err(Error::Auth("INVALID_PASSWORD".into()));
    }
    let user = User {
      email: credentials.email,
      ..user()
    };
    *self.user.write().unwrap_or_else(PoisonError::into_inner) = Some(user.clone());
    Ok(user)
  }

  fn sign_out(&self) {
    *self.user.write().unwrap_or_else(PoisonError::into_inner) = None;
  }
}

#[derive(Default)]
struct FakeApi {
  candidates:    Mutex<Vec<Candidate>>,
  jds:           Mutex<Vec<JobDescription>>,
  matches:       Mutex<Vec<TopMatchCandidate>>,
  weights:       Mutex<WeightConfiguration>,
  /// `(file name, bytes)` for every file in every upload.
  uploaded:      Mutex<Vec<(String, Vec<u8>)>>,
  saved:         Mutex<Vec<(String, RoleWeights)>>,
  list_calls:    AtomicUsize,
  fail_listing:  AtomicBool,
}

fn candidate(id: &str, name: &str) -> Candidate {
  Candidate {
    id: id.into(),
    name: name.into(),
    ..Candidate::default()
  }
}

impl RecruitApi for FakeApi {
  async fn upload_resumes(&self, files: Vec<UploadFile>) -> Result<Vec<UploadOutcome>> {
    let mut outcomes = Vec::new();
    for file in files {
      let id = file.file_name.trim_end_matches(".pdf").to_string();
      self
        .candidates
        .lock()
        .unwrap()
        .push(candidate(&id, &file.file_name));
      outcomes.push(UploadOutcome {
        filename: file.file_name.clone(),
        id:       Some(id),
        error:    None,
      });
      self.uploaded.lock().unwrap().push((file.file_name, file.bytes));
    }
    Ok(outcomes)
  }

  async fn list_candidates(&self) -> Result<Vec<Candidate>> {
    self.list_calls.fetch_add(1, Ordering::SeqCst);
    if self.fail_listing.load(Ordering::SeqCst) {
      return Err(Error::Network("connection refused".into()));
    }
    Ok(self.candidates.lock().unwrap().clone())
  }

  async fn delete_candidate<'a>(&'a self, id: &'a str) -> Result<()> {
    self.candidates.lock().unwrap().retain(|c| c.id != id);
    Ok(())
  }

  async fn upload_job_descriptions(
    &self,
    _files: Vec<UploadFile>,
  ) -> Result<Vec<UploadOutcome>> {
    Ok(Vec::new())
  }

  async fn list_job_descriptions(&self) -> Result<Vec<JobDescription>> {
    self.list_calls.fetch_add(1, Ordering::SeqCst);
    Ok(self.jds.lock().unwrap().clone())
  }

  async fn delete_job_description<'a>(&'a self, id: &'a str) -> Result<()> {
    self.jds.lock().unwrap().retain(|jd| jd.id != id);
    Ok(())
  }

  async fn top_matches<'a>(&'a self, _jd_id: &'a str) -> Result<Vec<TopMatchCandidate>> {
    Ok(self.matches.lock().unwrap().clone())
  }

  async fn weights(&self) -> Result<WeightConfiguration> {
    Ok(self.weights.lock().unwrap().clone())
  }

  async fn update_weights<'a>(
    &'a self,
    role: &'a str,
    weights: &'a RoleWeights,
  ) -> Result<()> {
    self
      .saved
      .lock()
      .unwrap()
      .push((role.to_string(), weights.clone()));
    Ok(())
  }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

type TestApp = App<FakeApi, FakeSession>;

fn setup(signed_in: bool) -> (TestApp, Arc<FakeApi>, Arc<FakeSession>) {
  let api = Arc::new(FakeApi::default());
  let session = Arc::new(FakeSession::new(signed_in));
  let options = PageOptions {
    resume_rules:          FileRules::resumes(Some(2)),
    job_description_rules: FileRules::job_descriptions(Some(2)),
    default_email:         None,
  };
  let app = App::new(Arc::clone(&api), Arc::clone(&session), options);
  (app, api, session)
}

fn press(app: &mut TestApp, code: KeyCode) -> bool {
  app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn type_text(app: &mut TestApp, text: &str) {
  for c in text.chars() {
    press(app, KeyCode::Char(c));
  }
}

/// Navigate, issue the page's fetch, and apply its reply.
async fn open(app: &mut TestApp, route: Route) {
  app.navigate(route);
  app.tick();
  app.settle().await;
}

fn notice(app: &TestApp) -> (Level, String) {
  let n = app.notice.as_ref().expect("a notice");
  (n.level, n.text.clone())
}

fn candidate_ids(app: &TestApp) -> Vec<String> {
  match &app.page {
    Page::Candidates(v) => v.list.items.iter().map(|c| c.id.clone()).collect(),
    _ => panic!("not on the candidates page"),
  }
}

// ─── Routing and session ─────────────────────────────────────────────────────

#[test]
fn starts_on_landing_page() {
  let (app, ..) = setup(false);
  assert_eq!(app.route, Route::Landing);
  assert!(matches!(app.page, Page::Landing));
}

#[tokio::test]
async fn every_protected_route_redirects_when_signed_out() {
  let (mut app, api, _) = setup(false);
  for route in [
    Route::Candidates,
    Route::JobDescriptions,
    Route::TopMatches { jd_id: "jd-1".into() },
    Route::Integrations,
    Route::Score,
  ] {
    app.navigate(route);
    app.tick();
    assert_eq!(app.route, Route::SignIn);
    assert_eq!(notice(&app), (Level::Info, "Please sign in to continue.".into()));
  }
  assert_eq!(api.list_calls.load(Ordering::SeqCst), 0);

  app.navigate(Route::Landing);
  assert_eq!(app.route, Route::Landing);
}

#[tokio::test]
async fn sign_in_lands_on_candidates_and_fetches() {
  let (mut app, api, session) = setup(false);
  api.candidates.lock().unwrap().push(candidate("c-1", "Ada"));

  app.navigate(Route::Candidates);
  assert_eq!(app.route, Route::SignIn);

  type_text(&mut app, "hr@acme.example");
  press(&mut app, KeyCode::Enter);
  type_text(&mut app, "secret");
  press(&mut app, KeyCode::Enter);
  app.settle().await;

  assert_eq!(app.route, Route::Candidates);
  assert_eq!(notice(&app), (Level::Success, "Login successful".into()));
  assert!(session.current_user().is_some());

  app.tick();
  app.settle().await;
  assert_eq!(candidate_ids(&app), vec!["c-1"]);
}

#[tokio::test]
async fn wrong_password_stays_on_sign_in() {
  let (mut app, _, session) = setup(false);
  app.navigate(Route::SignIn);

  type_text(&mut app, "hr@acme.example");
  press(&mut app, KeyCode::Enter);
  type_text(&mut app, "nope");
  press(&mut app, KeyCode::Enter);
  app.settle().await;

  assert_eq!(app.route, Route::SignIn);
  assert_eq!(notice(&app), (Level::Error, "Login failed".into()));
  assert!(session.current_user().is_none());
}

#[tokio::test]
async fn q_is_typed_into_the_sign_in_form_not_quit() {
  let (mut app, ..) = setup(false);
  app.navigate(Route::SignIn);
  assert!(press(&mut app, KeyCode::Char('q')));
  match &app.page {
    Page::SignIn(v) => assert_eq!(v.email, "q"),
    _ => panic!("left the sign-in page"),
  }
}

#[tokio::test]
async fn logout_from_sidebar_signs_out_and_guards_again() {
  let (mut app, _, session) = setup(true);
  open(&mut app, Route::Candidates).await;

  press(&mut app, KeyCode::Tab);
  assert_eq!(app.focus, Focus::Sidebar);
  while app.sidebar.selected() != SidebarItem::Logout {
    press(&mut app, KeyCode::Down);
  }
  press(&mut app, KeyCode::Enter);

  assert!(session.current_user().is_none());
  assert_eq!(app.route, Route::Landing);
  assert_eq!(notice(&app), (Level::Info, "Signed out.".into()));

  app.navigate(Route::Score);
  assert_eq!(app.route, Route::SignIn);
}

#[tokio::test]
async fn sidebar_opens_pages_and_collapses() {
  let (mut app, ..) = setup(true);
  open(&mut app, Route::Candidates).await;

  press(&mut app, KeyCode::Tab);
  press(&mut app, KeyCode::Down);
  press(&mut app, KeyCode::Enter);
  assert_eq!(app.route, Route::JobDescriptions);
  assert_eq!(app.focus, Focus::Page);

  let width = app.sidebar.width();
  app.handle_key(KeyEvent::new(KeyCode::Char('b'), KeyModifiers::CONTROL));
  assert!(app.sidebar.width() < width);
  assert_eq!(app.route, Route::JobDescriptions);
}

// ─── Candidates ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn submit_without_files_warns_and_sends_nothing() {
  let (mut app, api, _) = setup(true);
  open(&mut app, Route::Candidates).await;

  press(&mut app, KeyCode::Char('s'));
  assert_eq!(
    notice(&app),
    (Level::Warning, "Please select a resume to upload.".into())
  );
  assert!(api.uploaded.lock().unwrap().is_empty());
}

fn scratch_dir(name: &str) -> PathBuf {
  let dir = std::env::temp_dir().join(format!("recruitpro-{name}-{}", std::process::id()));
  std::fs::create_dir_all(&dir).unwrap();
  dir
}

#[tokio::test]
async fn upload_reads_files_then_refetches() {
  let (mut app, api, _) = setup(true);
  open(&mut app, Route::Candidates).await;
  assert!(candidate_ids(&app).is_empty());

  let dir = scratch_dir("upload");
  let a = dir.join("ada.pdf");
  let b = dir.join("grace.pdf");
  std::fs::write(&a, b"%PDF ada").unwrap();
  std::fs::write(&b, b"%PDF grace").unwrap();

  press(&mut app, KeyCode::Char('u'));
  type_text(&mut app, &format!("{}, {}", a.display(), b.display()));
  press(&mut app, KeyCode::Enter);
  press(&mut app, KeyCode::Char('s'));
  assert_eq!(
    notice(&app),
    (Level::Info, "Uploading and analyzing resume...".into())
  );

  app.settle().await; // upload reply
  assert_eq!(
    notice(&app),
    (Level::Success, "Resume processed successfully!".into())
  );
  app.settle().await; // refetch

  assert_eq!(candidate_ids(&app), vec!["ada", "grace"]);
  assert_eq!(*api.uploaded.lock().unwrap(), vec![
    ("ada.pdf".to_string(), b"%PDF ada".to_vec()),
    ("grace.pdf".to_string(), b"%PDF grace".to_vec()),
  ]);
  assert_eq!(api.list_calls.load(Ordering::SeqCst), 2);
  match &app.page {
    Page::Candidates(v) => assert!(v.list.picker.selected().is_empty()),
    _ => panic!("left the candidates page"),
  }
  std::fs::remove_dir_all(dir).ok();
}

#[tokio::test]
async fn partial_upload_names_the_rejected_files() {
  let (mut app, _, _) = setup(true);
  open(&mut app, Route::Candidates).await;

  app.apply(Message {
    mount: app.mount,
    reply: Reply::ResumesUploaded(Ok(vec![
      UploadOutcome { filename: "x.pdf".into(), id: Some("x".into()), error: None },
      UploadOutcome {
        filename: "y.pdf".into(),
        id:       None,
        error:    Some("could not parse".into()),
      },
    ])),
  });
  assert_eq!(
    notice(&app),
    (Level::Warning, "1 of 2 processed; y.pdf: could not parse".into())
  );
}

#[tokio::test]
async fn unreadable_file_reports_upload_failure() {
  let (mut app, api, _) = setup(true);
  open(&mut app, Route::Candidates).await;

  press(&mut app, KeyCode::Char('u'));
  type_text(&mut app, "/nonexistent/recruitpro/missing.pdf");
  press(&mut app, KeyCode::Enter);
  press(&mut app, KeyCode::Char('s'));
  app.settle().await;

  let (level, text) = notice(&app);
  assert_eq!(level, Level::Error);
  assert!(text.starts_with("Upload failed:"), "{text}");
  assert!(api.uploaded.lock().unwrap().is_empty());
}

#[tokio::test]
async fn delete_removes_locally_without_refetch() {
  let (mut app, api, _) = setup(true);
  api
    .candidates
    .lock()
    .unwrap()
    .extend([candidate("c-1", "Ada"), candidate("c-2", "Grace")]);
  open(&mut app, Route::Candidates).await;

  press(&mut app, KeyCode::Char('d'));
  press(&mut app, KeyCode::Char('y'));
  app.settle().await;

  assert_eq!(candidate_ids(&app), vec!["c-2"]);
  assert_eq!(notice(&app), (Level::Success, "Resume deleted.".into()));
  assert_eq!(api.list_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn failed_fetch_shows_error_notice() {
  let (mut app, api, _) = setup(true);
  api.fail_listing.store(true, Ordering::SeqCst);
  open(&mut app, Route::Candidates).await;

  let (level, text) = notice(&app);
  assert_eq!(level, Level::Error);
  assert!(text.starts_with("Failed to load candidates"), "{text}");
  match &app.page {
    Page::Candidates(v) => assert!(matches!(v.list.load, LoadState::Failed(_))),
    _ => panic!("left the candidates page"),
  }
}

#[tokio::test]
async fn fetch_is_issued_once_per_mount() {
  let (mut app, api, _) = setup(true);
  open(&mut app, Route::Candidates).await;
  app.tick();
  app.tick();
  assert_eq!(api.list_calls.load(Ordering::SeqCst), 1);

  open(&mut app, Route::Candidates).await;
  assert_eq!(api.list_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn replies_for_an_unmounted_page_are_dropped() {
  let (mut app, ..) = setup(true);
  app.navigate(Route::Candidates);
  let stale = app.mount;
  app.navigate(Route::Candidates);
  assert_ne!(app.mount, stale);

  app.apply(Message {
    mount: stale,
    reply: Reply::Candidates(Ok(vec![candidate("ghost", "Ghost")])),
  });
  assert!(candidate_ids(&app).is_empty());

  app.apply(Message {
    mount: app.mount,
    reply: Reply::Candidates(Ok(vec![candidate("c-1", "Ada")])),
  });
  assert_eq!(candidate_ids(&app), vec!["c-1"]);
}

// ─── Job descriptions and matches ────────────────────────────────────────────

#[tokio::test]
async fn enter_on_a_job_description_opens_its_matches() {
  let (mut app, api, _) = setup(true);
  api.jds.lock().unwrap().push(JobDescription {
    id: "jd-1".into(),
    title: "Backend Engineer".into(),
    ..JobDescription::default()
  });
  api.matches.lock().unwrap().extend([
    TopMatchCandidate {
      name: "Ada".into(),
      total_score: 91.0,
      ..TopMatchCandidate::default()
    },
    TopMatchCandidate {
      name: "Grace".into(),
      total_score: 78.5,
      ..TopMatchCandidate::default()
    },
  ]);
  open(&mut app, Route::JobDescriptions).await;

  press(&mut app, KeyCode::Enter);
  assert_eq!(app.route, Route::TopMatches { jd_id: "jd-1".into() });
  assert_eq!(app.sidebar.selected(), SidebarItem::JobDescriptions);

  app.tick();
  app.settle().await;
  match &app.page {
    Page::TopMatches(v) => {
      assert_eq!(v.matches.len(), 2);
      assert_eq!(v.rank(), Some(1));
    }
    _ => panic!("not on the top matches page"),
  }

  press(&mut app, KeyCode::Esc);
  assert_eq!(app.route, Route::JobDescriptions);
}

// ─── Weights ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn weights_must_total_100_before_saving() {
  let (mut app, api, _) = setup(true);
  api.weights.lock().unwrap().insert(
    "fresher",
    RoleWeights::from([("education", 40), ("experience", 40), ("skills", 20)]),
  );
  open(&mut app, Route::Score).await;

  for _ in 0..5 {
    press(&mut app, KeyCode::Char('-'));
  }
  press(&mut app, KeyCode::Char('s'));
  assert_eq!(
    notice(&app),
    (Level::Warning, "Weights must sum up to 100.".into())
  );
  assert!(api.saved.lock().unwrap().is_empty());

  press(&mut app, KeyCode::Down);
  type_text(&mut app, "45");
  press(&mut app, KeyCode::Enter);
  press(&mut app, KeyCode::Char('s'));
  app.settle().await;

  assert_eq!(
    notice(&app),
    (Level::Success, "Weights updated successfully.".into())
  );
  assert_eq!(*api.saved.lock().unwrap(), vec![(
    "fresher".to_string(),
    RoleWeights::from([("education", 35), ("experience", 45), ("skills", 20)]),
  )]);
}

// ─── Rendering ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn every_page_renders_with_data_and_overlays() {
  use ratatui::{Terminal, backend::TestBackend};

  let (mut app, api, _) = setup(true);
  api.candidates.lock().unwrap().push(Candidate {
    technical_skills: vec!["Rust".into()],
    ..candidate("c-1", "Ada Lovelace")
  });
  api.jds.lock().unwrap().push(JobDescription {
    id: "jd-1".into(),
    ..JobDescription::default()
  });
  api.matches.lock().unwrap().push(TopMatchCandidate {
    name: "Ada Lovelace".into(),
    total_score: 88.0,
    resume_url: "https://blob.example/ada.docx".into(),
    ..TopMatchCandidate::default()
  });
  api
    .weights
    .lock()
    .unwrap()
    .insert("fresher", RoleWeights::from([("skills", 100)]));

  let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
  let mut render = |app: &TestApp| {
    terminal.draw(|f| crate::ui::draw(f, app)).unwrap();
  };

  render(&app);
  app.navigate(Route::SignIn);
  render(&app);
  for route in [
    Route::Candidates,
    Route::JobDescriptions,
    Route::Score,
    Route::TopMatches { jd_id: "jd-1".into() },
  ] {
    open(&mut app, route).await;
    render(&app);
  }
  for key in ['b', 'p'] {
    press(&mut app, KeyCode::Char(key));
    render(&app);
    press(&mut app, KeyCode::Esc);
  }
  app.navigate(Route::Integrations);
  app.sidebar.toggle();
  render(&app);
}
