//! `recruitpro`: terminal dashboard for the RecruitPro screening service.
//!
//! # Usage
//!
//! ```
//! recruitpro --url http://localhost:8000 --api-key AIza...
//! recruitpro --config ~/.config/recruitpro.toml
//! recruitpro --token "$ID_TOKEN"
//! ```

mod app;
mod config;
mod route;
mod session;
mod sidebar;
mod ui;
mod views;

#[cfg(test)]
mod tests;

use std::{
  fs::File,
  io,
  path::PathBuf,
  sync::{Arc, Mutex},
  time::Duration,
};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::{
  event::{self, Event, KeyEventKind},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use recruit_client::HttpClient;
use recruit_core::{api::RecruitApi, session::SessionProvider};
use route::Route;
use session::Session;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use views::PageOptions;

use crate::config::Settings;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "recruitpro", version, about = "Terminal dashboard for RecruitPro")]
struct Args {
  /// Path to a TOML config file.
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the RecruitPro API (default: http://localhost:8000).
  #[arg(long, env = "RECRUITPRO_URL")]
  url: Option<String>,

  /// Firebase web API key; enables email/password sign-in.
  #[arg(long, env = "RECRUITPRO_FIREBASE_API_KEY")]
  api_key: Option<String>,

  /// Email to pre-fill on the sign-in page.
  #[arg(long)]
  email: Option<String>,

  /// Pre-issued bearer token, used when no API key is given.
  #[arg(long, env = "RECRUITPRO_TOKEN")]
  token: Option<String>,

  /// Where to write the log (the terminal is taken by the UI).
  #[arg(long, value_name = "FILE")]
  log_file: Option<PathBuf>,

  /// Page to open first, as a dashboard path (e.g. `/dashboard/score`).
  #[arg(long, value_name = "PATH")]
  open: Option<String>,
}

impl Args {
  fn overrides(&self) -> Vec<(&'static str, Option<String>)> {
    vec![
      ("base_url", self.url.clone()),
      ("firebase_api_key", self.api_key.clone()),
      ("email", self.email.clone()),
      ("token", self.token.clone()),
      (
        "log_file",
        self.log_file.as_ref().map(|p| p.display().to_string()),
      ),
    ]
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();
  let settings = Settings::load(args.config.as_deref(), &args.overrides())?;

  let log = File::create(&settings.log_file)
    .with_context(|| format!("creating log file {}", settings.log_file.display()))?;
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(Mutex::new(log))
    .with_ansi(false)
    .init();

  tracing::info!(base_url = %settings.base_url, "starting recruitpro");

  let session = Arc::new(Session::from_settings(&settings)?);
  let api = Arc::new(HttpClient::new(
    settings.api_config(),
    Arc::clone(&session),
  )?);

  let options = PageOptions {
    resume_rules:          settings.resume_rules(),
    job_description_rules: settings.job_description_rules(),
    default_email:         settings.email.clone(),
  };
  let start = match (&args.open, session.current_user()) {
    (Some(path), _) => Route::parse(path),
    (None, Some(_)) => Route::Candidates,
    (None, None) => Route::Landing,
  };

  let mut app = App::new(api, session, options);
  app.navigate(start);

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  let run_result = run_event_loop(&mut terminal, &mut app);

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  if let Err(e) = &run_result {
    tracing::error!(error = %e, "event loop failed");
  }
  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

fn run_event_loop<A, S>(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App<A, S>,
) -> Result<()>
where
  A: RecruitApi + 'static,
  S: SessionProvider + 'static,
{
  loop {
    app.tick();
    app.drain();
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding the worker to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    match maybe_event {
      Some(Event::Key(key)) if key.kind == KeyEventKind::Press => {
        if !app.handle_key(key) {
          break;
        }
      }
      // Resize and everything else redraw on the next iteration.
      _ => {}
    }
  }

  tracing::info!("exiting");
  Ok(())
}
