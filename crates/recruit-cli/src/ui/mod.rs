//! TUI rendering: header, sidebar, active page, status bar.

pub mod candidates;
pub mod job_descriptions;
pub mod public;
pub mod sidebar;
pub mod top_matches;
pub mod weights;
pub mod widgets;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};
use recruit_core::{api::RecruitApi, session::SessionProvider};

use crate::{
  app::{App, Focus},
  views::{Level, Page, listing::Mode},
};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw<A, S>(f: &mut Frame, app: &App<A, S>)
where
  A: RecruitApi + 'static,
  S: SessionProvider + 'static,
{
  let area = f.area();

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  draw_body(f, rows[1], app);
  draw_status(f, rows[2], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header<A, S>(f: &mut Frame, area: Rect, app: &App<A, S>)
where
  A: RecruitApi + 'static,
  S: SessionProvider + 'static,
{
  let date = Local::now().format("%Y-%m-%d").to_string();
  let user = app
    .user()
    .map(|u| u.label().to_string())
    .unwrap_or_else(|| "not signed in".into());

  let left = Span::styled(
    format!(" RecruitPro  ›  {}", app.route.title()),
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(
    format!("{user}  {date} "),
    Style::default().fg(Color::Gray),
  );

  let pad = area
    .width
    .saturating_sub(left.width() as u16)
    .saturating_sub(right.width() as u16);
  let line = Line::from(vec![left, Span::raw(" ".repeat(pad as usize)), right]);

  let block = Block::default().style(Style::default().bg(Color::Indexed(54)));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body<A, S>(f: &mut Frame, area: Rect, app: &App<A, S>)
where
  A: RecruitApi + 'static,
  S: SessionProvider + 'static,
{
  let page_area = if app.route.is_protected() {
    let cols = Layout::default()
      .direction(Direction::Horizontal)
      .constraints([Constraint::Length(app.sidebar.width()), Constraint::Min(0)])
      .split(area);
    sidebar::draw(f, cols[0], app);
    cols[1]
  } else {
    area
  };

  match &app.page {
    Page::Landing => public::draw_landing(f, page_area),
    Page::SignIn(view) => public::draw_sign_in(f, page_area, view),
    Page::Candidates(view) => candidates::draw(f, page_area, view),
    Page::JobDescriptions(view) => job_descriptions::draw(f, page_area, view),
    Page::TopMatches(view) => top_matches::draw(f, page_area, view),
    Page::Integrations => public::draw_integrations(f, page_area),
    Page::Score(view) => weights::draw(f, page_area, view),
  }
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn hints<A, S>(app: &App<A, S>) -> (&'static str, &'static str) {
  if app.focus == Focus::Sidebar && app.route.is_protected() {
    return ("MENU", "↑↓/jk move  Enter open  Tab page  Ctrl-b collapse  q quit");
  }
  match &app.page {
    Page::Landing => ("HOME", "Enter get started  s sign in  q quit"),
    Page::SignIn(_) => ("SIGN IN", "Tab switch field  Enter submit  Esc back"),
    Page::Candidates(v) => list_hints(v.list.mode, v.list.pending_delete.is_some(), false),
    Page::JobDescriptions(v) => {
      list_hints(v.list.mode, v.list.pending_delete.is_some(), true)
    }
    Page::TopMatches(v) if v.overlay.is_some() => ("OVERLAY", "Esc close"),
    Page::TopMatches(_) => (
      "MATCHES",
      "↑↓/jk move  b breakdown  p preview  Esc back  Tab menu  q quit",
    ),
    Page::Integrations => ("SETTINGS", "Tab menu  q quit"),
    Page::Score(v) if v.is_typing() => ("EDIT", "0-9 weight  Enter apply  Esc cancel"),
    Page::Score(_) => (
      "WEIGHTS",
      "←→ role  ↑↓ category  +/- adjust  0-9 type  s save  r revert  Tab menu",
    ),
  }
}

fn list_hints(mode: Mode, confirming: bool, opens_matches: bool) -> (&'static str, &'static str) {
  if confirming {
    return ("CONFIRM", "y/Enter delete  n/Esc cancel");
  }
  match mode {
    Mode::Filter => ("SEARCH", "Type to filter  Esc clear  Enter done"),
    Mode::PickFiles => ("FILES", "Type paths, comma separated  Enter select  Esc done"),
    Mode::Browse if opens_matches => (
      "NORMAL",
      "↑↓/jk move  Enter matches  / search  u files  s submit  d delete  Tab menu  q quit",
    ),
    Mode::Browse => (
      "NORMAL",
      "↑↓/jk move  / search  u files  s submit  d delete  Tab menu  q quit",
    ),
  }
}

fn level_color(level: Level) -> Color {
  match level {
    Level::Success => Color::Green,
    Level::Info => Color::Cyan,
    Level::Warning => Color::Yellow,
    Level::Error => Color::Red,
  }
}

fn draw_status<A, S>(f: &mut Frame, area: Rect, app: &App<A, S>) {
  let (mode_label, hint) = hints(app);

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );

  let mut spans = vec![mode_span];
  match &app.notice {
    Some(notice) => {
      let label: &'static str = notice.level.into();
      spans.push(Span::styled(
        format!(" {label} "),
        Style::default()
          .fg(Color::Black)
          .bg(level_color(notice.level)),
      ));
      spans.push(Span::styled(
        format!("  {}", notice.text),
        Style::default().fg(level_color(notice.level)),
      ));
    }
    None => spans.push(Span::styled(
      format!("  {hint}"),
      Style::default().fg(Color::DarkGray),
    )),
  }

  f.render_widget(
    Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black)),
    area,
  );
}
