//! Pages reachable without a session, plus the static integrations page.

use ratatui::{
  Frame,
  layout::{Alignment, Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Paragraph, Wrap},
};

use super::widgets::{ACCENT, centered, heading, panel};
use crate::views::{
  integrations::{COMING_SOON, INTEGRATIONS},
  landing::{FEATURES, HEADLINE, TAGLINE},
  sign_in::{Field, SignInView},
};

pub fn draw_landing(f: &mut Frame, area: Rect) {
  let area = centered(area, 70, 60);

  let mut lines = vec![
    Line::from(Span::styled(
      "RecruitPro",
      Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    )),
    Line::from(""),
    Line::from(Span::styled(
      HEADLINE,
      Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )),
    Line::from(""),
    Line::from(Span::styled(TAGLINE, Style::default().fg(Color::Gray))),
    Line::from(""),
  ];
  lines.extend(FEATURES.iter().map(|feature| {
    Line::from(vec![
      Span::styled("✓ ", Style::default().fg(Color::Green)),
      Span::raw(*feature),
    ])
  }));
  lines.push(Line::from(""));
  lines.push(Line::from(vec![
    Span::styled(" Enter ", Style::default().fg(Color::Black).bg(ACCENT)),
    Span::raw(" Get started    "),
    Span::styled(" s ", Style::default().fg(Color::Black).bg(Color::Gray)),
    Span::raw(" Sign in"),
  ]));

  f.render_widget(
    Paragraph::new(lines)
      .alignment(Alignment::Center)
      .wrap(Wrap { trim: true }),
    area,
  );
}

pub fn draw_sign_in(f: &mut Frame, area: Rect, view: &SignInView) {
  let area = centered(area, 50, 50);
  let block = panel("Sign in to RecruitPro");
  let inner = block.inner(area);
  f.render_widget(block, area);

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .margin(1)
    .constraints([
      Constraint::Length(2),
      Constraint::Length(2),
      Constraint::Length(1),
      Constraint::Min(0),
    ])
    .split(inner);

  let masked = "•".repeat(view.password.chars().count());
  draw_field(f, rows[0], "Email", &view.email, view.field == Field::Email);
  draw_field(f, rows[1], "Password", &masked, view.field == Field::Password);

  let status = if view.submitting {
    Span::styled("Signing in…", Style::default().fg(Color::Yellow))
  } else {
    Span::styled("Enter  sign in", Style::default().fg(Color::DarkGray))
  };
  f.render_widget(Paragraph::new(Line::from(status)), rows[2]);
}

fn draw_field(f: &mut Frame, area: Rect, label: &str, value: &str, active: bool) {
  let style = if active {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
  } else {
    Style::default().fg(Color::DarkGray)
  };
  let cursor = if active { "_" } else { "" };
  f.render_widget(
    Paragraph::new(vec![
      Line::from(Span::styled(label, style)),
      Line::from(format!("{value}{cursor}")),
    ]),
    area,
  );
}

pub fn draw_integrations(f: &mut Frame, area: Rect) {
  let block = panel("Integrations");
  let inner = block.inner(area);
  f.render_widget(block, area);

  let mut lines = Vec::new();
  for integration in &INTEGRATIONS {
    lines.push(heading(integration.name));
    lines.push(Line::from(integration.description));
    lines.push(Line::from(Span::styled(
      "Not connected",
      Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(""));
  }
  lines.push(Line::from(Span::styled(
    COMING_SOON,
    Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
  )));

  f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
