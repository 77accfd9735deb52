use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Paragraph, Wrap},
};
use recruit_core::candidate::Candidate;

use super::widgets::{self, ACCENT, chips, heading, label_value, panel};
use crate::views::candidates::CandidatesView;

pub fn draw(f: &mut Frame, area: Rect, view: &CandidatesView) {
  widgets::draw_list_page(f, area, "Candidates", &view.list, row, detail);
}

fn row(c: &Candidate) -> Line<'static> {
  let name = if c.name.is_empty() { c.id.clone() } else { c.name.clone() };
  Line::from(vec![
    Span::styled(
      format!(" {:<3}", c.initials()),
      Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    ),
    Span::raw(name),
    Span::styled(
      format!("  {}", c.designation),
      Style::default().fg(Color::DarkGray),
    ),
  ])
}

fn detail(f: &mut Frame, area: Rect, c: &Candidate) {
  let block = panel("Resume");
  let inner = block.inner(area);
  f.render_widget(block, area);

  let experience = c
    .experience_years
    .map(|y| format!("{y} years"))
    .unwrap_or_default();

  let mut lines = vec![
    Line::from(Span::styled(
      c.name.clone(),
      Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )),
    Line::from(Span::styled(c.designation.clone(), Style::default().fg(Color::Gray))),
    Line::from(""),
    label_value("Email", &c.email),
    label_value("Contact", &c.contact),
    label_value("Location", &c.location),
    label_value("Experience", &experience),
    Line::from(""),
    heading("Summary"),
    Line::from(if c.professional_summary.is_empty() {
      "—".to_string()
    } else {
      c.professional_summary.clone()
    }),
    Line::from(""),
    heading("Skills"),
    chips(&c.technical_skills, Color::Cyan),
    Line::from(""),
    heading("Education"),
  ];

  if c.education.is_empty() {
    lines.push(Line::from("—"));
  }
  for edu in &c.education {
    let mut text = format!("• {}", edu.display());
    if let Some(year) = &edu.year {
      text.push_str(&format!(" ({year})"));
    }
    lines.push(Line::from(text));
  }

  if !c.key_achievements.is_empty() {
    lines.push(Line::from(""));
    lines.push(heading("Key achievements"));
    lines.extend(c.key_achievements.iter().map(|a| Line::from(format!("• {a}"))));
  }
  if !c.certifications.is_empty() {
    lines.push(Line::from(""));
    lines.push(heading("Certifications"));
    lines.push(chips(&c.certifications, Color::Magenta));
  }

  lines.push(Line::from(""));
  lines.push(label_value("Resume", &c.resume_url));

  f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
