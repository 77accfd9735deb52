use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Paragraph, Wrap},
};
use recruit_core::job::JobDescription;

use super::widgets::{self, chips, heading, label_value, panel};
use crate::views::job_descriptions::JobDescriptionsView;

pub fn draw(f: &mut Frame, area: Rect, view: &JobDescriptionsView) {
  widgets::draw_list_page(f, area, "Job Descriptions", &view.list, row, detail);
}

fn row(jd: &JobDescription) -> Line<'static> {
  Line::from(vec![
    Span::raw(format!(" {}", jd.heading())),
    Span::styled(format!("  {}", jd.company), Style::default().fg(Color::DarkGray)),
  ])
}

fn detail(f: &mut Frame, area: Rect, jd: &JobDescription) {
  let block = panel("Job Description");
  let inner = block.inner(area);
  f.render_widget(block, area);

  let mut lines = vec![
    Line::from(Span::styled(
      jd.heading().to_string(),
      Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )),
    Line::from(""),
    label_value("Company", &jd.company),
    label_value("Location", &jd.location),
    label_value("Salary", &jd.salary_range),
    label_value("Experience", &jd.required_experience),
    label_value("Type", &jd.job_type),
    label_value("Posted", &jd.posted_date),
    label_value("Contact", &jd.contact_email),
    Line::from(""),
    heading("Required skills"),
    chips(&jd.required_skills, Color::Cyan),
  ];

  for (title, text) in [
    ("Description", &jd.description),
    ("Responsibilities", &jd.responsibilities),
    ("Qualifications", &jd.qualifications),
  ] {
    if !text.is_empty() {
      lines.push(Line::from(""));
      lines.push(heading(title));
      lines.push(Line::from(text.as_str()));
    }
  }

  lines.push(Line::from(""));
  lines.push(label_value("File", &jd.file_url));
  lines.push(Line::from(Span::styled(
    "Enter  view top matches",
    Style::default().fg(Color::DarkGray),
  )));

  f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
