use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Cell, List, ListItem, ListState, Paragraph, Row, Table, Wrap},
};
use recruit_core::{top_match::TopMatchCandidate, weights::display_role};

use super::widgets::{ACCENT, centered, chips, heading, label_value, panel, placeholder, popup};
use crate::views::top_matches::{Overlay, TopMatchesView};

fn score_color(score: f64) -> Color {
  if score >= 80.0 {
    Color::Green
  } else if score >= 60.0 {
    Color::Yellow
  } else {
    Color::Red
  }
}

pub fn draw(f: &mut Frame, area: Rect, view: &TopMatchesView) {
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
    .split(area);

  draw_ranking(f, cols[0], view);

  match view.selected() {
    Some(m) => draw_detail(f, cols[1], m, view.rank().unwrap_or(1)),
    None => f.render_widget(panel("Candidate"), cols[1]),
  }

  match (&view.overlay, view.selected()) {
    (Some(Overlay::Breakdown), Some(m)) => draw_breakdown(f, area, m),
    (Some(Overlay::Preview(url)), Some(m)) => draw_preview(f, area, m, url.as_deref()),
    _ => {}
  }
}

fn draw_ranking(f: &mut Frame, area: Rect, view: &TopMatchesView) {
  let block = panel("Top Matches");
  let inner = block.inner(area);
  f.render_widget(block, area);

  if let Some(line) = placeholder(
    &view.load,
    "No matches for this job description yet.",
    view.matches.is_empty(),
  ) {
    f.render_widget(Paragraph::new(line).wrap(Wrap { trim: false }), inner);
    return;
  }

  let items: Vec<ListItem> = view
    .matches
    .iter()
    .enumerate()
    .map(|(i, m)| {
      ListItem::new(Line::from(vec![
        Span::styled(format!(" #{:<3}", i + 1), Style::default().fg(Color::DarkGray)),
        Span::styled(
          format!("{:>5.1} ", m.total_score),
          Style::default()
            .fg(score_color(m.total_score))
            .add_modifier(Modifier::BOLD),
        ),
        Span::raw(m.name.clone()),
        Span::styled(
          format!("  {}", m.designation),
          Style::default().fg(Color::DarkGray),
        ),
      ]))
    })
    .collect();

  let mut state = ListState::default();
  state.select(Some(view.cursor));
  f.render_stateful_widget(
    List::new(items).highlight_style(
      Style::default()
        .bg(ACCENT)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD),
    ),
    inner,
    &mut state,
  );
}

fn draw_detail(f: &mut Frame, area: Rect, m: &TopMatchCandidate, rank: usize) {
  let block = panel("Candidate");
  let inner = block.inner(area);
  f.render_widget(block, area);

  let profile = display_role(&m.profile_type);
  let mut lines = vec![
    Line::from(vec![
      Span::styled(
        format!("#{rank}  "),
        Style::default().fg(Color::DarkGray),
      ),
      Span::styled(
        m.name.clone(),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
      ),
      Span::styled(
        format!("   {:.1}", m.total_score),
        Style::default()
          .fg(score_color(m.total_score))
          .add_modifier(Modifier::BOLD),
      ),
    ]),
    Line::from(Span::styled(m.designation.clone(), Style::default().fg(Color::Gray))),
    Line::from(""),
    label_value("Email", &m.email),
    label_value("Contact", &m.contact),
    label_value("Experience", &m.experience),
    label_value("Education", &m.education),
    label_value("Profile", &profile),
    Line::from(""),
    heading("Skills matched"),
    chips(&m.skills_matched, Color::Green),
    Line::from(""),
    heading("Key strengths"),
  ];
  if m.key_strengths.is_empty() {
    lines.push(Line::from("—"));
  }
  lines.extend(m.key_strengths.iter().map(|s| Line::from(format!("• {s}"))));

  if !m.key_achievements.is_empty() {
    lines.push(Line::from(""));
    lines.push(heading("Key achievements"));
    lines.extend(m.key_achievements.iter().map(|a| Line::from(format!("• {a}"))));
  }

  f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn draw_breakdown(f: &mut Frame, area: Rect, m: &TopMatchCandidate) {
  let popup_area = centered(area, 80, 70);
  let title = format!("Score breakdown: {}", m.name);

  if m.score_breakdown.is_empty() {
    popup(f, popup_area, &title, vec![Line::from("No score breakdown available.")]);
    return;
  }

  let rows = m.breakdown_rows();
  let mut table_rows: Vec<Row> = rows
    .iter()
    .map(|r| {
      Row::new(vec![
        Cell::from(display_role(&r.category)),
        Cell::from(format!("{:.1}", r.score)),
        Cell::from(format!("{:.0}%", r.weight)),
        Cell::from(format!("{:.2}", r.weighted)),
      ])
    })
    .collect();
  let total = m.score_breakdown.total();
  table_rows.push(
    Row::new(vec![
      Cell::from("Total"),
      Cell::from(""),
      Cell::from(format!("{:.0}%", total.weight)),
      Cell::from(format!("{:.2}", total.weighted)),
    ])
    .style(Style::default().add_modifier(Modifier::BOLD)),
  );

  let explained: Vec<Line> = rows
    .iter()
    .filter_map(|r| {
      r.explanation.as_ref().map(|text| {
        Line::from(vec![
          Span::styled(
            format!("{}: ", display_role(&r.category)),
            Style::default().fg(ACCENT),
          ),
          Span::raw(text.clone()),
        ])
      })
    })
    .collect();

  popup(f, popup_area, &title, Vec::new());
  let inner = panel("").inner(popup_area);
  let parts = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(table_rows.len() as u16 + 2),
      Constraint::Min(0),
    ])
    .split(inner);

  f.render_widget(
    Table::new(table_rows, [
      Constraint::Percentage(40),
      Constraint::Percentage(20),
      Constraint::Percentage(20),
      Constraint::Percentage(20),
    ])
    .header(
      Row::new(vec!["Category", "Score", "Weight", "Weighted"])
        .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD)),
    ),
    parts[0],
  );
  f.render_widget(Paragraph::new(explained).wrap(Wrap { trim: false }), parts[1]);
}

fn draw_preview(f: &mut Frame, area: Rect, m: &TopMatchCandidate, url: Option<&str>) {
  let lines = match url {
    Some(url) => vec![
      Line::from(format!("Resume for {}", m.name)),
      Line::from(""),
      Line::from(Span::styled(url.to_string(), Style::default().fg(Color::Cyan))),
      Line::from(""),
      Line::from(Span::styled(
        "Open the link in a browser to view the document.",
        Style::default().fg(Color::DarkGray),
      )),
    ],
    None => vec![Line::from("No resume available for this candidate.")],
  };
  popup(f, centered(area, 70, 40), "Resume preview", lines);
}
