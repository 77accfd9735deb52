use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Gauge, Paragraph, Tabs},
};
use recruit_core::weights::{REQUIRED_TOTAL, display_role};

use super::widgets::{ACCENT, panel, placeholder};
use crate::views::weight_editor::WeightEditor;

pub fn draw(f: &mut Frame, area: Rect, editor: &WeightEditor) {
  let block = panel("Scoring Configuration");
  let inner = block.inner(area);
  f.render_widget(block, area);

  let roles: Vec<&str> = editor.config.roles().collect();
  if let Some(line) = placeholder(&editor.load, "No roles configured.", roles.is_empty()) {
    f.render_widget(Paragraph::new(line), inner);
    return;
  }

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(2), // role tabs
      Constraint::Min(0),    // categories
      Constraint::Length(2), // total
    ])
    .split(inner);

  let selected = editor
    .role
    .as_deref()
    .and_then(|r| roles.iter().position(|x| *x == r))
    .unwrap_or(0);
  f.render_widget(
    Tabs::new(roles.iter().map(|r| display_role(r)).collect::<Vec<_>>())
      .select(selected)
      .style(Style::default().fg(Color::Gray))
      .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
    rows[0],
  );

  draw_categories(f, rows[1], editor);
  draw_total(f, rows[2], editor);
}

fn draw_categories(f: &mut Frame, area: Rect, editor: &WeightEditor) {
  let bar_width = area.width.saturating_sub(40).max(10) as i64;
  let lines: Vec<Line> = editor
    .draft
    .categories()
    .enumerate()
    .map(|(i, category)| {
      let weight = editor.draft.get(category).unwrap_or_default();
      let is_cursor = i == editor.cursor;
      let value = match (&editor.entry, is_cursor) {
        (Some(digits), true) => format!("{digits:>3}_"),
        _ => format!("{weight:>3}%"),
      };
      let filled = (weight * bar_width / REQUIRED_TOTAL) as usize;
      let style = if is_cursor {
        Style::default().fg(Color::White).bg(ACCENT).add_modifier(Modifier::BOLD)
      } else {
        Style::default().fg(Color::Gray)
      };
      Line::from(vec![
        Span::styled(format!(" {:<26}", display_role(category)), style),
        Span::styled(format!(" {value} "), style),
        Span::styled("█".repeat(filled), Style::default().fg(ACCENT)),
      ])
    })
    .collect();

  f.render_widget(Paragraph::new(lines), area);
}

fn draw_total(f: &mut Frame, area: Rect, editor: &WeightEditor) {
  let total = editor.draft.total();
  let color = if total == REQUIRED_TOTAL { Color::Green } else { Color::Red };

  let mut label = format!("Total {total} / {REQUIRED_TOTAL}");
  if editor.saving {
    label.push_str("  saving…");
  } else if editor.is_dirty() {
    label.push_str("  unsaved changes");
  }

  f.render_widget(
    Gauge::default()
      .gauge_style(Style::default().fg(color))
      .ratio((total.clamp(0, REQUIRED_TOTAL) as f64) / REQUIRED_TOTAL as f64)
      .label(label),
    Rect { height: 1, ..area },
  );
}
