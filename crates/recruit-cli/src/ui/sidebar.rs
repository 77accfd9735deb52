use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use super::widgets::ACCENT;
use crate::{
  app::{App, Focus},
  sidebar::{Group, Sidebar},
};

pub fn draw<A, S>(f: &mut Frame, area: Rect, app: &App<A, S>) {
  let focused = app.focus == Focus::Sidebar;
  let block = Block::default()
    .borders(Borders::RIGHT)
    .border_style(Style::default().fg(if focused { ACCENT } else { Color::DarkGray }));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let collapsed = app.sidebar.collapsed;
  let mut lines = Vec::new();
  let mut group: Option<Group> = None;

  for (i, item) in Sidebar::items().enumerate() {
    if group != Some(item.group()) {
      group = Some(item.group());
      if i > 0 {
        lines.push(Line::from(""));
      }
      if !collapsed {
        let name: &'static str = item.group().into();
        lines.push(Line::from(Span::styled(
          format!(" {}", name.to_uppercase()),
          Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
        )));
      }
    }

    let text = if collapsed {
      format!(" {} ", item.glyph())
    } else {
      format!(" {} {}", item.glyph(), item.label())
    };

    let mut style = Style::default().fg(Color::Gray);
    if item.is_active(&app.route) {
      style = style.fg(ACCENT).add_modifier(Modifier::BOLD);
    }
    if focused && i == app.sidebar.cursor {
      style = style.bg(ACCENT).fg(Color::White);
    }
    lines.push(Line::from(Span::styled(text, style)));
  }

  f.render_widget(Paragraph::new(lines), inner);
}
