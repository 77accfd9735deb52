//! Building blocks shared by the page renderers.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::views::{
  LoadState, UploadState,
  listing::{Listed, Listing, Mode},
};

pub const ACCENT: Color = Color::Indexed(98);

pub fn panel(title: &str) -> Block<'_> {
  Block::default()
    .title(format!(" {title} "))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray))
}

pub fn heading(text: &str) -> Line<'_> {
  Line::from(Span::styled(
    text,
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
  ))
}

pub fn label_value<'a>(label: &'a str, value: &'a str) -> Line<'a> {
  Line::from(vec![
    Span::styled(format!("{label:<12}"), Style::default().fg(Color::DarkGray)),
    Span::raw(if value.is_empty() { "—" } else { value }),
  ])
}

/// Tags rendered inline as `[a] [b] [c]`.
pub fn chips(items: &[String], color: Color) -> Line<'static> {
  if items.is_empty() {
    return Line::from(Span::styled("—", Style::default().fg(Color::DarkGray)));
  }
  let spans: Vec<Span> = items
    .iter()
    .flat_map(|item| {
      [
        Span::styled(format!("[{item}]"), Style::default().fg(color)),
        Span::raw(" "),
      ]
    })
    .collect();
  Line::from(spans)
}

/// A rectangle of the given percentage size centred in `area`.
pub fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Percentage((100 - percent_y) / 2),
      Constraint::Percentage(percent_y),
      Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);
  Layout::default()
    .direction(Direction::Horizontal)
    .constraints([
      Constraint::Percentage((100 - percent_x) / 2),
      Constraint::Percentage(percent_x),
      Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(rows[1])[1]
}

/// Clear `area` and draw a bordered popup with `lines` inside.
pub fn popup(f: &mut Frame, area: Rect, title: &str, lines: Vec<Line>) {
  let block = Block::default()
    .title(format!(" {title} "))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(ACCENT));
  f.render_widget(Clear, area);
  f.render_widget(
    Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
    area,
  );
}

/// Placeholder text for a list that has nothing to show yet. `None` when the
/// list itself should be drawn.
pub fn placeholder(load: &LoadState, empty: &str, is_empty: bool) -> Option<Line<'static>> {
  match load {
    LoadState::Idle | LoadState::Loading if is_empty => Some(Line::from(Span::styled(
      "Loading…",
      Style::default().fg(Color::DarkGray),
    ))),
    LoadState::Failed(msg) if is_empty => Some(Line::from(Span::styled(
      format!("Could not load: {msg}"),
      Style::default().fg(Color::Red),
    ))),
    _ if is_empty => Some(Line::from(Span::styled(
      empty.to_string(),
      Style::default().fg(Color::DarkGray),
    ))),
    _ => None,
  }
}

// ─── List pages ───────────────────────────────────────────────────────────────

/// The upload controls, list, and detail pane shared by the candidates and
/// job-description pages.
pub fn draw_list_page<T, R, D>(
  f: &mut Frame,
  area: Rect,
  title: &str,
  list: &Listing<T>,
  row: R,
  detail: D,
) where
  T: Listed,
  R: Fn(&T) -> Line<'static>,
  D: Fn(&mut Frame, Rect, &T),
{
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Length(4), Constraint::Min(0)])
    .split(area);

  draw_upload_controls(f, rows[0], list);

  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
    .split(rows[1]);

  draw_list(f, cols[0], title, list, &row);

  match list.selected() {
    Some(item) => detail(f, cols[1], item),
    None => {
      let block = panel("Detail");
      let inner = block.inner(cols[1]);
      f.render_widget(block, cols[1]);
      f.render_widget(
        Paragraph::new(Span::styled(
          "Nothing selected.",
          Style::default().fg(Color::DarkGray),
        )),
        inner,
      );
    }
  }

  if let Some(id) = &list.pending_delete {
    let name = list
      .items
      .iter()
      .find(|item| item.id() == id)
      .map(|item| item.haystack())
      .unwrap_or_else(|| id.clone());
    popup(
      f,
      centered(area, 50, 25),
      "Confirm delete",
      vec![
        Line::from(format!("Delete this {}?", T::NOUN)),
        Line::from(Span::styled(name, Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(Span::styled(
          "y / Enter  delete      n / Esc  cancel",
          Style::default().fg(Color::DarkGray),
        )),
      ],
    );
  }
}

fn draw_upload_controls<T: Listed>(f: &mut Frame, area: Rect, list: &Listing<T>) {
  let editing = list.mode == Mode::PickFiles;
  let block = panel("Upload").border_style(Style::default().fg(if editing {
    ACCENT
  } else {
    Color::DarkGray
  }));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let input = if editing {
    format!("{}_", list.picker.input)
  } else if list.picker.input.is_empty() {
    format!("press u to choose files ({})", list.picker.rules.accept_hint())
  } else {
    list.picker.input.clone()
  };

  let selected = list.picker.selected();
  let status = match (list.upload, selected.len()) {
    (UploadState::Uploading, _) => Span::styled(
      "Uploading…",
      Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    ),
    (UploadState::Idle, 0) => Span::styled(
      "No file selected",
      Style::default().fg(Color::DarkGray),
    ),
    (UploadState::Idle, _) => Span::styled(
      format!(
        "Selected: {}   [s] submit",
        selected
          .iter()
          .map(|s| s.file_name())
          .collect::<Vec<_>>()
          .join(", ")
      ),
      Style::default().fg(Color::Green),
    ),
  };

  f.render_widget(
    Paragraph::new(vec![
      Line::from(vec![
        Span::styled("Files: ", Style::default().fg(Color::DarkGray)),
        Span::raw(input),
      ]),
      Line::from(status),
    ]),
    inner,
  );
}

fn draw_list<T, R>(f: &mut Frame, area: Rect, title: &str, list: &Listing<T>, row: &R)
where
  T: Listed,
  R: Fn(&T) -> Line<'static>,
{
  let visible = list.visible();
  let title = if list.filter.is_empty() {
    format!("{title} ({})", list.items.len())
  } else {
    format!("{title} ({}/{})", visible.len(), list.items.len())
  };

  let block = panel(&title);
  let mut inner = block.inner(area);
  f.render_widget(block, area);

  if (list.mode == Mode::Filter || !list.filter.is_empty()) && inner.height > 2 {
    let filter_area = Rect {
      x:      inner.x,
      y:      inner.y + inner.height - 1,
      width:  inner.width,
      height: 1,
    };
    inner.height = inner.height.saturating_sub(1);
    let text = if list.mode == Mode::Filter {
      format!("/{}_", list.filter)
    } else {
      format!("/{}", list.filter)
    };
    f.render_widget(
      Paragraph::new(text).style(Style::default().fg(Color::Yellow)),
      filter_area,
    );
  }

  if let Some(line) = placeholder(&list.load, "Nothing here yet.", visible.is_empty()) {
    f.render_widget(Paragraph::new(line), inner);
    return;
  }

  let items: Vec<ListItem> = visible.iter().map(|&item| ListItem::new(row(item))).collect();
  let mut state = ListState::default();
  state.select(Some(list.cursor));

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
