//! Dashboard sidebar: two groups of entries and a collapse toggle.

use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

use crate::route::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
pub enum Group {
  Navigation,
  Settings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, IntoStaticStr)]
pub enum SidebarItem {
  Candidates,
  #[strum(to_string = "Job Descriptions")]
  JobDescriptions,
  Integrations,
  #[strum(to_string = "Scoring Configuration")]
  Scoring,
  Logout,
}

impl SidebarItem {
  pub fn label(self) -> &'static str { self.into() }

  /// Shown instead of the label when the sidebar is collapsed.
  pub fn glyph(self) -> &'static str {
    match self {
      Self::Candidates => "C",
      Self::JobDescriptions => "J",
      Self::Integrations => "I",
      Self::Scoring => "S",
      Self::Logout => "⏻",
    }
  }

  pub fn group(self) -> Group {
    match self {
      Self::Candidates | Self::JobDescriptions => Group::Navigation,
      Self::Integrations | Self::Scoring | Self::Logout => Group::Settings,
    }
  }

  /// Where the entry navigates; `None` for logout.
  pub fn target(self) -> Option<Route> {
    match self {
      Self::Candidates => Some(Route::Candidates),
      Self::JobDescriptions => Some(Route::JobDescriptions),
      Self::Integrations => Some(Route::Integrations),
      Self::Scoring => Some(Route::Score),
      Self::Logout => None,
    }
  }

  /// Top matches live under their job description.
  pub fn is_active(self, route: &Route) -> bool {
    match (self, route) {
      (Self::JobDescriptions, Route::TopMatches { .. }) => true,
      _ => self.target().as_ref() == Some(route),
    }
  }
}

#[derive(Debug, Default)]
pub struct Sidebar {
  pub collapsed: bool,
  pub cursor:    usize,
}

impl Sidebar {
  pub const EXPANDED_WIDTH: u16 = 26;
  pub const COLLAPSED_WIDTH: u16 = 5;

  pub fn items() -> impl Iterator<Item = SidebarItem> { SidebarItem::iter() }

  pub fn selected(&self) -> SidebarItem {
    Self::items()
      .nth(self.cursor)
      .unwrap_or(SidebarItem::Candidates)
  }

  pub fn width(&self) -> u16 {
    if self.collapsed {
      Self::COLLAPSED_WIDTH
    } else {
      Self::EXPANDED_WIDTH
    }
  }

  pub fn toggle(&mut self) { self.collapsed = !self.collapsed; }

  pub fn down(&mut self) {
    if self.cursor + 1 < Self::items().count() {
      self.cursor += 1;
    }
  }

  pub fn up(&mut self) { self.cursor = self.cursor.saturating_sub(1); }

  /// Put the cursor on the entry for `route`, if it has one.
  pub fn follow(&mut self, route: &Route) {
    if let Some(i) = Self::items().position(|item| item.is_active(route)) {
      self.cursor = i;
    }
  }
}
