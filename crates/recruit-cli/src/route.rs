//! The route table and the authentication guard in front of it.

/// A navigable location. Paths mirror the web dashboard's URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
  Landing,
  SignIn,
  Candidates,
  JobDescriptions,
  TopMatches { jd_id: String },
  Integrations,
  Score,
}

impl Route {
  /// Resolve a path. `/dashboard` is the Candidates index; anything
  /// unrecognised falls back to the landing page.
  pub fn parse(path: &str) -> Self {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
      ["signin"] => Self::SignIn,
      ["dashboard"] | ["dashboard", "candidates"] => Self::Candidates,
      ["dashboard", "job-descriptions"] => Self::JobDescriptions,
      ["dashboard", "top-matches", jd_id] => Self::TopMatches {
        jd_id: (*jd_id).to_string(),
      },
      ["dashboard", "integrations"] => Self::Integrations,
      ["dashboard", "score"] => Self::Score,
      _ => Self::Landing,
    }
  }

  pub fn path(&self) -> String {
    match self {
      Self::Landing => "/".into(),
      Self::SignIn => "/signin".into(),
      Self::Candidates => "/dashboard/candidates".into(),
      Self::JobDescriptions => "/dashboard/job-descriptions".into(),
      Self::TopMatches { jd_id } => format!("/dashboard/top-matches/{jd_id}"),
      Self::Integrations => "/dashboard/integrations".into(),
      Self::Score => "/dashboard/score".into(),
    }
  }

  /// Everything under `/dashboard` needs a session.
  pub fn is_protected(&self) -> bool {
    !matches!(self, Self::Landing | Self::SignIn)
  }

  pub fn title(&self) -> &'static str {
    match self {
      Self::Landing => "Welcome",
      Self::SignIn => "Sign In",
      Self::Candidates => "Candidates",
      Self::JobDescriptions => "Job Descriptions",
      Self::TopMatches { .. } => "Top Matches",
      Self::Integrations => "Integrations",
      Self::Score => "Scoring Configuration",
    }
  }
}

/// What the shell should do with a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guard {
  Render(Route),
  Redirect(Route),
}

/// Evaluated on every navigation, never cached.
pub fn guard(route: Route, signed_in: bool) -> Guard {
  if route.is_protected() && !signed_in {
    Guard::Redirect(Route::SignIn)
  } else {
    Guard::Render(route)
  }
}
