//! Email/password sign-in form.

use crossterm::event::{KeyCode, KeyEvent};
use recruit_core::{
  Result,
  session::{Credentials, User},
};

use super::{Command, Effect, Notice};
use crate::route::Route;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Field {
  #[default]
  Email,
  Password,
}

#[derive(Debug, Default)]
pub struct SignInView {
  pub email:      String,
  pub password:   String,
  pub field:      Field,
  pub submitting: bool,
}

impl SignInView {
  pub fn new(email: Option<String>) -> Self {
    let email = email.unwrap_or_default();
    let field = if email.is_empty() { Field::Email } else { Field::Password };
    Self { email, field, ..Self::default() }
  }

  pub fn submit(&mut self) -> Vec<Effect> {
    if self.submitting {
      return Vec::new();
    }
    let credentials = Credentials {
      email:    self.email.trim().to_string(),
      password: self.password.clone(),
    };
    if let Err(e) = credentials.validate() {
      return vec![Effect::Notify(Notice::warning(e.to_string()))];
    }
    self.submitting = true;
    vec![Effect::Call(Command::SignIn(credentials))]
  }

  pub fn signed_in(&mut self, result: Result<User>) -> Vec<Effect> {
    self.submitting = false;
    self.password.clear();
    match result {
      Ok(user) => {
        tracing::info!(user = user.label(), "login successful");
        vec![
          Effect::Notify(Notice::success("Login successful")),
          Effect::Navigate(Route::Candidates),
        ]
      }
      Err(e) => {
        tracing::warn!(error = %e, "login failed");
        vec![Effect::Notify(Notice::error("Login failed"))]
      }
    }
  }

  fn input(&mut self) -> &mut String {
    match self.field {
      Field::Email => &mut self.email,
      Field::Password => &mut self.password,
    }
  }

  pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
    match key.code {
      KeyCode::Tab | KeyCode::Down | KeyCode::Up | KeyCode::BackTab => {
        self.field = match self.field {
          Field::Email => Field::Password,
          Field::Password => Field::Email,
        };
      }
      KeyCode::Enter => match self.field {
        Field::Email => self.field = Field::Password,
        Field::Password => return self.submit(),
      },
      KeyCode::Backspace => {
        self.input().pop();
      }
      KeyCode::Char(c) => self.input().push(c),
      KeyCode::Esc => return vec![Effect::Navigate(Route::Landing)],
      _ => {}
    }
    Vec::new()
  }
}
