//! Login screen state, independent of the terminal.

use palmares_core::{format_remaining, LoginOutcome};

use crate::http::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Identifier,
    Password,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Login,
    SignedIn(Session),
}

pub struct App {
    server_url: String,
    identifier: String,
    password: String,
    focus: Field,
    status_message: Option<String>,
    submitting: bool,
    screen: Screen,
    should_quit: bool,
}

impl App {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            identifier: String::new(),
            password: String::new(),
            focus: Field::Identifier,
            status_message: None,
            submitting: false,
            screen: Screen::Login,
            should_quit: false,
        }
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The password as shown on screen.
    pub fn masked_password(&self) -> String {
        "•".repeat(self.password.chars().count())
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Identifier => &mut self.identifier,
            Field::Password => &mut self.password,
        }
    }

    pub fn push_char(&mut self, c: char) {
        if self.submitting {
            return;
        }
        self.focused_mut().push(c);
    }

    pub fn backspace(&mut self) {
        if self.submitting {
            return;
        }
        self.focused_mut().pop();
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Field::Identifier => Field::Password,
            Field::Password => Field::Identifier,
        };
    }

    pub fn can_submit(&self) -> bool {
        !self.submitting
            && self.screen == Screen::Login
            && !self.identifier.trim().is_empty()
            && !self.password.is_empty()
    }

    /// Marks a submission as in flight and hands out the credentials.
    pub fn begin_submit(&mut self) -> Option<(String, String)> {
        if !self.can_submit() {
            return None;
        }
        self.submitting = true;
        self.status_message = Some("Signing in…".to_string());
        Some((self.identifier.clone(), self.password.clone()))
    }

    pub fn apply(&mut self, outcome: LoginOutcome<Session>) {
        self.submitting = false;
        self.status_message = Some(outcome_message(&outcome));
        match outcome {
            LoginOutcome::Authenticated(session) => {
                self.password.clear();
                self.screen = Screen::SignedIn(session);
            }
            LoginOutcome::TransportError(_) => {}
            _ => {
                self.password.clear();
                self.focus = Field::Password;
            }
        }
    }
}

/// One-line message for the status area after a submission.
pub fn outcome_message(outcome: &LoginOutcome<Session>) -> String {
    match outcome {
        LoginOutcome::Authenticated(session) => format!("Welcome, {}", session.user.name),
        LoginOutcome::InvalidCredentials => "Invalid email/phone or password".to_string(),
        LoginOutcome::CredentialLockout { remaining_secs } => format!(
            "Too many failed attempts. Try again in {}",
            format_remaining(*remaining_secs)
        ),
        LoginOutcome::TransportError(e) => format!("Connection problem: {e}"),
        LoginOutcome::TransportLockout { remaining_secs } => format!(
            "Server unreachable. Try again in {}",
            format_remaining(*remaining_secs)
        ),
        LoginOutcome::LockedOut { remaining_secs } => format!(
            "Login locked. Try again in {}",
            format_remaining(*remaining_secs)
        ),
    }
}
