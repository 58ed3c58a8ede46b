use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Field, Screen};

/// Actions that can result from a key press.
#[derive(Debug, PartialEq, Eq)]
pub enum InputAction {
    /// Type a character into the focused field.
    Char(char),
    /// Delete the last character of the focused field.
    Backspace,
    /// Move focus to the other field.
    NextField,
    /// Send the credentials.
    Submit,
    Quit,
    None,
}

pub fn handle_key(app: &App, key: KeyEvent) -> InputAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return InputAction::Quit;
    }

    if let Screen::SignedIn(_) = app.screen() {
        return match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => InputAction::Quit,
            _ => InputAction::None,
        };
    }

    match key.code {
        KeyCode::Esc => InputAction::Quit,
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => InputAction::NextField,
        KeyCode::Enter => match app.focus() {
            Field::Identifier => InputAction::NextField,
            Field::Password => InputAction::Submit,
        },
        KeyCode::Backspace => InputAction::Backspace,
        KeyCode::Char(c) => InputAction::Char(c),
        _ => InputAction::None,
    }
}
