//! Bottom status bar: server URL and the live lockout countdown.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use palmares_core::{format_remaining, LockoutCause, LoginAttemptState};

/// Countdown label, or `None` when the form is not locked.
pub fn lockout_label(state: &LoginAttemptState) -> Option<String> {
    if !state.locked {
        return None;
    }
    let reason = match state.lockout_cause {
        Some(LockoutCause::Transport) => "server unreachable",
        Some(LockoutCause::Credential) | None => "too many attempts",
    };
    Some(format!(
        "LOCKED ({reason}) {}",
        format_remaining(state.lockout_remaining_secs)
    ))
}

pub fn render_statusbar(f: &mut Frame, area: Rect, server_url: &str, state: &LoginAttemptState) {
    let mut spans = vec![Span::styled(
        format!(" {server_url}"),
        Style::default().fg(Color::Gray),
    )];
    if let Some(label) = lockout_label(state) {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            label,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }

    let bar = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    f.render_widget(bar, area);
}
