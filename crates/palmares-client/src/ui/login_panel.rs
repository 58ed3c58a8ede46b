use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use palmares_core::{AttemptNotice, LoginAttemptState};

use crate::app::{App, Field, Screen};

/// Renders the login box, or the welcome box once signed in.
pub fn render_login_panel(
    f: &mut Frame,
    area: Rect,
    app: &App,
    state: &LoginAttemptState,
    notice: Option<AttemptNotice>,
) {
    let area = centered_rect(60, 60, area);
    f.render_widget(Clear, area);

    let lines = match app.screen() {
        Screen::Login => login_lines(app, state, notice),
        Screen::SignedIn(session) => vec![
            Line::from(Span::styled(
                format!("Signed in as {}", session.user.name),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Press Enter or q to exit."),
        ],
    };

    let panel = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Palmares ")
            .border_style(Style::default().fg(Color::Yellow)),
    );
    f.render_widget(panel, area);
}

fn login_lines<'a>(
    app: &'a App,
    state: &LoginAttemptState,
    notice: Option<AttemptNotice>,
) -> Vec<Line<'a>> {
    let mut lines = Vec::new();

    if let Some(notice) = notice {
        let color = match notice {
            AttemptNotice::CheckCredentials => Color::Yellow,
            AttemptNotice::LastAttempt | AttemptNotice::Locked => Color::Red,
        };
        lines.push(Line::from(Span::styled(
            notice.message(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
    }

    lines.push(field_line(
        "Email or phone",
        app.identifier().to_string(),
        app.focus() == Field::Identifier,
    ));
    lines.push(field_line(
        "Password",
        app.masked_password(),
        app.focus() == Field::Password,
    ));
    lines.push(Line::from(""));

    let hint = if state.locked {
        Span::styled("Sign in disabled while locked", Style::default().fg(Color::DarkGray))
    } else if app.is_submitting() {
        Span::styled("Signing in…", Style::default().fg(Color::Cyan))
    } else {
        Span::raw("Tab: switch field   Enter: sign in   Esc: quit")
    };
    lines.push(Line::from(hint));

    if let Some(message) = app.status_message() {
        lines.push(Line::from(""));
        lines.push(Line::from(message.to_string()));
    }
    lines
}

fn field_line(label: &str, value: String, focused: bool) -> Line<'static> {
    let marker = if focused { "> " } else { "  " };
    let value_style = if focused {
        Style::default().add_modifier(Modifier::UNDERLINED)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::raw(marker),
        Span::styled(format!("{label:<15}"), Style::default().fg(Color::Gray)),
        Span::styled(value, value_style),
    ])
}

/// Calculates a centered rectangle of the given percentage size within the parent area.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
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
        .split(vertical[1])[1]
}
