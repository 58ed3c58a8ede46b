use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};
use palmares_core::{AttemptNotice, LoginAttemptState};

use crate::app::App;
use crate::ui::login_panel::render_login_panel;
use crate::ui::statusbar::render_statusbar;

/// Main render function: composes the full UI layout each frame.
pub fn render(
    f: &mut Frame,
    app: &App,
    state: &LoginAttemptState,
    notice: Option<AttemptNotice>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(f.area());

    render_login_panel(f, chunks[0], app, state, notice);
    render_statusbar(f, chunks[1], app.server_url(), state);
}
