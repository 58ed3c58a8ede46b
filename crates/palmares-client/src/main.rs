//! Palmares login client, a terminal front end built with ratatui.
//!
//! Drives a [`LoginForm`] against the palmares-web login endpoint and
//! shows its warnings and lockout countdown as they change.

mod app;
mod http;
mod input;
mod render;
mod ui;

use std::io;
use std::panic;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use palmares_core::{LockoutPolicy, LoginForm, LoginOutcome};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::App;
use crate::http::{HttpVerifier, Session};
use crate::input::{handle_key, InputAction};
use crate::render::render;

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:9090";
/// Redraw cadence; fast enough for a one-second countdown.
const FRAME: Duration = Duration::from_millis(100);

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Installs a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// Logs go to a file so they do not fight with the terminal UI.
fn init_tracing() -> anyhow::Result<()> {
    let path = std::env::var("PALMARES_CLIENT_LOG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| std::env::temp_dir().join("palmares-client.log"));
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "palmares_client=info,palmares_core=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let server_url =
        std::env::var("PALMARES_SERVER_URL").unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());
    let verifier = HttpVerifier::new(&server_url)?;
    let form = Arc::new(LoginForm::new(verifier, LockoutPolicy::default()));
    tracing::info!(%server_url, "palmares-client started");

    install_panic_hook();
    let mut terminal = setup_terminal()?;

    let result = run_app(&mut terminal, App::new(server_url), form).await;

    restore_terminal(&mut terminal)?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
    form: Arc<LoginForm<HttpVerifier>>,
) -> anyhow::Result<()> {
    let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel::<LoginOutcome<Session>>();

    loop {
        while let Ok(outcome) = outcome_rx.try_recv() {
            app.apply(outcome);
        }

        let state = form.snapshot();
        let notice = form.notice();
        terminal.draw(|f| render(f, &app, &state, notice))?;

        if event::poll(FRAME)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match handle_key(&app, key) {
                    InputAction::Char(c) => app.push_char(c),
                    InputAction::Backspace => app.backspace(),
                    InputAction::NextField => app.toggle_focus(),
                    InputAction::Submit => {
                        if let Some((identifier, password)) = app.begin_submit() {
                            let form = Arc::clone(&form);
                            let tx = outcome_tx.clone();
                            tokio::spawn(async move {
                                let outcome = form.submit(&identifier, &password).await;
                                let _ = tx.send(outcome);
                            });
                        }
                    }
                    InputAction::Quit => app.quit(),
                    InputAction::None => {}
                }
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
