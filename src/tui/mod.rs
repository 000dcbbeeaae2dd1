pub mod app;
pub mod theme;
pub mod views;

use anyhow::{anyhow, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use secrecy::ExposeSecret;
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::spawn_blocking;

use crate::config::app_config::Config;
use crate::credentials::models::FormState;
use crate::credentials::notice::Notice;
use crate::manager::handlers::compose_service;
use crate::manager::service::PasswordManager;

use self::app::{App, View};
use self::views::confirm::render_confirm;
use self::views::form::render_form;

pub async fn launch(config: &Config) -> Result<()> {
    let service = Arc::new(compose_service(config, true));
    let store_label = format!(
        "{} store: {}",
        config.encoding,
        config.store_path.display()
    );
    let form = FormState::with_defaults(
        config.default_email.as_deref(),
        config.default_username.as_deref(),
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(form);
    let res = run_loop(&mut terminal, &mut app, &service, &store_label).await;
    // Leaving the form ends any clipboard TTL early.
    service.restore_clipboard_now();

    // Restore terminal
    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        crossterm::terminal::LeaveAlternateScreen,
        crossterm::cursor::Show
    )?;
    terminal.show_cursor()?;

    res
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    service: &Arc<PasswordManager>,
    store_label: &str,
) -> Result<()> {
    let mut last_tick = Instant::now();
    let tick_rate = Duration::from_millis(200);

    loop {
        let current: &App = app;
        terminal.draw(|f| match current.view {
            View::Form => render_form(f, current, store_label),
            View::ConfirmSave => render_confirm(f, current),
        })?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::from_millis(0));

        if event::poll(timeout)? {
            if let Event::Key(k) = event::read()? {
                if k.kind == KeyEventKind::Press {
                    let ctrl = k.modifiers.contains(KeyModifiers::CONTROL);
                    match app.view {
                        View::Form => match k.code {
                            KeyCode::Esc => return Ok(()),
                            KeyCode::Tab | KeyCode::Down => app.next_field(),
                            KeyCode::BackTab | KeyCode::Up => app.prev_field(),
                            KeyCode::Backspace => app.backspace(),
                            KeyCode::Char('g') if ctrl => match service.generate_password() {
                                Ok(pw) => app.set_password(pw.expose_secret()),
                                Err(e) => app.toast(format!("Generation failed: {e}")),
                            },
                            KeyCode::Char('r') if ctrl => {
                                app.reveal_password = !app.reveal_password;
                            }
                            KeyCode::Char('f') if ctrl => {
                                let website = app.form.website.clone();
                                let svc = service.clone();
                                let key = website.clone();
                                let outcome = spawn_blocking(move || svc.lookup(&key))
                                    .await
                                    .map_err(|_| anyhow!("task join error"))?;
                                match outcome {
                                    Ok(outcome) => app.apply_lookup(&website, outcome),
                                    Err(e) => app.toast(format!("{e:#}")),
                                }
                            }
                            KeyCode::Enter => match service.prepare(&app.form) {
                                Ok(record) => app.begin_confirm(record),
                                Err(e) => app.notify(&Notice::MissingFields(e)),
                            },
                            KeyCode::Char(c) if !ctrl && !c.is_control() => app.push_char(c),
                            _ => {}
                        },
                        View::ConfirmSave => match k.code {
                            KeyCode::Char('y') | KeyCode::Char('Y') => {
                                if let Some(record) = app.take_pending() {
                                    let svc = service.clone();
                                    let saved = spawn_blocking(move || svc.save(&record))
                                        .await
                                        .map_err(|_| anyhow!("task join error"))?;
                                    match saved {
                                        Ok(()) => app.saved(),
                                        // Corrupt store: keep the form so nothing typed is lost.
                                        Err(e) => app.toast(format!("{e:#}")),
                                    }
                                }
                            }
                            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                                app.cancel_confirm()
                            }
                            _ => {}
                        },
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }
}
