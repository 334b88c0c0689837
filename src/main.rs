//! ragapp - RAG application builder
//!
//! Terminal playground showing the current collection, model and retriever
//! selections, with a modal for creating a named RAG application from them.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use ragapp::application::{App, ToastQueue};
use ragapp::domain::{ApplicationService, ServiceError};
use ragapp::infrastructure::{init_logging, spawn_submission, HttpApplicationService, Settings, SubmissionResult};
use ragapp::presentation::{render_ui, InputHandler};

#[derive(Debug, Parser)]
#[command(name = "ragapp", version, about = "Create RAG applications from the playground")]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Log filter, e.g. `debug` or `ragapp=trace`
    #[arg(long)]
    log_level: Option<String>,
    /// Backend base URL, overriding `[api] base_url`
    #[arg(long)]
    base_url: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = match cli.config.or_else(Settings::default_path) {
        Some(path) => Settings::load(&path)?,
        None => Settings::default(),
    };
    if let Some(base_url) = cli.base_url {
        settings.api.base_url = base_url;
    }
    let level = cli.log_level.unwrap_or_else(|| settings.log.level.clone());
    let log_file = settings.log_file();
    init_logging(&level, &log_file)
        .with_context(|| format!("failed to open log file {}", log_file.display()))?;
    tracing::info!(base_url = %settings.api.base_url, "starting ragapp");

    let service: Arc<dyn ApplicationService> = Arc::new(HttpApplicationService::new(
        &settings.api.base_url,
        Duration::from_secs(settings.api.timeout_secs),
    )?);
    let tick = Duration::from_millis(settings.ui.tick_millis);
    let mut app = App::new(
        settings.playground.into_playground(),
        ToastQueue::new(settings.ui.toast_ticks),
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, service, tick);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "terminal error");
        println!("{err:?}");
    }

    Ok(())
}

/// Main event loop.
///
/// Draws, applies finished submissions, then waits for a key until the next
/// tick is due. Ticks fire on schedule even while keys keep arriving.
/// Continues until the user presses 'q' on the playground screen.
fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    service: Arc<dyn ApplicationService>,
    tick: Duration,
) -> io::Result<()> {
    let (results_tx, results_rx): (Sender<SubmissionResult>, Receiver<SubmissionResult>) = mpsc::channel();

    let mut next_tick = Instant::now() + tick;

    loop {
        terminal.draw(|f| render_ui(f, app))?;

        while let Ok((ticket, result)) = results_rx.try_recv() {
            app.apply_submission_result(ticket, result);
        }

        let now = Instant::now();
        if now >= next_tick {
            app.on_tick();
            next_tick = now + tick;
            continue;
        }

        if !event::poll(next_tick.saturating_duration_since(now))? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') if app.accepts_quit() => return Ok(()),
                    _ => {
                        if let Some(pending) = InputHandler::handle_key_event(app, key.code, key.modifiers) {
                            let ticket = pending.ticket;
                            if let Err(err) = spawn_submission(Arc::clone(&service), pending, results_tx.clone()) {
                                tracing::error!(error = %err, "could not start submission thread");
                                app.apply_submission_result(ticket, Err(ServiceError::Transport(err.to_string())));
                            }
                        }
                    }
                }
            }
        }
    }
}
