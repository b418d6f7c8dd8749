//! CodeOps console entry point.

use clap::Parser;
use codeops_core::{EngineMode, MissionOutcome, MissionRequest, SolverBackend};
use codeops_tui::api_client::HttpSolver;
use codeops_tui::cli::{Cli, Commands};
use codeops_tui::clipboard::SystemClipboard;
use codeops_tui::config::TuiConfig;
use codeops_tui::error::TuiError;
use codeops_tui::events::TuiEvent;
use codeops_tui::headless;
use codeops_tui::keys::{map_key, Action};
use codeops_tui::logging::init_logging;
use codeops_tui::state::App;
use codeops_tui::views::render_view;
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event as CrosstermEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let config = TuiConfig::load(cli.config.as_deref())?;
    init_logging(&config.log_path)?;

    match cli.command {
        Some(Commands::Run { task, mode, files }) => {
            let mode = mode.map(EngineMode::from).unwrap_or(config.default_mode);
            let code = run_headless(&config, &task, mode, &files).await?;
            std::process::exit(code);
        }
        None => run_console(config).await?,
    }
    Ok(())
}

async fn run_headless(
    config: &TuiConfig,
    task: &str,
    mode: EngineMode,
    files: &[PathBuf],
) -> color_eyre::Result<i32> {
    let solver = HttpSolver::new(config)?;
    let run = headless::run_once(&solver, task, mode, files).await?;
    let mut stdout = io::stdout().lock();
    headless::write_report(&mut stdout, &run)?;
    stdout.flush()?;
    Ok(run.exit_code())
}

async fn run_console(config: TuiConfig) -> Result<(), TuiError> {
    let solver: Arc<dyn SolverBackend> = Arc::new(HttpSolver::new(&config)?);
    let mut clipboard = SystemClipboard::new();
    let mut app = App::new(config);

    let mut terminal = setup_terminal()?;
    let _guard = TerminalGuard;

    let (event_tx, mut event_rx) = mpsc::channel::<TuiEvent>(256);
    spawn_input_reader(event_tx.clone());

    let mut ticker = tokio::time::interval(Duration::from_millis(app.config.tick_interval_ms));
    tracing::info!(solve_url = %app.config.solve_url(), "Console started");

    loop {
        terminal.draw(|f| render_view(f, &app))?;

        tokio::select! {
            _ = ticker.tick() => {
                handle_event(&mut app, TuiEvent::Tick, &solver, &event_tx, &mut clipboard);
            }
            Some(event) = event_rx.recv() => {
                if handle_event(&mut app, event, &solver, &event_tx, &mut clipboard) {
                    break;
                }
            }
        }
    }

    tracing::info!("Console closed");
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, DisableBracketedPaste, LeaveAlternateScreen);
    }
}

fn spawn_input_reader(sender: mpsc::Sender<TuiEvent>) {
    std::thread::spawn(move || loop {
        if let Ok(true) = event::poll(Duration::from_millis(200)) {
            if let Ok(evt) = event::read() {
                let event = match evt {
                    CrosstermEvent::Key(key) => TuiEvent::Input(key),
                    CrosstermEvent::Paste(text) => TuiEvent::Paste(text),
                    CrosstermEvent::Resize(width, height) => TuiEvent::Resize { width, height },
                    _ => continue,
                };
                if sender.blocking_send(event).is_err() {
                    break;
                }
            }
        }
    });
}

/// Apply one event. Returns `true` when the console should exit.
fn handle_event(
    app: &mut App,
    event: TuiEvent,
    solver: &Arc<dyn SolverBackend>,
    sender: &mpsc::Sender<TuiEvent>,
    clipboard: &mut SystemClipboard,
) -> bool {
    match event {
        TuiEvent::Input(key) => match map_key(key) {
            Some(action) => return handle_action(app, action, solver, sender, clipboard),
            None => app.input_key(key),
        },
        TuiEvent::Paste(text) => app.handle_paste(&text),
        TuiEvent::MissionFinished { id, outcome } => {
            app.finish_mission(id, outcome);
        }
        TuiEvent::Tick => {
            app.sync_staging();
            app.prune_notifications(chrono::Utc::now());
        }
        TuiEvent::Resize { .. } => {}
    }
    false
}

fn handle_action(
    app: &mut App,
    action: Action,
    solver: &Arc<dyn SolverBackend>,
    sender: &mpsc::Sender<TuiEvent>,
    clipboard: &mut SystemClipboard,
) -> bool {
    match action {
        Action::Quit => return true,
        Action::Submit => {
            if app.browse.is_some() {
                app.confirm_browse();
            } else if let Some(request) = app.submit_mission() {
                spawn_mission(Arc::clone(solver), request, sender.clone());
            }
        }
        Action::ToggleEngine => app.toggle_engine(),
        Action::OpenBrowse => app.open_browse(),
        Action::SelectPrevious => app.select_previous(),
        Action::SelectNext => app.select_next(),
        Action::RemoveSelected => app.remove_selected(),
        Action::CopyArtifact => app.copy_artifact(clipboard),
        Action::Cancel => {
            app.cancel();
        }
    }
    false
}

fn spawn_mission(
    solver: Arc<dyn SolverBackend>,
    request: MissionRequest,
    sender: mpsc::Sender<TuiEvent>,
) {
    tokio::spawn(async move {
        let result = solver.solve(&request).await;
        let outcome = MissionOutcome::from_result(result);
        let event = TuiEvent::MissionFinished {
            id: request.id,
            outcome,
        };
        if sender.send(event).await.is_err() {
            tracing::warn!(mission = %request.id, "Console closed before mission finished");
        }
    });
}
