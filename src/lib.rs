pub mod app;
pub mod cli;
pub mod scene;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_support;

use std::{
    fs::File,
    io::{self, Stdout, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use app::{
    events::{AppEvent, spawn_input_task, start_frame_task},
    settings::{MotionSetting, RuntimeSettings, load_runtime_settings, settings_path},
    state::AppState,
};
use cli::{Cli, FormatArg};
use crossterm::{
    event::DisableMouseCapture,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use scene::{SceneConfig, compute_scene, generate_initial_clouds, grid_to_html, grid_to_text};
use tokio::sync::mpsc;
use ui::theme::detect_color_capability;

const ONE_SHOT_COLS: u16 = 80;
const ONE_SHOT_ROWS: u16 = 24;

pub async fn run(cli: Cli) -> Result<()> {
    let path = settings_path();
    let settings = load_runtime_settings(&cli, path.as_deref())?;
    tracing::info!(?settings, "starting");

    let mut terminal = setup_terminal()?;
    let result = run_inner(&mut terminal, &cli, settings, path).await;
    restore_terminal(&mut terminal)?;
    result
}

async fn run_inner(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    cli: &Cli,
    settings: RuntimeSettings,
    path: Option<PathBuf>,
) -> Result<()> {
    let size = terminal.size()?;
    let cols = cli.cols.unwrap_or(size.width);
    let rows = cli.rows.unwrap_or(size.height);
    let capability = detect_color_capability(cli.effective_color_mode());
    let fps = settings.fps;
    let animate = settings.motion == MotionSetting::Full;

    let mut app = AppState::new(settings, capability, usize::from(cols), usize::from(rows))
        .with_settings_path(path);

    let (tx, mut rx) = mpsc::channel::<AppEvent>(64);
    if animate {
        start_frame_task(tx.clone(), fps);
    }
    let input_stream = spawn_input_task();
    tokio::pin!(input_stream);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    terminal.draw(|frame| ui::render(frame, &app))?;
    while app.running {
        tokio::select! {
            maybe_input = input_stream.next() => {
                match maybe_input {
                    Some(input) => app.handle_event(AppEvent::Input(input)),
                    None => app.handle_event(AppEvent::Quit),
                }
            }
            maybe_event = rx.recv() => {
                if let Some(event) = maybe_event {
                    app.handle_event(event);
                }
            }
            _ = &mut ctrl_c => app.handle_event(AppEvent::Quit),
        }

        terminal.draw(|frame| ui::render(frame, &app))?;
    }

    Ok(())
}

/// Render one frame with no terminal setup and write it to `out`.
#[tracing::instrument(skip_all, fields(cols = ?cli.cols, rows = ?cli.rows, format = ?cli.format))]
pub fn write_one_shot(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let settings = load_runtime_settings(cli, settings_path().as_deref())?;
    writeln!(out, "{}", render_one_shot(cli, &settings)).context("writing frame failed")
}

#[must_use]
pub fn render_one_shot(cli: &Cli, settings: &RuntimeSettings) -> String {
    let cols = usize::from(cli.cols.unwrap_or(ONE_SHOT_COLS));
    let rows = usize::from(cli.rows.unwrap_or(ONE_SHOT_ROWS));
    let clouds = generate_initial_clouds(cols, rows, settings.cloud_count(cols));
    let palette = settings.resolved_palette();
    let grid = compute_scene(&SceneConfig {
        cols,
        rows,
        clouds: &clouds,
        show_hills: settings.show_hills,
        palette: &palette,
        time: cli.time,
    });
    match cli.format {
        FormatArg::Html => grid_to_html(&grid),
        FormatArg::Text => grid_to_text(&grid),
    }
}

/// Route tracing output to `path`. Without a path nothing is installed, since
/// the terminal belongs to the UI.
pub fn init_tracing(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .map_err(|err| anyhow::anyhow!("installing tracing subscriber failed: {err}"))
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    install_panic_hook();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn install_panic_hook() {
    let existing = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen, DisableMouseCapture);
        existing(panic);
    }));
}
