//! build_tui - Interactive TUI for character builds and farming projections

mod app;
mod ui;

use anyhow::{Context, Result};
use app::App;
use build_core::config::{self, BaseConfig, GameData};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> Result<()> {
    let _guard = setup_logging()?;

    let data_dir = std::env::args().nth(1).map(PathBuf::from);
    let (data, config) = load_data(data_dir.as_deref())?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(data, config);
    let result = run(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "terminal loop failed");
    }
    tracing::info!("build_tui exiting");
    result
}

fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if !event::poll(std::time::Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => break,
            (KeyCode::Tab, _) => app.next_tab(),
            (KeyCode::BackTab, _) => app.prev_tab(),
            (KeyCode::Char('1'), _) => app.set_tab(0),
            (KeyCode::Char('2'), _) => app.set_tab(1),
            (KeyCode::Char('3'), _) => app.set_tab(2),
            (KeyCode::Char('4'), _) => app.set_tab(3),
            (KeyCode::Char('5'), _) | (KeyCode::Char('?'), _) => app.set_tab(4),
            (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.on_up(),
            (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.on_down(),
            (KeyCode::Left, _) | (KeyCode::Char('h'), _) => app.on_left(),
            (KeyCode::Right, _) | (KeyCode::Char('l'), _) => app.on_right(),
            (KeyCode::Char('+'), _) | (KeyCode::Char('='), _) => app.adjust_selected(10),
            (KeyCode::Char('-'), _) => app.adjust_selected(-10),
            (KeyCode::Enter, _) | (KeyCode::Char(' '), _) => app.on_enter(),
            (KeyCode::Char('u'), _) => app.unequip_current_slot(),
            (KeyCode::Char('r'), _) => app.reset(),
            (KeyCode::Char('s'), _) => app.cycle_sort_column(),
            (KeyCode::Char('d'), _) => app.toggle_sort_direction(),
            (KeyCode::Char('['), _) => app.shift_min_level(-1),
            (KeyCode::Char(']'), _) => app.shift_min_level(1),
            (KeyCode::Char('{'), _) => app.shift_max_level(-1),
            (KeyCode::Char('}'), _) => app.shift_max_level(1),
            (KeyCode::Char('x'), _) => app.exclude_selected(),
            (KeyCode::Char('X'), _) => app.clear_exclusions(),
            _ => {}
        }
    }

    Ok(())
}

/// Load reference data and base config, from `dir` when given
///
/// Files missing from `dir` fall back to the bundled copies.
fn load_data(dir: Option<&Path>) -> Result<(GameData, BaseConfig)> {
    let Some(dir) = dir else {
        let data = config::default_game_data().context("loading bundled game data")?;
        let base = BaseConfig::bundled().context("loading bundled base config")?;
        return Ok((data, base));
    };

    tracing::info!(dir = %dir.display(), "loading data directory");
    let data = GameData::load_dir(dir)
        .with_context(|| format!("loading game data from {}", dir.display()))?;

    let base_path = dir.join("base.toml");
    let base = if base_path.exists() {
        config::load_toml(&base_path)
            .with_context(|| format!("loading {}", base_path.display()))?
    } else {
        BaseConfig::bundled().context("loading bundled base config")?
    };

    Ok((data, base))
}

/// Log to a file only; the terminal belongs to the TUI
fn setup_logging() -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let log_dir = std::env::var_os("BUILD_TUI_LOG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("build_tui"));
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("creating log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&log_dir, "build_tui.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::info!("Log file: {}/build_tui.log", log_dir.display());
    Ok(guard)
}
