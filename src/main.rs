mod app;
mod error;
mod event;
mod games;
mod input;
mod settings;
mod ui;

use std::fs::File;
use std::io;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use env_logger::{Builder, Env, Target};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use app::App;
use error::AppError;
use event::{Event, EventHandler};
use settings::Settings;

/// Logs go to a file; the terminal belongs to the UI.
fn init_logger(settings: &Settings) -> Result<(), AppError> {
    let Some(path) = settings.log_path() else {
        return Ok(());
    };
    let file = File::create(&path)?;
    Builder::from_env(Env::default().default_filter_or(settings.log_level.as_str()))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()?;
    Ok(())
}

fn main() -> Result<(), AppError> {
    let (settings, settings_error) = Settings::load();
    init_logger(&settings)?;
    if let Some(err) = settings_error {
        log::warn!("{}; using defaults", err);
    }
    log::info!(
        "starting: tick {} ms, seed {:?}, debounce {}",
        settings.tick_rate_ms,
        settings.seed,
        settings.debounce_contacts
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut app = App::new(&settings);
    let event_handler = EventHandler::new(settings.tick_rate());

    let result = run(&mut terminal, &mut app, &event_handler);

    // Restore terminal even if the loop failed
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    match &result {
        Ok(()) => log::info!("exiting, session scores {:?}", app.scores()),
        Err(err) => log::error!("main loop failed: {}", err),
    }
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<(), AppError> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        match events.next()? {
            Event::Tick => app.on_tick(),
            Event::Key(key) => app.on_key(key),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
