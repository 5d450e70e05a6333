//! Restaurants
//!
//! Terminal front-end for browsing restaurants and marking favorites.
//! Favorites are saved on every toggle and restored on the next start.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::{info, warn};

use restaurants::application::{App, ChannelReporter, FavoriteStore};
use restaurants::domain::FAVORITES_KEY;
use restaurants::infrastructure::{
    init_logging, log_file, Config, EntitySource, JsonFileStore, PersistenceHandle, RemoteSource,
    SourceKind, StaticSource,
};
use restaurants::presentation::{render_ui, InputHandler, InputOutcome};

const TICK: Duration = Duration::from_millis(100);

/// Entry point for the restaurants application.
///
/// Sets up logging and configuration, restores saved favorites, starts the
/// first fetch and runs the event loop until the user quits.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(&log_file())?;
    let config = Config::load();

    let persistence = Arc::new(JsonFileStore::new(&config.state_file));
    let source: Arc<dyn EntitySource> = match config.source {
        SourceKind::Static => Arc::new(StaticSource::default()),
        SourceKind::Remote => Arc::new(RemoteSource::new(&config.base_url, config.fetch_timeout)?),
    };

    let (reporter, errors) = ChannelReporter::new();
    let store = FavoriteStore::new(persistence.clone(), Arc::new(reporter));
    let mut app = App::new(store, source, errors);
    app.refresh();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    app.shutdown();

    if let Err(err) = res {
        println!("{err:?}");
    } else if config.clear_on_exit {
        info!("normal exit, clearing saved favorites");
        if let Err(e) = persistence.remove(FAVORITES_KEY) {
            warn!("could not clear saved favorites: {e}");
        }
    }

    Ok(())
}

/// Main application event loop.
///
/// Redraws every tick so results from background fetches show up without
/// a key press.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        app.sync();
        terminal.draw(|f| render_ui(f, app))?;

        if !event::poll(TICK)? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press
                && InputHandler::handle_key_event(app, key.code, key.modifiers) == InputOutcome::Quit
            {
                return Ok(());
            }
        }
    }
}
