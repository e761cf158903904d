//! Portage List
//!
//! Terminal comparator of French umbrella companies ("portage salarial").
//! Loads the company dataset from the bundled CSV, a file or a URL and
//! presents it as a table, a card grid or a side-by-side comparison.

use std::io;
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
use tracing::{info, warn};

use portage_list::application::{App, AppMode, Config, Settings};
use portage_list::domain::Preferences;
use portage_list::infrastructure::{init_logging, CsvLoader, PreferencesRepository, SystemClipboard};
use portage_list::presentation::{render_ui, InputHandler};

/// Entry point for the company list.
///
/// Resolves settings from the command line and the preferences file,
/// loads the dataset, then runs the terminal interface until the user
/// quits. The theme is saved on the way out.
///
/// # Errors
///
/// Returns an error if terminal setup fails or if there are issues
/// with the terminal interface during runtime.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    if let Err(err) = init_logging(&config.log_file) {
        eprintln!("logging disabled: {err}");
    }

    let preferences = PreferencesRepository::load_or_default(&config.prefs);
    let settings = Settings::resolve(&config, &preferences);
    info!(source = %settings.source, page_size = settings.page_size, "starting");
    let load = CsvLoader::new(settings.timeout).load(&settings.source);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(load, settings, Box::new(SystemClipboard::default()));
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = PreferencesRepository::save(&Preferences { theme: app.theme }, &config.prefs) {
        warn!(error = %err, path = %config.prefs.display(), "could not save preferences");
    }

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

/// Main application event loop.
///
/// Records the terminal size for layout-dependent navigation, draws a
/// frame and dispatches key presses. Returns when the user presses 'q'
/// in normal mode.
///
/// # Errors
///
/// Returns an IO error if terminal operations fail.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        let size = terminal.size()?;
        app.update_viewport_size(size.width, size.height);
        terminal.draw(|f| render_ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') if matches!(app.mode, AppMode::Normal) => return Ok(()),
                    _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                }
            }
        }
    }
}
