use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::config_io::read_config;
use crate::io::store::{STATE_DIR, Store, bootstrap_state_dir};
use crate::model::StodoConfig;
use crate::session::{Action, Outcome, Session};

use super::input;
use super::render;
use super::theme::Theme;

/// Main application state: the session plus presentation-only fields
pub struct App {
    pub session: Session,
    pub theme: Theme,
    pub show_key_hints: bool,
    pub should_quit: bool,
    /// One-shot message shown in the status row until the next key press
    pub status_message: Option<String>,
    /// First visible row of the task list
    pub scroll_offset: usize,
}

impl App {
    pub fn new(session: Session, config: &StodoConfig) -> Self {
        App {
            session,
            theme: Theme::from_config(&config.ui),
            show_key_hints: config.ui.show_key_hints,
            should_quit: false,
            status_message: None,
            scroll_offset: 0,
        }
    }

    /// Dispatch an action to the session and reflect the outcome
    pub fn apply(&mut self, action: Action) {
        match self.session.dispatch(action) {
            Ok(Outcome::Continue) => {}
            Ok(Outcome::Quit) => self.should_quit = true,
            Ok(Outcome::Archived(path)) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                self.status_message = Some(format!("archived to {}", name));
            }
            Err(e) => self.status_message = Some(format!("error: {}", e)),
        }
    }

    fn state_dir(&self) -> &Path {
        self.session.store().state_dir()
    }
}

/// Restore UI state from .state.json
pub fn restore_ui_state(app: &mut App) {
    use crate::io::state::read_ui_state;

    if let Some(ui_state) = read_ui_state(app.state_dir())
        && let Some(selection) = ui_state.selection
    {
        app.session.select(selection);
    }
}

/// Save UI state to .state.json
pub fn save_ui_state(app: &App) {
    use crate::io::state::{UiState, write_ui_state};

    let ui_state = UiState {
        selection: app.session.selection(),
    };
    let _ = write_ui_state(app.state_dir(), &ui_state);
}

/// Load the task store under `root`, creating `.stodo/` and the task file
/// if needed. Creation failures are warnings; a failed load is an error.
pub fn open_store(root: &Path) -> Result<(Store, StodoConfig), Box<dyn std::error::Error>> {
    let state_dir = root.join(STATE_DIR);
    let config = read_config(&state_dir)?;

    let path = match bootstrap_state_dir(root, &config.store.file) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("warning: {}", e);
            state_dir.join(&config.store.file)
        }
    };

    let store = Store::open(path)?;
    Ok((store, config))
}

/// Run the TUI application
pub fn run(project_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let root = match project_dir {
        Some(dir) => PathBuf::from(dir),
        None => std::env::current_dir()?,
    };
    let (store, config) = open_store(&root)?;

    let mut app = App::new(Session::new(store), &config);
    restore_ui_state(&mut app);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    save_ui_state(&app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut save_counter = 0u32;
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key);
                    // Debounced state save: every ~5 key presses
                    save_counter += 1;
                    if save_counter >= 5 {
                        save_ui_state(app);
                        save_counter = 0;
                    }
                }
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
