use lazyclaude::app::{App, Panel, ViewState};
use lazyclaude::cli::{AppConfig, Args};
use lazyclaude::config::UserConfig;
use lazyclaude::domain::discover_categories;
use lazyclaude::logging;
use lazyclaude::tui::{handle_key_event, handle_overlay_input, render, KeyAction};

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, process, time::Duration};
use tracing::{error, info};

fn main() -> io::Result<()> {
    // Parse command line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    // Load user configuration
    let user_config = UserConfig::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load user config: {}", e);
        UserConfig::default()
    });

    if args.save_config {
        return save_config(&args, &user_config);
    }

    let config = match AppConfig::resolve(&args, &user_config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Some(ref log_file) = config.log_file {
        if let Err(e) = logging::init(log_file) {
            eprintln!("Warning: Failed to open log file {}: {}", log_file.display(), e);
        }
    }

    // Nothing to manage without categories; fail before touching the terminal
    let categories =
        match discover_categories(&config.paths.global_root, &config.paths.project_root) {
            Ok(categories) => categories,
            Err(e) => {
                error!(error = %e, "startup failed");
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        };
    info!(
        global_root = %config.paths.global_root.display(),
        project_root = %config.paths.project_root.display(),
        categories = categories.len(),
        "starting"
    );

    let mut app = App::new(categories);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Persists --global-root / --project-subdir / --log-file to the user config
fn save_config(args: &Args, existing: &UserConfig) -> io::Result<()> {
    let Some(path) = UserConfig::config_path() else {
        eprintln!("Error: Could not determine config directory");
        process::exit(1);
    };
    if let Err(e) = args.merge_into(existing).save_to(&path) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
    println!("Saved configuration to {}", path.display());
    Ok(())
}

/// Main application loop
fn run_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        // Windows reports releases too
        if key.kind != KeyEventKind::Press {
            continue;
        }

        // Overlays only close, quit or scroll
        if app.view != ViewState::Browsing {
            match handle_overlay_input(key) {
                KeyAction::CloseOverlay => app.close_overlay(),
                KeyAction::Quit => break,
                KeyAction::CursorDown => app.scroll_tree_down(),
                KeyAction::CursorUp => app.scroll_tree_up(),
                _ => {}
            }
            continue;
        }

        match handle_key_event(key) {
            KeyAction::Quit => break,
            KeyAction::FocusAvailable => app.focus_panel(Panel::Available),
            KeyAction::FocusApplied => app.focus_panel(Panel::Applied),
            KeyAction::NextPanel | KeyAction::PrevPanel => app.toggle_panel(),
            KeyAction::CursorDown => app.cursor_down(),
            KeyAction::CursorUp => app.cursor_up(),
            KeyAction::ScrollPreviewDown => app.scroll_preview_down(),
            KeyAction::ScrollPreviewUp => app.scroll_preview_up(),
            KeyAction::NextTab => app.next_tab(),
            KeyAction::PrevTab => app.prev_tab(),
            KeyAction::Toggle => app.toggle_selected(),
            KeyAction::ShowTree => app.open_tree(),
            KeyAction::Help => app.open_help(),
            KeyAction::CloseOverlay | KeyAction::None => {}
        }
    }

    Ok(())
}
