//! Terminal User Interface Module
//!
//! Uploads files to the configured bucket and browses earlier uploads.
//! Built with Ratatui for high-performance terminal rendering.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │               S3 Gallery  bucket images (eu-west-1)             │
//! ├─ Upload ────────────────────────────────────────────────────────┤
//! │ ┌─────────────────────────────────────────────────────────────┐ │
//! │ │ ~/Pictures/cat.png                                          │ │
//! │ └─────────────────────────────────────────────────────────────┘ │
//! │ ✓ Idle → ● Uploading → ○ Complete                               │
//! │ ██████████████████░░░░░░░░░░░░ 60%                              │
//! ├─ Gallery ───────────────────────────────────────────────────────┤
//! │ ▶ cat.png        │ cat.png                                      │
//! │   dog.png        │ Caption: a cat on a sofa #pets #cozy         │
//! ├─────────────────────────────────────────────────────────────────┤
//! │ Ready │ [Enter] Upload [Tab] Focus [Ctrl+Q] Quit [F1] Help      │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod app;
pub mod event;
pub mod theme;
pub mod ui;
pub mod widgets;

pub use app::{App, AppEvent, Focus, View};
pub use event::{AppAction, EventHandler};

use crate::config::Config;
use crate::storage::ObjectStore;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Type alias for our terminal backend
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> anyhow::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state
pub fn restore_terminal(terminal: &mut Tui) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the TUI application
pub async fn run(config: Config, store: Arc<dyn ObjectStore>) -> anyhow::Result<()> {
    info!("Starting TUI mode");

    let mut terminal = init_terminal()?;

    let mut app = App::new(config, store);
    app.start_gallery_load();

    let mut events = EventHandler::new(Duration::from_millis(100));

    let result = run_app(&mut terminal, &mut app, &mut events).await;

    if let Err(e) = restore_terminal(&mut terminal) {
        error!("Failed to restore terminal: {}", e);
    }

    result
}

/// Main application loop
async fn run_app(terminal: &mut Tui, app: &mut App, events: &mut EventHandler) -> anyhow::Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        // Apply upload and gallery results from background tasks
        app.poll_events();

        while let Some(action) = events.try_next() {
            match action {
                AppAction::Quit => {
                    if app.confirm_quit() {
                        app.should_quit = true;
                    }
                }
                AppAction::ForceQuit => app.should_quit = true,
                _ => app.handle_action(action),
            }
        }

        if app.should_quit {
            break;
        }

        // Frame pacing
        tokio::time::sleep(FRAME_INTERVAL).await;
    }

    info!("TUI exited normally");
    Ok(())
}
