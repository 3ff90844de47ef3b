//! Application State
//!
//! Contains the main application state and logic for the TUI.

use crate::config::Config;
use crate::gallery::{GalleryLoader, GalleryState};
use crate::models::UploadStatus;
use crate::storage::ObjectStore;
use crate::tui::event::AppAction;
use crate::workflow::{UploadController, UploadId};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tui_textarea::TextArea;

const PICKER_PLACEHOLDER: &str = "Type a file path and press Enter to upload...";

/// Current view/screen
#[derive(Debug, Clone, PartialEq, Default)]
pub enum View {
    #[default]
    Main,
    Help,
}

/// Panel receiving keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Focus {
    #[default]
    Picker,
    Gallery,
}

/// Events from background tasks other than uploads
#[derive(Debug)]
pub enum AppEvent {
    GalleryLoaded(GalleryState),
}

/// Main application state
pub struct App {
    // Configuration
    pub config: Config,

    // UI State
    pub view: View,
    pub focus: Focus,
    pub should_quit: bool,

    // Upload State
    pub picker: TextArea<'static>,
    pub uploads: UploadController,
    picker_upload: Option<UploadId>,

    // Gallery State
    pub gallery: GalleryState,

    // Async communication
    event_rx: mpsc::Receiver<AppEvent>,
    event_tx: mpsc::Sender<AppEvent>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config, store: Arc<dyn ObjectStore>) -> Self {
        let uploads = UploadController::from_config(store, &config);
        let (event_tx, event_rx) = mpsc::channel(100);

        Self {
            config,
            view: View::Main,
            focus: Focus::Picker,
            should_quit: false,
            picker: Self::empty_picker(),
            uploads,
            picker_upload: None,
            gallery: GalleryState::Loading,
            event_rx,
            event_tx,
        }
    }

    fn empty_picker() -> TextArea<'static> {
        let mut picker = TextArea::default();
        picker.set_cursor_line_style(ratatui::style::Style::default());
        picker.set_placeholder_text(PICKER_PLACEHOLDER);
        picker
    }

    /// Fetch the gallery once in the background.
    pub fn start_gallery_load(&mut self) {
        let url = match self.config.metadata_url() {
            Ok(url) => url.to_string(),
            Err(e) => {
                warn!("Gallery disabled: {}", e);
                self.gallery = GalleryState::Failed(e.to_string());
                return;
            }
        };

        self.gallery = GalleryState::Loading;
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let state = GalleryLoader::new(url).load_state().await;
            tx.send(AppEvent::GalleryLoaded(state)).await.ok();
        });
    }

    /// Check if we should confirm quit
    pub fn confirm_quit(&self) -> bool {
        if self.uploads.in_flight() > 0 {
            warn!(
                in_flight = self.uploads.in_flight(),
                "Quitting with uploads still in flight"
            );
        }
        true
    }

    /// Poll for async events
    pub fn poll_events(&mut self) {
        for (id, status) in self.uploads.poll_events() {
            if status == UploadStatus::Idle && self.picker_upload == Some(id) {
                // Clear the selection so the same file can be picked again
                self.picker = Self::empty_picker();
                self.picker_upload = None;
            }
        }

        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::GalleryLoaded(state) => {
                self.gallery = state;
            }
        }
    }

    /// Handle a user action
    pub fn handle_action(&mut self, action: AppAction) {
        match action {
            AppAction::Quit | AppAction::ForceQuit => {
                self.should_quit = true;
            }
            AppAction::Submit => {
                if self.view == View::Main && self.focus == Focus::Picker {
                    self.submit_selection();
                }
            }
            AppAction::ToggleHelp => {
                self.view = if self.view == View::Help {
                    View::Main
                } else {
                    View::Help
                };
            }
            AppAction::Escape => {
                self.view = View::Main;
            }
            AppAction::ScrollUp => {
                if let GalleryState::Ready(gallery) = &mut self.gallery {
                    gallery.select_prev();
                }
            }
            AppAction::ScrollDown => {
                if let GalleryState::Ready(gallery) = &mut self.gallery {
                    gallery.select_next();
                }
            }
            AppAction::NextField | AppAction::PrevField => {
                self.focus = match self.focus {
                    Focus::Picker => Focus::Gallery,
                    Focus::Gallery => Focus::Picker,
                };
            }
            AppAction::Input(key_event) => {
                if self.view == View::Main && self.focus == Focus::Picker {
                    self.picker.input(key_event);
                }
            }
            AppAction::Tick => {}
        }
    }

    /// Paths currently typed into the picker, blank lines skipped.
    pub fn selected_files(&self) -> Vec<PathBuf> {
        self.picker
            .lines()
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .map(PathBuf::from)
            .collect()
    }

    fn submit_selection(&mut self) {
        if let Some(id) = self.uploads.select_files(self.selected_files()) {
            info!(upload = %id, "Upload submitted from picker");
            self.picker_upload = Some(id);
        }
    }

    /// Status shown in the upload panel.
    pub fn upload_status(&self) -> UploadStatus {
        self.uploads
            .latest()
            .map(|e| e.status.clone())
            .unwrap_or_default()
    }
}
