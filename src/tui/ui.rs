//! UI Rendering
//!
//! Main UI layout and rendering logic for the TUI.

use crate::models::UploadStatus;
use crate::tui::app::{App, Focus, View};
use crate::tui::theme::Theme;
use crate::tui::widgets;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render the main UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Length(10), // Upload panel
            Constraint::Min(8),     // Gallery
            Constraint::Length(1),  // Status bar
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);
    render_upload_panel(frame, chunks[1], app);
    widgets::render_gallery(
        frame,
        chunks[2],
        &app.gallery,
        app.config.gallery.cdn_url.as_deref(),
        app.focus == Focus::Gallery,
    );
    render_status_bar(frame, chunks[3], app);

    if app.view == View::Help {
        render_help(frame);
    }
}

/// Render the header with the target bucket
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled("S3 Gallery", Theme::title()),
        Span::styled("  bucket ", Theme::text_secondary()),
        Span::styled(app.uploads.bucket().to_string(), Theme::text()),
    ];
    let region = match &app.config.storage {
        Some(storage) => format!(" ({})", storage.region),
        None => " (no storage configured)".to_string(),
    };
    spans.push(Span::styled(region, Theme::text_dim()));
    let title_text = vec![Line::from(spans)];

    let title = Paragraph::new(title_text)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border())
                .style(Style::default()),
        );

    frame.render_widget(title, area);
}

/// Render the file picker and upload progress
fn render_upload_panel(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == Focus::Picker && app.view == View::Main;

    let block = Block::default()
        .title(" Upload ")
        .borders(Borders::ALL)
        .border_style(if is_focused {
            Theme::border_focused()
        } else {
            Theme::border()
        });

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Picker
            Constraint::Min(3),    // Progress
        ])
        .split(inner);

    let picker_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border());
    let picker_area = picker_block.inner(chunks[0]);
    frame.render_widget(picker_block, chunks[0]);
    frame.render_widget(&app.picker, picker_area);

    widgets::render_progress(
        frame,
        chunks[1],
        &app.upload_status(),
        app.uploads.latest().and_then(|e| e.duration()),
        app.uploads.in_flight(),
    );
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let status = match app.upload_status() {
        UploadStatus::Idle => Span::styled("Ready", Theme::text_secondary()),
        UploadStatus::Uploading { percent } => {
            Span::styled(format!("Uploading {}%", percent), Theme::active())
        }
        UploadStatus::Complete => Span::styled("Complete", Theme::complete()),
        UploadStatus::Failed(e) => Span::styled(format!("Error: {}", e), Theme::error()),
    };

    let shortcuts = vec![
        Span::styled(" [Enter]", Theme::shortcut_key()),
        Span::styled(" Upload ", Theme::shortcut_desc()),
        Span::styled("[Tab]", Theme::shortcut_key()),
        Span::styled(" Focus ", Theme::shortcut_desc()),
        Span::styled("[Ctrl+Q]", Theme::shortcut_key()),
        Span::styled(" Quit ", Theme::shortcut_desc()),
        Span::styled("[F1]", Theme::shortcut_key()),
        Span::styled(" Help", Theme::shortcut_desc()),
    ];

    let line = Line::from(
        std::iter::once(status)
            .chain(std::iter::once(Span::raw(" │ ")))
            .chain(shortcuts)
            .collect::<Vec<_>>(),
    );

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the help modal
fn render_help(frame: &mut Frame) {
    let area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, area);

    let shortcut = |key: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(key, Theme::shortcut_key()),
            Span::styled(desc, Theme::text()),
        ])
    };

    let help_lines = vec![
        Line::from(Span::styled("Keyboard Shortcuts", Theme::heading())),
        Line::from(""),
        shortcut("Enter        ", "Upload the typed file"),
        shortcut("Tab          ", "Switch between upload and gallery"),
        shortcut("↑/↓          ", "Select gallery image"),
        shortcut("Ctrl+Q       ", "Quit application"),
        shortcut("Ctrl+C       ", "Force quit"),
        shortcut("Esc          ", "Close this help"),
        shortcut("F1 / Ctrl+H  ", "Show this help"),
        Line::from(""),
        Line::from(Span::styled(
            "The picker clears itself a few seconds after an upload settles.",
            Theme::text_dim(),
        )),
    ];

    let paragraph = Paragraph::new(help_lines).block(
        Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Theme::border_focused()),
    );

    frame.render_widget(paragraph, area);
}

/// Helper to create a centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::storage::MemoryStore;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::collections::HashMap;
    use std::sync::Arc;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[tokio::test]
    async fn test_render_idle_screen() {
        let env: HashMap<&str, &str> = [
            ("S3_BUCKET_NAME", "images"),
            ("S3_BUCKET_REGION", "us-east-1"),
            ("S3_ACCESS_KEY_ID", "key"),
            ("S3_SECRET_ACCESS_KEY", "secret"),
        ]
        .into_iter()
        .collect();
        let config = Config::from_lookup(|k| env.get(k).map(|v| v.to_string())).unwrap();
        let app = App::new(config, Arc::new(MemoryStore::new()));

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("S3 Gallery"));
        assert!(text.contains("Waiting for a file"));
        assert!(text.contains("Loading images"));
    }

    #[tokio::test]
    async fn test_header_without_storage() {
        let config = Config::from_lookup(|_| None).unwrap();
        let app = App::new(config, Arc::new(MemoryStore::new()));

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("bucket local"));
        assert!(text.contains("no storage configured"));
    }

    #[test]
    fn test_centered_rect_is_inside() {
        let outer = Rect::new(0, 0, 100, 50);
        let inner = centered_rect(60, 60, outer);
        assert!(inner.x > 0 && inner.right() < outer.right());
        assert!(inner.y > 0 && inner.bottom() < outer.bottom());
    }
}
