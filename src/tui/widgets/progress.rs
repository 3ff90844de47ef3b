//! Progress Widget
//!
//! Displays the upload status stages and a percentage gauge.

use crate::models::UploadStatus;
use crate::tui::theme::{Icons, Theme};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Gauge, Paragraph},
    Frame,
};

/// Render the upload progress for `status` inside `area` (no border).
///
/// `took` is how long the upload ran once it has settled.
pub fn render_progress(
    frame: &mut Frame,
    area: Rect,
    status: &UploadStatus,
    took: Option<chrono::Duration>,
    in_flight: usize,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Stage line
            Constraint::Length(1), // Gauge
            Constraint::Min(1),    // Message
        ])
        .split(area);

    frame.render_widget(Paragraph::new(Line::from(build_progress_line(status))), chunks[0]);

    let gauge = Gauge::default()
        .gauge_style(Theme::gauge())
        .percent(gauge_percent(status) as u16)
        .label(format!("{}%", gauge_percent(status)));
    frame.render_widget(gauge, chunks[1]);

    let mut lines = vec![status_message(status, took)];
    if in_flight > 1 {
        lines.push(Line::from(Span::styled(
            format!("{} {} uploads in flight", Icons::DOT, in_flight),
            Theme::text_dim(),
        )));
    }
    frame.render_widget(Paragraph::new(lines), chunks[2]);
}

fn gauge_percent(status: &UploadStatus) -> u8 {
    match status {
        UploadStatus::Idle | UploadStatus::Failed(_) => 0,
        UploadStatus::Uploading { percent } => (*percent).min(100),
        UploadStatus::Complete => 100,
    }
}

fn format_took(took: Option<chrono::Duration>) -> String {
    match took {
        Some(d) => format!(" ({:.1}s)", d.num_milliseconds().max(0) as f64 / 1000.0),
        None => String::new(),
    }
}

fn status_message(status: &UploadStatus, took: Option<chrono::Duration>) -> Line<'static> {
    match status {
        UploadStatus::Idle => Line::from(Span::styled("Waiting for a file...", Theme::text_dim())),
        UploadStatus::Uploading { .. } => Line::from(Span::styled("Uploading...", Theme::active())),
        UploadStatus::Complete => Line::from(vec![
            Span::styled("File uploaded!", Theme::success()),
            Span::styled(format_took(took), Theme::text_dim()),
        ]),
        UploadStatus::Failed(reason) => Line::from(vec![
            Span::styled(format!("{} Upload failed: ", Icons::ERROR), Theme::error()),
            Span::styled(reason.clone(), Theme::text_secondary()),
            Span::styled(format_took(took), Theme::text_dim()),
        ]),
    }
}

/// Build the progress line with stage indicators
fn build_progress_line(status: &UploadStatus) -> Vec<Span<'static>> {
    let stages = [
        ("Idle", StageState::from_idle(status)),
        ("Uploading", StageState::from_uploading(status)),
        ("Complete", StageState::from_complete(status)),
    ];

    let mut spans = Vec::new();

    for (i, (name, state)) in stages.iter().enumerate() {
        let (icon, style) = match state {
            StageState::Complete => (Icons::COMPLETE, Theme::complete()),
            StageState::Active => (Icons::ACTIVE, Theme::active()),
            StageState::Pending => (Icons::PENDING, Theme::pending()),
            StageState::Error => (Icons::ERROR, Theme::error()),
        };

        spans.push(Span::styled(format!("{} ", icon), style));
        spans.push(Span::styled(name.to_string(), style));

        if i < stages.len() - 1 {
            spans.push(Span::styled(format!(" {} ", Icons::ARROW), Theme::text_dim()));
        }
    }

    spans
}

/// State of an upload stage
#[derive(Debug, Clone, Copy, PartialEq)]
enum StageState {
    Pending,
    Active,
    Complete,
    Error,
}

impl StageState {
    fn from_idle(status: &UploadStatus) -> Self {
        match status {
            UploadStatus::Idle => StageState::Active,
            _ => StageState::Complete,
        }
    }

    fn from_uploading(status: &UploadStatus) -> Self {
        match status {
            UploadStatus::Idle => StageState::Pending,
            UploadStatus::Uploading { .. } => StageState::Active,
            UploadStatus::Complete => StageState::Complete,
            UploadStatus::Failed(_) => StageState::Error,
        }
    }

    fn from_complete(status: &UploadStatus) -> Self {
        match status {
            UploadStatus::Complete => StageState::Complete,
            UploadStatus::Failed(_) => StageState::Error,
            _ => StageState::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_upload_marks_error_stages() {
        let status = UploadStatus::Failed("denied".to_string());
        assert_eq!(StageState::from_uploading(&status), StageState::Error);
        assert_eq!(StageState::from_complete(&status), StageState::Error);
        assert_eq!(gauge_percent(&status), 0);
    }

    #[test]
    fn test_complete_fills_gauge() {
        assert_eq!(gauge_percent(&UploadStatus::Complete), 100);
        assert_eq!(gauge_percent(&UploadStatus::Uploading { percent: 42 }), 42);
        assert_eq!(StageState::from_idle(&UploadStatus::Idle), StageState::Active);
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_settled_message_shows_upload_time() {
        let took = Some(chrono::Duration::milliseconds(1500));
        assert_eq!(
            line_text(&status_message(&UploadStatus::Complete, took)),
            "File uploaded! (1.5s)"
        );
        assert!(line_text(&status_message(&UploadStatus::Failed("denied".into()), took))
            .ends_with("denied (1.5s)"));
        assert_eq!(
            line_text(&status_message(&UploadStatus::Complete, None)),
            "File uploaded!"
        );
    }
}
