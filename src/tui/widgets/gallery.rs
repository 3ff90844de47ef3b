//! Gallery Widget
//!
//! Lists eligible images and shows the selected one's captions.

use crate::caption::{self, Segment};
use crate::gallery::{Gallery, GalleryState};
use crate::tui::theme::{Icons, Theme};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render_gallery(
    frame: &mut Frame,
    area: Rect,
    state: &GalleryState,
    cdn_url: Option<&str>,
    focused: bool,
) {
    let block = Block::default()
        .title(" Gallery ")
        .borders(Borders::ALL)
        .border_style(if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        });

    let inner = block.inner(area);
    frame.render_widget(block, area);

    match state {
        GalleryState::Loading => {
            frame.render_widget(
                Paragraph::new(Span::styled("Loading images...", Theme::text_dim())),
                inner,
            );
        }
        GalleryState::Failed(reason) => {
            let lines = vec![
                Line::from(Span::styled(
                    format!("{} Could not load the gallery", Icons::ERROR),
                    Theme::error(),
                )),
                Line::from(Span::styled(reason.clone(), Theme::text_secondary())),
            ];
            frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
        }
        GalleryState::Ready(gallery) if gallery.is_empty() => {
            frame.render_widget(
                Paragraph::new(Span::styled("No images uploaded yet.", Theme::text_dim())),
                inner,
            );
        }
        GalleryState::Ready(gallery) => {
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
                .split(inner);

            render_list(frame, chunks[0], gallery);
            render_detail(frame, chunks[1], gallery, cdn_url);
        }
    }
}

fn render_list(frame: &mut Frame, area: Rect, gallery: &Gallery) {
    let selected = gallery.selected_index();
    let lines: Vec<Line> = gallery
        .records()
        .iter()
        .enumerate()
        .map(|(i, record)| {
            if Some(i) == selected {
                Line::from(vec![
                    Span::styled(format!("{} ", Icons::SELECTED), Theme::selected()),
                    Span::styled(record.storage_key.clone(), Theme::selected()),
                ])
            } else {
                Line::from(vec![
                    Span::raw("  "),
                    Span::styled(record.storage_key.clone(), Theme::text()),
                ])
            }
        })
        .collect();

    // Keep the selection visible
    let offset = selected
        .map(|i| i.saturating_sub(area.height.saturating_sub(1) as usize))
        .unwrap_or(0) as u16;
    frame.render_widget(Paragraph::new(lines).scroll((offset, 0)), area);
}

fn render_detail(frame: &mut Frame, area: Rect, gallery: &Gallery, cdn_url: Option<&str>) {
    let Some(record) = gallery.selected() else {
        return;
    };

    let mut lines = vec![Line::from(Span::styled(record.storage_key.clone(), Theme::heading()))];
    if let Some(cdn) = cdn_url {
        lines.push(Line::from(Span::styled(record.image_url(cdn), Theme::text_dim())));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Caption", Theme::text_secondary())));
    lines.push(caption_line(&record.generated_caption));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Translation", Theme::text_secondary())));
    lines.push(caption_line(&record.translated_caption));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

/// Caption text with hashtags highlighted.
pub fn caption_line(text: &str) -> Line<'static> {
    let spans: Vec<Span<'static>> = caption::segments(text)
        .into_iter()
        .map(|segment| match segment {
            Segment::Text(t) => Span::styled(t, Theme::text()),
            Segment::Tag(t) => Span::styled(t, Theme::hashtag()),
        })
        .collect();
    Line::from(spans)
}
