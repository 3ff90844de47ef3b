//! TUI Widgets
//!
//! Custom widgets for the upload and gallery panels.

mod gallery;
mod progress;

pub use gallery::{caption_line, render_gallery};
pub use progress::render_progress;
