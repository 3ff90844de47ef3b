// S3 Gallery - upload images to object storage and browse captioned uploads

pub mod caption;
pub mod config;
pub mod gallery;
pub mod models;
pub mod storage;
pub mod tui;
pub mod types;
pub mod utils;
pub mod workflow;

// Re-exports for convenience
pub use config::Config;
pub use types::{AppError, AppResult};
