// Error types shared across the crate

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing configuration: {0} must be set")]
    ConfigurationMissing(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid upload target: {0}")]
    InvalidTarget(String),

    #[error("Transfer failed: {0}")]
    TransferFailure(String),

    #[error("Gallery fetch failed: {0}")]
    FetchFailure(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
