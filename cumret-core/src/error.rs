use thiserror::Error;

#[derive(Error, Debug)]
pub enum CumretError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Content is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("Settings decode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Date pattern error: {0}")]
    Pattern(String),
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, CumretError>;
