use thiserror::Error;

use crate::app::controllers::print_session::PrintPhase;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid page margin: {0:?}")]
    InvalidMargin(String),

    #[error("Print session busy (currently {0:?})")]
    SessionBusy(PrintPhase),

    #[error("Platform error: {0}")]
    Platform(String),
}

/// Convenience type alias for Results with AppError
pub type Result<T> = std::result::Result<T, AppError>;
