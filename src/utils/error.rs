// Error handling utilities
// Author: Gabriel Demetrios Lafis

use thiserror::Error;

use crate::chat::ClientError;
use crate::data::DataError;

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Data error: {0}")]
    Data(#[from] DataError),
    #[error("Backend error: {0}")]
    Client(#[from] ClientError),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for AppError
pub type AppResult<T> = Result<T, AppError>;
