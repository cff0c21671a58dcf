//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Failed to serialize schema: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid output file name: {name}")]
    InvalidFileName { name: String },
}

pub type Result<T> = std::result::Result<T, CoreError>;
