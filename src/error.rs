//! Crate error type

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("level {0} is out of range (expected 1..=3)")]
    InvalidLevel(u8),

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
