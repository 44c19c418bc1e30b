use thiserror::Error;

use crate::facelet::{Color, Position};

#[derive(Debug, Error)]
pub enum Error {
    #[error("Color {color} appears {count} times, expected 9")]
    ColorCount { color: Color, count: usize },
    #[error("Center piece {position} should be {expected}, got {found}")]
    CenterMismatch {
        position: Position,
        expected: Color,
        found: String,
    },
    #[error("Invalid move: {0}")]
    InvalidMove(String),
    #[error("Invalid facelet position: {0}")]
    InvalidPosition(String),
    #[error("Invalid color: {0}")]
    InvalidColor(String),
    #[error("Invalid timeout: {0}")]
    InvalidTimeout(String),
    #[error("Invalid facelet string, expected 54 color initials")]
    InvalidFaceletString,
    #[error("Invalid configuration data: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
