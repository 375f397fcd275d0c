//! Error types for startup and persistence paths.
//!
//! Gameplay never produces errors: collisions and boundary failures are
//! ordinary outcomes of an update step. These types only cover the edges
//! of the program (files, logging, terminal).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArcadeError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to initialize logging: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, ArcadeError>;
