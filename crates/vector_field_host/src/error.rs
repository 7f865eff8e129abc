//! Error types for the host boundary.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Field(#[from] vector_field::error::Error),

    /// The host sent an envelope that could not be understood.
    #[error("protocol error: {0}")]
    Protocol(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("preset error: {0}")]
    Preset(String),

    #[error("host disconnected")]
    HostDisconnected,
}
