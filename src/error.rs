//! Error types for the Vaani TTS pipeline

use thiserror::Error;

/// Result type alias for Vaani operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the Vaani TTS pipeline
#[derive(Debug, Error)]
pub enum Error {
    /// Empty or otherwise unusable input text
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No local engine or no installed voices
    #[error("engine unavailable: {0}")]
    EngineUnavailable(String),

    /// Synthesis produced no usable audio
    #[error("synthesis failed: {0}")]
    SynthesisFailed(String),

    /// Translation request failed (always recovered internally)
    #[error("translation failed: {0}")]
    Translation(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}
