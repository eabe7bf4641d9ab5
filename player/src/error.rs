//! Error types for the receiver pipeline.

use std::io;

/// Result type alias for the pipeline.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for pipeline operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error on the transport.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// Failed to create the decoder for a session.
    #[error("decoder init failed: {0}")]
    DecoderInit(String),

    /// Failed to open or start the audio sink.
    #[error("sink init failed: {0}")]
    SinkInit(io::Error),

    /// The audio sink failed mid-stream.
    #[error("sink write failed: {0}")]
    Sink(io::Error),

    /// Invalid configuration.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
