//! Error types for the library.

use thiserror::Error;

/// Errors that can occur while parsing responses or serializing commands.
#[derive(Debug, Error)]
pub enum Error {
    /// Protocol parsing error.
    #[error("Protocol error at position {position}: {message}")]
    Parse {
        /// Byte position where the error occurred.
        position: usize,
        /// Description of what went wrong.
        message: String,
    },

    /// Write attempted on a sink that has been closed.
    #[error("Command sink is closed")]
    SinkClosed,
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
