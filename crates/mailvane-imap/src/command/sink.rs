//! Byte sinks for serialized commands.

use crate::{Error, Result};

/// Minimal byte-sink contract the command encoder writes through.
///
/// Implementations are either a real transport or an in-memory capture
/// ([`CaptureSink`]); the encoder queries [`supports_nonsync_literals`]
/// before writing to decide which literal form to use.
///
/// [`supports_nonsync_literals`]: Self::supports_nonsync_literals
pub trait CommandSink {
    /// Writes a single byte.
    ///
    /// # Errors
    ///
    /// Fails if the sink has been closed.
    fn write_byte(&mut self, byte: u8) -> Result<()>;

    /// Writes a byte slice.
    ///
    /// # Errors
    ///
    /// Fails if the sink has been closed.
    fn write_all(&mut self, data: &[u8]) -> Result<()> {
        for &byte in data {
            self.write_byte(byte)?;
        }
        Ok(())
    }

    /// Returns true if the sink accepts non-synchronizing literals (`{n+}`),
    /// i.e. the encoder may send literal bytes without waiting for a server
    /// continuation prompt.
    fn supports_nonsync_literals(&self) -> bool;

    /// Closes the sink. Further writes must fail.
    ///
    /// # Errors
    ///
    /// Transport implementations may fail on shutdown; [`CaptureSink`] never
    /// does.
    fn close(&mut self) -> Result<()>;
}

/// In-memory sink that captures a serialized command as a string.
///
/// Lets the encoder believe it is writing to a live connection so a complete
/// command line can be obtained without opening one. Each written byte is
/// widened to a `char` as-is; command text is expected to be ASCII-safe IMAP
/// syntax, so no charset-aware decoding happens here.
///
/// State machine: `Open → (write)* → Closed`. No transition leaves `Closed`.
/// The accumulated string stays readable after close.
#[derive(Debug, Default)]
pub struct CaptureSink {
    buffer: String,
    closed: bool,
}

impl CaptureSink {
    /// Creates a new, open capture sink with an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true once [`CommandSink::close`] has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Returns the accumulated command text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Consumes the sink, returning the accumulated command text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.buffer
    }

    /// Returns the number of characters captured so far, which equals the
    /// number of bytes written: every written byte widens to exactly one
    /// `char`, though bytes at or above 0x80 occupy two bytes in the backing
    /// string.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.chars().count()
    }

    /// Returns true if nothing has been written yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl CommandSink for CaptureSink {
    fn write_byte(&mut self, byte: u8) -> Result<()> {
        if self.closed {
            return Err(Error::SinkClosed);
        }
        self.buffer.push(char::from(byte));
        Ok(())
    }

    fn supports_nonsync_literals(&self) -> bool {
        // No real synchronization handshake ever happens here, so the
        // non-synchronizing form is always safe
        true
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}

impl std::fmt::Display for CaptureSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.buffer)
    }
}
