//! IMAP command builder.
//!
//! Commands are serialized by writing through a [`CommandSink`], so the same
//! encoder drives both a real transport and the in-memory [`CaptureSink`].

mod serialize;
mod sink;
mod tag_generator;

use crate::types::Mailbox;
use crate::Result;

pub use sink::{CaptureSink, CommandSink};
pub use tag_generator::TagGenerator;

use serialize::{write_astring, write_mailbox};

/// IMAP command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// CAPABILITY command.
    Capability,
    /// NOOP command.
    Noop,
    /// LOGOUT command.
    Logout,
    /// LOGIN command.
    Login {
        /// Username.
        username: String,
        /// Password.
        password: String,
    },
    /// SELECT command.
    Select {
        /// Mailbox to select.
        mailbox: Mailbox,
    },
    /// EXAMINE command (read-only SELECT).
    Examine {
        /// Mailbox to examine.
        mailbox: Mailbox,
    },
    /// CLOSE command.
    Close,
    /// UNSELECT command.
    Unselect,
}

impl Command {
    /// Serializes the command with the given tag into a sink.
    ///
    /// No trailing CRLF is written; command-line framing belongs to the
    /// transport.
    ///
    /// # Errors
    ///
    /// Propagates sink write failures, e.g. writing into a closed sink.
    pub fn write_to<S: CommandSink + ?Sized>(&self, tag: &str, sink: &mut S) -> Result<()> {
        sink.write_all(tag.as_bytes())?;
        sink.write_byte(b' ')?;

        match self {
            Self::Capability => sink.write_all(b"CAPABILITY"),
            Self::Noop => sink.write_all(b"NOOP"),
            Self::Logout => sink.write_all(b"LOGOUT"),

            Self::Login { username, password } => {
                sink.write_all(b"LOGIN ")?;
                write_astring(sink, username)?;
                sink.write_byte(b' ')?;
                write_astring(sink, password)
            }

            Self::Select { mailbox } => {
                sink.write_all(b"SELECT ")?;
                write_mailbox(sink, mailbox)
            }

            Self::Examine { mailbox } => {
                sink.write_all(b"EXAMINE ")?;
                write_mailbox(sink, mailbox)
            }

            Self::Close => sink.write_all(b"CLOSE"),
            Self::Unselect => sink.write_all(b"UNSELECT"),
        }
    }

    /// Serializes the command to a string using a fresh [`CaptureSink`].
    ///
    /// # Errors
    ///
    /// Never fails in practice; a fresh capture sink accepts all writes.
    pub fn to_line(&self, tag: &str) -> Result<String> {
        let mut sink = CaptureSink::new();
        self.write_to(tag, &mut sink)?;
        sink.close()?;
        Ok(sink.into_string())
    }
}
