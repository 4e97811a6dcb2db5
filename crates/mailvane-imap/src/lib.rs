//! # mailvane-imap
//!
//! Sans-I/O building blocks for the IMAP mailbox-selection exchange
//! (RFC 9051 SELECT/EXAMINE, RFC 8474 OBJECTID):
//!
//! - **Extension response scanning**: [`SelectExtensions`] walks an already
//!   tokenized response batch and extracts the standardized bracketed codes
//!   (`MAILBOXID`, `CLOSED`) ahead of a generic response parser, consuming
//!   the lines it recognizes and leaving everything else byte-identical.
//! - **Offline command serialization**: the command encoder writes through
//!   the [`CommandSink`] trait, so a [`CaptureSink`] can collect a complete
//!   command line as a string without opening a connection.
//!
//! ## Quick Start
//!
//! ```
//! use mailvane_imap::{Command, Mailbox, ResponseLine, SelectExtensions};
//!
//! fn main() -> mailvane_imap::Result<()> {
//!     // Serialize a SELECT without a network connection
//!     let line = Command::Select { mailbox: Mailbox::inbox() }.to_line("A1")?;
//!     assert_eq!(line, "A1 SELECT INBOX");
//!
//!     // Scan the server's responses for extension codes
//!     let mut batch = vec![
//!         Some(ResponseLine::parse(&b"* OK [MAILBOXID (26)] Ok\r\n"[..])?),
//!         Some(ResponseLine::parse(&b"A1 OK [READ-WRITE] SELECT completed\r\n"[..])?),
//!     ];
//!     let ext = SelectExtensions::scan(&mut batch)?;
//!     assert_eq!(ext.mailbox_id.unwrap().as_str(), "26");
//!     assert!(batch[0].is_none()); // consumed
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`command`]: command types, the sink contract, and the capture sink
//! - [`parser`]: lexer, classified response lines, and the extension scanner
//! - [`types`]: core IMAP types (mailbox names, tags, status conditions)
//!
//! The network transport, the base mailbox-info extraction (EXISTS, FLAGS,
//! UIDVALIDITY, ...), and untagged-response dispatch live outside this crate.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod command;
mod error;
pub mod parser;
pub mod types;

pub use command::{CaptureSink, Command, CommandSink, TagGenerator};
pub use error::{Error, Result};
pub use parser::{LineKind, ResponseLine, SelectExtensions};
pub use types::{Mailbox, MailboxId, Status, Tag};

/// IMAP protocol version this crate targets.
pub const IMAP_VERSION: &str = "IMAP4rev2";
