//! Sans-I/O IMAP response parsing.
//!
//! This module covers the response side of a SELECT/EXAMINE exchange: a
//! [`lexer`] for the wire grammar, [`ResponseLine`] for classified server
//! lines with a rewindable read cursor, and [`SelectExtensions`] for
//! extracting extension response codes from a response batch.

mod line;
mod select;

pub mod lexer;

pub use line::{LineKind, ResponseLine};
pub use select::SelectExtensions;
