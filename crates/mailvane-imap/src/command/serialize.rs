//! Command serialization helpers.

use crate::types::Mailbox;
use crate::Result;

use super::sink::CommandSink;

/// Writes an astring (atom, quoted string, or literal).
///
/// # Errors
///
/// Propagates sink write failures.
pub fn write_astring<S: CommandSink + ?Sized>(sink: &mut S, s: &str) -> Result<()> {
    if s.bytes().any(needs_literal) {
        return write_literal(sink, s.as_bytes());
    }

    if s.is_empty() || s.bytes().any(needs_quoting) {
        sink.write_byte(b'"')?;
        for b in s.bytes() {
            if b == b'"' || b == b'\\' {
                sink.write_byte(b'\\')?;
            }
            sink.write_byte(b)?;
        }
        sink.write_byte(b'"')
    } else {
        sink.write_all(s.as_bytes())
    }
}

/// Writes a mailbox name.
///
/// # Errors
///
/// Propagates sink write failures.
pub fn write_mailbox<S: CommandSink + ?Sized>(sink: &mut S, mailbox: &Mailbox) -> Result<()> {
    write_astring(sink, mailbox.as_str())
}

/// Writes a literal: size prefix, CRLF, then the raw bytes.
///
/// Uses the non-synchronizing form `{n+}` when the sink supports it; a
/// synchronizing sink would have to pause after the prefix for the server's
/// continuation prompt, which is the transport's job, not ours.
///
/// # Errors
///
/// Propagates sink write failures.
pub fn write_literal<S: CommandSink + ?Sized>(sink: &mut S, data: &[u8]) -> Result<()> {
    if sink.supports_nonsync_literals() {
        sink.write_all(format!("{{{}+}}\r\n", data.len()).as_bytes())?;
    } else {
        sink.write_all(format!("{{{}}}\r\n", data.len()).as_bytes())?;
    }
    sink.write_all(data)
}

/// Returns true if the byte forces the quoted form.
const fn needs_quoting(b: u8) -> bool {
    matches!(b, b' ' | b'"' | b'\\' | b'(' | b')' | b'{' | b'%' | b'*') || b < 0x20 || b == 0x7F
}

/// Returns true if the byte cannot appear in a quoted string at all and
/// forces the literal form.
const fn needs_literal(b: u8) -> bool {
    matches!(b, b'\r' | b'\n') || b >= 0x80
}
