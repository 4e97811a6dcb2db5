//! Extension response codes from a SELECT/EXAMINE exchange.

use crate::parser::line::ResponseLine;
use crate::types::MailboxId;
use crate::Result;

/// Literal for the MAILBOXID response code.
const MAILBOX_ID: &str = "MAILBOXID";

/// Literal for the CLOSED response code.
const CLOSED: &str = "CLOSED";

/// Extension items extracted from the responses to a SELECT or EXAMINE
/// command.
///
/// The scanner walks the batch ahead of the generic response parser and pulls
/// out the standardized bracketed codes it knows; everything else is left
/// untouched, with cursors rewound, for downstream parsing.
#[derive(Debug, Clone, Default)]
pub struct SelectExtensions {
    /// Server-allocated unique identifier of the selected mailbox
    /// (RFC 8474 OBJECTID).
    ///
    /// If a server sends the MAILBOXID code more than once, the last
    /// occurrence wins; the scanner keeps no duplicate-detection state.
    pub mailbox_id: Option<MailboxId>,
    /// Whether the previously selected mailbox was closed implicitly
    /// (RFC 9051 CLOSED code on an untagged OK line).
    pub closed: bool,
    /// Tagged OK completion line(s), retained so a later mapping stage can
    /// still locate the completion status and text. At most one per exchange
    /// in practice, but a list is tolerated. Retained lines also stay in the
    /// caller's batch.
    pub completion: Vec<ResponseLine>,
}

impl SelectExtensions {
    /// Scans a response batch for extension codes, mutating `lines` in place.
    ///
    /// Slots that carried a recognized code are taken (`None` marks them as
    /// already handled for the downstream mapper); all other slots keep their
    /// line with the cursor rewound to the resp-text start. `None` slots,
    /// including ones consumed by earlier passes, are skipped, so rescanning
    /// is a no-op for them.
    ///
    /// # Errors
    ///
    /// Propagates structural tokenizer failures (for example an unterminated
    /// literal) and aborts the whole scan; callers must treat the entire
    /// batch as unparsed. Absent brackets, unknown codes, and malformed lists
    /// are not errors, merely lines without a recognized code.
    pub fn scan(lines: &mut [Option<ResponseLine>]) -> Result<Self> {
        let mut result = Self::default();

        for slot in lines.iter_mut() {
            let Some(line) = slot.as_mut() else {
                continue;
            };

            line.skip_spaces();
            if line.read_byte() != Some(b'[') {
                line.reset();
                continue;
            }

            let Some(key) = line.read_atom()? else {
                // '[' with no key, e.g. malformed code; leave it alone
                line.reset();
                continue;
            };

            let mut consumed = false;
            let mut retain = false;

            match key.to_ascii_uppercase().as_str() {
                // e.g. "* OK [MAILBOXID (26)] Ok" when 26 is the mailbox id
                MAILBOX_ID => {
                    line.skip_spaces();
                    if let Some(values) = line.read_simple_list()? {
                        if let Some(first) = values.first() {
                            tracing::debug!(mailbox_id = %first, "MAILBOXID code");
                            result.mailbox_id = Some(MailboxId::new(first.clone()));
                            consumed = true;
                        }
                    }
                }
                // e.g. "* OK [CLOSED]"
                CLOSED if line.is_untagged() && line.is_ok() => {
                    tracing::debug!("CLOSED code");
                    result.closed = true;
                    consumed = true;
                }
                // Unknown code on the tagged completion: keep it reachable
                // for the response-to-mailbox mapper
                _ if line.is_tagged() && line.is_ok() => {
                    retain = true;
                }
                // Unknown codes elsewhere belong to the base parser
                _ => {}
            }

            line.reset();
            if retain {
                result.completion.push(line.clone());
            }
            if consumed {
                *slot = None;
            }
        }

        Ok(result)
    }
}
