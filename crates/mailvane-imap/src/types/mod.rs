//! Core IMAP types.
//!
//! Fundamental types shared by the parser and the command encoder, following
//! RFC 9051 (`IMAP4rev2`) and RFC 8474 (OBJECTID).

#![allow(clippy::missing_const_for_fn)]

mod identifiers;
mod mailbox;
mod status;

pub use identifiers::{MailboxId, Tag};
pub use mailbox::Mailbox;
pub use status::Status;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_roundtrip() {
        let tag = Tag::new("A001");
        assert_eq!(tag.as_str(), "A001");
        assert_eq!(tag.to_string(), "A001");
    }

    #[test]
    fn test_mailbox_inbox() {
        assert_eq!(Mailbox::inbox().as_str(), "INBOX");
    }

    #[test]
    fn test_mailbox_id() {
        let id = MailboxId::new("F2212ea87-6097-4256-9d51-71338625");
        assert_eq!(id.as_str(), "F2212ea87-6097-4256-9d51-71338625");
    }

    #[test]
    fn test_status_is_ok() {
        assert!(Status::Ok.is_ok());
        assert!(!Status::No.is_ok());
        assert!(!Status::Bad.is_ok());
        assert!(!Status::PreAuth.is_ok());
        assert!(!Status::Bye.is_ok());
    }
}
