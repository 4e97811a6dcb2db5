//! IMAP command tag generator.
//!
//! Tags are used to match commands with their responses.

use std::sync::atomic::{AtomicU64, Ordering};

/// Tag generator for IMAP commands.
///
/// Generates unique sequential tags in the format "A1", "A2", etc.
#[derive(Debug)]
pub struct TagGenerator {
    counter: AtomicU64,
    prefix: char,
}

impl TagGenerator {
    /// Creates a new tag generator with the given prefix.
    #[must_use]
    pub const fn new(prefix: char) -> Self {
        Self {
            counter: AtomicU64::new(0),
            prefix,
        }
    }

    /// Generates the next tag.
    #[must_use]
    pub fn next(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}{}", self.prefix, n)
    }

    /// Returns the number of tags generated so far.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }
}

impl Default for TagGenerator {
    fn default() -> Self {
        Self::new('A')
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::redundant_clone, clippy::manual_string_new, clippy::used_underscore_items, clippy::similar_names)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_tags() {
        let tags = TagGenerator::default();

        assert_eq!(tags.next(), "A1");
        assert_eq!(tags.next(), "A2");
        assert_eq!(tags.next(), "A3");
        assert_eq!(tags.count(), 3);
    }

    #[test]
    fn test_custom_prefix() {
        let tags = TagGenerator::new('T');

        assert_eq!(tags.next(), "T1");
    }
}
