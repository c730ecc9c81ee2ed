//! Commit metadata attached to findings.

use chrono::{DateTime, Utc};

const SHORT_HASH_LENGTH: usize = 7;

/// Metadata for a single commit.
///
/// The engine stamps the newer commit of each scanned pair onto every
/// finding produced from that pair's diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Full hex hash.
    pub hash: String,
    /// Author signature (`Name <email>`).
    pub author: String,
    /// Author timestamp in UTC.
    pub date: DateTime<Utc>,
    /// First line of the commit message.
    pub message: String,
}

impl Commit {
    /// Returns the abbreviated hash (first 7 characters).
    #[must_use]
    pub fn short_hash(&self) -> &str {
        self.hash.get(..SHORT_HASH_LENGTH).unwrap_or(&self.hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::make_commit;

    #[test]
    fn short_hash_truncates_to_seven_characters() {
        let commit = make_commit("a1b2c3d4e5f60718293a4b5c6d7e8f9012345678");
        assert_eq!(commit.short_hash(), "a1b2c3d");
    }

    #[test]
    fn short_hash_of_short_string_returns_whole_hash() {
        let commit = make_commit("abc");
        assert_eq!(commit.short_hash(), "abc");
    }
}
