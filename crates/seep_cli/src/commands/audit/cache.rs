//! Cross-branch memoization of scanned commit pairs.

use std::collections::HashSet;
use std::sync::{PoisonError, RwLock};

/// Thread-safe set of commit-pair keys that have been claimed for scanning.
///
/// A pair is claimed *before* its diff is fetched, so exactly one worker ever
/// scans it no matter how many branches share it. Lock poisoning is absorbed:
/// the set of strings stays valid even if a holder panicked.
#[derive(Debug, Default)]
pub struct PairCache {
    seen: RwLock<HashSet<String>>,
}

impl PairCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the pair has already been claimed.
    ///
    /// Read-lock fast path; callers still need [`claim`](Self::claim) before
    /// scanning.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.seen
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(key)
    }

    /// Claims the pair, returning `true` only for the first caller.
    #[must_use]
    pub fn claim(&self, key: String) -> bool {
        self.seen
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key)
    }

    /// Number of claimed pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns `true` if nothing has been claimed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn claim_returns_true_only_for_the_first_caller() {
        let cache = PairCache::new();

        assert!(cache.claim("aaabbb".to_string()));
        assert!(!cache.claim("aaabbb".to_string()));
        assert!(cache.claim("bbbccc".to_string()));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn contains_reflects_claimed_keys() {
        let cache = PairCache::new();
        assert!(!cache.contains("aaabbb"));

        cache.claim("aaabbb".to_string());
        assert!(cache.contains("aaabbb"));
        assert!(!cache.contains("bbbccc"));
    }

    #[test]
    fn new_cache_is_empty() {
        let cache = PairCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn concurrent_claims_have_exactly_one_winner() {
        let cache = Arc::new(PairCache::new());
        let mut handles = Vec::new();

        for _ in 0..16 {
            let cache = Arc::clone(&cache);
            handles.push(std::thread::spawn(move || cache.claim("contested".to_string())));
        }

        let winners: usize = handles
            .into_iter()
            .map(|h| usize::from(h.join().unwrap()))
            .sum();

        assert_eq!(winners, 1);
        assert_eq!(cache.len(), 1);
    }
}
