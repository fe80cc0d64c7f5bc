//! Sample hash functions for injection into [`ChainedHashMap`].
//!
//! These are deliberately simple, distribution-poor functions useful for
//! exercising collision behavior; the map accepts any `Fn(&str) -> u64` and
//! makes no quality assumptions about it.
//!
//! [`ChainedHashMap`]: crate::ChainedHashMap

/// Sum of the key's character code points.
///
/// Anagrams collide ("listen" and "silent" hash identically).
pub fn additive_hash(key: &str) -> u64 {
    key.chars().fold(0u64, |h, c| h.wrapping_add(c as u64))
}

/// Position-weighted sum of the key's character code points: character `i`
/// contributes `(i + 1) * code_point`. Distinguishes anagrams, still weak.
pub fn weighted_hash(key: &str) -> u64 {
    key.chars()
        .enumerate()
        .fold(0u64, |h, (i, c)| h.wrapping_add((i as u64 + 1).wrapping_mul(c as u64)))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: hashing is deterministic and depends only on the key.
    #[test]
    fn hashes_are_deterministic() {
        assert_eq!(additive_hash("key1"), additive_hash("key1"));
        assert_eq!(weighted_hash("key1"), weighted_hash("key1"));
    }

    /// Invariant: the additive hash ignores character order, the weighted
    /// hash does not.
    #[test]
    fn anagram_behavior() {
        assert_eq!(additive_hash("listen"), additive_hash("silent"));
        assert_ne!(weighted_hash("listen"), weighted_hash("silent"));
    }

    /// Invariant: the empty key hashes to zero under both functions.
    #[test]
    fn empty_key_hashes_to_zero() {
        assert_eq!(additive_hash(""), 0);
        assert_eq!(weighted_hash(""), 0);
    }
}
