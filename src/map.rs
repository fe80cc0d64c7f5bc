//! ChainedHashMap: hashing policy, bucket indexing, and size bookkeeping.

use crate::buckets::BucketArray;
use crate::chain::{self, Chain};
use crate::reentrancy::ReentryCheck;
use core::fmt;

/// Construction was attempted with a zero bucket count. A map must always
/// own at least one bucket so `hash % capacity` is defined.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ZeroCapacity;

impl fmt::Display for ZeroCapacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("hash map capacity must be at least 1")
    }
}

impl std::error::Error for ZeroCapacity {}

/// A separate-chaining hash map from `String` keys to `V`, with a fixed
/// bucket count and a caller-supplied hash function.
///
/// Every keyed operation routes through `hash(key) % capacity` and then
/// delegates to the chain at that slot. The bucket count only changes via
/// [`resize_table`](Self::resize_table), which rehashes every entry; there
/// is no automatic load-factor policy.
pub struct ChainedHashMap<V, H = fn(&str) -> u64> {
    buckets: BucketArray<V>,
    capacity: usize,
    size: usize,
    hash_fn: H,
    reentrancy: ReentryCheck,
}

impl<V, H> ChainedHashMap<V, H>
where
    H: Fn(&str) -> u64,
{
    /// Create a map with `capacity` empty buckets and the given hash
    /// function. Rejects `capacity == 0`.
    pub fn new(capacity: usize, hash_fn: H) -> Result<Self, ZeroCapacity> {
        if capacity == 0 {
            return Err(ZeroCapacity);
        }
        Ok(Self {
            buckets: BucketArray::new(capacity),
            capacity,
            size: 0,
            hash_fn,
            reentrancy: ReentryCheck::new(),
        })
    }

    /// Number of distinct keys currently stored.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Current bucket count. Always at least 1.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // The modulo is taken in u64, so any hash output lands on a valid slot.
    fn bucket_index(&self, key: &str) -> usize {
        ((self.hash_fn)(key) % self.capacity as u64) as usize
    }

    /// Look up `key`, returning a reference to its value. Absent keys are a
    /// normal `None`, not an error.
    pub fn get(&self, key: &str) -> Option<&V> {
        let _g = self.reentrancy.enter();
        let idx = self.bucket_index(key);
        self.buckets.chain(idx).get(key)
    }

    /// Look up `key` with call-scoped mutable access to its value.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let _g = self.reentrancy.enter();
        let idx = self.bucket_index(key);
        self.buckets.chain_mut(idx).get_mut(key)
    }

    /// Insert or update. A new key is prepended to its chain and counted; an
    /// existing key has its value overwritten in place, with no size change
    /// and no chain restructuring.
    pub fn put(&mut self, key: &str, value: V) {
        let _g = self.reentrancy.enter();
        let idx = self.bucket_index(key);
        let chain = self.buckets.chain_mut(idx);
        match chain.get_mut(key) {
            Some(slot) => *slot = value,
            None => {
                chain.push_front(key.to_owned(), value);
                self.size += 1;
            }
        }
    }

    /// Remove `key`, returning its value. Absent keys are a no-op `None`.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let _g = self.reentrancy.enter();
        let idx = self.bucket_index(key);
        let removed = self.buckets.chain_mut(idx).remove(key);
        if removed.is_some() {
            self.size -= 1;
        }
        removed
    }

    /// Membership test via the same index + find path as [`get`](Self::get).
    pub fn contains_key(&self, key: &str) -> bool {
        let _g = self.reentrancy.enter();
        let idx = self.bucket_index(key);
        self.buckets.chain(idx).contains(key)
    }

    /// Drop every entry, replacing the bucket array with a fresh one of the
    /// same capacity. The bucket count is never altered by `clear`.
    pub fn clear(&mut self) {
        let _g = self.reentrancy.enter();
        self.buckets = BucketArray::new(self.capacity);
        self.size = 0;
        debug_assert_eq!(self.capacity, self.buckets.len());
    }

    /// Number of buckets whose chain is empty. A load-distribution
    /// diagnostic, not a correctness input.
    pub fn empty_buckets(&self) -> usize {
        self.buckets.iter().filter(|c| c.is_empty()).count()
    }

    /// The load factor λ = size / capacity. 0.0 for an empty map; capacity
    /// is at least 1 by construction, so the division is always defined.
    pub fn table_load(&self) -> f64 {
        self.size as f64 / self.capacity as f64
    }

    /// Change the bucket count to `new_capacity`, rehashing every entry
    /// against the new count. `new_capacity == 0` is silently ignored.
    /// Chain order within a slot is not preserved across a resize; resizing
    /// to the current capacity is a full rehash with identical placement.
    pub fn resize_table(&mut self, new_capacity: usize) {
        if new_capacity == 0 {
            return;
        }
        let _g = self.reentrancy.enter();
        let old = std::mem::replace(&mut self.buckets, BucketArray::new(new_capacity));
        self.capacity = new_capacity;
        // Entries were unique in the old table, so prepending cannot create
        // duplicates; size is recounted from actual reinsertions.
        let mut reinserted = 0;
        for chain in old {
            for (key, value) in chain {
                let idx = ((self.hash_fn)(&key) % new_capacity as u64) as usize;
                self.buckets.chain_mut(idx).push_front(key, value);
                reinserted += 1;
            }
        }
        self.size = reinserted;
        debug_assert_eq!(self.capacity, self.buckets.len());
    }

    /// Iterate over `(key, value)` pairs, bucket by bucket. Order is
    /// unspecified and not stable across resizes.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            buckets: self.buckets.iter(),
            chain: None,
        }
    }

    /// Iterate over every key, one per entry, in unspecified order.
    pub fn keys(&self) -> Keys<'_, V> {
        Keys { inner: self.iter() }
    }
}

/// Iterator over a map's `(key, value)` pairs.
pub struct Iter<'a, V> {
    buckets: std::slice::Iter<'a, Chain<V>>,
    chain: Option<chain::Iter<'a, V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(it) = &mut self.chain {
                if let Some(entry) = it.next() {
                    return Some(entry);
                }
            }
            self.chain = Some(self.buckets.next()?.iter());
        }
    }
}

/// Iterator over a map's keys.
pub struct Keys<'a, V> {
    inner: Iter<'a, V>,
}

impl<'a, V> Iterator for Keys<'a, V> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }
}

impl<V, H> fmt::Debug for ChainedHashMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainedHashMap")
            .field("capacity", &self.capacity)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

/// Diagnostic dump: one line per bucket, `index: chain`. Not a stable
/// serialization format.
impl<V, H> fmt::Display for ChainedHashMap<V, H>
where
    V: fmt::Display,
    H: Fn(&str) -> u64,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, chain) in self.buckets.iter().enumerate() {
            writeln!(f, "{i}: {chain}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashers::additive_hash;
    use std::cell::Cell;

    /// Invariant: zero construction capacity is rejected; any positive
    /// capacity yields an empty map of that capacity.
    #[test]
    fn constructor_rejects_zero_capacity() {
        assert_eq!(
            ChainedHashMap::<i32, _>::new(0, additive_hash).unwrap_err(),
            ZeroCapacity
        );
        let m = ChainedHashMap::<i32, _>::new(1, additive_hash).unwrap();
        assert_eq!(m.capacity(), 1);
        assert!(m.is_empty());
    }

    /// Invariant: the slot is in range for any hash output, including
    /// u64::MAX.
    #[test]
    fn bucket_index_always_in_range() {
        let m = ChainedHashMap::<i32, _>::new(7, |_: &str| u64::MAX).unwrap();
        assert_eq!(m.bucket_index("anything"), (u64::MAX % 7) as usize);

        let m = ChainedHashMap::<i32, _>::new(3, |_: &str| 0).unwrap();
        assert_eq!(m.bucket_index("anything"), 0);
    }

    /// Invariant: every keyed operation computes the index with the
    /// injected function; a counting closure observes one call per op.
    #[test]
    fn injected_hash_fn_is_used_per_operation() {
        let calls = Cell::new(0u32);
        let mut m = ChainedHashMap::<i32, _>::new(4, |key: &str| {
            calls.set(calls.get() + 1);
            additive_hash(key)
        })
        .unwrap();

        m.put("a", 1);
        assert_eq!(calls.get(), 1);
        let _ = m.get("a");
        assert_eq!(calls.get(), 2);
        assert!(m.contains_key("a"));
        assert_eq!(calls.get(), 3);
        let _ = m.remove("a");
        assert_eq!(calls.get(), 4);
    }

    /// Invariant: rehashing calls the same injected function once per
    /// surviving entry.
    #[test]
    fn resize_rehashes_each_entry_once() {
        let calls = Cell::new(0u32);
        let mut m = ChainedHashMap::<i32, _>::new(4, |key: &str| {
            calls.set(calls.get() + 1);
            additive_hash(key)
        })
        .unwrap();
        for i in 0..5 {
            m.put(&format!("k{i}"), i);
        }
        let before = calls.get();
        m.resize_table(16);
        assert_eq!(calls.get(), before + 5);
    }

    /// Invariant: the diagnostic dump emits one `index: chain` line per
    /// bucket, empty buckets included.
    #[test]
    fn display_lists_every_bucket() {
        let mut m = ChainedHashMap::<i32, _>::new(3, |_: &str| 1).unwrap();
        m.put("a", 10);
        m.put("b", 20);
        let dump = m.to_string();
        let lines: Vec<_> = dump.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "0: []");
        assert_eq!(lines[1], "1: [b: 20 -> a: 10]");
        assert_eq!(lines[2], "2: []");
    }

    thread_local! {
        static REENTER_TARGET: Cell<*const ChainedHashMap<i32>> =
            const { Cell::new(std::ptr::null()) };
    }

    fn reentering_hash(key: &str) -> u64 {
        if key == "trigger" {
            REENTER_TARGET.with(|t| {
                let p = t.get();
                if !p.is_null() {
                    // Attempt to re-enter the map from inside its own hash
                    // function.
                    unsafe {
                        let _ = (*p).contains_key("probe");
                    }
                }
            });
        }
        0
    }

    /// Invariant (debug-only): the hash function calling back into the map
    /// panics via the reentrancy guard.
    #[cfg(debug_assertions)]
    #[test]
    fn hash_fn_reentry_panics_in_debug() {
        let m: ChainedHashMap<i32> =
            ChainedHashMap::new(2, reentering_hash as fn(&str) -> u64).unwrap();
        REENTER_TARGET.with(|t| t.set(&m as *const _));
        let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _ = m.contains_key("trigger");
        }));
        REENTER_TARGET.with(|t| t.set(std::ptr::null()));
        assert!(res.is_err(), "expected reentrancy to panic in debug builds");
    }
}
