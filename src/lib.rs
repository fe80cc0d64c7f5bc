//! chained-hashmap: a single-threaded, fixed-bucket-count hash map with
//! separate chaining and caller-supplied hash functions.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: build ChainedHashMap in safe, verifiable layers so each piece can
//!   be reasoned about independently.
//! - Layers:
//!   - Chain<V>: a singly linked list of (String, V) entries stored in a
//!     slotmap arena with index-based links; supports prepend, find-by-key,
//!     remove-by-key, and forward iteration. No `Box` graph, no unsafe.
//!   - BucketArray<V>: a fixed-length sequence of exactly `capacity` chains,
//!     indexable by slot; replaced wholesale on clear/resize, never grown in
//!     place.
//!   - ChainedHashMap<V, H>: public API that owns a BucketArray, an injected
//!     hash closure `H: Fn(&str) -> u64`, and an incremental entry count;
//!     exposes put/get/remove/contains_key/clear/resize_table plus the
//!     load-distribution diagnostics table_load and empty_buckets.
//!
//! Constraints
//! - Single-threaded: `!Send`/`!Sync` by design (no atomics, no locking).
//! - Bucket index is always `hash(key) % capacity`, computed in u64 so the
//!   slot is in range for any hash output; the map is agnostic to hash
//!   quality and degrades to long chains under poor distributions.
//! - `capacity >= 1` always: zero construction capacity is rejected with
//!   `ZeroCapacity`, and `resize_table(0)` is a silent no-op.
//! - `size` is maintained incrementally and equals the sum of chain lengths.
//! - Resizing rebuilds the table and rehashes every entry; no automatic
//!   load-factor policy is applied.
//!
//! Why this split?
//! - Localize invariants: the chain knows nothing about hashing, the bucket
//!   array knows nothing about keys, and all hashing policy lives in one
//!   place in the map.
//! - The map only invokes user code through the injected hash closure; a
//!   debug-only reentrancy guard (in `reentrancy`) panics if that closure
//!   re-enters the map while internals are transiently inconsistent.
//!
//! Notes and non-goals
//! - Keys are `String`; values are any `V`. Unique keys: `put` on an
//!   existing key overwrites the value in place.
//! - Returned references are valid only for the borrow that produced them;
//!   no node identity crosses the public boundary.
//! - No automatic resizing, no hash-quality guarantees, no thread safety.
//! - Lower layers (`Chain`, `BucketArray`) are exposed for reuse and tests
//!   but the supported surface is `ChainedHashMap`.

mod buckets;
pub mod chain;
pub mod hashers;
mod map;
mod map_proptest;
mod reentrancy;

// Public surface
pub use chain::Chain;
pub use map::{ChainedHashMap, Iter, Keys, ZeroCapacity};
