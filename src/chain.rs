//! Chain: a singly linked list of (key, value) entries, one per bucket.
//!
//! Nodes live in a slotmap arena and link to each other through generational
//! keys, so the list is index-linked rather than a `Box` graph: no unsafe,
//! no shared ownership, and removal is an unlink plus an arena remove. The
//! chain knows nothing about hashing; uniqueness of keys is the caller's
//! responsibility (the map checks before prepending).

use core::fmt;
use slotmap::{DefaultKey, SlotMap};

#[derive(Debug)]
struct Node<V> {
    key: String,
    value: V,
    next: Option<DefaultKey>,
}

/// A bucket's collision chain. Prepend-only insertion; entries keep
/// insertion order (newest first) until a removal unlinks one.
#[derive(Debug)]
pub struct Chain<V> {
    nodes: SlotMap<DefaultKey, Node<V>>,
    head: Option<DefaultKey>,
}

impl<V> Chain<V> {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::new(),
            head: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Prepend an entry. The caller must have verified the key is absent;
    /// a duplicate prepend would shadow the older entry.
    pub fn push_front(&mut self, key: String, value: V) {
        let next = self.head;
        let k = self.nodes.insert(Node { key, value, next });
        self.head = Some(k);
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        let mut cursor = self.head;
        while let Some(k) = cursor {
            let node = &self.nodes[k];
            if node.key == key {
                return Some(&node.value);
            }
            cursor = node.next;
        }
        None
    }

    /// Find-by-key with call-scoped mutable access to the value. This is the
    /// only in-place update path; node identity never leaves the chain.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let mut cursor = self.head;
        while let Some(k) = cursor {
            if self.nodes[k].key == key {
                return self.nodes.get_mut(k).map(|n| &mut n.value);
            }
            cursor = self.nodes[k].next;
        }
        None
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Unlink and return the entry for `key`, or `None` (no-op) if absent.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let mut prev: Option<DefaultKey> = None;
        let mut cursor = self.head;
        while let Some(k) = cursor {
            if self.nodes[k].key == key {
                let next = self.nodes[k].next;
                match prev {
                    Some(p) => self.nodes[p].next = next,
                    None => self.head = next,
                }
                return self.nodes.remove(k).map(|n| n.value);
            }
            prev = cursor;
            cursor = self.nodes[k].next;
        }
        None
    }

    /// Forward traversal, head first, each entry exactly once.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            nodes: &self.nodes,
            cursor: self.head,
        }
    }
}

impl<V> Default for Chain<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Borrowing iterator over a chain's entries.
pub struct Iter<'a, V> {
    nodes: &'a SlotMap<DefaultKey, Node<V>>,
    cursor: Option<DefaultKey>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let k = self.cursor?;
        let node = self.nodes.get(k)?;
        self.cursor = node.next;
        Some((node.key.as_str(), &node.value))
    }
}

/// Consuming iterator; the rehash path uses this to move entries out
/// without cloning keys or values.
pub struct IntoIter<V> {
    nodes: SlotMap<DefaultKey, Node<V>>,
    cursor: Option<DefaultKey>,
}

impl<V> Iterator for IntoIter<V> {
    type Item = (String, V);

    fn next(&mut self) -> Option<Self::Item> {
        let k = self.cursor?;
        let node = self.nodes.remove(k)?;
        self.cursor = node.next;
        Some((node.key, node.value))
    }
}

impl<V> IntoIterator for Chain<V> {
    type Item = (String, V);
    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            nodes: self.nodes,
            cursor: self.head,
        }
    }
}

impl<'a, V> IntoIterator for &'a Chain<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V: fmt::Display> fmt::Display for Chain<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{k}: {v}")?;
        }
        write!(f, "]")
    }
}
