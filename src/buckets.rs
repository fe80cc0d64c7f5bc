//! BucketArray: a fixed-length sequence of chains.
//!
//! Holds exactly `capacity` independently owned chains, indexable by slot.
//! The array never grows in place: clear and resize replace it wholesale
//! with a freshly built one.

use crate::chain::Chain;

#[derive(Debug)]
pub(crate) struct BucketArray<V> {
    chains: Vec<Chain<V>>,
}

impl<V> BucketArray<V> {
    /// Build `capacity` empty chains.
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            chains: (0..capacity).map(|_| Chain::new()).collect(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.chains.len()
    }

    pub(crate) fn chain(&self, index: usize) -> &Chain<V> {
        &self.chains[index]
    }

    pub(crate) fn chain_mut(&mut self, index: usize) -> &mut Chain<V> {
        &mut self.chains[index]
    }

    pub(crate) fn iter(&self) -> std::slice::Iter<'_, Chain<V>> {
        self.chains.iter()
    }
}

impl<V> IntoIterator for BucketArray<V> {
    type Item = Chain<V>;
    type IntoIter = std::vec::IntoIter<Chain<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.chains.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: the array holds exactly `capacity` chains, all empty.
    #[test]
    fn new_builds_capacity_empty_chains() {
        let b: BucketArray<i32> = BucketArray::new(7);
        assert_eq!(b.len(), 7);
        assert!(b.iter().all(|c| c.is_empty()));
    }

    /// Invariant: chains are independently owned; mutating one slot does
    /// not affect any other.
    #[test]
    fn slots_are_independent() {
        let mut b: BucketArray<i32> = BucketArray::new(3);
        b.chain_mut(1).push_front("k".to_string(), 5);
        assert_eq!(b.chain(1).len(), 1);
        assert!(b.chain(0).is_empty());
        assert!(b.chain(2).is_empty());
        assert_eq!(b.chain(1).get("k"), Some(&5));
    }

    /// Invariant: consuming iteration yields every chain once, in slot order.
    #[test]
    fn into_iter_yields_every_chain() {
        let mut b: BucketArray<i32> = BucketArray::new(4);
        b.chain_mut(0).push_front("a".to_string(), 1);
        b.chain_mut(3).push_front("b".to_string(), 2);
        let lens: Vec<_> = b.into_iter().map(|c| c.len()).collect();
        assert_eq!(lens, vec![1, 0, 0, 1]);
    }
}
