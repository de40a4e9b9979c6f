//! The transition table is the partial mapping every automaton kind is built on.
//! For a DFA the key is `(state, symbol)` and the value a single state, for the non-deterministic
//! kinds the value is a set of states.

use std::collections::{btree_map, BTreeMap, BTreeSet};

/// A partial mapping from keys to values with a deterministic iteration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTable<K: Ord, V> {
    map: BTreeMap<K, V>,
}

impl<K: Ord, V> Default for TransitionTable<K, V> {
    fn default() -> Self {
        Self {
            map: BTreeMap::new(),
        }
    }
}

impl<K: Ord, V> TransitionTable<K, V> {
    /// Create an empty transition table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the mapping. Returns `None` where the mapping is undefined.
    #[inline]
    pub fn apply(&self, key: &K) -> Option<&V> {
        self.map.get(key)
    }

    /// Set the value for the given key and return the previous one, if any.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.map.insert(key, value)
    }

    /// Iterate over all defined entries in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, K, V> {
        self.map.iter()
    }

    /// Get the keys of all defined entries.
    pub fn keys(&self) -> btree_map::Keys<'_, K, V> {
        self.map.keys()
    }

    /// The number of defined entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if no entry is defined.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<K: Ord, T: Ord> TransitionTable<K, BTreeSet<T>> {
    /// Add the given targets to the set stored under `key`.
    pub fn add_targets<I>(&mut self, key: K, targets: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.map.entry(key).or_default().extend(targets);
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for TransitionTable<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            map: iter.into_iter().collect(),
        }
    }
}

impl<K: Ord, V> From<BTreeMap<K, V>> for TransitionTable<K, V> {
    fn from(map: BTreeMap<K, V>) -> Self {
        Self { map }
    }
}

impl<'a, K: Ord, V> IntoIterator for &'a TransitionTable<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = btree_map::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.iter()
    }
}

impl<K: Ord, V> IntoIterator for TransitionTable<K, V> {
    type Item = (K, V);
    type IntoIter = btree_map::IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_partial() {
        let table: TransitionTable<(u8, char), u8> = [((0, 'a'), 1), ((1, 'b'), 0)]
            .into_iter()
            .collect();
        assert_eq!(table.apply(&(0, 'a')), Some(&1));
        assert_eq!(table.apply(&(0, 'b')), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_add_targets_unites() {
        let mut table: TransitionTable<(u8, char), BTreeSet<u8>> = TransitionTable::new();
        table.add_targets((0, 'a'), [1]);
        table.add_targets((0, 'a'), [2, 1]);
        table.add_targets((1, 'a'), [0]);
        assert_eq!(table.apply(&(0, 'a')), Some(&BTreeSet::from([1, 2])));
        assert_eq!(table.apply(&(1, 'a')), Some(&BTreeSet::from([0])));
        assert_eq!(table.len(), 2);
    }
}
