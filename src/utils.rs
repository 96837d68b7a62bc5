//! Utility functions and traits for `ChainedHashMap`

use crate::{ChainedHashMap, bucket::Bucket};
use std::hash::{BuildHasher, Hash};

/// Extension trait with snapshot helpers built on top of the core map API
pub trait MapExtensions<K, V> {
    /// Returns the keys of the map sorted ascending
    fn sorted_keys(&self) -> Vec<K>
    where
        K: Ord + Clone;

    /// Returns clones of the values of the map, in no particular order
    fn cloned_values(&self) -> Vec<V>
    where
        V: Clone;

    /// Puts every pair and returns how many of them replaced an existing value
    fn put_all<I>(&mut self, pairs: I) -> usize
    where
        I: IntoIterator<Item = (K, V)>;
}

impl<K, V, S, B> MapExtensions<K, V> for ChainedHashMap<K, V, S, B>
where
    K: Eq + Hash,
    S: BuildHasher,
    B: Bucket<K, V>,
{
    fn sorted_keys(&self) -> Vec<K>
    where
        K: Ord + Clone,
    {
        let mut keys: Vec<K> = self.keys().cloned().collect();
        keys.sort();
        keys
    }

    fn cloned_values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.values().cloned().collect()
    }

    fn put_all<I>(&mut self, pairs: I) -> usize
    where
        I: IntoIterator<Item = (K, V)>,
    {
        pairs.into_iter().filter_map(|(key, value)| self.put(key, value)).count()
    }
}

/// Creates a `ChainedHashMap` with default sizing from an iterator of key-value pairs
pub fn from_iter<K, V, S, B, I>(iter: I) -> ChainedHashMap<K, V, S, B>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
    B: Bucket<K, V>,
    I: IntoIterator<Item = (K, V)>,
{
    let mut map = ChainedHashMap::with_hasher(S::default());
    map.extend(iter);
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_iter() {
        let data = vec![("a".to_string(), 1), ("b".to_string(), 2), ("c".to_string(), 3)];

        let map: ChainedHashMap<String, i32> = from_iter(data);

        assert_eq!(map.get("a"), Some(&1));
        assert_eq!(map.get("b"), Some(&2));
        assert_eq!(map.get("c"), Some(&3));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_sorted_keys_and_values() {
        let mut map = ChainedHashMap::new();
        map.put("c".to_string(), 3);
        map.put("a".to_string(), 1);
        map.put("b".to_string(), 2);

        let mut values = map.cloned_values();
        values.sort_unstable();

        assert_eq!(map.sorted_keys(), vec!["a".to_string(), "b".to_string(), "c".to_string()]);
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn test_put_all_counts_overwrites() {
        let mut map = ChainedHashMap::new();
        map.put(1, "one");

        let replaced = map.put_all([(1, "uno"), (2, "dos"), (2, "two")]);

        assert_eq!(replaced, 2);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&1), Some(&"uno"));
        assert_eq!(map.get(&2), Some(&"two"));
    }
}
