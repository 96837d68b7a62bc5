//! Bucket containers used by [`ChainedHashMap`](crate::ChainedHashMap)
//!
//! A bucket holds every entry whose key hashes to the same table slot. The
//! [`Bucket`] trait covers appending, scanning for a key, removing a key and
//! draining every entry when the table grows. The map itself never calls
//! [`Bucket::remove`].

use std::{
    borrow::Borrow,
    collections::{LinkedList, linked_list},
    slice, vec,
};

/// A key-value pair stored in a bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<K, V> {
    /// The key in the key-value pair
    pub key: K,
    /// The value associated with the key
    pub value: V,
}

impl<K, V> Entry<K, V> {
    /// Creates a new entry
    pub const fn new(key: K, value: V) -> Self {
        Self { key, value }
    }
}

/// Collection of entries sharing one table slot
pub trait Bucket<K, V> {
    /// Borrowing iterator over the entries
    type Iter<'a>: Iterator<Item = &'a Entry<K, V>>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    /// Mutably borrowing iterator over the entries
    type IterMut<'a>: Iterator<Item = &'a mut Entry<K, V>>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    /// Consuming iterator over the entries
    type IntoEntries: Iterator<Item = Entry<K, V>>;

    /// Creates an empty bucket
    fn new() -> Self;

    /// Number of entries held by the bucket
    fn len(&self) -> usize;

    /// Appends an entry without checking for an existing key
    fn push(&mut self, entry: Entry<K, V>);

    /// Takes out the first entry with the given key, keeping the order of
    /// the rest
    fn remove<Q>(&mut self, key: &Q) -> Option<Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized;

    /// Iterates the entries in insertion order
    fn iter(&self) -> Self::Iter<'_>;

    /// Iterates the entries mutably in insertion order
    fn iter_mut(&mut self) -> Self::IterMut<'_>;

    /// Moves every entry out of the bucket
    fn into_entries(self) -> Self::IntoEntries;

    /// Returns true if the bucket holds no entries
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Linear scan for the entry with the given key
    fn find<Q>(&self, key: &Q) -> Option<&Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.iter().find(|entry| entry.key.borrow() == key)
    }

    /// Linear scan for the entry with the given key, mutably
    fn find_mut<Q>(&mut self, key: &Q) -> Option<&mut Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.iter_mut().find(|entry| entry.key.borrow() == key)
    }
}

/// Bucket backed by a doubly linked list. This is the map's default.
#[derive(Debug, Clone)]
pub struct ListBucket<K, V> {
    /// The chained entries
    entries: LinkedList<Entry<K, V>>,
}

impl<K, V> Bucket<K, V> for ListBucket<K, V> {
    type Iter<'a>
        = linked_list::Iter<'a, Entry<K, V>>
    where
        Self: 'a,
        K: 'a,
        V: 'a;
    type IterMut<'a>
        = linked_list::IterMut<'a, Entry<K, V>>
    where
        Self: 'a,
        K: 'a,
        V: 'a;
    type IntoEntries = linked_list::IntoIter<Entry<K, V>>;

    fn new() -> Self {
        Self { entries: LinkedList::new() }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn push(&mut self, entry: Entry<K, V>) {
        self.entries.push_back(entry);
    }

    fn remove<Q>(&mut self, key: &Q) -> Option<Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let position = self.entries.iter().position(|entry| entry.key.borrow() == key)?;
        let mut tail = self.entries.split_off(position);
        let removed = tail.pop_front();
        self.entries.append(&mut tail);
        removed
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.entries.iter()
    }

    fn iter_mut(&mut self) -> Self::IterMut<'_> {
        self.entries.iter_mut()
    }

    fn into_entries(self) -> Self::IntoEntries {
        self.entries.into_iter()
    }
}

/// Bucket backed by a contiguous vector
#[derive(Debug, Clone)]
pub struct VecBucket<K, V> {
    /// The chained entries
    entries: Vec<Entry<K, V>>,
}

impl<K, V> Bucket<K, V> for VecBucket<K, V> {
    type Iter<'a>
        = slice::Iter<'a, Entry<K, V>>
    where
        Self: 'a,
        K: 'a,
        V: 'a;
    type IterMut<'a>
        = slice::IterMut<'a, Entry<K, V>>
    where
        Self: 'a,
        K: 'a,
        V: 'a;
    type IntoEntries = vec::IntoIter<Entry<K, V>>;

    fn new() -> Self {
        // Chains stay short under any sane load factor
        Self { entries: Vec::with_capacity(2) }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn push(&mut self, entry: Entry<K, V>) {
        self.entries.push(entry);
    }

    fn remove<Q>(&mut self, key: &Q) -> Option<Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let position = self.entries.iter().position(|entry| entry.key.borrow() == key)?;
        Some(self.entries.remove(position))
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.entries.iter()
    }

    fn iter_mut(&mut self) -> Self::IterMut<'_> {
        self.entries.iter_mut()
    }

    fn into_entries(self) -> Self::IntoEntries {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise<B: Bucket<String, i32>>() {
        let mut bucket = B::new();
        assert!(bucket.is_empty());

        bucket.push(Entry::new("a".to_string(), 1));
        bucket.push(Entry::new("b".to_string(), 2));
        assert_eq!(bucket.len(), 2);
        assert!(!bucket.is_empty());

        assert_eq!(bucket.find("a").map(|e| e.value), Some(1));
        assert!(bucket.find("c").is_none());

        if let Some(entry) = bucket.find_mut("b") {
            entry.value = 20;
        }
        assert_eq!(bucket.find("b").map(|e| e.value), Some(20));

        let keys: Vec<&str> = bucket.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, ["a", "b"]);

        bucket.push(Entry::new("c".to_string(), 3));
        bucket.push(Entry::new("d".to_string(), 4));
        assert_eq!(bucket.remove("b"), Some(Entry::new("b".to_string(), 20)));
        assert_eq!(bucket.remove("b"), None);
        assert_eq!(bucket.remove("zzz"), None);
        assert_eq!(bucket.len(), 3);
        assert!(bucket.find("b").is_none());

        // Removing the ends works too, and the middle keeps its order
        assert_eq!(bucket.remove("d").map(|e| e.value), Some(4));
        let keys: Vec<&str> = bucket.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, ["a", "c"]);

        let drained: Vec<(String, i32)> =
            bucket.into_entries().map(|e| (e.key, e.value)).collect();
        assert_eq!(drained, [("a".to_string(), 1), ("c".to_string(), 3)]);
    }

    fn remove_only_entry<B: Bucket<u8, u8>>() {
        let mut bucket = B::new();
        bucket.push(Entry::new(7, 70));
        assert_eq!(bucket.remove(&7).map(|e| e.value), Some(70));
        assert!(bucket.is_empty());
        assert_eq!(bucket.remove(&7), None);
    }

    #[test]
    fn test_list_bucket() {
        exercise::<ListBucket<String, i32>>();
    }

    #[test]
    fn test_vec_bucket() {
        exercise::<VecBucket<String, i32>>();
    }

    #[test]
    fn test_remove_only_entry() {
        remove_only_entry::<ListBucket<u8, u8>>();
        remove_only_entry::<VecBucket<u8, u8>>();
    }
}
