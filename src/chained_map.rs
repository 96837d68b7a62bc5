use std::{
    borrow::Borrow,
    collections::HashSet,
    fmt,
    hash::{BuildHasher, Hash, RandomState},
    iter,
    marker::PhantomData,
    mem, slice,
};

use crate::{
    bucket::{Bucket, Entry, ListBucket},
    error::MapError,
};

/// Number of buckets a map starts with unless configured otherwise
pub const DEFAULT_INITIAL_CAPACITY: usize = 16;

/// Highest ratio of entries to buckets tolerated after an insertion
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.75;

/// A hash map using separate chaining.
///
/// Every slot of the table holds an optional [`Bucket`]; keys hashing to the
/// same slot share a bucket. Buckets are created lazily on first insertion
/// into a slot. Before a new key is inserted the map checks whether the
/// resulting load factor would exceed the configured maximum and, if so,
/// doubles the table and rehashes every entry.
///
/// The map deliberately does not support removing individual keys: both
/// [`remove`](Self::remove) and [`remove_entry`](Self::remove_entry) return
/// [`MapError::UnsupportedOperation`]. [`clear`](Self::clear) is the only way
/// to drop entries.
///
/// Note: This implementation is not thread-safe.
#[derive(Clone)]
pub struct ChainedHashMap<K, V, S = RandomState, B = ListBucket<K, V>> {
    /// The table of lazily created buckets
    buckets: Vec<Option<B>>,
    /// Number of entries across all buckets
    len: usize,
    /// Table length restored by `clear`
    initial_capacity: usize,
    /// Load factor that must hold after every insertion
    max_load_factor: f64,
    /// Produces the hasher used for bucket selection
    hash_builder: S,
    /// The map owns its keys and values through `B`
    _marker: PhantomData<(K, V)>,
}

impl<K, V> ChainedHashMap<K, V>
where
    K: Eq + Hash,
{
    /// Creates an empty map with 16 buckets and a 0.75 max load factor
    #[must_use]
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }

    /// Creates an empty map with the given number of buckets.
    ///
    /// A capacity of zero is treated as one.
    #[must_use]
    pub fn with_capacity(initial_capacity: usize) -> Self {
        Self::from_parts(initial_capacity.max(1), DEFAULT_MAX_LOAD_FACTOR, RandomState::new())
    }

    /// Creates an empty map with an explicit capacity and max load factor.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidCapacity`] for a zero capacity and
    /// [`MapError::InvalidLoadFactor`] when the load factor is not a
    /// positive finite number.
    pub fn with_config(initial_capacity: usize, max_load_factor: f64) -> crate::Result<Self> {
        Self::with_config_and_hasher(initial_capacity, max_load_factor, RandomState::new())
    }
}

impl<K, V, S, B> ChainedHashMap<K, V, S, B>
where
    K: Eq + Hash,
    S: BuildHasher,
    B: Bucket<K, V>,
{
    /// Creates an empty map with default sizing that hashes with `hash_builder`
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::from_parts(DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_LOAD_FACTOR, hash_builder)
    }

    /// Creates an empty map with explicit sizing and hasher.
    ///
    /// # Errors
    ///
    /// Same validation as [`ChainedHashMap::with_config`].
    pub fn with_config_and_hasher(
        initial_capacity: usize,
        max_load_factor: f64,
        hash_builder: S,
    ) -> crate::Result<Self> {
        if initial_capacity == 0 {
            return Err(MapError::InvalidCapacity(initial_capacity));
        }
        if !max_load_factor.is_finite() || max_load_factor <= 0.0 {
            return Err(MapError::InvalidLoadFactor(max_load_factor));
        }

        Ok(Self::from_parts(initial_capacity, max_load_factor, hash_builder))
    }

    /// Builds an empty map from already validated settings
    fn from_parts(initial_capacity: usize, max_load_factor: f64, hash_builder: S) -> Self {
        Self {
            buckets: empty_table(initial_capacity),
            len: 0,
            initial_capacity,
            max_load_factor,
            hash_builder,
            _marker: PhantomData,
        }
    }

    /// Maps a key to its slot in the table
    #[allow(clippy::cast_possible_truncation, clippy::arithmetic_side_effects)]
    fn bucket_index<Q: Hash + ?Sized>(&self, key: &Q) -> usize {
        let hash = self.hash_builder.hash_one(key);
        // The table is never empty, and its length always fits in a u64
        let capacity = u64::try_from(self.buckets.len()).unwrap_or(u64::MAX).max(1);
        // The remainder is below the table length, so it fits back in a usize
        (hash % capacity) as usize
    }

    /// Returns the bucket a key would live in, if that bucket exists yet
    fn bucket_for<Q>(&self, key: &Q) -> Option<&B>
    where
        Q: Hash + ?Sized,
    {
        self.buckets.get(self.bucket_index(key)).and_then(Option::as_ref)
    }

    /// Inserts a key-value pair, returning the value it replaced.
    ///
    /// Overwriting an existing key leaves the size and the table untouched.
    /// A new key first grows the table if the insertion would push the load
    /// factor past the maximum.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let index = self.bucket_index(&key);
        if let Some(entry) =
            self.buckets.get_mut(index).and_then(Option::as_mut).and_then(|b| b.find_mut(&key))
        {
            return Some(mem::replace(&mut entry.value, value));
        }

        self.grow_for_insert();

        let index = self.bucket_index(&key);
        if let Some(slot) = self.buckets.get_mut(index) {
            slot.get_or_insert_with(B::new).push(Entry::new(key, value));
            self.len = self.len.saturating_add(1);
        }
        None
    }

    /// Doubles the table until one more entry fits under the max load factor
    fn grow_for_insert(&mut self) {
        let required = self.len.saturating_add(1);
        let mut capacity = self.buckets.len();
        while exceeds_load(required, capacity, self.max_load_factor) {
            match capacity.checked_mul(2) {
                Some(doubled) => capacity = doubled,
                None => break,
            }
        }

        if capacity != self.buckets.len() {
            self.resize(capacity);
        }
    }

    /// Rebuilds the table with `new_capacity` buckets, moving every entry
    fn resize(&mut self, new_capacity: usize) {
        let old_capacity = self.buckets.len();
        let old_table = mem::replace(&mut self.buckets, empty_table(new_capacity));

        for entry in old_table.into_iter().flatten().flat_map(B::into_entries) {
            let index = self.bucket_index(&entry.key);
            if let Some(slot) = self.buckets.get_mut(index) {
                slot.get_or_insert_with(B::new).push(entry);
            }
        }

        log::debug!(
            "resized table from {old_capacity} to {new_capacity} buckets ({} entries)",
            self.len
        );
    }

    /// Retrieve a value for a given key
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.bucket_for(key).and_then(|bucket| bucket.find(key)).map(|entry| &entry.value)
    }

    /// Get a mutable reference to a value for a given key
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);
        self.buckets
            .get_mut(index)
            .and_then(Option::as_mut)
            .and_then(|bucket| bucket.find_mut(key))
            .map(|entry| &mut entry.value)
    }

    /// Returns true if the map holds the given key
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.bucket_for(key).and_then(|bucket| bucket.find(key)).is_some()
    }

    /// Removal is not supported by this map.
    ///
    /// # Errors
    ///
    /// Always returns [`MapError::UnsupportedOperation`]; the map is left
    /// unchanged.
    #[allow(clippy::unused_self)]
    pub fn remove<Q>(&mut self, _key: &Q) -> crate::Result<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        Err(MapError::UnsupportedOperation { operation: "remove" })
    }

    /// Removal of a specific key-value pair is not supported by this map.
    ///
    /// # Errors
    ///
    /// Always returns [`MapError::UnsupportedOperation`]; the map is left
    /// unchanged.
    #[allow(clippy::unused_self)]
    pub fn remove_entry<Q>(&mut self, _key: &Q, _value: &V) -> crate::Result<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        Err(MapError::UnsupportedOperation { operation: "remove_entry" })
    }

    /// Collects every key into a set
    #[must_use]
    pub fn key_set(&self) -> HashSet<&K> {
        self.keys().collect()
    }

    /// Drops every entry and restores the initial table size
    pub fn clear(&mut self) {
        self.buckets = empty_table(self.initial_capacity);
        self.len = 0;
        log::trace!("cleared map back to {} buckets", self.initial_capacity);
    }
}

impl<K, V, S, B> ChainedHashMap<K, V, S, B>
where
    B: Bucket<K, V>,
{
    /// Returns the number of entries in the map
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Alias of [`len`](Self::len)
    #[must_use]
    pub fn size(&self) -> usize {
        self.len
    }

    /// Returns true if the map holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of buckets in the table
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the configured maximum load factor
    #[must_use]
    pub fn max_load_factor(&self) -> f64 {
        self.max_load_factor
    }

    /// Returns the current load factor of the map
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    /// Length of the chain in each slot, with zero for slots never used
    #[must_use]
    pub fn chain_lengths(&self) -> Vec<usize> {
        self.buckets.iter().map(|slot| slot.as_ref().map_or(0, B::len)).collect()
    }

    /// Returns an iterator over the key-value pairs, in no particular order
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V, B> {
        Iter { slots: self.buckets.iter(), chain: None, remaining: self.len }
    }

    /// Returns an iterator over the keys, in no particular order
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V, B> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values, in no particular order
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V, B> {
        Values { inner: self.iter() }
    }
}

/// Allocates a table of `capacity` empty slots
fn empty_table<B>(capacity: usize) -> Vec<Option<B>> {
    iter::repeat_with(|| None).take(capacity).collect()
}

/// Returns true if `len` entries over `capacity` buckets exceed `max`
#[allow(clippy::cast_precision_loss)]
fn exceeds_load(len: usize, capacity: usize, max: f64) -> bool {
    len as f64 / capacity as f64 > max
}

impl<K, V, S, B> Default for ChainedHashMap<K, V, S, B>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
    B: Bucket<K, V>,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S, B> fmt::Debug for ChainedHashMap<K, V, S, B>
where
    K: fmt::Debug,
    V: fmt::Debug,
    B: Bucket<K, V>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S, B> Extend<(K, V)> for ChainedHashMap<K, V, S, B>
where
    K: Eq + Hash,
    S: BuildHasher,
    B: Bucket<K, V>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<K, V, S, B> FromIterator<(K, V)> for ChainedHashMap<K, V, S, B>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
    B: Bucket<K, V>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        crate::utils::from_iter(iter)
    }
}

impl<'a, K, V, S, B> IntoIterator for &'a ChainedHashMap<K, V, S, B>
where
    B: Bucket<K, V> + 'a,
    K: 'a,
    V: 'a,
{
    type Item = &'a K;
    type IntoIter = Keys<'a, K, V, B>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys()
    }
}

/// Iterator over the key-value pairs of the map
pub struct Iter<'a, K, V, B>
where
    B: Bucket<K, V> + 'a,
    K: 'a,
    V: 'a,
{
    /// Table slots not yet visited
    slots: slice::Iter<'a, Option<B>>,
    /// Position inside the bucket being walked
    chain: Option<B::Iter<'a>>,
    /// Entries left to yield
    remaining: usize,
}

impl<'a, K, V, B> Iterator for Iter<'a, K, V, B>
where
    B: Bucket<K, V> + 'a,
    K: 'a,
    V: 'a,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain.as_mut().and_then(Iterator::next) {
                self.remaining = self.remaining.saturating_sub(1);
                return Some((&entry.key, &entry.value));
            }
            let slot = self.slots.next()?;
            self.chain = slot.as_ref().map(|bucket| bucket.iter());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V, B> ExactSizeIterator for Iter<'a, K, V, B>
where
    B: Bucket<K, V> + 'a,
    K: 'a,
    V: 'a,
{
}

impl<'a, K, V, B> fmt::Debug for Iter<'a, K, V, B>
where
    B: Bucket<K, V> + 'a,
    K: 'a,
    V: 'a,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter").field("remaining", &self.remaining).finish_non_exhaustive()
    }
}

/// Iterator over the keys of the map
pub struct Keys<'a, K, V, B>
where
    B: Bucket<K, V> + 'a,
    K: 'a,
    V: 'a,
{
    /// Underlying pair iterator
    inner: Iter<'a, K, V, B>,
}

impl<'a, K, V, B> Iterator for Keys<'a, K, V, B>
where
    B: Bucket<K, V> + 'a,
    K: 'a,
    V: 'a,
{
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V, B> fmt::Debug for Keys<'a, K, V, B>
where
    B: Bucket<K, V> + 'a,
    K: 'a,
    V: 'a,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keys").field("inner", &self.inner).finish()
    }
}

/// Iterator over the values of the map
pub struct Values<'a, K, V, B>
where
    B: Bucket<K, V> + 'a,
    K: 'a,
    V: 'a,
{
    /// Underlying pair iterator
    inner: Iter<'a, K, V, B>,
}

impl<'a, K, V, B> Iterator for Values<'a, K, V, B>
where
    B: Bucket<K, V> + 'a,
    K: 'a,
    V: 'a,
{
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V, B> fmt::Debug for Values<'a, K, V, B>
where
    B: Bucket<K, V> + 'a,
    K: 'a,
    V: 'a,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Values").field("inner", &self.inner).finish()
    }
}
