//! Hash table with separate chaining and automatic growth.
//!
//! Bucket placement uses a polynomial rolling hash reduced modulo the current
//! capacity at every step, so the bucket index of a key is only meaningful for
//! the capacity it was computed with. Nothing is cached across a resize.

use std::borrow::Borrow;

const MIN_CAPACITY: usize = 8;
const DEFAULT_CAPACITY: usize = 1024;
const MAX_LOAD_FACTOR: f64 = 0.75;

/// Keys that know how to place themselves in a table of a given capacity.
pub trait BucketKey {
    fn bucket_index(&self, capacity: usize) -> usize;
}

impl BucketKey for str {
    fn bucket_index(&self, capacity: usize) -> usize {
        let capacity = capacity as u64;
        let mut h: u64 = 0;
        for ch in self.chars() {
            h = (h * 31 + ch as u64) % capacity;
        }
        h as usize
    }
}

impl BucketKey for String {
    fn bucket_index(&self, capacity: usize) -> usize {
        self.as_str().bucket_index(capacity)
    }
}

pub struct ChainedMap<K, V> {
    buckets: Vec<Vec<(K, V)>>,
    size: usize,
}

impl<K: BucketKey + Eq, V> ChainedMap<K, V> {
    pub fn new() -> Self { Self::with_capacity(DEFAULT_CAPACITY) }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(MIN_CAPACITY);
        Self { buckets: empty_buckets(capacity), size: 0 }
    }

    pub fn len(&self) -> usize { self.size }

    pub fn is_empty(&self) -> bool { self.size == 0 }

    pub fn capacity(&self) -> usize { self.buckets.len() }

    /// Insert or overwrite. Grows the table when a new key pushes the load
    /// factor above 0.75.
    pub fn set(&mut self, key: K, value: V) {
        let index = key.bucket_index(self.capacity());
        let bucket = &mut self.buckets[index];
        if let Some(slot) = bucket.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
            return;
        }
        bucket.push((key, value));
        self.size += 1;
        if self.size as f64 / self.capacity() as f64 > MAX_LOAD_FACTOR {
            self.resize();
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: BucketKey + Eq + ?Sized,
    {
        let index = key.bucket_index(self.capacity());
        self.buckets[index]
            .iter()
            .find(|(k, _)| Borrow::<Q>::borrow(k) == key)
            .map(|(_, v)| v)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: BucketKey + Eq + ?Sized,
    {
        let index = key.bucket_index(self.capacity());
        self.buckets[index]
            .iter_mut()
            .find(|(k, _)| Borrow::<Q>::borrow(k) == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: BucketKey + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Entries in bucket order. The order changes after a resize.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.buckets.iter().flatten().map(|(k, v)| (k, v))
    }

    fn resize(&mut self) {
        let new_capacity = self.capacity() * 2;
        tracing::trace!(from = self.capacity(), to = new_capacity, size = self.size, "resizing chained map");
        let old = std::mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        // keys are already unique, so entries go straight into their new chain
        for (key, value) in old.into_iter().flatten() {
            let index = key.bucket_index(new_capacity);
            self.buckets[index].push((key, value));
        }
    }
}

impl<K: BucketKey + Eq, V> Default for ChainedMap<K, V> {
    fn default() -> Self { Self::new() }
}

fn empty_buckets<K, V>(capacity: usize) -> Vec<Vec<(K, V)>> {
    (0..capacity).map(|_| Vec::new()).collect()
}
