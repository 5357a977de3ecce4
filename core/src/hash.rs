use crate::queue::Queue;

/// Bob Jenkins' one-at-a-time hash over the key bytes.
pub fn hash_key(key: &[u8]) -> u32 {
    let mut h: u32 = 0;
    for &b in key {
        h = h.wrapping_add(b as u32);
        h = h.wrapping_add(h << 10);
        h ^= h >> 6;
    }
    h = h.wrapping_add(h << 3);
    h ^= h >> 11;
    h = h.wrapping_add(h << 15);
    h
}

/// Fixed-size table of queue buckets keyed by byte strings.
///
/// The table never resizes and does not enforce key uniqueness: two elements
/// put under the same key live side by side in the same bucket. Lookups take
/// a predicate because the table stores elements, not key/value pairs.
#[derive(Debug, Clone)]
pub struct HashTable<T> {
    buckets: Vec<Queue<T>>,
}

impl<T> HashTable<T> {
    /// A bucket count of zero is treated as one.
    pub fn new(bucket_count: usize) -> Self {
        let bucket_count = bucket_count.max(1);
        Self { buckets: (0..bucket_count).map(|_| Queue::new()).collect() }
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(Queue::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Queue::is_empty)
    }

    fn slot(&self, key: &[u8]) -> usize {
        hash_key(key) as usize % self.buckets.len()
    }

    pub fn put(&mut self, element: T, key: &[u8]) {
        let slot = self.slot(key);
        self.buckets[slot].put(element);
    }

    /// Visit every element, bucket index ascending, then front to back.
    pub fn apply<F: FnMut(&T)>(&self, mut f: F) {
        for bucket in &self.buckets {
            bucket.apply(&mut f);
        }
    }

    pub fn apply_mut<F: FnMut(&mut T)>(&mut self, mut f: F) {
        for bucket in self.buckets.iter_mut() {
            bucket.apply_mut(&mut f);
        }
    }

    /// Search only the bucket `key` hashes to.
    pub fn find<P: FnMut(&T) -> bool>(&self, key: &[u8], pred: P) -> Option<&T> {
        self.buckets[self.slot(key)].find(pred)
    }

    pub fn find_mut<P: FnMut(&T) -> bool>(&mut self, key: &[u8], pred: P) -> Option<&mut T> {
        let slot = self.slot(key);
        self.buckets[slot].find_mut(pred)
    }

    pub fn remove<P: FnMut(&T) -> bool>(&mut self, key: &[u8], pred: P) -> Option<T> {
        let slot = self.slot(key);
        self.buckets[slot].remove(pred)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buckets.iter().flat_map(Queue::iter)
    }

    /// Transform every element, keeping bucket layout and order. Stops at the
    /// first element `f` fails on.
    pub fn try_map<U, E, F: FnMut(T) -> Result<U, E>>(self, mut f: F) -> Result<HashTable<U>, E> {
        let buckets = self
            .buckets
            .into_iter()
            .map(|bucket| bucket.into_iter().map(&mut f).collect::<Result<Queue<U>, E>>())
            .collect::<Result<Vec<_>, E>>()?;
        Ok(HashTable { buckets })
    }
}

impl<T> IntoIterator for HashTable<T> {
    type Item = T;
    type IntoIter = std::iter::Flatten<std::vec::IntoIter<Queue<T>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.into_iter().flatten()
    }
}
