//! Mutex-guarded variants of [`Queue`] and [`HashTable`].
//!
//! Each call takes the lock, delegates to the wrapped container and releases
//! the lock, so a single call is atomic but a sequence of calls is not.
//! Compound steps that must not interleave with other threads go through
//! [`LockedQueue::upsert`] and [`LockedHashTable::find_or_insert_with`],
//! which hold the lock for the whole step.

use parking_lot::Mutex;

use crate::hash::HashTable;
use crate::queue::Queue;

#[derive(Debug, Default)]
pub struct LockedQueue<T> {
    inner: Mutex<Queue<T>>,
}

impl<T> LockedQueue<T> {
    pub fn new() -> Self {
        Self { inner: Mutex::new(Queue::new()) }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn put(&self, element: T) {
        self.inner.lock().put(element);
    }

    pub fn get(&self) -> Option<T> {
        self.inner.lock().get()
    }

    pub fn apply<F: FnMut(&T)>(&self, f: F) {
        self.inner.lock().apply(f);
    }

    /// Copy of the earliest element matching `pred`.
    pub fn find<P: FnMut(&T) -> bool>(&self, pred: P) -> Option<T>
    where
        T: Clone,
    {
        self.inner.lock().find(pred).cloned()
    }

    pub fn remove<P: FnMut(&T) -> bool>(&self, pred: P) -> Option<T> {
        self.inner.lock().remove(pred)
    }

    pub fn concat(&self, other: Queue<T>) {
        self.inner.lock().concat(other);
    }

    /// Update the earliest element matching `pred`, or append the element
    /// built by `insert` when nothing matches. Returns `true` on append.
    pub fn upsert<P, U, I>(&self, pred: P, update: U, insert: I) -> bool
    where
        P: FnMut(&T) -> bool,
        U: FnOnce(&mut T),
        I: FnOnce() -> T,
    {
        let mut queue = self.inner.lock();
        match queue.find_mut(pred) {
            Some(existing) => {
                update(existing);
                false
            }
            None => {
                queue.put(insert());
                true
            }
        }
    }

    pub fn into_inner(self) -> Queue<T> {
        self.inner.into_inner()
    }
}

#[derive(Debug)]
pub struct LockedHashTable<T> {
    inner: Mutex<HashTable<T>>,
}

impl<T> LockedHashTable<T> {
    pub fn new(bucket_count: usize) -> Self {
        Self { inner: Mutex::new(HashTable::new(bucket_count)) }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn put(&self, element: T, key: &[u8]) {
        self.inner.lock().put(element, key);
    }

    pub fn apply<F: FnMut(&T)>(&self, f: F) {
        self.inner.lock().apply(f);
    }

    pub fn find<P: FnMut(&T) -> bool>(&self, key: &[u8], pred: P) -> Option<T>
    where
        T: Clone,
    {
        self.inner.lock().find(key, pred).cloned()
    }

    pub fn remove<P: FnMut(&T) -> bool>(&self, key: &[u8], pred: P) -> Option<T> {
        self.inner.lock().remove(key, pred)
    }

    /// Return the earliest element under `key` matching `pred`, creating and
    /// inserting it with `make` first if none exists. The lookup and the
    /// insert happen under one lock hold, so concurrent callers racing on the
    /// same key end up sharing a single element.
    pub fn find_or_insert_with<P, M>(&self, key: &[u8], pred: P, make: M) -> T
    where
        T: Clone,
        P: FnMut(&T) -> bool,
        M: FnOnce() -> T,
    {
        let mut table = self.inner.lock();
        if let Some(found) = table.find(key, pred) {
            return found.clone();
        }
        let created = make();
        table.put(created.clone(), key);
        created
    }

    pub fn into_inner(self) -> HashTable<T> {
        self.inner.into_inner()
    }
}
