use std::collections::VecDeque;

/// Singly-ordered FIFO container that owns its elements.
///
/// Searches walk front to back and always settle on the earliest match, so
/// callers can rely on insertion order to break ties.
#[derive(Debug, Clone)]
pub struct Queue<T> {
    items: VecDeque<T>,
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self { items: VecDeque::new() }
    }
}

impl<T> Queue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append `element` at the back.
    pub fn put(&mut self, element: T) {
        self.items.push_back(element);
    }

    /// Remove and return the front element.
    pub fn get(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    /// Visit every element front to back without removing anything.
    pub fn apply<F: FnMut(&T)>(&self, mut f: F) {
        for item in &self.items {
            f(item);
        }
    }

    pub fn apply_mut<F: FnMut(&mut T)>(&mut self, mut f: F) {
        for item in self.items.iter_mut() {
            f(item);
        }
    }

    /// First element (front to back) for which `pred` holds.
    pub fn find<P: FnMut(&T) -> bool>(&self, mut pred: P) -> Option<&T> {
        self.items.iter().find(|item| pred(item))
    }

    pub fn find_mut<P: FnMut(&T) -> bool>(&mut self, mut pred: P) -> Option<&mut T> {
        self.items.iter_mut().find(|item| pred(item))
    }

    /// Remove and return the earliest element matching `pred`; the remaining
    /// elements keep their relative order.
    pub fn remove<P: FnMut(&T) -> bool>(&mut self, mut pred: P) -> Option<T> {
        let pos = self.items.iter().position(|item| pred(item))?;
        self.items.remove(pos)
    }

    /// Move every element of `other` onto the back of `self`, in order.
    pub fn concat(&mut self, mut other: Queue<T>) {
        self.items.append(&mut other.items);
    }

    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for Queue<T> {
    type Item = T;
    type IntoIter = std::collections::vec_deque::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Queue<T> {
    type Item = &'a T;
    type IntoIter = std::collections::vec_deque::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self { items: iter.into_iter().collect() }
    }
}
