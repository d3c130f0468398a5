//! Immutable-update record store
//!
//! A [`Collection`] is a shared snapshot. Every mutation builds a new
//! snapshot; views holding the old one keep seeing the old records.

use std::sync::Arc;

/// Snapshot of a record list
#[derive(Debug)]
pub struct Collection<T> {
    items: Arc<Vec<T>>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> From<Vec<T>> for Collection<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T> Collection<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items: Arc::new(items) }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn find<P>(&self, predicate: P) -> Option<&T>
    where
        P: Fn(&T) -> bool,
    {
        self.items.iter().find(|item| predicate(item))
    }

    pub fn contains<P>(&self, predicate: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        self.items.iter().any(predicate)
    }

    /// True when both handles point at the same snapshot
    pub fn shares_snapshot(&self, other: &Collection<T>) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }
}

impl<T: Clone> Collection<T> {
    /// New snapshot with `item` appended
    pub fn with_pushed(&self, item: T) -> Self {
        let mut items = Vec::with_capacity(self.items.len() + 1);
        items.extend(self.items.iter().cloned());
        items.push(item);
        Self::new(items)
    }

    /// New snapshot with `extra` appended in order
    pub fn with_extended<I>(&self, extra: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut items: Vec<T> = self.items.iter().cloned().collect();
        items.extend(extra);
        Self::new(items)
    }

    /// New snapshot with the first matching record replaced by `update(record)`.
    /// `None` when no record matches.
    pub fn with_updated<P, F>(&self, predicate: P, update: F) -> Option<Self>
    where
        P: Fn(&T) -> bool,
        F: FnOnce(&T) -> T,
    {
        let index = self.items.iter().position(predicate)?;
        let mut items: Vec<T> = self.items.iter().cloned().collect();
        items[index] = update(&self.items[index]);
        Some(Self::new(items))
    }

    /// New snapshot without the matching records. `None` when nothing matched.
    pub fn without<P>(&self, predicate: P) -> Option<Self>
    where
        P: Fn(&T) -> bool,
    {
        if !self.items.iter().any(&predicate) {
            return None;
        }
        Some(Self::new(
            self.items.iter().filter(|item| !predicate(item)).cloned().collect(),
        ))
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
