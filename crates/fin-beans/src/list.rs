//! `ImmutableList<T>` — a cheaply clonable, read-only sequence.
//!
//! Sequence-valued bean properties hold an `ImmutableList` so that copying a
//! bean into a builder shares the elements instead of duplicating them, and
//! so that the sequence gets the canonical `[a, b, c]` rendering and a
//! [`StableHash`].

use crate::hash::StableHash;
use fin_core::utilities::data_formatters::format_list;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// A read-only list backed by `Arc<[T]>`.
#[derive(Clone, PartialEq, Eq)]
pub struct ImmutableList<T>(Arc<[T]>);

impl<T> ImmutableList<T> {
    /// Create a list taking ownership of `items`.
    pub fn new(items: Vec<T>) -> Self {
        Self(Arc::from(items))
    }

    /// The empty list.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Borrow the elements.
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    /// Return `true` if both lists share the same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Default for ImmutableList<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Deref for ImmutableList<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<T> From<Vec<T>> for ImmutableList<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T> FromIterator<T> for ImmutableList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a ImmutableList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for ImmutableList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for ImmutableList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_list(&self.0))
    }
}

impl<T: StableHash> StableHash for ImmutableList<T> {
    fn stable_hash(&self) -> u64 {
        self.0.stable_hash()
    }
}
