//! Complete binary tree stored level-order in a GrowableArray.
//!
//! Node `i` has children `2i + 1` and `2i + 2` and parent `(i - 1) / 2`.
//! Removal swaps the last node into the hole, so the tree stays complete
//! but any ordering among values is not preserved.

use crate::error::{Error, Result};
use crate::growable_array::GrowableArray;

#[derive(Debug, Clone)]
pub struct BinaryTree<T> {
    nodes: GrowableArray<T>,
}

impl<T> Default for BinaryTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BinaryTree<T> {
    pub fn new() -> Self {
        Self {
            nodes: GrowableArray::default(),
        }
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.nodes.length()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn left(&self, idx: usize) -> Option<usize> {
        let l = idx.checked_mul(2)?.checked_add(1)?;
        (l < self.count()).then_some(l)
    }

    pub fn right(&self, idx: usize) -> Option<usize> {
        let r = idx.checked_mul(2)?.checked_add(2)?;
        (r < self.count()).then_some(r)
    }

    pub fn parent(&self, idx: usize) -> Option<usize> {
        (idx > 0 && idx < self.count()).then(|| (idx - 1) / 2)
    }

    pub fn at(&self, idx: usize) -> Result<&T> {
        self.nodes.get(idx)
    }

    pub fn push(&mut self, value: T) {
        self.nodes.push(value);
    }

    pub fn swap(&mut self, a: usize, b: usize) -> Result<()> {
        self.nodes.swap(a, b)
    }

    /// Remove node `idx`, moving the last node into its place.
    pub fn remove_by_index(&mut self, idx: usize) -> Result<T> {
        let last = self.count().checked_sub(1).ok_or(Error::OutOfRange {
            index: idx,
            len: 0,
        })?;
        self.nodes.swap(idx, last)?;
        self.nodes.pop()
    }

    /// Remove the root.
    pub fn poll(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(Error::Underflow("tree"));
        }
        self.remove_by_index(0)
    }

    /// Remove the first node equal to `value`, or all of them when `all` is
    /// set. Returns whether anything was removed.
    pub fn remove_by_value(&mut self, value: &T, all: bool) -> bool
    where
        T: PartialEq,
    {
        let mut removed = false;
        let mut i = 0;
        while i < self.count() {
            if self.nodes.as_slice()[i] != *value {
                i += 1;
                continue;
            }
            // The swapped-in node lands at `i` and is checked next round.
            if self.remove_by_index(i).is_ok() {
                removed = true;
            }
            if !all {
                break;
            }
        }
        removed
    }

    pub fn as_slice(&self) -> &[T] {
        self.nodes.as_slice()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}
