//! Binary heap over a BinaryTree. Max-ordered unless switched to min.

use crate::binary_tree::BinaryTree;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Order {
    Max,
    Min,
}

#[derive(Debug, Clone)]
pub struct BinaryHeap<T> {
    tree: BinaryTree<T>,
    order: Order,
}

impl<T: Ord> Default for BinaryHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> BinaryHeap<T> {
    pub fn new() -> Self {
        Self {
            tree: BinaryTree::new(),
            order: Order::Max,
        }
    }

    pub fn new_min() -> Self {
        Self {
            tree: BinaryTree::new(),
            order: Order::Min,
        }
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.tree.count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn is_max_heap(&self) -> bool {
        self.order == Order::Max
    }

    /// Insert `value` and return the index it settled at.
    pub fn push(&mut self, value: T) -> usize {
        self.tree.push(value);
        self.sift_up(self.count() - 1)
    }

    /// The highest-priority element.
    pub fn peek(&self) -> Option<&T> {
        self.tree.as_slice().first()
    }

    pub fn poll(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(Error::Underflow("heap"));
        }
        self.remove_by_index(0)
    }

    /// Remove the element at `idx`; the node moved into its place is sifted
    /// whichever way restores heap order.
    pub fn remove_by_index(&mut self, idx: usize) -> Result<T> {
        let value = self.tree.remove_by_index(idx)?;
        if idx < self.count() {
            let settled = self.sift_up(idx);
            self.sift_down(settled);
        }
        Ok(value)
    }

    pub fn set_min_heap(&mut self) {
        self.reorder(Order::Min);
    }

    pub fn set_max_heap(&mut self) {
        self.reorder(Order::Max);
    }

    pub fn as_slice(&self) -> &[T] {
        self.tree.as_slice()
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }

    fn reorder(&mut self, order: Order) {
        if self.order == order {
            return;
        }
        self.order = order;
        for idx in (0..self.count() / 2).rev() {
            self.sift_down(idx);
        }
    }

    // True when node `a` belongs above node `b`.
    fn outranks(&self, a: usize, b: usize) -> bool {
        let nodes = self.tree.as_slice();
        match self.order {
            Order::Max => nodes[a] > nodes[b],
            Order::Min => nodes[a] < nodes[b],
        }
    }

    fn exchange(&mut self, a: usize, b: usize) {
        // Both indices come from the tree's own family lookups.
        let _ = self.tree.swap(a, b);
    }

    fn sift_up(&mut self, mut idx: usize) -> usize {
        while let Some(parent) = self.tree.parent(idx) {
            if !self.outranks(idx, parent) {
                break;
            }
            self.exchange(idx, parent);
            idx = parent;
        }
        idx
    }

    fn sift_down(&mut self, mut idx: usize) -> usize {
        loop {
            let mut best = idx;
            for child in [self.tree.left(idx), self.tree.right(idx)].into_iter().flatten() {
                if self.outranks(child, best) {
                    best = child;
                }
            }
            if best == idx {
                return idx;
            }
            self.exchange(idx, best);
            idx = best;
        }
    }
}
