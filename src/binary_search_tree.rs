//! Unbalanced binary search tree with arena nodes and parent links.
//!
//! Ordering: every value in a node's left subtree is `<=` the node and every
//! value in its right subtree is `>=` it. `push` sends equal values left.
//! Removing a node with two children copies its in-order successor into it
//! and unlinks the successor, so the removed node's handle keeps resolving,
//! now to the successor's value.

use crate::error::{Error, Result};
use crate::queue::Queue;
use slotmap::{DefaultKey, SlotMap};

/// Stable reference to one node of a tree.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct TreeHandle(DefaultKey);

#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    parent: Option<DefaultKey>,
    left: Option<DefaultKey>,
    right: Option<DefaultKey>,
}

#[derive(Debug, Clone)]
pub struct BinarySearchTree<T> {
    nodes: SlotMap<DefaultKey, Node<T>>,
    root: Option<DefaultKey>,
}

impl<T: Ord> Default for BinarySearchTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> BinarySearchTree<T> {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root: None,
        }
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> Option<&T> {
        self.root.and_then(|k| self.nodes.get(k)).map(|n| &n.value)
    }

    pub fn get(&self, handle: TreeHandle) -> Option<&T> {
        self.nodes.get(handle.0).map(|n| &n.value)
    }

    pub fn push(&mut self, value: T) -> TreeHandle {
        let mut parent = None;
        let mut go_left = false;
        let mut cur = self.root;
        while let Some(node) = cur.and_then(|k| self.nodes.get(k)) {
            parent = cur;
            go_left = value <= node.value;
            cur = if go_left { node.left } else { node.right };
        }

        let k = self.nodes.insert(Node {
            value,
            parent,
            left: None,
            right: None,
        });
        match parent.and_then(|p| self.nodes.get_mut(p)) {
            Some(p) if go_left => p.left = Some(k),
            Some(p) => p.right = Some(k),
            None => self.root = Some(k),
        }
        TreeHandle(k)
    }

    /// Locate a node holding `value` by descending from the root.
    pub fn find(&self, value: &T) -> Option<TreeHandle> {
        let mut cur = self.root;
        while let Some(k) = cur {
            let node = self.nodes.get(k)?;
            cur = match value.cmp(&node.value) {
                core::cmp::Ordering::Equal => return Some(TreeHandle(k)),
                core::cmp::Ordering::Less => node.left,
                core::cmp::Ordering::Greater => node.right,
            };
        }
        None
    }

    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    pub fn min(&self) -> Option<&T> {
        let k = self.leftmost(self.root?)?;
        self.nodes.get(k).map(|n| &n.value)
    }

    pub fn max(&self) -> Option<&T> {
        let mut k = self.root?;
        while let Some(r) = self.nodes.get(k)?.right {
            k = r;
        }
        self.nodes.get(k).map(|n| &n.value)
    }

    /// Remove the value held by `handle`. Stale handles return `None`.
    pub fn remove(&mut self, handle: TreeHandle) -> Option<T> {
        let k = handle.0;
        let node = self.nodes.get(k)?;
        match (node.left, node.right) {
            (Some(_), Some(r)) => {
                let successor = self.leftmost(r)?;
                let moved = self.detach(successor)?;
                let node = self.nodes.get_mut(k)?;
                Some(core::mem::replace(&mut node.value, moved))
            }
            _ => self.detach(k),
        }
    }

    /// Remove the root value.
    pub fn poll(&mut self) -> Result<T> {
        self.root
            .and_then(|k| self.remove(TreeHandle(k)))
            .ok_or(Error::Underflow("tree"))
    }

    /// Remove the first node equal to `value` in breadth-first order, or every
    /// such node when `all` is set. Returns whether anything was removed.
    pub fn remove_by_value(&mut self, value: &T, all: bool) -> bool {
        let mut removed = false;
        while let Some(k) = self.breadth_first(|v| v == value) {
            removed |= self.remove(TreeHandle(k)).is_some();
            if !all {
                break;
            }
        }
        removed
    }

    /// Values in ascending order.
    pub fn in_order(&self) -> Vec<&T> {
        let mut out = Vec::with_capacity(self.count());
        let mut pending = Vec::new();
        let mut cur = self.root;
        loop {
            while let Some(node) = cur.and_then(|k| self.nodes.get(k)) {
                pending.push(node);
                cur = node.left;
            }
            match pending.pop() {
                Some(node) => {
                    out.push(&node.value);
                    cur = node.right;
                }
                None => return out,
            }
        }
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    fn leftmost(&self, mut k: DefaultKey) -> Option<DefaultKey> {
        while let Some(l) = self.nodes.get(k)?.left {
            k = l;
        }
        Some(k)
    }

    fn breadth_first<F>(&self, mut hit: F) -> Option<DefaultKey>
    where
        F: FnMut(&T) -> bool,
    {
        let mut frontier = Queue::new();
        frontier.enqueue(self.root?);
        while let Ok(k) = frontier.dequeue() {
            let node = self.nodes.get(k)?;
            if hit(&node.value) {
                return Some(k);
            }
            for child in [node.left, node.right].into_iter().flatten() {
                frontier.enqueue(child);
            }
        }
        None
    }

    // Unlink a node with at most one child, splicing the child into its place.
    fn detach(&mut self, k: DefaultKey) -> Option<T> {
        let node = self.nodes.remove(k)?;
        let child = node.left.or(node.right);
        if let Some(c) = child.and_then(|c| self.nodes.get_mut(c)) {
            c.parent = node.parent;
        }
        match node.parent.and_then(|p| self.nodes.get_mut(p)) {
            Some(p) if p.left == Some(k) => p.left = child,
            Some(p) => p.right = child,
            None => self.root = child,
        }
        Some(node.value)
    }
}
