//! SinglyLinkedList: owned nodes in a generational arena, linked by key.
//!
//! Nodes live in a `SlotMap`; `next` links are arena keys rather than
//! pointers, so unlinking is a plain map removal and a stale `NodeHandle`
//! simply stops resolving.

use crate::error::{Error, Result};
use slotmap::{DefaultKey, SlotMap};

/// Stable reference to one node of a list.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeHandle(pub(crate) DefaultKey);

#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    next: Option<DefaultKey>,
}

#[derive(Debug, Clone)]
pub struct SinglyLinkedList<T> {
    nodes: SlotMap<DefaultKey, Node<T>>,
    head: Option<DefaultKey>,
    tail: Option<DefaultKey>,
}

impl<T> Default for SinglyLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SinglyLinkedList<T> {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            head: None,
            tail: None,
        }
    }

    #[inline]
    pub fn length(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn head(&self) -> Option<&T> {
        self.head.and_then(|k| self.nodes.get(k)).map(|n| &n.value)
    }

    pub fn tail(&self) -> Option<&T> {
        self.tail.and_then(|k| self.nodes.get(k)).map(|n| &n.value)
    }

    /// Append at the tail.
    pub fn push(&mut self, value: T) -> NodeHandle {
        let k = self.nodes.insert(Node { value, next: None });
        match self.tail {
            Some(t) => {
                if let Some(node) = self.nodes.get_mut(t) {
                    node.next = Some(k);
                }
            }
            None => self.head = Some(k),
        }
        self.tail = Some(k);
        NodeHandle(k)
    }

    /// Prepend at the head.
    pub fn shift(&mut self, value: T) -> NodeHandle {
        let k = self.nodes.insert(Node {
            value,
            next: self.head,
        });
        self.head = Some(k);
        if self.tail.is_none() {
            self.tail = Some(k);
        }
        NodeHandle(k)
    }

    pub fn at(&self, idx: usize) -> Result<&T> {
        self.iter().nth(idx).ok_or(Error::OutOfRange {
            index: idx,
            len: self.length(),
        })
    }

    pub fn at_mut(&mut self, idx: usize) -> Result<&mut T> {
        let len = self.length();
        let (_, k) = self
            .locate(|i, _, _| i == idx)
            .ok_or(Error::OutOfRange { index: idx, len })?;
        self.nodes
            .get_mut(k)
            .map(|n| &mut n.value)
            .ok_or(Error::OutOfRange { index: idx, len })
    }

    pub fn get(&self, handle: NodeHandle) -> Option<&T> {
        self.nodes.get(handle.0).map(|n| &n.value)
    }

    pub fn get_mut(&mut self, handle: NodeHandle) -> Option<&mut T> {
        self.nodes.get_mut(handle.0).map(|n| &mut n.value)
    }

    pub fn remove_by_index(&mut self, idx: usize) -> Result<T> {
        let len = self.length();
        let (prev, k) = self
            .locate(|i, _, _| i == idx)
            .ok_or(Error::OutOfRange { index: idx, len })?;
        self.unlink(prev, k)
            .ok_or(Error::OutOfRange { index: idx, len })
    }

    /// Remove the tail. Walks the list to find the new tail.
    pub fn pop(&mut self) -> Result<T> {
        match self.length() {
            0 => Err(Error::Underflow("list")),
            n => self.remove_by_index(n - 1),
        }
    }

    pub fn pop_front(&mut self) -> Result<T> {
        let k = self.head.ok_or(Error::Underflow("list"))?;
        self.unlink(None, k).ok_or(Error::Underflow("list"))
    }

    /// Unlink the node behind `handle`. Stale handles return `None`.
    pub fn remove(&mut self, handle: NodeHandle) -> Option<T> {
        let (prev, k) = self.locate(|_, k, _| k == handle.0)?;
        self.unlink(prev, k)
    }

    /// Unlink the first element matching `pred`.
    pub fn remove_first<F>(&mut self, mut pred: F) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        let (prev, k) = self.locate(|_, _, v| pred(v))?;
        self.unlink(prev, k)
    }

    pub fn find(&self, value: &T) -> Option<NodeHandle>
    where
        T: PartialEq,
    {
        self.locate(|_, _, v| v == value).map(|(_, k)| NodeHandle(k))
    }

    pub fn position<F>(&self, mut pred: F) -> Option<usize>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().position(|v| pred(v))
    }

    /// Walk head to tail.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let mut cur = self.head;
        core::iter::from_fn(move || {
            let node = self.nodes.get(cur?)?;
            cur = node.next;
            Some(&node.value)
        })
    }

    /// Detach every element, returned in list order.
    pub fn drain(&mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.length());
        let mut cur = self.head.take();
        while let Some(k) = cur {
            match self.nodes.remove(k) {
                Some(node) => {
                    cur = node.next;
                    out.push(node.value);
                }
                None => break,
            }
        }
        self.nodes.clear();
        self.tail = None;
        out
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    // Returns (predecessor, node) of the first node accepted by `hit`.
    fn locate<F>(&self, mut hit: F) -> Option<(Option<DefaultKey>, DefaultKey)>
    where
        F: FnMut(usize, DefaultKey, &T) -> bool,
    {
        let mut prev = None;
        let mut cur = self.head;
        let mut idx = 0;
        while let Some(k) = cur {
            let node = self.nodes.get(k)?;
            if hit(idx, k, &node.value) {
                return Some((prev, k));
            }
            prev = Some(k);
            cur = node.next;
            idx += 1;
        }
        None
    }

    fn unlink(&mut self, prev: Option<DefaultKey>, k: DefaultKey) -> Option<T> {
        let node = self.nodes.remove(k)?;
        match prev {
            Some(p) => {
                if let Some(pn) = self.nodes.get_mut(p) {
                    pn.next = node.next;
                }
            }
            None => self.head = node.next,
        }
        if self.tail == Some(k) {
            self.tail = prev;
        }
        Some(node.value)
    }
}
