//! DoublyLinkedList: arena nodes with both `prev` and `next` links.
//!
//! Unlinking any node is O(1) once it is located, and indexed access walks
//! from whichever end is nearer.

use crate::error::{Error, Result};
use crate::singly_linked_list::NodeHandle;
use slotmap::{DefaultKey, SlotMap};

#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    prev: Option<DefaultKey>,
    next: Option<DefaultKey>,
}

#[derive(Debug, Clone)]
pub struct DoublyLinkedList<T> {
    nodes: SlotMap<DefaultKey, Node<T>>,
    head: Option<DefaultKey>,
    tail: Option<DefaultKey>,
}

impl<T> Default for DoublyLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DoublyLinkedList<T> {
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

    pub fn push(&mut self, value: T) -> NodeHandle {
        let k = self.nodes.insert(Node {
            value,
            prev: self.tail,
            next: None,
        });
        match self.tail.and_then(|t| self.nodes.get_mut(t)) {
            Some(old_tail) => old_tail.next = Some(k),
            None => self.head = Some(k),
        }
        self.tail = Some(k);
        NodeHandle(k)
    }

    pub fn shift(&mut self, value: T) -> NodeHandle {
        let k = self.nodes.insert(Node {
            value,
            prev: None,
            next: self.head,
        });
        match self.head.and_then(|h| self.nodes.get_mut(h)) {
            Some(old_head) => old_head.prev = Some(k),
            None => self.tail = Some(k),
        }
        self.head = Some(k);
        NodeHandle(k)
    }

    pub fn pop(&mut self) -> Result<T> {
        let k = self.tail.ok_or(Error::Underflow("list"))?;
        self.unlink(k).ok_or(Error::Underflow("list"))
    }

    pub fn pop_front(&mut self) -> Result<T> {
        let k = self.head.ok_or(Error::Underflow("list"))?;
        self.unlink(k).ok_or(Error::Underflow("list"))
    }

    pub fn at(&self, idx: usize) -> Result<&T> {
        self.key_at(idx)
            .and_then(|k| self.nodes.get(k))
            .map(|n| &n.value)
            .ok_or(Error::OutOfRange {
                index: idx,
                len: self.length(),
            })
    }

    pub fn at_mut(&mut self, idx: usize) -> Result<&mut T> {
        let len = self.length();
        self.key_at(idx)
            .and_then(|k| self.nodes.get_mut(k))
            .map(|n| &mut n.value)
            .ok_or(Error::OutOfRange { index: idx, len })
    }

    pub fn get(&self, handle: NodeHandle) -> Option<&T> {
        self.nodes.get(handle.0).map(|n| &n.value)
    }

    /// Unlink the node behind `handle` in O(1). Stale handles return `None`.
    pub fn remove_handle(&mut self, handle: NodeHandle) -> Option<T> {
        self.unlink(handle.0)
    }

    pub fn remove_by_index(&mut self, idx: usize) -> Result<T> {
        let len = self.length();
        self.key_at(idx)
            .and_then(|k| self.unlink(k))
            .ok_or(Error::OutOfRange { index: idx, len })
    }

    /// Remove the first node equal to `value`, or every such node when `all`
    /// is set. Returns whether anything was removed.
    pub fn remove(&mut self, value: &T, all: bool) -> bool
    where
        T: PartialEq,
    {
        let mut removed = false;
        let mut cur = self.head;
        while let Some(k) = cur {
            let Some(node) = self.nodes.get(k) else { break };
            cur = node.next;
            if node.value == *value {
                self.unlink(k);
                removed = true;
                if !all {
                    break;
                }
            }
        }
        removed
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + '_ {
        Iter {
            list: self,
            front: self.head,
            back: self.tail,
            remaining: self.length(),
        }
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    fn key_at(&self, idx: usize) -> Option<DefaultKey> {
        let len = self.length();
        if idx >= len {
            return None;
        }
        if idx < len / 2 {
            let mut cur = self.head;
            for _ in 0..idx {
                cur = self.nodes.get(cur?)?.next;
            }
            cur
        } else {
            let mut cur = self.tail;
            for _ in 0..(len - 1 - idx) {
                cur = self.nodes.get(cur?)?.prev;
            }
            cur
        }
    }

    fn unlink(&mut self, k: DefaultKey) -> Option<T> {
        let node = self.nodes.remove(k)?;
        match node.prev.and_then(|p| self.nodes.get_mut(p)) {
            Some(prev) => prev.next = node.next,
            None => self.head = node.next,
        }
        match node.next.and_then(|n| self.nodes.get_mut(n)) {
            Some(next) => next.prev = node.prev,
            None => self.tail = node.prev,
        }
        Some(node.value)
    }
}

struct Iter<'a, T> {
    list: &'a DoublyLinkedList<T>,
    front: Option<DefaultKey>,
    back: Option<DefaultKey>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.nodes.get(self.front?)?;
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.nodes.get(self.back?)?;
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(values: &[char]) -> DoublyLinkedList<char> {
        let mut l = DoublyLinkedList::new();
        for &v in values {
            l.push(v);
        }
        l
    }

    /// Invariant: forward and backward walks agree.
    #[test]
    fn links_agree_in_both_directions() {
        let mut l = list_of(&['b', 'c']);
        l.shift('a');
        l.push('d');
        assert_eq!(l.to_vec(), vec!['a', 'b', 'c', 'd']);
        let back: Vec<char> = l.iter().rev().copied().collect();
        assert_eq!(back, vec!['d', 'c', 'b', 'a']);
    }

    #[test]
    fn at_walks_from_either_end() {
        let l = list_of(&['a', 'b', 'c', 'd', 'e']);
        for (i, c) in ['a', 'b', 'c', 'd', 'e'].iter().enumerate() {
            assert_eq!(l.at(i), Ok(c));
        }
        assert_eq!(l.at(5), Err(Error::OutOfRange { index: 5, len: 5 }));
    }

    #[test]
    fn remove_by_index_relinks_neighbours() {
        let mut l = list_of(&['a', 'b', 'c', 'd']);
        assert_eq!(l.remove_by_index(1), Ok('b'));
        assert_eq!(l.remove_by_index(2), Ok('d'));
        assert_eq!(l.tail(), Some(&'c'));
        assert_eq!(l.remove_by_index(0), Ok('a'));
        assert_eq!(l.head(), Some(&'c'));
        assert_eq!(l.tail(), Some(&'c'));
        assert!(l.remove_by_index(1).is_err());
    }

    #[test]
    fn remove_first_or_all_matches() {
        let mut l = list_of(&['x', 'a', 'x', 'b', 'x']);
        assert!(l.remove(&'x', false));
        assert_eq!(l.to_vec(), vec!['a', 'x', 'b', 'x']);
        assert!(l.remove(&'x', true));
        assert_eq!(l.to_vec(), vec!['a', 'b']);
        assert_eq!(l.tail(), Some(&'b'));
        assert!(!l.remove(&'x', true));
    }

    #[test]
    fn pop_both_ends_then_underflow() {
        let mut l = list_of(&['a', 'b', 'c']);
        assert_eq!(l.pop(), Ok('c'));
        assert_eq!(l.pop_front(), Ok('a'));
        assert_eq!(l.pop(), Ok('b'));
        assert_eq!(l.head(), None);
        assert_eq!(l.tail(), None);
        assert_eq!(l.pop(), Err(Error::Underflow("list")));
        assert_eq!(l.pop_front(), Err(Error::Underflow("list")));
    }

    #[test]
    fn handle_removal_is_direct() {
        let mut l = DoublyLinkedList::new();
        l.push(1);
        let mid = l.push(2);
        l.push(3);
        assert_eq!(l.get(mid), Some(&2));
        assert_eq!(l.remove_handle(mid), Some(2));
        assert_eq!(l.remove_handle(mid), None);
        assert_eq!(l.to_vec(), vec![1, 3]);
        *l.at_mut(1).unwrap() = 30;
        assert_eq!(l.tail(), Some(&30));
    }

    #[test]
    fn clear_empties() {
        let mut l = list_of(&['a', 'b']);
        l.clear();
        assert!(l.is_empty());
        assert_eq!(l.iter().count(), 0);
        l.push('z');
        assert_eq!(l.to_vec(), vec!['z']);
    }
}
