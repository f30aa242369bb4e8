//! LIFO stack over a SinglyLinkedList; the top is the list head.

use crate::error::{Error, Result};
use crate::singly_linked_list::SinglyLinkedList;

#[derive(Debug, Clone)]
pub struct Stack<T> {
    list: SinglyLinkedList<T>,
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Self {
            list: SinglyLinkedList::new(),
        }
    }

    pub fn push(&mut self, value: T) {
        self.list.shift(value);
    }

    pub fn pop(&mut self) -> Result<T> {
        self.list.pop_front().map_err(|_| Error::Underflow("stack"))
    }

    pub fn peek(&self) -> Option<&T> {
        self.list.head()
    }

    #[inline]
    pub fn length(&self) -> usize {
        self.list.length()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn clear(&mut self) {
        self.list.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_in_first_out() {
        let mut s = Stack::new();
        for c in ['a', 'b', 'c'] {
            s.push(c);
        }
        assert_eq!(s.peek(), Some(&'c'));
        assert_eq!(s.pop(), Ok('c'));
        assert_eq!(s.pop(), Ok('b'));
        assert_eq!(s.length(), 1);
        s.clear();
        assert!(s.is_empty());
        assert_eq!(s.pop(), Err(Error::Underflow("stack")));
        assert_eq!(s.peek(), None);
    }
}
