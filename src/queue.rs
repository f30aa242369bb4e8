//! FIFO queue over a SinglyLinkedList: enqueue at the tail, dequeue at the head.

use crate::error::{Error, Result};
use crate::singly_linked_list::SinglyLinkedList;

#[derive(Debug, Clone)]
pub struct Queue<T> {
    list: SinglyLinkedList<T>,
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Queue<T> {
    pub fn new() -> Self {
        Self {
            list: SinglyLinkedList::new(),
        }
    }

    pub fn enqueue(&mut self, value: T) {
        self.list.push(value);
    }

    pub fn dequeue(&mut self) -> Result<T> {
        self.list.pop_front().map_err(|_| Error::Underflow("queue"))
    }

    /// The element `dequeue` would return next.
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
