//! GrowableArray: contiguous, index-addressed storage with doubling growth.
//!
//! The logical capacity is tracked separately from the backing `Vec` so the
//! growth contract (double on overflow, reset to zero on `clear`) is exact
//! and observable, rather than whatever the allocator happens to reserve.

use crate::error::{Error, Result};

pub const DEFAULT_CAPACITY: usize = 10;

#[derive(Debug, Clone)]
pub struct GrowableArray<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> GrowableArray<T> {
    /// Create an empty array able to hold `capacity` elements before growing.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidArgument("capacity must be at least 1"));
        }
        Ok(Self {
            items: Vec::with_capacity(capacity),
            capacity,
        })
    }

    /// Create an array whose every slot up to `capacity` is initialised by `f`.
    /// Length equals capacity afterwards.
    pub fn filled<F>(capacity: usize, mut f: F) -> Result<Self>
    where
        F: FnMut() -> T,
    {
        let mut arr = Self::new(capacity)?;
        arr.fill_to_capacity(&mut f);
        Ok(arr)
    }

    /// Push values from `f` until length reaches capacity.
    pub fn fill_to_capacity<F>(&mut self, f: F)
    where
        F: FnMut() -> T,
    {
        let missing = self.capacity.saturating_sub(self.items.len());
        self.items.extend(core::iter::repeat_with(f).take(missing));
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn length(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn at(&mut self, idx: usize) -> Result<&mut T> {
        let len = self.items.len();
        self.items
            .get_mut(idx)
            .ok_or(Error::OutOfRange { index: idx, len })
    }

    pub fn get(&self, idx: usize) -> Result<&T> {
        self.items.get(idx).ok_or(Error::OutOfRange {
            index: idx,
            len: self.items.len(),
        })
    }

    /// Overwrite the element at `idx`, returning the previous one.
    pub fn set(&mut self, value: T, idx: usize) -> Result<T> {
        let slot = self.at(idx)?;
        Ok(core::mem::replace(slot, value))
    }

    pub fn swap(&mut self, a: usize, b: usize) -> Result<()> {
        let len = self.items.len();
        for idx in [a, b] {
            if idx >= len {
                return Err(Error::OutOfRange { index: idx, len });
            }
        }
        self.items.swap(a, b);
        Ok(())
    }

    /// Remove and return the last element. The vacated slot is moved out of,
    /// so nothing stale stays reachable from the array.
    pub fn pop(&mut self) -> Result<T> {
        self.items.pop().ok_or(Error::Underflow("array"))
    }

    pub fn push(&mut self, value: T) {
        if self.items.len() >= self.capacity {
            self.double_capacity();
        }
        self.items.push(value);
    }

    /// Insert `value` so that it lands at `idx`, shifting later elements right.
    ///
    /// Inserting at the last index (`length - 1`) or at `length` delegates to
    /// `push`, so the value is appended after the current last element.
    pub fn insert(&mut self, value: T, idx: usize) -> Result<()> {
        let len = self.items.len();
        if idx > len {
            return Err(Error::OutOfRange { index: idx, len });
        }
        if idx + 1 >= len {
            self.push(value);
            return Ok(());
        }
        if len >= self.capacity {
            self.double_capacity();
        }
        self.items.insert(idx, value);
        Ok(())
    }

    /// Move every element into storage twice as large. The old storage is
    /// drained element by element and released.
    pub fn double_capacity(&mut self) {
        let new_capacity = self.capacity.saturating_mul(2).max(1);
        let mut grown = Vec::with_capacity(new_capacity);
        grown.extend(self.items.drain(..));
        self.items = grown;
        self.capacity = new_capacity;
        log::debug!("growable array capacity doubled to {new_capacity}");
    }

    /// Release all storage. Both length and capacity become 0; the next push
    /// restarts at capacity 1.
    pub fn clear(&mut self) {
        self.items = Vec::new();
        self.capacity = 0;
    }

    /// Drop every element, then refill to exactly `capacity` values from `f`.
    /// A zero `capacity` leaves the array as `clear` does.
    pub fn reset<F>(&mut self, capacity: usize, f: F)
    where
        F: FnMut() -> T,
    {
        self.clear();
        self.items.reserve_exact(capacity);
        self.capacity = capacity;
        self.fill_to_capacity(f);
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }
}

impl<T> Default for GrowableArray<T> {
    fn default() -> Self {
        Self {
            items: Vec::with_capacity(DEFAULT_CAPACITY),
            capacity: DEFAULT_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: zero capacity is rejected at construction.
    #[test]
    fn zero_capacity_rejected() {
        assert!(matches!(
            GrowableArray::<i32>::new(0),
            Err(Error::InvalidArgument(_))
        ));
        assert!(GrowableArray::filled(0, || 0u8).is_err());
    }

    #[test]
    fn default_capacity_is_ten() {
        let a: GrowableArray<u8> = GrowableArray::default();
        assert_eq!(a.capacity(), 10);
        assert_eq!(a.length(), 0);
    }

    /// Invariant: capacity doubles exactly when a push would overflow.
    #[test]
    fn push_doubles_capacity() {
        let mut a = GrowableArray::new(1).unwrap();
        a.push('x');
        assert_eq!(a.capacity(), 1);
        a.push('y');
        assert_eq!(a.capacity(), 2);
        a.push('z');
        assert_eq!(a.capacity(), 4);
        assert_eq!(a.length(), 3);
        assert_eq!(a.as_slice(), &['x', 'y', 'z']);
    }

    /// Invariant: growth keeps every earlier element, in order.
    #[test]
    fn growth_preserves_elements() {
        let mut a = GrowableArray::new(7).unwrap();
        for i in 0..8 {
            a.push(i.to_string());
        }
        assert!(a.capacity() >= 14);
        for i in 0..8 {
            assert_eq!(a.get(i).unwrap(), &i.to_string());
        }
    }

    #[test]
    fn at_bounds_checked_and_mutable() {
        let mut a = GrowableArray::new(2).unwrap();
        a.push(1);
        *a.at(0).unwrap() += 41;
        assert_eq!(*a.get(0).unwrap(), 42);
        assert_eq!(a.at(1), Err(Error::OutOfRange { index: 1, len: 1 }));
        assert_eq!(a.get(5), Err(Error::OutOfRange { index: 5, len: 1 }));
    }

    #[test]
    fn pop_returns_last_then_underflows() {
        let mut a = GrowableArray::new(3).unwrap();
        a.push(1);
        a.push(2);
        assert_eq!(a.pop(), Ok(2));
        assert_eq!(a.pop(), Ok(1));
        assert_eq!(a.pop(), Err(Error::Underflow("array")));
        assert_eq!(a.capacity(), 3);
    }

    /// Invariant: popping releases the element instead of retaining a copy.
    #[test]
    fn pop_does_not_retain_value() {
        use std::rc::Rc;
        let shared = Rc::new(5);
        let mut a = GrowableArray::new(2).unwrap();
        a.push(Rc::clone(&shared));
        let popped = a.pop().unwrap();
        drop(popped);
        assert_eq!(Rc::strong_count(&shared), 1);
    }

    #[test]
    fn insert_shifts_right() {
        let mut a = GrowableArray::new(4).unwrap();
        for v in [1, 2, 3] {
            a.push(v);
        }
        a.insert(9, 0).unwrap();
        assert_eq!(a.as_slice(), &[9, 1, 2, 3]);
        a.insert(8, 2).unwrap();
        assert_eq!(a.as_slice(), &[9, 1, 8, 2, 3]);
        assert_eq!(a.capacity(), 8);
    }

    /// Invariant: the last index and one-past-the-end both append.
    #[test]
    fn insert_at_tail_delegates_to_push() {
        let mut a = GrowableArray::new(2).unwrap();
        a.insert(1, 0).unwrap();
        a.push(2);
        a.insert(3, 1).unwrap();
        assert_eq!(a.as_slice(), &[1, 2, 3]);
        a.insert(4, 3).unwrap();
        assert_eq!(a.as_slice(), &[1, 2, 3, 4]);
        assert_eq!(a.insert(5, 9), Err(Error::OutOfRange { index: 9, len: 4 }));
        assert_eq!(a.length(), 4);
    }

    #[test]
    fn clear_resets_and_push_restarts() {
        let mut a = GrowableArray::new(4).unwrap();
        a.push(1);
        a.clear();
        assert_eq!(a.capacity(), 0);
        assert_eq!(a.length(), 0);
        a.push(7);
        assert_eq!(a.capacity(), 1);
        assert_eq!(a.as_slice(), &[7]);
    }

    #[test]
    fn filled_set_and_swap() {
        let mut a = GrowableArray::filled(3, || 0).unwrap();
        assert_eq!(a.length(), 3);
        assert_eq!(a.set(5, 2), Ok(0));
        a.swap(0, 2).unwrap();
        assert_eq!(a.as_slice(), &[5, 0, 0]);
        assert!(a.swap(0, 3).is_err());
        assert!(a.set(1, 3).is_err());
    }

    #[test]
    fn reset_refills_to_requested_capacity() {
        let mut a = GrowableArray::filled(2, || 1).unwrap();
        a.push(1);
        assert_eq!(a.capacity(), 4);
        a.reset(3, || 0);
        assert_eq!(a.capacity(), 3);
        assert_eq!(a.as_slice(), &[0, 0, 0]);
        a.reset(0, || 9);
        assert_eq!((a.capacity(), a.length()), (0, 0));
    }

    #[test]
    fn fill_to_capacity_after_growth() {
        let mut a = GrowableArray::filled(2, || 1).unwrap();
        a.double_capacity();
        assert_eq!(a.length(), 2);
        a.fill_to_capacity(|| 0);
        assert_eq!(a.as_slice(), &[1, 1, 0, 0]);
    }
}
