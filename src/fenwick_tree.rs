//! Fenwick (binary indexed) tree with 1-based positions.
//!
//! `sums[i - 1]` covers positions `i - lowbit(i) + 1 ..= i`, where `lowbit`
//! isolates the lowest set bit. Point updates and prefix sums both touch
//! `O(log n)` cells.

use crate::error::{Error, Result};
use core::ops::{Add, Sub};

pub const DEFAULT_FENWICK_CAPACITY: usize = 8;

#[inline]
fn lowbit(i: usize) -> usize {
    i & i.wrapping_neg()
}

#[derive(Debug, Clone)]
pub struct FenwickTree<T> {
    elements: Vec<T>,
    sums: Vec<T>,
}

impl<T> Default for FenwickTree<T>
where
    T: Copy + Default + Add<Output = T> + Sub<Output = T>,
{
    fn default() -> Self {
        Self {
            elements: vec![T::default(); DEFAULT_FENWICK_CAPACITY],
            sums: vec![T::default(); DEFAULT_FENWICK_CAPACITY],
        }
    }
}

impl<T> FenwickTree<T>
where
    T: Copy + Default + Add<Output = T> + Sub<Output = T>,
{
    /// A tree of `capacity` zeroed positions. Zero capacity is rejected.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidArgument("capacity must be at least 1"));
        }
        Ok(Self {
            elements: vec![T::default(); capacity],
            sums: vec![T::default(); capacity],
        })
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.elements.len()
    }

    fn check(&self, idx: usize) -> Result<()> {
        if idx == 0 || idx > self.capacity() {
            return Err(Error::OutOfRange {
                index: idx,
                len: self.capacity(),
            });
        }
        Ok(())
    }

    /// Set position `idx` (1-based) to `value`.
    pub fn set(&mut self, idx: usize, value: T) -> Result<()> {
        self.check(idx)?;
        let old = core::mem::replace(&mut self.elements[idx - 1], value);
        // Every cell on the update path already includes `old`, so subtracting
        // it first cannot underflow an unsigned sum.
        let mut i = idx;
        while i <= self.capacity() {
            self.sums[i - 1] = self.sums[i - 1] - old + value;
            i += lowbit(i);
        }
        Ok(())
    }

    pub fn get(&self, idx: usize) -> Result<T> {
        self.check(idx)?;
        Ok(self.elements[idx - 1])
    }

    /// Sum of positions `1..=end`. `end == 0` is the empty sum.
    pub fn partial_sum(&self, end: usize) -> Result<T> {
        if end > self.capacity() {
            return Err(Error::OutOfRange {
                index: end,
                len: self.capacity(),
            });
        }
        let mut sum = T::default();
        let mut i = end;
        while i > 0 {
            sum = sum + self.sums[i - 1];
            i -= lowbit(i);
        }
        Ok(sum)
    }

    /// Sum of positions `start..=end`.
    pub fn range_sum(&self, start: usize, end: usize) -> Result<T> {
        if end < start {
            return Err(Error::InvalidArgument("range end precedes start"));
        }
        self.check(start)?;
        Ok(self.partial_sum(end)? - self.partial_sum(start - 1)?)
    }

    /// Reset every position to zero. Capacity is kept.
    pub fn clear(&mut self) {
        self.elements.fill(T::default());
        self.sums.fill(T::default());
    }
}
