//! Binary Heap implementation
//!
//! A fixed-capacity binary max-heap stored in a contiguous array. The capacity
//! is chosen at construction and never grows; inserting into a full heap fails
//! with [`QueueError::Capacity`] before anything is moved.
//!
//! # Time Complexity
//!
//! | Operation        | Complexity       |
//! |------------------|------------------|
//! | `insert`         | O(log n)         |
//! | `pop_max`        | O(log n)         |
//! | `peek_max`       | O(1)             |
//! | `merge`          | O(m log(n + m))  |
//!
//! # Example
//!
//! ```rust
//! use rust_mergeable_queues::MaxQueue;
//! use rust_mergeable_queues::binary::BinaryQueue;
//!
//! let mut queue = BinaryQueue::with_capacity(5).unwrap();
//! queue.insert("a", 10).unwrap();
//! queue.insert("b", 20).unwrap();
//!
//! assert_eq!(queue.peek_max(), Ok("b"));
//! queue.extract_max().unwrap();
//! assert_eq!(queue.peek_max(), Ok("a"));
//! assert_eq!(queue.len(), 1);
//! ```

use crate::element::Element;
use crate::error::QueueError;
use crate::kind::QueueKind;
use crate::traits::MaxQueue;
use log::debug;
use std::fmt;
use std::mem;

/// A fixed-capacity binary max-heap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryQueue {
    /// Heap-ordered slots: `data[(i - 1) / 2] >= data[i]` by priority
    data: Vec<Element>,
    capacity: usize,
}

impl BinaryQueue {
    /// Creates an empty heap that can hold at most `capacity` elements
    ///
    /// # Errors
    /// [`QueueError::InvalidCapacity`] if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self, QueueError> {
        if capacity == 0 {
            return Err(QueueError::InvalidCapacity);
        }
        Ok(Self::empty(capacity))
    }

    /// `capacity` must be non-zero
    pub(crate) fn empty(capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        Self {
            data: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Maximum number of elements this heap can hold
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns true if no further element fits
    pub fn is_full(&self) -> bool {
        self.data.len() == self.capacity
    }

    /// Iterates over the stored elements in array order
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.data.iter()
    }

    fn ensure_room(&self, additional: usize) -> Result<(), QueueError> {
        if self.data.len() + additional > self.capacity {
            debug!(
                "binary heap rejects {} element(s): {}/{} slots used",
                additional,
                self.data.len(),
                self.capacity
            );
            return Err(QueueError::Capacity {
                capacity: self.capacity,
            });
        }
        Ok(())
    }

    /// Move element at index up to maintain heap property
    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.data[index].priority() > self.data[parent].priority() {
                self.data.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    /// Move element at index down to maintain heap property
    fn sift_down(&mut self, mut index: usize) {
        let len = self.data.len();
        loop {
            let left = 2 * index + 1;
            let right = 2 * index + 2;
            let mut largest = index;

            if left < len && self.data[left].priority() > self.data[largest].priority() {
                largest = left;
            }
            if right < len && self.data[right].priority() > self.data[largest].priority() {
                largest = right;
            }

            if largest == index {
                break;
            }
            self.data.swap(index, largest);
            index = largest;
        }
    }

    fn push_unchecked(&mut self, element: Element) {
        self.data.push(element);
        self.sift_up(self.data.len() - 1);
    }

    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        assert!(self.data.len() <= self.capacity);
        for i in 1..self.data.len() {
            let parent = (i - 1) / 2;
            assert!(self.data[parent].priority() >= self.data[i].priority());
        }
    }
}

impl MaxQueue for BinaryQueue {
    const KIND: QueueKind = QueueKind::Binary;

    fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn height(&self) -> usize {
        (usize::BITS - self.data.len().leading_zeros()) as usize
    }

    fn push_element(&mut self, element: Element) -> Result<(), QueueError> {
        self.ensure_room(1)?;
        self.push_unchecked(element);
        Ok(())
    }

    fn peek_entry(&self) -> Result<&Element, QueueError> {
        self.data.first().ok_or(QueueError::EmptyQueue)
    }

    fn pop_max(&mut self) -> Result<Element, QueueError> {
        if self.data.is_empty() {
            return Err(QueueError::EmptyQueue);
        }
        let top = self.data.swap_remove(0);
        if !self.data.is_empty() {
            self.sift_down(0);
        }
        Ok(top)
    }

    fn merge(&mut self, other: &mut Self) -> Result<(), QueueError> {
        self.ensure_room(other.data.len())?;
        for element in other.data.drain(..) {
            self.push_unchecked(element);
        }
        Ok(())
    }

    fn merge_in_place(&mut self, other: &Self) -> Result<(), QueueError> {
        self.ensure_room(other.data.len())?;
        for element in &other.data {
            self.push_unchecked(element.clone());
        }
        Ok(())
    }

    /// The result's capacity is the sum of both capacities, so it always fits.
    fn meld(&self, other: &Self) -> Self {
        let mut result = Self::empty(self.capacity + other.capacity);
        for element in self.data.iter().chain(&other.data) {
            result.push_unchecked(element.clone());
        }
        result
    }

    fn take(&mut self) -> Self {
        mem::replace(self, Self::empty(self.capacity))
    }
}

impl fmt::Display for BinaryQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "binary heap ({}/{}):", self.data.len(), self.capacity)?;
        if self.data.is_empty() {
            return writeln!(f, "  [empty]");
        }
        for (i, element) in self.data.iter().enumerate() {
            writeln!(f, "  [{}] {}", i, element)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        let mut heap = BinaryQueue::with_capacity(5).unwrap();
        assert!(heap.is_empty());
        assert_eq!(heap.len(), 0);

        heap.insert("a", 10).unwrap();
        heap.insert("b", 20).unwrap();

        assert_eq!(heap.peek_max(), Ok("b"));
        heap.extract_max().unwrap();
        assert_eq!(heap.peek_max(), Ok("a"));
        assert_eq!(heap.len(), 1);
    }

    #[test]
    fn test_slots_preallocated() {
        let mut heap = BinaryQueue::with_capacity(64).unwrap();
        assert!(heap.data.capacity() >= 64);
        for i in 0..64 {
            heap.insert("x", i).unwrap();
        }
        assert!(heap.is_full());
        let moved = heap.take();
        assert_eq!(moved.len(), 64);
        assert!(heap.data.capacity() >= 64);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert_eq!(
            BinaryQueue::with_capacity(0).unwrap_err(),
            QueueError::InvalidCapacity
        );
    }

    #[test]
    fn test_capacity_is_checked_before_mutation() {
        let mut heap = BinaryQueue::with_capacity(2).unwrap();
        heap.insert("x", 1).unwrap();
        heap.insert("y", 2).unwrap();
        assert!(heap.is_full());

        let before = heap.clone();
        assert_eq!(
            heap.insert("z", 3),
            Err(QueueError::Capacity { capacity: 2 })
        );
        assert_eq!(heap, before);
    }

    #[test]
    fn test_merge_over_capacity_leaves_both_untouched() {
        let mut a = BinaryQueue::with_capacity(3).unwrap();
        a.insert("a1", 1).unwrap();
        a.insert("a2", 2).unwrap();
        let mut b = BinaryQueue::with_capacity(3).unwrap();
        b.insert("b1", 5).unwrap();
        b.insert("b2", 6).unwrap();

        let (a0, b0) = (a.clone(), b.clone());
        assert_eq!(
            a.merge_in_place(&b),
            Err(QueueError::Capacity { capacity: 3 })
        );
        assert_eq!(a, a0);
        assert_eq!(b, b0);

        assert_eq!(a.merge(&mut b), Err(QueueError::Capacity { capacity: 3 }));
        assert_eq!(a, a0);
        assert_eq!(b, b0);
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn test_consuming_merge_drains_source() {
        let mut a = BinaryQueue::with_capacity(4).unwrap();
        a.insert("a", 1).unwrap();
        let mut b = BinaryQueue::with_capacity(2).unwrap();
        b.insert("b1", 7).unwrap();
        b.insert("b2", 3).unwrap();

        a.merge(&mut b).unwrap();
        assert_eq!(a.len(), 3);
        assert_eq!(a.peek_max(), Ok("b1"));
        assert!(b.is_empty());
        assert_eq!(b.capacity(), 2);
        a.check_invariants();
    }

    #[test]
    fn test_meld_sums_capacities() {
        let mut a = BinaryQueue::with_capacity(1).unwrap();
        a.insert("a", 1).unwrap();
        let mut b = BinaryQueue::with_capacity(2).unwrap();
        b.insert("b", 7).unwrap();
        b.insert("c", 3).unwrap();

        let melded = a.meld(&b);
        assert_eq!(melded.capacity(), 3);
        assert_eq!(melded.len(), 3);
        assert_eq!(melded.peek_max(), Ok("b"));
        melded.check_invariants();
    }

    #[test]
    fn test_height_of_implicit_tree() {
        let mut heap = BinaryQueue::with_capacity(16).unwrap();
        assert_eq!(heap.height(), 0);
        heap.insert("a", 1).unwrap();
        assert_eq!(heap.height(), 1);
        for i in 0..6 {
            heap.insert("x", i).unwrap();
        }
        assert_eq!(heap.height(), 3);
        heap.insert("y", 0).unwrap();
        assert_eq!(heap.height(), 4);
    }

    #[test]
    fn test_descending_extraction() {
        let mut heap = BinaryQueue::with_capacity(100).unwrap();
        for i in 0..100 {
            heap.insert(format!("v{}", i), (i * 37) % 100).unwrap();
            heap.check_invariants();
        }
        for expected in (0..100).rev() {
            assert_eq!(heap.pop_max().unwrap().priority(), expected);
            heap.check_invariants();
        }
        assert_eq!(heap.pop_max(), Err(QueueError::EmptyQueue));
    }

    #[test]
    fn test_take_keeps_capacity() {
        let mut heap = BinaryQueue::with_capacity(4).unwrap();
        heap.insert("a", 1).unwrap();
        let moved = heap.take();
        assert!(heap.is_empty());
        assert_eq!(heap.capacity(), 4);
        assert_eq!(moved.len(), 1);
    }

    #[test]
    fn test_display() {
        let mut heap = BinaryQueue::with_capacity(2).unwrap();
        assert_eq!(heap.to_string(), "binary heap (0/2):\n  [empty]\n");
        heap.insert("a", 4).unwrap();
        assert_eq!(heap.to_string(), "binary heap (1/2):\n  [0] 4: a\n");
    }
}
