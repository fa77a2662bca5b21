//! The shared contract implemented by every queue engine
//!
//! [`MaxQueue`] is a max-priority queue over [`Element`]s: the element with the
//! numerically greatest priority is served first. Callers that only need the
//! contract should be generic over `Q: MaxQueue`; callers that need to pick an
//! engine at runtime use [`AnyQueue`](crate::any::AnyQueue).
//!
//! # Copy and move
//!
//! Copying a queue is always explicit: `Clone` performs a deep copy of every
//! node. [`MaxQueue::take`] is the destructive move; it hands the structure
//! over and leaves the source empty but usable.
//!
//! # Merging
//!
//! - [`MaxQueue::merge_in_place`] copies `other` and leaves it untouched.
//! - [`MaxQueue::merge`] moves the contents of `other` over, letting engines
//!   splice structure instead of copying it; `other` is left empty.
//! - [`MaxQueue::meld`] builds a new, independent queue from two untouched inputs.
//!
//! # Example
//!
//! ```rust
//! use rust_mergeable_queues::MaxQueue;
//! use rust_mergeable_queues::leftist::LeftistQueue;
//!
//! let mut queue = LeftistQueue::new();
//! queue.insert("low", 1).unwrap();
//! queue.insert("high", 9).unwrap();
//!
//! assert_eq!(queue.peek_max(), Ok("high"));
//! queue.extract_max().unwrap();
//! assert_eq!(queue.peek_max(), Ok("low"));
//! ```

use crate::element::{Element, Priority};
use crate::error::QueueError;
use crate::kind::QueueKind;

/// Mergeable max-priority queue
pub trait MaxQueue: Clone {
    /// Tag of the concrete engine
    const KIND: QueueKind;

    /// Returns the engine tag of this queue
    fn kind(&self) -> QueueKind {
        Self::KIND
    }

    /// Returns true if the queue holds no elements
    fn is_empty(&self) -> bool;

    /// Returns the number of stored elements
    fn len(&self) -> usize;

    /// Height of the underlying structure
    ///
    /// For forests this is the height of the tallest tree; for the array heap
    /// it is the height of the implicit complete binary tree. Empty queues
    /// report zero.
    fn height(&self) -> usize;

    /// Stores an already validated element
    ///
    /// # Errors
    /// [`QueueError::Capacity`] if the engine is bounded and full.
    fn push_element(&mut self, element: Element) -> Result<(), QueueError>;

    /// Inserts `value` with `priority`
    ///
    /// # Errors
    /// - [`QueueError::InvalidInput`] if `value` is empty
    /// - [`QueueError::Capacity`] if the engine is bounded and full
    fn insert(&mut self, value: impl Into<String>, priority: Priority) -> Result<(), QueueError> {
        self.push_element(Element::new(value, priority)?)
    }

    /// Returns the maximum-priority element without removing it
    ///
    /// # Errors
    /// [`QueueError::EmptyQueue`] if there are no elements.
    fn peek_entry(&self) -> Result<&Element, QueueError>;

    /// Returns the value of the maximum-priority element
    ///
    /// # Errors
    /// [`QueueError::EmptyQueue`] if there are no elements.
    fn peek_max(&self) -> Result<&str, QueueError> {
        self.peek_entry().map(Element::value)
    }

    /// Removes and returns the maximum-priority element
    ///
    /// # Errors
    /// [`QueueError::EmptyQueue`] if there are no elements.
    fn pop_max(&mut self) -> Result<Element, QueueError>;

    /// Removes the maximum-priority element, discarding it
    ///
    /// # Errors
    /// [`QueueError::EmptyQueue`] if there are no elements.
    fn extract_max(&mut self) -> Result<(), QueueError> {
        self.pop_max().map(drop)
    }

    /// Moves every element of `other` into `self`, leaving `other` empty
    ///
    /// # Errors
    /// [`QueueError::Capacity`] if a bounded engine cannot hold the union; in
    /// that case neither queue is changed.
    fn merge(&mut self, other: &mut Self) -> Result<(), QueueError>;

    /// Absorbs a copy of every element of `other`; `other` is left untouched
    ///
    /// # Errors
    /// [`QueueError::Capacity`] if a bounded engine cannot hold the union; in
    /// that case `self` is unchanged.
    fn merge_in_place(&mut self, other: &Self) -> Result<(), QueueError> {
        self.merge(&mut other.clone())
    }

    /// Returns a new queue holding copies of the elements of `self` and `other`
    fn meld(&self, other: &Self) -> Self;

    /// Moves the contents out, leaving `self` empty
    fn take(&mut self) -> Self;

    /// Removes every element
    fn clear(&mut self) {
        drop(self.take());
    }
}
