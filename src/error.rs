//! Error type shared by every queue engine
//!
//! Every fallible operation validates its input before touching the queue, so
//! an `Err` always leaves the receiver exactly as it was before the call.

use crate::kind::QueueKind;
use thiserror::Error;

/// Error type for queue operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    /// The value payload was empty
    #[error("value must be a non-empty string")]
    InvalidInput,
    /// `peek_max`/`extract_max` on a queue with no elements
    #[error("queue is empty")]
    EmptyQueue,
    /// Insert or merge would exceed the fixed capacity of a binary heap
    #[error("queue is full (capacity {capacity})")]
    Capacity {
        /// The fixed capacity that would have been exceeded
        capacity: usize,
    },
    /// Merge or meld between two different concrete engines
    #[error("incompatible queue kinds: cannot combine {found} into {expected}")]
    IncompatibleKind {
        /// Kind of the receiving queue
        expected: QueueKind,
        /// Kind of the queue that was passed in
        found: QueueKind,
    },
    /// A binary heap was constructed with capacity zero
    #[error("capacity must be greater than zero")]
    InvalidCapacity,
    /// A queue kind name could not be parsed
    #[error("unknown queue kind `{0}`")]
    UnknownKind(String),
    /// The handle no longer refers to an element of this queue
    #[error("handle is no longer valid (element was removed)")]
    InvalidHandle,
    /// The new priority is not greater than the current priority
    #[error("new priority is not greater than current priority")]
    PriorityNotIncreased,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(QueueError::EmptyQueue.to_string(), "queue is empty");
        assert_eq!(
            QueueError::Capacity { capacity: 5 }.to_string(),
            "queue is full (capacity 5)"
        );
        let err = QueueError::IncompatibleKind {
            expected: QueueKind::Leftist,
            found: QueueKind::Skew,
        };
        assert_eq!(
            err.to_string(),
            "incompatible queue kinds: cannot combine skew into leftist"
        );
    }
}
