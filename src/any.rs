//! Runtime-selected queue engine
//!
//! [`AnyQueue`] is a closed tagged union over the six engines. Every contract
//! operation is forwarded to the wrapped engine. Binary operations (`merge`,
//! `merge_in_place`, `meld`) compare the two tags first and fail with
//! [`QueueError::IncompatibleKind`] before touching either operand when they
//! differ.
//!
//! # Example
//!
//! ```rust
//! use rust_mergeable_queues::{AnyQueue, QueueError, QueueKind};
//!
//! let mut skew = AnyQueue::new(QueueKind::Skew);
//! skew.insert("a", 1).unwrap();
//! let leftist = AnyQueue::new(QueueKind::Leftist);
//!
//! assert_eq!(
//!     skew.merge_in_place(&leftist),
//!     Err(QueueError::IncompatibleKind {
//!         expected: QueueKind::Skew,
//!         found: QueueKind::Leftist,
//!     })
//! );
//! assert_eq!(skew.len(), 1);
//! ```

use crate::binary::BinaryQueue;
use crate::binomial::BinomialQueue;
use crate::config::DEFAULT_CAPACITY;
use crate::element::{Element, Priority};
use crate::error::QueueError;
use crate::fibonacci::FibonacciQueue;
use crate::kind::QueueKind;
use crate::leftist::LeftistQueue;
use crate::skew::SkewQueue;
use crate::traits::MaxQueue;
use crate::treap::TreapQueue;
use log::debug;
use std::fmt;

/// One of the six queue engines, chosen at runtime
#[derive(Debug, Clone)]
pub enum AnyQueue {
    /// Fixed-capacity binary heap
    Binary(BinaryQueue),
    /// Binomial heap
    Binomial(BinomialQueue),
    /// Fibonacci heap
    Fibonacci(FibonacciQueue),
    /// Leftist heap
    Leftist(LeftistQueue),
    /// Skew heap
    Skew(SkewQueue),
    /// Priority search tree
    Treap(TreapQueue),
}

/// Forwards a call to whichever engine is wrapped
macro_rules! dispatch {
    ($queue:expr, $inner:ident => $body:expr) => {
        match $queue {
            AnyQueue::Binary($inner) => $body,
            AnyQueue::Binomial($inner) => $body,
            AnyQueue::Fibonacci($inner) => $body,
            AnyQueue::Leftist($inner) => $body,
            AnyQueue::Skew($inner) => $body,
            AnyQueue::Treap($inner) => $body,
        }
    };
}

/// Pairs two queues of the same engine, or reports the mismatch
macro_rules! same_kind {
    ($lhs:expr, $rhs:expr, ($a:ident, $b:ident) => $body:expr) => {
        match ($lhs, $rhs) {
            (AnyQueue::Binary($a), AnyQueue::Binary($b)) => Ok($body),
            (AnyQueue::Binomial($a), AnyQueue::Binomial($b)) => Ok($body),
            (AnyQueue::Fibonacci($a), AnyQueue::Fibonacci($b)) => Ok($body),
            (AnyQueue::Leftist($a), AnyQueue::Leftist($b)) => Ok($body),
            (AnyQueue::Skew($a), AnyQueue::Skew($b)) => Ok($body),
            (AnyQueue::Treap($a), AnyQueue::Treap($b)) => Ok($body),
            (lhs, rhs) => Err(AnyQueue::mismatch(lhs.kind(), rhs.kind())),
        }
    };
}

impl AnyQueue {
    /// Creates an empty queue of the given kind
    ///
    /// A binary heap gets [`DEFAULT_CAPACITY`]; use
    /// [`QueueConfig`](crate::config::QueueConfig) to choose another.
    pub fn new(kind: QueueKind) -> Self {
        match kind {
            QueueKind::Binary => AnyQueue::Binary(BinaryQueue::empty(DEFAULT_CAPACITY)),
            QueueKind::Binomial => AnyQueue::Binomial(BinomialQueue::new()),
            QueueKind::Fibonacci => AnyQueue::Fibonacci(FibonacciQueue::new()),
            QueueKind::Leftist => AnyQueue::Leftist(LeftistQueue::new()),
            QueueKind::Skew => AnyQueue::Skew(SkewQueue::new()),
            QueueKind::Treap => AnyQueue::Treap(TreapQueue::new()),
        }
    }

    fn mismatch(expected: QueueKind, found: QueueKind) -> QueueError {
        debug!("rejecting merge of {} queue into {} queue", found, expected);
        QueueError::IncompatibleKind { expected, found }
    }

    /// Tag of the wrapped engine
    pub fn kind(&self) -> QueueKind {
        dispatch!(self, q => q.kind())
    }

    /// Returns true if the queue holds no elements
    pub fn is_empty(&self) -> bool {
        dispatch!(self, q => q.is_empty())
    }

    /// Returns the number of stored elements
    pub fn len(&self) -> usize {
        dispatch!(self, q => q.len())
    }

    /// Height of the wrapped structure
    pub fn height(&self) -> usize {
        dispatch!(self, q => q.height())
    }

    /// Inserts `value` with `priority`; see [`MaxQueue::insert`]
    pub fn insert(&mut self, value: impl Into<String>, priority: Priority) -> Result<(), QueueError> {
        let element = Element::new(value, priority)?;
        dispatch!(self, q => q.push_element(element))
    }

    /// See [`MaxQueue::peek_entry`]
    pub fn peek_entry(&self) -> Result<&Element, QueueError> {
        dispatch!(self, q => q.peek_entry())
    }

    /// See [`MaxQueue::peek_max`]
    pub fn peek_max(&self) -> Result<&str, QueueError> {
        dispatch!(self, q => q.peek_max())
    }

    /// See [`MaxQueue::pop_max`]
    pub fn pop_max(&mut self) -> Result<Element, QueueError> {
        dispatch!(self, q => q.pop_max())
    }

    /// See [`MaxQueue::extract_max`]
    pub fn extract_max(&mut self) -> Result<(), QueueError> {
        dispatch!(self, q => q.extract_max())
    }

    /// Absorbs a copy of `other`'s elements
    ///
    /// # Errors
    /// - [`QueueError::IncompatibleKind`] if `other` wraps a different engine
    /// - [`QueueError::Capacity`] if a binary heap cannot hold the union
    pub fn merge_in_place(&mut self, other: &AnyQueue) -> Result<(), QueueError> {
        same_kind!(self, other, (a, b) => a.merge_in_place(b))?
    }

    /// Moves every element of `other` into `self`, leaving `other` empty
    ///
    /// # Errors
    /// Same as [`merge_in_place`](Self::merge_in_place). On error neither
    /// queue is changed.
    pub fn merge(&mut self, other: &mut AnyQueue) -> Result<(), QueueError> {
        same_kind!(self, other, (a, b) => a.merge(b))?
    }

    /// Returns a new queue holding copies of both operands' elements
    ///
    /// # Errors
    /// [`QueueError::IncompatibleKind`] if the operands wrap different engines.
    pub fn meld(&self, other: &AnyQueue) -> Result<AnyQueue, QueueError> {
        same_kind!(self, other, (a, b) => AnyQueue::from(a.meld(b)))
    }

    /// Moves the contents out, leaving `self` empty with the same engine
    pub fn take(&mut self) -> AnyQueue {
        dispatch!(self, q => AnyQueue::from(q.take()))
    }
}

macro_rules! impl_from_engine {
    ($($engine:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$engine> for AnyQueue {
                fn from(queue: $engine) -> Self {
                    AnyQueue::$variant(queue)
                }
            }
        )*
    };
}

impl_from_engine! {
    BinaryQueue => Binary,
    BinomialQueue => Binomial,
    FibonacciQueue => Fibonacci,
    LeftistQueue => Leftist,
    SkewQueue => Skew,
    TreapQueue => Treap,
}

impl fmt::Display for AnyQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch!(self, q => fmt::Display::fmt(q, f))
    }
}
