//! Runtime queue configuration
//!
//! A [`QueueConfig`] names an engine and, for the bounded binary heap, its
//! capacity. It can be built in code or parsed from a short string:
//!
//! | Input           | Result                                 |
//! |-----------------|----------------------------------------|
//! | `"skew"`        | skew heap                              |
//! | `"FIB"`         | Fibonacci heap (names are case-insensitive) |
//! | `"binary"`      | binary heap with [`DEFAULT_CAPACITY`]  |
//! | `"binary:64"`   | binary heap holding at most 64 elements |
//!
//! # Example
//!
//! ```rust
//! use rust_mergeable_queues::{QueueConfig, QueueKind};
//!
//! let config: QueueConfig = "binary:2".parse().unwrap();
//! assert_eq!(config.kind(), QueueKind::Binary);
//!
//! let mut queue = config.build().unwrap();
//! queue.insert("a", 1).unwrap();
//! queue.insert("b", 2).unwrap();
//! assert!(queue.insert("c", 3).is_err());
//! ```

use crate::any::AnyQueue;
use crate::binary::BinaryQueue;
use crate::error::QueueError;
use crate::kind::QueueKind;
use log::debug;
use std::fmt;
use std::str::FromStr;

/// Capacity given to binary heaps when none is configured
pub const DEFAULT_CAPACITY: usize = 1024;

/// Which engine to build, and with what capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueConfig {
    kind: QueueKind,
    capacity: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self::new(QueueKind::Binary)
    }
}

impl QueueConfig {
    /// Configuration for `kind` with the default capacity
    pub fn new(kind: QueueKind) -> Self {
        Self {
            kind,
            capacity: DEFAULT_CAPACITY,
        }
    }

    /// Sets the capacity used when the engine is a binary heap
    ///
    /// Unbounded engines ignore it. Zero is accepted here and rejected by
    /// [`build`](Self::build).
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// The configured engine
    pub fn kind(&self) -> QueueKind {
        self.kind
    }

    /// The configured capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Builds an empty queue
    ///
    /// # Errors
    /// [`QueueError::InvalidCapacity`] if the engine is a binary heap and the
    /// capacity is zero.
    pub fn build(&self) -> Result<AnyQueue, QueueError> {
        debug!("building {} queue (capacity {})", self.kind, self.capacity);
        match self.kind {
            QueueKind::Binary => BinaryQueue::with_capacity(self.capacity).map(AnyQueue::from),
            kind => Ok(AnyQueue::new(kind)),
        }
    }
}

impl fmt::Display for QueueConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind.has_fixed_capacity() {
            write!(f, "{}:{}", self.kind, self.capacity)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

impl FromStr for QueueConfig {
    type Err = QueueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, capacity) = match s.split_once(':') {
            Some((name, capacity)) => (name, Some(capacity)),
            None => (s, None),
        };
        let config = QueueConfig::new(name.parse()?);
        let Some(capacity) = capacity else {
            return Ok(config);
        };
        if !config.kind.has_fixed_capacity() {
            debug!("capacity given for unbounded {} queue", config.kind);
            return Err(QueueError::InvalidCapacity);
        }
        match capacity.trim().parse::<usize>() {
            Ok(n) if n > 0 => Ok(config.with_capacity(n)),
            _ => Err(QueueError::InvalidCapacity),
        }
    }
}
