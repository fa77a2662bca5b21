//! Mergeable Max-Priority Queues for Rust
//!
//! This crate provides six interchangeable max-priority queue engines behind a
//! single contract, [`MaxQueue`]. Every engine stores [`Element`]s (a non-empty
//! string value with an integer priority) and serves the greatest priority
//! first.
//!
//! # Features
//!
//! - **Binary Heap**: fixed-capacity array heap; O(log n) insert and pop
//! - **Binomial Heap**: forest of binomial trees; O(log n) insert, pop and merge
//! - **Fibonacci Heap**: O(1) amortized insert and merge; O(log n) amortized pop;
//!   O(1) amortized `increase_priority` through handles
//! - **Leftist Heap**: rank-balanced merge along the right spine; O(log n) merge
//! - **Skew Heap**: self-adjusting leftist heap; O(log n) amortized merge
//! - **Priority Search Tree**: treap keyed by insertion order, heap-ordered by
//!   priority
//!
//! Engines can be used directly, or chosen at runtime through [`AnyQueue`] and
//! [`QueueConfig`]. Combining two queues of different engines through
//! [`AnyQueue`] fails with [`QueueError::IncompatibleKind`].
//!
//! # Example
//!
//! ```rust
//! use rust_mergeable_queues::fibonacci::FibonacciQueue;
//! use rust_mergeable_queues::MaxQueue;
//!
//! let mut heap = FibonacciQueue::new();
//! heap.insert("Task A", 10).unwrap();
//! heap.insert("Task B", 30).unwrap();
//!
//! let mut other = FibonacciQueue::new();
//! other.insert("Task C", 20).unwrap();
//!
//! heap.merge_in_place(&other).unwrap();
//! assert_eq!(heap.len(), 3);
//! assert_eq!(other.len(), 1);
//! assert_eq!(heap.peek_max(), Ok("Task B"));
//! ```
//!
//! # Logging
//!
//! Rejected operations are reported at `debug` level and structural events
//! (consolidation, splits) at `trace` level through the [`log`] facade.

pub mod any;
pub mod binary;
pub mod binomial;
pub mod config;
pub mod element;
pub mod error;
pub mod fibonacci;
pub mod kind;
pub mod leftist;
pub mod skew;
pub mod traits;
pub mod treap;
mod tree;

// Re-export the main types for convenience
pub use any::AnyQueue;
pub use config::QueueConfig;
pub use element::{Element, Priority};
pub use error::QueueError;
pub use kind::QueueKind;
pub use traits::MaxQueue;
