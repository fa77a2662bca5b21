//! The closed set of queue engines

use crate::error::QueueError;
use std::fmt;
use std::str::FromStr;

/// Tag identifying one of the six queue engines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueueKind {
    /// [`BinaryQueue`](crate::binary::BinaryQueue)
    Binary,
    /// [`BinomialQueue`](crate::binomial::BinomialQueue)
    Binomial,
    /// [`FibonacciQueue`](crate::fibonacci::FibonacciQueue)
    Fibonacci,
    /// [`LeftistQueue`](crate::leftist::LeftistQueue)
    Leftist,
    /// [`SkewQueue`](crate::skew::SkewQueue)
    Skew,
    /// [`TreapQueue`](crate::treap::TreapQueue)
    Treap,
}

impl QueueKind {
    /// Every engine, in declaration order
    pub const ALL: [QueueKind; 6] = [
        QueueKind::Binary,
        QueueKind::Binomial,
        QueueKind::Fibonacci,
        QueueKind::Leftist,
        QueueKind::Skew,
        QueueKind::Treap,
    ];

    /// Canonical lowercase name
    pub fn name(self) -> &'static str {
        match self {
            QueueKind::Binary => "binary",
            QueueKind::Binomial => "binomial",
            QueueKind::Fibonacci => "fibonacci",
            QueueKind::Leftist => "leftist",
            QueueKind::Skew => "skew",
            QueueKind::Treap => "treap",
        }
    }

    /// Whether the engine is bounded by a capacity fixed at construction
    pub fn has_fixed_capacity(self) -> bool {
        matches!(self, QueueKind::Binary)
    }
}

impl fmt::Display for QueueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for QueueKind {
    type Err = QueueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "binary" | "heap" => Ok(QueueKind::Binary),
            "binomial" => Ok(QueueKind::Binomial),
            "fibonacci" | "fib" => Ok(QueueKind::Fibonacci),
            "leftist" => Ok(QueueKind::Leftist),
            "skew" => Ok(QueueKind::Skew),
            "treap" | "pst" | "priority-search-tree" => Ok(QueueKind::Treap),
            _ => Err(QueueError::UnknownKind(s.to_string())),
        }
    }
}
