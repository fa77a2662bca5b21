//! Queue element: a priority paired with an opaque text payload

use crate::error::QueueError;
use std::fmt;

/// Priority type used by every engine. Larger values are served first.
pub type Priority = i64;

/// A stored (priority, value) pair
///
/// Elements are immutable once constructed. Engines relink the nodes that hold
/// them but never rewrite an element in place.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Element {
    priority: Priority,
    value: String,
}

impl Element {
    /// Creates an element, rejecting an empty value with [`QueueError::InvalidInput`]
    pub fn new(value: impl Into<String>, priority: Priority) -> Result<Self, QueueError> {
        let value = value.into();
        if value.is_empty() {
            return Err(QueueError::InvalidInput);
        }
        Ok(Self { priority, value })
    }

    /// The element's priority
    #[inline]
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// The element's value
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// A copy of this element carrying a different priority
    pub(crate) fn with_priority(&self, priority: Priority) -> Self {
        Self {
            priority,
            value: self.value.clone(),
        }
    }

    /// Consumes the element, returning its value
    pub fn into_value(self) -> String {
        self.value
    }

    /// Consumes the element, returning `(priority, value)`
    pub fn into_parts(self) -> (Priority, String) {
        (self.priority, self.value)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.priority, self.value)
    }
}
