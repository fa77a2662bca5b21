//! Skew Heap implementation
//!
//! A skew heap is the self-adjusting relative of the leftist heap: the same
//! right-spine merge, but with no rank bookkeeping. After every merge step the
//! children of the winning node are swapped unconditionally, which keeps the
//! right spine short in the amortized sense.
//!
//! Individual trees can still reach linear height (for example after a run of
//! inserts in increasing priority order), so the merge is written as a loop
//! over an explicit spine rather than a recursion on depth.
//!
//! # Time Complexity
//!
//! | Operation  | Complexity         |
//! |------------|--------------------|
//! | `insert`   | O(log n) amortized |
//! | `pop_max`  | O(log n) amortized |
//! | `peek_max` | O(1)               |
//! | `merge`    | O(log n) amortized |

use crate::element::Element;
use crate::error::QueueError;
use crate::kind::QueueKind;
use crate::traits::MaxQueue;
use crate::tree::{Link, Node, Tree};
use std::fmt;
use std::mem;

/// Skew Heap
///
/// # Example
///
/// ```rust
/// use rust_mergeable_queues::MaxQueue;
/// use rust_mergeable_queues::skew::SkewQueue;
///
/// let mut heap = SkewQueue::new();
/// for (value, priority) in [("a", 10), ("b", 30), ("c", 20)] {
///     heap.insert(value, priority).unwrap();
/// }
/// assert_eq!(heap.peek_max(), Ok("b"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SkewQueue {
    tree: Tree<()>,
    len: usize,
}

fn merge_nodes(a: Link<()>, b: Link<()>) -> Link<()> {
    let mut spine: Vec<Box<Node<()>>> = Vec::new();
    let (mut a, mut b) = (a, b);
    let mut merged = loop {
        match (a, b) {
            (None, rest) | (rest, None) => break rest,
            (Some(x), Some(y)) => {
                let (mut top, other) = if x.element.priority() >= y.element.priority() {
                    (x, y)
                } else {
                    (y, x)
                };
                // The old left child moves right; the merge result becomes the new left.
                a = top.right.take();
                top.right = top.left.take();
                b = Some(other);
                spine.push(top);
            }
        }
    };

    while let Some(mut node) = spine.pop() {
        node.left = merged;
        merged = Some(node);
    }
    merged
}

impl SkewQueue {
    /// Creates an empty skew heap
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        let mut count = 0;
        let mut stack: Vec<&Node<()>> = self.tree.root.as_deref().into_iter().collect();
        while let Some(node) = stack.pop() {
            count += 1;
            for child in [&node.left, &node.right].into_iter().flatten() {
                assert!(node.element.priority() >= child.element.priority());
                stack.push(child);
            }
        }
        assert_eq!(count, self.len);
    }
}

impl MaxQueue for SkewQueue {
    const KIND: QueueKind = QueueKind::Skew;

    fn is_empty(&self) -> bool {
        self.tree.root.is_none()
    }

    fn len(&self) -> usize {
        self.len
    }

    fn height(&self) -> usize {
        self.tree.height()
    }

    fn push_element(&mut self, element: Element) -> Result<(), QueueError> {
        let root = self.tree.root.take();
        self.tree.root = merge_nodes(root, Some(Node::leaf(element, ())));
        self.len += 1;
        Ok(())
    }

    fn peek_entry(&self) -> Result<&Element, QueueError> {
        self.tree
            .root
            .as_ref()
            .map(|node| &node.element)
            .ok_or(QueueError::EmptyQueue)
    }

    fn pop_max(&mut self) -> Result<Element, QueueError> {
        let mut root = self.tree.root.take().ok_or(QueueError::EmptyQueue)?;
        self.tree.root = merge_nodes(root.left.take(), root.right.take());
        self.len -= 1;
        Ok(root.element)
    }

    fn merge(&mut self, other: &mut Self) -> Result<(), QueueError> {
        let root = self.tree.root.take();
        self.tree.root = merge_nodes(root, other.tree.root.take());
        self.len += mem::take(&mut other.len);
        Ok(())
    }

    fn meld(&self, other: &Self) -> Self {
        let mut result = self.clone();
        let mut copy = other.tree.clone();
        result.tree.root = merge_nodes(result.tree.root.take(), copy.root.take());
        result.len += other.len;
        result
    }

    fn take(&mut self) -> Self {
        mem::take(self)
    }
}

impl fmt::Display for SkewQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "skew heap ({}, height {}):", self.len, self.height())?;
        if self.is_empty() {
            return writeln!(f, "  [empty]");
        }
        self.tree.render(f, |node| format!("[{}]", node.element))
    }
}
