//! Leftist Heap implementation
//!
//! A leftist heap is a heap-ordered binary tree in which every node's left
//! subtree has rank at least as large as its right subtree, where the rank of
//! a node is the length of its rightmost path down to an empty subtree. The
//! right spine is therefore at most ⌊log₂(n + 1)⌋ long, and every operation is
//! expressed through one primitive that merges two right spines.
//!
//! # Time Complexity
//!
//! | Operation  | Complexity |
//! |------------|------------|
//! | `insert`   | O(log n)   |
//! | `pop_max`  | O(log n)   |
//! | `peek_max` | O(1)       |
//! | `merge`    | O(log n)   |
//!
//! # Example
//!
//! ```rust
//! use rust_mergeable_queues::MaxQueue;
//! use rust_mergeable_queues::leftist::LeftistQueue;
//!
//! let mut a = LeftistQueue::new();
//! a.insert("a", 3).unwrap();
//! let mut b = LeftistQueue::new();
//! b.insert("b", 8).unwrap();
//!
//! a.merge_in_place(&b).unwrap();
//! assert_eq!(a.peek_max(), Ok("b"));
//! assert_eq!(b.len(), 1);
//! ```

use crate::element::Element;
use crate::error::QueueError;
use crate::kind::QueueKind;
use crate::traits::MaxQueue;
use crate::tree::{Link, Node, Tree};
use std::fmt;
use std::mem;

type Rank = usize;

/// Leftist Heap
#[derive(Debug, Clone, Default)]
pub struct LeftistQueue {
    tree: Tree<Rank>,
    len: usize,
}

fn rank(link: &Link<Rank>) -> Rank {
    link.as_ref().map_or(0, |node| node.meta)
}

/// Merges two leftist trees along their right spines
///
/// The larger root wins and its right subtree is merged with the other tree.
/// Walking down records the winners; walking back up re-attaches each result
/// as a right child, swaps children where the leftist property would break and
/// recomputes ranks.
fn merge_nodes(a: Link<Rank>, b: Link<Rank>) -> Link<Rank> {
    let mut spine: Vec<Box<Node<Rank>>> = Vec::new();
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
                a = top.right.take();
                b = Some(other);
                spine.push(top);
            }
        }
    };

    while let Some(mut node) = spine.pop() {
        node.right = merged;
        if rank(&node.left) < rank(&node.right) {
            mem::swap(&mut node.left, &mut node.right);
        }
        node.meta = rank(&node.right) + 1;
        merged = Some(node);
    }
    merged
}

impl LeftistQueue {
    /// Creates an empty leftist heap
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        let mut count = 0;
        let mut stack: Vec<&Node<Rank>> = self.tree.root.as_deref().into_iter().collect();
        while let Some(node) = stack.pop() {
            count += 1;
            assert!(rank(&node.left) >= rank(&node.right), "leftist property");
            assert_eq!(node.meta, rank(&node.right) + 1, "stale rank");
            for child in [&node.left, &node.right].into_iter().flatten() {
                assert!(node.element.priority() >= child.element.priority());
                stack.push(child);
            }
        }
        assert_eq!(count, self.len);
    }
}

impl MaxQueue for LeftistQueue {
    const KIND: QueueKind = QueueKind::Leftist;

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
        self.tree.root = merge_nodes(root, Some(Node::leaf(element, 1)));
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

impl fmt::Display for LeftistQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "leftist heap ({}):", self.len)?;
        if self.is_empty() {
            return writeln!(f, "  [empty]");
        }
        self.tree
            .render(f, |node| format!("[{}, rank={}]", node.element, node.meta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        let mut heap = LeftistQueue::new();
        assert!(heap.is_empty());
        assert_eq!(heap.peek_max(), Err(QueueError::EmptyQueue));

        heap.insert("Task A", 10).unwrap();
        heap.insert("Task B", 30).unwrap();
        heap.insert("Task C", 20).unwrap();
        heap.insert("Task D", 40).unwrap();
        heap.check_invariants();

        assert_eq!(heap.len(), 4);
        assert_eq!(heap.peek_max(), Ok("Task D"));
        heap.extract_max().unwrap();
        assert_eq!(heap.peek_max(), Ok("Task B"));
        heap.check_invariants();
    }

    #[test]
    fn test_rejects_empty_value() {
        let mut heap = LeftistQueue::new();
        assert_eq!(heap.insert("", 1), Err(QueueError::InvalidInput));
        assert!(heap.is_empty());
    }

    #[test]
    fn test_right_spine_is_logarithmic() {
        let mut heap = LeftistQueue::new();
        for i in 0..1023 {
            heap.insert("x", i).unwrap();
        }
        heap.check_invariants();
        let root = heap.tree.root.as_ref().unwrap();
        assert!(root.meta <= 10);
    }

    #[test]
    fn test_merge_in_place_copies() {
        let mut a = LeftistQueue::new();
        let mut b = LeftistQueue::new();
        for i in 0..10 {
            a.insert(format!("a{}", i), i * 2).unwrap();
            b.insert(format!("b{}", i), i * 2 + 1).unwrap();
        }
        a.merge_in_place(&b).unwrap();
        a.check_invariants();
        b.check_invariants();
        assert_eq!(a.len(), 20);
        assert_eq!(b.len(), 10);
        assert_eq!(a.peek_max(), Ok("b9"));
    }

    #[test]
    fn test_merge_consumes() {
        let mut a = LeftistQueue::new();
        a.insert("a", 1).unwrap();
        let mut b = LeftistQueue::new();
        b.insert("b", 2).unwrap();
        a.merge(&mut b).unwrap();
        assert!(b.is_empty());
        assert_eq!(a.len(), 2);
        a.check_invariants();
    }

    #[test]
    fn test_display_shows_rank() {
        let mut heap = LeftistQueue::new();
        heap.insert("a", 5).unwrap();
        heap.insert("b", 3).unwrap();
        assert_eq!(
            heap.to_string(),
            "leftist heap (2):\n[5: a, rank=1]\n    [3: b, rank=1]\n"
        );
    }
}
