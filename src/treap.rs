//! Priority Search Tree implementation
//!
//! A treap-like tree that is simultaneously a binary search tree on an
//! insertion key and a max-heap on priority. Keys come from a per-queue counter
//! that increases on every insert, so the in-order sequence of the tree is the
//! insertion order of its elements.
//!
//! - **Insert**: descend while the new priority does not exceed the current
//!   node's; at the first node it beats, split that subtree at the new key and
//!   hang the halves under the new node.
//! - **Pop-max**: heap order keeps the maximum at the root; the root is
//!   replaced by the priority-ordered merge of its two subtrees.
//!
//! Priorities are caller-chosen rather than random, so balance is not
//! guaranteed: inserting priorities in decreasing order builds a right spine
//! of linear length. Split and merge therefore walk the tree iteratively.
//!
//! # Time Complexity
//!
//! | Operation  | Complexity                                     |
//! |------------|------------------------------------------------|
//! | `insert`   | O(depth), O(log n) expected for random priorities |
//! | `pop_max`  | O(depth)                                       |
//! | `peek_max` | O(1)                                           |
//! | `merge`    | O(m · depth)                                   |

use crate::element::Element;
use crate::error::QueueError;
use crate::kind::QueueKind;
use crate::traits::MaxQueue;
use crate::tree::{Link, Node, Tree};
use log::trace;
use std::fmt;
use std::mem;

type Key = u64;

/// Priority search tree keyed by insertion order
///
/// # Example
///
/// ```rust
/// use rust_mergeable_queues::MaxQueue;
/// use rust_mergeable_queues::treap::TreapQueue;
///
/// let mut queue = TreapQueue::new();
/// queue.insert("Task A", 10).unwrap();
/// queue.insert("Task B", 30).unwrap();
/// queue.insert("Task C", 20).unwrap();
///
/// assert_eq!(queue.peek_max(), Ok("Task B"));
/// assert_eq!(queue.values_in_insertion_order(), ["Task A", "Task B", "Task C"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TreapQueue {
    tree: Tree<Key>,
    len: usize,
    next_key: Key,
}

/// Splits `link` into keys `<= key` and keys `> key`
fn split(link: Link<Key>, key: Key) -> (Link<Key>, Link<Key>) {
    let mut lower: Vec<Box<Node<Key>>> = Vec::new();
    let mut upper: Vec<Box<Node<Key>>> = Vec::new();
    let mut cursor = link;
    while let Some(mut node) = cursor {
        if node.meta <= key {
            cursor = node.right.take();
            lower.push(node);
        } else {
            cursor = node.left.take();
            upper.push(node);
        }
    }

    let mut left = None;
    while let Some(mut node) = lower.pop() {
        node.right = left;
        left = Some(node);
    }
    let mut right = None;
    while let Some(mut node) = upper.pop() {
        node.left = right;
        right = Some(node);
    }
    (left, right)
}

enum Hole {
    Left,
    Right,
}

/// Merges two trees where every key of `a` precedes every key of `b`,
/// keeping the higher priority on top
fn merge_nodes(a: Link<Key>, b: Link<Key>) -> Link<Key> {
    let mut spine: Vec<(Box<Node<Key>>, Hole)> = Vec::new();
    let (mut a, mut b) = (a, b);
    let mut merged = loop {
        match (a, b) {
            (None, rest) | (rest, None) => break rest,
            (Some(mut x), Some(mut y)) => {
                if x.element.priority() > y.element.priority() {
                    a = x.right.take();
                    b = Some(y);
                    spine.push((x, Hole::Right));
                } else {
                    a = Some(x);
                    b = y.left.take();
                    spine.push((y, Hole::Left));
                }
            }
        }
    };

    while let Some((mut node, hole)) = spine.pop() {
        match hole {
            Hole::Left => node.left = merged,
            Hole::Right => node.right = merged,
        }
        merged = Some(node);
    }
    merged
}

impl TreapQueue {
    /// Creates an empty priority search tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Values in insertion (key) order
    pub fn values_in_insertion_order(&self) -> Vec<&str> {
        self.tree
            .in_order()
            .into_iter()
            .map(|node| node.element.value())
            .collect()
    }

    fn insert_keyed(&mut self, element: Element) {
        let key = self.next_key;
        self.next_key += 1;
        let priority = element.priority();
        let mut new_node = Node::leaf(element, key);

        let mut slot = &mut self.tree.root;
        while matches!(slot.as_deref(), Some(node) if priority <= node.element.priority()) {
            let Some(node) = slot else {
                break;
            };
            slot = if key < node.meta {
                &mut node.left
            } else {
                &mut node.right
            };
        }

        let (left, right) = split(slot.take(), key);
        trace!(
            "treap insert key {}: split {} / {}",
            key,
            left.is_some(),
            right.is_some()
        );
        new_node.left = left;
        new_node.right = right;
        *slot = Some(new_node);
        self.len += 1;
    }

    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        let nodes = self.tree.in_order();
        assert_eq!(nodes.len(), self.len);
        for pair in nodes.windows(2) {
            assert!(pair[0].meta < pair[1].meta, "keys out of order");
        }
        for node in &nodes {
            assert!(node.meta < self.next_key);
            for child in [&node.left, &node.right].into_iter().flatten() {
                assert!(node.element.priority() >= child.element.priority());
            }
        }
    }
}

impl MaxQueue for TreapQueue {
    const KIND: QueueKind = QueueKind::Treap;

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
        self.insert_keyed(element);
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

    /// Re-inserts every element of `other`, in its insertion order, under
    /// fresh keys from this queue's counter.
    fn merge(&mut self, other: &mut Self) -> Result<(), QueueError> {
        let drained = other.take().tree.into_in_order();
        for (element, _) in drained {
            self.insert_keyed(element);
        }
        Ok(())
    }

    fn merge_in_place(&mut self, other: &Self) -> Result<(), QueueError> {
        for node in other.tree.in_order() {
            self.insert_keyed(node.element.clone());
        }
        Ok(())
    }

    /// Builds a fresh tree: `self`'s elements first, then `other`'s, each in
    /// insertion order.
    fn meld(&self, other: &Self) -> Self {
        let mut result = Self::new();
        for node in self.tree.in_order().into_iter().chain(other.tree.in_order()) {
            result.insert_keyed(node.element.clone());
        }
        result
    }

    fn take(&mut self) -> Self {
        mem::take(self)
    }
}

impl fmt::Display for TreapQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "treap ({}, height {}):", self.len, self.height())?;
        if self.is_empty() {
            return writeln!(f, "  [empty]");
        }
        self.tree
            .render(f, |node| format!("[key {}, {}]", node.meta, node.element))
    }
}
