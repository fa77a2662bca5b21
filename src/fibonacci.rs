//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a data structure for priority queue operations with:
//! - O(1) insert
//! - O(log n) amortized pop_max
//! - O(1) root-list splice on merge
//!
//! The structure consists of a collection of heap-ordered trees. Roots are linked
//! in a circular doubly linked list, and so is every node's set of children. The
//! heap keeps a pointer to the maximum root. All consolidation is deferred to
//! `pop_max`.
//!
//! # Storage
//!
//! Nodes live in a [`SlotMap`] arena and refer to each other by key, so the
//! circular lists never hold raw or reference-counted pointers. Parent keys are
//! non-owning and only used to walk upwards during a cut.
//!
//! Arena keys are local to one arena. Merging two heaps moves the nodes of the
//! smaller arena into the larger one under fresh keys, which costs O(min(n, m))
//! moves before the O(1) splice.
//!
//! # Cuts
//!
//! [`FibonacciQueue::increase_priority`] is the max-heap counterpart of
//! decrease-key. It is specific to this engine and not part of
//! [`MaxQueue`]; it cuts the node to the root list and performs the usual
//! cascading cut through marked ancestors.

use crate::element::{Element, Priority};
use crate::error::QueueError;
use crate::kind::QueueKind;
use crate::traits::MaxQueue;
use log::trace;
use slotmap::{new_key_type, SecondaryMap, SlotMap};
use smallvec::SmallVec;
use std::fmt;
use std::mem;
use std::sync::atomic::{AtomicU64, Ordering};

new_key_type! {
    /// Arena key of a Fibonacci heap node
    struct NodeKey;
}

static NEXT_HEAP_ID: AtomicU64 = AtomicU64::new(0);

fn next_heap_id() -> u64 {
    NEXT_HEAP_ID.fetch_add(1, Ordering::Relaxed)
}

/// Handle to an element in a Fibonacci heap
///
/// A handle stays valid until its element is popped. It is tied to the heap
/// that issued it and follows that heap through `take`. A clone is a different
/// heap and rejects it.
///
/// Merging keeps the handles of whichever side had more nodes; the other
/// side's nodes are re-keyed and its handles are rejected from then on.
/// Rejected handles report [`QueueError::InvalidHandle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FibonacciHandle {
    heap: u64,
    key: NodeKey,
}

#[derive(Debug, Clone)]
struct Node {
    element: Element,
    degree: usize,
    marked: bool,
    parent: Option<NodeKey>,
    child: Option<NodeKey>,
    left: NodeKey,
    right: NodeKey,
}

/// Fibonacci Heap
///
/// # Example
///
/// ```rust
/// use rust_mergeable_queues::MaxQueue;
/// use rust_mergeable_queues::fibonacci::FibonacciQueue;
///
/// let mut heap = FibonacciQueue::new();
/// heap.insert("a", 5).unwrap();
/// let handle = heap.insert_with_handle("b", 1).unwrap();
/// heap.increase_priority(&handle, 9).unwrap();
/// assert_eq!(heap.peek_max(), Ok("b"));
/// ```
#[derive(Debug)]
pub struct FibonacciQueue {
    /// Issuer tag checked against every handle
    id: u64,
    nodes: SlotMap<NodeKey, Node>,
    max: Option<NodeKey>,
}

impl Default for FibonacciQueue {
    fn default() -> Self {
        Self {
            id: next_heap_id(),
            nodes: SlotMap::with_key(),
            max: None,
        }
    }
}

impl Clone for FibonacciQueue {
    fn clone(&self) -> Self {
        Self {
            id: next_heap_id(),
            nodes: self.nodes.clone(),
            max: self.max,
        }
    }
}

impl FibonacciQueue {
    /// Creates an empty Fibonacci heap
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an element and returns a handle for [`increase_priority`](Self::increase_priority)
    ///
    /// # Errors
    /// [`QueueError::InvalidInput`] if `value` is empty.
    pub fn insert_with_handle(
        &mut self,
        value: impl Into<String>,
        priority: Priority,
    ) -> Result<FibonacciHandle, QueueError> {
        let element = Element::new(value, priority)?;
        let key = self.insert_node(element);
        Ok(FibonacciHandle { heap: self.id, key })
    }

    /// Arena key behind `handle`, if this heap issued it
    fn resolve(&self, handle: &FibonacciHandle) -> Option<NodeKey> {
        (handle.heap == self.id).then_some(handle.key)
    }

    /// Returns the element behind `handle`, if it is still in the heap
    pub fn get(&self, handle: &FibonacciHandle) -> Option<&Element> {
        let key = self.resolve(handle)?;
        self.nodes.get(key).map(|node| &node.element)
    }

    /// Raises the priority of the element behind `handle`
    ///
    /// The element is replaced by a copy carrying `new_priority`. If that
    /// breaks heap order with its parent, the node is cut to the root list and
    /// marked ancestors are cut in turn.
    ///
    /// # Errors
    /// - [`QueueError::InvalidHandle`] if the element is no longer in the heap
    ///   or the handle was issued by another heap
    /// - [`QueueError::PriorityNotIncreased`] if `new_priority` is not greater
    ///   than the current priority
    pub fn increase_priority(
        &mut self,
        handle: &FibonacciHandle,
        new_priority: Priority,
    ) -> Result<(), QueueError> {
        let key = self.resolve(handle).ok_or(QueueError::InvalidHandle)?;
        let node = self.nodes.get_mut(key).ok_or(QueueError::InvalidHandle)?;
        if new_priority <= node.element.priority() {
            return Err(QueueError::PriorityNotIncreased);
        }
        node.element = node.element.with_priority(new_priority);

        if let Some(parent) = node.parent {
            if new_priority > self.priority(parent) {
                self.cut(key, parent);
                self.cascading_cut(parent);
            }
        }
        if let Some(max) = self.max {
            if new_priority > self.priority(max) {
                self.max = Some(key);
            }
        }
        Ok(())
    }

    /// Number of trees in the root list
    pub fn root_count(&self) -> usize {
        self.max.map_or(0, |max| self.ring(max).len())
    }

    #[inline]
    fn priority(&self, key: NodeKey) -> Priority {
        self.nodes[key].element.priority()
    }

    fn insert_node(&mut self, element: Element) -> NodeKey {
        let key = self.nodes.insert_with_key(|key| Node {
            element,
            degree: 0,
            marked: false,
            parent: None,
            child: None,
            left: key,
            right: key,
        });
        self.add_root(key);
        key
    }

    /// Keys around the ring containing `start`, beginning at `start`
    fn ring(&self, start: NodeKey) -> Vec<NodeKey> {
        let mut keys = vec![start];
        let mut current = self.nodes[start].right;
        while current != start {
            keys.push(current);
            current = self.nodes[current].right;
        }
        keys
    }

    /// Joins the rings containing `a` and `b` into one ring
    fn splice(&mut self, a: NodeKey, b: NodeKey) {
        let a_left = self.nodes[a].left;
        let b_left = self.nodes[b].left;
        self.nodes[a_left].right = b;
        self.nodes[b].left = a_left;
        self.nodes[b_left].right = a;
        self.nodes[a].left = b_left;
    }

    /// Removes `key` from its ring, leaving it as a ring of one
    fn unlink(&mut self, key: NodeKey) {
        let (left, right) = (self.nodes[key].left, self.nodes[key].right);
        self.nodes[left].right = right;
        self.nodes[right].left = left;
        let node = &mut self.nodes[key];
        node.left = key;
        node.right = key;
    }

    /// Adds a singleton ring to the root list and updates the max pointer
    fn add_root(&mut self, key: NodeKey) {
        match self.max {
            Some(max) => {
                self.splice(max, key);
                if self.priority(key) > self.priority(max) {
                    self.max = Some(key);
                }
            }
            None => self.max = Some(key),
        }
    }

    /// Links root `child` under root `parent`
    fn link(&mut self, child: NodeKey, parent: NodeKey) {
        self.unlink(child);
        let node = &mut self.nodes[child];
        node.parent = Some(parent);
        node.marked = false;
        match self.nodes[parent].child {
            Some(first) => self.splice(first, child),
            None => self.nodes[parent].child = Some(child),
        }
        self.nodes[parent].degree += 1;
    }

    /// Links roots of equal degree until every degree occurs at most once,
    /// then rebuilds the root list and finds the new maximum
    fn consolidate(&mut self, start: NodeKey) {
        let roots = self.ring(start);
        let before = roots.len();
        let mut table: SmallVec<[Option<NodeKey>; 64]> = SmallVec::new();

        for root in roots {
            let mut x = root;
            loop {
                let degree = self.nodes[x].degree;
                if table.len() <= degree {
                    table.resize(degree + 1, None);
                }
                match table[degree].take() {
                    Some(mut y) => {
                        if self.priority(y) > self.priority(x) {
                            mem::swap(&mut x, &mut y);
                        }
                        self.link(y, x);
                    }
                    None => {
                        table[degree] = Some(x);
                        break;
                    }
                }
            }
        }

        self.max = None;
        let mut after = 0;
        for key in table.into_iter().flatten() {
            let node = &mut self.nodes[key];
            node.left = key;
            node.right = key;
            self.add_root(key);
            after += 1;
        }
        trace!("fibonacci consolidate: {} roots -> {}", before, after);
    }

    /// Moves `key` from the child ring of `parent` to the root list
    fn cut(&mut self, key: NodeKey, parent: NodeKey) {
        let next = self.nodes[key].right;
        let p = &mut self.nodes[parent];
        if p.child == Some(key) {
            p.child = if next == key { None } else { Some(next) };
        }
        p.degree -= 1;

        self.unlink(key);
        let node = &mut self.nodes[key];
        node.parent = None;
        node.marked = false;
        self.add_root(key);
    }

    /// Marks `key` on its first lost child; cuts it on the second and repeats upwards
    fn cascading_cut(&mut self, mut key: NodeKey) {
        while let Some(parent) = self.nodes[key].parent {
            if !self.nodes[key].marked {
                self.nodes[key].marked = true;
                return;
            }
            self.cut(key, parent);
            key = parent;
        }
    }

    /// Moves every node of the smaller arena into the larger one and splices
    /// the root lists
    ///
    /// When `other` is larger the two heaps trade places first, so `self`
    /// takes over `other`'s arena and id.
    fn absorb(&mut self, mut other: Self) {
        if other.nodes.len() > self.nodes.len() {
            mem::swap(self, &mut other);
        }
        let Some(other_max) = other.max else {
            return;
        };

        let mut remap: SecondaryMap<NodeKey, NodeKey> =
            SecondaryMap::with_capacity(other.nodes.len());
        for (old, node) in other.nodes.drain() {
            remap.insert(old, self.nodes.insert(node));
        }
        for &new in remap.values() {
            let node = &mut self.nodes[new];
            node.left = remap[node.left];
            node.right = remap[node.right];
            node.parent = node.parent.map(|p| remap[p]);
            node.child = node.child.map(|c| remap[c]);
        }

        let incoming = remap[other_max];
        match self.max {
            Some(max) => {
                self.splice(max, incoming);
                if self.priority(incoming) > self.priority(max) {
                    self.max = Some(incoming);
                }
            }
            None => self.max = Some(incoming),
        }
    }

    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        let Some(max) = self.max else {
            assert!(self.nodes.is_empty());
            return;
        };
        let mut reachable = 0;
        let mut stack = Vec::new();
        for root in self.ring(max) {
            let node = &self.nodes[root];
            assert!(node.parent.is_none());
            assert!(!node.marked, "roots are never marked");
            assert!(self.priority(max) >= node.element.priority());
            stack.push(root);
        }
        while let Some(key) = stack.pop() {
            reachable += 1;
            let node = &self.nodes[key];
            assert_eq!(self.nodes[node.left].right, key);
            assert_eq!(self.nodes[node.right].left, key);
            let children = node.child.map_or_else(Vec::new, |c| self.ring(c));
            assert_eq!(children.len(), node.degree);
            for child in children {
                assert_eq!(self.nodes[child].parent, Some(key));
                assert!(node.element.priority() >= self.priority(child));
                stack.push(child);
            }
        }
        assert_eq!(reachable, self.nodes.len());
    }
}

impl MaxQueue for FibonacciQueue {
    const KIND: QueueKind = QueueKind::Fibonacci;

    fn is_empty(&self) -> bool {
        self.max.is_none()
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn height(&self) -> usize {
        let Some(max) = self.max else {
            return 0;
        };
        let mut stack: Vec<(NodeKey, usize)> = self.ring(max).into_iter().map(|k| (k, 1)).collect();
        let mut height = 0;
        while let Some((key, depth)) = stack.pop() {
            height = height.max(depth);
            if let Some(child) = self.nodes[key].child {
                stack.extend(self.ring(child).into_iter().map(|c| (c, depth + 1)));
            }
        }
        height
    }

    fn push_element(&mut self, element: Element) -> Result<(), QueueError> {
        self.insert_node(element);
        Ok(())
    }

    fn peek_entry(&self) -> Result<&Element, QueueError> {
        self.max
            .map(|max| &self.nodes[max].element)
            .ok_or(QueueError::EmptyQueue)
    }

    fn pop_max(&mut self) -> Result<Element, QueueError> {
        let max = self.max.ok_or(QueueError::EmptyQueue)?;

        // Promote children to the root list
        if let Some(child) = self.nodes[max].child.take() {
            for key in self.ring(child) {
                let node = &mut self.nodes[key];
                node.parent = None;
                node.marked = false;
            }
            self.splice(max, child);
        }

        let next = self.nodes[max].right;
        self.unlink(max);
        let node = self.nodes.remove(max).ok_or(QueueError::EmptyQueue)?;

        if next == max {
            self.max = None;
        } else {
            self.max = Some(next);
            self.consolidate(next);
        }
        Ok(node.element)
    }

    fn merge(&mut self, other: &mut Self) -> Result<(), QueueError> {
        self.absorb(other.take());
        Ok(())
    }

    fn meld(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.absorb(other.clone());
        result
    }

    fn take(&mut self) -> Self {
        mem::take(self)
    }
}

impl fmt::Display for FibonacciQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "fibonacci heap ({}):", self.len())?;
        let Some(max) = self.max else {
            return writeln!(f, "  [empty]");
        };
        for (i, root) in self.ring(max).into_iter().enumerate() {
            writeln!(f, "tree {}:", i + 1)?;
            let mut stack = vec![(root, 1)];
            while let Some((key, depth)) = stack.pop() {
                let node = &self.nodes[key];
                writeln!(
                    f,
                    "{:indent$}[{}, degree {}{}]",
                    "",
                    node.element,
                    node.degree,
                    if node.marked { ", marked" } else { "" },
                    indent = depth * 2
                )?;
                if let Some(child) = node.child {
                    stack.extend(self.ring(child).into_iter().rev().map(|c| (c, depth + 1)));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        let mut heap = FibonacciQueue::new();
        assert!(heap.is_empty());
        assert_eq!(heap.len(), 0);

        heap.insert("a", 5).unwrap();
        heap.insert("b", 3).unwrap();
        heap.insert("c", 7).unwrap();

        assert_eq!(heap.len(), 3);
        assert_eq!(heap.peek_max(), Ok("c"));
        assert_eq!(heap.root_count(), 3);

        let top = heap.pop_max().unwrap();
        assert_eq!(top.value(), "c");
        assert_eq!(heap.peek_max(), Ok("a"));
        heap.check_invariants();
    }

    #[test]
    fn test_consolidation_deferred_to_pop() {
        let mut heap = FibonacciQueue::new();
        for i in 0..16 {
            heap.insert("x", i).unwrap();
        }
        assert_eq!(heap.root_count(), 16);
        assert_eq!(heap.height(), 1);

        heap.extract_max().unwrap();
        // 15 = 0b1111 nodes -> four trees of distinct degree
        assert_eq!(heap.root_count(), 4);
        assert_eq!(heap.height(), 4);
        heap.check_invariants();
    }

    #[test]
    fn test_increase_priority_at_root() {
        let mut heap = FibonacciQueue::new();
        let h1 = heap.insert_with_handle("a", 10).unwrap();
        heap.insert("b", 20).unwrap();
        heap.increase_priority(&h1, 30).unwrap();
        assert_eq!(heap.peek_max(), Ok("a"));
        assert_eq!(heap.get(&h1).map(Element::priority), Some(30));
        heap.check_invariants();
    }

    #[test]
    fn test_increase_priority_cuts_and_cascades() {
        let mut heap = FibonacciQueue::new();
        let mut handles = Vec::new();
        for i in 0..17 {
            handles.push(heap.insert_with_handle(format!("v{}", i), i * 10).unwrap());
        }
        // 16 remaining nodes consolidate into one B4 tree
        heap.extract_max().unwrap();
        assert_eq!(heap.root_count(), 1);
        heap.check_invariants();

        // Raise the leaves one after another; each cut marks or cuts an ancestor
        let mut raised = 1000;
        for handle in handles.iter().take(8) {
            heap.increase_priority(handle, raised).unwrap();
            raised += 1;
            heap.check_invariants();
        }
        assert_eq!(heap.peek_entry().unwrap().priority(), 1007);
        assert!(heap.root_count() > 1);

        let mut last = Priority::MAX;
        while let Ok(element) = heap.pop_max() {
            assert!(element.priority() <= last);
            last = element.priority();
            heap.check_invariants();
        }
    }

    #[test]
    fn test_increase_priority_errors() {
        let mut heap = FibonacciQueue::new();
        let handle = heap.insert_with_handle("a", 10).unwrap();
        assert_eq!(
            heap.increase_priority(&handle, 10),
            Err(QueueError::PriorityNotIncreased)
        );
        heap.extract_max().unwrap();
        assert_eq!(
            heap.increase_priority(&handle, 11),
            Err(QueueError::InvalidHandle)
        );
        assert!(heap.get(&handle).is_none());
    }

    #[test]
    fn test_merge_rekeys_other() {
        let mut a = FibonacciQueue::new();
        let mut b = FibonacciQueue::new();
        for i in 0..10 {
            a.insert("a", i).unwrap();
            b.insert("b", i + 5).unwrap();
        }
        a.extract_max().unwrap();
        b.extract_max().unwrap();

        let a_handle = a.insert_with_handle("tracked", -1).unwrap();
        a.merge(&mut b).unwrap();
        assert!(b.is_empty());
        assert_eq!(a.len(), 19);
        assert_eq!(a.peek_entry().unwrap().priority(), 13);
        assert_eq!(a.get(&a_handle).map(Element::value), Some("tracked"));
        a.check_invariants();

        for expected in [13, 12, 11, 10, 9, 8, 8, 7, 7] {
            assert_eq!(a.pop_max().unwrap().priority(), expected);
            a.check_invariants();
        }
    }

    #[test]
    fn test_handle_from_another_heap_is_rejected() {
        let mut a = FibonacciQueue::new();
        let handle = a.insert_with_handle("only_a", 1).unwrap();
        let mut b = FibonacciQueue::new();
        b.insert("only_b", 1).unwrap();

        assert!(b.get(&handle).is_none());
        assert_eq!(
            b.increase_priority(&handle, 100),
            Err(QueueError::InvalidHandle)
        );
        assert_eq!(b.peek_entry().unwrap().priority(), 1);
        assert_eq!(a.get(&handle).map(Element::value), Some("only_a"));
    }

    #[test]
    fn test_handles_follow_take_but_not_clone() {
        let mut a = FibonacciQueue::new();
        let handle = a.insert_with_handle("x", 1).unwrap();

        let copy = a.clone();
        assert!(copy.get(&handle).is_none());

        let mut moved = a.take();
        assert!(a.get(&handle).is_none());
        moved.increase_priority(&handle, 5).unwrap();
        assert_eq!(moved.peek_entry().unwrap().priority(), 5);
        assert_eq!(copy.peek_entry().unwrap().priority(), 1);
    }

    #[test]
    fn test_merge_drains_smaller_arena() {
        let mut small = FibonacciQueue::new();
        let small_handle = small.insert_with_handle("small", 0).unwrap();
        let mut large = FibonacciQueue::new();
        let mut large_handle = None;
        for i in 0..6 {
            let handle = large.insert_with_handle(format!("l{}", i), i).unwrap();
            large_handle.get_or_insert(handle);
        }
        let large_handle = large_handle.unwrap();

        small.merge(&mut large).unwrap();
        assert!(large.is_empty());
        assert_eq!(small.len(), 7);
        assert_eq!(small.peek_entry().unwrap().priority(), 5);
        small.check_invariants();

        // the larger side kept its keys
        assert_eq!(small.get(&large_handle).map(Element::value), Some("l0"));
        small.increase_priority(&large_handle, 50).unwrap();
        assert_eq!(small.peek_max(), Ok("l0"));

        // the smaller side was re-keyed
        assert!(small.get(&small_handle).is_none());
        assert_eq!(
            small.increase_priority(&small_handle, 60),
            Err(QueueError::InvalidHandle)
        );
        small.check_invariants();
    }

    #[test]
    fn test_clone_is_deep() {
        let mut a = FibonacciQueue::new();
        for i in 0..8 {
            a.insert("x", i).unwrap();
        }
        a.extract_max().unwrap();
        let b = a.clone();
        a.extract_max().unwrap();
        assert_eq!(a.len(), 6);
        assert_eq!(b.len(), 7);
        assert_eq!(b.peek_entry().unwrap().priority(), 6);
        b.check_invariants();
    }

    #[test]
    fn test_display_marks_degrees() {
        let mut heap = FibonacciQueue::new();
        heap.insert("a", 1).unwrap();
        heap.insert("b", 2).unwrap();
        heap.insert("c", 3).unwrap();
        heap.extract_max().unwrap();
        assert_eq!(
            heap.to_string(),
            "fibonacci heap (2):\ntree 1:\n  [2: b, degree 1]\n    [1: a, degree 0]\n"
        );
    }
}
