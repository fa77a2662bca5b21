//! Binomial Heap implementation
//!
//! A binomial heap is a collection of binomial trees with:
//! - O(log n) insert and pop_max
//! - O(log n) merge
//!
//! # Algorithm Overview
//!
//! A binomial heap maintains a collection of binomial trees, where:
//! - Each tree satisfies the max-heap property
//! - At most one tree of each degree (0, 1, 2, ..., log n)
//! - This is analogous to binary representation of n
//!
//! **Binomial Tree Bₖ**: Recursively defined:
//! - B₀ is a single node
//! - Bₖ is formed by linking two B_{k-1} trees
//! - Bₖ has exactly 2ᵏ nodes and height k + 1
//!
//! **Key Operations**:
//! - **Insert**: wrap the element as a B₀ and merge it into the root list
//! - **Pop-max**: scan the roots for the maximum, detach that tree, and merge
//!   its children (already ordered by degree) back in
//! - **Merge**: interleave both root lists by degree, then consolidate by
//!   linking equal-degree trees pairwise (carry propagation)
//!
//! **Invariant**: After merge, at most one tree of each degree. This ensures
//! O(log n) trees total, bounding operation costs.
//!
//! Trees own their children directly. A tree of degree d keeps its children in
//! a vector ordered by degree, so child `i` is itself a tree of degree `i`.

use crate::element::Element;
use crate::error::QueueError;
use crate::kind::QueueKind;
use crate::traits::MaxQueue;
use log::trace;
use smallvec::SmallVec;
use std::fmt;
use std::mem;

/// A binomial tree: a root element plus children of degrees 0..degree
#[derive(Debug, Clone)]
struct BinomialTree {
    element: Element,
    children: Vec<BinomialTree>,
}

impl BinomialTree {
    fn singleton(element: Element) -> Self {
        Self {
            element,
            children: Vec::new(),
        }
    }

    #[inline]
    fn degree(&self) -> usize {
        self.children.len()
    }

    /// Links two trees of equal degree; the larger root becomes the parent
    fn link(self, other: BinomialTree) -> BinomialTree {
        debug_assert_eq!(self.degree(), other.degree());
        let (mut parent, child) = if self.element.priority() >= other.element.priority() {
            (self, other)
        } else {
            (other, self)
        };
        parent.children.push(child);
        parent
    }
}

/// Binomial Heap
///
/// # Example
///
/// ```rust
/// use rust_mergeable_queues::MaxQueue;
/// use rust_mergeable_queues::binomial::BinomialQueue;
///
/// let mut heap = BinomialQueue::new();
/// for (value, priority) in [("ten", 10), ("twenty", 20), ("fifteen", 15), ("five", 5)] {
///     heap.insert(value, priority).unwrap();
/// }
/// assert_eq!(heap.peek_max(), Ok("twenty"));
/// heap.extract_max().unwrap();
/// assert_eq!(heap.peek_max(), Ok("fifteen"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct BinomialQueue {
    /// Root list, strictly increasing by degree
    roots: Vec<BinomialTree>,
    len: usize,
}

impl BinomialQueue {
    /// Creates an empty binomial heap
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of trees in the root list
    pub fn tree_count(&self) -> usize {
        self.roots.len()
    }

    /// Degrees of the trees in the root list, in increasing order
    ///
    /// These are the positions of the one-bits of `len()`.
    pub fn degrees(&self) -> Vec<usize> {
        self.roots.iter().map(BinomialTree::degree).collect()
    }

    /// Index of the root with the maximum priority; first wins on ties
    fn max_index(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, tree) in self.roots.iter().enumerate() {
            match best {
                Some(b) if self.roots[b].element.priority() >= tree.element.priority() => {}
                _ => best = Some(i),
            }
        }
        best
    }

    /// Splices `incoming` (ordered by degree) into the root list and consolidates
    fn merge_roots(&mut self, incoming: Vec<BinomialTree>) {
        if incoming.is_empty() {
            return;
        }
        let current = mem::take(&mut self.roots);
        let spliced = interleave_by_degree(current, incoming);
        self.roots = consolidate(spliced);
    }

    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        fn check_tree(tree: &BinomialTree) -> usize {
            let mut size = 1;
            for (i, child) in tree.children.iter().enumerate() {
                assert_eq!(child.degree(), i, "child degree out of order");
                assert!(tree.element.priority() >= child.element.priority());
                size += check_tree(child);
            }
            assert_eq!(size, 1 << tree.degree());
            size
        }

        let mut total = 0;
        for pair in self.roots.windows(2) {
            assert!(pair[0].degree() < pair[1].degree(), "duplicate degree");
        }
        for tree in &self.roots {
            total += check_tree(tree);
        }
        assert_eq!(total, self.len);
    }
}

/// Merges two degree-ordered root lists into one degree-ordered list
fn interleave_by_degree(a: Vec<BinomialTree>, b: Vec<BinomialTree>) -> Vec<BinomialTree> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    let mut a = a.into_iter().peekable();
    let mut b = b.into_iter().peekable();
    loop {
        let take_a = match (a.peek(), b.peek()) {
            (Some(x), Some(y)) => x.degree() <= y.degree(),
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        out.extend(if take_a { a.next() } else { b.next() });
    }
    out
}

/// Links equal-degree trees until every degree occurs at most once
fn consolidate(list: Vec<BinomialTree>) -> Vec<BinomialTree> {
    let before = list.len();
    let mut table: SmallVec<[Option<BinomialTree>; 32]> = SmallVec::new();
    for mut tree in list {
        loop {
            let degree = tree.degree();
            if table.len() <= degree {
                table.resize_with(degree + 1, || None);
            }
            match table[degree].take() {
                Some(other) => tree = tree.link(other),
                None => {
                    table[degree] = Some(tree);
                    break;
                }
            }
        }
    }
    let roots: Vec<BinomialTree> = table.into_iter().flatten().collect();
    trace!("binomial consolidate: {} trees -> {}", before, roots.len());
    roots
}

impl MaxQueue for BinomialQueue {
    const KIND: QueueKind = QueueKind::Binomial;

    fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    fn len(&self) -> usize {
        self.len
    }

    /// A tree of degree k has height k + 1; the last root has the largest degree.
    fn height(&self) -> usize {
        self.roots.last().map_or(0, |tree| tree.degree() + 1)
    }

    fn push_element(&mut self, element: Element) -> Result<(), QueueError> {
        self.merge_roots(vec![BinomialTree::singleton(element)]);
        self.len += 1;
        Ok(())
    }

    fn peek_entry(&self) -> Result<&Element, QueueError> {
        self.max_index()
            .map(|i| &self.roots[i].element)
            .ok_or(QueueError::EmptyQueue)
    }

    fn pop_max(&mut self) -> Result<Element, QueueError> {
        let index = self.max_index().ok_or(QueueError::EmptyQueue)?;
        let tree = self.roots.remove(index);
        self.len -= 1;
        self.merge_roots(tree.children);
        Ok(tree.element)
    }

    fn merge(&mut self, other: &mut Self) -> Result<(), QueueError> {
        self.len += mem::take(&mut other.len);
        self.merge_roots(mem::take(&mut other.roots));
        Ok(())
    }

    fn meld(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.len += other.len;
        result.merge_roots(other.roots.clone());
        result
    }

    fn take(&mut self) -> Self {
        mem::take(self)
    }
}

impl fmt::Display for BinomialQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "binomial heap ({}):", self.len)?;
        if self.is_empty() {
            return writeln!(f, "  [empty]");
        }
        let mut stack: Vec<(&BinomialTree, usize)> = self.roots.iter().rev().map(|t| (t, 0)).collect();
        while let Some((tree, depth)) = stack.pop() {
            writeln!(
                f,
                "{:indent$}B{} [{}]",
                "",
                tree.degree(),
                tree.element,
                indent = depth * 2
            )?;
            stack.extend(tree.children.iter().rev().map(|c| (c, depth + 1)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        let mut heap = BinomialQueue::new();
        heap.insert("ten", 10).unwrap();
        heap.insert("twenty", 20).unwrap();
        heap.insert("fifteen", 15).unwrap();
        heap.insert("five", 5).unwrap();
        heap.check_invariants();

        assert_eq!(heap.peek_max(), Ok("twenty"));
        heap.extract_max().unwrap();
        assert_eq!(heap.peek_max(), Ok("fifteen"));
        assert_eq!(heap.len(), 3);
        heap.check_invariants();
    }

    #[test]
    fn test_degrees_follow_binary_representation() {
        let mut heap = BinomialQueue::new();
        for i in 0..13 {
            heap.insert("x", i).unwrap();
        }
        // 13 = 0b1101
        assert_eq!(heap.degrees(), vec![0, 2, 3]);
        assert_eq!(heap.tree_count(), 3);
        assert_eq!(heap.height(), 4);
        heap.check_invariants();
    }

    #[test]
    fn test_pop_all_in_order() {
        let mut heap = BinomialQueue::new();
        for i in 0..64 {
            heap.insert(format!("v{}", i), (i * 29) % 64).unwrap();
        }
        for expected in (0..64).rev() {
            assert_eq!(heap.pop_max().unwrap().priority(), expected);
            heap.check_invariants();
        }
        assert_eq!(heap.pop_max(), Err(QueueError::EmptyQueue));
    }

    #[test]
    fn test_merge_keeps_other_intact() {
        let mut a = BinomialQueue::new();
        let mut b = BinomialQueue::new();
        for i in 0..7 {
            a.insert("a", i).unwrap();
        }
        for i in 0..5 {
            b.insert("b", i + 100).unwrap();
        }
        a.merge_in_place(&b).unwrap();
        a.check_invariants();
        b.check_invariants();
        assert_eq!(a.len(), 12);
        assert_eq!(b.len(), 5);
        assert_eq!(a.degrees(), vec![2, 3]);
        assert_eq!(a.peek_entry().unwrap().priority(), 104);
    }

    #[test]
    fn test_consuming_merge_empties_source() {
        let mut a = BinomialQueue::new();
        a.insert("a", 1).unwrap();
        let mut b = BinomialQueue::new();
        b.insert("b", 2).unwrap();
        a.merge(&mut b).unwrap();
        assert!(b.is_empty());
        assert_eq!(b.len(), 0);
        assert_eq!(a.degrees(), vec![1]);
    }

    #[test]
    fn test_display() {
        let mut heap = BinomialQueue::new();
        heap.insert("a", 1).unwrap();
        heap.insert("b", 2).unwrap();
        heap.insert("c", 3).unwrap();
        assert_eq!(
            heap.to_string(),
            "binomial heap (3):\nB0 [3: c]\nB1 [2: b]\n  B0 [1: a]\n"
        );
    }
}
