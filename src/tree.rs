//! Owned binary-tree plumbing shared by the leftist, skew and treap engines
//!
//! Nodes own their children through `Box`. Skew heaps and priority search
//! trees can degenerate into linear-height trees, so nothing in this module
//! recurses on tree depth: dropping, cloning, measuring and rendering all walk
//! the tree with an explicit stack.

use crate::element::Element;
use std::fmt;

/// Optional owned subtree
pub(crate) type Link<M> = Option<Box<Node<M>>>;

/// A tree node carrying engine-specific metadata `M`
///
/// `M` is the rank for leftist heaps, `()` for skew heaps and the insertion
/// key for the priority search tree.
#[derive(Debug)]
pub(crate) struct Node<M> {
    pub(crate) element: Element,
    pub(crate) meta: M,
    pub(crate) left: Link<M>,
    pub(crate) right: Link<M>,
}

impl<M> Node<M> {
    pub(crate) fn leaf(element: Element, meta: M) -> Box<Self> {
        Box::new(Self {
            element,
            meta,
            left: None,
            right: None,
        })
    }
}

/// Root of an owned tree
///
/// Wraps a [`Link`] so that drop and clone are iterative.
#[derive(Debug)]
pub(crate) struct Tree<M> {
    pub(crate) root: Link<M>,
}

impl<M> Tree<M> {
    pub(crate) const fn new() -> Self {
        Self { root: None }
    }

    pub(crate) fn height(&self) -> usize {
        let mut stack: Vec<(&Node<M>, usize)> = Vec::new();
        if let Some(root) = self.root.as_deref() {
            stack.push((root, 1));
        }
        let mut height = 0;
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            if let Some(left) = node.left.as_deref() {
                stack.push((left, depth + 1));
            }
            if let Some(right) = node.right.as_deref() {
                stack.push((right, depth + 1));
            }
        }
        height
    }

    /// Nodes in key (in-order) sequence
    pub(crate) fn in_order(&self) -> Vec<&Node<M>> {
        let mut out = Vec::new();
        let mut stack: Vec<&Node<M>> = Vec::new();
        let mut cursor = self.root.as_deref();
        loop {
            while let Some(node) = cursor {
                stack.push(node);
                cursor = node.left.as_deref();
            }
            match stack.pop() {
                Some(node) => {
                    out.push(node);
                    cursor = node.right.as_deref();
                }
                None => break,
            }
        }
        out
    }

    /// Dismantles the tree, yielding its nodes' contents in in-order sequence
    pub(crate) fn into_in_order(mut self) -> Vec<(Element, M)> {
        let mut out = Vec::new();
        let mut stack: Vec<Box<Node<M>>> = Vec::new();
        let mut cursor = self.root.take();
        loop {
            while let Some(mut node) = cursor {
                cursor = node.left.take();
                stack.push(node);
            }
            match stack.pop() {
                Some(mut node) => {
                    cursor = node.right.take();
                    out.push((node.element, node.meta));
                }
                None => break,
            }
        }
        out
    }

    /// Renders the tree sideways: right subtree above, left subtree below,
    /// four spaces of indentation per level
    pub(crate) fn render(
        &self,
        f: &mut fmt::Formatter<'_>,
        label: impl Fn(&Node<M>) -> String,
    ) -> fmt::Result {
        enum Step<'a, M> {
            Visit(&'a Node<M>, usize),
            Emit(&'a Node<M>, usize),
        }

        let mut stack = Vec::new();
        if let Some(root) = self.root.as_deref() {
            stack.push(Step::Visit(root, 0));
        }
        while let Some(step) = stack.pop() {
            match step {
                Step::Visit(node, depth) => {
                    if let Some(left) = node.left.as_deref() {
                        stack.push(Step::Visit(left, depth + 1));
                    }
                    stack.push(Step::Emit(node, depth));
                    if let Some(right) = node.right.as_deref() {
                        stack.push(Step::Visit(right, depth + 1));
                    }
                }
                Step::Emit(node, depth) => {
                    writeln!(f, "{:indent$}{}", "", label(node), indent = depth * 4)?;
                }
            }
        }
        Ok(())
    }
}

impl<M> Default for Tree<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Clone> Clone for Tree<M> {
    fn clone(&self) -> Self {
        // Visit in (node, right, left) order; reversed, that is post-order, so
        // each node is rebuilt after both of its subtrees.
        let mut order: Vec<&Node<M>> = Vec::new();
        let mut stack: Vec<&Node<M>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = stack.pop() {
            order.push(node);
            stack.extend(node.left.as_deref());
            stack.extend(node.right.as_deref());
        }

        let mut built: Vec<Box<Node<M>>> = Vec::new();
        for node in order.into_iter().rev() {
            let right = if node.right.is_some() { built.pop() } else { None };
            let left = if node.left.is_some() { built.pop() } else { None };
            built.push(Box::new(Node {
                element: node.element.clone(),
                meta: node.meta.clone(),
                left,
                right,
            }));
        }
        Self { root: built.pop() }
    }
}

impl<M> Drop for Tree<M> {
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node<M>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(value: &str, priority: i64, left: Link<()>, right: Link<()>) -> Link<()> {
        Some(Box::new(Node {
            element: Element::new(value, priority).unwrap(),
            meta: (),
            left,
            right,
        }))
    }

    fn sample() -> Tree<()> {
        //      b
        //    a   d
        //       c
        Tree {
            root: node(
                "b",
                2,
                node("a", 1, None, None),
                node("d", 4, node("c", 3, None, None), None),
            ),
        }
    }

    fn values(tree: &Tree<()>) -> Vec<&str> {
        tree.in_order().iter().map(|n| n.element.value()).collect()
    }

    #[test]
    fn test_height_and_order() {
        let tree = sample();
        assert_eq!(tree.height(), 3);
        assert_eq!(values(&tree), ["a", "b", "c", "d"]);
        assert_eq!(Tree::<()>::new().height(), 0);
    }

    #[test]
    fn test_clone_preserves_shape() {
        let tree = sample();
        let copy = tree.clone();
        assert_eq!(values(&copy), ["a", "b", "c", "d"]);
        assert_eq!(copy.height(), 3);
        let root = copy.root.as_deref().unwrap();
        assert_eq!(root.left.as_ref().unwrap().element.value(), "a");
        assert_eq!(root.right.as_ref().unwrap().element.value(), "d");
    }

    #[test]
    fn test_into_in_order() {
        let drained: Vec<String> = sample()
            .into_in_order()
            .into_iter()
            .map(|(e, _)| e.into_value())
            .collect();
        assert_eq!(drained, ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_deep_tree_drop_and_clone() {
        let mut root: Link<()> = None;
        for i in 0..200_000 {
            root = node("x", i, root, None);
        }
        let tree = Tree { root };
        assert_eq!(tree.height(), 200_000);
        let copy = tree.clone();
        assert_eq!(copy.height(), 200_000);
        drop(tree);
        drop(copy);
    }
}
