//! Iterators over an [`OrderedTree`][crate::OrderedTree].
//!
//! Every traversal keeps its own explicit stack (or queue) of pending nodes
//! instead of recursing, so walking a degenerate, list-shaped tree costs heap
//! memory rather than call stack.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use crate::tree::{Link, Node};

/// Marks an iterator that counts down a `remaining` field as exact size and
/// fused, and adds the `yielded` helper doing the counting.
macro_rules! exact_size {
    ($iter:ident<$($param:tt),+>, $item:ty) => {
        impl<$($param),+> ExactSizeIterator for $iter<$($param),+> {}
        impl<$($param),+> FusedIterator for $iter<$($param),+> {}

        impl<$($param),+> $iter<$($param),+> {
            fn yielded(&mut self, item: $item) -> Option<$item> {
                self.remaining -= 1;
                Some(item)
            }
        }
    };
}

/// A preorder iterator: a node, then its left subtree, then its right
/// subtree. Created by [`OrderedTree::iter`][crate::OrderedTree::iter] and
/// [`OrderedTree::preorder`][crate::OrderedTree::preorder].
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>, len: usize) -> Self {
        Self {
            stack: root.into_iter().collect(),
            remaining: len,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Right goes on first so the left subtree is popped next.
        self.stack.extend(node.right.as_deref());
        self.stack.extend(node.left.as_deref());
        self.yielded(&node.item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

exact_size!(Iter<'a, T>, &'a T);

/// An iterator over the items in ascending order. Created by
/// [`OrderedTree::inorder`][crate::OrderedTree::inorder].
pub struct InOrder<'a, T> {
    /// Nodes whose left subtree has been pushed but that haven't been
    /// yielded yet.
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> InOrder<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut cursor: Option<&'a Node<T>>) {
        while let Some(node) = cursor {
            self.stack.push(node);
            cursor = node.left.as_deref();
        }
    }
}

impl<'a, T> Iterator for InOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.yielded(&node.item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

exact_size!(InOrder<'a, T>, &'a T);

/// A postorder iterator: the left subtree, then the right subtree, then the
/// node. Created by [`OrderedTree::postorder`][crate::OrderedTree::postorder].
pub struct PostOrder<'a, T> {
    /// Pending nodes, each flagged with whether its children have already
    /// been pushed above it.
    stack: Vec<(&'a Node<T>, bool)>,
    remaining: usize,
}

impl<'a, T> PostOrder<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>, len: usize) -> Self {
        Self {
            stack: root.map(|root| (root, false)).into_iter().collect(),
            remaining: len,
        }
    }
}

impl<'a, T> Iterator for PostOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, expanded)) = self.stack.pop() {
            if expanded {
                return self.yielded(&node.item);
            }
            self.stack.push((node, true));
            self.stack.extend(node.right.as_deref().map(|right| (right, false)));
            self.stack.extend(node.left.as_deref().map(|left| (left, false)));
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

exact_size!(PostOrder<'a, T>, &'a T);

/// A breadth first iterator, visiting each level from left to right. Created
/// by [`OrderedTree::levelorder`][crate::OrderedTree::levelorder].
pub struct LevelOrder<'a, T> {
    queue: VecDeque<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> LevelOrder<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>, len: usize) -> Self {
        Self {
            queue: root.into_iter().collect(),
            remaining: len,
        }
    }
}

impl<'a, T> Iterator for LevelOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        self.queue.extend(node.left.as_deref());
        self.queue.extend(node.right.as_deref());
        self.yielded(&node.item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

exact_size!(LevelOrder<'a, T>, &'a T);

/// An owning iterator over the items in ascending order. Created by
/// consuming an [`OrderedTree`][crate::OrderedTree] with `into_iter`.
///
/// Nodes are taken apart as they are visited; whatever hasn't been yielded is
/// freed iteratively on drop.
pub struct IntoIter<T> {
    stack: Vec<Box<Node<T>>>,
    remaining: usize,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(root: Link<T>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut cursor: Link<T>) {
        while let Some(mut node) = cursor {
            cursor = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        while let Some(mut node) = self.stack.pop() {
            self.stack.extend(node.left.take());
            self.stack.extend(node.right.take());
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let mut node = self.stack.pop()?;
        self.push_left_spine(node.right.take());
        self.yielded(node.item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

exact_size!(IntoIter<T>, T);
