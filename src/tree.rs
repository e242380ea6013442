//! A mutable, linked-node BST. Nodes own their children through `Box`es and
//! every operation walks the tree iteratively, so even a degenerate tree
//! (e.g. one built from already sorted input) can be searched, modified, and
//! dropped without exhausting the call stack.
//!
//! The tree never balances itself. Call [`OrderedTree::rebalance`] to rebuild
//! it when [`OrderedTree::is_balanced`] reports that it has grown too tall.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::{Error, OrderedTree};
//!
//! let mut tree = OrderedTree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.find(&1), None);
//!
//! tree.add(1);
//! assert_eq!(tree.find(&1), Some(&1));
//!
//! // Duplicates are kept.
//! tree.add(1);
//! assert_eq!(tree.len(), 2);
//!
//! // Removing an item returns it.
//! assert_eq!(tree.remove(&1), Ok(1));
//! assert_eq!(tree.remove(&1), Ok(1));
//!
//! // Removing an item that isn't there is an error.
//! assert_eq!(tree.remove(&1), Err(Error::NotFound));
//! assert!(tree.is_empty());
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use crate::iter::{InOrder, IntoIter, Iter, LevelOrder, PostOrder};
use crate::Error;

/// An owned, possibly empty, subtree.
pub(crate) type Link<T> = Option<Box<Node<T>>>;

pub(crate) struct Node<T> {
    pub(crate) item: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
}

impl<T> Node<T> {
    fn new_boxed(item: T) -> Box<Self> {
        Box::new(Self {
            item,
            left: None,
            right: None,
        })
    }

    fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// A Binary Search Tree of totally ordered items. Items equal to an existing
/// item are kept and placed in its right subtree.
pub struct OrderedTree<T> {
    root: Link<T>,
    len: usize,
}

impl<T> Default for OrderedTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for OrderedTree<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Copies the tree node by node, so the clone has exactly the same shape.
impl<T> Clone for OrderedTree<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        // Children are built before their parent: visiting in postorder
        // leaves a node's left then right copy on top of `built`.
        let mut built: Vec<Box<Node<T>>> = Vec::new();
        let mut pending: Vec<_> = self
            .root
            .as_deref()
            .map(|root| (root, false))
            .into_iter()
            .collect();
        while let Some((node, expanded)) = pending.pop() {
            if !expanded {
                pending.push((node, true));
                pending.extend(node.right.as_deref().map(|right| (right, false)));
                pending.extend(node.left.as_deref().map(|left| (left, false)));
                continue;
            }

            let right = if node.right.is_some() {
                built.pop()
            } else {
                None
            };
            let left = if node.left.is_some() {
                built.pop()
            } else {
                None
            };
            built.push(Box::new(Node {
                item: node.item.clone(),
                left,
                right,
            }));
        }

        Self {
            root: built.pop(),
            len: self.len,
        }
    }
}

impl<T> fmt::Debug for OrderedTree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inorder()).finish()
    }
}

/// Renders the tree rotated 90 degrees counter-clockwise: the root is in the
/// leftmost column, right subtrees are printed above their parent and left
/// subtrees below. Each level of depth adds a `"| "` prefix.
///
/// # Examples
///
/// ```
/// use ordered_tree::OrderedTree;
///
/// let tree: OrderedTree<_> = [2, 1, 3].into_iter().collect();
/// assert_eq!(tree.to_string(), "| 3\n2\n| 1\n");
/// ```
impl<T> fmt::Display for OrderedTree<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = Vec::new();
        let mut cursor = self.root.as_deref().map(|node| (node, 0));
        loop {
            while let Some((node, level)) = cursor {
                stack.push((node, level));
                cursor = node.right.as_deref().map(|right| (right, level + 1));
            }

            let Some((node, level)) = stack.pop() else {
                return Ok(());
            };
            writeln!(f, "{}{}", "| ".repeat(level), node.item)?;
            cursor = node.left.as_deref().map(|left| (left, level + 1));
        }
    }
}

impl<T> FromIterator<T> for OrderedTree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for OrderedTree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<'a, T> IntoIterator for &'a OrderedTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Consumes the tree, yielding its items in ascending order.
impl<T> IntoIterator for OrderedTree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        let len = mem::take(&mut self.len);
        IntoIter::new(self.root.take(), len)
    }
}

impl<T> OrderedTree<T> {
    /// Generates a new, empty `OrderedTree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Returns the number of items stored in the tree, duplicates included.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree holds no items.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes every item from the tree.
    pub fn clear(&mut self) {
        let mut stack: Vec<_> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
        self.len = 0;
    }

    /// Potentially finds the stored item equal to `item`. If no node holds an
    /// equal item, `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let tree: OrderedTree<_> = [5, 3, 8].into_iter().collect();
    ///
    /// assert_eq!(tree.find(&3), Some(&3));
    /// assert_eq!(tree.find(&42), None);
    /// ```
    pub fn find(&self, item: &T) -> Option<&T>
    where
        T: Ord,
    {
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            match item.cmp(&node.item) {
                Ordering::Less => cursor = node.left.as_deref(),
                Ordering::Equal => return Some(&node.item),
                Ordering::Greater => cursor = node.right.as_deref(),
            }
        }

        None
    }

    /// Returns `true` if an item equal to `item` is stored in the tree.
    pub fn contains(&self, item: &T) -> bool
    where
        T: Ord,
    {
        self.find(item).is_some()
    }

    /// Inserts `item` as a new leaf. Items smaller than a node go to its
    /// left, everything else (including equal items) goes to its right.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// tree.add(2);
    /// tree.add(1);
    /// tree.add(2);
    ///
    /// assert_eq!(tree.len(), 3);
    /// assert_eq!(tree.inorder().collect::<Vec<_>>(), [&1, &2, &2]);
    /// ```
    pub fn add(&mut self, item: T)
    where
        T: Ord,
    {
        let mut link = &mut self.root;
        while let Some(node) = link {
            link = if item < node.item {
                &mut node.left
            } else {
                &mut node.right
            };
        }

        *link = Some(Node::new_boxed(item));
        self.len += 1;
    }

    /// Removes an item equal to `item` from the tree and returns it.
    ///
    /// A node with two children takes over the largest item of its left
    /// subtree, and the node that held it is unlinked in its place.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if no stored item equals `item`. The tree is left
    /// untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::{Error, OrderedTree};
    ///
    /// let mut tree: OrderedTree<_> = [2, 1, 3].into_iter().collect();
    ///
    /// assert_eq!(tree.remove(&2), Ok(2));
    /// assert_eq!(tree.remove(&2), Err(Error::NotFound));
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn remove(&mut self, item: &T) -> Result<T, Error>
    where
        T: Ord,
    {
        // `link` always points at the slot holding the current node, whether
        // that slot is the root or a parent's child, so the root needs no
        // special casing.
        let mut link = &mut self.root;
        loop {
            match link {
                None => return Err(Error::NotFound),
                Some(found) if found.item == *item => break,
                Some(node) => {
                    link = if *item < node.item {
                        &mut node.left
                    } else {
                        &mut node.right
                    };
                }
            }
        }

        let Some(mut node) = link.take() else {
            return Err(Error::NotFound);
        };
        self.len -= 1;

        if node.right.is_some() {
            if let Some(max) = pop_max(&mut node.left) {
                let removed = mem::replace(&mut node.item, max);
                *link = Some(node);
                return Ok(removed);
            }
        }

        let Node {
            item: removed,
            left,
            right,
        } = *node;
        *link = left.or(right);
        debug_assert_eq!(self.root.is_none(), self.len == 0);

        Ok(removed)
    }

    /// Swaps the stored item equal to `item` for `new_item` and returns the
    /// old one, or `None` if no stored item equals `item`.
    ///
    /// The node is updated in place and not moved, so `new_item` must sort
    /// the same way `item` did for the tree to stay searchable. Use
    /// [`remove`][Self::remove] and [`add`][Self::add] otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree: OrderedTree<_> = [2, 1, 3].into_iter().collect();
    ///
    /// assert_eq!(tree.replace(&3, 3), Some(3));
    /// assert_eq!(tree.replace(&4, 4), None);
    /// ```
    pub fn replace(&mut self, item: &T, new_item: T) -> Option<T>
    where
        T: Ord,
    {
        let mut cursor = self.root.as_deref_mut();
        while let Some(node) = cursor {
            match item.cmp(&node.item) {
                Ordering::Less => cursor = node.left.as_deref_mut(),
                Ordering::Equal => return Some(mem::replace(&mut node.item, new_item)),
                Ordering::Greater => cursor = node.right.as_deref_mut(),
            }
        }

        None
    }

    /// Gets the height of this tree: the number of edges between the root
    /// and its deepest leaf. Empty and single-node trees have a height of 0.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<_> = self
            .root
            .as_deref()
            .map(|root| (root, 0))
            .into_iter()
            .collect();
        while let Some((node, depth)) = stack.pop() {
            if node.is_leaf() {
                height = height.max(depth);
            }
            stack.extend(node.left.as_deref().map(|left| (left, depth + 1)));
            stack.extend(node.right.as_deref().map(|right| (right, depth + 1)));
        }

        height
    }

    /// Returns `true` if the height is below `2 * lg(len + 1) - 1`. This is a
    /// loose heuristic for deciding when to [`rebalance`][Self::rebalance],
    /// not an AVL-style guarantee. An empty tree is never balanced.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree: OrderedTree<_> = (0..15).collect();
    /// assert!(!tree.is_balanced());
    ///
    /// tree.rebalance();
    /// assert!(tree.is_balanced());
    /// ```
    pub fn is_balanced(&self) -> bool {
        let bound = 2.0 * ((self.len + 1) as f64).log2() - 1.0;
        (self.height() as f64) < bound
    }

    /// Collects every item `x` with `low <= x <= high`, in the order of
    /// [`iter`][Self::iter].
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let tree: OrderedTree<_> = [5, 3, 8, 1, 4, 7, 9, 2, 6].into_iter().collect();
    ///
    /// assert_eq!(tree.range_find(&3, &7), [&5, &3, &4, &7, &6]);
    /// ```
    pub fn range_find(&self, low: &T, high: &T) -> Vec<&T>
    where
        T: Ord,
    {
        self.iter()
            .filter(|&item| low <= item && item <= high)
            .collect()
    }

    /// Rebuilds the tree from its sorted items so that its height is as small
    /// as possible. The stored items don't change.
    ///
    /// The middle item of the sorted items becomes the root and the process
    /// repeats for the items on each side of it. For an even number of items,
    /// the upper of the two middle items is chosen.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree: OrderedTree<_> = (1..=7).collect();
    /// tree.rebalance();
    ///
    /// assert_eq!(tree.iter().collect::<Vec<_>>(), [&4, &2, &1, &3, &6, &5, &7]);
    /// ```
    pub fn rebalance(&mut self)
    where
        T: Ord,
    {
        let len = self.len;
        let mut sorted: Vec<_> = mem::take(self).into_iter().map(Some).collect();

        let mut ranges = vec![(0, sorted.len())];
        while let Some((lo, hi)) = ranges.pop() {
            if lo >= hi {
                continue;
            }
            let mid = lo + (hi - lo) / 2;
            if let Some(item) = sorted[mid].take() {
                self.add(item);
            }
            ranges.push((mid + 1, hi));
            ranges.push((lo, mid));
        }

        debug_assert_eq!(self.len, len);
    }

    /// Returns the smallest stored item strictly greater than `item`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let tree: OrderedTree<_> = [10, 20, 30].into_iter().collect();
    ///
    /// assert_eq!(tree.successor(&20), Some(&30));
    /// assert_eq!(tree.successor(&25), Some(&30));
    /// assert_eq!(tree.successor(&30), None);
    /// ```
    pub fn successor(&self, item: &T) -> Option<&T>
    where
        T: Ord,
    {
        let mut best = None;
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            if node.item > *item {
                best = Some(&node.item);
                cursor = node.left.as_deref();
            } else {
                cursor = node.right.as_deref();
            }
        }

        best
    }

    /// Returns the largest stored item strictly less than `item`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let tree: OrderedTree<_> = [10, 20, 30].into_iter().collect();
    ///
    /// assert_eq!(tree.predecessor(&20), Some(&10));
    /// assert_eq!(tree.predecessor(&15), Some(&10));
    /// assert_eq!(tree.predecessor(&10), None);
    /// ```
    pub fn predecessor(&self, item: &T) -> Option<&T>
    where
        T: Ord,
    {
        let mut best = None;
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            if node.item < *item {
                best = Some(&node.item);
                cursor = node.right.as_deref();
            } else {
                cursor = node.left.as_deref();
            }
        }

        best
    }

    /// Iterates over the items in preorder. This is the default traversal
    /// order and the one used by [`range_find`][Self::range_find].
    pub fn iter(&self) -> Iter<'_, T> {
        self.preorder()
    }

    /// Iterates over the items in preorder: a node, then its left subtree,
    /// then its right subtree.
    pub fn preorder(&self) -> Iter<'_, T> {
        Iter::new(self.root.as_deref(), self.len)
    }

    /// Iterates over the items in ascending order.
    pub fn inorder(&self) -> InOrder<'_, T> {
        InOrder::new(self.root.as_deref(), self.len)
    }

    /// Iterates over the items in postorder: the left subtree, then the
    /// right subtree, then the node itself.
    pub fn postorder(&self) -> PostOrder<'_, T> {
        PostOrder::new(self.root.as_deref(), self.len)
    }

    /// Iterates over the items level by level, from left to right.
    pub fn levelorder(&self) -> LevelOrder<'_, T> {
        LevelOrder::new(self.root.as_deref(), self.len)
    }
}

/// Unlinks the rightmost node of the subtree in `link` and returns its item.
/// The node's left child takes its place.
fn pop_max<T>(mut link: &mut Link<T>) -> Option<T> {
    while link.as_ref().is_some_and(|node| node.right.is_some()) {
        link = &mut link.as_mut()?.right;
    }

    let node = link.take()?;
    let Node { item, left, .. } = *node;
    *link = left;

    Some(item)
}

#[cfg(test)]
impl<T> OrderedTree<T>
where
    T: Ord + fmt::Debug,
{
    /// Asserts that every left descendant is less than its ancestor, every
    /// right descendant is at least its ancestor, and that `len` matches the
    /// number of nodes.
    pub(crate) fn assert_invariants(&self) {
        self.assert_ordered(true);
    }

    /// Like [`Self::assert_invariants`] but allows left descendants equal to
    /// their ancestor. Removing a node whose left subtree holds several copies
    /// of its largest item lifts one copy up and leaves the others on the
    /// left.
    pub(crate) fn assert_weak_invariants(&self) {
        self.assert_ordered(false);
    }

    fn assert_ordered(&self, strict_left: bool) {
        assert_eq!(self.root.is_none(), self.len == 0);

        let mut count = 0;
        let mut stack: Vec<(&Node<T>, Option<&T>, Option<&T>)> = self
            .root
            .as_deref()
            .map(|root| (root, None, None))
            .into_iter()
            .collect();
        while let Some((node, lower, upper)) = stack.pop() {
            count += 1;
            if let Some(lower) = lower {
                assert!(lower <= &node.item, "{:?} right of {:?}", node.item, lower);
            }
            if let Some(upper) = upper {
                if strict_left {
                    assert!(&node.item < upper, "{:?} left of {:?}", node.item, upper);
                } else {
                    assert!(&node.item <= upper, "{:?} left of {:?}", node.item, upper);
                }
            }
            stack.extend(node.left.as_deref().map(|left| (left, lower, Some(&node.item))));
            stack.extend(node.right.as_deref().map(|right| (right, Some(&node.item), upper)));
        }
        assert_eq!(count, self.len);
    }
}
