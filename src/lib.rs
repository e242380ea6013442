//! This crate exposes a mutable, linked-node Binary Search Tree (BST) that
//! is rebalanced on demand rather than on every mutation.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored items. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores an item
//! and will sometimes have child `Node`s. The most important invariants of
//! the BST in this crate are:
//!
//! 1. For every `Node`, all the `Node`s in its left subtree have an item
//!    less than its own item.
//! 2. For every `Node`, all the `Node`s in its right subtree have an item
//!    greater than or equal to its own item. Duplicates are kept and always
//!    go right.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for items in the tree takes `O(height)` (where `height` is the
//! longest path from the root `Node` to a leaf `Node`). Inserting already
//! sorted items degrades the tree into a list, so [`OrderedTree::rebalance`]
//! rebuilds the whole tree from its sorted contents, bringing the height back
//! down to `O(lg N)`.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::OrderedTree;
//!
//! let mut tree: OrderedTree<i32> = (1..=7).collect();
//! assert_eq!(tree.height(), 6);
//! assert!(!tree.is_balanced());
//!
//! tree.rebalance();
//! assert_eq!(tree.height(), 2);
//! assert!(tree.is_balanced());
//! assert_eq!(tree.inorder().copied().collect::<Vec<_>>(), [1, 2, 3, 4, 5, 6, 7]);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod error;
pub mod iter;
pub mod tree;


pub use error::Error;
pub use tree::OrderedTree;
