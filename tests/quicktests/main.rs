//! Property tests comparing an `OrderedTree` against a sorted `Vec` model.

mod op;
mod ordered_tree;

pub(crate) use op::Op;
