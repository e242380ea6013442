/// Errors returned by mutating [`OrderedTree`][crate::OrderedTree] operations.
///
/// Queries never fail: a missing item is reported with `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The item to remove is not stored in the tree.
    #[error("item not in tree")]
    NotFound,
}
