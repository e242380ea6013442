use quickcheck::{Arbitrary, Gen};

/// The operations a quicktest applies to a tree and its model.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Op<T> {
    /// Add the item
    Add(T),
    /// Remove the item
    Remove(T),
    /// Swap an item for itself
    Replace(T),
    /// Rebalance the tree
    Rebalance,
}

impl<T> Arbitrary for Op<T>
where
    T: Arbitrary,
{
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 0, 1, 1, 2, 3]).unwrap() {
            0 => Op::Add(T::arbitrary(g)),
            1 => Op::Remove(T::arbitrary(g)),
            2 => Op::Replace(T::arbitrary(g)),
            3 => Op::Rebalance,
            _ => unreachable!(),
        }
    }
}
