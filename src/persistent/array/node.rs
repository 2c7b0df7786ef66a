//! Tree node of a persistent array.

use crate::persistent::ReferenceCounter;

/// A node of the offset tree.
///
/// `offset` is the number of elements that precede this node's own
/// `values` in sequence order. Children follow the values, and each child's
/// offset equals this node's offset plus its value count plus the sizes of
/// all earlier siblings, so offsets form a prefix-sum index that a descent
/// can compare against directly.
///
/// Nodes are never mutated once built. Both slices sit behind reference
/// counters so that a path copy shares every untouched part.
pub(super) struct Node<T> {
    pub(super) offset: usize,
    pub(super) values: ReferenceCounter<[T]>,
    pub(super) children: Box<[ReferenceCounter<Self>]>,
}

impl<T> Node<T> {
    /// Creates the single fringe node of an empty tree.
    pub(super) fn empty() -> Self {
        Self {
            offset: 0,
            values: ReferenceCounter::from(Vec::new()),
            children: Box::default(),
        }
    }

    /// Index one past this node's last own value.
    #[inline]
    pub(super) fn values_end(&self) -> usize {
        self.offset + self.values.len()
    }

    /// A fringe node has no children.
    #[inline]
    pub(super) fn is_fringe(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns `true` when both nodes hold the same number of values and
    /// the same number of children.
    #[inline]
    pub(super) fn same_local_shape<U>(&self, other: &Node<U>) -> bool {
        self.values.len() == other.values.len() && self.children.len() == other.children.len()
    }
}
