//! Iterators over [`PersistentArray`](super::PersistentArray).
//!
//! Both iterators walk the tree in pre-order with an explicit stack: a
//! node's own values first, then each child subtree in turn. The stack
//! never grows past the tree height, which is at most the order.

use smallvec::SmallVec;

use super::node::Node;
use crate::persistent::ReferenceCounter;

/// Inline capacity of the traversal stack; deeper trees spill to the heap.
const STACK_CAPACITY: usize = 8;

/// An iterator over references to elements of a
/// [`PersistentArray`](super::PersistentArray).
///
/// Visits each node exactly once, so iterating the whole array is O(N).
pub struct PersistentArrayIterator<'a, T> {
    /// For each level being visited, the siblings not yet entered.
    pending: SmallVec<[&'a [ReferenceCounter<Node<T>>]; STACK_CAPACITY]>,
    /// Values of the node currently being visited.
    values: std::slice::Iter<'a, T>,
    /// Number of elements not yet returned.
    remaining: usize,
}

impl<'a, T> PersistentArrayIterator<'a, T> {
    pub(super) fn new(root: &'a Node<T>, length: usize) -> Self {
        let mut pending = SmallVec::new();
        pending.push(&*root.children);
        Self {
            pending,
            values: root.values.iter(),
            remaining: length,
        }
    }
}

impl<'a, T> Iterator for PersistentArrayIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(element) = self.values.next() {
                self.remaining -= 1;
                return Some(element);
            }

            let siblings = self.pending.last_mut()?;
            let current: &'a [ReferenceCounter<Node<T>>] = *siblings;
            match current.split_first() {
                Some((child, rest)) => {
                    *siblings = rest;
                    let child: &'a Node<T> = child;
                    self.values = child.values.iter();
                    self.pending.push(&*child.children);
                }
                None => {
                    self.pending.pop();
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for PersistentArrayIterator<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> std::iter::FusedIterator for PersistentArrayIterator<'_, T> {}

/// A stack entry for the owning iterator.
///
/// Holds the node itself through its reference counter so the iterator
/// owns everything it still has to visit.
struct IntoIteratorStackEntry<T> {
    node: ReferenceCounter<Node<T>>,
    /// Index of the next child to enter.
    child_index: usize,
}

/// An owning iterator over elements of a
/// [`PersistentArray`](super::PersistentArray).
///
/// Nodes may be shared with other versions of the array, so elements are
/// cloned out of the tree as they are returned.
pub struct PersistentArrayIntoIterator<T> {
    pending: SmallVec<[IntoIteratorStackEntry<T>; STACK_CAPACITY]>,
    /// Values of the node currently being visited.
    values: ReferenceCounter<[T]>,
    /// Position of the next value within `values`.
    value_index: usize,
    remaining: usize,
}

impl<T> PersistentArrayIntoIterator<T> {
    pub(super) fn new(root: ReferenceCounter<Node<T>>, length: usize) -> Self {
        let values = ReferenceCounter::clone(&root.values);
        let mut pending = SmallVec::new();
        pending.push(IntoIteratorStackEntry {
            node: root,
            child_index: 0,
        });
        Self {
            pending,
            values,
            value_index: 0,
            remaining: length,
        }
    }
}

impl<T: Clone> Iterator for PersistentArrayIntoIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(element) = self.values.get(self.value_index) {
                self.value_index += 1;
                self.remaining -= 1;
                return Some(element.clone());
            }

            let entry = self.pending.last_mut()?;
            if let Some(child) = entry.node.children.get(entry.child_index).cloned() {
                entry.child_index += 1;
                self.values = ReferenceCounter::clone(&child.values);
                self.value_index = 0;
                self.pending.push(IntoIteratorStackEntry {
                    node: child,
                    child_index: 0,
                });
            } else {
                self.pending.pop();
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: Clone> ExactSizeIterator for PersistentArrayIntoIterator<T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T: Clone> std::iter::FusedIterator for PersistentArrayIntoIterator<T> {}
