//! Construction of balanced offset trees.
//!
//! The builder consumes its input once, left to right. Every node first
//! takes up to `order - 1` leading elements as its own values and then, if
//! it is above the last level and input remains, builds up to `order`
//! children from what follows. A running cursor supplies each node's offset,
//! so a pre-order walk of the finished tree yields the input unchanged.

use std::iter::Peekable;

use super::node::Node;
use super::order::Layout;
use crate::persistent::ReferenceCounter;

/// Builds a tree holding `elements` in order.
///
/// # Complexity
///
/// O(N)
pub(super) fn build<T>(elements: Vec<T>) -> Node<T> {
    let count = elements.len();
    let layout = Layout::for_count(count);

    tracing::trace!(
        count,
        order = layout.order,
        height = layout.height,
        "building persistent array"
    );

    let mut builder = Builder {
        elements: elements.into_iter().peekable(),
        layout,
        cursor: 0,
    };
    let root = builder.node(layout.height);

    debug_assert!(builder.elements.peek().is_none());
    debug_assert_eq!(builder.cursor, count);

    root
}

struct Builder<I: Iterator> {
    elements: Peekable<I>,
    layout: Layout,
    /// Number of elements consumed so far; the next node's offset.
    cursor: usize,
}

impl<T, I: Iterator<Item = T>> Builder<I> {
    /// Builds one node. `levels` counts this node's level and every level
    /// below it; a node on the last level is a fringe node.
    fn node(&mut self, levels: u32) -> Node<T> {
        let offset = self.cursor;
        let local_capacity = self.layout.order - 1;
        let values: Vec<T> = self.elements.by_ref().take(local_capacity).collect();
        self.cursor += values.len();

        let mut children = Vec::new();
        if levels > 1 {
            while children.len() < self.layout.order && self.elements.peek().is_some() {
                children.push(ReferenceCounter::new(self.node(levels - 1)));
            }
        }

        Node {
            offset,
            values: ReferenceCounter::from(values),
            children: children.into_boxed_slice(),
        }
    }
}
