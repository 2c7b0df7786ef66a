//! Index-addressed reads and path-copying updates.
//!
//! A descent starts at the root. If the index lies before the end of the
//! current node's own values, or the node has no children, the node itself
//! must hold the index. Otherwise the descent continues into the last child
//! whose offset does not exceed the index.

use std::ops::Index;

use super::PersistentArray;
use super::node::Node;
use crate::persistent::{ArrayError, ReferenceCounter};

impl<T> Node<T> {
    /// Position of the child that must contain `index`, if any.
    ///
    /// Scans at most `order` children from the left.
    fn child_position(&self, index: usize) -> Option<usize> {
        if index < self.values_end() {
            return None;
        }
        self.children
            .iter()
            .take_while(|child| child.offset <= index)
            .count()
            .checked_sub(1)
    }

    /// Position of `index` within this node's own values.
    fn local_position(&self, index: usize) -> Result<usize, ArrayError> {
        index
            .checked_sub(self.offset)
            .filter(|position| *position < self.values.len())
            .ok_or(ArrayError::IndexOutOfRange { index })
    }

    fn lookup(&self, index: usize) -> Result<&T, ArrayError> {
        let mut node = self;
        while let Some(position) = node.child_position(index) {
            node = &*node.children[position];
        }
        let position = node.local_position(index)?;
        Ok(&node.values[position])
    }

    /// The node holding the highest indices: the end of the rightmost path.
    fn rightmost(&self) -> &Self {
        let mut node = self;
        while let Some(last) = node.children.last() {
            node = &**last;
        }
        debug_assert!(node.is_fringe());
        node
    }

    /// Rebuilds the path to `index`, replacing the element there with
    /// `function(&old)`. Siblings and ancestor values are shared.
    fn replace_with<F>(&self, index: usize, function: F) -> Result<Self, ArrayError>
    where
        T: Clone,
        F: FnOnce(&T) -> T,
    {
        if let Some(position) = self.child_position(index) {
            let child = self.children[position].replace_with(index, function)?;
            let mut children = self.children.to_vec();
            children[position] = ReferenceCounter::new(child);
            return Ok(Self {
                offset: self.offset,
                values: ReferenceCounter::clone(&self.values),
                children: children.into_boxed_slice(),
            });
        }

        let position = self.local_position(index)?;
        let mut values = self.values.to_vec();
        values[position] = function(&values[position]);
        Ok(Self {
            offset: self.offset,
            values: ReferenceCounter::from(values),
            children: self.children.clone(),
        })
    }
}

impl<T> PersistentArray<T> {
    /// Returns the number of elements in the array.
    ///
    /// Read off the rightmost path of the tree: its last node holds the
    /// highest indices.
    ///
    /// # Complexity
    ///
    /// O(height)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_array::persistent::PersistentArray;
    ///
    /// let array: PersistentArray<i32> = (1..=5).collect();
    /// assert_eq!(array.len(), 5);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.root.rightmost().values_end()
    }

    /// Returns `true` if the array contains no elements.
    ///
    /// The root receives the first elements, so an array is empty exactly
    /// when its root holds no values.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.values.is_empty()
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::IndexOutOfRange`] if `index >= self.len()`.
    ///
    /// # Complexity
    ///
    /// O(order²)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_array::persistent::{ArrayError, PersistentArray};
    ///
    /// let array: PersistentArray<i32> = (1..=5).collect();
    /// assert_eq!(array.get(0), Ok(&1));
    /// assert_eq!(array.get(4), Ok(&5));
    /// assert_eq!(array.get(10), Err(ArrayError::IndexOutOfRange { index: 10 }));
    /// ```
    pub fn get(&self, index: usize) -> Result<&T, ArrayError> {
        self.root.lookup(index)
    }

    /// Returns a reference to the first element, or `None` if the array is
    /// empty.
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.root.values.first()
    }

    /// Returns a reference to the last element, or `None` if the array is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_array::persistent::PersistentArray;
    ///
    /// let array: PersistentArray<i32> = (1..=50).collect();
    /// assert_eq!(array.last(), Some(&50));
    /// ```
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.root.rightmost().values.last()
    }
}

impl<T: Clone> PersistentArray<T> {
    /// Returns a new array with the element at `index` replaced by `element`.
    ///
    /// Only the nodes on the path from the root to the element are copied.
    /// The original array is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::IndexOutOfRange`] if `index >= self.len()`.
    ///
    /// # Complexity
    ///
    /// O(order²) comparisons and O(height) new nodes
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_array::persistent::PersistentArray;
    ///
    /// let array: PersistentArray<i32> = (1..=5).collect();
    /// let updated = array.set(2, 100).unwrap();
    ///
    /// assert_eq!(updated.get(2), Ok(&100));
    /// assert_eq!(array.get(2), Ok(&3)); // Original unchanged
    /// ```
    pub fn set(&self, index: usize, element: T) -> Result<Self, ArrayError> {
        self.update_with(index, |_| element)
    }

    /// Returns a new array with the element at `index` replaced by
    /// `function` applied to it.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::IndexOutOfRange`] if `index >= self.len()`;
    /// `function` is not called in that case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_array::persistent::PersistentArray;
    ///
    /// let array: PersistentArray<i32> = (0..10).collect();
    /// let updated = array.update_with(7, |element| element * 10).unwrap();
    /// assert_eq!(updated.get(7), Ok(&70));
    /// ```
    pub fn update_with<F>(&self, index: usize, function: F) -> Result<Self, ArrayError>
    where
        F: FnOnce(&T) -> T,
    {
        let root = self.root.replace_with(index, function)?;
        Ok(Self {
            root: ReferenceCounter::new(root),
        })
    }
}

/// # Panics
///
/// Panics if `index` is out of range, like slice indexing.
impl<T> Index<usize> for PersistentArray<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        match self.get(index) {
            Ok(element) => element,
            Err(error) => panic!("{error}"),
        }
    }
}
