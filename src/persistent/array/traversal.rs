//! Depth-first traversals shared by every bulk operation.
//!
//! All traversals follow one pre-order pattern: a node's own values in
//! order, whose indices are `offset + position`, then each child in order.
//! Right folds walk the exact reverse of that order. Lock-step traversals of
//! two arrays compare the local shape of every pair of nodes they visit and
//! stop at the first pair that differs.

use std::ops::{ControlFlow, Deref};

use super::PersistentArray;
use super::node::Node;
use crate::persistent::{ArrayError, ReferenceCounter};

// =============================================================================
// Node Walks
// =============================================================================

impl<T> Node<T> {
    /// Pre-order walk that stops at the first `Break`.
    fn try_walk<'a, B, F>(&'a self, visit: &mut F) -> ControlFlow<B>
    where
        F: FnMut(usize, &'a T) -> ControlFlow<B>,
    {
        for (position, value) in self.values.iter().enumerate() {
            visit(self.offset + position, value)?;
        }
        for child in &self.children {
            child.try_walk(visit)?;
        }
        ControlFlow::Continue(())
    }

    /// Pre-order fold.
    fn fold_indexed<'a, B, F>(&'a self, init: B, function: &mut F) -> B
    where
        F: FnMut(B, usize, &'a T) -> B,
    {
        let accumulator = self
            .values
            .iter()
            .enumerate()
            .fold(init, |accumulator, (position, value)| {
                function(accumulator, self.offset + position, value)
            });
        self.children
            .iter()
            .fold(accumulator, |accumulator, child| {
                child.fold_indexed(accumulator, function)
            })
    }

    /// Fold over the reverse of the pre-order: children last to first, then
    /// this node's values last to first. Recursion depth is the tree height.
    fn fold_back_indexed<'a, B, F>(&'a self, init: B, function: &mut F) -> B
    where
        F: FnMut(usize, &'a T, B) -> B,
    {
        let accumulator = self
            .children
            .iter()
            .rev()
            .fold(init, |accumulator, child| {
                child.fold_back_indexed(accumulator, function)
            });
        self.values
            .iter()
            .enumerate()
            .rev()
            .fold(accumulator, |accumulator, (position, value)| {
                function(self.offset + position, value, accumulator)
            })
    }

    /// Copies the shape of this subtree, replacing every value.
    fn map_indexed<U, F>(&self, function: &mut F) -> Node<U>
    where
        F: FnMut(usize, &T) -> U,
    {
        let values: Vec<U> = self
            .values
            .iter()
            .enumerate()
            .map(|(position, value)| function(self.offset + position, value))
            .collect();
        let children: Vec<ReferenceCounter<Node<U>>> = self
            .children
            .iter()
            .map(|child| ReferenceCounter::new(child.map_indexed(function)))
            .collect();

        Node {
            offset: self.offset,
            values: ReferenceCounter::from(values),
            children: children.into_boxed_slice(),
        }
    }

    #[cfg(feature = "rayon")]
    fn par_map<U, F>(&self, function: &F) -> Node<U>
    where
        T: Send + Sync,
        U: Send + Sync,
        F: Fn(&T) -> U + Sync,
    {
        use rayon::prelude::*;

        let values: Vec<U> = self.values.iter().map(function).collect();
        let children: Vec<ReferenceCounter<Node<U>>> = self.children[..]
            .par_iter()
            .map(|child| ReferenceCounter::new(child.par_map(function)))
            .collect();

        Node {
            offset: self.offset,
            values: ReferenceCounter::from(values),
            children: children.into_boxed_slice(),
        }
    }

    // =========================================================================
    // Lock-step Walks
    // =========================================================================

    fn check_local_shape<U>(&self, other: &Node<U>) -> Result<(), ArrayError> {
        if self.same_local_shape(other) {
            return Ok(());
        }
        tracing::debug!(
            offset = self.offset,
            left_values = self.values.len(),
            right_values = other.values.len(),
            left_children = self.children.len(),
            right_children = other.children.len(),
            "lock-step walk diverged"
        );
        Err(ArrayError::LengthMismatch {
            offset: self.offset,
        })
    }

    /// Compares shapes in pre-order without visiting any element.
    fn ensure_same_shape<U>(&self, other: &Node<U>) -> Result<(), ArrayError> {
        self.check_local_shape(other)?;
        self.children
            .iter()
            .zip(other.children.iter())
            .try_for_each(|(left, right)| left.ensure_same_shape(right))
    }

    fn fold2<U, B, F>(&self, other: &Node<U>, init: B, function: &mut F) -> Result<B, ArrayError>
    where
        F: FnMut(B, &T, &U) -> B,
    {
        self.check_local_shape(other)?;
        let accumulator = self
            .values
            .iter()
            .zip(other.values.iter())
            .fold(init, |accumulator, (left, right)| {
                function(accumulator, left, right)
            });
        self.children
            .iter()
            .zip(other.children.iter())
            .try_fold(accumulator, |accumulator, (left, right)| {
                left.fold2(right, accumulator, function)
            })
    }

    fn fold_back2<U, B, F>(
        &self,
        other: &Node<U>,
        init: B,
        function: &mut F,
    ) -> Result<B, ArrayError>
    where
        F: FnMut(&T, &U, B) -> B,
    {
        self.check_local_shape(other)?;
        let accumulator = self
            .children
            .iter()
            .zip(other.children.iter())
            .rev()
            .try_fold(init, |accumulator, (left, right)| {
                left.fold_back2(right, accumulator, function)
            })?;
        Ok(self
            .values
            .iter()
            .zip(other.values.iter())
            .rev()
            .fold(accumulator, |accumulator, (left, right)| {
                function(left, right, accumulator)
            }))
    }

    fn map2<U, V, F>(&self, other: &Node<U>, function: &mut F) -> Result<Node<V>, ArrayError>
    where
        F: FnMut(&T, &U) -> V,
    {
        self.check_local_shape(other)?;
        let values: Vec<V> = self
            .values
            .iter()
            .zip(other.values.iter())
            .map(|(left, right)| function(left, right))
            .collect();
        let children = self
            .children
            .iter()
            .zip(other.children.iter())
            .map(|(left, right)| left.map2(right, function).map(ReferenceCounter::new))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Node {
            offset: self.offset,
            values: ReferenceCounter::from(values),
            children: children.into_boxed_slice(),
        })
    }
}

// =============================================================================
// Single-array Traversals
// =============================================================================

impl<T> PersistentArray<T> {
    /// Calls `function` on every element in index order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_array::persistent::PersistentArray;
    ///
    /// let array: PersistentArray<i32> = (1..=4).collect();
    /// let mut total = 0;
    /// array.for_each(|element| total += element);
    /// assert_eq!(total, 10);
    /// ```
    pub fn for_each<F>(&self, mut function: F)
    where
        F: FnMut(&T),
    {
        self.for_each_indexed(|_, element| function(element));
    }

    /// Calls `function` on every index and element in index order.
    pub fn for_each_indexed<F>(&self, mut function: F)
    where
        F: FnMut(usize, &T),
    {
        self.root
            .fold_indexed((), &mut |(), index, element| function(index, element));
    }

    /// Returns a new array with `function` applied to every element.
    ///
    /// The result has the same length, so its tree copies this tree's shape
    /// instead of being rebuilt.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_array::persistent::PersistentArray;
    ///
    /// let array: PersistentArray<i32> = (1..=3).collect();
    /// let doubled = array.map(|element| element * 2);
    /// assert_eq!(doubled.to_vec(), vec![2, 4, 6]);
    /// ```
    #[must_use]
    pub fn map<U, F>(&self, mut function: F) -> PersistentArray<U>
    where
        F: FnMut(&T) -> U,
    {
        self.map_indexed(|_, element| function(element))
    }

    /// Returns a new array with `function` applied to every index and
    /// element.
    #[must_use]
    pub fn map_indexed<U, F>(&self, mut function: F) -> PersistentArray<U>
    where
        F: FnMut(usize, &T) -> U,
    {
        PersistentArray {
            root: ReferenceCounter::new(self.root.map_indexed(&mut function)),
        }
    }

    /// Folds the elements from first to last:
    /// `function(... function(function(init, e0), e1) ..., en)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_array::persistent::PersistentArray;
    ///
    /// let array: PersistentArray<i32> = (1..=4).collect();
    /// let digits = array.fold_left(0, |accumulator, element| accumulator * 10 + element);
    /// assert_eq!(digits, 1234);
    /// ```
    pub fn fold_left<B, F>(&self, init: B, mut function: F) -> B
    where
        F: FnMut(B, &T) -> B,
    {
        self.fold_left_indexed(init, |accumulator, _, element| {
            function(accumulator, element)
        })
    }

    /// Like [`fold_left`](Self::fold_left), also passing each element's index.
    pub fn fold_left_indexed<B, F>(&self, init: B, mut function: F) -> B
    where
        F: FnMut(B, usize, &T) -> B,
    {
        self.root.fold_indexed(init, &mut function)
    }

    /// Folds the elements from last to first:
    /// `function(e0, function(e1, ... function(en, init)))`.
    ///
    /// No intermediate collection is built.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_array::persistent::PersistentArray;
    ///
    /// let array: PersistentArray<i32> = (1..=4).collect();
    /// let digits = array.fold_right(0, |element, accumulator| accumulator * 10 + element);
    /// assert_eq!(digits, 4321);
    /// ```
    pub fn fold_right<B, F>(&self, init: B, mut function: F) -> B
    where
        F: FnMut(&T, B) -> B,
    {
        self.fold_right_indexed(init, |_, element, accumulator| {
            function(element, accumulator)
        })
    }

    /// Like [`fold_right`](Self::fold_right), also passing each element's
    /// index.
    pub fn fold_right_indexed<B, F>(&self, init: B, mut function: F) -> B
    where
        F: FnMut(usize, &T, B) -> B,
    {
        self.root.fold_back_indexed(init, &mut function)
    }

    /// Returns `true` if every element satisfies `predicate`.
    ///
    /// Stops at the first element that does not.
    pub fn for_all<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        self.for_all_indexed(|_, element| predicate(element))
    }

    /// Returns `true` if every index and element satisfies `predicate`.
    ///
    /// Stops at the first pair that does not.
    pub fn for_all_indexed<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(usize, &T) -> bool,
    {
        self.root
            .try_walk(&mut |index, element| {
                if predicate(index, element) {
                    ControlFlow::Continue(())
                } else {
                    ControlFlow::Break(())
                }
            })
            .is_continue()
    }

    /// Returns `true` if any element satisfies `predicate`.
    ///
    /// The predicate is never called after the first element that
    /// satisfies it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_array::persistent::PersistentArray;
    ///
    /// let array: PersistentArray<i32> = (0..10).collect();
    /// let mut calls = 0;
    /// assert!(array.exists(|element| {
    ///     calls += 1;
    ///     *element == 2
    /// }));
    /// assert_eq!(calls, 3);
    /// ```
    pub fn exists<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        self.exists_indexed(|_, element| predicate(element))
    }

    /// Returns `true` if any index and element satisfy `predicate`.
    ///
    /// The predicate is never called after the first pair that satisfies
    /// it.
    pub fn exists_indexed<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(usize, &T) -> bool,
    {
        self.root
            .try_walk(&mut |index, element| {
                if predicate(index, element) {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            })
            .is_break()
    }

    /// Returns the first element that satisfies `predicate`.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::NotFound`] if no element satisfies it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_array::persistent::{ArrayError, PersistentArray};
    ///
    /// let array: PersistentArray<i32> = (0..10).collect();
    /// assert_eq!(array.find(|element| element % 4 == 3), Ok(&3));
    /// assert_eq!(array.find(|element| *element > 10), Err(ArrayError::NotFound));
    /// ```
    pub fn find<P>(&self, mut predicate: P) -> Result<&T, ArrayError>
    where
        P: FnMut(&T) -> bool,
    {
        self.find_indexed(|_, element| predicate(element))
            .map(|(_, element)| element)
    }

    /// Returns the index and element of the first pair that satisfies
    /// `predicate`.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::NotFound`] if no pair satisfies it.
    pub fn find_indexed<P>(&self, mut predicate: P) -> Result<(usize, &T), ArrayError>
    where
        P: FnMut(usize, &T) -> bool,
    {
        let search = self.root.try_walk(&mut |index, element| {
            if predicate(index, element) {
                ControlFlow::Break((index, element))
            } else {
                ControlFlow::Continue(())
            }
        });
        match search {
            ControlFlow::Break(found) => Ok(found),
            ControlFlow::Continue(()) => Err(ArrayError::NotFound),
        }
    }

    /// Returns every element that satisfies `predicate`, in index order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_array::persistent::PersistentArray;
    ///
    /// let array: PersistentArray<i32> = (0..10).collect();
    /// assert_eq!(array.find_all(|element| element % 3 == 0), vec![&0, &3, &6, &9]);
    /// assert!(array.find_all(|element| *element > 10).is_empty());
    /// ```
    pub fn find_all<P>(&self, mut predicate: P) -> Vec<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.root.fold_indexed(Vec::new(), &mut |mut found, _, element| {
            if predicate(element) {
                found.push(element);
            }
            found
        })
    }

    /// Returns the index and element of every pair that satisfies
    /// `predicate`, in index order.
    pub fn find_all_indexed<P>(&self, mut predicate: P) -> Vec<(usize, &T)>
    where
        P: FnMut(usize, &T) -> bool,
    {
        self.root
            .fold_indexed(Vec::new(), &mut |mut found, index, element| {
                if predicate(index, element) {
                    found.push((index, element));
                }
                found
            })
    }
}

impl<T: PartialEq> PersistentArray<T> {
    /// Returns `true` if some element equals `target`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_array::persistent::PersistentArray;
    ///
    /// let array: PersistentArray<i32> = (0..10).collect();
    /// assert!(array.contains(&7));
    /// assert!(!array.contains(&70));
    /// ```
    pub fn contains(&self, target: &T) -> bool {
        self.exists(|element| element == target)
    }
}

impl<T: Deref> PersistentArray<T> {
    /// Returns `true` if some element points at the same value as `target`.
    ///
    /// Compares addresses, not values: an equal value held in a different
    /// allocation does not count.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_array::persistent::PersistentArray;
    /// use std::rc::Rc;
    ///
    /// let shared = Rc::new(String::from("state"));
    /// let array = PersistentArray::from([Rc::clone(&shared)]);
    ///
    /// assert!(array.contains_by_identity(&shared));
    /// assert!(!array.contains_by_identity(&Rc::new(String::from("state"))));
    /// ```
    pub fn contains_by_identity(&self, target: &T) -> bool {
        let target: &T::Target = target;
        self.exists(|element| std::ptr::eq::<T::Target>(&**element, target))
    }
}

#[cfg(feature = "rayon")]
impl<T: Send + Sync> PersistentArray<T> {
    /// Like [`map`](Self::map), but maps sibling subtrees in parallel on the
    /// rayon thread pool.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_array::persistent::PersistentArray;
    ///
    /// let array: PersistentArray<u64> = (0..1000).collect();
    /// let squares = array.par_map(|element| element * element);
    /// assert_eq!(squares.get(999), Ok(&998_001));
    /// ```
    #[must_use]
    pub fn par_map<U, F>(&self, function: F) -> PersistentArray<U>
    where
        U: Send + Sync,
        F: Fn(&T) -> U + Send + Sync,
    {
        PersistentArray {
            root: ReferenceCounter::new(self.root.par_map(&function)),
        }
    }
}

// =============================================================================
// Lock-step Traversals
// =============================================================================

impl<T> PersistentArray<T> {
    /// Calls `function` on each pair of elements at equal indices, in index
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::LengthMismatch`] if the arrays differ in
    /// length. `function` is not called in that case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_array::persistent::PersistentArray;
    ///
    /// let left: PersistentArray<i32> = (0..5).collect();
    /// let right: PersistentArray<i32> = (10..15).collect();
    /// let mut sums = Vec::new();
    /// left.for_each2(&right, |l, r| sums.push(l + r)).unwrap();
    /// assert_eq!(sums, vec![10, 12, 14, 16, 18]);
    /// ```
    pub fn for_each2<U, F>(&self, other: &PersistentArray<U>, mut function: F) -> Result<(), ArrayError>
    where
        F: FnMut(&T, &U),
    {
        self.fold_left2(other, (), |(), left, right| function(left, right))
    }

    /// Returns a new array of `function` applied to each pair of elements at
    /// equal indices.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::LengthMismatch`] if the arrays differ in
    /// length. No partial result is produced.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_array::persistent::{ArrayError, PersistentArray};
    ///
    /// let left: PersistentArray<i32> = (0..10).collect();
    /// let right: PersistentArray<i32> = (0..10).collect();
    /// let products = left.map2(&right, |l, r| l * r).unwrap();
    /// assert_eq!(products.get(9), Ok(&81));
    ///
    /// let longer: PersistentArray<i32> = (0..11).collect();
    /// assert!(matches!(
    ///     left.map2(&longer, |l, r| l * r),
    ///     Err(ArrayError::LengthMismatch { .. })
    /// ));
    /// ```
    pub fn map2<U, V, F>(
        &self,
        other: &PersistentArray<U>,
        mut function: F,
    ) -> Result<PersistentArray<V>, ArrayError>
    where
        F: FnMut(&T, &U) -> V,
    {
        self.root.ensure_same_shape(&other.root)?;
        let root = self.root.map2(&other.root, &mut function)?;
        Ok(PersistentArray {
            root: ReferenceCounter::new(root),
        })
    }

    /// Folds pairs of elements at equal indices from first to last.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::LengthMismatch`] if the arrays differ in
    /// length. `function` is not called in that case.
    pub fn fold_left2<U, B, F>(
        &self,
        other: &PersistentArray<U>,
        init: B,
        mut function: F,
    ) -> Result<B, ArrayError>
    where
        F: FnMut(B, &T, &U) -> B,
    {
        self.root.ensure_same_shape(&other.root)?;
        self.root.fold2(&other.root, init, &mut function)
    }

    /// Folds pairs of elements at equal indices from last to first.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::LengthMismatch`] if the arrays differ in
    /// length. `function` is not called in that case.
    pub fn fold_right2<U, B, F>(
        &self,
        other: &PersistentArray<U>,
        init: B,
        mut function: F,
    ) -> Result<B, ArrayError>
    where
        F: FnMut(&T, &U, B) -> B,
    {
        self.root.ensure_same_shape(&other.root)?;
        self.root.fold_back2(&other.root, init, &mut function)
    }
}
