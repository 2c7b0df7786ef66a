//! Persistent (immutable) fixed-length array based on an offset tree.
//!
//! This module provides [`PersistentArray`], an indexed container whose
//! updates return new versions while earlier versions remain valid.
//!
//! # Overview
//!
//! Elements live in a balanced tree. Every node holds up to `order - 1`
//! elements of its own followed by up to `order` children, and records the
//! number of elements preceding its own values (its offset). The order is
//! the smallest branching factor whose `order`-level tree fits the whole
//! array, so the tree never has more levels than its order.
//!
//! - O(order²) `get` and `set`, with at most `order` offset comparisons
//!   per level
//! - O(height) `len`, read off the rightmost path
//! - O(N) construction, iteration, mapping and folding
//!
//! `set` copies only the nodes on the path to the updated element. Every
//! other node, and the values of every copied ancestor, is shared with the
//! previous version.
//!
//! # Examples
//!
//! ```rust
//! use persistent_array::persistent::PersistentArray;
//!
//! let array = PersistentArray::from(["a", "b", "c", "d", "e", "f"]);
//!
//! let forwards = array.fold_left(String::new(), |accumulator, element| accumulator + *element);
//! let backwards = array.fold_right(String::new(), |element, accumulator| accumulator + *element);
//! assert_eq!(forwards, "abcdef");
//! assert_eq!(backwards, "fedcba");
//!
//! // Structural sharing: the original array is preserved
//! let updated = array.set(0, "z").unwrap();
//! assert_eq!(array.get(0), Ok(&"a"));
//! assert_eq!(updated.get(0), Ok(&"z"));
//! ```

mod accessor;
mod builder;
mod iterator;
mod node;
pub mod order;
mod traversal;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;

use super::ReferenceCounter;
use node::Node;
use order::Layout;

pub use iterator::PersistentArrayIntoIterator;
pub use iterator::PersistentArrayIterator;

// =============================================================================
// PersistentArray Definition
// =============================================================================

/// A persistent (immutable) array of fixed length.
///
/// Cloning a `PersistentArray` is O(1): both handles refer to the same tree.
///
/// # Time Complexity
///
/// | Operation          | Complexity                      |
/// |--------------------|---------------------------------|
/// | `from_vec`         | O(N)                            |
/// | `len`              | O(height)                       |
/// | `get`              | O(order²)                       |
/// | `set`              | O(order²) plus O(height) nodes  |
/// | `iter`             | O(height) to create, O(N) total |
/// | `map`, folds       | O(N)                            |
///
/// # Examples
///
/// ```rust
/// use persistent_array::persistent::PersistentArray;
///
/// let array: PersistentArray<i32> = (0..100).collect();
/// assert_eq!(array.len(), 100);
/// assert_eq!(array.get(50), Ok(&50));
/// ```
pub struct PersistentArray<T> {
    root: ReferenceCounter<Node<T>>,
}

impl<T> PersistentArray<T> {
    /// Creates an empty array.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_array::persistent::PersistentArray;
    ///
    /// let array: PersistentArray<i32> = PersistentArray::new();
    /// assert!(array.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::from_root(Node::empty())
    }

    #[inline]
    fn from_root(root: Node<T>) -> Self {
        Self {
            root: ReferenceCounter::new(root),
        }
    }

    /// Creates an array holding the elements of `elements` in order.
    ///
    /// # Complexity
    ///
    /// O(N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_array::persistent::PersistentArray;
    ///
    /// let array = PersistentArray::from_vec(vec![1, 2, 3]);
    /// assert_eq!(array.to_vec(), vec![1, 2, 3]);
    /// ```
    #[must_use]
    pub fn from_vec(elements: Vec<T>) -> Self {
        Self::from_root(builder::build(elements))
    }

    /// Creates an array of `count` elements where the element at index `i`
    /// is `function(i)`.
    ///
    /// The function is called in index order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_array::persistent::PersistentArray;
    ///
    /// let squares = PersistentArray::from_fn(5, |index| index * index);
    /// assert_eq!(squares.to_vec(), vec![0, 1, 4, 9, 16]);
    /// ```
    #[must_use]
    pub fn from_fn<F>(count: usize, function: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        Self::from_vec((0..count).map(function).collect())
    }

    /// Like [`from_fn`](Self::from_fn), but takes a signed count. A negative
    /// count yields an empty array.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_array::persistent::PersistentArray;
    ///
    /// let array = PersistentArray::from_fn_signed(-5, |index| index);
    /// assert!(array.is_empty());
    /// assert!(array.get(0).is_err());
    /// ```
    #[must_use]
    pub fn from_fn_signed<F>(count: isize, function: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        Self::from_fn(usize::try_from(count).unwrap_or(0), function)
    }

    /// Returns the order and height of this array's tree.
    ///
    /// Both are determined by the length alone.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_array::persistent::PersistentArray;
    /// use persistent_array::persistent::order::Layout;
    ///
    /// let array: PersistentArray<i32> = (0..10).collect();
    /// assert_eq!(array.layout(), Layout { order: 3, height: 3 });
    /// ```
    #[must_use]
    pub fn layout(&self) -> Layout {
        Layout::for_count(self.len())
    }

    /// Returns an iterator over references to the elements, in index order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_array::persistent::PersistentArray;
    ///
    /// let array: PersistentArray<i32> = (1..=5).collect();
    /// let collected: Vec<&i32> = array.iter().collect();
    /// assert_eq!(collected, vec![&1, &2, &3, &4, &5]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> PersistentArrayIterator<'_, T> {
        PersistentArrayIterator::new(&self.root, self.len())
    }
}

impl<T: Clone> PersistentArray<T> {
    /// Creates an array of `count` copies of `value`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_array::persistent::PersistentArray;
    ///
    /// let array = PersistentArray::repeat(3, 'x');
    /// assert_eq!(array.to_vec(), vec!['x', 'x', 'x']);
    /// ```
    #[must_use]
    pub fn repeat(count: usize, value: T) -> Self {
        Self::from_vec(vec![value; count])
    }

    /// Creates an array by cloning the elements of a slice.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_array::persistent::PersistentArray;
    ///
    /// let array = PersistentArray::from_slice(&[1, 2, 3]);
    /// assert_eq!(array.len(), 3);
    /// ```
    #[must_use]
    pub fn from_slice(slice: &[T]) -> Self {
        Self::from_vec(slice.to_vec())
    }

    /// Returns the elements as a `Vec`, in index order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_array::persistent::PersistentArray;
    ///
    /// let array: PersistentArray<i32> = (1..=3).collect();
    /// assert_eq!(array.to_vec(), vec![1, 2, 3]);
    /// ```
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }

    /// Returns the elements as a boxed slice, in index order.
    #[must_use]
    pub fn to_boxed_slice(&self) -> Box<[T]> {
        self.to_vec().into_boxed_slice()
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Clone for PersistentArray<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            root: ReferenceCounter::clone(&self.root),
        }
    }
}

impl<T> Default for PersistentArray<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for PersistentArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T> From<Vec<T>> for PersistentArray<T> {
    #[inline]
    fn from(elements: Vec<T>) -> Self {
        Self::from_vec(elements)
    }
}

impl<T, const N: usize> From<[T; N]> for PersistentArray<T> {
    #[inline]
    fn from(elements: [T; N]) -> Self {
        Self::from_vec(Vec::from(elements))
    }
}

impl<T: Clone> IntoIterator for PersistentArray<T> {
    type Item = T;
    type IntoIter = PersistentArrayIntoIterator<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        let length = self.len();
        PersistentArrayIntoIterator::new(self.root, length)
    }
}

impl<'a, T> IntoIterator for &'a PersistentArray<T> {
    type Item = &'a T;
    type IntoIter = PersistentArrayIterator<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq> PartialEq for PersistentArray<T> {
    fn eq(&self, other: &Self) -> bool {
        if ReferenceCounter::ptr_eq(&self.root, &other.root) {
            return true;
        }
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for PersistentArray<T> {}

/// Hashes the length followed by every element in index order, so equal
/// arrays hash equally.
impl<T: Hash> Hash for PersistentArray<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for element in self {
            element.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for PersistentArray<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for PersistentArray<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "[")?;
        let mut first = true;
        for element in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "]")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for PersistentArray<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
struct PersistentArrayVisitor<T> {
    marker: std::marker::PhantomData<T>,
}

#[cfg(feature = "serde")]
impl<'de, T> serde::de::Visitor<'de> for PersistentArrayVisitor<T>
where
    T: serde::Deserialize<'de>,
{
    type Value = PersistentArray<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        const MAX_PREALLOCATE: usize = 4096;
        let capacity = seq.size_hint().unwrap_or(0).min(MAX_PREALLOCATE);
        let mut elements = Vec::with_capacity(capacity);
        while let Some(element) = seq.next_element()? {
            elements.push(element);
        }
        Ok(PersistentArray::from_vec(elements))
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for PersistentArray<T>
where
    T: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(PersistentArrayVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================


// =============================================================================
// Thread Safety Tests (arc feature only)
// =============================================================================
