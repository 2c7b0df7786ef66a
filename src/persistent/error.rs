//! Error types for [`PersistentArray`](super::PersistentArray).
//!
//! Every failure is detected where the tree itself says the operation
//! cannot proceed: at the deepest node checked during an index descent,
//! or at the first node where two trees walked in lock-step disagree.

use thiserror::Error;

/// Represents errors that can occur when working with a persistent array.
///
/// # Examples
///
/// ```rust
/// use persistent_array::persistent::{ArrayError, PersistentArray};
///
/// let array: PersistentArray<i32> = (0..3).collect();
/// assert_eq!(array.get(3), Err(ArrayError::IndexOutOfRange { index: 3 }));
/// assert_eq!(
///     format!("{}", ArrayError::IndexOutOfRange { index: 3 }),
///     "index 3 is out of range"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArrayError {
    /// The index does not address an element of the array.
    #[error("index {index} is out of range")]
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
    },
    /// Two arrays walked in lock-step have different shapes, which means
    /// their lengths differ.
    #[error("arrays diverge in shape at offset {offset}")]
    LengthMismatch {
        /// Offset of the first node whose shape differs.
        offset: usize,
    },
    /// No element satisfies the search predicate.
    #[error("no element satisfies the predicate")]
    NotFound,
}
