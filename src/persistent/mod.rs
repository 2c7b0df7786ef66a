//! Persistent (immutable) fixed-length array.
//!
//! This module provides [`PersistentArray`], an indexed container whose
//! updates return new versions while every earlier version stays valid:
//!
//! - [`PersistentArray`]: the array handle
//! - [`ArrayError`]: failures reported by indexing, searching, and lock-step
//!   traversal
//! - [`order`]: the arithmetic that picks a tree's branching factor and height
//!
//! # Structural Sharing
//!
//! An update rebuilds only the nodes on the path to the updated element.
//! All other nodes are shared by reference counting between the versions.
//!
//! # Examples
//!
//! ```rust
//! use persistent_array::persistent::PersistentArray;
//!
//! let array: PersistentArray<i32> = (0..100).collect();
//! assert_eq!(array.get(50), Ok(&50));
//!
//! // Structural sharing: the original array is preserved
//! let updated = array.set(50, 999).unwrap();
//! assert_eq!(array.get(50), Ok(&50));     // Original unchanged
//! assert_eq!(updated.get(50), Ok(&999));  // New version
//! ```

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled (the default), this is `std::sync::Arc`,
/// which lets arrays cross threads.
///
/// When the `arc` feature is disabled, this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

mod array;
mod error;

pub use array::PersistentArray;
pub use array::PersistentArrayIntoIterator;
pub use array::PersistentArrayIterator;
pub use array::order;
pub use error::ArrayError;

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod reference_counter_tests {
    use super::ReferenceCounter;
    use rstest::rstest;

    #[rstest]
    fn test_reference_counter_strong_count() {
        let reference_counter: ReferenceCounter<i32> = ReferenceCounter::new(42);
        assert_eq!(ReferenceCounter::strong_count(&reference_counter), 1);
        let reference_counter_clone = reference_counter.clone();
        assert_eq!(ReferenceCounter::strong_count(&reference_counter), 2);
        drop(reference_counter_clone);
        assert_eq!(ReferenceCounter::strong_count(&reference_counter), 1);
    }
}
