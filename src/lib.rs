//! # persistent-array
//!
//! A fixed-length persistent (immutable, copy-on-write) array.
//!
//! ## Overview
//!
//! [`PersistentArray`](persistent::PersistentArray) stores its elements in a
//! balanced tree whose nodes carry a prefix-sum offset. Reading an index
//! descends the tree by comparing offsets, and updating an index rebuilds
//! only the nodes on that root-to-leaf path. Every other node is shared
//! between the old and the new version, so keeping many versions of a
//! large array alive is cheap.
//!
//! - **Construction**: from any iterator, a generator function, a repeated
//!   value, or a fixed-size array
//! - **Access**: `get`, `set`, `update_with`, `len`
//! - **Traversal**: iteration, mapping, left and right folds, predicate
//!   scans, searching, and lock-step operations over two arrays
//!
//! ## Feature Flags
//!
//! - `persistent`: The persistent array (enabled by default)
//! - `arc`: Use `Arc` instead of `Rc` so arrays are `Send + Sync`
//!   (enabled by default)
//! - `serde`: Serialize and deserialize arrays as sequences
//! - `rayon`: Parallel mapping (implies `arc`)
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use persistent_array::prelude::*;
//!
//! let array: PersistentArray<i32> = (0..100).collect();
//! let updated = array.set(42, -1).unwrap();
//!
//! assert_eq!(array.get(42), Ok(&42));
//! assert_eq!(updated.get(42), Ok(&-1));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use persistent_array::prelude::*;
/// ```
pub mod prelude {
    #[cfg(feature = "persistent")]
    pub use crate::persistent::*;
}

#[cfg(feature = "persistent")]
pub mod persistent;
