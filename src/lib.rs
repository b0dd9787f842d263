//! # avl-map
//!
//! A self-balancing ordered map built on an AVL tree.
//!
//! ## Overview
//!
//! [`AvlTreeMap`](map::AvlTreeMap) keeps its entries sorted by key and
//! keeps every node's subtrees within one level of each other, so lookups,
//! insertions and removals all run in O(log N). On top of the usual map
//! operations it provides:
//!
//! - **Ordered iteration**: lazy, stack-driven in-order traversal
//! - **Closest-key lookup**: nearest key by numeric distance
//! - **Diagnostics**: a tree-shape pretty printer and an invariant checker
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for `AvlTreeMap`
//! - `tracing`: trace-level events for every rotation
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use avl_map::prelude::*;
//!
//! let mut map = AvlTreeMap::new();
//! map.insert(10, 'A');
//! map.insert(4, 'C');
//! map.insert(15, 'I');
//!
//! assert_eq!(map.get(&4), Some(&'C'));
//! assert_eq!(map.closest(&14), Some(&'I'));
//! assert!(map.validate().is_ok());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use avl_map::prelude::*;
/// ```
pub mod prelude {
    pub use crate::map::*;
}

pub mod map;
