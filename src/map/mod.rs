//! Ordered map based on an AVL tree.
//!
//! This module provides [`AvlTreeMap`], an ordered map that stays balanced
//! under every insertion and removal.
//!
//! # Overview
//!
//! An AVL tree is a binary search tree in which, for every node, the heights
//! of the two subtrees differ by at most one. Each node caches the height of
//! its subtree; after an insertion or removal, every node on the path back
//! to the root refreshes its height and, if the difference reached two,
//! restores balance with one or two rotations.
//!
//! - O(log N) get
//! - O(log N) insert
//! - O(log N) remove
//! - O(log N) closest-key lookup
//! - O(log N) min/max
//! - O(1) len and `is_empty`
//!
//! A tree holding N entries is never taller than `1.44 * log2(N + 2)`.
//!
//! # Examples
//!
//! ```rust
//! use avl_map::map::AvlTreeMap;
//!
//! let mut map = AvlTreeMap::new();
//! for (key, value) in [(4, 'C'), (8, 'K'), (9, 'P'), (10, 'A'), (11, 'F')] {
//!     map.insert(key, value);
//! }
//!
//! // Entries are always in sorted order
//! let keys: Vec<&i32> = map.keys().collect();
//! assert_eq!(keys, vec![&4, &8, &9, &10, &11]);
//!
//! // Nearest key lookup
//! assert_eq!(map.closest(&7), Some(&'K'));
//!
//! // Removal of a missing key is a no-op
//! assert_eq!(map.remove(&100), None);
//! assert_eq!(map.len(), 5);
//! ```
//!
//! # Internal Structure
//!
//! The tree maintains the following invariants after every mutation:
//! 1. Keys in a node's left subtree are smaller, keys in its right subtree larger
//! 2. No two nodes share a key
//! 3. Every node caches `1 + max(height(left), height(right))`, with the empty
//!    subtree at height 0
//! 4. For every node, `|height(left) - height(right)| <= 1`
//!
//! [`AvlTreeMap::validate`] checks all of them.

mod closest;
mod iter;
mod node;
mod pretty;
#[cfg(feature = "serde")]
mod serde_impl;
mod validate;

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;
use std::ops::Index;

pub use closest::Distance;
pub use iter::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
pub use pretty::PrettyTree;
pub use validate::InvariantViolation;

use node::{Link, Node};

// =============================================================================
// AvlTreeMap Definition
// =============================================================================

/// An ordered map based on a self-balancing AVL tree.
///
/// Keys must implement `Ord`. Entries are kept in ascending key order, and
/// the tree height stays logarithmic in the number of entries.
///
/// Each node is owned by its parent, so `clone` produces a fully independent
/// deep copy and dropping the map frees every node. To move the contents out
/// and leave an empty map behind, use [`std::mem::take`].
///
/// # Time Complexity
///
/// | Operation      | Complexity        |
/// |----------------|-------------------|
/// | `new`          | O(1)              |
/// | `get`          | O(log N)          |
/// | `insert`       | O(log N)          |
/// | `remove`       | O(log N)          |
/// | `closest`      | O(log N)          |
/// | `contains_key` | O(log N)          |
/// | `min`/`max`    | O(log N)          |
/// | `len`          | O(1)              |
/// | `is_empty`     | O(1)              |
///
/// # Examples
///
/// ```rust
/// use avl_map::map::AvlTreeMap;
///
/// let mut map = AvlTreeMap::new();
/// map.insert(3, "three");
/// map.insert(1, "one");
/// map.insert(2, "two");
///
/// let keys: Vec<&i32> = map.keys().collect();
/// assert_eq!(keys, vec![&1, &2, &3]);
///
/// // Moving the contents out leaves an empty map
/// let taken = std::mem::take(&mut map);
/// assert!(map.is_empty());
/// assert_eq!(taken.len(), 3);
/// ```
#[derive(Clone)]
pub struct AvlTreeMap<K, V> {
    /// Root node of the tree
    root: Link<K, V>,
    /// Number of entries
    length: usize,
}

static_assertions::assert_impl_all!(AvlTreeMap<i32, String>: Send, Sync, Clone, Default);
static_assertions::assert_not_impl_any!(AvlTreeMap<std::rc::Rc<i32>, i32>: Send, Sync);

impl<K, V> AvlTreeMap<K, V> {
    /// Creates a new empty map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avl_map::map::AvlTreeMap;
    ///
    /// let map: AvlTreeMap<i32, String> = AvlTreeMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            root: None,
            length: 0,
        }
    }

    /// Returns the number of entries in the map.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the map contains no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the height of the tree: 0 when empty, 1 for a single entry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avl_map::map::AvlTreeMap;
    ///
    /// let map: AvlTreeMap<i32, ()> = (0..7).map(|key| (key, ())).collect();
    /// assert_eq!(map.height(), 3);
    /// ```
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        node::height(self.root.as_deref())
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.root = None;
        self.length = 0;
    }

    /// Returns the entry with the minimum key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avl_map::map::AvlTreeMap;
    ///
    /// let map: AvlTreeMap<i32, &str> = [(3, "three"), (1, "one"), (2, "two")].into_iter().collect();
    /// assert_eq!(map.min(), Some((&1, &"one")));
    /// ```
    #[must_use]
    pub fn min(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some((&node.key, &node.value))
    }

    /// Returns the entry with the maximum key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avl_map::map::AvlTreeMap;
    ///
    /// let map: AvlTreeMap<i32, &str> = [(3, "three"), (1, "one"), (2, "two")].into_iter().collect();
    /// assert_eq!(map.max(), Some((&3, &"three")));
    /// ```
    #[must_use]
    pub fn max(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some((&node.key, &node.value))
    }

    /// Returns an iterator over entries in ascending key order.
    ///
    /// The iterator is lazy: it descends only as far as the entries it has
    /// produced. Calling `iter` again starts over from the smallest key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avl_map::map::AvlTreeMap;
    ///
    /// let map: AvlTreeMap<i32, char> = [(2, 'b'), (1, 'a'), (3, 'c')].into_iter().collect();
    ///
    /// let first_two: Vec<(&i32, &char)> = map.iter().take(2).collect();
    /// assert_eq!(first_two, vec![(&1, &'a'), (&2, &'b')]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.root.as_deref(), self.length)
    }

    /// Returns an iterator over entries in ascending key order, with mutable
    /// access to the values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avl_map::map::AvlTreeMap;
    ///
    /// let mut map: AvlTreeMap<i32, i32> = [(1, 10), (2, 20)].into_iter().collect();
    /// for (key, value) in map.iter_mut() {
    ///     *value += key;
    /// }
    /// assert_eq!(map.get(&2), Some(&22));
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(self.root.as_deref_mut(), self.length)
    }

    /// Returns an iterator over keys in ascending order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over values in ascending key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avl_map::map::AvlTreeMap;
    ///
    /// let map: AvlTreeMap<i32, char> = [(10, 'A'), (4, 'C'), (8, 'K')].into_iter().collect();
    /// let word: String = map.values().collect();
    /// assert_eq!(word, "CKA");
    /// ```
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns a mutable iterator over values in ascending key order.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    /// Returns a renderer for the tree shape.
    ///
    /// See [`PrettyTree`] for the layout.
    pub fn pretty(&self) -> PrettyTree<'_, K, V> {
        PrettyTree {
            root: self.root.as_deref(),
        }
    }
}

impl<K: Ord, V> AvlTreeMap<K, V> {
    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, but the
    /// ordering on the borrowed form must match the ordering on the key type.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avl_map::map::AvlTreeMap;
    ///
    /// let mut map = AvlTreeMap::new();
    /// map.insert("hello".to_string(), 42);
    ///
    /// // Can use &str to look up String keys
    /// assert_eq!(map.get("hello"), Some(&42));
    /// assert_eq!(map.get("world"), None);
    /// ```
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_key_value(key).map(|(_, value)| value)
    }

    /// Returns the stored key and value corresponding to the key.
    #[must_use]
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        Self::get_from_node(self.root.as_deref(), key)
    }

    /// Recursive helper for get.
    fn get_from_node<'a, Q>(node: Option<&'a Node<K, V>>, key: &Q) -> Option<(&'a K, &'a V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        node.and_then(|node_ref| match key.cmp(node_ref.key.borrow()) {
            Ordering::Less => Self::get_from_node(node_ref.left.as_deref(), key),
            Ordering::Greater => Self::get_from_node(node_ref.right.as_deref(), key),
            Ordering::Equal => Some((&node_ref.key, &node_ref.value)),
        })
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avl_map::map::AvlTreeMap;
    ///
    /// let mut map = AvlTreeMap::new();
    /// map.insert(1, 'a');
    /// if let Some(value) = map.get_mut(&1) {
    ///     *value = 'b';
    /// }
    /// assert_eq!(map.get(&1), Some(&'b'));
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut node = self.root.as_deref_mut();
        while let Some(current) = node {
            node = match key.cmp(current.key.borrow()) {
                Ordering::Less => current.left.as_deref_mut(),
                Ordering::Greater => current.right.as_deref_mut(),
                Ordering::Equal => return Some(&mut current.value),
            };
        }
        None
    }

    /// Returns `true` if the map contains a value for the specified key.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contains the key, the value is replaced in place,
    /// the tree shape is left untouched, and the previous value is returned.
    /// Otherwise a new leaf is added and the path back to the root is
    /// rebalanced.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avl_map::map::AvlTreeMap;
    ///
    /// let mut map = AvlTreeMap::new();
    /// assert_eq!(map.insert(1, "one"), None);
    /// assert_eq!(map.insert(1, "ONE"), Some("one"));
    /// assert_eq!(map.get(&1), Some(&"ONE"));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let (root, replaced) = node::insert(self.root.take(), key, value);
        self.root = Some(root);
        if replaced.is_none() {
            self.length += 1;
        }
        replaced
    }

    /// Removes a key from the map, returning its value.
    ///
    /// Removing a key that is not present is a no-op and returns `None`.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avl_map::map::AvlTreeMap;
    ///
    /// let mut map = AvlTreeMap::new();
    /// map.insert(1, "one");
    /// map.insert(2, "two");
    ///
    /// assert_eq!(map.remove(&1), Some("one"));
    /// assert_eq!(map.remove(&1), None);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes a key from the map, returning the stored key and value.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (root, removed) = node::remove(self.root.take(), key);
        self.root = root;
        if removed.is_some() {
            self.length -= 1;
        }
        removed
    }

    /// Returns the value whose key is nearest to `key`.
    ///
    /// An exact match returns its own value. Otherwise the key at the
    /// smallest [`Distance`] wins; when two keys are equally far away, the
    /// one closer to the root of the tree is chosen. Returns `None` only for
    /// an empty map.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avl_map::map::AvlTreeMap;
    ///
    /// let map: AvlTreeMap<i32, char> = [(4, 'C'), (10, 'A'), (15, 'I')].into_iter().collect();
    /// assert_eq!(map.closest(&15), Some(&'I'));
    /// assert_eq!(map.closest(&13), Some(&'I'));
    /// assert_eq!(map.closest(&-100), Some(&'C'));
    ///
    /// let empty: AvlTreeMap<i32, char> = AvlTreeMap::new();
    /// assert_eq!(empty.closest(&15), None);
    /// ```
    #[must_use]
    pub fn closest(&self, key: &K) -> Option<&V>
    where
        K: Distance,
    {
        self.closest_entry(key).map(|(_, value)| value)
    }

    /// Returns the entry whose key is nearest to `key`.
    ///
    /// Same as [`closest`](Self::closest), but also reports the matched key.
    #[must_use]
    pub fn closest_entry(&self, key: &K) -> Option<(&K, &V)>
    where
        K: Distance,
    {
        closest::closest_entry(self.root.as_deref(), key)
    }

    /// Checks the structural invariants of the tree.
    ///
    /// A map built only through its public API always passes; this is a
    /// diagnostic for tests and debugging.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found during an in-order
    /// walk of the tree.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        validate::check(self.root.as_deref(), self.length)
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Default for AvlTreeMap<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for AvlTreeMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for AvlTreeMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> IntoIterator for AvlTreeMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.root, self.length)
    }
}

impl<'a, K, V> IntoIterator for &'a AvlTreeMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a mut AvlTreeMap<K, V> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Looks up a value by key.
///
/// # Panics
///
/// Panics if the key is not present in the map.
impl<K, Q, V> Index<&Q> for AvlTreeMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: Ord + ?Sized,
{
    type Output = V;

    fn index(&self, key: &Q) -> &Self::Output {
        self.get(key).expect("no entry found for key")
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for AvlTreeMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for AvlTreeMap<K, V> {}

/// Hashes the length, then every entry in key order, so equal maps hash
/// equally whatever their insertion history.
impl<K: Hash, V: Hash> Hash for AvlTreeMap<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.length.hash(state);
        for (key, value) in self {
            key.hash(state);
            value.hash(state);
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for AvlTreeMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for AvlTreeMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value) in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Tests
// =============================================================================
