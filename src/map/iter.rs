//! In-order iterators over an [`AvlTreeMap`](super::AvlTreeMap).
//!
//! All iterators are lazy: they keep an explicit stack holding the left
//! spine of the subtrees not yet visited, so stopping early costs nothing
//! beyond the entries already produced. The stack never grows past the tree
//! height.

use std::iter::FusedIterator;

use smallvec::SmallVec;

use super::node::{Link, Node};

/// Inline stack capacity. Covers every tree with fewer than ~100k entries
/// without spilling to the heap.
const INLINE_DEPTH: usize = 24;

// =============================================================================
// Iter
// =============================================================================

/// An iterator over the entries of an [`AvlTreeMap`](super::AvlTreeMap),
/// in ascending key order.
///
/// Created by [`AvlTreeMap::iter`](super::AvlTreeMap::iter).
pub struct Iter<'a, K, V> {
    stack: SmallVec<[&'a Node<K, V>; INLINE_DEPTH]>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(super) fn new(root: Option<&'a Node<K, V>>, length: usize) -> Self {
        let mut iterator = Self {
            stack: SmallVec::new(),
            remaining: length,
        };
        iterator.push_left_spine(root);
        iterator
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<K, V>>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left.as_deref();
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

// =============================================================================
// IterMut
// =============================================================================

/// A pending node of an [`IterMut`]: its entry, split off from the still
/// unvisited right subtree.
type Pending<'a, K, V> = (&'a K, &'a mut V, Option<&'a mut Node<K, V>>);

/// A mutable iterator over the entries of an [`AvlTreeMap`](super::AvlTreeMap),
/// in ascending key order. Keys stay immutable.
///
/// Created by [`AvlTreeMap::iter_mut`](super::AvlTreeMap::iter_mut).
pub struct IterMut<'a, K, V> {
    stack: SmallVec<[Pending<'a, K, V>; INLINE_DEPTH]>,
    remaining: usize,
}

impl<'a, K, V> IterMut<'a, K, V> {
    pub(super) fn new(root: Option<&'a mut Node<K, V>>, length: usize) -> Self {
        let mut iterator = Self {
            stack: SmallVec::new(),
            remaining: length,
        };
        iterator.push_left_spine(root);
        iterator
    }

    fn push_left_spine(&mut self, mut node: Option<&'a mut Node<K, V>>) {
        while let Some(current) = node {
            let Node {
                key,
                value,
                left,
                right,
                ..
            } = current;
            self.stack.push((&*key, value, right.as_deref_mut()));
            node = left.as_deref_mut();
        }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        let (key, value, right) = self.stack.pop()?;
        self.push_left_spine(right);
        self.remaining -= 1;
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

// =============================================================================
// IntoIter
// =============================================================================

/// An owning iterator over the entries of an [`AvlTreeMap`](super::AvlTreeMap),
/// in ascending key order.
///
/// Created by the `into_iter` method of [`IntoIterator`].
pub struct IntoIter<K, V> {
    stack: SmallVec<[Box<Node<K, V>>; INLINE_DEPTH]>,
    remaining: usize,
}

impl<K, V> IntoIter<K, V> {
    pub(super) fn new(root: Link<K, V>, length: usize) -> Self {
        let mut iterator = Self {
            stack: SmallVec::new(),
            remaining: length,
        };
        iterator.push_left_spine(root);
        iterator
    }

    fn push_left_spine(&mut self, mut node: Link<K, V>) {
        while let Some(mut current) = node {
            node = current.left.take();
            self.stack.push(current);
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let mut node = self.stack.pop()?;
        self.push_left_spine(node.right.take());
        self.remaining -= 1;
        Some(node.into_entry())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

// =============================================================================
// Keys and Values
// =============================================================================

/// An iterator over the keys of an [`AvlTreeMap`](super::AvlTreeMap), in
/// ascending order.
pub struct Keys<'a, K, V> {
    pub(super) inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// An iterator over the values of an [`AvlTreeMap`](super::AvlTreeMap), in
/// ascending key order.
pub struct Values<'a, K, V> {
    pub(super) inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> FusedIterator for Values<'_, K, V> {}

/// A mutable iterator over the values of an [`AvlTreeMap`](super::AvlTreeMap),
/// in ascending key order.
pub struct ValuesMut<'a, K, V> {
    pub(super) inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}

impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}
