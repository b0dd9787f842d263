//! Tree nodes and the rebalancing machinery.
//!
//! Every function here works on owned subtrees: it takes a subtree by value
//! and hands back the (possibly new) subtree root, which the caller stores
//! back into the parent's slot. Recursion depth is bounded by the tree
//! height.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::mem;

// =============================================================================
// Node Definition
// =============================================================================

/// An owned, possibly empty subtree.
pub(super) type Link<K, V> = Option<Box<Node<K, V>>>;

/// Internal node structure for the AVL tree.
///
/// `Clone` is a deep copy of the whole subtree.
#[derive(Clone)]
pub(super) struct Node<K, V> {
    pub(super) key: K,
    pub(super) value: V,
    pub(super) left: Link<K, V>,
    pub(super) right: Link<K, V>,
    /// Height of the subtree rooted here. A leaf has height 1.
    pub(super) height: usize,
}

impl<K, V> Node<K, V> {
    /// Creates a new leaf.
    pub(super) const fn leaf(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
            height: 1,
        }
    }

    /// Recomputes the cached height from the children.
    pub(super) fn update_height(&mut self) {
        self.height = 1 + height(self.left.as_deref()).max(height(self.right.as_deref()));
    }

    /// Left height minus right height.
    pub(super) fn balance_factor(&self) -> isize {
        signed(height(self.left.as_deref())) - signed(height(self.right.as_deref()))
    }

    /// Splits the node into its entry, dropping the (already detached) children.
    pub(super) fn into_entry(self: Box<Self>) -> (K, V) {
        let Self { key, value, .. } = *self;
        (key, value)
    }
}

/// Height of an optional subtree; the empty subtree has height 0.
pub(super) fn height<K, V>(node: Option<&Node<K, V>>) -> usize {
    node.map_or(0, |node| node.height)
}

/// Balance factor of an optional subtree; the empty subtree is balanced.
fn balance_factor<K, V>(node: Option<&Node<K, V>>) -> isize {
    node.map_or(0, Node::balance_factor)
}

// AVL heights never exceed 1.44 * log2(usize::MAX), far below isize::MAX.
#[allow(clippy::cast_possible_wrap)]
const fn signed(height: usize) -> isize {
    height as isize
}

// =============================================================================
// Rotations
// =============================================================================

/// Rotates the subtree to the left: the right child becomes the new root and
/// adopts the old root as its left child.
fn rotate_left<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    match node.right.take() {
        Some(mut pivot) => {
            node.right = pivot.left.take();
            node.update_height();
            pivot.left = Some(node);
            pivot.update_height();
            pivot
        }
        None => node,
    }
}

/// Rotates the subtree to the right: the left child becomes the new root and
/// adopts the old root as its right child.
fn rotate_right<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    match node.left.take() {
        Some(mut pivot) => {
            node.left = pivot.right.take();
            node.update_height();
            pivot.right = Some(node);
            pivot.update_height();
            pivot
        }
        None => node,
    }
}

/// Restores the balance invariant at `node`, assuming both children already
/// satisfy it and `node`'s height cache is current.
///
/// Handles the four classic cases: left-left and right-right need a single
/// rotation, left-right and right-left rotate the child first.
pub(super) fn rebalance<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let factor = node.balance_factor();

    if factor < -1 {
        if balance_factor(node.right.as_deref()) > 0 {
            #[cfg(feature = "tracing")]
            tracing::trace!(height = node.height, "right-left case, rotating right child");
            node.right = node.right.take().map(rotate_right);
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(balance_factor = factor, height = node.height, "rotating left");
        rotate_left(node)
    } else if factor > 1 {
        if balance_factor(node.left.as_deref()) < 0 {
            #[cfg(feature = "tracing")]
            tracing::trace!(height = node.height, "left-right case, rotating left child");
            node.left = node.left.take().map(rotate_left);
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(balance_factor = factor, height = node.height, "rotating right");
        rotate_right(node)
    } else {
        node
    }
}

// =============================================================================
// Insertion
// =============================================================================

/// Inserts `key` into the subtree and returns the new subtree root together
/// with the value previously stored under `key`, if any.
///
/// Replacing the value of an existing key leaves the shape untouched.
pub(super) fn insert<K: Ord, V>(
    node: Link<K, V>,
    key: K,
    value: V,
) -> (Box<Node<K, V>>, Option<V>) {
    let Some(mut node) = node else {
        return (Box::new(Node::leaf(key, value)), None);
    };

    let replaced = match key.cmp(&node.key) {
        Ordering::Less => {
            let (left, replaced) = insert(node.left.take(), key, value);
            node.left = Some(left);
            replaced
        }
        Ordering::Greater => {
            let (right, replaced) = insert(node.right.take(), key, value);
            node.right = Some(right);
            replaced
        }
        Ordering::Equal => {
            let previous = mem::replace(&mut node.value, value);
            return (node, Some(previous));
        }
    };

    node.update_height();
    (rebalance(node), replaced)
}

// =============================================================================
// Removal
// =============================================================================

/// Removes `key` from the subtree and returns the new subtree root together
/// with the removed entry. A missing key leaves the subtree as it was.
pub(super) fn remove<K, V, Q>(node: Link<K, V>, key: &Q) -> (Link<K, V>, Option<(K, V)>)
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let Some(mut node) = node else {
        return (None, None);
    };

    let removed = match key.cmp(node.key.borrow()) {
        Ordering::Less => {
            let (left, removed) = remove(node.left.take(), key);
            node.left = left;
            removed
        }
        Ordering::Greater => {
            let (right, removed) = remove(node.right.take(), key);
            node.right = right;
            removed
        }
        Ordering::Equal => return remove_root(node),
    };

    if removed.is_none() {
        return (Some(node), None);
    }

    node.update_height();
    (Some(rebalance(node)), removed)
}

/// Removes the root of a subtree.
///
/// A root with two children takes over the entry of its in-order successor,
/// which is unlinked from the right subtree.
fn remove_root<K, V>(mut node: Box<Node<K, V>>) -> (Link<K, V>, Option<(K, V)>) {
    match (node.left.take(), node.right.take()) {
        (None, None) => (None, Some(node.into_entry())),
        (Some(child), None) | (None, Some(child)) => (Some(child), Some(node.into_entry())),
        (Some(left), Some(right)) => {
            let (right, successor_key, successor_value) = take_leftmost(right);
            let key = mem::replace(&mut node.key, successor_key);
            let value = mem::replace(&mut node.value, successor_value);
            node.left = Some(left);
            node.right = right;
            node.update_height();
            (Some(rebalance(node)), Some((key, value)))
        }
    }
}

/// Unlinks the leftmost node of a subtree, rebalancing on the way back up.
fn take_leftmost<K, V>(mut node: Box<Node<K, V>>) -> (Link<K, V>, K, V) {
    match node.left.take() {
        Some(left) => {
            let (left, key, value) = take_leftmost(left);
            node.left = left;
            node.update_height();
            (Some(rebalance(node)), key, value)
        }
        None => {
            let right = node.right.take();
            let (key, value) = node.into_entry();
            (right, key, value)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn build(keys: &[i32]) -> Link<i32, ()> {
        keys.iter()
            .fold(None, |root, &key| Some(insert(root, key, ()).0))
    }

    fn shape(node: Option<&Node<i32, ()>>) -> String {
        node.map_or_else(
            || ".".to_string(),
            |node| {
                format!(
                    "({} {} {})",
                    shape(node.left.as_deref()),
                    node.key,
                    shape(node.right.as_deref())
                )
            },
        )
    }

    #[rstest]
    fn test_leaf_has_height_one() {
        let node = Node::leaf(1, ());
        assert_eq!(node.height, 1);
        assert_eq!(node.balance_factor(), 0);
        assert_eq!(height::<i32, ()>(None), 0);
    }

    #[rstest]
    fn test_rotate_left_without_right_child_is_identity() {
        let node = Box::new(Node::leaf(1, ()));
        let rotated = rotate_left(node);
        assert_eq!(rotated.key, 1);
        assert_eq!(rotated.height, 1);
    }

    #[rstest]
    fn test_rotate_right_without_left_child_is_identity() {
        let node = Box::new(Node::leaf(1, ()));
        let rotated = rotate_right(node);
        assert_eq!(rotated.key, 1);
    }

    #[rstest]
    #[case::right_right(&[1, 2, 3])]
    #[case::left_left(&[3, 2, 1])]
    #[case::right_left(&[1, 3, 2])]
    #[case::left_right(&[3, 1, 2])]
    fn test_three_keys_rebalance_to_perfect_tree(#[case] keys: &[i32]) {
        let root = build(keys);
        assert_eq!(shape(root.as_deref()), "((. 1 .) 2 (. 3 .))");
        assert_eq!(height(root.as_deref()), 2);
    }

    #[rstest]
    fn test_insert_existing_key_keeps_shape() {
        let root = build(&[2, 1, 3]);
        let before = shape(root.as_deref());
        let (root, replaced) = insert(root, 1, ());
        assert_eq!(replaced, Some(()));
        assert_eq!(shape(Some(root.as_ref())), before);
    }

    #[rstest]
    fn test_remove_leaf() {
        let (root, removed) = remove(build(&[2, 1, 3]), &3);
        assert_eq!(removed, Some((3, ())));
        assert_eq!(shape(root.as_deref()), "((. 1 .) 2 .)");
    }

    #[rstest]
    fn test_remove_node_with_single_child_promotes_child() {
        let (root, removed) = remove(build(&[2, 1, 3, 4]), &3);
        assert_eq!(removed, Some((3, ())));
        assert_eq!(shape(root.as_deref()), "((. 1 .) 2 (. 4 .))");
    }

    #[rstest]
    fn test_remove_node_with_two_children_takes_successor() {
        let (root, removed) = remove(build(&[2, 1, 4, 3, 5]), &2);
        assert_eq!(removed, Some((2, ())));
        assert_eq!(shape(root.as_deref()), "((. 1 .) 3 (. 4 (. 5 .)))");
        assert_eq!(height(root.as_deref()), 3);
    }

    #[rstest]
    fn test_remove_triggers_rotation() {
        // Removing 1 leaves 2 with a right-heavy imbalance of -2.
        let (root, _) = remove(build(&[2, 1, 3, 4]), &1);
        assert_eq!(shape(root.as_deref()), "((. 2 .) 3 (. 4 .))");
    }

    #[rstest]
    fn test_remove_missing_key_is_noop() {
        let root = build(&[2, 1, 3]);
        let before = shape(root.as_deref());
        let (root, removed) = remove(root, &7);
        assert_eq!(removed, None);
        assert_eq!(shape(root.as_deref()), before);
    }
}
