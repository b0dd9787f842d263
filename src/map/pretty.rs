//! Tree-shape rendering for manual inspection.

use std::fmt;

use super::node::Node;

/// Renders the shape of an [`AvlTreeMap`](super::AvlTreeMap), one node per
/// line in pre-order.
///
/// The root line starts with `R----`. Each child is indented under its
/// parent and tagged `L----` (left) or `R----` (right); the left branch keeps
/// a `|` guide so its right sibling stays visually attached.
///
/// Created by [`AvlTreeMap::pretty`](super::AvlTreeMap::pretty).
///
/// # Examples
///
/// ```rust
/// use avl_map::map::AvlTreeMap;
///
/// let map: AvlTreeMap<i32, char> = [(2, 'b'), (1, 'a'), (3, 'c')].into_iter().collect();
/// assert_eq!(
///     map.pretty().to_string(),
///     "R----2: b\n   L----1: a\n   R----3: c\n"
/// );
/// ```
pub struct PrettyTree<'a, K, V> {
    pub(super) root: Option<&'a Node<K, V>>,
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for PrettyTree<'_, K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root {
            Some(root) => write_subtree(formatter, root, "", true),
            None => Ok(()),
        }
    }
}

fn write_subtree<K: fmt::Display, V: fmt::Display>(
    formatter: &mut fmt::Formatter<'_>,
    node: &Node<K, V>,
    indent: &str,
    last: bool,
) -> fmt::Result {
    let (branch, guide) = if last { ("R----", "   ") } else { ("L----", "|  ") };
    writeln!(formatter, "{indent}{branch}{}: {}", node.key, node.value)?;

    let indent = format!("{indent}{guide}");
    if let Some(left) = node.left.as_deref() {
        write_subtree(formatter, left, &indent, false)?;
    }
    if let Some(right) = node.right.as_deref() {
        write_subtree(formatter, right, &indent, true)?;
    }
    Ok(())
}
