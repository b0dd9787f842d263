//! Structural self-check for [`AvlTreeMap`](super::AvlTreeMap).

use super::node::Node;

/// A broken structural invariant, reported by
/// [`AvlTreeMap::validate`](super::AvlTreeMap::validate).
///
/// Depths count from the root, which sits at depth 0. Positions count
/// entries in ascending key order, starting at 0.
///
/// # Examples
///
/// ```rust
/// use avl_map::map::InvariantViolation;
///
/// let violation = InvariantViolation::Unbalanced {
///     depth: 2,
///     balance_factor: -2,
/// };
/// assert_eq!(
///     format!("{violation}"),
///     "node at depth 2 is unbalanced (balance factor -2)"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The key at `position` is not greater than the key before it.
    OutOfOrder {
        /// In-order position of the offending key.
        position: usize,
    },
    /// A node's subtrees differ in height by more than one.
    Unbalanced {
        /// Depth of the offending node.
        depth: usize,
        /// Left height minus right height.
        balance_factor: isize,
    },
    /// A node's cached height does not match its subtrees.
    StaleHeight {
        /// Depth of the offending node.
        depth: usize,
        /// The height stored in the node.
        cached: usize,
        /// The height computed from the subtrees.
        actual: usize,
    },
    /// The recorded entry count does not match the number of nodes.
    LengthMismatch {
        /// The length the map reports.
        recorded: usize,
        /// The number of nodes actually reachable.
        counted: usize,
    },
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfOrder { position } => {
                write!(formatter, "key at position {position} is out of order")
            }
            Self::Unbalanced {
                depth,
                balance_factor,
            } => write!(
                formatter,
                "node at depth {depth} is unbalanced (balance factor {balance_factor})"
            ),
            Self::StaleHeight {
                depth,
                cached,
                actual,
            } => write!(
                formatter,
                "node at depth {depth} caches height {cached} but has height {actual}"
            ),
            Self::LengthMismatch { recorded, counted } => write!(
                formatter,
                "map records {recorded} entries but holds {counted}"
            ),
        }
    }
}

impl std::error::Error for InvariantViolation {}

/// Checks every invariant of the tree rooted at `root`, which should hold
/// `length` entries.
pub(super) fn check<K: Ord, V>(
    root: Option<&Node<K, V>>,
    length: usize,
) -> Result<(), InvariantViolation> {
    let mut walker = Walker {
        previous: None,
        visited: 0,
    };
    walker.walk(root, 0)?;

    if walker.visited == length {
        Ok(())
    } else {
        Err(InvariantViolation::LengthMismatch {
            recorded: length,
            counted: walker.visited,
        })
    }
}

/// In-order walk state.
struct Walker<'a, K> {
    previous: Option<&'a K>,
    visited: usize,
}

impl<'a, K: Ord> Walker<'a, K> {
    /// Visits the subtree in order and returns its recomputed height.
    fn walk<V>(
        &mut self,
        node: Option<&'a Node<K, V>>,
        depth: usize,
    ) -> Result<usize, InvariantViolation> {
        let Some(node) = node else {
            return Ok(0);
        };

        let left = self.walk(node.left.as_deref(), depth + 1)?;

        if self.previous.is_some_and(|previous| previous >= &node.key) {
            return Err(InvariantViolation::OutOfOrder {
                position: self.visited,
            });
        }
        self.previous = Some(&node.key);
        self.visited += 1;

        let right = self.walk(node.right.as_deref(), depth + 1)?;

        let actual = 1 + left.max(right);
        if node.height != actual {
            return Err(InvariantViolation::StaleHeight {
                depth,
                cached: node.height,
                actual,
            });
        }

        let balance_factor = node.balance_factor();
        if balance_factor.abs() > 1 {
            return Err(InvariantViolation::Unbalanced {
                depth,
                balance_factor,
            });
        }

        Ok(actual)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn node(key: i32, left: Option<Node<i32, ()>>, right: Option<Node<i32, ()>>) -> Node<i32, ()> {
        let mut node = Node::leaf(key, ());
        node.left = left.map(Box::new);
        node.right = right.map(Box::new);
        node.update_height();
        node
    }

    #[rstest]
    fn test_empty_tree_is_valid() {
        assert_eq!(check::<i32, ()>(None, 0), Ok(()));
    }

    #[rstest]
    fn test_balanced_tree_is_valid() {
        let root = node(2, Some(node(1, None, None)), Some(node(3, None, None)));
        assert_eq!(check(Some(&root), 3), Ok(()));
    }

    #[rstest]
    fn test_detects_out_of_order_keys() {
        let root = node(2, Some(node(3, None, None)), None);
        assert_eq!(
            check(Some(&root), 2),
            Err(InvariantViolation::OutOfOrder { position: 1 })
        );
    }

    #[rstest]
    fn test_detects_duplicate_keys() {
        let root = node(2, None, Some(node(2, None, None)));
        assert_eq!(
            check(Some(&root), 2),
            Err(InvariantViolation::OutOfOrder { position: 1 })
        );
    }

    #[rstest]
    fn test_detects_imbalance() {
        let root = node(1, None, Some(node(2, None, Some(node(3, None, None)))));
        assert_eq!(
            check(Some(&root), 3),
            Err(InvariantViolation::Unbalanced {
                depth: 0,
                balance_factor: -2,
            })
        );
    }

    #[rstest]
    fn test_detects_stale_height() {
        let mut root = node(2, Some(node(1, None, None)), None);
        root.height = 5;
        assert_eq!(
            check(Some(&root), 2),
            Err(InvariantViolation::StaleHeight {
                depth: 0,
                cached: 5,
                actual: 2,
            })
        );
    }

    #[rstest]
    fn test_detects_length_mismatch() {
        let root = node(1, None, None);
        assert_eq!(
            check(Some(&root), 4),
            Err(InvariantViolation::LengthMismatch {
                recorded: 4,
                counted: 1,
            })
        );
    }

    #[rstest]
    fn test_display_messages() {
        assert_eq!(
            InvariantViolation::OutOfOrder { position: 3 }.to_string(),
            "key at position 3 is out of order"
        );
        assert_eq!(
            InvariantViolation::StaleHeight {
                depth: 1,
                cached: 2,
                actual: 3,
            }
            .to_string(),
            "node at depth 1 caches height 2 but has height 3"
        );
        assert_eq!(
            InvariantViolation::LengthMismatch {
                recorded: 2,
                counted: 1,
            }
            .to_string(),
            "map records 2 entries but holds 1"
        );
    }
}
