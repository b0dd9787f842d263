//! Closest-key lookup.
//!
//! [`Distance`] measures how far apart two keys are. It is implemented for
//! the primitive integer and floating-point types; any other key type can
//! opt in by implementing it.
//!
//! The lookup walks the ordinary search path toward the target and keeps the
//! nearest key seen on the way. In a binary search tree the greatest key
//! below the target and the least key above it both lie on that path, so the
//! walk finds the nearest key of the whole map without backtracking.

use std::cmp::Ordering;

use super::node::Node;

/// Absolute distance between two keys.
///
/// # Examples
///
/// ```rust
/// use avl_map::map::Distance;
///
/// assert_eq!(3_i32.distance(&-4), 7_u32);
/// assert_eq!(1.5_f64.distance(&0.5), 1.0);
/// ```
pub trait Distance {
    /// The type the distance is measured in.
    type Output: PartialOrd;

    /// Returns `|self - other|`.
    fn distance(&self, other: &Self) -> Self::Output;
}

macro_rules! impl_distance_for_integer {
    ($($integer:ty => $unsigned:ty),* $(,)?) => {
        $(
            impl Distance for $integer {
                type Output = $unsigned;

                #[inline]
                fn distance(&self, other: &Self) -> Self::Output {
                    self.abs_diff(*other)
                }
            }
        )*
    };
}

macro_rules! impl_distance_for_float {
    ($($float:ty),* $(,)?) => {
        $(
            impl Distance for $float {
                type Output = $float;

                #[inline]
                fn distance(&self, other: &Self) -> Self::Output {
                    (self - other).abs()
                }
            }
        )*
    };
}

impl_distance_for_integer! {
    i8 => u8,
    i16 => u16,
    i32 => u32,
    i64 => u64,
    i128 => u128,
    isize => usize,
    u8 => u8,
    u16 => u16,
    u32 => u32,
    u64 => u64,
    u128 => u128,
    usize => usize,
}

impl_distance_for_float!(f32, f64);

impl Distance for char {
    type Output = u32;

    #[inline]
    fn distance(&self, other: &Self) -> Self::Output {
        u32::from(*self).abs_diff(u32::from(*other))
    }
}

/// Finds the entry whose key is nearest to `key` along the search path.
///
/// An exact match wins immediately. Among equally distant keys the one met
/// first (closer to the root) is kept.
pub(super) fn closest_entry<'a, K, V>(
    root: Option<&'a Node<K, V>>,
    key: &K,
) -> Option<(&'a K, &'a V)>
where
    K: Ord + Distance,
{
    let mut best = root?;
    let mut best_distance = best.key.distance(key);
    let mut current = Some(best);

    while let Some(node) = current {
        let distance = node.key.distance(key);
        if distance < best_distance {
            best = node;
            best_distance = distance;
        }

        current = match key.cmp(&node.key) {
            Ordering::Less => node.left.as_deref(),
            Ordering::Greater => node.right.as_deref(),
            Ordering::Equal => return Some((&node.key, &node.value)),
        };
    }

    Some((&best.key, &best.value))
}

// =============================================================================
// Tests
// =============================================================================
