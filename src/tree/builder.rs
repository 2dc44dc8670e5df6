//! Balanced construction via midpoint recursion
//!
//! Root of `keys[lo..hi]` is `keys[lo + len/2]`.
//!   Left subtree: keys strictly before the midpoint
//!   Right subtree: keys strictly after it
//! Sibling subtree sizes differ by at most one, so depth = O(log n).

use super::node::{Key, TreeNode};

/// Build a height-balanced tree from `keys`.
///
/// # Precondition
///
/// `keys` must be strictly ascending. Unsorted input still yields a balanced
/// tree, but not a binary search tree, and binary search over it may report
/// false negatives. Debug builds assert the precondition.
pub fn build_balanced(keys: &[Key]) -> Option<Box<TreeNode>> {
    debug_assert!(
        is_strictly_ascending(keys),
        "build_balanced requires strictly ascending keys"
    );
    build_range(keys)
}

fn build_range(keys: &[Key]) -> Option<Box<TreeNode>> {
    if keys.is_empty() {
        return None;
    }

    let mid = keys.len() / 2;
    Some(Box::new(TreeNode::with_children(
        keys[mid],
        build_range(&keys[..mid]),
        build_range(&keys[mid + 1..]),
    )))
}

/// Check the builder precondition
pub fn is_strictly_ascending(keys: &[Key]) -> bool {
    keys.windows(2).all(|pair| pair[0] < pair[1])
}
