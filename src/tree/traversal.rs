//! Path-addressed traversal
//!
//! A node is named by the sequence of left/right turns from the root.
//! Searches keep paths instead of references, so the tree stays free
//! to be read by a renderer between steps.

use super::node::{Key, TreeNode};

/// Which child to descend into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Left child
    Left,

    /// Right child
    Right,
}

/// Route from the root to a node
///
/// Length = depth of the addressed node minus one, so O(log n) for
/// balanced trees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath {
    turns: Vec<Direction>,
}

impl NodePath {
    /// Path naming the root
    pub fn root() -> Self {
        Self { turns: Vec::new() }
    }

    /// Extend by one level
    pub fn push(&mut self, direction: Direction) {
        self.turns.push(direction);
    }

    /// Copy of this path extended by one level
    pub fn child(&self, direction: Direction) -> Self {
        let mut turns = Vec::with_capacity(self.turns.len() + 1);
        turns.extend_from_slice(&self.turns);
        turns.push(direction);
        Self { turns }
    }

    /// Drop the last level
    pub fn pop(&mut self) -> Option<Direction> {
        self.turns.pop()
    }

    /// Number of turns (root = 0)
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// True for the root path
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Turns in root-to-node order
    pub fn turns(&self) -> &[Direction] {
        &self.turns
    }

    /// Follow the path from `root`
    ///
    /// Returns `None` when a turn leads to an absent child.
    pub fn resolve<'a>(&self, root: &'a TreeNode) -> Option<&'a TreeNode> {
        let mut node = root;
        for turn in &self.turns {
            node = match turn {
                Direction::Left => node.left.as_deref()?,
                Direction::Right => node.right.as_deref()?,
            };
        }
        Some(node)
    }

    /// Mutable variant of [`NodePath::resolve`]
    pub fn resolve_mut<'a>(&self, root: &'a mut TreeNode) -> Option<&'a mut TreeNode> {
        let mut node = root;
        for turn in &self.turns {
            node = match turn {
                Direction::Left => node.left.as_deref_mut()?,
                Direction::Right => node.right.as_deref_mut()?,
            };
        }
        Some(node)
    }
}

/// Keys in pre-order (node, left, right)
pub fn pre_order_keys(root: Option<&TreeNode>) -> Vec<Key> {
    let mut keys = Vec::new();
    let mut stack: Vec<&TreeNode> = root.into_iter().collect();

    while let Some(node) = stack.pop() {
        keys.push(node.key);
        // Right pushed first so left is popped first
        if let Some(right) = node.right.as_deref() {
            stack.push(right);
        }
        if let Some(left) = node.left.as_deref() {
            stack.push(left);
        }
    }

    keys
}

/// Keys in in-order (left, node, right)
pub fn in_order_keys(root: Option<&TreeNode>) -> Vec<Key> {
    let mut keys = Vec::new();
    let mut stack: Vec<&TreeNode> = Vec::new();
    let mut current = root;

    while current.is_some() || !stack.is_empty() {
        while let Some(node) = current {
            stack.push(node);
            current = node.left.as_deref();
        }
        if let Some(node) = stack.pop() {
            keys.push(node.key);
            current = node.right.as_deref();
        }
    }

    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::builder::build_balanced;

    #[test]
    fn test_resolve_paths() {
        let root = build_balanced(&[1, 2, 3, 4, 5, 6, 7]).unwrap();

        assert_eq!(NodePath::root().resolve(&root).unwrap().key, 4);

        let mut path = NodePath::root();
        path.push(Direction::Left);
        assert_eq!(path.resolve(&root).unwrap().key, 2);

        path.push(Direction::Right);
        assert_eq!(path.resolve(&root).unwrap().key, 3);
        assert_eq!(path.len(), 2);

        // Past a leaf
        path.push(Direction::Left);
        assert!(path.resolve(&root).is_none());

        path.pop();
        path.pop();
        let right = path.child(Direction::Right);
        assert_eq!(right.resolve(&root).unwrap().key, 3);
        assert_eq!(right.turns(), &[Direction::Left, Direction::Right]);
    }

    #[test]
    fn test_resolve_mut() {
        let mut root = build_balanced(&[1, 2, 3]).unwrap();
        let path = NodePath::root().child(Direction::Right);
        path.resolve_mut(&mut root).unwrap().key = 30;
        assert_eq!(root.right.as_ref().unwrap().key, 30);
    }

    #[test]
    fn test_walk_orders() {
        let root = build_balanced(&[1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(pre_order_keys(root.as_deref()), vec![4, 2, 1, 3, 6, 5, 7]);
        assert_eq!(in_order_keys(root.as_deref()), vec![1, 2, 3, 4, 5, 6, 7]);
        assert!(pre_order_keys(None).is_empty());
        assert!(in_order_keys(None).is_empty());
    }
}
