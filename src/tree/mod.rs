//! Balanced binary search tree
//!
//! Built once from a sorted key set via midpoint recursion, then
//! read-only in shape. The only mutable part is the per-node
//! [`VisualState`] written by searches and read by renderers.

mod builder;
mod node;
mod traversal;

pub use builder::{build_balanced, is_strictly_ascending};
pub use node::{depth_of, Key, TreeNode, VisualState};
pub use traversal::{in_order_keys, pre_order_keys, Direction, NodePath};

use tracing::debug;

/// Owner of the (possibly absent) root
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalancedTree {
    root: Option<Box<TreeNode>>,
}

impl BalancedTree {
    /// Tree with no nodes
    pub fn empty() -> Self {
        Self { root: None }
    }

    /// Build from strictly ascending keys (see [`build_balanced`])
    pub fn from_sorted(keys: &[Key]) -> Self {
        let root = build_balanced(keys);
        let tree = Self { root };
        debug!(nodes = keys.len(), depth = tree.depth(), "built balanced tree");
        tree
    }

    /// Root node, if any
    pub fn root(&self) -> Option<&TreeNode> {
        self.root.as_deref()
    }

    /// Mutable root node, if any
    pub fn root_mut(&mut self) -> Option<&mut TreeNode> {
        self.root.as_deref_mut()
    }

    /// True when there is no root
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.root().map_or(0, TreeNode::count)
    }

    /// Tree depth (0 for an empty tree)
    pub fn depth(&self) -> usize {
        depth_of(self.root())
    }

    /// Theoretical depth bound: ⌈log2(n + 1)⌉
    pub fn height_bound(&self) -> usize {
        ((self.len() + 1) as f64).log2().ceil() as usize
    }

    /// Keys in ascending order (for a BST)
    pub fn keys_in_order(&self) -> Vec<Key> {
        in_order_keys(self.root())
    }

    /// Keys in the order a linear search visits them
    pub fn keys_pre_order(&self) -> Vec<Key> {
        pre_order_keys(self.root())
    }

    /// Membership test by exhaustive walk (no ordering assumed)
    pub fn contains(&self, key: Key) -> bool {
        self.keys_pre_order().contains(&key)
    }

    /// Node addressed by `path`
    pub fn node_at(&self, path: &NodePath) -> Option<&TreeNode> {
        self.root().and_then(|root| path.resolve(root))
    }

    /// Mutable node addressed by `path`
    pub fn node_at_mut(&mut self, path: &NodePath) -> Option<&mut TreeNode> {
        self.root_mut().and_then(|root| path.resolve_mut(root))
    }

    /// Visual state of the node holding `key`
    pub fn visual_state_of(&self, key: Key) -> Option<VisualState> {
        let mut stack: Vec<&TreeNode> = self.root().into_iter().collect();
        while let Some(node) = stack.pop() {
            if node.key == key {
                return Some(node.visual_state);
            }
            stack.extend(node.left.as_deref());
            stack.extend(node.right.as_deref());
        }
        None
    }

    /// `(key, state)` for every node, pre-order
    pub fn visual_states(&self) -> Vec<(Key, VisualState)> {
        let mut states = Vec::with_capacity(self.len());
        let mut stack: Vec<&TreeNode> = self.root().into_iter().collect();
        while let Some(node) = stack.pop() {
            states.push((node.key, node.visual_state));
            stack.extend(node.right.as_deref());
            stack.extend(node.left.as_deref());
        }
        states
    }

    /// Reset every node to [`VisualState::Default`]. Idempotent.
    pub fn reset_all(&mut self) {
        if let Some(root) = self.root_mut() {
            root.reset_subtree();
        }
    }
}

impl From<Option<Box<TreeNode>>> for BalancedTree {
    fn from(root: Option<Box<TreeNode>>) -> Self {
        Self { root }
    }
}
