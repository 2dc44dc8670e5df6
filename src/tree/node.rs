//! Owned binary tree node
//!
//! Node = key + exclusively owned children + a visual-state tag.
//! Shape is fixed once built; only `visual_state` changes afterwards.

use std::fmt;

/// Search key (unique within one tree, totally ordered)
pub type Key = i64;

/// Highlight tag consumed by renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum VisualState {
    /// Not touched by the current search
    #[default]
    Default,

    /// Visited by the current search
    Visited,

    /// Matched the search target
    Found,
}

/// Tree node (explicit, boxed children)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    /// Node key
    pub key: Key,

    /// Left subtree (keys < `key` when built from sorted input)
    pub left: Option<Box<TreeNode>>,

    /// Right subtree (keys > `key` when built from sorted input)
    pub right: Option<Box<TreeNode>>,

    /// Current highlight
    pub visual_state: VisualState,
}

impl TreeNode {
    /// Create a childless node in the default state
    pub fn leaf(key: Key) -> Self {
        Self {
            key,
            left: None,
            right: None,
            visual_state: VisualState::Default,
        }
    }

    /// Create a node with the given subtrees
    pub fn with_children(
        key: Key,
        left: Option<Box<TreeNode>>,
        right: Option<Box<TreeNode>>,
    ) -> Self {
        Self {
            key,
            left,
            right,
            visual_state: VisualState::Default,
        }
    }

    /// Check if leaf (no children)
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Depth of the subtree rooted here (a lone node has depth 1)
    pub fn depth(&self) -> usize {
        1 + depth_of(self.left.as_deref()).max(depth_of(self.right.as_deref()))
    }

    /// Number of nodes in this subtree
    pub fn count(&self) -> usize {
        1 + self.left.as_deref().map_or(0, TreeNode::count)
            + self.right.as_deref().map_or(0, TreeNode::count)
    }

    /// Set every node in this subtree back to `VisualState::Default`
    pub fn reset_subtree(&mut self) {
        self.visual_state = VisualState::Default;
        if let Some(left) = self.left.as_deref_mut() {
            left.reset_subtree();
        }
        if let Some(right) = self.right.as_deref_mut() {
            right.reset_subtree();
        }
    }
}

/// `depth(None) = 0`, `depth(n) = 1 + max(depth(l), depth(r))`
pub fn depth_of(node: Option<&TreeNode>) -> usize {
    node.map_or(0, TreeNode::depth)
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.left, &self.right) {
            (None, None) => write!(f, "{}", self.key),
            (left, right) => {
                write!(f, "({} ", self.key)?;
                match left {
                    Some(l) => write!(f, "{}", l)?,
                    None => write!(f, "-")?,
                }
                write!(f, " ")?;
                match right {
                    Some(r) => write!(f, "{}", r)?,
                    None => write!(f, "-")?,
                }
                write!(f, ")")
            }
        }
    }
}
