//! Geometric layout
//!
//! Levels are spaced `height / (depth + 1)` apart. The root sits at
//! `(width / 2, spacing)` with horizontal half-offset `width / 2`; each
//! child moves `offset` left or right and halves it. Siblings therefore
//! never share an x coordinate, at the cost of shrinking gaps deep down.
//!
//! Layout reads only tree shape and canvas bounds. Visual state is
//! ignored, so a layout stays valid for the whole lifetime of a tree
//! until the canvas is resized.

use thiserror::Error;

use crate::tree::{BalancedTree, Key, TreeNode};

/// Upper bound on node radius, in display units
pub const RADIUS_CAP: f64 = 20.0;

/// Errors from layout computation
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum LayoutError {
    /// Canvas bounds not strictly positive or not finite
    #[error("invalid canvas bounds {width} x {height}")]
    InvalidCanvas {
        /// Requested width
        width: f64,
        /// Requested height
        height: f64,
    },
}

/// Position of one node
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NodePlacement {
    /// Key of the placed node (keys are unique per tree)
    pub key: Key,
    /// Level, root = 0
    pub level: usize,
    /// Centre x
    pub x: f64,
    /// Centre y
    pub y: f64,
    /// Circle radius
    pub radius: f64,
}

/// Parent→child connector, trimmed to the node rims
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Edge {
    /// Parent key
    pub parent: Key,
    /// Child key
    pub child: Key,
    /// Start x (parent centre)
    pub from_x: f64,
    /// Start y (bottom of parent circle)
    pub from_y: f64,
    /// End x (child centre)
    pub to_x: f64,
    /// End y (top of child circle)
    pub to_y: f64,
}

/// Complete layout of a tree for one canvas size
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Layout {
    /// Canvas width used
    pub canvas_width: f64,
    /// Canvas height used
    pub canvas_height: f64,
    /// Tree depth the spacing was derived from
    pub depth: usize,
    /// Distance between levels
    pub vertical_spacing: f64,
    /// Shared node radius
    pub radius: f64,
    /// Node positions, pre-order
    pub nodes: Vec<NodePlacement>,
    /// Connectors, pre-order by parent
    pub edges: Vec<Edge>,
}

impl Layout {
    /// True when nothing was laid out (empty tree)
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Placement of the node holding `key`
    pub fn placement(&self, key: Key) -> Option<&NodePlacement> {
        self.nodes.iter().find(|p| p.key == key)
    }

    /// Placements on one level, left to right
    pub fn level(&self, level: usize) -> Vec<&NodePlacement> {
        let mut row: Vec<&NodePlacement> = self.nodes.iter().filter(|p| p.level == level).collect();
        row.sort_by(|a, b| a.x.total_cmp(&b.x));
        row
    }

    /// Point size for node labels
    pub fn label_font_size(&self) -> u32 {
        (self.radius / 2.0).floor().max(0.0) as u32
    }
}

/// Lay out `tree` on a `width` x `height` canvas
pub fn compute_layout(tree: &BalancedTree, width: f64, height: f64) -> Result<Layout, LayoutError> {
    // Zero width would stack every node of a level on one x
    if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
        return Err(LayoutError::InvalidCanvas { width, height });
    }

    let depth = tree.depth();
    let Some(root) = tree.root() else {
        return Ok(Layout {
            canvas_width: width,
            canvas_height: height,
            ..Layout::default()
        });
    };

    let vertical_spacing = height / (depth + 1) as f64;
    let radius = (vertical_spacing / 4.0).min(RADIUS_CAP);

    let mut placer = Placer {
        vertical_spacing,
        radius,
        nodes: Vec::with_capacity(tree.len()),
        edges: Vec::with_capacity(tree.len().saturating_sub(1)),
    };
    placer.place(root, 0, width / 2.0, vertical_spacing, width / 2.0);

    Ok(Layout {
        canvas_width: width,
        canvas_height: height,
        depth,
        vertical_spacing,
        radius,
        nodes: placer.nodes,
        edges: placer.edges,
    })
}

struct Placer {
    vertical_spacing: f64,
    radius: f64,
    nodes: Vec<NodePlacement>,
    edges: Vec<Edge>,
}

impl Placer {
    fn place(&mut self, node: &TreeNode, level: usize, x: f64, y: f64, offset: f64) {
        self.nodes.push(NodePlacement {
            key: node.key,
            level,
            x,
            y,
            radius: self.radius,
        });

        let child_y = y + self.vertical_spacing;
        for (child, child_x) in [
            (node.left.as_deref(), x - offset),
            (node.right.as_deref(), x + offset),
        ] {
            if let Some(child) = child {
                self.edges.push(Edge {
                    parent: node.key,
                    child: child.key,
                    from_x: x,
                    from_y: y + self.radius,
                    to_x: child_x,
                    to_y: child_y - self.radius,
                });
                self.place(child, level + 1, child_x, child_y, offset / 2.0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seven() -> BalancedTree {
        BalancedTree::from_sorted(&[1, 2, 3, 4, 5, 6, 7])
    }

    #[test]
    fn test_root_and_children() {
        let layout = compute_layout(&seven(), 800.0, 400.0).unwrap();

        // depth 3 -> spacing 100, radius min(25, 20)
        assert_eq!(layout.depth, 3);
        assert_eq!(layout.vertical_spacing, 100.0);
        assert_eq!(layout.radius, RADIUS_CAP);

        let root = layout.placement(4).unwrap();
        assert_eq!((root.x, root.y, root.level), (400.0, 100.0, 0));

        let left = layout.placement(2).unwrap();
        let right = layout.placement(6).unwrap();
        assert_eq!((left.x, left.y), (0.0, 200.0));
        assert_eq!((right.x, right.y), (800.0, 200.0));

        let outer = layout.placement(1).unwrap();
        let inner = layout.placement(3).unwrap();
        assert_eq!((outer.x, inner.x), (-200.0, 200.0));
        assert_eq!(outer.y, 300.0);
    }

    #[test]
    fn test_small_spacing_shrinks_radius() {
        let layout = compute_layout(&seven(), 800.0, 200.0).unwrap();
        assert_eq!(layout.vertical_spacing, 50.0);
        assert_eq!(layout.radius, 12.5);
        assert_eq!(layout.label_font_size(), 6);
    }

    #[test]
    fn test_edges_trimmed_to_rims() {
        let layout = compute_layout(&seven(), 800.0, 400.0).unwrap();
        assert_eq!(layout.edges.len(), 6);

        let edge = layout.edges.iter().find(|e| e.child == 6).unwrap();
        assert_eq!(edge.parent, 4);
        assert_eq!((edge.from_x, edge.from_y), (400.0, 120.0));
        assert_eq!((edge.to_x, edge.to_y), (800.0, 180.0));
    }

    #[test]
    fn test_single_node() {
        let tree = BalancedTree::from_sorted(&[42]);
        let layout = compute_layout(&tree, 100.0, 100.0).unwrap();
        assert_eq!(layout.nodes.len(), 1);
        assert!(layout.edges.is_empty());
        assert_eq!(layout.vertical_spacing, 50.0);
        assert_eq!(layout.nodes[0].x, 50.0);
    }

    #[test]
    fn test_empty_tree_has_nothing_to_lay_out() {
        let layout = compute_layout(&BalancedTree::empty(), 100.0, 100.0).unwrap();
        assert!(layout.is_empty());
        assert!(layout.edges.is_empty());
        assert_eq!(layout.depth, 0);
    }

    #[test]
    fn test_invalid_canvas() {
        assert!(compute_layout(&seven(), f64::NAN, 10.0).is_err());
        assert!(compute_layout(&seven(), 10.0, -1.0).is_err());
        assert_eq!(
            compute_layout(&seven(), 0.0, 400.0),
            Err(LayoutError::InvalidCanvas { width: 0.0, height: 400.0 })
        );
        assert!(compute_layout(&seven(), 800.0, 0.0).is_err());
        assert!(compute_layout(&BalancedTree::empty(), 0.0, 0.0).is_err());
    }

    #[test]
    fn test_levels_sorted_left_to_right() {
        let layout = compute_layout(&seven(), 800.0, 400.0).unwrap();
        let row: Vec<Key> = layout.level(2).iter().map(|p| p.key).collect();
        assert_eq!(row, vec![1, 3, 5, 7]);
    }
}
