//! # Balanced tree search visualizer core
//!
//! Builds a height-balanced binary search tree from a random key set,
//! lays it out for drawing, and animates two searches over it one
//! visible step at a time.
//!
//! ## Pipeline
//!
//! 1. **Keys**: shuffle `[1, 100]`, take `size`, sort
//! 2. **Build**: midpoint recursion, depth O(log n)
//! 3. **Layout**: level spacing from depth, halving horizontal offsets
//! 4. **Search**: linear (pre-order) or binary (one node per level),
//!    emitting `Step` events then one `Finished` event
//! 5. **Render**: an adapter maps keys to backend handles and recolours
//!    nodes as events arrive
//!
//! ## Usage Example
//!
//! ```
//! use sapling::{SearchMode, Visualizer, VisualizerConfig};
//!
//! let mut viz = Visualizer::new(VisualizerConfig::default().with_seed(7));
//! viz.rebuild_tree(15).unwrap();
//! let layout = viz.layout().unwrap();
//! assert_eq!(layout.nodes.len(), 15);
//!
//! let target = viz.tree().keys_in_order()[3];
//! let events: Vec<_> = viz.run_search(target, SearchMode::Binary).collect();
//! assert!(events.last().unwrap().outcome().unwrap().found);
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

pub mod keys;      // Random key selection
pub mod layout;    // Node and edge geometry
pub mod pacing;    // Time-paced search driving
pub mod render;    // Render adapter boundary
pub mod search;    // Search state machines
pub mod tree;      // Balanced BST model and builder

// Re-exports for convenience
pub use layout::{compute_layout, Edge, Layout, LayoutError, NodePlacement};
pub use pacing::{StepPacer, DEFAULT_STEP_DELAY};
pub use search::{
    CancelToken, ControllerEvents, Search, SearchController, SearchEvent, SearchEvents, SearchMode,
    SearchOutcome, SearchPhase,
};
pub use tree::{BalancedTree, Key, TreeNode, VisualState};

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;
use tracing::{info, warn};

/// Smallest tree a rebuild accepts
pub const MIN_TREE_SIZE: usize = 1;

/// Largest tree a rebuild accepts (size of the key universe)
pub const MAX_TREE_SIZE: usize = 100;

/// Configuration parameters for a visualizer session
#[derive(Debug, Clone)]
pub struct VisualizerConfig {
    /// Canvas width in display units
    pub canvas_width: f64,

    /// Canvas height in display units
    pub canvas_height: f64,

    /// Tree size built on construction
    pub initial_size: usize,

    /// Target suggested before the user enters one
    pub default_target: Key,

    /// Pause after each visited node
    pub step_delay: Duration,

    /// RNG seed for reproducible key sets (entropy when `None`)
    pub seed: Option<u64>,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1200.0,
            canvas_height: 650.0,
            initial_size: 7,
            default_target: 50,
            step_delay: DEFAULT_STEP_DELAY,
            seed: None,
        }
    }
}

impl VisualizerConfig {
    /// Set canvas bounds
    pub fn with_canvas(mut self, width: f64, height: f64) -> Self {
        self.canvas_width = width;
        self.canvas_height = height;
        self
    }

    /// Set inter-step delay
    pub fn with_step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = delay;
        self
    }

    /// Fix the RNG seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the tree size built on construction
    pub fn with_initial_size(mut self, size: usize) -> Self {
        self.initial_size = size;
        self
    }
}

/// Errors surfaced to callers of [`Visualizer`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VisualizerError {
    /// Requested tree size outside `[MIN_TREE_SIZE, MAX_TREE_SIZE]`
    #[error("invalid tree size {size}, expected {min}..={max}")]
    InvalidSize {
        /// Requested size
        size: usize,
        /// Smallest accepted size
        min: usize,
        /// Largest accepted size
        max: usize,
    },

    /// Layout could not be computed
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Session orchestrator
///
/// Holds the current tree, the RNG used for rebuilds and the search
/// controller. A failed rebuild keeps the previous tree.
#[derive(Debug)]
pub struct Visualizer {
    config: VisualizerConfig,
    rng: StdRng,
    tree: BalancedTree,
    controller: SearchController,
}

impl Visualizer {
    /// Create a session and build the initial tree
    ///
    /// An out-of-range `initial_size` is logged and leaves the tree empty;
    /// use [`Visualizer::try_new`] to surface it instead.
    pub fn new(config: VisualizerConfig) -> Self {
        let mut visualizer = Self::unbuilt(config);
        if let Err(err) = visualizer.rebuild_tree(visualizer.config.initial_size) {
            warn!(%err, "initial tree not built");
        }
        visualizer
    }

    /// Create a session, failing if the initial tree cannot be built
    pub fn try_new(config: VisualizerConfig) -> Result<Self, VisualizerError> {
        let mut visualizer = Self::unbuilt(config);
        visualizer.rebuild_tree(visualizer.config.initial_size)?;
        Ok(visualizer)
    }

    fn unbuilt(config: VisualizerConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            rng,
            tree: BalancedTree::empty(),
            controller: SearchController::new(),
        }
    }

    /// Session configuration
    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    /// Current tree
    pub fn tree(&self) -> &BalancedTree {
        &self.tree
    }

    /// Search controller (phase, last outcome)
    pub fn controller(&self) -> &SearchController {
        &self.controller
    }

    /// Replace the tree with one built from `size` fresh random keys
    pub fn rebuild_tree(&mut self, size: usize) -> Result<&BalancedTree, VisualizerError> {
        if !(MIN_TREE_SIZE..=MAX_TREE_SIZE).contains(&size) {
            return Err(VisualizerError::InvalidSize {
                size,
                min: MIN_TREE_SIZE,
                max: MAX_TREE_SIZE,
            });
        }

        // Any search over the old tree is meaningless now
        self.controller.cancel();

        let keys = keys::random_key_set(size, &mut self.rng);
        self.tree = BalancedTree::from_sorted(&keys);
        info!(size, depth = self.tree.depth(), "{}", rebuild_message(size));
        Ok(&self.tree)
    }

    /// Update canvas bounds (takes effect on the next layout)
    pub fn resize(&mut self, width: f64, height: f64) {
        self.config.canvas_width = width;
        self.config.canvas_height = height;
    }

    /// Update the pause after each visited node
    pub fn set_step_delay(&mut self, delay: Duration) {
        self.config.step_delay = delay;
    }

    /// Layout for the current tree and canvas
    pub fn layout(&self) -> Result<Layout, VisualizerError> {
        Ok(compute_layout(
            &self.tree,
            self.config.canvas_width,
            self.config.canvas_height,
        )?)
    }

    /// Start a controller-owned search and return its lazy event sequence
    ///
    /// Events are unpaced; use [`Visualizer::animate`] to pace them.
    pub fn run_search(&mut self, target: Key, mode: SearchMode) -> ControllerEvents<'_> {
        self.start_search(target, mode);
        self.controller.events(&mut self.tree)
    }

    /// Start a search owned by the session controller
    pub fn start_search(&mut self, target: Key, mode: SearchMode) -> CancelToken {
        info!("{}", search_started_message(mode, target));
        self.controller.start(&mut self.tree, target, mode)
    }

    /// Advance the controller-owned search by one event
    pub fn step_search(&mut self) -> Option<SearchEvent> {
        self.controller.step(&mut self.tree)
    }

    /// Drive the controller-owned search with the configured delay
    pub fn animate<F>(&mut self, target: Key, mode: SearchMode, paint: F) -> Option<SearchOutcome>
    where
        F: FnMut(&SearchEvent, &BalancedTree),
    {
        self.start_search(target, mode);
        let mut pacer = StepPacer::new(self.config.step_delay);
        self.controller.run_blocking(&mut self.tree, &mut pacer, paint)
    }
}

/// Status line after a rebuild
pub fn rebuild_message(size: usize) -> String {
    format!("Tree size updated to {} nodes. Try searching for a value!", size)
}

/// Status line when a search begins
pub fn search_started_message(mode: SearchMode, target: Key) -> String {
    format!("Performing {} for value: {}", mode, target)
}
