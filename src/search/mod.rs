//! Step-sequenced tree search
//!
//! A [`Search`] is a small state machine advanced one event at a time by
//! [`Search::step`]. Each call borrows the tree only for the duration of
//! the step, so a renderer can read visual state between steps.
//!
//! Event order for a run:
//!   Step(k1), Step(k2), ..., Step(kn), Finished(outcome)
//! A visited node's key is compared on the call *after* its `Step`, so
//! the visit is observable before the match is declared.

mod controller;

pub use controller::{CancelToken, ControllerEvents, SearchController};

use std::fmt;

use tracing::{debug, trace, warn};

use crate::tree::{is_strictly_ascending, BalancedTree, Direction, Key, NodePath, VisualState};

/// Traversal strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SearchMode {
    /// Pre-order walk ignoring key order; up to N steps
    Linear,

    /// One node per level guided by key comparison; up to depth steps
    Binary,
}

impl SearchMode {
    /// Human-readable name
    pub fn label(&self) -> &'static str {
        match self {
            SearchMode::Linear => "Linear Search",
            SearchMode::Binary => "Binary Search",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lifecycle of a search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchPhase {
    /// No search started
    Idle,

    /// Steps remain
    Running,

    /// Target matched (terminal)
    Found,

    /// Traversal exhausted (terminal)
    NotFound,

    /// Pre-empted by a newer search (terminal, no outcome emitted)
    Cancelled,
}

impl SearchPhase {
    /// True for phases that emit no further events
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SearchPhase::Found | SearchPhase::NotFound | SearchPhase::Cancelled
        )
    }
}

/// Terminal result of a search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SearchOutcome {
    /// Strategy used
    pub mode: SearchMode,
    /// Requested key (equal to the matched key when found)
    pub target: Key,
    /// Whether the target was matched
    pub found: bool,
    /// Nodes visited
    pub steps: usize,
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.found {
            write!(f, "Value {} found!", self.target)
        } else {
            write!(f, "Value {} not found in the tree.", self.target)
        }
    }
}

/// Observable unit of search progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SearchEvent {
    /// A node was visited; its visual state is now `state`
    Step {
        /// Visited key
        key: Key,
        /// State the node was set to
        state: VisualState,
    },

    /// The search ended
    Finished(SearchOutcome),
}

impl SearchEvent {
    /// Outcome, for the terminal event
    pub fn outcome(&self) -> Option<&SearchOutcome> {
        match self {
            SearchEvent::Finished(outcome) => Some(outcome),
            SearchEvent::Step { .. } => None,
        }
    }
}

/// One search run over one tree
///
/// Non-restartable: once the terminal event has been produced, `step`
/// returns `None` forever. Start a new `Search` to search again.
#[derive(Debug)]
pub struct Search {
    mode: SearchMode,
    target: Key,
    phase: SearchPhase,

    /// Paths still to visit. Linear: DFS stack. Binary: at most one entry.
    frontier: Vec<NodePath>,

    /// Visited node whose key has not been compared yet
    pending: Option<NodePath>,

    steps: usize,
    cancel: CancelToken,
}

impl Search {
    /// Reset all visual state in `tree` and begin a search for `target`
    pub fn start(tree: &mut BalancedTree, target: Key, mode: SearchMode) -> Self {
        Self::with_cancel_token(tree, target, mode, CancelToken::new())
    }

    /// Like [`Search::start`], observing an externally held token
    pub fn with_cancel_token(
        tree: &mut BalancedTree,
        target: Key,
        mode: SearchMode,
        cancel: CancelToken,
    ) -> Self {
        if mode == SearchMode::Binary {
            debug_assert!(
                is_strictly_ascending(&tree.keys_in_order()),
                "binary search requires a binary search tree"
            );
        }

        tree.reset_all();

        let frontier = if tree.is_empty() {
            Vec::new()
        } else {
            vec![NodePath::root()]
        };

        debug!(%mode, target_key = target, nodes = tree.len(), "search started");

        Self {
            mode,
            target,
            phase: SearchPhase::Running,
            frontier,
            pending: None,
            steps: 0,
            cancel,
        }
    }

    /// Strategy in use
    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Requested key
    pub fn target(&self) -> Key {
        self.target
    }

    /// Current phase
    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    /// Nodes visited so far
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Token that cancels this search when triggered
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Cancel this search; no further events are produced
    pub fn cancel(&mut self) {
        self.cancel.cancel();
        if !self.phase.is_terminal() {
            self.phase = SearchPhase::Cancelled;
        }
    }

    /// Advance by one event
    ///
    /// `tree` must be the tree the search was started on.
    pub fn step(&mut self, tree: &mut BalancedTree) -> Option<SearchEvent> {
        if self.phase.is_terminal() {
            return None;
        }
        if self.cancel.is_cancelled() {
            warn!(target_key = self.target, steps = self.steps, "search pre-empted");
            self.phase = SearchPhase::Cancelled;
            return None;
        }

        if let Some(path) = self.pending.take() {
            let Some(node) = tree.node_at_mut(&path) else {
                return Some(self.finish(false));
            };

            if node.key == self.target {
                node.visual_state = VisualState::Found;
                return Some(self.finish(true));
            }

            match self.mode {
                SearchMode::Linear => {
                    // Right first so the left subtree is visited first
                    if node.right.is_some() {
                        self.frontier.push(path.child(Direction::Right));
                    }
                    if node.left.is_some() {
                        self.frontier.push(path.child(Direction::Left));
                    }
                }
                SearchMode::Binary => {
                    let (direction, child) = if self.target < node.key {
                        (Direction::Left, &node.left)
                    } else {
                        (Direction::Right, &node.right)
                    };
                    if child.is_some() {
                        self.frontier.push(path.child(direction));
                    }
                }
            }
        }

        let Some(path) = self.frontier.pop() else {
            return Some(self.finish(false));
        };
        let Some(node) = tree.node_at_mut(&path) else {
            return Some(self.finish(false));
        };

        node.visual_state = VisualState::Visited;
        self.steps += 1;
        trace!(key = node.key, step = self.steps, "visit");

        let key = node.key;
        self.pending = Some(path);
        Some(SearchEvent::Step {
            key,
            state: VisualState::Visited,
        })
    }

    /// Borrow `tree` and drain events lazily
    pub fn events(self, tree: &mut BalancedTree) -> SearchEvents<'_> {
        SearchEvents { search: self, tree }
    }

    fn finish(&mut self, found: bool) -> SearchEvent {
        self.phase = if found {
            SearchPhase::Found
        } else {
            SearchPhase::NotFound
        };
        self.frontier.clear();
        self.pending = None;

        let outcome = SearchOutcome {
            mode: self.mode,
            target: self.target,
            found,
            steps: self.steps,
        };
        debug!(%outcome, steps = self.steps, "search finished");
        SearchEvent::Finished(outcome)
    }
}

/// Iterator over the events of one search
#[derive(Debug)]
pub struct SearchEvents<'t> {
    search: Search,
    tree: &'t mut BalancedTree,
}

impl SearchEvents<'_> {
    /// Underlying state machine
    pub fn search(&self) -> &Search {
        &self.search
    }
}

impl Iterator for SearchEvents<'_> {
    type Item = SearchEvent;

    fn next(&mut self) -> Option<SearchEvent> {
        self.search.step(self.tree)
    }
}

/// Keys visited by a run, in order
pub fn visited_keys(events: &[SearchEvent]) -> Vec<Key> {
    events
        .iter()
        .filter_map(|event| match event {
            SearchEvent::Step { key, .. } => Some(*key),
            SearchEvent::Finished(_) => None,
        })
        .collect()
}
