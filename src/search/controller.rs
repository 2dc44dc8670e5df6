//! Single-flight search ownership and pre-emption

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::warn;

use super::{Search, SearchEvent, SearchMode, SearchOutcome, SearchPhase};
use crate::pacing::StepPacer;
use crate::tree::{BalancedTree, Key};

/// Shared cancellation flag
///
/// Clones observe the same flag. Once cancelled, a token stays cancelled.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Fresh, uncancelled token
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Check whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Owns at most one in-flight [`Search`]
///
/// Starting a search cancels the previous one, so state writes from two
/// runs never interleave.
#[derive(Debug, Default)]
pub struct SearchController {
    current: Option<Search>,
    last_outcome: Option<SearchOutcome>,
}

impl SearchController {
    /// Controller in the `Idle` phase
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-empt any running search and start a new one
    pub fn start(&mut self, tree: &mut BalancedTree, target: Key, mode: SearchMode) -> CancelToken {
        self.cancel();
        let search = Search::start(tree, target, mode);
        let token = search.cancel_token();
        self.current = Some(search);
        self.last_outcome = None;
        token
    }

    /// Cancel the in-flight search, if any
    pub fn cancel(&mut self) {
        if let Some(previous) = self.current.as_mut() {
            if previous.phase() == SearchPhase::Running {
                warn!(
                    target_key = previous.target(),
                    steps = previous.steps(),
                    "pre-empting running search"
                );
                previous.cancel();
            }
        }
    }

    /// Advance the current search by one event
    pub fn step(&mut self, tree: &mut BalancedTree) -> Option<SearchEvent> {
        let event = self.current.as_mut()?.step(tree)?;
        if let SearchEvent::Finished(outcome) = event {
            self.last_outcome = Some(outcome);
        }
        Some(event)
    }

    /// Drive the current search to completion through `pacer`
    ///
    /// Returns the outcome, or `None` if the search was cancelled.
    pub fn run_blocking<F>(
        &mut self,
        tree: &mut BalancedTree,
        pacer: &mut StepPacer,
        paint: F,
    ) -> Option<SearchOutcome>
    where
        F: FnMut(&SearchEvent, &BalancedTree),
    {
        pacer.drive(|tree| self.step(tree), tree, paint)
    }

    /// Unpaced events of the current search
    pub fn events<'a>(&'a mut self, tree: &'a mut BalancedTree) -> ControllerEvents<'a> {
        ControllerEvents {
            controller: self,
            tree,
        }
    }

    /// Phase of the current search, `Idle` before the first one
    pub fn phase(&self) -> SearchPhase {
        self.current
            .as_ref()
            .map_or(SearchPhase::Idle, Search::phase)
    }

    /// Outcome of the most recent finished search
    pub fn last_outcome(&self) -> Option<&SearchOutcome> {
        self.last_outcome.as_ref()
    }

    /// Current search, if any
    pub fn current(&self) -> Option<&Search> {
        self.current.as_ref()
    }
}

/// Iterator over the controller-owned search's events
///
/// Outcomes are recorded on the controller as they are yielded.
#[derive(Debug)]
pub struct ControllerEvents<'a> {
    controller: &'a mut SearchController,
    tree: &'a mut BalancedTree,
}

impl Iterator for ControllerEvents<'_> {
    type Item = SearchEvent;

    fn next(&mut self) -> Option<SearchEvent> {
        self.controller.step(self.tree)
    }
}
