//! Time-paced search driving
//!
//! Steps are strictly sequential: the event after a `Step` is produced
//! only once the caller has had a chance to paint and the step delay has
//! elapsed. Two drivers share that contract:
//! - [`StepPacer::poll`] for event loops (call once per frame, after painting)
//! - [`StepPacer::run_blocking`] and [`StepPacer::drive`] for sequential callers (sleep between steps)

use std::time::{Duration, Instant};

use crate::search::{Search, SearchEvent, SearchOutcome};
use crate::tree::BalancedTree;

/// Pause after each visited node
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(100);

/// Gate that releases one search event per delay interval
#[derive(Debug, Clone)]
pub struct StepPacer {
    delay: Duration,
    last_step: Option<Instant>,
}

impl Default for StepPacer {
    fn default() -> Self {
        Self::new(DEFAULT_STEP_DELAY)
    }
}

impl StepPacer {
    /// Pacer with the given inter-step delay
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_step: None,
        }
    }

    /// Configured delay
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Earliest instant at which the next event may be released
    pub fn next_due(&self) -> Option<Instant> {
        self.last_step.map(|at| at + self.delay)
    }

    /// Release the next event if it is due at `now`
    ///
    /// Returns `None` both when the delay has not elapsed yet and when the
    /// search is over; check [`Search::phase`] to tell them apart.
    pub fn poll(
        &mut self,
        search: &mut Search,
        tree: &mut BalancedTree,
        now: Instant,
    ) -> Option<SearchEvent> {
        if let Some(due) = self.next_due() {
            if now < due {
                return None;
            }
        }

        let event = search.step(tree)?;
        self.last_step = match event {
            SearchEvent::Step { .. } => Some(now),
            SearchEvent::Finished(_) => None,
        };
        Some(event)
    }

    /// Drive `search` to completion, sleeping between steps
    ///
    /// `paint` sees every event together with the tree state it produced.
    /// Returns the outcome, or `None` if the search was cancelled.
    pub fn run_blocking<F>(
        &mut self,
        mut search: Search,
        tree: &mut BalancedTree,
        paint: F,
    ) -> Option<SearchOutcome>
    where
        F: FnMut(&SearchEvent, &BalancedTree),
    {
        self.drive(|tree| search.step(tree), tree, paint)
    }

    /// Pull events from `next` until it is exhausted, sleeping after steps
    ///
    /// `next` is any stepping source over `tree`: a bare [`Search`] or a
    /// [`SearchController`](crate::search::SearchController) that records
    /// outcomes.
    pub fn drive<N, F>(
        &mut self,
        mut next: N,
        tree: &mut BalancedTree,
        mut paint: F,
    ) -> Option<SearchOutcome>
    where
        N: FnMut(&mut BalancedTree) -> Option<SearchEvent>,
        F: FnMut(&SearchEvent, &BalancedTree),
    {
        while let Some(event) = next(tree) {
            paint(&event, tree);
            match event {
                SearchEvent::Step { .. } => {
                    self.last_step = Some(Instant::now());
                    if !self.delay.is_zero() {
                        std::thread::sleep(self.delay);
                    }
                }
                SearchEvent::Finished(outcome) => {
                    self.last_step = None;
                    return Some(outcome);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{visited_keys, SearchMode};
    use crate::tree::VisualState;

    fn seven() -> BalancedTree {
        BalancedTree::from_sorted(&[1, 2, 3, 4, 5, 6, 7])
    }

    #[test]
    fn test_poll_waits_for_delay() {
        let mut tree = seven();
        let mut search = Search::start(&mut tree, 6, SearchMode::Binary);
        let mut pacer = StepPacer::new(Duration::from_millis(100));
        let t0 = Instant::now();

        let first = pacer.poll(&mut search, &mut tree, t0);
        assert!(matches!(first, Some(SearchEvent::Step { key: 4, .. })));

        // Too early
        assert_eq!(pacer.poll(&mut search, &mut tree, t0 + Duration::from_millis(50)), None);
        assert_eq!(search.steps(), 1);

        let second = pacer.poll(&mut search, &mut tree, t0 + Duration::from_millis(100));
        assert!(matches!(second, Some(SearchEvent::Step { key: 6, .. })));

        let t2 = t0 + Duration::from_millis(100);
        assert_eq!(pacer.poll(&mut search, &mut tree, t2 + Duration::from_millis(99)), None);
        let last = pacer.poll(&mut search, &mut tree, t2 + Duration::from_millis(100));
        assert!(last.and_then(|e| e.outcome().copied()).unwrap().found);

        assert_eq!(pacer.poll(&mut search, &mut tree, t2 + Duration::from_secs(5)), None);
    }

    #[test]
    fn test_run_blocking_paints_each_step() {
        let mut tree = seven();
        let search = Search::start(&mut tree, 8, SearchMode::Binary);
        let mut pacer = StepPacer::new(Duration::ZERO);

        let mut events = Vec::new();
        let mut visited_when_painted = Vec::new();
        let outcome = pacer
            .run_blocking(search, &mut tree, |event, tree| {
                events.push(*event);
                if let SearchEvent::Step { key, .. } = event {
                    visited_when_painted.push(tree.visual_state_of(*key));
                }
            })
            .unwrap();

        assert!(!outcome.found);
        assert_eq!(visited_keys(&events), vec![4, 6, 7]);
        assert!(visited_when_painted
            .iter()
            .all(|state| *state == Some(VisualState::Visited)));
    }

    #[test]
    fn test_run_blocking_cancelled() {
        let mut tree = seven();
        let search = Search::start(&mut tree, 7, SearchMode::Linear);
        let token = search.cancel_token();
        let mut pacer = StepPacer::new(Duration::ZERO);

        let outcome = pacer.run_blocking(search, &mut tree, |_, _| token.cancel());

        assert!(outcome.is_none());
    }
}
