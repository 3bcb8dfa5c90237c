//! Generic depth-first backtracking search.
//!
//! The driver knows nothing about grids, paths, or regions: it walks a tree
//! of opaque states, pruning with a caller-supplied reject test and reporting
//! accepted states through an output callback. The search-specific policy
//! (what a state is, how it branches, in which order) lives entirely in the
//! [`SearchState`] implementation and the closures handed to [`backtrack`].

/// A node in the search tree.
pub trait SearchState {
    /// One way of extending this state.
    type Choice;

    /// The child state reached by taking `choice`. The parent must stay
    /// usable; siblings branch from it again.
    fn branch(&self, choice: Self::Choice) -> Self;
}

/// Outcome of exploring one subtree.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SearchStatus {
    /// The state or a descendant was accepted.
    Accepted,
    /// The state itself was pruned.
    Rejected,
    /// Every descendant was explored without an accept.
    Exhausted,
}

/// Counters accumulated over a whole search.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct SearchStats {
    /// States handed to the reject test, the pruned ones included.
    pub states_visited: u64,
    /// Accepted states seen by the output callback.
    pub accepted: usize,
}

struct Driver<R, A, C, O> {
    reject: R,
    accept: A,
    choices: C,
    output: O,
    solution_limit: Option<usize>,
    stats: SearchStats,
}

impl<R, A, C, O> Driver<R, A, C, O> {
    fn capped(&self) -> bool {
        self.solution_limit
            .is_some_and(|limit| self.stats.accepted >= limit)
    }

    fn explore<S>(&mut self, state: &mut S) -> SearchStatus
    where
        S: SearchState,
        R: FnMut(&mut S) -> bool,
        A: FnMut(&S) -> bool,
        C: FnMut(&S) -> Vec<S::Choice>,
        O: FnMut(&S),
    {
        self.stats.states_visited += 1;

        if (self.reject)(state) {
            return SearchStatus::Rejected;
        }

        if (self.accept)(state) {
            self.stats.accepted += 1;
            (self.output)(state);
            return SearchStatus::Accepted;
        }

        let mut any_accepted = false;
        for choice in (self.choices)(state) {
            let mut next = state.branch(choice);
            let status = self.explore(&mut next);
            any_accepted |= status == SearchStatus::Accepted;
            if self.capped() {
                // unwind the whole tree once the cap is reached
                return SearchStatus::Accepted;
            }
        }

        if any_accepted {
            SearchStatus::Accepted
        } else {
            SearchStatus::Exhausted
        }
    }
}

/// Run an exhaustive depth-first search from `start`.
///
/// `reject` prunes a state (and may refresh derived data on it first),
/// `accept` marks it a solution, `choices` lists its extensions in
/// exploration order, and `output` receives every accepted state. With
/// `solution_limit` set, the search unwinds completely as soon as that many
/// states have been accepted.
pub fn backtrack<S, R, A, C, O>(
    start: S,
    reject: R,
    accept: A,
    choices: C,
    output: O,
    solution_limit: Option<usize>,
) -> (SearchStatus, SearchStats)
where
    S: SearchState,
    R: FnMut(&mut S) -> bool,
    A: FnMut(&S) -> bool,
    C: FnMut(&S) -> Vec<S::Choice>,
    O: FnMut(&S),
{
    let mut driver = Driver {
        reject,
        accept,
        choices,
        output,
        solution_limit,
        stats: SearchStats::default(),
    };
    let mut root = start;
    let status = driver.explore(&mut root);

    (status, driver.stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Bit strings, extended one bit at a time.
    struct Bits(Vec<bool>);

    impl SearchState for Bits {
        type Choice = bool;

        fn branch(&self, choice: bool) -> Self {
            let mut next = self.0.clone();
            next.push(choice);
            Bits(next)
        }
    }

    fn all_length_three() -> (Vec<Vec<bool>>, SearchStatus, SearchStats) {
        let mut found = Vec::new();
        let (status, stats) = backtrack(
            Bits(Vec::new()),
            |_: &mut Bits| false,
            |state: &Bits| state.0.len() == 3,
            |_: &Bits| vec![false, true],
            |state: &Bits| found.push(state.0.clone()),
            None,
        );
        (found, status, stats)
    }

    #[test]
    fn enumerates_every_leaf() {
        let (found, status, stats) = all_length_three();
        assert_eq!(found.len(), 8);
        assert_eq!(status, SearchStatus::Accepted);
        assert_eq!(stats.accepted, 8);
        // 1 + 2 + 4 + 8 states in the full tree
        assert_eq!(stats.states_visited, 15);
    }

    #[test]
    fn reject_prunes_subtrees() {
        let mut found = Vec::new();
        let (status, stats) = backtrack(
            Bits(Vec::new()),
            // no two consecutive ones
            |state: &mut Bits| state.0.windows(2).any(|w| w[0] && w[1]),
            |state: &Bits| state.0.len() == 3,
            |_: &Bits| vec![false, true],
            |state: &Bits| found.push(state.0.clone()),
            None,
        );
        assert_eq!(status, SearchStatus::Accepted);
        assert_eq!(found.len(), 5);
        assert!(found.iter().all(|bits| !bits.windows(2).any(|w| w[0] && w[1])));
        assert_eq!(stats.accepted, 5);
    }

    #[test]
    fn limit_unwinds_immediately() {
        let mut found = Vec::new();
        let (status, stats) = backtrack(
            Bits(Vec::new()),
            |_: &mut Bits| false,
            |state: &Bits| state.0.len() == 3,
            |_: &Bits| vec![false, true],
            |state: &Bits| found.push(state.0.clone()),
            Some(3),
        );
        assert_eq!(status, SearchStatus::Accepted);
        assert_eq!(found.len(), 3);
        assert_eq!(stats.accepted, 3);
        assert!(stats.states_visited < 15);
    }

    #[test]
    fn exhausted_when_nothing_accepts() {
        let (status, stats) = backtrack(
            Bits(Vec::new()),
            |state: &mut Bits| state.0.len() > 2,
            |_: &Bits| false,
            |state: &Bits| {
                if state.0.len() < 4 {
                    vec![false, true]
                } else {
                    Vec::new()
                }
            },
            |_: &Bits| {},
            None,
        );
        assert_eq!(status, SearchStatus::Exhausted);
        assert_eq!(stats.accepted, 0);
    }
}
