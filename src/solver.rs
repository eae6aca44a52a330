use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;

use crate::board::{Board, Solution};
use crate::queue::WorkQueue;

pub mod ac3;
pub mod bt;
mod domains;
pub mod fc;

use ac3::Ac3Solver;
use bt::BtSolver;
use fc::ForwardCheckingSolver;

/// Contract every search variant fulfills.
///
/// A solver is constructed around an initial partial board. With a seed
/// depth of zero it performs an exhaustive search from that board,
/// recording every complete solution and the instant the first one was
/// found. With a nonzero seed depth and a work queue it instead enumerates
/// the frontier states at that depth into the queue and records nothing.
pub trait Solver: Send {
    /// Runs the search to completion.
    fn solve(&mut self);

    /// Complete solutions found, in discovery order.
    fn solutions(&self) -> &[Solution];

    /// Instant the first solution was recorded. `None` when no solution
    /// was found, never a default timestamp.
    fn first_solution_at(&self) -> Option<Instant>;
}

/// The closed set of search variants this harness can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolverKind {
    /// Chronological backtracking.
    Bt,
    /// Backtracking with forward checking.
    BtFc,
    /// Forward checking with dynamic (minimum-remaining-values) row ordering.
    BtFcDvo,
    /// Backtracking with AC-3 arc-consistency propagation.
    Ac3,
    /// AC-3 with dynamic row ordering.
    Ac3Dvo,
}

impl SolverKind {
    pub const ALL: [SolverKind; 5] = [
        SolverKind::Bt,
        SolverKind::BtFc,
        SolverKind::BtFcDvo,
        SolverKind::Ac3,
        SolverKind::Ac3Dvo,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SolverKind::Bt => "BT",
            SolverKind::BtFc => "BT-FC",
            SolverKind::BtFcDvo => "BT-FC-DVO",
            SolverKind::Ac3 => "AC3",
            SolverKind::Ac3Dvo => "AC3-DVO",
        }
    }

    /// Builds a solver of this kind around the given initial board.
    ///
    /// `seed_depth > 0` together with a queue selects seeding mode; workers
    /// pass `0` and `None` to solve a dequeued board to completion.
    pub fn spawn(
        self,
        initial: Board,
        seed_depth: usize,
        queue: Option<Arc<WorkQueue>>,
    ) -> Box<dyn Solver> {
        match self {
            SolverKind::Bt => Box::new(BtSolver::new(initial, seed_depth, queue)),
            SolverKind::BtFc => {
                Box::new(ForwardCheckingSolver::new(initial, seed_depth, queue, false))
            }
            SolverKind::BtFcDvo => {
                Box::new(ForwardCheckingSolver::new(initial, seed_depth, queue, true))
            }
            SolverKind::Ac3 => Box::new(Ac3Solver::new(initial, seed_depth, queue, false)),
            SolverKind::Ac3Dvo => Box::new(Ac3Solver::new(initial, seed_depth, queue, true)),
        }
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a configuration names a solver kind outside the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown solver type '{0}' (expected one of BT, BT-FC, BT-FC-DVO, AC3, AC3-DVO)")]
pub struct UnknownSolverKind(pub String);

impl FromStr for SolverKind {
    type Err = UnknownSolverKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SolverKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownSolverKind(s.to_string()))
    }
}

/// Where a search variant delivers what it finds.
///
/// In seeding mode (`seed_depth > 0` and a queue present) boards reaching
/// the seed depth are pushed as frontier states and nothing is recorded.
/// Otherwise complete boards are recorded as solutions, along with the
/// instant the first one appeared.
pub(crate) struct SearchSink {
    seed_depth: usize,
    queue: Option<Arc<WorkQueue>>,
    solutions: Vec<Solution>,
    first_solution_at: Option<Instant>,
}

impl SearchSink {
    pub(crate) fn new(seed_depth: usize, queue: Option<Arc<WorkQueue>>) -> Self {
        SearchSink {
            seed_depth,
            queue,
            solutions: Vec::new(),
            first_solution_at: None,
        }
    }

    fn is_seeding(&self) -> bool {
        self.seed_depth > 0 && self.queue.is_some()
    }

    /// Emits the board as a frontier state once it reaches the seed depth.
    /// Returns `true` when the branch must be cut instead of explored.
    pub(crate) fn offer_frontier(&mut self, board: &Board) -> bool {
        if !self.is_seeding() || board.assigned_count() != self.seed_depth {
            return false;
        }
        if let Some(queue) = &self.queue {
            queue.push(board.clone());
        }
        true
    }

    /// Records a complete board. A no-op in seeding mode.
    pub(crate) fn record_solution(&mut self, board: &Board) {
        if self.is_seeding() {
            return;
        }
        let Some(solution) = board.to_solution() else {
            return;
        };
        self.first_solution_at.get_or_insert_with(Instant::now);
        self.solutions.push(solution);
    }

    pub(crate) fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    pub(crate) fn first_solution_at(&self) -> Option<Instant> {
        self.first_solution_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_through_str() {
        for kind in SolverKind::ALL {
            assert_eq!(kind.as_str().parse::<SolverKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let err = "BT-XYZ".parse::<SolverKind>().unwrap_err();
        assert_eq!(err, UnknownSolverKind("BT-XYZ".to_string()));
    }

    #[test]
    fn test_every_kind_finds_the_two_4x4_solutions() {
        for kind in SolverKind::ALL {
            let mut solver = kind.spawn(Board::empty(4), 0, None);
            solver.solve();

            let mut solutions = solver.solutions().to_vec();
            solutions.sort();
            assert_eq!(
                solutions,
                vec![vec![1, 3, 0, 2], vec![2, 0, 3, 1]],
                "solver {} returned wrong 4x4 solutions",
                kind
            );
            assert!(solver.first_solution_at().is_some());
        }
    }

    #[test]
    fn test_every_kind_agrees_on_known_counts() {
        let cases: Vec<(usize, usize)> = vec![(2, 0), (3, 0), (5, 10), (6, 4), (8, 92)];

        for (size, expected) in cases {
            for kind in SolverKind::ALL {
                let mut solver = kind.spawn(Board::empty(size), 0, None);
                solver.solve();
                assert_eq!(
                    solver.solutions().len(),
                    expected,
                    "solver {} on a {}x{} board",
                    kind,
                    size,
                    size
                );
                assert_eq!(
                    solver.first_solution_at().is_some(),
                    expected > 0,
                    "first-solution instant must exist iff solutions do ({})",
                    kind
                );
            }
        }
    }

    #[test]
    fn test_solutions_are_valid_placements() {
        for kind in SolverKind::ALL {
            let mut solver = kind.spawn(Board::empty(6), 0, None);
            solver.solve();
            for solution in solver.solutions() {
                assert!(
                    Board::from_solution(solution).is_consistent(),
                    "solver {} produced an attacked placement: {:?}",
                    kind,
                    solution
                );
            }
        }
    }

    #[test]
    fn test_seeding_enumerates_the_frontier() {
        // Depth 1 under plain BT expands every first-row placement.
        let queue = Arc::new(WorkQueue::new());
        let mut seeder = SolverKind::Bt.spawn(Board::empty(8), 1, Some(Arc::clone(&queue)));
        seeder.solve();

        assert_eq!(queue.len(), 8);
        assert!(seeder.solutions().is_empty(), "seeding must record nothing");
        assert_eq!(seeder.first_solution_at(), None);

        // Pruning variants may seed fewer states, never more.
        for kind in [SolverKind::BtFc, SolverKind::Ac3] {
            let queue = Arc::new(WorkQueue::new());
            let mut seeder = kind.spawn(Board::empty(8), 2, Some(Arc::clone(&queue)));
            seeder.solve();
            assert!(queue.len() <= 8 * 8);
            assert!(queue.len() > 0);
            assert!(seeder.solutions().is_empty());
        }
    }

    #[test]
    fn test_seed_depth_beyond_board_leaves_queue_empty() {
        let queue = Arc::new(WorkQueue::new());
        let mut seeder = SolverKind::Bt.spawn(Board::empty(3), 5, Some(Arc::clone(&queue)));
        seeder.solve();

        // The search dead-ends (or completes) before ever reaching depth 5.
        assert!(queue.is_empty());
        assert!(seeder.solutions().is_empty());
    }

    #[test]
    fn test_solving_from_seeded_states_partitions_the_search() {
        // Union of the per-state solution sets must equal the full set.
        for kind in SolverKind::ALL {
            let queue = Arc::new(WorkQueue::new());
            let mut seeder = kind.spawn(Board::empty(6), 2, Some(Arc::clone(&queue)));
            seeder.solve();

            let mut combined = Vec::new();
            while let Some(board) = queue.try_pop() {
                let mut solver = kind.spawn(board, 0, None);
                solver.solve();
                combined.extend_from_slice(solver.solutions());
            }
            combined.sort();
            combined.dedup();
            assert_eq!(
                combined.len(),
                4,
                "solver {} lost or duplicated solutions across seeds",
                kind
            );
        }
    }

    #[test]
    fn test_inconsistent_initial_board_yields_nothing() {
        let mut board = Board::empty(5);
        board.place(0, 0);
        board.place(1, 0); // same column

        for kind in SolverKind::ALL {
            let mut solver = kind.spawn(board.clone(), 0, None);
            solver.solve();
            assert!(solver.solutions().is_empty(), "solver {}", kind);
            assert_eq!(solver.first_solution_at(), None);
        }
    }

    #[test]
    fn test_complete_initial_board_is_recognized() {
        let valid = Board::from_solution(&[1, 3, 0, 2]);
        let mut solver = SolverKind::BtFcDvo.spawn(valid, 0, None);
        solver.solve();
        assert_eq!(solver.solutions(), &[vec![1, 3, 0, 2]]);
    }
}
