use std::sync::Arc;
use std::time::Instant;

use crate::board::{Board, Solution};
use crate::queue::WorkQueue;
use crate::solver::domains::{Domains, Trail};
use crate::solver::{SearchSink, Solver};

/// Backtracking with forward checking: every placement prunes the attacked
/// values out of the unassigned rows' domains, and a branch is abandoned
/// as soon as any future domain wipes out.
///
/// With `dvo` enabled, the next row is chosen by minimum remaining values
/// instead of index order.
pub struct ForwardCheckingSolver {
    board: Board,
    domains: Domains,
    trail: Trail,
    dvo: bool,
    sink: SearchSink,
    infeasible: bool,
}

impl ForwardCheckingSolver {
    pub fn new(
        initial: Board,
        seed_depth: usize,
        queue: Option<Arc<WorkQueue>>,
        dvo: bool,
    ) -> Self {
        let size = initial.size();
        let mut domains = Domains::full(size);
        let mut trail = Trail::new();

        let mut infeasible = !initial.is_consistent();
        if !infeasible {
            for row in 0..size {
                let Some(col) = initial.get(row) else { continue };
                domains.restrict_to(row, col, &mut trail);
                if prune_attacked(&mut domains, &initial, row, col, &mut trail) {
                    infeasible = true;
                    break;
                }
            }
        }

        ForwardCheckingSolver {
            board: initial,
            domains,
            trail,
            dvo,
            sink: SearchSink::new(seed_depth, queue),
            infeasible,
        }
    }

    fn search(&mut self) {
        if self.sink.offer_frontier(&self.board) {
            return;
        }
        let Some(row) = self.select_row() else {
            self.sink.record_solution(&self.board);
            return;
        };

        for col in 0..self.board.size() as u8 {
            if !self.domains.contains(row, col) {
                continue;
            }
            let mark = self.trail.len();
            self.board.place(row, col);
            self.domains.restrict_to(row, col, &mut self.trail);

            let wipeout = prune_attacked(&mut self.domains, &self.board, row, col, &mut self.trail);
            if !wipeout {
                self.search();
            }

            self.domains.restore_from(&mut self.trail, mark);
            self.board.clear(row);
        }
    }

    fn select_row(&self) -> Option<usize> {
        if self.dvo {
            // Minimum remaining values across the unassigned rows.
            (0..self.board.size())
                .filter(|&row| self.board.get(row).is_none())
                .min_by_key(|&row| self.domains.count(row))
        } else {
            self.board.first_unassigned_row()
        }
    }
}

/// Removes every value attacked by the queen at `(row, col)` from the
/// unassigned rows' domains. Returns `true` when a domain wipes out.
pub(crate) fn prune_attacked(
    domains: &mut Domains,
    board: &Board,
    row: usize,
    col: u8,
    trail: &mut Trail,
) -> bool {
    for other_row in 0..board.size() {
        if other_row == row || board.get(other_row).is_some() {
            continue;
        }
        for other_col in 0..domains.size() as u8 {
            if domains.contains(other_row, other_col)
                && Board::attacks(row, col, other_row, other_col)
            {
                domains.remove(other_row, other_col, trail);
            }
        }
        if domains.is_empty(other_row) {
            return true;
        }
    }
    false
}

impl Solver for ForwardCheckingSolver {
    fn solve(&mut self) {
        if self.infeasible {
            return;
        }
        self.search();
    }

    fn solutions(&self) -> &[Solution] {
        self.sink.solutions()
    }

    fn first_solution_at(&self) -> Option<Instant> {
        self.sink.first_solution_at()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_plain_backtracking_counts() {
        for size in [4usize, 6, 7] {
            let mut bt = crate::solver::bt::BtSolver::new(Board::empty(size), 0, None);
            bt.solve();

            for dvo in [false, true] {
                let mut fc = ForwardCheckingSolver::new(Board::empty(size), 0, None, dvo);
                fc.solve();
                assert_eq!(
                    fc.solutions().len(),
                    bt.solutions().len(),
                    "FC(dvo={}) disagrees with BT on {}x{}",
                    dvo,
                    size,
                    size
                );
            }
        }
    }

    #[test]
    fn test_initial_pruning_detects_dead_ends() {
        // A queen at (0,1) on a 3x3 board wipes out row 1's entire domain.
        let mut board = Board::empty(3);
        board.place(0, 1);

        let mut solver = ForwardCheckingSolver::new(board, 0, None, false);
        solver.solve();
        assert!(solver.solutions().is_empty());
    }

    #[test]
    fn test_dvo_explores_constrained_rows_first() {
        // Both orderings agree on the solution set.
        let mut plain = ForwardCheckingSolver::new(Board::empty(6), 0, None, false);
        plain.solve();
        let mut dvo = ForwardCheckingSolver::new(Board::empty(6), 0, None, true);
        dvo.solve();

        let mut lhs = plain.solutions().to_vec();
        let mut rhs = dvo.solutions().to_vec();
        lhs.sort();
        rhs.sort();
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn test_domains_restored_across_backtracking() {
        // Exhausting the search must leave the trail fully rewound.
        let mut solver = ForwardCheckingSolver::new(Board::empty(5), 0, None, true);
        solver.solve();
        assert!(solver.trail.is_empty());
        for row in 0..5 {
            assert_eq!(solver.domains.count(row), 5);
        }
    }
}
