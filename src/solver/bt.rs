use std::sync::Arc;
use std::time::Instant;

use crate::board::{Board, Solution};
use crate::queue::WorkQueue;
use crate::solver::{SearchSink, Solver};

/// Chronological backtracking: rows are filled in index order, each
/// placement checked against the queens already on the board.
pub struct BtSolver {
    board: Board,
    sink: SearchSink,
    infeasible: bool,
}

impl BtSolver {
    pub fn new(initial: Board, seed_depth: usize, queue: Option<Arc<WorkQueue>>) -> Self {
        let infeasible = !initial.is_consistent();
        BtSolver {
            board: initial,
            sink: SearchSink::new(seed_depth, queue),
            infeasible,
        }
    }

    fn search(&mut self) {
        if self.sink.offer_frontier(&self.board) {
            return;
        }
        let Some(row) = self.board.first_unassigned_row() else {
            self.sink.record_solution(&self.board);
            return;
        };

        for col in 0..self.board.size() as u8 {
            if self.board.conflicts(row, col) {
                continue;
            }
            self.board.place(row, col);
            self.search();
            self.board.clear(row);
        }
    }
}

impl Solver for BtSolver {
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
