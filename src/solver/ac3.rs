use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;

use crate::board::{Board, Solution};
use crate::queue::WorkQueue;
use crate::solver::domains::{Domains, Trail};
use crate::solver::{SearchSink, Solver};

/// Backtracking with AC-3 propagation: after every placement the domains
/// are made arc-consistent, which prunes strictly more than forward
/// checking at the cost of the revision loop.
///
/// With `dvo` enabled, the next row is chosen by minimum remaining values.
pub struct Ac3Solver {
    board: Board,
    domains: Domains,
    trail: Trail,
    dvo: bool,
    sink: SearchSink,
    infeasible: bool,
}

impl Ac3Solver {
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
                if let Some(col) = initial.get(row) {
                    domains.restrict_to(row, col, &mut trail);
                }
            }
            // Establish arc consistency over the whole constraint graph
            // before the search starts.
            let all_arcs = (0..size)
                .flat_map(|xi| (0..size).filter(move |&xj| xj != xi).map(move |xj| (xi, xj)))
                .collect();
            infeasible = !run_ac3(&mut domains, &mut trail, all_arcs);
        }

        Ac3Solver {
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

        let size = self.board.size();
        for col in 0..size as u8 {
            if !self.domains.contains(row, col) {
                continue;
            }
            let mark = self.trail.len();
            self.board.place(row, col);
            self.domains.restrict_to(row, col, &mut self.trail);

            // Re-establish consistency outward from the touched row.
            let arcs = (0..size).filter(|&xk| xk != row).map(|xk| (xk, row)).collect();
            if run_ac3(&mut self.domains, &mut self.trail, arcs) {
                self.search();
            }

            self.domains.restore_from(&mut self.trail, mark);
            self.board.clear(row);
        }
    }

    fn select_row(&self) -> Option<usize> {
        if self.dvo {
            (0..self.board.size())
                .filter(|&row| self.board.get(row).is_none())
                .min_by_key(|&row| self.domains.count(row))
        } else {
            self.board.first_unassigned_row()
        }
    }
}

/// Runs the AC-3 worklist to a fixed point. Returns `false` when some
/// domain wipes out.
fn run_ac3(domains: &mut Domains, trail: &mut Trail, mut arcs: VecDeque<(usize, usize)>) -> bool {
    let size = domains.size();
    while let Some((xi, xj)) = arcs.pop_front() {
        if !revise(domains, trail, xi, xj) {
            continue;
        }
        if domains.is_empty(xi) {
            return false;
        }
        for xk in 0..size {
            if xk != xi && xk != xj {
                arcs.push_back((xk, xi));
            }
        }
    }
    true
}

/// Removes the values of `xi` that have no non-attacking support in `xj`.
/// Returns `true` when anything was removed.
fn revise(domains: &mut Domains, trail: &mut Trail, xi: usize, xj: usize) -> bool {
    let mut revised = false;
    let candidates: Vec<u8> = domains.values(xi).collect();
    for col in candidates {
        let supported = domains
            .values(xj)
            .any(|other| !Board::attacks(xi, col, xj, other));
        if !supported {
            domains.remove(xi, col, trail);
            revised = true;
        }
    }
    revised
}

impl Solver for Ac3Solver {
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
