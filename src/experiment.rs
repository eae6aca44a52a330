use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use log::{error, info};

use crate::board::{Board, Solution};
use crate::config::Config;
use crate::monitor::MemoryMonitor;
use crate::probe;
use crate::queue::WorkQueue;
use crate::solver::Solver;

/// Everything one experiment produced. Immutable after construction;
/// consumed by the report boundary.
#[derive(Debug, Clone)]
pub struct ExperimentResult {
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    /// Wall-clock instant of the earliest solution across all workers.
    /// `None` when no worker found any solution - deliberately distinct
    /// from any valid timestamp.
    pub first_solution_at: Option<DateTime<Utc>>,
    pub time_to_first: Option<Duration>,
    pub time_to_all: Duration,
    pub cpu_time: Duration,
    pub peak_memory_mb: f64,
    pub solutions: Vec<Solution>,
}

impl ExperimentResult {
    pub fn num_solutions(&self) -> usize {
        self.solutions.len()
    }
}

/// What the search phase of an experiment yielded, before timing and
/// resource metrics are attached.
struct SearchOutcome {
    solutions: Vec<Solution>,
    first_solution_at: Option<Instant>,
    /// Boards placed into the work queue by the seeding solver.
    seeded: usize,
    /// Finished solvers collected from the workers.
    processed: usize,
    /// Workers that panicked instead of joining cleanly. Their claimed
    /// boards are unaccounted for.
    panicked: usize,
}

/// Runs one experiment to completion.
///
/// There is no cancellation and no timeout: every worker runs until the
/// queue is drained. The memory monitor brackets the entire run, seeding
/// and aggregation included.
pub fn run_experiment(config: &Config) -> ExperimentResult {
    let monitor = MemoryMonitor::start();
    let started_at = Utc::now();
    let started = Instant::now();
    let cpu_before = probe::cpu_time();

    let outcome = if config.is_parallel() {
        run_parallel(config)
    } else {
        run_sequential(config)
    };

    let cpu_time = probe::cpu_time().saturating_sub(cpu_before);
    let time_to_all = started.elapsed();
    let ended_at = Utc::now();
    let peak_memory_mb = monitor.stop();

    // A panicked worker may have taken boards down with it; only a clean
    // run is held to the conservation invariant.
    debug_assert!(
        outcome.panicked > 0 || outcome.processed == outcome.seeded,
        "every seeded board must be processed exactly once"
    );

    let time_to_first = outcome
        .first_solution_at
        .map(|at| at.saturating_duration_since(started));
    let first_solution_at = time_to_first
        .and_then(|d| chrono::Duration::from_std(d).ok())
        .map(|d| started_at + d);

    ExperimentResult {
        started_at,
        ended_at,
        first_solution_at,
        time_to_first,
        time_to_all,
        cpu_time,
        peak_memory_mb,
        solutions: outcome.solutions,
    }
}

/// Sequential mode: one solver, straight through from the empty board.
fn run_sequential(config: &Config) -> SearchOutcome {
    let mut solver = config.solver.spawn(Board::empty(config.board_size), 0, None);
    solver.solve();

    SearchOutcome {
        solutions: solver.solutions().to_vec(),
        first_solution_at: solver.first_solution_at(),
        seeded: 1,
        processed: 1,
        panicked: 0,
    }
}

/// Parallel mode: seed the shared queue up to the configured depth, let a
/// fixed pool of workers drain it, then merge the per-worker results.
fn run_parallel(config: &Config) -> SearchOutcome {
    let queue = Arc::new(WorkQueue::new());

    // A depth of zero would make the seeder solve instead of seed.
    let seed_depth = config.domain_granularity.max(1);
    let mut seeder = config.solver.spawn(
        Board::empty(config.board_size),
        seed_depth,
        Some(Arc::clone(&queue)),
    );
    seeder.solve();

    let seeded = queue.len();
    info!("Work queue populated with {} initial state(s)", seeded);

    // Finished solvers, appended once per dequeued board under their own
    // lock, read only after every worker has joined.
    let finished: Arc<Mutex<Vec<Box<dyn Solver>>>> =
        Arc::new(Mutex::new(Vec::with_capacity(seeded)));

    let mut workers = Vec::with_capacity(config.n_threads);
    for _ in 0..config.n_threads {
        let queue = Arc::clone(&queue);
        let finished = Arc::clone(&finished);
        let kind = config.solver;

        workers.push(thread::spawn(move || {
            // An empty queue is the worker's normal exit, even on the
            // very first pop.
            while let Some(initial) = queue.try_pop() {
                let mut solver = kind.spawn(initial, 0, None);
                solver.solve();
                finished.lock().unwrap().push(solver);
            }
        }));
    }

    let mut panicked = 0;
    for worker in workers {
        if worker.join().is_err() {
            panicked += 1;
            error!("A worker thread panicked; its results are lost");
        }
    }

    let finished = finished.lock().unwrap();
    let processed = finished.len();

    let mut solutions = Vec::new();
    let mut first_solution_at: Option<Instant> = None;
    for solver in finished.iter() {
        solutions.extend_from_slice(solver.solutions());
        // A worker with zero solutions contributes nothing here; its
        // absence must not be mistaken for "earliest".
        if let Some(at) = solver.first_solution_at() {
            first_solution_at = Some(first_solution_at.map_or(at, |cur| cur.min(at)));
        }
    }

    SearchOutcome {
        solutions,
        first_solution_at,
        seeded,
        processed,
        panicked,
    }
}
