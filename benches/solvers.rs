use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use nqueens::board::Board;
use nqueens::solver::SolverKind;

fn bench_solvers_8x8(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_8x8");
    for kind in SolverKind::ALL {
        group.bench_function(kind.as_str(), |b| {
            b.iter(|| {
                let mut solver = kind.spawn(black_box(Board::empty(8)), 0, None);
                solver.solve();
                solver.solutions().len()
            })
        });
    }
    group.finish();
}

fn bench_seeding(c: &mut Criterion) {
    use nqueens::queue::WorkQueue;
    use std::sync::Arc;

    c.bench_function("seed_10x10_depth_2", |b| {
        b.iter(|| {
            let queue = Arc::new(WorkQueue::new());
            let mut seeder =
                SolverKind::BtFcDvo.spawn(black_box(Board::empty(10)), 2, Some(Arc::clone(&queue)));
            seeder.solve();
            queue.len()
        })
    });
}

criterion_group!(benches, bench_solvers_8x8, bench_seeding);
criterion_main!(benches);
