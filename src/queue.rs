use std::collections::VecDeque;
use std::sync::Mutex;

use crate::board::Board;

/// Shared FIFO of partial boards waiting to be solved.
///
/// The queue is fully populated by the seeding solver before any worker
/// starts, so consumers never wait for a producer: an empty queue is the
/// normal terminal condition for a worker. One internal lock guards the
/// compound emptiness-check-and-pop, so two workers can never claim the
/// same board.
#[derive(Debug, Default)]
pub struct WorkQueue {
    items: Mutex<VecDeque<Board>>,
}

impl WorkQueue {
    pub fn new() -> Self {
        WorkQueue {
            items: Mutex::new(VecDeque::new()),
        }
    }

    pub fn push(&self, board: Board) {
        self.items.lock().unwrap().push_back(board);
    }

    /// Pops the oldest board, or `None` when the queue is drained.
    pub fn try_pop(&self) -> Option<Board> {
        self.items.lock().unwrap().pop_front()
    }

    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
