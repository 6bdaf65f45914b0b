//! `EventQueue` — per-entity FIFO of deferred tasks.
//!
//! # Why this exists
//!
//! Boarding is started by a side effect (a ride effect being applied) but
//! must not mutate seat state from inside that side effect.  The request is
//! therefore queued on the candidate's own queue and executed when the world
//! drains queues later in the same tick.  Cancellation before execution is
//! always possible because draining and cancelling happen on the same thread,
//! in tick order: a cancelled request either has its entry removed here or
//! is marked aborted in the boarding ledger, which the drain checks.

use std::collections::VecDeque;

use mp_core::RequestId;

/// A unit of deferred work owned by one entity.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Task {
    /// Execute boarding request `RequestId` if it is still queued.
    Board(RequestId),
}

/// FIFO task queue for one entity.
#[derive(Debug, Default)]
pub struct EventQueue {
    tasks: VecDeque<Task>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task to run at the next drain.
    pub fn push(&mut self, task: Task) {
        self.tasks.push_back(task);
    }

    /// Take every queued task, oldest first.
    ///
    /// Tasks pushed while the returned batch is being executed wait for the
    /// next drain.
    pub fn drain(&mut self) -> VecDeque<Task> {
        std::mem::take(&mut self.tasks)
    }

    /// Remove queued tasks matching `pred`.  Returns how many were removed.
    pub fn cancel_where(&mut self, mut pred: impl FnMut(&Task) -> bool) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !pred(t));
        before - self.tasks.len()
    }

    /// Queued boarding requests, oldest first.
    pub fn board_requests(&self) -> impl Iterator<Item = RequestId> + '_ {
        self.tasks.iter().map(|t| match t {
            Task::Board(id) => *id,
        })
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
