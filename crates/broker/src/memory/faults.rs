//! Fault injection for the in-memory broker
//!
//! Queued faults are consumed in FIFO order by the next commits or reads,
//! one fault per operation. A sticky fault applies to every operation until
//! cleared.

use std::collections::VecDeque;

use canopy_core::{CommitError, ReadError};
use parking_lot::Mutex;

/// Failures to hand out instead of real results
#[derive(Debug, Default)]
pub struct FaultInjector {
    commits: Mutex<FaultQueue<CommitError>>,
    reads: Mutex<FaultQueue<ReadError>>,
}

#[derive(Debug)]
struct FaultQueue<E> {
    queued: VecDeque<E>,
    sticky: Option<E>,
}

impl<E> Default for FaultQueue<E> {
    fn default() -> Self {
        FaultQueue {
            queued: VecDeque::new(),
            sticky: None,
        }
    }
}

impl<E: Clone> FaultQueue<E> {
    fn take(&mut self) -> Option<E> {
        self.queued.pop_front().or_else(|| self.sticky.clone())
    }

    fn pending(&self) -> usize {
        self.queued.len()
    }
}

impl FaultInjector {
    /// Create an injector with nothing queued
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next commit with `error`
    pub fn fail_next_commit(&self, error: CommitError) {
        self.commits.lock().queued.push_back(error);
    }

    /// Fail every commit with `error` until [`FaultInjector::clear`]
    pub fn fail_all_commits(&self, error: CommitError) {
        self.commits.lock().sticky = Some(error);
    }

    /// Fail the next read with `error`
    pub fn fail_next_read(&self, error: ReadError) {
        self.reads.lock().queued.push_back(error);
    }

    /// Fail every read with `error` until [`FaultInjector::clear`]
    pub fn fail_all_reads(&self, error: ReadError) {
        self.reads.lock().sticky = Some(error);
    }

    /// Drop all queued and sticky faults
    pub fn clear(&self) {
        *self.commits.lock() = FaultQueue::default();
        *self.reads.lock() = FaultQueue::default();
    }

    /// Queued commit faults not yet consumed (sticky faults excluded)
    pub fn pending_commit_faults(&self) -> usize {
        self.commits.lock().pending()
    }

    /// Queued read faults not yet consumed (sticky faults excluded)
    pub fn pending_read_faults(&self) -> usize {
        self.reads.lock().pending()
    }

    pub(crate) fn take_commit_fault(&self) -> Option<CommitError> {
        self.commits.lock().take()
    }

    pub(crate) fn take_read_fault(&self) -> Option<ReadError> {
        self.reads.lock().take()
    }
}
