//! Broker activity counters
//!
//! Counters are plain atomics bumped on the hot path; read them through
//! [`BrokerMetrics::snapshot`].

use std::sync::atomic::{AtomicU64, Ordering};

use crate::modification::ModificationKind;

/// Live counters for one broker
#[derive(Debug, Default)]
pub struct BrokerMetrics {
    read_opened: AtomicU64,
    read_released: AtomicU64,
    write_opened: AtomicU64,
    write_released: AtomicU64,
    staged_puts: AtomicU64,
    staged_merges: AtomicU64,
    staged_deletes: AtomicU64,
    reads: AtomicU64,
    reads_failed: AtomicU64,
    commits_succeeded: AtomicU64,
    commits_failed: AtomicU64,
    cancelled: AtomicU64,
}

impl BrokerMetrics {
    /// Create zeroed counters
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn read_opened(&self) {
        self.read_opened.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn read_released(&self) {
        self.read_released.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn write_opened(&self) {
        self.write_opened.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn write_released(&self) {
        self.write_released.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn staged(&self, kind: ModificationKind) {
        let counter = match kind {
            ModificationKind::Put => &self.staged_puts,
            ModificationKind::Merge => &self.staged_merges,
            ModificationKind::Delete => &self.staged_deletes,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn read(&self, ok: bool) {
        self.reads.fetch_add(1, Ordering::Relaxed);
        if !ok {
            self.reads_failed.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn commit(&self, ok: bool) {
        if ok {
            self.commits_succeeded.fetch_add(1, Ordering::Relaxed);
        } else {
            self.commits_failed.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn cancelled(&self) {
        self.cancelled.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            read_transactions_opened: self.read_opened.load(Ordering::Relaxed),
            read_transactions_released: self.read_released.load(Ordering::Relaxed),
            write_transactions_opened: self.write_opened.load(Ordering::Relaxed),
            write_transactions_released: self.write_released.load(Ordering::Relaxed),
            staged_puts: self.staged_puts.load(Ordering::Relaxed),
            staged_merges: self.staged_merges.load(Ordering::Relaxed),
            staged_deletes: self.staged_deletes.load(Ordering::Relaxed),
            reads: self.reads.load(Ordering::Relaxed),
            reads_failed: self.reads_failed.load(Ordering::Relaxed),
            commits_succeeded: self.commits_succeeded.load(Ordering::Relaxed),
            commits_failed: self.commits_failed.load(Ordering::Relaxed),
            cancelled: self.cancelled.load(Ordering::Relaxed),
        }
    }
}

/// Broker metrics at one point in time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Read transactions handed out
    pub read_transactions_opened: u64,
    /// Read transactions closed or dropped
    pub read_transactions_released: u64,
    /// Write transactions handed out
    pub write_transactions_opened: u64,
    /// Write transactions dropped
    pub write_transactions_released: u64,
    /// Put modifications staged
    pub staged_puts: u64,
    /// Merge modifications staged
    pub staged_merges: u64,
    /// Delete modifications staged
    pub staged_deletes: u64,
    /// Reads requested
    pub reads: u64,
    /// Reads that resolved to an error
    pub reads_failed: u64,
    /// Commits applied
    pub commits_succeeded: u64,
    /// Commits rejected
    pub commits_failed: u64,
    /// Transactions cancelled while open
    pub cancelled: u64,
}

impl MetricsSnapshot {
    /// Total modifications staged, of any kind
    pub fn staged_operations(&self) -> u64 {
        self.staged_puts + self.staged_merges + self.staged_deletes
    }

    /// Total transactions handed out, of either kind
    pub fn transactions_opened(&self) -> u64 {
        self.read_transactions_opened + self.write_transactions_opened
    }

    /// Transactions handed out but not yet released
    ///
    /// Counters are loaded one by one, so a snapshot taken under load may
    /// see a release without its open; that reads as zero outstanding.
    pub fn transactions_outstanding(&self) -> u64 {
        self.transactions_opened()
            .saturating_sub(self.read_transactions_released + self.write_transactions_released)
    }

    /// Commit success rate (0.0 - 1.0), 1.0 when nothing was submitted
    pub fn commit_rate(&self) -> f64 {
        let total = self.commits_succeeded + self.commits_failed;
        if total == 0 {
            1.0
        } else {
            self.commits_succeeded as f64 / total as f64
        }
    }
}
