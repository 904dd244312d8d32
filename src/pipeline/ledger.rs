//! Per-invocation accounting of channels and stage threads.
//!
//! Every channel and thread a pipeline acquires is counted here, so "nothing leaked after
//! `run` returned" is a checkable fact instead of a hope.

use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct ResourceLedger {
    channels_created: AtomicUsize,
    channels_disposed: AtomicUsize,
    threads_spawned: AtomicUsize,
    threads_joined: AtomicUsize,
}

/// Point-in-time copy of a [`ResourceLedger`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LedgerSnapshot {
    pub channels_created: usize,
    pub channels_disposed: usize,
    pub threads_spawned: usize,
    pub threads_joined: usize,
}

impl LedgerSnapshot {
    pub fn live_channels(&self) -> usize {
        self.channels_created.saturating_sub(self.channels_disposed)
    }

    pub fn live_threads(&self) -> usize {
        self.threads_spawned.saturating_sub(self.threads_joined)
    }

    /// True when everything acquired has been released.
    pub fn is_balanced(&self) -> bool {
        self.live_channels() == 0 && self.live_threads() == 0
    }
}

impl ResourceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new channel and return its id (1-based, in creation order).
    pub(crate) fn channel_created(&self) -> usize {
        self.channels_created.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub(crate) fn channel_disposed(&self) {
        self.channels_disposed.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn thread_spawned(&self) {
        self.threads_spawned.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn thread_joined(&self) {
        self.threads_joined.fetch_add(1, Ordering::SeqCst);
    }

    pub fn live_threads(&self) -> usize {
        self.snapshot().live_threads()
    }

    /// Release counters are read before acquire counters, so a snapshot taken while other
    /// invocations share the ledger never shows more released than acquired.
    pub fn snapshot(&self) -> LedgerSnapshot {
        let channels_disposed = self.channels_disposed.load(Ordering::SeqCst);
        let threads_joined = self.threads_joined.load(Ordering::SeqCst);
        LedgerSnapshot {
            channels_created: self.channels_created.load(Ordering::SeqCst),
            channels_disposed,
            threads_spawned: self.threads_spawned.load(Ordering::SeqCst),
            threads_joined,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_live_counts_never_underflow() {
        let snap = LedgerSnapshot {
            channels_created: 1,
            channels_disposed: 2,
            threads_spawned: 0,
            threads_joined: 1,
        };
        assert_eq!(snap.live_channels(), 0);
        assert_eq!(snap.live_threads(), 0);
    }

    #[test]
    fn test_snapshot_under_concurrent_use() {
        let ledger = std::sync::Arc::new(ResourceLedger::new());
        let workers: Vec<_> = (0..4)
            .map(|_| {
                let ledger = std::sync::Arc::clone(&ledger);
                std::thread::spawn(move || {
                    for _ in 0..1_000 {
                        ledger.channel_created();
                        ledger.thread_spawned();
                        ledger.thread_joined();
                        ledger.channel_disposed();
                    }
                })
            })
            .collect();
        for _ in 0..1_000 {
            let snap = ledger.snapshot();
            assert!(snap.channels_disposed <= snap.channels_created);
            assert!(snap.threads_joined <= snap.threads_spawned);
        }
        for w in workers {
            w.join().unwrap();
        }
        assert!(ledger.snapshot().is_balanced());
    }
}
