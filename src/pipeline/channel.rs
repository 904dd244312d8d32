//! Bounded, typed hand-off points between stages and the disposal bookkeeping around them.

use crossbeam_channel::{Receiver, Sender, bounded};
use log::{debug, warn};
use std::sync::Arc;

use super::error_handler::PipelineError;
use super::ledger::ResourceLedger;
use crate::utils::config::MAX_CHANNEL_CAP;

/// Bounded FIFO between one producer and one consumer. A sent value is received exactly once,
/// in send order. With capacity 1 a send blocks until the previous value has been taken.
pub struct Channel<T> {
    tx: Sender<T>,
    rx: Receiver<T>,
    record: ChannelRecord,
}

impl<T> Channel<T> {
    pub fn create(capacity: usize, ledger: &Arc<ResourceLedger>) -> Result<Self, PipelineError> {
        if capacity == 0 || capacity > MAX_CHANNEL_CAP {
            return Err(PipelineError::InvalidCapacity(capacity));
        }
        let (tx, rx) = bounded::<T>(capacity);
        let id = ledger.channel_created();
        debug!("channel #{} created (capacity {})", id, capacity);
        Ok(Self {
            tx,
            rx,
            record: ChannelRecord {
                id,
                capacity,
                disposed: false,
                ledger: Arc::clone(ledger),
            },
        })
    }

    pub fn id(&self) -> usize {
        self.record.id
    }

    pub fn capacity(&self) -> usize {
        self.record.capacity
    }

    /// Values sent but not yet received.
    pub fn occupancy(&self) -> usize {
        self.rx.len()
    }

    /// Blocks while the channel is at capacity.
    pub fn send(&self, value: T) -> Result<(), PipelineError> {
        self.tx
            .send(value)
            .map_err(|_| PipelineError::Disconnected {
                stage: format!("channel #{}", self.record.id),
            })
    }

    /// Blocks until a value is available.
    pub fn recv(&self) -> Result<T, PipelineError> {
        self.rx.recv().map_err(|_| PipelineError::Disconnected {
            stage: format!("channel #{}", self.record.id),
        })
    }

    /// Hand the endpoints to their users; the record stays with the orchestrator for disposal.
    pub fn split(self) -> (Sender<T>, Receiver<T>, ChannelRecord) {
        (self.tx, self.rx, self.record)
    }

    pub fn dispose(self) -> Result<(), PipelineError> {
        let (tx, rx, mut record) = self.split();
        drop(tx);
        drop(rx);
        record.dispose()
    }
}

/// Type-erased disposal handle of one channel, owned by the orchestrator.
#[derive(Debug)]
pub struct ChannelRecord {
    id: usize,
    capacity: usize,
    disposed: bool,
    ledger: Arc<ResourceLedger>,
}

impl ChannelRecord {
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Dispose exactly once, and only after every stage thread of the ledger has been joined.
    pub fn dispose(&mut self) -> Result<(), PipelineError> {
        if self.disposed {
            return Err(PipelineError::DoubleDispose { channel: self.id });
        }
        let live = self.ledger.live_threads();
        if live > 0 {
            return Err(PipelineError::DisposeWhileInUse {
                channel: self.id,
                live,
            });
        }
        self.disposed = true;
        self.ledger.channel_disposed();
        debug!("channel #{} disposed", self.id);
        Ok(())
    }
}

impl Drop for ChannelRecord {
    fn drop(&mut self) {
        if !self.disposed
            && let Err(e) = self.dispose()
        {
            warn!("{}", e);
        }
    }
}

/// All channel records of one invocation, disposed together after the crew has joined.
#[derive(Debug, Default)]
pub struct ChannelSet {
    records: Vec<ChannelRecord>,
}

impl ChannelSet {
    pub fn push(&mut self, record: ChannelRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Dispose every record that is still live. Stops at the first violation.
    pub fn dispose_all(&mut self) -> Result<(), PipelineError> {
        for record in self.records.iter_mut().filter(|r| !r.is_disposed()) {
            record.dispose()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_capacity_rejected() {
        let ledger = Arc::new(ResourceLedger::new());
        assert!(matches!(
            Channel::<i32>::create(0, &ledger),
            Err(PipelineError::InvalidCapacity(0))
        ));
        assert_eq!(ledger.snapshot().channels_created, 0);
    }

    #[test]
    fn test_occupancy_tracks_in_flight_values() {
        let ledger = Arc::new(ResourceLedger::new());
        let chan = Channel::create(2, &ledger).unwrap();
        assert_eq!(chan.occupancy(), 0);
        chan.send(1).unwrap();
        chan.send(2).unwrap();
        assert_eq!(chan.occupancy(), 2);
        assert_eq!(chan.recv().unwrap(), 1);
        assert_eq!(chan.occupancy(), 1);
        chan.dispose().unwrap();
        assert!(ledger.snapshot().is_balanced());
    }

    #[test]
    fn test_record_dispose_twice_is_flagged() {
        let ledger = Arc::new(ResourceLedger::new());
        let (_tx, _rx, mut record) = Channel::<u8>::create(1, &ledger).unwrap().split();
        record.dispose().unwrap();
        assert!(matches!(
            record.dispose(),
            Err(PipelineError::DoubleDispose { channel: 1 })
        ));
        assert_eq!(ledger.snapshot().channels_disposed, 1);
    }

    #[test]
    fn test_dropped_record_is_disposed() {
        let ledger = Arc::new(ResourceLedger::new());
        {
            let mut set = ChannelSet::default();
            let (_tx, _rx, record) = Channel::<u8>::create(1, &ledger).unwrap().split();
            set.push(record);
        }
        assert!(ledger.snapshot().is_balanced());
    }
}
