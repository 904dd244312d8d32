//! Scoped ownership of the stage threads of one invocation.

use log::{debug, warn};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use super::context::PipelineTuning;
use super::error_handler::{PipelineError, check_join};
use super::ledger::ResourceLedger;

/// Spawned stage threads. Dropping a crew joins whatever is still running, so no exit path of
/// the orchestrator can get past it with a live stage thread.
pub struct Crew {
    handles: Vec<(String, JoinHandle<()>)>,
    ledger: Arc<ResourceLedger>,
    tuning: PipelineTuning,
}

impl Crew {
    pub fn new(ledger: &Arc<ResourceLedger>, tuning: &PipelineTuning) -> Self {
        Self {
            handles: Vec::new(),
            ledger: Arc::clone(ledger),
            tuning: tuning.clone(),
        }
    }

    pub fn spawn<F>(&mut self, stage: &str, body: F) -> Result<(), PipelineError>
    where
        F: FnOnce() + Send + 'static,
    {
        let mut builder = thread::Builder::new().name(self.tuning.thread_name(stage));
        if let Some(size) = self.tuning.stack_size {
            builder = builder.stack_size(size);
        }
        let handle = builder
            .spawn(body)
            .map_err(|source| PipelineError::Spawn {
                stage: stage.to_string(),
                source,
            })?;
        self.ledger.thread_spawned();
        debug!("spawned stage `{}`", stage);
        self.handles.push((stage.to_string(), handle));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Join every thread, in spawn order. All threads are joined even if one panicked; the
    /// first panic is returned.
    pub fn join_all(&mut self) -> Result<(), PipelineError> {
        let mut first_err = None;
        for (stage, handle) in self.handles.drain(..) {
            let joined = handle.join();
            self.ledger.thread_joined();
            debug!("joined stage `{}`", stage);
            if let Err(e) = check_join(&stage, joined) {
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Drop for Crew {
    fn drop(&mut self) {
        if self.handles.is_empty() {
            return;
        }
        if let Err(e) = self.join_all() {
            warn!("{}", e);
        }
    }
}
