//! One-shot stage: receive one value, transform it, send the result, exit.

use log::{debug, trace};
use std::sync::Arc;

use super::context::StageContext;

/// Named pure transformation `I -> O`, shared by every invocation of its pipeline.
pub struct Stage<I, O> {
    name: String,
    func: Arc<dyn Fn(I) -> O + Send + Sync>,
}

impl<I, O> Clone for Stage<I, O> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            func: Arc::clone(&self.func),
        }
    }
}

impl<I, O> Stage<I, O> {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(I) -> O + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Apply the transformation on the current thread.
    pub fn apply(&self, input: I) -> O {
        (self.func)(input)
    }

    /// Thread body. A disconnected upstream means the invocation is being torn down; the stage
    /// exits without sending, which in turn disconnects its own downstream.
    pub fn run(&self, ctx: StageContext<I, O>) {
        let StageContext {
            stage,
            index,
            input,
            output,
        } = ctx;
        let value = match input.recv() {
            Ok(v) => v,
            Err(_) => {
                debug!("stage {} `{}`: upstream closed, exiting", index, stage);
                return;
            }
        };
        trace!("stage {} `{}`: received", index, stage);
        let result = self.apply(value);
        if output.send(result).is_err() {
            debug!("stage {} `{}`: downstream closed, result dropped", index, stage);
            return;
        }
        trace!("stage {} `{}`: sent", index, stage);
    }
}
