//! Runtime errors for a pipeline invocation. Domain failures never show up here; they travel as
//! arms of a stage's output sum.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Thread creation failed. Fatal for the whole invocation, no partial results.
    #[error("failed to spawn thread for stage `{stage}`")]
    Spawn {
        stage: String,
        #[source]
        source: std::io::Error,
    },

    #[error("stage `{stage}` panicked")]
    StagePanicked { stage: String },

    /// The peer endpoint of a hand-off went away before the value was exchanged.
    #[error("hand-off at stage `{stage}` disconnected before a value was exchanged")]
    Disconnected { stage: String },

    #[error("channel #{channel} disposed twice")]
    DoubleDispose { channel: usize },

    #[error("channel #{channel} disposed while {live} stage thread(s) may still use it")]
    DisposeWhileInUse { channel: usize, live: usize },

    #[error("invalid channel capacity {0} (expected 1..={max})", max = crate::utils::config::MAX_CHANNEL_CAP)]
    InvalidCapacity(usize),
}

/// Map a panicked join to a named error; used by [`Crew`](super::Crew) after every join.
pub fn check_join<T>(
    stage: &str,
    joined: std::thread::Result<T>,
) -> Result<T, PipelineError> {
    joined.map_err(|_| PipelineError::StagePanicked {
        stage: stage.to_string(),
    })
}
