//! Stage start arguments and invocation tuning.

use crossbeam_channel::{Receiver, Sender};

use super::error_handler::PipelineError;
use crate::PipelineOpts;
use crate::utils::config::MAX_CHANNEL_CAP;

/// Tuning derived from [`PipelineOpts`]: channel capacity and how stage threads are built.
#[derive(Clone, Debug)]
pub struct PipelineTuning {
    /// Capacity of every stage channel. 1 gives strict one-value-in-flight hand-offs.
    pub channel_cap: usize,
    /// Stage threads are named `<prefix>-<stage>`.
    pub thread_name_prefix: String,
    pub stack_size: Option<usize>,
}

impl PipelineTuning {
    pub fn from_opts(opts: &PipelineOpts) -> Result<Self, PipelineError> {
        if opts.channel_cap == 0 || opts.channel_cap > MAX_CHANNEL_CAP {
            return Err(PipelineError::InvalidCapacity(opts.channel_cap));
        }
        Ok(Self {
            channel_cap: opts.channel_cap,
            thread_name_prefix: opts.thread_name_prefix.clone(),
            stack_size: opts.stack_size,
        })
    }

    pub fn thread_name(&self, stage: &str) -> String {
        format!("{}-{}", self.thread_name_prefix, stage)
    }
}

impl Default for PipelineTuning {
    fn default() -> Self {
        let opts = PipelineOpts::default();
        Self {
            channel_cap: opts.channel_cap,
            thread_name_prefix: opts.thread_name_prefix,
            stack_size: opts.stack_size,
        }
    }
}

/// Everything a spawned stage needs, passed explicitly as its start argument: the endpoint it
/// receives from and the endpoint it sends to. The stage owns neither channel.
pub struct StageContext<I, O> {
    pub stage: String,
    /// 1-based position in the chain; the caller is stage 0.
    pub index: usize,
    pub input: Receiver<I>,
    pub output: Sender<O>,
}
