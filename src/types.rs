//! Public and internal option types for the stagepipe API and CLI.

use serde::Deserialize;

use crate::utils::config::{DEFAULT_CHANNEL_CAP, PackagePaths};

/// Which pipeline the CLI runs over its input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// One stage: sort the whole list.
    #[default]
    Sort,
    /// Three stages: halve, sort both halves, merge.
    Merge,
}

/// Lib options for [`Pipeline::with_opts`](crate::pipeline::Pipeline::with_opts).
#[derive(Clone, Debug)]
pub struct PipelineOpts {
    /// Capacity of every stage channel. 1 gives one value in flight per channel.
    pub channel_cap: usize,
    /// Stage threads are named `<prefix>-<stage name>`.
    pub thread_name_prefix: String,
    /// Stack size for stage threads. When None, the platform default.
    pub stack_size: Option<usize>,
}

impl Default for PipelineOpts {
    fn default() -> Self {
        Self {
            channel_cap: DEFAULT_CHANNEL_CAP,
            thread_name_prefix: PackagePaths::get().pkg_name().to_string(),
            stack_size: None,
        }
    }
}

impl From<&Opts> for PipelineOpts {
    fn from(o: &Opts) -> Self {
        PipelineOpts {
            channel_cap: o.channel_cap,
            ..Default::default()
        }
    }
}

/// Full options (CLI). Use [`PipelineOpts`] for lib.
#[derive(Clone, Debug)]
pub struct Opts {
    pub channel_cap: usize,
    pub mode: SortMode,
    /// Print the result as JSON instead of space-separated integers.
    pub json: bool,
    pub verbose: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            channel_cap: DEFAULT_CHANNEL_CAP,
            mode: SortMode::default(),
            json: false,
            verbose: false,
        }
    }
}
