use clap::Parser;

use crate::SortMode;

/// Sort a list of integers through a channel-staged pipeline.
#[derive(Clone, Parser)]
#[command(name = "stagepipe")]
#[command(about = "Sort integers through a threaded stage pipeline. Reads stdin when no values are given.")]
pub struct Cli {
    /// Integers to sort. When empty, whitespace-separated integers are read from stdin.
    #[arg(value_name = "INTS", allow_negative_numbers = true)]
    pub values: Vec<i32>,

    /// Pipeline to run: `sort` (one stage) or `merge` (halve, sort halves, merge).
    #[arg(long, value_enum)]
    pub mode: Option<SortMode>,

    /// Capacity of every stage channel.
    #[arg(long, short = 'c', value_parser = clap::value_parser!(usize))]
    pub cap: Option<usize>,

    /// Print the result as JSON.
    #[arg(long, short = 'j', num_args = 0..=1, require_equals = true, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub json: Option<bool>,

    /// Verbose output.
    #[arg(long, short = 'v', num_args = 0..=1, require_equals = true, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,
}
