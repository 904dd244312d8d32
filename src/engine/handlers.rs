//! CLI command handler: resolve options, read input, run the selected pipeline, print.

use anyhow::{Context, Result};
use log::{debug, warn};
use std::io::Read;
use std::path::Path;

use crate::engine::arg_parser::Cli;
use crate::engine::sort::{merge_sort_pipeline, sort_pipeline};
use crate::pipeline::run_pipeline;
use crate::utils::pipe_toml::{apply_file_to_opts, load_pipe_toml};
use crate::utils::setup_logging;
use crate::value::List;
use crate::{Opts, PipelineOpts, SortMode};

/// Defaults, then `.stagepipe.toml` in `dir`, then CLI flags. A config file that fails to parse
/// is skipped and handed back so it can be logged after the logger is installed.
pub fn resolve_opts(cli: &Cli, dir: &Path) -> (Opts, Option<anyhow::Error>) {
    let mut opts = Opts::default();
    let mut file_err = None;
    match load_pipe_toml(dir) {
        Ok(Some(file)) => apply_file_to_opts(&file, &mut opts),
        Ok(None) => {}
        Err(e) => file_err = Some(e),
    }
    if let Some(cap) = cli.cap {
        opts.channel_cap = cap;
    }
    if let Some(mode) = cli.mode {
        opts.mode = mode;
    }
    if let Some(json) = cli.json {
        opts.json = json;
    }
    if let Some(verbose) = cli.verbose {
        opts.verbose = verbose;
    }
    (opts, file_err)
}

/// Parse whitespace-separated integers.
pub fn parse_values(s: &str) -> Result<List<i32>> {
    s.split_whitespace()
        .map(|tok| {
            tok.parse::<i32>()
                .with_context(|| format!("not an integer: {:?}", tok))
        })
        .collect::<Result<Vec<_>>>()
        .map(List::from)
}

fn read_input(cli: &Cli) -> Result<List<i32>> {
    if !cli.values.is_empty() {
        return Ok(List::from(cli.values.clone()));
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("read integers from stdin")?;
    parse_values(&buf)
}

/// Run the pipeline chosen by `opts` over `input`.
pub fn run_mode(input: List<i32>, opts: &Opts) -> Result<List<i32>> {
    let pipeline = match opts.mode {
        SortMode::Sort => sort_pipeline(),
        SortMode::Merge => merge_sort_pipeline(),
    };
    debug!(
        "Running [{}] with channel capacity {}",
        pipeline.stage_names().join(" -> "),
        opts.channel_cap
    );
    run_pipeline(&pipeline, input, &PipelineOpts::from(opts))
}

pub fn format_output(list: &List<i32>, json: bool) -> Result<String> {
    if json {
        return serde_json::to_string(list).context("serialize result");
    }
    Ok(list
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" "))
}

pub fn handle_run(cli: &Cli) -> Result<()> {
    let cwd = std::env::current_dir().context("resolve working directory")?;
    let (opts, file_err) = resolve_opts(cli, &cwd);
    setup_logging(opts.verbose);
    if let Some(e) = file_err {
        warn!("{:#}", e);
    }
    let input = read_input(cli)?;
    debug!("Sorting {} values", input.size());
    let sorted = run_mode(input, &opts)?;
    println!("{}", format_output(&sorted, opts.json)?);
    Ok(())
}
