//! Load `.stagepipe.toml` from a directory (CLI only). Lib callers pass `PipelineOpts` directly.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::utils::config::PackagePaths;
use crate::{Opts, SortMode};

#[derive(Debug, Deserialize)]
pub(crate) struct PipeToml {
    #[serde(default)]
    settings: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
struct SettingsSection {
    channel_cap: Option<usize>,
    mode: Option<SortMode>,
    json: Option<bool>,
    verbose: Option<bool>,
}

/// Load the config file from `dir` if present. `Ok(None)` if missing or unreadable; a file that
/// does not parse is an error for the caller to report once logging is up.
pub(crate) fn load_pipe_toml(dir: &Path) -> Result<Option<PipeToml>> {
    let path = dir.join(PackagePaths::get().config_filename());
    let Ok(s) = std::fs::read_to_string(&path) else {
        return Ok(None);
    };
    parse_pipe_toml(&s)
        .map(Some)
        .with_context(|| format!("ignoring {}", path.display()))
}

pub(crate) fn parse_pipe_toml(s: &str) -> Result<PipeToml, toml::de::Error> {
    toml::from_str(s)
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($section:expr, $opts:expr, $field:ident) => {
        if let Some(v) = $section.$field {
            $opts.$field = v;
        }
    };
}

/// Apply file config to opts (only fields present in the file). Call before applying CLI flags.
pub(crate) fn apply_file_to_opts(file: &PipeToml, opts: &mut Opts) {
    let s = &file.settings;
    apply_file_opt!(s, opts, channel_cap);
    apply_file_opt!(s, opts, mode);
    apply_file_opt!(s, opts, json);
    apply_file_opt!(s, opts, verbose);
}
