//! Application configuration constants.

use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    pkg_name: &'static str,
    config_filename: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                pkg_name: pkg,
                config_filename: format!(".{pkg}.toml"),
            }
        })
    }

    pub fn pkg_name(&self) -> &str {
        self.pkg_name
    }

    /// Optional per-directory config file read by the CLI.
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }
}

// ---- Channels ----

/// One value in flight per channel: a send blocks until the receiver took the previous value.
pub const DEFAULT_CHANNEL_CAP: usize = 1;

/// Upper bound on a configured channel capacity.
pub const MAX_CHANNEL_CAP: usize = 1 << 16;
