use colored::Colorize;
use env_logger::Builder;
use log::{Level, LevelFilter};
use std::io::Write;

/// Install the CLI logger. Dependencies log warnings only; this crate logs at Info, or Debug
/// when `verbose`. `RUST_LOG` still applies on top.
pub fn setup_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let installed = Builder::from_default_env()
        .filter_level(LevelFilter::Warn)
        .filter_module(env!("CARGO_PKG_NAME"), level)
        .format(|buf, record| {
            let name = env!("CARGO_PKG_NAME");
            let line = match record.level() {
                Level::Error | Level::Warn => {
                    let level_str = match record.level() {
                        Level::Warn => "WARN".yellow(),
                        _ => "ERROR".red(),
                    };
                    let target = record.target().to_string().white();
                    format!("[{} {} {}] {}", name.cyan(), level_str, target, record.args())
                }
                _ => format!("[{}] {}", name.cyan(), record.args()),
            };
            writeln!(buf, "{}", line)
        })
        .try_init();
    if let Err(e) = installed {
        eprintln!("[{}] logger not installed: {}", env!("CARGO_PKG_NAME"), e);
    }
}
