//! Logging through the `log` facade with an `env_logger` backend.
//!
//! The terminal UI owns the screen, so records go to a log file under the
//! application state directory. When that file cannot be opened they fall
//! back to stderr. `RUST_LOG`, when set, takes precedence over the CLI flags.

use env_logger::{Builder, Target};
use log::LevelFilter;
use std::env;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::app_dirs::AppDirs;

/// Map `-q` / `-v` counts to a level filter.
pub fn determine_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Initialize logging once at startup. Later calls are ignored.
pub fn init_logging(verbose: u8, quiet: bool) {
    let mut builder = Builder::new();

    if env::var("RUST_LOG").is_ok() {
        builder.parse_default_env();
    } else {
        builder.filter_level(determine_level(verbose, quiet));
    }

    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} {:<5} {}: {}",
            buf.timestamp_seconds(),
            record.level(),
            record.module_path().unwrap_or("quizr"),
            record.args()
        )
    });

    if let Some(file) = AppDirs::log_path().and_then(|p| open_log_file(&p)) {
        builder.target(Target::Pipe(Box::new(file)));
    }

    if builder.try_init().is_ok() {
        log::debug!("logging initialized");
    }
}

fn open_log_file(path: &Path) -> Option<fs::File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}
