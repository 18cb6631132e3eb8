//! File logging for the binary.
//!
//! The terminal belongs to the TUI while the picker runs, so log records go
//! to a file through a `fern` dispatcher. Library code only talks to the
//! `log` facade.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use chrono::Local;
use log::LevelFilter;

use crate::app_dirs;

/// Level used when neither the CLI nor the environment picks one.
pub const DEFAULT_LEVEL: LevelFilter = LevelFilter::Info;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Install the global logger writing to `file`, or to the default log file
/// under the data directory. Returns the path in use.
pub fn initialize(level: LevelFilter, file: Option<&Path>) -> Result<PathBuf> {
	let path = match file {
		Some(path) => path.to_path_buf(),
		None => app_dirs::default_log_file()?,
	};
	if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
		fs::create_dir_all(parent)
			.with_context(|| format!("failed to create log directory {}", parent.display()))?;
	}

	let output = fern::log_file(&path)
		.with_context(|| format!("failed to open log file {}", path.display()))?;
	fern::Dispatch::new()
		.format(|out, message, record| {
			out.finish(format_args!(
				"{}",
				format_record(
					&Local::now().format(TIMESTAMP_FORMAT).to_string(),
					record.level(),
					record.target(),
					message
				)
			));
		})
		.level(level)
		.chain(output)
		.apply()
		.context("a global logger is already installed")?;

	log::info!("logging at {level} to {}", path.display());
	Ok(path)
}

/// Parse a level name such as `debug` or `off`.
pub fn parse_level(value: &str) -> Result<LevelFilter> {
	value
		.trim()
		.parse::<LevelFilter>()
		.with_context(|| format!("unknown log level '{value}', expected off, error, warn, info, debug or trace"))
}

fn format_record(
	timestamp: &str,
	level: log::Level,
	target: &str,
	message: &fmt::Arguments<'_>,
) -> String {
	format!("{timestamp} {level:<5} {target}: {message}")
}
