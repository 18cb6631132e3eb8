//! Resolve configuration and data directories for `flagpick`.
//!
//! The helpers in this module respect environment overrides while falling back
//! to platform-appropriate locations provided by the `directories` crate.

use std::env;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "flagpick";
const APPLICATION: &str = "flagpick";

const CONFIG_DIR_ENV: &str = "FLAGPICK_CONFIG_DIR";
const DATA_DIR_ENV: &str = "FLAGPICK_DATA_DIR";

/// File name of the log written under the data directory.
pub const LOG_FILE_NAME: &str = "flagpick.log";

fn project_dirs() -> Result<ProjectDirs> {
	ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
		.ok_or_else(|| anyhow!("unable to determine project directories for flagpick"))
}

/// Resolve an override directory from an environment variable.
///
/// An empty string is treated the same as an unset value.
fn dir_from_env(name: &str) -> Option<PathBuf> {
	let value = env::var_os(name)?;
	if value.is_empty() {
		None
	} else {
		Some(PathBuf::from(value))
	}
}

/// Return the directory holding the user's `config.toml`.
pub fn get_config_dir() -> Result<PathBuf> {
	if let Some(dir) = dir_from_env(CONFIG_DIR_ENV) {
		return Ok(dir);
	}

	Ok(project_dirs()?.config_local_dir().to_path_buf())
}

/// Return the data directory that stores the log file.
pub fn get_data_dir() -> Result<PathBuf> {
	if let Some(dir) = dir_from_env(DATA_DIR_ENV) {
		return Ok(dir);
	}

	Ok(project_dirs()?.data_local_dir().to_path_buf())
}

/// Default location of the log file.
pub fn default_log_file() -> Result<PathBuf> {
	Ok(get_data_dir()?.join(LOG_FILE_NAME))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unset_override_is_ignored() {
		assert_eq!(dir_from_env("FLAGPICK_TEST_DIR_THAT_IS_NEVER_SET"), None);
	}

	#[test]
	fn log_file_lives_in_data_dir() {
		if let (Ok(data), Ok(log)) = (get_data_dir(), default_log_file()) {
			assert_eq!(log, data.join(LOG_FILE_NAME));
		}
	}
}
