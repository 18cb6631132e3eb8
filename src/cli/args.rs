use std::fmt::Write;
use std::path::PathBuf;

use clap::{
	ArgAction, ColorChoice, CommandFactory, FromArgMatches, Parser, ValueEnum,
	builder::{
		Styles,
		styling::{AnsiColor, Effects},
	},
};
use flagpick::app_dirs;
use flagpick::data::RegionKind;
use flagpick::picker::AnimationMode;

/// Produce the full version banner including config and data directories.
fn long_version() -> &'static str {
	let config_dir = match app_dirs::get_config_dir() {
		Ok(path) => path.display().to_string(),
		Err(err) => format!("unavailable ({err})"),
	};
	let data_dir = match app_dirs::get_data_dir() {
		Ok(path) => path.display().to_string(),
		Err(err) => format!("unavailable ({err})"),
	};

	let mut details = env!("CARGO_PKG_VERSION").to_string();
	let _ = writeln!(details);
	let _ = writeln!(details, "config directory: {config_dir}");
	let _ = writeln!(details, "data directory: {data_dir}");

	Box::leak(details.into_boxed_str())
}

/// Create the clap styles used for custom colour output.
fn cli_styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Green.on_default().effects(Effects::BOLD))
		.usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
		.literal(AnsiColor::Cyan.on_default())
		.placeholder(AnsiColor::Yellow.on_default())
}

/// Parse command line arguments into the strongly typed [`CliArgs`] structure.
pub(crate) fn parse_cli() -> CliArgs {
	let mut matches = CliArgs::command().get_matches();
	CliArgs::from_arg_matches_mut(&mut matches).unwrap_or_else(|err| err.exit())
}

#[derive(Parser, Debug)]
#[command(
	name = "flagpick",
	version,
	long_version = long_version(),
	about = "Pick a country or US state from a filterable terminal list",
	color = ColorChoice::Auto,
	styles = cli_styles()
)]
/// Command-line arguments accepted by the `flagpick` binary.
pub(crate) struct CliArgs {
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "FLAGPICK_CONFIG",
		action = ArgAction::Append,
		help = "Additional configuration file to merge (default: none)"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		help = "Skip loading default configuration files (default: disabled)"
	)]
	pub(crate) no_config: bool,
	#[arg(
		short = 'r',
		long,
		value_enum,
		help = "Reference table to pick from (default: countries)"
	)]
	pub(crate) region: Option<RegionArg>,
	#[arg(
		short = 't',
		long,
		value_name = "CODE",
		help = "Translation used for names, e.g. fra or deu (default: eng)"
	)]
	pub(crate) translation: Option<String>,
	#[arg(
		long,
		value_name = "CODE",
		help = "Code shown on the trigger before anything is picked (default: none)"
	)]
	pub(crate) current: Option<String>,
	#[arg(
		long,
		value_delimiter = ',',
		value_name = "CODES",
		help = "Comma-separated codes to offer (default: the whole table)"
	)]
	pub(crate) only: Option<Vec<String>>,
	#[arg(
		short = 'x',
		long,
		value_delimiter = ',',
		value_name = "CODES",
		help = "Comma-separated codes to hide (default: none)"
	)]
	pub(crate) exclude: Option<Vec<String>>,
	#[arg(long = "no-filter", help = "Hide the filter input (default: shown)")]
	pub(crate) no_filter: bool,
	#[arg(long = "no-close", help = "Hide the close control (default: shown)")]
	pub(crate) no_close: bool,
	#[arg(
		long = "no-autofocus",
		help = "Do not focus the filter when the modal opens (default: focused)"
	)]
	pub(crate) no_autofocus: bool,
	#[arg(long, help = "Render the trigger inert (default: disabled)")]
	pub(crate) disabled: bool,
	#[arg(
		long,
		help = "Keep the host screen visible around the modal (default: disabled)"
	)]
	pub(crate) transparent: bool,
	#[arg(
		short = 'a',
		long,
		value_enum,
		help = "Modal open animation (default: none)"
	)]
	pub(crate) animation: Option<AnimationArg>,
	#[arg(
		long,
		value_name = "THEME",
		help = "Select a theme by name (default: library theme)"
	)]
	pub(crate) theme: Option<String>,
	#[arg(
		long = "log-level",
		value_name = "LEVEL",
		env = "FLAGPICK_LOG",
		help = "Log verbosity: off, error, warn, info, debug or trace (default: info)"
	)]
	pub(crate) log_level: Option<String>,
	#[arg(
		long = "log-file",
		value_name = "PATH",
		help = "Write the log here instead of the data directory (default: data directory)"
	)]
	pub(crate) log_file: Option<PathBuf>,
	#[arg(
		short = 'p',
		long = "print-config",
		help = "Print the resolved configuration before running (default: disabled)"
	)]
	pub(crate) print_config: bool,
	#[arg(
		short = 'l',
		long = "list-themes",
		help = "List supported themes and exit (default: disabled)"
	)]
	pub(crate) list_themes: bool,
	#[arg(short = 'o', long = "output", value_enum, default_value_t = OutputFormat::Plain, help = "Choose how to print the result")]
	pub(crate) output: OutputFormat,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
/// Reference tables selectable from the CLI.
pub(crate) enum RegionArg {
	Countries,
	States,
}

impl From<RegionArg> for RegionKind {
	fn from(value: RegionArg) -> Self {
		match value {
			RegionArg::Countries => RegionKind::Countries,
			RegionArg::States => RegionKind::States,
		}
	}
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
/// Open animations selectable from the CLI.
pub(crate) enum AnimationArg {
	Slide,
	Fade,
	None,
}

impl From<AnimationArg> for AnimationMode {
	fn from(value: AnimationArg) -> Self {
		match value {
			AnimationArg::Slide => AnimationMode::Slide,
			AnimationArg::Fade => AnimationMode::Fade,
			AnimationArg::None => AnimationMode::None,
		}
	}
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
/// Output formats supported by the CLI utility.
pub(crate) enum OutputFormat {
	Plain,
	Json,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn command_supports_custom_styles() {
		let command = CliArgs::command();
		assert!(command.get_about().is_some());
		command.debug_assert();
	}

	#[test]
	fn parse_cli_accepts_default_arguments() {
		let parsed = CliArgs::try_parse_from(["flagpick"]).expect("parses");
		assert_eq!(parsed.output, OutputFormat::Plain);
		assert_eq!(parsed.region, None);
		assert!(!parsed.no_filter);
	}

	#[test]
	fn code_lists_split_on_commas() {
		let parsed = CliArgs::try_parse_from([
			"flagpick",
			"--only",
			"US,FR,DE",
			"-x",
			"DE",
			"--region",
			"countries",
			"--animation",
			"slide",
		])
		.expect("parses");
		assert_eq!(
			parsed.only,
			Some(vec!["US".to_string(), "FR".to_string(), "DE".to_string()])
		);
		assert_eq!(parsed.exclude, Some(vec!["DE".to_string()]));
		assert_eq!(parsed.region.map(RegionKind::from), Some(RegionKind::Countries));
		assert_eq!(parsed.animation.map(AnimationMode::from), Some(AnimationMode::Slide));
	}
}
